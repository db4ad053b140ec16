//! Page rendering and the contact form.

use std::fs;
use std::io::Write;
use std::path::Path;

use aqua_aura_storefront::contact::ContactForm;
use aqua_aura_storefront::{AppState, LocalStorage, View};

/// Render `view` as HTML to `path`, or to `out` when no path is given.
///
/// # Errors
///
/// Returns an error if rendering or writing fails.
pub fn render<S: LocalStorage>(
    state: &AppState<S>,
    view: View,
    path: Option<&Path>,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let html = state.render_html(view)?;
    match path {
        Some(path) => {
            fs::write(path, &html)?;
            tracing::info!(view = %view, path = %path.display(), bytes = html.len(), "Page rendered");
        }
        None => out.write_all(html.as_bytes())?,
    }
    Ok(())
}

/// Submit the contact form.
///
/// # Errors
///
/// Returns an error if the form does not validate or writing fails.
pub fn contact<S: LocalStorage>(
    state: &AppState<S>,
    name: String,
    email: String,
    message: String,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut form = ContactForm {
        name,
        email,
        message,
    };
    let page = state.submit_contact(&mut form)?;
    if let Some(notice) = &page.notice {
        writeln!(out, "{}", notice.message)?;
    }
    Ok(())
}
