//! Catalog listing.

use std::io::Write;

use aqua_aura_storefront::{AppState, LocalStorage};

/// Print every product with its ID and price.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn list<S: LocalStorage>(
    state: &AppState<S>,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    for product in state.catalog().products() {
        writeln!(
            out,
            "{:>3}  {:<30} {:>8}  {}",
            product.id,
            product.name,
            product.price.display(),
            product.description
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{output, state};

    #[test]
    fn test_list_prints_every_product() {
        let mut buf = Vec::new();
        list(&state(), &mut buf).unwrap();

        let text = output(buf);
        assert_eq!(text.lines().count(), 9);
        assert!(text.contains("Modern Cylindrical Diffuser"));
        assert!(text.contains("$32.99"));
    }
}
