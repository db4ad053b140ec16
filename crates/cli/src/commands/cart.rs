//! Cart commands.

use std::io::Write;

use aqua_aura_core::ProductId;
use aqua_aura_storefront::{AppState, LocalStorage, View};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error if the product is unknown, the cart cannot be saved, or
/// writing to `out` fails.
pub fn add<S: LocalStorage>(
    state: &mut AppState<S>,
    id: ProductId,
    from: View,
    out: &mut impl Write,
) -> CommandResult {
    let page = state.add_to_cart(id, from)?;
    if let Some(notice) = &page.notice {
        writeln!(out, "{}", notice.message)?;
    }
    writeln!(out, "Cart: {} item(s)", page.cart_count.unwrap_or_default())?;
    Ok(())
}

/// Change a line's quantity by `delta`.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved or writing to `out` fails.
pub fn update<S: LocalStorage>(
    state: &mut AppState<S>,
    id: ProductId,
    delta: i64,
    out: &mut impl Write,
) -> CommandResult {
    state.update_quantity(id, delta)?;
    show(state, out)
}

/// Remove a product's line.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved or writing to `out` fails.
pub fn remove<S: LocalStorage>(
    state: &mut AppState<S>,
    id: ProductId,
    out: &mut impl Write,
) -> CommandResult {
    state.remove_from_cart(id)?;
    show(state, out)
}

/// Print the cart lines and total.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn show<S: LocalStorage>(state: &AppState<S>, out: &mut impl Write) -> CommandResult {
    let page = state.render(View::Cart);
    let Some(cart) = page.cart else {
        return Ok(());
    };

    if cart.is_empty() {
        writeln!(out, "Your cart is empty")?;
        writeln!(out, "Add some products to get started!")?;
    } else {
        for item in &cart.items {
            writeln!(
                out,
                "{:>3}  {:<30} {:>3} x {:>8} = {:>9}",
                item.id, item.name, item.quantity, item.unit_price, item.line_price
            )?;
        }
    }
    writeln!(
        out,
        "Total: ${} ({} item(s))",
        page.cart_total.unwrap_or_default(),
        cart.item_count
    )?;
    Ok(())
}

/// Print the cart item count.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn count<S: LocalStorage>(state: &AppState<S>, out: &mut impl Write) -> CommandResult {
    writeln!(out, "{}", state.store().total_item_count())?;
    Ok(())
}

/// Check out.
///
/// # Errors
///
/// Returns an error if the cart is empty, cannot be cleared, or writing to
/// `out` fails.
pub fn checkout<S: LocalStorage>(state: &mut AppState<S>, out: &mut impl Write) -> CommandResult {
    let (outcome, _page) = state.checkout()?;
    tracing::info!(items = outcome.items, redirect = %outcome.redirect, "Checked out");
    writeln!(out, "{}", outcome.notice)?;
    writeln!(out, "Returning to {}", outcome.redirect.file_name())?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use aqua_aura_storefront::AppError;

    use super::*;
    use crate::commands::test_support::{output, state};

    #[test]
    fn test_add_then_show() {
        let mut state = state();
        let mut buf = Vec::new();
        add(&mut state, ProductId::new(1), View::Products, &mut buf).unwrap();
        add(&mut state, ProductId::new(1), View::Products, &mut buf).unwrap();
        assert!(output(buf).contains("Added to cart!\nCart: 1 item(s)\n"));

        let mut buf = Vec::new();
        show(&state, &mut buf).unwrap();
        let text = output(buf);
        assert!(text.contains("Modern Cylindrical Diffuser"));
        assert!(text.contains("Total: $99.98 (2 item(s))"));
    }

    #[test]
    fn test_update_to_zero_empties_cart() {
        let mut state = state();
        add(&mut state, ProductId::new(4), View::Home, &mut Vec::new()).unwrap();

        let mut buf = Vec::new();
        update(&mut state, ProductId::new(4), -1, &mut buf).unwrap();
        assert!(output(buf).contains("Your cart is empty"));
    }

    #[test]
    fn test_count() {
        let mut state = state();
        add(&mut state, ProductId::new(2), View::Home, &mut Vec::new()).unwrap();
        add(&mut state, ProductId::new(3), View::Home, &mut Vec::new()).unwrap();

        let mut buf = Vec::new();
        count(&state, &mut buf).unwrap();
        assert_eq!(output(buf), "2\n");
    }

    #[test]
    fn test_checkout_empty_cart() {
        let mut state = state();
        let err = checkout(&mut state, &mut Vec::new()).unwrap_err();
        let app = err.downcast_ref::<AppError>().unwrap();
        assert_eq!(app.user_message(), "Your cart is empty!");
    }

    #[test]
    fn test_checkout() {
        let mut state = state();
        add(&mut state, ProductId::new(9), View::Home, &mut Vec::new()).unwrap();

        let mut buf = Vec::new();
        checkout(&mut state, &mut buf).unwrap();
        assert_eq!(
            output(buf),
            "Thank you for shopping with us!\nReturning to index.html\n"
        );
        assert!(state.store().is_empty());
    }
}
