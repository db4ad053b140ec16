//! Checkout.
//!
//! There is no payment step: completing checkout thanks the shopper, clears
//! the cart and sends them back to the home page.

use thiserror::Error;
use tracing::instrument;

use crate::cart::{Cart, CartError, CartStore};
use crate::notice::Notice;
use crate::render::View;
use crate::storage::LocalStorage;

/// Checkout errors.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to check out. Shown to the shopper as a blocking alert.
    #[error("{}", Notice::CartEmpty.message())]
    EmptyCart,

    /// Clearing the cart failed.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Where a cart stands in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    /// Cart has lines and can still be edited.
    Active,
    /// Cart has been checked out (or never had anything in it).
    Completed,
}

impl CheckoutState {
    #[must_use]
    pub fn of(cart: &Cart) -> Self {
        if cart.is_empty() {
            Self::Completed
        } else {
            Self::Active
        }
    }
}

/// Result of a successful checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutOutcome {
    pub notice: Notice,
    /// View to navigate to.
    pub redirect: View,
    pub state: CheckoutState,
    /// Number of items that were in the cart.
    pub items: u64,
}

/// Check out the cart: `Active -> Completed`.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` without touching anything if the cart
/// is empty, or a cart error if the persisted state cannot be erased.
#[instrument(skip(store), fields(key = %store.key()))]
pub fn checkout<S: LocalStorage>(store: &mut CartStore<S>) -> Result<CheckoutOutcome, CheckoutError> {
    if CheckoutState::of(store.cart()) != CheckoutState::Active {
        tracing::debug!("Checkout attempted with empty cart");
        return Err(CheckoutError::EmptyCart);
    }

    let items = store.total_item_count();
    let total = store.total_price();
    store.clear()?;

    tracing::info!(items, total = %total, "Checkout completed");
    Ok(CheckoutOutcome {
        notice: Notice::OrderPlaced,
        redirect: View::Home,
        state: CheckoutState::of(store.cart()),
        items,
    })
}
