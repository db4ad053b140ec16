//! Integration tests for the shopping flow.
//!
//! Browse -> add -> adjust -> check out, with every step going through a
//! fresh page load.

#![allow(clippy::unwrap_used)]

use aqua_aura_core::ProductId;
use aqua_aura_integration_tests::TestContext;
use aqua_aura_storefront::checkout::{CheckoutError, CheckoutState};
use aqua_aura_storefront::notice::Notice;
use aqua_aura_storefront::{AppError, View};

#[test]
fn test_full_shopping_flow() {
    let ctx = TestContext::new();

    let home = ctx.page_load().render(View::Home);
    let first = home.featured.unwrap()[0].id;

    let page = ctx.page_load().add_to_cart(ProductId::new(first), View::Home).unwrap();
    assert_eq!(page.cart_count, Some(1));

    let page = ctx.page_load().update_quantity(ProductId::new(first), 1).unwrap();
    assert_eq!(page.cart_total.as_deref(), Some("99.98"));

    let mut state = ctx.page_load();
    assert_eq!(CheckoutState::of(state.store().cart()), CheckoutState::Active);

    let (outcome, page) = state.checkout().unwrap();
    assert_eq!(outcome.state, CheckoutState::Completed);
    assert_eq!(outcome.items, 2);
    assert_eq!(page.view, View::Home);
    assert_eq!(page.notice.unwrap().message, Notice::OrderPlaced.message());

    assert_eq!(ctx.stored_cart(), None);
    assert!(ctx.page_load().store().is_empty());
}

#[test]
fn test_checkout_empty_cart_changes_nothing() {
    let ctx = TestContext::new();
    ctx.write_stored_cart("[]");

    let err = ctx.page_load().checkout().unwrap_err();
    assert!(matches!(err, AppError::Checkout(CheckoutError::EmptyCart)));
    assert_eq!(err.user_message(), "Your cart is empty!");

    assert_eq!(ctx.stored_cart().as_deref(), Some("[]"));
}

#[test]
fn test_adding_unknown_product_is_rejected() {
    let ctx = TestContext::new();
    let err = ctx.page_load().add_to_cart(ProductId::new(404), View::Products).unwrap_err();
    assert!(err.is_user_error());
    assert_eq!(ctx.stored_cart(), None);
}

#[test]
fn test_checkout_after_emptying_cart_by_hand() {
    let ctx = TestContext::new();
    ctx.page_load().add_to_cart(ProductId::new(6), View::Products).unwrap();
    ctx.page_load().update_quantity(ProductId::new(6), -5).unwrap();

    let err = ctx.page_load().checkout().unwrap_err();
    assert!(matches!(err, AppError::Checkout(CheckoutError::EmptyCart)));
}
