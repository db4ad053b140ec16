//! Cart store.
//!
//! The cart is an ordered list of lines, at most one per product, each with a
//! quantity of at least one. [`CartStore`] owns the in-memory cart together
//! with the [`LocalStorage`] it is mirrored to: every mutation writes the
//! whole cart back before returning.
//!
//! # Persisted format
//!
//! A JSON array under a single key, one object per line:
//!
//! ```json
//! [{"id":1,"name":"Modern Cylindrical Diffuser","price":49.99,
//!   "description":"...","image":"modern_cylindrical_black.png","quantity":2}]
//! ```
//!
//! Missing, unparseable or inconsistent data loads as an empty cart.

use std::collections::HashSet;

use aqua_aura_core::{CurrencyCode, Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::catalog::{Catalog, Product};
use crate::notice::Notice;
use crate::storage::{LocalStorage, StorageError};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "aquaAuraCart";

/// Cart operation errors.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product ID is not in the catalog.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// Writing the cart to storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// `serde_json` failed to encode the cart while persisting it.
    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Reasons a persisted cart blob is rejected.
#[derive(Debug, Error)]
pub enum CartDataError {
    #[error("invalid cart JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line for product {0} has quantity 0")]
    ZeroQuantity(ProductId),

    #[error("more than one line for product {0}")]
    DuplicateLine(ProductId),
}

/// One product in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub description: String,
    pub image: String,
    pub quantity: u32,
}

impl CartLine {
    /// A new line for `product` with quantity 1.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price.amount,
            description: product.description.clone(),
            image: product.image.clone(),
            quantity: 1,
        }
    }

    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::usd(self.price)
    }

    /// Unit price times quantity, unrounded.
    #[must_use]
    pub fn line_price(&self) -> Price {
        self.unit_price().times(self.quantity)
    }
}

/// Ordered cart lines, unique by product ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Parse and validate a persisted cart.
    ///
    /// # Errors
    ///
    /// Returns `CartDataError` if the JSON is malformed, a line has quantity
    /// zero, or two lines share a product ID.
    pub fn from_json(json: &str) -> Result<Self, CartDataError> {
        let lines: Vec<CartLine> = serde_json::from_str(json)?;

        let mut seen = HashSet::with_capacity(lines.len());
        for line in &lines {
            if line.quantity == 0 {
                return Err(CartDataError::ZeroQuantity(line.id));
            }
            if !seen.insert(line.id) {
                return Err(CartDataError::DuplicateLine(line.id));
            }
        }

        Ok(Self { lines })
    }

    /// Serialize to the persisted JSON format.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of price times quantity, rounded to two decimal places.
    #[must_use]
    pub fn total_price(&self) -> Price {
        let total = self
            .lines
            .iter()
            .map(|line| line.line_price().amount)
            .fold(Decimal::ZERO, |acc, amount| {
                acc.checked_add(amount).unwrap_or(Decimal::MAX)
            });
        Price::new(total, CurrencyCode::USD).rounded()
    }

    fn find_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id == id)
    }

    fn remove(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != id);
        self.lines.len() != before
    }
}

/// Owned cart state mirrored to local storage.
pub struct CartStore<S> {
    storage: S,
    key: String,
    catalog: Catalog,
    cart: Cart,
}

impl<S: LocalStorage> CartStore<S> {
    /// Open the store, loading any cart persisted under `key`.
    ///
    /// Unreadable or invalid data is logged and replaced by an empty cart.
    pub fn open(storage: S, catalog: Catalog, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = load_cart(&storage, &key);
        tracing::debug!(
            key = %key,
            lines = cart.lines().len(),
            items = cart.total_item_count(),
            "Cart loaded"
        );
        Self {
            storage,
            key,
            catalog,
            cart,
        }
    }

    /// Add one unit of a catalog product.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` (leaving the cart untouched) if
    /// the product is unknown, or a storage error if persisting fails.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn add_item(&mut self, product_id: ProductId) -> Result<Notice, CartError> {
        let product = self
            .catalog
            .find(product_id)
            .ok_or(CartError::ProductNotFound(product_id))?;

        if let Some(line) = self.cart.find_mut(product_id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            let line = CartLine::from_product(product);
            self.cart.lines.push(line);
        }

        self.persist()?;
        tracing::info!(items = self.cart.total_item_count(), "Item added to cart");
        Ok(Notice::AddedToCart)
    }

    /// Change a line's quantity by `delta`, removing it at zero or below.
    ///
    /// Does nothing if the product has no line in the cart.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisting fails.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn update_quantity(&mut self, product_id: ProductId, delta: i64) -> Result<(), CartError> {
        let Some(line) = self.cart.find_mut(product_id) else {
            tracing::debug!("No cart line to update");
            return Ok(());
        };

        let quantity = i64::from(line.quantity).saturating_add(delta);
        if quantity <= 0 {
            return self.remove_item(product_id);
        }

        line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        self.persist()
    }

    /// Remove a product's line if present.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisting fails.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn remove_item(&mut self, product_id: ProductId) -> Result<(), CartError> {
        if self.cart.remove(product_id) {
            tracing::info!("Cart line removed");
        }
        self.persist()
    }

    /// Empty the cart and erase its persisted state.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the key cannot be removed.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.cart.lines.clear();
        self.storage.remove_item(&self.key)?;
        tracing::info!("Cart cleared");
        Ok(())
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    #[must_use]
    pub fn find(&self, product_id: ProductId) -> Option<&CartLine> {
        self.cart.find(product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.cart.total_item_count()
    }

    #[must_use]
    pub fn total_price(&self) -> Price {
        self.cart.total_price()
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Tear the store down, handing back its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self) -> Result<(), CartError> {
        let json = self.cart.to_json()?;
        self.storage.set_item(&self.key, &json)?;
        Ok(())
    }
}

fn load_cart<S: LocalStorage>(storage: &S, key: &str) -> Cart {
    let blob = match storage.get_item(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => return Cart::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored cart, starting empty");
            return Cart::default();
        }
    };

    Cart::from_json(&blob).unwrap_or_else(|e| {
        tracing::warn!(key, error = %e, "Discarding invalid stored cart");
        Cart::default()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn id(n: i32) -> ProductId {
        ProductId::new(n)
    }

    fn store() -> CartStore<MemoryStorage> {
        CartStore::open(MemoryStorage::new(), Catalog::default(), DEFAULT_STORAGE_KEY)
    }

    fn quantities(store: &CartStore<MemoryStorage>) -> Vec<(i32, u32)> {
        store
            .lines()
            .iter()
            .map(|line| (line.id.as_i32(), line.quantity))
            .collect()
    }

    #[test]
    fn test_repeated_adds_make_one_line() {
        let mut store = store();
        for _ in 0..5 {
            assert_eq!(store.add_item(id(4)).unwrap(), Notice::AddedToCart);
        }
        assert_eq!(quantities(&store), vec![(4, 5)]);
    }

    #[test]
    fn test_add_add_add_scenario() {
        let mut store = store();
        store.add_item(id(1)).unwrap();
        store.add_item(id(1)).unwrap();
        store.add_item(id(2)).unwrap();

        assert_eq!(quantities(&store), vec![(1, 2), (2, 1)]);
        assert_eq!(store.total_item_count(), 3);
    }

    #[test]
    fn test_add_unknown_product_leaves_cart_untouched() {
        let mut store = store();
        let err = store.add_item(id(99)).unwrap_err();
        assert!(matches!(err, CartError::ProductNotFound(p) if p == id(99)));
        assert!(store.is_empty());
        assert!(store.storage().is_empty());
    }

    #[test]
    fn test_add_persists_before_returning() {
        let mut store = store();
        store.add_item(id(1)).unwrap();

        let blob = store.storage().get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(Cart::from_json(&blob).unwrap(), *store.cart());
    }

    #[test]
    fn test_total_price_two_of_49_99() {
        let mut store = store();
        store.add_item(id(1)).unwrap();
        store.add_item(id(1)).unwrap();
        assert_eq!(store.total_price().amount_string(), "99.98");
    }

    #[test]
    fn test_totals_match_line_sums() {
        let mut store = store();
        for n in [1, 2, 2, 5, 9, 9, 9] {
            store.add_item(id(n)).unwrap();
        }

        let expected_count: u64 = store.lines().iter().map(|l| u64::from(l.quantity)).sum();
        assert_eq!(store.total_item_count(), expected_count);
        // 49.99 + 2 * 34.99 + 45.99 + 3 * 32.99
        assert_eq!(store.total_price().amount_string(), "264.93");
    }

    #[test]
    fn test_update_quantity_up_and_down() {
        let mut store = store();
        store.add_item(id(3)).unwrap();
        store.update_quantity(id(3), 4).unwrap();
        assert_eq!(store.find(id(3)).unwrap().quantity, 5);

        store.update_quantity(id(3), -2).unwrap();
        assert_eq!(store.find(id(3)).unwrap().quantity, 3);
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let mut store = store();
        store.add_item(id(3)).unwrap();
        store.add_item(id(5)).unwrap();

        store.update_quantity(id(3), -1).unwrap();
        assert!(store.find(id(3)).is_none());
        assert_eq!(quantities(&store), vec![(5, 1)]);

        store.update_quantity(id(5), -10).unwrap();
        assert!(store.is_empty());
        let blob = store.storage().get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(blob, "[]");
    }

    #[test]
    fn test_update_quantity_missing_line_is_silent_noop() {
        let mut store = store();
        store.update_quantity(id(7), 1).unwrap();
        assert!(store.is_empty());
        assert!(store.storage().is_empty());
    }

    #[test]
    fn test_remove_item() {
        let mut store = store();
        store.add_item(id(1)).unwrap();
        store.add_item(id(2)).unwrap();

        store.remove_item(id(1)).unwrap();
        assert_eq!(quantities(&store), vec![(2, 1)]);

        store.remove_item(id(1)).unwrap();
        assert_eq!(quantities(&store), vec![(2, 1)]);
    }

    #[test]
    fn test_clear_erases_persisted_state() {
        let mut store = store();
        store.add_item(id(1)).unwrap();
        store.clear().unwrap();

        assert!(store.is_empty());
        assert_eq!(store.storage().get_item(DEFAULT_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_reload_round_trip() {
        let mut store = store();
        store.add_item(id(6)).unwrap();
        store.add_item(id(8)).unwrap();
        store.update_quantity(id(6), 2).unwrap();
        let before = store.cart().clone();

        let reopened = CartStore::open(store.into_storage(), Catalog::default(), DEFAULT_STORAGE_KEY);
        assert_eq!(*reopened.cart(), before);
    }

    #[test]
    fn test_persisted_format() {
        let mut store = store();
        store.add_item(id(1)).unwrap();
        store.add_item(id(1)).unwrap();

        let blob = store.storage().get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "id": 1,
                "name": "Modern Cylindrical Diffuser",
                "price": 49.99,
                "description": "Sleek, modern design with a powerful, quiet mist.",
                "image": "modern_cylindrical_black.png",
                "quantity": 2
            }])
        );
    }

    #[test]
    fn test_invalid_blobs_load_empty() {
        for blob in [
            "not json",
            "{\"id\":1}",
            "null",
            r#"[{"id":1,"name":"A","price":1.5,"description":"","image":"a.png","quantity":0}]"#,
            r#"[{"id":1,"name":"A","price":1.5,"description":"","image":"a.png","quantity":-2}]"#,
            r#"[{"id":1,"name":"A","price":1.5,"description":"","image":"a.png","quantity":1},
                {"id":1,"name":"A","price":1.5,"description":"","image":"a.png","quantity":1}]"#,
        ] {
            let mut storage = MemoryStorage::new();
            storage.set_item(DEFAULT_STORAGE_KEY, blob).unwrap();
            let store = CartStore::open(storage, Catalog::default(), DEFAULT_STORAGE_KEY);
            assert!(store.is_empty(), "{blob}");
        }
    }

    #[test]
    fn test_stored_prices_are_kept() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(
                DEFAULT_STORAGE_KEY,
                r#"[{"id":1,"name":"Old","price":10.5,"description":"","image":"x.png","quantity":3}]"#,
            )
            .unwrap();

        let store = CartStore::open(storage, Catalog::default(), DEFAULT_STORAGE_KEY);
        assert_eq!(store.total_price().amount_string(), "31.50");
        assert_eq!(store.total_item_count(), 3);
    }
}
