//! Application state for one storefront session.
//!
//! `AppState` is constructed at page load from configuration and persisted
//! cart data, and owns everything a user action touches. Each action
//! mutates the cart store (which persists before returning) and hands back
//! the re-rendered page.

use aqua_aura_core::ProductId;
use tracing::instrument;

use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::checkout::{self, CheckoutOutcome};
use crate::config::StorefrontConfig;
use crate::contact::ContactForm;
use crate::error::Result;
use crate::render::{self, Page, View};
use crate::storage::{FileStorage, LocalStorage};

/// Storefront state: configuration, catalog and the cart store.
pub struct AppState<S = FileStorage> {
    config: StorefrontConfig,
    store: CartStore<S>,
}

impl AppState<FileStorage> {
    /// Load state backed by files under `config.data_dir`.
    #[must_use]
    pub fn load(config: StorefrontConfig) -> Self {
        let storage = FileStorage::new(&config.data_dir);
        Self::with_storage(config, storage)
    }
}

impl<S: LocalStorage> AppState<S> {
    /// Load state from any storage backend with the default catalog.
    #[must_use]
    pub fn with_storage(config: StorefrontConfig, storage: S) -> Self {
        Self::with_catalog(config, Catalog::default(), storage)
    }

    /// Load state with a custom catalog.
    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: Catalog, storage: S) -> Self {
        let store = CartStore::open(storage, catalog, config.storage_key.clone());
        Self { config, store }
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        self.store.catalog()
    }

    #[must_use]
    pub const fn store(&self) -> &CartStore<S> {
        &self.store
    }

    /// Render a view from the current state.
    #[must_use]
    pub fn render(&self, view: View) -> Page {
        render::render(view, self.store.catalog(), self.store.cart(), &self.config)
    }

    /// Render a view as HTML.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Render` if a template fails.
    pub fn render_html(&self, view: View) -> Result<String> {
        Ok(self.render(view).to_html()?)
    }

    /// Add a product to the cart from `view`, re-rendering that view.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Cart` if the product is unknown or persisting fails.
    #[instrument(skip(self))]
    pub fn add_to_cart(&mut self, product_id: ProductId, view: View) -> Result<Page> {
        let notice = self.store.add_item(product_id)?;
        Ok(self.render(view).with_notice(notice))
    }

    /// Change a line's quantity from the cart page.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Cart` if persisting fails.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, product_id: ProductId, delta: i64) -> Result<Page> {
        self.store.update_quantity(product_id, delta)?;
        Ok(self.render(View::Cart))
    }

    /// Remove a line from the cart page.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Cart` if persisting fails.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> Result<Page> {
        self.store.remove_item(product_id)?;
        Ok(self.render(View::Cart))
    }

    /// Check out and render the page checkout redirects to.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Checkout` if the cart is empty (nothing changes)
    /// or the persisted cart cannot be erased.
    #[instrument(skip(self))]
    pub fn checkout(&mut self) -> Result<(CheckoutOutcome, Page)> {
        let outcome = checkout::checkout(&mut self.store)?;
        let page = self.render(outcome.redirect).with_notice(outcome.notice);
        Ok((outcome, page))
    }

    /// Submit the contact form, resetting it on success.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Contact` if the form does not validate.
    #[instrument(skip(self, form))]
    pub fn submit_contact(&self, form: &mut ContactForm) -> Result<Page> {
        let notice = form.submit()?;
        Ok(self.render(View::Contact).with_notice(notice))
    }

    /// Tear down, returning the storage backend.
    pub fn into_storage(self) -> S {
        self.store.into_storage()
    }
}
