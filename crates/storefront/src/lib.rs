//! Aqua Aura Storefront library.
//!
//! A static product catalog and a shopping cart kept in local storage.
//! There is no server and no payment step: checkout clears the cart.
//!
//! # Modules
//!
//! - [`catalog`] - Built-in product list
//! - [`storage`] - Synchronous key/value local storage (memory or files)
//! - [`cart`] - Cart store, persisted on every mutation
//! - [`checkout`] - Empty-cart guard and cart clearing
//! - [`contact`] - Contact form validation
//! - [`render`] - View models and askama templates
//! - [`state`] - Page-load wiring of config, catalog and cart store

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod contact;
pub mod error;
pub mod notice;
pub mod render;
pub mod state;
pub mod storage;

pub use cart::{Cart, CartError, CartLine, CartStore, DEFAULT_STORAGE_KEY};
pub use catalog::{Catalog, Product};
pub use config::StorefrontConfig;
pub use error::{AppError, Result};
pub use render::{Page, View};
pub use state::AppState;
pub use storage::{FileStorage, LocalStorage, MemoryStorage};
