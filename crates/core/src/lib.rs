//! Aqua Aura Core - Shared domain types.
//!
//! This crate provides the types shared by every Aqua Aura component:
//! - `storefront` - Catalog, cart store, checkout and page rendering
//! - `cli` - The `aqua-aura` command that drives the storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! rendering. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
