//! CLI command implementations.
//!
//! Commands write their output to any `io::Write` so they can be tested
//! against an in-memory buffer.

pub mod cart;
pub mod catalog;
pub mod pages;
