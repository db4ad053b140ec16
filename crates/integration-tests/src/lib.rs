//! Integration tests for Aqua Aura.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p aqua-aura-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart state across page loads with file storage
//! - `checkout_flow` - Browse, add, edit, check out
//! - `rendering` - HTML pages and fragments
//!
//! Every test gets its own [`TestContext`]: a temporary data directory that
//! plays the role of the browser's local storage.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use aqua_aura_storefront::{AppState, FileStorage, LocalStorage, StorefrontConfig};
use tempfile::TempDir;

/// Test context owning a temporary local storage directory.
pub struct TestContext {
    dir: TempDir,
    config: StorefrontConfig,
}

impl TestContext {
    /// Create a context with an empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = StorefrontConfig {
            data_dir: dir.path().join("storage"),
            ..StorefrontConfig::default()
        };
        Self { dir, config }
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Simulate a page load: open fresh state from what is on disk.
    #[must_use]
    pub fn page_load(&self) -> AppState<FileStorage> {
        AppState::load(self.config.clone())
    }

    /// Raw persisted cart blob, if any.
    ///
    /// # Panics
    ///
    /// Panics if the storage file exists but cannot be read.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn stored_cart(&self) -> Option<String> {
        FileStorage::new(&self.config.data_dir)
            .get_item(&self.config.storage_key)
            .expect("read storage")
    }

    /// Overwrite the persisted cart blob.
    ///
    /// # Panics
    ///
    /// Panics if the storage file cannot be written.
    #[allow(clippy::expect_used)]
    pub fn write_stored_cart(&self, blob: &str) {
        FileStorage::new(&self.config.data_dir)
            .set_item(&self.config.storage_key, blob)
            .expect("write storage");
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
