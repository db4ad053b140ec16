//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `AQUA_AURA_DATA_DIR` - Directory for persisted local storage
//!   (default: `<platform data dir>/aqua-aura`, or `./.aqua-aura`)
//! - `AQUA_AURA_STORAGE_KEY` - Key the cart is stored under (default: `aquaAuraCart`)
//! - `AQUA_AURA_IMAGE_BASE` - Base path for product images (default: `images`)
//! - `AQUA_AURA_FEATURED_COUNT` - Products shown in the featured section (default: 3)

use std::path::PathBuf;

use thiserror::Error;

use crate::cart::DEFAULT_STORAGE_KEY;

const DATA_DIR_NAME: &str = "aqua-aura";
const DEFAULT_IMAGE_BASE: &str = "images";
const DEFAULT_FEATURED_COUNT: usize = 3;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory holding file-backed local storage
    pub data_dir: PathBuf,
    /// Local storage key for the cart
    pub storage_key: String,
    /// Base path prefixed to product image file names
    pub image_base: String,
    /// Number of products in the featured section
    pub featured_count: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            image_base: DEFAULT_IMAGE_BASE.to_string(),
            featured_count: DEFAULT_FEATURED_COUNT,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = lookup("AQUA_AURA_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or(defaults.data_dir, PathBuf::from);

        let storage_key = lookup("AQUA_AURA_STORAGE_KEY").unwrap_or(defaults.storage_key);
        validate_storage_key(&storage_key)?;

        let image_base = lookup("AQUA_AURA_IMAGE_BASE")
            .map_or(defaults.image_base, |base| base.trim_end_matches('/').to_string());

        let featured_count = match lookup("AQUA_AURA_FEATURED_COUNT") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                ConfigError::InvalidEnvVar("AQUA_AURA_FEATURED_COUNT".to_string(), e.to_string())
            })?,
            None => defaults.featured_count,
        };

        Ok(Self {
            data_dir,
            storage_key,
            image_base,
            featured_count,
        })
    }

    /// Image URL for a product image file name.
    #[must_use]
    pub fn image_url(&self, image: &str) -> String {
        if self.image_base.is_empty() {
            image.to_string()
        } else {
            format!("{}/{image}", self.image_base)
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir().map_or_else(
        || PathBuf::from(format!(".{DATA_DIR_NAME}")),
        |dir| dir.join(DATA_DIR_NAME),
    )
}

/// Storage keys become file names, so keep them to a safe character set.
fn validate_storage_key(key: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| {
        Err(ConfigError::InvalidEnvVar(
            "AQUA_AURA_STORAGE_KEY".to_string(),
            reason.to_string(),
        ))
    };

    if key.is_empty() {
        return invalid("must not be empty");
    }
    if key.starts_with('.') {
        return invalid("must not start with '.'");
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return invalid("may only contain ASCII letters, digits, '_', '-' and '.'");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.storage_key, "aquaAuraCart");
        assert_eq!(config.image_base, "images");
        assert_eq!(config.featured_count, 3);
        assert!(
            config
                .data_dir
                .to_string_lossy()
                .ends_with("aqua-aura")
        );
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("AQUA_AURA_DATA_DIR", "/tmp/aura"),
            ("AQUA_AURA_STORAGE_KEY", "testCart"),
            ("AQUA_AURA_IMAGE_BASE", "/static/img/"),
            ("AQUA_AURA_FEATURED_COUNT", " 5 "),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/aura"));
        assert_eq!(config.storage_key, "testCart");
        assert_eq!(config.image_url("cat.png"), "/static/img/cat.png");
        assert_eq!(config.featured_count, 5);
    }

    #[test]
    fn test_invalid_featured_count() {
        let err = StorefrontConfig::from_lookup(lookup(&[("AQUA_AURA_FEATURED_COUNT", "three")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(var, _) if var == "AQUA_AURA_FEATURED_COUNT"));
    }

    #[test]
    fn test_invalid_storage_keys() {
        for key in ["", "../escape", ".hidden", "with space"] {
            let result = StorefrontConfig::from_lookup(lookup(&[("AQUA_AURA_STORAGE_KEY", key)]));
            assert!(result.is_err(), "{key:?}");
        }
    }

    #[test]
    fn test_empty_image_base() {
        let config =
            StorefrontConfig::from_lookup(lookup(&[("AQUA_AURA_IMAGE_BASE", "")])).unwrap();
        assert_eq!(config.image_url("cat.png"), "cat.png");
    }
}
