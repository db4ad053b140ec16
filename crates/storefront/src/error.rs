//! Unified error handling.
//!
//! Provides a unified `AppError` type for everything a storefront action can
//! fail with. Errors caused by the shopper carry a message that is safe to
//! show them; everything else is reported generically.

use thiserror::Error;

use crate::cart::CartError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::contact::ContactError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout was refused or failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Contact form did not validate.
    #[error("Contact form error: {0}")]
    Contact(#[from] ContactError),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

impl AppError {
    /// Whether the user can fix this error themselves.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Cart(CartError::ProductNotFound(_))
                | Self::Checkout(CheckoutError::EmptyCart)
                | Self::Contact(_)
                | Self::Config(_)
        )
    }

    /// Message to show the shopper.
    ///
    /// Internal details (paths, I/O errors) are not exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Cart(CartError::ProductNotFound(id)) => {
                format!("Sorry, product {id} is not available.")
            }
            Self::Checkout(err @ CheckoutError::EmptyCart) => err.to_string(),
            Self::Contact(err) => err.to_string(),
            Self::Config(err) => err.to_string(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;

    use aqua_aura_core::ProductId;

    use super::*;
    use crate::storage::StorageError;

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(CartError::ProductNotFound(ProductId::new(12)));
        assert_eq!(err.to_string(), "Cart error: product 12 not found");

        let err = AppError::from(CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "Checkout error: Your cart is empty!");
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AppError::from(CheckoutError::EmptyCart).user_message(),
            "Your cart is empty!"
        );
        assert_eq!(
            AppError::from(ContactError::MissingField).user_message(),
            "Name and message are required."
        );
        assert_eq!(
            AppError::from(CartError::ProductNotFound(ProductId::new(12))).user_message(),
            "Sorry, product 12 is not available."
        );
    }

    #[test]
    fn test_storage_errors_are_not_exposed() {
        let err = AppError::from(CartError::Storage(StorageError::Io {
            key: "aquaAuraCart".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "/secret/path"),
        }));
        assert!(!err.is_user_error());
        assert!(!err.user_message().contains("/secret/path"));
    }

    #[test]
    fn test_config_errors_are_user_errors() {
        let err = AppError::from(ConfigError::InvalidEnvVar(
            "AQUA_AURA_FEATURED_COUNT".to_string(),
            "invalid digit found in string".to_string(),
        ));
        assert!(err.is_user_error());
        assert_eq!(
            err.user_message(),
            "Invalid environment variable AQUA_AURA_FEATURED_COUNT: invalid digit found in string"
        );
    }

    #[test]
    fn test_serialize_errors_are_not_exposed() {
        let source = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = AppError::from(CartError::Serialize(source));
        assert!(!err.is_user_error());
        assert_eq!(err.user_message(), "Something went wrong. Please try again.");
    }
}
