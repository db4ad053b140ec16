//! User-visible notices.
//!
//! A notice is either a short-lived toast shown after a successful action,
//! or a blocking alert the shopper has to acknowledge.

use std::time::Duration;

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(2);

/// How a notice is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Transient toast, dismissed automatically.
    Info,
    /// Blocking alert.
    Alert,
}

/// Messages shown to the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// A product was added to the cart.
    AddedToCart,
    /// Checkout was attempted with nothing in the cart.
    CartEmpty,
    /// Checkout completed.
    OrderPlaced,
    /// The contact form was submitted.
    MessageSent,
}

impl Notice {
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::AddedToCart => "Added to cart!",
            Self::CartEmpty => "Your cart is empty!",
            Self::OrderPlaced => "Thank you for shopping with us!",
            Self::MessageSent => "Thank you for your message! We will get back to you soon.",
        }
    }

    #[must_use]
    pub const fn level(&self) -> Level {
        match self {
            Self::AddedToCart => Level::Info,
            Self::CartEmpty | Self::OrderPlaced | Self::MessageSent => Level::Alert,
        }
    }

    /// Display duration for toasts; alerts stay until dismissed.
    #[must_use]
    pub const fn duration(&self) -> Option<Duration> {
        match self.level() {
            Level::Info => Some(TOAST_DURATION),
            Level::Alert => None,
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_has_duration() {
        assert_eq!(Notice::AddedToCart.duration(), Some(Duration::from_secs(2)));
        assert_eq!(Notice::CartEmpty.duration(), None);
    }

    #[test]
    fn test_messages() {
        assert_eq!(Notice::CartEmpty.to_string(), "Your cart is empty!");
        assert_eq!(Notice::OrderPlaced.level(), Level::Alert);
    }
}
