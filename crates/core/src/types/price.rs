//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are kept as [`Decimal`] so that cart totals never pick up binary
//! floating point drift (`49.99 * 2` is exactly `99.98`). Rounding to two
//! decimal places happens only when a price is displayed.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places shown for every currency we sell in.
const DISPLAY_SCALE: u32 = 2;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a USD price.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// Create a USD price from a number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self::usd(Decimal::new(cents, DISPLAY_SCALE))
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Price of `quantity` units at this unit price.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self::new(
            self.amount
                .checked_mul(Decimal::from(quantity))
                .unwrap_or(Decimal::MAX),
            self.currency_code,
        )
    }

    /// Add two prices of the same currency.
    ///
    /// Returns `None` if the currencies differ or the sum overflows.
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        if self.currency_code != other.currency_code {
            return None;
        }
        self.amount
            .checked_add(other.amount)
            .map(|amount| Self::new(amount, self.currency_code))
    }

    /// This price rounded to two decimal places, midpoints away from zero.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self::new(
            self.amount
                .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero),
            self.currency_code,
        )
    }

    /// The rounded amount without a currency symbol (e.g., `"99.98"`).
    #[must_use]
    pub fn amount_string(&self) -> String {
        let mut amount = self.rounded().amount;
        amount.rescale(DISPLAY_SCALE);
        amount.to_string()
    }

    /// Format for display (e.g., `"$19.99"`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{}", self.currency_code.symbol(), self.amount_string())
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Symbol placed before the amount.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(cents: i64) -> Price {
        Price::from_cents(cents)
    }

    #[test]
    fn test_times_is_exact() {
        assert_eq!(usd(4999).times(2).amount_string(), "99.98");
        assert_eq!(usd(3499).times(3).display(), "$104.97");
    }

    #[test]
    fn test_amount_string_pads_to_two_places() {
        assert_eq!(Price::usd(Decimal::from(40)).amount_string(), "40.00");
        assert_eq!(Price::zero(CurrencyCode::USD).amount_string(), "0.00");
    }

    #[test]
    fn test_rounding_midpoint_away_from_zero() {
        let price = Price::usd(Decimal::new(10_005, 3));
        assert_eq!(price.amount_string(), "10.01");
    }

    #[test]
    fn test_checked_add_same_currency() {
        let sum = usd(4999).checked_add(&usd(3499));
        assert_eq!(sum.map(|p| p.amount_string()).as_deref(), Some("84.98"));
    }

    #[test]
    fn test_checked_add_rejects_mixed_currency() {
        let eur = Price::new(Decimal::ONE, CurrencyCode::EUR);
        assert!(usd(100).checked_add(&eur).is_none());
    }

    #[test]
    fn test_display_uses_symbol() {
        let gbp = Price::new(Decimal::new(1250, 2), CurrencyCode::GBP);
        assert_eq!(gbp.to_string(), "£12.50");
        assert_eq!(CurrencyCode::GBP.code(), "GBP");
    }
}
