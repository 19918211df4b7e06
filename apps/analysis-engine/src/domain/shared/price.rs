//! Reference price value object.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// The underlying stock price an option is evaluated against.
///
/// Guaranteed positive by construction, so valuation and simulation can
/// assume a usable denominator. A provider that cannot supply a price
/// must surface that absence before this type is ever built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferencePrice(Decimal);

impl ReferencePrice {
    /// Create a new reference price.
    ///
    /// # Errors
    ///
    /// Returns error if the price is zero or negative.
    pub fn new(amount: Decimal) -> Result<Self, DomainError> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::InvalidValue {
                field: "reference_price".to_string(),
                message: format!("must be positive, got {amount}"),
            });
        }
        Ok(Self(amount))
    }

    /// Get the inner Decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for ReferencePrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}
