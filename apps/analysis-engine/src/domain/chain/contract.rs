//! Option contract snapshot value object.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::shared::DomainError;

/// Shares represented by one listed contract.
pub const SHARES_PER_CONTRACT: Decimal = dec!(100);

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionType {
    /// Call option (right to buy).
    Call,
    /// Put option (right to sell).
    Put,
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

/// A single listed contract as reported by the market data provider.
///
/// Built fresh per query. Greeks and prices are per share and optional:
/// any field the provider cannot supply stays `None` rather than being
/// coerced to zero or a sentinel string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Strike price.
    strike_price: Decimal,
    /// Call or put.
    option_type: OptionType,
    /// Ask price per share.
    ask_price: Option<Decimal>,
    /// Premium per share (mark price).
    mark_price: Option<Decimal>,
    /// Delta sensitivity.
    delta: Option<Decimal>,
    /// Gamma sensitivity.
    gamma: Option<Decimal>,
    /// Theta per-day decay (typically negative).
    theta: Option<Decimal>,
    /// Vega sensitivity.
    vega: Option<Decimal>,
}

impl OptionContract {
    /// Create a new contract snapshot with only the listing fields set.
    ///
    /// # Errors
    ///
    /// Returns error if the strike price is zero or negative.
    pub fn new(strike_price: Decimal, option_type: OptionType) -> Result<Self, DomainError> {
        if strike_price <= Decimal::ZERO {
            return Err(DomainError::InvalidValue {
                field: "strike_price".to_string(),
                message: format!("must be positive, got {strike_price}"),
            });
        }
        Ok(Self {
            strike_price,
            option_type,
            ask_price: None,
            mark_price: None,
            delta: None,
            gamma: None,
            theta: None,
            vega: None,
        })
    }

    /// Set the ask price per share.
    #[must_use]
    pub const fn with_ask_price(mut self, ask_price: Decimal) -> Self {
        self.ask_price = Some(ask_price);
        self
    }

    /// Set the premium (mark price) per share.
    #[must_use]
    pub const fn with_mark_price(mut self, mark_price: Decimal) -> Self {
        self.mark_price = Some(mark_price);
        self
    }

    /// Set delta.
    #[must_use]
    pub const fn with_delta(mut self, delta: Decimal) -> Self {
        self.delta = Some(delta);
        self
    }

    /// Set gamma.
    #[must_use]
    pub const fn with_gamma(mut self, gamma: Decimal) -> Self {
        self.gamma = Some(gamma);
        self
    }

    /// Set theta.
    #[must_use]
    pub const fn with_theta(mut self, theta: Decimal) -> Self {
        self.theta = Some(theta);
        self
    }

    /// Set vega.
    #[must_use]
    pub const fn with_vega(mut self, vega: Decimal) -> Self {
        self.vega = Some(vega);
        self
    }

    /// Get the strike price.
    #[must_use]
    pub const fn strike_price(&self) -> Decimal {
        self.strike_price
    }

    /// Get the option type.
    #[must_use]
    pub const fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Get the ask price per share, if reported.
    #[must_use]
    pub const fn ask_price(&self) -> Option<Decimal> {
        self.ask_price
    }

    /// Get the premium (mark price) per share, if reported.
    #[must_use]
    pub const fn mark_price(&self) -> Option<Decimal> {
        self.mark_price
    }

    /// Get delta, if reported.
    #[must_use]
    pub const fn delta(&self) -> Option<Decimal> {
        self.delta
    }

    /// Get gamma, if reported.
    #[must_use]
    pub const fn gamma(&self) -> Option<Decimal> {
        self.gamma
    }

    /// Get theta, if reported.
    #[must_use]
    pub const fn theta(&self) -> Option<Decimal> {
        self.theta
    }

    /// Get vega, if reported.
    #[must_use]
    pub const fn vega(&self) -> Option<Decimal> {
        self.vega
    }

    /// Check if this is a call option.
    #[must_use]
    pub const fn is_call(&self) -> bool {
        matches!(self.option_type, OptionType::Call)
    }

    /// Check if this is a put option.
    #[must_use]
    pub const fn is_put(&self) -> bool {
        matches!(self.option_type, OptionType::Put)
    }
}
