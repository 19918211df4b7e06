//! Market Data Port (Driven Port)
//!
//! Interface for fetching market data from external providers.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::chain::{OptionContract, OptionType};
use crate::domain::history::ClosingPrice;
use crate::domain::sentiment::ExpirationVolumes;
use crate::domain::shared::Symbol;

/// Time span for a historical closing-price query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistorySpan {
    /// Trailing week.
    Week,
    /// Trailing month.
    Month,
    /// Trailing three months.
    ThreeMonths,
    /// Trailing year.
    Year,
}

impl HistorySpan {
    /// Provider query parameter for this span.
    #[must_use]
    pub const fn as_query(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::ThreeMonths => "3month",
            Self::Year => "year",
        }
    }
}

impl Default for HistorySpan {
    fn default() -> Self {
        Self::ThreeMonths
    }
}

/// Market data error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MarketDataError {
    /// Connection error.
    #[error("market data connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Authentication failed.
    #[error("market data authentication failed")]
    AuthenticationFailed,

    /// Symbol not found.
    #[error("symbol not found: {symbol}")]
    SymbolNotFound {
        /// The unknown symbol.
        symbol: String,
    },

    /// API error.
    #[error("market data API error: {message}")]
    ApiError {
        /// Error details.
        message: String,
    },
}

/// Port for fetching market data from external providers.
///
/// Calls are sequential blocking requests at the boundary; the port
/// itself performs no retries. Individual fields a provider cannot
/// supply come back as `None` inside the returned structures, while
/// transport and protocol failures surface as [`MarketDataError`].
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// All listed expiration dates for the symbol's option chain.
    async fn expiration_dates(&self, symbol: &Symbol) -> Result<Vec<NaiveDate>, MarketDataError>;

    /// Last trade price of the underlying, if the provider has one.
    async fn reference_price(&self, symbol: &Symbol) -> Result<Option<Decimal>, MarketDataError>;

    /// Contract snapshots for one `(symbol, expiration, type)` chain.
    async fn option_chain(
        &self,
        symbol: &Symbol,
        expiration: NaiveDate,
        option_type: OptionType,
    ) -> Result<Vec<OptionContract>, MarketDataError>;

    /// Historical closing prices over the given span.
    async fn closing_prices(
        &self,
        symbol: &Symbol,
        span: HistorySpan,
    ) -> Result<Vec<ClosingPrice>, MarketDataError>;

    /// Per-expiration call/put volume totals for the symbol.
    async fn option_volumes(
        &self,
        symbol: &Symbol,
    ) -> Result<Vec<ExpirationVolumes>, MarketDataError>;

    /// Current volatility index level, if available.
    async fn volatility_index(&self) -> Result<Option<Decimal>, MarketDataError>;
}
