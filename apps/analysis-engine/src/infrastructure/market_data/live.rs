//! Live market data adapter.
//!
//! Implements `MarketDataPort` by composing the brokerage client
//! (quotes, chains, historicals) with the Yahoo Finance client
//! (volatility index, option volumes), mirroring where each signal
//! actually lives.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::application::ports::{HistorySpan, MarketDataError, MarketDataPort};
use crate::domain::chain::{OptionContract, OptionType};
use crate::domain::history::ClosingPrice;
use crate::domain::sentiment::ExpirationVolumes;
use crate::domain::shared::Symbol;
use crate::infrastructure::market_data::{RobinhoodClient, YahooFinanceClient};

/// Market data adapter backed by the live provider APIs.
#[derive(Debug)]
pub struct LiveMarketData {
    brokerage: RobinhoodClient,
    market: YahooFinanceClient,
}

impl LiveMarketData {
    /// Create a new live adapter from its two clients.
    ///
    /// The brokerage client must already be logged in.
    #[must_use]
    pub const fn new(brokerage: RobinhoodClient, market: YahooFinanceClient) -> Self {
        Self { brokerage, market }
    }
}

#[async_trait]
impl MarketDataPort for LiveMarketData {
    async fn expiration_dates(&self, symbol: &Symbol) -> Result<Vec<NaiveDate>, MarketDataError> {
        self.brokerage.expiration_dates(symbol).await
    }

    async fn reference_price(&self, symbol: &Symbol) -> Result<Option<Decimal>, MarketDataError> {
        self.brokerage.last_trade_price(symbol).await
    }

    async fn option_chain(
        &self,
        symbol: &Symbol,
        expiration: NaiveDate,
        option_type: OptionType,
    ) -> Result<Vec<OptionContract>, MarketDataError> {
        self.brokerage
            .option_chain(symbol, expiration, option_type)
            .await
    }

    async fn closing_prices(
        &self,
        symbol: &Symbol,
        span: HistorySpan,
    ) -> Result<Vec<ClosingPrice>, MarketDataError> {
        self.brokerage.closing_prices(symbol, span).await
    }

    async fn option_volumes(
        &self,
        symbol: &Symbol,
    ) -> Result<Vec<ExpirationVolumes>, MarketDataError> {
        self.market.option_volumes(symbol).await
    }

    async fn volatility_index(&self) -> Result<Option<Decimal>, MarketDataError> {
        self.market.volatility_index().await
    }
}
