//! Mock market data for testing.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::application::ports::{HistorySpan, MarketDataError, MarketDataPort};
use crate::domain::chain::{OptionContract, OptionType};
use crate::domain::history::ClosingPrice;
use crate::domain::sentiment::ExpirationVolumes;
use crate::domain::shared::Symbol;

/// In-memory mock market data for testing.
#[derive(Debug, Default)]
pub struct MockMarketData {
    prices: RwLock<HashMap<String, Decimal>>,
    expirations: RwLock<HashMap<String, Vec<NaiveDate>>>,
    chains: RwLock<HashMap<(String, NaiveDate, OptionType), Vec<OptionContract>>>,
    closes: RwLock<HashMap<String, Vec<ClosingPrice>>>,
    volumes: RwLock<HashMap<String, Vec<ExpirationVolumes>>>,
    volatility: RwLock<Option<Decimal>>,
}

impl MockMarketData {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reference price for a symbol.
    pub fn set_price(&self, symbol: &str, price: Decimal) {
        let mut prices = self
            .prices
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        prices.insert(symbol.to_uppercase(), price);
    }

    /// Set the expiration dates for a symbol.
    pub fn set_expirations(&self, symbol: &str, dates: Vec<NaiveDate>) {
        let mut expirations = self
            .expirations
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        expirations.insert(symbol.to_uppercase(), dates);
    }

    /// Set the chain for one `(symbol, expiration, type)` query.
    pub fn set_chain(
        &self,
        symbol: &str,
        expiration: NaiveDate,
        option_type: OptionType,
        chain: Vec<OptionContract>,
    ) {
        let mut chains = self
            .chains
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        chains.insert((symbol.to_uppercase(), expiration, option_type), chain);
    }

    /// Set the closing-price history for a symbol.
    pub fn set_closes(&self, symbol: &str, closes: Vec<ClosingPrice>) {
        let mut map = self
            .closes
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        map.insert(symbol.to_uppercase(), closes);
    }

    /// Set the per-expiration volumes for a symbol.
    pub fn set_volumes(&self, symbol: &str, volumes: Vec<ExpirationVolumes>) {
        let mut map = self
            .volumes
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        map.insert(symbol.to_uppercase(), volumes);
    }

    /// Set the volatility index level.
    pub fn set_volatility_index(&self, vix: Decimal) {
        let mut volatility = self
            .volatility
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *volatility = Some(vix);
    }
}

#[async_trait]
impl MarketDataPort for MockMarketData {
    async fn expiration_dates(&self, symbol: &Symbol) -> Result<Vec<NaiveDate>, MarketDataError> {
        let expirations = self
            .expirations
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(expirations.get(symbol.as_str()).cloned().unwrap_or_default())
    }

    async fn reference_price(&self, symbol: &Symbol) -> Result<Option<Decimal>, MarketDataError> {
        let prices = self
            .prices
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(prices.get(symbol.as_str()).copied())
    }

    async fn option_chain(
        &self,
        symbol: &Symbol,
        expiration: NaiveDate,
        option_type: OptionType,
    ) -> Result<Vec<OptionContract>, MarketDataError> {
        let chains = self
            .chains
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(chains
            .get(&(symbol.as_str().to_string(), expiration, option_type))
            .cloned()
            .unwrap_or_default())
    }

    async fn closing_prices(
        &self,
        symbol: &Symbol,
        _span: HistorySpan,
    ) -> Result<Vec<ClosingPrice>, MarketDataError> {
        let closes = self
            .closes
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(closes.get(symbol.as_str()).cloned().unwrap_or_default())
    }

    async fn option_volumes(
        &self,
        symbol: &Symbol,
    ) -> Result<Vec<ExpirationVolumes>, MarketDataError> {
        let volumes = self
            .volumes
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(volumes.get(symbol.as_str()).cloned().unwrap_or_default())
    }

    async fn volatility_index(&self) -> Result<Option<Decimal>, MarketDataError> {
        let volatility = self
            .volatility
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(*volatility)
    }
}
