//! Snapshot-file market data adapter.
//!
//! Serves a previously captured market snapshot from a JSON file, for
//! offline runs and reproducible demos. The file carries everything
//! the port can be asked for; queries outside the snapshot return
//! empty results, not errors.

use std::path::Path;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::ports::{HistorySpan, MarketDataError, MarketDataPort};
use crate::domain::chain::{OptionContract, OptionType};
use crate::domain::history::ClosingPrice;
use crate::domain::sentiment::ExpirationVolumes;
use crate::domain::shared::Symbol;

/// One chain in the snapshot, keyed by expiration and type.
#[derive(Debug, Clone, Deserialize)]
struct SnapshotChain {
    expiration: NaiveDate,
    option_type: OptionType,
    contracts: Vec<OptionContract>,
}

/// The on-disk snapshot format.
#[derive(Debug, Clone, Deserialize)]
struct Snapshot {
    symbol: Symbol,
    reference_price: Option<Decimal>,
    #[serde(default)]
    expirations: Vec<NaiveDate>,
    #[serde(default)]
    chains: Vec<SnapshotChain>,
    #[serde(default)]
    closes: Vec<ClosingPrice>,
    #[serde(default)]
    volumes: Vec<ExpirationVolumes>,
    volatility_index: Option<Decimal>,
}

/// Market data served from a JSON snapshot file.
#[derive(Debug)]
pub struct FixtureMarketData {
    snapshot: Snapshot,
}

impl FixtureMarketData {
    /// Load a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MarketDataError> {
        let path = path.as_ref();
        let raw =
            std::fs::read_to_string(path).map_err(|e| MarketDataError::ConnectionError {
                message: format!("snapshot {}: {e}", path.display()),
            })?;
        Self::from_json(&raw)
    }

    /// Parse a snapshot from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON does not match the snapshot format.
    pub fn from_json(raw: &str) -> Result<Self, MarketDataError> {
        let snapshot: Snapshot =
            serde_json::from_str(raw).map_err(|e| MarketDataError::ApiError {
                message: format!("snapshot parse: {e}"),
            })?;
        Ok(Self { snapshot })
    }

    /// The symbol this snapshot was captured for.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.snapshot.symbol
    }

    fn covers(&self, symbol: &Symbol) -> bool {
        self.snapshot.symbol == *symbol
    }
}

#[async_trait]
impl MarketDataPort for FixtureMarketData {
    async fn expiration_dates(&self, symbol: &Symbol) -> Result<Vec<NaiveDate>, MarketDataError> {
        if !self.covers(symbol) {
            return Ok(Vec::new());
        }
        Ok(self.snapshot.expirations.clone())
    }

    async fn reference_price(&self, symbol: &Symbol) -> Result<Option<Decimal>, MarketDataError> {
        if !self.covers(symbol) {
            return Ok(None);
        }
        Ok(self.snapshot.reference_price)
    }

    async fn option_chain(
        &self,
        symbol: &Symbol,
        expiration: NaiveDate,
        option_type: OptionType,
    ) -> Result<Vec<OptionContract>, MarketDataError> {
        if !self.covers(symbol) {
            return Ok(Vec::new());
        }
        Ok(self
            .snapshot
            .chains
            .iter()
            .find(|c| c.expiration == expiration && c.option_type == option_type)
            .map(|c| c.contracts.clone())
            .unwrap_or_default())
    }

    async fn closing_prices(
        &self,
        symbol: &Symbol,
        _span: HistorySpan,
    ) -> Result<Vec<ClosingPrice>, MarketDataError> {
        if !self.covers(symbol) {
            return Ok(Vec::new());
        }
        Ok(self.snapshot.closes.clone())
    }

    async fn option_volumes(
        &self,
        symbol: &Symbol,
    ) -> Result<Vec<ExpirationVolumes>, MarketDataError> {
        if !self.covers(symbol) {
            return Ok(Vec::new());
        }
        Ok(self.snapshot.volumes.clone())
    }

    async fn volatility_index(&self) -> Result<Option<Decimal>, MarketDataError> {
        Ok(self.snapshot.volatility_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SNAPSHOT: &str = r#"{
        "symbol": "AAPL",
        "reference_price": "105.00",
        "expirations": ["2025-01-17"],
        "chains": [
            {
                "expiration": "2025-01-17",
                "option_type": "CALL",
                "contracts": [
                    {
                        "strike_price": "100",
                        "option_type": "CALL",
                        "ask_price": "2.50",
                        "mark_price": "2.45",
                        "delta": "0.5",
                        "gamma": null,
                        "theta": "-0.05",
                        "vega": null
                    }
                ]
            }
        ],
        "closes": [
            { "date": "2024-11-21T19:00:00Z", "close": "104.00" },
            { "date": "2024-11-22T19:00:00Z", "close": "105.00" }
        ],
        "volumes": [
            { "expiration": "2025-01-17", "call_volume": 1000, "put_volume": 600 }
        ],
        "volatility_index": "18.3"
    }"#;

    fn expiration() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 17).unwrap()
    }

    #[tokio::test]
    async fn snapshot_serves_all_queries() {
        let fixture = FixtureMarketData::from_json(SNAPSHOT).unwrap();
        let symbol = Symbol::new("AAPL");

        assert_eq!(
            fixture.expiration_dates(&symbol).await.unwrap(),
            vec![expiration()]
        );
        assert_eq!(
            fixture.reference_price(&symbol).await.unwrap(),
            Some(dec!(105.00))
        );

        let chain = fixture
            .option_chain(&symbol, expiration(), OptionType::Call)
            .await
            .unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].strike_price(), dec!(100));
        assert_eq!(chain[0].delta(), Some(dec!(0.5)));
        assert!(chain[0].gamma().is_none());

        assert_eq!(
            fixture
                .closing_prices(&symbol, HistorySpan::ThreeMonths)
                .await
                .unwrap()
                .len(),
            2
        );
        assert_eq!(fixture.option_volumes(&symbol).await.unwrap().len(), 1);
        assert_eq!(
            fixture.volatility_index().await.unwrap(),
            Some(dec!(18.3))
        );
    }

    #[tokio::test]
    async fn other_symbols_get_empty_results() {
        let fixture = FixtureMarketData::from_json(SNAPSHOT).unwrap();
        let other = Symbol::new("TSLA");

        assert!(fixture.expiration_dates(&other).await.unwrap().is_empty());
        assert!(fixture.reference_price(&other).await.unwrap().is_none());
        assert!(
            fixture
                .option_chain(&other, expiration(), OptionType::Call)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn malformed_snapshot_is_an_api_error() {
        let result = FixtureMarketData::from_json("{ not json");
        assert!(matches!(result, Err(MarketDataError::ApiError { .. })));
    }

    #[test]
    fn missing_file_is_a_connection_error() {
        let result = FixtureMarketData::from_file("/nonexistent/snapshot.json");
        assert!(matches!(
            result,
            Err(MarketDataError::ConnectionError { .. })
        ));
    }
}
