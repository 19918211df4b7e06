//! Yahoo Finance adapter.
//!
//! Supplies the signals the brokerage API does not carry: the
//! volatility index level and per-expiration option volume totals.

use std::time::Duration;

use chrono::DateTime;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::ports::MarketDataError;
use crate::domain::sentiment::ExpirationVolumes;
use crate::domain::shared::Symbol;

/// Yahoo Finance endpoint configuration.
#[derive(Debug, Clone)]
pub struct YahooFinanceConfig {
    /// API base URL (e.g., "https://query1.finance.yahoo.com").
    pub api_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for YahooFinanceConfig {
    fn default() -> Self {
        Self {
            api_url: "https://query1.finance.yahoo.com".to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

/// REST client for Yahoo Finance market data.
#[derive(Debug)]
pub struct YahooFinanceClient {
    client: reqwest::Client,
    api_url: String,
}

impl YahooFinanceClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: &YahooFinanceConfig) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MarketDataError::ConnectionError {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, MarketDataError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            MarketDataError::ConnectionError {
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::ApiError {
                message: format!("{status}: {body}"),
            });
        }

        response
            .json()
            .await
            .map_err(|e| MarketDataError::ApiError {
                message: e.to_string(),
            })
    }

    /// Current level of the CBOE volatility index.
    ///
    /// Returns `None` when the chart carries no usable price.
    pub async fn volatility_index(&self) -> Result<Option<Decimal>, MarketDataError> {
        let url = format!(
            "{}/v8/finance/chart/%5EVIX?range=1d&interval=1d",
            self.api_url
        );
        let chart: ChartResponse = self.get_json(&url).await?;

        let price = chart
            .chart
            .result
            .into_iter()
            .next()
            .and_then(|r| r.meta.regular_market_price)
            .and_then(|p| Decimal::try_from(p).ok());
        Ok(price)
    }

    /// Per-expiration call/put volume totals for a symbol.
    ///
    /// One request lists the expiration dates; one request per date
    /// sums its chain volumes. Requests run sequentially; a failed
    /// expiration is skipped rather than failing the aggregate.
    pub async fn option_volumes(
        &self,
        symbol: &Symbol,
    ) -> Result<Vec<ExpirationVolumes>, MarketDataError> {
        let base = format!("{}/v7/finance/options/{}", self.api_url, symbol);
        let first: OptionsResponse = self.get_json(&base).await?;
        let Some(listing) = first.option_chain.result.into_iter().next() else {
            return Ok(Vec::new());
        };

        let mut volumes = Vec::with_capacity(listing.expiration_dates.len());
        for timestamp in listing.expiration_dates {
            let Some(expiration) = DateTime::from_timestamp(timestamp, 0) else {
                continue;
            };
            let url = format!("{base}?date={timestamp}");
            let response: OptionsResponse = match self.get_json(&url).await {
                Ok(r) => r,
                Err(err) => {
                    tracing::warn!(%expiration, error = %err, "skipping expiration volumes");
                    continue;
                }
            };

            if let Some(entry) = response
                .option_chain
                .result
                .into_iter()
                .next()
                .and_then(|r| r.options.into_iter().next())
            {
                volumes.push(ExpirationVolumes {
                    expiration: expiration.date_naive(),
                    call_volume: total_volume(&entry.calls),
                    put_volume: total_volume(&entry.puts),
                });
            }
        }
        Ok(volumes)
    }
}

fn total_volume(contracts: &[RawVolume]) -> u64 {
    contracts.iter().map(|c| c.volume.unwrap_or(0)).sum()
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Vec<ChartEntry>,
}

#[derive(Debug, Deserialize)]
struct ChartEntry {
    meta: ChartMeta,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OptionsResponse {
    #[serde(rename = "optionChain")]
    option_chain: OptionChainResult,
}

#[derive(Debug, Deserialize)]
struct OptionChainResult {
    result: Vec<OptionListing>,
}

#[derive(Debug, Deserialize)]
struct OptionListing {
    #[serde(rename = "expirationDates", default)]
    expiration_dates: Vec<i64>,
    #[serde(default)]
    options: Vec<OptionEntry>,
}

#[derive(Debug, Deserialize)]
struct OptionEntry {
    #[serde(default)]
    calls: Vec<RawVolume>,
    #[serde(default)]
    puts: Vec<RawVolume>,
}

#[derive(Debug, Deserialize)]
struct RawVolume {
    volume: Option<u64>,
}
