//! Robinhood brokerage adapter.
//!
//! Thin REST client for the brokerage endpoints: session login, last
//! trade price, option chains, and historical closes. Numeric fields
//! arrive as strings (sometimes "N/A"); anything that does not parse
//! becomes `None` and stays that way.

use std::str::FromStr;
use std::sync::RwLock;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::ports::{HistorySpan, MarketDataError};
use crate::domain::chain::{OptionContract, OptionType};
use crate::domain::history::ClosingPrice;
use crate::domain::shared::Symbol;

/// Robinhood endpoint configuration.
#[derive(Debug, Clone)]
pub struct RobinhoodConfig {
    /// API base URL (e.g., "https://api.robinhood.com").
    pub api_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for RobinhoodConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.robinhood.com".to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

/// Brokerage login credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// REST client for the Robinhood API.
#[derive(Debug)]
pub struct RobinhoodClient {
    client: reqwest::Client,
    api_url: String,
    token: RwLock<Option<String>>,
}

impl RobinhoodClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: &RobinhoodConfig) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MarketDataError::ConnectionError {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    /// Log in and store the session token for subsequent requests.
    ///
    /// # Errors
    ///
    /// Returns [`MarketDataError::AuthenticationFailed`] when the
    /// credentials are rejected.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), MarketDataError> {
        let url = format!("{}/oauth2/token/", self.api_url);
        let body = serde_json::json!({
            "grant_type": "password",
            "username": credentials.username,
            "password": credentials.password,
            "scope": "internal",
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| MarketDataError::ConnectionError {
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(MarketDataError::AuthenticationFailed);
        }

        let token: TokenResponse =
            response
                .json()
                .await
                .map_err(|e| MarketDataError::ApiError {
                    message: e.to_string(),
                })?;

        let mut guard = self
            .token
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(token.access_token);
        tracing::info!("brokerage login successful");
        Ok(())
    }

    fn bearer_token(&self) -> Result<String, MarketDataError> {
        self.token
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
            .ok_or(MarketDataError::AuthenticationFailed)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        symbol: &Symbol,
    ) -> Result<T, MarketDataError> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| MarketDataError::ConnectionError {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(MarketDataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
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

    /// Last trade price for the underlying.
    pub async fn last_trade_price(
        &self,
        symbol: &Symbol,
    ) -> Result<Option<Decimal>, MarketDataError> {
        let url = format!("{}/quotes/{}/", self.api_url, symbol);
        let quote: QuoteResponse = self.get_json(&url, symbol).await?;
        Ok(parse_decimal(quote.last_trade_price.as_deref()))
    }

    /// All listed expiration dates for the symbol's chain.
    pub async fn expiration_dates(
        &self,
        symbol: &Symbol,
    ) -> Result<Vec<NaiveDate>, MarketDataError> {
        let url = format!("{}/options/chains/?equity_symbol={}", self.api_url, symbol);
        let chains: ChainsResponse = self.get_json(&url, symbol).await?;

        let mut dates: Vec<NaiveDate> = chains
            .results
            .into_iter()
            .flat_map(|c| c.expiration_dates)
            .filter_map(|d| NaiveDate::from_str(&d).ok())
            .collect();
        dates.sort_unstable();
        dates.dedup();
        Ok(dates)
    }

    /// Contract snapshots for one `(symbol, expiration, type)` chain.
    pub async fn option_chain(
        &self,
        symbol: &Symbol,
        expiration: NaiveDate,
        option_type: OptionType,
    ) -> Result<Vec<OptionContract>, MarketDataError> {
        let kind = match option_type {
            OptionType::Call => "call",
            OptionType::Put => "put",
        };
        let url = format!(
            "{}/options/marketdata/?chain_symbol={}&expiration_date={}&type={}",
            self.api_url, symbol, expiration, kind
        );
        let chain: OptionChainResponse = self.get_json(&url, symbol).await?;

        let mut contracts = Vec::with_capacity(chain.results.len());
        for raw in chain.results {
            let Some(strike) = parse_decimal(Some(&raw.strike_price)) else {
                tracing::warn!(strike = %raw.strike_price, "skipping contract with bad strike");
                continue;
            };
            let Ok(mut contract) = OptionContract::new(strike, option_type) else {
                tracing::warn!(%strike, "skipping contract with non-positive strike");
                continue;
            };
            if let Some(ask) = parse_decimal(raw.ask_price.as_deref()) {
                contract = contract.with_ask_price(ask);
            }
            if let Some(mark) = parse_decimal(raw.adjusted_mark_price.as_deref()) {
                contract = contract.with_mark_price(mark);
            }
            if let Some(delta) = parse_decimal(raw.delta.as_deref()) {
                contract = contract.with_delta(delta);
            }
            if let Some(gamma) = parse_decimal(raw.gamma.as_deref()) {
                contract = contract.with_gamma(gamma);
            }
            if let Some(theta) = parse_decimal(raw.theta.as_deref()) {
                contract = contract.with_theta(theta);
            }
            if let Some(vega) = parse_decimal(raw.vega.as_deref()) {
                contract = contract.with_vega(vega);
            }
            contracts.push(contract);
        }
        Ok(contracts)
    }

    /// Historical closing prices over the given span.
    pub async fn closing_prices(
        &self,
        symbol: &Symbol,
        span: HistorySpan,
    ) -> Result<Vec<ClosingPrice>, MarketDataError> {
        let url = format!(
            "{}/quotes/historicals/{}/?span={}&bounds=regular",
            self.api_url,
            symbol,
            span.as_query()
        );
        let history: HistoricalsResponse = self.get_json(&url, symbol).await?;

        Ok(history
            .historicals
            .into_iter()
            .filter_map(|h| {
                let date = DateTime::parse_from_rfc3339(&h.begins_at)
                    .ok()?
                    .with_timezone(&Utc);
                let close = parse_decimal(Some(&h.close_price))?;
                Some(ClosingPrice { date, close })
            })
            .collect())
    }
}

fn parse_decimal(value: Option<&str>) -> Option<Decimal> {
    value.and_then(|v| Decimal::from_str(v).ok())
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    last_trade_price: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChainsResponse {
    results: Vec<ChainEntry>,
}

#[derive(Debug, Deserialize)]
struct ChainEntry {
    #[serde(default)]
    expiration_dates: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct OptionChainResponse {
    results: Vec<RawOption>,
}

#[derive(Debug, Deserialize)]
struct RawOption {
    strike_price: String,
    ask_price: Option<String>,
    adjusted_mark_price: Option<String>,
    delta: Option<String>,
    gamma: Option<String>,
    theta: Option<String>,
    vega: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HistoricalsResponse {
    historicals: Vec<Historical>,
}

#[derive(Debug, Deserialize)]
struct Historical {
    begins_at: String,
    close_price: String,
}
