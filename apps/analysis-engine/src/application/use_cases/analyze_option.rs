//! Analyze Option Use Case
//!
//! Orchestrates the full pipeline for one `(symbol, option type,
//! expiration)` query: resolve the expiration, fetch the chain and
//! reference price, select the contracts nearest the money, value and
//! simulate each, fold in the auxiliary sentiment signals, and hand the
//! assembled report to the advisor for a narrative.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::application::ports::{
    AdvisorPort, HistorySpan, MarketDataError, MarketDataPort, NewsPort,
};
use crate::application::report::{
    AnalysisReport, ContractAnalysis, ScoredArticle, SimulationOutcome,
};
use crate::domain::chain::{OptionType, expirations_in_month, select_contracts};
use crate::domain::history::analyze_daily_changes;
use crate::domain::sentiment::aggregate_put_call_ratio;
use crate::domain::shared::{ReferencePrice, Symbol};
use crate::domain::simulation::simulate;
use crate::domain::valuation::evaluate;

/// How the caller names the expiration to analyze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirationChoice {
    /// An exact expiration date.
    Date(NaiveDate),
    /// A calendar month; the earliest listed expiration in it is used.
    Month {
        /// Year of the expiration month.
        year: i32,
        /// Month (1-12).
        month: u32,
    },
}

/// A single analysis query.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Underlying symbol.
    pub symbol: Symbol,
    /// Option type to analyze.
    pub option_type: OptionType,
    /// Expiration to analyze.
    pub expiration: ExpirationChoice,
}

/// Tunable analysis parameters, usually loaded from configuration.
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    /// Hypothetical percentage moves to simulate, in order.
    pub percent_changes: Vec<Decimal>,
    /// Trailing window for the daily-change analysis, in days.
    pub history_window_days: i64,
    /// Span requested from the historical price feed.
    pub history_span: HistorySpan,
    /// Horizon for put/call volume aggregation, in days.
    pub put_call_horizon_days: i64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            percent_changes: vec![dec!(1), dec!(10), dec!(20)],
            history_window_days: 90,
            history_span: HistorySpan::ThreeMonths,
            put_call_horizon_days: 60,
        }
    }
}

/// The finished analysis: the report plus the advisor's narrative.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// The assembled report.
    pub report: AnalysisReport,
    /// Advisor narrative, absent when the advisor was unavailable.
    pub narrative: Option<String>,
}

/// Analysis failure.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Market data retrieval failed.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    /// The requested month has no listed expirations.
    #[error("no option expirations found for {symbol} in {year}-{month:02}")]
    NoExpirations {
        /// Underlying symbol.
        symbol: String,
        /// Requested year.
        year: i32,
        /// Requested month.
        month: u32,
    },

    /// The provider could not supply a usable reference price.
    #[error("reference price unavailable for {symbol}")]
    MissingReferencePrice {
        /// Underlying symbol.
        symbol: String,
    },
}

/// Use case for analyzing one options contract query end to end.
pub struct AnalyzeOptionUseCase<M, N, A>
where
    M: MarketDataPort,
    N: NewsPort,
    A: AdvisorPort,
{
    market_data: Arc<M>,
    news: Arc<N>,
    advisor: Arc<A>,
    settings: AnalysisSettings,
}

impl<M, N, A> AnalyzeOptionUseCase<M, N, A>
where
    M: MarketDataPort,
    N: NewsPort,
    A: AdvisorPort,
{
    /// Create a new `AnalyzeOptionUseCase`.
    pub const fn new(
        market_data: Arc<M>,
        news: Arc<N>,
        advisor: Arc<A>,
        settings: AnalysisSettings,
    ) -> Self {
        Self {
            market_data,
            news,
            advisor,
            settings,
        }
    }

    /// Execute the analysis.
    ///
    /// Market data failures on the main path (expirations, reference
    /// price, chain) abort the analysis. Auxiliary signals (history,
    /// put/call ratio, volatility index, news, narrative) degrade
    /// gracefully: a failure is logged and the report simply omits that
    /// signal.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] on main-path failures.
    pub async fn execute(&self, request: AnalysisRequest) -> Result<AnalysisOutcome, AnalysisError> {
        let symbol = &request.symbol;
        let expiration = self.resolve_expiration(symbol, request.expiration).await?;

        let reference_price = self
            .market_data
            .reference_price(symbol)
            .await?
            .and_then(|price| ReferencePrice::new(price).ok())
            .ok_or_else(|| AnalysisError::MissingReferencePrice {
                symbol: symbol.to_string(),
            })?;

        tracing::info!(
            %symbol,
            %expiration,
            option_type = %request.option_type,
            reference = %reference_price,
            "running option analysis"
        );

        let chain = self
            .market_data
            .option_chain(symbol, expiration, request.option_type)
            .await?;
        let selection = select_contracts(&chain, reference_price);
        if selection.is_empty() {
            tracing::warn!(%symbol, %expiration, "no eligible contracts in chain");
        }

        let contracts: Vec<ContractAnalysis> = selection
            .contracts()
            .map(|contract| {
                let valuation = evaluate(contract, reference_price);
                let simulation =
                    match simulate(contract, reference_price, &self.settings.percent_changes) {
                        Ok(batch) => SimulationOutcome::Simulated(batch),
                        Err(err) => {
                            tracing::warn!(
                                strike = %contract.strike_price(),
                                error = %err,
                                "simulation skipped for contract"
                            );
                            SimulationOutcome::Unavailable {
                                reason: err.to_string(),
                            }
                        }
                    };
                ContractAnalysis {
                    contract: contract.clone(),
                    valuation,
                    simulation,
                }
            })
            .collect();

        let now = Utc::now();

        let daily_changes = match self
            .market_data
            .closing_prices(symbol, self.settings.history_span)
            .await
        {
            Ok(closes) => {
                match analyze_daily_changes(&closes, self.settings.history_window_days, now) {
                    Ok(summary) => Some(summary),
                    Err(err) => {
                        tracing::warn!(%symbol, error = %err, "daily-change analysis skipped");
                        None
                    }
                }
            }
            Err(err) => {
                tracing::warn!(%symbol, error = %err, "historical prices unavailable");
                None
            }
        };

        let put_call_ratio = match self.market_data.option_volumes(symbol).await {
            Ok(volumes) => aggregate_put_call_ratio(
                &volumes,
                now.date_naive(),
                self.settings.put_call_horizon_days,
            ),
            Err(err) => {
                tracing::warn!(%symbol, error = %err, "option volumes unavailable");
                None
            }
        };

        let volatility_index = match self.market_data.volatility_index().await {
            Ok(vix) => vix,
            Err(err) => {
                tracing::warn!(error = %err, "volatility index unavailable");
                None
            }
        };

        let articles = self.scored_articles(symbol).await;

        let report = AnalysisReport {
            symbol: symbol.clone(),
            option_type: request.option_type,
            expiration,
            reference_price: reference_price.amount(),
            contracts,
            daily_changes,
            history_window_days: self.settings.history_window_days,
            put_call_ratio,
            volatility_index,
            articles,
        };

        let narrative = match self.advisor.narrative(&report.render_prompt()).await {
            Ok(text) => Some(text),
            Err(err) => {
                tracing::warn!(error = %err, "advisor narrative unavailable");
                None
            }
        };

        Ok(AnalysisOutcome { report, narrative })
    }

    async fn resolve_expiration(
        &self,
        symbol: &Symbol,
        choice: ExpirationChoice,
    ) -> Result<NaiveDate, AnalysisError> {
        match choice {
            ExpirationChoice::Date(date) => Ok(date),
            ExpirationChoice::Month { year, month } => {
                let dates = self.market_data.expiration_dates(symbol).await?;
                expirations_in_month(&dates, year, month)
                    .first()
                    .copied()
                    .ok_or_else(|| AnalysisError::NoExpirations {
                        symbol: symbol.to_string(),
                        year,
                        month,
                    })
            }
        }
    }

    /// Fetch news and classify each article's sentiment.
    ///
    /// An article whose classification fails is skipped; a failed fetch
    /// yields no articles at all.
    async fn scored_articles(&self, symbol: &Symbol) -> Vec<ScoredArticle> {
        let articles = match self.news.recent_articles(symbol).await {
            Ok(articles) => articles,
            Err(err) => {
                tracing::warn!(%symbol, error = %err, "news retrieval failed");
                return Vec::new();
            }
        };

        let mut scored = Vec::with_capacity(articles.len());
        for article in articles {
            let content = format!("{}. {}", article.title, article.snippet);
            match self.advisor.classify_sentiment(&content).await {
                Ok(sentiment) => scored.push(ScoredArticle { article, sentiment }),
                Err(err) => {
                    tracing::warn!(title = %article.title, error = %err, "sentiment skipped");
                }
            }
        }
        scored
    }
}
