//! Report payload assembly.
//!
//! Gathers the selection, valuations, simulations, and sentiment
//! signals into one structure and renders the plain-text payload the
//! advisor consumes. Straight assembly; all computation happens in the
//! domain layer.

use std::fmt::Write as _;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::ports::NewsArticle;
use crate::domain::chain::{OptionContract, OptionType};
use crate::domain::history::DailyChangeSummary;
use crate::domain::sentiment::{PutCallSentiment, VolatilityRegime};
use crate::domain::shared::Symbol;
use crate::domain::simulation::SimulationBatch;
use crate::domain::valuation::ValuationResult;

/// Whether a contract's simulation ran or why it could not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SimulationOutcome {
    /// Scenarios were produced.
    Simulated(SimulationBatch),
    /// The simulation precondition failed for this contract.
    Unavailable {
        /// Why the simulation could not run.
        reason: String,
    },
}

/// One selected contract with its derived results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAnalysis {
    /// The contract snapshot.
    pub contract: OptionContract,
    /// Value decomposition.
    pub valuation: ValuationResult,
    /// Profit/loss scenarios, or why they are absent.
    pub simulation: SimulationOutcome,
}

/// A news article with its classified sentiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredArticle {
    /// The article.
    pub article: NewsArticle,
    /// Sentiment label from the advisor.
    pub sentiment: String,
}

/// The full analysis payload handed to the report layer and advisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Underlying symbol.
    pub symbol: Symbol,
    /// Option type analyzed.
    pub option_type: OptionType,
    /// Expiration date analyzed.
    pub expiration: NaiveDate,
    /// Reference price of the underlying at evaluation time.
    pub reference_price: Decimal,
    /// Selected contracts with valuations and simulations (ITM first).
    pub contracts: Vec<ContractAnalysis>,
    /// Daily-change summary, absent when history was unavailable.
    pub daily_changes: Option<DailyChangeSummary>,
    /// Window the daily-change summary covers, in days.
    pub history_window_days: i64,
    /// Aggregated put/call ratio, absent when it could not be computed.
    pub put_call_ratio: Option<Decimal>,
    /// Volatility index level, absent when unavailable.
    pub volatility_index: Option<Decimal>,
    /// News articles with classified sentiment.
    pub articles: Vec<ScoredArticle>,
}

/// Two-decimal rendering for price-like figures; "N/A" when absent.
fn fmt_money(value: Option<Decimal>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}"))
}

/// Raw rendering for Greeks, which keep provider precision; "N/A" when
/// absent.
fn fmt_greek(value: Option<Decimal>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

impl AnalysisReport {
    /// Render the plain-text payload for the advisor prompt.
    ///
    /// Unavailable figures render as "N/A" here, at the text boundary
    /// only; they are never folded back into arithmetic.
    #[must_use]
    pub fn render_prompt(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "Stock Symbol: {}", self.symbol);
        let _ = writeln!(out, "Option Type: {}", self.option_type);
        let _ = writeln!(out, "Expiration Date: {}", self.expiration);
        let _ = writeln!(out, "Current Price: ${:.2}", self.reference_price);

        let _ = writeln!(out, "\nSelected Options and Greeks:");
        if self.contracts.is_empty() {
            let _ = writeln!(out, "No eligible contracts were found in the chain.");
        }
        for analysis in &self.contracts {
            let contract = &analysis.contract;
            let valuation = &analysis.valuation;
            let _ = writeln!(out, "\nStrike Price: {}", contract.strike_price());
            let _ = writeln!(out, "  Delta: {}", fmt_greek(contract.delta()));
            let _ = writeln!(out, "  Gamma: {}", fmt_greek(contract.gamma()));
            let _ = writeln!(out, "  Theta: {}", fmt_greek(contract.theta()));
            let _ = writeln!(out, "  Vega: {}", fmt_greek(contract.vega()));
            let _ = writeln!(out, "  Premium: {}", fmt_greek(contract.mark_price()));
            let _ = writeln!(
                out,
                "  Intrinsic Value: {:.2}",
                valuation.intrinsic_value
            );
            let _ = writeln!(
                out,
                "  Intrinsic Value (Dollar): ${:.2}",
                valuation.intrinsic_value_dollars
            );
            let _ = writeln!(
                out,
                "  Extrinsic Value: {}",
                fmt_money(valuation.extrinsic_value)
            );
            let _ = writeln!(
                out,
                "  Extrinsic Value (Dollar): {}",
                valuation
                    .extrinsic_value_dollars
                    .map_or_else(|| "N/A".to_string(), |v| format!("${v:.2}"))
            );
            let _ = writeln!(
                out,
                "  Theta Decay (%): {:.2}%",
                valuation.theta_decay_ratio
            );
        }

        if let Some(summary) = &self.daily_changes {
            let _ = writeln!(
                out,
                "\nHistorical Price Analysis (Last {} Days):",
                self.history_window_days
            );
            let _ = writeln!(
                out,
                "  Trading Days Analyzed: {}",
                summary.trading_days_analyzed
            );
            let _ = writeln!(out, "  Positive Days: {}", summary.positive_days);
            let _ = writeln!(
                out,
                "  Average Positive Change: {}%",
                summary.average_positive_change
            );
            let _ = writeln!(out, "  Negative Days: {}", summary.negative_days);
            let _ = writeln!(
                out,
                "  Average Negative Change: {}%",
                summary.average_negative_change
            );
        }

        let _ = writeln!(out, "\nSentiment Indicators:");
        let _ = writeln!(out, "  Put/Call Ratio: {}", fmt_money(self.put_call_ratio));
        let _ = writeln!(out, "  VIX Value: {}", fmt_money(self.volatility_index));
        if let Some(ratio) = self.put_call_ratio {
            let _ = writeln!(
                out,
                "  - {}",
                PutCallSentiment::classify(ratio).insight(ratio)
            );
        }
        if let Some(vix) = self.volatility_index {
            let _ = writeln!(out, "  - {}", VolatilityRegime::classify(vix).insight(vix));
        }

        let _ = writeln!(out, "\nNews Sentiment Analysis:");
        if self.articles.is_empty() {
            let _ = writeln!(out, "No recent news articles found.");
        }
        for scored in &self.articles {
            let _ = writeln!(out, "Title: {}", scored.article.title);
            let _ = writeln!(out, "Sentiment: {}", scored.sentiment);
            let _ = writeln!(out, "URL: {}\n", scored.article.link);
        }

        for analysis in &self.contracts {
            match &analysis.simulation {
                SimulationOutcome::Simulated(batch) => {
                    let _ = writeln!(
                        out,
                        "\nOption Profit or Loss Analysis (Strike {}):",
                        analysis.contract.strike_price()
                    );
                    let _ = writeln!(
                        out,
                        "  Ask Price (Contract Cost): ${:.2}",
                        batch.contract_cost
                    );
                    if batch.delta_defaulted {
                        let _ = writeln!(out, "  Note: delta was unavailable and defaulted to 0.");
                    }
                    for scenario in &batch.scenarios {
                        let _ =
                            writeln!(out, "  Percentage Change: {}%", scenario.percent_change);
                        let _ = writeln!(
                            out,
                            "    Stock Price Change: ${:.2}",
                            scenario.stock_price_change
                        );
                        let _ = writeln!(
                            out,
                            "    Option Price Change per Share: ${:.2}",
                            scenario.option_price_change_per_share
                        );
                        let _ = writeln!(
                            out,
                            "    Option Price Change per Contract: ${:.2}",
                            scenario.option_price_change_per_contract
                        );
                        let _ = writeln!(
                            out,
                            "    Profit or Loss for the Contract: ${:.2}",
                            scenario.profit_or_loss
                        );
                        let _ = writeln!(
                            out,
                            "    Total Return Percentage: {}",
                            scenario
                                .total_return_percentage
                                .map_or_else(|| "N/A".to_string(), |r| format!("{r:.2}%"))
                        );
                    }
                }
                SimulationOutcome::Unavailable { reason } => {
                    let _ = writeln!(
                        out,
                        "\nOption Profit or Loss Analysis (Strike {}): unavailable ({reason})",
                        analysis.contract.strike_price()
                    );
                }
            }
        }

        out
    }
}
