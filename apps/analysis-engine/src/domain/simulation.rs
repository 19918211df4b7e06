//! Profit/loss simulation across hypothetical price moves.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chain::{OptionContract, SHARES_PER_CONTRACT};
use crate::domain::shared::ReferencePrice;

/// Simulation precondition failure.
///
/// Profit/loss is a decision-relevant number, so a contract without a
/// usable ask price fails outright instead of producing a scenario
/// built on fabricated zeros.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing market data: {field} is unavailable or zero")]
pub struct MissingMarketDataError {
    /// The field that was absent or unusable.
    pub field: &'static str,
}

/// Simulated outcome for a single hypothetical percentage move.
///
/// All fields are rounded to 2 decimal places at construction; the
/// arithmetic behind them runs at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationScenario {
    /// The hypothetical move in the underlying, in percent.
    pub percent_change: Decimal,
    /// Absolute change in the underlying price.
    pub stock_price_change: Decimal,
    /// Delta-approximated option price change per share.
    pub option_price_change_per_share: Decimal,
    /// Option price change for a full contract.
    pub option_price_change_per_contract: Decimal,
    /// Profit or loss for the contract.
    pub profit_or_loss: Decimal,
    /// Profit or loss as a percentage of the contract cost.
    ///
    /// `None` when the cost basis is zero; never infinity or NaN.
    pub total_return_percentage: Option<Decimal>,
}

/// An ordered batch of simulated scenarios for one contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationBatch {
    /// Scenarios in the exact order the percentage moves were given.
    pub scenarios: Vec<SimulationScenario>,
    /// Cost of entering the contract (ask price × shares per contract).
    pub contract_cost: Decimal,
    /// Set when delta was unavailable and defaulted to zero.
    ///
    /// A defaulted delta flattens every scenario but keeps the batch
    /// structurally valid, so it is a warning on the batch rather than
    /// a failure.
    pub delta_defaulted: bool,
}

/// Simulate contract profit/loss for each hypothetical percentage move.
///
/// Per move `p`: the underlying shifts by `reference × p/100`, the
/// option price follows it scaled by delta, and the contract-level
/// figure multiplies by the 100-share contract size. Negative moves are
/// valid and produce losses whenever delta is positive. Output order
/// matches input order exactly.
///
/// # Errors
///
/// Returns [`MissingMarketDataError`] when the ask price is missing or
/// zero.
pub fn simulate(
    contract: &OptionContract,
    reference_price: ReferencePrice,
    percent_changes: &[Decimal],
) -> Result<SimulationBatch, MissingMarketDataError> {
    let ask = contract
        .ask_price()
        .filter(|a| *a > Decimal::ZERO)
        .ok_or(MissingMarketDataError { field: "ask_price" })?;

    let (delta, delta_defaulted) = match contract.delta() {
        Some(d) => (d, false),
        None => (Decimal::ZERO, true),
    };

    let reference = reference_price.amount();
    let contract_cost = ask * SHARES_PER_CONTRACT;

    let scenarios = percent_changes
        .iter()
        .map(|&percent_change| {
            let stock_price_change = reference * (percent_change / Decimal::ONE_HUNDRED);
            let per_share = delta * stock_price_change;
            let per_contract = per_share * SHARES_PER_CONTRACT;
            let profit_or_loss = per_contract;
            let total_return = if contract_cost.is_zero() {
                None
            } else {
                Some(profit_or_loss / contract_cost * Decimal::ONE_HUNDRED)
            };

            SimulationScenario {
                percent_change,
                stock_price_change: stock_price_change.round_dp(2),
                option_price_change_per_share: per_share.round_dp(2),
                option_price_change_per_contract: per_contract.round_dp(2),
                profit_or_loss: profit_or_loss.round_dp(2),
                total_return_percentage: total_return.map(|r| r.round_dp(2)),
            }
        })
        .collect();

    Ok(SimulationBatch {
        scenarios,
        contract_cost: contract_cost.round_dp(2),
        delta_defaulted,
    })
}
