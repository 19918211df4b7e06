//! Nearest-the-money contract selection.

use serde::{Deserialize, Serialize};

use crate::domain::chain::OptionContract;
use crate::domain::shared::ReferencePrice;

/// The representative contracts picked from a chain.
///
/// Holds at most one contract from each side of the reference price:
/// the highest strike at or below it and the lowest strike above it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractSelection {
    itm: Option<OptionContract>,
    otm: Option<OptionContract>,
}

impl ContractSelection {
    /// The in-the-money pick (strike at or below the reference price).
    #[must_use]
    pub const fn itm(&self) -> Option<&OptionContract> {
        self.itm.as_ref()
    }

    /// The out-of-the-money pick (strike above the reference price).
    #[must_use]
    pub const fn otm(&self) -> Option<&OptionContract> {
        self.otm.as_ref()
    }

    /// True when the chain produced no eligible contracts.
    ///
    /// An empty selection is a valid terminal state, not an error;
    /// callers must check before running valuation or simulation.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.itm.is_none() && self.otm.is_none()
    }

    /// Iterate the selected contracts, ITM side first.
    pub fn contracts(&self) -> impl Iterator<Item = &OptionContract> {
        self.itm.iter().chain(self.otm.iter())
    }
}

/// Pick the representative contracts nearest the money from a chain.
///
/// The chain is sorted by strike ascending, then split at the reference
/// price: strikes at or below it land on the ITM side, strikes above it
/// on the OTM side. The split is applied identically for calls and puts
/// (put selection deliberately mirrors call selection, so the picks are
/// always the two strikes adjacent to the reference price). From each
/// side the contract closest to the money is taken.
///
/// Pure function: the input sequence is never mutated, and identical
/// input always yields the identical selection.
#[must_use]
pub fn select_contracts(
    chain: &[OptionContract],
    reference_price: ReferencePrice,
) -> ContractSelection {
    let mut sorted: Vec<&OptionContract> = chain.iter().collect();
    sorted.sort_by(|a, b| a.strike_price().cmp(&b.strike_price()));

    let reference = reference_price.amount();
    let itm = sorted
        .iter()
        .filter(|c| c.strike_price() <= reference)
        .next_back();
    let otm = sorted.iter().find(|c| c.strike_price() > reference);

    ContractSelection {
        itm: itm.map(|c| (*c).clone()),
        otm: otm.map(|c| (*c).clone()),
    }
}
