//! Option chain types and contract selection.

mod contract;
mod expiry;
mod selection;

pub use contract::{OptionContract, OptionType, SHARES_PER_CONTRACT};
pub use expiry::expirations_in_month;
pub use selection::{ContractSelection, select_contracts};
