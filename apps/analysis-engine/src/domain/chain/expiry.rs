//! Expiration date filtering.

use chrono::{Datelike, NaiveDate};

/// Filter a provider's expiration dates down to one calendar month.
///
/// Returns the matching dates in ascending order. An empty result means
/// the chain has no listed expirations in that month.
#[must_use]
pub fn expirations_in_month(dates: &[NaiveDate], year: i32, month: u32) -> Vec<NaiveDate> {
    let mut matching: Vec<NaiveDate> = dates
        .iter()
        .copied()
        .filter(|d| d.year() == year && d.month() == month)
        .collect();
    matching.sort_unstable();
    matching
}
