//! Daily percentage-change analysis of closing-price history.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A dated closing price from the historical feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosingPrice {
    /// Timestamp the close belongs to.
    pub date: DateTime<Utc>,
    /// Closing price.
    pub close: Decimal,
}

/// Summary of daily percentage changes over the analysis window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyChangeSummary {
    /// Trading days that fell inside the window.
    pub trading_days_analyzed: usize,
    /// Days that closed higher than the previous day.
    pub positive_days: usize,
    /// Mean of the positive changes, in percent (0 when there were none).
    pub average_positive_change: Decimal,
    /// Days that closed lower than the previous day.
    pub negative_days: usize,
    /// Mean of the negative changes, in percent (0 when there were none).
    pub average_negative_change: Decimal,
}

/// Historical analysis failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// Not enough closing prices to compute a change.
    #[error("insufficient closing-price history for analysis")]
    InsufficientData,
}

/// Analyze daily percentage changes over a trailing calendar window.
///
/// Keeps closes within `window_days` of `as_of`, collapses them to the
/// last close of each trading day, and measures the day-over-day
/// percentage change. Averages are rounded to 2 decimal places.
///
/// The cutoff instant is passed in rather than read from a clock so the
/// analysis is reproducible.
///
/// # Errors
///
/// Returns [`HistoryError::InsufficientData`] when fewer than two
/// closing prices are supplied.
pub fn analyze_daily_changes(
    closes: &[ClosingPrice],
    window_days: i64,
    as_of: DateTime<Utc>,
) -> Result<DailyChangeSummary, HistoryError> {
    if closes.len() < 2 {
        return Err(HistoryError::InsufficientData);
    }

    let cutoff = as_of - Duration::days(window_days);

    // Last close per trading day, days ascending. Later entries for the
    // same day overwrite earlier ones, matching feed order.
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for price in closes.iter().filter(|p| p.date >= cutoff) {
        by_day.insert(price.date.date_naive(), price.close);
    }

    let daily_closes: Vec<Decimal> = by_day.values().copied().collect();

    let mut positive = Vec::new();
    let mut negative = Vec::new();
    for pair in daily_closes.windows(2) {
        let (previous, current) = (pair[0], pair[1]);
        if previous.is_zero() {
            continue;
        }
        let change = (current - previous) / previous * Decimal::ONE_HUNDRED;
        if change > Decimal::ZERO {
            positive.push(change);
        } else if change < Decimal::ZERO {
            negative.push(change);
        }
    }

    Ok(DailyChangeSummary {
        trading_days_analyzed: daily_closes.len(),
        positive_days: positive.len(),
        average_positive_change: average(&positive),
        negative_days: negative.len(),
        average_negative_change: average(&negative),
    })
}

fn average(changes: &[Decimal]) -> Decimal {
    if changes.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = changes.iter().copied().sum();
    (sum / Decimal::from(changes.len())).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 21, 0, 0).unwrap()
    }

    fn close(date: DateTime<Utc>, price: Decimal) -> ClosingPrice {
        ClosingPrice { date, close: price }
    }

    #[test]
    fn splits_positive_and_negative_days() {
        let closes = vec![
            close(at(2025, 1, 6), dec!(100)),
            close(at(2025, 1, 7), dec!(102)), // +2%
            close(at(2025, 1, 8), dec!(101)), // ≈ −0.98%
            close(at(2025, 1, 9), dec!(103)), // ≈ +1.98%
        ];

        let summary = analyze_daily_changes(&closes, 90, at(2025, 1, 10)).unwrap();

        assert_eq!(summary.trading_days_analyzed, 4);
        assert_eq!(summary.positive_days, 2);
        assert_eq!(summary.negative_days, 1);
        assert_eq!(summary.average_positive_change, dec!(1.99));
        assert_eq!(summary.average_negative_change, dec!(-0.98));
    }

    #[test]
    fn closes_outside_window_are_ignored() {
        let closes = vec![
            close(at(2024, 9, 1), dec!(50)), // far outside a 90-day window
            close(at(2025, 1, 6), dec!(100)),
            close(at(2025, 1, 7), dec!(101)),
        ];

        let summary = analyze_daily_changes(&closes, 90, at(2025, 1, 10)).unwrap();

        assert_eq!(summary.trading_days_analyzed, 2);
        assert_eq!(summary.positive_days, 1);
        assert_eq!(summary.negative_days, 0);
    }

    #[test]
    fn last_close_of_each_day_wins() {
        let closes = vec![
            close(at(2025, 1, 6), dec!(100)),
            close(Utc.with_ymd_and_hms(2025, 1, 7, 15, 0, 0).unwrap(), dec!(90)),
            close(Utc.with_ymd_and_hms(2025, 1, 7, 21, 0, 0).unwrap(), dec!(105)),
        ];

        let summary = analyze_daily_changes(&closes, 90, at(2025, 1, 10)).unwrap();

        assert_eq!(summary.trading_days_analyzed, 2);
        assert_eq!(summary.positive_days, 1);
        assert_eq!(summary.average_positive_change, dec!(5.00));
    }

    #[test]
    fn flat_days_count_in_neither_bucket() {
        let closes = vec![
            close(at(2025, 1, 6), dec!(100)),
            close(at(2025, 1, 7), dec!(100)),
        ];

        let summary = analyze_daily_changes(&closes, 90, at(2025, 1, 10)).unwrap();

        assert_eq!(summary.positive_days, 0);
        assert_eq!(summary.negative_days, 0);
        assert_eq!(summary.average_positive_change, Decimal::ZERO);
    }

    #[test]
    fn fewer_than_two_closes_is_an_error() {
        let closes = vec![close(at(2025, 1, 6), dec!(100))];
        assert_eq!(
            analyze_daily_changes(&closes, 90, at(2025, 1, 10)),
            Err(HistoryError::InsufficientData)
        );
        assert_eq!(
            analyze_daily_changes(&[], 90, at(2025, 1, 10)),
            Err(HistoryError::InsufficientData)
        );
    }
}
