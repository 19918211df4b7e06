//! Market sentiment signals: put/call ratio and volatility index.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Call and put volume totals for one expiration date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirationVolumes {
    /// Expiration date the volumes belong to.
    pub expiration: NaiveDate,
    /// Total call volume across the chain.
    pub call_volume: u64,
    /// Total put volume across the chain.
    pub put_volume: u64,
}

/// Aggregate the put/call ratio over expirations within a day horizon.
///
/// Sums call and put volume for every expiration up to `horizon_days`
/// past `as_of`. Returns `None` when no expiration is in range or the
/// call volume sums to zero, so the ratio never comes from a zero
/// denominator.
#[must_use]
pub fn aggregate_put_call_ratio(
    volumes: &[ExpirationVolumes],
    as_of: NaiveDate,
    horizon_days: i64,
) -> Option<Decimal> {
    let cutoff = as_of + Duration::days(horizon_days);
    let eligible: Vec<&ExpirationVolumes> =
        volumes.iter().filter(|v| v.expiration <= cutoff).collect();
    if eligible.is_empty() {
        return None;
    }

    let total_calls: u64 = eligible.iter().map(|v| v.call_volume).sum();
    let total_puts: u64 = eligible.iter().map(|v| v.put_volume).sum();
    if total_calls == 0 {
        return None;
    }

    Some(Decimal::from(total_puts) / Decimal::from(total_calls))
}

/// Sentiment reading from a put/call ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PutCallSentiment {
    /// More calls traded than puts; optimism.
    Bullish,
    /// Puts and calls balanced at the equity baseline.
    Neutral,
    /// Heavy put trading; fear or hedging.
    Bearish,
}

impl PutCallSentiment {
    /// Classify a put/call ratio against the 0.7 equity baseline.
    #[must_use]
    pub fn classify(ratio: Decimal) -> Self {
        if ratio < dec!(0.7) {
            Self::Bullish
        } else if ratio == dec!(0.7) {
            Self::Neutral
        } else {
            Self::Bearish
        }
    }

    /// The narrative insight for this reading.
    #[must_use]
    pub fn insight(self, ratio: Decimal) -> String {
        let ratio = ratio.round_dp(2);
        match self {
            Self::Bullish => format!(
                "The put/call ratio of {ratio} indicates bullish sentiment, \
                 suggesting optimism as more call options are traded compared to puts."
            ),
            Self::Neutral => format!(
                "The put/call ratio of {ratio} suggests neutral sentiment, \
                 indicating put and call trading are roughly balanced."
            ),
            Self::Bearish => format!(
                "The put/call ratio of {ratio} indicates strong bearish sentiment, \
                 suggesting heightened fear or significant hedging activity."
            ),
        }
    }
}

/// Volatility regime read from the volatility index level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolatilityRegime {
    /// Below 12: complacency.
    Low,
    /// 12 to 20: typical market conditions.
    Normal,
    /// Above 20 up to 30: uncertainty or stress.
    Elevated,
    /// Above 30: fear and potential turmoil.
    Extreme,
}

impl VolatilityRegime {
    /// Classify a volatility index level.
    #[must_use]
    pub fn classify(vix: Decimal) -> Self {
        if vix < dec!(12) {
            Self::Low
        } else if vix <= dec!(20) {
            Self::Normal
        } else if vix <= dec!(30) {
            Self::Elevated
        } else {
            Self::Extreme
        }
    }

    /// The narrative insight for this regime.
    #[must_use]
    pub fn insight(self, vix: Decimal) -> String {
        let vix = vix.round_dp(2);
        match self {
            Self::Low => format!(
                "The VIX value of {vix} indicates low market volatility, \
                 reflecting complacency or confidence among market participants."
            ),
            Self::Normal => format!(
                "The VIX value of {vix} is within the normal range, \
                 suggesting moderate volatility and typical market conditions."
            ),
            Self::Elevated => format!(
                "The VIX value of {vix} indicates elevated market volatility, \
                 reflecting uncertainty or potential market stress."
            ),
            Self::Extreme => format!(
                "The VIX value of {vix} signals extreme market volatility, \
                 indicating significant fear and potential market turmoil."
            ),
        }
    }
}
