//! E2E integration tests for the analysis pipeline.
//!
//! Drives the use case from market data to rendered report with
//! in-memory and snapshot-file adapters.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use rust_decimal_macros::dec;

use analysis_engine::application::ports::{
    AdvisorError, AdvisorPort, NewsArticle, NewsError, NewsPort,
};
use analysis_engine::application::report::SimulationOutcome;
use analysis_engine::application::use_cases::{
    AnalysisError, AnalysisRequest, AnalysisSettings, AnalyzeOptionUseCase, ExpirationChoice,
};
use analysis_engine::domain::chain::{OptionContract, OptionType};
use analysis_engine::domain::history::ClosingPrice;
use analysis_engine::domain::sentiment::ExpirationVolumes;
use analysis_engine::domain::shared::Symbol;
use analysis_engine::infrastructure::advisor::NoOpAdvisor;
use analysis_engine::infrastructure::market_data::{FixtureMarketData, MockMarketData};
use analysis_engine::infrastructure::news::NoOpNews;

// =============================================================================
// Test doubles
// =============================================================================

struct TestNews {
    articles: Vec<NewsArticle>,
}

#[async_trait]
impl NewsPort for TestNews {
    async fn recent_articles(&self, _symbol: &Symbol) -> Result<Vec<NewsArticle>, NewsError> {
        Ok(self.articles.clone())
    }
}

#[derive(Default)]
struct TestAdvisor {
    last_prompt: Mutex<Option<String>>,
}

#[async_trait]
impl AdvisorPort for TestAdvisor {
    async fn classify_sentiment(&self, text: &str) -> Result<String, AdvisorError> {
        if text.contains("beats") {
            Ok("positive".to_string())
        } else {
            Ok("negative".to_string())
        }
    }

    async fn narrative(&self, prompt: &str) -> Result<String, AdvisorError> {
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        Ok("The data supports a favorable risk/reward profile.".to_string())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

fn expiration() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 17).unwrap()
}

fn call(strike: rust_decimal::Decimal) -> OptionContract {
    OptionContract::new(strike, OptionType::Call).unwrap()
}

fn populated_market() -> MockMarketData {
    let market = MockMarketData::new();
    market.set_price("AAPL", dec!(105));
    market.set_expirations(
        "AAPL",
        vec![
            expiration(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 21).unwrap(),
        ],
    );
    market.set_chain(
        "AAPL",
        expiration(),
        OptionType::Call,
        vec![
            call(dec!(95))
                .with_ask_price(dec!(10.85))
                .with_mark_price(dec!(10.60))
                .with_delta(dec!(0.82))
                .with_theta(dec!(-0.031)),
            call(dec!(100))
                .with_ask_price(dec!(2.50))
                .with_mark_price(dec!(7.00))
                .with_delta(dec!(0.5))
                .with_gamma(dec!(0.034))
                .with_theta(dec!(-0.050))
                .with_vega(dec!(0.121)),
            call(dec!(110))
                .with_ask_price(dec!(1.15))
                .with_mark_price(dec!(1.05))
                .with_delta(dec!(0.24)),
            call(dec!(120))
                .with_ask_price(dec!(0.35))
                .with_mark_price(dec!(0.30))
                .with_delta(dec!(0.09)),
        ],
    );

    // Recent closes so the trailing window always covers them:
    // two up days and one down day.
    let now = Utc::now();
    market.set_closes(
        "AAPL",
        vec![
            ClosingPrice {
                date: now - Duration::days(4),
                close: dec!(100),
            },
            ClosingPrice {
                date: now - Duration::days(3),
                close: dec!(102),
            },
            ClosingPrice {
                date: now - Duration::days(2),
                close: dec!(101),
            },
            ClosingPrice {
                date: now - Duration::days(1),
                close: dec!(105),
            },
        ],
    );

    market.set_volumes(
        "AAPL",
        vec![ExpirationVolumes {
            expiration: (now + Duration::days(10)).date_naive(),
            call_volume: 1_000,
            put_volume: 600,
        }],
    );
    market.set_volatility_index(dec!(18.3));
    market
}

fn request(expiration: ExpirationChoice) -> AnalysisRequest {
    AnalysisRequest {
        symbol: Symbol::new("AAPL"),
        option_type: OptionType::Call,
        expiration,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn full_pipeline_produces_report_and_narrative() {
    let advisor = Arc::new(TestAdvisor::default());
    let use_case = AnalyzeOptionUseCase::new(
        Arc::new(populated_market()),
        Arc::new(TestNews {
            articles: vec![
                NewsArticle {
                    title: "Apple beats earnings".to_string(),
                    snippet: "Strong quarter".to_string(),
                    link: "https://example.com/a".to_string(),
                },
                NewsArticle {
                    title: "Supply concerns weigh on Apple".to_string(),
                    snippet: "Production delays".to_string(),
                    link: "https://example.com/b".to_string(),
                },
            ],
        }),
        Arc::clone(&advisor),
        AnalysisSettings::default(),
    );

    let outcome = use_case
        .execute(request(ExpirationChoice::Date(expiration())))
        .await
        .unwrap();
    let report = &outcome.report;

    // Selection brackets the reference price: 100 from below, 110 from above.
    assert_eq!(report.contracts.len(), 2);
    assert_eq!(report.contracts[0].contract.strike_price(), dec!(100));
    assert_eq!(report.contracts[1].contract.strike_price(), dec!(110));

    // Valuation of the ITM pick.
    let itm = &report.contracts[0];
    assert_eq!(itm.valuation.intrinsic_value, dec!(5));
    assert_eq!(itm.valuation.extrinsic_value, Some(dec!(2.00)));
    assert_eq!(itm.valuation.extrinsic_value_dollars, Some(dec!(200.00)));
    assert_eq!(itm.valuation.theta_decay_ratio.round_dp(2), dec!(0.71));

    // Simulation of the ITM pick follows the default moves in order.
    let SimulationOutcome::Simulated(batch) = &itm.simulation else {
        panic!("expected a simulated batch");
    };
    assert_eq!(batch.scenarios.len(), 3);
    assert_eq!(batch.scenarios[1].percent_change, dec!(10));
    assert_eq!(batch.scenarios[1].profit_or_loss, dec!(525.00));
    assert_eq!(
        batch.scenarios[1].total_return_percentage,
        Some(dec!(210.00))
    );
    assert!(!batch.delta_defaulted);

    // Auxiliary signals made it into the report.
    let summary = report.daily_changes.unwrap();
    assert_eq!(summary.trading_days_analyzed, 4);
    assert_eq!(summary.positive_days, 2);
    assert_eq!(summary.negative_days, 1);
    assert_eq!(report.put_call_ratio, Some(dec!(0.6)));
    assert_eq!(report.volatility_index, Some(dec!(18.3)));

    // Both articles were classified.
    assert_eq!(report.articles.len(), 2);
    assert_eq!(report.articles[0].sentiment, "positive");
    assert_eq!(report.articles[1].sentiment, "negative");

    // The advisor saw the assembled payload and answered.
    assert_eq!(
        outcome.narrative.as_deref(),
        Some("The data supports a favorable risk/reward profile.")
    );
    let prompt = advisor.last_prompt.lock().unwrap().clone().unwrap();
    assert!(prompt.contains("Stock Symbol: AAPL"));
    assert!(prompt.contains("Put/Call Ratio: 0.60"));
    assert!(prompt.contains("Profit or Loss for the Contract: $525.00"));
}

#[tokio::test]
async fn month_choice_resolves_to_earliest_expiration() {
    let use_case = AnalyzeOptionUseCase::new(
        Arc::new(populated_market()),
        Arc::new(NoOpNews),
        Arc::new(NoOpAdvisor),
        AnalysisSettings::default(),
    );

    let outcome = use_case
        .execute(request(ExpirationChoice::Month {
            year: 2025,
            month: 1,
        }))
        .await
        .unwrap();

    assert_eq!(outcome.report.expiration, expiration());
    assert_eq!(outcome.report.contracts.len(), 2);
}

#[tokio::test]
async fn month_without_expirations_is_an_error() {
    let use_case = AnalyzeOptionUseCase::new(
        Arc::new(populated_market()),
        Arc::new(NoOpNews),
        Arc::new(NoOpAdvisor),
        AnalysisSettings::default(),
    );

    let result = use_case
        .execute(request(ExpirationChoice::Month {
            year: 2025,
            month: 6,
        }))
        .await;

    assert!(matches!(
        result,
        Err(AnalysisError::NoExpirations { month: 6, .. })
    ));
}

#[tokio::test]
async fn missing_reference_price_is_an_error() {
    let market = MockMarketData::new();

    let use_case = AnalyzeOptionUseCase::new(
        Arc::new(market),
        Arc::new(NoOpNews),
        Arc::new(NoOpAdvisor),
        AnalysisSettings::default(),
    );

    let result = use_case
        .execute(request(ExpirationChoice::Date(expiration())))
        .await;

    assert!(matches!(
        result,
        Err(AnalysisError::MissingReferencePrice { .. })
    ));
}

#[tokio::test]
async fn empty_chain_still_produces_a_report() {
    let market = MockMarketData::new();
    market.set_price("AAPL", dec!(105));

    let use_case = AnalyzeOptionUseCase::new(
        Arc::new(market),
        Arc::new(NoOpNews),
        Arc::new(NoOpAdvisor),
        AnalysisSettings::default(),
    );

    let outcome = use_case
        .execute(request(ExpirationChoice::Date(expiration())))
        .await
        .unwrap();

    assert!(outcome.report.contracts.is_empty());
    assert!(outcome.narrative.is_none());
    assert!(
        outcome
            .report
            .render_prompt()
            .contains("No eligible contracts were found in the chain.")
    );
}

#[tokio::test]
async fn contract_without_ask_reports_unavailable_simulation() {
    let market = MockMarketData::new();
    market.set_price("AAPL", dec!(105));
    market.set_chain(
        "AAPL",
        expiration(),
        OptionType::Call,
        vec![
            // ITM pick with no ask price: valuation works, simulation fails.
            call(dec!(100)).with_mark_price(dec!(7.00)),
            // OTM pick stays fully simulatable.
            call(dec!(110))
                .with_ask_price(dec!(1.15))
                .with_delta(dec!(0.24)),
        ],
    );

    let use_case = AnalyzeOptionUseCase::new(
        Arc::new(market),
        Arc::new(NoOpNews),
        Arc::new(NoOpAdvisor),
        AnalysisSettings::default(),
    );

    let outcome = use_case
        .execute(request(ExpirationChoice::Date(expiration())))
        .await
        .unwrap();
    let report = &outcome.report;

    assert_eq!(report.contracts.len(), 2);
    assert!(matches!(
        report.contracts[0].simulation,
        SimulationOutcome::Unavailable { .. }
    ));
    // The sibling contract's simulation still ran.
    assert!(matches!(
        report.contracts[1].simulation,
        SimulationOutcome::Simulated(_)
    ));
    assert_eq!(report.contracts[0].valuation.intrinsic_value, dec!(5));
}

#[tokio::test]
async fn snapshot_file_drives_the_full_pipeline() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/snapshot.json");
    let fixture = FixtureMarketData::from_file(path).unwrap();

    let use_case = AnalyzeOptionUseCase::new(
        Arc::new(fixture),
        Arc::new(NoOpNews),
        Arc::new(NoOpAdvisor),
        AnalysisSettings::default(),
    );

    let outcome = use_case
        .execute(request(ExpirationChoice::Month {
            year: 2025,
            month: 1,
        }))
        .await
        .unwrap();
    let report = &outcome.report;

    assert_eq!(report.expiration, expiration());
    assert_eq!(report.reference_price, dec!(105.00));
    assert_eq!(report.contracts.len(), 2);
    assert_eq!(report.contracts[0].contract.strike_price(), dec!(100));
    assert_eq!(report.contracts[1].contract.strike_price(), dec!(110));
    assert_eq!(report.volatility_index, Some(dec!(17.60)));
    // Snapshot expirations are all inside the aggregation horizon.
    assert!(report.put_call_ratio.is_some());
    // No advisor configured: numeric report only.
    assert!(outcome.narrative.is_none());
    assert!(report.articles.is_empty());
}
