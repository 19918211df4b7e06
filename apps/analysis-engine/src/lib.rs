// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Analysis Engine - Rust Core Library
//!
//! Evaluates a single options contract for a chosen stock: selects the
//! contracts nearest the money from the chain, derives their
//! intrinsic/extrinsic value and theta decay, simulates profit/loss
//! across hypothetical price moves, and folds market sentiment signals
//! into a report handed to a language-model advisor.
//!
//! # Architecture (Clean Architecture + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure analysis logic, no I/O
//!   - `chain`: contract snapshots, nearest-the-money selection
//!   - `valuation`: intrinsic/extrinsic value, theta decay
//!   - `simulation`: delta-approximated profit/loss scenarios
//!   - `history`: daily percentage-change analysis
//!   - `sentiment`: put/call ratio aggregation and classification
//!
//! - **Application**: Orchestration and port definitions
//!   - `ports`: `MarketDataPort`, `NewsPort`, `AdvisorPort`
//!   - `use_cases`: `AnalyzeOptionUseCase`
//!   - `report`: report payload assembly
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `market_data`: brokerage + Yahoo Finance clients, snapshot
//!     fixture, in-memory mock
//!   - `news`: Google Custom Search adapter
//!   - `advisor`: OpenAI chat-completions adapter

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Layers
// =============================================================================

/// Domain layer - pure analysis logic with no external dependencies.
pub mod domain;

/// Application layer - use cases and port definitions.
pub mod application;

/// Infrastructure layer - adapters and external integrations.
pub mod infrastructure;

/// Configuration loading.
pub mod config;

/// Logging setup.
pub mod observability;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::chain::{
    ContractSelection, OptionContract, OptionType, SHARES_PER_CONTRACT, expirations_in_month,
    select_contracts,
};
pub use domain::history::{ClosingPrice, DailyChangeSummary, HistoryError, analyze_daily_changes};
pub use domain::sentiment::{
    ExpirationVolumes, PutCallSentiment, VolatilityRegime, aggregate_put_call_ratio,
};
pub use domain::shared::{DomainError, ReferencePrice, Symbol};
pub use domain::simulation::{
    MissingMarketDataError, SimulationBatch, SimulationScenario, simulate,
};
pub use domain::valuation::{ValuationResult, evaluate};

// Application re-exports
pub use application::ports::{
    AdvisorError, AdvisorPort, HistorySpan, MarketDataError, MarketDataPort, NewsArticle,
    NewsError, NewsPort,
};
pub use application::report::{AnalysisReport, ContractAnalysis, ScoredArticle, SimulationOutcome};
pub use application::use_cases::{
    AnalysisError, AnalysisOutcome, AnalysisRequest, AnalysisSettings, AnalyzeOptionUseCase,
    ExpirationChoice,
};

// Infrastructure re-exports
pub use infrastructure::advisor::{NoOpAdvisor, OpenAiAdvisor, OpenAiConfig};
pub use infrastructure::market_data::{
    Credentials, FixtureMarketData, LiveMarketData, MockMarketData, RobinhoodClient,
    RobinhoodConfig, YahooFinanceClient, YahooFinanceConfig,
};
pub use infrastructure::news::{GoogleNewsAdapter, GoogleNewsConfig, NoOpNews};
