//! Analysis Engine Binary
//!
//! Analyzes one options contract query end to end and prints the
//! report and advisor narrative.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin analysis-engine -- AAPL call 2025-01
//! cargo run --bin analysis-engine -- AAPL put 2025-01-17
//! ```
//!
//! # Environment Variables
//!
//! ## Offline mode
//! - `ANALYSIS_SNAPSHOT`: path to a market snapshot JSON; replaces the
//!   live providers
//!
//! ## Live mode (required without a snapshot)
//! - `ROBINHOOD_USERNAME` / `ROBINHOOD_PASSWORD`: brokerage login
//!
//! ## Optional
//! - `GOOGLE_API_KEY` / `GOOGLE_CX`: news search; skipped when unset
//! - `OPENAI_API_KEY`: advisor narrative; skipped when unset
//! - `ANALYSIS_CONFIG`: config file path (default: config.yaml)
//! - `RUST_LOG`: log level (default: info)

use std::sync::Arc;

use anyhow::{Context, bail};
use chrono::NaiveDate;

use analysis_engine::application::ports::{AdvisorPort, MarketDataPort, NewsPort};
use analysis_engine::application::use_cases::{
    AnalysisRequest, AnalyzeOptionUseCase, ExpirationChoice,
};
use analysis_engine::config::{Config, load_config, require_env};
use analysis_engine::domain::chain::OptionType;
use analysis_engine::domain::shared::Symbol;
use analysis_engine::infrastructure::advisor::{NoOpAdvisor, OpenAiAdvisor, OpenAiConfig};
use analysis_engine::infrastructure::market_data::{
    Credentials, FixtureMarketData, LiveMarketData, RobinhoodClient, RobinhoodConfig,
    YahooFinanceClient, YahooFinanceConfig,
};
use analysis_engine::infrastructure::news::{GoogleNewsAdapter, GoogleNewsConfig, NoOpNews};
use analysis_engine::observability;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init_tracing();

    let request = parse_args()?;
    let config = load_config(std::env::var("ANALYSIS_CONFIG").ok().as_deref())?;

    match std::env::var("ANALYSIS_SNAPSHOT").ok() {
        Some(path) => {
            tracing::info!(path, "using market snapshot");
            let fixture = FixtureMarketData::from_file(&path)
                .with_context(|| format!("loading snapshot {path}"))?;
            run_with_market(Arc::new(fixture), &config, request).await
        }
        None => {
            let credentials = Credentials {
                username: require_env("ROBINHOOD_USERNAME")?,
                password: require_env("ROBINHOOD_PASSWORD")?,
            };
            let brokerage = RobinhoodClient::new(&RobinhoodConfig {
                api_url: config.providers.brokerage.api_url.clone(),
                timeout: config.providers.brokerage.timeout(),
            })?;
            brokerage.login(&credentials).await?;

            let market = YahooFinanceClient::new(&YahooFinanceConfig {
                api_url: config.providers.market.api_url.clone(),
                timeout: config.providers.market.timeout(),
            })?;

            let live = LiveMarketData::new(brokerage, market);
            run_with_market(Arc::new(live), &config, request).await
        }
    }
}

/// Wire the news adapter and continue.
async fn run_with_market<M>(
    market_data: Arc<M>,
    config: &Config,
    request: AnalysisRequest,
) -> anyhow::Result<()>
where
    M: MarketDataPort + 'static,
{
    let google = std::env::var("GOOGLE_API_KEY")
        .ok()
        .filter(|k| !k.is_empty())
        .zip(std::env::var("GOOGLE_CX").ok().filter(|c| !c.is_empty()));

    match google {
        Some((api_key, cx)) => {
            let news = GoogleNewsAdapter::new(GoogleNewsConfig {
                api_url: config.providers.news.api_url.clone(),
                api_key,
                cx,
                results: config.providers.news.results,
                timeout: config.providers.news.timeout(),
            })?;
            run_with_news(market_data, Arc::new(news), config, request).await
        }
        None => {
            tracing::info!("news search not configured, skipping articles");
            run_with_news(market_data, Arc::new(NoOpNews), config, request).await
        }
    }
}

/// Wire the advisor adapter and continue.
async fn run_with_news<M, N>(
    market_data: Arc<M>,
    news: Arc<N>,
    config: &Config,
    request: AnalysisRequest,
) -> anyhow::Result<()>
where
    M: MarketDataPort + 'static,
    N: NewsPort + 'static,
{
    match std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()) {
        Some(api_key) => {
            let advisor = OpenAiAdvisor::new(OpenAiConfig {
                api_url: config.providers.advisor.api_url.clone(),
                api_key,
                model: config.providers.advisor.model.clone(),
                max_tokens: config.providers.advisor.max_tokens,
                temperature: config.providers.advisor.temperature,
                timeout: config.providers.advisor.timeout(),
            })?;
            execute(market_data, news, Arc::new(advisor), config, request).await
        }
        None => {
            tracing::info!("advisor not configured, skipping narrative");
            execute(market_data, news, Arc::new(NoOpAdvisor), config, request).await
        }
    }
}

/// Run the analysis and print the results.
async fn execute<M, N, A>(
    market_data: Arc<M>,
    news: Arc<N>,
    advisor: Arc<A>,
    config: &Config,
    request: AnalysisRequest,
) -> anyhow::Result<()>
where
    M: MarketDataPort + 'static,
    N: NewsPort + 'static,
    A: AdvisorPort + 'static,
{
    let use_case =
        AnalyzeOptionUseCase::new(market_data, news, advisor, config.analysis.settings());

    let outcome = use_case.execute(request).await?;

    println!("{}", outcome.report.render_prompt());
    match outcome.narrative {
        Some(narrative) => println!("AI Analysis:\n{narrative}"),
        None => println!("AI Analysis: unavailable"),
    }
    Ok(())
}

/// Parse `<SYMBOL> <call|put> <YYYY-MM | YYYY-MM-DD>` from argv.
fn parse_args() -> anyhow::Result<AnalysisRequest> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [symbol, option_type, expiration] = args.as_slice() else {
        bail!("usage: analysis-engine <SYMBOL> <call|put> <YYYY-MM | YYYY-MM-DD>");
    };

    let symbol = Symbol::new(symbol);
    symbol.validate()?;

    let option_type = match option_type.to_lowercase().as_str() {
        "call" => OptionType::Call,
        "put" => OptionType::Put,
        other => bail!("invalid option type '{other}', expected 'call' or 'put'"),
    };

    let expiration = parse_expiration(expiration)?;

    Ok(AnalysisRequest {
        symbol,
        option_type,
        expiration,
    })
}

fn parse_expiration(value: &str) -> anyhow::Result<ExpirationChoice> {
    if let Ok(date) = value.parse::<NaiveDate>() {
        return Ok(ExpirationChoice::Date(date));
    }

    if let Some((year, month)) = value.split_once('-') {
        let year: i32 = year.parse().context("invalid expiration year")?;
        let month: u32 = month.parse().context("invalid expiration month")?;
        if (1..=12).contains(&month) {
            return Ok(ExpirationChoice::Month { year, month });
        }
    }

    bail!("invalid expiration '{value}', expected YYYY-MM or YYYY-MM-DD")
}
