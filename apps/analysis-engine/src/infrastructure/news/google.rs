//! Google Custom Search news adapter.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{NewsArticle, NewsError, NewsPort};
use crate::domain::shared::Symbol;

/// Google Custom Search configuration.
#[derive(Debug, Clone)]
pub struct GoogleNewsConfig {
    /// API base URL (e.g., "https://www.googleapis.com").
    pub api_url: String,
    /// API key.
    pub api_key: String,
    /// Programmable Search Engine ID.
    pub cx: String,
    /// Number of articles to fetch.
    pub results: u8,
    /// Request timeout.
    pub timeout: Duration,
}

/// News adapter backed by the Google Custom Search JSON API.
#[derive(Debug)]
pub struct GoogleNewsAdapter {
    client: reqwest::Client,
    config: GoogleNewsConfig,
}

impl GoogleNewsAdapter {
    /// Create a new adapter.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: GoogleNewsConfig) -> Result<Self, NewsError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NewsError::ConnectionError {
                message: e.to_string(),
            })?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl NewsPort for GoogleNewsAdapter {
    async fn recent_articles(&self, symbol: &Symbol) -> Result<Vec<NewsArticle>, NewsError> {
        let url = format!(
            "{}/customsearch/v1",
            self.config.api_url.trim_end_matches('/')
        );
        let query = format!("{symbol} stock news");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query.as_str()),
                ("key", self.config.api_key.as_str()),
                ("cx", self.config.cx.as_str()),
                ("num", &self.config.results.to_string()),
            ])
            .send()
            .await
            .map_err(|e| NewsError::ConnectionError {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NewsError::ApiError {
                message: format!("{status}: {body}"),
            });
        }

        let results: SearchResponse =
            response.json().await.map_err(|e| NewsError::ApiError {
                message: e.to_string(),
            })?;

        Ok(results
            .items
            .into_iter()
            .map(|item| NewsArticle {
                title: item.title,
                snippet: item.snippet,
                link: item.link,
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    title: String,
    #[serde(default)]
    snippet: String,
    link: String,
}
