//! News Port (Driven Port)
//!
//! Interface for retrieving recent news articles about a symbol.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::shared::Symbol;

/// A news search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    /// Article headline.
    pub title: String,
    /// Search snippet.
    pub snippet: String,
    /// Article URL.
    pub link: String,
}

/// News retrieval error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NewsError {
    /// Connection error.
    #[error("news connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// API error.
    #[error("news API error: {message}")]
    ApiError {
        /// Error details.
        message: String,
    },
}

/// Port for retrieving recent news about a symbol.
#[async_trait]
pub trait NewsPort: Send + Sync {
    /// Recent articles mentioning the symbol, most relevant first.
    async fn recent_articles(&self, symbol: &Symbol) -> Result<Vec<NewsArticle>, NewsError>;
}
