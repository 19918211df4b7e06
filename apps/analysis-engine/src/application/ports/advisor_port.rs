//! Advisor Port (Driven Port)
//!
//! Interface to the language-model collaborator that classifies news
//! sentiment and writes the closing investment narrative. The engine
//! only consumes the final text; prompt engineering lives behind the
//! adapter.

use async_trait::async_trait;

/// Advisor error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AdvisorError {
    /// Connection error.
    #[error("advisor connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// API error.
    #[error("advisor API error: {message}")]
    ApiError {
        /// Error details.
        message: String,
    },

    /// The model returned no usable content.
    #[error("advisor returned an empty response")]
    EmptyResponse,

    /// No advisor is configured for this run.
    #[error("advisor is not configured")]
    NotConfigured,
}

/// Port for language-model analysis.
#[async_trait]
pub trait AdvisorPort: Send + Sync {
    /// Classify the sentiment of a piece of text.
    ///
    /// Returns the model's label (e.g., "positive", "negative").
    async fn classify_sentiment(&self, text: &str) -> Result<String, AdvisorError>;

    /// Produce the investment narrative for an assembled report payload.
    async fn narrative(&self, prompt: &str) -> Result<String, AdvisorError>;
}
