//! No-op advisor for runs without a language-model provider.

use async_trait::async_trait;

use crate::application::ports::{AdvisorError, AdvisorPort};

/// Advisor that reports itself as not configured.
///
/// Callers treat advisor failures as a degraded report, so runs
/// without an API key still produce the numeric analysis.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpAdvisor;

#[async_trait]
impl AdvisorPort for NoOpAdvisor {
    async fn classify_sentiment(&self, _text: &str) -> Result<String, AdvisorError> {
        Err(AdvisorError::NotConfigured)
    }

    async fn narrative(&self, _prompt: &str) -> Result<String, AdvisorError> {
        Err(AdvisorError::NotConfigured)
    }
}
