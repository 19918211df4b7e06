//! No-op news adapter for runs without a search provider.

use async_trait::async_trait;

use crate::application::ports::{NewsArticle, NewsError, NewsPort};
use crate::domain::shared::Symbol;

/// News adapter that always returns no articles.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpNews;

#[async_trait]
impl NewsPort for NoOpNews {
    async fn recent_articles(&self, _symbol: &Symbol) -> Result<Vec<NewsArticle>, NewsError> {
        Ok(Vec::new())
    }
}
