//! OpenAI chat-completions advisor adapter.
//!
//! Owns the prompts; the engine only hands over text and consumes the
//! model's reply.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AdvisorError, AdvisorPort};

/// System prompt for the investment narrative.
const NARRATIVE_SYSTEM_PROMPT: &str = "You are a financial analyst specializing in options and \
market sentiment analysis. Interpret the provided data using standard ranges: a put/call ratio \
near 0.7 is the equity baseline (lower is bullish, higher is bearish); a VIX below 12 signals \
complacency, 12-20 normal conditions, above 20 elevated volatility, and above 30 extreme fear. \
Interpret the Greeks only where they stand out. Assess whether the presented options contract \
represents a favorable investment opportunity and provide an expert opinion with actionable \
insights, focused on whether the data supports a favorable risk/reward profile.";

/// System prompt for per-article sentiment classification.
const SENTIMENT_SYSTEM_PROMPT: &str = "You are an AI tasked with performing sentiment analysis. \
Classify the sentiment of the provided text as positive, neutral, or negative.";

/// OpenAI endpoint configuration.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API base URL (e.g., "https://api.openai.com").
    pub api_url: String,
    /// API key.
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// Token budget for the narrative completion.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Request timeout.
    pub timeout: Duration,
}

/// Advisor adapter backed by the OpenAI chat completions API.
#[derive(Debug)]
pub struct OpenAiAdvisor {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiAdvisor {
    /// Create a new adapter.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: OpenAiConfig) -> Result<Self, AdvisorError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AdvisorError::ConnectionError {
                message: e.to_string(),
            })?;
        Ok(Self { client, config })
    }

    async fn complete(
        &self,
        system: &str,
        user: String,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, AdvisorError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.api_url.trim_end_matches('/')
        );
        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: user,
                },
            ],
            max_tokens,
            temperature,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AdvisorError::ConnectionError {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorError::ApiError {
                message: format!("{status}: {body}"),
            });
        }

        let completion: CompletionResponse =
            response.json().await.map_err(|e| AdvisorError::ApiError {
                message: e.to_string(),
            })?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AdvisorError::EmptyResponse)
    }
}

#[async_trait]
impl AdvisorPort for OpenAiAdvisor {
    async fn classify_sentiment(&self, text: &str) -> Result<String, AdvisorError> {
        self.complete(
            SENTIMENT_SYSTEM_PROMPT,
            format!("Analyze the sentiment of this text: {text}"),
            150,
            0.5,
        )
        .await
    }

    async fn narrative(&self, prompt: &str) -> Result<String, AdvisorError> {
        self.complete(
            NARRATIVE_SYSTEM_PROMPT,
            format!(
                "Based on the following data, evaluate the option and provide your expert \
                 opinion:\n\n{prompt}\n\nFinally, make a recommendation on whether this option \
                 seems like a good investment based on the overall data."
            ),
            self.config.max_tokens,
            self.config.temperature,
        )
        .await
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(server: &MockServer) -> OpenAiConfig {
        OpenAiConfig {
            api_url: server.uri(),
            api_key: "sk-test".to_string(),
            model: "gpt-4".to_string(),
            max_tokens: 600,
            temperature: 0.7,
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn classify_sentiment_returns_model_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(serde_json::json!({ "model": "gpt-4" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "choices": [ { "message": { "content": "positive" } } ]
                })),
            )
            .mount(&server)
            .await;

        let advisor = OpenAiAdvisor::new(config(&server)).unwrap();
        let label = advisor
            .classify_sentiment("Apple beats earnings. Strong quarter")
            .await
            .unwrap();

        assert_eq!(label, "positive");
    }

    #[tokio::test]
    async fn empty_choices_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        let advisor = OpenAiAdvisor::new(config(&server)).unwrap();
        let result = advisor.narrative("payload").await;

        assert!(matches!(result, Err(AdvisorError::EmptyResponse)));
    }

    #[tokio::test]
    async fn api_failure_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let advisor = OpenAiAdvisor::new(config(&server)).unwrap();
        let result = advisor.narrative("payload").await;

        assert!(matches!(result, Err(AdvisorError::ApiError { .. })));
    }
}
