//! Memoizing chat-completion client.

use crate::config::SummaryConfig;
use crate::prompt::{build_prompt, SYSTEM_PROMPT};
use crate::{LlmClientError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

/// Text shown when no summary could be generated
pub const FALLBACK_SUMMARY: &str = "❌ Could not generate summary.";

/// Outcome of one summary request.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Generated summary, or `FALLBACK_SUMMARY`
    pub text: String,
    /// Set when the request failed; meant to be shown to the user
    pub error: Option<String>,
}

impl Summary {
    fn generated(text: String) -> Self {
        Self { text, error: None }
    }

    fn fallback(err: &LlmClientError) -> Self {
        Self {
            text: FALLBACK_SUMMARY.to_string(),
            error: Some(format!("Error generating summary: {err}")),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for the chat-completion endpoint.
///
/// Summaries (including fallbacks) are cached per (title, author) for the
/// lifetime of the client, so repeated queries never re-request a book.
pub struct SummaryClient {
    http: reqwest::Client,
    config: SummaryConfig,
    cache: RwLock<HashMap<(String, String), Summary>>,
}

impl SummaryClient {
    pub fn new(config: SummaryConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(LlmClientError::ClientBuild)?;

        info!(
            "Summary client targeting {} with model {}",
            config.completions_url(),
            config.model
        );

        Ok(Self {
            http,
            config,
            cache: RwLock::new(HashMap::new()),
        })
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    /// Summary for a book, from cache when available.
    ///
    /// Never fails: request errors are logged and turned into a fallback.
    pub async fn summarize(&self, title: &str, author: &str) -> Summary {
        let key = (title.to_string(), author.to_string());
        if let Some(cached) = self.cache.read().await.get(&key) {
            debug!("Summary cache hit for '{}'", title);
            return cached.clone();
        }

        let summary = match self.request_summary(title, author).await {
            Ok(text) => Summary::generated(text),
            Err(err) => {
                error!("Summary request for '{}' failed: {}", title, err);
                Summary::fallback(&err)
            }
        };

        self.cache
            .write()
            .await
            .entry(key)
            .or_insert(summary)
            .clone()
    }

    /// Send one request and return the trimmed completion text
    pub async fn request_summary(&self, title: &str, author: &str) -> Result<String> {
        let prompt = build_prompt(title, author);
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("Requesting summary: {}", prompt);
        let response = self
            .http
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmClientError::EmptyContent);
        }
        Ok(text)
    }

    /// Number of memoized summaries
    pub async fn cached_count(&self) -> usize {
        self.cache.read().await.len()
    }
}
