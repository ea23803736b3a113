//! OpenAI-compatible chat-completions client.
//!
//! Kept deliberately small: one request, no retries, no streaming. Transport
//! and API failures surface as `LlmError` and are the caller's concern;
//! content problems are not errors here at all, the validation pipeline
//! judges the returned text.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::prompt::{build_user_message, SYSTEM_PROMPT};
use crate::{LlmError, LlmResult};

/// Request timeout. Drafting is a single short completion; anything slower
/// than this is treated as a transport failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// The drafting seam consumed by the REST handler and the tests.
///
/// Returns best-effort text: possibly empty, possibly rule-breaking. Callers
/// must run the result through the validation pipeline before showing or
/// persisting it.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn draft_reply(&self, classification: &str, patient_messages: &str)
        -> LlmResult<String>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<AssistantMessage>,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

/// Chat-completions client for any OpenAI-compatible endpoint.
pub struct OpenAiChatClient {
    http_client: reqwest::Client,
    config: LlmConfig,
}

impl OpenAiChatClient {
    /// Builds the client with its own connection pool and request timeout.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Http` if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: LlmConfig) -> LlmResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http_client,
            config,
        })
    }
}

#[async_trait]
impl ReplyGenerator for OpenAiChatClient {
    async fn draft_reply(
        &self,
        classification: &str,
        patient_messages: &str,
    ) -> LlmResult<String> {
        let user_message = build_user_message(classification, patient_messages);
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_message,
                },
            ],
            temperature: self.config.temperature,
        };

        tracing::debug!(model = %self.config.model, classification, "requesting draft reply");

        let response = self
            .http_client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "chat completion API error");
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;

        // A response with no choices or null content is an empty draft, not
        // an error: the pipeline will fail it and flag for review.
        let reply = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default();

        Ok(reply)
    }
}
