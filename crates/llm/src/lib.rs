//! # Warda LLM
//!
//! The text-generation collaborator: an OpenAI-compatible chat-completions
//! client that drafts reply text from the compiled-in Arabic system prompt.
//!
//! Generation is best-effort by contract. The client may return an empty or
//! malformed string; the validation pipeline in `warda-core` is what decides
//! whether the text is releasable. The [`ReplyGenerator`] trait is the seam
//! the REST handler depends on, so tests can substitute a stub generator.

pub mod client;
pub mod config;
pub mod prompt;

pub use client::{OpenAiChatClient, ReplyGenerator};
pub use config::LlmConfig;
pub use prompt::SYSTEM_PROMPT;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("chat completion request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("chat completion API returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("missing configuration: {0}")]
    MissingConfig(String),
}

pub type LlmResult<T> = std::result::Result<T, LlmError>;
