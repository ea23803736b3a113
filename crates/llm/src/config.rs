//! LLM client configuration.
//!
//! Resolved once at startup, same discipline as `warda-core::config`: no
//! environment reads during request handling.

use crate::{LlmError, LlmResult};

/// Default chat-completions endpoint base.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
/// Default drafting model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Sampling temperature used for drafting.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Connection settings for the chat-completions API.
#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
}

impl LlmConfig {
    /// Resolves the configuration from the environment.
    ///
    /// Reads `OPENAI_API_KEY` (required), `WARDA_LLM_BASE` and
    /// `WARDA_LLM_MODEL` (both optional).
    ///
    /// # Errors
    ///
    /// Returns `LlmError::MissingConfig` when `OPENAI_API_KEY` is unset or
    /// blank, so a misconfigured deployment fails at startup rather than on
    /// the first request.
    pub fn from_env() -> LlmResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LlmError::MissingConfig("OPENAI_API_KEY is not set".into()))?;

        let api_base =
            std::env::var("WARDA_LLM_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());
        let model = std::env::var("WARDA_LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        Ok(Self {
            api_base,
            api_key,
            model,
            temperature: DEFAULT_TEMPERATURE,
        })
    }

    /// Full URL of the chat-completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_url_joins_base_without_double_slash() {
        let cfg = LlmConfig {
            api_base: "https://api.openai.com/v1/".into(),
            api_key: "k".into(),
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
        };
        assert_eq!(
            cfg.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }
}
