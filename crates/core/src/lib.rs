//! # Warda Core
//!
//! Post-generation quality gate for drafted clinic replies.
//!
//! This crate contains the pure decision logic of the system: it takes the raw
//! text returned by the language-model collaborator plus the caller's
//! classification label and deterministically
//! - rewrites disallowed colloquial anatomical terms to the approved clinical
//!   term ([`normalize`]),
//! - reflows the text into one sentence per line ([`segment`]),
//! - applies the structural and scenario-specific safety checks and produces a
//!   single release-or-review verdict ([`pipeline`]).
//!
//! Everything here is synchronous, side-effect free and safe to call from any
//! number of concurrent request handlers. The rule tables are built once at
//! startup and shared by reference.
//!
//! **No API concerns**: HTTP handling, model calls and persistence belong in
//! `warda-run`, `warda-llm` and `warda-store`.

pub mod checks;
pub mod config;
pub mod normalize;
pub mod pipeline;
pub mod rules;
pub mod scenario;
pub mod segment;

pub use config::CoreConfig;
pub use normalize::Normalizer;
pub use pipeline::{ValidationPipeline, ValidationResult, REVIEW_NOTICE};
pub use rules::RuleTables;
pub use scenario::Scenario;

/// Default directory for persisted replies, relative to the working directory.
pub const DEFAULT_REPLY_DATA_DIR: &str = "reply_data";

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to compile synonym pattern `{pattern}`: {source}")]
    PatternCompile {
        pattern: String,
        source: regex::Error,
    },
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
