//! JSON wire types for the REST API.
//!
//! Field names (`ai_reply`, `qa_failed`, `message`) are part of the contract
//! with the existing review UI and must stay stable.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Request to draft and validate one reply.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateReplyReq {
    /// Free-form classification label; three known values select stricter
    /// scenario rules, everything else takes the default path.
    pub classification: String,
    /// The patient's messages, concatenated.
    pub patient_messages: String,
}

/// Outcome of one draft-and-validate call.
///
/// `qa_failed = true` means the text failed the safety rules: nothing was
/// persisted, `ai_reply` is the best-effort normalized text for a human
/// reviewer, and `message` carries the review notice.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateReplyRes {
    /// Identifier of the persisted record; only present when QA passed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub ai_reply: String,
    pub qa_failed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Reviewer feedback on a stored reply.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedbackReq {
    pub feedback: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Feedback update acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedbackRes {
    pub success: bool,
}
