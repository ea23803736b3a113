//! # API Shared
//!
//! Wire types and small shared services for the Warda REST API.
//!
//! Contains:
//! - JSON request/response DTOs (`dto` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by the `warda-run` server and the CLI for common shapes.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
