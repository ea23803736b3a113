//! Warda REST API server.
//!
//! Wires the drafting client, validation pipeline and reply store together
//! behind an HTTP surface: draft-and-validate, reviewer feedback and CSV
//! export, with OpenAPI/Swagger documentation.

use std::sync::Arc;

use axum::{
    extract::{Path as AxumPath, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use api_shared::{
    FeedbackReq, FeedbackRes, GenerateReplyReq, GenerateReplyRes, HealthRes, HealthService,
};
use warda_core::{CoreConfig, RuleTables, ValidationPipeline, DEFAULT_REPLY_DATA_DIR, REVIEW_NOTICE};
use warda_llm::{LlmConfig, OpenAiChatClient, ReplyGenerator};
use warda_store::{ReplyStore, ReplyStoreError};

/// Application state shared across REST API handlers.
///
/// Everything in here is either immutable or internally synchronized, so the
/// state clones cheaply into each handler.
#[derive(Clone)]
struct AppState {
    pipeline: Arc<ValidationPipeline>,
    store: Arc<ReplyStore>,
    generator: Arc<dyn ReplyGenerator>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, generate_reply, set_feedback, export_replies),
    components(schemas(
        HealthRes,
        GenerateReplyReq,
        GenerateReplyRes,
        FeedbackReq,
        FeedbackRes,
    ))
)]
struct ApiDoc;

/// Main entry point for the Warda REST API server.
///
/// # Environment Variables
/// - `WARDA_REST_ADDR`: server address (default: "0.0.0.0:3000")
/// - `REPLY_DATA_DIR`: directory for persisted replies (default: "reply_data")
/// - `OPENAI_API_KEY`: key for the drafting API (required)
/// - `WARDA_LLM_BASE`, `WARDA_LLM_MODEL`: drafting endpoint overrides
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the LLM configuration is incomplete,
/// - the reply data directory cannot be created, or
/// - the server address cannot be bound.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("warda_run=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("WARDA_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let reply_data_dir =
        std::env::var("REPLY_DATA_DIR").unwrap_or_else(|_| DEFAULT_REPLY_DATA_DIR.into());
    let cfg = CoreConfig::new(reply_data_dir.into())?;
    std::fs::create_dir_all(cfg.reply_data_dir())?;

    let pipeline = Arc::new(ValidationPipeline::new(Arc::new(RuleTables::builtin()))?);
    let store = Arc::new(ReplyStore::new(cfg.reply_data_dir().to_path_buf()));
    let generator: Arc<dyn ReplyGenerator> =
        Arc::new(OpenAiChatClient::new(LlmConfig::from_env()?)?);

    tracing::info!("++ Starting Warda REST on {}", addr);

    let app = Router::new()
        .route("/health", get(health))
        .route("/replies", post(generate_reply))
        .route("/replies/:id/feedback", put(set_feedback))
        .route("/replies/export", get(export_replies))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(AppState {
            pipeline,
            store,
            generator,
        });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API.
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/replies",
    request_body = GenerateReplyReq,
    responses(
        (status = 200, description = "Drafted reply with QA verdict", body = GenerateReplyRes),
        (status = 400, description = "Missing required fields"),
        (status = 502, description = "Drafting service failed"),
        (status = 500, description = "Internal server error")
    )
)]
/// Draft a reply and run it through the validation pipeline.
///
/// Calls the drafting collaborator, normalizes and validates its output.
/// When QA passes, the reply is persisted and the new record id is returned.
/// When QA fails, nothing is persisted; the caller receives the best-effort
/// normalized text, `qa_failed = true` and a review notice.
///
/// # Errors
/// Returns `400 Bad Request` when classification or patient messages are
/// missing, `502 Bad Gateway` with the underlying message when drafting
/// fails, and `500 Internal Server Error` when persistence fails. A policy
/// rejection is a regular 200 response, never an error status.
#[axum::debug_handler]
async fn generate_reply(
    State(state): State<AppState>,
    Json(req): Json<GenerateReplyReq>,
) -> Result<Json<GenerateReplyRes>, (StatusCode, String)> {
    if req.classification.trim().is_empty() || req.patient_messages.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "classification and patient_messages are required".into(),
        ));
    }

    let raw_reply = state
        .generator
        .draft_reply(&req.classification, &req.patient_messages)
        .await
        .map_err(|e| {
            tracing::error!("Draft reply error: {e}");
            (StatusCode::BAD_GATEWAY, e.to_string())
        })?;

    let verdict = state.pipeline.validate(&raw_reply, &req.classification);
    if !verdict.passed {
        tracing::info!(classification = %req.classification, "reply flagged for manual review");
        return Ok(Json(GenerateReplyRes {
            id: None,
            ai_reply: verdict.normalized_text,
            qa_failed: true,
            message: Some(REVIEW_NOTICE.to_string()),
        }));
    }

    match state.store.insert(
        &req.classification,
        &req.patient_messages,
        &verdict.normalized_text,
    ) {
        Ok(record) => Ok(Json(GenerateReplyRes {
            id: Some(record.id.simple().to_string()),
            ai_reply: verdict.normalized_text,
            qa_failed: false,
            message: None,
        })),
        Err(e) => {
            tracing::error!("Store reply error: {e}");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

#[utoipa::path(
    put,
    path = "/replies/{id}/feedback",
    request_body = FeedbackReq,
    responses(
        (status = 200, description = "Feedback recorded", body = FeedbackRes),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Reply not found"),
        (status = 500, description = "Internal server error")
    )
)]
/// Attach reviewer feedback to a stored reply.
#[axum::debug_handler]
async fn set_feedback(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(req): Json<FeedbackReq>,
) -> Result<Json<FeedbackRes>, (StatusCode, String)> {
    if req.feedback.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "feedback is required".into()));
    }

    let id = match Uuid::parse_str(&id) {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Invalid reply id: {e}");
            return Err((StatusCode::BAD_REQUEST, "Invalid reply id".into()));
        }
    };

    match state.store.set_feedback(id, &req.feedback, req.comment.as_deref()) {
        Ok(()) => Ok(Json(FeedbackRes { success: true })),
        Err(ReplyStoreError::NotFound(_)) => {
            Err((StatusCode::NOT_FOUND, "Reply not found".into()))
        }
        Err(e) => {
            tracing::error!("Set feedback error: {e}");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

#[utoipa::path(
    get,
    path = "/replies/export",
    responses(
        (status = 200, description = "CSV export of stored replies", body = String)
    )
)]
/// Export all stored replies as a CSV attachment.
#[axum::debug_handler]
async fn export_replies(State(state): State<AppState>) -> impl IntoResponse {
    let csv = state.store.export_csv();
    (
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=replies_export.csv",
            ),
        ],
        csv,
    )
}
