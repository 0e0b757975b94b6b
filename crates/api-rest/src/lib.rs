//! # API REST
//!
//! REST API implementation for Vaidya.
//!
//! Handles:
//! - HTTP endpoints with axum (`POST /webhook`, `GET /health`)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (body parsing, CORS)
//!
//! Uses `vaidya-core` for fulfilment and `api-shared` for wire types.

#![warn(rust_2018_idioms)]

use api_shared::{HealthRes, HealthService, Parameters, QueryResult, WebhookReq, WebhookRes};
use axum::{
    body::Bytes,
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use vaidya_core::FulfilmentService;

/// Application state shared across REST API handlers
#[derive(Clone)]
pub struct AppState {
    pub fulfilment: FulfilmentService,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, webhook),
    components(schemas(HealthRes, WebhookReq, QueryResult, Parameters, WebhookRes))
)]
pub struct ApiDoc;

/// Build the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/webhook", post(webhook))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// # Returns
/// * `Json<HealthRes>` - Health status response
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/webhook",
    request_body = WebhookReq,
    responses(
        (status = 200, description = "Fulfillment text, or a fallback when generation fails", body = WebhookRes)
    )
)]
/// Conversational-agent webhook
///
/// Renders a prompt from the query and the caller's profile, asks the upstream model once and
/// replies with its sanitised answer.
///
/// The body is read as raw bytes rather than through the `Json` extractor: a body that is not
/// JSON is handled as an empty payload, so the caller still gets a 200 with a defaulted answer.
///
/// # Returns
/// * `Json<WebhookRes>` - Always, with HTTP 200
#[axum::debug_handler]
async fn webhook(State(state): State<AppState>, body: Bytes) -> Json<WebhookRes> {
    let payload = serde_json::from_slice::<Value>(&body).unwrap_or_else(|e| {
        tracing::warn!("Unparsable webhook body, using defaults: {}", e);
        Value::Null
    });
    Json(state.fulfilment.fulfil(&payload).await)
}
