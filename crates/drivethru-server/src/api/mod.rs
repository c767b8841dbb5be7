mod game;
mod route;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use drivethru_core::AppConfig;
use drivethru_locator::{PipelineError, RoutePipeline};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<RoutePipeline>,
    pub client: Arc<ClientSettings>,
}

/// Non-secret settings the browser client needs to load the map widget.
#[derive(Debug, Clone, Serialize)]
pub struct ClientSettings {
    pub publishable_key: String,
    pub map_id: Option<String>,
    pub default_franchise: String,
}

impl ClientSettings {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            publishable_key: config.maps_publishable_key.clone(),
            map_id: config.maps_map_id.clone(),
            default_franchise: config.default_franchise.clone(),
        }
    }
}

/// Error body: `{ "error": "...", "details": ... }`, `details` only when set.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    code: &'static str,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ApiError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            error: message.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code {
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_pipeline_error(request_id: &str, error: PipelineError) -> ApiError {
    match error {
        PipelineError::Directions { status, details } => {
            tracing::warn!(request_id, status = %status, "directions provider rejected route");
            ApiError::new("upstream_error", "Failed to fetch route").with_details(details)
        }
        PipelineError::Unexpected(e) => {
            tracing::error!(request_id, error = %e, "route pipeline failed");
            ApiError::new("internal_error", "Internal server error")
        }
    }
}

pub(super) fn map_json_rejection(request_id: &str, rejection: &JsonRejection) -> ApiError {
    tracing::debug!(request_id, error = %rejection, "rejected request body");
    ApiError::new("bad_request", "request body must be a JSON object")
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

/// Routes that spend provider quota sit behind the rate limiter.
fn limited_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/route", post(route::find_franchises))
        .route("/api/route/locations", post(route::find_locations))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new()
        .route("/api/health", get(health))
        .route("/api/config", get(client_config))
        .route("/api/game/voucher", post(game::issue_voucher));

    Router::new()
        .merge(public_routes)
        .merge(limited_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}

async fn client_config(State(state): State<AppState>) -> Json<ClientSettings> {
    Json(state.client.as_ref().clone())
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
