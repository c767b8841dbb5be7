use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use drivethru_core::{FranchiseCandidate, FranchiseMarker, RouteRequest};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_json_rejection, map_pipeline_error, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct RouteBody {
    #[serde(default, alias = "source")]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub franchise: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct FranchisesResponse {
    pub franchises: Vec<FranchiseCandidate>,
}

#[derive(Debug, Serialize)]
pub(super) struct LocationsResponse {
    pub locations: Vec<FranchiseMarker>,
}

/// Validates the body before any provider call is made.
fn parse_route_request(
    state: &AppState,
    req_id: &RequestId,
    payload: Result<Json<RouteBody>, JsonRejection>,
    allow_franchise: bool,
) -> Result<RouteRequest, ApiError> {
    let Json(body) = payload.map_err(|rejection| map_json_rejection(&req_id.0, &rejection))?;
    let franchise = if allow_franchise {
        body.franchise.as_deref()
    } else {
        None
    };

    RouteRequest::new(
        body.origin.as_deref(),
        body.destination.as_deref(),
        franchise,
        &state.client.default_franchise,
    )
    .map_err(|e| ApiError::new("validation_error", e.to_string()))
}

pub(super) async fn find_franchises(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<RouteBody>, JsonRejection>,
) -> Result<Json<FranchisesResponse>, ApiError> {
    let request = parse_route_request(&state, &req_id, payload, true)?;

    let franchises = state
        .pipeline
        .run(&request)
        .await
        .map_err(|e| map_pipeline_error(&req_id.0, e))?;

    tracing::info!(
        request_id = %req_id.0,
        franchise = %request.franchise_keyword,
        count = franchises.len(),
        "route search served"
    );

    Ok(Json(FranchisesResponse { franchises }))
}

/// Marker-shaped variant for the game client; the keyword is always the
/// configured default franchise.
pub(super) async fn find_locations(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<RouteBody>, JsonRejection>,
) -> Result<Json<LocationsResponse>, ApiError> {
    let request = parse_route_request(&state, &req_id, payload, false)?;

    let franchises = state
        .pipeline
        .run(&request)
        .await
        .map_err(|e| map_pipeline_error(&req_id.0, e))?;

    let locations = franchises.iter().map(FranchiseMarker::from).collect();
    Ok(Json(LocationsResponse { locations }))
}
