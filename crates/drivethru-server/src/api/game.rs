use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use chrono::{Datelike, Utc};
use drivethru_core::Voucher;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_json_rejection, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct VoucherBody {
    pub score: u32,
    #[serde(default)]
    pub franchise: Option<String>,
}

pub(super) async fn issue_voucher(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<VoucherBody>, JsonRejection>,
) -> Result<Json<Voucher>, ApiError> {
    let Json(body) = payload.map_err(|rejection| map_json_rejection(&req_id.0, &rejection))?;
    let franchise = body
        .franchise
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .unwrap_or(&state.client.default_franchise);

    let voucher = Voucher::for_score(body.score, franchise, Utc::now().year());
    tracing::info!(
        request_id = %req_id.0,
        score = body.score,
        discount_percent = voucher.discount_percent,
        "voucher issued"
    );
    Ok(Json(voucher))
}
