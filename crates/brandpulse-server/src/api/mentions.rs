use axum::{
    extract::{Path, State},
    Extension, Json,
};
use brandpulse_core::StoredMention;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_store_error, ApiError, AppState, MessageResponse};

/// Rows returned to the dashboard.
pub(super) const DASHBOARD_LIMIT: usize = 100;

#[derive(Debug, Serialize)]
pub(super) struct MentionsResponse {
    pub mentions: Vec<StoredMention>,
}

/// Run one ingestion for `brand_name`. Always 200; failures inside the
/// pipeline surface as "no new articles".
pub(super) async fn fetch_and_store(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(brand_name): Path<String>,
) -> Json<MessageResponse> {
    tracing::info!(request_id = %req_id.0, brand = %brand_name, "fetch-and-store requested");
    let summary = state.pipeline.run(&brand_name).await;
    Json(MessageResponse {
        message: summary.message(),
    })
}

pub(super) async fn dashboard_mentions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<MentionsResponse>, ApiError> {
    let mentions = state
        .store
        .get_recent_mentions(DASHBOARD_LIMIT)
        .await
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    Ok(Json(MentionsResponse { mentions }))
}
