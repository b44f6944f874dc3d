//! Auction lifecycle handlers.

use axum::extract::{Path, State};
use axum::Json;

use bidhub_core::types::id::AuctionId;

use crate::dto::request::ChangeStatusRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// PUT /api/auctions/{id}/status
pub async fn change_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AuctionId>,
    Json(req): Json<ChangeStatusRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    state.auctions.change_status(&auth, id, req.status).await?;
    Ok(Json(ApiResponse::ok(
        serde_json::json!({ "status": req.status }),
    )))
}

/// POST /api/auctions/{id}/view
pub async fn record_view(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AuctionId>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    state.watchlist.record_view(&auth, id).await?;
    // Viewers start following the auction right away.
    state.hub.join_user_to_auction(&auth.user_id, id);
    Ok(Json(ApiResponse::ok(
        serde_json::json!({ "message": "View recorded" }),
    )))
}
