//! Watchlist handlers.

use axum::extract::{Path, State};
use axum::Json;

use bidhub_core::types::id::AuctionId;

use crate::dto::request::WatchRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/watchlist
pub async fn watch(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<WatchRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    state.watchlist.watch(&auth, req.auction_id).await?;
    // Live connections start following the auction right away.
    state.hub.join_user_to_auction(&auth.user_id, req.auction_id);
    Ok(Json(ApiResponse::ok(
        serde_json::json!({ "message": "Watching" }),
    )))
}

/// DELETE /api/watchlist/{auction_id}
pub async fn unwatch(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(auction_id): Path<AuctionId>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    state.watchlist.unwatch(&auth, auction_id).await?;
    Ok(Json(ApiResponse::ok(
        serde_json::json!({ "message": "Unwatched" }),
    )))
}

/// GET /api/watchlist
pub async fn list_watchlist(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<AuctionId>>>, ApiError> {
    let auctions = state.watchlist.watched_auctions(&auth).await?;
    Ok(Json(ApiResponse::ok(auctions)))
}
