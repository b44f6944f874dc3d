//! Bid handlers.

use axum::extract::{Query, State};
use axum::Json;

use bidhub_core::types::pagination::{PageRequest, PageResponse};
use bidhub_entity::bid::Bid;

use crate::dto::request::CreateBidRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/bids
pub async fn create_bid(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateBidRequest>,
) -> Result<Json<ApiResponse<Bid>>, ApiError> {
    let bid = state
        .bids
        .place_bid(&auth, req.auction_id, req.amount)
        .await?;
    Ok(Json(ApiResponse::ok(bid)))
}

/// GET /api/bids
pub async fn list_bids(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> Result<Json<ApiResponse<PageResponse<Bid>>>, ApiError> {
    let bids = state.bids.list_bids(&page).await?;
    Ok(Json(ApiResponse::ok(bids)))
}
