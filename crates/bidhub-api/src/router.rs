//! Route definitions for the BidHub HTTP API.
//!
//! All REST routes are organized by domain and mounted under `/api`;
//! the WebSocket upgrade lives at `/ws`. The router receives `AppState`
//! and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(bid_routes())
        .merge(auction_routes())
        .merge(watch_routes())
        .merge(notification_routes())
        .merge(health_routes());

    let ws_routes = Router::new().route("/ws", get(handlers::ws::ws_upgrade));

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .merge(ws_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bid submission and history
fn bid_routes() -> Router<AppState> {
    Router::new()
        .route("/bids", post(handlers::bid::create_bid))
        .route("/bids", get(handlers::bid::list_bids))
}

/// Auction lifecycle and view tracking
fn auction_routes() -> Router<AppState> {
    Router::new()
        .route("/auctions/{id}/status", put(handlers::auction::change_status))
        .route("/auctions/{id}/view", post(handlers::auction::record_view))
}

/// Watchlist management
fn watch_routes() -> Router<AppState> {
    Router::new()
        .route("/watchlist", get(handlers::watch::list_watchlist))
        .route("/watchlist", post(handlers::watch::watch))
        .route("/watchlist/{auction_id}", delete(handlers::watch::unwatch))
}

/// Notification listing and read tracking
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
}

/// Health check endpoint (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::HeaderValue;
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(cors_config.max_age_seconds));

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors
}
