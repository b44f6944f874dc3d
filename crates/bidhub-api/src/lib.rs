//! # bidhub-api
//!
//! HTTP API layer for BidHub built on Axum.
//!
//! Provides the REST endpoints, the WebSocket upgrade and socket loop,
//! extractors, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
