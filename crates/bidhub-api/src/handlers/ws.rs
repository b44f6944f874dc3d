//! WebSocket upgrade handler and socket loop.

use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use tracing::{info, warn};

use bidhub_core::types::id::ConnectionId;
use bidhub_realtime::message::types::{InboundMessage, OutboundMessage};
use bidhub_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for WebSocket authentication.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// Bearer access token.
    pub token: String,
}

/// GET /ws?token={jwt} — token verified before the upgrade completes.
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Result<Response, ApiError> {
    let claims = state.verifier.verify(&query.token)?;
    let ctx = RequestContext::new(claims.user_id(), claims.role);
    Ok(ws.on_upgrade(move |socket| handle_socket(state, ctx, socket)))
}

/// Drives one established WebSocket connection to completion.
async fn handle_socket(state: AppState, ctx: RequestContext, socket: WebSocket) {
    let (ws_tx, mut ws_rx) = socket.split();

    let (handle, outbound_rx) = state.hub.register(ctx.user_id, ctx.role);
    let conn_id = handle.id;
    info!(conn_id = %conn_id, user_id = %ctx.user_id, "WebSocket connection established");

    // Watched auctions become live group memberships immediately.
    match state.watchlist.watched_auctions(&ctx).await {
        Ok(auction_ids) => {
            for auction_id in auction_ids {
                state.hub.join_auction(auction_id, conn_id);
            }
        }
        Err(e) => {
            warn!(conn_id = %conn_id, error = %e, "Failed to join watchlist groups");
        }
    }

    let ping_interval = Duration::from_secs(state.hub.config().ping_interval_seconds);
    let forwarder = tokio::spawn(forward_outbound(ws_tx, outbound_rx, ping_interval));

    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => {
                handle_inbound(&state, &ctx, conn_id, text.as_str()).await;
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    // Cleanup must always succeed, even after a transport error.
    forwarder.abort();
    state.hub.unregister(&conn_id);
    info!(conn_id = %conn_id, user_id = %ctx.user_id, "WebSocket connection closed");
}

/// Drains the connection's outbound queue into the socket sink and
/// interleaves keepalive pings.
async fn forward_outbound(
    mut ws_tx: SplitSink<WebSocket, Message>,
    mut outbound_rx: tokio::sync::mpsc::Receiver<OutboundMessage>,
    ping_interval: Duration,
) {
    let mut ping = tokio::time::interval(ping_interval);
    ping.tick().await;

    loop {
        let event = tokio::select! {
            msg = outbound_rx.recv() => match msg {
                Some(msg) => msg,
                None => break,
            },
            _ = ping.tick() => OutboundMessage::Ping {
                timestamp: chrono::Utc::now().timestamp(),
            },
        };
        let closing = matches!(event, OutboundMessage::Disconnect { .. });
        let json = match serde_json::to_string(&event) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize outbound event");
                continue;
            }
        };
        if ws_tx.send(Message::Text(json.into())).await.is_err() {
            break;
        }
        if closing {
            let _ = ws_tx.send(Message::Close(None)).await;
            break;
        }
    }
}

/// Dispatches one inbound client RPC.
async fn handle_inbound(state: &AppState, ctx: &RequestContext, conn_id: ConnectionId, raw: &str) {
    let msg: InboundMessage = match serde_json::from_str(raw) {
        Ok(m) => m,
        Err(e) => {
            push_to_connection(
                state,
                conn_id,
                OutboundMessage::Error {
                    code: "INVALID_MESSAGE".to_string(),
                    message: format!("Failed to parse message: {e}"),
                },
            );
            return;
        }
    };

    match msg {
        InboundMessage::JoinAuction { auction_id } => {
            state.hub.join_auction(auction_id, conn_id);
            state.hub.broadcast_to_auction(
                &auction_id,
                &OutboundMessage::UserJoinAuction {
                    auction_id,
                    user_id: ctx.user_id,
                },
            );
        }
        InboundMessage::LeaveAuction { auction_id } => {
            state.hub.broadcast_to_auction(
                &auction_id,
                &OutboundMessage::UserLeaveAuction {
                    auction_id,
                    user_id: ctx.user_id,
                },
            );
            state.hub.leave_auction(auction_id, conn_id);
        }
        InboundMessage::PlaceBid { auction_id, amount } => {
            if let Err(e) = state.bids.place_bid(ctx, auction_id, amount).await {
                push_to_connection(
                    state,
                    conn_id,
                    OutboundMessage::BidRejected {
                        auction_id,
                        code: e.kind.to_string(),
                        message: e.message,
                    },
                );
            }
        }
        InboundMessage::ListNotifications { page } => {
            match state.notifications.list_notifications(ctx, &page).await {
                Ok(page) => {
                    push_to_connection(state, conn_id, OutboundMessage::NotificationList { page });
                }
                Err(e) => {
                    push_to_connection(
                        state,
                        conn_id,
                        OutboundMessage::Error {
                            code: e.kind.to_string(),
                            message: e.message,
                        },
                    );
                }
            }
        }
        InboundMessage::MarkRead { notification_id } => {
            if let Err(e) = state.notifications.read_notification(ctx, notification_id).await {
                push_to_connection(
                    state,
                    conn_id,
                    OutboundMessage::Error {
                        code: e.kind.to_string(),
                        message: e.message,
                    },
                );
            }
        }
        InboundMessage::Pong { .. } => {}
    }
}

/// Pushes an event to a single connection, if it is still live.
fn push_to_connection(state: &AppState, conn_id: ConnectionId, event: OutboundMessage) {
    if let Some(handle) = state.hub.presence().get(&conn_id) {
        handle.push(event);
    }
}
