//! Dashboard Push Channel
//!
//! A viewer connects to `/ws` and receives the broadcast stream as JSON
//! text frames. No history replay; a viewer that cannot keep up or whose
//! send fails is simply dropped.

use axum::{
    extract::{ws::Message, ws::WebSocket, State, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use futures_util::{SinkExt, StreamExt};

use crate::models::StatsSnapshot;
use crate::services::events::EventBroadcaster;
use crate::AppState;

/// Upgrade a dashboard viewer connection
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_dashboard_socket(socket, state.events.clone()))
}

async fn handle_dashboard_socket(socket: WebSocket, events: EventBroadcaster) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = events.subscribe();

    // Forward broadcast messages to this viewer until a send fails or the
    // receiver lags out of the ring buffer
    let send_task = tokio::spawn(async move {
        while let Ok(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to serialize dashboard message: {}", e);
                }
            }
        }
    });

    // The dashboard never sends anything meaningful; drain until close
    while let Some(Ok(msg)) = receiver.next().await {
        if matches!(msg, Message::Close(_)) {
            break;
        }
    }

    send_task.abort();
}

/// Current stats snapshot for a dashboard's initial fill. The push channel
/// itself never replays history.
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Current rolling statistics", body = StatsSnapshot),
    ),
    tag = "Dashboard"
)]
pub async fn current_stats(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.stats.snapshot())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/stats", get(current_stats))
}
