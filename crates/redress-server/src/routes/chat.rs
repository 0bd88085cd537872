//! Chat Routes - The widget's text surface

use axum::{
    extract::State,
    routing::post,
    Json, Router,
};

use crate::models::{ChatRequest, ChatResponse};
use crate::routes::domain_error;
use crate::services::triage::TriageRequest;
use crate::AppState;

/// Handle one chat turn from the support widget
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 404, description = "Unknown tenant"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (axum::http::StatusCode, String)> {
    let outcome = state
        .triage
        .chat(TriageRequest {
            company_id: payload.company_id,
            message: payload.message,
            history: payload.history,
            image_analysis: None,
            evidence_ref: None,
            customer_ref: payload.customer_ref,
        })
        .await
        .map_err(domain_error)?;

    Ok(Json(ChatResponse {
        reply: outcome.reply,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/chat", post(chat))
}
