//! Chat - Widget chat/upload DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One turn of the rolling conversation history kept by the widget.
/// Roles are `user` and `model` (the widget mirrors the provider's naming).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

/// Chat request from the widget
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
    pub company_id: Uuid,
    /// Accepted for widget wire compatibility; the stored policy is
    /// authoritative and this field is ignored.
    #[allow(dead_code)]
    pub company_policy: Option<String>,
    pub customer_ref: Option<String>,
}

/// Chat reply to the widget
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    pub reply: String,
}
