//! Escalation - Human handoff record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::EscalationStatus;

/// A request for a human agent, created when the AI cannot or should not
/// decide, or the customer explicitly asks for a person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Escalation {
    pub id: Uuid,
    pub transaction_id: Option<Uuid>,
    pub customer_ref: Option<String>,
    pub reason: String,
    pub status: EscalationStatus,
    pub created_at: DateTime<Utc>,
}

impl Escalation {
    /// Create a new open Escalation with generated ID and timestamp.
    pub fn new(transaction_id: Option<Uuid>, customer_ref: Option<String>, reason: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            transaction_id,
            customer_ref,
            reason,
            status: EscalationStatus::Open,
            created_at: Utc::now(),
        }
    }
}
