//! Admin DTOs - Pending-work views and status transitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use redress::{Escalation, PayoutEntry, RefundRequest};

/// A refund request as shown in the admin review queue.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClaimView {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub company_id: Uuid,
    pub status: String,
    pub ai_reason: Option<String>,
    pub confidence: Option<f32>,
    pub transcript: Option<String>,
    pub evidence_ref: Option<String>,
    /// Order reference of the linked transaction, when loaded
    pub order_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ClaimView {
    pub fn from_claim(claim: RefundRequest, order_ref: Option<String>) -> Self {
        let (ai_reason, confidence) = match &claim.analysis {
            Some(a) => (Some(a.reason.clone()), a.confidence),
            None => (None, None),
        };
        Self {
            id: claim.id,
            transaction_id: claim.transaction_id,
            company_id: claim.company_id,
            status: claim.status.to_string(),
            ai_reason,
            confidence,
            transcript: claim.transcript,
            evidence_ref: claim.evidence_ref,
            order_ref,
            created_at: claim.created_at,
        }
    }
}

/// An escalation as shown in the admin review queue, enriched with the
/// transcript/evidence of the linked claim when one exists.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EscalationView {
    pub id: Uuid,
    pub transaction_id: Option<Uuid>,
    pub customer_ref: Option<String>,
    pub reason: String,
    pub status: String,
    pub context: Option<String>,
    pub evidence_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl EscalationView {
    pub fn from_escalation(
        escalation: Escalation,
        context: Option<String>,
        evidence_ref: Option<String>,
    ) -> Self {
        Self {
            id: escalation.id,
            transaction_id: escalation.transaction_id,
            customer_ref: escalation.customer_ref,
            reason: escalation.reason,
            status: escalation.status.to_string(),
            context,
            evidence_ref,
            created_at: escalation.created_at,
        }
    }
}

/// A payout queue entry as shown in the admin review queue.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PayoutView {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub company_id: Uuid,
    pub amount: f64,
    pub status: String,
    pub context: Option<String>,
    pub ai_reason: Option<String>,
    pub evidence_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PayoutView {
    pub fn from_entry(
        entry: PayoutEntry,
        context: Option<String>,
        ai_reason: Option<String>,
        evidence_ref: Option<String>,
    ) -> Self {
        Self {
            id: entry.id,
            transaction_id: entry.transaction_id,
            company_id: entry.company_id,
            amount: entry.amount,
            status: entry.status.to_string(),
            context,
            ai_reason,
            evidence_ref,
            created_at: entry.created_at,
        }
    }
}

/// Everything awaiting human attention for one company.
#[derive(Debug, Serialize, ToSchema)]
pub struct PendingWorkResponse {
    pub refund_requests: Vec<ClaimView>,
    pub escalations: Vec<EscalationView>,
    pub payout_queue: Vec<PayoutView>,
}

/// Manual status transition request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// Target status, e.g. "APPROVED", "IN_PROGRESS", "PROCESSED"
    pub status: String,
    /// Drop transcript/evidence of the linked claim once acted on
    #[serde(default)]
    pub clear_context: bool,
}
