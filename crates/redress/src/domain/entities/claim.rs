//! RefundRequest - One support interaction

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{ClaimStatus, DecisionAction};

/// Structured analysis the AI attached to its decision.
///
/// Persisted as an opaque jsonb blob alongside the claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiAnalysis {
    pub action: DecisionAction,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// A customer's refund claim processed via chat or image upload.
///
/// Status is set at most once automatically by the AI decision; any further
/// change is a manual admin action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundRequest {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub company_id: Uuid,
    /// Flattened conversation transcript (decision blocks stripped).
    pub transcript: Option<String>,
    /// Opaque reference to an uploaded evidence image.
    pub evidence_ref: Option<String>,
    pub analysis: Option<AiAnalysis>,
    pub status: ClaimStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RefundRequest {
    /// Create a new RefundRequest with generated ID and timestamps.
    pub fn new(
        transaction_id: Uuid,
        company_id: Uuid,
        status: ClaimStatus,
        analysis: Option<AiAnalysis>,
        transcript: Option<String>,
        evidence_ref: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            transaction_id,
            company_id,
            transcript,
            evidence_ref,
            analysis,
            status,
            created_at: now,
            updated_at: now,
        }
    }
}
