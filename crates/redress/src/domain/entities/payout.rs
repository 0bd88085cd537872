//! PayoutEntry - Approved refund awaiting disbursement

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::PayoutStatus;

/// A payout instruction in the company refund queue.
///
/// Created if and only if a RefundRequest reaches approved status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutEntry {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub company_id: Uuid,
    pub amount: f64,
    pub status: PayoutStatus,
    pub created_at: DateTime<Utc>,
}

impl PayoutEntry {
    /// Create a new ready-for-payout entry with generated ID and timestamp.
    pub fn new(transaction_id: Uuid, company_id: Uuid, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            transaction_id,
            company_id,
            amount,
            status: PayoutStatus::ReadyForPayout,
            created_at: Utc::now(),
        }
    }
}
