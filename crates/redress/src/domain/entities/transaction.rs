//! Transaction - External purchase record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::TransactionStatus;

/// An external purchase/order record owned by one Company.
///
/// `line_items` is semi-structured (array of item objects) and stored opaque.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub company_id: Uuid,
    pub customer_ref: Option<String>,
    /// External order identifier customers quote in chat (e.g. "ORD-1042").
    pub order_ref: String,
    pub amount: f64,
    pub currency: String,
    pub line_items: serde_json::Value,
    pub purchased_at: DateTime<Utc>,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new completed Transaction with generated ID and timestamps.
    pub fn new(
        company_id: Uuid,
        customer_ref: Option<String>,
        order_ref: String,
        amount: f64,
        currency: String,
        line_items: Option<serde_json::Value>,
        purchased_at: Option<DateTime<Utc>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            company_id,
            customer_ref,
            order_ref,
            amount,
            currency,
            line_items: line_items.unwrap_or(serde_json::json!([])),
            purchased_at: purchased_at.unwrap_or(now),
            status: TransactionStatus::Completed,
            created_at: now,
        }
    }
}
