//! Transaction - Order ingestion DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use redress::Transaction;

/// Order ingestion request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    pub company_id: Uuid,
    pub order_ref: String,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub customer_ref: Option<String>,
    pub line_items: Option<serde_json::Value>,
    pub purchased_at: Option<DateTime<Utc>>,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Transaction response
#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub customer_ref: Option<String>,
    pub order_ref: String,
    pub amount: f64,
    pub currency: String,
    pub line_items: serde_json::Value,
    pub purchased_at: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            company_id: tx.company_id,
            customer_ref: tx.customer_ref,
            order_ref: tx.order_ref,
            amount: tx.amount,
            currency: tx.currency,
            line_items: tx.line_items,
            purchased_at: tx.purchased_at,
            status: tx.status.to_string(),
            created_at: tx.created_at,
        }
    }
}
