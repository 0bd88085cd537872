//! TransactionStatus - Purchase record lifecycle

use serde::{Deserialize, Serialize};

/// Lifecycle status of an external purchase record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Completed,
    Refunded,
    Disputed,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Completed => write!(f, "COMPLETED"),
            TransactionStatus::Refunded => write!(f, "REFUNDED"),
            TransactionStatus::Disputed => write!(f, "DISPUTED"),
        }
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "COMPLETED" => Ok(TransactionStatus::Completed),
            "REFUNDED" => Ok(TransactionStatus::Refunded),
            "DISPUTED" => Ok(TransactionStatus::Disputed),
            _ => Err(format!("Unknown transaction status: {}", s)),
        }
    }
}
