//! PayoutStatus - Payout queue entry lifecycle

use serde::{Deserialize, Serialize};

/// Status of a payout queue entry. Entries are append-only until processed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayoutStatus {
    ReadyForPayout,
    Processed,
}

impl PayoutStatus {
    pub fn can_transition_to(self, next: PayoutStatus) -> bool {
        matches!(
            (self, next),
            (PayoutStatus::ReadyForPayout, PayoutStatus::Processed)
        )
    }
}

impl std::fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayoutStatus::ReadyForPayout => write!(f, "READY_FOR_PAYOUT"),
            PayoutStatus::Processed => write!(f, "PROCESSED"),
        }
    }
}

impl std::str::FromStr for PayoutStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "READY_FOR_PAYOUT" => Ok(PayoutStatus::ReadyForPayout),
            "PROCESSED" => Ok(PayoutStatus::Processed),
            _ => Err(format!("Unknown payout status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_forward_transition() {
        assert!(PayoutStatus::ReadyForPayout.can_transition_to(PayoutStatus::Processed));
        assert!(!PayoutStatus::Processed.can_transition_to(PayoutStatus::ReadyForPayout));
        assert!(!PayoutStatus::Processed.can_transition_to(PayoutStatus::Processed));
    }
}
