//! ClaimStatus - Refund request lifecycle

use serde::{Deserialize, Serialize};

/// Lifecycle status of a refund request.
///
/// The AI sets the status at most once (pending -> approved/rejected/escalated);
/// any later change is a manual admin action on an escalated claim.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
    Escalated,
}

impl ClaimStatus {
    /// Whether a manual transition to `next` is legal.
    pub fn can_transition_to(self, next: ClaimStatus) -> bool {
        matches!(
            (self, next),
            (ClaimStatus::Pending, ClaimStatus::Approved)
                | (ClaimStatus::Pending, ClaimStatus::Rejected)
                | (ClaimStatus::Pending, ClaimStatus::Escalated)
                | (ClaimStatus::Escalated, ClaimStatus::Approved)
                | (ClaimStatus::Escalated, ClaimStatus::Rejected)
        )
    }

    /// Approved and rejected claims never move again.
    pub fn is_terminal(self) -> bool {
        matches!(self, ClaimStatus::Approved | ClaimStatus::Rejected)
    }
}

impl std::fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClaimStatus::Pending => write!(f, "PENDING"),
            ClaimStatus::Approved => write!(f, "APPROVED"),
            ClaimStatus::Rejected => write!(f, "REJECTED"),
            ClaimStatus::Escalated => write!(f, "ESCALATED"),
        }
    }
}

impl std::str::FromStr for ClaimStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(ClaimStatus::Pending),
            "APPROVED" => Ok(ClaimStatus::Approved),
            "REJECTED" => Ok(ClaimStatus::Rejected),
            "ESCALATED" => Ok(ClaimStatus::Escalated),
            _ => Err(format!("Unknown claim status: {}", s)),
        }
    }
}
