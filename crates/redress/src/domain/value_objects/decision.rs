//! DecisionAction - AI triage verdict

use serde::{Deserialize, Serialize};

use super::ClaimStatus;

/// Action the AI appends to its reply as a structured decision block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum DecisionAction {
    Refund,
    Escalate,
    Reject,
}

impl DecisionAction {
    /// The claim status this decision resolves to.
    pub fn claim_status(self) -> ClaimStatus {
        match self {
            DecisionAction::Refund => ClaimStatus::Approved,
            DecisionAction::Escalate => ClaimStatus::Escalated,
            DecisionAction::Reject => ClaimStatus::Rejected,
        }
    }
}

impl std::fmt::Display for DecisionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionAction::Refund => write!(f, "REFUND"),
            DecisionAction::Escalate => write!(f, "ESCALATE"),
            DecisionAction::Reject => write!(f, "REJECT"),
        }
    }
}

impl std::str::FromStr for DecisionAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "REFUND" => Ok(DecisionAction::Refund),
            "ESCALATE" => Ok(DecisionAction::Escalate),
            "REJECT" => Ok(DecisionAction::Reject),
            _ => Err(format!("Unknown decision action: {}", s)),
        }
    }
}
