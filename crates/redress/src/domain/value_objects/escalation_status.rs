//! EscalationStatus - Human handoff lifecycle

use serde::{Deserialize, Serialize};

/// Status of a human-handoff record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EscalationStatus {
    Open,
    InProgress,
    Resolved,
}

impl EscalationStatus {
    /// Escalations move forward only: open -> in-progress -> resolved
    /// (resolving straight from open is allowed).
    pub fn can_transition_to(self, next: EscalationStatus) -> bool {
        matches!(
            (self, next),
            (EscalationStatus::Open, EscalationStatus::InProgress)
                | (EscalationStatus::Open, EscalationStatus::Resolved)
                | (EscalationStatus::InProgress, EscalationStatus::Resolved)
        )
    }
}

impl std::fmt::Display for EscalationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EscalationStatus::Open => write!(f, "OPEN"),
            EscalationStatus::InProgress => write!(f, "IN_PROGRESS"),
            EscalationStatus::Resolved => write!(f, "RESOLVED"),
        }
    }
}

impl std::str::FromStr for EscalationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OPEN" => Ok(EscalationStatus::Open),
            "IN_PROGRESS" => Ok(EscalationStatus::InProgress),
            "RESOLVED" => Ok(EscalationStatus::Resolved),
            _ => Err(format!("Unknown escalation status: {}", s)),
        }
    }
}
