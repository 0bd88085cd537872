//! Value Objects
//!
//! Immutable value types shared across the domain.

mod claim_status;
mod decision;
mod escalation_status;
mod payout_status;
mod transaction_status;

pub use claim_status::ClaimStatus;
pub use decision::DecisionAction;
pub use escalation_status::EscalationStatus;
pub use payout_status::PayoutStatus;
pub use transaction_status::TransactionStatus;
