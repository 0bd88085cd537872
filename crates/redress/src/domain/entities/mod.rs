//! Domain Entities
//!
//! - Company: tenant profile and return policy
//! - Transaction: external purchase record
//! - RefundRequest: one support interaction with the AI decision
//! - PayoutEntry: approved refund awaiting disbursement
//! - Escalation: human handoff record

mod claim;
mod company;
mod escalation;
mod payout;
mod transaction;

pub use claim::{AiAnalysis, RefundRequest};
pub use company::Company;
pub use escalation::Escalation;
pub use payout::PayoutEntry;
pub use transaction::Transaction;
