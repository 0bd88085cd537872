//! Repository Ports
//!
//! Abstract persistence interfaces, one per aggregate.

mod claim_repository;
mod company_repository;
mod escalation_repository;
mod payout_repository;
mod transaction_repository;

pub use claim_repository::ClaimRepository;
pub use company_repository::CompanyRepository;
pub use escalation_repository::EscalationRepository;
pub use payout_repository::PayoutRepository;
pub use transaction_repository::TransactionRepository;
