//! PostgreSQL Adapters
//!
//! sqlx-backed implementations of the repository ports.

mod claim_repository;
mod company_repository;
mod escalation_repository;
mod payout_repository;
mod transaction_repository;

pub use claim_repository::PgClaimRepository;
pub use company_repository::PgCompanyRepository;
pub use escalation_repository::PgEscalationRepository;
pub use payout_repository::PgPayoutRepository;
pub use transaction_repository::PgTransactionRepository;
