//! Payout Queue Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, PayoutEntry, PayoutStatus};

/// Repository interface for the company refund (payout) queue
#[async_trait]
pub trait PayoutRepository: Send + Sync {
    /// Find a payout entry by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PayoutEntry>, DomainError>;

    /// List a company's entries awaiting payout, oldest first
    async fn list_ready(&self, company_id: Uuid) -> Result<Vec<PayoutEntry>, DomainError>;

    /// Insert a new payout entry
    async fn insert(&self, entry: &PayoutEntry) -> Result<PayoutEntry, DomainError>;

    /// Set a payout entry's status
    async fn update_status(
        &self,
        id: Uuid,
        status: PayoutStatus,
    ) -> Result<PayoutEntry, DomainError>;
}
