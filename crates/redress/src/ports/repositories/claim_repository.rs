//! RefundRequest Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, ClaimStatus, RefundRequest};

/// Repository interface for RefundRequest entities
#[async_trait]
pub trait ClaimRepository: Send + Sync {
    /// Find a RefundRequest by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefundRequest>, DomainError>;

    /// Find the claim already filed against a transaction, if any
    async fn find_by_transaction(
        &self,
        transaction_id: Uuid,
    ) -> Result<Option<RefundRequest>, DomainError>;

    /// Find claims for a set of transactions (payout/escalation enrichment)
    async fn find_by_transactions(
        &self,
        transaction_ids: &[Uuid],
    ) -> Result<Vec<RefundRequest>, DomainError>;

    /// List a company's claims in a given status, newest first
    async fn list_by_status(
        &self,
        company_id: Uuid,
        status: ClaimStatus,
    ) -> Result<Vec<RefundRequest>, DomainError>;

    /// Insert a new RefundRequest
    async fn insert(&self, claim: &RefundRequest) -> Result<RefundRequest, DomainError>;

    /// Set a claim's lifecycle status
    async fn update_status(
        &self,
        id: Uuid,
        status: ClaimStatus,
    ) -> Result<RefundRequest, DomainError>;

    /// Drop transcript and evidence for the claim on a transaction (privacy
    /// clearing once an admin has acted on it)
    async fn redact_by_transaction(&self, transaction_id: Uuid) -> Result<(), DomainError>;
}
