//! Transaction Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Transaction, TransactionStatus};

/// Repository interface for Transaction entities
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Find a Transaction by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>, DomainError>;

    /// Find a Transaction by its external order reference, case-insensitively.
    /// Scoped to a company when `company_id` is given.
    async fn find_by_order_ref(
        &self,
        company_id: Option<Uuid>,
        order_ref: &str,
    ) -> Result<Option<Transaction>, DomainError>;

    /// Insert a new Transaction
    async fn insert(&self, transaction: &Transaction) -> Result<Transaction, DomainError>;

    /// Set a Transaction's lifecycle status
    async fn update_status(
        &self,
        id: Uuid,
        status: TransactionStatus,
    ) -> Result<Transaction, DomainError>;
}
