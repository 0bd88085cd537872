//! Escalation Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Escalation, EscalationStatus};

/// Repository interface for Escalation entities
#[async_trait]
pub trait EscalationRepository: Send + Sync {
    /// Find an Escalation by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Escalation>, DomainError>;

    /// List all open escalations (escalations are company-scoped only through
    /// their transaction, so filtering happens in the service layer)
    async fn list_open(&self) -> Result<Vec<Escalation>, DomainError>;

    /// Insert a new Escalation
    async fn insert(&self, escalation: &Escalation) -> Result<Escalation, DomainError>;

    /// Set an escalation's status
    async fn update_status(
        &self,
        id: Uuid,
        status: EscalationStatus,
    ) -> Result<Escalation, DomainError>;
}
