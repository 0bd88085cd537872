//! Company Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Company};

/// Repository interface for Company entities
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Find a Company by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, DomainError>;

    /// Find a Company by its unique tagline slug
    async fn find_by_tagline(&self, tagline: &str) -> Result<Option<Company>, DomainError>;

    /// Insert a new Company
    async fn insert(&self, company: &Company) -> Result<Company, DomainError>;

    /// Replace a Company's return policy text
    async fn update_policy(&self, id: Uuid, policy: &str) -> Result<Company, DomainError>;
}
