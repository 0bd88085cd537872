//! Redress API Routes
//!
//! - / and /{tag} - landing and tenant chat pages
//! - /api/company - tenant profile lookup and onboarding
//! - /api/transactions - order ingestion
//! - /api/chat and /api/upload - the support widget surface
//! - /api/admin - login, pending work, manual status transitions
//! - /ws - dashboard push channel

pub mod admin;
pub mod chat;
pub mod company;
pub mod pages;
pub mod swagger;
pub mod transaction;
pub mod upload;
pub mod ws;

use axum::http::StatusCode;
use redress::DomainError;

/// Map a domain error onto the HTTP surface.
pub fn domain_error(err: DomainError) -> (StatusCode, String) {
    let status = match &err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) | DomainError::InvalidTransition { .. } => StatusCode::CONFLICT,
        DomainError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::ExternalService(_) => StatusCode::BAD_GATEWAY,
    };
    (status, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_mapping() {
        let (status, _) = domain_error(DomainError::not_found_str("Company", "technova"));
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = domain_error(DomainError::Validation("bad".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = domain_error(DomainError::invalid_transition("PROCESSED", "READY"));
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = domain_error(DomainError::Repository("db down".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
