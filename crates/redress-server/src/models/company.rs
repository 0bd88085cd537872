//! Company - Tenant profile DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use redress::Company;

/// Public tenant profile. Never carries credential material.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CompanyProfile {
    pub id: Uuid,
    pub name: String,
    pub tagline: String,
    pub description: Option<String>,
    pub banner_color: Option<String>,
    pub industry: Option<String>,
    pub support_email: Option<String>,
    pub return_policy: String,
    pub created_at: DateTime<Utc>,
}

impl From<Company> for CompanyProfile {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
            tagline: company.tagline,
            description: company.description,
            banner_color: company.banner_color,
            industry: company.industry,
            support_email: company.support_email,
            return_policy: company.return_policy,
            created_at: company.created_at,
        }
    }
}

/// Tenant onboarding request
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterCompanyRequest {
    pub name: String,
    pub tagline: String,
    pub description: Option<String>,
    pub banner_color: Option<String>,
    pub industry: Option<String>,
    pub support_email: Option<String>,
    pub return_policy: String,
}

/// Onboarding response. The plain admin password is returned exactly once;
/// only its bcrypt hash is stored.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterCompanyResponse {
    pub company: CompanyProfile,
    pub admin_username: String,
    pub admin_password: String,
    pub website_url: String,
    pub qr_code_base64: String,
}

/// Admin login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub tagline: String,
    pub username: String,
    pub password: String,
}

/// Replace a company's return policy text
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePolicyRequest {
    pub policy: String,
}
