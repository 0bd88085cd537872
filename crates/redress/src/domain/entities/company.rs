//! Company - Tenant profile
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tenant: one company using the support widget.
///
/// `return_policy` is free text consumed verbatim by the AI prompt.
/// `admin_password_hash` is a bcrypt hash; the plain password is shown once
/// at onboarding and never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    /// Unique URL slug identifying the tenant (e.g. `/technova`).
    pub tagline: String,
    pub description: Option<String>,
    pub banner_color: Option<String>,
    pub industry: Option<String>,
    pub support_email: Option<String>,
    pub return_policy: String,
    pub admin_username: String,
    pub admin_password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Company {
    /// Create a new Company with generated ID and timestamp.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        tagline: String,
        description: Option<String>,
        banner_color: Option<String>,
        industry: Option<String>,
        support_email: Option<String>,
        return_policy: String,
        admin_username: String,
        admin_password_hash: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            tagline,
            description,
            banner_color,
            industry,
            support_email,
            return_policy,
            admin_username,
            admin_password_hash,
            created_at: Utc::now(),
        }
    }
}
