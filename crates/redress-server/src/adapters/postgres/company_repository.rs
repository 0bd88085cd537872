//! PostgreSQL implementation of CompanyRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use redress::{Company, CompanyRepository, DomainError};

/// PostgreSQL implementation of CompanyRepository
pub struct PgCompanyRepository {
    pool: PgPool,
}

impl PgCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct CompanyRow {
    id: Uuid,
    name: String,
    tagline: String,
    description: Option<String>,
    banner_color: Option<String>,
    industry: Option<String>,
    support_email: Option<String>,
    return_policy: String,
    admin_username: String,
    admin_password_hash: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            tagline: row.tagline,
            description: row.description,
            banner_color: row.banner_color,
            industry: row.industry,
            support_email: row.support_email,
            return_policy: row.return_policy,
            admin_username: row.admin_username,
            admin_password_hash: row.admin_password_hash,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl CompanyRepository for PgCompanyRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, DomainError> {
        let row = sqlx::query_as::<_, CompanyRow>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn find_by_tagline(&self, tagline: &str) -> Result<Option<Company>, DomainError> {
        let row = sqlx::query_as::<_, CompanyRow>("SELECT * FROM companies WHERE tagline = $1")
            .bind(tagline)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn insert(&self, company: &Company) -> Result<Company, DomainError> {
        let row = sqlx::query_as::<_, CompanyRow>(
            r#"
            INSERT INTO companies (
                id, name, tagline, description, banner_color, industry,
                support_email, return_policy, admin_username, admin_password_hash
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(&company.tagline)
        .bind(&company.description)
        .bind(&company.banner_color)
        .bind(&company.industry)
        .bind(&company.support_email)
        .bind(&company.return_policy)
        .bind(&company.admin_username)
        .bind(&company.admin_password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.into())
    }

    async fn update_policy(&self, id: Uuid, policy: &str) -> Result<Company, DomainError> {
        let row = sqlx::query_as::<_, CompanyRow>(
            r#"
            UPDATE companies
            SET return_policy = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(policy)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.map(Into::into)
            .ok_or_else(|| DomainError::not_found("Company", id))
    }
}
