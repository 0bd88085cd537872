//! PostgreSQL implementation of EscalationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use redress::{DomainError, Escalation, EscalationRepository, EscalationStatus};

/// PostgreSQL implementation of EscalationRepository
pub struct PgEscalationRepository {
    pool: PgPool,
}

impl PgEscalationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct EscalationRow {
    id: Uuid,
    transaction_id: Option<Uuid>,
    customer_ref: Option<String>,
    reason: String,
    status: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<EscalationRow> for Escalation {
    type Error = DomainError;

    fn try_from(row: EscalationRow) -> Result<Self, Self::Error> {
        let status: EscalationStatus = row.status.parse().map_err(DomainError::Repository)?;
        Ok(Self {
            id: row.id,
            transaction_id: row.transaction_id,
            customer_ref: row.customer_ref,
            reason: row.reason,
            status,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl EscalationRepository for PgEscalationRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Escalation>, DomainError> {
        let row =
            sqlx::query_as::<_, EscalationRow>("SELECT * FROM escalation_requests WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list_open(&self) -> Result<Vec<Escalation>, DomainError> {
        let rows = sqlx::query_as::<_, EscalationRow>(
            r#"
            SELECT * FROM escalation_requests
            WHERE status = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(EscalationStatus::Open.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn insert(&self, escalation: &Escalation) -> Result<Escalation, DomainError> {
        let row = sqlx::query_as::<_, EscalationRow>(
            r#"
            INSERT INTO escalation_requests (id, transaction_id, customer_ref, reason, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(escalation.id)
        .bind(escalation.transaction_id)
        .bind(&escalation.customer_ref)
        .bind(&escalation.reason)
        .bind(escalation.status.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.try_into()
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: EscalationStatus,
    ) -> Result<Escalation, DomainError> {
        let row = sqlx::query_as::<_, EscalationRow>(
            r#"
            UPDATE escalation_requests
            SET status = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.map(TryInto::try_into)
            .transpose()?
            .ok_or_else(|| DomainError::not_found("Escalation", id))
    }
}
