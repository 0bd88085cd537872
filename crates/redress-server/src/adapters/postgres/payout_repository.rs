//! PostgreSQL implementation of PayoutRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use redress::{DomainError, PayoutEntry, PayoutRepository, PayoutStatus};

/// PostgreSQL implementation of PayoutRepository
pub struct PgPayoutRepository {
    pool: PgPool,
}

impl PgPayoutRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct PayoutRow {
    id: Uuid,
    transaction_id: Uuid,
    company_id: Uuid,
    amount: f64,
    status: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<PayoutRow> for PayoutEntry {
    type Error = DomainError;

    fn try_from(row: PayoutRow) -> Result<Self, Self::Error> {
        let status: PayoutStatus = row.status.parse().map_err(DomainError::Repository)?;
        Ok(Self {
            id: row.id,
            transaction_id: row.transaction_id,
            company_id: row.company_id,
            amount: row.amount,
            status,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl PayoutRepository for PgPayoutRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PayoutEntry>, DomainError> {
        let row =
            sqlx::query_as::<_, PayoutRow>("SELECT * FROM company_refund_queue WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list_ready(&self, company_id: Uuid) -> Result<Vec<PayoutEntry>, DomainError> {
        let rows = sqlx::query_as::<_, PayoutRow>(
            r#"
            SELECT * FROM company_refund_queue
            WHERE company_id = $1 AND status = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(company_id)
        .bind(PayoutStatus::ReadyForPayout.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn insert(&self, entry: &PayoutEntry) -> Result<PayoutEntry, DomainError> {
        let row = sqlx::query_as::<_, PayoutRow>(
            r#"
            INSERT INTO company_refund_queue (id, transaction_id, company_id, amount, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(entry.id)
        .bind(entry.transaction_id)
        .bind(entry.company_id)
        .bind(entry.amount)
        .bind(entry.status.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.try_into()
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: PayoutStatus,
    ) -> Result<PayoutEntry, DomainError> {
        let row = sqlx::query_as::<_, PayoutRow>(
            r#"
            UPDATE company_refund_queue
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
            .ok_or_else(|| DomainError::not_found("PayoutEntry", id))
    }
}
