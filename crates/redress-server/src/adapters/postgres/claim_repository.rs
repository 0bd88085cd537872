//! PostgreSQL implementation of ClaimRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use redress::{AiAnalysis, ClaimRepository, ClaimStatus, DomainError, RefundRequest};

/// PostgreSQL implementation of ClaimRepository
pub struct PgClaimRepository {
    pool: PgPool,
}

impl PgClaimRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct ClaimRow {
    id: Uuid,
    transaction_id: Uuid,
    company_id: Uuid,
    transcript: Option<String>,
    evidence_ref: Option<String>,
    analysis: Option<serde_json::Value>,
    status: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<ClaimRow> for RefundRequest {
    type Error = DomainError;

    fn try_from(row: ClaimRow) -> Result<Self, Self::Error> {
        let status: ClaimStatus = row.status.parse().map_err(DomainError::Repository)?;
        let analysis: Option<AiAnalysis> = row
            .analysis
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| DomainError::Repository(format!("bad analysis blob: {}", e)))?;
        Ok(Self {
            id: row.id,
            transaction_id: row.transaction_id,
            company_id: row.company_id,
            transcript: row.transcript,
            evidence_ref: row.evidence_ref,
            analysis,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn rows_to_claims(rows: Vec<ClaimRow>) -> Result<Vec<RefundRequest>, DomainError> {
    rows.into_iter().map(TryInto::try_into).collect()
}

#[async_trait]
impl ClaimRepository for PgClaimRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefundRequest>, DomainError> {
        let row = sqlx::query_as::<_, ClaimRow>("SELECT * FROM refund_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_by_transaction(
        &self,
        transaction_id: Uuid,
    ) -> Result<Option<RefundRequest>, DomainError> {
        let row = sqlx::query_as::<_, ClaimRow>(
            r#"
            SELECT * FROM refund_requests
            WHERE transaction_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_by_transactions(
        &self,
        transaction_ids: &[Uuid],
    ) -> Result<Vec<RefundRequest>, DomainError> {
        if transaction_ids.is_empty() {
            return Ok(vec![]);
        }

        let rows = sqlx::query_as::<_, ClaimRow>(
            "SELECT * FROM refund_requests WHERE transaction_id = ANY($1)",
        )
        .bind(transaction_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        rows_to_claims(rows)
    }

    async fn list_by_status(
        &self,
        company_id: Uuid,
        status: ClaimStatus,
    ) -> Result<Vec<RefundRequest>, DomainError> {
        let rows = sqlx::query_as::<_, ClaimRow>(
            r#"
            SELECT * FROM refund_requests
            WHERE company_id = $1 AND status = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(company_id)
        .bind(status.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        rows_to_claims(rows)
    }

    async fn insert(&self, claim: &RefundRequest) -> Result<RefundRequest, DomainError> {
        let analysis = claim
            .analysis
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| DomainError::Repository(format!("bad analysis blob: {}", e)))?;

        let row = sqlx::query_as::<_, ClaimRow>(
            r#"
            INSERT INTO refund_requests (
                id, transaction_id, company_id, transcript, evidence_ref, analysis, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(claim.id)
        .bind(claim.transaction_id)
        .bind(claim.company_id)
        .bind(&claim.transcript)
        .bind(&claim.evidence_ref)
        .bind(analysis)
        .bind(claim.status.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.try_into()
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ClaimStatus,
    ) -> Result<RefundRequest, DomainError> {
        let row = sqlx::query_as::<_, ClaimRow>(
            r#"
            UPDATE refund_requests
            SET status = $2, updated_at = NOW()
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
            .ok_or_else(|| DomainError::not_found("RefundRequest", id))
    }

    async fn redact_by_transaction(&self, transaction_id: Uuid) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE refund_requests
            SET transcript = NULL, evidence_ref = NULL, updated_at = NOW()
            WHERE transaction_id = $1
            "#,
        )
        .bind(transaction_id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }
}
