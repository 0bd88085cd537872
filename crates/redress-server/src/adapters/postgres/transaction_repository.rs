//! PostgreSQL implementation of TransactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use redress::{DomainError, Transaction, TransactionRepository, TransactionStatus};

/// PostgreSQL implementation of TransactionRepository
pub struct PgTransactionRepository {
    pool: PgPool,
}

impl PgTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct TransactionRow {
    id: Uuid,
    company_id: Uuid,
    customer_ref: Option<String>,
    order_ref: String,
    amount: f64,
    currency: String,
    line_items: serde_json::Value,
    purchased_at: chrono::DateTime<chrono::Utc>,
    status: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = DomainError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let status: TransactionStatus = row
            .status
            .parse()
            .map_err(DomainError::Repository)?;
        Ok(Self {
            id: row.id,
            company_id: row.company_id,
            customer_ref: row.customer_ref,
            order_ref: row.order_ref,
            amount: row.amount,
            currency: row.currency,
            line_items: row.line_items,
            purchased_at: row.purchased_at,
            status,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl TransactionRepository for PgTransactionRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>, DomainError> {
        let row = sqlx::query_as::<_, TransactionRow>("SELECT * FROM transactions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_by_order_ref(
        &self,
        company_id: Option<Uuid>,
        order_ref: &str,
    ) -> Result<Option<Transaction>, DomainError> {
        // Customers quote refs with a leading '#' and arbitrary casing
        let clean_ref = order_ref.trim().trim_start_matches('#');

        let row = match company_id {
            Some(cid) => {
                sqlx::query_as::<_, TransactionRow>(
                    r#"
                    SELECT * FROM transactions
                    WHERE company_id = $1 AND LOWER(order_ref) = LOWER($2)
                    LIMIT 1
                    "#,
                )
                .bind(cid)
                .bind(clean_ref)
                .fetch_optional(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, TransactionRow>(
                    "SELECT * FROM transactions WHERE LOWER(order_ref) = LOWER($1) LIMIT 1",
                )
                .bind(clean_ref)
                .fetch_optional(&self.pool)
                .await
            }
        }
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.map(TryInto::try_into).transpose()
    }

    async fn insert(&self, transaction: &Transaction) -> Result<Transaction, DomainError> {
        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            INSERT INTO transactions (
                id, company_id, customer_ref, order_ref, amount, currency,
                line_items, purchased_at, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(transaction.id)
        .bind(transaction.company_id)
        .bind(&transaction.customer_ref)
        .bind(&transaction.order_ref)
        .bind(transaction.amount)
        .bind(&transaction.currency)
        .bind(&transaction.line_items)
        .bind(transaction.purchased_at)
        .bind(transaction.status.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.try_into()
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: TransactionStatus,
    ) -> Result<Transaction, DomainError> {
        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            UPDATE transactions
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
            .ok_or_else(|| DomainError::not_found("Transaction", id))
    }
}
