//! Transaction Routes - Order ingestion

use axum::{
    extract::State,
    routing::post,
    Json, Router,
};

use redress::{Transaction, TransactionRepository};

use crate::models::{CreateTransactionRequest, TransactionResponse};
use crate::routes::domain_error;
use crate::AppState;

/// Ingest an external order record
#[utoipa::path(
    post,
    path = "/api/transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 200, description = "Transaction recorded", body = TransactionResponse),
        (status = 404, description = "Unknown tenant"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Transaction"
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    Json(payload): Json<CreateTransactionRequest>,
) -> Result<Json<TransactionResponse>, (axum::http::StatusCode, String)> {
    // The order must land in an existing tenant's partition
    state
        .company_service
        .get(payload.company_id)
        .await
        .map_err(domain_error)?
        .ok_or((
            axum::http::StatusCode::NOT_FOUND,
            "Unknown tenant".to_string(),
        ))?;

    let transaction = Transaction::new(
        payload.company_id,
        payload.customer_ref,
        payload.order_ref,
        payload.amount,
        payload.currency,
        payload.line_items,
        payload.purchased_at,
    );

    let saved = state
        .transactions
        .insert(&transaction)
        .await
        .map_err(domain_error)?;

    Ok(Json(saved.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/transactions", post(create_transaction))
}
