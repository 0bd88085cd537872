//! Admin Routes - Login, pending work and manual status transitions

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use redress::{ClaimStatus, EscalationStatus, PayoutStatus};

use crate::models::{
    ClaimView, CompanyProfile, EscalationView, LoginRequest, PayoutView, PendingWorkResponse,
    UpdatePolicyRequest, UpdateStatusRequest,
};
use crate::routes::domain_error;
use crate::AppState;

/// Tenant admin login
#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = CompanyProfile),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<CompanyProfile>, (StatusCode, String)> {
    let company = state
        .company_service
        .authenticate(&payload.tagline, &payload.username, &payload.password)
        .await
        .map_err(domain_error)?
        .ok_or((StatusCode::UNAUTHORIZED, "Invalid credentials".to_string()))?;

    Ok(Json(company.into()))
}

/// Everything awaiting human attention for a company
#[utoipa::path(
    get,
    path = "/api/admin/companies/{id}/claims",
    params(("id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Pending work", body = PendingWorkResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin"
)]
pub async fn pending_work(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PendingWorkResponse>, (StatusCode, String)> {
    let work = state
        .claim_service
        .pending_work(id)
        .await
        .map_err(domain_error)?;

    Ok(Json(work))
}

/// Manually transition a refund request
#[utoipa::path(
    post,
    path = "/api/admin/claims/{id}/status",
    params(("id" = Uuid, Path, description = "RefundRequest ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Claim updated", body = ClaimView),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Record not found"),
        (status = 409, description = "Invalid status transition requested"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin"
)]
pub async fn update_claim_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<ClaimView>, (StatusCode, String)> {
    let target: ClaimStatus = payload
        .status
        .parse()
        .map_err(|e: String| (StatusCode::BAD_REQUEST, e))?;

    let updated = state
        .claim_service
        .resolve_claim(id, target, payload.clear_context)
        .await
        .map_err(domain_error)?;

    Ok(Json(ClaimView::from_claim(updated, None)))
}

/// Manually transition an escalation
#[utoipa::path(
    post,
    path = "/api/admin/escalations/{id}/status",
    params(("id" = Uuid, Path, description = "Escalation ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Escalation updated", body = EscalationView),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Record not found"),
        (status = 409, description = "Invalid status transition requested"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin"
)]
pub async fn update_escalation_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<EscalationView>, (StatusCode, String)> {
    let target: EscalationStatus = payload
        .status
        .parse()
        .map_err(|e: String| (StatusCode::BAD_REQUEST, e))?;

    let updated = state
        .claim_service
        .update_escalation(id, target)
        .await
        .map_err(domain_error)?;

    Ok(Json(EscalationView::from_escalation(updated, None, None)))
}

/// Mark a payout entry processed
#[utoipa::path(
    post,
    path = "/api/admin/payouts/{id}/status",
    params(("id" = Uuid, Path, description = "PayoutEntry ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Payout updated", body = PayoutView),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Record not found"),
        (status = 409, description = "Invalid status transition requested"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin"
)]
pub async fn update_payout_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<PayoutView>, (StatusCode, String)> {
    let target: PayoutStatus = payload
        .status
        .parse()
        .map_err(|e: String| (StatusCode::BAD_REQUEST, e))?;

    let updated = state
        .claim_service
        .process_payout(id, target, payload.clear_context)
        .await
        .map_err(domain_error)?;

    Ok(Json(PayoutView::from_entry(updated, None, None, None)))
}

/// Replace a company's return policy text
#[utoipa::path(
    put,
    path = "/api/admin/companies/{id}/policy",
    params(("id" = Uuid, Path, description = "Company ID")),
    request_body = UpdatePolicyRequest,
    responses(
        (status = 200, description = "Policy updated", body = CompanyProfile),
        (status = 404, description = "Record not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin"
)]
pub async fn update_policy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePolicyRequest>,
) -> Result<Json<CompanyProfile>, (StatusCode, String)> {
    let updated = state
        .company_service
        .update_policy(id, &payload.policy)
        .await
        .map_err(domain_error)?;

    Ok(Json(updated.into()))
}

/// Management routes, gated by the optional deployment API key in main.
pub fn management_router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/companies/:id/claims", get(pending_work))
        .route("/api/admin/claims/:id/status", post(update_claim_status))
        .route(
            "/api/admin/escalations/:id/status",
            post(update_escalation_status),
        )
        .route("/api/admin/payouts/:id/status", post(update_payout_status))
        .route("/api/admin/companies/:id/policy", put(update_policy))
}

/// Login stays outside the API-key gate: it is itself an auth endpoint.
pub fn login_router() -> Router<AppState> {
    Router::new().route("/api/admin/login", post(login))
}
