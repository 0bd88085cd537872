//! Company Routes - Tenant profile lookup and onboarding

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::models::{CompanyProfile, RegisterCompanyRequest, RegisterCompanyResponse};
use crate::routes::domain_error;
use crate::AppState;

/// Get tenant branding and policy by URL slug
#[utoipa::path(
    get,
    path = "/api/company/{tag}",
    params(("tag" = String, Path, description = "Tenant URL slug")),
    responses(
        (status = 200, description = "Tenant profile", body = CompanyProfile),
        (status = 404, description = "Unknown tenant"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Company"
)]
pub async fn get_company(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<CompanyProfile>, (axum::http::StatusCode, String)> {
    let company = state
        .company_service
        .get_by_tagline(&tag)
        .await
        .map_err(domain_error)?
        .ok_or((
            axum::http::StatusCode::NOT_FOUND,
            "Unknown tenant".to_string(),
        ))?;

    Ok(Json(company.into()))
}

/// Onboard a new tenant
#[utoipa::path(
    post,
    path = "/api/company/register",
    request_body = RegisterCompanyRequest,
    responses(
        (status = 200, description = "Tenant registered; credentials shown once", body = RegisterCompanyResponse),
        (status = 400, description = "Invalid tagline"),
        (status = 409, description = "Tagline already taken"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Company"
)]
pub async fn register_company(
    State(state): State<AppState>,
    Json(payload): Json<RegisterCompanyRequest>,
) -> Result<Json<RegisterCompanyResponse>, (axum::http::StatusCode, String)> {
    let registered = state
        .company_service
        .register(
            payload.name,
            payload.tagline,
            payload.description,
            payload.banner_color,
            payload.industry,
            payload.support_email,
            payload.return_policy,
        )
        .await
        .map_err(domain_error)?;

    Ok(Json(RegisterCompanyResponse {
        company: registered.company.into(),
        admin_username: registered.admin_username,
        admin_password: registered.admin_password,
        website_url: registered.website_url,
        qr_code_base64: registered.qr_code_base64,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/company/:tag", get(get_company))
        .route("/api/company/register", post(register_company))
}
