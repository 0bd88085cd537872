//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    ChatRequest,
    ChatResponse,
    ChatTurn,
    ClaimView,
    // Company models
    CompanyProfile,
    // Transaction models
    CreateTransactionRequest,
    // Dashboard models
    DashboardMessage,
    EscalationView,
    // Admin models
    LoginRequest,
    PayoutView,
    PendingWorkResponse,
    RegisterCompanyRequest,
    RegisterCompanyResponse,
    StatsSnapshot,
    TransactionResponse,
    UpdatePolicyRequest,
    UpdateStatusRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Company endpoints
        super::company::get_company,
        super::company::register_company,
        // Transaction endpoints
        super::transaction::create_transaction,
        // Chat endpoints
        super::chat::chat,
        super::upload::upload,
        // Admin endpoints
        super::admin::login,
        super::admin::pending_work,
        super::admin::update_claim_status,
        super::admin::update_escalation_status,
        super::admin::update_payout_status,
        super::admin::update_policy,
        // Dashboard endpoints
        super::ws::current_stats,
    ),
    info(
        title = "Redress API",
        version = "0.1.0",
        description = "Multi-tenant AI refund triage: chat widget, claim processing, payout queue and a live admin dashboard.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Company", description = "Tenant profile lookup and onboarding"),
        (name = "Transaction", description = "Order ingestion"),
        (name = "Chat", description = "Support widget chat and evidence uploads"),
        (name = "Admin", description = "Login, pending work and manual transitions"),
        (name = "Dashboard", description = "Live statistics for the admin dashboard"),
    ),
    components(
        schemas(
            // Company
            CompanyProfile,
            RegisterCompanyRequest,
            RegisterCompanyResponse,
            LoginRequest,
            UpdatePolicyRequest,
            // Transaction
            CreateTransactionRequest,
            TransactionResponse,
            // Chat
            ChatTurn,
            ChatRequest,
            ChatResponse,
            // Admin
            ClaimView,
            EscalationView,
            PayoutView,
            PendingWorkResponse,
            UpdateStatusRequest,
            // Dashboard
            StatsSnapshot,
            DashboardMessage,
        )
    ),
)]
pub struct ApiDoc;
