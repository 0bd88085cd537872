use anyhow::Context;
use axum::{extract::FromRef, middleware, routing::get, Json, Router};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod auth;
mod models;
mod routes;
mod services;
#[cfg(test)]
mod testutil;

use adapters::{
    GeminiProvider, PgClaimRepository, PgCompanyRepository, PgEscalationRepository,
    PgPayoutRepository, PgTransactionRepository,
};
use application::{ClaimService, CompanyService};
use redress::LlmProvider;
use services::events::EventBroadcaster;
use services::stats::{start_stats_ticker, StatsManager};
use services::triage::TriageService;

/// Type aliases for application services with concrete repository implementations
pub type AppCompanyService = CompanyService<PgCompanyRepository>;
pub type AppClaimService = ClaimService<
    PgClaimRepository,
    PgPayoutRepository,
    PgEscalationRepository,
    PgTransactionRepository,
>;
pub type AppTriageService = TriageService<
    PgCompanyRepository,
    PgTransactionRepository,
    PgClaimRepository,
    PgPayoutRepository,
    PgEscalationRepository,
>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub company_service: Arc<AppCompanyService>,
    pub claim_service: Arc<AppClaimService>,
    pub triage: Arc<AppTriageService>,
    pub transactions: Arc<PgTransactionRepository>,
    pub provider: Arc<dyn LlmProvider>,
    pub events: EventBroadcaster,
    pub stats: Arc<StatsManager>,
}

// Allow extracting PgPool directly from AppState
impl FromRef<AppState> for PgPool {
    fn from_ref(state: &AppState) -> PgPool {
        state.pool.clone()
    }
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Redress API is running - claims flow through triage".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    tracing::info!("⚖️  Redress API initializing...");

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let gemini_api_key =
        std::env::var("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?;
    let public_base_url =
        std::env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    // Optional coarse gate for the admin management surface
    if let Ok(admin_key) = std::env::var("ADMIN_API_KEY") {
        auth::init_admin_api_key(admin_key);
        tracing::info!("🔐 Admin API key gate enabled");
    } else {
        tracing::warn!("⚠️  No ADMIN_API_KEY set - admin gate disabled");
    }

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    // Run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("✅ Database migrations completed");

    // Infrastructure adapters
    let company_repo = Arc::new(PgCompanyRepository::new(pool.clone()));
    let transaction_repo = Arc::new(PgTransactionRepository::new(pool.clone()));
    let claim_repo = Arc::new(PgClaimRepository::new(pool.clone()));
    let payout_repo = Arc::new(PgPayoutRepository::new(pool.clone()));
    let escalation_repo = Arc::new(PgEscalationRepository::new(pool.clone()));

    let mut gemini = GeminiProvider::new(gemini_api_key);
    if let Ok(model) = std::env::var("GEMINI_MODEL") {
        gemini = gemini.with_model(model);
    }
    let provider: Arc<dyn LlmProvider> = Arc::new(gemini);
    tracing::info!("🤖 LLM provider initialized ({})", provider.model_id());

    // Dashboard fan-out + rolling stats
    let events = EventBroadcaster::new();
    let stats = Arc::new(StatsManager::new());

    let stats_interval = std::env::var("STATS_PUSH_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(30);
    let _ticker = start_stats_ticker(
        stats.clone(),
        events.clone(),
        Duration::from_secs(stats_interval),
    );

    // Application services
    let company_service = Arc::new(CompanyService::new(
        company_repo.clone(),
        public_base_url.clone(),
    ));
    let claim_service = Arc::new(ClaimService::new(
        claim_repo.clone(),
        payout_repo.clone(),
        escalation_repo.clone(),
        transaction_repo.clone(),
        events.clone(),
    ));
    let triage = Arc::new(TriageService::new(
        company_repo,
        transaction_repo.clone(),
        claim_repo,
        payout_repo,
        escalation_repo,
        provider.clone(),
        events.clone(),
        stats.clone(),
    ));

    // Create application state
    let state = AppState {
        pool,
        company_service,
        claim_service,
        triage,
        transactions: transaction_repo,
        provider,
        events,
        stats,
    };

    // Management routes behind the optional admin gate
    let management_routes = routes::admin::management_router()
        .layer(middleware::from_fn(auth::admin_gate));

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    // Build router with shared state
    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::company::router())
        .merge(routes::transaction::router())
        .merge(routes::chat::router())
        .merge(routes::upload::router())
        .merge(routes::admin::login_router())
        .merge(management_routes)
        .merge(routes::ws::router())
        .merge(routes::pages::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Redress API ready on port {}", port);

    axum::serve(listener, router)
        .await
        .context("Server error")?;

    Ok(())
}
