//! Deployment-wide Admin API Key Gate (Bearer Token)
//!
//! Optional coarse gate in front of the admin management surface. Tenant
//! identity itself is established by the bcrypt login endpoint; this key
//! just keeps the management API off the open internet when configured.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};

/// Admin API key from environment
static ADMIN_API_KEY: std::sync::OnceLock<String> = std::sync::OnceLock::new();

/// Initialize the admin API key
pub fn init_admin_api_key(key: String) {
    let _ = ADMIN_API_KEY.set(key);
}

/// Get the admin API key
fn get_admin_api_key() -> Option<&'static str> {
    ADMIN_API_KEY.get().map(|s| s.as_str())
}

/// Admin gate middleware
/// Validates Bearer token against the admin API key
pub async fn admin_gate(request: Request, next: Next) -> Result<Response, StatusCode> {
    // Get admin API key
    let api_key = match get_admin_api_key() {
        Some(key) if !key.is_empty() => key,
        _ => {
            // No key configured = gate disabled (for development)
            return Ok(next.run(request).await);
        }
    };

    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match auth_header {
        Some(header) if header.starts_with("Bearer ") => {
            let token = &header[7..]; // Remove "Bearer " prefix
            if token == api_key {
                Ok(next.run(request).await)
            } else {
                tracing::warn!("Invalid admin API key attempted");
                Err(StatusCode::UNAUTHORIZED)
            }
        }
        Some(_) => {
            tracing::warn!("Invalid Authorization header format");
            Err(StatusCode::UNAUTHORIZED)
        }
        None => {
            tracing::warn!("Missing Authorization header");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
