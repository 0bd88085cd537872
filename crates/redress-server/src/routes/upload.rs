//! Upload Routes - Evidence image intake
//!
//! Multipart form: `file` (the image), `message`, `company_id`, optional
//! `customer_ref`. Non-image or oversized payloads are rejected before any
//! AI call or database write.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use uuid::Uuid;

use redress::{ImageData, LlmProvider};

use crate::models::ChatResponse;
use crate::routes::domain_error;
use crate::services::triage::{TriageRequest, FALLBACK_REPLY, IMAGE_ANALYSIS_PROMPT};
use crate::AppState;

/// Hard cap on evidence uploads.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

struct UploadForm {
    image: ImageData,
    file_name: String,
    message: String,
    company_id: Uuid,
    customer_ref: Option<String>,
}

/// Gate an upload before it costs an AI call or a row: images only, 5 MiB cap.
fn validate_upload(content_type: &str, len: usize) -> Result<(), (StatusCode, String)> {
    if !content_type.starts_with("image/") {
        return Err((
            StatusCode::BAD_REQUEST,
            "Only image uploads are accepted".to_string(),
        ));
    }
    if len == 0 {
        return Err((StatusCode::BAD_REQUEST, "Empty image upload".to_string()));
    }
    if len > MAX_UPLOAD_BYTES {
        return Err((
            StatusCode::PAYLOAD_TOO_LARGE,
            "Image exceeds the 5 MiB upload limit".to_string(),
        ));
    }
    Ok(())
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, (StatusCode, String)> {
    let mut image: Option<ImageData> = None;
    let mut file_name = "evidence".to_string();
    let mut message = String::new();
    let mut company_id: Option<Uuid> = None;
    let mut customer_ref: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Malformed upload: {}", e)))?
    {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("file") => {
                let content_type = field.content_type().unwrap_or("").to_string();
                if !content_type.starts_with("image/") {
                    return Err((
                        StatusCode::BAD_REQUEST,
                        "Only image uploads are accepted".to_string(),
                    ));
                }
                if let Some(name) = field.file_name() {
                    file_name = name.to_string();
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, format!("Upload failed: {}", e)))?;
                validate_upload(&content_type, bytes.len())?;
                image = Some(ImageData {
                    bytes: bytes.to_vec(),
                    mime_type: content_type,
                });
            }
            Some("message") => {
                message = field
                    .text()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, format!("Upload failed: {}", e)))?;
            }
            Some("company_id") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, format!("Upload failed: {}", e)))?;
                company_id = Some(raw.parse().map_err(|_| {
                    (StatusCode::BAD_REQUEST, "Invalid company_id".to_string())
                })?);
            }
            Some("customer_ref") => {
                customer_ref = field.text().await.ok();
            }
            _ => {}
        }
    }

    let image = image.ok_or((StatusCode::BAD_REQUEST, "Missing file field".to_string()))?;
    let company_id =
        company_id.ok_or((StatusCode::BAD_REQUEST, "Missing company_id field".to_string()))?;

    Ok(UploadForm {
        image,
        file_name,
        message,
        company_id,
        customer_ref,
    })
}

/// Handle an evidence image plus message from the support widget
#[utoipa::path(
    post,
    path = "/api/upload",
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Non-image or malformed upload"),
        (status = 404, description = "Unknown tenant"),
        (status = 413, description = "Image too large"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Chat"
)]
pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ChatResponse>, (StatusCode, String)> {
    let form = read_form(multipart).await?;

    // Validate the tenant before spending an AI call
    state
        .company_service
        .get(form.company_id)
        .await
        .map_err(domain_error)?
        .ok_or((StatusCode::NOT_FOUND, "Unknown tenant".to_string()))?;

    let analysis = match state
        .provider
        .describe_image(&form.image, IMAGE_ANALYSIS_PROMPT)
        .await
    {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Image analysis failed, degrading to generic reply: {}", e);
            return Ok(Json(ChatResponse {
                reply: FALLBACK_REPLY.to_string(),
            }));
        }
    };

    let rejected = analysis.contains("Verification Failed") || analysis.contains("Failed");
    state.events.event(
        if rejected { "block" } else { "image" },
        "Image Analysis",
        if rejected { "Rejected" } else { "Completed" },
    );

    let evidence_ref = format!("{}-{}", Uuid::new_v4(), form.file_name);

    let outcome = state
        .triage
        .chat(TriageRequest {
            company_id: form.company_id,
            message: form.message,
            history: vec![],
            image_analysis: Some(analysis),
            evidence_ref: Some(evidence_ref),
            customer_ref: form.customer_ref,
        })
        .await
        .map_err(domain_error)?;

    Ok(Json(ChatResponse {
        reply: outcome.reply,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/upload", post(upload))
        // Default axum body limit is below our image cap
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024))
}
