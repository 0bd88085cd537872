//! Gemini implementation of LlmProvider
//!
//! Talks to the generateContent REST API. Text chat and inline-image
//! analysis share one request shape; system text rides in
//! `systemInstruction`.

use async_trait::async_trait;
use base64::Engine;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use redress::{
    ChatMessage, CompletionOptions, CompletionResponse, DomainError, ImageData, LlmProvider,
    MessageRole, TokenUsage,
};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Gemini-backed LLM provider.
#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    /// Creates a new provider using the provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Overrides the Gemini model name if needed.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    async fn generate(&self, request: &GenerateContentRequest) -> Result<Value, DomainError> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| DomainError::ExternalService(format!("Request failed: {}", err)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body));
        }

        response
            .json()
            .await
            .map_err(|err| DomainError::ExternalService(format!("Parse error: {}", err)))
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();

        for message in messages {
            match message.role {
                MessageRole::System => system_parts.push(Part::text(&message.content)),
                MessageRole::User => contents.push(Content {
                    role: "user".to_string(),
                    parts: vec![Part::text(&message.content)],
                }),
                MessageRole::Assistant => contents.push(Content {
                    role: "model".to_string(),
                    parts: vec![Part::text(&message.content)],
                }),
            }
        }

        let request = GenerateContentRequest {
            system_instruction: (!system_parts.is_empty()).then(|| SystemInstruction {
                parts: system_parts,
            }),
            contents,
            generation_config: Some(GenerationConfig {
                max_output_tokens: options.max_tokens,
                temperature: options.temperature,
            }),
        };

        let payload = self.generate(&request).await?;

        let content = extract_answer(&payload).ok_or_else(|| {
            DomainError::ExternalService("Gemini returned no answer".to_string())
        })?;

        Ok(CompletionResponse {
            content,
            model: self.model.clone(),
            usage: extract_usage(&payload),
        })
    }

    async fn describe_image(
        &self,
        image: &ImageData,
        prompt: &str,
    ) -> Result<String, DomainError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&image.bytes);

        let request = GenerateContentRequest {
            system_instruction: None,
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part::text(prompt),
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: image.mime_type.clone(),
                            data: encoded,
                        }),
                    },
                ],
            }],
            generation_config: None,
        };

        let payload = self.generate(&request).await?;

        extract_answer(&payload)
            .ok_or_else(|| DomainError::ExternalService("Gemini returned no answer".to_string()))
    }

    fn provider_name(&self) -> &str {
        "google"
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// ============================================
// Request Types
// ============================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(content: impl Into<String>) -> Self {
        Self {
            text: Some(content.into()),
            inline_data: None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

// ============================================
// Helper Functions
// ============================================

fn extract_answer(root: &Value) -> Option<String> {
    let candidates = root.get("candidates")?.as_array()?;

    let mut collected = Vec::new();
    for candidate in candidates {
        if let Some(parts) = candidate
            .get("content")
            .and_then(|content| content.get("parts"))
            .and_then(|parts| parts.as_array())
        {
            for part in parts {
                if let Some(text) = part.get("text").and_then(|t| t.as_str()) {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        collected.push(trimmed.to_string());
                    }
                }
            }
        }
    }

    if collected.is_empty() {
        None
    } else {
        Some(collected.join("\n\n"))
    }
}

fn extract_usage(root: &Value) -> TokenUsage {
    let metadata = match root.get("usageMetadata") {
        Some(value) => value,
        None => return TokenUsage::default(),
    };

    let count = |key: &str| {
        metadata
            .get(key)
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as u32
    };

    TokenUsage {
        prompt_tokens: count("promptTokenCount"),
        completion_tokens: count("candidatesTokenCount"),
        total_tokens: count("totalTokenCount"),
    }
}

fn map_http_error(status: StatusCode, body: String) -> DomainError {
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message"))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or(body);

    if status == StatusCode::TOO_MANY_REQUESTS {
        return DomainError::ExternalService("Rate limited".to_string());
    }

    DomainError::ExternalService(format!("API error ({}): {}", status.as_u16(), message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_answer_joins_parts() {
        let payload = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "Thanks for the photo."},
                        {"text": "Processing your refund now."}
                    ]
                }
            }]
        });
        assert_eq!(
            extract_answer(&payload).unwrap(),
            "Thanks for the photo.\n\nProcessing your refund now."
        );
    }

    #[test]
    fn test_extract_answer_empty_candidates() {
        assert!(extract_answer(&json!({"candidates": []})).is_none());
        assert!(extract_answer(&json!({})).is_none());
    }

    #[test]
    fn test_extract_usage() {
        let payload = json!({
            "usageMetadata": {
                "promptTokenCount": 120,
                "candidatesTokenCount": 40,
                "totalTokenCount": 160
            }
        });
        let usage = extract_usage(&payload);
        assert_eq!(usage.prompt_tokens, 120);
        assert_eq!(usage.completion_tokens, 40);
        assert_eq!(usage.total_tokens, 160);
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GenerateContentRequest {
            system_instruction: Some(SystemInstruction {
                parts: vec![Part::text("be helpful")],
            }),
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part::text("hello")],
            }],
            generation_config: Some(GenerationConfig {
                max_output_tokens: Some(2048),
                temperature: Some(0.7),
            }),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("systemInstruction").is_some());
        assert!(json["generationConfig"].get("maxOutputTokens").is_some());
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }
}
