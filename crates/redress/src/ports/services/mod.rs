//! Service Ports
//!
//! Abstract interfaces for external services.

mod llm_provider;

pub use llm_provider::{
    ChatMessage, CompletionOptions, CompletionResponse, ImageData, LlmProvider, MessageRole,
    TokenUsage,
};
