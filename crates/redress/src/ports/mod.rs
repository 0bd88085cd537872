//! Ports - Abstract Interfaces
//!
//! Traits that the infrastructure layer implements:
//! - `repositories/`: persistence interfaces, one per aggregate
//! - `services/`: external service interfaces (LLM provider)

pub mod repositories;
pub mod services;

pub use repositories::{
    ClaimRepository, CompanyRepository, EscalationRepository, PayoutRepository,
    TransactionRepository,
};
pub use services::{
    ChatMessage, CompletionOptions, CompletionResponse, ImageData, LlmProvider, MessageRole,
    TokenUsage,
};
