//! Redress Domain Library
//!
//! Core domain types and interfaces for the Redress refund-triage system.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Company, Transaction, RefundRequest,
//!     PayoutEntry, Escalation)
//!   - `value_objects/`: Immutable value types (status enums, DecisionAction)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `services/`: External service interfaces (LLM provider)
//!
//! # Usage
//!
//! ```rust,ignore
//! use redress::domain::{Company, Transaction, RefundRequest};
//! use redress::ports::{CompanyRepository, LlmProvider};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    AiAnalysis, ClaimStatus, Company, DecisionAction, DomainError, Escalation, EscalationStatus,
    PayoutEntry, PayoutStatus, RefundRequest, Transaction, TransactionStatus,
};
pub use ports::{
    ChatMessage,
    ClaimRepository,
    CompanyRepository,
    CompletionOptions,
    CompletionResponse,
    EscalationRepository,
    ImageData,
    // LLM provider port
    LlmProvider,
    MessageRole,
    PayoutRepository,
    TokenUsage,
    // Repositories
    TransactionRepository,
};
