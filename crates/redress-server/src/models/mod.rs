//! Redress API Models
//!
//! Request/response DTOs per surface:
//! - Company: tenant profile, onboarding, login
//! - Transaction: order ingestion
//! - Chat: widget chat/upload payloads
//! - Admin: pending-work views and status transitions
//! - Dashboard: push channel message shapes

mod admin;
mod chat;
mod company;
mod dashboard;
mod transaction;

pub use admin::*;
pub use chat::*;
pub use company::*;
pub use dashboard::*;
pub use transaction::*;
