//! Dashboard DTOs - Push channel message shapes

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Rolling aggregate statistics rendered for the dashboard header.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatsSnapshot {
    /// Integer percent, e.g. "93%"
    pub resolution: String,
    /// Average handling time, e.g. "1.2s"
    pub avg_time: String,
    /// Satisfaction proxy, e.g. "4.8★"
    pub satisfaction: String,
}

/// A message pushed to connected dashboard viewers.
///
/// Serialized as `{"type":"event",...}` or `{"type":"stats","data":{...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DashboardMessage {
    Event {
        icon: String,
        title: String,
        subtitle: String,
        time: String,
    },
    Stats {
        data: StatsSnapshot,
    },
}
