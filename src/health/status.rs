// src/health/status.rs
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Response body of the backend health endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub server: String,
}

/// Outcome of the single startup check. Overwritten wholesale if another
/// check is ever requested; nothing downstream keys off it.
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub reachable: bool,
    pub server: Option<String>,
    pub response_time_ms: u64,
    pub error: Option<String>,
    pub checked_at: DateTime<Utc>,
}
