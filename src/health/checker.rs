// src/health/checker.rs
use crate::config::BackendConfig;
use crate::health::status::{HealthReport, HealthStatus};
use arc_swap::ArcSwapOption;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
pub enum HealthCheckError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid health check url: {0}")]
    Url(#[from] url::ParseError),

    #[error("backend returned HTTP {0}")]
    Status(StatusCode),

    #[error("unparsable health body: {0}")]
    Decode(String),
}

/// One-shot reachability probe against the configured backend. Issued
/// exactly once at shell startup; never retried, never awaited by anyone,
/// never allowed to gate initialization.
pub struct HealthChecker {
    config: BackendConfig,
    client: Client,
    last_report: ArcSwapOption<HealthReport>,
}

impl HealthChecker {
    pub fn new(config: BackendConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            client,
            last_report: ArcSwapOption::const_empty(),
        }
    }

    /// The most recent report, if a check has completed.
    pub fn last_report(&self) -> Option<Arc<HealthReport>> {
        self.last_report.load_full()
    }

    /// Issue the health check and record the outcome. Both failure modes
    /// (transport and protocol) end in an error log line and an
    /// unreachable report, nothing more.
    pub async fn check_once(&self) -> Arc<HealthReport> {
        let start = Instant::now();
        let outcome = self.request_status().await;
        let response_time_ms = start.elapsed().as_millis() as u64;

        let report = match outcome {
            Ok(status) => {
                info!(
                    "Backend reachable: server {} reports status {:?} ({} ms)",
                    status.server, status.status, response_time_ms
                );
                HealthReport {
                    reachable: true,
                    server: Some(status.server),
                    response_time_ms,
                    error: None,
                    checked_at: Utc::now(),
                }
            }
            Err(e) => {
                error!("Backend health check failed: {}", e);
                HealthReport {
                    reachable: false,
                    server: None,
                    response_time_ms,
                    error: Some(e.to_string()),
                    checked_at: Utc::now(),
                }
            }
        };

        let report = Arc::new(report);
        self.last_report.store(Some(report.clone()));
        report
    }

    async fn request_status(&self) -> Result<HealthStatus, HealthCheckError> {
        let url = self.config.health_url()?;
        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HealthCheckError::Status(status));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| HealthCheckError::Decode(e.to_string()))
    }
}
