// src/config/models.rs
use anyhow::{bail, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
    pub content: ContentConfig,
    #[serde(default)]
    pub messaging: MessagingConfig,
}

/// Backend the startup health check talks to.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub base_url: Url,
    #[serde(default = "default_health_path")]
    pub health_path: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Loopback server that delivers the bundled web front-end to the surface.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    pub web_root: PathBuf,
}

/// Realtime messaging client wiring. The client itself is vendor code
/// injected by the embedder; this only gates whether the shell connects it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessagingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub endpoint: Option<Url>,
}

fn default_health_path() -> String {
    // The deployed backend exposes the check under api/health; the bare
    // "health" path seen in old builds 404s.
    "api/health".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_bind_addr() -> SocketAddr {
    ([127, 0, 0, 1], 8090).into()
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolve the absolute health check URL against the base URL.
    /// Tolerates a missing trailing slash on the base and a leading slash
    /// on the path.
    pub fn health_url(&self) -> Result<Url, url::ParseError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        base.join(self.health_path.trim_start_matches('/'))
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        match self.backend.base_url.scheme() {
            "http" | "https" => {}
            other => bail!("backend.base_url must be http or https, got {other}"),
        }
        if self.backend.base_url.host_str().is_none() {
            bail!("backend.base_url has no host");
        }
        if self.backend.health_path.trim_matches('/').is_empty() {
            bail!("backend.health_path must not be empty");
        }
        if self.backend.request_timeout_secs == 0 {
            bail!("backend.request_timeout_secs must be at least 1");
        }
        if self.content.web_root.as_os_str().is_empty() {
            bail!("content.web_root must point at the bundled front-end");
        }
        if self.messaging.enabled && self.messaging.endpoint.is_none() {
            bail!("messaging.enabled requires messaging.endpoint");
        }
        Ok(())
    }
}
