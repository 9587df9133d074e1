// src/shell/mod.rs
// Lifecycle of the native host: startup wires surface, bridge, content
// server, health check and messaging in order; shutdown unwinds them.
use crate::bridge::{register_input_operations, BridgeRegistry, BridgeResult};
use crate::config::Config;
use crate::health::HealthChecker;
use crate::messaging::{MessagingHandle, RealtimeClient};
use crate::server::{ContentResolver, ContentServer};
use crate::surface::{SurfaceHandle, SurfaceQueue};
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub struct ShellBuilder {
    config: Config,
    realtime_client: Option<Arc<dyn RealtimeClient>>,
}

impl ShellBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            realtime_client: None,
        }
    }

    /// Inject the vendor realtime client. Without one the shell runs
    /// without messaging regardless of configuration.
    pub fn with_realtime_client(mut self, client: Arc<dyn RealtimeClient>) -> Self {
        self.realtime_client = Some(client);
        self
    }

    pub async fn start(self) -> Result<Shell> {
        let ShellBuilder {
            config,
            realtime_client,
        } = self;

        let (surface, surface_task) = SurfaceQueue::spawn();
        surface
            .attach()
            .await
            .context("surface queue died during startup")?;

        let registry = Arc::new(BridgeRegistry::new());
        register_input_operations(&registry, &surface);

        // Interaction settings go on up front, through the same dispatch
        // path the hosted content uses later.
        match registry.dispatch("configureForInputs").await {
            BridgeResult::Success => {}
            BridgeResult::Failure(reason) => {
                warn!("Initial surface configuration failed: {}", reason)
            }
        }

        let resolver = ContentResolver::new(config.content.web_root.clone());
        let (content_addr, content_task) = ContentServer::new(config.content.bind_addr, resolver)
            .spawn()
            .await
            .context("failed to start content server")?;

        // Fire-and-forget: exactly one check, nothing waits on it and
        // nothing re-issues it.
        let checker = Arc::new(HealthChecker::new(config.backend.clone()));
        let probe = checker.clone();
        tokio::spawn(async move {
            probe.check_once().await;
        });

        let messaging = match (realtime_client, config.messaging.enabled) {
            (Some(client), true) => match MessagingHandle::connect(client).await {
                Ok(handle) => Some(handle),
                Err(e) => {
                    warn!("Realtime messaging unavailable: {}", e);
                    None
                }
            },
            (None, true) => {
                warn!("messaging.enabled is set but no realtime client is linked");
                None
            }
            _ => None,
        };

        info!("Shell started, content origin http://{}", content_addr);

        Ok(Shell {
            surface,
            surface_task,
            registry,
            checker,
            messaging,
            content_addr,
            content_task,
        })
    }
}

pub struct Shell {
    surface: SurfaceHandle,
    surface_task: JoinHandle<()>,
    registry: Arc<BridgeRegistry>,
    checker: Arc<HealthChecker>,
    messaging: Option<MessagingHandle>,
    content_addr: SocketAddr,
    content_task: JoinHandle<()>,
}

impl Shell {
    pub fn builder(config: Config) -> ShellBuilder {
        ShellBuilder::new(config)
    }

    /// Operation surface exposed to the hosted content.
    pub fn bridge(&self) -> &BridgeRegistry {
        &self.registry
    }

    pub fn surface(&self) -> &SurfaceHandle {
        &self.surface
    }

    pub fn health(&self) -> &HealthChecker {
        &self.checker
    }

    /// Bound address of the loopback content origin.
    pub fn content_addr(&self) -> SocketAddr {
        self.content_addr
    }

    pub fn has_messaging(&self) -> bool {
        self.messaging.is_some()
    }

    /// Tear down in reverse start order. The messaging disconnect runs at
    /// most once; everything after it is unconditional.
    pub async fn shutdown(self) {
        if let Some(handle) = &self.messaging {
            handle.release().await;
        }

        self.content_task.abort();

        if let Err(e) = self.surface.detach().await {
            warn!("Surface detach skipped: {}", e);
        }

        // Dropping the last handles ends the queue loop.
        drop(self.registry);
        drop(self.surface);
        let _ = self.surface_task.await;

        info!("Shell stopped");
    }
}
