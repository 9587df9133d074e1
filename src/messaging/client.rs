// src/messaging/client.rs
// Lifecycle wrapper for the vendor realtime pub/sub client. The wire
// protocol and reconnection behavior live entirely behind the trait; the
// shell only owns connect-at-startup and release-at-teardown.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum MessagingError {
    #[error("realtime connect failed: {0}")]
    Connect(String),

    #[error("realtime disconnect failed: {0}")]
    Disconnect(String),
}

/// Seam over the third-party realtime client.
#[async_trait]
pub trait RealtimeClient: Send + Sync {
    async fn connect(&self) -> Result<(), MessagingError>;

    async fn disconnect(&self) -> Result<(), MessagingError>;

    fn is_connected(&self) -> bool;
}

/// One explicitly owned client handle: constructed at startup, released at
/// most once at teardown.
pub struct MessagingHandle {
    client: Arc<dyn RealtimeClient>,
    client_id: Uuid,
    connected_at: DateTime<Utc>,
    released: AtomicBool,
}

impl MessagingHandle {
    /// Connect the injected client and take ownership of its lifetime.
    pub async fn connect(client: Arc<dyn RealtimeClient>) -> Result<Self, MessagingError> {
        client.connect().await?;

        let handle = Self {
            client,
            client_id: Uuid::new_v4(),
            connected_at: Utc::now(),
            released: AtomicBool::new(false),
        };
        info!("Realtime messaging connected (client {})", handle.client_id);
        Ok(handle)
    }

    pub fn client_id(&self) -> Uuid {
        self.client_id
    }

    pub fn connected_at(&self) -> DateTime<Utc> {
        self.connected_at
    }

    pub fn is_connected(&self) -> bool {
        self.client.is_connected()
    }

    /// Best-effort disconnect. The first caller performs it; every later
    /// call is a no-op. Failures are logged at warn and swallowed.
    pub async fn release(&self) {
        if self.released.swap(true, Ordering::SeqCst) {
            return;
        }

        match self.client.disconnect().await {
            Ok(()) => info!("Realtime messaging disconnected (client {})", self.client_id),
            Err(e) => warn!("Realtime disconnect failed: {}", e),
        }
    }
}
