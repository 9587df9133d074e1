// src/bridge/registry.rs
// Registration table for the operations the host exposes to the hosted
// web content. Dispatch never lets an error or panic cross the boundary;
// the caller always gets a result.
use async_trait::async_trait;
use dashmap::DashMap;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, warn};

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("unknown bridge operation: {0}")]
    UnknownOperation(String),

    #[error(transparent)]
    Surface(#[from] crate::surface::SurfaceError),
}

/// Outcome handed back across the bridge: no payload on success, a
/// human-readable reason on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeResult {
    Success,
    Failure(String),
}

impl BridgeResult {
    pub fn is_success(&self) -> bool {
        matches!(self, BridgeResult::Success)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            BridgeResult::Success => None,
            BridgeResult::Failure(reason) => Some(reason),
        }
    }
}

/// A named, zero-argument operation invokable from the hosted content.
#[async_trait]
pub trait BridgeOperation: Send + Sync {
    fn name(&self) -> &'static str;

    async fn invoke(&self) -> Result<(), BridgeError>;
}

pub struct BridgeRegistry {
    operations: DashMap<&'static str, Arc<dyn BridgeOperation>>,
}

impl BridgeRegistry {
    pub fn new() -> Self {
        Self {
            operations: DashMap::new(),
        }
    }

    /// Register an operation under its own name. Re-registering a name
    /// replaces the previous handler.
    pub fn register(&self, operation: Arc<dyn BridgeOperation>) {
        let name = operation.name();
        if self.operations.insert(name, operation).is_some() {
            warn!("Bridge operation {} re-registered, replacing handler", name);
        }
    }

    pub fn operation_names(&self) -> Vec<&'static str> {
        self.operations.iter().map(|entry| *entry.key()).collect()
    }

    /// Dispatch an operation by name on behalf of the hosted content.
    pub async fn dispatch(&self, name: &str) -> BridgeResult {
        // Clone the handler out so no table lock is held across the await.
        let operation = match self.operations.get(name) {
            Some(entry) => entry.value().clone(),
            None => {
                warn!("Bridge dispatch for unknown operation: {}", name);
                return BridgeResult::Failure(
                    BridgeError::UnknownOperation(name.to_string()).to_string(),
                );
            }
        };

        match AssertUnwindSafe(operation.invoke()).catch_unwind().await {
            Ok(Ok(())) => BridgeResult::Success,
            Ok(Err(e)) => {
                error!("Bridge operation {} failed: {}", name, e);
                BridgeResult::Failure(e.to_string())
            }
            Err(_) => {
                error!("Bridge operation {} panicked", name);
                BridgeResult::Failure(format!("operation {name} panicked"))
            }
        }
    }
}

impl Default for BridgeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
