// src/bridge/input.rs
// The two operations the hosted front-end calls to get form inputs working
// inside the embedded view.
use crate::bridge::registry::{BridgeError, BridgeOperation, BridgeRegistry};
use crate::surface::{SurfaceHandle, SurfaceSettings};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Script submitted by forceEnableInputs. Strips disabled/readonly
/// attributes and pointer-event blocks from form elements; makes no
/// attempt to distinguish fields that should stay disabled.
pub const FORCE_ENABLE_SCRIPT: &str = r#"(function () {
  var fields = document.querySelectorAll('input, textarea, select, button');
  for (var i = 0; i < fields.length; i++) {
    fields[i].removeAttribute('disabled');
    fields[i].removeAttribute('readonly');
    fields[i].style.pointerEvents = 'auto';
  }
})();"#;

/// Applies the interaction-enabling settings block to the surface.
/// Idempotent; safe to call from the hosted content at any point after
/// the embedded view exists.
pub struct ConfigureForInputs {
    surface: SurfaceHandle,
}

impl ConfigureForInputs {
    pub fn new(surface: SurfaceHandle) -> Self {
        Self { surface }
    }
}

#[async_trait]
impl BridgeOperation for ConfigureForInputs {
    fn name(&self) -> &'static str {
        "configureForInputs"
    }

    async fn invoke(&self) -> Result<(), BridgeError> {
        let applied = self
            .surface
            .apply_settings(SurfaceSettings::interactive())
            .await?;
        info!(
            "Surface configured for inputs (javascript={}, dom_storage={})",
            applied.javascript_enabled, applied.dom_storage_enabled
        );
        Ok(())
    }
}

/// Re-enables form fields the front-end left inert by pushing
/// [`FORCE_ENABLE_SCRIPT`] into the page.
pub struct ForceEnableInputs {
    surface: SurfaceHandle,
}

impl ForceEnableInputs {
    pub fn new(surface: SurfaceHandle) -> Self {
        Self { surface }
    }
}

#[async_trait]
impl BridgeOperation for ForceEnableInputs {
    fn name(&self) -> &'static str {
        "forceEnableInputs"
    }

    async fn invoke(&self) -> Result<(), BridgeError> {
        self.surface.submit_script(FORCE_ENABLE_SCRIPT).await?;
        info!("Force-enabled form inputs in hosted content");
        Ok(())
    }
}

/// Register both input operations against the given surface.
pub fn register_input_operations(registry: &BridgeRegistry, surface: &SurfaceHandle) {
    registry.register(Arc::new(ConfigureForInputs::new(surface.clone())));
    registry.register(Arc::new(ForceEnableInputs::new(surface.clone())));
}
