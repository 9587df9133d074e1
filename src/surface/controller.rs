// src/surface/controller.rs
// Host-side state of the embedded rendering surface. The rendering engine
// behind it is an external collaborator; the host only owns the settings
// block and the queue of scripts submitted into the page.

/// Interaction settings of the embedded surface. Re-applying a block the
/// surface already carries is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceSettings {
    pub javascript_enabled: bool,
    pub dom_storage_enabled: bool,
    pub focusable: bool,
    pub focusable_in_touch_mode: bool,
}

impl SurfaceSettings {
    /// The fixed interaction-enabling block applied so form inputs inside
    /// the hosted content accept focus and touch.
    pub fn interactive() -> Self {
        Self {
            javascript_enabled: true,
            dom_storage_enabled: true,
            focusable: true,
            focusable_in_touch_mode: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct WebViewSurface {
    settings: SurfaceSettings,
    script_log: Vec<String>,
}

impl WebViewSurface {
    pub fn new() -> Self {
        // A freshly created view starts locked down until configured.
        Self::default()
    }

    /// Apply an interaction settings block and return the resulting state.
    pub fn apply_settings(&mut self, settings: SurfaceSettings) -> SurfaceSettings {
        self.settings = settings;
        self.settings
    }

    /// Queue a script for evaluation in the hosted content's execution
    /// context. The engine drains this in submission order.
    pub fn submit_script(&mut self, script: String) {
        self.script_log.push(script);
    }

    pub fn settings(&self) -> SurfaceSettings {
        self.settings
    }

    pub fn snapshot(&self) -> SurfaceSnapshot {
        SurfaceSnapshot {
            settings: self.settings,
            scripts: self.script_log.clone(),
        }
    }
}

/// Point-in-time copy of the surface state, safe to hand across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceSnapshot {
    pub settings: SurfaceSettings,
    pub scripts: Vec<String>,
}
