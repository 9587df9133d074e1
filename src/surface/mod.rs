// src/surface/mod.rs
mod controller;
mod queue;

pub use controller::{SurfaceSettings, SurfaceSnapshot, WebViewSurface};
pub use queue::{SurfaceError, SurfaceHandle, SurfaceQueue};
