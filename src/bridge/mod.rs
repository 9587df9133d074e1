// src/bridge/mod.rs
mod input;
mod registry;

pub use input::{register_input_operations, ConfigureForInputs, ForceEnableInputs};
pub use registry::{BridgeError, BridgeOperation, BridgeRegistry, BridgeResult};
