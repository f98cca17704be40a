//! Infrastructure adapters for Scaffy.
//!
//! This crate implements the ports defined in `scaffy-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod renderer;

// Re-export commonly used adapters
pub use filesystem::{FaultOp, FaultyFilesystem, LocalFilesystem};
pub use renderer::{TemplateData, TemplateManager};
