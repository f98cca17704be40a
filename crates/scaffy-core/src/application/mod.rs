//! Application layer for Scaffy.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (`ScaffoldService`)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Cancellation**: the caller-supplied cancellation/deadline token
//! - **Errors**: errors raised by port implementations
//!
//! The application layer coordinates domain values and ports. It performs no
//! I/O directly; everything goes through a port.

pub mod cancel;
pub mod error;
pub mod ports;
pub mod services;

pub use cancel::{CancellationToken, Cancelled};
pub use error::RenderError;
pub use ports::{EntryKind, Filesystem, TemplateRenderer};
pub use services::ScaffoldService;
