//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `scaffy-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: directory and file primitives, used for both writing and rollback
//!   - `TemplateRenderer`: language key → rendered bytes

pub mod output;

pub use output::{EntryKind, Filesystem, TemplateRenderer};

#[cfg(test)]
pub use output::{MockFilesystem, MockTemplateRenderer};
