//! Scaffy Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Scaffy
//! boilerplate generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           scaffy-cli (CLI)              │
//! │   (resolves config into a request)      │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (ScaffoldService)            │
//! │   prepare dir → fan-out → rollback      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │     (Filesystem, TemplateRenderer)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     scaffy-adapters (Infrastructure)    │
//! │ (LocalFilesystem, TemplateManager, ...) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scaffy_core::prelude::*;
//!
//! let service = ScaffoldService::new(renderer, filesystem);
//! let request = ScaffoldRequest::new("myapp", "./out")
//!     .with_language("go", "go");
//!
//! service.scaffold(&CancellationToken::new(), &request)?;
//! ```

pub mod application;
pub mod domain;
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CancellationToken, Cancelled, RenderError, ScaffoldService,
        ports::{EntryKind, Filesystem, TemplateRenderer},
    };
    pub use crate::domain::{ScaffoldRequest, validation};
    pub use crate::error::{
        ErrorCategory, GenerationFailure, RollbackFailure, ScaffoldError, ScaffoldResult,
        UnitError,
    };
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
