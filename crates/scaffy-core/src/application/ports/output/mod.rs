//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `scaffy-adapters` crate provides implementations.

use std::io;
use std::path::{Path, PathBuf};

use crate::application::RenderError;

/// What a path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    Other,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `scaffy_adapters::filesystem::LocalFilesystem` (production)
/// - `scaffy_adapters::filesystem::FaultyFilesystem` (testing, injects failures)
///
/// ## Design Notes
///
/// - Every method reports failures as `io::Error`; a missing path must surface
///   as `io::ErrorKind::NotFound` so callers can tell "absent" from "broken".
/// - Implementations are shared across generation threads, hence `Send + Sync`.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Describe what exists at `path`.
    fn stat(&self, path: &Path) -> io::Result<EntryKind>;

    /// Create a directory and all parent directories. Succeeds if it exists.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Write `contents` to `path`, creating or truncating it, with Unix
    /// permission bits `mode` where the platform supports them.
    fn write_file(&self, path: &Path, contents: &[u8], mode: u32) -> io::Result<()>;

    /// Remove a single file or an empty directory.
    fn remove(&self, path: &Path) -> io::Result<()>;

    /// Remove a directory and everything below it.
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    /// List the entries directly inside `path`.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `scaffy_adapters::renderer::TemplateManager` (embedded + user directory)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render the template registered for `language`.
    fn render(&self, language: &str) -> Result<Vec<u8>, RenderError>;
}
