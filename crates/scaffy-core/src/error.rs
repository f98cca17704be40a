//! Unified error handling for Scaffy Core.
//!
//! [`ScaffoldError`] is the single error returned by
//! [`ScaffoldService::scaffold`](crate::application::ScaffoldService::scaffold).
//! It separates the four outcomes a caller has to tell apart:
//!
//! | Variant                  | Side effects left behind             |
//! |--------------------------|--------------------------------------|
//! | `DirectoryAlreadyExists` | none                                 |
//! | `NotADirectory`          | none                                 |
//! | `Inspect`                | none                                 |
//! | `CreateDirectory`        | possibly a partial directory chain   |
//! | `Generation`             | rolled back, or listed as failures   |

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::application::{Cancelled, RenderError};

/// Root error type for a scaffold call.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The target directory exists and `force` was not set.
    #[error("target directory already exists: {}", path.display())]
    DirectoryAlreadyExists { path: PathBuf },

    /// Something other than a directory occupies the target path.
    #[error("path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// Checking the target path failed for a reason other than absence.
    #[error("failed to check directory {}: {source}", path.display())]
    Inspect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The target directory could not be created.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// One or more generation units failed; rollback was attempted.
    #[error(transparent)]
    Generation(#[from] GenerationFailure),
}

impl ScaffoldError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DirectoryAlreadyExists { path } => vec![
                format!("The directory '{}' already exists", path.display()),
                "Use --force to reuse it".into(),
                "Choose a different project name".into(),
            ],
            Self::NotADirectory { path } => vec![
                format!("'{}' is a file, not a directory", path.display()),
                "Choose a different project name or output directory".into(),
            ],
            Self::Inspect { path, .. } | Self::CreateDirectory { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::Generation(failure) => failure.suggestions(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DirectoryAlreadyExists { .. } | Self::NotADirectory { .. } => {
                ErrorCategory::Validation
            }
            Self::Inspect { .. } | Self::CreateDirectory { .. } => ErrorCategory::Internal,
            Self::Generation(failure) => failure.category(),
        }
    }

    /// `true` for a pre-existing target directory without `force`.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::DirectoryAlreadyExists { .. })
    }

    /// The composite failure, if generation ran.
    pub fn generation(&self) -> Option<&GenerationFailure> {
        match self {
            Self::Generation(failure) => Some(failure),
            _ => None,
        }
    }
}

// ── Generation units ──────────────────────────────────────────────────────────

/// Why one language's render-and-write unit failed.
#[derive(Debug, Error)]
pub enum UnitError {
    #[error("{language}: {reason}")]
    Cancelled { language: String, reason: Cancelled },

    #[error("{language}: {source}")]
    Render {
        language: String,
        #[source]
        source: RenderError,
    },

    #[error("{language}: failed to write {}: {source}", path.display())]
    Write {
        language: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{language}: generation panicked: {message}")]
    Panicked { language: String, message: String },
}

impl UnitError {
    pub fn language(&self) -> &str {
        match self {
            Self::Cancelled { language, .. }
            | Self::Render { language, .. }
            | Self::Write { language, .. }
            | Self::Panicked { language, .. } => language,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// One cleanup step that did not succeed.
#[derive(Debug)]
pub struct RollbackFailure {
    pub path: PathBuf,
    pub source: io::Error,
}

impl RollbackFailure {
    pub fn new(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for RollbackFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.source)
    }
}

// ── Composite ─────────────────────────────────────────────────────────────────

const JOIN: &str = "; ";

/// Every unit error of a failed scaffold plus whatever cleanup could not be
/// done. Generation errors are never hidden by rollback failures.
#[derive(Debug)]
pub struct GenerationFailure {
    errors: Vec<UnitError>,
    rollback_failures: Vec<RollbackFailure>,
}

impl GenerationFailure {
    pub fn new(errors: Vec<UnitError>, rollback_failures: Vec<RollbackFailure>) -> Self {
        Self {
            errors,
            rollback_failures,
        }
    }

    pub fn errors(&self) -> &[UnitError] {
        &self.errors
    }

    pub fn rollback_failures(&self) -> &[RollbackFailure] {
        &self.rollback_failures
    }

    /// `true` when every artefact this call created has been removed.
    pub fn rollback_succeeded(&self) -> bool {
        self.rollback_failures.is_empty()
    }

    /// `true` when at least one unit stopped because of cancellation.
    pub fn was_cancelled(&self) -> bool {
        self.errors.iter().any(UnitError::is_cancelled)
    }

    pub fn suggestions(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .errors
            .iter()
            .filter_map(|e| match e {
                UnitError::Render { source, .. } => Some(source.suggestions()),
                _ => None,
            })
            .flatten()
            .collect();

        if self.was_cancelled() {
            out.push("Generation was cancelled or timed out; run it again".into());
        }
        if !self.rollback_succeeded() {
            out.push("Some generated files could not be removed; delete them manually:".into());
            out.extend(
                self.rollback_failures
                    .iter()
                    .map(|f| format!("  • {}", f.path.display())),
            );
        }
        if out.is_empty() {
            out.push("Check the error details above".into());
        }
        out.dedup();
        out
    }

    pub fn category(&self) -> ErrorCategory {
        let all_missing_templates = !self.errors.is_empty()
            && self.errors.iter().all(|e| {
                matches!(
                    e,
                    UnitError::Render {
                        source: RenderError::TemplateNotFound { .. },
                        ..
                    }
                )
            });
        if all_missing_templates {
            ErrorCategory::NotFound
        } else {
            ErrorCategory::Internal
        }
    }

    fn joined_errors(&self) -> String {
        join(&self.errors)
    }
}

impl fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rollback_failures.is_empty() {
            write!(
                f,
                "failed to scaffold boilerplate with {} error(s): {}, all created files have been cleaned up",
                self.errors.len(),
                self.joined_errors()
            )
        } else {
            write!(
                f,
                "scaffolding failed with {} error(s) and rollback had {} failure(s): {}; rollback failures: {}",
                self.errors.len(),
                self.rollback_failures.len(),
                self.joined_errors(),
                join(&self.rollback_failures)
            )
        }
    }
}

impl std::error::Error for GenerationFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.errors
            .first()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(JOIN)
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}

/// Convenient result type alias.
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;
