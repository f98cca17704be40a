//! Errors raised by port implementations.
//!
//! Filesystem ports speak `std::io::Error` directly (so "not found" stays
//! distinguishable through `ErrorKind::NotFound`); template rendering has its
//! own taxonomy here.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Failure to turn a language key into rendered file content.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No template exists for this language (embedded set or user directory).
    #[error("no template found for language '{language}'")]
    TemplateNotFound { language: String },

    /// The template exists but does not parse.
    #[error("template '{template}' is invalid: {message}")]
    Syntax { template: String, message: String },

    /// The template parsed but failed while rendering.
    #[error("failed to render template '{template}': {message}")]
    Execution { template: String, message: String },

    /// A user template file could not be read.
    #[error("failed to read template {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { language } => vec![
                format!("Add a template named '{language}.tmpl' to your templates directory"),
                "Or remove the language from --lang / the config file".into(),
            ],
            Self::Syntax { template, .. } | Self::Execution { template, .. } => vec![
                format!("Check the syntax of template '{template}'"),
                "Available variables: date, author, url".into(),
            ],
            Self::Io { path, .. } => vec![format!(
                "Check that {} is readable",
                path.display()
            )],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::Syntax { .. } | Self::Execution { .. } => ErrorCategory::Validation,
            Self::Io { .. } => ErrorCategory::Internal,
        }
    }
}
