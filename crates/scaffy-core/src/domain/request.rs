//! The value a caller hands to the scaffolding engine.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One scaffold invocation, immutable for the duration of the call.
///
/// `name` doubles as the project sub-directory and as the base file name of
/// every generated file, so `{name: "myapp", languages: {"go": "go"}}` yields
/// `<output_dir>/myapp/myapp.go`.
///
/// The engine trusts `name` and `output_dir`; the caller is expected to run
/// them through [`crate::domain::validation`] first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldRequest {
    /// Project identifier (directory name and file stem).
    pub name: String,
    /// Base directory under which `name/` is created.
    pub output_dir: PathBuf,
    /// Language identifier → file extension (without the leading dot).
    ///
    /// A `BTreeMap` so iteration, and therefore error reporting, follows
    /// ascending key order.
    pub languages: BTreeMap<String, String>,
    /// Reuse an already existing target directory instead of failing.
    pub force: bool,
}

impl ScaffoldRequest {
    /// Create a request with no languages and `force` off.
    pub fn new(name: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            output_dir: output_dir.into(),
            languages: BTreeMap::new(),
            force: false,
        }
    }

    /// Add (or replace) one language entry.
    pub fn with_language(mut self, language: impl Into<String>, extension: impl Into<String>) -> Self {
        self.languages.insert(language.into(), extension.into());
        self
    }

    /// Replace the whole language map.
    pub fn with_languages<I, K, V>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.languages = languages
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// `output_dir/name`.
    pub fn target_dir(&self) -> PathBuf {
        self.output_dir.join(&self.name)
    }

    /// Path of the file generated for `extension` inside `target_dir`.
    pub fn file_path(&self, target_dir: &Path, extension: &str) -> PathBuf {
        target_dir.join(format!("{}.{}", self.name, extension))
    }
}
