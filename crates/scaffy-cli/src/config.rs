//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags ([`ConfigOverrides`], applied by the command handlers)
//! 2. Environment variables (`SCAFFY_AUTHOR`, `SCAFFY_LOG_LEVEL`,
//!    `SCAFFY_OUTPUT_DIR`, `SCAFFY_TEMPLATES_DIR`)
//! 3. Config file (`--config`, else `./scaffy.json`, else the global file)
//! 4. Built-in defaults (always present)
//!
//! A relative `templates_dir` read from a config file is resolved against
//! that file's directory. From the environment or a flag it is relative to
//! the working directory, as is `output_dir` in every layer.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use scaffy_core::domain::validation::{MAX_NAME_LENGTH, exceeds_max_length, is_blank};

/// File name used for both the local and the global config file.
pub const CONFIG_FILE_NAME: &str = "scaffy.json";

pub const ENV_PREFIX: &str = "SCAFFY";

/// Keys that may come from the environment. `languages` is file-only.
const ENV_KEYS: [&str; 4] = ["author", "log_level", "output_dir", "templates_dir"];

pub const LOG_LEVELS: [&str; 4] = ["debug", "info", "warn", "error"];

pub const DEFAULT_LOG_LEVEL: &str = "error";

/// Errors raised while loading, validating or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid config: {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("could not determine the user configuration directory")]
    NoConfigDir,

    #[error("config already exists: {}", path.display())]
    Exists { path: PathBuf },

    #[error("failed to serialise config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Author name substituted into templates.
    pub author: String,
    /// Language key → file extension.
    pub languages: BTreeMap<String, String>,
    /// One of [`LOG_LEVELS`].
    pub log_level: String,
    /// Directory in which new projects are created.
    pub output_dir: PathBuf,
    /// Custom template directory; empty selects the built-in templates.
    pub templates_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            author: String::new(),
            languages: default_languages(),
            log_level: DEFAULT_LOG_LEVEL.into(),
            output_dir: PathBuf::from("."),
            templates_dir: PathBuf::new(),
        }
    }
}

pub fn default_languages() -> BTreeMap<String, String> {
    [("go", "go"), ("c", "c"), ("python", "py"), ("javascript", "js")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Per-invocation values taken from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub author: Option<String>,
    pub languages: Option<BTreeMap<String, String>>,
    pub log_level: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub templates_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from file and the process environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::load_with_env(config_file, &env)
    }

    /// Load configuration using `env` in place of the process environment.
    pub fn load_with_env(
        config_file: Option<&Path>,
        env: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let file = match config_file {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover(),
        };

        let mut builder = Config::builder();
        if let Some(path) = &file {
            debug!(path = %path.display(), "reading config file");
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Json));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(false)
                .source(Some(scaffy_env(env))),
        );

        let mut cfg: Self = builder.build()?.try_deserialize()?;
        let from_env = env.contains_key(&format!("{ENV_PREFIX}_TEMPLATES_DIR"));
        if let Some(path) = file.as_deref().filter(|_| !from_env) {
            cfg.resolve_templates_dir(path);
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// First existing file of `./scaffy.json` and the global config file.
    pub fn discover() -> Option<PathBuf> {
        std::iter::once(PathBuf::from(CONFIG_FILE_NAME))
            .chain(Self::config_path())
            .find(|p| p.is_file())
    }

    /// Path to the global configuration file.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "scaffy")
            .map(|d| d.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Apply command-line overrides, then re-validate.
    pub fn apply(&mut self, overrides: &ConfigOverrides) -> Result<(), ConfigError> {
        if let Some(author) = &overrides.author {
            self.author.clone_from(author);
        }
        if let Some(languages) = &overrides.languages {
            self.languages.clone_from(languages);
        }
        if let Some(level) = &overrides.log_level {
            self.log_level.clone_from(level);
        }
        if let Some(dir) = &overrides.output_dir {
            self.output_dir.clone_from(dir);
        }
        if let Some(dir) = &overrides.templates_dir {
            self.templates_dir.clone_from(dir);
        }
        self.validate()
    }

    /// Check every field, normalising in place.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.log_level = self.log_level.trim().to_lowercase();
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::invalid(
                "log_level",
                format!(
                    "'{}' is not one of {}",
                    self.log_level,
                    LOG_LEVELS.join(", ")
                ),
            ));
        }

        if !self.author.is_empty() && is_blank(&self.author) {
            return Err(ConfigError::invalid("author", "must not be only whitespace"));
        }
        if exceeds_max_length(&self.author) {
            return Err(ConfigError::invalid(
                "author",
                format!("exceeds {MAX_NAME_LENGTH} characters"),
            ));
        }

        if self.languages.is_empty() {
            return Err(ConfigError::invalid("languages", "at least one language is required"));
        }
        let mut normalised = BTreeMap::new();
        for (key, ext) in &self.languages {
            let key = key.trim().to_lowercase();
            let ext = ext.trim().to_lowercase();
            if key.is_empty() {
                return Err(ConfigError::invalid("languages", "language cannot be empty"));
            }
            if ext.is_empty() {
                return Err(ConfigError::invalid(
                    "languages",
                    format!("file extension for '{key}' cannot be empty"),
                ));
            }
            if exceeds_max_length(&key) || exceeds_max_length(&ext) {
                return Err(ConfigError::invalid(
                    "languages",
                    format!("'{key}' exceeds {MAX_NAME_LENGTH} characters"),
                ));
            }
            normalised.insert(key, ext);
        }
        self.languages = normalised;

        if is_blank(&self.output_dir.to_string_lossy()) {
            return Err(ConfigError::invalid("output_dir", "cannot be empty"));
        }

        if let Some(dir) = self.templates_dir() {
            if !dir.is_dir() {
                return Err(ConfigError::invalid(
                    "templates_dir",
                    format!("'{}' is not a directory", dir.display()),
                ));
            }
        }

        Ok(())
    }

    /// Anchor a relative `templates_dir` at the directory of `config_file`.
    fn resolve_templates_dir(&mut self, config_file: &Path) {
        let Some(base) = config_file.parent() else {
            return;
        };
        if self.templates_dir().is_some_and(Path::is_relative) {
            self.templates_dir = base.join(&self.templates_dir);
        }
    }

    /// The custom template directory, if one is configured.
    pub fn templates_dir(&self) -> Option<&Path> {
        (!is_blank(&self.templates_dir.to_string_lossy())).then_some(self.templates_dir.as_path())
    }

    /// Validate and write as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path, overwrite: bool) -> Result<(), ConfigError> {
        let mut cfg = self.clone();
        cfg.validate()?;

        if path.exists() && !overwrite {
            return Err(ConfigError::Exists {
                path: path.to_path_buf(),
            });
        }

        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut json = serde_json::to_string_pretty(&cfg)?;
        json.push('\n');
        fs::write(path, json).map_err(io_err)?;

        debug!(path = %path.display(), "config saved");
        Ok(())
    }
}

/// The subset of `env` the config layer may read.
fn scaffy_env(env: &HashMap<String, String>) -> config::Map<String, String> {
    ENV_KEYS
        .iter()
        .filter_map(|key| {
            let var = format!("{ENV_PREFIX}_{}", key.to_uppercase());
            env.get(&var).map(|value| (var, value.clone()))
        })
        .collect()
}
