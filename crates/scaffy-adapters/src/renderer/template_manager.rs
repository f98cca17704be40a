//! Per-language source templates rendered with minijinja.
//!
//! Templates are looked up as `<language>.tmpl`, either in a user-supplied
//! directory or in the set embedded into the binary. A configured directory
//! replaces the embedded set entirely; there is no fallback between them.

use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use include_dir::{Dir, include_dir};
use minijinja::{Environment, ErrorKind, UndefinedBehavior};
use serde::Serialize;
use tracing::{debug, instrument};

use scaffy_core::application::{RenderError, ports::TemplateRenderer};

static EMBEDDED: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

const TEMPLATE_EXTENSION: &str = "tmpl";

/// Values substituted into every template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemplateData {
    pub date: String,
    pub author: String,
    pub url: String,
}

impl TemplateData {
    /// Data stamped with today's local date.
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            date: Local::now().format("%d-%m-%Y").to_string(),
            author: author.into(),
            url: String::new(),
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

/// Renders `<language>.tmpl` from the embedded set or a user directory.
#[derive(Debug, Clone)]
pub struct TemplateManager {
    templates_dir: Option<PathBuf>,
    data: TemplateData,
}

impl TemplateManager {
    /// A blank or absent `templates_dir` selects the embedded templates.
    pub fn new(templates_dir: Option<PathBuf>, data: TemplateData) -> Self {
        let templates_dir =
            templates_dir.filter(|dir| !dir.as_os_str().to_string_lossy().trim().is_empty());
        Self {
            templates_dir,
            data,
        }
    }

    /// Manager over the embedded templates only.
    pub fn embedded(data: TemplateData) -> Self {
        Self::new(None, data)
    }

    pub fn templates_dir(&self) -> Option<&Path> {
        self.templates_dir.as_deref()
    }

    /// Language keys with a built-in template, sorted.
    pub fn embedded_languages() -> Vec<&'static str> {
        let mut langs: Vec<_> = EMBEDDED
            .files()
            .filter(|f| {
                f.path()
                    .extension()
                    .is_some_and(|ext| ext == TEMPLATE_EXTENSION)
            })
            .filter_map(|f| f.path().file_stem()?.to_str())
            .collect();
        langs.sort_unstable();
        langs
    }

    fn load_source(&self, language: &str) -> Result<Cow<'static, str>, RenderError> {
        let not_found = || RenderError::TemplateNotFound {
            language: language.to_string(),
        };

        // Keys never address anything outside the template directory.
        if language.is_empty()
            || language == ".."
            || language.contains(['/', '\\'])
        {
            return Err(not_found());
        }

        let file_name = template_name(language);
        match &self.templates_dir {
            Some(dir) => {
                let path = dir.join(&file_name);
                match std::fs::read_to_string(&path) {
                    Ok(source) => Ok(Cow::Owned(source)),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => Err(not_found()),
                    Err(source) => Err(RenderError::Io { path, source }),
                }
            }
            None => EMBEDDED
                .get_file(&file_name)
                .and_then(|f| f.contents_utf8())
                .map(Cow::Borrowed)
                .ok_or_else(not_found),
        }
    }
}

impl TemplateRenderer for TemplateManager {
    #[instrument(skip(self), fields(custom_dir = self.templates_dir.is_some()))]
    fn render(&self, language: &str) -> Result<Vec<u8>, RenderError> {
        let source = self.load_source(language)?;
        let name = template_name(language);

        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);

        let template = env
            .template_from_named_str(&name, &source)
            .map_err(|e| RenderError::Syntax {
                template: name.clone(),
                message: e.to_string(),
            })?;

        let rendered = template.render(&self.data).map_err(|e| {
            if e.kind() == ErrorKind::SyntaxError {
                RenderError::Syntax {
                    template: name.clone(),
                    message: e.to_string(),
                }
            } else {
                RenderError::Execution {
                    template: name.clone(),
                    message: e.to_string(),
                }
            }
        })?;

        debug!(template = %name, bytes = rendered.len(), "template rendered");
        Ok(rendered.into_bytes())
    }
}

fn template_name(language: &str) -> String {
    format!("{language}.{TEMPLATE_EXTENSION}")
}
