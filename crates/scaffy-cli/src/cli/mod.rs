//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! and help text.  No business logic lives here.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod global;
pub use global::GlobalArgs;

use crate::config::ConfigOverrides;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "scaffy",
    bin_name = "scaffy",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Boilerplate generator for multi-language projects",
    long_about = "Scaffy creates a project directory with one starter source file \
                  per configured language, rendered from built-in or custom templates.",
    after_help = "EXAMPLES:\n\
        \x20 scaffy new myapp\n\
        \x20 scaffy new myapp --lang go=go,rust=rs --author \"Jane Doe\"\n\
        \x20 scaffy init\n\
        \x20 scaffy config list",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project from templates.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 scaffy new myapp\n\
            \x20 scaffy new myapp --lang python=py --output-dir ~/src\n\
            \x20 scaffy new myapp --force --templates-dir ./my-templates"
    )]
    New(NewArgs),

    /// Write a configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 scaffy init              # ./scaffy.json\n\
            \x20 scaffy init ~/.config/scaffy\n\
            \x20 scaffy init --author \"Jane Doe\" --force"
    )]
    Init(InitArgs),

    /// Inspect the resolved configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 scaffy config list\n\
            \x20 scaffy config path"
    )]
    Config(ConfigCommands),
}

// ── shared overrides ──────────────────────────────────────────────────────────

/// Flags that override configuration values for one invocation.
#[derive(Debug, Default, Args)]
pub struct OverrideArgs {
    /// Languages to generate, as `key=extension` pairs.
    #[arg(
        short = 'l',
        long = "lang",
        value_name = "KEY=EXT",
        value_delimiter = ',',
        value_parser = parse_language,
        help = "Languages to generate (e.g. go=go,python=py)"
    )]
    pub languages: Vec<(String, String)>,

    #[arg(short = 'a', long = "author", value_name = "NAME", help = "Author name")]
    pub author: Option<String>,

    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        help = "Directory in which the project is created"
    )]
    pub output_dir: Option<PathBuf>,

    #[arg(
        long = "templates-dir",
        value_name = "DIR",
        help = "Directory containing <language>.tmpl files"
    )]
    pub templates_dir: Option<PathBuf>,
}

impl OverrideArgs {
    pub fn to_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            author: self.author.clone(),
            languages: (!self.languages.is_empty())
                .then(|| self.languages.iter().cloned().collect::<BTreeMap<_, _>>()),
            output_dir: self.output_dir.clone(),
            templates_dir: self.templates_dir.clone(),
            ..ConfigOverrides::default()
        }
    }
}

fn parse_language(raw: &str) -> Result<(String, String), String> {
    let (key, ext) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=EXT, got '{raw}'"))?;
    let (key, ext) = (key.trim(), ext.trim().trim_start_matches('.'));
    if key.is_empty() || ext.is_empty() {
        return Err(format!("expected KEY=EXT, got '{raw}'"));
    }
    Ok((key.to_string(), ext.to_string()))
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `scaffy new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    #[arg(
        short = 'f',
        long = "force",
        help = "Reuse the project directory if it already exists"
    )]
    pub force: bool,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory to write `scaffy.json` into.
    #[arg(value_name = "DIR", help = "Target directory (default: current directory)")]
    pub dir: Option<PathBuf>,

    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,

    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        help = "Log level to store (debug, info, warn, error)"
    )]
    pub log_level: Option<String>,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

impl InitArgs {
    pub fn to_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            log_level: self.log_level.clone(),
            ..self.overrides.to_overrides()
        }
    }
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the resolved configuration as JSON.
    List,
    /// Print the global configuration file path.
    Path,
}
