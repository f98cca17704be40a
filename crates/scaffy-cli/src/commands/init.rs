//! `scaffy init`: write a configuration file.

use std::path::Path;

use tracing::instrument;

use crate::{
    cli::InitArgs,
    config::{AppConfig, CONFIG_FILE_NAME},
    error::CliResult,
    output::OutputManager,
};

/// Write `scaffy.json` built from defaults plus command-line overrides.
#[instrument(skip_all)]
pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    let path = args
        .dir
        .as_deref()
        .unwrap_or(Path::new("."))
        .join(CONFIG_FILE_NAME);

    let mut config = AppConfig::default();
    config.apply(&args.to_overrides())?;
    // Relative paths in the file are read back against its directory.
    let pinned = config
        .templates_dir()
        .filter(|d| d.is_relative())
        .map(std::path::absolute)
        .transpose()?;
    if let Some(dir) = pinned {
        config.templates_dir = dir;
    }
    config.save(&path, args.force)?;

    output.success(&format!("Configuration created at {}", path.display()))?;
    Ok(())
}
