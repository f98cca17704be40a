//! `scaffy config`: inspect configuration.

use crate::{
    cli::ConfigCommands,
    config::{AppConfig, ConfigError},
    error::CliResult,
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    config: CliResult<AppConfig>,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::List => {
            let serialised = to_json(&config?)?;
            output.data(&serialised)?;
        }

        ConfigCommands::Path => {
            let path = AppConfig::config_path().ok_or(ConfigError::NoConfigDir)?;
            output.data(&path.display().to_string())?;
        }
    }

    Ok(())
}

fn to_json(config: &AppConfig) -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_uses_snake_case_keys() {
        let json = to_json(&AppConfig::default()).unwrap();
        for key in ["author", "languages", "log_level", "output_dir", "templates_dir"] {
            assert!(json.contains(&format!("\"{key}\"")), "{key}");
        }
    }
}
