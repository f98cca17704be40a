//! Implementation of the `scaffy new` command.
//!
//! Responsibility: validate the name, resolve configuration, wire the
//! adapters into the core scaffold service, and display results. No business
//! logic lives here.

use tracing::{debug, instrument};

use scaffy_adapters::{LocalFilesystem, TemplateData, TemplateManager};
use scaffy_core::{
    application::{CancellationToken, ScaffoldService},
    domain::{ScaffoldRequest, validation::validate_project_name},
};

use crate::{
    cli::NewArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `scaffy new` command.
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: NewArgs, mut config: AppConfig, output: OutputManager) -> CliResult<()> {
    let name = validate_project_name(&args.name).map_err(|source| CliError::InvalidProjectName {
        name: args.name.clone(),
        source,
    })?;
    if name != args.name {
        debug!(raw = %args.name, normalised = %name, "project name normalised");
    }

    config.apply(&args.overrides.to_overrides())?;

    if args.force {
        output.warning("--force is set: an existing project directory will be reused")?;
    }

    let request = build_request(&name, &config, args.force);
    let service = build_service(&config);

    output.info(&format!(
        "Scaffolding \"{name}\" for {}",
        request.languages.keys().cloned().collect::<Vec<_>>().join(", ")
    ))?;

    let path = service.scaffold(&CancellationToken::new(), &request)?;

    output.success(&format!("Project \"{name}\" created at {}", path.display()))?;
    Ok(())
}

fn build_request(name: &str, config: &AppConfig, force: bool) -> ScaffoldRequest {
    ScaffoldRequest::new(name, config.output_dir.clone())
        .with_languages(config.languages.clone())
        .with_force(force)
}

fn build_service(config: &AppConfig) -> ScaffoldService {
    let renderer = TemplateManager::new(
        config.templates_dir().map(ToOwned::to_owned),
        TemplateData::new(config.author.clone()),
    );
    ScaffoldService::new(Box::new(renderer), Box::new(LocalFilesystem::new()))
}
