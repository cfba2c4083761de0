//! Implementation of the `splint new` command.
//!
//! Responsibility: turn CLI arguments into a request, hand it to the core
//! project service, and display results. No business logic lives here.

use std::path::Path;

use tracing::{debug, info, instrument};

use splint_core::{application::ProjectService, domain::Request};

use crate::{
    cli::{GlobalArgs, NewArgs},
    commands::{engine, parse_request, print_plan, store},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `splint new` command.
///
/// Dispatch sequence:
/// 1. Validate the project directory name
/// 2. Build the request from `-f`, the config defaults, or `default`
/// 3. Early-exit with the plan if `--dry-run`
/// 4. Create the project via `ProjectService`
/// 5. Print next-steps guidance
#[instrument(skip_all, fields(project = %args.path.display()))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Validate name
    let project_name = project_name(&args.path)?;
    validate_project_name(&project_name)?;

    // 2. Request
    let request = build_request(&args.features, &config)?;
    debug!(request = %request, "Request resolved");

    // 3. Dry run: describe but do not write.
    if args.dry_run {
        let plan = engine()?.activation_order(&request)?;
        output.info(&format!(
            "Dry run: would create '{}' at {} with:",
            project_name,
            args.path.display(),
        ))?;
        return print_plan(&output, "enable", &plan);
    }

    // 4. Create
    output.header(&format!("Creating '{project_name}'..."))?;
    let service =
        ProjectService::create(engine()?, Box::new(store(&config)), &args.path, &request)?;
    info!(
        project = %project_name,
        features = service.state().features.len(),
        "Project created"
    );

    // 5. Success + next steps
    if output.is_json() {
        output.json(&serde_json::json!({
            "project": args.path.display().to_string(),
            "features": service.state().features,
        }))?;
        return Ok(());
    }

    for name in service.engine().active_feature_names() {
        output.item(service.state().contains(name.as_str()), name.as_str())?;
    }
    output.success(&format!("Project '{project_name}' created!"))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", args.path.display()))?;
        output.print("  splint run build configure")?;
    }

    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn project_name(path: &Path) -> CliResult<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| CliError::InvalidProjectName {
            name: path.display().to_string(),
            reason: "cannot extract valid project name".into(),
        })
}

fn validate_project_name(name: &str) -> CliResult<()> {
    if name.is_empty() {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot be empty".into(),
        });
    }
    if name.starts_with('.') {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot start with '.'".into(),
        });
    }
    if name.chars().any(char::is_whitespace) {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot contain whitespace".into(),
        });
    }
    Ok(())
}

/// `-f` wins over `defaults.features`; with neither, every category's
/// defaults are enabled.
fn build_request(features: &[String], config: &AppConfig) -> CliResult<Request> {
    if !features.is_empty() {
        return parse_request(features);
    }
    if !config.defaults.features.is_empty() {
        return parse_request(&config.defaults.features);
    }
    Ok(Request::Default)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
