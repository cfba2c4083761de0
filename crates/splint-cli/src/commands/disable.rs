//! `splint disable`: deactivate features, tearing down what they set up.

use std::io::IsTerminal as _;

use tracing::{debug, instrument};

use crate::{
    cli::{DisableArgs, GlobalArgs},
    commands::{join, open_project, parse_request, print_plan},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch sequence:
/// 1. Preview the plan (every conflict is raised here)
/// 2. Confirm unless `--yes`, `--quiet`, or a non-interactive stdin
/// 3. Deactivate and persist
#[instrument(skip_all, fields(names = ?args.names))]
pub fn execute(
    args: DisableArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let request = parse_request(&args.names)?;
    let mut service = open_project(&global.project, &config)?;

    let preview = service.preview_disable(&request)?;
    if preview.is_empty() {
        return print_plan(&output, "disable", &preview);
    }

    let ask = !args.yes
        && !global.quiet
        && config.project.confirm_disable
        && std::io::stdin().is_terminal();
    if ask {
        output.header("Will disable:")?;
        print_plan(&output, "disable", &preview)?;
        if !confirm(&join(&preview.total_order))? {
            return Err(CliError::Cancelled);
        }
    }

    let tear_down = !args.keep_files;
    debug!(tear_down, "Disabling");
    let plan = service.disable(&request, tear_down)?;

    if !ask {
        print_plan(&output, "disable", &plan)?;
    }
    if !output.is_json() {
        output.success(&format!("Disabled {}", join(&plan.total_order)))?;
    }
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm(names: &str) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(format!("Disable {names}?"))
        .default(false)
        .interact()
        .map_err(|e| CliError::Io {
            context: "failed to read confirmation".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm(_names: &str) -> CliResult<bool> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}
