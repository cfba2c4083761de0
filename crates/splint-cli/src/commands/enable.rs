//! `splint enable`: activate features in an existing project.

use tracing::instrument;

use crate::{
    cli::{EnableArgs, GlobalArgs},
    commands::{join, open_project, parse_request, print_plan},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(names = ?args.names))]
pub fn execute(
    args: EnableArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let request = parse_request(&args.names)?;
    let mut service = open_project(&global.project, &config)?;

    let plan = service.enable(&request)?;
    print_plan(&output, "enable", &plan)?;

    if !plan.is_empty() && !output.is_json() {
        output.success(&format!("Enabled {}", join(&plan.flatten_order)))?;
    }
    Ok(())
}
