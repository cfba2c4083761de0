//! `splint run`: invoke an active feature or category.

use tracing::instrument;

use crate::{
    cli::{GlobalArgs, RunArgs},
    commands::open_project,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(name = %args.name, action = ?args.action))]
pub fn execute(
    args: RunArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = open_project(&global.project, &config)?;
    let lines = service.invoke(&args.name, args.action.as_deref())?;

    if output.is_json() {
        output.json(&serde_json::json!({ "commands": lines }))?;
        return Ok(());
    }
    for line in &lines {
        output.print(line)?;
    }
    Ok(())
}
