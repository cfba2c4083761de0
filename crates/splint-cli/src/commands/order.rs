//! `splint order`: resolve a request without applying it.

use crate::{
    cli::{GlobalArgs, OrderArgs},
    commands::{engine, parse_request, print_plan, try_open_project},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Inside a project the plan accounts for what is already active.
pub fn execute(
    args: OrderArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let request = parse_request(&args.names)?;
    let service = try_open_project(&global.project, &config)?;

    let plan = match (&service, args.disable) {
        (Some(service), true) => service.preview_disable(&request)?,
        (Some(service), false) => service.engine().activation_order(&request)?,
        (None, true) => engine()?.deactivation_order(&request, &[])?,
        (None, false) => engine()?.activation_order(&request)?,
    };

    let verb = if args.disable { "disable" } else { "enable" };
    print_plan(&output, verb, &plan)
}
