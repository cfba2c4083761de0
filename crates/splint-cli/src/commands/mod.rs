//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into core calls and print the result.  The
//! helpers below build the pieces every project command needs.

use std::path::Path;

use splint_adapters::{JsonProjectStore, TracingObserver, builtin_registry};
use splint_core::{
    application::{Engine, Plan, ProjectService, ProjectStore},
    domain::{Name, Request},
};

use crate::{config::AppConfig, error::CliResult, output::OutputManager};

pub mod completions;
pub mod config;
pub mod disable;
pub mod enable;
pub mod features;
pub mod init;
pub mod new;
pub mod order;
pub mod run;

/// Engine over the built-in catalog, lifecycle mirrored into tracing.
pub(crate) fn engine() -> CliResult<Engine> {
    let registry = builtin_registry()?;
    Ok(Engine::new(registry).with_observer(Box::new(TracingObserver::new())))
}

pub(crate) fn store(config: &AppConfig) -> JsonProjectStore {
    JsonProjectStore::with_file_name(&config.project.state_file)
}

/// Open the project at `root`.
pub(crate) fn open_project(root: &Path, config: &AppConfig) -> CliResult<ProjectService> {
    Ok(ProjectService::open(engine()?, Box::new(store(config)), root)?)
}

/// Open the project at `root` if there is one.
pub(crate) fn try_open_project(
    root: &Path,
    config: &AppConfig,
) -> CliResult<Option<ProjectService>> {
    if store(config).load(root)?.is_none() {
        return Ok(None);
    }
    open_project(root, config).map(Some)
}

pub(crate) fn parse_request(words: &[String]) -> CliResult<Request> {
    Ok(Request::parse(words)?)
}

pub(crate) fn join(names: &[Name]) -> String {
    names
        .iter()
        .map(Name::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Print a plan: every name in order, requested ones marked.
pub(crate) fn print_plan(output: &OutputManager, verb: &str, plan: &Plan) -> CliResult<()> {
    if output.is_json() {
        output.json(&plan_json(plan))?;
        return Ok(());
    }

    if plan.total_order.is_empty() {
        output.info(&format!("Nothing to {verb}"))?;
        return Ok(());
    }

    for name in &plan.total_order {
        let requested = plan.flatten_order.contains(name);
        let note = if requested { "" } else { "  (dependency)" };
        output.item(requested, &format!("{name}{note}"))?;
    }
    Ok(())
}

pub(crate) fn plan_json(plan: &Plan) -> serde_json::Value {
    serde_json::json!({
        "total_order": plan.total_order,
        "flatten_order": plan.flatten_order,
    })
}
