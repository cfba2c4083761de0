//! `splint features`: the catalog with each entry's state in the project.

use splint_adapters::describe;
use splint_core::application::{CategoryStatus, Engine};

use crate::{
    cli::{FeaturesArgs, GlobalArgs},
    commands::{engine, join, try_open_project},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Outside a project every entry is listed as inactive.
pub fn execute(
    args: FeaturesArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = try_open_project(&global.project, &config)?;
    let fresh;
    let engine: &Engine = match &service {
        Some(service) => service.engine(),
        None => {
            fresh = engine()?;
            &fresh
        }
    };

    if args.flags {
        return print_flags(engine, &output);
    }

    let status = engine.status();
    if output.is_json() {
        output.json(&status_json(&status))?;
        return Ok(());
    }

    for category in &status {
        if category.implicit {
            output.header("other")?;
        } else {
            let kind = if category.mono { "one of" } else { "any of" };
            let about = describe(category.name.as_str()).unwrap_or_default();
            output.header(&format!("{} ({kind}) {about}", category.name))?;
        }

        for feature in &category.features {
            let mut line = feature.name.to_string();
            if feature.default {
                line.push_str(" [default]");
            }
            if !feature.requires.is_empty() {
                line.push_str(&format!(" (requires {})", join(&feature.requires)));
            }
            if let Some(about) = describe(feature.name.as_str()) {
                line.push_str(&format!(" - {about}"));
            }
            output.item(feature.active, &line)?;
        }
    }
    Ok(())
}

fn print_flags(engine: &Engine, output: &OutputManager) -> CliResult<()> {
    let flags = engine.feature_flags();
    if output.is_json() {
        output.json(&serde_json::json!(flags))?;
        return Ok(());
    }
    for (flag, on) in &flags {
        output.print(&format!("{flag} = {on}"))?;
    }
    Ok(())
}

fn status_json(status: &[CategoryStatus]) -> serde_json::Value {
    status
        .iter()
        .map(|category| {
            serde_json::json!({
                "name": category.name,
                "mono": category.mono,
                "implicit": category.implicit,
                "active": category.active,
                "features": category.features.iter().map(|f| serde_json::json!({
                    "name": f.name,
                    "active": f.active,
                    "default": f.default,
                    "requires": f.requires,
                })).collect::<Vec<_>>(),
            })
        })
        .collect()
}
