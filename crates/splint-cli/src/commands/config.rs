//! `splint config`: read the effective configuration.

use serde_json::Value;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = lookup(&config, &key)?;
            if output.is_json() {
                output.json(&value)?;
            } else {
                output.print(&display(&value))?;
            }
        }

        ConfigCommands::List if output.is_json() => output.json(&as_json(&config)?)?,
        ConfigCommands::List => {
            let text = toml::to_string_pretty(&config)
                .map_err(|e| CliError::config("failed to serialise config", e))?;
            output.print(text.trim_end())?;
        }

        ConfigCommands::Path => {
            let path = AppConfig::config_path();
            let note = if path.is_file() { "" } else { "  (not created yet)" };
            output.print(&format!("{}{note}", path.display()))?;
        }
    }
    Ok(())
}

fn as_json(config: &AppConfig) -> CliResult<Value> {
    serde_json::to_value(config).map_err(|e| CliError::config("failed to serialise config", e))
}

/// Walk a dotted key such as `project.state_file`.
fn lookup(config: &AppConfig, key: &str) -> CliResult<Value> {
    let root = as_json(config)?;
    key.split('.')
        .try_fold(&root, |node, part| node.get(part))
        .filter(|value| !value.is_object())
        .cloned()
        .ok_or_else(|| CliError::Config {
            message: format!("unknown config key '{key}'"),
            source: None,
        })
}

/// Lists print comma separated, the form `SPLINT__DEFAULTS__FEATURES` takes.
fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}
