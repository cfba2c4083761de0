//! Flags shared by every subcommand.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

/// Flattened into [`super::Cli`]; every flag is `global`.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// `-v` shows activation batches, `-vv` each lifecycle step, `-vvv`
    /// resolver traces.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "More log output (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only print errors and requested JSON"
    )]
    pub quiet: bool,

    /// Also set by `NO_COLOR` (<https://no-color.org>).
    #[arg(long = "no-color", global = true, env = "NO_COLOR", help = "Disable colored output")]
    pub no_color: bool,

    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read configuration from FILE"
    )]
    pub config: Option<PathBuf>,

    /// Directory holding the project state file.
    #[arg(
        short = 'p',
        long = "project",
        global = true,
        value_name = "DIR",
        env = "SPLINT_PROJECT",
        default_value = ".",
        help = "Project directory"
    )]
    pub project: PathBuf,

    /// `auto` defers to `output.format` in the config, then to the terminal.
    #[arg(
        long = "format",
        visible_alias = "output-format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Auto,
        help = "Output format"
    )]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Auto,
    /// Colored, with status markers.
    Human,
    /// Same text, never colored.
    Plain,
    /// One JSON document per command.
    Json,
}

impl OutputFormat {
    /// Parse the `output.format` config value, ignoring case.
    pub fn from_config(value: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(value, true).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_values_parse_case_insensitively() {
        assert_eq!(OutputFormat::from_config("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_config("plain"), Some(OutputFormat::Plain));
        assert_eq!(OutputFormat::from_config("yaml"), None);
    }
}
