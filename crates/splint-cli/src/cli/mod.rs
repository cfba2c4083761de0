//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! and help text.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "splint",
    bin_name = "splint",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Feature-driven C++ project scaffolding",
    long_about = "Splint manages a project as a set of features. Enabling a \
                  feature pulls in everything it depends on; disabling one \
                  removes what nothing else needs.",
    after_help = "EXAMPLES:\n\
        \x20 splint new my-lib -f ninja -f gtest\n\
        \x20 splint -p my-lib enable doc\n\
        \x20 splint -p my-lib disable gtest --yes\n\
        \x20 splint order format --disable",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 splint new my-lib                  # every category's defaults\n\
            \x20 splint new my-lib -f xcode         # xcode instead of make\n\
            \x20 splint new my-lib -f gtest --dry-run"
    )]
    New(NewArgs),

    /// Enable features in the current project.
    #[command(
        visible_alias = "add",
        about = "Enable features or categories",
        after_help = "EXAMPLES:\n\
            \x20 splint enable doc\n\
            \x20 splint enable format catch2"
    )]
    Enable(EnableArgs),

    /// Disable features in the current project.
    #[command(
        visible_alias = "rm",
        about = "Disable features or categories",
        after_help = "EXAMPLES:\n\
            \x20 splint disable gtest\n\
            \x20 splint disable all --yes"
    )]
    Disable(DisableArgs),

    /// List features and their state.
    #[command(
        visible_alias = "ls",
        about = "List categories and features",
        after_help = "EXAMPLES:\n\
            \x20 splint features\n\
            \x20 splint features --flags\n\
            \x20 splint --format json features"
    )]
    Features(FeaturesArgs),

    /// Show the order a request would be applied in.
    #[command(
        about = "Preview activation or deactivation order",
        after_help = "EXAMPLES:\n\
            \x20 splint order gtest\n\
            \x20 splint order default\n\
            \x20 splint order format --disable"
    )]
    Order(OrderArgs),

    /// Run an active feature's action.
    #[command(
        about = "Run a feature or category action",
        after_help = "EXAMPLES:\n\
            \x20 splint run build\n\
            \x20 splint run make configure\n\
            \x20 splint run test"
    )]
    Run(RunArgs),

    /// Initialise a Splint configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 splint init           # default location\n\
            \x20 splint init --local   # .splint.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 splint completions bash > ~/.local/share/bash-completion/completions/splint\n\
            \x20 splint completions zsh  > ~/.zfunc/_splint\n\
            \x20 splint completions fish > ~/.config/fish/completions/splint.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Splint configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 splint config get defaults.features\n\
            \x20 splint config list\n\
            \x20 splint config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `splint new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project directory.  A plain name creates `./name`.
    #[arg(value_name = "DIR", help = "Project directory")]
    pub path: PathBuf,

    /// Features or categories to enable.  Defaults to the configured
    /// `defaults.features`, or every category's defaults.
    #[arg(
        short = 'f',
        long = "feature",
        value_name = "NAME",
        help = "Feature or category to enable (repeatable)"
    )]
    pub features: Vec<String>,

    /// Preview what would be enabled without creating anything.
    #[arg(long = "dry-run", help = "Show what would be enabled without creating")]
    pub dry_run: bool,
}

// ── enable / disable ──────────────────────────────────────────────────────────

/// Arguments for `splint enable`.
#[derive(Debug, Args)]
pub struct EnableArgs {
    /// Names to enable, or `default`.
    #[arg(value_name = "NAME", required = true, num_args = 1..)]
    pub names: Vec<String>,
}

/// Arguments for `splint disable`.
#[derive(Debug, Args)]
pub struct DisableArgs {
    /// Names to disable, or `all`.
    #[arg(value_name = "NAME", required = true, num_args = 1..)]
    pub names: Vec<String>,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation")]
    pub yes: bool,

    /// Deactivate without running tear-down hooks.
    #[arg(long = "keep-files", help = "Skip tear-down (keep generated files)")]
    pub keep_files: bool,
}

// ── features ──────────────────────────────────────────────────────────────────

/// Arguments for `splint features`.
#[derive(Debug, Args)]
pub struct FeaturesArgs {
    /// Print template flags instead of the feature table.
    #[arg(long = "flags", help = "Show feature flags as seen by templates")]
    pub flags: bool,
}

// ── order ─────────────────────────────────────────────────────────────────────

/// Arguments for `splint order`.
#[derive(Debug, Args)]
pub struct OrderArgs {
    /// Names to resolve, or `default` / `all`.
    #[arg(value_name = "NAME", required = true, num_args = 1..)]
    pub names: Vec<String>,

    /// Resolve as a deactivation instead of an activation.
    #[arg(short = 'd', long = "disable", help = "Resolve deactivation order")]
    pub disable: bool,
}

// ── run ───────────────────────────────────────────────────────────────────────

/// Arguments for `splint run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Active feature or category.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Action to run instead of the default one.
    #[arg(value_name = "ACTION")]
    pub action: Option<String>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `splint init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.splint.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `splint completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `splint config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.features`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_new_with_repeated_features() {
        let cli = Cli::parse_from(["splint", "new", "demo", "-f", "ninja", "-f", "gtest"]);
        match cli.command {
            Commands::New(args) => {
                assert_eq!(args.path, PathBuf::from("demo"));
                assert_eq!(args.features, vec!["ninja", "gtest"]);
            }
            other => panic!("expected New command, got {other:?}"),
        }
    }

    #[test]
    fn enable_requires_a_name() {
        assert!(Cli::try_parse_from(["splint", "enable"]).is_err());
    }

    #[test]
    fn run_action_is_optional() {
        let cli = Cli::parse_from(["splint", "run", "make"]);
        assert!(matches!(cli.command, Commands::Run(RunArgs { action: None, .. })));

        let cli = Cli::parse_from(["splint", "run", "make", "configure"]);
        match cli.command {
            Commands::Run(args) => assert_eq!(args.action.as_deref(), Some("configure")),
            other => panic!("expected Run command, got {other:?}"),
        }
    }

    #[test]
    fn project_flag_is_global() {
        let cli = Cli::parse_from(["splint", "features", "--project", "demo"]);
        assert_eq!(cli.global.project, PathBuf::from("demo"));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["splint", "--quiet", "--verbose", "features"]);
        assert!(result.is_err());
    }
}
