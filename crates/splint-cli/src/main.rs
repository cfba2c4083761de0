//! # Splint CLI
//!
//! Feature-driven project scaffolding: a project is a set of features, and
//! `splint-core` keeps their dependencies consistent as features are
//! enabled and disabled.
//!
//! `main` parses arguments, installs logging, loads configuration, then
//! hands off to one handler in [`commands`]. Handlers return [`CliError`];
//! the report and exit code are produced here and nowhere else.
//!
//! | Code | Meaning                                   |
//! |------|-------------------------------------------|
//! |  0   | Success                                   |
//! |  1   | Internal error, broken catalog, I/O       |
//! |  2   | Bad arguments or conflicting features     |
//! |  3   | Unknown feature, action or project        |
//! |  4   | Configuration error                       |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, instrument};

use crate::{
    cli::{Cli, Commands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

/// How a failure gets reported, captured before `Cli` is consumed.
#[derive(Debug, Clone, Copy)]
struct Reporter {
    verbose: bool,
    color: bool,
}

impl Reporter {
    fn new(global: &GlobalArgs) -> Self {
        Self {
            verbose: global.verbose > 0,
            color: !global.no_color && std::io::stderr().is_terminal(),
        }
    }

    /// The report goes to stderr so it survives a redirected stdout.
    fn fail(self, err: &CliError) -> ExitCode {
        err.log();
        eprint!("{}", err.render(self.verbose, self.color));
        ExitCode::from(err.exit_code())
    }
}

fn main() -> ExitCode {
    // Optional; variables already in the environment are kept.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version arrive here too and are not failures.
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("splint: {e}");
        return ExitCode::from(1);
    }
    let reporter = Reporter::new(&cli.global);

    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            return reporter.fail(&CliError::Config {
                message: format!("{e:#}"),
                source: None,
            });
        }
    };
    debug!(project = %cli.global.project.display(), ?config, "Configuration loaded");

    let output = OutputManager::new(&cli.global, &config);
    match run(cli, config, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => reporter.fail(&e),
    }
}

#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let Cli { global, command } = cli;
    match command {
        Commands::New(args) => commands::new::execute(args, global, config, output),
        Commands::Enable(args) => commands::enable::execute(args, global, config, output),
        Commands::Disable(args) => commands::disable::execute(args, global, config, output),
        Commands::Features(args) => commands::features::execute(args, global, config, output),
        Commands::Order(args) => commands::order::execute(args, global, config, output),
        Commands::Run(args) => commands::run::execute(args, global, config, output),
        Commands::Init(args) => commands::init::execute(args, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn version_comes_from_cargo() {
        assert_eq!(Cli::command().get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn plain_reporter_without_a_terminal() {
        let cli = Cli::parse_from(["splint", "--no-color", "-v", "features"]);
        let reporter = Reporter::new(&cli.global);
        assert!(reporter.verbose);
        assert!(!reporter.color);
    }
}
