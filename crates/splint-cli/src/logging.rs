//! Tracing subscriber setup for the `splint` binary.
//!
//! The library crates only emit events. Lifecycle steps from the engine
//! (category creation, feature set-up and tear-down) surface at `-v` as
//! batch summaries and at `-vv` one line per feature.
//!
//! `SPLINT_LOG` takes a full `EnvFilter` directive string and wins over the
//! verbosity flags; `RUST_LOG` is honoured when `SPLINT_LOG` is absent.

use std::io::IsTerminal as _;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Environment variable holding explicit filter directives.
pub const LOG_ENV: &str = "SPLINT_LOG";

/// Crates whose events reach the terminal by default.
const TARGETS: [&str; 3] = ["splint", "splint_core", "splint_adapters"];

/// Install the global subscriber.  Call once, before the first event.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = level_for(args);
    let filter = env_filter(level)?;

    // Module targets only help when chasing resolver traces.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(level == LevelFilter::TRACE)
        .without_time()
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

fn env_filter(level: LevelFilter) -> anyhow::Result<EnvFilter> {
    for var in [LOG_ENV, EnvFilter::DEFAULT_ENV] {
        if let Ok(directives) = std::env::var(var) {
            return EnvFilter::try_new(&directives)
                .map_err(|e| anyhow::anyhow!("Invalid {var} directives '{directives}': {e}"));
        }
    }
    Ok(EnvFilter::new(directives(level)))
}

fn directives(level: LevelFilter) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// `--quiet` beats any number of `-v`.
fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}
