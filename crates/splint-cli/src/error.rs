//! CLI error type, exit codes and the stderr report.

use std::error::Error as _;
use std::io;

use owo_colors::{OwoColorize, Style};
use thiserror::Error;

use splint_core::{
    domain::DomainError,
    error::{ErrorCategory as CoreCategory, SplintError},
};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// A config file could not be read, parsed or written.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    Core(#[from] SplintError),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("Cancelled, nothing was changed")]
    Cancelled,

    /// A prompt was needed but the binary was built without it.
    #[error("This build has no '{feature}' support")]
    FeatureNotAvailable { feature: &'static str },
}

impl From<io::Error> for CliError {
    fn from(source: io::Error) -> Self {
        Self::Io {
            context: "I/O error".into(),
            source,
        }
    }
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        Self::Core(err.into())
    }
}

/// What kind of failure, and the process exit code for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorCategory {
    Internal = 1,
    /// Bad arguments, conflicting features, a cancelled prompt.
    UserError = 2,
    NotFound = 3,
    Configuration = 4,
}

impl CliError {
    pub fn config(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. } | Self::Cancelled => ErrorCategory::UserError,
            Self::Config { .. } | Self::FeatureNotAvailable { .. } => ErrorCategory::Configuration,
            Self::Io { .. } => ErrorCategory::Internal,
            Self::Core(core) if !core.is_user_error() => ErrorCategory::Internal,
            Self::Core(core) => match core.category() {
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Validation | CoreCategory::Compatibility => ErrorCategory::UserError,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.category() as u8
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { .. } => vec![
                "Use letters, digits, '-' and '_' (e.g. my-lib, engine2)".into(),
            ],
            Self::Config { .. } => vec![
                "Check the file shown by: splint config path".into(),
                "Regenerate it with: splint init --force".into(),
            ],
            Self::Core(core) => core.suggestions(),
            Self::Io { .. } => vec!["Check that the project directory is writable".into()],
            Self::Cancelled => Vec::new(),
            Self::FeatureNotAvailable { feature } => vec![
                "Pass --yes to skip the prompt".into(),
                format!("Or reinstall with: cargo install splint-cli --features {feature}"),
            ],
        }
    }

    /// The report printed to stderr before exiting.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: Style| {
            if color {
                text.style(style).to_string()
            } else {
                text.to_owned()
            }
        };

        let mut out = format!(
            "\n{} {}\n",
            paint("\u{2717} Error:", Style::new().red().bold()),
            paint(&self.to_string(), Style::new().red()),
        );

        if verbose {
            let causes = std::iter::successors(self.source(), |e| (*e).source());
            for cause in causes {
                out.push_str(&format!("  {} {cause}\n", paint("caused by:", Style::new().dimmed())));
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str(&format!("\n{}\n", paint("Suggestions:", Style::new().yellow().bold())));
            for suggestion in &suggestions {
                out.push_str(&format!("  - {suggestion}\n"));
            }
        }

        if !verbose {
            out.push_str(&format!(
                "\n{}\n",
                paint("Run with -v / --verbose for more details.", Style::new().dimmed())
            ));
        }
        out
    }

    /// Mirror the failure into the log at a level matching its category.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(category = ?self.category(), "{self}")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(category = ?self.category(), "{self}")
            }
        }
    }
}

/// Attach a message to `io::Error`s at the call site.
pub trait IoContext<T> {
    fn io_context<S: Into<String>>(self, context: impl FnOnce() -> S) -> CliResult<T>;
}

impl<T> IoContext<T> for Result<T, io::Error> {
    fn io_context<S: Into<String>>(self, context: impl FnOnce() -> S) -> CliResult<T> {
        self.map_err(|source| CliError::Io {
            context: context().into(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use splint_core::application::ApplicationError;

    fn core(err: ApplicationError) -> CliError {
        CliError::Core(err.into())
    }

    #[test]
    fn conflicts_exit_with_user_error() {
        let err = core(ApplicationError::ActivationConflict {
            category: "build".into(),
            feature: "xcode".into(),
            active: "make".into(),
            explicit: true,
        });
        assert_eq!(err.exit_code(), 2);
        assert!(err.suggestions().iter().any(|s| s.contains("splint disable make")));
    }

    #[test]
    fn unknown_names_exit_with_not_found() {
        let err = core(ApplicationError::UnknownName {
            names: vec!["cargo".into()],
        });
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.to_string(), "Unknown feature or category: cargo");
    }

    #[test]
    fn broken_catalog_is_internal() {
        let err: CliError = DomainError::Cycle {
            cycle: vec!["a".into(), "b".into(), "a".into()],
        }
        .into();
        assert_eq!(err.exit_code(), 1);

        let err: CliError = DomainError::UnknownDependency {
            name: "gtest".into(),
            dependency: "build".into(),
        }
        .into();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn reserved_word_in_request_is_a_user_error() {
        let err: CliError = DomainError::InvalidName {
            name: "all".into(),
            reason: "name is reserved for requests".into(),
        }
        .into();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn config_errors_exit_with_four() {
        let err = CliError::config("bad toml", io::Error::other("line 3"));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn plain_render_has_no_ansi() {
        let err = CliError::InvalidProjectName {
            name: ".hidden".into(),
            reason: "name cannot start with '.'".into(),
        };
        let report = err.render(false, false);
        assert!(report.contains("\u{2717} Error: Invalid project name '.hidden'"));
        assert!(report.contains("Suggestions:"));
        assert!(report.contains("--verbose"));
        assert!(!report.contains('\u{1b}'));
    }

    #[test]
    fn verbose_render_lists_causes() {
        let err = Err::<(), _>(io::Error::other("disk full"))
            .io_context(|| "writing .splint.toml")
            .unwrap_err();
        let report = err.render(true, false);
        assert!(report.contains("writing .splint.toml: disk full"));
        assert!(report.contains("caused by: disk full"));
        assert!(!report.contains("--verbose"));
    }
}
