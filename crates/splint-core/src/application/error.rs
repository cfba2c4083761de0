//! Application layer errors.
//!
//! These errors represent failures while resolving or applying a request
//! against a valid feature graph. Graph misconfiguration is `DomainError`
//! from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::Mode;
use crate::error::ErrorCategory;

/// Errors that occur while resolving and applying requests.
///
/// Every resolution error is raised during validation, before the engine
/// touches any runtime object.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Request references names that are neither features nor categories.
    #[error("Unknown feature or category: {}", .names.join(", "))]
    UnknownName { names: Vec<String> },

    /// Sentinel used in the wrong direction.
    #[error("'{request}' cannot be used for {mode}")]
    InvalidRequest { request: String, mode: Mode },

    /// More than one member of a mono category in one activation.
    #[error("Only one of {} can be active in category '{category}'", .features.join(", "))]
    MonoConflict {
        category: String,
        features: Vec<String>,
    },

    /// A mono category already runs a different member.
    #[error("Cannot activate '{feature}': category '{category}' already has '{active}' active")]
    ActivationConflict {
        category: String,
        feature: String,
        active: String,
        explicit: bool,
    },

    /// Removing a feature would strand an active dependent.
    #[error("Cannot deactivate '{feature}': active feature '{dependent}' depends on it")]
    DeactivationDependency { feature: String, dependent: String },

    #[error("'{name}' is not active")]
    NotActive { name: String },

    /// Category expected to have exactly one active member.
    #[error("Category '{category}' has {count} active features, expected exactly one")]
    NotSingular { category: String, count: usize },

    /// Feature does not understand the requested action.
    #[error("'{name}' has no action '{action}'")]
    UnknownAction { name: String, action: String },

    /// A feature hook or action reported failure.
    #[error("'{name}' failed: {reason}")]
    FeatureFailed { name: String, reason: String },

    /// Project state could not be read or written.
    #[error("Project state error at {path}: {reason}")]
    StateError { path: PathBuf, reason: String },

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// No project state where one was expected.
    #[error("No project found at {path}")]
    ProjectNotFound { path: PathBuf },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownName { .. } => vec![
                "Try: splint features to see what is available".into(),
                "Names are case-sensitive".into(),
            ],
            Self::InvalidRequest { mode, .. } => match mode {
                Mode::Activation => vec!["Use 'default' to enable every category's defaults".into()],
                Mode::Deactivation => vec!["Use 'all' to disable every active feature".into()],
            },
            Self::MonoConflict { category, .. } => vec![
                format!("Pick a single feature from '{}'", category),
            ],
            Self::ActivationConflict {
                active,
                feature,
                explicit,
                ..
            } => {
                let mut hints = vec![format!("Disable '{}' first: splint disable {}", active, active)];
                if !explicit {
                    hints.push(format!("'{}' was pulled in as a dependency", feature));
                }
                hints
            }
            Self::DeactivationDependency { dependent, .. } => vec![
                format!("Disable '{}' first, or disable both together", dependent),
            ],
            Self::NotActive { name } => vec![
                format!("Enable it first: splint enable {}", name),
            ],
            Self::StateError { path, .. } => vec![
                format!("Check that {} is readable and valid JSON", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already has a project: {}", path.display()),
                "Use splint enable inside it instead".into(),
            ],
            Self::ProjectNotFound { .. } => vec![
                "Run this inside a project created by splint new".into(),
                "Or pass the project directory with --project".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownName { .. } | Self::ProjectNotFound { .. } => ErrorCategory::NotFound,
            Self::UnknownAction { .. } => ErrorCategory::NotFound,
            Self::InvalidRequest { .. } | Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::MonoConflict { .. }
            | Self::ActivationConflict { .. }
            | Self::DeactivationDependency { .. } => ErrorCategory::Compatibility,
            Self::NotActive { .. } | Self::NotSingular { .. } => ErrorCategory::Validation,
            Self::FeatureFailed { .. } | Self::StateError { .. } => ErrorCategory::Internal,
        }
    }
}
