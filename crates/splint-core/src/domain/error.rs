// ============================================================================
// domain/error.rs - REGISTRATION ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Raised while building the feature graph. A misconfigured graph is a
/// programming error in whoever registers features, so these are fatal at
/// startup rather than something an end user can fix.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Name '{name}' is already registered as a {kind}")]
    DuplicateName { name: String, kind: &'static str },

    #[error("Category '{category}' must declare at least one member feature")]
    EmptyCategory { category: String },

    #[error("Default '{default}' of category '{category}' is not one of its members")]
    DefaultNotMember { category: String, default: String },

    // ========================================================================
    // Dependency Errors
    // ========================================================================
    #[error("'{name}' requires unknown name '{dependency}'")]
    UnknownDependency { name: String, dependency: String },

    #[error("Category '{category}' lists unknown feature '{member}'")]
    UnknownMember { category: String, member: String },

    #[error("'{name}' cannot depend on itself")]
    SelfDependency { name: String },

    #[error("'{name}' cannot depend on category '{category}' because it has no default features")]
    CategoryWithoutDefaults { name: String, category: String },

    #[error("Feature '{feature}' already belongs to category '{category}'")]
    FeatureAlreadyClaimed { feature: String, category: String },

    #[error("Dependency cycle detected: {}", .cycle.join(" -> "))]
    Cycle { cycle: Vec<String> },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { .. } => vec![
                "Names must be non-empty and contain no whitespace".into(),
                "'default' and 'all' are reserved request words".into(),
            ],
            Self::DuplicateName { name, kind } => vec![
                format!("'{}' is already a {}", name, kind),
                "Feature and category names share one namespace".into(),
            ],
            Self::UnknownDependency { dependency, .. } => vec![
                format!("Register '{}' before anything that requires it", dependency),
            ],
            Self::UnknownMember { member, .. } => vec![
                format!("Register feature '{}' before its category", member),
            ],
            Self::CategoryWithoutDefaults { category, .. } => vec![
                format!("Give category '{}' at least one default feature", category),
                "Or depend on one of its member features directly".into(),
            ],
            Self::Cycle { cycle } => vec![
                format!("Break one of the requirements in: {}", cycle.join(" -> ")),
            ],
            _ => vec!["This is a feature registration bug; check the registering module".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName { .. } => ErrorCategory::Validation,
            Self::UnknownDependency { .. } | Self::UnknownMember { .. } => {
                ErrorCategory::NotFound
            }
            Self::Cycle { .. } | Self::SelfDependency { .. } => ErrorCategory::Compatibility,
            _ => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}
