//! Crate-wide error type.
//!
//! Registration problems are [`DomainError`], request problems are
//! [`ApplicationError`]; [`SplintError`] carries either across the public
//! API so callers match on one type.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{self, DomainError};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SplintError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// A broken invariant inside the engine or an adapter.
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl SplintError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "Re-run with -vvv and include the log in a bug report".into(),
                "Report it at: https://github.com/cosecruz/splint/issues".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category().into(),
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// `true` when changing the request would fix it.
    ///
    /// Graph errors come from whoever registered the catalog, so only a
    /// malformed name counts; that one also arises from parsing a request.
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::Domain(e) => matches!(e, DomainError::InvalidName { .. }),
            Self::Application(e) => e.category() != ErrorCategory::Internal,
            Self::Internal { .. } => false,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}

impl From<domain::ErrorCategory> for ErrorCategory {
    fn from(category: domain::ErrorCategory) -> Self {
        match category {
            domain::ErrorCategory::Validation => Self::Validation,
            domain::ErrorCategory::Compatibility => Self::Compatibility,
            domain::ErrorCategory::NotFound => Self::NotFound,
            domain::ErrorCategory::Internal => Self::Internal,
        }
    }
}

pub type SplintResult<T> = Result<T, SplintError>;
