//! Domain value objects: Name, Request, Mode.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity.
//! A [`Name`] identifies either a feature or a category; which one it is
//! only the [`Registry`](crate::domain::Registry) knows. A [`Request`] is
//! what a caller hands to the engine: an explicit list of names or one of
//! the two sentinels.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Sentinel word that expands to every category's defaults.
pub const DEFAULT_SENTINEL: &str = "default";

/// Sentinel word that expands to every active feature.
pub const ALL_SENTINEL: &str = "all";

// ── Name ─────────────────────────────────────────────────────────────────────

/// Identifier of a feature or a category.
///
/// Invariant: non-empty, free of whitespace, and never one of the request
/// sentinels (`default`, `all`). Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Create a new name.
    ///
    /// # Panics
    /// Panics if the name is invalid (use `try_new` for fallible).
    pub fn new(name: impl Into<String>) -> Self {
        match Self::try_new(name) {
            Ok(name) => name,
            Err(e) => panic!("{e}"),
        }
    }

    /// Fallible constructor.
    pub fn try_new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();

        let reason = if name.is_empty() {
            Some("name cannot be empty")
        } else if name.chars().any(char::is_whitespace) {
            Some("name cannot contain whitespace")
        } else if name == DEFAULT_SENTINEL || name == ALL_SENTINEL {
            Some("name is reserved for requests")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DomainError::InvalidName {
                name,
                reason: reason.into(),
            }),
            None => Ok(Self(name)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl TryFrom<String> for Name {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

impl FromStr for Name {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s)
    }
}

/// Collect anything name-like into a `Vec<Name>`.
///
/// Used by the descriptor builders so call sites can pass string literals.
pub fn names<I, N>(items: I) -> Vec<Name>
where
    I: IntoIterator<Item = N>,
    N: Into<Name>,
{
    items.into_iter().map(Into::into).collect()
}

// ── Mode ─────────────────────────────────────────────────────────────────────

/// Which direction a request is being resolved in.
///
/// Selects how category names are flattened: into their defaults when
/// activating, into their currently active members when deactivating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Activation,
    Deactivation,
}

impl Mode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Activation => "activation",
            Self::Deactivation => "deactivation",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Request ──────────────────────────────────────────────────────────────────

/// What the caller asks the engine to activate or deactivate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Request {
    /// Every category's default features (activation only).
    Default,
    /// Every currently active feature (deactivation only).
    All,
    /// An explicit list of feature and/or category names.
    Names(Vec<Name>),
}

impl Request {
    /// Build an explicit request from anything name-like.
    pub fn names<I, N>(items: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Name>,
    {
        Self::Names(names(items))
    }

    /// Parse command-line words into a request.
    ///
    /// A single `default` or `all` word selects the sentinel; anything else
    /// must be a list of valid names. An empty word list is an empty request.
    pub fn parse<S: AsRef<str>>(words: &[S]) -> Result<Self, DomainError> {
        if let [word] = words {
            match word.as_ref() {
                DEFAULT_SENTINEL => return Ok(Self::Default),
                ALL_SENTINEL => return Ok(Self::All),
                _ => {}
            }
        }

        words
            .iter()
            .map(|w| Name::try_new(w.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::Names)
    }

    /// `true` if `name` was spelled out in this request.
    pub fn mentions(&self, name: &Name) -> bool {
        match self {
            Self::Names(list) => list.contains(name),
            Self::Default | Self::All => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Names(list) if list.is_empty())
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str(DEFAULT_SENTINEL),
            Self::All => f.write_str(ALL_SENTINEL),
            Self::Names(list) => {
                let joined: Vec<&str> = list.iter().map(Name::as_str).collect();
                write!(f, "[{}]", joined.join(", "))
            }
        }
    }
}

impl From<Vec<Name>> for Request {
    fn from(list: Vec<Name>) -> Self {
        Self::Names(list)
    }
}
