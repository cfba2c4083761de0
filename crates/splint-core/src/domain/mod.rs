// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Splint.
//!
//! This module holds the feature graph: names, requests, descriptors, the
//! dependency graph and the registry that builds it. Nothing here performs
//! I/O or touches a runtime object; descriptors only carry factories the
//! application layer calls.
//!
//! ## Invariants kept here
//!
//! - **One namespace**: a name is a feature or a category, never both
//! - **Acyclic**: no registration may close a dependency cycle
//! - **Single owner**: each feature belongs to exactly one category
//! - **All or nothing**: a failed registration changes nothing

// Public API - what the world sees
pub mod descriptor;
pub mod error;
pub mod graph;
pub mod project;
pub mod registry;
pub mod value_objects;

// Re-exports for convenience
pub use descriptor::{
    CategoryDescriptor, CategoryDescriptorBuilder, CategoryFactory, FeatureDescriptor,
    FeatureFactory, MemberFactories, default_category_factory,
};

pub use error::{DomainError, ErrorCategory};

pub use graph::DependencyGraph;

pub use project::ProjectState;

pub use registry::{Registry, SINK_PREFIX};

pub use value_objects::{ALL_SENTINEL, DEFAULT_SENTINEL, Mode, Name, Request, names};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    // ========================================================================
    // Value Object Tests
    // ========================================================================

    #[test]
    fn name_rejects_empty_whitespace_and_sentinels() {
        assert!(Name::try_new("").is_err());
        assert!(Name::try_new("two words").is_err());
        assert!(Name::try_new("default").is_err());
        assert!(Name::try_new("all").is_err());
        assert!(Name::try_new("cmake").is_ok());
    }

    #[test]
    fn name_parses_from_str() {
        let name = Name::from_str("ctest").unwrap();
        assert_eq!(name.as_str(), "ctest");
        assert_eq!(name.to_string(), "ctest");
    }

    #[test]
    #[should_panic(expected = "cannot be empty")]
    fn name_new_panics_on_invalid() {
        let _ = Name::new("");
    }

    #[test]
    fn request_parses_sentinels() {
        assert_eq!(Request::parse(&["default"]).unwrap(), Request::Default);
        assert_eq!(Request::parse(&["all"]).unwrap(), Request::All);
        assert_eq!(
            Request::parse(&["cmake", "ctest"]).unwrap(),
            Request::names(["cmake", "ctest"])
        );
    }

    #[test]
    fn request_rejects_sentinel_inside_a_list() {
        let err = Request::parse(&["cmake", "all"]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidName { .. }));
    }

    #[test]
    fn empty_word_list_is_an_empty_request() {
        let request = Request::parse::<&str>(&[]).unwrap();
        assert!(request.is_empty());
    }

    #[test]
    fn request_displays_for_logs() {
        assert_eq!(Request::Default.to_string(), "default");
        assert_eq!(Request::names(["a", "b"]).to_string(), "[a, b]");
    }

    #[test]
    fn request_mentions_only_explicit_names() {
        let request = Request::names(["build"]);
        assert!(request.mentions(&Name::new("build")));
        assert!(!Request::Default.mentions(&Name::new("build")));
    }

    // ========================================================================
    // Error Tests
    // ========================================================================

    #[test]
    fn cycle_error_shows_path() {
        let err = DomainError::Cycle {
            cycle: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(err.to_string(), "Dependency cycle detected: a -> b -> a");
        assert_eq!(err.category(), ErrorCategory::Compatibility);
        assert!(!err.suggestions().is_empty());
    }
}
