//! Persisted project state.

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Name;

/// The features a project has explicitly enabled.
///
/// Only requested features are recorded (a plan's `flatten_order`), never
/// the dependencies pulled in to satisfy them. Reopening a project
/// re-activates this list and lets resolution pull the rest back in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectState {
    pub features: Vec<Name>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectState {
    pub fn new(features: Vec<Name>) -> Self {
        Self {
            features,
            updated_at: Utc::now(),
        }
    }

    /// Record `added` after the existing features, without duplicates.
    pub fn with_added(&self, added: &[Name]) -> Self {
        let mut features: IndexSet<Name> = self.features.iter().cloned().collect();
        features.extend(added.iter().cloned());
        Self::new(features.into_iter().collect())
    }

    /// Drop `removed` from the recorded features.
    pub fn with_removed(&self, removed: &[Name]) -> Self {
        let features = self
            .features
            .iter()
            .filter(|f| !removed.contains(f))
            .cloned()
            .collect();
        Self::new(features)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.features.iter().any(|f| f.as_str() == name)
    }
}

impl Default for ProjectState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::names;

    #[test]
    fn added_features_keep_order_without_duplicates() {
        let state = ProjectState::new(names(["cmake", "ctest"]));
        let next = state.with_added(&names(["ctest", "readme"]));

        let got: Vec<&str> = next.features.iter().map(Name::as_str).collect();
        assert_eq!(got, vec!["cmake", "ctest", "readme"]);
    }

    #[test]
    fn removed_features_are_dropped() {
        let state = ProjectState::new(names(["cmake", "ctest", "readme"]));
        let next = state.with_removed(&names(["ctest"]));

        assert!(!next.contains("ctest"));
        assert_eq!(next.features.len(), 2);
    }

    #[test]
    fn state_serializes_names_as_plain_strings() {
        let state = ProjectState::new(names(["cmake"]));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["features"], serde_json::json!(["cmake"]));

        let bad = serde_json::json!({ "features": ["all"], "updated_at": json["updated_at"] });
        assert!(serde_json::from_value::<ProjectState>(bad).is_err());
    }
}
