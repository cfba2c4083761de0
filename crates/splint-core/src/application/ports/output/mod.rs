//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the engine needs from the things it drives.
//! Concrete features and categories implement [`Feature`] and [`Category`];
//! the `splint-adapters` crate provides observers and stores.

use std::any::Any;
use std::fmt;
use std::path::Path;

use crate::application::runtime::{InvokeContext, Notifier};
use crate::domain::{Name, ProjectState};
use crate::error::SplintResult;

/// Runtime object behind a registered feature.
///
/// Every hook defaults to doing nothing, so a feature only implements the
/// phases it cares about.
pub trait Feature: Any {
    /// One-time setup, only on first-ever creation (e.g. a new project).
    fn set_up(&mut self) -> SplintResult<()> {
        Ok(())
    }

    fn activate(&mut self) -> SplintResult<()> {
        Ok(())
    }

    fn deactivate(&mut self) -> SplintResult<()> {
        Ok(())
    }

    /// Permanent removal.
    fn tear_down(&mut self) -> SplintResult<()> {
        Ok(())
    }

    /// Perform the feature's default action.
    fn handle(&self, _ctx: &InvokeContext<'_>) -> SplintResult<()> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any;
}

/// Runtime object behind a category instance.
///
/// A category owns its active member features. The engine only creates
/// and destroys categories; members come and go through
/// [`activate_feature`](Category::activate_feature) and
/// [`deactivate_feature`](Category::deactivate_feature), both of which must
/// be no-ops when the member is already in the target state.
pub trait Category: Any {
    fn set_up(&mut self) -> SplintResult<()> {
        Ok(())
    }

    fn activate(&mut self) -> SplintResult<()> {
        Ok(())
    }

    fn deactivate(&mut self) -> SplintResult<()> {
        Ok(())
    }

    fn tear_down(&mut self) -> SplintResult<()> {
        Ok(())
    }

    /// The category's own default action.
    fn handle(&self, ctx: &InvokeContext<'_>) -> SplintResult<()>;

    fn activate_feature(
        &mut self,
        name: &Name,
        set_up: bool,
        notifier: &Notifier<'_>,
    ) -> SplintResult<()>;

    fn deactivate_feature(
        &mut self,
        name: &Name,
        tear_down: bool,
        notifier: &Notifier<'_>,
    ) -> SplintResult<()>;

    /// Run an active member's default action.
    fn handle_feature(&self, name: &str, ctx: &InvokeContext<'_>) -> SplintResult<()>;

    fn is_active_feature(&self, name: &str) -> bool;

    /// Active members in activation order.
    fn active_feature_names(&self) -> Vec<Name>;

    fn active_feature(&self, name: &str) -> Option<&dyn Feature>;

    fn as_any(&self) -> &dyn Any;
}

// ── Lifecycle notifications ──────────────────────────────────────────────────

/// Lifecycle step being observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// A whole `activate` call.
    FeatureActivation,
    /// A whole `deactivate` call.
    FeatureDeactivation,
    CategoryCreate,
    CategorySetUp,
    CategoryActivate,
    CategoryDeactivate,
    CategoryTearDown,
    FeatureCreate,
    FeatureSetUp,
    FeatureActivate,
    FeatureDeactivate,
    FeatureTearDown,
}

impl Phase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FeatureActivation => "feature-activation",
            Self::FeatureDeactivation => "feature-deactivation",
            Self::CategoryCreate => "category-create",
            Self::CategorySetUp => "category-set-up",
            Self::CategoryActivate => "category-activate",
            Self::CategoryDeactivate => "category-deactivate",
            Self::CategoryTearDown => "category-tear-down",
            Self::FeatureCreate => "feature-create",
            Self::FeatureSetUp => "feature-set-up",
            Self::FeatureActivate => "feature-activate",
            Self::FeatureDeactivate => "feature-deactivate",
            Self::FeatureTearDown => "feature-tear-down",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    Before,
    After,
}

/// One observed lifecycle step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    pub phase: Phase,
    pub order: Order,
    /// Feature or category name, or the request for batch phases.
    pub subject: String,
}

/// Port for lifecycle instrumentation.
///
/// Implemented by:
/// - `splint_adapters::observer::TracingObserver` (production)
/// - `splint_adapters::observer::RecordingObserver` (testing)
///
/// Observers see every step but cannot influence one: `notify` has no
/// return value.
#[cfg_attr(test, mockall::automock)]
pub trait LifecycleObserver {
    fn notify(&self, event: &LifecycleEvent);
}

// ── Project state ────────────────────────────────────────────────────────────

/// Port for persisting a project's enabled features.
///
/// Implemented by:
/// - `splint_adapters::store::JsonProjectStore` (production)
/// - `splint_adapters::store::MemoryProjectStore` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait ProjectStore {
    /// Load state for the project rooted at `root`, `None` if there is none.
    fn load(&self, root: &Path) -> SplintResult<Option<ProjectState>>;

    /// Persist state, creating the project root if needed.
    fn save(&self, root: &Path, state: &ProjectState) -> SplintResult<()>;
}
