//! Runtime pieces shared by the engine and category implementations.
//!
//! - [`Notifier`] threads the optional lifecycle observer through every hook
//! - [`FeatureCategory`] is the stock category runtime
//! - [`InvokeContext`] is what a feature sees while handling an action

use std::any::Any;
use std::cell::RefCell;

use indexmap::IndexMap;
use tracing::trace;

use crate::application::ApplicationError;
use crate::application::ports::{
    Category, Feature, LifecycleEvent, LifecycleObserver, Order, Phase,
};
use crate::application::services::Engine;
use crate::domain::{MemberFactories, Name};
use crate::error::{SplintError, SplintResult};

// ── Notifier ─────────────────────────────────────────────────────────────────

/// Emits lifecycle events to an optional observer.
///
/// Events also go to `tracing` at trace level, so instrumentation works
/// without an observer installed.
#[derive(Clone, Copy, Default)]
pub struct Notifier<'a> {
    observer: Option<&'a dyn LifecycleObserver>,
}

impl<'a> Notifier<'a> {
    pub fn new(observer: Option<&'a dyn LifecycleObserver>) -> Self {
        Self { observer }
    }

    /// A notifier that only traces.
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn notify(&self, phase: Phase, order: Order, subject: &str) {
        trace!(phase = %phase, ?order, subject, "lifecycle");
        if let Some(observer) = self.observer {
            observer.notify(&LifecycleEvent {
                phase,
                order,
                subject: subject.to_string(),
            });
        }
    }

    pub fn before(&self, phase: Phase, subject: &str) {
        self.notify(phase, Order::Before, subject);
    }

    pub fn after(&self, phase: Phase, subject: &str) {
        self.notify(phase, Order::After, subject);
    }

    /// Run `step` between a before and an after event. No after event is
    /// emitted if the step fails.
    pub fn around<T>(
        &self,
        phase: Phase,
        subject: &str,
        step: impl FnOnce() -> SplintResult<T>,
    ) -> SplintResult<T> {
        self.before(phase, subject);
        let out = step()?;
        self.after(phase, subject);
        Ok(out)
    }
}

// ── FeatureCategory ──────────────────────────────────────────────────────────

/// Stock category runtime: creates members from their factories and keeps
/// them until deactivated.
pub struct FeatureCategory {
    members: MemberFactories,
    active: IndexMap<Name, Box<dyn Feature>>,
}

impl FeatureCategory {
    pub fn new(members: MemberFactories) -> Self {
        Self {
            members,
            active: IndexMap::new(),
        }
    }
}

impl Category for FeatureCategory {
    /// Runs every active member's action in activation order.
    fn handle(&self, ctx: &InvokeContext<'_>) -> SplintResult<()> {
        for feature in self.active.values() {
            feature.handle(ctx)?;
        }
        Ok(())
    }

    fn activate_feature(
        &mut self,
        name: &Name,
        set_up: bool,
        notifier: &Notifier<'_>,
    ) -> SplintResult<()> {
        if self.active.contains_key(name) {
            return Ok(());
        }

        let factory = self.members.get(name).ok_or_else(|| SplintError::Internal {
            message: format!("'{name}' is not a member of this category"),
        })?;

        let subject = name.as_str();
        let mut feature = notifier.around(Phase::FeatureCreate, subject, || Ok(factory()))?;
        if set_up {
            notifier.around(Phase::FeatureSetUp, subject, || feature.set_up())?;
        }
        notifier.around(Phase::FeatureActivate, subject, || feature.activate())?;

        self.active.insert(name.clone(), feature);
        Ok(())
    }

    fn deactivate_feature(
        &mut self,
        name: &Name,
        tear_down: bool,
        notifier: &Notifier<'_>,
    ) -> SplintResult<()> {
        let Some(mut feature) = self.active.shift_remove(name) else {
            return Ok(());
        };

        let subject = name.as_str();
        notifier.around(Phase::FeatureDeactivate, subject, || feature.deactivate())?;
        if tear_down {
            notifier.around(Phase::FeatureTearDown, subject, || feature.tear_down())?;
        }
        Ok(())
    }

    fn handle_feature(&self, name: &str, ctx: &InvokeContext<'_>) -> SplintResult<()> {
        match self.active.get(name) {
            Some(feature) => feature.handle(ctx),
            None => Err(ApplicationError::NotActive { name: name.into() }.into()),
        }
    }

    fn is_active_feature(&self, name: &str) -> bool {
        self.active.contains_key(name)
    }

    fn active_feature_names(&self) -> Vec<Name> {
        self.active.keys().cloned().collect()
    }

    fn active_feature(&self, name: &str) -> Option<&dyn Feature> {
        self.active.get(name).map(|f| f.as_ref())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A feature with no behaviour. Placeholder for features that exist only
/// to shape the graph.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopFeature;

impl Feature for NoopFeature {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ── InvokeContext ────────────────────────────────────────────────────────────

/// What a feature sees while running an action: the engine's query surface,
/// the action word if one was given, and a buffer for output lines.
pub struct InvokeContext<'a> {
    engine: &'a Engine,
    target: &'a Name,
    action: Option<&'a str>,
    output: RefCell<Vec<String>>,
}

impl<'a> InvokeContext<'a> {
    pub fn new(engine: &'a Engine, target: &'a Name, action: Option<&'a str>) -> Self {
        Self {
            engine,
            target,
            action,
            output: RefCell::new(Vec::new()),
        }
    }

    pub fn engine(&self) -> &'a Engine {
        self.engine
    }

    /// The name that was invoked (a feature or a category).
    pub fn target(&self) -> &Name {
        self.target
    }

    pub fn action(&self) -> Option<&str> {
        self.action
    }

    /// Queue a line of output for the caller.
    pub fn emit(&self, line: impl Into<String>) {
        self.output.borrow_mut().push(line.into());
    }

    pub fn into_output(self) -> Vec<String> {
        self.output.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::ports::MockLifecycleObserver;
    use crate::domain::FeatureFactory;

    fn category(names: &[&str]) -> FeatureCategory {
        let factory: FeatureFactory = Arc::new(|| Box::new(NoopFeature) as Box<dyn Feature>);
        FeatureCategory::new(
            names
                .iter()
                .map(|n| (Name::new(*n), factory.clone()))
                .collect(),
        )
    }

    #[test]
    fn activating_twice_creates_once() {
        let mut observer = MockLifecycleObserver::new();
        observer
            .expect_notify()
            .withf(|e| e.phase == Phase::FeatureCreate && e.order == Order::Before)
            .times(1)
            .return_const(());
        observer
            .expect_notify()
            .withf(|e| e.phase != Phase::FeatureCreate || e.order != Order::Before)
            .return_const(());

        let notifier = Notifier::new(Some(&observer));
        let mut cat = category(&["bravo"]);
        let bravo = Name::new("bravo");

        cat.activate_feature(&bravo, false, &notifier).unwrap();
        cat.activate_feature(&bravo, false, &notifier).unwrap();

        assert!(cat.is_active_feature("bravo"));
        assert_eq!(cat.active_feature_names(), vec![bravo]);
    }

    #[test]
    fn set_up_and_tear_down_are_optional_phases() {
        let mut observer = MockLifecycleObserver::new();
        observer
            .expect_notify()
            .withf(|e| matches!(e.phase, Phase::FeatureSetUp | Phase::FeatureTearDown))
            .never();
        observer
            .expect_notify()
            .withf(|e| !matches!(e.phase, Phase::FeatureSetUp | Phase::FeatureTearDown))
            .return_const(());

        let notifier = Notifier::new(Some(&observer));
        let mut cat = category(&["bravo"]);
        let bravo = Name::new("bravo");

        cat.activate_feature(&bravo, false, &notifier).unwrap();
        cat.deactivate_feature(&bravo, false, &notifier).unwrap();
        assert!(cat.active_feature_names().is_empty());
    }

    #[test]
    fn deactivating_inactive_member_is_a_no_op() {
        let mut cat = category(&["bravo"]);
        cat.deactivate_feature(&Name::new("bravo"), true, &Notifier::silent())
            .unwrap();
        assert!(!cat.is_active_feature("bravo"));
    }

    #[test]
    fn unknown_member_is_an_internal_error() {
        let mut cat = category(&["bravo"]);
        let err = cat
            .activate_feature(&Name::new("zulu"), false, &Notifier::silent())
            .unwrap_err();
        assert!(matches!(err, SplintError::Internal { .. }));
    }
}
