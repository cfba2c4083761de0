//! Engine - drives category and feature runtime objects.
//!
//! The engine owns the active category instances. Every mutating call
//! follows the same two steps:
//! 1. Resolve and validate the whole request against a snapshot
//! 2. Apply the resulting order, hook by hook
//!
//! Step 1 raises every resolution error (unknown names, conflicts), so a
//! request that fails never leaves a partial state change behind.

use indexmap::IndexMap;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Category, Feature, LifecycleObserver, Phase},
        resolver::{ActiveSnapshot, Plan, Resolver},
        runtime::{InvokeContext, Notifier},
    },
    domain::{Name, Registry, Request},
    error::{SplintError, SplintResult},
};

/// Prefix of a feature flag in [`Engine::feature_flags`].
pub const FEATURE_FLAG_PREFIX: &str = "project_feature_";

/// Prefix of a category flag in [`Engine::feature_flags`].
pub const CATEGORY_FLAG_PREFIX: &str = "project_feature_category_";

/// Activity of one category and its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStatus {
    pub name: Name,
    pub mono: bool,
    /// `true` for the implicit category holding unclaimed features.
    pub implicit: bool,
    pub active: bool,
    pub features: Vec<FeatureStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureStatus {
    pub name: Name,
    pub active: bool,
    pub default: bool,
    pub requires: Vec<Name>,
}

/// The activation engine.
pub struct Engine {
    registry: Registry,
    active: IndexMap<Name, Box<dyn Category>>,
    observer: Option<Box<dyn LifecycleObserver>>,
}

impl Engine {
    /// Create an engine over a fully registered feature graph.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            active: IndexMap::new(),
            observer: None,
        }
    }

    /// Install a lifecycle observer.
    pub fn with_observer(mut self, observer: Box<dyn LifecycleObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    // -------------------------------------------------------------------------
    // Activation
    // -------------------------------------------------------------------------

    /// Activate `request`, running one-time setup hooks if `set_up`.
    #[instrument(skip(self, request), fields(request = %request))]
    pub fn activate(&mut self, request: &Request, set_up: bool) -> SplintResult<Plan> {
        let snapshot = self.snapshot();
        let plan = Resolver::new(&self.registry, &snapshot).checked_activation(request)?;

        let subject = request.to_string();
        let notifier = Notifier::new(self.observer.as_deref());
        notifier.before(Phase::FeatureActivation, &subject);

        for name in &plan.total_order {
            let owner = self.registry.owner_of(name.as_str()).ok_or_else(|| orphan(name))?;
            let category_name = owner.name();

            if !self.active.contains_key(category_name) {
                let subject = category_name.as_str();
                let members = self.registry.member_factories(owner);
                let factory = owner.factory();

                let mut category =
                    notifier.around(Phase::CategoryCreate, subject, || Ok(factory(members)))?;
                if set_up {
                    notifier.around(Phase::CategorySetUp, subject, || category.set_up())?;
                }
                notifier.around(Phase::CategoryActivate, subject, || category.activate())?;

                debug!(category = %category_name, "Category instance created");
                self.active.insert(category_name.clone(), category);
            }

            if let Some(category) = self.active.get_mut(category_name) {
                if let Err(e) = category.activate_feature(name, set_up, &notifier) {
                    // Don't leave an instance behind with nothing active in it.
                    if category.active_feature_names().is_empty() {
                        self.active.shift_remove(category_name);
                    }
                    return Err(e);
                }
            }
        }

        notifier.after(Phase::FeatureActivation, &subject);
        info!(
            total = ?names(&plan.total_order),
            requested = ?names(&plan.flatten_order),
            "Activated"
        );
        Ok(plan)
    }

    /// Deactivate `request`, running tear-down hooks if `tear_down`.
    /// Names in `skip` stay active even if they would otherwise go.
    ///
    /// The engine does not remember why a feature became active: a
    /// dependency that was active before the request pulled it in is
    /// removed along with the request unless it is passed in `skip`.
    #[instrument(skip(self, request, skip), fields(request = %request))]
    pub fn deactivate(
        &mut self,
        request: &Request,
        tear_down: bool,
        skip: &[Name],
    ) -> SplintResult<Plan> {
        let snapshot = self.snapshot();
        let plan = Resolver::new(&self.registry, &snapshot).checked_deactivation(request, skip)?;

        let subject = request.to_string();
        let notifier = Notifier::new(self.observer.as_deref());
        notifier.before(Phase::FeatureDeactivation, &subject);

        for name in &plan.total_order {
            let owner = self.registry.owner_of(name.as_str()).ok_or_else(|| orphan(name))?;
            let category_name = owner.name();
            let Some(category) = self.active.get_mut(category_name) else {
                continue;
            };

            category.deactivate_feature(name, tear_down, &notifier)?;

            if category.active_feature_names().is_empty() {
                let subject = category_name.as_str();
                notifier.around(Phase::CategoryDeactivate, subject, || category.deactivate())?;
                if tear_down {
                    notifier.around(Phase::CategoryTearDown, subject, || category.tear_down())?;
                }
                self.active.shift_remove(category_name);
                debug!(category = %category_name, "Category instance discarded");
            }
        }

        notifier.after(Phase::FeatureDeactivation, &subject);
        info!(
            total = ?names(&plan.total_order),
            requested = ?names(&plan.flatten_order),
            "Deactivated"
        );
        Ok(plan)
    }

    /// Run the default action of an active feature or category.
    ///
    /// Returns whatever the feature emitted through its [`InvokeContext`].
    #[instrument(skip(self))]
    pub fn invoke(&self, name: &str, action: Option<&str>) -> SplintResult<Vec<String>> {
        let target = Name::try_new(name)?;

        if self.registry.is_feature(name) {
            let category = self
                .registry
                .owner_of(name)
                .and_then(|owner| self.active.get(owner.name()))
                .filter(|c| c.is_active_feature(name))
                .ok_or_else(|| not_active(name))?;

            let ctx = InvokeContext::new(self, &target, action);
            category.handle_feature(name, &ctx)?;
            return Ok(ctx.into_output());
        }

        if self.registry.is_category(name) {
            let category = self.active.get(name).ok_or_else(|| not_active(name))?;
            let ctx = InvokeContext::new(self, &target, action);
            category.handle(&ctx)?;
            return Ok(ctx.into_output());
        }

        Err(ApplicationError::UnknownName {
            names: vec![name.to_string()],
        }
        .into())
    }

    // -------------------------------------------------------------------------
    // Dry runs
    // -------------------------------------------------------------------------

    /// What `activate` would do, with every conflict check, without doing it.
    pub fn activation_order(&self, request: &Request) -> SplintResult<Plan> {
        let snapshot = self.snapshot();
        Resolver::new(&self.registry, &snapshot).checked_activation(request)
    }

    /// What `deactivate` would do, without doing it.
    pub fn deactivation_order(&self, request: &Request, skip: &[Name]) -> SplintResult<Plan> {
        let snapshot = self.snapshot();
        Resolver::new(&self.registry, &snapshot).checked_deactivation(request, skip)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn get_active_feature(&self, name: &str) -> Option<&dyn Feature> {
        let owner = self.registry.owner_of(name)?;
        self.active.get(owner.name())?.active_feature(name)
    }

    /// Typed lookup of a collaborating feature.
    pub fn get_active_feature_as<T: Feature>(&self, name: &str) -> Option<&T> {
        self.get_active_feature(name)?.as_any().downcast_ref::<T>()
    }

    pub fn get_active_category(&self, name: &str) -> Option<&dyn Category> {
        self.active.get(name).map(|c| c.as_ref())
    }

    /// The one active member of `category`.
    pub fn get_singular_active_feature(&self, category: &str) -> SplintResult<&dyn Feature> {
        let instance = self.active.get(category).ok_or_else(|| not_active(category))?;

        match instance.active_feature_names().as_slice() {
            [only] => instance.active_feature(only.as_str()).ok_or_else(|| {
                SplintError::Internal {
                    message: format!("category '{category}' lost active feature '{only}'"),
                }
            }),
            others => Err(ApplicationError::NotSingular {
                category: category.to_string(),
                count: others.len(),
            }
            .into()),
        }
    }

    pub fn is_active(&self, name: &str) -> bool {
        if self.registry.is_category(name) {
            return self.active.contains_key(name);
        }
        self.get_active_feature(name).is_some()
    }

    /// Active category names in creation order, the sink included.
    pub fn active_category_names(&self) -> Vec<Name> {
        self.active.keys().cloned().collect()
    }

    /// Active feature names grouped by category.
    pub fn active_feature_names(&self) -> Vec<Name> {
        self.active
            .values()
            .flat_map(|c| c.active_feature_names())
            .collect()
    }

    pub fn snapshot(&self) -> ActiveSnapshot {
        let mut snapshot = ActiveSnapshot::new();
        for (category, instance) in &self.active {
            for feature in instance.active_feature_names() {
                snapshot.insert(category.clone(), feature);
            }
        }
        snapshot
    }

    /// Every category with its members' activity, sink last.
    pub fn status(&self) -> Vec<CategoryStatus> {
        self.registry
            .all_categories()
            .map(|category| {
                let instance = self.active.get(category.name());
                CategoryStatus {
                    name: category.name().clone(),
                    mono: category.is_mono(),
                    implicit: self.registry.is_sink(category.name().as_str()),
                    active: instance.is_some(),
                    features: category
                        .members()
                        .iter()
                        .map(|member| FeatureStatus {
                            name: member.clone(),
                            active: instance.is_some_and(|c| c.is_active_feature(member.as_str())),
                            default: category.defaults().contains(member),
                            requires: self
                                .registry
                                .feature(member.as_str())
                                .map(|f| f.requirements().iter().cloned().collect())
                                .unwrap_or_default(),
                        })
                        .collect(),
                }
            })
            .collect()
    }

    /// Boolean flags for template renderers: one per feature and one per
    /// explicit category, keyed by prefixed name.
    pub fn feature_flags(&self) -> IndexMap<String, bool> {
        let features = self
            .registry
            .features()
            .map(|f| (format!("{FEATURE_FLAG_PREFIX}{}", f.name()), self.is_active(f.name().as_str())));
        let categories = self.registry.categories().map(|c| {
            (
                format!("{CATEGORY_FLAG_PREFIX}{}", c.name()),
                self.active.contains_key(c.name()),
            )
        });
        features.chain(categories).collect()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("active", &self.snapshot())
            .field("observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

fn names(list: &[Name]) -> Vec<&str> {
    list.iter().map(Name::as_str).collect()
}

fn not_active(name: &str) -> SplintError {
    ApplicationError::NotActive {
        name: name.to_string(),
    }
    .into()
}

fn orphan(name: &Name) -> SplintError {
    SplintError::Internal {
        message: format!("feature '{name}' has no owning category"),
    }
}
