//! Request resolution: flattening, closures, orders and conflict checks.
//!
//! The resolver is a pure function of the [`Registry`] and a snapshot of
//! what is currently active. It never touches runtime objects, which is
//! what lets the engine validate a whole request before mutating anything.

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{Mode, Name, Registry, Request};
use crate::error::{SplintError, SplintResult};

// ── ActiveSnapshot ───────────────────────────────────────────────────────────

/// Which members of which categories are active right now.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSnapshot {
    categories: IndexMap<Name, IndexSet<Name>>,
}

impl ActiveSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: Name, feature: Name) {
        self.categories.entry(category).or_default().insert(feature);
    }

    pub fn is_category_active(&self, category: &str) -> bool {
        self.categories
            .get(category)
            .is_some_and(|members| !members.is_empty())
    }

    pub fn is_feature_active(&self, feature: &str) -> bool {
        self.categories.values().any(|m| m.contains(feature))
    }

    /// Active members of `category`, empty if it has no instance.
    pub fn members(&self, category: &str) -> impl Iterator<Item = &Name> {
        self.categories.get(category).into_iter().flatten()
    }

    /// Every active feature, grouped by category in activation order.
    pub fn features(&self) -> impl Iterator<Item = &Name> {
        self.categories.values().flatten()
    }

    pub fn categories(&self) -> impl Iterator<Item = &Name> {
        self.categories
            .iter()
            .filter(|(_, members)| !members.is_empty())
            .map(|(name, _)| name)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.values().all(IndexSet::is_empty)
    }
}

// ── Plan ─────────────────────────────────────────────────────────────────────

/// The result of resolving a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    /// Every feature to process, in execution order.
    pub total_order: Vec<Name>,
    /// The part of `total_order` the caller asked for. This is what gets
    /// persisted as the project's enabled features.
    pub flatten_order: Vec<Name>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.total_order.is_empty()
    }
}

// ── Resolver ─────────────────────────────────────────────────────────────────

pub struct Resolver<'a> {
    registry: &'a Registry,
    active: &'a ActiveSnapshot,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a Registry, active: &'a ActiveSnapshot) -> Self {
        Self { registry, active }
    }

    /// Reject unknown names and sentinels used in the wrong direction.
    pub fn validate(&self, request: &Request, mode: Mode) -> SplintResult<()> {
        match (request, mode) {
            (Request::Default, Mode::Deactivation) | (Request::All, Mode::Activation) => {
                Err(ApplicationError::InvalidRequest {
                    request: request.to_string(),
                    mode,
                }
                .into())
            }
            (Request::Names(names), _) => {
                let unknown: Vec<String> = names
                    .iter()
                    .filter(|n| !self.registry.contains(n.as_str()))
                    .map(ToString::to_string)
                    .collect();
                if unknown.is_empty() {
                    Ok(())
                } else {
                    Err(ApplicationError::UnknownName { names: unknown }.into())
                }
            }
            _ => Ok(()),
        }
    }

    /// Replace category names with concrete features.
    ///
    /// Activation expands a category to its defaults; `default` expands to
    /// the defaults of every category, except a mono category that already
    /// runs a member, which keeps it.
    /// Deactivation expands a category to its active members and drops
    /// features that are not active.
    pub fn flatten(&self, request: &Request, mode: Mode) -> SplintResult<IndexSet<Name>> {
        self.validate(request, mode)?;

        let flat = match (request, mode) {
            (Request::Default, _) => self
                .registry
                .categories()
                .filter(|c| !(c.is_mono() && self.active.is_category_active(c.name().as_str())))
                .flat_map(|c| c.defaults().iter().cloned())
                .collect(),
            (Request::All, _) => self.active.features().cloned().collect(),
            (Request::Names(names), Mode::Activation) => names
                .iter()
                .flat_map(|name| match self.registry.category(name.as_str()) {
                    Some(category) => category.defaults().iter().cloned().collect::<Vec<_>>(),
                    None => vec![name.clone()],
                })
                .collect(),
            (Request::Names(names), Mode::Deactivation) => names
                .iter()
                .flat_map(|name| {
                    if self.registry.is_category(name.as_str()) {
                        self.active.members(name.as_str()).cloned().collect::<Vec<_>>()
                    } else if self.active.is_feature_active(name.as_str()) {
                        vec![name.clone()]
                    } else {
                        Vec::new()
                    }
                })
                .collect(),
        };

        Ok(flat)
    }

    /// Transitive dependencies of `ids`, ids included. May contain
    /// category names.
    pub fn dependency_closure<I>(&self, ids: I) -> IndexSet<Name>
    where
        I: IntoIterator<Item = Name>,
    {
        self.registry.requirements().closure(ids)
    }

    // -------------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------------

    /// Activation order of `request`, without conflict checks.
    pub fn activation_order(&self, request: &Request) -> SplintResult<Plan> {
        let flat = self.flatten(request, Mode::Activation)?;
        let mut working = self.dependency_closure(flat.iter().cloned());

        // A required category is satisfied by any member already in the
        // working set or by its active instance; otherwise it pulls in its
        // defaults, whose own dependencies may name further categories.
        loop {
            let pending: Vec<Name> = working
                .iter()
                .filter(|n| self.registry.is_category(n.as_str()))
                .filter(|c| !self.category_satisfied(c, &working))
                .cloned()
                .collect();
            if pending.is_empty() {
                break;
            }

            let mut seeds = working.clone();
            for category in &pending {
                if let Some(descriptor) = self.registry.category(category.as_str()) {
                    seeds.extend(descriptor.defaults().iter().cloned());
                }
            }
            working = self.dependency_closure(seeds);
        }

        let total_order = self.ordered(&working, false)?;
        let flatten_order = total_order
            .iter()
            .filter(|n| flat.contains(*n))
            .cloned()
            .collect();

        debug!(request = %request, ?total_order, "Resolved activation order");
        Ok(Plan {
            total_order,
            flatten_order,
        })
    }

    /// Deactivation order of `request`, without conflict checks.
    ///
    /// Dependencies of the requested features go too unless something that
    /// stays active still needs them. Names in `skip` are never removed.
    pub fn deactivation_order(&self, request: &Request, skip: &[Name]) -> SplintResult<Plan> {
        let flat = self.flatten(request, Mode::Deactivation)?;

        let mut working = self.active_closure(flat.iter().cloned());
        let skipped = self.expand_active(skip.iter().cloned());
        working.retain(|n| !skipped.contains(n));

        // Prune implicit dependencies that survivors still rely on. Each
        // removal can strand a deeper dependency's only remover, so repeat.
        loop {
            let kept: Vec<Name> = working
                .iter()
                .filter(|f| !flat.contains(*f))
                .filter(|f| {
                    self.dependents(f, &working)
                        .iter()
                        .any(|d| !working.contains(d))
                })
                .cloned()
                .collect();
            if kept.is_empty() {
                break;
            }
            working.retain(|n| !kept.contains(n));
        }

        let total_order = self.ordered(&working, true)?;
        let flatten_order = total_order
            .iter()
            .filter(|n| flat.contains(*n))
            .cloned()
            .collect();

        debug!(request = %request, ?total_order, "Resolved deactivation order");
        Ok(Plan {
            total_order,
            flatten_order,
        })
    }

    // -------------------------------------------------------------------------
    // Conflict detection
    // -------------------------------------------------------------------------

    /// More than one member of a mono category in a single plan.
    pub fn mono_conflicts(&self, plan: &Plan) -> SplintResult<()> {
        let mut seen: IndexMap<&Name, Vec<&Name>> = IndexMap::new();
        for feature in &plan.total_order {
            if let Some(owner) = self.registry.owner_of(feature.as_str())
                && owner.is_mono()
            {
                seen.entry(owner.name()).or_default().push(feature);
            }
        }

        match seen.into_iter().find(|(_, members)| members.len() > 1) {
            Some((category, members)) => Err(ApplicationError::MonoConflict {
                category: category.to_string(),
                features: members.iter().map(ToString::to_string).collect(),
            }
            .into()),
            None => Ok(()),
        }
    }

    /// A mono category already runs a different member than the plan wants.
    pub fn activation_conflicts(&self, plan: &Plan, request: &Request) -> SplintResult<()> {
        for feature in &plan.total_order {
            let Some(owner) = self.registry.owner_of(feature.as_str()) else {
                continue;
            };
            if !owner.is_mono() {
                continue;
            }

            if let Some(active) = self
                .active
                .members(owner.name().as_str())
                .find(|m| *m != feature)
            {
                return Err(ApplicationError::ActivationConflict {
                    category: owner.name().to_string(),
                    feature: feature.to_string(),
                    active: active.to_string(),
                    explicit: request.mentions(feature) || request.mentions(owner.name()),
                }
                .into());
            }
        }
        Ok(())
    }

    /// A feature that stays active depends on something being removed.
    pub fn deactivation_conflicts(&self, plan: &Plan) -> SplintResult<()> {
        let removing: IndexSet<Name> = plan.total_order.iter().cloned().collect();

        for feature in &plan.total_order {
            if let Some(dependent) = self
                .dependents(feature, &removing)
                .into_iter()
                .find(|d| !removing.contains(d))
            {
                return Err(ApplicationError::DeactivationDependency {
                    feature: feature.to_string(),
                    dependent: dependent.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Activation order with every conflict check applied.
    pub fn checked_activation(&self, request: &Request) -> SplintResult<Plan> {
        let plan = self.activation_order(request)?;
        self.mono_conflicts(&plan)?;
        self.activation_conflicts(&plan, request)?;
        Ok(plan)
    }

    /// Deactivation order with every conflict check applied.
    pub fn checked_deactivation(&self, request: &Request, skip: &[Name]) -> SplintResult<Plan> {
        let plan = self.deactivation_order(request, skip)?;
        self.deactivation_conflicts(&plan)?;
        Ok(plan)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn category_satisfied(&self, category: &Name, working: &IndexSet<Name>) -> bool {
        if self.active.is_category_active(category.as_str()) {
            return true;
        }
        self.registry
            .category(category.as_str())
            .is_some_and(|c| c.members().iter().any(|m| working.contains(m)))
    }

    /// Dependency closure over active state: categories stand for their
    /// active members, and anything not active is dropped.
    fn active_closure<I>(&self, seeds: I) -> IndexSet<Name>
    where
        I: IntoIterator<Item = Name>,
    {
        let mut current = self.expand_active(self.dependency_closure(seeds));
        loop {
            // Only grows, so an unchanged size means a fixpoint.
            let next = self.expand_active(self.dependency_closure(current.iter().cloned()));
            if next.len() == current.len() {
                return next;
            }
            current = next;
        }
    }

    /// Replace category names with their active members and keep only
    /// active features.
    fn expand_active<I>(&self, names: I) -> IndexSet<Name>
    where
        I: IntoIterator<Item = Name>,
    {
        names
            .into_iter()
            .flat_map(|name| {
                if self.registry.is_category(name.as_str()) {
                    self.active.members(name.as_str()).cloned().collect::<Vec<_>>()
                } else if self.active.is_feature_active(name.as_str()) {
                    vec![name]
                } else {
                    Vec::new()
                }
            })
            .collect()
    }

    /// Active features that would lose a requirement if `feature` and every
    /// name in `removing` went away.
    ///
    /// A dependent of the owning category only counts once no other active
    /// member of that category survives.
    fn dependents(&self, feature: &Name, removing: &IndexSet<Name>) -> Vec<Name> {
        let requirements = self.registry.requirements();
        let mut out: Vec<Name> = requirements
            .successors(feature.as_str())
            .filter(|d| self.active.is_feature_active(d.as_str()))
            .cloned()
            .collect();

        if let Some(owner) = self.registry.owner_of(feature.as_str()) {
            let category = owner.name().as_str();
            let survivor = self
                .active
                .members(category)
                .any(|m| m != feature && !removing.contains(m));
            if !survivor {
                out.extend(
                    requirements
                        .successors(category)
                        .filter(|d| self.active.is_feature_active(d.as_str()))
                        .cloned(),
                );
            }
        }

        out
    }

    /// Topologically order `features` over the ordering graph. Every
    /// category node joins the sort so constraints routed through a
    /// category hold, then is dropped from the result.
    fn ordered(&self, features: &IndexSet<Name>, reverse: bool) -> SplintResult<Vec<Name>> {
        let ordering = self.registry.ordering();
        let nodes = features
            .iter()
            .filter(|n| self.registry.is_feature(n.as_str()))
            .chain(self.registry.categories().map(|c| c.name()));

        let sorted = if reverse {
            ordering.reverse_topological_order(nodes)
        } else {
            ordering.topological_order(nodes)
        };

        sorted
            .map(|order| {
                order
                    .into_iter()
                    .filter(|n| self.registry.is_feature(n.as_str()))
                    .collect()
            })
            .map_err(|cycle| SplintError::Internal {
                message: format!(
                    "feature graph has a cycle after registration: {}",
                    cycle.iter().map(Name::as_str).collect::<Vec<_>>().join(" -> ")
                ),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::runtime::NoopFeature;
    use crate::domain::{CategoryDescriptor, FeatureDescriptor};

    fn feature(name: &str) -> FeatureDescriptor {
        FeatureDescriptor::new(name, || Box::new(NoopFeature))
    }

    fn strings(names: &[Name]) -> Vec<&str> {
        names.iter().map(Name::as_str).collect()
    }

    fn request(names: &[&str]) -> Request {
        Request::names(names.iter().copied())
    }

    /// delta <- charlie <- bravo, all in non-mono `alpha` without defaults.
    fn chain() -> Registry {
        let mut r = Registry::new();
        r.register_feature(feature("delta")).unwrap();
        r.register_feature(feature("charlie").requires(["delta"])).unwrap();
        r.register_feature(feature("bravo").requires(["charlie"])).unwrap();
        r.register_category(
            CategoryDescriptor::builder("alpha")
                .members(["bravo", "charlie", "delta"])
                .mono(false)
                .build(),
        )
        .unwrap();
        r
    }

    /// Mono `build` {cmake (default), make}; `test` {ctest} requires build.
    fn toolchain() -> Registry {
        let mut r = Registry::new();
        r.register_feature(feature("cmake")).unwrap();
        r.register_feature(feature("make")).unwrap();
        r.register_category(
            CategoryDescriptor::builder("build")
                .members(["cmake", "make"])
                .defaults(["cmake"])
                .build(),
        )
        .unwrap();
        r.register_feature(feature("ctest")).unwrap();
        r.register_category(
            CategoryDescriptor::builder("test")
                .members(["ctest"])
                .defaults(["ctest"])
                .requires(["build"])
                .build(),
        )
        .unwrap();
        r
    }

    /// Non-mono `doc` {doxygen, sphinx} (both default, plus `man`); `z`
    /// requires the category.
    fn docs() -> Registry {
        let mut r = Registry::new();
        for name in ["doxygen", "sphinx", "man"] {
            r.register_feature(feature(name)).unwrap();
        }
        r.register_category(
            CategoryDescriptor::builder("doc")
                .members(["doxygen", "sphinx", "man"])
                .defaults(["doxygen", "sphinx"])
                .mono(false)
                .build(),
        )
        .unwrap();
        r.register_feature(feature("z").requires(["doc"])).unwrap();
        r
    }

    fn active(pairs: &[(&str, &str)]) -> ActiveSnapshot {
        let mut snapshot = ActiveSnapshot::new();
        for (category, feature) in pairs {
            snapshot.insert(Name::new(*category), Name::new(*feature));
        }
        snapshot
    }

    #[test]
    fn activation_order_follows_feature_chain() {
        let registry = chain();
        let snapshot = ActiveSnapshot::new();
        let resolver = Resolver::new(&registry, &snapshot);

        let plan = resolver.activation_order(&request(&["bravo"])).unwrap();
        assert_eq!(strings(&plan.total_order), vec!["delta", "charlie", "bravo"]);
        assert_eq!(strings(&plan.flatten_order), vec!["bravo"]);
    }

    #[test]
    fn required_category_resolves_to_its_defaults() {
        let mut registry = Registry::new();
        registry.register_feature(feature("foxtrot")).unwrap();
        registry
            .register_category(
                CategoryDescriptor::builder("echo")
                    .members(["foxtrot"])
                    .defaults(["foxtrot"])
                    .build(),
            )
            .unwrap();
        registry.register_feature(feature("bravo")).unwrap();
        registry
            .register_category(
                CategoryDescriptor::builder("alpha")
                    .members(["bravo"])
                    .defaults(["bravo"])
                    .requires(["echo"])
                    .build(),
            )
            .unwrap();

        let snapshot = ActiveSnapshot::new();
        let plan = Resolver::new(&registry, &snapshot)
            .activation_order(&request(&["alpha"]))
            .unwrap();
        assert_eq!(strings(&plan.total_order), vec!["foxtrot", "bravo"]);
        assert_eq!(strings(&plan.flatten_order), vec!["bravo"]);
    }

    #[test]
    fn required_category_prefers_member_already_in_request() {
        let registry = toolchain();
        let snapshot = ActiveSnapshot::new();
        let plan = Resolver::new(&registry, &snapshot)
            .activation_order(&request(&["make", "ctest"]))
            .unwrap();

        assert_eq!(strings(&plan.total_order), vec!["make", "ctest"]);
    }

    #[test]
    fn required_category_uses_active_instance() {
        let registry = toolchain();
        let snapshot = active(&[("build", "make")]);
        let resolver = Resolver::new(&registry, &snapshot);

        let plan = resolver.checked_activation(&request(&["test"])).unwrap();
        assert_eq!(strings(&plan.total_order), vec!["ctest"]);
    }

    #[test]
    fn default_request_keeps_active_mono_member() {
        let registry = toolchain();
        let snapshot = active(&[("build", "make")]);
        let resolver = Resolver::new(&registry, &snapshot);

        let plan = resolver.checked_activation(&Request::Default).unwrap();
        assert_eq!(strings(&plan.flatten_order), vec!["ctest"]);
        assert!(!plan.total_order.contains(&Name::new("cmake")));
    }

    #[test]
    fn default_request_completes_partially_active_category() {
        let registry = docs();
        let snapshot = active(&[("doc", "sphinx")]);
        let resolver = Resolver::new(&registry, &snapshot);

        let plan = resolver.checked_activation(&Request::Default).unwrap();
        assert!(plan.flatten_order.contains(&Name::new("doxygen")));
    }

    #[test]
    fn sentinels_are_direction_specific() {
        let registry = toolchain();
        let snapshot = ActiveSnapshot::new();
        let resolver = Resolver::new(&registry, &snapshot);

        let err = resolver.activation_order(&Request::All).unwrap_err();
        assert!(matches!(
            err,
            SplintError::Application(ApplicationError::InvalidRequest { .. })
        ));
        let err = resolver.deactivation_order(&Request::Default, &[]).unwrap_err();
        assert!(matches!(
            err,
            SplintError::Application(ApplicationError::InvalidRequest { .. })
        ));
    }

    #[test]
    fn unknown_names_are_all_reported() {
        let registry = toolchain();
        let snapshot = ActiveSnapshot::new();
        let err = Resolver::new(&registry, &snapshot)
            .activation_order(&request(&["cmake", "ghost", "phantom"]))
            .unwrap_err();

        assert_eq!(
            err,
            SplintError::Application(ApplicationError::UnknownName {
                names: vec!["ghost".into(), "phantom".into()],
            })
        );
    }

    #[test]
    fn sink_name_is_not_requestable() {
        let registry = toolchain();
        let snapshot = ActiveSnapshot::new();
        let sink = registry.sink().name().clone();

        let err = Resolver::new(&registry, &snapshot)
            .activation_order(&Request::Names(vec![sink]))
            .unwrap_err();
        assert!(matches!(
            err,
            SplintError::Application(ApplicationError::UnknownName { .. })
        ));
    }

    #[test]
    fn two_members_of_mono_category_conflict() {
        let registry = toolchain();
        let snapshot = ActiveSnapshot::new();
        let err = Resolver::new(&registry, &snapshot)
            .checked_activation(&request(&["cmake", "make"]))
            .unwrap_err();

        assert_eq!(
            err,
            SplintError::Application(ApplicationError::MonoConflict {
                category: "build".into(),
                features: vec!["cmake".into(), "make".into()],
            })
        );
    }

    #[test]
    fn explicit_request_against_active_mono_member_conflicts() {
        let registry = toolchain();
        let snapshot = active(&[("build", "make")]);
        let resolver = Resolver::new(&registry, &snapshot);

        let err = resolver.checked_activation(&request(&["cmake"])).unwrap_err();
        assert_eq!(
            err,
            SplintError::Application(ApplicationError::ActivationConflict {
                category: "build".into(),
                feature: "cmake".into(),
                active: "make".into(),
                explicit: true,
            })
        );

        // Naming the category resolves to its default, which also conflicts.
        let err = resolver.checked_activation(&request(&["build"])).unwrap_err();
        assert!(matches!(
            err,
            SplintError::Application(ApplicationError::ActivationConflict { explicit: true, .. })
        ));
    }

    #[test]
    fn reactivating_active_member_is_not_a_conflict() {
        let registry = toolchain();
        let snapshot = active(&[("build", "cmake")]);
        let plan = Resolver::new(&registry, &snapshot)
            .checked_activation(&request(&["build"]))
            .unwrap();
        assert_eq!(strings(&plan.flatten_order), vec!["cmake"]);
    }

    #[test]
    fn deactivation_removes_unneeded_dependencies_in_reverse() {
        let registry = chain();
        let snapshot = active(&[("alpha", "delta"), ("alpha", "charlie"), ("alpha", "bravo")]);
        let plan = Resolver::new(&registry, &snapshot)
            .checked_deactivation(&request(&["bravo"]), &[])
            .unwrap();

        assert_eq!(strings(&plan.total_order), vec!["bravo", "charlie", "delta"]);
        assert_eq!(strings(&plan.flatten_order), vec!["bravo"]);
    }

    #[test]
    fn skip_keeps_a_dependency_active() {
        let registry = chain();
        let snapshot = active(&[("alpha", "delta"), ("alpha", "charlie"), ("alpha", "bravo")]);
        let plan = Resolver::new(&registry, &snapshot)
            .checked_deactivation(&request(&["bravo"]), &[Name::new("charlie")])
            .unwrap();

        assert_eq!(strings(&plan.total_order), vec!["bravo"]);
    }

    #[test]
    fn removing_a_required_feature_conflicts() {
        let registry = chain();
        let snapshot = active(&[("alpha", "delta"), ("alpha", "charlie")]);
        let err = Resolver::new(&registry, &snapshot)
            .checked_deactivation(&request(&["delta"]), &[])
            .unwrap_err();

        assert_eq!(
            err,
            SplintError::Application(ApplicationError::DeactivationDependency {
                feature: "delta".into(),
                dependent: "charlie".into(),
            })
        );
    }

    #[test]
    fn removing_last_member_of_required_category_conflicts() {
        let registry = toolchain();
        let snapshot = active(&[("build", "cmake"), ("test", "ctest")]);
        let err = Resolver::new(&registry, &snapshot)
            .checked_deactivation(&request(&["cmake"]), &[])
            .unwrap_err();

        assert_eq!(
            err,
            SplintError::Application(ApplicationError::DeactivationDependency {
                feature: "cmake".into(),
                dependent: "ctest".into(),
            })
        );
    }

    #[test]
    fn surviving_member_keeps_category_dependents_satisfied() {
        let registry = docs();
        let sink = registry.sink().name().to_string();
        let snapshot = active(&[("doc", "doxygen"), ("doc", "man"), (sink.as_str(), "z")]);
        let resolver = Resolver::new(&registry, &snapshot);

        let plan = resolver
            .checked_deactivation(&request(&["doxygen"]), &[])
            .unwrap();
        assert_eq!(strings(&plan.total_order), vec!["doxygen"]);

        let err = resolver
            .checked_deactivation(&request(&["doxygen", "man"]), &[])
            .unwrap_err();
        assert!(matches!(
            err,
            SplintError::Application(ApplicationError::DeactivationDependency { ref dependent, .. })
                if dependent == "z"
        ));
    }

    #[test]
    fn deactivating_dependent_takes_category_dependency_along() {
        let registry = toolchain();
        let snapshot = active(&[("build", "cmake"), ("test", "ctest")]);
        let plan = Resolver::new(&registry, &snapshot)
            .checked_deactivation(&request(&["test"]), &[])
            .unwrap();

        assert_eq!(strings(&plan.total_order), vec!["ctest", "cmake"]);
        assert_eq!(strings(&plan.flatten_order), vec!["ctest"]);
    }

    #[test]
    fn shared_dependency_survives_partial_deactivation() {
        let mut registry = chain();
        registry
            .register_feature(feature("echo").requires(["delta"]))
            .unwrap();
        let snapshot = active(&[
            ("alpha", "delta"),
            ("alpha", "charlie"),
            ("alpha", "bravo"),
            (registry.sink().name().as_str(), "echo"),
        ]);

        let plan = Resolver::new(&registry, &snapshot)
            .checked_deactivation(&request(&["bravo"]), &[])
            .unwrap();
        assert_eq!(strings(&plan.total_order), vec!["bravo", "charlie"]);
    }

    #[test]
    fn inactive_names_deactivate_to_nothing() {
        let registry = chain();
        let snapshot = ActiveSnapshot::new();
        let plan = Resolver::new(&registry, &snapshot)
            .checked_deactivation(&request(&["bravo", "alpha"]), &[])
            .unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn all_deactivates_everything_active() {
        let registry = toolchain();
        let snapshot = active(&[("build", "make"), ("test", "ctest")]);
        let plan = Resolver::new(&registry, &snapshot)
            .checked_deactivation(&Request::All, &[])
            .unwrap();

        assert_eq!(strings(&plan.total_order), vec!["ctest", "make"]);
        assert_eq!(plan.flatten_order, plan.total_order);
    }
}
