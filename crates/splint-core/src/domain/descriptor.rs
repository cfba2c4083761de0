//! Feature and category descriptors.
//!
//! A descriptor is the static, registration-time description of something
//! the engine can activate: its name, what it requires, and a factory that
//! builds the runtime object on first activation. Descriptors are immutable
//! once handed to the [`Registry`](crate::domain::Registry).

use std::fmt;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use crate::application::ports::{Category, Feature};
use crate::application::runtime::FeatureCategory;
use crate::domain::value_objects::Name;

/// Builds a fresh feature runtime object.
pub type FeatureFactory = Arc<dyn Fn() -> Box<dyn Feature> + Send + Sync>;

/// Member feature factories handed to a category factory, keyed by name in
/// declaration order.
pub type MemberFactories = IndexMap<Name, FeatureFactory>;

/// Builds a fresh category runtime object around its members' factories.
pub type CategoryFactory = Arc<dyn Fn(MemberFactories) -> Box<dyn Category> + Send + Sync>;

/// The stock category factory: a [`FeatureCategory`] with no behaviour of
/// its own beyond tracking members.
pub fn default_category_factory() -> CategoryFactory {
    Arc::new(|members: MemberFactories| -> Box<dyn Category> {
        Box::new(FeatureCategory::new(members))
    })
}

// ── FeatureDescriptor ────────────────────────────────────────────────────────

/// Registration-time description of a feature.
#[derive(Clone)]
pub struct FeatureDescriptor {
    name: Name,
    requires: IndexSet<Name>,
    factory: FeatureFactory,
}

impl FeatureDescriptor {
    pub fn new<F>(name: impl Into<Name>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Feature> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            requires: IndexSet::new(),
            factory: Arc::new(factory),
        }
    }

    /// Add requirements (features or categories that must be active first).
    pub fn requires<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Name>,
    {
        self.requires.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn requirements(&self) -> &IndexSet<Name> {
        &self.requires
    }

    pub fn factory(&self) -> &FeatureFactory {
        &self.factory
    }
}

impl fmt::Debug for FeatureDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureDescriptor")
            .field("name", &self.name)
            .field("requires", &self.requires)
            .finish_non_exhaustive()
    }
}

// ── CategoryDescriptor ───────────────────────────────────────────────────────

/// Registration-time description of a category.
#[derive(Clone)]
pub struct CategoryDescriptor {
    name: Name,
    members: IndexSet<Name>,
    defaults: IndexSet<Name>,
    requires: IndexSet<Name>,
    mono: bool,
    factory: CategoryFactory,
}

impl CategoryDescriptor {
    /// Start building a category. Categories are mono unless told otherwise.
    pub fn builder(name: impl Into<Name>) -> CategoryDescriptorBuilder {
        CategoryDescriptorBuilder {
            name: name.into(),
            members: IndexSet::new(),
            defaults: IndexSet::new(),
            requires: IndexSet::new(),
            mono: true,
            factory: None,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn members(&self) -> &IndexSet<Name> {
        &self.members
    }

    pub fn defaults(&self) -> &IndexSet<Name> {
        &self.defaults
    }

    pub fn requirements(&self) -> &IndexSet<Name> {
        &self.requires
    }

    pub fn is_mono(&self) -> bool {
        self.mono
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    pub fn factory(&self) -> &CategoryFactory {
        &self.factory
    }

    /// The implicit catch-all category. Non-mono, no requirements, and
    /// members are attached as features register.
    pub(crate) fn sink(name: Name) -> Self {
        Self {
            name,
            members: IndexSet::new(),
            defaults: IndexSet::new(),
            requires: IndexSet::new(),
            mono: false,
            factory: default_category_factory(),
        }
    }

    pub(crate) fn attach(&mut self, member: Name) {
        self.members.insert(member);
    }

    pub(crate) fn detach(&mut self, member: &str) {
        self.members.shift_remove(member);
    }
}

impl fmt::Debug for CategoryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoryDescriptor")
            .field("name", &self.name)
            .field("members", &self.members)
            .field("defaults", &self.defaults)
            .field("requires", &self.requires)
            .field("mono", &self.mono)
            .finish_non_exhaustive()
    }
}

/// Builder for [`CategoryDescriptor`].
///
/// Structural checks (defaults are members, members exist, and so on) are
/// the registry's job; the builder only collects.
#[must_use]
pub struct CategoryDescriptorBuilder {
    name: Name,
    members: IndexSet<Name>,
    defaults: IndexSet<Name>,
    requires: IndexSet<Name>,
    mono: bool,
    factory: Option<CategoryFactory>,
}

impl CategoryDescriptorBuilder {
    pub fn members<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Name>,
    {
        self.members.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn defaults<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Name>,
    {
        self.defaults.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn requires<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Name>,
    {
        self.requires.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn mono(mut self, mono: bool) -> Self {
        self.mono = mono;
        self
    }

    /// Use a custom category runtime instead of [`FeatureCategory`].
    pub fn factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(MemberFactories) -> Box<dyn Category> + Send + Sync + 'static,
    {
        self.factory = Some(Arc::new(factory));
        self
    }

    pub fn build(self) -> CategoryDescriptor {
        CategoryDescriptor {
            name: self.name,
            members: self.members,
            defaults: self.defaults,
            requires: self.requires,
            mono: self.mono,
            factory: self.factory.unwrap_or_else(default_category_factory),
        }
    }
}
