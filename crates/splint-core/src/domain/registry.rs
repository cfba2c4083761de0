//! Feature/category registry.
//!
//! Owns every descriptor and the two graphs built from them:
//!
//! - the **requirements** graph: one edge `dependency -> dependent` per
//!   declared requirement. A category's requirements become edges into each
//!   of its members. Closures walk this graph.
//! - the **ordering** graph: the requirements graph plus a membership edge
//!   `member -> category` for every category member. A category stands for
//!   whichever member satisfies it, so orders and cycle checks run here.
//!
//! Every registration is validated against scratch copies of both graphs and
//! only committed when it succeeds, which keeps the registry unchanged after
//! any error.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::debug;
use uuid::Uuid;

use crate::domain::descriptor::{CategoryDescriptor, FeatureDescriptor, MemberFactories};
use crate::domain::error::DomainError;
use crate::domain::graph::DependencyGraph;
use crate::domain::value_objects::Name;

/// Prefix of the implicit sink category's generated name.
pub const SINK_PREFIX: &str = "sink-category-";

#[derive(Debug, Clone)]
pub struct Registry {
    features: IndexMap<Name, FeatureDescriptor>,
    categories: IndexMap<Name, CategoryDescriptor>,
    owners: HashMap<Name, Name>,
    sink: CategoryDescriptor,
    requirements: DependencyGraph,
    ordering: DependencyGraph,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        let sink = Name::new(format!("{SINK_PREFIX}{}", Uuid::new_v4()));
        Self {
            features: IndexMap::new(),
            categories: IndexMap::new(),
            owners: HashMap::new(),
            sink: CategoryDescriptor::sink(sink),
            requirements: DependencyGraph::new(),
            ordering: DependencyGraph::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------

    /// Register a feature. It belongs to the sink category until an explicit
    /// category claims it.
    pub fn register_feature(&mut self, descriptor: FeatureDescriptor) -> Result<(), DomainError> {
        let name = descriptor.name().clone();
        self.ensure_unused(&name)?;

        for dependency in descriptor.requirements() {
            if *dependency == name {
                return Err(DomainError::SelfDependency {
                    name: name.to_string(),
                });
            }
            self.ensure_satisfiable(&name, dependency)?;
        }

        let mut requirements = self.requirements.clone();
        let mut ordering = self.ordering.clone();
        requirements.add_node(name.clone());
        ordering.add_node(name.clone());
        for dependency in descriptor.requirements() {
            requirements.add_edge(dependency.clone(), name.clone());
            ordering.add_edge(dependency.clone(), name.clone());
        }
        check_acyclic(&ordering)?;

        debug!(feature = %name, requires = descriptor.requirements().len(), "Registered feature");

        self.requirements = requirements;
        self.ordering = ordering;
        self.owners.insert(name.clone(), self.sink.name().clone());
        self.sink.attach(name.clone());
        self.features.insert(name, descriptor);
        Ok(())
    }

    /// Register a category, claiming its members from the sink category.
    pub fn register_category(&mut self, descriptor: CategoryDescriptor) -> Result<(), DomainError> {
        let name = descriptor.name().clone();
        self.ensure_unused(&name)?;

        if descriptor.members().is_empty() {
            return Err(DomainError::EmptyCategory {
                category: name.to_string(),
            });
        }

        for member in descriptor.members() {
            if !self.is_feature(member.as_str()) {
                return Err(DomainError::UnknownMember {
                    category: name.to_string(),
                    member: member.to_string(),
                });
            }
            if let Some(owner) = self.owners.get(member)
                && *owner != *self.sink.name()
            {
                return Err(DomainError::FeatureAlreadyClaimed {
                    feature: member.to_string(),
                    category: owner.to_string(),
                });
            }
        }

        if let Some(stray) = descriptor
            .defaults()
            .iter()
            .find(|d| !descriptor.has_member(d.as_str()))
        {
            return Err(DomainError::DefaultNotMember {
                category: name.to_string(),
                default: stray.to_string(),
            });
        }

        for dependency in descriptor.requirements() {
            if *dependency == name || descriptor.has_member(dependency.as_str()) {
                return Err(DomainError::SelfDependency {
                    name: name.to_string(),
                });
            }
            self.ensure_satisfiable(&name, dependency)?;
        }

        let mut requirements = self.requirements.clone();
        let mut ordering = self.ordering.clone();
        requirements.add_node(name.clone());
        ordering.add_node(name.clone());
        for member in descriptor.members() {
            for dependency in descriptor.requirements() {
                requirements.add_edge(dependency.clone(), member.clone());
                ordering.add_edge(dependency.clone(), member.clone());
            }
            ordering.add_edge(member.clone(), name.clone());
        }
        check_acyclic(&ordering)?;

        debug!(
            category = %name,
            members = descriptor.members().len(),
            mono = descriptor.is_mono(),
            "Registered category"
        );

        self.requirements = requirements;
        self.ordering = ordering;
        for member in descriptor.members() {
            self.sink.detach(member.as_str());
            self.owners.insert(member.clone(), name.clone());
        }
        self.categories.insert(name, descriptor);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    /// `true` for explicitly registered categories. The sink is not one.
    pub fn is_category(&self, name: &str) -> bool {
        self.categories.contains_key(name)
    }

    pub fn is_feature(&self, name: &str) -> bool {
        self.features.contains_key(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.is_feature(name) || self.is_category(name)
    }

    pub fn feature(&self, name: &str) -> Option<&FeatureDescriptor> {
        self.features.get(name)
    }

    /// Category descriptor by name, the sink included.
    pub fn category(&self, name: &str) -> Option<&CategoryDescriptor> {
        if name == self.sink.name().as_str() {
            return Some(&self.sink);
        }
        self.categories.get(name)
    }

    /// Category that currently owns `feature`.
    pub fn owner_of(&self, feature: &str) -> Option<&CategoryDescriptor> {
        self.owners.get(feature).and_then(|c| self.category(c.as_str()))
    }

    pub fn sink(&self) -> &CategoryDescriptor {
        &self.sink
    }

    pub fn is_sink(&self, name: &str) -> bool {
        name == self.sink.name().as_str()
    }

    /// Features in registration order.
    pub fn features(&self) -> impl Iterator<Item = &FeatureDescriptor> {
        self.features.values()
    }

    /// Explicit categories in registration order.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryDescriptor> {
        self.categories.values()
    }

    /// Explicit categories followed by the sink, if it holds any feature.
    pub fn all_categories(&self) -> impl Iterator<Item = &CategoryDescriptor> {
        self.categories
            .values()
            .chain((!self.sink.members().is_empty()).then_some(&self.sink))
    }

    pub fn requirements(&self) -> &DependencyGraph {
        &self.requirements
    }

    pub fn ordering(&self) -> &DependencyGraph {
        &self.ordering
    }

    /// Factories of every member of `category`, for its category factory.
    pub fn member_factories(&self, category: &CategoryDescriptor) -> MemberFactories {
        category
            .members()
            .iter()
            .filter_map(|m| {
                self.features
                    .get(m)
                    .map(|f| (m.clone(), f.factory().clone()))
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn ensure_unused(&self, name: &Name) -> Result<(), DomainError> {
        let kind = if self.is_feature(name.as_str()) {
            "feature"
        } else if self.is_category(name.as_str()) || self.is_sink(name.as_str()) {
            "category"
        } else {
            return Ok(());
        };
        Err(DomainError::DuplicateName {
            name: name.to_string(),
            kind,
        })
    }

    /// A requirement must already exist, and a required category must be
    /// able to pick a feature on its own.
    fn ensure_satisfiable(&self, name: &Name, dependency: &Name) -> Result<(), DomainError> {
        if self.is_feature(dependency.as_str()) {
            return Ok(());
        }
        match self.categories.get(dependency) {
            Some(category) if category.defaults().is_empty() => {
                Err(DomainError::CategoryWithoutDefaults {
                    name: name.to_string(),
                    category: dependency.to_string(),
                })
            }
            Some(_) => Ok(()),
            None => Err(DomainError::UnknownDependency {
                name: name.to_string(),
                dependency: dependency.to_string(),
            }),
        }
    }
}

fn check_acyclic(graph: &DependencyGraph) -> Result<(), DomainError> {
    match graph.find_cycle() {
        Some(cycle) => Err(DomainError::Cycle {
            cycle: cycle.into_iter().map(Name::into_string).collect(),
        }),
        None => Ok(()),
    }
}
