//! Directed dependency graph over feature and category names.
//!
//! Edges run **dependency → dependent**: if `charlie` requires `delta`
//! the graph holds `delta -> charlie`. Both directions are indexed so the
//! resolver can walk dependencies (predecessors) and dependents
//! (successors) in O(degree).
//!
//! Node insertion order is preserved and used as the tie-break for
//! topological sorting, which makes every order the engine emits
//! deterministic for a given registration sequence.

use std::collections::{BTreeSet, HashMap};

use indexmap::{IndexMap, IndexSet};

use crate::domain::value_objects::Name;

/// Owned adjacency-list digraph with predecessor and successor indices.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    predecessors: IndexMap<Name, IndexSet<Name>>,
    successors: IndexMap<Name, IndexSet<Name>>,
}

/// Which way Kahn's algorithm consumes edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Dependencies first.
    Forward,
    /// Dependents first.
    Reverse,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Returns `false` if it was already present.
    pub fn add_node(&mut self, name: Name) -> bool {
        if self.predecessors.contains_key(&name) {
            return false;
        }
        self.predecessors.insert(name.clone(), IndexSet::new());
        self.successors.insert(name, IndexSet::new());
        true
    }

    /// Add `dependency -> dependent`, creating either node if needed.
    pub fn add_edge(&mut self, dependency: Name, dependent: Name) {
        self.add_node(dependency.clone());
        self.add_node(dependent.clone());

        if let Some(preds) = self.predecessors.get_mut(&dependent) {
            preds.insert(dependency.clone());
        }
        if let Some(succs) = self.successors.get_mut(&dependency) {
            succs.insert(dependent);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.predecessors.contains_key(name)
    }

    pub fn has_edge(&self, dependency: &str, dependent: &str) -> bool {
        self.successors
            .get(dependency)
            .is_some_and(|succs| succs.contains(dependent))
    }

    pub fn node_count(&self) -> usize {
        self.predecessors.len()
    }

    pub fn edge_count(&self) -> usize {
        self.successors.values().map(IndexSet::len).sum()
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Name> {
        self.predecessors.keys()
    }

    /// Direct dependencies of `name`.
    pub fn predecessors(&self, name: &str) -> impl Iterator<Item = &Name> {
        self.predecessors.get(name).into_iter().flatten()
    }

    /// Direct dependents of `name`.
    pub fn successors(&self, name: &str) -> impl Iterator<Item = &Name> {
        self.successors.get(name).into_iter().flatten()
    }

    /// Transitive dependency closure of `seeds`, seeds included.
    ///
    /// Fixpoint over the predecessor relation: keep adding direct
    /// dependencies of everything in the working set until it stops growing.
    pub fn closure<I>(&self, seeds: I) -> IndexSet<Name>
    where
        I: IntoIterator<Item = Name>,
    {
        let mut closure: IndexSet<Name> = seeds.into_iter().collect();
        let mut cursor = 0;

        while cursor < closure.len() {
            let current = closure[cursor].clone();
            for dependency in self.predecessors(current.as_str()) {
                if !closure.contains(dependency) {
                    closure.insert(dependency.clone());
                }
            }
            cursor += 1;
        }

        closure
    }

    /// Topological order (dependencies first) of the subgraph induced by
    /// `subset`.
    ///
    /// On failure returns an example cycle path (first node repeated last).
    pub fn topological_order<'a, I>(&self, subset: I) -> Result<Vec<Name>, Vec<Name>>
    where
        I: IntoIterator<Item = &'a Name>,
    {
        self.kahn(subset, Direction::Forward)
    }

    /// Reverse topological order (dependents first) of the subgraph induced
    /// by `subset`.
    pub fn reverse_topological_order<'a, I>(&self, subset: I) -> Result<Vec<Name>, Vec<Name>>
    where
        I: IntoIterator<Item = &'a Name>,
    {
        self.kahn(subset, Direction::Reverse)
    }

    /// An example cycle if the whole graph is not a DAG.
    pub fn find_cycle(&self) -> Option<Vec<Name>> {
        self.topological_order(self.nodes()).err()
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn kahn<'a, I>(&self, subset: I, direction: Direction) -> Result<Vec<Name>, Vec<Name>>
    where
        I: IntoIterator<Item = &'a Name>,
    {
        // Sort the subset by insertion position so ties resolve the same way
        // on every run.
        let mut nodes: Vec<&Name> = subset.into_iter().collect();
        nodes.sort_by_key(|n| self.predecessors.get_index_of(n.as_str()).unwrap_or(usize::MAX));
        nodes.dedup();

        let position: HashMap<&Name, usize> =
            nodes.iter().enumerate().map(|(i, n)| (*n, i)).collect();

        let (incoming, outgoing) = match direction {
            Direction::Forward => (&self.predecessors, &self.successors),
            Direction::Reverse => (&self.successors, &self.predecessors),
        };

        let mut in_degree: Vec<usize> = nodes
            .iter()
            .map(|n| {
                incoming
                    .get(n.as_str())
                    .map_or(0, |edges| edges.iter().filter(|e| position.contains_key(e)).count())
            })
            .collect();

        let mut ready: BTreeSet<usize> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, d)| **d == 0)
            .map(|(i, _)| i)
            .collect();

        let mut order = Vec::with_capacity(nodes.len());
        while let Some(i) = ready.pop_first() {
            order.push(nodes[i].clone());
            for next in outgoing.get(nodes[i].as_str()).into_iter().flatten() {
                if let Some(&j) = position.get(next) {
                    in_degree[j] -= 1;
                    if in_degree[j] == 0 {
                        ready.insert(j);
                    }
                }
            }
        }

        if order.len() == nodes.len() {
            return Ok(order);
        }

        // Every node left over still has an incoming edge from another
        // left-over node, so walking those edges must revisit something.
        let remaining: IndexSet<&Name> = nodes
            .iter()
            .zip(&in_degree)
            .filter(|(_, d)| **d > 0)
            .map(|(n, _)| *n)
            .collect();

        Err(self.extract_cycle(&remaining, direction))
    }

    fn extract_cycle(&self, remaining: &IndexSet<&Name>, direction: Direction) -> Vec<Name> {
        let Some(&start) = remaining.first() else {
            return Vec::new();
        };

        let incoming = match direction {
            Direction::Forward => &self.predecessors,
            Direction::Reverse => &self.successors,
        };

        let mut path: Vec<&Name> = vec![start];
        let mut current = start;
        loop {
            let Some(next) = incoming
                .get(current.as_str())
                .into_iter()
                .flatten()
                .find(|p| remaining.contains(p))
            else {
                return Vec::new();
            };

            if let Some(seen) = path.iter().position(|n| *n == next) {
                let mut cycle: Vec<Name> = path[seen..].iter().map(|n| (*n).clone()).collect();
                cycle.push(next.clone());
                // A forward walk follows dependencies; flip it so the cycle
                // reads in edge direction.
                if direction == Direction::Forward {
                    cycle.reverse();
                }
                return cycle;
            }

            path.push(next);
            current = next;
        }
    }
}
