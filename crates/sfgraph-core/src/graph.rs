//! Graph accumulator and the frozen dependency graph it yields

use crate::model::*;
use crate::weight::calculate_weight;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Collects components and edges during a single scan/extract pass.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    components: BTreeMap<String, Component>,
    dependencies: Vec<Dependency>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component. First registration of an id wins; later calls
    /// for the same id are ignored. Returns whether the component was stored.
    pub fn add_component(&mut self, component: Component) -> bool {
        if self.components.contains_key(&component.id) {
            tracing::trace!("Ignoring duplicate component {}", component.id);
            return false;
        }
        self.components.insert(component.id.clone(), component);
        true
    }

    /// Append an edge, synthesizing placeholders for unregistered endpoints.
    ///
    /// A placeholder occupies its id like any other component, so a later
    /// `add_component` for that id is ignored.
    pub fn add_dependency(&mut self, dependency: Dependency) {
        for endpoint in [&dependency.from, &dependency.to] {
            if !self.components.contains_key(endpoint) {
                self.components
                    .insert(endpoint.clone(), Component::placeholder(endpoint));
            }
        }
        self.dependencies.push(dependency);
    }

    /// Freeze the accumulated graph.
    pub fn build(self) -> DependencyGraph {
        DependencyGraph {
            components: self.components,
            dependencies: self.dependencies,
        }
    }
}

/// Components keyed by id plus the ordered edge list. Edges sharing a
/// `(from, to)` pair are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencyGraph {
    components: BTreeMap<String, Component>,
    dependencies: Vec<Dependency>,
}

impl DependencyGraph {
    /// Get a component by id.
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    /// Iterate over all components in id order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Components flattened to a list, in id order.
    pub fn component_list(&self) -> Vec<&Component> {
        self.components.values().collect()
    }

    /// All edges in discovery order.
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn dependency_count(&self) -> usize {
        self.dependencies.len()
    }

    /// Number of components per type.
    pub fn counts_by_type(&self) -> BTreeMap<ComponentType, usize> {
        let mut counts = BTreeMap::new();
        for component in self.components.values() {
            *counts.entry(component.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Edges leaving `id`, in discovery order.
    pub fn edges_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Dependency> + 'a {
        self.dependencies.iter().filter(move |d| d.from == id)
    }

    /// Edges arriving at `id`, in discovery order.
    pub fn edges_to<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Dependency> + 'a {
        self.dependencies.iter().filter(move |d| d.to == id)
    }

    /// Stored weight, or the calculator's score from the endpoint types.
    pub fn effective_weight(&self, dependency: &Dependency) -> u8 {
        if let Some(weight) = dependency.weight {
            return weight;
        }
        let endpoint_type = |id: &str| {
            self.component(id)
                .map(|c| c.kind)
                .unwrap_or_else(|| split_id(id).0)
        };
        calculate_weight(
            endpoint_type(dependency.from.as_str()),
            endpoint_type(dependency.to.as_str()),
            dependency.kind,
            dependency.source(),
        )
    }
}
