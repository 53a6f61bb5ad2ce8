//! Read-only petgraph view over a built dependency graph

use crate::graph::DependencyGraph;
use crate::model::{Component, Dependency};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

/// A directed multigraph borrowing its nodes and edges from a
/// [`DependencyGraph`]. Edge weights are the effective scores.
pub struct GraphView<'g> {
    inner: DiGraph<&'g Component, (&'g Dependency, u8)>,
    index: HashMap<&'g str, NodeIndex>,
}

impl std::fmt::Debug for GraphView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphView")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl<'g> GraphView<'g> {
    pub fn new(graph: &'g DependencyGraph) -> Self {
        let mut inner = DiGraph::with_capacity(graph.component_count(), graph.dependency_count());
        let mut index = HashMap::with_capacity(graph.component_count());

        for component in graph.components() {
            let idx = inner.add_node(component);
            index.insert(component.id.as_str(), idx);
        }

        for dependency in graph.dependencies() {
            let (Some(&from), Some(&to)) = (
                index.get(dependency.from.as_str()),
                index.get(dependency.to.as_str()),
            ) else {
                // Only reachable for a graph that was not built by GraphBuilder.
                tracing::warn!("Skipping dangling edge {} -> {}", dependency.from, dependency.to);
                continue;
            };
            inner.add_edge(from, to, (dependency, graph.effective_weight(dependency)));
        }

        Self { inner, index }
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Edges leaving a component.
    pub fn outgoing(&self, id: &str) -> Vec<&'g Dependency> {
        self.edges(id, Direction::Outgoing)
    }

    /// Edges arriving at a component.
    pub fn incoming(&self, id: &str) -> Vec<&'g Dependency> {
        self.edges(id, Direction::Incoming)
    }

    fn edges(&self, id: &str, direction: Direction) -> Vec<&'g Dependency> {
        let Some(&idx) = self.index.get(id) else {
            return Vec::new();
        };
        let mut edges: Vec<_> = self
            .inner
            .edges_directed(idx, direction)
            .map(|edge_ref| (edge_ref.id(), edge_ref.weight().0))
            .collect();
        // petgraph walks adjacency lists newest-first; report discovery order.
        edges.sort_by_key(|(edge_id, _)| edge_id.index());
        edges.into_iter().map(|(_, dep)| dep).collect()
    }

    /// Components ranked by summed incoming edge weight, heaviest first.
    /// Ties are broken by id. Components with no incoming edges are omitted.
    pub fn hotspots(&self, limit: usize) -> Vec<(&'g Component, u32)> {
        let mut ranked: Vec<(&'g Component, u32)> = self
            .inner
            .node_indices()
            .filter_map(|idx| {
                let total: u32 = self
                    .inner
                    .edges_directed(idx, Direction::Incoming)
                    .map(|edge_ref| u32::from(edge_ref.weight().1))
                    .sum();
                (total > 0).then(|| (self.inner[idx], total))
            })
            .collect();

        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.id.cmp(&b.0.id)));
        ranked.truncate(limit);
        ranked
    }
}
