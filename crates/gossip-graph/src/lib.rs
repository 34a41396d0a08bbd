//! GossipGraph Graph - Relation graph merging
//!
//! Collapses relation triples into a simple directed graph: one vertex per
//! entity, at most one edge per ordered pair. Each edge remembers every kind
//! observed for its pair (first-seen order) and a dominant kind chosen by
//! fixed priority.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use serde::ser::{Serialize, Serializer};
use tracing::debug;

use gossip_core::{RelationKind, RelationTriple};

pub mod export;

pub use export::DotExporter;

// ============================================================================
// Edges
// ============================================================================

/// Merged relations for one ordered entity pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    kinds: Vec<RelationKind>,
    dominant: RelationKind,
}

impl Edge {
    fn new(kind: RelationKind) -> Self {
        Self {
            kinds: vec![kind],
            dominant: kind,
        }
    }

    /// Record another observation; repeated kinds are kept once
    fn observe(&mut self, kind: RelationKind) {
        if !self.kinds.contains(&kind) {
            self.kinds.push(kind);
        }
        self.dominant = RelationKind::dominant(&self.kinds);
    }

    /// Distinct observed kinds, in first-seen order
    pub fn kinds(&self) -> &[RelationKind] {
        &self.kinds
    }

    /// Highest-priority observed kind
    pub fn dominant(&self) -> RelationKind {
        self.dominant
    }

    pub fn contains(&self, kind: RelationKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Human-readable label, e.g. `betray|rival`
    pub fn label(&self, delimiter: &str) -> String {
        self.kinds
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(delimiter)
    }
}

/// An edge together with its endpoint names
#[derive(Debug, Clone, Copy)]
pub struct EdgeRef<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub edge: &'a Edge,
}

// ============================================================================
// Relation Graph
// ============================================================================

/// Directed relation graph built from triples
#[derive(Debug, Clone, Default)]
pub struct RelationGraph {
    graph: DiGraph<String, Edge>,
    index: HashMap<String, NodeIndex>,
}

impl RelationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from triples, processed in order
    pub fn merge<I>(triples: I) -> Self
    where
        I: IntoIterator<Item = RelationTriple>,
    {
        let mut graph = Self::new();
        graph.extend(triples);
        debug!(
            entities = graph.entity_count(),
            edges = graph.edge_count(),
            "merged relation graph"
        );
        graph
    }

    /// Add one triple.
    ///
    /// Only the edge for exactly (subject, object) is touched; the reverse
    /// pair is never created or modified.
    pub fn add(&mut self, triple: &RelationTriple) {
        let from = self.ensure_entity(triple.subject());
        let to = self.ensure_entity(triple.object());

        match self.graph.find_edge(from, to) {
            Some(edge) => self.graph[edge].observe(triple.kind()),
            None => {
                self.graph.add_edge(from, to, Edge::new(triple.kind()));
            }
        }
    }

    fn ensure_entity(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Entity names, in first-seen order
    pub fn entities(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_weights().map(String::as_str)
    }

    /// Edges, in creation order
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        self.graph.edge_indices().filter_map(move |e| {
            let (from, to) = self.graph.edge_endpoints(e)?;
            Some(EdgeRef {
                from: &self.graph[from],
                to: &self.graph[to],
                edge: &self.graph[e],
            })
        })
    }

    /// The edge for the ordered pair (from, to), if any relation was seen
    pub fn edge(&self, from: &str, to: &str) -> Option<&Edge> {
        let from = *self.index.get(from)?;
        let to = *self.index.get(to)?;
        self.graph.find_edge(from, to).map(|e| &self.graph[e])
    }

    pub fn contains_entity(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Position of an entity in first-seen order
    pub fn entity_position(&self, name: &str) -> Option<usize> {
        self.index.get(name).map(|idx| idx.index())
    }

    pub fn entity_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// The underlying petgraph graph
    pub fn as_petgraph(&self) -> &DiGraph<String, Edge> {
        &self.graph
    }
}

/// Build a graph from triples
pub fn merge<I>(triples: I) -> RelationGraph
where
    I: IntoIterator<Item = RelationTriple>,
{
    RelationGraph::merge(triples)
}

impl Extend<RelationTriple> for RelationGraph {
    fn extend<I: IntoIterator<Item = RelationTriple>>(&mut self, iter: I) {
        for triple in iter {
            self.add(&triple);
        }
    }
}

impl FromIterator<RelationTriple> for RelationGraph {
    fn from_iter<I: IntoIterator<Item = RelationTriple>>(iter: I) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

// ============================================================================
// Serialization
// ============================================================================

#[derive(serde::Serialize)]
struct GraphSnapshot<'a> {
    entities: Vec<&'a str>,
    edges: Vec<EdgeSnapshot<'a>>,
}

#[derive(serde::Serialize)]
struct EdgeSnapshot<'a> {
    from: &'a str,
    to: &'a str,
    kinds: &'a [RelationKind],
    dominant: RelationKind,
}

impl Serialize for RelationGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        GraphSnapshot {
            entities: self.entities().collect(),
            edges: self
                .edges()
                .map(|e| EdgeSnapshot {
                    from: e.from,
                    to: e.to,
                    kinds: e.edge.kinds(),
                    dominant: e.edge.dominant(),
                })
                .collect(),
        }
        .serialize(serializer)
    }
}

// ============================================================================
// Tests
// ============================================================================
