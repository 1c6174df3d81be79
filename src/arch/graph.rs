//! Typed relationship graph derived over the finished model.
//!
//! Storage follows the persistent-index pattern: the edge list plus
//! per-node outgoing/incoming indexes in `im` collections, so snapshots
//! are cheap to clone and share. Transitive queries convert to a
//! `petgraph` graph on demand.

use im::{HashMap, Vector};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::Bfs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::arch::types::TypeId;

/// Kind of a derived relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    /// Aggregate or embedding type holds the target inside its boundary
    Contains,
    /// Aggregate can emit the target domain event
    Emits,
    /// Repository port persists the target aggregate
    Persists,
    /// Type needs the target to do its work
    DependsOn,
    /// Type implements the target interface
    Implements,
    /// Type owns the target identifier as its identity
    Owns,
    /// Type references another aggregate across a boundary
    References,
    /// Type extends the target superclass
    Extends,
}

/// One directed, typed edge of the relationship graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    pub from: TypeId,
    pub to: TypeId,
    pub kind: RelationKind,
}

impl Relationship {
    pub fn new(from: TypeId, to: TypeId, kind: RelationKind) -> Self {
        Relationship { from, to, kind }
    }
}

/// Immutable, queryable graph of derived relationships
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Relationship>", into = "Vec<Relationship>")]
pub struct RelationshipGraph {
    edges: Vector<Relationship>,
    outgoing: HashMap<TypeId, Vector<Relationship>>,
    incoming: HashMap<TypeId, Vector<Relationship>>,
}

impl RelationshipGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an edge unless an identical one is already present
    pub fn add(&mut self, relationship: Relationship) {
        if self.has_relation(&relationship.from, &relationship.to, relationship.kind) {
            return;
        }
        self.outgoing
            .entry(relationship.from.clone())
            .or_insert_with(Vector::new)
            .push_back(relationship.clone());
        self.incoming
            .entry(relationship.to.clone())
            .or_insert_with(Vector::new)
            .push_back(relationship.clone());
        self.edges.push_back(relationship);
    }

    /// True if an edge of the given kind exists between the two types
    pub fn has_relation(&self, from: &TypeId, to: &TypeId, kind: RelationKind) -> bool {
        self.outgoing
            .get(from)
            .map(|edges| edges.iter().any(|r| &r.to == to && r.kind == kind))
            .unwrap_or(false)
    }

    /// All edges, in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Relationship> {
        self.edges.iter()
    }

    /// Outgoing edges of a node, in insertion order
    pub fn edges_from(&self, from: &TypeId) -> impl Iterator<Item = &Relationship> {
        self.outgoing
            .get(from)
            .into_iter()
            .flat_map(|edges| edges.iter())
    }

    /// Incoming edges of a node, in insertion order
    pub fn edges_to(&self, to: &TypeId) -> impl Iterator<Item = &Relationship> {
        self.incoming
            .get(to)
            .into_iter()
            .flat_map(|edges| edges.iter())
    }

    /// Outgoing edges of the given kind only
    pub fn edges_from_of_kind(
        &self,
        from: &TypeId,
        kind: RelationKind,
    ) -> impl Iterator<Item = &Relationship> {
        self.edges_from(from).filter(move |r| r.kind == kind)
    }

    /// All nodes transitively related to the given one, in either
    /// direction. The node itself is not part of the result.
    pub fn related_to(&self, id: &TypeId) -> BTreeSet<TypeId> {
        let (graph, indices) = self.build_petgraph();
        let Some(&start) = indices.get(id) else {
            return BTreeSet::new();
        };

        let mut related = BTreeSet::new();
        let mut bfs = Bfs::new(&graph, start);
        while let Some(node) = bfs.next(&graph) {
            if node != start {
                related.insert(graph[node].clone());
            }
        }
        related
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Converts the edge list into an undirected petgraph for traversal
    fn build_petgraph(&self) -> (UnGraph<TypeId, RelationKind>, std::collections::HashMap<TypeId, NodeIndex>) {
        let mut graph = UnGraph::new_undirected();
        let mut indices = std::collections::HashMap::new();

        for edge in self.edges.iter() {
            let from = *indices
                .entry(edge.from.clone())
                .or_insert_with(|| graph.add_node(edge.from.clone()));
            let to = *indices
                .entry(edge.to.clone())
                .or_insert_with(|| graph.add_node(edge.to.clone()));
            graph.add_edge(from, to, edge.kind);
        }

        (graph, indices)
    }
}

impl From<Vec<Relationship>> for RelationshipGraph {
    fn from(edges: Vec<Relationship>) -> Self {
        let mut graph = RelationshipGraph::new();
        for edge in edges {
            graph.add(edge);
        }
        graph
    }
}

impl From<RelationshipGraph> for Vec<Relationship> {
    fn from(graph: RelationshipGraph) -> Self {
        graph.edges.into_iter().collect()
    }
}
