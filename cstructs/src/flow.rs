//! The externally built control-flow edge set.
//!
//! Edges are elements of a directed control-flow graph built by an upstream
//! stage. This crate treats them as opaque and immutable: all it ever reads
//! is the source location an edge carries and the identity of the syntax-tree
//! node it originated from. Structures reference edges by [`EdgeId`] into the
//! owning [`EdgeSet`].

use serde::{Deserialize, Serialize};

use crate::ast::NodeId;
use crate::loc::SourceLocation;

/// Index of one edge in its owning [`EdgeSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

/// One directed step of the upstream control-flow graph.
#[derive(Debug, Clone)]
pub struct FlowEdge {
    /// Where the edge's step lies in the original source.
    pub location: SourceLocation,
    /// The syntax-tree node the edge originated from.
    pub origin: NodeId,
}

/// A pre-built, finite, immutable set of control-flow edges.
#[derive(Debug, Default)]
pub struct EdgeSet {
    edges: Vec<FlowEdge>,
}

impl EdgeSet {
    /// Wraps the edges handed over by the upstream control-flow builder.
    #[must_use]
    pub fn new(edges: Vec<FlowEdge>) -> Self {
        Self { edges }
    }

    /// Number of edges in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True when the set holds no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The edge behind an id. Ids are only ever produced by this set, so an
    /// out-of-range id is an upstream defect.
    #[must_use]
    pub fn get(&self, id: EdgeId) -> &FlowEdge {
        &self.edges[id.0 as usize]
    }

    /// Iterates over `(id, edge)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (EdgeId, &FlowEdge)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, edge)| (EdgeId(u32::try_from(i).unwrap_or(u32::MAX)), edge))
    }

    /// Ids of all edges whose location lies within `region`.
    #[must_use]
    pub fn contained_in(&self, region: &SourceLocation) -> Vec<EdgeId> {
        self.iter()
            .filter(|(_, edge)| region.contains(&edge.location))
            .map(|(id, _)| id)
            .collect()
    }
}

impl std::ops::Index<EdgeId> for EdgeSet {
    type Output = FlowEdge;

    fn index(&self, id: EdgeId) -> &FlowEdge {
        self.get(id)
    }
}
