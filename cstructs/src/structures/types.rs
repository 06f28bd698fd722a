use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::ast::NodeId;
use crate::flow::EdgeId;
use crate::loc::SourceLocation;

/// Which loop form an iteration structure was classified from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoopKind {
    /// `for (...; ...; ...)`
    For,
    /// `while (...)`
    While,
    /// `do ... while (...);`
    DoWhile,
}

/// One classified if statement joined with its control-flow edges.
///
/// The three edge subsets partition the edges lying inside the statement's
/// overall span: the condition, then and else regions are non-overlapping, so
/// each contained edge lands in exactly one subset.
#[derive(Debug, Clone, Serialize)]
pub struct IfStructure {
    /// The if statement's own span; the structure's identity.
    pub location: SourceLocation,
    /// Span of the condition expression.
    pub condition: SourceLocation,
    /// Span of the then clause.
    pub then_branch: SourceLocation,
    /// Span of the else clause; absent when the statement has none.
    pub else_branch: Option<SourceLocation>,
    /// Edges located within the condition span.
    pub condition_edges: Vec<EdgeId>,
    /// Edges located within the then span.
    pub then_edges: Vec<EdgeId>,
    /// Edges located within the else span; empty without an else clause.
    pub else_edges: Vec<EdgeId>,
}

/// One classified loop joined with its control-flow edges.
#[derive(Debug, Clone, Serialize)]
pub struct IterationStructure {
    /// The loop's own span; the structure's identity.
    pub location: SourceLocation,
    /// Which loop form this is.
    pub kind: LoopKind,
    /// Span of the parenthesized controller block, when the parser reports it.
    pub controller: Option<SourceLocation>,
    /// Span of the controlling expression.
    pub condition: Option<SourceLocation>,
    /// Span of the loop body. Always present.
    pub body: SourceLocation,
    /// Span of the initializer (for loops only).
    pub initializer: Option<SourceLocation>,
    /// Span of the iteration/increment statement (for loops only).
    pub step: Option<SourceLocation>,
    /// Edges located within the body span.
    pub body_edges: Vec<EdgeId>,
}

/// The finished aggregate structure set.
///
/// Built once, after all trees and edges are available, then immutable.
/// Structures are keyed uniquely by their location; two structures sharing a
/// location would be an upstream defect.
#[derive(Debug, Default, Serialize)]
pub struct StructureSet {
    ifs: Vec<IfStructure>,
    iterations: Vec<IterationStructure>,
    /// Start offset of every statement encountered -> the node beginning
    /// there. Offsets are bytes into the statement's original file, so this
    /// index is only unambiguous when the classified units came from one
    /// file; multi-file sets keep the last writer per offset.
    statements_by_offset: FxHashMap<usize, NodeId>,
    #[serde(skip)]
    if_index: FxHashMap<SourceLocation, usize>,
    #[serde(skip)]
    iteration_index: FxHashMap<SourceLocation, usize>,
}

impl StructureSet {
    pub(super) fn new(
        ifs: Vec<IfStructure>,
        iterations: Vec<IterationStructure>,
        statements_by_offset: FxHashMap<usize, NodeId>,
    ) -> Self {
        let if_index = ifs
            .iter()
            .enumerate()
            .map(|(i, s)| (s.location.clone(), i))
            .collect::<FxHashMap<_, _>>();
        let iteration_index = iterations
            .iter()
            .enumerate()
            .map(|(i, s)| (s.location.clone(), i))
            .collect::<FxHashMap<_, _>>();
        debug_assert_eq!(if_index.len(), ifs.len(), "duplicate if location");
        debug_assert_eq!(
            iteration_index.len(),
            iterations.len(),
            "duplicate loop location"
        );
        Self {
            ifs,
            iterations,
            statements_by_offset,
            if_index,
            iteration_index,
        }
    }

    /// All if structures, in source order.
    pub fn ifs(&self) -> impl Iterator<Item = &IfStructure> {
        self.ifs.iter()
    }

    /// All iteration structures, in source order.
    pub fn iterations(&self) -> impl Iterator<Item = &IterationStructure> {
        self.iterations.iter()
    }

    /// The if structure whose own location is exactly `location`.
    #[must_use]
    pub fn if_at(&self, location: &SourceLocation) -> Option<&IfStructure> {
        self.if_index.get(location).map(|&i| &self.ifs[i])
    }

    /// The iteration structure whose own location is exactly `location`.
    #[must_use]
    pub fn iteration_at(&self, location: &SourceLocation) -> Option<&IterationStructure> {
        self.iteration_index
            .get(location)
            .map(|&i| &self.iterations[i])
    }

    /// The innermost if structure whose span contains `location`.
    #[must_use]
    pub fn enclosing_if(&self, location: &SourceLocation) -> Option<&IfStructure> {
        self.ifs
            .iter()
            .filter(|s| s.location.contains(location))
            .min_by_key(|s| s.location.end - s.location.start)
    }

    /// The innermost iteration structure whose span contains `location`.
    #[must_use]
    pub fn enclosing_iteration(&self, location: &SourceLocation) -> Option<&IterationStructure> {
        self.iterations
            .iter()
            .filter(|s| s.location.contains(location))
            .min_by_key(|s| s.location.end - s.location.start)
    }

    /// The syntax-tree node whose statement starts exactly at `offset`.
    #[must_use]
    pub fn statement_at(&self, offset: usize) -> Option<NodeId> {
        self.statements_by_offset.get(&offset).copied()
    }

    /// Number of if structures.
    #[must_use]
    pub fn if_count(&self) -> usize {
        self.ifs.len()
    }

    /// Number of iteration structures.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        self.iterations.len()
    }
}
