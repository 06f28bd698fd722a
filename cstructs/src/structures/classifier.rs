//! The location classifier: one additive pass over the syntax-tree forest.
//!
//! The classifier knows nothing about control-flow edges. It only records,
//! keyed by each construct's own location, the sub-locations the builder
//! later joins edges against, plus the statement-start-offset index. Keys are
//! source spans, which are unique per distinct construct occurrence, so
//! visiting order does not affect the final maps.

use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::ast::{walk_stmt, NodeId, Stmt, TranslationUnit, Visit};
use crate::loc::SourceLocation;

use super::types::LoopKind;

/// Per-location sub-structure recorded by the classification pass.
#[derive(Debug, Default)]
pub struct Classification {
    /// Locations of all if statements.
    pub(super) ifs: FxHashSet<SourceLocation>,
    /// If location -> condition span.
    pub(super) if_conditions: FxHashMap<SourceLocation, SourceLocation>,
    /// If location -> then-clause span.
    pub(super) if_then_branches: FxHashMap<SourceLocation, SourceLocation>,
    /// If location -> else-clause span. No entry when there is no else.
    pub(super) if_else_branches: FxHashMap<SourceLocation, SourceLocation>,
    /// Locations of all loops, with the loop form met there.
    pub(super) loops: FxHashMap<SourceLocation, LoopKind>,
    /// Loop location -> initializer span (for loops only).
    pub(super) loop_initializers: FxHashMap<SourceLocation, SourceLocation>,
    /// Loop location -> parenthesized-controller span.
    pub(super) loop_controllers: FxHashMap<SourceLocation, SourceLocation>,
    /// Loop location -> controlling-expression span.
    pub(super) loop_conditions: FxHashMap<SourceLocation, SourceLocation>,
    /// Loop location -> body span.
    pub(super) loop_bodies: FxHashMap<SourceLocation, SourceLocation>,
    /// Loop location -> iteration-statement span (for loops only).
    pub(super) loop_steps: FxHashMap<SourceLocation, SourceLocation>,
    /// Statement start offset -> the node beginning there. Byte offsets into
    /// the statement's original file; unambiguous for single-file input.
    pub(super) statements_by_offset: FxHashMap<usize, NodeId>,
}

impl Classification {
    /// Locations of all classified if statements.
    pub fn if_locations(&self) -> impl Iterator<Item = &SourceLocation> {
        self.ifs.iter()
    }

    /// Locations of all classified loops with their forms.
    pub fn loop_locations(&self) -> impl Iterator<Item = (&SourceLocation, LoopKind)> {
        self.loops.iter().map(|(loc, kind)| (loc, *kind))
    }
}

/// Classifies one or more parsed translation units in a single traversal.
#[must_use]
pub fn classify(units: &[TranslationUnit]) -> Classification {
    let mut classifier = StructureClassifier {
        classification: Classification::default(),
    };
    for unit in units {
        debug!("classifying {}", unit.file.display());
        for stmt in &unit.stmts {
            classifier.visit_stmt(stmt);
        }
    }
    classifier.classification
}

struct StructureClassifier {
    classification: Classification,
}

impl StructureClassifier {
    fn record(&mut self, stmt: &Stmt) {
        let out = &mut self.classification;
        out.statements_by_offset
            .insert(stmt.location().start, stmt.node_id());

        match stmt {
            Stmt::If(node) => {
                let key = node.location.clone();
                let fresh = out.ifs.insert(key.clone());
                debug_assert!(fresh, "two if statements share location {key}");
                out.if_conditions
                    .insert(key.clone(), node.condition.location.clone());
                out.if_then_branches
                    .insert(key.clone(), node.then_branch.location().clone());
                if let Some(else_branch) = &node.else_branch {
                    out.if_else_branches
                        .insert(key, else_branch.location().clone());
                }
            }
            Stmt::For(node) => {
                let key = node.location.clone();
                let fresh = out.loops.insert(key.clone(), LoopKind::For).is_none();
                debug_assert!(fresh, "two loops share location {key}");
                if let Some(initializer) = &node.initializer {
                    out.loop_initializers
                        .insert(key.clone(), initializer.location().clone());
                }
                if let Some(controller) = &node.controller {
                    out.loop_controllers.insert(key.clone(), controller.clone());
                }
                if let Some(condition) = &node.condition {
                    out.loop_conditions
                        .insert(key.clone(), condition.location.clone());
                }
                if let Some(step) = &node.step {
                    out.loop_steps.insert(key.clone(), step.location.clone());
                }
                out.loop_bodies.insert(key, node.body.location().clone());
            }
            Stmt::While(node) => {
                let kind = if node.is_do_while {
                    LoopKind::DoWhile
                } else {
                    LoopKind::While
                };
                let key = node.location.clone();
                let fresh = out.loops.insert(key.clone(), kind).is_none();
                debug_assert!(fresh, "two loops share location {key}");
                if let Some(controller) = &node.controller {
                    out.loop_controllers.insert(key.clone(), controller.clone());
                }
                out.loop_conditions
                    .insert(key.clone(), node.condition.location.clone());
                out.loop_bodies.insert(key, node.body.location().clone());
            }
            Stmt::Block(_) | Stmt::Expr(_) | Stmt::Decl(_) | Stmt::Return(_) => {}
        }
    }
}

impl Visit for StructureClassifier {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        self.record(stmt);
        walk_stmt(self, stmt);
    }
}
