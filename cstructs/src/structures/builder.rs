//! Joining classifier output with the control-flow edge set.

use log::debug;

use crate::flow::EdgeSet;

use super::classifier::Classification;
use super::types::{IfStructure, IterationStructure, StructureSet};

/// Combines a [`Classification`] with a pre-built edge set into the finished
/// [`StructureSet`]. One-shot: consumed by [`build`](Self::build).
#[derive(Debug)]
pub struct StructureBuilder {
    classification: Classification,
}

impl StructureBuilder {
    /// Wraps the output of a classification pass.
    #[must_use]
    pub fn new(classification: Classification) -> Self {
        Self { classification }
    }

    /// Produces the aggregate structure set.
    ///
    /// For every classified if location, one [`IfStructure`] with three edge
    /// subsets computed by containment against the condition/then/else
    /// sub-locations; for every loop location, one [`IterationStructure`]
    /// with its body edges. Sub-regions of a single construct are
    /// non-overlapping subsets of its overall span, so each edge inside the
    /// span belongs to exactly one partition.
    #[must_use]
    pub fn build(self, edges: &EdgeSet) -> StructureSet {
        let c = self.classification;

        // Hash iteration order is arbitrary; emit structures in source order
        // so dumps and iteration are deterministic.
        let mut if_locations: Vec<_> = c.ifs.iter().cloned().collect();
        if_locations.sort_by(|a, b| {
            (a.file.as_path(), a.start, a.end).cmp(&(b.file.as_path(), b.start, b.end))
        });
        let mut loop_locations: Vec<_> = c.loops.iter().map(|(l, k)| (l.clone(), *k)).collect();
        loop_locations.sort_by(|(a, _), (b, _)| {
            (a.file.as_path(), a.start, a.end).cmp(&(b.file.as_path(), b.start, b.end))
        });

        let mut ifs = Vec::with_capacity(if_locations.len());
        for location in if_locations {
            let Some(condition) = c.if_conditions.get(&location).cloned() else {
                debug_assert!(false, "if at {location} has no recorded condition");
                continue;
            };
            let Some(then_branch) = c.if_then_branches.get(&location).cloned() else {
                debug_assert!(false, "if at {location} has no recorded then clause");
                continue;
            };
            let else_branch = c.if_else_branches.get(&location).cloned();

            let condition_edges = edges.contained_in(&condition);
            let then_edges = edges.contained_in(&then_branch);
            let else_edges = else_branch
                .as_ref()
                .map_or_else(Vec::new, |region| edges.contained_in(region));

            ifs.push(IfStructure {
                location,
                condition,
                then_branch,
                else_branch,
                condition_edges,
                then_edges,
                else_edges,
            });
        }

        let mut iterations = Vec::with_capacity(loop_locations.len());
        for (location, kind) in loop_locations {
            let Some(body) = c.loop_bodies.get(&location).cloned() else {
                debug_assert!(false, "loop at {location} has no recorded body");
                continue;
            };
            let body_edges = edges.contained_in(&body);

            iterations.push(IterationStructure {
                controller: c.loop_controllers.get(&location).cloned(),
                condition: c.loop_conditions.get(&location).cloned(),
                initializer: c.loop_initializers.get(&location).cloned(),
                step: c.loop_steps.get(&location).cloned(),
                location,
                kind,
                body,
                body_edges,
            });
        }

        debug!(
            "built {} if structures, {} iteration structures over {} edges",
            ifs.len(),
            iterations.len(),
            edges.len()
        );
        StructureSet::new(ifs, iterations, c.statements_by_offset)
    }
}
