//! Structured-control classification and the finished structure set.
//!
//! One additive pass over the syntax-tree forest ([`classify`]) records, per
//! source location, the sub-locations of every if and loop construct plus a
//! statement-start-offset index. [`StructureBuilder`] then joins that
//! classification against the pre-built control-flow edge set, partitioning
//! the edges of each construct by containment into its sub-regions. The
//! resulting [`StructureSet`] is immutable and is what downstream
//! structured-control analyses query.

mod builder;
mod classifier;
mod types;


pub use builder::StructureBuilder;
pub use classifier::{classify, Classification};
pub use types::{IfStructure, IterationStructure, LoopKind, StructureSet};
