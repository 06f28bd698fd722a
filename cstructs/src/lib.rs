//! Structured-control and type-binding layer between a C parser and a
//! control-flow model.
//!
//! The crate sits between an external C parser and downstream flow-sensitive
//! analyses. It takes the parser's syntax trees and an already-built
//! control-flow edge set and produces:
//!
//! - A recursive C type table with forward references to composites bound
//!   once their definitions are seen ([`ctype`]).
//! - A nested lexical scope stack for variables, functions, type tags, and
//!   typedefs, with scope-qualified naming ([`scope`]).
//! - A queryable set of if- and loop-structures, each joining the construct's
//!   sub-locations with the control-flow edges that fall inside them
//!   ([`structures`]).
//!
//! Everything is synchronous, single-threaded, and pure in-memory. Parsing
//! and control-flow construction stay upstream; [`error::ParseFailure`] is
//! how their failures are classified at the boundary.

pub mod ast;
pub mod ctype;
pub mod error;
pub mod flow;
pub mod loc;
pub mod scope;
pub mod structures;

pub use ast::{NodeId, TranslationUnit};
pub use ctype::{CType, CompositeKind, TypeId, TypeTable};
pub use error::ParseFailure;
pub use flow::{EdgeId, EdgeSet, FlowEdge};
pub use loc::{SourceLocation, SourceMap};
pub use scope::{DeclKind, Declaration, ScopeStack};
pub use structures::{
    classify, IfStructure, IterationStructure, LoopKind, StructureBuilder, StructureSet,
};
