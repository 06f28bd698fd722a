//! The syntax-tree boundary model.
//!
//! Parsing C is an external collaborator's job: upstream hands this crate a
//! sequence of already-parsed translation units, one per input file, with
//! every node stamped with a [`SourceLocation`](crate::loc::SourceLocation)
//! through the originating [`SourceMap`](crate::loc::SourceMap). This module
//! owns the node types of that boundary plus the general traversal capability
//! ([`Visit`]) the classifier drives.

mod types;
mod visitor;

pub use types::{
    Expr, ExprKind, NodeId, Stmt, StmtBlock, StmtDecl, StmtExpr, StmtFor, StmtIf, StmtReturn,
    StmtWhile, TranslationUnit,
};
pub use visitor::{walk_expr, walk_stmt, Visit};
