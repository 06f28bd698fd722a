#![allow(missing_docs)]

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::ctype::TypeId;
use crate::loc::SourceLocation;

/// Identity of one syntax-tree node, assigned by the upstream parser.
///
/// Ids are dense and unique within one translation context; control-flow
/// edges carry them as opaque back-references to the node they originated
/// from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// One parsed input file.
#[derive(Debug, Clone)]
pub struct TranslationUnit {
    /// The original file this unit was parsed from.
    pub file: Arc<PathBuf>,
    /// Top-level statements and declarations, in source order.
    pub stmts: Vec<Stmt>,
}

/// A statement node.
///
/// The variant set covers what the classifier and the scope/type layers need
/// to see; anything richer in the source is flattened by the upstream parser
/// into these shapes before hand-off.
#[derive(Debug, Clone)]
pub enum Stmt {
    /// An if statement, with or without an else clause.
    If(StmtIf),
    /// A for loop.
    For(StmtFor),
    /// A while or do-while loop.
    While(StmtWhile),
    /// A brace-delimited compound statement.
    Block(StmtBlock),
    /// An expression statement.
    Expr(StmtExpr),
    /// A declaration statement.
    Decl(StmtDecl),
    /// A return statement.
    Return(StmtReturn),
}

impl Stmt {
    /// The node's own span.
    #[must_use]
    pub fn location(&self) -> &SourceLocation {
        match self {
            Stmt::If(s) => &s.location,
            Stmt::For(s) => &s.location,
            Stmt::While(s) => &s.location,
            Stmt::Block(s) => &s.location,
            Stmt::Expr(s) => &s.location,
            Stmt::Decl(s) => &s.location,
            Stmt::Return(s) => &s.location,
        }
    }

    /// The node's parser-assigned identity.
    #[must_use]
    pub fn node_id(&self) -> NodeId {
        match self {
            Stmt::If(s) => s.node_id,
            Stmt::For(s) => s.node_id,
            Stmt::While(s) => s.node_id,
            Stmt::Block(s) => s.node_id,
            Stmt::Expr(s) => s.node_id,
            Stmt::Decl(s) => s.node_id,
            Stmt::Return(s) => s.node_id,
        }
    }
}

/// `if (condition) then_branch [else else_branch]`
#[derive(Debug, Clone)]
pub struct StmtIf {
    pub node_id: NodeId,
    /// Span of the whole statement, `if` keyword through the last branch.
    pub location: SourceLocation,
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    /// Absent when the statement has no else clause.
    pub else_branch: Option<Box<Stmt>>,
}

/// `for (initializer; condition; step) body`
///
/// All three controller slots are optional in C; `controller` is the span of
/// the parenthesized `(...)` block as a whole when the parser reports it.
#[derive(Debug, Clone)]
pub struct StmtFor {
    pub node_id: NodeId,
    pub location: SourceLocation,
    pub controller: Option<SourceLocation>,
    pub initializer: Option<Box<Stmt>>,
    pub condition: Option<Expr>,
    pub step: Option<Expr>,
    pub body: Box<Stmt>,
}

/// `while (condition) body`, or `do body while (condition);`.
#[derive(Debug, Clone)]
pub struct StmtWhile {
    pub node_id: NodeId,
    pub location: SourceLocation,
    /// Span of the parenthesized `(condition)` block when the parser reports it.
    pub controller: Option<SourceLocation>,
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub is_do_while: bool,
}

/// `{ stmts }`
#[derive(Debug, Clone)]
pub struct StmtBlock {
    pub node_id: NodeId,
    pub location: SourceLocation,
    pub stmts: Vec<Stmt>,
}

/// An expression evaluated for effect.
#[derive(Debug, Clone)]
pub struct StmtExpr {
    pub node_id: NodeId,
    pub location: SourceLocation,
    pub expr: Expr,
}

/// A declaration of one name with its type expression.
#[derive(Debug, Clone)]
pub struct StmtDecl {
    pub node_id: NodeId,
    pub location: SourceLocation,
    /// The declared name.
    pub name: CompactString,
    /// Root of the declared type expression in the owning `TypeTable`.
    pub ty: TypeId,
    /// Optional initializer.
    pub init: Option<Expr>,
}

/// `return [value];`
#[derive(Debug, Clone)]
pub struct StmtReturn {
    pub node_id: NodeId,
    pub location: SourceLocation,
    pub value: Option<Expr>,
}

/// An expression node. The classifier treats expressions opaquely except for
/// their spans, so the kind set stays minimal.
#[derive(Debug, Clone)]
pub struct Expr {
    pub node_id: NodeId,
    pub location: SourceLocation,
    pub kind: ExprKind,
}

/// Expression shapes the boundary model distinguishes.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// A name reference.
    Name(CompactString),
    /// A literal token, carried as its source text.
    Literal(CompactString),
    /// A unary operation.
    Unary {
        op: CompactString,
        operand: Box<Expr>,
    },
    /// A binary operation.
    Binary {
        op: CompactString,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// A simple assignment.
    Assign { target: Box<Expr>, value: Box<Expr> },
    /// A call expression.
    Call { callee: Box<Expr>, args: Vec<Expr> },
}
