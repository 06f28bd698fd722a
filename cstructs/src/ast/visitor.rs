//! Generic traversal over the boundary syntax tree.
//!
//! Implementors override the `visit_*` hooks they care about and delegate the
//! rest to the `walk_*` functions, which recurse in source order.

use super::types::{Expr, ExprKind, Stmt};

/// A read-only visitor over statements and expressions.
pub trait Visit {
    /// Visits one statement. The default walks into children.
    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    /// Visits one expression. The default walks into operands.
    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }
}

/// Recurses into the children of `stmt` in source order.
pub fn walk_stmt<V: Visit + ?Sized>(visitor: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::If(node) => {
            visitor.visit_expr(&node.condition);
            visitor.visit_stmt(&node.then_branch);
            if let Some(else_branch) = &node.else_branch {
                visitor.visit_stmt(else_branch);
            }
        }
        Stmt::For(node) => {
            if let Some(initializer) = &node.initializer {
                visitor.visit_stmt(initializer);
            }
            if let Some(condition) = &node.condition {
                visitor.visit_expr(condition);
            }
            if let Some(step) = &node.step {
                visitor.visit_expr(step);
            }
            visitor.visit_stmt(&node.body);
        }
        Stmt::While(node) => {
            visitor.visit_expr(&node.condition);
            visitor.visit_stmt(&node.body);
        }
        Stmt::Block(node) => {
            for stmt in &node.stmts {
                visitor.visit_stmt(stmt);
            }
        }
        Stmt::Expr(node) => visitor.visit_expr(&node.expr),
        Stmt::Decl(node) => {
            if let Some(init) = &node.init {
                visitor.visit_expr(init);
            }
        }
        Stmt::Return(node) => {
            if let Some(value) = &node.value {
                visitor.visit_expr(value);
            }
        }
    }
}

/// Recurses into the operands of `expr`.
pub fn walk_expr<V: Visit + ?Sized>(visitor: &mut V, expr: &Expr) {
    match &expr.kind {
        ExprKind::Name(_) | ExprKind::Literal(_) => {}
        ExprKind::Unary { operand, .. } => visitor.visit_expr(operand),
        ExprKind::Binary { lhs, rhs, .. } => {
            visitor.visit_expr(lhs);
            visitor.visit_expr(rhs);
        }
        ExprKind::Assign { target, value } => {
            visitor.visit_expr(target);
            visitor.visit_expr(value);
        }
        ExprKind::Call { callee, args } => {
            visitor.visit_expr(callee);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
    }
}
