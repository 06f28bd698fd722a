//! Test suite for the structure classifier and builder, driven end to end
//! from boundary syntax trees through the finished structure set.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use cstructs::ast::{
    Expr, ExprKind, NodeId, Stmt, StmtBlock, StmtExpr, StmtIf, StmtWhile, TranslationUnit,
};
use cstructs::flow::{EdgeSet, FlowEdge};
use cstructs::loc::{SourceLocation, SourceMap};
use cstructs::structures::{classify, LoopKind, StructureBuilder};

struct Builder {
    map: SourceMap,
    src: String,
    next: u32,
}

impl Builder {
    fn new(file: &str, src: &str) -> Self {
        Self {
            map: SourceMap::new(file, src),
            src: src.to_owned(),
            next: 0,
        }
    }

    fn id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }

    fn span(&self, pat: &str) -> SourceLocation {
        let start = self.src.find(pat).unwrap();
        self.map.location(start, start + pat.len())
    }

    fn expr(&mut self, pat: &str) -> Expr {
        Expr {
            node_id: self.id(),
            location: self.span(pat),
            kind: ExprKind::Name(pat.into()),
        }
    }

    fn expr_stmt(&mut self, pat: &str) -> Stmt {
        let expr = self.expr(pat.trim_end_matches(';'));
        Stmt::Expr(StmtExpr {
            node_id: self.id(),
            location: self.span(pat),
            expr,
        })
    }

    fn block(&mut self, pat: &str, stmts: Vec<Stmt>) -> Stmt {
        Stmt::Block(StmtBlock {
            node_id: self.id(),
            location: self.span(pat),
            stmts,
        })
    }

    fn unit(&self, stmts: Vec<Stmt>) -> TranslationUnit {
        TranslationUnit {
            file: Arc::clone(self.map.file()),
            stmts,
        }
    }

    fn edge(&mut self, pat: &str) -> FlowEdge {
        FlowEdge {
            location: self.span(pat),
            origin: self.id(),
        }
    }
}

const NESTED_SRC: &str = "\
while (running) {
  if (stop) {
    handle();
  } else {
    tick();
  }
}
";

/// A while loop whose body holds an if/else.
fn nested_unit(b: &mut Builder) -> TranslationUnit {
    let if_cond = b.expr("stop");
    let then_stmt = b.expr_stmt("handle();");
    let then_branch = b.block("{\n    handle();\n  }", vec![then_stmt]);
    let else_stmt = b.expr_stmt("tick();");
    let else_branch = b.block("{\n    tick();\n  }", vec![else_stmt]);
    let if_stmt = Stmt::If(StmtIf {
        node_id: b.id(),
        location: b.span("if (stop) {\n    handle();\n  } else {\n    tick();\n  }"),
        condition: if_cond,
        then_branch: Box::new(then_branch),
        else_branch: Some(Box::new(else_branch)),
    });

    let while_cond = b.expr("running");
    let body = b.block(
        "{\n  if (stop) {\n    handle();\n  } else {\n    tick();\n  }\n}",
        vec![if_stmt],
    );
    let while_stmt = Stmt::While(StmtWhile {
        node_id: b.id(),
        location: b.span(NESTED_SRC.trim_end()),
        controller: Some(b.span("(running)")),
        condition: while_cond,
        body: Box::new(body),
        is_do_while: false,
    });
    b.unit(vec![while_stmt])
}

#[test]
fn nested_structures_are_both_recorded() {
    let mut b = Builder::new("loop.c", NESTED_SRC);
    let unit = nested_unit(&mut b);

    let set = StructureBuilder::new(classify(&[unit])).build(&EdgeSet::default());
    assert_eq!(set.iteration_count(), 1);
    assert_eq!(set.if_count(), 1);

    let looped = set.iterations().next().unwrap();
    assert_eq!(looped.kind, LoopKind::While);
    let ifs = set.ifs().next().unwrap();
    assert!(looped.body.contains(&ifs.location));
}

#[test]
fn loop_body_edges_include_edges_of_nested_constructs() {
    let mut b = Builder::new("loop.c", NESTED_SRC);
    let unit = nested_unit(&mut b);

    let edges = EdgeSet::new(vec![
        b.edge("stop"),
        b.edge("handle();"),
        b.edge("tick();"),
        b.edge("running"),
    ]);
    let set = StructureBuilder::new(classify(&[unit])).build(&edges);

    // Containment is purely geometric. The loop body covers the whole if, so
    // every edge of the if also counts as a loop body edge.
    let looped = set.iterations().next().unwrap();
    assert_eq!(looped.body_edges.len(), 3);

    // The condition edge of the while sits in the controller, not the body.
    let running = edges.contained_in(&looped.location);
    assert_eq!(running.len(), 4);

    let ifs = set.ifs().next().unwrap();
    assert_eq!(ifs.condition_edges.len(), 1);
    assert_eq!(ifs.then_edges.len(), 1);
    assert_eq!(ifs.else_edges.len(), 1);
}

#[test]
fn structures_from_multiple_files_stay_ordered_by_file_and_offset() {
    let src = "if (a) {\n  b();\n}\n";
    let mut first = Builder::new("alpha.c", src);
    let mut second = Builder::new("beta.c", src);

    let mut simple_if = |b: &mut Builder| {
        let cond = b.expr("a");
        let call = b.expr_stmt("b();");
        let then_branch = b.block("{\n  b();\n}", vec![call]);
        Stmt::If(StmtIf {
            node_id: b.id(),
            location: b.span(src.trim_end()),
            condition: cond,
            then_branch: Box::new(then_branch),
            else_branch: None,
        })
    };

    let unit_a = {
        let stmt = simple_if(&mut first);
        first.unit(vec![stmt])
    };
    let unit_b = {
        let stmt = simple_if(&mut second);
        second.unit(vec![stmt])
    };

    // Hand the units over in reverse file order; output order must not
    // depend on it.
    let set = StructureBuilder::new(classify(&[unit_b, unit_a])).build(&EdgeSet::default());
    let files: Vec<String> = set
        .ifs()
        .map(|s| s.location.file.display().to_string())
        .collect();
    assert_eq!(files, vec!["alpha.c", "beta.c"]);
}

#[test]
fn structure_set_serializes_to_json() {
    let mut b = Builder::new("loop.c", NESTED_SRC);
    let unit = nested_unit(&mut b);
    let edges = EdgeSet::new(vec![b.edge("handle();")]);

    let set = StructureBuilder::new(classify(&[unit])).build(&edges);
    let value = serde_json::to_value(&set).unwrap();

    let ifs = value.get("ifs").and_then(|v| v.as_array()).unwrap();
    assert_eq!(ifs.len(), 1);
    assert_eq!(ifs[0]["location"]["file"], "loop.c");
    assert!(ifs[0]["condition"]["start"].is_u64());
    assert_eq!(ifs[0]["then_edges"].as_array().unwrap().len(), 1);

    let iterations = value.get("iterations").and_then(|v| v.as_array()).unwrap();
    assert_eq!(iterations[0]["kind"], "While");

    // Statement offsets serialize as a JSON map keyed by offset.
    assert!(value.get("statements_by_offset").unwrap().is_object());
}
