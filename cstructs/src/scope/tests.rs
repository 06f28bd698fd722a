use super::*;
use crate::ctype::{CType, CompositeKind, Member, PrimitiveKind, TypeId, TypeTable};
use crate::loc::SourceMap;

fn decl(
    stack: &ScopeStack,
    map: &SourceMap,
    name: &str,
    kind: DeclKind,
    ty: TypeId,
) -> Declaration {
    Declaration {
        name: name.into(),
        scoped_name: stack.scoped_name_of(name),
        kind,
        ty,
        location: map.location(0, 1),
    }
}

#[test]
fn lookups_search_innermost_outward() {
    let map = SourceMap::new("a.c", "int x;\n");
    let mut table = TypeTable::new();
    let int = table.primitive(PrimitiveKind::Int);
    let long = table.primitive(PrimitiveKind::Long);

    let mut stack = ScopeStack::new();
    stack.register_declaration(decl(&stack, &map, "x", DeclKind::Variable, int));
    stack.enter_function("f");
    stack.register_declaration(decl(&stack, &map, "x", DeclKind::Variable, long));

    // The inner x shadows the global one.
    let found = stack.lookup_variable("x").map(|d| d.ty);
    assert_eq!(found, Some(long));

    stack.exit_scope();
    let found = stack.lookup_variable("x").map(|d| d.ty);
    assert_eq!(found, Some(int));
    assert!(stack.lookup_variable("y").is_none());
}

#[test]
fn name_in_use_is_visible_from_nested_blocks_but_not_siblings() {
    let map = SourceMap::new("a.c", "void f(void) { int x; }\n");
    let mut table = TypeTable::new();
    let int = table.primitive(PrimitiveKind::Int);

    let mut stack = ScopeStack::new();
    stack.enter_function("f");
    stack.register_declaration(decl(&stack, &map, "x", DeclKind::Variable, int));

    stack.enter_block();
    assert!(stack.variable_name_in_use("x", "x"));
    stack.exit_scope();
    stack.exit_scope();

    // An unrelated sibling function's scope does not see it.
    stack.enter_function("g");
    assert!(!stack.variable_name_in_use("x", "x"));
    stack.exit_scope();
}

#[test]
fn name_in_use_matches_scope_qualified_probes() {
    let map = SourceMap::new("a.c", "void f(void) { int x; }\n");
    let mut table = TypeTable::new();
    let int = table.primitive(PrimitiveKind::Int);

    let mut stack = ScopeStack::new();
    stack.enter_function("f");
    stack.register_declaration(decl(&stack, &map, "x", DeclKind::Variable, int));

    assert!(stack.variable_name_in_use("f::x", "x"));
    assert!(!stack.variable_name_in_use("g::x", "y"));
}

#[test]
fn functions_resolve_separately_from_variables() {
    let map = SourceMap::new("a.c", "int f(void);\n");
    let mut table = TypeTable::new();
    let int = table.primitive(PrimitiveKind::Int);
    let sig = table.function(int, vec![]);

    let mut stack = ScopeStack::new();
    stack.register_declaration(decl(&stack, &map, "f", DeclKind::Function, sig));

    assert!(stack.lookup_function("f").is_some());
    assert!(stack.lookup_variable("f").is_none());
    assert!(stack.variable_name_in_use("f", "f"));
}

#[test]
fn type_declaration_registers_once_per_kind_and_name() {
    let mut table = TypeTable::new();
    let first = table.composite(CompositeKind::Struct, "s", vec![]);
    let second = table.composite(CompositeKind::Struct, "s", vec![]);
    let union_tag = table.composite(CompositeKind::Union, "s", vec![]);

    let mut stack = ScopeStack::new();
    assert!(stack.register_type_declaration(CompositeKind::Struct, "s", first));
    assert!(!stack.register_type_declaration(CompositeKind::Struct, "s", second));
    // Same tag name in a different namespace is a distinct registration.
    assert!(stack.register_type_declaration(CompositeKind::Union, "s", union_tag));

    // The first instance stays canonical.
    assert_eq!(stack.lookup_type("struct s"), Some(first));
}

#[test]
fn duplicate_tag_is_rejected_across_nested_scopes() {
    let mut table = TypeTable::new();
    let outer = table.composite(CompositeKind::Struct, "s", vec![]);
    let inner = table.composite(CompositeKind::Struct, "s", vec![]);

    let mut stack = ScopeStack::new();
    assert!(stack.register_type_declaration(CompositeKind::Struct, "s", outer));
    stack.enter_function("f");
    assert!(!stack.register_type_declaration(CompositeKind::Struct, "s", inner));
    assert_eq!(stack.lookup_type("struct s"), Some(outer));
}

#[test]
fn register_composite_patches_visible_forward_refs() {
    let map = SourceMap::new("a.c", "struct s *p;\n");
    let mut table = TypeTable::new();
    let fwd = table.elaborated(CompositeKind::Struct, "s");
    let ptr = table.pointer_to(fwd);

    let mut stack = ScopeStack::new();
    stack.register_declaration(decl(&stack, &map, "p", DeclKind::Variable, ptr));

    let target = table.composite(CompositeKind::Struct, "s", vec![]);
    assert!(stack.register_composite(&mut table, target));

    assert!(
        matches!(table.get(fwd), CType::Elaborated { binding: Some(b), .. } if *b == target),
        "visible forward reference was not patched"
    );

    // A second registration of the same tag merges instead of re-declaring.
    let duplicate = table.composite(CompositeKind::Struct, "s", vec![]);
    assert!(!stack.register_composite(&mut table, duplicate));
    assert_eq!(stack.lookup_type("struct s"), Some(target));
}

#[test]
fn typedef_lookup_recovers_anonymous_composite() {
    // typedef struct { int v; } s_t; the composite is reachable only
    // through the typedef name.
    let mut table = TypeTable::new();
    let int = table.primitive(PrimitiveKind::Int);
    let anon = table.composite(
        CompositeKind::Struct,
        "",
        vec![Member {
            name: "v".into(),
            ty: int,
        }],
    );
    let alias = table.typedef("s_t", anon);

    let map = SourceMap::new("a.c", "typedef struct { int v; } s_t;\n");
    let mut stack = ScopeStack::new();
    stack.register_declaration(decl(&stack, &map, "s_t", DeclKind::Typedef, alias));

    let denoted = stack.lookup_typedef("s_t");
    assert_eq!(denoted, Some(alias));
    assert_eq!(table.resolve(alias), anon);
    assert!(stack.lookup_typedef("other_t").is_none());
}

#[test]
fn scoped_names_are_function_qualified() {
    let mut stack = ScopeStack::new();
    assert!(stack.is_global_scope());
    assert_eq!(stack.scoped_name_of("x"), "x");

    stack.enter_function("f");
    assert!(!stack.is_global_scope());
    assert_eq!(stack.scoped_name_of("x"), "f::x");

    // Block scopes inside the function keep the function's identity.
    stack.enter_block();
    assert_eq!(stack.scoped_name_of("x"), "f::x");
    stack.exit_scope();
    stack.exit_scope();

    stack.enter_function("g");
    assert_eq!(stack.scoped_name_of("x"), "g::x");
}
