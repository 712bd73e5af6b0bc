//! Tests for factory memoization, referential stability, and structural
//! fault handling.

use jsym_ast::node::{ClassData, MethodData, ParamData, TypeRefData};
use jsym_ast::{NodeArena, NodeIndex, NodeList};
use jsym_common::Span;
use jsym_symbols::{AstSymFactory, SymbolError, SymbolStats};

fn trace_init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn param(arena: &mut NodeArena, name: &str, ty: &str) -> NodeIndex {
    let name_idx = arena.add_identifier(name, Span::new(0, name.len() as u32));
    let ty_name = arena.add_identifier(ty, Span::new(0, ty.len() as u32));
    let ty_idx = arena.add_type_ref(
        Span::new(0, ty.len() as u32),
        TypeRefData {
            type_name: ty_name,
            type_arguments: None,
        },
    );
    arena.add_parameter(
        Span::new(0, 0),
        ParamData {
            modifiers: None,
            name: name_idx,
            type_annotation: ty_idx,
        },
    )
}

fn method(arena: &mut NodeArena, name: &str, params: Vec<NodeIndex>) -> NodeIndex {
    let name_idx = arena.add_identifier(name, Span::new(0, name.len() as u32));
    let ret = arena.add_identifier("void", Span::new(0, 4));
    arena.add_method(
        Span::new(0, 0),
        MethodData {
            modifiers: None,
            name: name_idx,
            type_parameters: None,
            parameters: NodeList::new(params),
            return_type: ret,
            arity: 0,
        },
    )
}

fn class_of(arena: &mut NodeArena, name: &str, members: Vec<NodeIndex>) -> NodeIndex {
    let name_idx = arena.add_identifier(name, Span::new(0, name.len() as u32));
    arena.add_class(
        Span::new(0, 0),
        ClassData {
            modifiers: None,
            name: name_idx,
            type_parameters: None,
            members: NodeList::new(members),
        },
    )
}

/// `factory.get(n)` twice returns the same identity, and the id resolves to
/// the same arena slot.
#[test]
fn repeated_requests_return_the_identical_symbol() {
    trace_init();
    let mut arena = NodeArena::new();
    let m = method(&mut arena, "once", vec![]);
    let class = class_of(&mut arena, "Stable", vec![m]);

    let mut factory = AstSymFactory::new();
    let class_id = factory.class_symbol(&arena, class).unwrap();
    let first = factory.exec_symbol(&arena, m, class_id).unwrap();
    let second = factory.exec_symbol(&arena, m, class_id).unwrap();

    assert_eq!(first, second);
    assert!(std::ptr::eq(
        factory.exec(first).unwrap(),
        factory.exec(second).unwrap()
    ));
    // Memoized: still exactly one executable symbol in the session.
    assert_eq!(factory.stats().execs, 1);
}

/// Two independent call paths (eager class-member construction and a direct
/// request) observe the identical symbol instance.
#[test]
fn independent_call_sites_share_one_symbol() {
    let mut arena = NodeArena::new();
    let m = method(&mut arena, "shared", vec![]);
    let class = class_of(&mut arena, "TwoPaths", vec![m]);

    let mut factory = AstSymFactory::new();
    // Path 1: class construction eagerly builds its members.
    let class_id = factory.class_symbol(&arena, class).unwrap();
    let via_class = factory.class(class_id).unwrap().declared_executables()[0];
    // Path 2: direct request for the same declaration node.
    let direct = factory.exec_symbol(&arena, m, class_id).unwrap();

    assert_eq!(via_class, direct);
}

#[test]
fn class_symbol_is_memoized_too() {
    let mut arena = NodeArena::new();
    let class = class_of(&mut arena, "Once", vec![]);

    let mut factory = AstSymFactory::new();
    let a = factory.class_symbol(&arena, class).unwrap();
    let b = factory.class_symbol(&arena, class).unwrap();
    assert_eq!(a, b);
    assert_eq!(factory.stats().classes, 1);
}

/// Nested construction routes through the same factory: parameters built
/// while building an executable are reachable from it afterwards.
#[test]
fn nested_parameter_construction_routes_through_factory() {
    let mut arena = NodeArena::new();
    let p = param(&mut arena, "input", "String");
    let m = method(&mut arena, "route", vec![p]);
    let class = class_of(&mut arena, "Router", vec![m]);

    let mut factory = AstSymFactory::new();
    let class_id = factory.class_symbol(&arena, class).unwrap();
    let exec_id = factory.exec_symbol(&arena, m, class_id).unwrap();

    let pid = factory.exec(exec_id).unwrap().formal_parameters()[0];
    assert_eq!(factory.formal_param(pid).unwrap().node, p);
    assert_eq!(factory.stats().params, 1);
}

/// A node whose reported arity disagrees with its parameter-node count must
/// fail construction, and the failure must leave no cache entry behind.
#[test]
fn arity_mismatch_is_a_structural_fault() {
    trace_init();
    let mut arena = NodeArena::new();
    let p = param(&mut arena, "only", "int");
    let name_idx = arena.add_identifier("broken", Span::new(0, 6));
    let ret = arena.add_identifier("void", Span::new(0, 4));
    // Misreported arity: one declared parameter, arity 3.
    let m = arena.add_method_with_arity(
        Span::new(0, 0),
        MethodData {
            modifiers: None,
            name: name_idx,
            type_parameters: None,
            parameters: NodeList::new(vec![p]),
            return_type: ret,
            arity: 3,
        },
    );
    let class = class_of(&mut arena, "Broken", vec![m]);

    let mut factory = AstSymFactory::new();
    let before = factory.stats();
    let err = factory.class_symbol(&arena, class).unwrap_err();
    assert_eq!(
        err,
        SymbolError::ArityMismatch {
            node_index: m.0,
            declared: 1,
            reported: 3,
        }
    );

    // No partial symbols were published: the same request fails the same way,
    // and no parameter or executable entered the caches.
    assert_eq!(factory.stats().execs, before.execs);
    assert_eq!(factory.stats().params, before.params);
    let err_again = factory.class_symbol(&arena, class).unwrap_err();
    assert!(matches!(err_again, SymbolError::ArityMismatch { .. }));
}

/// A fault in any member aborts the whole class. Members that validated
/// before the broken one are discarded too: no class symbol, no executable,
/// and no parameter may survive the failed attempt, and a retry must fail
/// the same way instead of observing leftovers from the first one.
#[test]
fn member_fault_discards_the_whole_class() {
    trace_init();
    let mut arena = NodeArena::new();
    let good_p = param(&mut arena, "ok", "int");
    let good = method(&mut arena, "fine", vec![good_p]);
    let bad_p = param(&mut arena, "only", "int");
    let name_idx = arena.add_identifier("broken", Span::new(0, 6));
    let ret = arena.add_identifier("void", Span::new(0, 4));
    let bad = arena.add_method_with_arity(
        Span::new(0, 0),
        MethodData {
            modifiers: None,
            name: name_idx,
            type_parameters: None,
            parameters: NodeList::new(vec![bad_p]),
            return_type: ret,
            arity: 3,
        },
    );
    let class = class_of(&mut arena, "Halts", vec![good, bad]);

    let mut factory = AstSymFactory::new();
    let err = factory.class_symbol(&arena, class).unwrap_err();
    assert_eq!(
        err,
        SymbolError::ArityMismatch {
            node_index: bad.0,
            declared: 1,
            reported: 3,
        }
    );
    assert_eq!(factory.stats(), SymbolStats::default());

    let err_again = factory.class_symbol(&arena, class).unwrap_err();
    assert_eq!(err_again, err);
    assert_eq!(factory.stats(), SymbolStats::default());
}

#[test]
fn non_declaration_nodes_are_rejected() {
    let mut arena = NodeArena::new();
    let ident = arena.add_identifier("justAName", Span::new(0, 9));
    let class = class_of(&mut arena, "Host", vec![]);

    let mut factory = AstSymFactory::new();
    let class_id = factory.class_symbol(&arena, class).unwrap();

    let err = factory.exec_symbol(&arena, ident, class_id).unwrap_err();
    assert!(matches!(err, SymbolError::NotAnExecutable { .. }));

    let err = factory.class_symbol(&arena, ident).unwrap_err();
    assert!(matches!(err, SymbolError::NotAClass { .. }));

    let err = factory
        .exec_symbol(&arena, NodeIndex::NONE, class_id)
        .unwrap_err();
    assert!(matches!(err, SymbolError::NotAnExecutable { .. }));
}

#[test]
fn parameter_without_binding_fails_construction() {
    let mut arena = NodeArena::new();
    let ty = arena.add_identifier("int", Span::new(0, 3));
    let bad = arena.add_parameter(
        Span::new(0, 0),
        ParamData {
            modifiers: None,
            name: NodeIndex::NONE,
            type_annotation: ty,
        },
    );
    let m = method(&mut arena, "noBinding", vec![bad]);
    let class = class_of(&mut arena, "Bad", vec![m]);

    let mut factory = AstSymFactory::new();
    let err = factory.class_symbol(&arena, class).unwrap_err();
    assert_eq!(err, SymbolError::MissingBinding { node_index: bad.0 });
    assert_eq!(factory.stats().params, 0);
}

/// A fresh factory is a fresh session: caches are not shared across
/// instances.
#[test]
fn sessions_do_not_share_caches() {
    let mut arena = NodeArena::new();
    let m = method(&mut arena, "again", vec![]);
    let class = class_of(&mut arena, "Session", vec![m]);

    let mut first = AstSymFactory::new();
    let mut second = AstSymFactory::new();
    first.class_symbol(&arena, class).unwrap();
    second.class_symbol(&arena, class).unwrap();

    assert_eq!(first.stats().execs, 1);
    assert_eq!(second.stats().execs, 1);
}

#[test]
fn stats_and_summary_report_session_counts() {
    let mut arena = NodeArena::new();
    let p = param(&mut arena, "n", "int");
    let m = method(&mut arena, "size", vec![p]);
    let class = class_of(&mut arena, "Counted", vec![m]);

    let mut factory = AstSymFactory::new();
    factory.class_symbol(&arena, class).unwrap();

    let stats = factory.stats();
    assert_eq!(stats.classes, 1);
    assert_eq!(stats.execs, 1);
    assert_eq!(stats.params, 1);

    let json = factory.stats_json();
    assert!(json.contains("\"classes\":1"));
    assert!(factory.debug_summary().contains("executables:     1"));
}

#[test]
fn errors_format_with_node_context() {
    let err = SymbolError::ArityMismatch {
        node_index: 7,
        declared: 2,
        reported: 5,
    };
    assert_eq!(
        err.to_string(),
        "node 7 declares 2 parameter(s) but reports arity 5"
    );

    let err = SymbolError::NotAnExecutable {
        node_index: 3,
        kind: jsym_ast::syntax_kind::IDENTIFIER,
    };
    assert!(err.to_string().contains("Identifier"));
}
