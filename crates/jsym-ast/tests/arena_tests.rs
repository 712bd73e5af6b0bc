//! Tests for arena construction and typed access.

use jsym_ast::node::{ClassData, CtorData, MethodData, ParamData, TypeRefData};
use jsym_ast::{NodeArena, NodeIndex, NodeList, node_flags, syntax_kind};
use jsym_common::Span;

/// Build `int a` as a parameter node, returning its index.
fn param(arena: &mut NodeArena, name: &str, ty: &str, flags: u16) -> NodeIndex {
    let name_idx = arena.add_identifier(name, Span::new(0, name.len() as u32));
    let ty_name = arena.add_identifier(ty, Span::new(0, ty.len() as u32));
    let ty_idx = arena.add_type_ref(
        Span::new(0, ty.len() as u32),
        TypeRefData {
            type_name: ty_name,
            type_arguments: None,
        },
    );
    arena.add_parameter_with_flags(
        Span::new(0, 0),
        ParamData {
            modifiers: None,
            name: name_idx,
            type_annotation: ty_idx,
        },
        flags,
    )
}

#[test]
fn method_node_exposes_parameters_in_order() {
    let mut arena = NodeArena::new();
    let a = param(&mut arena, "a", "int", 0);
    let b = param(&mut arena, "b", "String", node_flags::VARARGS);
    let name = arena.add_identifier("foo", Span::new(0, 3));
    let ret = arena.add_identifier("void", Span::new(0, 4));
    let method = arena.add_method(
        Span::new(0, 0),
        MethodData {
            modifiers: None,
            name,
            type_parameters: None,
            parameters: NodeList::new(vec![a, b]),
            return_type: ret,
            arity: 0,
        },
    );

    let node = arena.get(method).unwrap();
    let params = arena.exec_parameters(node).unwrap();
    assert_eq!(params.nodes, vec![a, b]);
    assert_eq!(arena.exec_arity(node), Some(2));
    assert!(arena.exec_is_varargs(node));
}

#[test]
fn zero_parameter_ctor_is_not_varargs() {
    let mut arena = NodeArena::new();
    let ctor = arena.add_ctor(
        Span::new(0, 0),
        CtorData {
            modifiers: None,
            type_parameters: None,
            parameters: NodeList::empty(),
            arity: 0,
        },
    );
    let node = arena.get(ctor).unwrap();
    assert_eq!(arena.exec_arity(node), Some(0));
    assert!(!arena.exec_is_varargs(node));
}

#[test]
fn add_methods_set_parent_links() {
    let mut arena = NodeArena::new();
    let p = param(&mut arena, "x", "long", 0);
    let name = arena.add_identifier("bar", Span::new(0, 3));
    let ret = arena.add_identifier("void", Span::new(0, 4));
    let method = arena.add_method(
        Span::new(0, 0),
        MethodData {
            modifiers: None,
            name,
            type_parameters: None,
            parameters: NodeList::new(vec![p]),
            return_type: ret,
            arity: 0,
        },
    );
    let class_name = arena.add_identifier("Holder", Span::new(0, 6));
    let class = arena.add_class(
        Span::new(0, 0),
        ClassData {
            modifiers: None,
            name: class_name,
            type_parameters: None,
            members: NodeList::new(vec![method]),
        },
    );

    assert_eq!(arena.get_extended(p).unwrap().parent, method);
    assert_eq!(arena.get_extended(method).unwrap().parent, class);
    assert_eq!(arena.get_extended(name).unwrap().parent, method);
}

#[test]
fn accessors_reject_kind_mismatch() {
    let mut arena = NodeArena::new();
    let ident = arena.add_identifier("notAMethod", Span::new(0, 10));
    let node = *arena.get(ident).unwrap();
    assert!(arena.get_method(&node).is_none());
    assert!(arena.get_ctor(&node).is_none());
    assert!(arena.get_parameter(&node).is_none());
    assert_eq!(arena.exec_arity(&node), None);
    assert_eq!(node.kind, syntax_kind::IDENTIFIER);
}

#[test]
fn identifier_text_resolves_through_interner() {
    let mut arena = NodeArena::new();
    let a = arena.add_identifier("value", Span::new(0, 5));
    let b = arena.add_identifier("value", Span::new(10, 15));
    assert_eq!(arena.identifier_text(a), Some("value"));
    assert_eq!(arena.identifier_text(b), Some("value"));
    // Same atom for the same text
    let na = *arena.get(a).unwrap();
    let nb = *arena.get(b).unwrap();
    assert_eq!(
        arena.get_identifier(&na).unwrap().atom,
        arena.get_identifier(&nb).unwrap().atom
    );
    assert_eq!(arena.identifier_text(NodeIndex::NONE), None);
}

#[test]
fn nodes_carry_their_source_span() {
    let mut arena = NodeArena::new();
    let a = arena.add_identifier("width", Span::new(12, 17));
    let b = arena.add_identifier("height", Span::new(20, 26));
    let sa = arena.get(a).unwrap().span;
    let sb = arena.get(b).unwrap().span;
    assert_eq!(sa, Span::new(12, 17));
    assert_eq!(sb.len(), 6);
    assert_eq!(sa.merge(sb), Span::new(12, 26));
}
