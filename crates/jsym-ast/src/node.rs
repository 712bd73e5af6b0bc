//! Thin node record, per-kind payload structs, and the `NodeArena`.

use crate::base::{NodeIndex, NodeList};
use jsym_common::interner::{Atom, Interner};
use jsym_common::span::Span;
use serde::{Deserialize, Serialize};

/// Thin node record stored contiguously in the arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Syntax kind constant (see `syntax_kind`).
    pub kind: u16,
    /// Packed node flags (see `node_flags`).
    pub flags: u16,
    /// Source range covered by this node.
    pub span: Span,
    /// Index into the kind-specific payload pool (`u32::MAX` = no payload).
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    #[inline]
    pub fn new(kind: u16, span: Span) -> Node {
        Node {
            kind,
            flags: 0,
            span,
            data_index: Self::NO_DATA,
        }
    }

    #[inline]
    pub fn with_data(kind: u16, span: Span, data_index: u32) -> Node {
        Node {
            kind,
            flags: 0,
            span,
            data_index,
        }
    }

    #[inline]
    pub fn with_data_and_flags(kind: u16, span: Span, data_index: u32, flags: u16) -> Node {
        Node {
            kind,
            flags,
            span,
            data_index,
        }
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }
}

/// Cold per-node info kept out of the hot `Node` record.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct ExtendedNodeInfo {
    /// Parent node, set by the `add_*` constructors (bottom-up build).
    pub parent: NodeIndex,
}

impl Default for ExtendedNodeInfo {
    fn default() -> Self {
        ExtendedNodeInfo {
            parent: NodeIndex::NONE,
        }
    }
}

// ============================================================================
// Per-kind payloads
// ============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IdentifierData {
    /// Interned name (fast path).
    pub atom: Atom,
    /// Raw text fallback for names not routed through the interner.
    pub escaped_text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeRefData {
    /// Identifier naming the type.
    pub type_name: NodeIndex,
    /// Generic arguments, if any.
    pub type_arguments: Option<NodeList>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArrayTypeData {
    pub element_type: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub type_parameters: Option<NodeList>,
    /// Member declarations in source order.
    pub members: NodeList,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MethodData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub type_parameters: Option<NodeList>,
    /// Formal parameter nodes in declaration order.
    pub parameters: NodeList,
    pub return_type: NodeIndex,
    /// Arity as reported by the producing front end.
    /// Must agree with `parameters.len()`; the symbol layer enforces this.
    pub arity: u16,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CtorData {
    pub modifiers: Option<NodeList>,
    pub type_parameters: Option<NodeList>,
    /// Formal parameter nodes in declaration order.
    pub parameters: NodeList,
    /// Arity as reported by the producing front end.
    pub arity: u16,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParamData {
    pub modifiers: Option<NodeList>,
    /// The variable-id binding identifier.
    pub name: NodeIndex,
    /// Declared type annotation.
    pub type_annotation: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeParamData {
    pub name: NodeIndex,
    /// `extends` bound, or `NodeIndex::NONE`.
    pub upper_bound: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompilationUnitData {
    /// Top-level type declarations in source order.
    pub types: NodeList,
}

// ============================================================================
// Arena
// ============================================================================

/// Owning store for one compilation unit's AST.
///
/// One `Vec<Node>` for the thin records plus one side pool per payload kind.
/// Append-only within an analysis session; node and payload slots are never
/// reused or mutated after creation, which is what lets the symbol layer
/// delegate facts like arity to the node without snapshotting.
#[derive(Debug, Default)]
pub struct NodeArena {
    pub(crate) nodes: Vec<Node>,
    pub(crate) extended_info: Vec<ExtendedNodeInfo>,

    pub(crate) identifiers: Vec<IdentifierData>,
    pub(crate) type_refs: Vec<TypeRefData>,
    pub(crate) array_types: Vec<ArrayTypeData>,
    pub(crate) classes: Vec<ClassData>,
    pub(crate) methods: Vec<MethodData>,
    pub(crate) ctors: Vec<CtorData>,
    pub(crate) parameters: Vec<ParamData>,
    pub(crate) type_parameters: Vec<TypeParamData>,
    pub(crate) compilation_units: Vec<CompilationUnitData>,

    pub(crate) interner: Interner,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Get a reference to the interner.
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Resolve an identifier's text using its atom (fast) or the escaped
    /// text fallback.
    #[inline]
    pub fn resolve_identifier_text<'a>(&'a self, data: &'a IdentifierData) -> &'a str {
        if data.atom != Atom::NONE {
            self.interner.resolve(data.atom)
        } else {
            &data.escaped_text
        }
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
