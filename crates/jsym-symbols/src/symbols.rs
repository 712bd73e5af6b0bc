//! Symbol storage and the symbol kinds themselves.
//!
//! `SymbolArena` owns every symbol built during one analysis session; typed
//! copyable ids are the identity currency. An id resolves to the same slot
//! for the whole session, so id equality is object identity.

use jsym_ast::{NodeArena, NodeIndex};
use jsym_common::interner::Atom;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Id of a class symbol in its `SymbolArena`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassId(pub u32);

/// Id of an executable (method or constructor) symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecId(pub u32);

/// Id of a formal parameter symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamId(pub u32);

/// Id of a type parameter symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeParamId(pub u32);

/// What kind of executable a symbol represents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecKind {
    Method { name: Atom },
    Constructor,
}

/// The symbol kinds that can own type parameters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeParamOwnerId {
    Class(ClassId),
    Exec(ExecId),
}

/// Shared capability of declarations that own type parameters.
///
/// Class and executable symbols resolve and cache their declared type
/// parameters identically; the resolution logic lives once in the factory
/// and both construction paths call it, so the trait only exposes the
/// cached result.
pub trait TypeParamOwner {
    /// Declared type parameters, in declaration order.
    fn type_parameters(&self) -> &[TypeParamId];

    fn is_generic(&self) -> bool {
        !self.type_parameters().is_empty()
    }
}

/// Symbol for one class declaration.
///
/// Minimal owner surface: it exists so executables have a non-null enclosing
/// class and so eager member construction has a driver.
#[derive(Debug)]
pub struct ClassSymbol {
    /// Backing class declaration node.
    pub node: NodeIndex,
    pub name: Atom,
    pub(crate) type_params: SmallVec<[TypeParamId; 2]>,
    /// Executable members in declaration order.
    pub(crate) members: Vec<ExecId>,
}

impl ClassSymbol {
    /// Executable members (methods and constructors) in declaration order.
    pub fn declared_executables(&self) -> &[ExecId] {
        &self.members
    }
}

impl TypeParamOwner for ClassSymbol {
    fn type_parameters(&self) -> &[TypeParamId] {
        &self.type_params
    }
}

/// Symbol for one method or constructor declaration.
///
/// Immutable after construction. The owner reference is set once; the
/// formal-parameter sequence is derived eagerly at construction time in
/// declaration order. Arity and varargs-ness are not stored: they delegate
/// live to the backing node on every query, so they can never drift from
/// the syntax.
#[derive(Debug)]
pub struct ExecSymbol {
    /// Backing method-or-constructor declaration node.
    pub node: NodeIndex,
    pub kind: ExecKind,
    pub(crate) owner: ClassId,
    pub(crate) params: SmallVec<[ParamId; 4]>,
    pub(crate) type_params: SmallVec<[TypeParamId; 2]>,
}

impl ExecSymbol {
    /// The class this executable is declared in. Never absent: construction
    /// fails without an owner.
    #[inline]
    pub fn enclosing_class(&self) -> ClassId {
        self.owner
    }

    /// Formal parameters in declaration order (immutable view).
    #[inline]
    pub fn formal_parameters(&self) -> &[ParamId] {
        &self.params
    }

    /// Arity, delegated live to the backing node.
    ///
    /// Always equals `formal_parameters().len()`: construction rejects nodes
    /// where the two disagree, and the arena is append-only for the session.
    pub fn arity(&self, arena: &NodeArena) -> usize {
        let reported = arena
            .get(self.node)
            .and_then(|n| arena.exec_arity(n))
            .map(usize::from)
            .unwrap_or(self.params.len());
        debug_assert_eq!(
            reported,
            self.params.len(),
            "arity of node {:?} drifted from its formal-parameter sequence",
            self.node
        );
        reported
    }

    /// Whether the executable is varargs, delegated live to the backing node.
    pub fn is_varargs(&self, arena: &NodeArena) -> bool {
        arena
            .get(self.node)
            .is_some_and(|n| arena.exec_is_varargs(n))
    }
}

impl TypeParamOwner for ExecSymbol {
    fn type_parameters(&self) -> &[TypeParamId] {
        &self.type_params
    }
}

/// Symbol for one declared formal parameter.
///
/// Only ever built as a side effect of constructing its owning executable;
/// it has no lifecycle of its own.
#[derive(Debug)]
pub struct FormalParamSymbol {
    /// Backing parameter declaration node.
    pub node: NodeIndex,
    /// Binding identifier, for downstream name lookup.
    pub name: Atom,
    /// Declared type annotation node, for downstream type lookup.
    pub type_node: NodeIndex,
    pub(crate) owner: ExecId,
}

impl FormalParamSymbol {
    /// The executable this parameter is declared on.
    #[inline]
    pub fn declaring_exec(&self) -> ExecId {
        self.owner
    }
}

/// Symbol for one declared type parameter.
#[derive(Debug)]
pub struct TypeParamSymbol {
    pub node: NodeIndex,
    pub name: Atom,
    pub owner: TypeParamOwnerId,
}

/// Arena for symbol storage.
///
/// One vector per symbol kind; `alloc_*` appends and returns the id, `get_*`
/// resolves. Slots are never freed or reused within a session.
#[derive(Debug, Default)]
pub struct SymbolArena {
    classes: Vec<ClassSymbol>,
    execs: Vec<ExecSymbol>,
    params: Vec<FormalParamSymbol>,
    type_params: Vec<TypeParamSymbol>,
}

impl SymbolArena {
    pub fn new() -> SymbolArena {
        SymbolArena::default()
    }

    /// Id the next `alloc_exec` call will return. Used to wire back-references
    /// of children allocated before their owner.
    pub(crate) fn next_exec_id(&self) -> ExecId {
        ExecId(self.execs.len() as u32)
    }

    pub(crate) fn next_class_id(&self) -> ClassId {
        ClassId(self.classes.len() as u32)
    }

    pub(crate) fn alloc_class(&mut self, sym: ClassSymbol) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        self.classes.push(sym);
        id
    }

    pub(crate) fn alloc_exec(&mut self, sym: ExecSymbol) -> ExecId {
        let id = ExecId(self.execs.len() as u32);
        self.execs.push(sym);
        id
    }

    pub(crate) fn alloc_param(&mut self, sym: FormalParamSymbol) -> ParamId {
        let id = ParamId(self.params.len() as u32);
        self.params.push(sym);
        id
    }

    pub(crate) fn alloc_type_param(&mut self, sym: TypeParamSymbol) -> TypeParamId {
        let id = TypeParamId(self.type_params.len() as u32);
        self.type_params.push(sym);
        id
    }

    #[inline]
    pub fn get_class(&self, id: ClassId) -> Option<&ClassSymbol> {
        self.classes.get(id.0 as usize)
    }

    // Only used to install the member list at the end of class construction;
    // symbols are immutable once published.
    #[inline]
    pub(crate) fn get_class_mut(&mut self, id: ClassId) -> Option<&mut ClassSymbol> {
        self.classes.get_mut(id.0 as usize)
    }

    #[inline]
    pub fn get_exec(&self, id: ExecId) -> Option<&ExecSymbol> {
        self.execs.get(id.0 as usize)
    }

    #[inline]
    pub fn get_param(&self, id: ParamId) -> Option<&FormalParamSymbol> {
        self.params.get(id.0 as usize)
    }

    #[inline]
    pub fn get_type_param(&self, id: TypeParamId) -> Option<&TypeParamSymbol> {
        self.type_params.get(id.0 as usize)
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn exec_count(&self) -> usize {
        self.execs.len()
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub fn type_param_count(&self) -> usize {
        self.type_params.len()
    }
}
