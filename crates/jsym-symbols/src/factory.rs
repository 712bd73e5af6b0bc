//! The memoizing symbol factory and its structural-inconsistency faults.

use crate::symbols::{
    ClassId, ClassSymbol, ExecId, ExecKind, ExecSymbol, FormalParamSymbol, ParamId, SymbolArena,
    TypeParamId, TypeParamOwnerId, TypeParamSymbol,
};
use jsym_ast::{NodeArena, NodeIndex, syntax_kind};
use jsym_common::interner::Atom;
use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;
use std::fmt::Write;
use tracing::debug;

/// Structural inconsistency found while building a symbol.
///
/// Well-formed AST input is a precondition guaranteed by the parsing stage,
/// so every variant here is an internal invariant violation: construction
/// aborts, nothing is retried, and no partial symbol is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    /// The node is not a class declaration.
    NotAClass { node_index: u32, kind: u16 },
    /// The node is not a method-or-constructor declaration.
    NotAnExecutable { node_index: u32, kind: u16 },
    /// A node in a parameter list is not a parameter declaration.
    NotAParameter { node_index: u32, kind: u16 },
    /// A node in a type-parameter list is not a type parameter declaration.
    NotATypeParameter { node_index: u32, kind: u16 },
    /// The node's reported arity disagrees with its parameter-node count.
    ArityMismatch {
        node_index: u32,
        declared: usize,
        reported: usize,
    },
    /// A declaration is missing its binding identifier.
    MissingBinding { node_index: u32 },
}

impl fmt::Display for SymbolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SymbolError::NotAClass { node_index, kind } => write!(
                f,
                "node {node_index} is a {}, not a class declaration",
                syntax_kind::name(kind)
            ),
            SymbolError::NotAnExecutable { node_index, kind } => write!(
                f,
                "node {node_index} is a {}, not a method or constructor declaration",
                syntax_kind::name(kind)
            ),
            SymbolError::NotAParameter { node_index, kind } => write!(
                f,
                "node {node_index} is a {}, not a formal parameter",
                syntax_kind::name(kind)
            ),
            SymbolError::NotATypeParameter { node_index, kind } => write!(
                f,
                "node {node_index} is a {}, not a type parameter",
                syntax_kind::name(kind)
            ),
            SymbolError::ArityMismatch {
                node_index,
                declared,
                reported,
            } => write!(
                f,
                "node {node_index} declares {declared} parameter(s) but reports arity {reported}"
            ),
            SymbolError::MissingBinding { node_index } => {
                write!(f, "node {node_index} has no binding identifier")
            }
        }
    }
}

impl std::error::Error for SymbolError {}

/// Counts of symbols constructed so far in this session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SymbolStats {
    pub classes: usize,
    pub execs: usize,
    pub params: usize,
    pub type_params: usize,
}

/// Memoizing authority for all AST-backed symbols of one analysis session.
///
/// Keyed by node index: the first request for a declaration node constructs
/// its symbol, every later request returns the identical id. All nested
/// construction (parameters while building their executable, type parameters
/// while building their owner) routes through the same factory instance, so
/// no two call paths can produce two symbols for one declaration.
///
/// Session-scoped, not a singleton: re-analysis of edited source produces a
/// structurally different arena and must use a fresh factory. Construction
/// takes `&mut self`, which confines a factory to one thread at a time; reads
/// after construction are `&self`.
#[derive(Debug, Default)]
pub struct AstSymFactory {
    symbols: SymbolArena,
    class_cache: FxHashMap<u32, ClassId>,
    exec_cache: FxHashMap<u32, ExecId>,
    param_cache: FxHashMap<u32, ParamId>,
    type_param_cache: FxHashMap<u32, TypeParamId>,
}

impl AstSymFactory {
    pub fn new() -> AstSymFactory {
        AstSymFactory::default()
    }

    /// The symbols constructed so far.
    pub fn symbols(&self) -> &SymbolArena {
        &self.symbols
    }

    // ========================================================================
    // Construction entry points
    // ========================================================================

    /// Get or build the symbol for a class declaration node.
    ///
    /// On first request this eagerly builds one executable symbol per
    /// method-or-constructor member, in declaration order, supplying the new
    /// class symbol as their owner.
    #[tracing::instrument(level = "debug", skip(self, arena), fields(node = idx.0))]
    pub fn class_symbol(
        &mut self,
        arena: &NodeArena,
        idx: NodeIndex,
    ) -> Result<ClassId, SymbolError> {
        if let Some(&id) = self.class_cache.get(&idx.0) {
            return Ok(id);
        }

        let node = arena.get(idx).ok_or(SymbolError::NotAClass {
            node_index: idx.0,
            kind: syntax_kind::UNKNOWN,
        })?;
        let class = arena.get_class(node).ok_or(SymbolError::NotAClass {
            node_index: idx.0,
            kind: node.kind,
        })?;
        let name = identifier_atom(arena, class.name)
            .ok_or(SymbolError::MissingBinding { node_index: idx.0 })?;
        let member_nodes: Vec<NodeIndex> = class
            .members
            .iter()
            .copied()
            .filter(|&m| arena.get(m).is_some_and(|n| syntax_kind::is_executable(n.kind)))
            .collect();
        let tp_nodes = arena.decl_type_parameters(node).cloned();
        let checked_tps = check_type_params(arena, tp_nodes.as_ref())?;

        // Validate every member before allocating anything: a structural fault
        // in any member must leave the whole class unbuilt, with no cache
        // entry and no orphan symbols. Members already built by an earlier
        // direct request are taken from the cache as-is.
        let mut checked_members = Vec::with_capacity(member_nodes.len());
        for &member in &member_nodes {
            let checked = match self.exec_cache.get(&member.0) {
                Some(_) => None,
                None => Some(check_exec(arena, member)?),
            };
            checked_members.push((member, checked));
        }

        // Everything validated; allocate.
        let class_id = self.symbols.next_class_id();
        let type_params = self.alloc_type_params(TypeParamOwnerId::Class(class_id), &checked_tps);
        let allocated = self.symbols.alloc_class(ClassSymbol {
            node: idx,
            name,
            type_params,
            members: Vec::new(),
        });
        debug_assert_eq!(allocated, class_id);

        let mut members = Vec::with_capacity(checked_members.len());
        for (member, checked) in checked_members {
            let id = match checked {
                Some(checked) => self.build_exec(member, class_id, checked),
                None => self.exec_symbol(arena, member, class_id)?,
            };
            members.push(id);
        }
        let member_count = members.len();
        if let Some(sym) = self.symbols.get_class_mut(class_id) {
            sym.members = members;
        }

        self.class_cache.insert(idx.0, class_id);
        debug!(class = ?class_id, members = member_count, "Class symbol built");
        Ok(class_id)
    }

    /// Get or build the symbol for a method-or-constructor declaration node.
    ///
    /// `owner` is the resolved enclosing class; it is stored once and never
    /// reassigned. The formal-parameter sequence is derived eagerly, in
    /// declaration order, with each parameter routed through this factory.
    #[tracing::instrument(level = "debug", skip(self, arena), fields(node = idx.0))]
    pub fn exec_symbol(
        &mut self,
        arena: &NodeArena,
        idx: NodeIndex,
        owner: ClassId,
    ) -> Result<ExecId, SymbolError> {
        if let Some(&id) = self.exec_cache.get(&idx.0) {
            debug_assert!(
                self.symbols.get_exec(id).is_none_or(|s| s.enclosing_class() == owner),
                "one declaration node requested with two different owners"
            );
            return Ok(id);
        }

        // Validate the whole declaration before allocating anything, so a
        // fault part-way through leaves no symbol and no cache entry behind.
        let checked = check_exec(arena, idx)?;
        Ok(self.build_exec(idx, owner, checked))
    }

    /// Allocate the symbol for one fully validated executable declaration.
    ///
    /// Infallible by construction: every structural check has already run in
    /// [`check_exec`], so nothing here can abort part-way.
    fn build_exec(&mut self, idx: NodeIndex, owner: ClassId, checked: CheckedExec) -> ExecId {
        if let Some(&id) = self.exec_cache.get(&idx.0) {
            return id;
        }
        let exec_id = self.symbols.next_exec_id();
        let mut params: SmallVec<[ParamId; 4]> = SmallVec::with_capacity(checked.params.len());
        for param in checked.params {
            params.push(self.alloc_formal_param(exec_id, param));
        }
        let type_params =
            self.alloc_type_params(TypeParamOwnerId::Exec(exec_id), &checked.type_params);

        let allocated = self.symbols.alloc_exec(ExecSymbol {
            node: idx,
            kind: checked.kind,
            owner,
            params,
            type_params,
        });
        debug_assert_eq!(allocated, exec_id);

        self.exec_cache.insert(idx.0, exec_id);
        debug!(exec = ?exec_id, arity = checked.arity, "Executable symbol built");
        exec_id
    }

    // ========================================================================
    // Nested construction (factory-internal)
    // ========================================================================

    /// Allocate the symbol for one pre-validated formal parameter.
    /// Only reachable from executable construction.
    fn alloc_formal_param(&mut self, owner: ExecId, checked: CheckedParam) -> ParamId {
        if let Some(&id) = self.param_cache.get(&checked.node.0) {
            return id;
        }
        let id = self.symbols.alloc_param(FormalParamSymbol {
            node: checked.node,
            name: checked.name,
            type_node: checked.type_node,
            owner,
        });
        self.param_cache.insert(checked.node.0, id);
        id
    }

    /// Allocate symbols for a pre-validated type-parameter list.
    ///
    /// This is the one resolve-and-cache body behind the `TypeParamOwner`
    /// capability: class and executable construction both call it.
    fn alloc_type_params(
        &mut self,
        owner: TypeParamOwnerId,
        checked: &[CheckedTypeParam],
    ) -> SmallVec<[TypeParamId; 2]> {
        let mut ids = SmallVec::with_capacity(checked.len());
        for tp in checked {
            if let Some(&id) = self.type_param_cache.get(&tp.node.0) {
                ids.push(id);
                continue;
            }
            let id = self.symbols.alloc_type_param(TypeParamSymbol {
                node: tp.node,
                name: tp.name,
                owner,
            });
            self.type_param_cache.insert(tp.node.0, id);
            ids.push(id);
        }
        ids
    }

    // ========================================================================
    // Read accessors
    // ========================================================================

    #[inline]
    pub fn class(&self, id: ClassId) -> Option<&ClassSymbol> {
        self.symbols.get_class(id)
    }

    #[inline]
    pub fn exec(&self, id: ExecId) -> Option<&ExecSymbol> {
        self.symbols.get_exec(id)
    }

    #[inline]
    pub fn formal_param(&self, id: ParamId) -> Option<&FormalParamSymbol> {
        self.symbols.get_param(id)
    }

    #[inline]
    pub fn type_param(&self, id: TypeParamId) -> Option<&TypeParamSymbol> {
        self.symbols.get_type_param(id)
    }

    /// Counts of symbols constructed so far.
    pub fn stats(&self) -> SymbolStats {
        SymbolStats {
            classes: self.symbols.class_count(),
            execs: self.symbols.exec_count(),
            params: self.symbols.param_count(),
            type_params: self.symbols.type_param_count(),
        }
    }

    /// Stats as a JSON object, for tooling output.
    pub fn stats_json(&self) -> String {
        serde_json::to_string(&self.stats()).unwrap_or_default()
    }

    /// Human-readable summary of the session's symbols.
    pub fn debug_summary(&self) -> String {
        let stats = self.stats();
        let mut out = String::new();
        let _ = writeln!(out, "=== Symbol Factory Summary ===");
        let _ = writeln!(out, "classes:         {}", stats.classes);
        let _ = writeln!(out, "executables:     {}", stats.execs);
        let _ = writeln!(out, "formal params:   {}", stats.params);
        let _ = writeln!(out, "type params:     {}", stats.type_params);
        out
    }
}

struct CheckedExec {
    kind: ExecKind,
    arity: usize,
    params: Vec<CheckedParam>,
    type_params: Vec<CheckedTypeParam>,
}

struct CheckedParam {
    node: NodeIndex,
    name: Atom,
    type_node: NodeIndex,
}

struct CheckedTypeParam {
    node: NodeIndex,
    name: Atom,
}

fn identifier_atom(arena: &NodeArena, idx: NodeIndex) -> Option<Atom> {
    let node = arena.get(idx)?;
    let data = arena.get_identifier(node)?;
    if data.atom.is_none() { None } else { Some(data.atom) }
}

/// Validate an executable declaration's whole shape without allocating.
///
/// Kind, name binding, parameter list, reported arity, and type parameters
/// are all checked here; construction from the returned data cannot fail.
fn check_exec(arena: &NodeArena, idx: NodeIndex) -> Result<CheckedExec, SymbolError> {
    let node = arena.get(idx).ok_or(SymbolError::NotAnExecutable {
        node_index: idx.0,
        kind: syntax_kind::UNKNOWN,
    })?;
    let kind = match node.kind {
        syntax_kind::METHOD_DECLARATION => {
            let method = arena.get_method(node).ok_or(SymbolError::NotAnExecutable {
                node_index: idx.0,
                kind: node.kind,
            })?;
            let name = identifier_atom(arena, method.name)
                .ok_or(SymbolError::MissingBinding { node_index: idx.0 })?;
            ExecKind::Method { name }
        }
        syntax_kind::CONSTRUCTOR_DECLARATION => {
            arena.get_ctor(node).ok_or(SymbolError::NotAnExecutable {
                node_index: idx.0,
                kind: node.kind,
            })?;
            ExecKind::Constructor
        }
        kind => {
            return Err(SymbolError::NotAnExecutable {
                node_index: idx.0,
                kind,
            });
        }
    };

    let param_nodes = arena
        .exec_parameters(node)
        .cloned()
        .ok_or(SymbolError::NotAnExecutable {
            node_index: idx.0,
            kind: node.kind,
        })?;
    let reported = arena.exec_arity(node).map(usize::from).unwrap_or(0);
    if reported != param_nodes.len() {
        return Err(SymbolError::ArityMismatch {
            node_index: idx.0,
            declared: param_nodes.len(),
            reported,
        });
    }

    let mut params = Vec::with_capacity(param_nodes.len());
    for &p_idx in &param_nodes.nodes {
        params.push(check_formal_param(arena, p_idx)?);
    }
    let tp_nodes = arena.decl_type_parameters(node).cloned();
    let type_params = check_type_params(arena, tp_nodes.as_ref())?;

    Ok(CheckedExec {
        kind,
        arity: reported,
        params,
        type_params,
    })
}

/// Validate one parameter node's shape without allocating.
fn check_formal_param(arena: &NodeArena, idx: NodeIndex) -> Result<CheckedParam, SymbolError> {
    let node = arena.get(idx).ok_or(SymbolError::NotAParameter {
        node_index: idx.0,
        kind: syntax_kind::UNKNOWN,
    })?;
    let param = arena.get_parameter(node).ok_or(SymbolError::NotAParameter {
        node_index: idx.0,
        kind: node.kind,
    })?;
    let name =
        identifier_atom(arena, param.name).ok_or(SymbolError::MissingBinding { node_index: idx.0 })?;
    Ok(CheckedParam {
        node: idx,
        name,
        type_node: param.type_annotation,
    })
}

/// Validate a type-parameter list's shape without allocating.
fn check_type_params(
    arena: &NodeArena,
    list: Option<&jsym_ast::NodeList>,
) -> Result<Vec<CheckedTypeParam>, SymbolError> {
    let Some(list) = list else {
        return Ok(Vec::new());
    };
    let mut checked = Vec::with_capacity(list.len());
    for &tp_idx in &list.nodes {
        let node = arena.get(tp_idx).ok_or(SymbolError::NotATypeParameter {
            node_index: tp_idx.0,
            kind: syntax_kind::UNKNOWN,
        })?;
        let tp = arena
            .get_type_parameter(node)
            .ok_or(SymbolError::NotATypeParameter {
                node_index: tp_idx.0,
                kind: node.kind,
            })?;
        let name = identifier_atom(arena, tp.name)
            .ok_or(SymbolError::MissingBinding { node_index: tp_idx.0 })?;
        checked.push(CheckedTypeParam { node: tp_idx, name });
    }
    Ok(checked)
}
