//! AST-backed symbol construction for Java method and constructor
//! declarations.
//!
//! Symbols are the semantic-analysis view of declared entities. Each one
//! wraps exactly one declaration node in a `jsym_ast::NodeArena` and is built
//! by the session-scoped [`AstSymFactory`], which memoizes by node index so
//! that every call path observes one symbol per syntactic declaration
//! (referential stability). Symbols are immutable after construction;
//! ownership flows class → executable → parameter, and back-references are
//! arena handles, so the graph has no cycles.

mod factory;
mod symbols;

pub use factory::{AstSymFactory, SymbolError, SymbolStats};
pub use symbols::{
    ClassId, ClassSymbol, ExecId, ExecKind, ExecSymbol, FormalParamSymbol, ParamId, SymbolArena,
    TypeParamId, TypeParamOwner, TypeParamOwnerId, TypeParamSymbol,
};
