//! Arena-based Java AST for the jsym symbol toolkit.
//!
//! Nodes are thin `(kind, flags, span, data_index)` records in one `Vec`;
//! per-kind payloads live in side pools indexed by `data_index`
//! (struct-of-arrays). `NodeIndex` is the only handle that crosses crate
//! boundaries. Construction is bottom-up: children exist before their parent,
//! and the `add_*` constructors set parent links as they go, so the tree is
//! immutable once built.

mod base;
pub mod node;
pub mod node_flags;
pub mod syntax_kind;

mod node_access;
mod node_arena;

pub use base::{NodeIndex, NodeList};
pub use node::{Node, NodeArena};
