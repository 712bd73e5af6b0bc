//! NodeArena access methods.
//!
//! Accessors check the node kind before indexing into a payload pool and
//! return `None` on a kind mismatch, so a caller holding a wrong index gets
//! a recoverable miss instead of a bogus payload.

use crate::base::{NodeIndex, NodeList};
use crate::node::*;
use crate::node_flags;
use crate::syntax_kind;

impl NodeArena {
    /// Get a thin node by index.
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Get extended info for a node.
    #[inline]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get(index.0 as usize)
        }
    }

    /// Get identifier data for a node.
    #[inline]
    pub fn get_identifier(&self, node: &Node) -> Option<&IdentifierData> {
        if node.has_data() && node.kind == syntax_kind::IDENTIFIER {
            self.identifiers.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get type reference data for a node.
    #[inline]
    pub fn get_type_ref(&self, node: &Node) -> Option<&TypeRefData> {
        if node.has_data() && node.kind == syntax_kind::TYPE_REFERENCE {
            self.type_refs.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get array type data for a node.
    #[inline]
    pub fn get_array_type(&self, node: &Node) -> Option<&ArrayTypeData> {
        if node.has_data() && node.kind == syntax_kind::ARRAY_TYPE {
            self.array_types.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get class declaration data for a node.
    #[inline]
    pub fn get_class(&self, node: &Node) -> Option<&ClassData> {
        if node.has_data() && node.kind == syntax_kind::CLASS_DECLARATION {
            self.classes.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get method declaration data for a node.
    #[inline]
    pub fn get_method(&self, node: &Node) -> Option<&MethodData> {
        if node.has_data() && node.kind == syntax_kind::METHOD_DECLARATION {
            self.methods.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get constructor declaration data for a node.
    #[inline]
    pub fn get_ctor(&self, node: &Node) -> Option<&CtorData> {
        if node.has_data() && node.kind == syntax_kind::CONSTRUCTOR_DECLARATION {
            self.ctors.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get formal parameter data for a node.
    #[inline]
    pub fn get_parameter(&self, node: &Node) -> Option<&ParamData> {
        if node.has_data() && node.kind == syntax_kind::PARAMETER {
            self.parameters.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get type parameter data for a node.
    #[inline]
    pub fn get_type_parameter(&self, node: &Node) -> Option<&TypeParamData> {
        if node.has_data() && node.kind == syntax_kind::TYPE_PARAMETER {
            self.type_parameters.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get compilation unit data for a node.
    #[inline]
    pub fn get_compilation_unit(&self, node: &Node) -> Option<&CompilationUnitData> {
        if node.has_data() && node.kind == syntax_kind::COMPILATION_UNIT {
            self.compilation_units.get(node.data_index as usize)
        } else {
            None
        }
    }

    // ============================================================================
    // Derived queries
    // ============================================================================

    /// Resolve the text of the identifier node at `index`.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        let data = self.get_identifier(node)?;
        Some(self.resolve_identifier_text(data))
    }

    /// Parameter list of a method-or-constructor declaration node.
    pub fn exec_parameters(&self, node: &Node) -> Option<&NodeList> {
        match node.kind {
            syntax_kind::METHOD_DECLARATION => self.get_method(node).map(|m| &m.parameters),
            syntax_kind::CONSTRUCTOR_DECLARATION => self.get_ctor(node).map(|c| &c.parameters),
            _ => None,
        }
    }

    /// Type parameter list of a declaration node that can own type
    /// parameters (class, method, or constructor).
    pub fn decl_type_parameters(&self, node: &Node) -> Option<&NodeList> {
        match node.kind {
            syntax_kind::CLASS_DECLARATION => {
                self.get_class(node).and_then(|c| c.type_parameters.as_ref())
            }
            syntax_kind::METHOD_DECLARATION => {
                self.get_method(node).and_then(|m| m.type_parameters.as_ref())
            }
            syntax_kind::CONSTRUCTOR_DECLARATION => {
                self.get_ctor(node).and_then(|c| c.type_parameters.as_ref())
            }
            _ => None,
        }
    }

    /// Arity of a method-or-constructor declaration node as reported by the
    /// front end that built it.
    pub fn exec_arity(&self, node: &Node) -> Option<u16> {
        match node.kind {
            syntax_kind::METHOD_DECLARATION => self.get_method(node).map(|m| m.arity),
            syntax_kind::CONSTRUCTOR_DECLARATION => self.get_ctor(node).map(|c| c.arity),
            _ => None,
        }
    }

    /// Whether a method-or-constructor declaration node is varargs: its last
    /// declared parameter carries the `VARARGS` flag.
    pub fn exec_is_varargs(&self, node: &Node) -> bool {
        let Some(params) = self.exec_parameters(node) else {
            return false;
        };
        let last = params.last();
        self.get(last)
            .is_some_and(|p| p.flags & node_flags::VARARGS != 0)
    }
}
