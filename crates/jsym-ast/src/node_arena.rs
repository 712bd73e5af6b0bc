//! NodeArena creation methods (add_* methods).
//!
//! All node creation goes through these methods so parent links are
//! maintained in one place. Children must already exist (bottom-up build).

use crate::base::{NodeIndex, NodeList};
use crate::node::*;
use crate::syntax_kind;
use jsym_common::span::Span;

impl NodeArena {
    // ============================================================================
    // Parent Mapping Helpers
    // ============================================================================

    /// Set the parent for a single child node.
    #[inline]
    fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if !child.is_none() {
            // Child index is guaranteed valid and < parent index because we
            // build bottom-up (children are created before parents).
            if let Some(info) = self.extended_info.get_mut(child.0 as usize) {
                info.parent = parent;
            }
        }
    }

    /// Set the parent for a list of children.
    #[inline]
    fn set_parent_list(&mut self, list: &NodeList, parent: NodeIndex) {
        for &child in &list.nodes {
            self.set_parent(child, parent);
        }
    }

    /// Set the parent for an optional list of children.
    #[inline]
    fn set_parent_opt_list(&mut self, list: &Option<NodeList>, parent: NodeIndex) {
        if let Some(l) = list {
            self.set_parent_list(l, parent);
        }
    }

    #[inline]
    fn push_node(&mut self, node: Node) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        self.extended_info.push(ExtendedNodeInfo::default());
        NodeIndex(index)
    }

    // ============================================================================
    // Node Creation Methods
    // ============================================================================

    /// Add a token node (no payload). Used for modifier tokens.
    pub fn add_token(&mut self, kind: u16, span: Span) -> NodeIndex {
        self.push_node(Node::new(kind, span))
    }

    /// Add an identifier node, interning its text.
    pub fn add_identifier(&mut self, text: &str, span: Span) -> NodeIndex {
        let atom = self.interner.intern(text);
        let data_index = self.identifiers.len() as u32;
        self.identifiers.push(IdentifierData {
            atom,
            escaped_text: text.to_string(),
        });
        self.push_node(Node::with_data(syntax_kind::IDENTIFIER, span, data_index))
    }

    /// Add a type reference node.
    pub fn add_type_ref(&mut self, span: Span, data: TypeRefData) -> NodeIndex {
        let type_name = data.type_name;
        let type_arguments = data.type_arguments.clone();

        let data_index = self.type_refs.len() as u32;
        self.type_refs.push(data);
        let parent = self.push_node(Node::with_data(
            syntax_kind::TYPE_REFERENCE,
            span,
            data_index,
        ));

        self.set_parent(type_name, parent);
        self.set_parent_opt_list(&type_arguments, parent);
        parent
    }

    /// Add an array type node.
    pub fn add_array_type(&mut self, span: Span, data: ArrayTypeData) -> NodeIndex {
        let element_type = data.element_type;

        let data_index = self.array_types.len() as u32;
        self.array_types.push(data);
        let parent = self.push_node(Node::with_data(syntax_kind::ARRAY_TYPE, span, data_index));

        self.set_parent(element_type, parent);
        parent
    }

    /// Add a class declaration node.
    pub fn add_class(&mut self, span: Span, data: ClassData) -> NodeIndex {
        let modifiers = data.modifiers.clone();
        let name = data.name;
        let type_parameters = data.type_parameters.clone();
        let members = data.members.clone();

        let data_index = self.classes.len() as u32;
        self.classes.push(data);
        let parent = self.push_node(Node::with_data(
            syntax_kind::CLASS_DECLARATION,
            span,
            data_index,
        ));

        self.set_parent_opt_list(&modifiers, parent);
        self.set_parent(name, parent);
        self.set_parent_opt_list(&type_parameters, parent);
        self.set_parent_list(&members, parent);
        parent
    }

    /// Add a method declaration node.
    /// The reported arity is taken from the parameter list.
    pub fn add_method(&mut self, span: Span, mut data: MethodData) -> NodeIndex {
        data.arity = data.parameters.len() as u16;
        self.add_method_with_arity(span, data)
    }

    /// Add a method declaration node with the reported arity left as given.
    /// Front ends are expected to report an arity consistent with the
    /// parameter list; the symbol layer rejects nodes where it is not.
    pub fn add_method_with_arity(&mut self, span: Span, data: MethodData) -> NodeIndex {
        let modifiers = data.modifiers.clone();
        let name = data.name;
        let type_parameters = data.type_parameters.clone();
        let parameters = data.parameters.clone();
        let return_type = data.return_type;

        let data_index = self.methods.len() as u32;
        self.methods.push(data);
        let parent = self.push_node(Node::with_data(
            syntax_kind::METHOD_DECLARATION,
            span,
            data_index,
        ));

        self.set_parent_opt_list(&modifiers, parent);
        self.set_parent(name, parent);
        self.set_parent_opt_list(&type_parameters, parent);
        self.set_parent_list(&parameters, parent);
        self.set_parent(return_type, parent);
        parent
    }

    /// Add a constructor declaration node.
    /// The reported arity is taken from the parameter list.
    pub fn add_ctor(&mut self, span: Span, mut data: CtorData) -> NodeIndex {
        data.arity = data.parameters.len() as u16;
        self.add_ctor_with_arity(span, data)
    }

    /// Add a constructor declaration node with the reported arity left as given.
    pub fn add_ctor_with_arity(&mut self, span: Span, data: CtorData) -> NodeIndex {
        let modifiers = data.modifiers.clone();
        let type_parameters = data.type_parameters.clone();
        let parameters = data.parameters.clone();

        let data_index = self.ctors.len() as u32;
        self.ctors.push(data);
        let parent = self.push_node(Node::with_data(
            syntax_kind::CONSTRUCTOR_DECLARATION,
            span,
            data_index,
        ));

        self.set_parent_opt_list(&modifiers, parent);
        self.set_parent_opt_list(&type_parameters, parent);
        self.set_parent_list(&parameters, parent);
        parent
    }

    /// Add a formal parameter node.
    pub fn add_parameter(&mut self, span: Span, data: ParamData) -> NodeIndex {
        self.add_parameter_with_flags(span, data, 0)
    }

    /// Add a formal parameter node with flags (`node_flags::VARARGS` for a
    /// trailing varargs parameter).
    pub fn add_parameter_with_flags(
        &mut self,
        span: Span,
        data: ParamData,
        flags: u16,
    ) -> NodeIndex {
        let modifiers = data.modifiers.clone();
        let name = data.name;
        let type_annotation = data.type_annotation;

        let data_index = self.parameters.len() as u32;
        self.parameters.push(data);
        let parent = self.push_node(Node::with_data_and_flags(
            syntax_kind::PARAMETER,
            span,
            data_index,
            flags,
        ));

        self.set_parent_opt_list(&modifiers, parent);
        self.set_parent(name, parent);
        self.set_parent(type_annotation, parent);
        parent
    }

    /// Add a type parameter declaration node.
    pub fn add_type_parameter(&mut self, span: Span, data: TypeParamData) -> NodeIndex {
        let name = data.name;
        let upper_bound = data.upper_bound;

        let data_index = self.type_parameters.len() as u32;
        self.type_parameters.push(data);
        let parent = self.push_node(Node::with_data(
            syntax_kind::TYPE_PARAMETER,
            span,
            data_index,
        ));

        self.set_parent(name, parent);
        self.set_parent(upper_bound, parent);
        parent
    }

    /// Add a compilation unit node.
    pub fn add_compilation_unit(&mut self, span: Span, data: CompilationUnitData) -> NodeIndex {
        let types = data.types.clone();

        let data_index = self.compilation_units.len() as u32;
        self.compilation_units.push(data);
        let parent = self.push_node(Node::with_data(
            syntax_kind::COMPILATION_UNIT,
            span,
            data_index,
        ));

        self.set_parent_list(&types, parent);
        tracing::debug!(
            nodes = self.nodes.len(),
            types = types.len(),
            "Compilation unit built"
        );
        parent
    }
}
