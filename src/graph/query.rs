//! Read-only query surface over the code graph.
//!
//! The builders never mutate the graph; everything they need goes through
//! [`GraphQuery`]. `CodeGraph` is the in-memory implementation used by
//! embedders and tests; front ends with their own storage implement the
//! trait directly.

use std::collections::BTreeMap;

use crate::graph::model::{ConstructorNode, FieldNode, MethodNode, NodeId, TypeNode};

/// Read-only access to type nodes and their members
pub trait GraphQuery {
    /// All type nodes, in deterministic (name) order
    fn types(&self) -> Vec<&TypeNode>;

    /// Looks up a type node by qualified name
    fn type_by_name(&self, qualified_name: &str) -> Option<&TypeNode>;

    /// Looks up a type node by graph id
    fn type_by_id(&self, id: &NodeId) -> Option<&TypeNode>;

    /// Declared fields of a type, in declaration order
    fn fields_of(&self, ty: &TypeNode) -> &[FieldNode];

    /// Declared methods of a type, in declaration order
    fn methods_of(&self, ty: &TypeNode) -> &[MethodNode];

    /// Declared constructors of a type, in declaration order
    fn constructors_of(&self, ty: &TypeNode) -> &[ConstructorNode];

    /// Types declaring the given interface among their interface refs
    fn implementors_of(&self, interface_name: &str) -> Vec<&TypeNode>;
}

#[derive(Debug, Clone)]
struct TypeRecord {
    node: TypeNode,
    fields: Vec<FieldNode>,
    methods: Vec<MethodNode>,
    constructors: Vec<ConstructorNode>,
}

/// In-memory code graph keyed by qualified type name
#[derive(Debug, Clone, Default)]
pub struct CodeGraph {
    records: BTreeMap<String, TypeRecord>,
}

impl CodeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type node; members are attached separately
    pub fn add_type(&mut self, node: TypeNode) {
        self.records.insert(
            node.qualified_name.clone(),
            TypeRecord {
                node,
                fields: Vec::new(),
                methods: Vec::new(),
                constructors: Vec::new(),
            },
        );
    }

    /// Attaches a field to a previously added type.
    ///
    /// The field's declaring type is filled in from the owner when absent.
    pub fn add_field(&mut self, owner: &str, mut field: FieldNode) {
        if let Some(record) = self.records.get_mut(owner) {
            field
                .declaring_type
                .get_or_insert_with(|| owner.to_string());
            record.fields.push(field);
        }
    }

    /// Attaches a method to a previously added type
    pub fn add_method(&mut self, owner: &str, method: MethodNode) {
        if let Some(record) = self.records.get_mut(owner) {
            record.methods.push(method);
        }
    }

    /// Attaches a constructor to a previously added type
    pub fn add_constructor(&mut self, owner: &str, constructor: ConstructorNode) {
        if let Some(record) = self.records.get_mut(owner) {
            record.constructors.push(constructor);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl GraphQuery for CodeGraph {
    fn types(&self) -> Vec<&TypeNode> {
        self.records.values().map(|r| &r.node).collect()
    }

    fn type_by_name(&self, qualified_name: &str) -> Option<&TypeNode> {
        self.records.get(qualified_name).map(|r| &r.node)
    }

    fn type_by_id(&self, id: &NodeId) -> Option<&TypeNode> {
        self.records
            .values()
            .map(|r| &r.node)
            .find(|n| &n.id == id)
    }

    fn fields_of(&self, ty: &TypeNode) -> &[FieldNode] {
        self.records
            .get(&ty.qualified_name)
            .map(|r| r.fields.as_slice())
            .unwrap_or(&[])
    }

    fn methods_of(&self, ty: &TypeNode) -> &[MethodNode] {
        self.records
            .get(&ty.qualified_name)
            .map(|r| r.methods.as_slice())
            .unwrap_or(&[])
    }

    fn constructors_of(&self, ty: &TypeNode) -> &[ConstructorNode] {
        self.records
            .get(&ty.qualified_name)
            .map(|r| r.constructors.as_slice())
            .unwrap_or(&[])
    }

    fn implementors_of(&self, interface_name: &str) -> Vec<&TypeNode> {
        self.records
            .values()
            .map(|r| &r.node)
            .filter(|n| {
                n.interfaces
                    .iter()
                    .any(|i| i.qualified_name == interface_name)
            })
            .collect()
    }
}
