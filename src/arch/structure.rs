//! Structural snapshot of a type, uniform across all architectural kinds.
//!
//! A [`TypeStructure`] is what the per-kind builders reason over: fields
//! annotated with detected roles, methods annotated with detected roles,
//! constructors, inheritance references. It reuses the graph model's
//! [`TypeRef`]/[`AnnotationRef`]/[`Modifier`] value types directly; the
//! snapshot adds semantics (roles, element types, wrapped types), not a
//! parallel vocabulary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::arch::kinds::{FieldRole, MethodRole, TypeNature};
use crate::graph::model::{AnnotationRef, Modifier, ParameterNode, TypeRef};

/// A field with its detected semantic roles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: TypeRef,
    pub modifiers: BTreeSet<Modifier>,
    pub annotations: Vec<AnnotationRef>,
    /// Element type of a collection field
    pub element_type: Option<TypeRef>,
    /// Wrapped type when the declared type is a single-field wrapper
    /// (identifier or single-value value object)
    pub wrapped_type: Option<TypeRef>,
    pub roles: BTreeSet<FieldRole>,
}

impl Field {
    pub fn has_role(&self, role: FieldRole) -> bool {
        self.roles.contains(&role)
    }
}

/// A method with its detected semantic roles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub return_type: Option<TypeRef>,
    pub parameters: Vec<ParameterNode>,
    pub modifiers: BTreeSet<Modifier>,
    pub annotations: Vec<AnnotationRef>,
    pub roles: BTreeSet<MethodRole>,
}

impl Method {
    pub fn has_role(&self, role: MethodRole) -> bool {
        self.roles.contains(&role)
    }
}

/// A constructor and its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constructor {
    pub parameters: Vec<ParameterNode>,
    pub modifiers: BTreeSet<Modifier>,
    pub annotations: Vec<AnnotationRef>,
}

/// The assembled structural snapshot of one type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeStructure {
    pub nature: TypeNature,
    pub modifiers: BTreeSet<Modifier>,
    pub super_class: Option<TypeRef>,
    pub interfaces: Vec<TypeRef>,
    pub annotations: Vec<AnnotationRef>,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    pub constructors: Vec<Constructor>,
}

impl TypeStructure {
    pub fn is_interface_like(&self) -> bool {
        self.nature == TypeNature::Interface
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields carrying the given role, in declaration order
    pub fn fields_with_role(&self, role: FieldRole) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(move |f| f.has_role(role))
    }

    /// Methods carrying the given role, in declaration order
    pub fn methods_with_role(&self, role: MethodRole) -> impl Iterator<Item = &Method> {
        self.methods.iter().filter(move |m| m.has_role(role))
    }
}
