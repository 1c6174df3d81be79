//! Data model for the language-derived code graph.
//!
//! These records are produced by an external front end (parser + semantic
//! resolution) and consumed read-only by the model builders. The shapes are
//! deliberately language-neutral: a `TypeNode` describes any nominal type,
//! a `TypeRef` any (possibly generic) type usage.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Opaque identifier of a node in the code graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    /// Creates the id of a type node from its qualified name
    pub fn of_type(qualified_name: &str) -> Self {
        NodeId(format!("type:{qualified_name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Qualified name of the type this id denotes, when it is a type id
    pub fn type_name(&self) -> Option<&str> {
        self.0.strip_prefix("type:")
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Structural form of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeForm {
    Class,
    Interface,
    Record,
    Enum,
    Annotation,
}

/// Declaration modifiers, normalized across source languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
    Sealed,
    Synchronized,
    Transient,
    Volatile,
}

/// A reference to a type usage, with generic arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    pub qualified_name: String,
    pub simple_name: String,
    pub arguments: Vec<TypeRef>,
}

impl TypeRef {
    /// Creates a non-generic reference; the simple name is derived from the
    /// last dot-separated segment.
    pub fn named(qualified_name: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        let simple_name = simple_name_of(&qualified_name);
        TypeRef {
            qualified_name,
            simple_name,
            arguments: Vec::new(),
        }
    }

    /// Creates a generic reference such as `List<OrderLine>`
    pub fn generic(qualified_name: impl Into<String>, arguments: Vec<TypeRef>) -> Self {
        TypeRef {
            arguments,
            ..TypeRef::named(qualified_name)
        }
    }

    /// First generic argument, when present (element type of containers)
    pub fn first_argument(&self) -> Option<&TypeRef> {
        self.arguments.first()
    }
}

/// An annotation attached to a type, member or parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnotationRef {
    pub qualified_name: String,
}

impl AnnotationRef {
    pub fn of(qualified_name: impl Into<String>) -> Self {
        AnnotationRef {
            qualified_name: qualified_name.into(),
        }
    }
}

/// A declared type, as surfaced by the front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeNode {
    pub id: NodeId,
    pub qualified_name: String,
    pub simple_name: String,
    pub package: String,
    pub form: TypeForm,
    pub modifiers: BTreeSet<Modifier>,
    pub annotations: Vec<AnnotationRef>,
    pub super_type: Option<TypeRef>,
    pub interfaces: Vec<TypeRef>,
}

impl TypeNode {
    /// Creates a bare type node; simple name and package are derived from
    /// the qualified name.
    pub fn new(qualified_name: impl Into<String>, form: TypeForm) -> Self {
        let qualified_name = qualified_name.into();
        let simple_name = simple_name_of(&qualified_name);
        let package = package_of(&qualified_name);
        TypeNode {
            id: NodeId::of_type(&qualified_name),
            qualified_name,
            simple_name,
            package,
            form,
            modifiers: BTreeSet::new(),
            annotations: Vec::new(),
            super_type: None,
            interfaces: Vec::new(),
        }
    }

    pub fn has_annotation(&self, qualified_name: &str) -> bool {
        self.annotations
            .iter()
            .any(|a| a.qualified_name == qualified_name)
    }

    /// Dot-separated package segments (empty for the default package)
    pub fn package_segments(&self) -> impl Iterator<Item = &str> {
        self.package.split('.').filter(|s| !s.is_empty())
    }
}

/// A declared field of a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNode {
    pub name: String,
    pub ty: TypeRef,
    pub modifiers: BTreeSet<Modifier>,
    pub annotations: Vec<AnnotationRef>,
    /// Qualified name of the declaring type; may be absent when the field
    /// is inspected outside any type context.
    pub declaring_type: Option<String>,
}

impl FieldNode {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        FieldNode {
            name: name.into(),
            ty,
            modifiers: BTreeSet::new(),
            annotations: Vec::new(),
            declaring_type: None,
        }
    }

    pub fn has_annotation(&self, qualified_name: &str) -> bool {
        self.annotations
            .iter()
            .any(|a| a.qualified_name == qualified_name)
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(&Modifier::Static)
    }
}

/// A method parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterNode {
    pub name: String,
    pub ty: TypeRef,
}

impl ParameterNode {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        ParameterNode {
            name: name.into(),
            ty,
        }
    }
}

/// A declared method of a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodNode {
    pub name: String,
    /// `None` means the method returns nothing
    pub return_type: Option<TypeRef>,
    pub parameters: Vec<ParameterNode>,
    pub modifiers: BTreeSet<Modifier>,
    pub annotations: Vec<AnnotationRef>,
}

impl MethodNode {
    pub fn new(name: impl Into<String>, return_type: Option<TypeRef>) -> Self {
        MethodNode {
            name: name.into(),
            return_type,
            parameters: Vec::new(),
            modifiers: BTreeSet::new(),
            annotations: Vec::new(),
        }
    }

    pub fn is_void(&self) -> bool {
        self.return_type.is_none()
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(&Modifier::Static)
    }

    pub fn has_annotation(&self, qualified_name: &str) -> bool {
        self.annotations
            .iter()
            .any(|a| a.qualified_name == qualified_name)
    }
}

/// A declared constructor of a type
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConstructorNode {
    pub parameters: Vec<ParameterNode>,
    pub modifiers: BTreeSet<Modifier>,
    pub annotations: Vec<AnnotationRef>,
}

fn simple_name_of(qualified_name: &str) -> String {
    qualified_name
        .rsplit('.')
        .next()
        .unwrap_or(qualified_name)
        .to_string()
}

fn package_of(qualified_name: &str) -> String {
    match qualified_name.rfind('.') {
        Some(idx) => qualified_name[..idx].to_string(),
        None => String::new(),
    }
}
