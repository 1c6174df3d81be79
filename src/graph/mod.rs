pub mod model;
pub mod query;

pub use model::{
    AnnotationRef, ConstructorNode, FieldNode, MethodNode, Modifier, NodeId, ParameterNode,
    TypeForm, TypeNode, TypeRef,
};
pub use query::{CodeGraph, GraphQuery};
