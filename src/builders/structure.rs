//! Assembles the uniform structural snapshot of a type.
//!
//! Pure function of (type node, context): pulls members through the graph
//! query, applies both role detectors, resolves collection element types
//! and wrapped types of single-field wrappers. Every per-kind builder
//! starts from this snapshot.

use crate::arch::kinds::{ArchKind, TypeNature};
use crate::arch::structure::{Constructor, Field, Method, TypeStructure};
use crate::builders::context::BuildContext;
use crate::builders::{field_roles, method_roles};
use crate::graph::model::{FieldNode, TypeForm, TypeNode, TypeRef};

/// Builds the structural snapshot of a type
pub fn build_structure(type_node: &TypeNode, ctx: &BuildContext) -> TypeStructure {
    let graph = ctx.graph();

    // Static fields are not part of the instance structure
    let fields = graph
        .fields_of(type_node)
        .iter()
        .filter(|f| !f.is_static())
        .map(|f| build_field(f, ctx))
        .collect();

    let methods = graph
        .methods_of(type_node)
        .iter()
        .map(|m| Method {
            name: m.name.clone(),
            return_type: m.return_type.clone(),
            parameters: m.parameters.clone(),
            modifiers: m.modifiers.clone(),
            annotations: m.annotations.clone(),
            roles: method_roles::detect(m, Some(type_node), ctx.config()),
        })
        .collect();

    let constructors = graph
        .constructors_of(type_node)
        .iter()
        .map(|c| Constructor {
            parameters: c.parameters.clone(),
            modifiers: c.modifiers.clone(),
            annotations: c.annotations.clone(),
        })
        .collect();

    TypeStructure {
        nature: nature_of(type_node.form),
        modifiers: type_node.modifiers.clone(),
        super_class: type_node.super_type.clone(),
        interfaces: type_node.interfaces.clone(),
        annotations: type_node.annotations.clone(),
        fields,
        methods,
        constructors,
    }
}

fn nature_of(form: TypeForm) -> TypeNature {
    match form {
        TypeForm::Class => TypeNature::Class,
        TypeForm::Interface => TypeNature::Interface,
        TypeForm::Record => TypeNature::Record,
        TypeForm::Enum => TypeNature::Enum,
        TypeForm::Annotation => TypeNature::Annotation,
    }
}

fn build_field(field: &FieldNode, ctx: &BuildContext) -> Field {
    let roles = field_roles::detect(field, ctx);

    let element_type = if ctx.config().is_collection(&field.ty) {
        field.ty.first_argument().cloned()
    } else {
        None
    };

    Field {
        name: field.name.clone(),
        ty: field.ty.clone(),
        modifiers: field.modifiers.clone(),
        annotations: field.annotations.clone(),
        element_type,
        wrapped_type: detect_wrapped_type(field, ctx),
        roles,
    }
}

/// Resolves the wrapped type of a field whose declared type is a
/// single-field wrapper (identifier or value object).
///
/// `orderId: OrderId` where `OrderId` wraps a `UUID` resolves to `UUID`.
/// Multi-field wrappers and unknown types resolve to nothing.
fn detect_wrapped_type(field: &FieldNode, ctx: &BuildContext) -> Option<TypeRef> {
    let type_name = &field.ty.qualified_name;

    let is_wrapper_kind = ctx.is_classified_as(type_name, ArchKind::Identifier)
        || ctx.is_classified_as(type_name, ArchKind::ValueObject);
    if !is_wrapper_kind {
        return None;
    }

    let wrapper_node = ctx.graph().type_by_name(type_name)?;
    let wrapper_fields: Vec<&FieldNode> = ctx
        .graph()
        .fields_of(wrapper_node)
        .iter()
        .filter(|f| !f.is_static())
        .collect();

    match wrapper_fields.as_slice() {
        [single] => Some(single.ty.clone()),
        _ => None,
    }
}
