//! Semantic role detection for fields.
//!
//! Stateless heuristics over one field descriptor: annotations, naming
//! patterns and how the field's declared type classifies in the current
//! context. A field may carry several roles at once (an embedded
//! identifier used as identity carries both `Identity` and `Embedded`).

use std::collections::BTreeSet;

use crate::arch::kinds::{ArchKind, FieldRole};
use crate::builders::context::BuildContext;
use crate::graph::model::FieldNode;

/// Detects the semantic roles of a field.
///
/// Aggregate-relative heuristics degrade gracefully: without a declaring
/// type on the field, the `<typeName>Id` convention simply cannot match.
pub fn detect(field: &FieldNode, ctx: &BuildContext) -> BTreeSet<FieldRole> {
    let mut roles = BTreeSet::new();
    let config = ctx.config();

    if is_identity_field(field, ctx) {
        roles.insert(FieldRole::Identity);
    }

    if config.is_collection(&field.ty) {
        roles.insert(FieldRole::Collection);
    }

    if ctx.is_classified_as(&field.ty.qualified_name, ArchKind::AggregateRoot) {
        roles.insert(FieldRole::AggregateReference);
    }

    if ctx.is_classified_as(&field.ty.qualified_name, ArchKind::ValueObject)
        || ctx.is_classified_as(&field.ty.qualified_name, ArchKind::Identifier)
    {
        roles.insert(FieldRole::Embedded);
    }

    if config
        .audit_field_patterns
        .contains(&field.name.to_lowercase())
    {
        roles.insert(FieldRole::Audit);
    }

    if is_technical_field(field, ctx) {
        roles.insert(FieldRole::Technical);
    }

    roles
}

/// Identity detection rules, most definitive first:
/// an identity annotation; the exact name `id`; the `<typeName>Id`
/// convention for the declaring type. `productId` inside `OrderLine` is a
/// foreign key, not an identity; when a declaring type is known, any
/// other `*Id` name is rejected.
fn is_identity_field(field: &FieldNode, ctx: &BuildContext) -> bool {
    let config = ctx.config();

    // Collections and maps never carry identity
    if config.is_collection(&field.ty) || config.is_map_like(&field.ty) {
        return false;
    }

    if field
        .annotations
        .iter()
        .any(|a| config.is_identity_annotation(&a.qualified_name))
    {
        return true;
    }

    if field.name == "id" {
        return true;
    }

    match field.declaring_type.as_deref() {
        Some(declaring) => {
            let simple = declaring.rsplit('.').next().unwrap_or(declaring);
            field.name == expected_id_field_name(simple)
        }
        None => false,
    }
}

/// `Order` → `orderId`
fn expected_id_field_name(simple_type_name: &str) -> String {
    let mut chars = simple_type_name.chars();
    match chars.next() {
        Some(first) => format!("{}{}Id", first.to_lowercase(), chars.as_str()),
        None => "Id".to_string(),
    }
}

fn is_technical_field(field: &FieldNode, ctx: &BuildContext) -> bool {
    let config = ctx.config();

    if config
        .technical_field_patterns
        .contains(&field.name.to_lowercase())
    {
        return true;
    }

    field
        .annotations
        .iter()
        .any(|a| config.is_version_annotation(&a.qualified_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use crate::graph::model::{AnnotationRef, FieldNode, NodeId, TypeRef};
    use crate::graph::query::CodeGraph;
    use crate::verdict::{Confidence, Criterion, Target, Verdict, VerdictSet};

    fn classified(name: &str, kind: &str) -> Verdict {
        Verdict::classified(
            NodeId::of_type(name),
            Target::Domain,
            kind,
            Confidence::High,
            Criterion::new("test", 1),
            "test",
        )
    }

    fn detect_with(field: &FieldNode, verdicts: &VerdictSet) -> BTreeSet<FieldRole> {
        let graph = CodeGraph::new();
        let config = ModelConfig::default();
        let ctx = BuildContext::new(&graph, verdicts, &config);
        detect(field, &ctx)
    }

    fn field_of(name: &str, ty: &str, declaring: &str) -> FieldNode {
        FieldNode {
            declaring_type: Some(declaring.to_string()),
            ..FieldNode::new(name, TypeRef::named(ty))
        }
    }

    #[test]
    fn test_annotated_field_is_identity() {
        let mut field = field_of("orderKey", "java.util.UUID", "com.example.Order");
        field
            .annotations
            .push(AnnotationRef::of("jakarta.persistence.Id"));
        let roles = detect_with(&field, &VerdictSet::new());
        assert!(roles.contains(&FieldRole::Identity));
    }

    #[test]
    fn test_plain_id_name_is_identity() {
        let field = field_of("id", "java.util.UUID", "com.example.Order");
        let roles = detect_with(&field, &VerdictSet::new());
        assert!(roles.contains(&FieldRole::Identity));
    }

    #[test]
    fn test_type_name_convention_matches_declaring_type() {
        let field = field_of("orderId", "java.util.UUID", "com.example.Order");
        let roles = detect_with(&field, &VerdictSet::new());
        assert!(roles.contains(&FieldRole::Identity));
    }

    #[test]
    fn test_foreign_key_is_not_identity() {
        // productId inside OrderLine references another aggregate
        let field = field_of("productId", "java.util.UUID", "com.example.OrderLine");
        let roles = detect_with(&field, &VerdictSet::new());
        assert!(!roles.contains(&FieldRole::Identity));
    }

    #[test]
    fn test_missing_declaring_type_degrades_gracefully() {
        let field = FieldNode::new("orderId", TypeRef::named("java.util.UUID"));
        let roles = detect_with(&field, &VerdictSet::new());
        assert!(!roles.contains(&FieldRole::Identity));
    }

    #[test]
    fn test_collection_field_roles() {
        let field = FieldNode {
            declaring_type: Some("com.example.Order".to_string()),
            ..FieldNode::new(
                "lines",
                TypeRef::generic(
                    "java.util.List",
                    vec![TypeRef::named("com.example.OrderLine")],
                ),
            )
        };
        let roles = detect_with(&field, &VerdictSet::new());
        assert!(roles.contains(&FieldRole::Collection));
        assert!(!roles.contains(&FieldRole::Identity));
    }

    #[test]
    fn test_collection_named_id_is_not_identity() {
        let field = field_of("id", "java.util.List", "com.example.Order");
        let roles = detect_with(&field, &VerdictSet::new());
        assert!(!roles.contains(&FieldRole::Identity));
    }

    #[test]
    fn test_embedded_and_identity_can_coexist() {
        let verdicts: VerdictSet = [classified("com.example.OrderId", "IDENTIFIER")]
            .into_iter()
            .collect();
        let field = field_of("orderId", "com.example.OrderId", "com.example.Order");
        let roles = detect_with(&field, &verdicts);
        assert!(roles.contains(&FieldRole::Identity));
        assert!(roles.contains(&FieldRole::Embedded));
    }

    #[test]
    fn test_aggregate_reference_role() {
        let verdicts: VerdictSet = [classified("com.example.Customer", "AGGREGATE_ROOT")]
            .into_iter()
            .collect();
        let field = field_of("customer", "com.example.Customer", "com.example.Order");
        let roles = detect_with(&field, &verdicts);
        assert!(roles.contains(&FieldRole::AggregateReference));
    }

    #[test]
    fn test_audit_and_technical_roles() {
        let created = field_of("createdAt", "java.time.Instant", "com.example.Order");
        assert!(detect_with(&created, &VerdictSet::new()).contains(&FieldRole::Audit));

        let version = field_of("version", "long", "com.example.Order");
        assert!(detect_with(&version, &VerdictSet::new()).contains(&FieldRole::Technical));

        let mut locked = field_of("lockCounter", "long", "com.example.Order");
        locked
            .annotations
            .push(AnnotationRef::of("jakarta.persistence.Version"));
        assert!(detect_with(&locked, &VerdictSet::new()).contains(&FieldRole::Technical));
    }
}
