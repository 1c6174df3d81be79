//! Builders for the domain-side kinds: aggregate roots, entities, value
//! objects, identifiers, domain events and domain services.

use crate::arch::kinds::{ArchKind, FieldRole, MethodRole};
use crate::arch::structure::Field;
use crate::arch::types::{
    AggregateRoot, DomainEvent, DomainService, Entity, Identifier, Invariant, TypeId,
    ValueObject,
};
use crate::builders::context::BuildContext;
use crate::builders::{structure, trace};
use crate::core::errors::{Error, Result};
use crate::graph::model::{TypeNode, TypeRef};
use crate::verdict::Verdict;

/// Event field names that look like ids but never carry the aggregate id
const EXCLUDED_EVENT_ID_NAMES: [&str; 2] = ["id", "eventId"];

/// Builds an aggregate root.
///
/// The identity field is mandatory: a type classified as an aggregate
/// root without one is an invariant violation and fails the build.
pub fn build_aggregate(
    type_node: &TypeNode,
    verdict: &Verdict,
    ctx: &BuildContext,
) -> Result<AggregateRoot> {
    let structure = structure::build_structure(type_node, ctx);
    let trace = trace::convert(verdict)?;

    let identity_field = structure
        .fields_with_role(FieldRole::Identity)
        .next()
        .cloned()
        .ok_or_else(|| Error::MissingIdentity {
            type_name: type_node.qualified_name.clone(),
        })?;

    // For wrapped identities (OrderId around UUID) the effective type is
    // what the wrapper holds
    let effective_identity_type = identity_field
        .wrapped_type
        .clone()
        .unwrap_or_else(|| identity_field.ty.clone());

    let entities = collect_boundary_entities(&structure, ctx);
    let value_objects = distinct(
        structure
            .fields_with_role(FieldRole::Embedded)
            .map(|f| f.ty.clone()),
    );
    let domain_events = distinct(
        structure
            .methods
            .iter()
            .filter_map(|m| m.return_type.as_ref())
            .filter(|r| ctx.is_classified_as(&r.qualified_name, ArchKind::DomainEvent))
            .cloned(),
    );
    let driven_port = find_associated_repository(type_node, ctx);
    let invariants = structure
        .methods_with_role(MethodRole::Validation)
        .map(|m| Invariant::of(m.name.clone(), format!("Invariant from method: {}", m.name)))
        .collect();

    Ok(AggregateRoot {
        id: TypeId::of(type_node.qualified_name.clone()),
        structure,
        trace,
        identity_field,
        effective_identity_type,
        entities,
        value_objects,
        domain_events,
        driven_port,
        invariants,
    })
}

/// Builds an entity; identity is optional here
pub fn build_entity(type_node: &TypeNode, verdict: &Verdict, ctx: &BuildContext) -> Result<Entity> {
    let structure = structure::build_structure(type_node, ctx);
    let trace = trace::convert(verdict)?;
    let identity_field = structure.fields_with_role(FieldRole::Identity).next().cloned();

    Ok(Entity {
        id: TypeId::of(type_node.qualified_name.clone()),
        structure,
        trace,
        identity_field,
    })
}

/// Builds a value object; single-value detection is field-count based
pub fn build_value_object(
    type_node: &TypeNode,
    verdict: &Verdict,
    ctx: &BuildContext,
) -> Result<ValueObject> {
    let structure = structure::build_structure(type_node, ctx);
    let trace = trace::convert(verdict)?;

    let wrapped_field = match structure.fields.as_slice() {
        [single] => Some(single.clone()),
        _ => None,
    };

    Ok(ValueObject {
        id: TypeId::of(type_node.qualified_name.clone()),
        structure,
        trace,
        wrapped_field,
    })
}

/// Builds an identifier; a field-less identifier has no resolvable
/// wrapped type, which is not an error
pub fn build_identifier(
    type_node: &TypeNode,
    verdict: &Verdict,
    ctx: &BuildContext,
) -> Result<Identifier> {
    let structure = structure::build_structure(type_node, ctx);
    let trace = trace::convert(verdict)?;
    let wrapped_type = structure.fields.first().map(|f| f.ty.clone());

    Ok(Identifier {
        id: TypeId::of(type_node.qualified_name.clone()),
        structure,
        trace,
        wrapped_type,
    })
}

/// Builds a domain event, detecting its metadata fields
pub fn build_domain_event(
    type_node: &TypeNode,
    verdict: &Verdict,
    ctx: &BuildContext,
) -> Result<DomainEvent> {
    let structure = structure::build_structure(type_node, ctx);
    let trace = trace::convert(verdict)?;

    let aggregate_id_field = detect_aggregate_id_field(&structure.fields);
    let timestamp_field = structure
        .fields
        .iter()
        .find(|f| {
            ctx.config()
                .timestamp_field_names
                .contains(&f.name.to_lowercase())
        })
        .cloned();
    let source_aggregate = structure
        .fields
        .iter()
        .map(|f| &f.ty)
        .find(|ty| ctx.is_classified_as(&ty.qualified_name, ArchKind::AggregateRoot))
        .cloned();

    Ok(DomainEvent {
        id: TypeId::of(type_node.qualified_name.clone()),
        structure,
        trace,
        aggregate_id_field,
        timestamp_field,
        source_aggregate,
    })
}

/// Builds a domain service, collecting its injected ports
pub fn build_domain_service(
    type_node: &TypeNode,
    verdict: &Verdict,
    ctx: &BuildContext,
) -> Result<DomainService> {
    let structure = structure::build_structure(type_node, ctx);
    let trace = trace::convert(verdict)?;

    let constructor_ports = structure
        .constructors
        .iter()
        .flat_map(|c| c.parameters.iter())
        .map(|p| p.ty.clone())
        .filter(|ty| ctx.is_port(&ty.qualified_name));
    let field_ports = structure
        .fields
        .iter()
        .map(|f| f.ty.clone())
        .filter(|ty| ctx.is_port(&ty.qualified_name));
    let injected_ports = distinct(constructor_ports.chain(field_ports));

    Ok(DomainService {
        id: TypeId::of(type_node.qualified_name.clone()),
        structure,
        trace,
        injected_ports,
    })
}

/// Entities inside the aggregate boundary: plain fields of entity types
/// plus collections whose element type is an entity
fn collect_boundary_entities(
    structure: &crate::arch::structure::TypeStructure,
    ctx: &BuildContext,
) -> Vec<TypeRef> {
    let plain = structure
        .fields
        .iter()
        .filter(|f| !f.has_role(FieldRole::Collection))
        .map(|f| f.ty.clone())
        .filter(|ty| ctx.is_classified_as(&ty.qualified_name, ArchKind::Entity));
    let elements = structure
        .fields
        .iter()
        .filter_map(|f| f.element_type.clone())
        .filter(|ty| ctx.is_classified_as(&ty.qualified_name, ArchKind::Entity));
    distinct(plain.chain(elements))
}

/// The repository managing this aggregate, by the name heuristic:
/// a REPOSITORY-classified type whose name contains the aggregate's
/// simple name
fn find_associated_repository(type_node: &TypeNode, ctx: &BuildContext) -> Option<TypeRef> {
    ctx.verdicts()
        .iter()
        .filter(|v| v.is_classified() && v.kind_label() == Some("REPOSITORY"))
        .filter_map(|v| v.subject.type_name())
        .find(|name| {
            let simple = name.rsplit('.').next().unwrap_or(name);
            simple.contains(type_node.simple_name.as_str())
        })
        .map(TypeRef::named)
}

/// Aggregate-id detection rules, most specific first
fn detect_aggregate_id_field(fields: &[Field]) -> Option<Field> {
    if let Some(exact) = fields.iter().find(|f| f.name == "aggregateId") {
        return Some(exact.clone());
    }
    if let Some(partial) = fields
        .iter()
        .find(|f| f.name.to_lowercase().contains("aggregateid"))
    {
        return Some(partial.clone());
    }
    fields
        .iter()
        .find(|f| {
            f.name.ends_with("Id") && !EXCLUDED_EVENT_ID_NAMES.contains(&f.name.as_str())
        })
        .cloned()
}

fn distinct(refs: impl Iterator<Item = TypeRef>) -> Vec<TypeRef> {
    let mut seen = Vec::new();
    for r in refs {
        if !seen.contains(&r) {
            seen.push(r);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use crate::graph::model::{
        AnnotationRef, FieldNode, MethodNode, NodeId, TypeForm,
    };
    use crate::graph::query::{CodeGraph, GraphQuery};
    use crate::verdict::{Confidence, Criterion, Target, VerdictSet};
    use pretty_assertions::assert_eq;

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

    fn order_world() -> (CodeGraph, VerdictSet) {
        let mut graph = CodeGraph::new();

        graph.add_type(TypeNode::new("com.example.Order", TypeForm::Class));
        let mut id_field = FieldNode::new("id", TypeRef::named("com.example.OrderId"));
        id_field
            .annotations
            .push(AnnotationRef::of("jakarta.persistence.Id"));
        graph.add_field("com.example.Order", id_field);
        graph.add_field(
            "com.example.Order",
            FieldNode::new("total", TypeRef::named("com.example.Money")),
        );
        graph.add_field(
            "com.example.Order",
            FieldNode::new(
                "lines",
                TypeRef::generic(
                    "java.util.List",
                    vec![TypeRef::named("com.example.OrderLine")],
                ),
            ),
        );
        graph.add_method("com.example.Order", MethodNode::new("validateTotal", None));
        graph.add_method(
            "com.example.Order",
            MethodNode::new("place", Some(TypeRef::named("com.example.OrderPlaced"))),
        );

        graph.add_type(TypeNode::new("com.example.OrderId", TypeForm::Record));
        graph.add_field(
            "com.example.OrderId",
            FieldNode::new("value", TypeRef::named("java.util.UUID")),
        );

        graph.add_type(TypeNode::new("com.example.OrderLine", TypeForm::Class));
        graph.add_type(TypeNode::new("com.example.Money", TypeForm::Record));
        graph.add_type(TypeNode::new("com.example.OrderPlaced", TypeForm::Record));

        let verdicts: VerdictSet = [
            classified("com.example.Order", "AGGREGATE_ROOT"),
            classified("com.example.OrderId", "IDENTIFIER"),
            classified("com.example.OrderLine", "ENTITY"),
            classified("com.example.Money", "VALUE_OBJECT"),
            classified("com.example.OrderPlaced", "DOMAIN_EVENT"),
            classified("com.example.OrderRepository", "REPOSITORY"),
        ]
        .into_iter()
        .collect();

        (graph, verdicts)
    }

    #[test]
    fn test_aggregate_resolves_wrapped_identity() {
        let (graph, verdicts) = order_world();
        let config = ModelConfig::default();
        let ctx = BuildContext::new(&graph, &verdicts, &config);
        let order = graph.type_by_name("com.example.Order").unwrap();
        let verdict = verdicts.for_type_name("com.example.Order").unwrap();

        let aggregate = build_aggregate(order, verdict, &ctx).unwrap();

        assert_eq!(aggregate.identity_field.name, "id");
        assert_eq!(
            aggregate.effective_identity_type.qualified_name,
            "java.util.UUID"
        );
    }

    #[test]
    fn test_aggregate_collects_boundary_and_events() {
        let (graph, verdicts) = order_world();
        let config = ModelConfig::default();
        let ctx = BuildContext::new(&graph, &verdicts, &config);
        let order = graph.type_by_name("com.example.Order").unwrap();
        let verdict = verdicts.for_type_name("com.example.Order").unwrap();

        let aggregate = build_aggregate(order, verdict, &ctx).unwrap();

        let entity_names: Vec<_> = aggregate
            .entities
            .iter()
            .map(|t| t.simple_name.as_str())
            .collect();
        assert_eq!(entity_names, vec!["OrderLine"]);

        let vo_names: Vec<_> = aggregate
            .value_objects
            .iter()
            .map(|t| t.simple_name.as_str())
            .collect();
        // embedded identifier and embedded value object both count
        assert_eq!(vo_names, vec!["OrderId", "Money"]);

        let event_names: Vec<_> = aggregate
            .domain_events
            .iter()
            .map(|t| t.simple_name.as_str())
            .collect();
        assert_eq!(event_names, vec!["OrderPlaced"]);

        assert_eq!(
            aggregate.driven_port.as_ref().unwrap().simple_name,
            "OrderRepository"
        );
    }

    #[test]
    fn test_aggregate_invariants_from_validation_methods() {
        let (graph, verdicts) = order_world();
        let config = ModelConfig::default();
        let ctx = BuildContext::new(&graph, &verdicts, &config);
        let order = graph.type_by_name("com.example.Order").unwrap();
        let verdict = verdicts.for_type_name("com.example.Order").unwrap();

        let aggregate = build_aggregate(order, verdict, &ctx).unwrap();
        assert!(aggregate.has_invariants());
        assert_eq!(aggregate.invariants[0].name, "validateTotal");
    }

    #[test]
    fn test_aggregate_without_identity_fails_hard() {
        let mut graph = CodeGraph::new();
        graph.add_type(TypeNode::new("com.example.Rogue", TypeForm::Class));
        graph.add_field(
            "com.example.Rogue",
            FieldNode::new("name", TypeRef::named("java.lang.String")),
        );
        let verdicts: VerdictSet = [classified("com.example.Rogue", "AGGREGATE_ROOT")]
            .into_iter()
            .collect();
        let config = ModelConfig::default();
        let ctx = BuildContext::new(&graph, &verdicts, &config);
        let rogue = graph.type_by_name("com.example.Rogue").unwrap();
        let verdict = verdicts.for_type_name("com.example.Rogue").unwrap();

        let err = build_aggregate(rogue, verdict, &ctx).unwrap_err();
        assert!(matches!(err, Error::MissingIdentity { .. }));
        assert!(err.to_string().contains("identity field"));
    }

    #[test]
    fn test_entity_identity_is_optional() {
        let mut graph = CodeGraph::new();
        graph.add_type(TypeNode::new("com.example.OrderLine", TypeForm::Class));
        graph.add_field(
            "com.example.OrderLine",
            FieldNode::new("quantity", TypeRef::named("int")),
        );
        let verdicts: VerdictSet = [classified("com.example.OrderLine", "ENTITY")]
            .into_iter()
            .collect();
        let config = ModelConfig::default();
        let ctx = BuildContext::new(&graph, &verdicts, &config);
        let line = graph.type_by_name("com.example.OrderLine").unwrap();
        let verdict = verdicts.for_type_name("com.example.OrderLine").unwrap();

        let entity = build_entity(line, verdict, &ctx).unwrap();
        assert!(!entity.has_identity());
    }

    #[test]
    fn test_value_object_single_value_detection() {
        let mut graph = CodeGraph::new();
        graph.add_type(TypeNode::new("com.example.Money", TypeForm::Record));
        graph.add_field(
            "com.example.Money",
            FieldNode::new("amount", TypeRef::named("java.math.BigDecimal")),
        );
        graph.add_type(TypeNode::new("com.example.Span", TypeForm::Record));
        graph.add_field(
            "com.example.Span",
            FieldNode::new("from", TypeRef::named("java.time.Instant")),
        );
        graph.add_field(
            "com.example.Span",
            FieldNode::new("to", TypeRef::named("java.time.Instant")),
        );
        let verdicts: VerdictSet = [
            classified("com.example.Money", "VALUE_OBJECT"),
            classified("com.example.Span", "VALUE_OBJECT"),
        ]
        .into_iter()
        .collect();
        let config = ModelConfig::default();
        let ctx = BuildContext::new(&graph, &verdicts, &config);

        let money = build_value_object(
            graph.type_by_name("com.example.Money").unwrap(),
            verdicts.for_type_name("com.example.Money").unwrap(),
            &ctx,
        )
        .unwrap();
        assert!(money.is_single_value());
        assert_eq!(money.wrapped_field().unwrap().name, "amount");

        let span = build_value_object(
            graph.type_by_name("com.example.Span").unwrap(),
            verdicts.for_type_name("com.example.Span").unwrap(),
            &ctx,
        )
        .unwrap();
        assert!(!span.is_single_value());
        assert!(span.wrapped_field().is_none());
    }

    #[test]
    fn test_identifier_wraps_first_field() {
        let mut graph = CodeGraph::new();
        graph.add_type(TypeNode::new("com.example.OrderId", TypeForm::Record));
        graph.add_field(
            "com.example.OrderId",
            FieldNode::new("value", TypeRef::named("java.util.UUID")),
        );
        graph.add_type(TypeNode::new("com.example.Marker", TypeForm::Class));
        let verdicts: VerdictSet = [
            classified("com.example.OrderId", "IDENTIFIER"),
            classified("com.example.Marker", "IDENTIFIER"),
        ]
        .into_iter()
        .collect();
        let config = ModelConfig::default();
        let ctx = BuildContext::new(&graph, &verdicts, &config);

        let order_id = build_identifier(
            graph.type_by_name("com.example.OrderId").unwrap(),
            verdicts.for_type_name("com.example.OrderId").unwrap(),
            &ctx,
        )
        .unwrap();
        assert_eq!(
            order_id.wrapped_type.as_ref().unwrap().qualified_name,
            "java.util.UUID"
        );

        // no fields: no wrapped type, still a valid identifier
        let marker = build_identifier(
            graph.type_by_name("com.example.Marker").unwrap(),
            verdicts.for_type_name("com.example.Marker").unwrap(),
            &ctx,
        )
        .unwrap();
        assert!(marker.wrapped_type.is_none());
    }

    #[test]
    fn test_domain_event_metadata_detection() {
        let mut graph = CodeGraph::new();
        graph.add_type(TypeNode::new("com.example.OrderPlaced", TypeForm::Record));
        graph.add_field(
            "com.example.OrderPlaced",
            FieldNode::new("eventId", TypeRef::named("java.util.UUID")),
        );
        graph.add_field(
            "com.example.OrderPlaced",
            FieldNode::new("orderId", TypeRef::named("java.util.UUID")),
        );
        graph.add_field(
            "com.example.OrderPlaced",
            FieldNode::new("occurredAt", TypeRef::named("java.time.Instant")),
        );
        let verdicts: VerdictSet = [classified("com.example.OrderPlaced", "DOMAIN_EVENT")]
            .into_iter()
            .collect();
        let config = ModelConfig::default();
        let ctx = BuildContext::new(&graph, &verdicts, &config);

        let event = build_domain_event(
            graph.type_by_name("com.example.OrderPlaced").unwrap(),
            verdicts.for_type_name("com.example.OrderPlaced").unwrap(),
            &ctx,
        )
        .unwrap();

        // eventId is excluded; orderId wins
        assert_eq!(event.aggregate_id_field.as_ref().unwrap().name, "orderId");
        assert_eq!(event.timestamp_field.as_ref().unwrap().name, "occurredAt");
    }

    #[test]
    fn test_exact_aggregate_id_wins_over_suffix() {
        let fields = vec![
            field_named("customerId"),
            field_named("aggregateId"),
        ];
        assert_eq!(
            detect_aggregate_id_field(&fields).unwrap().name,
            "aggregateId"
        );
    }

    #[test]
    fn test_domain_service_collects_injected_ports() {
        let mut graph = CodeGraph::new();
        graph.add_type(TypeNode::new("com.example.PricingService", TypeForm::Class));
        graph.add_constructor(
            "com.example.PricingService",
            crate::graph::model::ConstructorNode {
                parameters: vec![crate::graph::model::ParameterNode::new(
                    "rates",
                    TypeRef::named("com.example.RateGateway"),
                )],
                ..Default::default()
            },
        );
        graph.add_field(
            "com.example.PricingService",
            FieldNode::new("orders", TypeRef::named("com.example.OrderRepository")),
        );
        let verdicts: VerdictSet = [
            classified("com.example.PricingService", "DOMAIN_SERVICE"),
            classified("com.example.RateGateway", "GATEWAY"),
            classified("com.example.OrderRepository", "REPOSITORY"),
        ]
        .into_iter()
        .collect();
        let config = ModelConfig::default();
        let ctx = BuildContext::new(&graph, &verdicts, &config);

        let service = build_domain_service(
            graph.type_by_name("com.example.PricingService").unwrap(),
            verdicts.for_type_name("com.example.PricingService").unwrap(),
            &ctx,
        )
        .unwrap();

        let names: Vec<_> = service
            .injected_ports
            .iter()
            .map(|t| t.simple_name.as_str())
            .collect();
        assert_eq!(names, vec!["RateGateway", "OrderRepository"]);
    }

    fn field_named(name: &str) -> Field {
        Field {
            name: name.to_string(),
            ty: TypeRef::named("java.util.UUID"),
            modifiers: Default::default(),
            annotations: Vec::new(),
            element_type: None,
            wrapped_type: None,
            roles: Default::default(),
        }
    }
}
