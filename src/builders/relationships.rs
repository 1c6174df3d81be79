//! Derives the typed relationship graph over a finished registry.
//!
//! This is a pure second pass: every type's edges depend only on the
//! immutable registry, never on build order, so the per-type derivation
//! fans out with rayon and the results are flattened in registry order.
//! The resulting edge order is deterministic regardless of scheduling.

use rayon::prelude::*;

use crate::arch::graph::{RelationKind, Relationship, RelationshipGraph};
use crate::arch::kinds::{ArchKind, FieldRole, UnclassifiedCategory};
use crate::arch::registry::TypeRegistry;
use crate::arch::structure::Field;
use crate::arch::types::{AggregateRoot, ArchType, DrivenPort, TypeId};
use crate::graph::model::TypeRef;

/// Builds the relationship graph; an empty registry yields an empty graph
pub fn build(registry: &TypeRegistry) -> RelationshipGraph {
    let types: Vec<&ArchType> = registry.all().collect();

    let per_type: Vec<Vec<Relationship>> = types
        .par_iter()
        .map(|&ty| derive_for_type(ty, registry))
        .collect();

    let mut graph = RelationshipGraph::new();
    for edges in per_type {
        for edge in edges {
            graph.add(edge);
        }
    }
    graph
}

fn derive_for_type(ty: &ArchType, registry: &TypeRegistry) -> Vec<Relationship> {
    let mut edges = Vec::new();
    let id = ty.id();

    match ty {
        ArchType::Aggregate(aggregate) => derive_aggregate(aggregate, &mut edges),
        ArchType::DrivenPort(port) => derive_driven_port(port, registry, &mut edges),
        ArchType::Service(service) => {
            for port in &service.injected_ports {
                let target = TypeId::from(port);
                if registry.contains(&target) {
                    edges.push(Relationship::new(id.clone(), target, RelationKind::DependsOn));
                }
            }
        }
        ArchType::Application(app) => {
            // constructor-injected ports read as dependencies
            for param in app.structure.constructors.iter().flat_map(|c| &c.parameters) {
                let target = TypeId::from(&param.ty);
                if registry
                    .get(&target)
                    .is_some_and(|t| t.kind().is_port())
                {
                    edges.push(Relationship::new(id.clone(), target, RelationKind::DependsOn));
                }
            }
        }
        _ => {}
    }

    derive_inheritance(ty, registry, &mut edges);

    // Out-of-scope types keep their IMPLEMENTS edges (adapter detection
    // depends on them) but never contribute field-derived edges.
    if !is_out_of_scope(ty) {
        derive_field_compositions(ty, registry, &mut edges);
    }

    edges
}

fn derive_aggregate(aggregate: &AggregateRoot, edges: &mut Vec<Relationship>) {
    let id = &aggregate.id;

    for entity in &aggregate.entities {
        edges.push(Relationship::new(
            id.clone(),
            TypeId::from(entity),
            RelationKind::Contains,
        ));
    }
    for vo in &aggregate.value_objects {
        edges.push(Relationship::new(
            id.clone(),
            TypeId::from(vo),
            RelationKind::Contains,
        ));
    }
    for event in &aggregate.domain_events {
        edges.push(Relationship::new(
            id.clone(),
            TypeId::from(event),
            RelationKind::Emits,
        ));
    }
}

/// Repositories persist their managed aggregate. The build-time lookup is
/// order-dependent, so when it came back empty the port's method surface
/// is rescanned against the now-complete registry; this pass is where
/// forward references resolve.
fn derive_driven_port(port: &DrivenPort, registry: &TypeRegistry, edges: &mut Vec<Relationship>) {
    if !port.is_repository() {
        return;
    }

    let managed = port
        .managed_aggregate
        .clone()
        .or_else(|| rescan_managed_aggregate(port, registry));

    if let Some(aggregate_ref) = managed {
        let target = TypeId::from(&aggregate_ref);
        if registry
            .get(&target)
            .is_some_and(|t| t.kind() == ArchKind::AggregateRoot)
        {
            edges.push(Relationship::new(
                port.id.clone(),
                target,
                RelationKind::Persists,
            ));
        }
    }
}

fn rescan_managed_aggregate(port: &DrivenPort, registry: &TypeRegistry) -> Option<TypeRef> {
    port.structure
        .methods
        .iter()
        .filter_map(|m| m.return_type.as_ref())
        .flat_map(|ret| std::iter::once(ret).chain(ret.arguments.iter()))
        .find(|candidate| {
            registry
                .get(&TypeId::from(*candidate))
                .is_some_and(|t| t.kind() == ArchKind::AggregateRoot)
        })
        .cloned()
}

fn derive_inheritance(ty: &ArchType, registry: &TypeRegistry, edges: &mut Vec<Relationship>) {
    let id = ty.id();
    let structure = ty.structure();

    if let Some(super_ref) = &structure.super_class {
        let target = TypeId::from(super_ref);
        if registry.contains(&target) {
            edges.push(Relationship::new(id.clone(), target, RelationKind::Extends));
        }
    }

    for interface in &structure.interfaces {
        let target = TypeId::from(interface);
        if registry.contains(&target) {
            edges.push(Relationship::new(
                id.clone(),
                target,
                RelationKind::Implements,
            ));
        }
    }
}

/// Field references resolve into role-specific edges plus a generic
/// dependency edge. Unresolved and primitive field types never yield
/// anything; resolution requires registry membership.
fn derive_field_compositions(
    ty: &ArchType,
    registry: &TypeRegistry,
    edges: &mut Vec<Relationship>,
) {
    let id = ty.id();

    for field in &ty.structure().fields {
        let Some(target) = resolve_field_target(field, registry) else {
            continue;
        };
        if &target == id {
            continue;
        }

        if field.has_role(FieldRole::Identity) {
            edges.push(Relationship::new(id.clone(), target.clone(), RelationKind::Owns));
        }

        if field.has_role(FieldRole::Embedded) {
            // an embedded identifier of another aggregate is a
            // cross-boundary reference
            if registry
                .get(&target)
                .is_some_and(|t| t.kind() == ArchKind::Identifier)
            {
                if let Some(owner) = find_aggregate_for_identifier(&target, registry) {
                    if &owner != id {
                        edges.push(Relationship::new(
                            id.clone(),
                            owner,
                            RelationKind::References,
                        ));
                    }
                }
            }
            edges.push(Relationship::new(
                id.clone(),
                target.clone(),
                RelationKind::Contains,
            ));
        }

        if field.has_role(FieldRole::Collection) && is_domain_element(&target, registry) {
            edges.push(Relationship::new(
                id.clone(),
                target.clone(),
                RelationKind::Contains,
            ));
        }

        if field.has_role(FieldRole::AggregateReference) {
            edges.push(Relationship::new(
                id.clone(),
                target.clone(),
                RelationKind::References,
            ));
        }

        let is_plain_dependency = !field.has_role(FieldRole::Identity)
            && !field.has_role(FieldRole::Audit)
            && !field.has_role(FieldRole::Technical);
        if is_plain_dependency {
            edges.push(Relationship::new(id.clone(), target, RelationKind::DependsOn));
        }
    }
}

/// Element type for collections, the declared type otherwise; only
/// registry members count as resolved
fn resolve_field_target(field: &Field, registry: &TypeRegistry) -> Option<TypeId> {
    if let Some(element) = &field.element_type {
        let element_id = TypeId::from(element);
        if registry.contains(&element_id) {
            return Some(element_id);
        }
    }

    let field_id = TypeId::from(&field.ty);
    registry.contains(&field_id).then_some(field_id)
}

/// The aggregate whose identity resolves to the given identifier type
fn find_aggregate_for_identifier(identifier: &TypeId, registry: &TypeRegistry) -> Option<TypeId> {
    registry
        .aggregates()
        .find(|aggregate| {
            TypeId::from(&aggregate.identity_field.ty) == *identifier
                || TypeId::from(&aggregate.effective_identity_type) == *identifier
        })
        .map(|aggregate| aggregate.id.clone())
}

fn is_domain_element(target: &TypeId, registry: &TypeRegistry) -> bool {
    registry.get(target).is_some_and(|t| {
        matches!(
            t.kind(),
            ArchKind::Entity | ArchKind::ValueObject | ArchKind::Identifier
        )
    })
}

fn is_out_of_scope(ty: &ArchType) -> bool {
    matches!(
        ty,
        ArchType::Unclassified(u) if u.category == UnclassifiedCategory::OutOfScope
    )
}
