//! Derived views over a finished registry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::arch::kinds::{ArchKind, DrivenPortKind};
use crate::arch::registry::TypeRegistry;
use crate::arch::types::{ArchType, TypeId};

/// Domain-side view: aggregates grouped by bounded-context heuristic,
/// plus the plain kind buckets.
///
/// The bounded context of an aggregate is approximated by the last
/// segment of its package (`com.shop.order.Order` → `order`); aggregates
/// in the default package land in the root context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainIndex {
    pub aggregates_by_context: BTreeMap<String, Vec<TypeId>>,
    pub entities: Vec<TypeId>,
    pub value_objects: Vec<TypeId>,
    pub identifiers: Vec<TypeId>,
    pub events: Vec<TypeId>,
    pub services: Vec<TypeId>,
}

impl DomainIndex {
    pub fn from_registry(registry: &TypeRegistry) -> Self {
        let mut index = DomainIndex::default();
        for ty in registry.all() {
            match ty.kind() {
                ArchKind::AggregateRoot => {
                    index
                        .aggregates_by_context
                        .entry(bounded_context_of(ty.id()))
                        .or_default()
                        .push(ty.id().clone());
                }
                ArchKind::Entity => index.entities.push(ty.id().clone()),
                ArchKind::ValueObject => index.value_objects.push(ty.id().clone()),
                ArchKind::Identifier => index.identifiers.push(ty.id().clone()),
                ArchKind::DomainEvent => index.events.push(ty.id().clone()),
                ArchKind::DomainService => index.services.push(ty.id().clone()),
                _ => {}
            }
        }
        index
    }

    pub fn contexts(&self) -> impl Iterator<Item = &str> {
        self.aggregates_by_context.keys().map(String::as_str)
    }
}

/// Port-side view: ports split by direction and driven-port subtype
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortIndex {
    pub driving: Vec<TypeId>,
    pub driven: Vec<TypeId>,
    pub driven_by_kind: BTreeMap<DrivenPortKind, Vec<TypeId>>,
}

impl PortIndex {
    pub fn from_registry(registry: &TypeRegistry) -> Self {
        let mut index = PortIndex::default();
        for ty in registry.all() {
            match ty {
                ArchType::DrivingPort(port) => index.driving.push(port.id.clone()),
                ArchType::DrivenPort(port) => {
                    index.driven.push(port.id.clone());
                    index
                        .driven_by_kind
                        .entry(port.port_kind)
                        .or_default()
                        .push(port.id.clone());
                }
                _ => {}
            }
        }
        index
    }

    pub fn repositories(&self) -> &[TypeId] {
        self.driven_by_kind
            .get(&DrivenPortKind::Repository)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn gateways(&self) -> &[TypeId] {
        self.driven_by_kind
            .get(&DrivenPortKind::Gateway)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Last package segment, or the root marker for the default package
fn bounded_context_of(id: &TypeId) -> String {
    let package = id.package();
    package
        .rsplit('.')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("(root)")
        .to_string()
}
