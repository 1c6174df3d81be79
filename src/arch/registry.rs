//! Keyed, deduplicated registry of all built model objects.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::arch::kinds::ArchKind;
use crate::arch::types::{AggregateRoot, ArchType, DrivenPort, TypeId, UnclassifiedType};

/// Read-only product of one build pass, keyed by qualified type name.
///
/// Iteration order is deterministic (name order), independent of the
/// order types were built in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeRegistry {
    types: BTreeMap<TypeId, ArchType>,
}

impl TypeRegistry {
    /// Builds a registry from finished model objects. Later duplicates of
    /// the same id are ignored; within one pass every id is built once.
    pub fn from_types(types: impl IntoIterator<Item = ArchType>) -> Self {
        let mut map = BTreeMap::new();
        for ty in types {
            map.entry(ty.id().clone()).or_insert(ty);
        }
        TypeRegistry { types: map }
    }

    pub fn get(&self, id: &TypeId) -> Option<&ArchType> {
        self.types.get(id)
    }

    pub fn get_by_name(&self, qualified_name: &str) -> Option<&ArchType> {
        self.types.get(&TypeId::of(qualified_name))
    }

    pub fn contains(&self, id: &TypeId) -> bool {
        self.types.contains_key(id)
    }

    /// All model objects, in name order
    pub fn all(&self) -> impl Iterator<Item = &ArchType> {
        self.types.values()
    }

    /// All model objects of one kind, in name order
    pub fn of_kind(&self, kind: ArchKind) -> impl Iterator<Item = &ArchType> {
        self.types.values().filter(move |t| t.kind() == kind)
    }

    pub fn aggregates(&self) -> impl Iterator<Item = &AggregateRoot> {
        self.types.values().filter_map(ArchType::as_aggregate)
    }

    pub fn driven_ports(&self) -> impl Iterator<Item = &DrivenPort> {
        self.types.values().filter_map(ArchType::as_driven_port)
    }

    pub fn unclassified(&self) -> impl Iterator<Item = &UnclassifiedType> {
        self.types.values().filter_map(ArchType::as_unclassified)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::kinds::TypeNature;
    use crate::arch::structure::TypeStructure;
    use crate::arch::trace::ClassificationTrace;
    use crate::arch::types::DrivingPort;
    use crate::verdict::Confidence;

    fn driving_port(name: &str) -> ArchType {
        ArchType::DrivingPort(DrivingPort {
            id: TypeId::of(name),
            structure: TypeStructure {
                nature: TypeNature::Interface,
                modifiers: Default::default(),
                super_class: None,
                interfaces: Vec::new(),
                annotations: Vec::new(),
                fields: Vec::new(),
                methods: Vec::new(),
                constructors: Vec::new(),
            },
            trace: ClassificationTrace {
                kind: ArchKind::DrivingPort,
                label: Some("DRIVING_PORT".to_string()),
                confidence: Confidence::High,
                declared_confidence: Confidence::High,
                criterion: None,
                justification: String::new(),
                evidence: Vec::new(),
                conflicts: Vec::new(),
            },
        })
    }

    #[test]
    fn test_registry_deduplicates_and_orders() {
        let registry = TypeRegistry::from_types(vec![
            driving_port("com.example.b.PlaceOrder"),
            driving_port("com.example.a.CancelOrder"),
            driving_port("com.example.b.PlaceOrder"),
        ]);
        assert_eq!(registry.len(), 2);
        let names: Vec<_> = registry.all().map(|t| t.simple_name()).collect();
        assert_eq!(names, vec!["CancelOrder", "PlaceOrder"]);
    }

    #[test]
    fn test_query_by_kind_and_name() {
        let registry = TypeRegistry::from_types(vec![driving_port("com.example.PlaceOrder")]);
        assert!(registry.get_by_name("com.example.PlaceOrder").is_some());
        assert_eq!(registry.of_kind(ArchKind::DrivingPort).count(), 1);
        assert_eq!(registry.of_kind(ArchKind::DrivenPort).count(), 0);
    }
}
