//! The architectural model: typed objects, registry, report, indexes and
//! the derived relationship graph.

pub mod graph;
pub mod index;
pub mod kinds;
pub mod registry;
pub mod report;
pub mod structure;
pub mod trace;
pub mod types;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use graph::{RelationKind, Relationship, RelationshipGraph};
pub use index::{DomainIndex, PortIndex};
pub use kinds::{
    ApplicationKind, ArchKind, DrivenPortKind, FieldRole, MethodRole, TypeNature,
    UnclassifiedCategory,
};
pub use registry::TypeRegistry;
pub use report::{ClassificationConflict, ClassificationReport, ClassificationStats, Remediation};
pub use structure::{Constructor, Field, Method, TypeStructure};
pub use trace::ClassificationTrace;
pub use types::{
    AggregateRoot, ApplicationType, ArchType, DomainEvent, DomainService, DrivenPort,
    DrivingPort, Entity, Identifier, Invariant, TypeId, UnclassifiedType, ValueObject,
};

/// Everything one build pass produces.
///
/// The registry, report, indexes and relationship graph are read-only
/// products; downstream consumers (report generators, diagram builders,
/// code generators) work exclusively against this surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitecturalModel {
    pub registry: TypeRegistry,
    pub report: ClassificationReport,
    pub domain_index: DomainIndex,
    pub port_index: PortIndex,
    pub relationships: RelationshipGraph,
    pub generated_at: DateTime<Utc>,
}

impl ArchitecturalModel {
    /// Total number of types in the model
    pub fn size(&self) -> usize {
        self.registry.len()
    }

    /// True if the report recorded unclassified types or conflicts
    pub fn has_issues(&self) -> bool {
        self.report.has_issues()
    }

    /// Serializes the whole model for downstream consumers
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
