//! The architectural model's type objects.
//!
//! `ArchType` is the sum of everything the build pipeline can produce for
//! one source type. Every variant carries the same backbone (identity,
//! structural snapshot, classification trace) plus the payload specific
//! to its kind.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::arch::kinds::{
    ApplicationKind, ArchKind, DrivenPortKind, UnclassifiedCategory,
};
use crate::arch::structure::{Field, TypeStructure};
use crate::arch::trace::ClassificationTrace;
use crate::graph::model::TypeRef;

/// Identity of a model object: the qualified name of the source type
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TypeId(String);

impl TypeId {
    pub fn of(qualified_name: impl Into<String>) -> Self {
        TypeId(qualified_name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last dot-separated segment of the qualified name
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Everything before the last dot (empty for the default package)
    pub fn package(&self) -> &str {
        match self.0.rfind('.') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&TypeRef> for TypeId {
    fn from(ty: &TypeRef) -> Self {
        TypeId::of(ty.qualified_name.clone())
    }
}

/// A business rule detected on an aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invariant {
    pub name: String,
    pub description: String,
}

impl Invariant {
    pub fn of(name: impl Into<String>, description: impl Into<String>) -> Self {
        Invariant {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Consistency boundary owner with a mandatory identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRoot {
    pub id: TypeId,
    pub structure: TypeStructure,
    pub trace: ClassificationTrace,
    pub identity_field: Field,
    /// The identity field's type, unwrapped when it is a wrapper identifier
    pub effective_identity_type: TypeRef,
    /// Entities inside the aggregate boundary
    pub entities: Vec<TypeRef>,
    /// Embedded value objects and identifiers
    pub value_objects: Vec<TypeRef>,
    /// Domain events this aggregate can emit
    pub domain_events: Vec<TypeRef>,
    /// The driven port managing this aggregate, when one was found
    pub driven_port: Option<TypeRef>,
    pub invariants: Vec<Invariant>,
}

impl AggregateRoot {
    pub fn has_invariants(&self) -> bool {
        !self.invariants.is_empty()
    }
}

/// Domain object with identity, living inside an aggregate boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: TypeId,
    pub structure: TypeStructure,
    pub trace: ClassificationTrace,
    pub identity_field: Option<Field>,
}

impl Entity {
    pub fn has_identity(&self) -> bool {
        self.identity_field.is_some()
    }
}

/// Immutable domain value compared by its attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueObject {
    pub id: TypeId,
    pub structure: TypeStructure,
    pub trace: ClassificationTrace,
    /// The single structural field, when there is exactly one
    pub wrapped_field: Option<Field>,
}

impl ValueObject {
    pub fn is_single_value(&self) -> bool {
        self.wrapped_field.is_some()
    }

    pub fn wrapped_field(&self) -> Option<&Field> {
        self.wrapped_field.as_ref()
    }
}

/// Strongly-typed wrapper around a primitive or value identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub id: TypeId,
    pub structure: TypeStructure,
    pub trace: ClassificationTrace,
    /// Type of the first declared field; absent for field-less identifiers
    pub wrapped_type: Option<TypeRef>,
}

/// Something that happened in the domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEvent {
    pub id: TypeId,
    pub structure: TypeStructure,
    pub trace: ClassificationTrace,
    /// Field carrying the id of the aggregate the event concerns
    pub aggregate_id_field: Option<Field>,
    /// Field carrying the occurrence timestamp
    pub timestamp_field: Option<Field>,
    /// The aggregate this event originates from, when inferable
    pub source_aggregate: Option<TypeRef>,
}

/// Stateless domain operation spanning multiple aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainService {
    pub id: TypeId,
    pub structure: TypeStructure,
    pub trace: ClassificationTrace,
    /// Ports this service receives through constructor or field injection
    pub injected_ports: Vec<TypeRef>,
}

/// Application-layer orchestration type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationType {
    pub id: TypeId,
    pub structure: TypeStructure,
    pub trace: ClassificationTrace,
    pub kind: ApplicationKind,
}

impl ApplicationType {
    pub fn is_command_handler(&self) -> bool {
        self.kind == ApplicationKind::CommandHandler
    }

    pub fn is_query_handler(&self) -> bool {
        self.kind == ApplicationKind::QueryHandler
    }
}

/// Use-case boundary offered by the application core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrivingPort {
    pub id: TypeId,
    pub structure: TypeStructure,
    pub trace: ClassificationTrace,
}

/// Dependency of the core on the outside world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrivenPort {
    pub id: TypeId,
    pub structure: TypeStructure,
    pub trace: ClassificationTrace,
    pub port_kind: DrivenPortKind,
    /// The aggregate this port persists, for repository-like ports
    pub managed_aggregate: Option<TypeRef>,
}

impl DrivenPort {
    pub fn port_type(&self) -> DrivenPortKind {
        self.port_kind
    }

    pub fn is_repository(&self) -> bool {
        self.port_kind == DrivenPortKind::Repository
    }

    pub fn is_gateway(&self) -> bool {
        self.port_kind == DrivenPortKind::Gateway
    }

    pub fn has_aggregate(&self) -> bool {
        self.managed_aggregate.is_some()
    }
}

/// Residual type with a reasoned category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnclassifiedType {
    pub id: TypeId,
    pub structure: TypeStructure,
    pub trace: ClassificationTrace,
    pub category: UnclassifiedCategory,
}

impl UnclassifiedType {
    pub fn simple_name(&self) -> &str {
        self.id.simple_name()
    }
}

/// Sum of every object the model construction pipeline can produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArchType {
    Aggregate(AggregateRoot),
    Entity(Entity),
    Value(ValueObject),
    Identifier(Identifier),
    Event(DomainEvent),
    Service(DomainService),
    Application(ApplicationType),
    DrivingPort(DrivingPort),
    DrivenPort(DrivenPort),
    Unclassified(UnclassifiedType),
}

impl ArchType {
    pub fn id(&self) -> &TypeId {
        match self {
            ArchType::Aggregate(t) => &t.id,
            ArchType::Entity(t) => &t.id,
            ArchType::Value(t) => &t.id,
            ArchType::Identifier(t) => &t.id,
            ArchType::Event(t) => &t.id,
            ArchType::Service(t) => &t.id,
            ArchType::Application(t) => &t.id,
            ArchType::DrivingPort(t) => &t.id,
            ArchType::DrivenPort(t) => &t.id,
            ArchType::Unclassified(t) => &t.id,
        }
    }

    pub fn kind(&self) -> ArchKind {
        match self {
            ArchType::Aggregate(_) => ArchKind::AggregateRoot,
            ArchType::Entity(_) => ArchKind::Entity,
            ArchType::Value(_) => ArchKind::ValueObject,
            ArchType::Identifier(_) => ArchKind::Identifier,
            ArchType::Event(_) => ArchKind::DomainEvent,
            ArchType::Service(_) => ArchKind::DomainService,
            ArchType::Application(_) => ArchKind::Application,
            ArchType::DrivingPort(_) => ArchKind::DrivingPort,
            ArchType::DrivenPort(_) => ArchKind::DrivenPort,
            ArchType::Unclassified(_) => ArchKind::Unclassified,
        }
    }

    pub fn structure(&self) -> &TypeStructure {
        match self {
            ArchType::Aggregate(t) => &t.structure,
            ArchType::Entity(t) => &t.structure,
            ArchType::Value(t) => &t.structure,
            ArchType::Identifier(t) => &t.structure,
            ArchType::Event(t) => &t.structure,
            ArchType::Service(t) => &t.structure,
            ArchType::Application(t) => &t.structure,
            ArchType::DrivingPort(t) => &t.structure,
            ArchType::DrivenPort(t) => &t.structure,
            ArchType::Unclassified(t) => &t.structure,
        }
    }

    pub fn trace(&self) -> &ClassificationTrace {
        match self {
            ArchType::Aggregate(t) => &t.trace,
            ArchType::Entity(t) => &t.trace,
            ArchType::Value(t) => &t.trace,
            ArchType::Identifier(t) => &t.trace,
            ArchType::Event(t) => &t.trace,
            ArchType::Service(t) => &t.trace,
            ArchType::Application(t) => &t.trace,
            ArchType::DrivingPort(t) => &t.trace,
            ArchType::DrivenPort(t) => &t.trace,
            ArchType::Unclassified(t) => &t.trace,
        }
    }

    pub fn qualified_name(&self) -> &str {
        self.id().as_str()
    }

    pub fn simple_name(&self) -> &str {
        self.id().simple_name()
    }

    pub fn as_aggregate(&self) -> Option<&AggregateRoot> {
        match self {
            ArchType::Aggregate(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_driven_port(&self) -> Option<&DrivenPort> {
        match self {
            ArchType::DrivenPort(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_unclassified(&self) -> Option<&UnclassifiedType> {
        match self {
            ArchType::Unclassified(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_id_segments() {
        let id = TypeId::of("com.example.order.Order");
        assert_eq!(id.simple_name(), "Order");
        assert_eq!(id.package(), "com.example.order");

        let bare = TypeId::of("Order");
        assert_eq!(bare.simple_name(), "Order");
        assert_eq!(bare.package(), "");
    }

    #[test]
    fn test_driven_port_kind_accessors() {
        use crate::arch::kinds::DrivenPortKind;
        let port = DrivenPort {
            id: TypeId::of("com.example.OrderRepository"),
            structure: empty_structure(),
            trace: unclassified_trace(),
            port_kind: DrivenPortKind::Repository,
            managed_aggregate: None,
        };
        assert!(port.is_repository());
        assert!(!port.is_gateway());
        assert!(!port.has_aggregate());
    }

    fn empty_structure() -> TypeStructure {
        TypeStructure {
            nature: crate::arch::kinds::TypeNature::Interface,
            modifiers: Default::default(),
            super_class: None,
            interfaces: Vec::new(),
            annotations: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
        }
    }

    fn unclassified_trace() -> ClassificationTrace {
        ClassificationTrace {
            kind: ArchKind::DrivenPort,
            label: Some("REPOSITORY".to_string()),
            confidence: crate::verdict::Confidence::High,
            declared_confidence: crate::verdict::Confidence::High,
            criterion: None,
            justification: String::new(),
            evidence: Vec::new(),
            conflicts: Vec::new(),
        }
    }
}
