//! Closed enumerations of the architectural vocabulary.
//!
//! The classification engine speaks in free-form labels; everything inside
//! the model speaks in these closed sets. `ArchKind::from_label` is the
//! single place a label is interpreted; unmapped labels come back as
//! `None` so callers can surface them instead of silently defaulting.

use serde::{Deserialize, Serialize};

/// Architectural role a type can be classified into
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ArchKind {
    AggregateRoot,
    Entity,
    ValueObject,
    Identifier,
    DomainEvent,
    DomainService,
    Application,
    DrivingPort,
    DrivenPort,
    Unclassified,
}

impl ArchKind {
    /// Maps a free-form engine label onto the closed kind set.
    ///
    /// Returns `None` for labels the model does not know, so the caller
    /// can treat them as a detectable unknown-kind case.
    pub fn from_label(label: &str) -> Option<ArchKind> {
        match label {
            "AGGREGATE_ROOT" => Some(ArchKind::AggregateRoot),
            "ENTITY" => Some(ArchKind::Entity),
            "VALUE_OBJECT" => Some(ArchKind::ValueObject),
            "IDENTIFIER" => Some(ArchKind::Identifier),
            "DOMAIN_EVENT" | "EXTERNALIZED_EVENT" => Some(ArchKind::DomainEvent),
            "DOMAIN_SERVICE" => Some(ArchKind::DomainService),
            "APPLICATION_SERVICE" | "COMMAND_HANDLER" | "QUERY_HANDLER" | "SAGA"
            | "INBOUND_ONLY" | "OUTBOUND_ONLY" => Some(ArchKind::Application),
            "DRIVING_PORT" | "USE_CASE" => Some(ArchKind::DrivingPort),
            "DRIVEN_PORT" | "REPOSITORY" | "GATEWAY" | "EVENT_PUBLISHER" | "NOTIFICATION"
            | "GENERIC" => Some(ArchKind::DrivenPort),
            "UNCLASSIFIED" => Some(ArchKind::Unclassified),
            _ => None,
        }
    }

    /// Get display name for this kind
    pub fn display_name(&self) -> &str {
        match self {
            ArchKind::AggregateRoot => "Aggregate Root",
            ArchKind::Entity => "Entity",
            ArchKind::ValueObject => "Value Object",
            ArchKind::Identifier => "Identifier",
            ArchKind::DomainEvent => "Domain Event",
            ArchKind::DomainService => "Domain Service",
            ArchKind::Application => "Application Type",
            ArchKind::DrivingPort => "Driving Port",
            ArchKind::DrivenPort => "Driven Port",
            ArchKind::Unclassified => "Unclassified",
        }
    }

    pub fn is_port(&self) -> bool {
        matches!(self, ArchKind::DrivingPort | ArchKind::DrivenPort)
    }
}

/// Subtype of a driven port
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DrivenPortKind {
    Repository,
    Gateway,
    EventPublisher,
    Notification,
    Other,
}

impl DrivenPortKind {
    /// Maps an engine label to the closed subtype set; unmapped labels
    /// default to `Other`.
    pub fn from_label(label: &str) -> DrivenPortKind {
        match label {
            "REPOSITORY" => DrivenPortKind::Repository,
            "GATEWAY" => DrivenPortKind::Gateway,
            "EVENT_PUBLISHER" => DrivenPortKind::EventPublisher,
            "NOTIFICATION" => DrivenPortKind::Notification,
            _ => DrivenPortKind::Other,
        }
    }
}

/// Discriminator for the application-layer family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationKind {
    ApplicationService,
    CommandHandler,
    QueryHandler,
}

impl ApplicationKind {
    /// Maps an engine label to the discriminator; service-flavored labels
    /// collapse onto `ApplicationService`.
    pub fn from_label(label: &str) -> ApplicationKind {
        match label {
            "COMMAND_HANDLER" => ApplicationKind::CommandHandler,
            "QUERY_HANDLER" => ApplicationKind::QueryHandler,
            _ => ApplicationKind::ApplicationService,
        }
    }
}

/// Structural nature of a type in the architectural model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeNature {
    Class,
    Interface,
    Record,
    Enum,
    Annotation,
}

/// Semantic roles a field can play
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum FieldRole {
    Identity,
    Collection,
    AggregateReference,
    Embedded,
    Audit,
    Technical,
}

/// Semantic roles a method can play
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum MethodRole {
    Getter,
    Setter,
    Factory,
    ObjectMethod,
    Lifecycle,
    Validation,
    Command,
    Query,
    Business,
}

/// Reason bucket for types that did not classify
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum UnclassifiedCategory {
    /// Competing classifications need resolution
    Conflicting,
    /// Test/mock/stub code, intentionally outside the model
    OutOfScope,
    /// Utility holder (Utils/Helper/Constants naming)
    Utility,
    /// Framework infrastructure (component/configuration markers)
    Technical,
    /// Some signal existed but was insufficient
    Ambiguous,
    /// Nothing matched at all
    Unknown,
}
