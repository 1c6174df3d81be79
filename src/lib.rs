//! Archmap turns a language-derived code graph plus externally-computed
//! classification verdicts into a typed architectural model: aggregates,
//! entities, value objects, identifiers, domain events, services, ports
//! and a reasoned unclassified bucket, together with a classification
//! report, domain/port indexes and a derived relationship graph.
//!
//! The front end producing the code graph and the engine producing the
//! verdicts are external collaborators; this crate consumes both through
//! read-only interfaces and exposes only finished, immutable products.
//!
//! ```
//! use archmap::builders::ModelBuilder;
//! use archmap::testing::{ty, GraphFixture, TypeSketch};
//! use archmap::verdict::Confidence;
//!
//! let (graph, verdicts) = GraphFixture::new()
//!     .with(TypeSketch::class("com.shop.Order")
//!         .annotated_field("id", ty("java.util.UUID"), "jakarta.persistence.Id"))
//!     .classify("com.shop.Order", "AGGREGATE_ROOT", Confidence::High)
//!     .build();
//!
//! let model = ModelBuilder::new().build(&graph, &verdicts).unwrap();
//! assert_eq!(model.size(), 1);
//! ```

pub mod arch;
pub mod builders;
pub mod config;
pub mod core;
pub mod graph;
pub mod testing;
pub mod verdict;

// Re-export commonly used types
pub use crate::arch::{
    ArchKind, ArchType, ArchitecturalModel, ClassificationReport, ClassificationTrace,
    DomainIndex, DrivenPortKind, FieldRole, MethodRole, PortIndex, RelationKind, Relationship,
    RelationshipGraph, TypeId, TypeRegistry, UnclassifiedCategory,
};
pub use crate::builders::{BuildContext, ModelBuilder};
pub use crate::config::ModelConfig;
pub use crate::core::errors::{Error, Result, ResultExt};
pub use crate::graph::{CodeGraph, GraphQuery};
pub use crate::verdict::{Confidence, Verdict, VerdictSet, VerdictStatus};
