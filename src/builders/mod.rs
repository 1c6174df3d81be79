//! Model construction pipeline: role detectors, structure assembly,
//! per-kind builders, orchestration and relationship derivation.

pub mod application;
pub mod context;
pub mod domain;
pub mod field_roles;
pub mod method_roles;
pub mod model;
pub mod ports;
pub mod relationships;
pub mod structure;
pub mod trace;
pub mod unclassified;

pub use context::BuildContext;
pub use model::ModelBuilder;
