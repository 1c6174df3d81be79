//! Immutable per-build context threaded through every builder.
//!
//! The context gives builders read access to the code graph, the verdict
//! set and the configuration, plus the map of already-built model objects.
//! Adding a built object returns a *new* context backed by a structurally
//! shared `im::HashMap`; the original is never touched, so any builder
//! holding an older snapshot keeps a consistent view.

use im::HashMap;
use std::sync::Arc;

use crate::arch::kinds::ArchKind;
use crate::arch::types::ArchType;
use crate::config::ModelConfig;
use crate::graph::query::GraphQuery;
use crate::verdict::{Verdict, VerdictSet};

#[derive(Clone)]
pub struct BuildContext<'a> {
    graph: &'a dyn GraphQuery,
    verdicts: &'a VerdictSet,
    config: &'a ModelConfig,
    built: HashMap<String, Arc<ArchType>>,
}

impl<'a> BuildContext<'a> {
    pub fn new(
        graph: &'a dyn GraphQuery,
        verdicts: &'a VerdictSet,
        config: &'a ModelConfig,
    ) -> Self {
        BuildContext {
            graph,
            verdicts,
            config,
            built: HashMap::new(),
        }
    }

    pub fn graph(&self) -> &dyn GraphQuery {
        self.graph
    }

    pub fn verdicts(&self) -> &VerdictSet {
        self.verdicts
    }

    pub fn config(&self) -> &ModelConfig {
        self.config
    }

    /// Verdict of a type, looked up by qualified name
    pub fn verdict_for(&self, qualified_name: &str) -> Option<&Verdict> {
        self.verdicts.for_type_name(qualified_name)
    }

    /// Already-built model object for a qualified name
    pub fn built(&self, qualified_name: &str) -> Option<&ArchType> {
        self.built.get(qualified_name).map(Arc::as_ref)
    }

    /// Map of everything built so far in this pass
    pub fn built_types(&self) -> &HashMap<String, Arc<ArchType>> {
        &self.built
    }

    /// Returns a new context with one more built object.
    ///
    /// Append-only: within one pass no entry is ever overwritten, which
    /// the debug assertion guards.
    pub fn with_built(&self, qualified_name: impl Into<String>, ty: ArchType) -> Self {
        let key = qualified_name.into();
        debug_assert!(
            !self.built.contains_key(&key),
            "context entry '{key}' built twice in one pass"
        );
        BuildContext {
            graph: self.graph,
            verdicts: self.verdicts,
            config: self.config,
            built: self.built.update(key, Arc::new(ty)),
        }
    }

    /// True if the verdict set classifies the named type as the given kind
    pub fn is_classified_as(&self, qualified_name: &str, kind: ArchKind) -> bool {
        self.verdict_for(qualified_name)
            .filter(|v| v.is_classified())
            .and_then(|v| v.kind_label())
            .and_then(ArchKind::from_label)
            .map(|k| k == kind)
            .unwrap_or(false)
    }

    /// True if the named type classifies as any port kind
    pub fn is_port(&self, qualified_name: &str) -> bool {
        self.is_classified_as(qualified_name, ArchKind::DrivingPort)
            || self.is_classified_as(qualified_name, ArchKind::DrivenPort)
    }
}
