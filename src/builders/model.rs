//! Build orchestrator: routes every classified type node to its builder,
//! threads the accumulating context, and assembles the report and indexes.

use chrono::Utc;
use log::{debug, warn};
use std::collections::BTreeMap;

use crate::arch::index::{DomainIndex, PortIndex};
use crate::arch::kinds::{ArchKind, UnclassifiedCategory};
use crate::arch::registry::TypeRegistry;
use crate::arch::report::{
    ClassificationConflict, ClassificationReport, ClassificationStats, Remediation,
};
use crate::arch::types::{ArchType, TypeId};
use crate::arch::ArchitecturalModel;
use crate::builders::context::BuildContext;
use crate::builders::{application, domain, ports, relationships, unclassified};
use crate::config::ModelConfig;
use crate::core::errors::{Error, Result, ResultExt};
use crate::graph::model::TypeNode;
use crate::graph::query::GraphQuery;
use crate::verdict::{Verdict, VerdictSet, VerdictStatus};

/// Orchestrates one model construction pass.
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    config: ModelConfig,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ModelConfig) -> Self {
        ModelBuilder { config }
    }

    /// Builds the full architectural model.
    ///
    /// Types present in the graph but absent from the verdict set are
    /// silently skipped; no fallback entry is synthesized for them.
    /// Soft failures (unclassified/conflict verdicts) become unclassified
    /// model objects; invariant violations propagate and abort the build.
    pub fn build(
        &self,
        graph: &dyn GraphQuery,
        verdicts: &VerdictSet,
    ) -> Result<ArchitecturalModel> {
        let mut ctx = BuildContext::new(graph, verdicts, &self.config);
        let mut built: Vec<ArchType> = Vec::new();

        for node in graph.types() {
            let Some(verdict) = verdicts.get(&node.id) else {
                debug!(
                    "skipping '{}': not present in the verdict set",
                    node.qualified_name
                );
                continue;
            };

            let arch = self
                .build_arch_type(node, verdict, &ctx)
                .context(format!("building '{}'", node.qualified_name))?;
            // Thread the accumulating context so later builds can see
            // earlier results
            ctx = ctx.with_built(node.qualified_name.clone(), arch.clone());
            built.push(arch);
        }

        let generated_at = Utc::now();
        let registry = TypeRegistry::from_types(built);
        let report = build_report(&registry, verdicts, generated_at);
        let domain_index = DomainIndex::from_registry(&registry);
        let port_index = PortIndex::from_registry(&registry);
        let relationships = relationships::build(&registry);

        debug!(
            "model built: {} types, {} relationships, {} unclassified",
            registry.len(),
            relationships.len(),
            report.stats.unclassified
        );

        Ok(ArchitecturalModel {
            registry,
            report,
            domain_index,
            port_index,
            relationships,
            generated_at,
        })
    }

    /// Builds a single type directly, outside a full pass.
    ///
    /// Unlike [`Self::build`], absence of the type or its verdict is an
    /// error here; the caller asked for this specific type.
    pub fn build_type(
        &self,
        graph: &dyn GraphQuery,
        verdicts: &VerdictSet,
        qualified_name: &str,
    ) -> Result<ArchType> {
        let node = graph
            .type_by_name(qualified_name)
            .ok_or_else(|| Error::UnknownType {
                name: qualified_name.to_string(),
            })?;
        let verdict = verdicts
            .get(&node.id)
            .ok_or_else(|| Error::MissingVerdict {
                name: qualified_name.to_string(),
            })?;
        let ctx = BuildContext::new(graph, verdicts, &self.config);
        self.build_arch_type(node, verdict, &ctx)
    }

    /// Fixed dispatch table from routed kind to builder.
    ///
    /// Soft outcomes (unclassified/conflict verdicts, unknown labels) go
    /// to the unclassified builder; an aggregate without identity is NOT
    /// caught here; that failure is a real defect in the analyzed model
    /// and aborts the build.
    fn build_arch_type(
        &self,
        node: &TypeNode,
        verdict: &Verdict,
        ctx: &BuildContext,
    ) -> Result<ArchType> {
        if !verdict.is_classified() {
            return unclassified::build_unclassified(node, verdict, ctx)
                .map(ArchType::Unclassified);
        }

        let label = verdict.kind_label().ok_or_else(|| Error::MissingKind {
            name: node.qualified_name.clone(),
        })?;

        match ArchKind::from_label(label) {
            Some(ArchKind::AggregateRoot) => {
                domain::build_aggregate(node, verdict, ctx).map(ArchType::Aggregate)
            }
            Some(ArchKind::Entity) => {
                domain::build_entity(node, verdict, ctx).map(ArchType::Entity)
            }
            Some(ArchKind::ValueObject) => {
                domain::build_value_object(node, verdict, ctx).map(ArchType::Value)
            }
            Some(ArchKind::Identifier) => {
                domain::build_identifier(node, verdict, ctx).map(ArchType::Identifier)
            }
            Some(ArchKind::DomainEvent) => {
                domain::build_domain_event(node, verdict, ctx).map(ArchType::Event)
            }
            Some(ArchKind::DomainService) => {
                domain::build_domain_service(node, verdict, ctx).map(ArchType::Service)
            }
            Some(ArchKind::Application) => {
                application::build_application(node, verdict, ctx).map(ArchType::Application)
            }
            Some(ArchKind::DrivingPort) => {
                ports::build_driving_port(node, verdict, ctx).map(ArchType::DrivingPort)
            }
            Some(ArchKind::DrivenPort) => {
                ports::build_driven_port(node, verdict, ctx).map(ArchType::DrivenPort)
            }
            Some(ArchKind::Unclassified) => {
                unclassified::build_unclassified(node, verdict, ctx).map(ArchType::Unclassified)
            }
            None => {
                warn!(
                    "unknown classification kind '{label}' for '{}', keeping as unclassified",
                    node.qualified_name
                );
                unclassified::build_unclassified(node, verdict, ctx).map(ArchType::Unclassified)
            }
        }
    }
}

fn build_report(
    registry: &TypeRegistry,
    verdicts: &VerdictSet,
    generated_at: chrono::DateTime<Utc>,
) -> ClassificationReport {
    let mut by_kind: BTreeMap<ArchKind, usize> = BTreeMap::new();
    let mut unclassified_by_category: BTreeMap<UnclassifiedCategory, Vec<TypeId>> =
        BTreeMap::new();
    let mut conflicts = Vec::new();
    let mut remediations = Vec::new();

    for ty in registry.all() {
        *by_kind.entry(ty.kind()).or_insert(0) += 1;

        if let ArchType::Unclassified(u) = ty {
            unclassified_by_category
                .entry(u.category)
                .or_default()
                .push(u.id.clone());
            remediations.push(Remediation {
                type_id: u.id.clone(),
                category: u.category,
                suggestion: suggestion_for(u.category).to_string(),
                evidence: u.trace.evidence.clone(),
            });
        }

        if let Some(verdict) = verdicts.for_type_name(ty.id().as_str()) {
            if verdict.status == VerdictStatus::Conflict {
                conflicts.push(ClassificationConflict {
                    type_id: ty.id().clone(),
                    contributions: verdict.conflicts.clone(),
                });
            }
        }
    }

    let unclassified_count = registry.unclassified().count();
    let stats = ClassificationStats {
        total_types: registry.len(),
        classified: registry.len() - unclassified_count,
        unclassified: unclassified_count,
        conflicts: conflicts.len(),
        by_kind,
    };

    ClassificationReport {
        stats,
        unclassified_by_category,
        conflicts,
        remediations,
        generated_at,
    }
}

fn suggestion_for(category: UnclassifiedCategory) -> &'static str {
    match category {
        UnclassifiedCategory::Conflicting => {
            "Resolve the competing classifications with an explicit architectural annotation"
        }
        UnclassifiedCategory::OutOfScope => {
            "Test or mock scaffolding; exclude the package from analysis if unintended"
        }
        UnclassifiedCategory::Utility => {
            "Utility holder; move domain logic into an explicit domain service if any exists"
        }
        UnclassifiedCategory::Technical => {
            "Framework infrastructure; annotate explicitly if it should join the model"
        }
        UnclassifiedCategory::Ambiguous => {
            "Signals were insufficient; add an explicit architectural annotation"
        }
        UnclassifiedCategory::Unknown => {
            "Add an explicit architectural annotation to classify this type"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::model::{AnnotationRef, FieldNode, NodeId, TypeForm, TypeRef};
    use crate::graph::query::CodeGraph;
    use crate::verdict::{Confidence, Criterion, Target};

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

    #[test]
    fn test_types_without_verdict_are_skipped() {
        let mut graph = CodeGraph::new();
        graph.add_type(TypeNode::new("com.example.Money", TypeForm::Record));
        graph.add_type(TypeNode::new("com.example.Orphan", TypeForm::Class));
        let verdicts: VerdictSet = [classified("com.example.Money", "VALUE_OBJECT")]
            .into_iter()
            .collect();

        let model = ModelBuilder::new().build(&graph, &verdicts).unwrap();

        assert_eq!(model.size(), 1);
        assert!(model.registry.get_by_name("com.example.Orphan").is_none());
    }

    #[test]
    fn test_unknown_kind_label_routes_to_unclassified() {
        let mut graph = CodeGraph::new();
        graph.add_type(TypeNode::new("com.example.Widget", TypeForm::Class));
        let verdicts: VerdictSet = [classified("com.example.Widget", "FROBNICATOR")]
            .into_iter()
            .collect();

        let model = ModelBuilder::new().build(&graph, &verdicts).unwrap();
        let widget = model.registry.get_by_name("com.example.Widget").unwrap();
        assert_eq!(widget.kind(), ArchKind::Unclassified);
    }

    #[test]
    fn test_aggregate_identity_violation_aborts_the_build() {
        let mut graph = CodeGraph::new();
        graph.add_type(TypeNode::new("com.example.Rogue", TypeForm::Class));
        let verdicts: VerdictSet = [classified("com.example.Rogue", "AGGREGATE_ROOT")]
            .into_iter()
            .collect();

        let err = ModelBuilder::new().build(&graph, &verdicts).unwrap_err();
        assert!(err.to_string().contains("identity field"));
    }

    #[test]
    fn test_build_type_errors_on_absences() {
        let graph = CodeGraph::new();
        let verdicts = VerdictSet::new();
        let builder = ModelBuilder::new();

        let err = builder
            .build_type(&graph, &verdicts, "com.example.Ghost")
            .unwrap_err();
        assert!(matches!(err, Error::UnknownType { .. }));

        let mut graph = CodeGraph::new();
        graph.add_type(TypeNode::new("com.example.Money", TypeForm::Record));
        let err = builder
            .build_type(&graph, &verdicts, "com.example.Money")
            .unwrap_err();
        assert!(matches!(err, Error::MissingVerdict { .. }));
    }

    #[test]
    fn test_report_counts_and_conflicts() {
        let mut graph = CodeGraph::new();
        graph.add_type(TypeNode::new("com.example.Order", TypeForm::Class));
        let mut id_field = FieldNode::new("id", TypeRef::named("java.util.UUID"));
        id_field
            .annotations
            .push(AnnotationRef::of("jakarta.persistence.Id"));
        graph.add_field("com.example.Order", id_field);
        graph.add_type(TypeNode::new("com.example.Torn", TypeForm::Class));

        let mut verdicts = VerdictSet::new();
        verdicts.insert(classified("com.example.Order", "AGGREGATE_ROOT"));
        verdicts.insert(Verdict::conflict(
            NodeId::of_type("com.example.Torn"),
            Target::Domain,
            vec![crate::verdict::VerdictConflict::new(
                "ENTITY",
                Confidence::Medium,
                "identity field",
            )],
        ));

        let model = ModelBuilder::new().build(&graph, &verdicts).unwrap();
        let report = &model.report;

        assert_eq!(report.stats.total_types, 2);
        assert_eq!(report.stats.classified, 1);
        assert_eq!(report.stats.unclassified, 1);
        assert_eq!(report.stats.conflicts, 1);
        assert_eq!(report.conflicts[0].type_id, TypeId::of("com.example.Torn"));
        assert_eq!(report.remediations.len(), 1);
        assert!(model.has_issues());
        assert_eq!(
            report.unclassified_by_category[&UnclassifiedCategory::Conflicting].len(),
            1
        );
    }

    #[test]
    fn test_empty_inputs_build_empty_model() {
        let graph = CodeGraph::new();
        let verdicts = VerdictSet::new();
        let model = ModelBuilder::new().build(&graph, &verdicts).unwrap();
        assert_eq!(model.size(), 0);
        assert!(!model.has_issues());
        assert!(model.relationships.is_empty());
    }
}
