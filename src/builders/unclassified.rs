//! Categorization and construction of residual types.
//!
//! The category rules form a strict priority chain; first match wins,
//! and the ordering is load-bearing: a conflicting utility class reports
//! `Conflicting`, a test-package utility reports `OutOfScope`, and only a
//! production-package utility reports `Utility`.

use crate::arch::kinds::UnclassifiedCategory;
use crate::arch::types::{TypeId, UnclassifiedType};
use crate::builders::context::BuildContext;
use crate::builders::{structure, trace};
use crate::config::ModelConfig;
use crate::core::errors::Result;
use crate::graph::model::TypeNode;
use crate::verdict::{Verdict, VerdictStatus};

type CategoryRule = (
    UnclassifiedCategory,
    fn(&TypeNode, &Verdict, &ModelConfig) -> bool,
);

/// Priority-ordered rules; evaluation short-circuits on the first match
const RULES: [CategoryRule; 5] = [
    (UnclassifiedCategory::Conflicting, is_conflicting),
    (UnclassifiedCategory::OutOfScope, is_out_of_scope),
    (UnclassifiedCategory::Utility, is_utility),
    (UnclassifiedCategory::Technical, is_technical),
    (UnclassifiedCategory::Ambiguous, is_ambiguous),
];

/// Assigns the reason category for a residual type
pub fn detect_category(
    type_node: &TypeNode,
    verdict: &Verdict,
    config: &ModelConfig,
) -> UnclassifiedCategory {
    RULES
        .iter()
        .find(|(_, rule)| rule(type_node, verdict, config))
        .map(|(category, _)| *category)
        .unwrap_or(UnclassifiedCategory::Unknown)
}

/// Builds the unclassified model object
pub fn build_unclassified(
    type_node: &TypeNode,
    verdict: &Verdict,
    ctx: &BuildContext,
) -> Result<UnclassifiedType> {
    let structure = structure::build_structure(type_node, ctx);
    let trace = trace::convert(verdict)?;
    let category = detect_category(type_node, verdict, ctx.config());

    Ok(UnclassifiedType {
        id: TypeId::of(type_node.qualified_name.clone()),
        structure,
        trace,
        category,
    })
}

fn is_conflicting(_type_node: &TypeNode, verdict: &Verdict, _config: &ModelConfig) -> bool {
    verdict.status == VerdictStatus::Conflict
}

fn is_out_of_scope(type_node: &TypeNode, _verdict: &Verdict, config: &ModelConfig) -> bool {
    type_node
        .package_segments()
        .any(|segment| config.test_package_segments.iter().any(|s| s == segment))
}

fn is_utility(type_node: &TypeNode, _verdict: &Verdict, config: &ModelConfig) -> bool {
    config
        .utility_suffixes
        .iter()
        .any(|suffix| type_node.simple_name.ends_with(suffix.as_str()))
}

fn is_technical(type_node: &TypeNode, _verdict: &Verdict, config: &ModelConfig) -> bool {
    type_node
        .annotations
        .iter()
        .any(|a| config.is_framework_annotation(&a.qualified_name))
}

fn is_ambiguous(_type_node: &TypeNode, verdict: &Verdict, _config: &ModelConfig) -> bool {
    !verdict.evidence.is_empty() && verdict.status != VerdictStatus::Classified
}
