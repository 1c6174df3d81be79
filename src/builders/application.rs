//! Builder for the application-layer family.

use crate::arch::kinds::ApplicationKind;
use crate::arch::types::{ApplicationType, TypeId};
use crate::builders::context::BuildContext;
use crate::builders::{structure, trace};
use crate::core::errors::Result;
use crate::graph::model::TypeNode;
use crate::verdict::Verdict;

/// Builds an application type, discriminating service, command handler
/// and query handler from the verdict's kind label
pub fn build_application(
    type_node: &TypeNode,
    verdict: &Verdict,
    ctx: &BuildContext,
) -> Result<ApplicationType> {
    let structure = structure::build_structure(type_node, ctx);
    let trace = trace::convert(verdict)?;

    let kind = verdict
        .kind_label()
        .map(ApplicationKind::from_label)
        .unwrap_or(ApplicationKind::ApplicationService);

    Ok(ApplicationType {
        id: TypeId::of(type_node.qualified_name.clone()),
        structure,
        trace,
        kind,
    })
}
