//! Builders for driving and driven ports.

use crate::arch::kinds::DrivenPortKind;
use crate::arch::types::{ArchType, DrivenPort, DrivingPort, TypeId};
use crate::builders::context::BuildContext;
use crate::builders::{structure, trace};
use crate::core::errors::Result;
use crate::graph::model::{TypeNode, TypeRef};
use crate::verdict::Verdict;

/// Builds a driving port: structure and trace, nothing derived
pub fn build_driving_port(
    type_node: &TypeNode,
    verdict: &Verdict,
    ctx: &BuildContext,
) -> Result<DrivingPort> {
    let structure = structure::build_structure(type_node, ctx);
    let trace = trace::convert(verdict)?;

    Ok(DrivingPort {
        id: TypeId::of(type_node.qualified_name.clone()),
        structure,
        trace,
    })
}

/// Builds a driven port.
///
/// The kind label maps onto the closed subtype set; repository-like and
/// generic ports additionally look for the aggregate they manage among
/// their method return types. That lookup is best-effort against what the
/// accumulating context has built so far; build order is not guaranteed
/// to have materialized the aggregate yet, so absence is a valid result.
pub fn build_driven_port(
    type_node: &TypeNode,
    verdict: &Verdict,
    ctx: &BuildContext,
) -> Result<DrivenPort> {
    let structure = structure::build_structure(type_node, ctx);
    let trace = trace::convert(verdict)?;

    let port_kind = verdict
        .kind_label()
        .map(DrivenPortKind::from_label)
        .unwrap_or(DrivenPortKind::Other);

    let managed_aggregate = match port_kind {
        DrivenPortKind::Repository | DrivenPortKind::Other => {
            find_managed_aggregate(type_node, ctx)
        }
        _ => None,
    };

    Ok(DrivenPort {
        id: TypeId::of(type_node.qualified_name.clone()),
        structure,
        trace,
        port_kind,
        managed_aggregate,
    })
}

/// Scans declared method return types (and their element types) for a
/// type the context has already built as an aggregate root
fn find_managed_aggregate(type_node: &TypeNode, ctx: &BuildContext) -> Option<TypeRef> {
    ctx.graph()
        .methods_of(type_node)
        .iter()
        .filter_map(|m| m.return_type.as_ref())
        .flat_map(|ret| std::iter::once(ret).chain(ret.arguments.iter()))
        .find(|candidate| {
            matches!(
                ctx.built(&candidate.qualified_name),
                Some(ArchType::Aggregate(_))
            )
        })
        .cloned()
}
