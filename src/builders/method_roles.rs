//! Semantic role detection for methods.
//!
//! Stateless heuristics over one method descriptor: signature shape,
//! annotations and naming conventions. The declaring type is optional;
//! without it, only the factory-returns-own-type check is skipped.

use std::collections::BTreeSet;

use crate::arch::kinds::MethodRole;
use crate::config::ModelConfig;
use crate::graph::model::{MethodNode, TypeNode};

const OBJECT_PARAM_TYPE: &str = "java.lang.Object";
const INT_TYPE: &str = "int";
const STRING_TYPE: &str = "java.lang.String";

const VALIDATION_PREFIXES: [&str; 4] = ["validate", "check", "ensure", "verify"];
const VALIDATION_IS_SUFFIXES: [&str; 6] =
    ["valid", "complete", "empty", "present", "null", "blank"];

/// Detects the semantic roles of a method
pub fn detect(
    method: &MethodNode,
    declaring_type: Option<&TypeNode>,
    config: &ModelConfig,
) -> BTreeSet<MethodRole> {
    let mut roles = BTreeSet::new();

    if is_getter(method, config) {
        roles.insert(MethodRole::Getter);
    }
    if is_setter(method) {
        roles.insert(MethodRole::Setter);
    }
    if is_factory(method, declaring_type, config) {
        roles.insert(MethodRole::Factory);
    }
    if is_object_method(method) {
        roles.insert(MethodRole::ObjectMethod);
    }
    if is_lifecycle(method, config) {
        roles.insert(MethodRole::Lifecycle);
    }
    if is_validation(method, config) {
        roles.insert(MethodRole::Validation);
    }

    // Only when no special role matched does a method fall into the
    // command/query/business split.
    if roles.is_empty() {
        let has_params = !method.parameters.is_empty();
        if method.is_void() && has_params {
            roles.insert(MethodRole::Command);
        } else if !method.is_void() && is_query_shaped(method, config) {
            roles.insert(MethodRole::Query);
        } else {
            roles.insert(MethodRole::Business);
        }
    }

    roles
}

fn is_getter(method: &MethodNode, config: &ModelConfig) -> bool {
    if !method.parameters.is_empty() || method.is_void() {
        return false;
    }

    if has_property_suffix(&method.name, "get") {
        return true;
    }

    // isX only counts for boolean returns
    if has_property_suffix(&method.name, "is") {
        if let Some(ret) = &method.return_type {
            return config.is_boolean(ret);
        }
    }

    false
}

fn is_setter(method: &MethodNode) -> bool {
    method.parameters.len() == 1 && method.is_void() && has_property_suffix(&method.name, "set")
}

fn is_factory(
    method: &MethodNode,
    declaring_type: Option<&TypeNode>,
    config: &ModelConfig,
) -> bool {
    if !method.is_static() {
        return false;
    }

    if config.factory_method_names.contains(&method.name) {
        return true;
    }

    match (declaring_type, &method.return_type) {
        (Some(declaring), Some(ret)) => ret.qualified_name == declaring.qualified_name,
        _ => false,
    }
}

fn is_object_method(method: &MethodNode) -> bool {
    match method.name.as_str() {
        "equals" => {
            method.parameters.len() == 1
                && method.parameters[0].ty.qualified_name == OBJECT_PARAM_TYPE
        }
        "hashCode" => {
            method.parameters.is_empty()
                && method
                    .return_type
                    .as_ref()
                    .is_some_and(|r| r.qualified_name == INT_TYPE)
        }
        "toString" => {
            method.parameters.is_empty()
                && method
                    .return_type
                    .as_ref()
                    .is_some_and(|r| r.qualified_name == STRING_TYPE)
        }
        _ => false,
    }
}

fn is_lifecycle(method: &MethodNode, config: &ModelConfig) -> bool {
    if method
        .annotations
        .iter()
        .any(|a| config.is_lifecycle_annotation(&a.qualified_name))
    {
        return true;
    }

    config
        .lifecycle_method_names
        .contains(&method.name.to_lowercase())
}

fn is_validation(method: &MethodNode, config: &ModelConfig) -> bool {
    let lower = method.name.to_lowercase();

    if VALIDATION_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return true;
    }

    // isValid-style predicates: boolean return and a validation-flavored
    // suffix, as opposed to a plain isActive property getter
    if let Some(suffix) = lower.strip_prefix("is") {
        if suffix.is_empty() {
            return false;
        }
        let boolean_return = method
            .return_type
            .as_ref()
            .is_some_and(|r| config.is_boolean(r));
        if boolean_return {
            return VALIDATION_IS_SUFFIXES.contains(&suffix)
                || suffix.contains("valid")
                || suffix.contains("check");
        }
    }

    false
}

fn is_query_shaped(method: &MethodNode, config: &ModelConfig) -> bool {
    let lower = method.name.to_lowercase();
    if config
        .query_name_prefixes
        .iter()
        .any(|p| lower.starts_with(p.as_str()))
    {
        return true;
    }

    // collection-returning methods read as queries even without the prefix
    method
        .return_type
        .as_ref()
        .is_some_and(|r| config.is_collection(r))
}

/// `getX` requires an upper-case property character after the prefix
fn has_property_suffix(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_uppercase())
}
