//! Configurable pattern tables for the structural heuristics.
//!
//! Every naming convention and annotation set the role detectors and the
//! unclassified categorizer rely on lives here, so embedders analyzing
//! codebases with house conventions can override them without forking the
//! detectors. The defaults cover the common JPA / Spring / jMolecules
//! surface.

use serde::{Deserialize, Serialize};

use crate::graph::model::TypeRef;

/// Pattern tables driving member-role detection and categorization.
///
/// All name tables are matched case-insensitively against lower-cased
/// member names; annotation tables are matched against fully qualified
/// annotation names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Annotations that mark a field as the primary identity
    pub identity_annotations: Vec<String>,
    /// Annotations that mark a field as an optimistic-locking version
    pub version_annotations: Vec<String>,
    /// Annotations that mark a method as a lifecycle callback
    pub lifecycle_annotations: Vec<String>,
    /// Framework-infrastructure annotations (component/configuration markers)
    pub framework_annotations: Vec<String>,
    /// Field names recording creation/modification audit data
    pub audit_field_patterns: Vec<String>,
    /// Field names carrying technical bookkeeping (version, tenant, ...)
    pub technical_field_patterns: Vec<String>,
    /// Field names carrying a domain event occurrence timestamp
    pub timestamp_field_names: Vec<String>,
    /// Method names treated as lifecycle callbacks
    pub lifecycle_method_names: Vec<String>,
    /// Method names treated as static factories
    pub factory_method_names: Vec<String>,
    /// Name prefixes marking read-only query methods
    pub query_name_prefixes: Vec<String>,
    /// Qualified names of multi-valued container types
    pub collection_types: Vec<String>,
    /// Qualified names of map-like container types
    pub map_types: Vec<String>,
    /// Qualified names of boolean types (for getter/validation detection)
    pub boolean_types: Vec<String>,
    /// Simple-name suffixes marking utility holders
    pub utility_suffixes: Vec<String>,
    /// Package segments marking test/mock/stub code as out of scope
    pub test_package_segments: Vec<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            identity_annotations: strings(&[
                "javax.persistence.Id",
                "jakarta.persistence.Id",
                "org.jmolecules.ddd.annotation.Identity",
                "org.springframework.data.annotation.Id",
            ]),
            version_annotations: strings(&[
                "javax.persistence.Version",
                "jakarta.persistence.Version",
                "org.springframework.data.annotation.Version",
            ]),
            lifecycle_annotations: strings(&[
                "javax.annotation.PostConstruct",
                "jakarta.annotation.PostConstruct",
                "javax.annotation.PreDestroy",
                "jakarta.annotation.PreDestroy",
            ]),
            framework_annotations: strings(&[
                "org.springframework.stereotype.Component",
                "org.springframework.context.annotation.Configuration",
                "org.springframework.stereotype.Controller",
                "org.springframework.web.bind.annotation.RestController",
                "javax.enterprise.context.ApplicationScoped",
                "jakarta.enterprise.context.ApplicationScoped",
            ]),
            audit_field_patterns: strings(&[
                "createdat",
                "updatedat",
                "createdby",
                "updatedby",
                "createdon",
                "updatedon",
                "modifiedat",
                "modifiedon",
                "modifiedby",
            ]),
            technical_field_patterns: strings(&[
                "version",
                "tenant",
                "tenantid",
                "serialversionuid",
            ]),
            timestamp_field_names: strings(&[
                "timestamp",
                "occurredat",
                "createdat",
                "eventtime",
                "happenedat",
                "recordedat",
                "emittedat",
            ]),
            lifecycle_method_names: strings(&[
                "init", "destroy", "close", "dispose", "shutdown", "cleanup",
            ]),
            factory_method_names: strings(&[
                "of",
                "from",
                "create",
                "build",
                "newInstance",
                "getInstance",
                "valueOf",
            ]),
            query_name_prefixes: strings(&[
                "get", "find", "list", "search", "fetch", "load", "query", "read", "count",
                "exists",
            ]),
            collection_types: strings(&[
                "java.util.List",
                "java.util.Set",
                "java.util.Collection",
                "java.util.SortedSet",
                "java.util.Queue",
                "java.util.Deque",
            ]),
            map_types: strings(&[
                "java.util.Map",
                "java.util.SortedMap",
                "java.util.concurrent.ConcurrentMap",
            ]),
            boolean_types: strings(&["boolean", "java.lang.Boolean"]),
            utility_suffixes: strings(&["Utils", "Util", "Helper", "Constants"]),
            test_package_segments: strings(&[
                "test", "tests", "mock", "mocks", "stub", "stubs", "fixture", "fixtures",
            ]),
        }
    }
}

impl ModelConfig {
    /// Returns true if the type reference names a known multi-valued container
    pub fn is_collection(&self, ty: &TypeRef) -> bool {
        self.collection_types
            .iter()
            .any(|c| c == &ty.qualified_name)
    }

    /// Returns true if the type reference names a known map-like container
    pub fn is_map_like(&self, ty: &TypeRef) -> bool {
        self.map_types.iter().any(|m| m == &ty.qualified_name)
    }

    /// Returns true if the type reference names a boolean
    pub fn is_boolean(&self, ty: &TypeRef) -> bool {
        self.boolean_types.iter().any(|b| b == &ty.qualified_name)
    }

    /// Returns true if the annotation name marks an identity field
    pub fn is_identity_annotation(&self, qualified_name: &str) -> bool {
        self.identity_annotations.iter().any(|a| a == qualified_name)
    }

    /// Returns true if the annotation name marks a version field
    pub fn is_version_annotation(&self, qualified_name: &str) -> bool {
        self.version_annotations.iter().any(|a| a == qualified_name)
    }

    /// Returns true if the annotation name marks a lifecycle callback
    pub fn is_lifecycle_annotation(&self, qualified_name: &str) -> bool {
        self.lifecycle_annotations
            .iter()
            .any(|a| a == qualified_name)
    }

    /// Returns true if the annotation name marks framework infrastructure
    pub fn is_framework_annotation(&self, qualified_name: &str) -> bool {
        self.framework_annotations
            .iter()
            .any(|a| a == qualified_name)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
