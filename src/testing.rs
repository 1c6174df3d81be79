//! Fixture builders for assembling code graphs and verdict sets in tests.
//!
//! Kept in the library (not `tests/`) so integration tests, doc examples
//! and embedders writing their own tests share one vocabulary.

use crate::graph::model::{
    AnnotationRef, ConstructorNode, FieldNode, MethodNode, Modifier, NodeId, ParameterNode,
    TypeForm, TypeNode, TypeRef,
};
use crate::graph::query::CodeGraph;
use crate::verdict::{Confidence, Criterion, Target, Verdict, VerdictSet};

/// Shorthand for a non-generic type reference
pub fn ty(qualified_name: &str) -> TypeRef {
    TypeRef::named(qualified_name)
}

/// Shorthand for a one-argument generic reference (`List<T>`)
pub fn generic(container: &str, element: &str) -> TypeRef {
    TypeRef::generic(container, vec![TypeRef::named(element)])
}

/// Fluent sketch of one type and its members
#[derive(Debug, Clone)]
pub struct TypeSketch {
    node: TypeNode,
    fields: Vec<FieldNode>,
    methods: Vec<MethodNode>,
    constructors: Vec<ConstructorNode>,
}

impl TypeSketch {
    pub fn class(qualified_name: &str) -> Self {
        Self::of(qualified_name, TypeForm::Class)
    }

    pub fn interface(qualified_name: &str) -> Self {
        Self::of(qualified_name, TypeForm::Interface)
    }

    pub fn record(qualified_name: &str) -> Self {
        Self::of(qualified_name, TypeForm::Record)
    }

    pub fn of(qualified_name: &str, form: TypeForm) -> Self {
        TypeSketch {
            node: TypeNode::new(qualified_name, form),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
        }
    }

    pub fn annotated(mut self, annotation: &str) -> Self {
        self.node.annotations.push(AnnotationRef::of(annotation));
        self
    }

    pub fn extends(mut self, super_type: &str) -> Self {
        self.node.super_type = Some(TypeRef::named(super_type));
        self
    }

    pub fn implements(mut self, interface: &str) -> Self {
        self.node.interfaces.push(TypeRef::named(interface));
        self
    }

    pub fn field(mut self, name: &str, field_type: TypeRef) -> Self {
        self.fields.push(FieldNode::new(name, field_type));
        self
    }

    pub fn annotated_field(mut self, name: &str, field_type: TypeRef, annotation: &str) -> Self {
        let mut field = FieldNode::new(name, field_type);
        field.annotations.push(AnnotationRef::of(annotation));
        self.fields.push(field);
        self
    }

    pub fn static_field(mut self, name: &str, field_type: TypeRef) -> Self {
        let mut field = FieldNode::new(name, field_type);
        field.modifiers.insert(Modifier::Static);
        self.fields.push(field);
        self
    }

    pub fn method(mut self, name: &str, return_type: Option<TypeRef>) -> Self {
        self.methods.push(MethodNode::new(name, return_type));
        self
    }

    pub fn method_with_params(
        mut self,
        name: &str,
        return_type: Option<TypeRef>,
        params: &[(&str, TypeRef)],
    ) -> Self {
        let mut method = MethodNode::new(name, return_type);
        for (param_name, param_type) in params {
            method
                .parameters
                .push(ParameterNode::new(*param_name, param_type.clone()));
        }
        self.methods.push(method);
        self
    }

    pub fn constructor(mut self, params: &[(&str, TypeRef)]) -> Self {
        let parameters = params
            .iter()
            .map(|(name, param_type)| ParameterNode::new(*name, param_type.clone()))
            .collect();
        self.constructors.push(ConstructorNode {
            parameters,
            ..ConstructorNode::default()
        });
        self
    }
}

/// Assembles a code graph plus verdict set for a test scenario
#[derive(Debug, Clone, Default)]
pub struct GraphFixture {
    graph: CodeGraph,
    verdicts: VerdictSet,
}

impl GraphFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sketch: TypeSketch) -> Self {
        let owner = sketch.node.qualified_name.clone();
        self.graph.add_type(sketch.node);
        for field in sketch.fields {
            self.graph.add_field(&owner, field);
        }
        for method in sketch.methods {
            self.graph.add_method(&owner, method);
        }
        for constructor in sketch.constructors {
            self.graph.add_constructor(&owner, constructor);
        }
        self
    }

    /// Records a classified verdict with a default criterion
    pub fn classify(mut self, qualified_name: &str, kind: &str, confidence: Confidence) -> Self {
        let target = if matches!(
            kind,
            "DRIVING_PORT"
                | "USE_CASE"
                | "DRIVEN_PORT"
                | "REPOSITORY"
                | "GATEWAY"
                | "EVENT_PUBLISHER"
                | "NOTIFICATION"
                | "GENERIC"
        ) {
            Target::Port
        } else {
            Target::Domain
        };
        self.verdicts.insert(Verdict::classified(
            NodeId::of_type(qualified_name),
            target,
            kind,
            confidence,
            Criterion::new("fixture", 1),
            format!("fixture classification as {kind}"),
        ));
        self
    }

    /// Records an unclassified verdict
    pub fn unclassified(mut self, qualified_name: &str) -> Self {
        self.verdicts.insert(Verdict::unclassified(
            NodeId::of_type(qualified_name),
            Target::Domain,
        ));
        self
    }

    /// Records a fully custom verdict
    pub fn verdict(mut self, verdict: Verdict) -> Self {
        self.verdicts.insert(verdict);
        self
    }

    pub fn build(self) -> (CodeGraph, VerdictSet) {
        (self.graph, self.verdicts)
    }
}
