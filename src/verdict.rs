//! Classification verdicts, as delivered by the external classification
//! engine.
//!
//! A verdict is the opaque, already-computed outcome of classifying one
//! type node: a free-form kind label, a confidence, the winning criterion,
//! evidence, and competing alternatives. The model builders normalize
//! verdicts into [`crate::arch::ClassificationTrace`] values; this module
//! only mirrors the engine's output shape.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::graph::model::NodeId;

/// Whether a type was classified against the domain or the port taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Domain,
    Port,
}

/// Ordered confidence ladder of a classification
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Confidence {
    Low,
    Medium,
    High,
    Explicit,
}

/// Outcome status of a classification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerdictStatus {
    Classified,
    Unclassified,
    Conflict,
}

/// The criterion that decided a classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    pub priority: u32,
}

impl Criterion {
    pub fn new(name: impl Into<String>, priority: u32) -> Self {
        Criterion {
            name: name.into(),
            priority,
        }
    }
}

/// One piece of evidence the engine collected for a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub kind: String,
    pub detail: String,
}

impl Evidence {
    pub fn new(kind: impl Into<String>, detail: impl Into<String>) -> Self {
        Evidence {
            kind: kind.into(),
            detail: detail.into(),
        }
    }
}

/// A competing classification that also matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictConflict {
    pub kind: String,
    pub confidence: Confidence,
    pub justification: String,
}

impl VerdictConflict {
    pub fn new(
        kind: impl Into<String>,
        confidence: Confidence,
        justification: impl Into<String>,
    ) -> Self {
        VerdictConflict {
            kind: kind.into(),
            confidence,
            justification: justification.into(),
        }
    }
}

/// The classification outcome for one type node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub subject: NodeId,
    pub target: Target,
    /// Free-form kind label, absent for unclassified/conflict outcomes
    pub kind: Option<String>,
    pub confidence: Option<Confidence>,
    pub criterion: Option<Criterion>,
    pub justification: String,
    pub evidence: Vec<Evidence>,
    pub conflicts: Vec<VerdictConflict>,
    pub status: VerdictStatus,
}

impl Verdict {
    /// A successful classification
    pub fn classified(
        subject: NodeId,
        target: Target,
        kind: impl Into<String>,
        confidence: Confidence,
        criterion: Criterion,
        justification: impl Into<String>,
    ) -> Self {
        Verdict {
            subject,
            target,
            kind: Some(kind.into()),
            confidence: Some(confidence),
            criterion: Some(criterion),
            justification: justification.into(),
            evidence: Vec::new(),
            conflicts: Vec::new(),
            status: VerdictStatus::Classified,
        }
    }

    /// No criteria matched with sufficient confidence
    pub fn unclassified(subject: NodeId, target: Target) -> Self {
        Verdict {
            subject,
            target,
            kind: None,
            confidence: None,
            criterion: None,
            justification: "No classification criteria matched with sufficient confidence"
                .to_string(),
            evidence: Vec::new(),
            conflicts: Vec::new(),
            status: VerdictStatus::Unclassified,
        }
    }

    /// Multiple incompatible criteria matched
    pub fn conflict(subject: NodeId, target: Target, conflicts: Vec<VerdictConflict>) -> Self {
        Verdict {
            subject,
            target,
            kind: None,
            confidence: None,
            criterion: None,
            justification: "Multiple conflicting criteria matched".to_string(),
            evidence: Vec::new(),
            conflicts,
            status: VerdictStatus::Conflict,
        }
    }

    /// Attaches evidence items, builder-style
    pub fn with_evidence(mut self, evidence: Vec<Evidence>) -> Self {
        self.evidence = evidence;
        self
    }

    /// Attaches competing alternatives, builder-style
    pub fn with_conflicts(mut self, conflicts: Vec<VerdictConflict>) -> Self {
        self.conflicts = conflicts;
        self
    }

    pub fn is_classified(&self) -> bool {
        self.status == VerdictStatus::Classified
    }

    pub fn is_unclassified(&self) -> bool {
        self.status == VerdictStatus::Unclassified
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    pub fn kind_label(&self) -> Option<&str> {
        self.kind.as_deref()
    }
}

/// The full verdict set for one build, keyed by node id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerdictSet {
    verdicts: BTreeMap<NodeId, Verdict>,
}

impl VerdictSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, verdict: Verdict) {
        self.verdicts.insert(verdict.subject.clone(), verdict);
    }

    pub fn get(&self, id: &NodeId) -> Option<&Verdict> {
        self.verdicts.get(id)
    }

    /// Looks up the verdict of a type by its qualified name
    pub fn for_type_name(&self, qualified_name: &str) -> Option<&Verdict> {
        self.verdicts.get(&NodeId::of_type(qualified_name))
    }

    /// All verdicts, in deterministic (id) order
    pub fn iter(&self) -> impl Iterator<Item = &Verdict> {
        self.verdicts.values()
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }
}

impl FromIterator<Verdict> for VerdictSet {
    fn from_iter<I: IntoIterator<Item = Verdict>>(iter: I) -> Self {
        let mut set = VerdictSet::new();
        for verdict in iter {
            set.insert(verdict);
        }
        set
    }
}
