//! Normalized trace of a classification decision.
//!
//! Answers "why is this type in the model as kind X": the closed kind, the
//! confidence (with the engine's `Explicit` folded to `High` for internal
//! comparisons while the declared level is preserved), the winning
//! criterion, evidence, and the conflicts that were considered.

use serde::{Deserialize, Serialize};

use crate::arch::kinds::ArchKind;
use crate::verdict::{Confidence, Criterion, Evidence, VerdictConflict};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationTrace {
    /// Closed internal kind the verdict label mapped to
    pub kind: ArchKind,
    /// The engine's original free-form label, kept for diagnostics
    pub label: Option<String>,
    /// Working confidence; `Explicit` is folded to `High`
    pub confidence: Confidence,
    /// Confidence exactly as declared by the engine
    pub declared_confidence: Confidence,
    /// Winning criterion, absent for unclassified outcomes
    pub criterion: Option<Criterion>,
    pub justification: String,
    pub evidence: Vec<Evidence>,
    pub conflicts: Vec<VerdictConflict>,
}

impl ClassificationTrace {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    pub fn was_explicit(&self) -> bool {
        self.declared_confidence == Confidence::Explicit
    }

    /// Human-readable one-line summary, e.g. for log output
    pub fn summary(&self) -> String {
        match &self.criterion {
            Some(criterion) => format!(
                "{:?} ({:?}) via {} (priority {})",
                self.kind, self.confidence, criterion.name, criterion.priority
            ),
            None => format!("{:?} ({:?})", self.kind, self.confidence),
        }
    }
}
