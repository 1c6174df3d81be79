//! Converts the engine's opaque verdict into the internal trace.

use crate::arch::kinds::ArchKind;
use crate::arch::trace::ClassificationTrace;
use crate::core::errors::{Error, Result};
use crate::verdict::{Confidence, Verdict, VerdictStatus};

/// Normalizes a verdict into a [`ClassificationTrace`].
///
/// The free-form kind label maps onto the closed [`ArchKind`] set;
/// unmapped labels land on `Unclassified` with the label preserved, so
/// routing can still surface them. The engine's `Explicit` confidence is
/// folded to `High` for internal comparisons; the declared level is kept
/// alongside.
pub fn convert(verdict: &Verdict) -> Result<ClassificationTrace> {
    match verdict.status {
        VerdictStatus::Classified => {
            let label = verdict.kind_label().ok_or_else(|| Error::MissingKind {
                name: verdict.subject.to_string(),
            })?;
            let declared = verdict.confidence.unwrap_or(Confidence::Low);

            Ok(ClassificationTrace {
                kind: ArchKind::from_label(label).unwrap_or(ArchKind::Unclassified),
                label: Some(label.to_string()),
                confidence: fold_explicit(declared),
                declared_confidence: declared,
                criterion: verdict.criterion.clone(),
                justification: verdict.justification.clone(),
                evidence: verdict.evidence.clone(),
                conflicts: verdict.conflicts.clone(),
            })
        }
        // Unclassified and conflict outcomes share the same trace shape:
        // no winning criterion, lowest confidence, conflicts preserved.
        VerdictStatus::Unclassified | VerdictStatus::Conflict => Ok(ClassificationTrace {
            kind: ArchKind::Unclassified,
            label: verdict.kind.clone(),
            confidence: Confidence::Low,
            declared_confidence: Confidence::Low,
            criterion: None,
            justification: verdict.justification.clone(),
            evidence: verdict.evidence.clone(),
            conflicts: verdict.conflicts.clone(),
        }),
    }
}

fn fold_explicit(confidence: Confidence) -> Confidence {
    match confidence {
        Confidence::Explicit => Confidence::High,
        other => other,
    }
}
