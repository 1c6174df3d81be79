//! Classification report: statistics, conflicts and remediation hints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::arch::kinds::{ArchKind, UnclassifiedCategory};
use crate::arch::types::TypeId;
use crate::verdict::{Evidence, VerdictConflict};

/// Aggregate counts over one build
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationStats {
    pub total_types: usize,
    pub classified: usize,
    pub unclassified: usize,
    pub conflicts: usize,
    pub by_kind: BTreeMap<ArchKind, usize>,
}

impl ClassificationStats {
    /// Share of types that classified successfully, in `[0, 1]`
    pub fn classification_rate(&self) -> f64 {
        if self.total_types == 0 {
            return 1.0;
        }
        self.classified as f64 / self.total_types as f64
    }
}

/// A type whose verdict carried competing classifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationConflict {
    pub type_id: TypeId,
    pub contributions: Vec<VerdictConflict>,
}

/// Suggested action for one unclassified type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Remediation {
    pub type_id: TypeId,
    pub category: UnclassifiedCategory,
    pub suggestion: String,
    pub evidence: Vec<Evidence>,
}

/// The full classification report for one build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub stats: ClassificationStats,
    pub unclassified_by_category: BTreeMap<UnclassifiedCategory, Vec<TypeId>>,
    pub conflicts: Vec<ClassificationConflict>,
    pub remediations: Vec<Remediation>,
    pub generated_at: DateTime<Utc>,
}

impl ClassificationReport {
    /// True if anything needs attention (unclassified types or conflicts)
    pub fn has_issues(&self) -> bool {
        self.stats.unclassified > 0 || self.stats.conflicts > 0
    }

    /// Unclassified types that require action.
    ///
    /// Utility, out-of-scope and technical types are intentionally
    /// excluded; they rarely belong in the model at all.
    pub fn action_required(&self) -> Vec<&TypeId> {
        [
            UnclassifiedCategory::Conflicting,
            UnclassifiedCategory::Ambiguous,
            UnclassifiedCategory::Unknown,
        ]
        .iter()
        .flat_map(|category| {
            self.unclassified_by_category
                .get(category)
                .map(|ids| ids.iter())
                .into_iter()
                .flatten()
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with(categories: &[(UnclassifiedCategory, &str)]) -> ClassificationReport {
        let mut by_category: BTreeMap<UnclassifiedCategory, Vec<TypeId>> = BTreeMap::new();
        for (category, name) in categories {
            by_category
                .entry(*category)
                .or_default()
                .push(TypeId::of(*name));
        }
        ClassificationReport {
            stats: ClassificationStats {
                total_types: categories.len(),
                classified: 0,
                unclassified: categories.len(),
                conflicts: 0,
                by_kind: BTreeMap::new(),
            },
            unclassified_by_category: by_category,
            conflicts: Vec::new(),
            remediations: Vec::new(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_action_required_skips_benign_categories() {
        let report = report_with(&[
            (UnclassifiedCategory::Utility, "com.example.StringUtils"),
            (UnclassifiedCategory::OutOfScope, "com.example.test.Fake"),
            (UnclassifiedCategory::Ambiguous, "com.example.Thing"),
            (UnclassifiedCategory::Unknown, "com.example.Blob"),
        ]);
        let names: Vec<_> = report
            .action_required()
            .iter()
            .map(|id| id.simple_name())
            .collect();
        assert_eq!(names, vec!["Thing", "Blob"]);
        assert!(report.has_issues());
    }

    #[test]
    fn test_rate_of_empty_build_is_full() {
        let stats = ClassificationStats::default();
        assert_eq!(stats.classification_rate(), 1.0);
    }
}
