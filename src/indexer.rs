//! Incremental indexing.
//!
//! Reprocessing the same source papers must not duplicate entries in the
//! store, so indexing is a set difference: only candidates whose text is
//! not already stored are emitted, in candidate order. Equality is exact
//! trimmed-string comparison; no case or whitespace normalization.

use crate::store::StoredQuestion;
use std::collections::HashSet;

/// Counts of an incremental index run, for operator reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexReport {
    /// Candidates not previously stored.
    pub added: usize,
    /// Candidates skipped as exact duplicates.
    pub skipped: usize,
}

/// Select the candidates whose text is not in `existing`, preserving
/// candidate order.
///
/// Running the same candidates against the union of `existing` and a
/// previous run's output yields an empty selection (idempotence).
pub fn select_new(
    existing: &HashSet<String>,
    candidates: Vec<StoredQuestion>,
) -> (Vec<StoredQuestion>, IndexReport) {
    let mut report = IndexReport::default();
    let mut new = Vec::new();

    for candidate in candidates {
        if existing.contains(candidate.text.trim()) {
            report.skipped += 1;
        } else {
            report.added += 1;
            new.push(candidate);
        }
    }

    (new, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(texts: &[&str]) -> Vec<StoredQuestion> {
        texts.iter().map(|t| StoredQuestion::flat(*t)).collect()
    }

    #[test]
    fn test_spec_example() {
        let existing: HashSet<String> = ["Define caste.".to_string()].into_iter().collect();
        let (new, report) = select_new(&existing, candidates(&["Define caste.", "Explain GST."]));

        assert_eq!(new.len(), 1);
        assert_eq!(new[0].text, "Explain GST.");
        assert_eq!(report, IndexReport { added: 1, skipped: 1 });
    }

    #[test]
    fn test_idempotent_second_run() {
        let mut existing = HashSet::new();
        let first = candidates(&["One.", "Two."]);

        let (new, _) = select_new(&existing, first.clone());
        existing.extend(new.iter().map(|q| q.text.clone()));

        let (second, report) = select_new(&existing, first);
        assert!(second.is_empty());
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn test_order_preserved() {
        let existing = HashSet::new();
        let (new, _) = select_new(&existing, candidates(&["Z question.", "A question."]));

        assert_eq!(new[0].text, "Z question.");
        assert_eq!(new[1].text, "A question.");
    }

    #[test]
    fn test_no_normalization_beyond_trim() {
        let existing: HashSet<String> = ["define caste.".to_string()].into_iter().collect();
        // Case differs, so this is a new entry.
        let (new, report) = select_new(&existing, candidates(&["Define caste."]));

        assert_eq!(new.len(), 1);
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn test_empty_candidates() {
        let existing = HashSet::new();
        let (new, report) = select_new(&existing, Vec::new());
        assert!(new.is_empty());
        assert_eq!(report, IndexReport::default());
    }
}
