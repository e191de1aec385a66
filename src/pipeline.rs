//! Batch extraction over a directory of past papers.
//!
//! Each document is processed independently: extraction failures are
//! logged and the batch moves on, so one corrupt PDF never poisons the
//! rest of the corpus. Output only ever accumulates; a later failure
//! cannot corrupt earlier documents' contributions.

use crate::document::{self, Document};
use crate::error::Result;
use crate::normalize::{ScriptRange, normalize_lines};
use crate::segment::{TopicMap, segment_questions};
use std::path::Path;
use tracing::{info, warn};

/// Accounting for one batch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchStats {
    /// Documents successfully processed.
    pub processed: usize,
    /// Documents skipped after an extraction failure.
    pub failed: usize,
    /// Topic segments discarded for carrying no questions.
    pub skipped_segments: usize,
}

/// Extract ungrouped questions from every eligible document under `dir`,
/// in document order.
///
/// Returns `EmptyCorpus` only when the directory has no eligible files;
/// a corpus whose documents all fail to parse yields an empty output and
/// a nonzero `failed` count instead.
pub fn extract_questions(
    dir: &Path,
    exclude_scripts: &[ScriptRange],
) -> Result<(Vec<String>, BatchStats)> {
    let mut questions = Vec::new();
    let mut stats = BatchStats::default();

    for path in document::find_documents(dir)? {
        let document = match Document::load(&path) {
            Ok(document) => document,
            Err(e) => {
                warn!("skipping document: {e}");
                stats.failed += 1;
                continue;
            }
        };

        let lines = normalize_lines(&document.full_text(), exclude_scripts);
        let extracted = segment_questions(lines.iter().map(String::as_str));

        info!(
            document = %document.name,
            pages = document.page_count(),
            questions = extracted.len(),
            "extracted document"
        );

        questions.extend(extracted);
        stats.processed += 1;
    }

    Ok((questions, stats))
}

/// Extract a topic → questions mapping from every eligible document
/// under `dir`. Recurring topic labels accumulate across documents.
pub fn extract_topics(
    dir: &Path,
    exclude_scripts: &[ScriptRange],
) -> Result<(TopicMap, BatchStats)> {
    let mut map = TopicMap::new();
    let mut stats = BatchStats::default();

    for path in document::find_documents(dir)? {
        let document = match Document::load(&path) {
            Ok(document) => document,
            Err(e) => {
                warn!("skipping document: {e}");
                stats.failed += 1;
                continue;
            }
        };

        let before = map.question_count();
        let lines = normalize_lines(&document.full_text(), exclude_scripts);
        map.merge_text(&lines.join(" "));

        info!(
            document = %document.name,
            questions = map.question_count() - before,
            "extracted document"
        );

        stats.processed += 1;
    }

    stats.skipped_segments = map.skipped_segments;

    Ok((map, stats))
}
