//! Flat-file question store.
//!
//! Stands in for the external vector store behind the two operations the
//! pipeline needs: the set of already-indexed texts, and appending new
//! entries. Supports both JSON (human-readable) and bincode (compact
//! binary) formats, chosen by file extension. Also provides a lexical
//! top-k retrieval used by the generator; a production deployment swaps
//! this for the vector database's similarity search.

use crate::error::{PipelineError, Result};
use crate::indexer::{self, IndexReport};
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Default filename for the question store.
pub const DEFAULT_STORE_FILENAME: &str = "question_store.json";

/// Save format for the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFormat {
    /// JSON format (human-readable, larger).
    Json,
    /// Bincode format (binary, compact).
    Bincode,
}

impl StoreFormat {
    /// Determine format from file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("bin") | Some("bincode") => StoreFormat::Bincode,
            _ => StoreFormat::Json,
        }
    }
}

/// A stored question with optional topic metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct StoredQuestion {
    /// The question text (the embedding payload downstream).
    pub text: String,
    /// Topic label, when the topic segmenter produced the question.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

impl StoredQuestion {
    /// An ungrouped question.
    pub fn flat(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            topic: None,
        }
    }

    /// A question carrying its topic label.
    pub fn with_topic(text: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            topic: Some(topic.into()),
        }
    }
}

/// A retrieval hit with its lexical overlap score.
#[derive(Debug, Clone)]
pub struct RetrievedQuestion<'a> {
    /// The matched stored question.
    pub question: &'a StoredQuestion,
    /// Word-overlap score (0-1).
    pub score: f32,
}

/// The question store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionStore {
    questions: Vec<StoredQuestion>,
}

impl QuestionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// All stored questions, in insertion order.
    pub fn questions(&self) -> &[StoredQuestion] {
        &self.questions
    }

    /// Number of distinct topic labels among stored questions.
    pub fn topic_count(&self) -> usize {
        self.questions
            .iter()
            .filter_map(|q| q.topic.as_deref())
            .collect::<HashSet<_>>()
            .len()
    }

    /// The set of already-indexed question texts (trimmed).
    pub fn existing_texts(&self) -> HashSet<String> {
        self.questions
            .iter()
            .map(|q| q.text.trim().to_string())
            .collect()
    }

    /// Append only candidates not already stored, preserving candidate
    /// order, and report added vs. skipped counts.
    pub fn add_new(&mut self, candidates: Vec<StoredQuestion>) -> IndexReport {
        let existing = self.existing_texts();
        let (new, report) = indexer::select_new(&existing, candidates);
        self.questions.extend(new);
        report
    }

    /// Retrieve the `k` stored questions most lexically similar to the
    /// query, scored by word overlap. Ties keep insertion order.
    pub fn similar(&self, query: &str, k: usize) -> Vec<RetrievedQuestion<'_>> {
        let query_words = words(query);
        if query_words.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<RetrievedQuestion<'_>> = self
            .questions
            .iter()
            .map(|q| RetrievedQuestion {
                question: q,
                score: overlap_score(&query_words, &words(&q.text)),
            })
            .filter(|hit| hit.score > 0.0)
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored
    }

    /// Save the store to a file, format chosen by extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
            }
        }

        let data = match StoreFormat::from_path(path) {
            StoreFormat::Json => serde_json::to_string_pretty(&self.questions)
                .map_err(|e| PipelineError::Serialization(e.to_string()))?
                .into_bytes(),
            StoreFormat::Bincode => {
                let config = bincode::config::standard();
                bincode::encode_to_vec(&self.questions, config)
                    .map_err(|e| PipelineError::Serialization(e.to_string()))?
            }
        };

        fs::write(path, &data).map_err(|e| PipelineError::io(path, e))?;

        Ok(())
    }

    /// Load a store from a file, format chosen by extension.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PipelineError::StoreNotFound(path.to_path_buf()));
        }

        let data = fs::read(path).map_err(|e| PipelineError::io(path, e))?;

        let questions = match StoreFormat::from_path(path) {
            StoreFormat::Json => {
                let json_str = String::from_utf8(data)
                    .map_err(|e| PipelineError::Serialization(e.to_string()))?;
                serde_json::from_str(&json_str)
                    .map_err(|e| PipelineError::Serialization(e.to_string()))?
            }
            StoreFormat::Bincode => {
                let config = bincode::config::standard();
                let (questions, _): (Vec<StoredQuestion>, usize) =
                    bincode::decode_from_slice(&data, config)
                        .map_err(|e| PipelineError::Serialization(e.to_string()))?;
                questions
            }
        };

        Ok(Self { questions })
    }

    /// Load the store at `path`, or an empty store if the file does not
    /// exist yet.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }
}

/// Check if a store file exists at the given path.
pub fn store_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

/// Lowercase alphanumeric words of a text.
fn words(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fraction of query words present in the candidate.
fn overlap_score(query: &HashSet<String>, candidate: &HashSet<String>) -> f32 {
    if query.is_empty() {
        return 0.0;
    }
    let shared = query.intersection(candidate).count();
    shared as f32 / query.len() as f32
}
