//! Persistence for the pipeline's flat-file artifacts.
//!
//! Two JSON documents cross the pipeline's stage boundaries:
//! the question-chunk file produced by `parse` (a flat array of strings,
//! or an array of topic objects when the topic segmenter ran) and the
//! tagged-question file produced by `tag`.

use crate::error::{PipelineError, Result};
use crate::segment::TopicBlock;
use crate::store::StoredQuestion;
use crate::tag::TaggedQuestion;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default filename for the question-chunk file.
pub const DEFAULT_CHUNK_FILENAME: &str = "chunks.json";

/// Default filename for the tagged-question file.
pub const DEFAULT_TAGGED_FILENAME: &str = "tagged_questions.json";

/// The question-chunk artifact.
///
/// Shape depends on which segmenter produced it: the line-oriented
/// segmenter emits ungrouped question strings, the topic segmenter emits
/// `{topic, questions}` records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChunkFile {
    /// Flat array of question strings.
    Flat(Vec<String>),
    /// Array of topic blocks.
    Topics(Vec<TopicBlock>),
}

impl ChunkFile {
    /// Total questions across the artifact.
    pub fn question_count(&self) -> usize {
        match self {
            ChunkFile::Flat(questions) => questions.len(),
            ChunkFile::Topics(blocks) => blocks.iter().map(|b| b.questions.len()).sum(),
        }
    }

    /// Check whether the artifact carries no questions.
    pub fn is_empty(&self) -> bool {
        self.question_count() == 0
    }

    /// Flatten into store candidates: one entry per question, carrying
    /// its topic label when present, in artifact order.
    pub fn to_stored(&self) -> Vec<StoredQuestion> {
        match self {
            ChunkFile::Flat(questions) => {
                questions.iter().map(StoredQuestion::flat).collect()
            }
            ChunkFile::Topics(blocks) => blocks
                .iter()
                .flat_map(|b| {
                    b.questions
                        .iter()
                        .map(|q| StoredQuestion::with_topic(q, &b.topic))
                })
                .collect(),
        }
    }

    /// Question texts in artifact order.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            ChunkFile::Flat(questions) => questions.iter().map(String::as_str).collect(),
            ChunkFile::Topics(blocks) => blocks
                .iter()
                .flat_map(|b| b.questions.iter().map(String::as_str))
                .collect(),
        }
    }
}

/// Save the question-chunk artifact as pretty JSON.
pub fn save_chunks(chunks: &ChunkFile, path: &Path) -> Result<()> {
    write_json(chunks, path)
}

/// Load a question-chunk artifact.
pub fn load_chunks(path: &Path) -> Result<ChunkFile> {
    read_json(path)
}

/// Save tagged questions as pretty JSON.
pub fn save_tagged(tagged: &[TaggedQuestion], path: &Path) -> Result<()> {
    write_json(&tagged, path)
}

/// Load tagged questions.
pub fn load_tagged(path: &Path) -> Result<Vec<TaggedQuestion>> {
    read_json(path)
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
        }
    }

    let data = serde_json::to_string_pretty(value)
        .map_err(|e| PipelineError::Serialization(e.to_string()))?;

    fs::write(path, data).map_err(|e| PipelineError::io(path, e))?;

    Ok(())
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(PipelineError::DocumentNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;

    serde_json::from_str(&content).map_err(|e| PipelineError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn topic_chunks() -> ChunkFile {
        ChunkFile::Topics(vec![
            TopicBlock {
                topic: "Polity".to_string(),
                questions: vec!["Explain Article 370".to_string()],
            },
            TopicBlock {
                topic: "Economy".to_string(),
                questions: vec!["Discuss GST".to_string(), "Explain inflation.".to_string()],
            },
        ])
    }

    #[test]
    fn test_flat_chunks_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chunks.json");

        let chunks = ChunkFile::Flat(vec!["1. First.".to_string(), "2. Second.".to_string()]);
        save_chunks(&chunks, &path).unwrap();

        let loaded = load_chunks(&path).unwrap();
        assert_eq!(loaded.question_count(), 2);
        assert!(matches!(loaded, ChunkFile::Flat(_)));
    }

    #[test]
    fn test_topic_chunks_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chunks.json");

        save_chunks(&topic_chunks(), &path).unwrap();

        let loaded = load_chunks(&path).unwrap();
        assert_eq!(loaded.question_count(), 3);
        assert!(matches!(loaded, ChunkFile::Topics(_)));
    }

    #[test]
    fn test_flat_file_is_plain_string_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chunks.json");

        let chunks = ChunkFile::Flat(vec!["1. First.".to_string()]);
        save_chunks(&chunks, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let raw: Vec<String> = serde_json::from_str(&content).unwrap();
        assert_eq!(raw, vec!["1. First."]);
    }

    #[test]
    fn test_to_stored_carries_topics() {
        let stored = topic_chunks().to_stored();

        assert_eq!(stored.len(), 3);
        assert_eq!(stored[0].topic.as_deref(), Some("Polity"));
        assert_eq!(stored[1].text, "Discuss GST");
        assert_eq!(stored[1].topic.as_deref(), Some("Economy"));
    }

    #[test]
    fn test_to_stored_flat_has_no_topic() {
        let chunks = ChunkFile::Flat(vec!["1. First.".to_string()]);
        let stored = chunks.to_stored();
        assert_eq!(stored[0].topic, None);
    }

    #[test]
    fn test_tagged_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tagged_questions.json");

        let tagged = vec![crate::tag::TagTables::default().tag("1. Discuss GST.")];
        save_tagged(&tagged, &path).unwrap();

        let loaded = load_tagged(&path).unwrap();
        assert_eq!(loaded, tagged);
    }

    #[test]
    fn test_load_missing_artifact() {
        let result = load_chunks(Path::new("/nonexistent/chunks.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_artifact_saves_cleanly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chunks.json");

        save_chunks(&ChunkFile::Flat(Vec::new()), &path).unwrap();
        let loaded = load_chunks(&path).unwrap();
        assert!(loaded.is_empty());
    }
}
