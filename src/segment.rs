//! Question segmentation.
//!
//! Two segmenters share one numeric boundary rule (one or two digits
//! followed by a period):
//!
//! - [`segment_questions`] is line-oriented: a boundary at the start of a
//!   line opens a new question, following lines accumulate into it.
//! - [`TopicMap::merge_text`] is marker-oriented: the text is flattened,
//!   split on `Topic N:` headers, and each segment re-split on the same
//!   boundary pattern to separate the topic label from its questions.

use crate::normalize::flatten_lines;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// The shared question boundary: 1–2 digits followed by a period.
const BOUNDARY_PATTERN: &str = r"\d{1,2}\.";

/// Boundary anchored to the start of a line (question segmenter).
static LINE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{BOUNDARY_PATTERN}")).expect("valid boundary regex"));

/// Boundary anywhere in flattened text (topic segmenter).
static INLINE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(BOUNDARY_PATTERN).expect("valid boundary regex"));

/// Case-insensitive topic header: `Topic`, optional number, trailing colon.
static TOPIC_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\btopic\s*\d*\s*:").expect("valid marker regex"));

/// Trailing parenthesized 4-digit year, e.g. `... (2019)`.
static TRAILING_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*\d{4}\s*\)\s*$").expect("valid year regex"));

/// Leading year annotation, e.g. `Year: 2020 |` or `Year: 2020`.
static LEADING_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Year:\s*\d{4}\s*\|?\s*").expect("valid year regex"));

/// Check whether a line opens a new question.
pub fn is_boundary_line(line: &str) -> bool {
    LINE_BOUNDARY.is_match(line)
}

/// Group normalized lines into questions.
///
/// A boundary line starts a new question; non-boundary lines are appended
/// to the current question with a separating space. Lines before the first
/// boundary have no question to attach to and are discarded. The question
/// still accumulating at end of input is flushed, so trailing content is
/// never lost. Output order equals input order.
pub fn segment_questions<'a, I>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut questions = Vec::new();
    let mut current = String::new();

    for line in lines {
        if is_boundary_line(line) {
            if !current.is_empty() {
                questions.push(current.trim().to_string());
            }
            current = line.to_string();
        } else if !current.is_empty() {
            current.push(' ');
            current.push_str(line);
        }
    }

    if !current.is_empty() {
        questions.push(current.trim().to_string());
    }

    questions
}

/// Strip year annotations from a topic-segmented question and trim it.
///
/// Removes a trailing `(NNNN)` and a leading `Year: NNNN |` / `Year: NNNN`.
fn clean_question(raw: &str) -> String {
    let stripped = TRAILING_YEAR.replace(raw, "");
    let stripped = LEADING_YEAR.replace(stripped.trim(), "");
    stripped.trim().to_string()
}

/// A topic label with its ordered questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicBlock {
    /// Topic label, exactly as it appeared after the header marker.
    pub topic: String,
    /// Cleaned question strings, in document order.
    pub questions: Vec<String>,
}

/// Accumulating topic → questions mapping.
///
/// Topic labels recurring across documents concatenate their question
/// lists. Label equality is exact string comparison; whitespace or case
/// variants count as distinct topics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicMap {
    blocks: Vec<TopicBlock>,
    /// Segments discarded for having a header but no questions.
    #[serde(default)]
    pub skipped_segments: usize,
}

impl TopicMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Segment one document's text into this map.
    ///
    /// The text is flattened to a single line, split on topic header
    /// markers (text before the first marker is discarded), and each
    /// segment is re-split on the question boundary. The first fragment
    /// is the topic label, the rest are questions. Segments with fewer
    /// than two fragments carry no questions and are dropped and counted.
    pub fn merge_text(&mut self, text: &str) {
        let flat = flatten_lines(text);

        let mut segments = TOPIC_MARKER.split(&flat);
        // Everything before the first marker is preamble, not a topic.
        segments.next();

        for segment in segments {
            let fragments: Vec<&str> = INLINE_BOUNDARY.split(segment).collect();
            if fragments.len() < 2 {
                self.skipped_segments += 1;
                continue;
            }

            let topic = fragments[0].trim().to_string();
            let questions = fragments[1..]
                .iter()
                .map(|f| clean_question(f))
                .filter(|q| !q.is_empty())
                .collect::<Vec<_>>();

            self.push(topic, questions);
        }
    }

    /// Append questions under a label, concatenating on exact-label match.
    fn push(&mut self, topic: String, questions: Vec<String>) {
        match self.blocks.iter_mut().find(|b| b.topic == topic) {
            Some(block) => block.questions.extend(questions),
            None => self.blocks.push(TopicBlock { topic, questions }),
        }
    }

    /// Topic blocks in first-seen order.
    pub fn blocks(&self) -> &[TopicBlock] {
        &self.blocks
    }

    /// Consume the map, returning its blocks.
    pub fn into_blocks(self) -> Vec<TopicBlock> {
        self.blocks
    }

    /// Number of distinct topic labels.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check whether any topic has been recorded.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total questions across all topics.
    pub fn question_count(&self) -> usize {
        self.blocks.iter().map(|b| b.questions.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_line_detection() {
        assert!(is_boundary_line("1. What is federalism?"));
        assert!(is_boundary_line("12. Define caste."));
        assert!(!is_boundary_line("What is federalism?"));
        assert!(!is_boundary_line("123. three digits is not a boundary"));
        assert!(!is_boundary_line("1 missing period"));
    }

    #[test]
    fn test_segment_accumulates_continuation_lines() {
        let lines = vec![
            "1. What is federalism?",
            "Explain its origins.",
            "2. Define caste.",
        ];
        let questions = segment_questions(lines);
        assert_eq!(
            questions,
            vec![
                "1. What is federalism? Explain its origins.",
                "2. Define caste.",
            ]
        );
    }

    #[test]
    fn test_segment_no_boundaries_yields_empty() {
        let lines = vec!["preamble text", "more preamble", "still no numbering"];
        assert!(segment_questions(lines).is_empty());
    }

    #[test]
    fn test_segment_flushes_trailing_question() {
        let lines = vec!["1. Only question", "with a continuation"];
        let questions = segment_questions(lines);
        assert_eq!(questions, vec!["1. Only question with a continuation"]);
    }

    #[test]
    fn test_segment_discards_lines_before_first_boundary() {
        let lines = vec!["GENERAL STUDIES PAPER I", "1. Discuss GST."];
        let questions = segment_questions(lines);
        assert_eq!(questions, vec!["1. Discuss GST."]);
    }

    #[test]
    fn test_segment_preserves_order() {
        let lines = vec!["9. ninth", "2. second", "1. first"];
        let questions = segment_questions(lines);
        assert_eq!(questions, vec!["9. ninth", "2. second", "1. first"]);
    }

    #[test]
    fn test_clean_question_strips_trailing_year() {
        assert_eq!(clean_question("Explain Article 370 (2019)"), "Explain Article 370");
        assert_eq!(clean_question("Explain Article 370 ( 2019 ) "), "Explain Article 370");
    }

    #[test]
    fn test_clean_question_strips_leading_year() {
        assert_eq!(clean_question("Year: 2020 | Discuss GST"), "Discuss GST");
        assert_eq!(clean_question("Year: 2020 Discuss GST"), "Discuss GST");
    }

    #[test]
    fn test_topic_map_spec_example() {
        let mut map = TopicMap::new();
        map.merge_text("Topic 1: Polity 1. Explain Article 370 (2019) 2. Year: 2020 | Discuss GST");

        assert_eq!(map.len(), 1);
        let block = &map.blocks()[0];
        assert_eq!(block.topic, "Polity");
        assert_eq!(block.questions, vec!["Explain Article 370", "Discuss GST"]);
    }

    #[test]
    fn test_topic_map_discards_preamble() {
        let mut map = TopicMap::new();
        map.merge_text("Instructions: answer all. Topic: History 1. Trace the freedom movement.");

        assert_eq!(map.len(), 1);
        assert_eq!(map.blocks()[0].topic, "History");
    }

    #[test]
    fn test_topic_map_skips_header_without_questions() {
        let mut map = TopicMap::new();
        map.merge_text("Topic 1: Polity Topic 2: Economy 1. Discuss the budget.");

        // "Polity" has no question boundary after it, so it is dropped.
        assert_eq!(map.len(), 1);
        assert_eq!(map.blocks()[0].topic, "Economy");
        assert_eq!(map.skipped_segments, 1);
    }

    #[test]
    fn test_topic_map_accumulates_across_documents() {
        let mut map = TopicMap::new();
        map.merge_text("Topic: Polity 1. First question.");
        map.merge_text("Topic: Polity 1. Second question.");
        map.merge_text("Topic: Economy 1. Third question.");

        assert_eq!(map.len(), 2);
        assert_eq!(map.blocks()[0].questions.len(), 2);
        assert_eq!(map.question_count(), 3);
    }

    #[test]
    fn test_topic_labels_match_exactly() {
        let mut map = TopicMap::new();
        map.merge_text("Topic: Polity 1. One.");
        map.merge_text("Topic: polity 1. Two.");

        // Case variants are distinct topics.
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_topic_marker_case_insensitive() {
        let mut map = TopicMap::new();
        map.merge_text("TOPIC 3: Geography 1. Describe monsoon patterns.");
        assert_eq!(map.blocks()[0].topic, "Geography");
    }

    #[test]
    fn test_topic_map_multiline_input() {
        let mut map = TopicMap::new();
        map.merge_text("Topic 1: Polity\n1. Explain Article 370\n(2019)\n2. Discuss GST\n");

        let block = &map.blocks()[0];
        assert_eq!(block.topic, "Polity");
        assert_eq!(block.questions, vec!["Explain Article 370", "Discuss GST"]);
    }
}
