//! Question tagging.
//!
//! Assigns marks, a directive keyword and a subject category to each
//! question. Tagging is a pure function of the question text: the lookup
//! tables are immutable data owned by [`TagTables`], so identical text
//! always yields the identical tag triple.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Sentinel assigned when no directive or subject keyword matches.
pub const UNKNOWN: &str = "Unknown";

/// Leading question number: `12.` (segmenter output) or `Q12` (legacy
/// tagged input). Numbering restarts per document, so this is not a
/// global question index.
static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Q?(\d+)").expect("valid number regex"));

/// A tagged question record, serialized into the tagged-question file
/// and consumed downstream as embedding payload plus metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedQuestion {
    /// Full question text.
    pub question: String,
    /// Marks bucket (10 or 15 under the default scheme).
    pub marks: u32,
    /// First matching directive keyword, or `Unknown`.
    pub directive: String,
    /// First matching subject category, or `Unknown`.
    pub subject: String,
}

/// A subject category with its keyword set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectEntry {
    /// Category label (e.g. "Polity").
    pub subject: String,
    /// Lowercase keywords; any substring match assigns the category.
    pub keywords: Vec<String>,
}

/// Immutable tag lookup tables.
///
/// Order is significant twice over: the first directive in the list whose
/// lowercase form occurs in the text wins, and the first subject entry
/// with any keyword match wins. Table order is the tie-break, not
/// position in the text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagTables {
    /// Directive keywords, in priority order.
    pub directives: Vec<String>,
    /// Subject categories, in priority order.
    pub subjects: Vec<SubjectEntry>,
    /// Highest leading question number still tagged with `low_marks`.
    pub marks_threshold: u32,
    /// Marks for questions numbered at or below the threshold.
    pub low_marks: u32,
    /// Marks for higher-numbered or unnumbered questions.
    pub high_marks: u32,
}

impl Default for TagTables {
    fn default() -> Self {
        fn subject(name: &str, keywords: &[&str]) -> SubjectEntry {
            SubjectEntry {
                subject: name.to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            }
        }

        Self {
            directives: ["Discuss", "Analyze", "Evaluate", "Examine", "Justify"]
                .into_iter()
                .map(String::from)
                .collect(),
            subjects: vec![
                subject("Polity", &["parliament", "constitution", "federalism", "governance"]),
                subject("History", &["freedom", "british", "movement"]),
                subject("Geography", &["climate", "river", "disaster"]),
                subject("Society", &["gender", "caste", "education"]),
                subject("Economy", &["budget", "gdp", "inflation"]),
                subject("Ethics", &["ethics", "attitude", "integrity"]),
            ],
            marks_threshold: 10,
            low_marks: 10,
            high_marks: 15,
        }
    }
}

impl TagTables {
    /// Tag a single question.
    pub fn tag(&self, question: &str) -> TaggedQuestion {
        TaggedQuestion {
            question: question.to_string(),
            marks: self.marks_for(question),
            directive: self.directive_for(question),
            subject: self.subject_for(question),
        }
    }

    /// Tag a sequence of questions, preserving order.
    pub fn tag_all<'a, I>(&self, questions: I) -> Vec<TaggedQuestion>
    where
        I: IntoIterator<Item = &'a str>,
    {
        questions.into_iter().map(|q| self.tag(q)).collect()
    }

    /// Marks bucket from the leading question number.
    ///
    /// Numbering restarts per paper, so this stays a coarse threshold on
    /// the local number; an unnumbered question falls into the high
    /// bucket.
    fn marks_for(&self, question: &str) -> u32 {
        let number = LEADING_NUMBER
            .captures(question)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok());

        match number {
            Some(n) if n <= self.marks_threshold => self.low_marks,
            _ => self.high_marks,
        }
    }

    /// First directive whose lowercase form is a substring of the text.
    fn directive_for(&self, question: &str) -> String {
        let lower = question.to_lowercase();
        self.directives
            .iter()
            .find(|d| lower.contains(&d.to_lowercase()))
            .cloned()
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// First subject with any keyword substring match.
    fn subject_for(&self, question: &str) -> String {
        let lower = question.to_lowercase();
        self.subjects
            .iter()
            .find(|entry| entry.keywords.iter().any(|k| lower.contains(k.as_str())))
            .map(|entry| entry.subject.clone())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }
}
