//! Line normalization for extracted document text.
//!
//! PDF extraction yields text with ragged line breaks, blank lines and,
//! for bilingual papers, interleaved translations in a second script.
//! Normalization reduces that to an ordered sequence of trimmed,
//! non-empty lines, optionally dropping lines in excluded scripts.

use serde::{Deserialize, Serialize};

/// An inclusive range of Unicode code points identifying a script.
///
/// Lines containing any code point inside an excluded range are dropped
/// during normalization. Which ranges are excluded is configuration
/// (`extraction.exclude_scripts`), not a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRange {
    /// First code point of the range.
    pub low: u32,
    /// Last code point of the range (inclusive).
    pub high: u32,
}

impl ScriptRange {
    /// Devanagari block (U+0900–U+097F), the Hindi half of bilingual papers.
    pub const DEVANAGARI: ScriptRange = ScriptRange {
        low: 0x0900,
        high: 0x097F,
    };

    /// Create a new range. `low` and `high` are inclusive code points.
    pub fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    /// Check whether a character falls inside this range.
    pub fn contains(&self, c: char) -> bool {
        let cp = c as u32;
        cp >= self.low && cp <= self.high
    }
}

/// Split text into trimmed, non-empty lines, dropping any line that
/// contains a code point from one of the excluded script ranges.
///
/// Pass an empty slice to keep every script.
pub fn normalize_lines(text: &str, exclude_scripts: &[ScriptRange]) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| {
            !line
                .chars()
                .any(|c| exclude_scripts.iter().any(|r| r.contains(c)))
        })
        .map(str::to_string)
        .collect()
}

/// Flatten text into a single line: every run of line breaks becomes one
/// space. Used by the topic segmenter, whose structure is marker-oriented
/// rather than line-oriented.
pub fn flatten_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_drops_empty() {
        let text = "  first line  \n\n\t\nsecond line\n   ";
        let lines = normalize_lines(text, &[]);
        assert_eq!(lines, vec!["first line", "second line"]);
    }

    #[test]
    fn test_normalize_preserves_order() {
        let text = "1. alpha\nbeta\n2. gamma";
        let lines = normalize_lines(text, &[]);
        assert_eq!(lines, vec!["1. alpha", "beta", "2. gamma"]);
    }

    #[test]
    fn test_script_filter_drops_devanagari_lines() {
        let text = "What is federalism?\nसंघवाद क्या है?\nExplain its origins.";
        let lines = normalize_lines(text, &[ScriptRange::DEVANAGARI]);
        assert_eq!(lines, vec!["What is federalism?", "Explain its origins."]);
    }

    #[test]
    fn test_script_filter_drops_mixed_script_lines() {
        // A single excluded code point anywhere in the line drops it.
        let text = "Explain GST (वस्तु कर)\nExplain GST";
        let lines = normalize_lines(text, &[ScriptRange::DEVANAGARI]);
        assert_eq!(lines, vec!["Explain GST"]);
    }

    #[test]
    fn test_no_filter_keeps_all_scripts() {
        let text = "English line\nसंघवाद";
        let lines = normalize_lines(text, &[]);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_configurable_ranges() {
        // Excluding Bengali leaves Devanagari untouched.
        let bengali = ScriptRange::new(0x0980, 0x09FF);
        let text = "English\nসংবিধান\nसंघवाद";
        let lines = normalize_lines(text, &[bengali]);
        assert_eq!(lines, vec!["English", "संघवाद"]);
    }

    #[test]
    fn test_flatten_lines() {
        let text = "Topic 1: Polity\n1. Explain Article 370\n(2019)\n";
        assert_eq!(flatten_lines(text), "Topic 1: Polity 1. Explain Article 370 (2019)");
    }

    #[test]
    fn test_range_contains() {
        assert!(ScriptRange::DEVANAGARI.contains('क'));
        assert!(!ScriptRange::DEVANAGARI.contains('k'));
    }
}
