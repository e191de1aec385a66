//! LLM prompts for question generation.

/// Collection of prompts used for retrieval-augmented generation.
pub struct Prompts;

impl Prompts {
    /// System prompt framing the model as an exam setter.
    pub fn system_exam_setter() -> &'static str {
        "You are an experienced UPSC examiner setting General Studies mains papers. \
         You write analytical, directive-led questions in the established UPSC register."
    }

    /// Build the generation prompt: new questions for a subject, shaped
    /// after the retrieved past-paper patterns.
    pub fn generate_questions(
        subject: &str,
        year: &str,
        count: usize,
        patterns: &[&str],
    ) -> String {
        let mut prompt = format!(
            "Generate {count} UPSC GS questions on '{subject}' based on patterns from year {year}. \
             Maintain UPSC tone and directive keywords.\n"
        );

        if !patterns.is_empty() {
            prompt.push_str("\nPast questions to pattern after:\n");
            for (i, pattern) in patterns.iter().enumerate() {
                prompt.push_str(&format!("{}. {}\n", i + 1, pattern));
            }
        }

        prompt.push_str("\nReturn one question per line, numbered.");
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_prompt_includes_request() {
        let prompt = Prompts::generate_questions("Polity", "2024", 3, &[]);
        assert!(prompt.contains("3 UPSC GS questions"));
        assert!(prompt.contains("'Polity'"));
        assert!(prompt.contains("2024"));
    }

    #[test]
    fn test_generate_prompt_lists_patterns() {
        let prompt =
            Prompts::generate_questions("Polity", "2024", 2, &["Discuss GST", "Explain Article 370"]);
        assert!(prompt.contains("1. Discuss GST"));
        assert!(prompt.contains("2. Explain Article 370"));
    }

    #[test]
    fn test_generate_prompt_omits_empty_pattern_section() {
        let prompt = Prompts::generate_questions("Polity", "2024", 2, &[]);
        assert!(!prompt.contains("Past questions"));
    }
}
