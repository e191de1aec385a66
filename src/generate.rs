//! Retrieval-augmented question generation.
//!
//! Retrieves stored past questions similar to the requested subject and
//! asks the model to synthesize new ones shaped after those patterns.

use crate::error::Result;
use crate::llm::{LlmClient, Prompts};
use crate::store::QuestionStore;

/// Options for question generation.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// How many stored questions to retrieve as patterns.
    pub retrieval_k: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self { retrieval_k: 5 }
    }
}

/// A generation request, mirroring the operator-facing inputs.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Paper/subject label (e.g. "GS2", "Polity").
    pub subject: String,
    /// Year whose patterns to follow.
    pub year: String,
    /// Number of questions to produce.
    pub count: usize,
}

/// Question generator backed by the store and an LLM.
pub struct QuestionGenerator {
    client: LlmClient,
    options: GeneratorOptions,
}

impl QuestionGenerator {
    /// Create a new generator.
    pub fn new(client: LlmClient) -> Self {
        Self {
            client,
            options: GeneratorOptions::default(),
        }
    }

    /// Create with custom options.
    pub fn with_options(client: LlmClient, options: GeneratorOptions) -> Self {
        Self { client, options }
    }

    /// Generate questions for the request, patterning them after the
    /// most similar stored questions. Works with an empty store too; the
    /// prompt then carries no pattern section.
    pub async fn generate(&self, store: &QuestionStore, request: &GenerateRequest) -> Result<String> {
        let hits = store.similar(&request.subject, self.options.retrieval_k);
        let patterns: Vec<&str> = hits.iter().map(|h| h.question.text.as_str()).collect();

        let prompt = Prompts::generate_questions(
            &request.subject,
            &request.year,
            request.count,
            &patterns,
        );

        self.client
            .complete(Some(Prompts::system_exam_setter()), &prompt)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = GeneratorOptions::default();
        assert_eq!(options.retrieval_k, 5);
    }

    #[test]
    fn test_request_fields() {
        let request = GenerateRequest {
            subject: "GS2".to_string(),
            year: "2024".to_string(),
            count: 5,
        };
        assert_eq!(request.subject, "GS2");
        assert_eq!(request.count, 5);
    }
}
