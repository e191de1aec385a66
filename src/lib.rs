//! Question Paper Indexer - an exam question extraction and
//! retrieval-augmented generation pipeline.
//!
//! Past papers (bilingual PDFs) are parsed into structured question
//! records, tagged with marks, directive and subject, deduplicated into
//! a question store, and used at query time as patterns for LLM
//! question generation.
//!
//! # Overview
//!
//! The pipeline runs in stages, each with a flat-file artifact boundary:
//! 1. **Parse**: extract page text, normalize lines (dropping excluded
//!    scripts), segment into questions - line-oriented, or topic-grouped
//!    with the marker-oriented segmenter
//! 2. **Tag**: assign marks, directive keyword and subject category from
//!    immutable lookup tables
//! 3. **Index**: append only previously-unseen question texts to the
//!    store (exact-text dedup, idempotent)
//! 4. **Generate**: retrieve similar stored questions and ask the LLM to
//!    synthesize new ones in the same register
//!
//! # Quick Start
//!
//! ```no_run
//! use question_paper_indexer::{
//!     config::Config,
//!     generate::{GenerateRequest, QuestionGenerator},
//!     llm::LlmClient,
//!     pipeline,
//!     store::{QuestionStore, StoredQuestion},
//!     tag::TagTables,
//! };
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Load configuration
//!     let config = Config::load()?;
//!
//!     // Extract questions from a directory of past papers
//!     let (questions, stats) =
//!         pipeline::extract_questions(Path::new("pyq_data"), &config.extraction.exclude_scripts)?;
//!     println!("{} questions from {} documents", questions.len(), stats.processed);
//!
//!     // Tag them
//!     let tables = TagTables::default();
//!     let tagged = tables.tag_all(questions.iter().map(String::as_str));
//!     println!("tagged {} questions", tagged.len());
//!
//!     // Index only what the store has not seen yet
//!     let mut store = QuestionStore::load_or_default(Path::new("data/question_store.json"))?;
//!     let report = store.add_new(questions.iter().map(StoredQuestion::flat).collect());
//!     println!("added {}, skipped {}", report.added, report.skipped);
//!     store.save(Path::new("data/question_store.json"))?;
//!
//!     // Generate new questions from the stored patterns
//!     config.validate_llm()?;
//!     let generator = QuestionGenerator::new(LlmClient::new(config.llm.clone()));
//!     let request = GenerateRequest {
//!         subject: "Polity".to_string(),
//!         year: "2024".to_string(),
//!         count: 5,
//!     };
//!     let output = generator.generate(&store, &request).await?;
//!     println!("{output}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **Document**: page-based document representation with PDF extraction
//! - **normalize/segment**: line normalization and the two question
//!   segmenters sharing one boundary rule
//! - **TagTables**: pure keyword-table tagger
//! - **QuestionStore**: flat-file stand-in for the external vector store
//! - **QuestionGenerator**: retrieval-augmented generation via an
//!   OpenAI-compatible LLM client

pub mod config;
pub mod document;
pub mod error;
pub mod generate;
pub mod indexer;
pub mod llm;
pub mod normalize;
pub mod persistence;
pub mod pipeline;
pub mod segment;
pub mod store;
pub mod tag;

// Re-export commonly used types
pub use config::Config;
pub use document::Document;
pub use error::{PipelineError, Result};
pub use generate::{GenerateRequest, QuestionGenerator};
pub use indexer::IndexReport;
pub use llm::LlmClient;
pub use persistence::ChunkFile;
pub use segment::{TopicBlock, TopicMap};
pub use store::{QuestionStore, StoredQuestion};
pub use tag::{TagTables, TaggedQuestion};
