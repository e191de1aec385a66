//! Question Paper Indexer CLI
//!
//! Extracts exam questions from past-paper PDFs, tags and indexes them,
//! and generates new questions from the indexed patterns.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use question_paper_indexer::{
    config::Config,
    error::PipelineError,
    generate::{GenerateRequest, QuestionGenerator},
    llm::LlmClient,
    persistence::{self, ChunkFile},
    pipeline,
    store::{QuestionStore, store_exists},
    tag::{TagTables, UNKNOWN},
};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Question Paper Indexer - an exam question extraction and generation pipeline
#[derive(Parser)]
#[command(name = "question-indexer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract questions from a directory of past papers
    Parse {
        /// Directory containing the past-paper PDFs
        input_dir: PathBuf,

        /// Output path for the question-chunk file
        #[arg(short, long, default_value = "data/chunks.json")]
        output: PathBuf,

        /// Group questions under topic headers instead of a flat list
        #[arg(long)]
        topics: bool,

        /// Keep lines in every script (disable the language filter)
        #[arg(long)]
        keep_all_scripts: bool,
    },

    /// Tag extracted questions with marks, directive and subject
    Tag {
        /// Path to the question-chunk file
        #[arg(default_value = "data/chunks.json")]
        input: PathBuf,

        /// Output path for the tagged-question file
        #[arg(short, long, default_value = "data/tagged_questions.json")]
        output: PathBuf,
    },

    /// Add new questions from a chunk file to the question store
    Index {
        /// Path to the question-chunk file
        #[arg(default_value = "data/chunks.json")]
        input: PathBuf,

        /// Path to the question store
        #[arg(short, long, default_value = "data/question_store.json")]
        store: PathBuf,
    },

    /// Generate new questions patterned after the indexed ones
    Generate {
        /// Paper or subject label (e.g. "GS2", "Polity")
        subject: String,

        /// Year whose patterns to follow
        #[arg(short, long, default_value = "2024")]
        year: String,

        /// Number of questions to generate
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,

        /// Path to the question store
        #[arg(short, long, default_value = "data/question_store.json")]
        store: PathBuf,
    },

    /// Show information about the question store
    Info {
        /// Path to the question store
        #[arg(default_value = "data/question_store.json")]
        store: PathBuf,
    },

    /// Test LLM connection
    Test,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            input_dir,
            output,
            topics,
            keep_all_scripts,
        } => cmd_parse(input_dir, output, topics, keep_all_scripts),
        Commands::Tag { input, output } => cmd_tag(input, output),
        Commands::Index { input, store } => cmd_index(input, store),
        Commands::Generate {
            subject,
            year,
            count,
            store,
        } => cmd_generate(subject, year, count, store).await,
        Commands::Info { store } => cmd_info(store),
        Commands::Test => cmd_test().await,
    }
}

fn cmd_parse(
    input_dir: PathBuf,
    output: PathBuf,
    topics: bool,
    keep_all_scripts: bool,
) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    let exclude_scripts = if keep_all_scripts {
        Vec::new()
    } else {
        config.extraction.exclude_scripts.clone()
    };

    println!("Parsing papers in: {}", input_dir.display());

    let chunks = if topics {
        match pipeline::extract_topics(&input_dir, &exclude_scripts) {
            Ok((map, stats)) => {
                print_batch_stats(&stats);
                println!(
                    "  Topics:      {} ({} questions)",
                    map.len(),
                    map.question_count()
                );
                if stats.skipped_segments > 0 {
                    println!("  Skipped {} topic segments without questions", stats.skipped_segments);
                }
                ChunkFile::Topics(map.into_blocks())
            }
            Err(PipelineError::EmptyCorpus(path)) => {
                println!("No documents found in '{}'; writing empty chunk file.", path.display());
                ChunkFile::Topics(Vec::new())
            }
            Err(e) => return Err(e).context("Failed to extract topics"),
        }
    } else {
        match pipeline::extract_questions(&input_dir, &exclude_scripts) {
            Ok((questions, stats)) => {
                print_batch_stats(&stats);
                println!("  Questions:   {}", questions.len());
                ChunkFile::Flat(questions)
            }
            Err(PipelineError::EmptyCorpus(path)) => {
                println!("No documents found in '{}'; writing empty chunk file.", path.display());
                ChunkFile::Flat(Vec::new())
            }
            Err(e) => return Err(e).context("Failed to extract questions"),
        }
    };

    if chunks.is_empty() {
        println!("Warning: no questions extracted.");
    }

    persistence::save_chunks(&chunks, &output).context("Failed to save chunk file")?;
    println!("\nChunk file saved to: {}", output.display());

    Ok(())
}

fn print_batch_stats(stats: &pipeline::BatchStats) {
    println!("  Documents:   {} processed, {} failed", stats.processed, stats.failed);
}

fn cmd_tag(input: PathBuf, output: PathBuf) -> Result<()> {
    let chunks = persistence::load_chunks(&input).context("Failed to load chunk file")?;

    let tables = TagTables::default();
    let tagged = tables.tag_all(chunks.texts());

    let unknown_directive = tagged.iter().filter(|t| t.directive == UNKNOWN).count();
    let unknown_subject = tagged.iter().filter(|t| t.subject == UNKNOWN).count();

    println!("Tagged {} questions", tagged.len());
    println!("  Unknown directive: {}", unknown_directive);
    println!("  Unknown subject:   {}", unknown_subject);

    persistence::save_tagged(&tagged, &output).context("Failed to save tagged file")?;
    println!("\nTagged file saved to: {}", output.display());

    Ok(())
}

fn cmd_index(input: PathBuf, store_path: PathBuf) -> Result<()> {
    let chunks = persistence::load_chunks(&input).context("Failed to load chunk file")?;
    let candidates = chunks.to_stored();

    if store_exists(&store_path) {
        println!("Appending to existing question store at '{}'...", store_path.display());
    } else {
        println!("Creating new question store at '{}'...", store_path.display());
    }

    let mut store =
        QuestionStore::load_or_default(&store_path).context("Failed to load question store")?;

    let report = store.add_new(candidates);

    if report.added > 0 {
        store.save(&store_path).context("Failed to save question store")?;
        println!("Added {} new questions ({} already indexed).", report.added, report.skipped);
    } else {
        println!("No new questions to add ({} already indexed).", report.skipped);
    }

    println!("Store now holds {} questions.", store.len());

    Ok(())
}

async fn cmd_generate(subject: String, year: String, count: usize, store_path: PathBuf) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    config.validate_llm().context("Invalid configuration")?;

    let store =
        QuestionStore::load_or_default(&store_path).context("Failed to load question store")?;

    if store.is_empty() {
        println!("Warning: question store is empty; generating without patterns.");
    }

    println!("Generating {} questions on '{}' (patterns from {})", count, subject, year);
    println!("Using model: {}", config.llm.model);
    println!();

    let start = Instant::now();

    let generator = QuestionGenerator::new(LlmClient::new(config.llm.clone()));
    let request = GenerateRequest {
        subject,
        year,
        count,
    };

    let output = generator
        .generate(&store, &request)
        .await
        .context("Generation failed")?;

    println!("{}", output);
    println!();
    println!("Generated in {:.2?}", start.elapsed());

    Ok(())
}

fn cmd_info(store_path: PathBuf) -> Result<()> {
    if !store_exists(&store_path) {
        anyhow::bail!(
            "Store not found at '{}'. Run 'index' command first.",
            store_path.display()
        );
    }

    let store = QuestionStore::load(&store_path).context("Failed to load question store")?;
    let size = std::fs::metadata(&store_path)
        .with_context(|| format!("Failed to stat '{}'", store_path.display()))?
        .len();

    println!("Question Store Information");
    println!("{}", "─".repeat(40));
    println!("  Questions:   {}", store.len());
    println!("  Topics:      {}", store.topic_count());
    println!("  File size:   {:.1} KB", size as f64 / 1024.0);
    println!("  Store path:  {}", store_path.display());

    Ok(())
}

async fn cmd_test() -> Result<()> {
    println!("Testing LLM connection...\n");

    let config = Config::load().context("Failed to load configuration")?;

    println!("Configuration:");
    println!("  API Base:  {}", config.llm.api_base);
    println!("  Model:     {}", config.llm.model);
    println!(
        "  API Key:   {}...",
        &config.llm.api_key[..config.llm.api_key.len().min(8)]
    );
    println!();

    if let Err(e) = config.validate_llm() {
        println!("Configuration error: {}", e);
        return Ok(());
    }

    let client = LlmClient::new(config.llm);

    println!("Sending test request...");
    match client.test_connection().await {
        Ok(()) => {
            println!("Connection successful!");
        }
        Err(e) => {
            println!("Connection failed: {}", e);
        }
    }

    Ok(())
}
