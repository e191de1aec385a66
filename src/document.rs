//! Document representation for the question pipeline.
//!
//! Documents are represented as a collection of pages in physical page
//! order. PDF text arrives from `pdf-extract` as one string; form feeds
//! mark the page breaks, with a blank-line heuristic as fallback. Plain
//! text files are treated as a single page.

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extensions eligible for the corpus scan.
const ELIGIBLE_EXTENSIONS: [&str; 2] = ["pdf", "txt"];

/// A single page in a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// 1-indexed page number.
    pub number: usize,
    /// Text content of the page.
    pub content: String,
}

impl Page {
    /// Create a new page.
    pub fn new(number: usize, content: String) -> Self {
        Self { number, content }
    }
}

/// A document consisting of one or more pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document name/title.
    pub name: String,
    /// Original file path (if loaded from file).
    pub path: Option<PathBuf>,
    /// Pages in physical order.
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a document from raw text content as a single page.
    pub fn from_text(name: impl Into<String>, content: String) -> Self {
        Self {
            name: name.into(),
            path: None,
            pages: vec![Page::new(1, content)],
        }
    }

    /// Load a file, dispatching on its extension (`.pdf` vs plain text).
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PipelineError::DocumentNotFound(path.to_path_buf()));
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pdf") => Self::from_pdf_file(path),
            _ => Self::from_text_file(path),
        }
    }

    /// Load a PDF, extracting its text and splitting it into pages.
    pub fn from_pdf_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| PipelineError::io(path, e))?;

        let text = pdf_extract::extract_text_from_mem(&bytes)
            .map_err(|e| PipelineError::extraction(path, e.to_string()))?;

        if text.trim().is_empty() {
            return Err(PipelineError::extraction(path, "document contains no text"));
        }

        let pages = split_pages(&text)
            .into_iter()
            .enumerate()
            .map(|(i, content)| Page::new(i + 1, content))
            .collect();

        Ok(Self {
            name: document_name(path),
            path: Some(path.to_path_buf()),
            pages,
        })
    }

    /// Load a text file as a single-page document.
    pub fn from_text_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;

        Ok(Self {
            name: document_name(path),
            path: Some(path.to_path_buf()),
            pages: vec![Page::new(1, content)],
        })
    }

    /// Get total number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All page texts joined in page order, ready for line normalization.
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Derive a document name from its file stem.
fn document_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled")
        .to_string()
}

/// Split extracted text into page strings.
///
/// `pdf-extract` inserts form feeds (`\x0C`) between pages. If none are
/// present, fall back to triple newlines; failing that, the whole text is
/// one page.
fn split_pages(text: &str) -> Vec<String> {
    let parts: Vec<&str> = if text.contains('\x0C') {
        text.split('\x0C').collect()
    } else if text.contains("\n\n\n") {
        text.split("\n\n\n").collect()
    } else {
        vec![text]
    };

    parts
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Scan a directory for eligible documents, in deterministic (sorted) order.
///
/// Returns `InvalidCorpusPath` if the path is not a directory and
/// `EmptyCorpus` if the walk finds no eligible files.
pub fn find_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(PipelineError::InvalidCorpusPath(dir.to_path_buf()));
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(|ext| {
                    ELIGIBLE_EXTENSIONS
                        .iter()
                        .any(|e| ext.eq_ignore_ascii_case(e))
                })
                .unwrap_or(false)
        })
        .collect();

    paths.sort();

    if paths.is_empty() {
        return Err(PipelineError::EmptyCorpus(dir.to_path_buf()));
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_document_from_text() {
        let doc = Document::from_text("Test Doc", "This is the content.".to_string());
        assert_eq!(doc.name, "Test Doc");
        assert_eq!(doc.page_count(), 1);
        assert!(doc.path.is_none());
    }

    #[test]
    fn test_full_text_joins_pages() {
        let mut doc = Document::from_text("Test", "page one".to_string());
        doc.pages.push(Page::new(2, "page two".to_string()));
        assert_eq!(doc.full_text(), "page one\npage two");
    }

    #[test]
    fn test_split_pages_form_feed() {
        let pages = split_pages("page one\x0Cpage two\x0C");
        assert_eq!(pages, vec!["page one", "page two"]);
    }

    #[test]
    fn test_split_pages_blank_line_fallback() {
        let pages = split_pages("page one\n\n\npage two");
        assert_eq!(pages, vec!["page one", "page two"]);
    }

    #[test]
    fn test_split_pages_single_page() {
        let pages = split_pages("just one page\nwith two lines");
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_pdf_extraction_error_on_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"This is not a PDF").unwrap();

        let result = Document::from_pdf_file(&path);
        assert!(matches!(result, Err(PipelineError::Extraction { .. })));
    }

    #[test]
    fn test_load_missing_document() {
        let result = Document::load(Path::new("/nonexistent/paper.pdf"));
        assert!(matches!(result, Err(PipelineError::DocumentNotFound(_))));
    }

    #[test]
    fn test_find_documents_sorted() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.txt"), "b").unwrap();
        std::fs::write(dir.path().join("a.pdf"), "a").unwrap();
        std::fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let paths = find_documents(dir.path()).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("a.pdf"));
        assert!(paths[1].ends_with("b.txt"));
    }

    #[test]
    fn test_find_documents_empty_corpus() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let result = find_documents(dir.path());
        assert!(matches!(result, Err(PipelineError::EmptyCorpus(_))));
    }

    #[test]
    fn test_find_documents_invalid_path() {
        let result = find_documents(Path::new("/nonexistent/corpus"));
        assert!(matches!(result, Err(PipelineError::InvalidCorpusPath(_))));
    }
}
