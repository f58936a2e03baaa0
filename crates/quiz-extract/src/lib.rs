//! # Quiz Extract
//!
//! Turns a URL pointing at a document into plain text that can be handed to an LLM.
//!
//! Two document kinds are understood:
//!
//! - **DOCX**: paragraph text followed by table rows (`cell | cell`)
//! - **JSON**: the value tree flattened into `path: value` lines
//!
//! ## Example
//!
//! ```rust,ignore
//! use quiz_extract::{Extractor, ExtractorConfig, UrlExtractor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extractor = UrlExtractor::new(ExtractorConfig::default())?;
//!     let result = extractor.extract("https://example.com/notes.docx").await?;
//!     println!("{}: {}", result.filename, result.text);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────────┐
//! │    URL      │ ──► │    Fetch     │ ──► │ Filename / kind │
//! │             │     │ (reqwest)    │     │   inference     │
//! └─────────────┘     └──────────────┘     └─────────────────┘
//!                                                   │
//!                                   ┌───────────────┴───────────────┐
//!                                   ▼                               ▼
//!                          ┌─────────────────┐             ┌─────────────────┐
//!                          │  DOCX (zip+xml) │             │  JSON flatten   │
//!                          └─────────────────┘             └─────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod filename;
pub mod json;
pub mod result;

#[cfg(feature = "docx")]
pub mod docx;

#[cfg(feature = "web")]
pub mod web;

pub use config::ExtractorConfig;
pub use error::{ExtractError, Result};
pub use filename::DocumentKind;
pub use result::{ExtractResult, SourceDocument};

#[cfg(feature = "web")]
pub use web::UrlExtractor;

/// Common trait for all extractors
#[async_trait::async_trait]
pub trait Extractor: Send + Sync {
    /// Extract text content from the given source
    async fn extract(&self, source: &str) -> Result<ExtractResult>;
}

/// Extract text from an already downloaded document.
///
/// Dispatches on the lowercased extension of `doc.filename`.
pub fn extract_document(doc: &SourceDocument, config: &ExtractorConfig) -> Result<String> {
    match doc.kind() {
        Some(DocumentKind::Docx) => extract_docx(&doc.bytes, config.max_document_bytes),
        Some(DocumentKind::Json) => json::extract_text(&doc.bytes),
        None => Err(ExtractError::UnsupportedType(doc.extension())),
    }
}

#[cfg(feature = "docx")]
fn extract_docx(bytes: &[u8], max_part_bytes: usize) -> Result<String> {
    docx::extract_text(bytes, max_part_bytes)
}

#[cfg(not(feature = "docx"))]
fn extract_docx(_bytes: &[u8], _max_part_bytes: usize) -> Result<String> {
    Err(ExtractError::UnsupportedType(".docx".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_document_rejects_unknown_extension() {
        let doc = SourceDocument::new("https://example.com/a.pdf", b"%PDF".to_vec(), "a.pdf");
        let err = extract_document(&doc, &ExtractorConfig::default()).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedType(ref ext) if ext == ".pdf"));
        assert_eq!(err.to_string(), "Unsupported file type: .pdf");
    }

    #[test]
    fn test_extract_document_dispatches_json_case_insensitively() {
        let doc = SourceDocument::new(
            "https://example.com/DATA.JSON",
            br#"{"title": "Rust"}"#.to_vec(),
            "DATA.JSON",
        );
        assert_eq!(extract_document(&doc, &ExtractorConfig::default()).unwrap(), "title: Rust");
    }
}
