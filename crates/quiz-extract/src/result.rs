//! Extraction input and output types

use crate::filename::{self, DocumentKind};
use serde::{Deserialize, Serialize};

/// A downloaded document awaiting text extraction.
///
/// Lives only for the duration of one extraction call.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Where the bytes came from
    pub url: String,

    /// Raw response body
    pub bytes: Vec<u8>,

    /// Inferred filename
    pub filename: String,
}

impl SourceDocument {
    /// Create a new source document
    pub fn new(url: impl Into<String>, bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            bytes,
            filename: filename.into(),
        }
    }

    /// Lowercased extension including the leading dot, or empty
    pub fn extension(&self) -> String {
        filename::extension(&self.filename)
    }

    /// Document kind implied by the extension
    pub fn kind(&self) -> Option<DocumentKind> {
        DocumentKind::from_extension(&self.extension())
    }
}

/// Text pulled out of one source document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResult {
    /// Normalized plain text
    pub text: String,

    /// Filename the text originated from
    pub filename: String,

    /// Source URL
    pub source: String,

    /// Declared content type of the response, if any
    pub content_type: Option<String>,

    /// Size of the downloaded body in bytes
    pub original_length: usize,

    /// Length of `text` in characters
    pub text_length: usize,
}

impl ExtractResult {
    pub fn new(text: String, filename: String, source: String) -> Self {
        let text_length = text.chars().count();
        Self {
            text,
            filename,
            source,
            content_type: None,
            original_length: 0,
            text_length,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_original_length(mut self, length: usize) -> Self {
        self.original_length = length;
        self
    }

    /// True when nothing but whitespace was extracted
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Split into `(text, filename)`
    pub fn into_parts(self) -> (String, String) {
        (self.text, self.filename)
    }
}
