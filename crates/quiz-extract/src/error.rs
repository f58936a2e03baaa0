//! Failures while fetching or reading a source document

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Why a source could not be turned into text
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Connection-level failure while downloading
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP error response
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Content too large
    #[error("Content too large: {size} bytes exceeds max {max} bytes")]
    ContentTooLarge { size: usize, max: usize },

    /// Timeout error
    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    /// Extension is neither `.docx` nor `.json`
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    /// The bytes are not a readable word-processing document
    #[error("Error processing DOCX file: {0}")]
    DocumentParse(String),

    /// Malformed JSON or invalid UTF-8
    #[error("Error parsing JSON file: {0}")]
    JsonParse(String),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// True for failures that happened while downloading the source
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            ExtractError::Network(_) | ExtractError::Http { .. } | ExtractError::Timeout(_)
        )
    }
}

impl From<serde_json::Error> for ExtractError {
    fn from(err: serde_json::Error) -> Self {
        ExtractError::JsonParse(err.to_string())
    }
}

#[cfg(feature = "docx")]
impl From<zip::result::ZipError> for ExtractError {
    fn from(err: zip::result::ZipError) -> Self {
        ExtractError::DocumentParse(err.to_string())
    }
}

#[cfg(feature = "docx")]
impl From<quick_xml::Error> for ExtractError {
    fn from(err: quick_xml::Error) -> Self {
        ExtractError::DocumentParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_family() {
        assert!(ExtractError::Network("refused".into()).is_fetch());
        assert!(ExtractError::Timeout(30).is_fetch());
        assert!(ExtractError::Http {
            status: 404,
            message: "Not Found".into()
        }
        .is_fetch());
        assert!(!ExtractError::UnsupportedType(".txt".into()).is_fetch());
        assert!(!ExtractError::JsonParse("eof".into()).is_fetch());
    }
}
