//! Download settings

use serde::{Deserialize, Serialize};

/// How source documents are downloaded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Per-download timeout in seconds
    pub timeout_secs: u64,

    /// Largest response body accepted, in bytes
    pub max_bytes: usize,

    /// Largest inflated `word/document.xml` accepted, in bytes
    pub max_document_bytes: usize,

    /// `User-Agent` header sent with every download
    pub user_agent: String,

    /// Follow 3xx responses
    pub follow_redirects: bool,

    /// Redirect hops allowed before giving up
    pub max_redirects: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_bytes: 25 * 1024 * 1024,
            max_document_bytes: 64 * 1024 * 1024,
            user_agent: format!("QuizExtract/{}", env!("CARGO_PKG_VERSION")),
            follow_redirects: true,
            max_redirects: 5,
        }
    }
}

impl ExtractorConfig {
    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the download size cap
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Set the cap on decompressed document size
    pub fn with_max_document_bytes(mut self, max_document_bytes: usize) -> Self {
        self.max_document_bytes = max_document_bytes;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
