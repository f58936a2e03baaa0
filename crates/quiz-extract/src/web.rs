//! Remote document fetching

use crate::{
    config::ExtractorConfig, error::Result, extract_document, filename, ExtractError,
    ExtractResult, Extractor, SourceDocument,
};
use reqwest::header::{HeaderMap, HeaderName, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Downloads a document from a URL and extracts its text.
///
/// Holds no per-request state, so one instance can serve concurrent callers.
pub struct UrlExtractor {
    config: ExtractorConfig,
    client: Client,
}

/// What came back from the server, before extraction
#[derive(Debug)]
pub struct Download {
    pub document: SourceDocument,
    pub content_type: Option<String>,
}

impl UrlExtractor {
    /// Create a new extractor with the given configuration
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(config.max_redirects)
            } else {
                reqwest::redirect::Policy::none()
            })
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ExtractError::Client(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Fetch the resource with a single GET and infer its filename
    pub async fn fetch(&self, source: &str) -> Result<Download> {
        let url = url::Url::parse(source)
            .map_err(|e| ExtractError::InvalidUrl(format!("{}: {}", source, e)))?;

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| self.download_error(source, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Http {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown status").to_string(),
            });
        }

        let content_type = header_value(response.headers(), CONTENT_TYPE);
        let disposition = header_value(response.headers(), CONTENT_DISPOSITION);

        if let Some(len) = response.content_length() {
            self.check_size(len as usize)?;
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.download_error(source, e))?;
        self.check_size(bytes.len())?;

        let name = filename::infer_filename(&url, disposition.as_deref(), content_type.as_deref());
        debug!(url = %source, filename = %name, bytes = bytes.len(), "Downloaded document");

        Ok(Download {
            document: SourceDocument::new(source, bytes.to_vec(), name),
            content_type,
        })
    }

    fn check_size(&self, size: usize) -> Result<()> {
        if size > self.config.max_bytes {
            return Err(ExtractError::ContentTooLarge {
                size,
                max: self.config.max_bytes,
            });
        }
        Ok(())
    }

    fn download_error(&self, source: &str, err: reqwest::Error) -> ExtractError {
        if err.is_timeout() {
            ExtractError::Timeout(self.config.timeout_secs)
        } else {
            ExtractError::Network(format!("Error downloading file from {}: {}", source, err))
        }
    }
}

fn header_value(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

#[async_trait::async_trait]
impl Extractor for UrlExtractor {
    async fn extract(&self, source: &str) -> Result<ExtractResult> {
        let Download {
            document,
            content_type,
        } = self.fetch(source).await?;

        let original_length = document.bytes.len();
        let text = extract_document(&document, &self.config)?;

        info!(
            url = %source,
            filename = %document.filename,
            chars = text.chars().count(),
            "Extracted document text"
        );

        let mut result = ExtractResult::new(text, document.filename, document.url)
            .with_original_length(original_length);
        if let Some(ct) = content_type {
            result = result.with_content_type(ct);
        }
        Ok(result)
    }
}
