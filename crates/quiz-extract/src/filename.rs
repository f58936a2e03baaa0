//! Filename and document kind inference

use std::path::Path;

/// Name used when neither the URL, the headers nor the content type help
pub const DEFAULT_FILENAME: &str = "downloaded_file";

/// Document formats the extractor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Docx,
    Json,
}

impl DocumentKind {
    /// Map a lowercased extension (with leading dot) to a kind
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            ".docx" => Some(DocumentKind::Docx),
            ".json" => Some(DocumentKind::Json),
            _ => None,
        }
    }
}

/// Lowercased extension of `filename` including the dot, or an empty string.
///
/// Dotfiles such as `.json` have no extension.
pub fn extension(filename: &str) -> String {
    Path::new(&filename.to_lowercase())
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Work out a filename for a downloaded resource.
///
/// The last URL path segment wins when it contains a dot. Otherwise the
/// `Content-Disposition` header is consulted, and failing that a default
/// name is derived from the declared content type.
pub fn infer_filename(
    url: &url::Url,
    content_disposition: Option<&str>,
    content_type: Option<&str>,
) -> String {
    let from_path = url.path().rsplit('/').next().unwrap_or_default();
    if !from_path.is_empty() && from_path.contains('.') {
        return from_path.to_string();
    }

    if let Some(name) = content_disposition.and_then(disposition_filename) {
        return name;
    }

    default_for_content_type(content_type.unwrap_or_default())
}

/// Pull `filename=` out of a `Content-Disposition` header value
fn disposition_filename(header: &str) -> Option<String> {
    let (_, rest) = header.split_once("filename=")?;
    let value = rest.split(';').next().unwrap_or_default().trim();
    let value = value.trim_matches('"').trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn default_for_content_type(content_type: &str) -> String {
    let content_type = content_type.to_lowercase();
    if content_type.contains("json") {
        format!("{}.json", DEFAULT_FILENAME)
    } else if content_type.contains("word") || content_type.contains("docx") {
        format!("{}.docx", DEFAULT_FILENAME)
    } else {
        DEFAULT_FILENAME.to_string()
    }
}
