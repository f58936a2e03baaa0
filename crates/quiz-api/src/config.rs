//! Server configuration
//!
//! Optional TOML file, overridden by command-line flags. Generator settings
//! come from the environment separately (see `quiz_generator::GeneratorConfig`).

use crate::content::ContentRecord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for the HTTP service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Download timeout per source URL, in seconds
    pub fetch_timeout_secs: u64,

    /// Entries served by `/generate-quiz-from-content`
    pub content: Vec<ContentRecord>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            fetch_timeout_secs: 30,
            content: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load from a TOML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Address string suitable for `TcpListener::bind`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
