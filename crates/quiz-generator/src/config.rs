//! Generator configuration
//!
//! Built once at startup and handed to [`crate::QuizGenerator::new`]. Nothing
//! below this point reads the process environment.

use crate::errors::{GeneratorError, Result};
use std::str::FromStr;

pub const DEFAULT_MODEL: &str = "gemini-pro";
pub const DEFAULT_MAX_TOKENS: u32 = 2000;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Corpus characters embedded in the prompt
pub const DEFAULT_MAX_CORPUS_CHARS: usize = 8000;

/// Configuration for the quiz generator and its LLM backend
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// API credential; generation refuses to run without one
    pub api_key: Option<String>,

    /// Model identifier
    pub model: String,

    /// Upper bound on generated tokens
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Base URL of the generative language API
    pub api_base: String,

    /// HTTP timeout for one model call
    pub timeout_secs: u64,

    /// How much of the corpus reaches the prompt
    pub max_corpus_chars: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: 120,
            max_corpus_chars: DEFAULT_MAX_CORPUS_CHARS,
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve from `GEMINI_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve from any key/value source.
    ///
    /// Recognised keys: `GEMINI_API_KEY`, `GEMINI_MODEL`, `GEMINI_MAX_TOKENS`,
    /// `GEMINI_TEMPERATURE`, `GEMINI_API_BASE`. A blank API key counts as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            api_key: present("GEMINI_API_KEY").map(|v| v.trim().to_string()),
            model: present("GEMINI_MODEL").unwrap_or(defaults.model),
            max_tokens: parse_or("GEMINI_MAX_TOKENS", present("GEMINI_MAX_TOKENS"), defaults.max_tokens)?,
            temperature: parse_or("GEMINI_TEMPERATURE", present("GEMINI_TEMPERATURE"), defaults.temperature)?,
            api_base: present("GEMINI_API_BASE").unwrap_or(defaults.api_base),
            timeout_secs: defaults.timeout_secs,
            max_corpus_chars: defaults.max_corpus_chars,
        })
    }

    /// Set the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API base URL
    pub fn with_api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| {
            GeneratorError::Config(format!("{} has an invalid value: {:?}", key, value))
        }),
    }
}
