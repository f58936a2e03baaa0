//! Quiz Generator - multiple-choice questions from plain text
//!
//! Builds an instruction prompt around a text corpus, runs it through an
//! LLM backend, and recovers validated quiz items from the reply. Replies
//! that cannot be used degrade to a single diagnostic placeholder item.
//!
//! # Example
//!
//! ```no_run
//! use quiz_generator::{GeneratorConfig, QuizGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), quiz_generator::GeneratorError> {
//!     let config = GeneratorConfig::from_env()?;
//!     let generator = QuizGenerator::new(config)?;
//!
//!     let outcome = generator
//!         .generate("Rust guarantees memory safety without a garbage collector.", 3, "easy")
//!         .await?;
//!     for quiz in outcome.into_items() {
//!         println!("{}. {}", quiz.id, quiz.question);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod errors;
pub mod generator;
pub mod llm;
pub mod parse;
pub mod prompt;
pub mod types;

pub use config::GeneratorConfig;
pub use errors::{GeneratorError, Result};
pub use generator::QuizGenerator;
pub use llm::{GeminiClient, LanguageModel};
pub use types::{Difficulty, GenerationOutcome, GenerationSettings, QuizItem};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        Difficulty, GenerationOutcome, GeneratorConfig, GeneratorError, LanguageModel,
        QuizGenerator, QuizItem,
    };
}
