//! Quiz generation pipeline

use crate::config::GeneratorConfig;
use crate::errors::{GeneratorError, Result};
use crate::llm::{GeminiClient, LanguageModel};
use crate::parse::recover_quizzes;
use crate::prompt::build_quiz_prompt;
use crate::types::{Difficulty, GenerationOutcome, GenerationSettings, QuizItem};
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Generates validated quiz items from a text corpus.
///
/// Each call is independent: build the prompt, run the model on a spawned
/// task, recover what it can from the reply.
#[derive(Clone)]
pub struct QuizGenerator {
    config: GeneratorConfig,
    model: Arc<dyn LanguageModel>,
}

impl QuizGenerator {
    /// Create a generator backed by Gemini
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let model = GeminiClient::new(&config)?;
        Ok(Self::with_model(config, Arc::new(model)))
    }

    /// Create a generator over any model backend
    pub fn with_model(config: GeneratorConfig, model: Arc<dyn LanguageModel>) -> Self {
        Self { config, model }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn settings(&self) -> GenerationSettings {
        GenerationSettings {
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }

    /// Generate `count` questions at `difficulty` from `corpus`.
    ///
    /// Fails only on missing credentials or when the model call itself fails.
    /// Unusable replies come back as [`GenerationOutcome::Fallback`].
    pub async fn generate(
        &self,
        corpus: &str,
        count: usize,
        difficulty: &str,
    ) -> Result<GenerationOutcome> {
        if !self.config.has_api_key() {
            return Err(GeneratorError::Config(
                "Gemini API key not configured. Please set GEMINI_API_KEY environment variable."
                    .to_string(),
            ));
        }

        let prompt = build_quiz_prompt(corpus, count, difficulty, self.config.max_corpus_chars);
        info!(
            model = self.model.name(),
            count,
            difficulty,
            corpus_chars = corpus.chars().count(),
            "Generating quiz"
        );

        let model = Arc::clone(&self.model);
        let settings = self.settings();
        let reply = tokio::spawn(async move { model.complete(&prompt, settings).await })
            .await
            .map_err(|e| GeneratorError::Dispatch(e.to_string()))??;

        debug!(reply_chars = reply.len(), "Model replied");

        let outcome = recover_quizzes(&reply);
        info!(
            items = outcome.len(),
            fallback = outcome.is_fallback(),
            "Quiz generation finished"
        );
        Ok(outcome)
    }

    /// Generate a batch mixing all difficulty tiers.
    ///
    /// Cycles easy, medium, hard, asking each tier for a third of the total
    /// (rounded up, capped at what is still missing). Every kept item is
    /// tagged with its tier and a random weight from the tier's range. Tiers
    /// whose reply fell back to the placeholder contribute nothing; after
    /// `count + 3` model calls the batch is returned as is.
    pub async fn generate_mixed<R>(
        &self,
        corpus: &str,
        count: usize,
        rng: &mut R,
    ) -> Result<GenerationOutcome>
    where
        R: Rng + Send,
    {
        let per_call = count.div_ceil(Difficulty::CYCLE.len()).max(1);
        let max_calls = count.saturating_add(Difficulty::CYCLE.len());

        let mut collected: Vec<QuizItem> = Vec::new();
        let mut last_fallback = None;

        for tier in Difficulty::CYCLE.iter().cycle().take(max_calls) {
            if collected.len() >= count {
                break;
            }
            let wanted = per_call.min(count - collected.len());

            match self.generate(corpus, wanted, tier.as_str()).await? {
                GenerationOutcome::Valid(items) => {
                    for mut item in items {
                        item.difficulty = tier.to_string();
                        item.weight = Some(rng.gen_range(tier.weight_range()));
                        collected.push(item);
                    }
                }
                GenerationOutcome::Fallback { item, reason } => {
                    warn!(difficulty = %tier, error = %reason, "Tier produced no usable items");
                    last_fallback = Some((item, reason));
                }
            }
        }

        collected.truncate(count);
        for (index, item) in collected.iter_mut().enumerate() {
            item.id = index as u32 + 1;
        }

        match (collected.is_empty(), last_fallback) {
            (true, Some((item, reason))) => Ok(GenerationOutcome::Fallback { item, reason }),
            _ => Ok(GenerationOutcome::Valid(collected)),
        }
    }
}
