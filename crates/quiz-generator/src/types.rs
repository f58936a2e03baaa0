//! Core types for quiz generation

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

/// The four option labels a question must carry
pub const OPTION_LABELS: [&str; 4] = ["A", "B", "C", "D"];

/// Difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Tiers in the order a mixed batch cycles through them
    pub const CYCLE: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Parse a tier name; unknown names yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Tier named by `value`, or medium when it is not a known tier
    pub fn parse_or_medium(value: &str) -> Self {
        Self::parse(value).unwrap_or(Difficulty::Medium)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Prompt guidance for this tier
    pub fn instruction(&self) -> &'static str {
        match self {
            Difficulty::Easy => {
                "Create simple, straightforward questions that test basic understanding and recall of key facts."
            }
            Difficulty::Medium => {
                "Create moderately challenging questions that test comprehension and application of concepts."
            }
            Difficulty::Hard => {
                "Create challenging questions that test analysis, synthesis, and critical thinking skills."
            }
        }
    }

    /// Weight range assigned to items of this tier in mixed batches
    pub fn weight_range(&self) -> RangeInclusive<u8> {
        match self {
            Difficulty::Easy => 1..=4,
            Difficulty::Medium => 5..=7,
            Difficulty::Hard => 8..=10,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validated multiple-choice question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizItem {
    /// Sequential id starting at 1
    pub id: u32,
    pub question: String,
    /// Exactly four entries, normally keyed `A`..`D`
    pub options: BTreeMap<String, String>,
    /// One of `A`, `B`, `C`, `D`
    pub correct_answer: String,
    pub explanation: String,
    pub difficulty: String,
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u8>,
}

impl QuizItem {
    /// The diagnostic item returned when the model output is unusable
    pub fn fallback(reason: &str) -> Self {
        let options = [
            "Unable to generate specific options",
            "Please check the content format",
            "API response parsing failed",
            "Contact support for assistance",
        ];
        Self {
            id: 1,
            question: "Based on the provided content, what is the main topic discussed?".to_string(),
            options: OPTION_LABELS
                .iter()
                .zip(options)
                .map(|(label, text)| (label.to_string(), text.to_string()))
                .collect(),
            correct_answer: "A".to_string(),
            explanation: format!("Quiz generation failed due to parsing error: {}", reason),
            difficulty: Difficulty::Medium.to_string(),
            topic: "Error".to_string(),
            weight: None,
        }
    }
}

/// Sampling parameters for one model call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: f32,
}

/// What `generate` produced.
///
/// `Fallback` means the model answered but nothing usable could be parsed
/// out of it; the placeholder item carries the reason.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Valid(Vec<QuizItem>),
    Fallback { item: QuizItem, reason: String },
}

impl GenerationOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, GenerationOutcome::Fallback { .. })
    }

    /// Number of items the outcome carries
    pub fn len(&self) -> usize {
        match self {
            GenerationOutcome::Valid(items) => items.len(),
            GenerationOutcome::Fallback { .. } => 1,
        }
    }

    /// Items as the HTTP layer reports them
    pub fn into_items(self) -> Vec<QuizItem> {
        match self {
            GenerationOutcome::Valid(items) => items,
            GenerationOutcome::Fallback { item, .. } => vec![item],
        }
    }
}
