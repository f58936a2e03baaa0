//! Model response parsing and validation
//!
//! The model is asked for bare JSON but does not always comply. Parsing is
//! attempted on the whole reply first, then on a fenced ```json block, then
//! on the span between the first `{` and the last `}`. Whatever parses is
//! validated item by item; items that fail validation are dropped.

use crate::errors::{GeneratorError, Result};
use crate::types::{GenerationOutcome, QuizItem, OPTION_LABELS};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

static JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("fence pattern is valid"));

/// Turn raw model text into a [`GenerationOutcome`], never failing
pub fn recover_quizzes(response: &str) -> GenerationOutcome {
    match parse_quiz_response(response) {
        Ok(items) => GenerationOutcome::Valid(items),
        Err(e) => {
            let reason = e.to_string();
            warn!(error = %reason, "Falling back to placeholder quiz");
            GenerationOutcome::Fallback {
                item: QuizItem::fallback(&reason),
                reason,
            }
        }
    }
}

/// Parse and validate a model reply
pub fn parse_quiz_response(response: &str) -> Result<Vec<QuizItem>> {
    let value = match serde_json::from_str::<Value>(response) {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "Reply is not bare JSON, searching for an embedded object");
            let candidate = extract_json_candidate(response).ok_or(GeneratorError::NoJsonFound)?;
            serde_json::from_str(candidate)?
        }
    };
    validate_quizzes(&value)
}

/// Locate the JSON payload inside a chatty reply
pub fn extract_json_candidate(response: &str) -> Option<&str> {
    if let Some(captures) = JSON_FENCE.captures(response) {
        return captures.get(1).map(|m| m.as_str());
    }

    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (end > start).then(|| &response[start..=end])
}

/// Check the `{"quizzes": [...]}` envelope and keep the well-formed items.
///
/// Surviving items are numbered 1..n in order. Ids follow the kept items,
/// not the item's position in the reply, so dropping an item leaves no gap.
pub fn validate_quizzes(value: &Value) -> Result<Vec<QuizItem>> {
    let quizzes = value
        .as_object()
        .and_then(|obj| obj.get("quizzes"))
        .ok_or_else(|| GeneratorError::Schema("missing 'quizzes' key".to_string()))?
        .as_array()
        .ok_or_else(|| GeneratorError::Schema("'quizzes' should be a list".to_string()))?;

    let mut items = Vec::with_capacity(quizzes.len());
    for (index, raw) in quizzes.iter().enumerate() {
        match format_item(raw) {
            Ok(mut item) => {
                item.id = items.len() as u32 + 1;
                items.push(item);
            }
            Err(reason) => warn!(index, reason, "Skipping invalid quiz item"),
        }
    }

    if items.is_empty() {
        return Err(GeneratorError::EmptyResult);
    }
    Ok(items)
}

fn format_item(raw: &Value) -> std::result::Result<QuizItem, &'static str> {
    let obj = raw.as_object().ok_or("item is not an object")?;

    let question = text_field(obj, "question").unwrap_or_default();
    if question.is_empty() {
        return Err("missing question");
    }

    let options = match obj.get("options") {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(label, text)| (label.clone(), scalar_text(text)))
            .collect::<BTreeMap<_, _>>(),
        _ => return Err("options is not a mapping"),
    };
    if options.len() != OPTION_LABELS.len() {
        return Err("options must have exactly four entries");
    }

    let correct_answer = text_field(obj, "correct_answer")
        .unwrap_or_default()
        .to_uppercase();
    if !OPTION_LABELS.contains(&correct_answer.as_str()) {
        return Err("correct_answer is not one of A, B, C, D");
    }

    Ok(QuizItem {
        id: 0,
        question,
        options,
        correct_answer,
        explanation: text_field(obj, "explanation").unwrap_or_default(),
        difficulty: text_field(obj, "difficulty").unwrap_or_else(|| "medium".to_string()),
        topic: text_field(obj, "topic").unwrap_or_else(|| "General".to_string()),
        weight: None,
    })
}

/// Trimmed text of a scalar field; `None` when missing, null or structured
fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::Null | Value::Object(_) | Value::Array(_) => None,
        value => Some(scalar_text(value)),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}
