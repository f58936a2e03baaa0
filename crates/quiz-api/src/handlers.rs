//! Route handlers

use crate::{error::ApiError, state::AppState};
use axum::{extract::State, Json};
use quiz_generator::{GenerationOutcome, GeneratorError, QuizItem};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info, warn};

const DEFAULT_QUIZ_COUNT: i64 = 5;

/// Largest `quiz_count` a single request may ask for
pub const MAX_QUIZ_COUNT: i64 = 100;

fn default_quiz_count() -> i64 {
    DEFAULT_QUIZ_COUNT
}

fn default_difficulty() -> String {
    "medium".to_string()
}

/// Body of `POST /generate-quiz`
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateQuizRequest {
    pub urls: Vec<String>,
    #[serde(default = "default_quiz_count")]
    pub quiz_count: i64,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
}

/// Body of `POST /generate-quiz-from-content`
#[derive(Debug, Clone, Deserialize)]
pub struct ContentQuizRequest {
    pub content_id: String,
    #[serde(default = "default_quiz_count")]
    pub quiz_count: i64,
}

/// Result of a generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResponse {
    pub success: bool,
    pub quizzes: Vec<QuizItem>,
    pub source_files: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QuizResponse {
    fn from_generation(result: Result<GenerationOutcome, GeneratorError>, source_files: Vec<String>) -> Self {
        match result {
            Ok(outcome) => Self {
                success: true,
                quizzes: outcome.into_items(),
                source_files,
                error: None,
            },
            Err(e) => {
                error!(error = %e, "Quiz generation failed");
                Self {
                    success: false,
                    quizzes: Vec::new(),
                    source_files: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Quiz Generator API is running" }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "Quiz Generator API" }))
}

/// Fetch every URL in order, then generate one batch from the combined text
pub async fn generate_quiz(
    State(state): State<AppState>,
    Json(request): Json<GenerateQuizRequest>,
) -> Result<Json<QuizResponse>, ApiError> {
    let count = validate_count(request.quiz_count)?;
    for url in &request.urls {
        validate_url(url)?;
    }

    info!(
        urls = request.urls.len(),
        count,
        difficulty = %request.difficulty,
        "Generating quiz from URLs"
    );

    let mut corpus = String::new();
    let mut source_files = Vec::with_capacity(request.urls.len());
    let mut has_text = false;

    for url in &request.urls {
        let extracted = state.extractor.extract(url).await.map_err(|e| {
            warn!(url = %url, error = %e, "Extraction failed");
            ApiError::BadRequest(format!("Error processing URL {}: {}", url, e))
        })?;

        has_text |= !extracted.is_blank();
        let (text, filename) = extracted.into_parts();
        corpus.push_str(&format!("\n\n--- Content from {} ---\n\n{}", filename, text));
        source_files.push(filename);
    }

    if !has_text {
        return Err(ApiError::BadRequest(
            "No text content could be extracted from the provided URLs".to_string(),
        ));
    }

    let result = state
        .generator
        .generate(&corpus, count, &request.difficulty)
        .await;
    Ok(Json(QuizResponse::from_generation(result, source_files)))
}

/// Generate a mixed-difficulty batch from stored content
pub async fn generate_quiz_from_content(
    State(state): State<AppState>,
    Json(request): Json<ContentQuizRequest>,
) -> Result<Json<QuizResponse>, ApiError> {
    let count = validate_count(request.quiz_count)?;

    let record = state
        .content
        .fetch(&request.content_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Content not found: {}", request.content_id)))?;

    let corpus = record.corpus();
    if corpus.trim().is_empty() {
        return Err(ApiError::BadRequest(format!(
            "Content {} has no text to generate questions from",
            record.id
        )));
    }

    info!(content_id = %record.id, count, "Generating mixed quiz from content");

    let mut rng = StdRng::from_entropy();
    let result = state
        .generator
        .generate_mixed(&corpus, count, &mut rng)
        .await;
    Ok(Json(QuizResponse::from_generation(result, vec![record.id])))
}

fn validate_count(quiz_count: i64) -> Result<usize, ApiError> {
    if !(1..=MAX_QUIZ_COUNT).contains(&quiz_count) {
        return Err(ApiError::BadRequest(format!(
            "quiz_count must be between 1 and {}, got {}",
            MAX_QUIZ_COUNT, quiz_count
        )));
    }
    Ok(quiz_count as usize)
}

fn validate_url(raw: &str) -> Result<(), ApiError> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| ApiError::Unprocessable(format!("Invalid URL {}: {}", raw, e)))?;
    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(()),
        scheme => Err(ApiError::Unprocessable(format!(
            "Invalid URL {}: scheme {} is not supported",
            raw, scheme
        ))),
    }
}
