//! Quiz API - HTTP surface for quiz generation
//!
//! Routes:
//! - `GET /` and `GET /health` - liveness
//! - `POST /generate-quiz` - quizzes from DOCX/JSON documents behind URLs
//! - `POST /generate-quiz-from-content` - mixed-difficulty quizzes from stored content

pub mod config;
pub mod content;
pub mod error;
pub mod handlers;
pub mod state;

pub use config::ServerConfig;
pub use content::{ContentRecord, ContentStore, InMemoryContentStore};
pub use error::ApiError;
pub use handlers::QuizResponse;
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/generate-quiz", post(handlers::generate_quiz))
        .route(
            "/generate-quiz-from-content",
            post(handlers::generate_quiz_from_content),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use quiz_extract::{ExtractorConfig, UrlExtractor};
    use quiz_generator::{GeneratorConfig, QuizGenerator};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let extractor = UrlExtractor::new(ExtractorConfig::default()).unwrap();
        let generator = QuizGenerator::new(GeneratorConfig::new()).unwrap();
        let state = AppState::new(
            Arc::new(extractor),
            generator,
            Arc::new(InMemoryContentStore::default()),
        );
        router(state)
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "healthy");
    }

    #[tokio::test]
    async fn test_cors_preflight_allowed() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/generate-quiz")
            .header(header::ORIGIN, "https://admin.example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert!(response.status().is_success());
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn test_malformed_body_rejected() {
        let request = Request::post("/generate-quiz")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"quiz_count": 2}"#))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
