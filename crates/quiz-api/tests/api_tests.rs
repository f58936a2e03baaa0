use axum::{routing::get, Router};
use quiz_api::{router, AppState, ContentRecord, InMemoryContentStore, QuizResponse};
use quiz_extract::{ExtractorConfig, UrlExtractor};
use quiz_generator::{GenerationSettings, GeneratorConfig, LanguageModel, QuizGenerator};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// Replays canned replies and records the prompts it was given
#[derive(Default)]
struct ScriptedModel {
    replies: Mutex<VecDeque<quiz_generator::Result<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    fn new(replies: Vec<quiz_generator::Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LanguageModel for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, prompt: &str, _settings: GenerationSettings) -> quiz_generator::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("no more replies".to_string()))
    }
}

fn reply(count: usize) -> quiz_generator::Result<String> {
    let quizzes: Vec<_> = (1..=count)
        .map(|n| {
            json!({
                "question": format!("Who owns value {}?", n),
                "options": {"A": "The caller", "B": "The callee", "C": "Nobody", "D": "The heap"},
                "correct_answer": "a",
                "explanation": "Ownership moves into the callee.",
                "difficulty": "medium",
                "topic": "Ownership"
            })
        })
        .collect();
    Ok(json!({ "quizzes": quizzes }).to_string())
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn spawn_document_server() -> SocketAddr {
    let app = Router::new()
        .route(
            "/ownership.json",
            get(|| async { r#"{"title": "Ownership", "rules": ["one owner", "dropped at scope end"]}"# }),
        )
        .route(
            "/borrowing.json",
            get(|| async { r#"{"title": "Borrowing", "shared": "many readers"}"# }),
        )
        .route("/empty.json", get(|| async { r#"{"note": null}"# }));
    serve(app).await
}

struct TestApp {
    addr: SocketAddr,
    model: Arc<ScriptedModel>,
    http: reqwest::Client,
}

impl TestApp {
    async fn start(config: GeneratorConfig, replies: Vec<quiz_generator::Result<String>>) -> Self {
        let model = ScriptedModel::new(replies);
        let extractor = UrlExtractor::new(ExtractorConfig::default().with_timeout(5)).unwrap();
        let generator = QuizGenerator::with_model(config, model.clone());
        let content = InMemoryContentStore::new(vec![ContentRecord::new(
            "rust-ownership",
            "Ownership",
            "Every value in Rust has exactly one owner.",
        )]);
        let state = AppState::new(Arc::new(extractor), generator, Arc::new(content));
        let addr = serve(router(state)).await;

        Self {
            addr,
            model,
            http: reqwest::Client::new(),
        }
    }

    async fn configured(replies: Vec<quiz_generator::Result<String>>) -> Self {
        Self::start(GeneratorConfig::new().with_api_key("test-key"), replies).await
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .http
            .post(format!("http://{}{}", self.addr, path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }
}

#[tokio::test]
async fn test_root_and_health() {
    let app = TestApp::configured(vec![]).await;

    let root: Value = reqwest::get(format!("http://{}/", app.addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(root, json!({"message": "Quiz Generator API is running"}));

    let health: Value = reqwest::get(format!("http://{}/health", app.addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health, json!({"status": "healthy", "service": "Quiz Generator API"}));
}

#[tokio::test]
async fn test_two_json_urls_produce_requested_quizzes() {
    let docs = spawn_document_server().await;
    let app = TestApp::configured(vec![reply(3)]).await;

    let (status, body) = app
        .post(
            "/generate-quiz",
            json!({
                "urls": [
                    format!("http://{}/ownership.json", docs),
                    format!("http://{}/borrowing.json", docs),
                ],
                "quiz_count": 3,
                "difficulty": "easy"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let response: QuizResponse = serde_json::from_value(body).unwrap();
    assert!(response.success);
    assert_eq!(response.quizzes.len(), 3);
    assert_eq!(response.quizzes[0].correct_answer, "A");
    assert_eq!(response.source_files, vec!["ownership.json", "borrowing.json"]);

    let prompt = &app.model.prompts()[0];
    let first = prompt.find("--- Content from ownership.json ---").unwrap();
    let second = prompt.find("--- Content from borrowing.json ---").unwrap();
    assert!(first < second);
    assert!(prompt.contains("title: Ownership"));
    assert!(prompt.contains("difficulty level: easy"));
}

#[tokio::test]
async fn test_missing_document_is_bad_request_naming_url() {
    let docs = spawn_document_server().await;
    let app = TestApp::configured(vec![reply(1)]).await;
    let missing = format!("http://{}/gone.json", docs);

    let (status, body) = app
        .post(
            "/generate-quiz",
            json!({ "urls": [format!("http://{}/ownership.json", docs), missing.clone()] }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains(&missing), "{}", detail);
    assert!(detail.contains("404"), "{}", detail);
    assert!(app.model.prompts().is_empty());
}

#[tokio::test]
async fn test_document_without_text_is_bad_request() {
    let docs = spawn_document_server().await;
    let app = TestApp::configured(vec![]).await;

    let (status, body) = app
        .post(
            "/generate-quiz",
            json!({ "urls": [format!("http://{}/empty.json", docs)] }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "No text content could be extracted from the provided URLs"
    );
}

#[tokio::test]
async fn test_request_validation() {
    let app = TestApp::configured(vec![]).await;

    let (status, body) = app
        .post("/generate-quiz", json!({ "urls": ["definitely not a url"] }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("definitely not a url"));

    let (status, _) = app
        .post(
            "/generate-quiz",
            json!({ "urls": ["https://example.com/a.json"], "quiz_count": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_api_key_reports_failure_in_body() {
    let docs = spawn_document_server().await;
    let app = TestApp::start(GeneratorConfig::new(), vec![reply(1)]).await;

    let (status, body) = app
        .post(
            "/generate-quiz",
            json!({ "urls": [format!("http://{}/ownership.json", docs)], "quiz_count": 1 }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["quizzes"], json!([]));
    assert_eq!(body["source_files"], json!([]));
    assert!(body["error"].as_str().unwrap().contains("GEMINI_API_KEY"));
}

#[tokio::test]
async fn test_unparseable_reply_still_succeeds_with_placeholder() {
    let docs = spawn_document_server().await;
    let app = TestApp::configured(vec![Ok("I cannot help with that.".to_string())]).await;

    let (status, body) = app
        .post(
            "/generate-quiz",
            json!({ "urls": [format!("http://{}/borrowing.json", docs)], "quiz_count": 2 }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["quizzes"].as_array().unwrap().len(), 1);
    assert_eq!(body["quizzes"][0]["topic"], "Error");
}

#[tokio::test]
async fn test_content_endpoint_mixes_difficulties() {
    let app = TestApp::configured(vec![reply(1), reply(1), reply(1)]).await;

    let (status, body) = app
        .post(
            "/generate-quiz-from-content",
            json!({ "content_id": "rust-ownership", "quiz_count": 3 }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let response: QuizResponse = serde_json::from_value(body).unwrap();
    assert!(response.success);
    assert_eq!(response.source_files, vec!["rust-ownership"]);

    let tiers: Vec<_> = response.quizzes.iter().map(|q| q.difficulty.as_str()).collect();
    assert_eq!(tiers, vec!["easy", "medium", "hard"]);
    let weights: Vec<_> = response.quizzes.iter().map(|q| q.weight.unwrap()).collect();
    assert!((1..=4).contains(&weights[0]));
    assert!((5..=7).contains(&weights[1]));
    assert!((8..=10).contains(&weights[2]));

    assert!(app.model.prompts()[0].contains("Every value in Rust has exactly one owner."));
}

#[tokio::test]
async fn test_unknown_content_is_not_found() {
    let app = TestApp::configured(vec![]).await;

    let (status, body) = app
        .post("/generate-quiz-from-content", json!({ "content_id": "missing" }))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().contains("missing"));
}

#[tokio::test]
async fn test_oversized_quiz_count_is_bad_request() {
    let app = TestApp::configured(vec![reply(1)]).await;

    for count in [json!(101), json!(1_000_000_000_000_i64), json!(i64::MAX)] {
        let (status, body) = app
            .post(
                "/generate-quiz-from-content",
                json!({ "content_id": "rust-ownership", "quiz_count": count.clone() }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("quiz_count"));

        let (status, _) = app
            .post(
                "/generate-quiz",
                json!({ "urls": ["https://example.com/a.json"], "quiz_count": count }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    assert!(app.model.prompts().is_empty());

    let health = reqwest::get(format!("http://{}/health", app.addr)).await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);
}
