use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use quiz_generator::{GeminiClient, GenerationSettings, GeneratorConfig, GeneratorError, LanguageModel};
use serde_json::{json, Value};
use std::net::SocketAddr;

async fn generate_content(
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some("secret") {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"error": {"message": "API key not valid"}})),
        );
    }
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default();
    let max_tokens = &body["generationConfig"]["maxOutputTokens"];
    let text = format!("{} answered '{}' within {} tokens", call, prompt, max_tokens);
    (
        StatusCode::OK,
        Json(json!({
            "candidates": [{"content": {"parts": [{"text": text}], "role": "model"}, "finishReason": "STOP"}]
        })),
    )
}

async fn spawn_fake_gemini() -> SocketAddr {
    let app = Router::new().route("/v1beta/models/:call", post(generate_content));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn settings() -> GenerationSettings {
    GenerationSettings {
        max_tokens: 2000,
        temperature: 0.7,
    }
}

#[tokio::test]
async fn test_generate_content_round_trip() {
    let addr = spawn_fake_gemini().await;
    let config = GeneratorConfig::new()
        .with_api_key("secret")
        .with_api_base(format!("http://{}/v1beta", addr));
    let client = GeminiClient::new(&config).unwrap();

    let text = client.complete("ping", settings()).await.unwrap();

    assert_eq!(text, "gemini-pro:generateContent answered 'ping' within 2000 tokens");
}

#[tokio::test]
async fn test_rejected_key_is_model_error() {
    let addr = spawn_fake_gemini().await;
    let config = GeneratorConfig::new()
        .with_api_key("wrong")
        .with_api_base(format!("http://{}/v1beta", addr));
    let client = GeminiClient::new(&config).unwrap();

    let err = client.complete("ping", settings()).await.unwrap_err();

    assert!(matches!(err, GeneratorError::Model(ref msg) if msg.contains("403")));
}

#[tokio::test]
async fn test_missing_key_is_config_error() {
    let client = GeminiClient::new(&GeneratorConfig::new()).unwrap();
    let err = client.complete("ping", settings()).await.unwrap_err();
    assert!(matches!(err, GeneratorError::Config(_)));
}
