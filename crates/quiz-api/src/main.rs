//! Quiz generator HTTP server
//!
//! Reads Gemini settings from the environment (a `.env` file is honoured)
//! and serves the quiz routes.

use anyhow::Result;
use clap::Parser;
use quiz_api::{router, AppState, InMemoryContentStore, ServerConfig};
use quiz_extract::{ExtractorConfig, UrlExtractor};
use quiz_generator::{GeneratorConfig, QuizGenerator};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Quiz server arguments
#[derive(Parser, Debug)]
#[command(name = "quiz-server")]
#[command(about = "Generate multiple-choice quizzes from DOCX and JSON documents")]
struct Args {
    /// Interface to bind (overrides the config file)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let generator_config = GeneratorConfig::from_env()?;
    if !generator_config.has_api_key() {
        warn!("GEMINI_API_KEY is not set; generation requests will report an error");
    }
    let model = generator_config.model.clone();

    let extractor = UrlExtractor::new(
        ExtractorConfig::default().with_timeout(config.fetch_timeout_secs),
    )?;
    let generator = QuizGenerator::new(generator_config)?;
    let content = InMemoryContentStore::new(config.content.clone());
    let content_entries = content.len();

    let state = AppState::new(Arc::new(extractor), generator, Arc::new(content));
    let app = router(state);

    let addr = config.bind_addr();
    println!(
        r#"
╔══════════════════════════════════════════════════════════════════╗
║     Quiz Generator API                                           ║
╠══════════════════════════════════════════════════════════════════╣
║  Listening:  http://{}
║  Endpoints:  POST /generate-quiz
║              POST /generate-quiz-from-content
║  Model:      {}
║  Content:    {} stored entries
╚══════════════════════════════════════════════════════════════════╝
"#,
        addr, model, content_entries
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
