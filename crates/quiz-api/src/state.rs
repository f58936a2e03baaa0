use crate::content::ContentStore;
use quiz_extract::Extractor;
use quiz_generator::QuizGenerator;
use std::sync::Arc;

/// Collaborators shared by every request. None of them hold per-request state.
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<dyn Extractor>,
    pub generator: QuizGenerator,
    pub content: Arc<dyn ContentStore>,
}

impl AppState {
    pub fn new(
        extractor: Arc<dyn Extractor>,
        generator: QuizGenerator,
        content: Arc<dyn ContentStore>,
    ) -> Self {
        Self {
            extractor,
            generator,
            content,
        }
    }
}
