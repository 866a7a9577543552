//! Application state for the review server.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use recast::{Generator, ReviewSession};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The session being reviewed.
    pub session: Arc<RwLock<ReviewSession>>,
    /// Path to the loaded quiz file.
    pub source_path: PathBuf,
    /// Generator for candidate batches.
    /// If None, generation is disabled.
    pub generator: Option<Arc<Generator>>,
    /// Name of the configured LLM provider (for display).
    pub llm_provider_name: Option<String>,
}

impl AppState {
    /// Create application state without generation.
    pub fn new(session: ReviewSession, source_path: PathBuf) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            source_path,
            generator: None,
            llm_provider_name: None,
        }
    }

    /// Create application state with a generator.
    pub fn with_generator(
        session: ReviewSession,
        source_path: PathBuf,
        generator: Generator,
    ) -> Self {
        let name = generator.provider().name().to_string();
        Self {
            session: Arc::new(RwLock::new(session)),
            source_path,
            generator: Some(Arc::new(generator)),
            llm_provider_name: Some(name),
        }
    }
}
