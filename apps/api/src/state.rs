use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::OpenAiClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// The LLM client is created once at startup and reused for the process lifetime.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<OpenAiClient>,
    /// Kept for handlers that need endpoint/port details at request time.
    #[allow(dead_code)]
    pub config: Config,
}
