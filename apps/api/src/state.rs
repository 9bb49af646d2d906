use std::sync::Arc;

use crate::llm_client::StructuredGenerator;
use crate::pipeline::PipelineLimits;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Structured generation capability. Production: `LlmClient`.
    pub generator: Arc<dyn StructuredGenerator>,
    pub limits: PipelineLimits,
}
