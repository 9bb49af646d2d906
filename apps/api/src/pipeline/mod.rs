//! Pipeline — extract → synthesize → render for one uploaded document.
//!
//! Stages run strictly in sequence and the first failure is returned
//! unchanged. Nothing is retried and no partial output escapes.

pub mod handlers;

use std::time::Duration;

use thiserror::Error;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::extract::{self, ExtractError, RawDocument, DEFAULT_MAX_DOCUMENT_BYTES};
use crate::llm_client::StructuredGenerator;
use crate::render::{self, RenderedDocument};
use crate::synthesis::{self, Guidance, SynthesisError};

pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}

/// Flat view of every failure the pipeline can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedFormat,
    CorruptDocument,
    OversizeDocument,
    EmptyInput,
    GenerationUnavailable,
    SchemaViolation,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            ErrorKind::CorruptDocument => "CORRUPT_DOCUMENT",
            ErrorKind::OversizeDocument => "OVERSIZE_DOCUMENT",
            ErrorKind::EmptyInput => "EMPTY_INPUT",
            ErrorKind::GenerationUnavailable => "GENERATION_UNAVAILABLE",
            ErrorKind::SchemaViolation => "SCHEMA_VIOLATION",
        }
    }

    /// Only an unreachable or slow generation service may succeed on a later
    /// attempt with the same input.
    pub fn is_transient(self) -> bool {
        matches!(self, ErrorKind::GenerationUnavailable)
    }
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Extract(ExtractError::UnsupportedFormat(_)) => {
                ErrorKind::UnsupportedFormat
            }
            PipelineError::Extract(ExtractError::CorruptDocument(_)) => ErrorKind::CorruptDocument,
            PipelineError::Extract(ExtractError::OversizeDocument { .. }) => {
                ErrorKind::OversizeDocument
            }
            PipelineError::Synthesis(SynthesisError::EmptyInput(_)) => ErrorKind::EmptyInput,
            PipelineError::Synthesis(SynthesisError::GenerationUnavailable(_)) => {
                ErrorKind::GenerationUnavailable
            }
            PipelineError::Synthesis(SynthesisError::SchemaViolation(_)) => {
                ErrorKind::SchemaViolation
            }
        }
    }
}

/// Resource ceilings applied to every invocation.
#[derive(Debug, Clone, Copy)]
pub struct PipelineLimits {
    pub max_document_bytes: u64,
    pub generation_timeout: Duration,
}

impl Default for PipelineLimits {
    fn default() -> Self {
        Self {
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }
}

/// Runs the full pipeline on one document.
///
/// Empty extracted text surfaces as `EmptyInput` from synthesis, before any
/// generation request is made.
pub async fn extract_synthesize_render(
    document: RawDocument,
    guidance: &Guidance<'_>,
    generator: &dyn StructuredGenerator,
    limits: &PipelineLimits,
) -> Result<RenderedDocument, PipelineError> {
    let span = info_span!("pipeline", invocation_id = %Uuid::new_v4());

    async move {
        info!(
            "Pipeline started: declared format {:?}, {} bytes",
            document.declared_format, document.declared_size
        );

        let extracted = extract::extract_blocking(document, limits.max_document_bytes).await?;
        if !extracted.is_usable() {
            warn!("Extracted document contains no text");
        }
        let profile = synthesis::synthesize(
            generator,
            &extracted.text,
            guidance,
            limits.generation_timeout,
        )
        .await?;
        let rendered = render::render(&profile);

        info!("Pipeline finished: {} bytes of HTML", rendered.as_str().len());
        Ok(rendered)
    }
    .instrument(span)
    .await
}
