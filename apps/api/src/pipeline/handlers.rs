//! Axum route handler for the one-shot pipeline.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;
use crate::extract::handlers::read_upload;
use crate::pipeline::extract_synthesize_render;
use crate::state::AppState;
use crate::synthesis::Guidance;

/// POST /api/v1/pipeline
///
/// Multipart fields: `file` (required), `targetRole` (required),
/// `instructions` and `clientContext` (optional). Responds with the rendered
/// resume as an inline HTML attachment.
pub async fn handle_pipeline(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let mut form = read_upload(multipart, state.limits.max_document_bytes).await?;
    let document = form.take_document()?;
    let target_role = form
        .field("targetRole")
        .ok_or_else(|| AppError::Validation("'targetRole' field is required".to_string()))?;

    let guidance = Guidance::new(target_role)
        .with_instructions(form.field("instructions"))
        .with_context(form.field("clientContext"));

    let rendered = extract_synthesize_render(
        document,
        &guidance,
        state.generator.as_ref(),
        &state.limits,
    )
    .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "inline; filename=\"resume.html\""),
        ],
        rendered.into_string(),
    )
        .into_response())
}
