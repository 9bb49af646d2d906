//! Axum route handlers for the Synthesis API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::profile::StructuredProfile;
use crate::models::response::ApiSuccess;
use crate::render::render;
use crate::state::AppState;
use crate::synthesis::{synthesize, Guidance};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceRequest {
    pub text: String,
    pub target_role: String,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub client_context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EnhanceResponse {
    pub enhanced: StructuredProfile,
    pub html: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/enhance
///
/// Synthesizes a structured profile from already-extracted text and returns
/// it together with its HTML rendering.
pub async fn handle_enhance(
    State(state): State<AppState>,
    payload: Result<Json<EnhanceRequest>, JsonRejection>,
) -> Result<Json<ApiSuccess<EnhanceResponse>>, AppError> {
    let Json(request) = payload?;

    let guidance = Guidance::new(&request.target_role)
        .with_instructions(request.instructions.as_deref())
        .with_context(request.client_context.as_deref());

    let enhanced = synthesize(
        state.generator.as_ref(),
        &request.text,
        &guidance,
        state.limits.generation_timeout,
    )
    .await?;
    let html = render(&enhanced).into_string();

    Ok(Json(ApiSuccess::new(EnhanceResponse { enhanced, html })))
}
