//! Axum route handlers for the Render API.

use axum::{extract::rejection::JsonRejection, response::Html, Json};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::profile::StructuredProfile;
use crate::render::render;

/// POST /api/v1/render
///
/// Renders a caller-supplied profile. The body is held to the same contract
/// as generator output; a non-conforming profile is a 422.
pub async fn handle_render(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Html<String>, AppError> {
    let Json(value) = payload?;

    let profile: StructuredProfile = serde_json::from_value(value)
        .map_err(|e| AppError::UnprocessableEntity(format!("Invalid profile: {e}")))?;

    profile.validate().map_err(|violations| {
        let details = violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        AppError::UnprocessableEntity(format!("Invalid profile: {details}"))
    })?;

    Ok(Html(render(&profile).into_string()))
}
