//! Axum route handlers for the Extraction API, plus the multipart reader
//! shared with the pipeline endpoint.

use std::collections::BTreeMap;

use axum::{
    extract::{
        multipart::{Field, MultipartError},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use bytes::BytesMut;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::extract::{extract_blocking, ExtractError, ExtractedText, RawDocument};
use crate::models::response::ApiSuccess;
use crate::state::AppState;

/// Multipart field carrying the document.
pub const FILE_FIELD: &str = "file";

// ────────────────────────────────────────────────────────────────────────────
// Multipart upload
// ────────────────────────────────────────────────────────────────────────────

/// A parsed multipart form: the uploaded document plus any text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub document: Option<RawDocument>,
    pub fields: BTreeMap<String, String>,
}

impl UploadForm {
    pub fn take_document(&mut self) -> Result<RawDocument, AppError> {
        self.document
            .take()
            .ok_or_else(|| AppError::Validation(format!("'{FILE_FIELD}' field is required")))
    }

    /// A text field, or `None` when missing or blank.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// A request body over the router's limit is reported like any other
/// oversize document. `received` is how much of the file had arrived.
fn multipart_error(e: MultipartError, received: u64, max_bytes: u64) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("Upload exceeded the request body limit");
        ExtractError::OversizeDocument {
            size: received.max(max_bytes.saturating_add(1)),
            max: max_bytes,
        }
        .into()
    } else {
        AppError::Validation(format!("Failed to read upload: {}", e.body_text()))
    }
}

/// Reads the file part chunk by chunk and stops as soon as it passes
/// `max_bytes`, without buffering the rest.
async fn read_file(mut field: Field<'_>, max_bytes: u64) -> Result<bytes::Bytes, AppError> {
    let mut content = BytesMut::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| multipart_error(e, content.len() as u64, max_bytes))?
    {
        content.extend_from_slice(&chunk);
        let size = content.len() as u64;
        if size > max_bytes {
            return Err(ExtractError::OversizeDocument {
                size,
                max: max_bytes,
            }
            .into());
        }
    }
    Ok(content.freeze())
}

/// Picks the format tag for an upload. The part's content type wins unless it
/// is missing or the generic `application/octet-stream`, in which case the
/// file extension is used.
pub fn declared_format(content_type: Option<&str>, file_name: &str) -> String {
    match content_type.map(str::trim) {
        Some(ct) if !ct.is_empty() && !ct.eq_ignore_ascii_case("application/octet-stream") => {
            ct.to_string()
        }
        _ => file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default(),
    }
}

pub async fn read_upload(mut multipart: Multipart, max_bytes: u64) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, 0, max_bytes))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == FILE_FIELD {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let format = declared_format(field.content_type(), &file_name);
            let content = read_file(field, max_bytes).await?;
            debug!(
                "Received upload: format={:?}, {} bytes",
                format,
                content.len()
            );
            form.document = Some(RawDocument::new(content, format, file_name));
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| multipart_error(e, 0, max_bytes))?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/parse-file
///
/// Extracts normalized text from an uploaded resume without calling the
/// generation service.
pub async fn handle_parse_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ApiSuccess<ExtractedText>>, AppError> {
    let mut form = read_upload(multipart, state.limits.max_document_bytes).await?;
    let document = form.take_document()?;

    let extracted = extract_blocking(document, state.limits.max_document_bytes).await?;

    Ok(Json(ApiSuccess::new(extracted)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_is_used_when_specific() {
        assert_eq!(
            declared_format(Some("application/pdf"), "resume.docx"),
            "application/pdf"
        );
    }

    #[test]
    fn test_extension_is_used_for_generic_or_missing_content_type() {
        assert_eq!(
            declared_format(Some("application/octet-stream"), "Resume.DOCX"),
            "docx"
        );
        assert_eq!(declared_format(None, "cv.pdf"), "pdf");
        assert_eq!(declared_format(Some(""), "notes.txt"), "txt");
    }

    #[test]
    fn test_missing_extension_yields_empty_tag() {
        assert_eq!(declared_format(None, "resume"), "");
    }

    #[test]
    fn test_blank_fields_read_as_absent() {
        let mut form = UploadForm::default();
        form.fields.insert("instructions".into(), "   ".into());
        form.fields.insert("targetRole".into(), " SRE ".into());
        assert_eq!(form.field("instructions"), None);
        assert_eq!(form.field("targetRole"), Some("SRE"));
        assert_eq!(form.field("clientContext"), None);
    }

    #[test]
    fn test_missing_document_is_validation_error() {
        let mut form = UploadForm::default();
        assert!(matches!(
            form.take_document(),
            Err(AppError::Validation(msg)) if msg.contains("file")
        ));
    }
}
