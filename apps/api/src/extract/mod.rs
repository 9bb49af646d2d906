//! Extractor — turns an uploaded resume document into normalized plain text.
//!
//! Supported formats form a closed set: PDF, DOCX, legacy DOC and plain text.
//! Parsers are synchronous and CPU-bound; `extract_blocking` moves them onto
//! the blocking pool so async callers await a single suspension point.

pub mod doc;
pub mod docx;
pub mod handlers;
pub mod normalize;
pub mod pdf;
pub mod text;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

/// Default upload ceiling: 10 MiB.
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Corrupt document: {0}")]
    CorruptDocument(String),

    #[error("Document is {size} bytes; the maximum is {max} bytes")]
    OversizeDocument { size: u64, max: u64 },
}

/// The closed set of formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Doc,
    PlainText,
}

impl DocumentFormat {
    /// Resolves a declared format tag: a short name (`pdf`, `docx`, `doc`,
    /// `txt`) or the MIME type browsers send. MIME parameters are ignored.
    pub fn from_declared(tag: &str) -> Option<Self> {
        let essence = tag.split(';').next().unwrap_or_default();
        match essence.trim().to_ascii_lowercase().as_str() {
            "pdf" | "application/pdf" => Some(Self::Pdf),
            "docx" | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::Docx)
            }
            "doc" | "application/msword" => Some(Self::Doc),
            "txt" | "text" | "plain-text" | "text/plain" => Some(Self::PlainText),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Doc => "doc",
            DocumentFormat::PlainText => "plain-text",
        }
    }
}

/// An uploaded document as declared by the caller. Nothing here is trusted:
/// the format tag and size are re-validated by `extract`.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub content: Bytes,
    pub declared_format: String,
    pub original_name: String,
    pub declared_size: u64,
}

impl RawDocument {
    /// Builds a document whose declared size is the actual content length.
    pub fn new(
        content: impl Into<Bytes>,
        declared_format: impl Into<String>,
        original_name: impl Into<String>,
    ) -> Self {
        let content = content.into();
        Self {
            declared_size: content.len() as u64,
            content,
            declared_format: declared_format.into(),
            original_name: original_name.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub format: DocumentFormat,
    pub original_name: String,
    pub byte_size: u64,
}

/// Normalized text of one document. Empty text is a valid extraction result;
/// synthesis rejects it as unusable.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedText {
    pub text: String,
    pub metadata: DocumentMetadata,
}

impl ExtractedText {
    pub fn is_usable(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Extracts normalized text from a raw document.
///
/// Size is checked before anything else, so an oversize upload is rejected
/// without being parsed. The larger of the declared and the actual size wins.
pub fn extract(doc: &RawDocument, max_bytes: u64) -> Result<ExtractedText, ExtractError> {
    let size = doc.declared_size.max(doc.content.len() as u64);
    if size > max_bytes {
        return Err(ExtractError::OversizeDocument {
            size,
            max: max_bytes,
        });
    }

    let format = DocumentFormat::from_declared(&doc.declared_format)
        .ok_or_else(|| ExtractError::UnsupportedFormat(doc.declared_format.clone()))?;

    let text = match format {
        DocumentFormat::Pdf => pdf::extract_pdf(&doc.content)?,
        DocumentFormat::Docx => docx::extract_docx(&doc.content)?,
        DocumentFormat::Doc => doc::extract_doc(&doc.content)?,
        DocumentFormat::PlainText => text::extract_plain_text(&doc.content),
    };

    info!(
        "Extracted {} chars from {} document ({} bytes)",
        text.chars().count(),
        format.as_str(),
        doc.content.len()
    );

    Ok(ExtractedText {
        text,
        metadata: DocumentMetadata {
            format,
            original_name: doc.original_name.clone(),
            byte_size: doc.content.len() as u64,
        },
    })
}

/// Runs `extract` on the blocking thread pool.
pub async fn extract_blocking(
    doc: RawDocument,
    max_bytes: u64,
) -> Result<ExtractedText, ExtractError> {
    match tokio::task::spawn_blocking(move || extract(&doc, max_bytes)).await {
        Ok(result) => result,
        Err(e) => {
            warn!("Extraction task failed: {e}");
            Err(ExtractError::CorruptDocument(
                "document parser aborted".to_string(),
            ))
        }
    }
}
