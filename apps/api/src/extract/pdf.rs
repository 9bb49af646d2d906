use std::panic;

use tracing::{debug, warn};

use crate::extract::normalize::join_pages;
use crate::extract::ExtractError;

/// Extracts text page by page and joins the pages with a single newline.
///
/// `pdf-extract` can panic on malformed object streams, so the call is
/// isolated with `catch_unwind` and any panic is reported as a corrupt
/// document.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    let outcome = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes));

    let pages = match outcome {
        Ok(Ok(pages)) => pages,
        Ok(Err(e)) => {
            return Err(ExtractError::CorruptDocument(format!(
                "PDF could not be read: {e:?}"
            )))
        }
        Err(_) => {
            warn!("PDF parser panicked; treating document as corrupt");
            return Err(ExtractError::CorruptDocument(
                "PDF parser aborted on malformed content".to_string(),
            ));
        }
    };

    debug!("PDF yielded {} pages", pages.len());
    Ok(join_pages(&pages))
}
