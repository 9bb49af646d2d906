//! DOCX text extraction.
//!
//! Only the main document part (`word/document.xml`) is read, so headers,
//! footers, footnotes and comments never reach the output. Inside the body,
//! drawings, VML shapes, OLE objects and alternate-content fallbacks are
//! skipped; everything else is walked for run text.

use std::io::{Cursor, Read};

use roxmltree::Node;
use zip::ZipArchive;

use crate::extract::normalize::normalize_section;
use crate::extract::ExtractError;

const MAIN_PART: &str = "word/document.xml";

/// Decompressed size cap for the main part.
const MAX_PART_BYTES: u64 = 64 * 1024 * 1024;

const WORDML_NAMESPACES: &[&str] = &[
    "http://schemas.openxmlformats.org/wordprocessingml/2006/main",
    "http://purl.oclc.org/ooxml/wordprocessingml/main",
];

/// WordprocessingML elements whose subtree carries no body text.
const SKIPPED_WORD_ELEMENTS: &[&str] = &[
    "pPr", "rPr", "tblPr", "tcPr", "trPr", "sectPr", "drawing", "pict", "object",
];

/// Markup-compatibility elements; the `Choice` branch is kept.
const SKIPPED_FOREIGN_ELEMENTS: &[&str] = &["Fallback"];

pub fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
        ExtractError::CorruptDocument(format!("DOCX container could not be opened: {e}"))
    })?;

    let mut xml = String::new();
    archive
        .by_name(MAIN_PART)
        .map_err(|e| ExtractError::CorruptDocument(format!("DOCX has no {MAIN_PART}: {e}")))?
        .take(MAX_PART_BYTES)
        .read_to_string(&mut xml)
        .map_err(|e| {
            ExtractError::CorruptDocument(format!("DOCX main part is unreadable: {e}"))
        })?;

    let document = roxmltree::Document::parse(&xml).map_err(|e| {
        ExtractError::CorruptDocument(format!("DOCX main part is not valid XML: {e}"))
    })?;

    let mut text = String::new();
    collect_text(document.root_element(), &mut text);
    Ok(normalize_section(&text))
}

fn is_wordml(node: &Node) -> bool {
    node.tag_name()
        .namespace()
        .is_some_and(|ns| WORDML_NAMESPACES.contains(&ns))
}

fn collect_text(node: Node, out: &mut String) {
    for child in node.children().filter(Node::is_element) {
        let name = child.tag_name().name();

        if !is_wordml(&child) {
            if !SKIPPED_FOREIGN_ELEMENTS.contains(&name) {
                collect_text(child, out);
            }
            continue;
        }

        match name {
            "t" => out.push_str(child.text().unwrap_or_default()),
            "tab" => out.push('\t'),
            "br" | "cr" => out.push('\n'),
            "p" => {
                collect_text(child, out);
                out.push('\n');
            }
            skipped if SKIPPED_WORD_ELEMENTS.contains(&skipped) => {}
            _ => collect_text(child, out),
        }
    }
}
