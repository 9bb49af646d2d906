//! Legacy Word 97-2003 (`.doc`) text extraction.
//!
//! The text lives in the `WordDocument` stream as a list of pieces described
//! by the piece table (CLX) stored in the `0Table` or `1Table` stream. The
//! File Information Block at the start of `WordDocument` says which table
//! stream is in use, whether the file is encrypted, how many characters
//! belong to the main document, and where the CLX is.
//!
//! Recovery is best-effort: pieces pointing outside the stream are skipped,
//! but an unreadable container or a missing piece table is a corrupt document.

use std::io::{Cursor, Read};

use tracing::{debug, warn};

use crate::extract::normalize::normalize_section;
use crate::extract::ExtractError;

const WORD_STREAM: &str = "/WordDocument";
const MAX_STREAM_BYTES: u64 = 64 * 1024 * 1024;

const FIB_IDENT: u16 = 0xA5EC;
const FIB_FLAGS_OFFSET: usize = 0x0A;
const FIB_BASE_LEN: usize = 32;
const FLAG_ENCRYPTED: u16 = 0x0100;
const FLAG_TABLE_1: u16 = 0x0200;

/// Index of `ccpText` in FibRgLw97.
const CCP_TEXT_INDEX: usize = 3;
/// Index of the `fcClx`/`lcbClx` pair in FibRgFcLcb97.
const CLX_PAIR_INDEX: usize = 33;

const CLX_PRC: u8 = 0x01;
const CLX_PCDT: u8 = 0x02;
const PCD_LEN: usize = 8;
const FC_COMPRESSED: u32 = 0x4000_0000;

/// Windows-1252 code points for bytes 0x80..=0x9F; the rest match Latin-1.
const CP1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{FFFD}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{FFFD}', '\u{017D}', '\u{FFFD}',
    '\u{FFFD}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{FFFD}', '\u{017E}', '\u{0178}',
];

/// The parts of the File Information Block needed to locate the text.
#[derive(Debug, Clone, PartialEq)]
struct Fib {
    encrypted: bool,
    table_stream: &'static str,
    ccp_text: u32,
    fc_clx: u32,
    lcb_clx: u32,
}

/// One entry of the piece table: a run of character positions and where
/// its bytes live in the `WordDocument` stream.
#[derive(Debug, Clone, PartialEq)]
struct Piece {
    cp_start: u32,
    cp_end: u32,
    fc: u32,
}

impl Piece {
    fn is_compressed(&self) -> bool {
        self.fc & FC_COMPRESSED != 0
    }

    fn byte_offset(&self) -> usize {
        if self.is_compressed() {
            ((self.fc & !FC_COMPRESSED) / 2) as usize
        } else {
            self.fc as usize
        }
    }
}

pub fn extract_doc(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut container = cfb::CompoundFile::open(Cursor::new(bytes)).map_err(|e| {
        ExtractError::CorruptDocument(format!("DOC container could not be opened: {e}"))
    })?;

    let word = read_stream(&mut container, WORD_STREAM)?;
    let fib = parse_fib(&word)?;
    if fib.encrypted {
        return Err(ExtractError::CorruptDocument(
            "DOC file is encrypted".to_string(),
        ));
    }

    let table = read_stream(&mut container, fib.table_stream)?;
    let clx_start = fib.fc_clx as usize;
    let clx = table
        .get(clx_start..clx_start.saturating_add(fib.lcb_clx as usize))
        .ok_or_else(|| {
            ExtractError::CorruptDocument("DOC piece table lies outside the table stream".into())
        })?;

    let pieces = parse_clx(clx)?;
    debug!(
        "DOC piece table has {} pieces, {} main-document characters",
        pieces.len(),
        fib.ccp_text
    );

    let mut raw = String::new();
    for piece in &pieces {
        decode_piece(&word, piece, fib.ccp_text, &mut raw);
    }

    Ok(normalize_section(&strip_control_chars(&raw)))
}

fn read_stream(
    container: &mut cfb::CompoundFile<Cursor<&[u8]>>,
    path: &str,
) -> Result<Vec<u8>, ExtractError> {
    let stream = container
        .open_stream(path)
        .map_err(|e| ExtractError::CorruptDocument(format!("DOC has no {path} stream: {e}")))?;

    let mut buf = Vec::new();
    stream
        .take(MAX_STREAM_BYTES)
        .read_to_end(&mut buf)
        .map_err(|e| ExtractError::CorruptDocument(format!("DOC stream {path} unreadable: {e}")))?;
    Ok(buf)
}

fn read_u16(buf: &[u8], offset: usize) -> Option<u16> {
    let bytes = buf.get(offset..offset.checked_add(2)?)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn read_u32(buf: &[u8], offset: usize) -> Option<u32> {
    let bytes = buf.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn truncated_fib() -> ExtractError {
    ExtractError::CorruptDocument("DOC file information block is truncated".to_string())
}

fn parse_fib(word: &[u8]) -> Result<Fib, ExtractError> {
    if read_u16(word, 0) != Some(FIB_IDENT) {
        return Err(ExtractError::CorruptDocument(
            "WordDocument stream is not a Word 97+ document".to_string(),
        ));
    }
    let flags = read_u16(word, FIB_FLAGS_OFFSET).ok_or_else(truncated_fib)?;

    // FibBase, then three length-prefixed blocks: FibRgW, FibRgLw, FibRgFcLcb
    let mut pos = FIB_BASE_LEN;
    let csw = read_u16(word, pos).ok_or_else(truncated_fib)? as usize;
    pos += 2 + csw * 2;

    let cslw = read_u16(word, pos).ok_or_else(truncated_fib)? as usize;
    let rg_lw = pos + 2;
    if cslw <= CCP_TEXT_INDEX {
        return Err(truncated_fib());
    }
    let ccp_text = read_u32(word, rg_lw + CCP_TEXT_INDEX * 4).ok_or_else(truncated_fib)?;
    pos = rg_lw + cslw * 4;

    let cb_rg_fc_lcb = read_u16(word, pos).ok_or_else(truncated_fib)? as usize;
    let rg_fc_lcb = pos + 2;
    if cb_rg_fc_lcb <= CLX_PAIR_INDEX {
        return Err(truncated_fib());
    }
    let clx_entry = rg_fc_lcb + CLX_PAIR_INDEX * 8;
    let fc_clx = read_u32(word, clx_entry).ok_or_else(truncated_fib)?;
    let lcb_clx = read_u32(word, clx_entry + 4).ok_or_else(truncated_fib)?;

    Ok(Fib {
        encrypted: flags & FLAG_ENCRYPTED != 0,
        table_stream: if flags & FLAG_TABLE_1 != 0 {
            "/1Table"
        } else {
            "/0Table"
        },
        ccp_text,
        fc_clx,
        lcb_clx,
    })
}

/// Skips the property modifiers (`Prc`) and parses the `Pcdt` that follows.
fn parse_clx(clx: &[u8]) -> Result<Vec<Piece>, ExtractError> {
    let malformed = || ExtractError::CorruptDocument("DOC piece table is malformed".to_string());

    let mut pos = 0;
    while let Some(&tag) = clx.get(pos) {
        match tag {
            CLX_PRC => {
                let cb = read_u16(clx, pos + 1).ok_or_else(malformed)? as usize;
                pos += 3 + cb;
            }
            CLX_PCDT => {
                let lcb = read_u32(clx, pos + 1).ok_or_else(malformed)? as usize;
                let start = pos + 5;
                let plc = clx
                    .get(start..start.saturating_add(lcb))
                    .ok_or_else(malformed)?;
                return parse_plc_pcd(plc).ok_or_else(malformed);
            }
            _ => return Err(malformed()),
        }
    }

    Err(ExtractError::CorruptDocument(
        "DOC has no piece table".to_string(),
    ))
}

/// A PlcPcd holds n+1 character positions followed by n 8-byte descriptors.
fn parse_plc_pcd(plc: &[u8]) -> Option<Vec<Piece>> {
    if plc.len() < 4 || (plc.len() - 4) % (4 + PCD_LEN) != 0 {
        return None;
    }
    let count = (plc.len() - 4) / (4 + PCD_LEN);
    let descriptors = (count + 1) * 4;

    (0..count)
        .map(|i| {
            Some(Piece {
                cp_start: read_u32(plc, i * 4)?,
                cp_end: read_u32(plc, (i + 1) * 4)?,
                fc: read_u32(plc, descriptors + i * PCD_LEN + 2)?,
            })
        })
        .collect()
}

/// Appends the main-document part of a piece; text past `ccp_text` belongs to
/// footnotes, headers and other subdocuments and is dropped.
fn decode_piece(word: &[u8], piece: &Piece, ccp_text: u32, out: &mut String) {
    let cp_end = piece.cp_end.min(ccp_text);
    if cp_end <= piece.cp_start {
        return;
    }
    let chars = (cp_end - piece.cp_start) as usize;
    let start = piece.byte_offset();

    if piece.is_compressed() {
        let Some(bytes) = word.get(start..start.saturating_add(chars)) else {
            warn!("Skipping DOC piece outside the WordDocument stream");
            return;
        };
        out.extend(bytes.iter().map(|&b| decode_cp1252(b)));
    } else {
        let Some(bytes) = word.get(start..start.saturating_add(chars * 2)) else {
            warn!("Skipping DOC piece outside the WordDocument stream");
            return;
        };
        let units = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
        out.extend(char::decode_utf16(units).map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER)));
    }
}

fn decode_cp1252(byte: u8) -> char {
    match byte {
        0x80..=0x9F => CP1252_HIGH[(byte - 0x80) as usize],
        _ => char::from(byte),
    }
}

/// Maps Word's in-band control characters to plain text.
///
/// Fields are `0x13 instruction 0x14 result 0x15`; only the result is kept.
fn strip_control_chars(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    // One entry per open field: true while inside its instruction part.
    let mut fields: Vec<bool> = Vec::new();

    for ch in raw.chars() {
        match ch {
            '\u{13}' => {
                fields.push(true);
                continue;
            }
            '\u{14}' => {
                if let Some(in_instruction) = fields.last_mut() {
                    *in_instruction = false;
                }
                continue;
            }
            '\u{15}' => {
                fields.pop();
                continue;
            }
            _ => {}
        }
        if fields.iter().any(|&in_instruction| in_instruction) {
            continue;
        }

        match ch {
            '\r' | '\u{0B}' | '\u{0C}' | '\u{0E}' => out.push('\n'),
            '\u{07}' => out.push('\t'),
            '\u{1E}' => out.push('-'),
            '\u{A0}' => out.push(' '),
            '\t' | '\n' => out.push(ch),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}
