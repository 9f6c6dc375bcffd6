//! Format & Encoding Detector
//!
//! Chooses the parser for a BOM file from its extension and, for delimited
//! text, the character encoding and field delimiter.

use encoding_rs::{UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{BomError, BomResult};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Bytes that Windows-1252 leaves unassigned.
const CP1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// Supported BOM file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BomFormat {
    DelimitedText,
    Spreadsheet, // XLSX/XLS
}

impl BomFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("xlsx") | Some("xls") => Self::Spreadsheet,
            _ => Self::DelimitedText,
        }
    }
}

impl fmt::Display for BomFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DelimitedText => f.write_str("CSV"),
            Self::Spreadsheet => f.write_str("Excel"),
        }
    }
}

/// Candidate text encodings for delimited files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8, with a leading byte-order mark stripped when present
    Utf8Sig,
    Windows1252,
}

impl TextEncoding {
    /// Default priority order.
    pub const CANDIDATES: [TextEncoding; 2] = [Self::Utf8Sig, Self::Windows1252];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Utf8Sig => "utf-8-sig",
            Self::Windows1252 => "cp1252",
        }
    }

    /// Strict decode; `None` on any malformed or unassigned byte.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            Self::Utf8Sig => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                UTF_8.decode_without_bom_handling_and_without_replacement(body)
            }
            Self::Windows1252 => {
                if bytes.iter().any(|b| CP1252_UNDEFINED.contains(b)) {
                    return None;
                }
                WINDOWS_1252.decode_without_bom_handling_and_without_replacement(bytes)
            }
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parse a delimiter override. `Ok(None)` means "sniff it".
pub fn parse_delimiter(value: &str) -> BomResult<Option<u8>> {
    let trimmed = value.trim_matches(|c| c == '\'' || c == '"');
    match trimmed.to_lowercase().as_str() {
        "" | "auto" => return Ok(None),
        "\\t" | "tab" => return Ok(Some(b'\t')),
        "comma" => return Ok(Some(b',')),
        "semicolon" => return Ok(Some(b';')),
        _ => {}
    }

    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(Some(c as u8)),
        _ => Err(BomError::InvalidDelimiter {
            value: value.to_string(),
        }),
    }
}

/// Pick a delimiter from a decoded header line: tab, comma, then semicolon.
pub fn delimiter_for_line(line: &str) -> u8 {
    if line.contains('\t') {
        b'\t'
    } else if line.contains(',') {
        b','
    } else if line.contains(';') {
        b';'
    } else {
        b','
    }
}

/// Read only the first line of `path` and sniff its delimiter, trying each
/// encoding in order.
pub fn sniff_delimiter(path: &Path, encodings: &[TextEncoding]) -> BomResult<u8> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut first_line = Vec::new();
    reader.read_until(b'\n', &mut first_line)?;

    // Bare `\r` line endings (classic Mac exports) end the header too.
    if let Some(end) = first_line.iter().position(|b| *b == b'\r' || *b == b'\n') {
        first_line.truncate(end);
    }

    for encoding in encodings {
        match encoding.decode(&first_line) {
            Some(line) => {
                let delimiter = delimiter_for_line(&line);
                info!(
                    encoding = %encoding,
                    delimiter = ?(delimiter as char),
                    "Detected delimiter"
                );
                return Ok(delimiter);
            }
            None => debug!(encoding = %encoding, "Header line does not decode"),
        }
    }

    Err(BomError::unreadable(
        path.display().to_string(),
        "first line could not be decoded",
    ))
}
