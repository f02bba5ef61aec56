//! Loading model documents from disk or memory.
//!
//! Model definitions are usually exported as UTF-16LE text, but UTF-8 and
//! UTF-16BE exports are accepted as well. The encoding is detected from the
//! byte-order mark, falling back to a UTF-16LE byte-pattern check and then UTF-8.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::error_codes;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("[MDIFF_LOAD_001] could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("[MDIFF_LOAD_002] document is not valid {encoding} text")]
    Encoding { encoding: &'static str },
    #[error("[MDIFF_LOAD_003] document is not valid JSON: {message}")]
    Json { message: String },
}

impl LoadError {
    pub fn code(&self) -> &'static str {
        match self {
            LoadError::Io { .. } => error_codes::LOAD_IO,
            LoadError::Encoding { .. } => error_codes::LOAD_ENCODING,
            LoadError::Json { .. } => error_codes::LOAD_JSON,
        }
    }
}

/// Read and parse one model document.
pub fn load_document(path: impl AsRef<Path>) -> Result<Value, LoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    log::debug!("read {} bytes from {}", bytes.len(), path.display());
    parse_document_bytes(&bytes)
}

pub fn parse_document_bytes(bytes: &[u8]) -> Result<Value, LoadError> {
    let text = decode_text(bytes)?;
    serde_json::from_str(&text).map_err(|e| LoadError::Json {
        message: e.to_string(),
    })
}

/// Decode document bytes to text, stripping any byte-order mark.
pub fn decode_text(bytes: &[u8]) -> Result<String, LoadError> {
    if let Some(body) = bytes.strip_prefix(b"\xFF\xFE") {
        return decode_utf16(body, true);
    }
    if let Some(body) = bytes.strip_prefix(b"\xFE\xFF") {
        return decode_utf16(body, false);
    }
    if let Some(body) = bytes.strip_prefix(b"\xEF\xBB\xBF") {
        return decode_utf8(body);
    }
    if looks_like_utf16le(bytes) {
        return decode_utf16(bytes, true);
    }
    decode_utf8(bytes)
}

fn decode_utf8(bytes: &[u8]) -> Result<String, LoadError> {
    String::from_utf8(bytes.to_vec()).map_err(|_| LoadError::Encoding { encoding: "UTF-8" })
}

// JSON starts with ASCII, so UTF-16LE without a BOM has a zero high byte first.
fn looks_like_utf16le(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes.len() % 2 == 0 && bytes[0] != 0 && bytes[1] == 0
}

fn decode_utf16(body: &[u8], little_endian: bool) -> Result<String, LoadError> {
    let encoding = if little_endian { "UTF-16LE" } else { "UTF-16BE" };
    if body.len() % 2 != 0 {
        return Err(LoadError::Encoding { encoding });
    }

    let mut code_units = Vec::with_capacity(body.len() / 2);
    for chunk in body.chunks_exact(2) {
        let unit = if little_endian {
            u16::from_le_bytes([chunk[0], chunk[1]])
        } else {
            u16::from_be_bytes([chunk[0], chunk[1]])
        };
        code_units.push(unit);
    }

    String::from_utf16(&code_units).map_err(|_| LoadError::Encoding { encoding })
}
