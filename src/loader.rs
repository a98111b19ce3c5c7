//! Text input loading and cleanup.
//!
//! Source files arrive with whatever whitespace and Unicode forms the author
//! used; the chunker only cares about the word sequence, so we normalize to
//! NFC and collapse horizontal whitespace runs up front.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

static RE_HORIZONTAL_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\u{00A0}]+").unwrap());

/// Read a UTF-8 text file and normalize it for chunking.
pub fn load_text(path: &Path) -> Result<String> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read text from {}", path.display()))?;
    let cleaned = normalize(&raw);
    debug!(
        path = %path.display(),
        bytes = raw.len(),
        words = cleaned.split_whitespace().count(),
        "Loaded text"
    );
    Ok(cleaned)
}

fn normalize(raw: &str) -> String {
    let composed: String = raw.nfc().collect();
    RE_HORIZONTAL_WS
        .replace_all(&composed, " ")
        .trim()
        .to_string()
}
