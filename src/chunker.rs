//! Chunk splitting for the reveal timeline.
//!
//! A chunk is a run of words displayed as one unit. Chunks close early at
//! sentence ends (".", "?", "!") so the scheduler can slow down there, and
//! otherwise grow until the next word would push them past the configured
//! maximum length. Words are never split: a single word longer than the
//! maximum still forms its own chunk.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static RE_SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.?!]$").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    #[error("max_length must be positive")]
    InvalidMaxLength,
}

/// Whether a word closes a sentence ("." / "?" / "!" as its final character).
pub fn is_sentence_end(word: &str) -> bool {
    RE_SENTENCE_END.is_match(word)
}

/// Split `text` into display chunks.
///
/// With `max_length == None` every word becomes its own chunk. Otherwise
/// words accumulate into a chunk that closes when the just-added word ends a
/// sentence, when the text runs out, or when joining the next word would push
/// the chunk past `max_length`. Lengths are counted in characters.
pub fn build_chunks(text: &str, max_length: Option<usize>) -> Result<Vec<String>, ChunkError> {
    if max_length == Some(0) {
        return Err(ChunkError::InvalidMaxLength);
    }

    let words: Vec<&str> = text.split_whitespace().collect();

    let Some(max_length) = max_length else {
        return Ok(words.into_iter().map(str::to_string).collect());
    };

    let mut chunks = Vec::new();
    let mut chunk: Vec<&str> = Vec::new();
    let mut chunk_chars = 0usize;

    for (i, word) in words.iter().enumerate() {
        if !chunk.is_empty() {
            chunk_chars += 1; // joining space
        }
        chunk.push(word);
        chunk_chars += word.chars().count();

        // A missing next word is not an overflow; the last-word rule below
        // closes the chunk instead.
        let next_overflows = words
            .get(i + 1)
            .is_some_and(|next| chunk_chars + 1 + next.chars().count() > max_length);

        if is_sentence_end(word) || i == words.len() - 1 || next_overflows {
            chunks.push(chunk.join(" "));
            chunk.clear();
            chunk_chars = 0;
        }
    }

    Ok(chunks)
}
