//! Reveal timing for chunked text.
//!
//! Longer chunks stay on screen longer, sentence ends get a dramatic pause,
//! and consecutive entries overlap slightly so the pacing feels continuous.
//! The schedule is plain data; whatever drives the display (terminal, GUI,
//! anything that can show text at a point in time) consumes it as-is.

use crate::chunker::is_sentence_end;
use serde::Deserialize;
use thiserror::Error;

/// One chunk paired with when to show it and for how long (seconds).
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    pub content: String,
    pub start_time: f64,
    pub duration: f64,
}

/// Tunable pacing constants; deserializable from the `[pacing]` config table.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Pacing {
    /// Floor for any entry's display duration.
    pub min_duration: f64,
    /// Seconds of display time per character of chunk content.
    pub per_char: f64,
    /// Extra display time and cursor delay at sentence ends.
    pub sentence_pause: f64,
    /// How far each entry's start bleeds into the previous entry's tail.
    pub overlap: f64,
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing {
            min_duration: 0.5,
            per_char: 0.08,
            sentence_pause: 0.6,
            overlap: 0.05,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("invalid pacing: {0}")]
    InvalidPacing(&'static str),
}

impl Pacing {
    fn validate(self) -> Result<(), ScheduleError> {
        let fields = [
            self.min_duration,
            self.per_char,
            self.sentence_pause,
            self.overlap,
        ];
        if fields.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ScheduleError::InvalidPacing(
                "all pacing values must be finite and non-negative",
            ));
        }
        if self.min_duration <= 0.0 {
            return Err(ScheduleError::InvalidPacing("min_duration must be positive"));
        }
        if self.overlap >= self.min_duration {
            return Err(ScheduleError::InvalidPacing(
                "overlap must stay below min_duration",
            ));
        }
        Ok(())
    }
}

/// Schedule chunks with the default pacing.
pub fn schedule_chunks(chunks: &[String]) -> Vec<ScheduleEntry> {
    schedule(chunks, Pacing::default())
}

/// Schedule chunks with caller-supplied pacing, validated first.
pub fn schedule_chunks_with(
    chunks: &[String],
    pacing: Pacing,
) -> Result<Vec<ScheduleEntry>, ScheduleError> {
    pacing.validate()?;
    Ok(schedule(chunks, pacing))
}

fn schedule(chunks: &[String], pacing: Pacing) -> Vec<ScheduleEntry> {
    let mut entries = Vec::with_capacity(chunks.len());
    let mut time = 0.0f64;

    for (i, chunk) in chunks.iter().enumerate() {
        // The final chunk pauses like a sentence end even without punctuation.
        let pause_here = is_sentence_end(chunk) || i == chunks.len() - 1;

        let read_time = chunk.chars().count() as f64 * pacing.per_char;
        let mut duration = read_time.max(pacing.min_duration);
        if pause_here {
            duration += pacing.sentence_pause;
        }

        entries.push(ScheduleEntry {
            content: chunk.clone(),
            start_time: time,
            duration,
        });

        time += duration - pacing.overlap;
        if pause_here {
            time += pacing.sentence_pause;
        }
    }

    entries
}

/// Seconds from the first entry's start until the last entry leaves the screen.
pub fn total_duration(entries: &[ScheduleEntry]) -> f64 {
    entries
        .last()
        .map(|entry| entry.start_time + entry.duration)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(chunks: &[&str]) -> Vec<String> {
        chunks.iter().map(|c| c.to_string()).collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn sentence_end_and_final_chunk_get_pauses() {
        let entries = schedule_chunks(&owned(&["Hi.", "Bye"]));
        assert_eq!(entries.len(), 2);

        // "Hi." reads in max(0.5, 3 * 0.08) = 0.5, plus the 0.6 pause.
        assert_close(entries[0].start_time, 0.0);
        assert_close(entries[0].duration, 1.1);

        // Cursor: 1.1 - 0.05 overlap + 0.6 sentence pause.
        assert_close(entries[1].start_time, 1.65);
        // Final chunk is treated as a sentence end too.
        assert_close(entries[1].duration, 1.1);
    }

    #[test]
    fn long_chunks_read_slower_than_the_floor() {
        let entries = schedule_chunks(&owned(&["twelve chars", "end"]));
        // 12 * 0.08 = 0.96 beats the 0.5 floor; no pause mid-text.
        assert_close(entries[0].duration, 0.96);
        assert_close(entries[1].start_time, 0.96 - 0.05);
    }

    #[test]
    fn start_times_never_decrease() {
        let entries = schedule_chunks(&owned(&["One.", "two", "three!", "four", "five"]));
        for pair in entries.windows(2) {
            assert!(pair[1].start_time >= pair[0].start_time);
        }
    }

    #[test]
    fn empty_input_yields_empty_schedule() {
        assert!(schedule_chunks(&[]).is_empty());
        assert_close(total_duration(&[]), 0.0);
    }

    #[test]
    fn custom_pacing_is_validated() {
        let chunks = owned(&["a"]);
        let bad = Pacing {
            min_duration: 0.0,
            ..Pacing::default()
        };
        assert!(matches!(
            schedule_chunks_with(&chunks, bad),
            Err(ScheduleError::InvalidPacing(_))
        ));

        let nan = Pacing {
            per_char: f64::NAN,
            ..Pacing::default()
        };
        assert!(schedule_chunks_with(&chunks, nan).is_err());

        let swallowed = Pacing {
            overlap: 0.5,
            ..Pacing::default()
        };
        assert!(schedule_chunks_with(&chunks, swallowed).is_err());

        assert!(schedule_chunks_with(&chunks, Pacing::default()).is_ok());
    }

    #[test]
    fn deterministic_across_calls() {
        let chunks = owned(&["Repeat me.", "Please!"]);
        assert_eq!(schedule_chunks(&chunks), schedule_chunks(&chunks));
    }

    #[test]
    fn total_duration_covers_the_last_entry() {
        let entries = schedule_chunks(&owned(&["Hi.", "Bye"]));
        assert_close(total_duration(&entries), 1.65 + 1.1);
    }
}
