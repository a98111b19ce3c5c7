//! Machine-gun text reveal: chunk a block of text, pace the chunks so
//! sentence ends breathe, and play the result back on a timeline.
//!
//! The `chunker` and `schedule` modules are pure data transformations; the
//! `player` module is one possible consumer (a terminal line renderer). Any
//! other renderer can drive its own timeline from the same schedule entries.

pub mod cancellation;
pub mod chunker;
pub mod config;
pub mod loader;
pub mod player;
pub mod schedule;
