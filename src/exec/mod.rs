// src/exec/mod.rs

//! Process execution layer.
//!
//! This module owns the actual running of the backup script:
//!
//! - [`splitter`] turns raw byte chunks from the output pipe into whole
//!   lines.
//! - [`supervisor`] spawns the script with stdout and stderr merged into a
//!   single pipe, streams every line into the log, waits for exit, and maps
//!   the result to a [`RunOutcome`](crate::job::RunOutcome).
//!
//! Everything in here is synchronous and blocking; callers run it via
//! `spawn_blocking` (or a plain thread) so the timer and signal handling
//! stay responsive.

pub mod splitter;
pub mod supervisor;

pub use splitter::LineSplitter;
