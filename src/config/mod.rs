// src/config/mod.rs

//! Configuration for brolly.
//!
//! Responsibilities:
//! - Define the TOML-backed settings model (`model.rs`).
//! - Resolve the configuration directory layout and load/bootstrap it
//!   (`loader.rs`).

pub mod loader;
pub mod model;

pub use loader::{Paths, bootstrap, load_settings};
pub use model::{JobSection, Settings, TimerSection};
