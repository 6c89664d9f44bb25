// src/errors.rs

//! Crate-wide error aliases.
//!
//! Currently a thin re-export of `anyhow`; having the module means there is
//! one place to grow structured error types if the crate ever needs them.

pub use anyhow::{Error, Result};
