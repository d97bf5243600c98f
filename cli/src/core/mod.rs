//! # Eisenhardt Core (`core`)
//!
//! File: cli/src/core/mod.rs
//!
//! Infrastructure every command depends on: layered TOML configuration
//! (`config`), the error type and `Result` alias (`error`), and template
//! installation with placeholder substitution (`templating`).
//!

pub mod config;
pub mod error;
pub mod templating;
