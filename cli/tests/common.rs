//! # Eisenhardt CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! that needs them declares `mod common;`.
//!

// Not every test file uses every helper.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;

/// An `eisenhardt` command isolated from the real user configuration: both
/// `HOME` and `XDG_CONFIG_HOME` point into `sandbox`.
pub fn eisenhardt_cmd(sandbox: &Path) -> Command {
    let mut cmd = Command::cargo_bin("eisenhardt").expect("Failed to find eisenhardt binary for testing");
    cmd.env("HOME", sandbox)
        .env("XDG_CONFIG_HOME", sandbox.join(".config"))
        .env_remove("RUST_LOG");
    cmd
}
