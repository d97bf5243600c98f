//! # Eisenhardt UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Terminal tables built on `comfy-table`. `eisenhardt info` shows one row per
//! container:
//!
//! ```text
//! +------------------+--------+------------+
//! | Container        | Status | IP Address |
//! +==================+========+============+
//! | shop_appserver_1 | UP     | 172.22.0.3 |
//! +------------------+--------+------------+
//! | shop_redis_1     | DOWN   |            |
//! +------------------+--------+------------+
//! ```
//!
//! State cells are green for `UP` and red for `DOWN`. comfy-table drops the
//! colours when stdout is not a terminal.
//!
use comfy_table::{presets::ASCII_FULL, Cell, Color, Table};

/// An empty table with `headers`, in the style every command uses.
pub fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL).set_header(headers.iter().copied());
    table
}

/// `UP` in green or `DOWN` in red.
pub fn state_cell(up: bool) -> Cell {
    if up {
        Cell::new("UP").fg(Color::Green)
    } else {
        Cell::new("DOWN").fg(Color::Red)
    }
}
