//! CLI module for pisim.
//!
//! This module contains all CLI logic extracted from main.rs to enable
//! full test coverage. The entry point `run_cli` can be called from main.rs
//! with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, RunOptions};
pub use commands::{animated_report, instant_report, resolve_config, run_cli};
pub use output::{
    format_frame, format_report, print_help, print_version, to_json_line, FrameReport, RunReport,
};

#[cfg(test)]
mod tests;
