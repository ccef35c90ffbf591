//! TUI module for pisim.
//!
//! Reusable terminal application state extracted from the binary so it can
//! be tested. Terminal I/O stays in `src/bin/pi_tui.rs`.

#[cfg(feature = "tui")]
pub mod pi_app;
