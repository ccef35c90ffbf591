//! pisim CLI - Monte Carlo estimation of π
//!
//! Command-line interface for headless runs.

use pisim::cli::{run_cli, Args};
use std::process::ExitCode;

fn main() -> ExitCode {
    pisim::init_logging();
    run_cli(Args::parse())
}
