//! CLI output formatting.
//!
//! Formatting is separated from printing so the text can be tested.

use crate::error::PiResult;
use crate::sampler::SimulationResult;
use serde::Serialize;

/// Print version information.
pub fn print_version() {
    println!("pisim {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message.
pub fn print_help() {
    println!(
        r"pisim - Monte Carlo estimation of π

USAGE:
    pisim <COMMAND> [OPTIONS]

COMMANDS:
    run                         Estimate π in a single batch
        -n, --points <N>        Points to sample (default: 1000)
        --seed <N>              Seed the generator (default: OS entropy)
        -c, --config <FILE>     Load settings from a YAML file
        --json                  Print JSON instead of text

    animate                     Estimate π frame by frame, one line per frame
        --speed <N>             Points per frame (default: 10)
        (accepts the same options as run)

    help                        Show this help message
    version                     Show version information

EXAMPLES:
    pisim run --points 1000000 --seed 42
    pisim animate --points 200 --speed 25
    pisim run --config pi.yaml --json

LOGGING:
    Set RUST_LOG (e.g. RUST_LOG=debug) to see run events on stderr.
"
    );
}

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunReport {
    /// `instant` or `incremental`.
    pub mode: &'static str,
    /// Seed the run was drawn from.
    pub seed: u64,
    /// Frames rendered (zero for instant runs).
    pub frames: u64,
    /// Statistics.
    #[serde(flatten)]
    pub result: SimulationResult,
}

/// Progress of one animated frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameReport {
    /// 1-based frame number.
    pub frame: u64,
    /// Points drawn this frame.
    pub drawn: u64,
    /// Statistics after the frame.
    #[serde(flatten)]
    pub result: SimulationResult,
}

/// Multi-line text summary.
#[must_use]
pub fn format_report(report: &RunReport) -> String {
    let r = &report.result;
    let mut out = String::new();
    out.push_str(&format!("Mode:          {}\n", report.mode));
    out.push_str(&format!("Seed:          {}\n", report.seed));
    if report.frames > 0 {
        out.push_str(&format!("Frames:        {}\n", report.frames));
    }
    out.push_str(&format!("Total points:  {}\n", r.total_points));
    out.push_str(&format!("Inside circle: {}\n", r.inside_circle));
    out.push_str(&format!("Estimated π:   {:.6}\n", r.estimated_pi));
    out.push_str(&format!("Actual π:      {:.6}\n", r.actual_pi));
    out.push_str(&format!("Error:         {:.4}%", r.error));
    out
}

/// One-line text progress for a frame.
#[must_use]
pub fn format_frame(frame: &FrameReport) -> String {
    format!(
        "frame {:>5}  +{:<5} total {:>9}  inside {:>9}  π≈{:.6}  error {:.4}%",
        frame.frame,
        frame.drawn,
        frame.result.total_points,
        frame.result.inside_circle,
        frame.result.estimated_pi,
        frame.result.error
    )
}

/// Serialize any report as a single JSON line.
///
/// # Errors
///
/// Returns a serialization error if the value cannot be encoded.
pub fn to_json_line<T: Serialize>(value: &T) -> PiResult<String> {
    Ok(serde_json::to_string(value)?)
}
