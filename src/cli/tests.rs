//! CLI module tests.

use super::args::{Args, Command, RunOptions};
use super::commands::{animated_report, instant_report, resolve_config, run_cli};
use super::output::{format_frame, format_report, to_json_line, FrameReport, RunReport};
use crate::config::PiConfig;
use crate::sampler::SimulationResult;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

// ============================================================================
// Args parsing tests
// ============================================================================

#[test]
fn test_parse_no_args_shows_help() {
    let args = Args::parse_from(["pisim"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_help_variants() {
    for flag in ["-h", "--help", "help"] {
        assert_eq!(Args::parse_from(["pisim", flag]).command, Command::Help);
    }
}

#[test]
fn test_parse_version_variants() {
    for flag in ["-V", "--version", "version"] {
        assert_eq!(Args::parse_from(["pisim", flag]).command, Command::Version);
    }
}

#[test]
fn test_parse_unknown_command_shows_help() {
    let args = Args::parse_from(["pisim", "bake"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_run_defaults() {
    let args = Args::parse_from(["pisim", "run"]);
    assert_eq!(args.command, Command::Run(RunOptions::default()));
}

#[test]
fn test_parse_run_all_options() {
    let args = Args::parse_from([
        "pisim", "run", "--points", "5000", "--seed", "42", "--config", "pi.yaml", "--json",
    ]);
    assert_eq!(
        args.command,
        Command::Run(RunOptions {
            points: Some(5000),
            seed: Some(42),
            config: Some(PathBuf::from("pi.yaml")),
            json: true,
        })
    );
}

#[test]
fn test_parse_run_short_flags() {
    let args = Args::parse_from(["pisim", "run", "-n", "10", "-c", "a.yaml"]);
    let Command::Run(options) = args.command else {
        panic!("expected run");
    };
    assert_eq!(options.points, Some(10));
    assert_eq!(options.config, Some(PathBuf::from("a.yaml")));
}

#[test]
fn test_parse_run_invalid_number_ignored() {
    let args = Args::parse_from(["pisim", "run", "--points", "lots", "--seed", "7"]);
    let Command::Run(options) = args.command else {
        panic!("expected run");
    };
    assert_eq!(options.points, None);
    assert_eq!(options.seed, Some(7));
}

#[test]
fn test_parse_run_missing_value() {
    let args = Args::parse_from(["pisim", "run", "--seed"]);
    assert_eq!(args.command, Command::Run(RunOptions::default()));
}

#[test]
fn test_parse_run_ignores_unknown_flag() {
    let args = Args::parse_from(["pisim", "run", "--fast", "--json"]);
    let Command::Run(options) = args.command else {
        panic!("expected run");
    };
    assert!(options.json);
}

#[test]
fn test_parse_animate() {
    let args = Args::parse_from(["pisim", "animate", "--speed", "25", "--points", "200"]);
    assert_eq!(
        args.command,
        Command::Animate {
            options: RunOptions {
                points: Some(200),
                ..RunOptions::default()
            },
            speed: Some(25),
        }
    );
}

#[test]
fn test_parse_run_rejects_speed() {
    // --speed is only meaningful for animate
    let args = Args::parse_from(["pisim", "run", "--speed", "25"]);
    assert_eq!(args.command, Command::Run(RunOptions::default()));
}

// ============================================================================
// Configuration resolution tests
// ============================================================================

#[test]
fn test_resolve_defaults() {
    let config = resolve_config(&RunOptions::default(), None).expect("defaults are valid");
    assert_eq!(config, PiConfig::default());
}

#[test]
fn test_resolve_overrides() {
    let options = RunOptions {
        points: Some(50),
        seed: Some(9),
        ..RunOptions::default()
    };
    let config = resolve_config(&options, Some(5)).expect("valid");
    assert_eq!(config.points, 50);
    assert_eq!(config.seed, Some(9));
    assert_eq!(config.points_per_frame, 5);
}

#[test]
fn test_resolve_rejects_zero_points() {
    let options = RunOptions {
        points: Some(0),
        ..RunOptions::default()
    };
    let err = resolve_config(&options, None).expect_err("zero points is invalid");
    assert!(err.is_config_error());
}

#[test]
fn test_resolve_rejects_zero_speed() {
    assert!(resolve_config(&RunOptions::default(), Some(0)).is_err());
}

#[test]
fn test_resolve_from_file_with_override() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "points: 300\nseed: 1").expect("write");

    let options = RunOptions {
        seed: Some(2),
        config: Some(file.path().to_path_buf()),
        ..RunOptions::default()
    };
    let config = resolve_config(&options, None).expect("valid");
    assert_eq!(config.points, 300);
    assert_eq!(config.seed, Some(2));
}

#[test]
fn test_resolve_missing_file() {
    let options = RunOptions {
        config: Some(PathBuf::from("/nonexistent/pisim.yaml")),
        ..RunOptions::default()
    };
    assert!(resolve_config(&options, None).is_err());
}

// ============================================================================
// Command tests
// ============================================================================

fn seeded(points: u64, points_per_frame: u64) -> PiConfig {
    PiConfig::builder()
        .points(points)
        .points_per_frame(points_per_frame)
        .seed(42)
        .build()
}

#[test]
fn test_instant_report() {
    let report = instant_report(&seeded(10_000, 10));
    assert_eq!(report.mode, "instant");
    assert_eq!(report.seed, 42);
    assert_eq!(report.frames, 0);
    assert_eq!(report.result.total_points, 10_000);
    assert!(report.result.error < 10.0);
}

#[test]
fn test_instant_report_reproducible() {
    assert_eq!(
        instant_report(&seeded(1000, 10)),
        instant_report(&seeded(1000, 10))
    );
}

#[test]
fn test_animated_report_frames() {
    let mut frames = Vec::new();
    let report = animated_report(&seeded(25, 10), |f| frames.push(*f));

    assert_eq!(report.mode, "incremental");
    assert_eq!(report.frames, 3);
    assert_eq!(report.result.total_points, 25);
    let drawn: Vec<u64> = frames.iter().map(|f| f.drawn).collect();
    assert_eq!(drawn, vec![10, 10, 5]);
    assert_eq!(frames.last().map(|f| f.frame), Some(3));
    assert_eq!(frames.last().map(|f| f.result), Some(report.result));
}

#[test]
fn test_animated_counts_monotonic() {
    let mut totals = Vec::new();
    animated_report(&seeded(100, 7), |f| totals.push(f.result.total_points));
    assert!(totals.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(totals.last(), Some(&100));
}

#[test]
fn test_run_cli_help_and_version() {
    assert_eq!(
        run_cli(Args { command: Command::Help }),
        ExitCode::SUCCESS
    );
    assert_eq!(
        run_cli(Args {
            command: Command::Version
        }),
        ExitCode::SUCCESS
    );
}

#[test]
fn test_run_cli_invalid_config_fails() {
    let args = Args::parse_from(["pisim", "run", "--points", "0"]);
    assert_eq!(run_cli(args), ExitCode::from(2));
}

#[test]
fn test_run_cli_run_json() {
    let args = Args::parse_from(["pisim", "run", "--points", "100", "--seed", "1", "--json"]);
    assert_eq!(run_cli(args), ExitCode::SUCCESS);
}

#[test]
fn test_run_cli_animate_text() {
    let args = Args::parse_from(["pisim", "animate", "--points", "30", "--speed", "10"]);
    assert_eq!(run_cli(args), ExitCode::SUCCESS);
}

// ============================================================================
// Output tests
// ============================================================================

fn sample_report() -> RunReport {
    RunReport {
        mode: "instant",
        seed: 7,
        frames: 0,
        result: SimulationResult::from_counts(4, 3),
    }
}

#[test]
fn test_format_report_text() {
    let text = format_report(&sample_report());
    assert!(text.contains("Mode:          instant"));
    assert!(text.contains("Seed:          7"));
    assert!(text.contains("Total points:  4"));
    assert!(text.contains("Inside circle: 3"));
    assert!(text.contains("Estimated π:   3.000000"));
    assert!(text.contains("Actual π:      3.141593"));
    assert!(!text.contains("Frames"));
}

#[test]
fn test_format_report_shows_frames_when_animated() {
    let mut report = sample_report();
    report.frames = 12;
    assert!(format_report(&report).contains("Frames:        12"));
}

#[test]
fn test_format_frame() {
    let line = format_frame(&FrameReport {
        frame: 2,
        drawn: 10,
        result: SimulationResult::from_counts(20, 16),
    });
    assert!(line.starts_with("frame     2"));
    assert!(line.contains("π≈3.200000"));
}

#[test]
fn test_json_report_is_flat() {
    let line = to_json_line(&sample_report()).expect("serializes");
    let value: serde_json::Value = serde_json::from_str(&line).expect("valid json");
    assert_eq!(value["mode"], "instant");
    assert_eq!(value["seed"], 7);
    assert_eq!(value["total_points"], 4);
    assert_eq!(value["inside_circle"], 3);
    assert!(value.get("result").is_none());
}

#[test]
fn test_json_frame_line() {
    let line = to_json_line(&FrameReport {
        frame: 1,
        drawn: 4,
        result: SimulationResult::from_counts(4, 4),
    })
    .expect("serializes");
    assert!(!line.contains('\n'));
    let value: serde_json::Value = serde_json::from_str(&line).expect("valid json");
    assert_eq!(value["estimated_pi"], 4.0);
}
