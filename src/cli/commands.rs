//! CLI command handlers.
//!
//! This module contains the execution logic for each CLI command.
//! Both run modes use the same driver as the interactive hosts, drawing onto
//! a [`CountingRenderer`].

use crate::config::PiConfig;
use crate::driver::PiDriver;
use crate::engine::scheduler::FrameQueue;
use crate::error::PiResult;
use crate::renderers::CountingRenderer;
use std::process::ExitCode;

use super::args::RunOptions;
use super::output::{
    format_frame, format_report, print_help, print_version, to_json_line, FrameReport, RunReport,
};
use super::{Args, Command};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run(options) => run_batch(&options),
        Command::Animate { options, speed } => run_animated(&options, speed),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Build the effective configuration: file (or defaults), then flag overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the result fails validation.
pub fn resolve_config(options: &RunOptions, speed: Option<u64>) -> PiResult<PiConfig> {
    let mut config = match &options.config {
        Some(path) => PiConfig::load(path)?,
        None => PiConfig::default(),
    };
    if let Some(points) = options.points {
        config.points = points;
    }
    if let Some(seed) = options.seed {
        config.seed = Some(seed);
    }
    if let Some(speed) = speed {
        config.points_per_frame = speed;
    }
    config.check()?;
    Ok(config)
}

/// Compute a whole run in one batch.
#[must_use]
pub fn instant_report(config: &PiConfig) -> RunReport {
    let mut driver = PiDriver::from_config(config, CountingRenderer::default(), FrameQueue::new());
    driver.initialize();
    let result = driver.run_instant(config.points);
    RunReport {
        mode: "instant",
        seed: driver.seed(),
        frames: 0,
        result,
    }
}

/// Run frame by frame, reporting each frame to `on_frame`.
pub fn animated_report<F>(config: &PiConfig, mut on_frame: F) -> RunReport
where
    F: FnMut(&FrameReport),
{
    let mut driver = PiDriver::from_config(config, CountingRenderer::default(), FrameQueue::new());
    driver.initialize();
    driver.start(config.points, config.points_per_frame);

    while let Some(outcome) = driver.pump() {
        on_frame(&FrameReport {
            frame: driver.frames_rendered(),
            drawn: outcome.drawn(),
            result: *driver.result(),
        });
    }

    RunReport {
        mode: "incremental",
        seed: driver.seed(),
        frames: driver.frames_rendered(),
        result: *driver.result(),
    }
}

fn run_batch(options: &RunOptions) -> ExitCode {
    let config = match resolve_config(options, None) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };
    emit_report(&instant_report(&config), options.json)
}

fn run_animated(options: &RunOptions, speed: Option<u64>) -> ExitCode {
    let config = match resolve_config(options, speed) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };

    let json = options.json;
    let mut failed = false;
    let report = animated_report(&config, |frame| {
        if json {
            match to_json_line(frame) {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    eprintln!("Error: {e}");
                    failed = true;
                }
            }
        } else {
            println!("{}", format_frame(frame));
        }
    });
    if failed {
        return ExitCode::from(1);
    }
    if !json {
        println!();
    }
    emit_report(&report, json)
}

fn emit_report(report: &RunReport, json: bool) -> ExitCode {
    if json {
        match to_json_line(report) {
            Ok(line) => println!("{line}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::from(1);
            }
        }
    } else {
        println!("{}", format_report(report));
    }
    ExitCode::SUCCESS
}
