//! CLI argument parsing.
//!
//! This module provides the argument parser for the pisim CLI.
//! Extracted to enable comprehensive testing of argument parsing logic.

use std::path::PathBuf;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Options shared by `run` and `animate`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Points per run override.
    pub points: Option<u64>,
    /// Seed override.
    pub seed: Option<u64>,
    /// Optional YAML configuration file.
    pub config: Option<PathBuf>,
    /// Emit JSON instead of text.
    pub json: bool,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Estimate π in one batch
    Run(RunOptions),
    /// Estimate π frame by frame without a display
    Animate {
        /// Shared options.
        options: RunOptions,
        /// Points-per-frame override.
        speed: Option<u64>,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// This method is testable as it accepts any iterator of strings,
    /// not just `std::env::args()`.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "run" => Self::parse_run_command(&args[2..]),
            "animate" => Self::parse_animate_command(&args[2..]),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    fn parse_run_command(rest: &[String]) -> Command {
        let mut options = RunOptions::default();
        let mut i = 0;
        while i < rest.len() {
            i += Self::parse_shared_flag(rest, i, &mut options).unwrap_or_else(|| {
                eprintln!("Ignoring unknown argument: {}", rest[i]);
                1
            });
        }
        Command::Run(options)
    }

    fn parse_animate_command(rest: &[String]) -> Command {
        let mut options = RunOptions::default();
        let mut speed = None;
        let mut i = 0;
        while i < rest.len() {
            if rest[i] == "--speed" {
                speed = numeric_value(rest, i);
                i += 2;
                continue;
            }
            i += Self::parse_shared_flag(rest, i, &mut options).unwrap_or_else(|| {
                eprintln!("Ignoring unknown argument: {}", rest[i]);
                1
            });
        }
        Command::Animate { options, speed }
    }

    /// Consume one shared flag at `i`; returns how many arguments it used.
    fn parse_shared_flag(rest: &[String], i: usize, options: &mut RunOptions) -> Option<usize> {
        match rest[i].as_str() {
            "--points" | "-n" => {
                options.points = numeric_value(rest, i);
                Some(2)
            }
            "--seed" => {
                options.seed = numeric_value(rest, i);
                Some(2)
            }
            "--config" | "-c" => {
                options.config = rest.get(i + 1).map(PathBuf::from);
                Some(2)
            }
            "--json" => {
                options.json = true;
                Some(1)
            }
            _ => None,
        }
    }
}

/// Value following the flag at `i`, if it parses.
fn numeric_value(rest: &[String], i: usize) -> Option<u64> {
    let raw = rest.get(i + 1)?;
    match raw.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            eprintln!("Invalid value for {}: {raw}", rest[i]);
            None
        }
    }
}
