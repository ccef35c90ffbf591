//! π estimation TUI application state and logic.
//!
//! Terminal I/O is handled by the `pisim-tui` binary; all state management
//! lives here so it can be tested without a terminal. The binary's event loop
//! ticks at ~30 Hz and each tick fires at most one pending frame.

use crate::config::PiConfig;
use crate::driver::{FrameOutcome, PiDriver, RunState};
use crate::engine::scheduler::FrameQueue;
use crate::renderers::RetainedCanvas;
use crate::sampler::SimulationResult;
use crossterm::event::KeyCode;

/// Largest points-per-frame reachable with `+`.
pub const MAX_POINTS_PER_FRAME: u64 = 10_000;
/// Largest points-per-run reachable with `]`.
pub const MAX_POINTS: u64 = 10_000_000;

/// Application state for the π TUI.
pub struct PiApp {
    /// The visualization driver.
    pub driver: PiDriver<RetainedCanvas, FrameQueue>,
    /// Points sampled by the next run.
    pub points: u64,
    /// Points drawn per frame.
    pub points_per_frame: u64,
    /// Frames rendered by the terminal.
    pub frame_count: u64,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Error history of the current run, in hundredths of a percent.
    pub error_history: Vec<u64>,
    /// Maximum history length.
    pub max_history: usize,
}

impl PiApp {
    /// Create an application with default settings and an entropy seed.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&PiConfig::default())
    }

    /// Create an application from configuration.
    #[must_use]
    pub fn from_config(config: &PiConfig) -> Self {
        let mut driver =
            PiDriver::from_config(config, RetainedCanvas::default(), FrameQueue::new());
        driver.initialize();

        Self {
            driver,
            points: config.points,
            points_per_frame: config.points_per_frame,
            frame_count: 0,
            should_quit: false,
            error_history: Vec::new(),
            max_history: 120,
        }
    }

    /// Advance one terminal frame.
    pub fn update(&mut self) {
        if let Some(outcome) = self.driver.pump() {
            if !matches!(outcome, FrameOutcome::Inactive) {
                self.record_error();
            }
        }
        self.frame_count += 1;
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('s') => self.start(),
            KeyCode::Char('x') => self.driver.stop(),
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char('i') => self.run_instant(),
            KeyCode::Char('+' | '=') => {
                self.set_points_per_frame((self.points_per_frame * 2).min(MAX_POINTS_PER_FRAME));
            }
            KeyCode::Char('-') => {
                self.set_points_per_frame((self.points_per_frame / 2).max(1));
            }
            KeyCode::Char(']') => {
                self.points = (self.points.saturating_mul(10)).min(MAX_POINTS);
            }
            KeyCode::Char('[') => {
                self.points = (self.points / 10).max(1);
            }
            _ => {}
        }
    }

    /// Start an incremental run with the current settings.
    pub fn start(&mut self) {
        if self.driver.start(self.points, self.points_per_frame) {
            self.error_history.clear();
        }
    }

    /// Reset the driver and the history.
    pub fn reset(&mut self) {
        self.driver.reset();
        self.error_history.clear();
    }

    /// Compute the whole run at once.
    pub fn run_instant(&mut self) {
        self.error_history.clear();
        self.driver.run_instant(self.points);
        self.record_error();
    }

    fn set_points_per_frame(&mut self, points_per_frame: u64) {
        self.points_per_frame = points_per_frame;
        self.driver.set_points_per_frame(points_per_frame);
    }

    fn record_error(&mut self) {
        let hundredths = (self.driver.result().error * 100.0).round().max(0.0) as u64;
        self.error_history.push(hundredths);
        if self.error_history.len() > self.max_history {
            self.error_history.remove(0);
        }
    }

    /// Displayed statistics.
    #[must_use]
    pub fn result(&self) -> &SimulationResult {
        self.driver.result()
    }

    /// Driver state.
    #[must_use]
    pub fn state(&self) -> RunState {
        self.driver.state()
    }

    /// Fraction of the current run already drawn, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        let total = self.driver.total_points() + self.driver.remaining();
        if total == 0 {
            return 0.0;
        }
        self.driver.total_points() as f64 / total as f64
    }

    /// Check if the app should quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }
}

impl Default for PiApp {
    fn default() -> Self {
        Self::new()
    }
}
