//! Visualization driver.
//!
//! Runs the estimator in one of two modes and paints every point it counts:
//!
//! - **Incremental**: [`PiDriver::start`] obtains a lazy point sequence and
//!   asks the host for a frame. Each [`PiDriver::on_frame`] pulls up to
//!   `points_per_frame` points, renders them and refreshes the statistics,
//!   then asks for the next frame until the sequence is drained.
//! - **Instant**: [`PiDriver::run_instant`] computes the full batch
//!   synchronously, then draws a capped set of *fresh* points for effect.
//!
//! # State machine
//!
//! ```text
//!          start            sequence drained
//!   Idle ─────────▶ Running ─────────────────▶ Idle
//!    ▲  ◀──reset──    │
//!    │                │ stop
//!    └──── reset ── Stopped ──start──▶ Running
//! ```

use crate::config::PiConfig;
use crate::engine::scheduler::{FrameHandle, FrameQueue, FrameScheduler};
use crate::renderers::{CanvasGeometry, Palette, Renderer, BOUNDARY_WIDTH, MARKER_SIZE};
use crate::sampler::{Point, PointSequence, Sampler, SimulationResult};
use serde::Serialize;
use std::fmt;

/// Instant runs above this size log a warning: they block the host.
pub const LARGE_INSTANT_RUN: u64 = 10_000_000;

/// Lifecycle of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RunState {
    /// No run in progress.
    #[default]
    Idle,
    /// An incremental run is consuming frames.
    Running,
    /// An incremental run was cancelled before it drained.
    Stopped,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "IDLE",
            Self::Running => "RUNNING",
            Self::Stopped => "STOPPED",
        };
        f.write_str(label)
    }
}

/// What a frame callback did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The driver was not running; nothing drawn.
    Inactive,
    /// Points were drawn and another frame was requested.
    Continued {
        /// Points drawn this frame.
        drawn: u64,
    },
    /// The sequence drained this frame; the driver is idle.
    Completed {
        /// Points drawn this frame.
        drawn: u64,
    },
}

impl FrameOutcome {
    /// Points drawn by the frame.
    #[must_use]
    pub const fn drawn(&self) -> u64 {
        match self {
            Self::Inactive => 0,
            Self::Continued { drawn } | Self::Completed { drawn } => *drawn,
        }
    }
}

/// Drives sampling, rendering and statistics for one drawing surface.
#[derive(Debug)]
pub struct PiDriver<R: Renderer, S: FrameScheduler> {
    sampler: Sampler,
    renderer: R,
    scheduler: S,
    geometry: CanvasGeometry,
    palette: Palette,
    instant_sample_cap: u64,
    state: RunState,
    sequence: Option<PointSequence>,
    points_per_frame: u64,
    pending_frame: Option<FrameHandle>,
    total_points: u64,
    inside_circle: u64,
    result: SimulationResult,
    frames: u64,
    disposed: bool,
}

impl<R: Renderer, S: FrameScheduler> PiDriver<R, S> {
    /// Create a driver with default geometry, palette and instant cap.
    #[must_use]
    pub fn new(sampler: Sampler, renderer: R, scheduler: S) -> Self {
        Self {
            sampler,
            renderer,
            scheduler,
            geometry: CanvasGeometry::default(),
            palette: Palette::default(),
            instant_sample_cap: crate::config::DEFAULT_INSTANT_SAMPLE_CAP,
            state: RunState::Idle,
            sequence: None,
            points_per_frame: crate::config::DEFAULT_POINTS_PER_FRAME,
            pending_frame: None,
            total_points: 0,
            inside_circle: 0,
            result: SimulationResult::zeroed(),
            frames: 0,
            disposed: false,
        }
    }

    /// Create a driver from configuration.
    #[must_use]
    pub fn from_config(config: &PiConfig, renderer: R, scheduler: S) -> Self {
        Self::new(Sampler::from_seed(config.seed), renderer, scheduler)
            .with_geometry(CanvasGeometry::new(config.canvas_size))
            .with_instant_sample_cap(config.instant_sample_cap)
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: CanvasGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_instant_sample_cap(mut self, cap: u64) -> Self {
        self.instant_sample_cap = cap;
        self
    }

    // === Lifecycle ===

    /// Prepare the surface: clear it and draw the quarter-circle boundary.
    pub fn initialize(&mut self) {
        self.disposed = false;
        self.clear_surface();
    }

    /// Stop any run and release the pending frame request.
    ///
    /// Also performed on drop.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.stop();
        self.disposed = true;
        tracing::debug!(frames = self.frames, "driver disposed");
    }

    // === Incremental mode ===

    /// Begin an incremental run of `n` points, `points_per_frame` per frame.
    ///
    /// Ignored while a run is in progress. Nothing is drawn until the first
    /// frame fires. A `points_per_frame` of zero is treated as one.
    ///
    /// Returns whether a run was started.
    pub fn start(&mut self, n: u64, points_per_frame: u64) -> bool {
        if self.state == RunState::Running {
            return false;
        }

        self.reset();
        self.state = RunState::Running;
        self.points_per_frame = points_per_frame.max(1);
        self.sequence = Some(self.sampler.incremental(n));
        self.pending_frame = Some(self.scheduler.request_frame());

        tracing::debug!(
            points = n,
            points_per_frame = self.points_per_frame,
            seed = self.sampler.seed(),
            "incremental run started"
        );
        true
    }

    /// Frame callback: draw the next slice of the running sequence.
    pub fn on_frame(&mut self) -> FrameOutcome {
        self.pending_frame = None;
        if self.state != RunState::Running {
            return FrameOutcome::Inactive;
        }
        let Some(mut sequence) = self.sequence.take() else {
            self.state = RunState::Idle;
            return FrameOutcome::Completed { drawn: 0 };
        };

        let budget = usize::try_from(self.points_per_frame).unwrap_or(usize::MAX);
        let mut drawn = 0;
        for point in sequence.by_ref().take(budget) {
            self.render_point(&point);
            self.total_points += 1;
            if point.is_inside() {
                self.inside_circle += 1;
            }
            drawn += 1;
        }
        self.result = SimulationResult::from_counts(self.total_points, self.inside_circle);
        self.frames += 1;

        tracing::trace!(
            frame = self.frames,
            drawn,
            total = self.total_points,
            estimate = self.result.estimated_pi,
            "frame rendered"
        );

        if sequence.is_exhausted() {
            self.state = RunState::Idle;
            tracing::debug!(
                total = self.total_points,
                inside = self.inside_circle,
                estimate = self.result.estimated_pi,
                error = self.result.error,
                "incremental run complete"
            );
            FrameOutcome::Completed { drawn }
        } else {
            self.sequence = Some(sequence);
            self.pending_frame = Some(self.scheduler.request_frame());
            FrameOutcome::Continued { drawn }
        }
    }

    /// Cancel the current run. Safe to call in any state.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.sequence = None;
        if self.state == RunState::Running {
            self.state = RunState::Stopped;
            tracing::debug!(total = self.total_points, "incremental run stopped");
        }
    }

    /// Change the animation speed, including for the run in progress.
    pub fn set_points_per_frame(&mut self, points_per_frame: u64) {
        self.points_per_frame = points_per_frame.max(1);
    }

    // === Instant mode ===

    /// Compute `n` points in one synchronous batch.
    ///
    /// The displayed statistics come from the batch. Afterwards up to
    /// `instant_sample_cap` freshly drawn points are rendered for effect;
    /// they are not the points that were counted.
    pub fn run_instant(&mut self, n: u64) -> SimulationResult {
        self.reset();
        if n > LARGE_INSTANT_RUN {
            tracing::warn!(points = n, "large instant run blocks until complete");
        }

        let result = self.sampler.run_batch(n);
        self.total_points = result.total_points;
        self.inside_circle = result.inside_circle;
        self.result = result;

        for _ in 0..n.min(self.instant_sample_cap) {
            let point = self.sampler.generate_point();
            self.render_point(&point);
        }
        result
    }

    // === Shared ===

    /// Cancel, zero all statistics, and redraw the empty surface.
    pub fn reset(&mut self) {
        self.stop();
        self.state = RunState::Idle;
        self.total_points = 0;
        self.inside_circle = 0;
        self.result = SimulationResult::zeroed();
        self.frames = 0;
        self.clear_surface();
    }

    /// Draw one point marker, coloured by whether it is inside.
    pub fn render_point(&mut self, point: &Point) {
        let (px, py) = self.geometry.to_pixel(point);
        let half = MARKER_SIZE / 2.0;
        self.renderer.fill_rect(
            px - half,
            py - half,
            MARKER_SIZE,
            MARKER_SIZE,
            self.palette.marker(point),
        );
    }

    fn clear_surface(&mut self) {
        let side = self.geometry.side();
        self.renderer.clear(side);
        self.renderer
            .stroke_quarter_arc(side, self.palette.boundary, BOUNDARY_WIDTH);
    }

    // === Accessors ===

    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Displayed statistics.
    #[must_use]
    pub const fn result(&self) -> &SimulationResult {
        &self.result
    }

    #[must_use]
    pub const fn total_points(&self) -> u64 {
        self.total_points
    }

    #[must_use]
    pub const fn inside_circle(&self) -> u64 {
        self.inside_circle
    }

    #[must_use]
    pub const fn points_per_frame(&self) -> u64 {
        self.points_per_frame
    }

    /// Points still to be drawn by the current run.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.sequence.as_ref().map_or(0, PointSequence::remaining)
    }

    /// Frames rendered by the current run.
    #[must_use]
    pub const fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Whether a frame request is outstanding.
    #[must_use]
    pub const fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.sampler.seed()
    }

    #[must_use]
    pub const fn geometry(&self) -> &CanvasGeometry {
        &self.geometry
    }

    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<R: Renderer> PiDriver<R, FrameQueue> {
    /// Fire the pending frame of an in-process queue, if any.
    pub fn pump(&mut self) -> Option<FrameOutcome> {
        self.scheduler.take_due()?;
        Some(self.on_frame())
    }

    /// Pump frames until no frame is pending. Returns frames fired.
    pub fn run_to_completion(&mut self) -> u64 {
        let mut fired = 0;
        while self.pump().is_some() {
            fired += 1;
        }
        fired
    }
}

impl<R: Renderer, S: FrameScheduler> Drop for PiDriver<R, S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
