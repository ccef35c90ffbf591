//! # pisim
//!
//! Monte Carlo estimation of π with incremental and instant visualization.
//!
//! Points are drawn uniformly from the unit square; the share landing inside
//! the quarter circle `x² + y² ≤ 1` approaches `π/4`. A [`driver::PiDriver`]
//! paints each point on a host surface, either frame by frame or all at once:
//! - Terminal host: `pisim-tui` (feature `tui`)
//! - Browser host: `initPiApp` (feature `wasm`)
//! - Command line: `pisim run` / `pisim animate`
//!
//! ## Example
//!
//! ```rust
//! use pisim::prelude::*;
//!
//! let mut sampler = Sampler::new(42);
//! let result = sampler.run_batch(10_000);
//! assert_eq!(result.total_points, 10_000);
//! assert!(result.error < 10.0);
//!
//! // Incremental: ten frames of ten points each
//! let mut driver = PiDriver::new(Sampler::new(42), CountingRenderer::default(), FrameQueue::new());
//! driver.initialize();
//! driver.start(100, 10);
//! assert_eq!(driver.run_to_completion(), 10);
//! assert_eq!(driver.result().total_points, 100);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
)]

pub mod cli;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod logging;
pub mod renderers;
pub mod sampler;
pub mod tui;
#[cfg(feature = "wasm")]
pub mod web;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{PiConfig, PiConfigBuilder};
    pub use crate::driver::{FrameOutcome, PiDriver, RunState};
    pub use crate::engine::rng::SimRng;
    pub use crate::engine::scheduler::{FrameHandle, FrameQueue, FrameScheduler};
    pub use crate::error::{PiError, PiResult};
    pub use crate::renderers::{
        CanvasGeometry, CountingRenderer, Palette, RecordingRenderer, Renderer, Rgb,
    };
    pub use crate::sampler::{Point, PointSequence, Sampler, SimulationResult};
}

/// Re-export for public API
pub use error::{PiError, PiResult};
pub use logging::init_logging;
