//! Simulation engine primitives.
//!
//! - [`rng`]: seedable PCG random streams
//! - [`scheduler`]: host frame scheduling for incremental runs

pub mod rng;
pub mod scheduler;

pub use rng::SimRng;
pub use scheduler::{FrameHandle, FrameQueue, FrameScheduler};
