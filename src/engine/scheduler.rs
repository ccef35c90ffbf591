//! Frame scheduling.
//!
//! The driver never waits for a frame. It asks the host for one through a
//! [`FrameScheduler`] and the host calls back into the driver when the frame
//! fires. Browsers back this with `requestAnimationFrame`; the terminal host,
//! the CLI and the tests use the in-process [`FrameQueue`].
//!
//! At most one frame is outstanding at a time, so frame `k` is fully rendered
//! before frame `k + 1` is requested.

use serde::Serialize;

/// Opaque identifier of a requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FrameHandle(pub u64);

/// Host-provided "next frame" mechanism.
pub trait FrameScheduler {
    /// Request that the host deliver one frame callback.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a previously requested frame.
    ///
    /// Cancelling a frame that already fired, or was already cancelled, is a
    /// no-op.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// In-process frame scheduler.
///
/// Records the outstanding request; [`FrameQueue::take_due`] hands it to the
/// caller that owns the loop.
#[derive(Debug, Clone, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Option<FrameHandle>,
    requested: u64,
    cancelled: u64,
}

impl FrameQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The outstanding request, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Whether a frame is outstanding.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Remove and return the outstanding request, marking it fired.
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    /// Total number of frames requested since creation.
    #[must_use]
    pub const fn requested(&self) -> u64 {
        self.requested
    }

    /// Total number of requests cancelled before firing.
    #[must_use]
    pub const fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        self.requested += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}
