//! Logging setup for the binaries and the browser host.

use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging to stderr.
///
/// Use the `RUST_LOG` environment variable to override the default `warn`
/// filter. Calling this again after a subscriber is installed does nothing.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second install fails harmlessly.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Initialize logging to the browser console.
///
/// The browser has no environment or wall clock for the formatter, so the
/// filter is fixed at `warn` and timestamps are omitted.
#[cfg(feature = "wasm")]
pub fn init_browser_logging() {
    fn console_log(line: &str) {
        web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(line));
    }

    let _ = fmt()
        .with_env_filter(EnvFilter::new("warn"))
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .with_writer(|| LineWriter::new(console_log as fn(&str)))
        .try_init();
}

/// Buffers one formatted event and hands the finished line to a sink on
/// flush or drop. Trailing newlines are stripped.
pub struct LineWriter<F: FnMut(&str)> {
    buf: Vec<u8>,
    sink: F,
}

impl<F: FnMut(&str)> LineWriter<F> {
    #[must_use]
    pub const fn new(sink: F) -> Self {
        Self {
            buf: Vec::new(),
            sink,
        }
    }
}

impl<F: FnMut(&str)> io::Write for LineWriter<F> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            let line = String::from_utf8_lossy(&self.buf);
            (self.sink)(line.trim_end());
            self.buf.clear();
        }
        Ok(())
    }
}

impl<F: FnMut(&str)> Drop for LineWriter<F> {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}
