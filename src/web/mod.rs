//! Browser host.
//!
//! The whole page runs in Rust; JavaScript only loads the module:
//!
//! ```text
//! <script type="module">import init, { initPiApp } from './pkg/pisim.js'; init().then(initPiApp);</script>
//! ```
//!
//! Expected elements: canvas `#pi-canvas`; buttons `#start-btn`, `#stop-btn`,
//! `#reset-btn`, `#instant-btn`; inputs `#points-input`, `#speed-input`; stat
//! fields `#total-points`, `#inside-circle`, `#estimated-pi`, `#actual-pi`,
//! `#error`.

mod app;

pub use app::init_pi_app;
