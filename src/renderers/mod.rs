//! Drawing surfaces for the visualization driver.
//!
//! The driver speaks only the [`Renderer`] trait; each host supplies an
//! implementation:
//!
//! ```text
//!            PiDriver
//!               ↓
//! ┌─────────────────────────┐
//! │     Renderer (trait)    │
//! └─────────────────────────┘
//!    ↓          ↓          ↓
//! Retained   Web canvas  Recording /
//!  grid      (web-sys)   Counting
//!  (TUI)
//! ```
//!
//! Coordinates are canvas pixels with the origin at the top-left corner and
//! `y` growing downwards, so the quarter circle sits in the top-left corner.

pub mod tui;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use tui::RetainedCanvas;

use crate::sampler::Point;
use serde::Serialize;

/// Side length of a point marker in pixels.
pub const MARKER_SIZE: f64 = 2.0;

/// Stroke width of the quarter-circle boundary in pixels.
pub const BOUNDARY_WIDTH: f64 = 2.0;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Build from a `0xRRGGBB` literal.
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// CSS hex notation, e.g. `#4CAF50`.
    #[must_use]
    pub fn to_css(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Colours used by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    /// Quarter-circle outline.
    pub boundary: Rgb,
    /// Points inside the quarter circle.
    pub inside: Rgb,
    /// Points outside the quarter circle.
    pub outside: Rgb,
}

impl Palette {
    /// Marker colour for a point.
    #[must_use]
    pub const fn marker(&self, point: &Point) -> Rgb {
        if point.is_inside() {
            self.inside
        } else {
            self.outside
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            boundary: Rgb::from_hex(0x0021_96F3),
            inside: Rgb::from_hex(0x004C_AF50),
            outside: Rgb::from_hex(0x00F4_4336),
        }
    }
}

/// Square drawing area and the unit-square → pixel mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasGeometry {
    side: f64,
}

impl CanvasGeometry {
    /// Create a geometry with the given side length in pixels.
    #[must_use]
    pub const fn new(side: f64) -> Self {
        Self { side }
    }

    /// Side length in pixels.
    #[must_use]
    pub const fn side(&self) -> f64 {
        self.side
    }

    /// `pixel = unit_coordinate * side`.
    #[must_use]
    pub fn to_pixel(&self, point: &Point) -> (f64, f64) {
        (point.x() * self.side, point.y() * self.side)
    }
}

impl Default for CanvasGeometry {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CANVAS_SIZE)
    }
}

/// A drawing surface.
pub trait Renderer {
    /// Erase everything on a `side × side` surface.
    fn clear(&mut self, side: f64);

    /// Stroke a quarter circle of `radius` centred on the origin.
    fn stroke_quarter_arc(&mut self, radius: f64, color: Rgb, line_width: f64);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb);
}

/// A single recorded drawing call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DrawCommand {
    /// Surface cleared.
    Clear {
        /// Side length.
        side: f64,
    },
    /// Quarter-circle outline.
    Arc {
        /// Radius.
        radius: f64,
        /// Stroke colour.
        color: Rgb,
        /// Stroke width.
        line_width: f64,
    },
    /// Filled rectangle.
    Rect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// Fill colour.
        color: Rgb,
    },
}

/// Renderer that records every call, for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded calls in order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Calls recorded since the most recent clear.
    #[must_use]
    pub fn since_last_clear(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear { .. }))
            .map_or(0, |i| i + 1);
        &self.commands[start..]
    }

    /// Rectangles drawn since the most recent clear.
    #[must_use]
    pub fn markers(&self) -> usize {
        self.since_last_clear()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
            .count()
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, side: f64) {
        self.commands.push(DrawCommand::Clear { side });
    }

    fn stroke_quarter_arc(&mut self, radius: f64, color: Rgb, line_width: f64) {
        self.commands.push(DrawCommand::Arc {
            radius,
            color,
            line_width,
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }
}

/// Renderer that only counts markers, for headless runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountingRenderer {
    /// Markers drawn since the last clear.
    pub markers: u64,
    /// Times the surface was cleared.
    pub clears: u64,
    /// Times the boundary was stroked.
    pub arcs: u64,
}

impl Renderer for CountingRenderer {
    fn clear(&mut self, _side: f64) {
        self.markers = 0;
        self.clears += 1;
    }

    fn stroke_quarter_arc(&mut self, _radius: f64, _color: Rgb, _line_width: f64) {
        self.arcs += 1;
    }

    fn fill_rect(&mut self, _x: f64, _y: f64, _width: f64, _height: f64, _color: Rgb) {
        self.markers += 1;
    }
}
