//! Retained drawing surface for terminal hosts.
//!
//! Terminal UIs redraw the whole screen every frame, while the driver paints
//! incrementally. `RetainedCanvas` bridges the two: it quantizes markers onto a
//! fixed grid (later markers overwrite earlier ones in the same cell) and the
//! terminal frame re-paints from that grid. Memory stays bounded by the grid
//! size no matter how many points a run draws.
//!
//! Nothing here depends on ratatui; the binary does the actual painting.

use super::{Renderer, Rgb};

/// Default grid resolution (cells per side).
pub const DEFAULT_RESOLUTION: usize = 200;

/// Fixed-resolution grid of coloured cells plus the boundary arc.
#[derive(Debug, Clone)]
pub struct RetainedCanvas {
    resolution: usize,
    side: f64,
    cells: Vec<Option<Rgb>>,
    boundary: Option<Rgb>,
    filled: usize,
}

impl RetainedCanvas {
    /// Create a canvas with `resolution × resolution` cells.
    #[must_use]
    pub fn new(resolution: usize) -> Self {
        let resolution = resolution.max(1);
        Self {
            resolution,
            side: crate::config::DEFAULT_CANVAS_SIZE,
            cells: vec![None; resolution * resolution],
            boundary: None,
            filled: 0,
        }
    }

    /// Cells per side.
    #[must_use]
    pub const fn resolution(&self) -> usize {
        self.resolution
    }

    /// Number of non-empty cells.
    #[must_use]
    pub const fn filled(&self) -> usize {
        self.filled
    }

    /// Colour of the boundary arc, if one has been stroked since the last clear.
    #[must_use]
    pub const fn boundary(&self) -> Option<Rgb> {
        self.boundary
    }

    /// Colour of a cell.
    #[must_use]
    pub fn cell(&self, col: usize, row: usize) -> Option<Rgb> {
        if col >= self.resolution || row >= self.resolution {
            return None;
        }
        self.cells[row * self.resolution + col]
    }

    /// Non-empty cells grouped by colour, as unit-square centre coordinates
    /// (`x` right, `y` down).
    #[must_use]
    pub fn points_by_color(&self) -> Vec<(Rgb, Vec<(f64, f64)>)> {
        let mut groups: Vec<(Rgb, Vec<(f64, f64)>)> = Vec::new();
        let scale = self.resolution as f64;

        for (idx, cell) in self.cells.iter().enumerate() {
            let Some(color) = *cell else { continue };
            let col = idx % self.resolution;
            let row = idx / self.resolution;
            let coord = ((col as f64 + 0.5) / scale, (row as f64 + 0.5) / scale);

            match groups.iter_mut().find(|(c, _)| *c == color) {
                Some((_, coords)) => coords.push(coord),
                None => groups.push((color, vec![coord])),
            }
        }
        groups
    }

    fn cell_index(&self, px: f64) -> Option<usize> {
        if !px.is_finite() || px < 0.0 || self.side <= 0.0 {
            return None;
        }
        let idx = (px / self.side * self.resolution as f64) as usize;
        (idx < self.resolution).then_some(idx)
    }
}

impl Default for RetainedCanvas {
    fn default() -> Self {
        Self::new(DEFAULT_RESOLUTION)
    }
}

impl Renderer for RetainedCanvas {
    fn clear(&mut self, side: f64) {
        self.side = side;
        self.cells.fill(None);
        self.boundary = None;
        self.filled = 0;
    }

    fn stroke_quarter_arc(&mut self, _radius: f64, color: Rgb, _line_width: f64) {
        self.boundary = Some(color);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        let (Some(col), Some(row)) = (
            self.cell_index(x + width / 2.0),
            self.cell_index(y + height / 2.0),
        ) else {
            return;
        };
        let slot = &mut self.cells[row * self.resolution + col];
        if slot.is_none() {
            self.filled += 1;
        }
        *slot = Some(color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Rgb = Rgb(0x4C, 0xAF, 0x50);
    const RED: Rgb = Rgb(0xF4, 0x43, 0x36);

    #[test]
    fn test_new_canvas_is_empty() {
        let canvas = RetainedCanvas::new(10);
        assert_eq!(canvas.resolution(), 10);
        assert_eq!(canvas.filled(), 0);
        assert!(canvas.boundary().is_none());
        assert!(canvas.points_by_color().is_empty());
    }

    #[test]
    fn test_zero_resolution_clamped() {
        assert_eq!(RetainedCanvas::new(0).resolution(), 1);
    }

    #[test]
    fn test_fill_rect_quantizes_centre() {
        let mut canvas = RetainedCanvas::new(4);
        canvas.clear(400.0);
        // Marker centred at (150, 350) → column 1, row 3
        canvas.fill_rect(149.0, 349.0, 2.0, 2.0, GREEN);
        assert_eq!(canvas.cell(1, 3), Some(GREEN));
        assert_eq!(canvas.filled(), 1);
    }

    #[test]
    fn test_later_marker_overwrites() {
        let mut canvas = RetainedCanvas::new(4);
        canvas.clear(400.0);
        canvas.fill_rect(10.0, 10.0, 2.0, 2.0, GREEN);
        canvas.fill_rect(20.0, 20.0, 2.0, 2.0, RED);
        assert_eq!(canvas.cell(0, 0), Some(RED));
        assert_eq!(canvas.filled(), 1);
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut canvas = RetainedCanvas::new(4);
        canvas.clear(400.0);
        canvas.fill_rect(-10.0, 10.0, 2.0, 2.0, GREEN);
        canvas.fill_rect(10.0, 500.0, 2.0, 2.0, GREEN);
        assert_eq!(canvas.filled(), 0);
        assert_eq!(canvas.cell(9, 9), None);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut canvas = RetainedCanvas::new(4);
        canvas.clear(400.0);
        canvas.stroke_quarter_arc(400.0, RED, 2.0);
        canvas.fill_rect(10.0, 10.0, 2.0, 2.0, GREEN);
        canvas.clear(400.0);
        assert_eq!(canvas.filled(), 0);
        assert!(canvas.boundary().is_none());
    }

    #[test]
    fn test_points_by_color_groups() {
        let mut canvas = RetainedCanvas::new(2);
        canvas.clear(100.0);
        canvas.fill_rect(10.0, 10.0, 2.0, 2.0, GREEN);
        canvas.fill_rect(80.0, 10.0, 2.0, 2.0, RED);
        canvas.fill_rect(10.0, 80.0, 2.0, 2.0, GREEN);

        let groups = canvas.points_by_color();
        assert_eq!(groups.len(), 2);
        let green = groups.iter().find(|(c, _)| *c == GREEN).expect("green group");
        assert_eq!(green.1.len(), 2);
        assert!(green.1.contains(&(0.25, 0.25)));
        assert!(green.1.contains(&(0.25, 0.75)));
    }

    #[test]
    fn test_boundary_recorded() {
        let mut canvas = RetainedCanvas::default();
        canvas.stroke_quarter_arc(400.0, RED, 2.0);
        assert_eq!(canvas.boundary(), Some(RED));
        assert_eq!(canvas.resolution(), DEFAULT_RESOLUTION);
    }
}
