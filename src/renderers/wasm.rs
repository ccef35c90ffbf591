//! Browser drawing surface and frame scheduler.
//!
//! `CanvasRenderer` paints onto a `CanvasRenderingContext2d`; `RafScheduler`
//! maps frame requests onto `requestAnimationFrame`. The frame callback itself
//! is installed by the web application once the driver exists, because the
//! callback needs to reach the driver that owns the scheduler.

use super::{Renderer, Rgb};
use crate::engine::scheduler::{FrameHandle, FrameScheduler};
use std::cell::RefCell;
use std::f64::consts::FRAC_PI_2;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Slot holding the animation frame callback.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Renderer backed by a 2D canvas context.
#[derive(Debug, Clone)]
pub struct CanvasRenderer {
    ctx: web_sys::CanvasRenderingContext2d,
}

impl CanvasRenderer {
    #[must_use]
    pub const fn new(ctx: web_sys::CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Acquire the 2D context of a canvas element.
    ///
    /// # Errors
    ///
    /// Returns the JS error if the canvas has no 2D context.
    pub fn from_canvas(canvas: &web_sys::HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<web_sys::CanvasRenderingContext2d>()?;
        Ok(Self::new(ctx))
    }
}

impl Renderer for CanvasRenderer {
    fn clear(&mut self, side: f64) {
        self.ctx.clear_rect(0.0, 0.0, side, side);
    }

    fn stroke_quarter_arc(&mut self, radius: f64, color: Rgb, line_width: f64) {
        self.ctx.begin_path();
        if self.ctx.arc(0.0, 0.0, radius, 0.0, FRAC_PI_2).is_err() {
            // Negative radius; nothing to draw.
            return;
        }
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(line_width);
        self.ctx.stroke();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(x, y, width, height);
    }
}

/// Frame scheduler backed by `window.requestAnimationFrame`.
#[derive(Debug)]
pub struct RafScheduler {
    window: web_sys::Window,
    callback: FrameCallback,
}

impl RafScheduler {
    /// Create a scheduler whose requests fire whatever `callback` holds.
    #[must_use]
    pub fn new(window: web_sys::Window, callback: FrameCallback) -> Self {
        Self { window, callback }
    }

    /// The shared callback slot.
    #[must_use]
    pub fn callback(&self) -> FrameCallback {
        Rc::clone(&self.callback)
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let slot = self.callback.borrow();
        let Some(closure) = slot.as_ref() else {
            tracing::warn!("frame requested before the callback was installed");
            return FrameHandle(0);
        };
        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref::<js_sys::Function>())
        {
            Ok(id) => FrameHandle(u64::from(id.unsigned_abs())),
            Err(e) => {
                tracing::warn!(error = ?e, "requestAnimationFrame failed");
                FrameHandle(0)
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let Ok(id) = i32::try_from(handle.0) else {
            return;
        };
        if id != 0 && self.window.cancel_animation_frame(id).is_err() {
            tracing::warn!(handle = handle.0, "cancelAnimationFrame failed");
        }
    }
}
