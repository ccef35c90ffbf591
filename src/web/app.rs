use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::{PiConfig, DEFAULT_POINTS, DEFAULT_POINTS_PER_FRAME};
use crate::driver::PiDriver;
use crate::renderers::wasm::{CanvasRenderer, FrameCallback, RafScheduler};
use crate::renderers::CanvasGeometry;
use crate::sampler::SimulationResult;

type WebDriver = PiDriver<CanvasRenderer, RafScheduler>;

/// Page state shared by every event handler.
struct PiPageState {
    driver: WebDriver,
    document: web_sys::Document,
}

impl PiPageState {
    fn update_stats(&self) {
        write_stats(&self.document, self.driver.result());
    }

    fn start(&mut self) {
        let points = read_input(&self.document, "points-input").unwrap_or(DEFAULT_POINTS);
        let speed =
            read_input(&self.document, "speed-input").unwrap_or(DEFAULT_POINTS_PER_FRAME);
        if self.driver.start(points, speed) {
            self.update_stats();
        }
    }

    fn run_instant(&mut self) {
        let points = read_input(&self.document, "points-input").unwrap_or(DEFAULT_POINTS);
        self.driver.run_instant(points);
        self.update_stats();
    }
}

fn write_stats(document: &web_sys::Document, result: &SimulationResult) {
    set_text(document, "total-points", &result.total_points.to_string());
    set_text(document, "inside-circle", &result.inside_circle.to_string());
    set_text(document, "estimated-pi", &format!("{:.6}", result.estimated_pi));
    set_text(document, "actual-pi", &format!("{:.6}", result.actual_pi));
    set_text(document, "error", &format!("{:.4}%", result.error));
}

fn set_text(document: &web_sys::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// Parse a positive integer from an `<input>`.
fn read_input(document: &web_sys::Document, id: &str) -> Option<u64> {
    let input = document
        .get_element_by_id(id)?
        .dyn_into::<web_sys::HtmlInputElement>()
        .ok()?;
    input.value().trim().parse::<u64>().ok().filter(|n| *n > 0)
}

fn setup_button<F>(document: &web_sys::Document, id: &str, mut callback: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    if let Some(btn) = document.get_element_by_id(id) {
        let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
            callback();
        }) as Box<dyn FnMut(_)>);

        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    } else {
        tracing::warn!(id, "button not found");
    }
    Ok(())
}

/// Initialize the π WASM app - call from JavaScript
///
/// # Errors
///
/// Fails when the page has no window, document or `#pi-canvas` element, or
/// when an event listener cannot be attached.
#[wasm_bindgen(js_name = initPiApp)]
pub fn init_pi_app() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    crate::logging::init_browser_logging();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas = document
        .get_element_by_id("pi-canvas")
        .ok_or_else(|| JsValue::from_str("no #pi-canvas element"))?
        .dyn_into::<web_sys::HtmlCanvasElement>()?;

    let config = PiConfig::default();
    let side = f64::from(canvas.width().min(canvas.height()));
    let geometry = if side > 0.0 {
        CanvasGeometry::new(side)
    } else {
        CanvasGeometry::new(config.canvas_size)
    };

    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let renderer = CanvasRenderer::from_canvas(&canvas)?;
    let scheduler = RafScheduler::new(window, Rc::clone(&callback));
    let mut driver = PiDriver::from_config(&config, renderer, scheduler).with_geometry(geometry);
    driver.initialize();

    let state = Rc::new(RefCell::new(PiPageState {
        driver,
        document: document.clone(),
    }));
    state.borrow().update_stats();

    // Each animation frame advances the driver; the driver requests the next.
    {
        let state = Rc::clone(&state);
        *callback.borrow_mut() = Some(Closure::new(move || {
            let mut s = state.borrow_mut();
            s.driver.on_frame();
            s.update_stats();
        }));
    }

    setup_button(&document, "start-btn", {
        let state = Rc::clone(&state);
        move || state.borrow_mut().start()
    })?;

    setup_button(&document, "stop-btn", {
        let state = Rc::clone(&state);
        move || {
            let mut s = state.borrow_mut();
            s.driver.stop();
            s.update_stats();
        }
    })?;

    setup_button(&document, "reset-btn", {
        let state = Rc::clone(&state);
        move || {
            let mut s = state.borrow_mut();
            s.driver.reset();
            s.update_stats();
        }
    })?;

    setup_button(&document, "instant-btn", {
        let state = Rc::clone(&state);
        move || state.borrow_mut().run_instant()
    })?;

    // Speed changes apply to the run in progress
    if let Some(input) = document.get_element_by_id("speed-input") {
        let state = Rc::clone(&state);
        let closure = Closure::wrap(Box::new(move |e: web_sys::Event| {
            if let Some(target) = e.target() {
                if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
                    if let Ok(speed) = input.value().trim().parse::<u64>() {
                        state.borrow_mut().driver.set_points_per_frame(speed);
                    }
                }
            }
        }) as Box<dyn FnMut(_)>);

        input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    tracing::debug!(side = geometry.side(), "pi app initialized");
    Ok(())
}
