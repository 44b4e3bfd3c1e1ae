#![deny(unsafe_code)]
//! Browser binding: runs the swirl field on a page canvas.
//!
//! [`start`] sizes the canvas to the page, spawns a field with a time-derived
//! seed, and drives it from `requestAnimationFrame` until the returned
//! [`SwirlHandle`] is stopped. Window resizes are forwarded to the driver and
//! applied at the start of the next frame.

mod canvas;

use std::cell::RefCell;
use std::rc::Rc;

use swirl_core::surface::Surface;
use swirl_engines::{Animation, ResizeHandle, StopHandle, Tick};
use swirl_field::{Swirl, SwirlParams};
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Window};

pub use canvas::CanvasSurface;

/// Handle to a running field. Dropping it leaves the animation running.
#[wasm_bindgen]
pub struct SwirlHandle {
    stop: StopHandle,
}

#[wasm_bindgen]
impl SwirlHandle {
    /// Stops the animation. No further frames are scheduled.
    pub fn stop(&self) {
        self.stop.stop();
    }

    #[wasm_bindgen(js_name = isStopped)]
    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }
}

/// Document height when the body reports one, else the viewport height.
fn page_height(scroll_height: i32, inner_height: Option<f64>) -> Option<f64> {
    if scroll_height > 0 {
        Some(f64::from(scroll_height))
    } else {
        inner_height
    }
}

/// Page size: viewport width by full document height.
fn page_size(window: &Window, document: &Document) -> Option<(f64, f64)> {
    let width = window.inner_width().ok()?.as_f64()?;
    let scroll = document.body().map_or(0, |body| body.scroll_height());
    let height = page_height(scroll, window.inner_height().ok().and_then(|h| h.as_f64()))?;
    Some((width, height))
}

fn request_frame(window: &Window, f: &Closure<dyn FnMut()>) -> bool {
    window
        .request_animation_frame(f.as_ref().unchecked_ref())
        .is_ok()
}

fn listen_for_resize(window: &Window, resize: ResizeHandle) {
    let w = window.clone();
    let on_resize = Closure::wrap(Box::new(move || {
        if let Some(document) = w.document() {
            if let Some((width, height)) = page_size(&w, &document) {
                resize.request(width, height);
            }
        }
    }) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        .ok();
    on_resize.forget();
}

/// Starts the field on the canvas with id `canvas_id`.
///
/// Returns `None` without drawing anything when the page has no such canvas
/// or the canvas has no 2D context.
#[wasm_bindgen]
pub fn start(canvas_id: &str) -> Option<SwirlHandle> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let Some(element) = document.get_element_by_id(canvas_id) else {
        debug!(canvas_id, "no canvas element; not starting");
        return None;
    };
    let Ok(canvas) = element.dyn_into::<web_sys::HtmlCanvasElement>() else {
        debug!(canvas_id, "element is not a canvas; not starting");
        return None;
    };
    let mut surface = CanvasSurface::new(canvas)?;
    let (width, height) = page_size(&window, &document)?;
    surface.resize(width, height).ok()?;

    let seed = js_sys::Date::now().to_bits();
    let engine = Swirl::new(width, height, seed, SwirlParams::default()).ok()?;
    let mut anim = Animation::new(engine, surface);
    anim.start();

    let stop = anim.stop_handle();
    listen_for_resize(&window, anim.resize_handle());

    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let frame_window = window.clone();
    let frame_stop = stop.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || match anim.tick() {
        Ok(Tick::Continue) => {
            if let Some(cb) = f.borrow().as_ref() {
                request_frame(&frame_window, cb);
            }
        }
        Ok(Tick::Stopped) => debug!(frames = anim.frames(), "swirl stopped"),
        Err(e) => {
            debug!(error = %e, "frame failed; stopping");
            frame_stop.stop();
        }
    }) as Box<dyn FnMut()>));

    let scheduled = g
        .borrow()
        .as_ref()
        .is_some_and(|cb| request_frame(&window, cb));
    if !scheduled {
        return None;
    }
    debug!(width, height, seed, "swirl started");
    Some(SwirlHandle { stop })
}
