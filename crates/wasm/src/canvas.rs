//! [`Surface`] backed by a browser 2D canvas context.

use std::f64::consts::TAU;

use swirl_core::color::{Hsla, Rgba};
use swirl_core::error::EngineError;
use swirl_core::raster::pixel_size;
use swirl_core::surface::{GradientStop, Surface};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    /// Wraps `canvas`, or `None` if it has no 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        let width = f64::from(canvas.width());
        let height = f64::from(canvas.height());
        Some(Self {
            canvas,
            ctx,
            width,
            height,
        })
    }

    fn disc(&self, cx: f64, cy: f64, r: f64) {
        self.ctx.begin_path();
        self.ctx.arc(cx, cy, r, 0.0, TAU).ok();
        self.ctx.fill();
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    /// Sets the backing store size, which also clears the canvas.
    fn resize(&mut self, width: f64, height: f64) -> Result<(), EngineError> {
        let (w, h) = pixel_size(width, height)?;
        let w = u32::try_from(w).map_err(|_| EngineError::InvalidDimensions)?;
        let h = u32::try_from(h).map_err(|_| EngineError::InvalidDimensions)?;
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill_rect(x, y, width, height);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Hsla) {
        self.ctx.set_fill_style_str(&color.css());
        self.disc(cx, cy, r);
    }

    fn fill_radial_gradient(&mut self, cx: f64, cy: f64, r: f64, stops: &[GradientStop]) {
        let Ok(gradient) = self.ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, r) else {
            return;
        };
        for stop in stops {
            gradient
                .add_color_stop(stop.offset as f32, &stop.color.css())
                .ok();
        }
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.disc(cx, cy, r);
    }
}
