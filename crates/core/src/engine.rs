//! The core `Engine` trait implemented by every animated field.
//!
//! The trait is object-safe so engines can be used as `dyn Engine` for runtime
//! switching, and it takes surfaces as `&mut dyn Surface` so one engine can
//! render to the software raster or to a browser canvas.

use crate::error::EngineError;
use crate::surface::Surface;
use serde_json::Value;

/// Core trait for frame-stepped animations.
///
/// A frame is `step()` followed by `draw()`. Simulation state lives in the
/// engine; the surface only ever receives drawing calls, so an engine never
/// reads pixels back.
pub trait Engine {
    /// Advance the simulation by one frame.
    fn step(&mut self) -> Result<(), EngineError>;

    /// Render the current state. Called once per frame after [`step`](Engine::step).
    fn draw(&self, surface: &mut dyn Surface);

    /// Update the simulation bounds. Takes effect on the next step.
    fn resize(&mut self, width: f64, height: f64) -> Result<(), EngineError>;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;

    /// One-time surface setup before the first frame. Does nothing by default.
    fn prepare(&self, _surface: &mut dyn Surface) {}
}
