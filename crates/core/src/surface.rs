//! The drawing target an engine renders into.
//!
//! A [`Surface`] is a pixel-space 2D target with the handful of primitives
//! the particle field needs: translucent rectangles, filled circles, and
//! radial gradients. The software [`Raster`](crate::raster::Raster) and the
//! browser canvas binding both implement it.

use crate::color::{Hsl, Hsla, Rgba};
use crate::error::EngineError;

/// One color stop of a radial gradient, `offset` in [0, 1] from center to rim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Hsla,
}

impl GradientStop {
    pub fn new(offset: f64, color: Hsla) -> Self {
        Self { offset, color }
    }
}

/// A drawable 2D surface with a pixel-space coordinate system.
///
/// Drawing calls composite with source-over blending and never fail;
/// only resizing can reject its input.
pub trait Surface {
    fn width(&self) -> f64;

    fn height(&self) -> f64;

    /// Changes the surface size. Contents after a resize are unspecified.
    fn resize(&mut self, width: f64, height: f64) -> Result<(), EngineError>;

    /// Fills an axis-aligned rectangle.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba);

    /// Fills a disc of radius `r` centered on `(cx, cy)`.
    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Hsla);

    /// Fills a disc of radius `r` with a radial gradient. `stops` are sorted
    /// by offset.
    fn fill_radial_gradient(&mut self, cx: f64, cy: f64, r: f64, stops: &[GradientStop]);

    /// Fills the whole surface.
    fn fill(&mut self, color: Rgba) {
        let (w, h) = (self.width(), self.height());
        self.fill_rect(0.0, 0.0, w, h, color);
    }
}

/// Interpolates the gradient color at `t` in [0, 1].
///
/// Positions before the first stop take the first stop's color, after the
/// last stop the last one's. Returns `None` for an empty stop list.
pub fn gradient_at(stops: &[GradientStop], t: f64) -> Option<Hsla> {
    let first = stops.first()?;
    let last = stops.last()?;
    if t <= first.offset {
        return Some(first.color);
    }
    if t >= last.offset {
        return Some(last.color);
    }
    stops.windows(2).find_map(|pair| {
        let (a, b) = (pair[0], pair[1]);
        if t < a.offset || t > b.offset {
            return None;
        }
        let span = b.offset - a.offset;
        let k = if span > 0.0 { (t - a.offset) / span } else { 0.0 };
        let lerp = |x: f64, y: f64| x + k * (y - x);
        Some(Hsla {
            color: Hsl {
                h: lerp(a.color.color.h, b.color.color.h),
                s: lerp(a.color.color.s, b.color.color.s),
                l: lerp(a.color.color.l, b.color.color.l),
            },
            alpha: lerp(a.color.alpha, b.color.alpha),
        })
    })
}
