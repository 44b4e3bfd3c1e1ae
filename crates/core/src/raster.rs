//! CPU software surface.
//!
//! A [`Raster`] stores one opaque sRGB triple per pixel in row-major order
//! and composites every draw call with source-over blending in sRGB space,
//! the same way a browser 2D canvas does by default. Coverage is decided by
//! pixel centers: a pixel is painted when `(px + 0.5, py + 0.5)` falls inside
//! the shape. There is no anti-aliasing.

use crate::color::{Hsla, Rgba, Srgb};
use crate::error::EngineError;
use crate::surface::{gradient_at, GradientStop, Surface};

/// Opaque RGB pixel buffer implementing [`Surface`].
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<[f64; 3]>,
}

impl Raster {
    /// Creates a black raster.
    ///
    /// Returns `EngineError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        Ok(Self {
            width,
            height,
            data: vec![[0.0; 3]; checked_len(width, height)?],
        })
    }

    pub fn width_px(&self) -> usize {
        self.width
    }

    pub fn height_px(&self) -> usize {
        self.height
    }

    /// Row-major pixel data, channels in [0, 1].
    pub fn data(&self) -> &[[f64; 3]] {
        &self.data
    }

    /// Pixel at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Srgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let [r, g, b] = self.data[y * self.width + x];
        Some(Srgb { r, g, b })
    }

    fn blend(&mut self, idx: usize, src: Srgb, alpha: f64) {
        let a = alpha.clamp(0.0, 1.0);
        let dst = &mut self.data[idx];
        dst[0] = src.r * a + dst[0] * (1.0 - a);
        dst[1] = src.g * a + dst[1] * (1.0 - a);
        dst[2] = src.b * a + dst[2] * (1.0 - a);
    }

    /// Pixel index range `[lo, hi)` whose centers lie in `[start, end)`.
    fn span(start: f64, end: f64, limit: usize) -> (usize, usize) {
        let lo = (start - 0.5).ceil().max(0.0);
        let hi = (end - 0.5).ceil().min(limit as f64);
        if hi <= lo {
            return (0, 0);
        }
        (lo as usize, hi as usize)
    }

    /// Visits every pixel whose center lies within `r` of `(cx, cy)`,
    /// passing its index and normalized distance `d / r`.
    fn for_each_in_disc(&mut self, cx: f64, cy: f64, r: f64, mut f: impl FnMut(&mut Self, usize, f64)) {
        if !(r > 0.0) || !cx.is_finite() || !cy.is_finite() {
            return;
        }
        let (x0, x1) = Self::span(cx - r, cx + r + 1.0, self.width);
        let (y0, y1) = Self::span(cy - r, cy + r + 1.0, self.height);
        let r2 = r * r;
        for py in y0..y1 {
            let dy = py as f64 + 0.5 - cy;
            for px in x0..x1 {
                let dx = px as f64 + 0.5 - cx;
                let d2 = dx * dx + dy * dy;
                if d2 <= r2 {
                    let idx = py * self.width + px;
                    f(self, idx, d2.sqrt() / r);
                }
            }
        }
    }
}

fn checked_len(width: usize, height: usize) -> Result<usize, EngineError> {
    if width == 0 || height == 0 {
        return Err(EngineError::InvalidDimensions);
    }
    width
        .checked_mul(height)
        .ok_or(EngineError::InvalidDimensions)
}

/// Converts a floating-point surface size to whole pixels, rounding up.
pub fn pixel_size(width: f64, height: f64) -> Result<(usize, usize), EngineError> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(EngineError::InvalidDimensions);
    }
    Ok((width.ceil() as usize, height.ceil() as usize))
}

impl Surface for Raster {
    fn width(&self) -> f64 {
        self.width as f64
    }

    fn height(&self) -> f64 {
        self.height as f64
    }

    fn resize(&mut self, width: f64, height: f64) -> Result<(), EngineError> {
        let (w, h) = pixel_size(width, height)?;
        *self = Raster::new(w, h)?;
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        let (x0, x1) = Self::span(x, x + width, self.width);
        let (y0, y1) = Self::span(y, y + height, self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(py * self.width + px, color.color, color.alpha);
            }
        }
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Hsla) {
        let src = color.color.to_srgb();
        self.for_each_in_disc(cx, cy, r, |raster, idx, _| {
            raster.blend(idx, src, color.alpha);
        });
    }

    fn fill_radial_gradient(&mut self, cx: f64, cy: f64, r: f64, stops: &[GradientStop]) {
        if stops.is_empty() {
            return;
        }
        self.for_each_in_disc(cx, cy, r, |raster, idx, t| {
            if let Some(c) = gradient_at(stops, t) {
                raster.blend(idx, c.color.to_srgb(), c.alpha);
            }
        });
    }
}
