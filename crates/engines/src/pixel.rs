//! Pure-computation pixel buffer conversion from a [`Raster`].
//!
//! This module is always available (no feature gate) so that the `png`
//! snapshot path and any in-memory consumer share the same conversion.

use swirl_core::raster::Raster;

/// Converts a raster to an RGBA8 pixel buffer.
///
/// Each pixel is written as four bytes (R, G, B, 255) in row-major order.
/// The buffer length is `width * height * 4`.
pub fn raster_to_rgba(raster: &Raster) -> Vec<u8> {
    raster
        .data()
        .iter()
        .flat_map(|&[r, g, b]| {
            let to_byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
            [to_byte(r), to_byte(g), to_byte(b), 255u8]
        })
        .collect()
}
