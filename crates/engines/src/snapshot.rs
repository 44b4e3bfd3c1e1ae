//! CPU-side PNG output of a [`Raster`].
//!
//! This module is feature-gated behind `png` (default on) so that WASM builds
//! can depend on the `engines` crate without pulling in the `image` crate.
//! The pixel buffer conversion itself lives in [`crate::pixel`] (always available).

use std::path::Path;

use swirl_core::error::EngineError;
use swirl_core::raster::Raster;
use tracing::debug;

use crate::pixel::raster_to_rgba;

/// Writes a raster as a PNG image.
///
/// Returns `EngineError::InvalidDimensions` if the raster dimensions overflow
/// `u32`, `EngineError::BufferMismatch` if the converted buffer does not fit
/// them, or `EngineError::Io` on write failure.
pub fn write_png(raster: &Raster, path: &Path) -> Result<(), EngineError> {
    let rgba = raster_to_rgba(raster);
    let got = rgba.len();
    let w = u32::try_from(raster.width_px()).map_err(|_| EngineError::InvalidDimensions)?;
    let h = u32::try_from(raster.height_px()).map_err(|_| EngineError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba).ok_or(EngineError::BufferMismatch {
        width: raster.width_px(),
        height: raster.height_px(),
        got,
    })?;
    img.save(path).map_err(|e| EngineError::Io(e.to_string()))?;
    debug!(path = %path.display(), width = w, height = h, "wrote png");
    Ok(())
}
