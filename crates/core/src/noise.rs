//! Lattice value noise.
//!
//! Each integer lattice point gets a pseudo-random value from a sine hash;
//! points in between are blended with smoothstep weights. The field is a
//! pure function of `(x, y)`: animation comes from callers shifting the
//! sample coordinates over time, never from mutating the field.

use serde::Serialize;

/// Hash multiplier applied to the sine before taking the fractional part.
const HASH_GAIN: f64 = 43758.5453;
const HASH_X: f64 = 127.1;
const HASH_Y: f64 = 311.7;

/// Pseudo-random value for the lattice point `(a, b)`.
///
/// `f64 %` keeps the sign of the dividend, so the result lies in (-1, 1)
/// rather than [0, 1).
pub fn hash(a: f64, b: f64) -> f64 {
    (a * HASH_X + b * HASH_Y).sin() * HASH_GAIN % 1.0
}

/// Cubic easing `f²(3 − 2f)`: zero slope at 0 and 1.
pub fn smoothstep(f: f64) -> f64 {
    f * f * (3.0 - 2.0 * f)
}

/// Samples the value-noise field at `(x, y)`.
///
/// Output is a convex blend of four hash values and therefore lies in
/// (-1, 1) for finite input.
pub fn value_noise(x: f64, y: f64) -> f64 {
    let ix = x.floor();
    let iy = y.floor();
    let sx = smoothstep(x - ix);
    let sy = smoothstep(y - iy);

    let n00 = hash(ix, iy);
    let n10 = hash(ix + 1.0, iy);
    let n01 = hash(ix, iy + 1.0);
    let n11 = hash(ix + 1.0, iy + 1.0);

    let nx0 = n00 + sx * (n10 - n00);
    let nx1 = n01 + sx * (n11 - n01);
    nx0 + sy * (nx1 - nx0)
}

/// Empirical statistics of the noise field over a sampling grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NoiseRange {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub samples: usize,
}

/// Samples `value_noise` on a `steps × steps` grid spanning
/// `[origin, origin + extent)` on both axes and reports min, max, and mean.
///
/// Returns `None` when `steps` is zero.
pub fn sample_range(origin: f64, extent: f64, steps: usize) -> Option<NoiseRange> {
    if steps == 0 {
        return None;
    }
    let step = extent / steps as f64;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for j in 0..steps {
        let y = origin + j as f64 * step;
        for i in 0..steps {
            let v = value_noise(origin + i as f64 * step, y);
            min = min.min(v);
            max = max.max(v);
            sum += v;
        }
    }
    let samples = steps * steps;
    Some(NoiseRange {
        min,
        max,
        mean: sum / samples as f64,
        samples,
    })
}
