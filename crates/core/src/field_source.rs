//! Flow sources: direction fields that steer particles.
//!
//! A [`FlowSource`] maps a particle's position, its private phase offset,
//! and the global time to a heading. All implementations are deterministic
//! and hold no per-particle state, so one source is shared by every
//! particle in a frame.

use glam::DVec2;
use std::f64::consts::PI;

use crate::noise::value_noise;

/// Default spatial frequency: pixels to noise-lattice units.
pub const DEFAULT_NOISE_SCALE: f64 = 0.003;
/// Default angle span: a noise value of ±1 maps to ±4π (two full turns).
pub const DEFAULT_TURNS: f64 = PI * 4.0;

/// A 2D direction field sampled per particle.
pub trait FlowSource: Send + Sync {
    /// Heading at `position` for a particle with phase offset `phase`
    /// at global `time`. Implementations return a unit vector.
    fn direction(&self, position: DVec2, phase: DVec2, time: f64) -> DVec2;
}

/// Value-noise flow: the noise sample is read as an angle.
///
/// The field is sampled at `position * scale + phase + time` on both axes,
/// so `time` drifts the whole pattern diagonally and `phase` gives each
/// particle its own slice of the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseFlow {
    pub scale: f64,
    pub turns: f64,
    /// Clamp the noise sample to [-1, 1] before converting to an angle.
    pub clamp: bool,
}

impl NoiseFlow {
    pub fn new(scale: f64, turns: f64, clamp: bool) -> Self {
        Self {
            scale,
            turns,
            clamp,
        }
    }

    /// Raw noise value behind [`FlowSource::direction`].
    pub fn sample(&self, position: DVec2, phase: DVec2, time: f64) -> f64 {
        let p = position * self.scale + phase + DVec2::splat(time);
        let v = value_noise(p.x, p.y);
        if self.clamp {
            v.clamp(-1.0, 1.0)
        } else {
            v
        }
    }

    /// Flow angle in radians.
    pub fn angle(&self, position: DVec2, phase: DVec2, time: f64) -> f64 {
        self.sample(position, phase, time) * self.turns
    }
}

impl Default for NoiseFlow {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_SCALE, DEFAULT_TURNS, false)
    }
}

impl FlowSource for NoiseFlow {
    fn direction(&self, position: DVec2, phase: DVec2, time: f64) -> DVec2 {
        DVec2::from_angle(self.angle(position, phase, time))
    }
}
