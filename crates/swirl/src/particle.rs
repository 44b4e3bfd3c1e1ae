//! A single glowing particle and its per-frame motion.

use glam::DVec2;
use swirl_core::color::{Hsl, Hsla};
use swirl_core::field_source::FlowSource;
use swirl_core::palette::Palette;
use swirl_core::prng::Xorshift64;
use swirl_core::surface::GradientStop;

/// Core dot radius range in pixels.
pub const RADIUS_RANGE: (f64, f64) = (0.8, 3.3);
/// Per-step displacement multiplier range.
pub const SPEED_RANGE: (f64, f64) = (0.3, 1.1);
/// Peak opacity range.
pub const OPACITY_RANGE: (f64, f64) = (0.3, 1.0);
/// Upper bound of the per-axis noise phase offset.
pub const NOISE_OFFSET_MAX: f64 = 1000.0;

/// Glow stop offsets and their share of the particle opacity.
const GLOW_STOPS: [(f64, f64); 3] = [(0.0, 0.5), (0.4, 0.15), (1.0, 0.0)];

/// One particle. Everything except `position` is fixed at spawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: DVec2,
    /// Anchor the restoring force pulls toward.
    pub origin: DVec2,
    pub radius: f64,
    pub speed: f64,
    pub opacity: f64,
    pub color: Hsl,
    /// Private phase into the noise field.
    pub noise_offset: DVec2,
}

impl Particle {
    /// Spawns a particle uniformly inside `[0, width) × [0, height)`,
    /// anchored where it spawns.
    ///
    /// Draw order from `rng`: x, y, radius, speed, opacity, color,
    /// offset x, offset y. Changing it changes every seeded run.
    pub fn spawn(rng: &mut Xorshift64, width: f64, height: f64, palette: &Palette) -> Self {
        let position = DVec2::new(rng.next_range(0.0, width), rng.next_range(0.0, height));
        let radius = rng.next_range(RADIUS_RANGE.0, RADIUS_RANGE.1);
        let speed = rng.next_range(SPEED_RANGE.0, SPEED_RANGE.1);
        let opacity = rng.next_range(OPACITY_RANGE.0, OPACITY_RANGE.1);
        let color = palette.pick(rng);
        let noise_offset = DVec2::new(
            rng.next_range(0.0, NOISE_OFFSET_MAX),
            rng.next_range(0.0, NOISE_OFFSET_MAX),
        );
        Self {
            position,
            origin: position,
            radius,
            speed,
            opacity,
            color,
            noise_offset,
        }
    }

    /// Moves along the flow at `speed`, then eases toward the origin by
    /// `restoring` of the remaining gap.
    pub fn advance(&mut self, flow: &dyn FlowSource, time: f64, restoring: f64) {
        let heading = flow.direction(self.position, self.noise_offset, time);
        self.position += heading * self.speed;
        self.position += (self.origin - self.position) * restoring;
    }

    /// Teleports to the opposite edge once the particle is more than
    /// `margin` outside `[0, width] × [0, height]`.
    pub fn wrap(&mut self, width: f64, height: f64, margin: f64) {
        self.position.x = wrap_axis(self.position.x, width, margin);
        self.position.y = wrap_axis(self.position.y, height, margin);
    }

    /// Radial glow stops: half opacity at the center, 15% at 0.4, clear rim.
    pub fn glow_stops(&self) -> [GradientStop; 3] {
        GLOW_STOPS.map(|(offset, share)| {
            GradientStop::new(offset, self.color.with_alpha(self.opacity * share))
        })
    }

    /// Solid core color: base color lightened by `lift` at full opacity.
    pub fn core_color(&self, lift: f64) -> Hsla {
        self.color.lighten(lift).with_alpha(self.opacity)
    }
}

/// One axis of the margin wrap: below `-margin` jumps to `extent + margin`,
/// above `extent + margin` jumps to `-margin`.
pub fn wrap_axis(value: f64, extent: f64, margin: f64) -> f64 {
    if value < -margin {
        extent + margin
    } else if value > extent + margin {
        -margin
    } else {
        value
    }
}
