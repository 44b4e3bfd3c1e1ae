#![deny(unsafe_code)]
//! Swirl particle field engine.
//!
//! A fixed set of particles drifts through a value-noise direction field.
//! Each frame every particle turns to the heading the noise gives at its
//! position, moves at its own speed, is eased back toward its spawn point,
//! and wraps to the opposite edge once it strays more than a margin outside
//! the bounds. Rendering paints a translucent background over the previous
//! frame, which leaves fading trails, then a radial glow and a lighter core
//! for every particle.

pub mod particle;

use serde_json::{json, Value};
use swirl_core::color::Srgb;
use swirl_core::error::EngineError;
use swirl_core::field_source::{NoiseFlow, DEFAULT_NOISE_SCALE, DEFAULT_TURNS};
use swirl_core::palette::Palette;
use swirl_core::params::{clamp_param, param_bool, param_f64, param_string, param_usize};
use swirl_core::prng::Xorshift64;
use swirl_core::surface::Surface;
use swirl_core::Engine;
use tracing::{debug, trace};

pub use particle::Particle;

/// Near-black page background, `#050a18`.
pub const BACKGROUND: Srgb = Srgb {
    r: 5.0 / 255.0,
    g: 10.0 / 255.0,
    b: 24.0 / 255.0,
};

const DEFAULT_PARTICLE_COUNT: usize = 300;
/// Noise time advanced per frame. Frame-count based, so animation speed
/// follows the refresh rate.
const DEFAULT_TIME_STEP: f64 = 0.003;
/// Fraction of the gap to the origin closed each frame.
const DEFAULT_RESTORING: f64 = 0.001;
/// How far outside the bounds a particle may drift before wrapping.
const DEFAULT_MARGIN: f64 = 20.0;
/// Alpha of the background wash painted over each frame.
const DEFAULT_FADE_ALPHA: f64 = 0.12;
/// Glow radius as a multiple of the core radius.
const DEFAULT_GLOW_SCALE: f64 = 5.0;
/// Lightness added to the core dot, in percentage points.
const DEFAULT_CORE_LIFT: f64 = 15.0;
const DEFAULT_PALETTE: &str = "swirl";
/// Upper bound accepted for `particle_count`.
const MAX_PARTICLE_COUNT: usize = 100_000;

// Accepted (min, max) for each numeric param, shared with the schema.
const TIME_STEP_RANGE: (f64, f64) = (0.0, 0.1);
const NOISE_SCALE_RANGE: (f64, f64) = (0.0001, 0.1);
const TURNS_RANGE: (f64, f64) = (0.0, 2.0 * DEFAULT_TURNS);
const RESTORING_RANGE: (f64, f64) = (0.0, 1.0);
const MARGIN_RANGE: (f64, f64) = (0.0, 200.0);
const FADE_ALPHA_RANGE: (f64, f64) = (0.0, 1.0);
const GLOW_SCALE_RANGE: (f64, f64) = (1.0, 20.0);
const CORE_LIFT_RANGE: (f64, f64) = (0.0, 100.0);

/// Tunable constants of the swirl field.
///
/// [`Default`] gives the stock look: 300 particles, noise scale and
/// time step 0.003, two full turns of heading range, 0.1% restoring pull,
/// 20px wrap margin, and a 0.12 fade.
#[derive(Debug, Clone, PartialEq)]
pub struct SwirlParams {
    pub particle_count: usize,
    pub time_step: f64,
    pub noise_scale: f64,
    /// Radians of heading per unit of noise.
    pub turns: f64,
    pub restoring: f64,
    pub margin: f64,
    pub fade_alpha: f64,
    pub glow_scale: f64,
    pub core_lift: f64,
    /// Clamp noise samples to [-1, 1] before converting to a heading.
    pub clamp_noise: bool,
    pub palette: String,
}

impl Default for SwirlParams {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            time_step: DEFAULT_TIME_STEP,
            noise_scale: DEFAULT_NOISE_SCALE,
            turns: DEFAULT_TURNS,
            restoring: DEFAULT_RESTORING,
            margin: DEFAULT_MARGIN,
            fade_alpha: DEFAULT_FADE_ALPHA,
            glow_scale: DEFAULT_GLOW_SCALE,
            core_lift: DEFAULT_CORE_LIFT,
            clamp_noise: false,
            palette: DEFAULT_PALETTE.to_string(),
        }
    }
}

impl SwirlParams {
    /// Extracts parameters from a JSON object, falling back to defaults,
    /// and clamps them with [`SwirlParams::sanitized`].
    pub fn from_json(params: &Value) -> Self {
        Self {
            particle_count: param_usize(params, "particle_count", DEFAULT_PARTICLE_COUNT),
            time_step: param_f64(params, "time_step", DEFAULT_TIME_STEP),
            noise_scale: param_f64(params, "noise_scale", DEFAULT_NOISE_SCALE),
            turns: param_f64(params, "turns", DEFAULT_TURNS),
            restoring: param_f64(params, "restoring", DEFAULT_RESTORING),
            margin: param_f64(params, "margin", DEFAULT_MARGIN),
            fade_alpha: param_f64(params, "fade_alpha", DEFAULT_FADE_ALPHA),
            glow_scale: param_f64(params, "glow_scale", DEFAULT_GLOW_SCALE),
            core_lift: param_f64(params, "core_lift", DEFAULT_CORE_LIFT),
            clamp_noise: param_bool(params, "clamp_noise", false),
            palette: param_string(params, "palette", DEFAULT_PALETTE),
        }
        .sanitized()
    }

    /// Clamps every numeric param to its schema range. Non-finite values
    /// fall back to the default. Keeps positions finite and the wrap margin
    /// non-negative.
    pub fn sanitized(self) -> Self {
        Self {
            particle_count: self.particle_count.min(MAX_PARTICLE_COUNT),
            time_step: clamp_param(self.time_step, DEFAULT_TIME_STEP, TIME_STEP_RANGE),
            noise_scale: clamp_param(self.noise_scale, DEFAULT_NOISE_SCALE, NOISE_SCALE_RANGE),
            turns: clamp_param(self.turns, DEFAULT_TURNS, TURNS_RANGE),
            restoring: clamp_param(self.restoring, DEFAULT_RESTORING, RESTORING_RANGE),
            margin: clamp_param(self.margin, DEFAULT_MARGIN, MARGIN_RANGE),
            fade_alpha: clamp_param(self.fade_alpha, DEFAULT_FADE_ALPHA, FADE_ALPHA_RANGE),
            glow_scale: clamp_param(self.glow_scale, DEFAULT_GLOW_SCALE, GLOW_SCALE_RANGE),
            core_lift: clamp_param(self.core_lift, DEFAULT_CORE_LIFT, CORE_LIFT_RANGE),
            ..self
        }
    }
}

/// The swirl particle field.
///
/// Owns the particle set, the noise flow, the current bounds, and the noise
/// clock. The particle count never changes after construction.
pub struct Swirl {
    particles: Vec<Particle>,
    flow: NoiseFlow,
    width: f64,
    height: f64,
    time: f64,
    steps: u64,
    params: SwirlParams,
}

impl Swirl {
    /// Spawns `params.particle_count` particles inside `width × height`.
    ///
    /// Out-of-range params are clamped first. Returns
    /// `EngineError::InvalidDimensions` for non-positive or non-finite
    /// bounds and `EngineError::InvalidPalette` for an unknown palette name.
    pub fn new(width: f64, height: f64, seed: u64, params: SwirlParams) -> Result<Self, EngineError> {
        validate_bounds(width, height)?;
        let params = params.sanitized();
        let palette = Palette::from_name(&params.palette)?;
        let mut rng = Xorshift64::new(seed);
        let particles: Vec<Particle> = (0..params.particle_count)
            .map(|_| Particle::spawn(&mut rng, width, height, &palette))
            .collect();
        debug!(
            particles = particles.len(),
            width,
            height,
            seed,
            palette = %params.palette,
            "spawned swirl field"
        );
        Ok(Self {
            particles,
            flow: NoiseFlow::new(params.noise_scale, params.turns, params.clamp_noise),
            width,
            height,
            time: 0.0,
            steps: 0,
            params,
        })
    }

    /// Creates a swirl field from a JSON params object.
    pub fn from_json(width: f64, height: f64, seed: u64, json_params: &Value) -> Result<Self, EngineError> {
        Self::new(width, height, seed, SwirlParams::from_json(json_params))
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Noise clock: `steps * time_step`, accumulated.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn swirl_params(&self) -> &SwirlParams {
        &self.params
    }
}

fn validate_bounds(width: f64, height: f64) -> Result<(), EngineError> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidDimensions)
    }
}

impl Engine for Swirl {
    fn step(&mut self) -> Result<(), EngineError> {
        // One bounds snapshot for the whole step.
        let (w, h) = (self.width, self.height);
        let margin = self.params.margin;
        let restoring = self.params.restoring;

        self.time += self.params.time_step;
        let time = self.time;

        for p in &mut self.particles {
            p.advance(&self.flow, time, restoring);
            p.wrap(w, h, margin);
        }

        self.steps += 1;
        trace!(step = self.steps, time, "swirl step");
        Ok(())
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill(BACKGROUND.with_alpha(self.params.fade_alpha));
        for p in &self.particles {
            let (x, y) = (p.position.x, p.position.y);
            surface.fill_radial_gradient(x, y, p.radius * self.params.glow_scale, &p.glow_stops());
            surface.fill_circle(x, y, p.radius, p.core_color(self.params.core_lift));
        }
    }

    fn resize(&mut self, width: f64, height: f64) -> Result<(), EngineError> {
        validate_bounds(width, height)?;
        debug!(
            from_width = self.width,
            from_height = self.height,
            width,
            height,
            "swirl bounds resized"
        );
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn prepare(&self, surface: &mut dyn Surface) {
        surface.fill(BACKGROUND.with_alpha(1.0));
    }

    fn params(&self) -> Value {
        json!({
            "particle_count": self.params.particle_count,
            "time_step": self.params.time_step,
            "noise_scale": self.params.noise_scale,
            "turns": self.params.turns,
            "restoring": self.params.restoring,
            "margin": self.params.margin,
            "fade_alpha": self.params.fade_alpha,
            "glow_scale": self.params.glow_scale,
            "core_lift": self.params.core_lift,
            "clamp_noise": self.params.clamp_noise,
            "palette": self.params.palette,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "particle_count": {
                "type": "integer",
                "default": DEFAULT_PARTICLE_COUNT,
                "min": 0,
                "max": MAX_PARTICLE_COUNT,
                "description": "Number of particles, fixed for the life of the field"
            },
            "time_step": {
                "type": "number",
                "default": DEFAULT_TIME_STEP,
                "min": TIME_STEP_RANGE.0,
                "max": TIME_STEP_RANGE.1,
                "description": "Noise clock advance per frame"
            },
            "noise_scale": {
                "type": "number",
                "default": DEFAULT_NOISE_SCALE,
                "min": NOISE_SCALE_RANGE.0,
                "max": NOISE_SCALE_RANGE.1,
                "description": "Pixels to noise-lattice units"
            },
            "turns": {
                "type": "number",
                "default": DEFAULT_TURNS,
                "min": TURNS_RANGE.0,
                "max": TURNS_RANGE.1,
                "description": "Heading range in radians per unit of noise"
            },
            "restoring": {
                "type": "number",
                "default": DEFAULT_RESTORING,
                "min": RESTORING_RANGE.0,
                "max": RESTORING_RANGE.1,
                "description": "Fraction of the gap to the spawn point closed each frame"
            },
            "margin": {
                "type": "number",
                "default": DEFAULT_MARGIN,
                "min": MARGIN_RANGE.0,
                "max": MARGIN_RANGE.1,
                "description": "Distance outside the bounds before a particle wraps"
            },
            "fade_alpha": {
                "type": "number",
                "default": DEFAULT_FADE_ALPHA,
                "min": FADE_ALPHA_RANGE.0,
                "max": FADE_ALPHA_RANGE.1,
                "description": "Alpha of the background wash painted each frame; lower leaves longer trails"
            },
            "glow_scale": {
                "type": "number",
                "default": DEFAULT_GLOW_SCALE,
                "min": GLOW_SCALE_RANGE.0,
                "max": GLOW_SCALE_RANGE.1,
                "description": "Glow radius as a multiple of the core radius"
            },
            "core_lift": {
                "type": "number",
                "default": DEFAULT_CORE_LIFT,
                "min": CORE_LIFT_RANGE.0,
                "max": CORE_LIFT_RANGE.1,
                "description": "Lightness added to the core dot, in percent"
            },
            "clamp_noise": {
                "type": "boolean",
                "default": false,
                "description": "Clamp noise samples to [-1, 1] before converting to a heading"
            },
            "palette": {
                "type": "string",
                "default": DEFAULT_PALETTE,
                "enum": Palette::list_names(),
                "description": "Particle color palette"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use swirl_core::raster::Raster;

    fn swirl(width: f64, height: f64, seed: u64) -> Swirl {
        Swirl::new(width, height, seed, SwirlParams::default()).unwrap()
    }

    fn in_bounds(s: &Swirl) -> bool {
        let (w, h) = s.bounds();
        let m = s.swirl_params().margin;
        s.particles().iter().all(|p| {
            (-m..=w + m).contains(&p.position.x) && (-m..=h + m).contains(&p.position.y)
        })
    }

    // ---- Construction ----

    #[test]
    fn new_spawns_default_count() {
        let s = swirl(800.0, 600.0, 42);
        assert_eq!(s.particles().len(), 300);
        assert_eq!(s.time(), 0.0);
        assert_eq!(s.steps(), 0);
        assert_eq!(s.bounds(), (800.0, 600.0));
    }

    #[test]
    fn new_rejects_bad_dimensions() {
        let p = SwirlParams::default;
        assert!(Swirl::new(0.0, 600.0, 1, p()).is_err());
        assert!(Swirl::new(800.0, -1.0, 1, p()).is_err());
        assert!(Swirl::new(f64::NAN, 600.0, 1, p()).is_err());
        assert!(Swirl::new(800.0, f64::INFINITY, 1, p()).is_err());
    }

    #[test]
    fn new_rejects_unknown_palette() {
        let params = SwirlParams {
            palette: "mauve".into(),
            ..SwirlParams::default()
        };
        assert!(matches!(
            Swirl::new(100.0, 100.0, 1, params),
            Err(EngineError::InvalidPalette(_))
        ));
    }

    #[test]
    fn zero_particles_is_allowed() {
        let params = SwirlParams {
            particle_count: 0,
            ..SwirlParams::default()
        };
        let mut s = Swirl::new(100.0, 100.0, 1, params).unwrap();
        s.step().unwrap();
        assert!(s.particles().is_empty());
    }

    #[test]
    fn origins_equal_spawn_positions() {
        let s = swirl(800.0, 600.0, 7);
        assert!(s.particles().iter().all(|p| p.origin == p.position));
    }

    #[test]
    fn from_json_defaults_for_empty_object() {
        let s = Swirl::from_json(320.0, 240.0, 1, &json!({})).unwrap();
        assert_eq!(s.swirl_params(), &SwirlParams::default());
    }

    #[test]
    fn from_json_reads_overrides() {
        let s = Swirl::from_json(
            320.0,
            240.0,
            1,
            &json!({"particle_count": 12, "fade_alpha": 0.3, "palette": "ember", "clamp_noise": true}),
        )
        .unwrap();
        assert_eq!(s.particles().len(), 12);
        assert_eq!(s.swirl_params().fade_alpha, 0.3);
        assert!(s.swirl_params().clamp_noise);
        let ember = Palette::ember();
        assert!(s.particles().iter().all(|p| ember.colors().contains(&p.color)));
    }

    #[test]
    fn from_json_caps_particle_count() {
        let params = SwirlParams::from_json(&json!({"particle_count": 10_000_000}));
        assert_eq!(params.particle_count, MAX_PARTICLE_COUNT);
    }

    #[test]
    fn from_json_clamps_out_of_range_values() {
        let params = SwirlParams::from_json(&json!({
            "time_step": 1e308,
            "margin": -500.0,
            "fade_alpha": 7.0,
            "glow_scale": 0.0,
            "noise_scale": -1.0,
        }));
        assert_eq!(params.time_step, 0.1);
        assert_eq!(params.margin, 0.0);
        assert_eq!(params.fade_alpha, 1.0);
        assert_eq!(params.glow_scale, 1.0);
        assert_eq!(params.noise_scale, 0.0001);
    }

    #[test]
    fn out_of_range_json_keeps_particles_in_bounds() {
        for overrides in [json!({"time_step": 1e308}), json!({"margin": -500.0})] {
            let mut s = Swirl::from_json(800.0, 600.0, 1, &overrides).unwrap();
            for _ in 0..3 {
                s.step().unwrap();
            }
            assert!(s.time().is_finite(), "{overrides}: time {}", s.time());
            assert!(s.particles().iter().all(|p| p.position.is_finite()));
            assert!(in_bounds(&s), "{overrides}: particle left the margin");
        }
    }

    #[test]
    fn new_sanitizes_non_finite_params() {
        let params = SwirlParams {
            time_step: f64::NAN,
            margin: f64::INFINITY,
            restoring: -3.0,
            ..SwirlParams::default()
        };
        let s = Swirl::new(100.0, 100.0, 1, params).unwrap();
        assert_eq!(s.swirl_params().time_step, 0.003);
        assert_eq!(s.swirl_params().margin, 20.0);
        assert_eq!(s.swirl_params().restoring, 0.0);
    }

    #[test]
    fn schema_ranges_match_clamping() {
        let s = swirl(100.0, 100.0, 1);
        let schema = s.param_schema();
        for key in ["time_step", "margin", "fade_alpha", "turns"] {
            let max = schema[key]["max"].as_f64().unwrap();
            let mut overrides = serde_json::Map::new();
            overrides.insert(key.to_string(), json!(max * 10.0 + 1.0));
            let clamped = Swirl::from_json(100.0, 100.0, 1, &Value::Object(overrides)).unwrap();
            assert_eq!(clamped.params()[key].as_f64(), Some(max), "{key}");
        }
    }

    #[test]
    fn params_round_trip_through_json() {
        let s = swirl(100.0, 100.0, 1);
        let again = SwirlParams::from_json(&s.params());
        assert_eq!(&again, s.swirl_params());
    }

    #[test]
    fn param_schema_covers_every_param() {
        let s = swirl(100.0, 100.0, 1);
        let schema = s.param_schema();
        let params = s.params();
        for key in params.as_object().unwrap().keys() {
            let entry = &schema[key];
            assert!(entry.get("type").is_some(), "{key} missing 'type'");
            assert!(entry.get("default").is_some(), "{key} missing 'default'");
            assert!(entry.get("description").is_some(), "{key} missing 'description'");
        }
    }

    // ---- Determinism ----

    #[test]
    fn same_seed_same_trajectories() {
        let mut a = swirl(800.0, 600.0, 99);
        let mut b = swirl(800.0, 600.0, 99);
        for _ in 0..100 {
            a.step().unwrap();
            b.step().unwrap();
        }
        assert!(a
            .particles()
            .iter()
            .zip(b.particles())
            .all(|(pa, pb)| pa.position.x.to_bits() == pb.position.x.to_bits()
                && pa.position.y.to_bits() == pb.position.y.to_bits()));
    }

    #[test]
    fn different_seed_different_field() {
        let a = swirl(800.0, 600.0, 1);
        let b = swirl(800.0, 600.0, 2);
        assert!(a
            .particles()
            .iter()
            .zip(b.particles())
            .any(|(pa, pb)| pa.position != pb.position));
    }

    // ---- Stepping ----

    #[test]
    fn count_is_invariant_across_steps() {
        let mut s = swirl(800.0, 600.0, 3);
        for _ in 0..500 {
            s.step().unwrap();
            assert_eq!(s.particles().len(), 300);
        }
    }

    #[test]
    fn time_advances_by_time_step() {
        let mut s = swirl(800.0, 600.0, 3);
        let mut last = s.time();
        for _ in 0..1000 {
            s.step().unwrap();
            let t = s.time();
            assert!(t > last, "time went backwards: {last} -> {t}");
            assert!((t - last - 0.003).abs() < 1e-12, "increment {}", t - last);
            last = t;
        }
        assert_eq!(s.steps(), 1000);
        assert!((s.time() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn positions_stay_within_margin() {
        let mut s = swirl(800.0, 600.0, 11);
        for _ in 0..2000 {
            s.step().unwrap();
            assert!(in_bounds(&s));
        }
    }

    #[test]
    fn first_step_displacement_is_bounded() {
        let mut s = swirl(800.0, 600.0, 2024);
        let before: Vec<DVec2> = s.particles().iter().map(|p| p.position).collect();
        s.step().unwrap();
        for (p, start) in s.particles().iter().zip(&before) {
            let moved = p.position.distance(*start);
            // Origin equals the start, so the pull only shortens the move.
            assert!(moved <= 1.1 + 1e-9, "moved {moved}");
            assert!(moved <= p.speed + 1e-9, "moved {moved} faster than speed {}", p.speed);
        }
    }

    #[test]
    fn particle_past_each_edge_wraps_to_opposite_margin() {
        let (w, h) = (800.0, 600.0);
        // (start, axis, expected) with axis 0 = x, 1 = y.
        let cases = [
            (DVec2::new(w + 25.0, 300.0), 0, -20.0),
            (DVec2::new(-25.0, 300.0), 0, w + 20.0),
            (DVec2::new(400.0, h + 25.0), 1, -20.0),
            (DVec2::new(400.0, -25.0), 1, h + 20.0),
        ];
        for (start, axis, expected) in cases {
            let mut s = swirl(w, h, 5);
            s.particles[0].position = start;
            s.particles[0].origin = start;
            s.step().unwrap();
            let end = s.particles()[0].position;
            assert_eq!(end[axis], expected, "start {start:?} ended at {end:?}");
        }
    }

    #[test]
    fn resize_keeps_particles_and_rewraps() {
        let mut s = swirl(800.0, 600.0, 8);
        let before: Vec<Particle> = s.particles().to_vec();
        s.resize(200.0, 150.0).unwrap();
        assert_eq!(s.particles(), &before[..], "resize must not move particles");
        assert_eq!(s.bounds(), (200.0, 150.0));
        for _ in 0..5 {
            s.step().unwrap();
        }
        assert_eq!(s.particles().len(), 300);
        assert!(in_bounds(&s));
    }

    #[test]
    fn resize_rejects_bad_bounds_and_keeps_old() {
        let mut s = swirl(800.0, 600.0, 8);
        assert!(s.resize(0.0, 10.0).is_err());
        assert!(s.resize(10.0, f64::NAN).is_err());
        assert_eq!(s.bounds(), (800.0, 600.0));
    }

    #[test]
    fn sampling_one_particle_ignores_others_offsets() {
        let mut s = swirl(800.0, 600.0, 13);
        let first = s.particles()[0].clone();
        let before = s.flow.sample(first.position, first.noise_offset, 0.5);
        s.particles[1].noise_offset += DVec2::new(123.0, -45.0);
        let after = s.flow.sample(first.position, first.noise_offset, 0.5);
        assert_eq!(before.to_bits(), after.to_bits());
    }

    // ---- Rendering ----

    #[test]
    fn prepare_paints_opaque_background() {
        let s = swirl(16.0, 16.0, 1);
        let mut raster = Raster::new(16, 16).unwrap();
        s.prepare(&mut raster);
        assert!(raster.data().iter().all(|p| {
            let c = Srgb { r: p[0], g: p[1], b: p[2] };
            c.to_hex() == "#050a18"
        }));
    }

    #[test]
    fn draw_lights_pixels_near_particles() {
        let params = SwirlParams {
            particle_count: 1,
            ..SwirlParams::default()
        };
        let s = Swirl::new(64.0, 64.0, 21, params).unwrap();
        let mut raster = Raster::new(64, 64).unwrap();
        s.prepare(&mut raster);
        s.draw(&mut raster);
        let p = &s.particles()[0];
        let px = raster
            .pixel(p.position.x as usize, p.position.y as usize)
            .unwrap();
        let lum = px.r + px.g + px.b;
        let bg = BACKGROUND.r + BACKGROUND.g + BACKGROUND.b;
        assert!(lum > bg + 0.3, "particle pixel not lit: {px:?}");
        let corner = raster.pixel(0, 0).unwrap();
        let far = (p.position - DVec2::ZERO).length() > p.radius * 5.0 + 1.0;
        if far {
            assert_eq!(corner.to_hex(), "#050a18");
        }
    }

    #[test]
    fn trails_fade_without_new_draws() {
        let params = SwirlParams {
            particle_count: 0,
            ..SwirlParams::default()
        };
        let s = Swirl::new(4.0, 4.0, 1, params).unwrap();
        let mut raster = Raster::new(4, 4).unwrap();
        raster.fill(Srgb { r: 1.0, g: 1.0, b: 1.0 }.with_alpha(1.0));
        for _ in 0..300 {
            s.draw(&mut raster);
        }
        assert_eq!(raster.pixel(2, 2).unwrap().to_hex(), "#050a18");
    }

    #[test]
    fn engine_is_object_safe() {
        let mut engine: Box<dyn Engine> = Box::new(swirl(32.0, 32.0, 1));
        engine.step().unwrap();
        assert_eq!(engine.params()["particle_count"], 300);
    }

    // ---- Property-based tests ----

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn always_within_margin(
                w in 1.0_f64..1500.0,
                h in 1.0_f64..1500.0,
                seed: u64,
                steps in 1_usize..200,
            ) {
                let params = SwirlParams { particle_count: 40, ..SwirlParams::default() };
                let mut s = Swirl::new(w, h, seed, params).unwrap();
                for _ in 0..steps {
                    s.step().unwrap();
                }
                prop_assert!(in_bounds(&s));
                prop_assert_eq!(s.particles().len(), 40);
            }

            #[test]
            fn no_nans(seed: u64, clamp: bool) {
                let params = SwirlParams {
                    particle_count: 40,
                    clamp_noise: clamp,
                    ..SwirlParams::default()
                };
                let mut s = Swirl::new(640.0, 480.0, seed, params).unwrap();
                for _ in 0..100 {
                    s.step().unwrap();
                }
                for p in s.particles() {
                    prop_assert!(p.position.is_finite());
                }
            }
        }
    }
}
