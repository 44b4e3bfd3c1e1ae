#![deny(unsafe_code)]
//! Core types and traits for the swirl particle field.
//!
//! Provides the `Engine` and `Surface` traits, the software `Raster` surface,
//! HSL/sRGB color types, particle `Palette`s, lattice value noise and the
//! `NoiseFlow` direction field, the `Xorshift64` PRNG, `Seed`, and parameter
//! helpers.

pub mod color;
pub mod engine;
pub mod error;
pub mod field_source;
pub mod noise;
pub mod palette;
pub mod params;
pub mod prng;
pub mod raster;
pub mod seed;
pub mod surface;

pub use color::{Hsl, Hsla, Rgba, Srgb};
pub use engine::Engine;
pub use error::EngineError;
pub use field_source::{FlowSource, NoiseFlow};
pub use palette::Palette;
pub use prng::Xorshift64;
pub use raster::Raster;
pub use seed::Seed;
pub use surface::{GradientStop, Surface};
