#![deny(unsafe_code)]
//! Engine registry, animation driver, and CPU-side snapshot rendering.
//!
//! This crate sits between `swirl-core` (which defines the `Engine` and
//! `Surface` traits) and the engine crates (`swirl-field`). Both the CLI and
//! WASM bindings depend on it to avoid duplicating dispatch and frame-loop
//! logic.

pub mod driver;
pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use serde_json::Value;
use swirl_core::error::EngineError;
use swirl_core::surface::Surface;
use swirl_core::Engine;

pub use driver::{Animation, FixedRate, FramePacer, ResizeHandle, StopHandle, Tick, Unpaced};

/// All available engine names.
const ENGINE_NAMES: &[&str] = &["swirl"];

/// Enumeration of all available animated engines.
///
/// Wraps each engine implementation and delegates `Engine` trait methods.
/// Use [`EngineKind::from_name`] for string-based construction (CLI, WASM).
pub enum EngineKind {
    /// Noise-driven swirl particle field.
    Swirl(swirl_field::Swirl),
}

impl EngineKind {
    /// Constructs an engine by name.
    ///
    /// Returns `EngineError::UnknownEngine` if the name is not recognized.
    pub fn from_name(
        name: &str,
        width: f64,
        height: f64,
        seed: u64,
        params: &Value,
    ) -> Result<Self, EngineError> {
        match name {
            "swirl" => Ok(EngineKind::Swirl(swirl_field::Swirl::from_json(
                width, height, seed, params,
            )?)),
            _ => Err(EngineError::UnknownEngine(name.to_string())),
        }
    }

    /// Returns a slice of all recognized engine names.
    pub fn list_engines() -> &'static [&'static str] {
        ENGINE_NAMES
    }
}

impl Engine for EngineKind {
    fn step(&mut self) -> Result<(), EngineError> {
        match self {
            EngineKind::Swirl(e) => e.step(),
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        match self {
            EngineKind::Swirl(e) => e.draw(surface),
        }
    }

    fn resize(&mut self, width: f64, height: f64) -> Result<(), EngineError> {
        match self {
            EngineKind::Swirl(e) => e.resize(width, height),
        }
    }

    fn params(&self) -> Value {
        match self {
            EngineKind::Swirl(e) => e.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            EngineKind::Swirl(e) => e.param_schema(),
        }
    }

    fn prepare(&self, surface: &mut dyn Surface) {
        match self {
            EngineKind::Swirl(e) => e.prepare(surface),
        }
    }
}
