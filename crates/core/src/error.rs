//! Error types for the swirl core.

use thiserror::Error;

/// Errors produced by engine, surface, and snapshot operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Width or height was zero, negative, or not finite.
    #[error("invalid dimensions: width and height must be positive and finite")]
    InvalidDimensions,

    /// A pixel buffer did not match the dimensions it was paired with.
    #[error("buffer length {got} does not match {width}x{height} surface")]
    BufferMismatch {
        width: usize,
        height: usize,
        got: usize,
    },

    /// The registry has no engine with this name.
    #[error("unknown engine: {0}")]
    UnknownEngine(String),

    /// A palette could not be constructed or looked up.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// Writing a snapshot or frame to disk failed.
    #[error("i/o error: {0}")]
    Io(String),
}
