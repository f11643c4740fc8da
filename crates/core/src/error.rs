//! Error types for the icon-machine core.
//!
//! Rendering itself is total: degenerate geometry is clamped, never reported.
//! Errors only come from configuration (bad dimensions, unknown classes) and
//! from writing output.

use thiserror::Error;

/// Errors produced while configuring or emitting icons.
#[derive(Debug, Error)]
pub enum IconError {
    /// Width or height was zero, or the canvas size overflows.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// The per-tile dimension is outside the supported range.
    #[error("invalid tile dimension {dimension}: must be between {min} and {max} pixels")]
    InvalidDimension {
        dimension: usize,
        min: usize,
        max: usize,
    },

    /// The tile grid size is outside the supported range.
    #[error("invalid tile grid {tile_dimension}: must be between 1 and {max} tiles per side")]
    InvalidTileDimension { tile_dimension: usize, max: usize },

    /// An icon class name was not recognized.
    #[error("unknown icon class: {0}")]
    UnknownIconClass(String),

    /// A spec document could not be parsed.
    #[error("invalid spec: {0}")]
    InvalidSpec(String),

    /// The rendered sheet could not be encoded as an image.
    #[error("cannot encode image: {0}")]
    Encode(String),

    /// Writing an image or reading a spec file failed.
    #[error("i/o error: {0}")]
    Io(String),
}
