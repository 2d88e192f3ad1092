//! Error type shared by the library, the wasm bindings and the CLI.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PosterizeError>;

#[derive(Debug, Error)]
pub enum PosterizeError {
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("invalid pixel data length: expected {expected} bytes, got {actual}")]
    InvalidDataLength { expected: usize, actual: usize },

    #[error("output of {width}x{height} at scale {scale} is too large")]
    OutputTooLarge { width: u32, height: u32, scale: u32 },

    #[error("palette must have exactly 4 colors, got {0}")]
    PaletteSize(usize),

    #[error("palette slot {0} out of range (expected 0-3)")]
    InvalidSlot(usize),

    #[error("unknown preset palette: {0}")]
    UnknownPreset(String),

    #[error("need at least {needed} pixels to suggest a palette, got {actual}")]
    TooFewPixels { needed: usize, actual: usize },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
