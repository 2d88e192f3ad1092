//! Four-tone posterizer.
//!
//! Every source pixel is reduced to one of four luma bands, recolored from a
//! four-entry palette and blown up into a `scale × scale` block. The core
//! transform is [`render`]; [`Session`] keeps the loaded image and the current
//! settings for interactive use, and the [`wasm`] module exposes both to
//! JavaScript.

pub mod color;
pub mod error;
pub mod posterize;
pub mod presets;
pub mod session;
pub mod suggest;
pub mod wasm;

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

pub use color::{Color, band_for_gray, color_to_hex, hex_to_color, luma};
pub use error::{PosterizeError, Result};
pub use posterize::{Palette, ScaleFactor, render, source_from_raw};
pub use presets::{Preset, find_preset, presets};
pub use session::Session;
pub use suggest::{suggest_palette, suggest_palette_bytes};

/// Decode an encoded image, posterize it and return the result as PNG bytes.
pub fn posterize_bytes(input: &[u8], palette: &Palette, scale: ScaleFactor) -> Result<Vec<u8>> {
    let img = image::load_from_memory(input)?;
    let out = render(&img.to_rgba8(), palette, scale)?;
    encode_png(&out)
}

pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}
