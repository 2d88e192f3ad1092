//! The four-band posterize + block upscale transform.

use image::RgbaImage;

use crate::color::{BAND_COUNT, Color, band_for_gray, color_to_hex, hex_to_color, luma};
use crate::error::{PosterizeError, Result};
use crate::presets;

/// Four colors, one per brightness band.
///
/// Entries are consumed in reverse band order: slot 0 paints the brightest
/// band and slot 3 the darkest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette([Color; BAND_COUNT]);

impl Palette {
    pub const fn new(colors: [Color; BAND_COUNT]) -> Self {
        Self(colors)
    }

    /// Build a palette from `#RRGGBB` strings. Malformed entries become black;
    /// only a wrong number of entries is rejected.
    pub fn from_hex<S: AsRef<str>>(hexes: &[S]) -> Result<Self> {
        if hexes.len() != BAND_COUNT {
            return Err(PosterizeError::PaletteSize(hexes.len()));
        }
        let mut colors = [Color::new(0, 0, 0); BAND_COUNT];
        for (slot, hex) in colors.iter_mut().zip(hexes) {
            *slot = hex_to_color(hex.as_ref());
        }
        Ok(Self(colors))
    }

    pub fn colors(&self) -> &[Color; BAND_COUNT] {
        &self.0
    }

    pub fn get(&self, slot: usize) -> Option<Color> {
        self.0.get(slot).copied()
    }

    pub fn set(&mut self, slot: usize, color: Color) -> Result<()> {
        let entry = self.0.get_mut(slot).ok_or(PosterizeError::InvalidSlot(slot))?;
        *entry = color;
        Ok(())
    }

    /// Color that paints `band` (0 = darkest, 3 = brightest).
    #[inline]
    pub fn color_for_band(&self, band: usize) -> Color {
        self.0[BAND_COUNT - 1 - band.min(BAND_COUNT - 1)]
    }

    pub fn to_hex(&self) -> [String; BAND_COUNT] {
        self.0.map(color_to_hex)
    }
}

impl Default for Palette {
    fn default() -> Self {
        presets::presets()[0].palette()
    }
}

/// Integer magnification, never below 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScaleFactor(u32);

impl ScaleFactor {
    /// Clamps `0` up to `1`.
    pub fn new(scale: u32) -> Self {
        if scale == 0 {
            tracing::warn!("scale factor 0 clamped to 1");
        }
        Self(scale.max(1))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self(1)
    }
}

impl From<u32> for ScaleFactor {
    fn from(scale: u32) -> Self {
        Self::new(scale)
    }
}

/// Wrap a flat RGBA8 buffer as a source image, checking its shape.
pub fn source_from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(PosterizeError::InvalidDimensions { width, height });
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or(PosterizeError::InvalidDimensions { width, height })?;
    if data.len() != expected {
        return Err(PosterizeError::InvalidDataLength {
            expected,
            actual: data.len(),
        });
    }
    RgbaImage::from_raw(width, height, data).ok_or(PosterizeError::InvalidDimensions { width, height })
}

/// Posterize `source` into four luma bands and blow every pixel up into a
/// `scale × scale` block of its band color.
///
/// The source alpha channel is ignored and every output pixel is opaque. The
/// result is always `(width·scale) × (height·scale)`.
pub fn render(source: &RgbaImage, palette: &Palette, scale: ScaleFactor) -> Result<RgbaImage> {
    let (in_w, in_h) = source.dimensions();
    if in_w == 0 || in_h == 0 {
        return Err(PosterizeError::InvalidDimensions {
            width: in_w,
            height: in_h,
        });
    }
    let s = scale.get();
    let (Some(out_w), Some(out_h)) = (in_w.checked_mul(s), in_h.checked_mul(s)) else {
        return Err(too_large(in_w, in_h, s));
    };
    let row_len = (out_w as usize)
        .checked_mul(4)
        .ok_or_else(|| too_large(in_w, in_h, s))?;
    let total = row_len
        .checked_mul(out_h as usize)
        .filter(|&n| n <= isize::MAX as usize)
        .ok_or_else(|| too_large(in_w, in_h, s))?;

    tracing::debug!(in_w, in_h, scale = s, out_w, out_h, "posterizing");

    let block = s as usize;
    let raw = source.as_raw();
    let mut out_buf: Vec<u8> = Vec::new();
    let mut row: Vec<u8> = Vec::new();
    out_buf
        .try_reserve_exact(total)
        .and_then(|()| row.try_reserve_exact(row_len))
        .map_err(|_| too_large(in_w, in_h, s))?;

    for src_row in raw.chunks_exact(in_w as usize * 4) {
        row.clear();
        for px in src_row.chunks_exact(4) {
            let band = band_for_gray(luma(px[0], px[1], px[2]));
            let c = palette.color_for_band(band);
            let rgba = [c.red, c.green, c.blue, 255];
            for _ in 0..block {
                row.extend_from_slice(&rgba);
            }
        }
        for _ in 0..block {
            out_buf.extend_from_slice(&row);
        }
    }

    RgbaImage::from_raw(out_w, out_h, out_buf).ok_or_else(|| too_large(in_w, in_h, s))
}

fn too_large(width: u32, height: u32, scale: u32) -> PosterizeError {
    PosterizeError::OutputTooLarge {
        width,
        height,
        scale,
    }
}
