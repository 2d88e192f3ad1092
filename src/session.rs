//! Interactive editing state: one loaded source image plus the current
//! palette and scale. Every change is followed by a full [`Session::render`].

use image::RgbaImage;

use crate::color::hex_to_color;
use crate::error::Result;
use crate::posterize::{self, Palette, ScaleFactor};
use crate::presets::Preset;

#[derive(Clone, Debug, Default)]
pub struct Session {
    source: Option<RgbaImage>,
    palette: Palette,
    scale: ScaleFactor,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palette(palette: Palette) -> Self {
        Self {
            palette,
            ..Self::default()
        }
    }

    /// Replace the source image. It stays untouched until the next load.
    pub fn load(&mut self, source: RgbaImage) {
        let (w, h) = source.dimensions();
        tracing::info!(width = w, height = h, "source image loaded");
        self.source = Some(source);
    }

    /// Decode any format the `image` crate understands and load it.
    pub fn load_encoded(&mut self, bytes: &[u8]) -> Result<()> {
        let img = image::load_from_memory(bytes)?;
        self.load(img.to_rgba8());
        Ok(())
    }

    pub fn clear(&mut self) {
        self.source = None;
    }

    pub fn source(&self) -> Option<&RgbaImage> {
        self.source.as_ref()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Update one palette slot from a `#RRGGBB` string (malformed → black).
    pub fn set_color(&mut self, slot: usize, hex: &str) -> Result<()> {
        self.palette.set(slot, hex_to_color(hex))
    }

    pub fn apply_preset(&mut self, preset: &Preset) {
        tracing::debug!(preset = preset.name, "applying preset");
        self.palette = preset.palette();
    }

    pub fn scale(&self) -> ScaleFactor {
        self.scale
    }

    pub fn set_scale(&mut self, scale: u32) {
        self.scale = ScaleFactor::new(scale);
    }

    /// Recompute the output from scratch. `Ok(None)` means no image is
    /// loaded yet, which is not an error.
    pub fn render(&self) -> Result<Option<RgbaImage>> {
        let Some(source) = &self.source else {
            tracing::trace!("render skipped, no source image");
            return Ok(None);
        };
        posterize::render(source, &self.palette, self.scale).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::presets::find_preset;
    use image::Rgba;
    use pretty_assertions::assert_eq;

    fn gray(w: u32, h: u32, g: u8) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([g, g, g, 255]))
    }

    #[test]
    fn render_without_source_is_a_no_op() {
        let s = Session::new();
        assert!(s.render().unwrap().is_none());
    }

    #[test]
    fn render_uses_current_palette_and_scale() {
        let mut s = Session::new();
        s.load(gray(2, 2, 0));
        s.set_scale(4);
        s.set_color(3, "#102030").unwrap();

        let out = s.render().unwrap().unwrap();
        assert_eq!(out.dimensions(), (8, 8));
        assert!(out.pixels().all(|p| *p == Rgba([0x10, 0x20, 0x30, 255])));
    }

    #[test]
    fn each_change_recomputes_from_the_source() {
        let mut s = Session::new();
        s.load(gray(1, 1, 255));
        s.set_scale(3);
        let first = s.render().unwrap().unwrap();

        s.set_scale(1);
        s.set_color(0, "#00FF00").unwrap();
        let second = s.render().unwrap().unwrap();

        assert_eq!(first.dimensions(), (3, 3));
        assert_eq!(second.dimensions(), (1, 1));
        assert_eq!(*second.get_pixel(0, 0), Rgba([0, 255, 0, 255]));
        assert_eq!(s.source().unwrap().dimensions(), (1, 1));
    }

    #[test]
    fn load_replaces_source_wholesale() {
        let mut s = Session::new();
        s.load(gray(4, 4, 0));
        s.load(gray(1, 2, 0));
        assert_eq!(s.render().unwrap().unwrap().dimensions(), (1, 2));

        s.clear();
        assert!(s.render().unwrap().is_none());
    }

    #[test]
    fn presets_and_slots() {
        let mut s = Session::new();
        s.apply_preset(find_preset("green").unwrap());
        assert_eq!(s.palette().colors()[1], Color::new(0xCC, 0xFF, 0xCC));

        assert!(s.set_color(7, "#FFFFFF").is_err());
        s.set_color(2, "bogus").unwrap();
        assert_eq!(s.palette().colors()[2], Color::new(0, 0, 0));
    }

    #[test]
    fn scale_is_clamped() {
        let mut s = Session::new();
        s.set_scale(0);
        assert_eq!(s.scale().get(), 1);
    }

    #[test]
    fn load_encoded_rejects_garbage() {
        let mut s = Session::new();
        assert!(s.load_encoded(b"not an image").is_err());
        assert!(s.source().is_none());
    }
}
