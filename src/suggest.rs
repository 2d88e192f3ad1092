//! Derive a starting palette from the image itself.

use image::{DynamicImage, RgbaImage, imageops::FilterType};
use kmeans_colors::get_kmeans;
use palette::{IntoColor, Lab, Srgb};

use crate::color::{BAND_COUNT, Color, color_luma};
use crate::error::{PosterizeError, Result};
use crate::posterize::Palette;

const MAX_ITERATIONS: usize = 20;
const CONVERGENCE: f32 = 1e-4;
const SEED: u64 = 0;

/// Cluster the image into four colors (k-means in Lab) and order them
/// brightest first, so slot 0 lands on the brightest band.
///
/// When `max_side` is given the image is first nearest-neighbour downscaled so
/// its longest side is at most that many pixels. Alpha is ignored, same as in
/// [`crate::render`].
pub fn suggest_palette(img: &RgbaImage, max_side: Option<u32>) -> Result<Palette> {
    let shrunk;
    let working = match max_side {
        Some(side) if img.width().max(img.height()) > side.max(1) => {
            let (w, h) = fit_within(img.dimensions(), side.max(1));
            shrunk = image::imageops::resize(img, w, h, FilterType::Nearest);
            &shrunk
        }
        _ => img,
    };

    let pixel_count = working.width() as usize * working.height() as usize;
    if pixel_count < BAND_COUNT {
        return Err(PosterizeError::TooFewPixels {
            needed: BAND_COUNT,
            actual: pixel_count,
        });
    }

    let lab_pixels: Vec<Lab> = working
        .pixels()
        .map(|p| {
            let srgb = Srgb::<u8>::new(p[0], p[1], p[2]);
            srgb.into_linear().into_color()
        })
        .collect();

    let kmeans = get_kmeans(BAND_COUNT, MAX_ITERATIONS, CONVERGENCE, false, &lab_pixels, SEED);
    tracing::debug!(
        pixels = lab_pixels.len(),
        score = kmeans.score,
        "k-means palette suggestion finished"
    );

    let mut centroids: Vec<Color> = kmeans
        .centroids
        .iter()
        .map(|&lab| {
            let rgb_f32: Srgb<f32> = Srgb::from_linear(lab.into_color());
            rgb_f32.into_format::<u8>()
        })
        .collect();
    centroids.sort_by(|a, b| color_luma(*b).total_cmp(&color_luma(*a)));

    let mut colors = [Color::new(0, 0, 0); BAND_COUNT];
    for (slot, c) in colors.iter_mut().zip(centroids) {
        *slot = c;
    }
    Ok(Palette::new(colors))
}

/// Decode `input` and run [`suggest_palette`] on it.
pub fn suggest_palette_bytes(input: &[u8], max_side: Option<u32>) -> Result<Palette> {
    let img: DynamicImage = image::load_from_memory(input)?;
    suggest_palette(&img.to_rgba8(), max_side)
}

/// Shrink `(w, h)` so the longest side equals `side`, keeping the aspect ratio.
fn fit_within((w, h): (u32, u32), side: u32) -> (u32, u32) {
    let ratio = side as f32 / w.max(h) as f32;
    (
        ((w as f32) * ratio).round().max(1.0) as u32,
        ((h as f32) * ratio).round().max(1.0) as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::luma;
    use image::Rgba;
    use pretty_assertions::assert_eq;

    fn quadrants() -> RgbaImage {
        RgbaImage::from_fn(16, 16, |x, y| match (x < 8, y < 8) {
            (true, true) => Rgba([250, 250, 250, 255]),
            (false, true) => Rgba([200, 40, 40, 255]),
            (true, false) => Rgba([30, 90, 160, 255]),
            (false, false) => Rgba([5, 5, 5, 255]),
        })
    }

    #[test]
    fn suggestion_is_ordered_brightest_first() {
        let pal = suggest_palette(&quadrants(), None).unwrap();
        let lumas: Vec<f64> = pal.colors().iter().map(|&c| color_luma(c)).collect();
        assert!(lumas.windows(2).all(|w| w[0] >= w[1]), "{lumas:?}");
    }

    #[test]
    fn brightest_slot_is_near_white() {
        let pal = suggest_palette(&quadrants(), None).unwrap();
        assert!(luma(250, 250, 250) - color_luma(pal.colors()[0]) < 8.0);
    }

    #[test]
    fn tiny_images_are_rejected() {
        let img = RgbaImage::new(1, 3);
        assert!(matches!(
            suggest_palette(&img, None),
            Err(PosterizeError::TooFewPixels { needed: 4, actual: 3 })
        ));
    }

    #[test]
    fn fit_within_keeps_aspect() {
        assert_eq!(fit_within((400, 200), 100), (100, 50));
        assert_eq!(fit_within((10, 1000), 50), (1, 50));
    }

    #[test]
    fn downscaled_suggestion_still_works() {
        let pal = suggest_palette(&quadrants(), Some(4)).unwrap();
        assert_eq!(pal.colors().len(), 4);
    }
}
