//! JavaScript bindings.
//!
//! Palettes cross the boundary as arrays of four `#RRGGBB` strings, brightest
//! slot first. Entries that are not strings or not well-formed hex become
//! black, matching [`crate::hex_to_color`].

use js_sys::{Array, Object, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;

use crate::color::{Color, color_to_hex};
use crate::error::PosterizeError;
use crate::posterize::{Palette, ScaleFactor, render, source_from_raw};
use crate::presets::{find_preset, presets};
use crate::session::Session;
use crate::suggest::suggest_palette_bytes;

/// Longest side used when clustering for [`suggest_palette`].
const SUGGEST_MAX_SIDE: u32 = 128;

fn to_js(err: PosterizeError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn palette_from_js(values: &Array) -> Result<Palette, JsValue> {
    let hexes: Vec<String> = values
        .iter()
        .map(|v| v.as_string().unwrap_or_default())
        .collect();
    Palette::from_hex(&hexes).map_err(to_js)
}

fn palette_to_js(palette: &Palette) -> Array {
    palette
        .to_hex()
        .iter()
        .map(|hex| JsValue::from_str(hex))
        .collect()
}

/// Decode an image, posterize it and return `{ image, width, height }` where
/// `image` holds PNG bytes.
#[wasm_bindgen]
pub fn posterize(input: Vec<u8>, palette: Array, scale: u32) -> Result<Object, JsValue> {
    let palette = palette_from_js(&palette)?;
    let img = image::load_from_memory(&input)
        .map_err(|e| JsValue::from_str(&format!("Unable to decode image: {e}")))?;
    let out = render(&img.to_rgba8(), &palette, ScaleFactor::new(scale)).map_err(to_js)?;
    let png = crate::encode_png(&out).map_err(to_js)?;

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("image"), &Uint8Array::from(png.as_slice()))?;
    Reflect::set(&result, &JsValue::from_str("width"), &JsValue::from(out.width()))?;
    Reflect::set(&result, &JsValue::from_str("height"), &JsValue::from(out.height()))?;
    Ok(result)
}

/// Posterize raw RGBA (e.g. `ImageData.data`) and return raw RGBA of size
/// `(width·scale) × (height·scale)`, ready for `putImageData`.
#[wasm_bindgen(js_name = "renderRgba")]
pub fn render_rgba(
    data: Vec<u8>,
    width: u32,
    height: u32,
    palette: Array,
    scale: u32,
) -> Result<Uint8Array, JsValue> {
    let palette = palette_from_js(&palette)?;
    let source = source_from_raw(width, height, data).map_err(to_js)?;
    let out = render(&source, &palette, ScaleFactor::new(scale)).map_err(to_js)?;
    Ok(Uint8Array::from(out.as_raw().as_slice()))
}

/// The built-in presets as `[{ name, colors: [hex x4] }]`.
#[wasm_bindgen(js_name = "presetPalettes")]
pub fn preset_palettes() -> Result<Array, JsValue> {
    let list = Array::new();
    for preset in presets() {
        let colors: Array = preset.colors.iter().map(|&c| JsValue::from_str(c)).collect();
        let entry = Object::new();
        Reflect::set(&entry, &JsValue::from_str("name"), &JsValue::from_str(preset.name))?;
        Reflect::set(&entry, &JsValue::from_str("colors"), &colors)?;
        list.push(&entry);
    }
    Ok(list)
}

/// Suggest a four-color palette (brightest first) from an encoded image.
#[wasm_bindgen(js_name = "suggestPalette")]
pub fn suggest_palette(input: Vec<u8>) -> Result<Array, JsValue> {
    let palette = suggest_palette_bytes(&input, Some(SUGGEST_MAX_SIDE)).map_err(to_js)?;
    Ok(palette_to_js(&palette))
}

/// Stateful editor for live previews: load once, tweak colors and scale, call
/// `render` after every change.
#[wasm_bindgen]
#[derive(Default)]
pub struct Studio {
    session: Session,
}

#[wasm_bindgen]
impl Studio {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Studio {
        Studio::default()
    }

    #[wasm_bindgen(js_name = "loadImage")]
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.session.load_encoded(bytes).map_err(to_js)
    }

    #[wasm_bindgen(js_name = "loadRgba")]
    pub fn load_rgba(&mut self, data: Vec<u8>, width: u32, height: u32) -> Result<(), JsValue> {
        let source = source_from_raw(width, height, data).map_err(to_js)?;
        self.session.load(source);
        Ok(())
    }

    #[wasm_bindgen(js_name = "hasImage")]
    pub fn has_image(&self) -> bool {
        self.session.source().is_some()
    }

    #[wasm_bindgen(js_name = "setColor")]
    pub fn set_color(&mut self, slot: usize, hex: &str) -> Result<(), JsValue> {
        self.session.set_color(slot, hex).map_err(to_js)
    }

    #[wasm_bindgen(js_name = "setPalette")]
    pub fn set_palette(&mut self, palette: Array) -> Result<(), JsValue> {
        self.session.set_palette(palette_from_js(&palette)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = "applyPreset")]
    pub fn apply_preset(&mut self, name: &str) -> Result<(), JsValue> {
        let preset = find_preset(name)
            .ok_or_else(|| to_js(PosterizeError::UnknownPreset(name.to_string())))?;
        self.session.apply_preset(preset);
        Ok(())
    }

    #[wasm_bindgen(js_name = "setScale")]
    pub fn set_scale(&mut self, scale: u32) {
        self.session.set_scale(scale);
    }

    pub fn palette(&self) -> Array {
        palette_to_js(self.session.palette())
    }

    /// Hex string for one slot, or black for an unknown slot.
    #[wasm_bindgen(js_name = "colorAt")]
    pub fn color_at(&self, slot: usize) -> String {
        let color = self
            .session
            .palette()
            .get(slot)
            .unwrap_or(Color::new(0, 0, 0));
        color_to_hex(color)
    }

    #[wasm_bindgen(js_name = "outputWidth")]
    pub fn output_width(&self) -> u32 {
        self.output_side(|img| img.width())
    }

    #[wasm_bindgen(js_name = "outputHeight")]
    pub fn output_height(&self) -> u32 {
        self.output_side(|img| img.height())
    }

    /// Raw RGBA of the current result, or `undefined` before any image is
    /// loaded.
    pub fn render(&self) -> Result<Option<Uint8Array>, JsValue> {
        let out = self.session.render().map_err(to_js)?;
        Ok(out.map(|img| Uint8Array::from(img.as_raw().as_slice())))
    }
}

impl Studio {
    fn output_side(&self, side: impl Fn(&image::RgbaImage) -> u32) -> u32 {
        self.session
            .source()
            .map(|img| side(img).saturating_mul(self.session.scale().get()))
            .unwrap_or(0)
    }
}
