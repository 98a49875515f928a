//! Stateless transform bindings.
//!
//! These run a single transform on a buffer without touching any session
//! history, which is what the shell uses for live slider previews. Parameters
//! use the shell's integer controls: contrast is a slider in tenths (5-30) and
//! resize is a percentage (50-200).

use crate::types::{filter_from_u8, JsPixelBuffer};
use retouch_core::transform::{self, FlipAxis, Rotation};
use wasm_bindgen::prelude::*;

/// Convert to single-channel luma.
#[wasm_bindgen]
pub fn grayscale(image: &JsPixelBuffer) -> JsPixelBuffer {
    JsPixelBuffer::from_buffer(transform::grayscale(image.as_buffer()))
}

/// Gaussian blur with kernel size `2 * intensity + 1`.
///
/// # Errors
///
/// Returns an error if `intensity` is outside 0-10.
#[wasm_bindgen]
pub fn blur(image: &JsPixelBuffer, intensity: i32) -> Result<JsPixelBuffer, JsValue> {
    transform::blur_intensity(intensity)
        .and_then(|intensity| transform::blur(image.as_buffer(), intensity))
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Canny edge map (grayscale, 0 or 255 per pixel).
#[wasm_bindgen]
pub fn edge_detect(image: &JsPixelBuffer) -> JsPixelBuffer {
    JsPixelBuffer::from_buffer(transform::edge_detect(image.as_buffer()))
}

/// Add `value` (-100 to 100) to every channel.
///
/// # Errors
///
/// Returns an error if `value` is out of range.
#[wasm_bindgen]
pub fn adjust_brightness(image: &JsPixelBuffer, value: i32) -> Result<JsPixelBuffer, JsValue> {
    transform::adjust_brightness(image.as_buffer(), value)
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Scale every channel by `slider / 10`.
///
/// # Errors
///
/// Returns an error if `slider` is outside 5-30.
#[wasm_bindgen]
pub fn adjust_contrast(image: &JsPixelBuffer, slider: i32) -> Result<JsPixelBuffer, JsValue> {
    let factor = slider as f32 / 10.0;
    transform::adjust_contrast(image.as_buffer(), factor)
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Rotate clockwise by 90, 180 or 270 degrees.
///
/// # Errors
///
/// Returns an error for any other angle.
#[wasm_bindgen]
pub fn rotate(image: &JsPixelBuffer, degrees: i32) -> Result<JsPixelBuffer, JsValue> {
    Rotation::from_degrees(degrees)
        .map(|rotation| JsPixelBuffer::from_buffer(transform::rotate(image.as_buffer(), rotation)))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Mirror along "horizontal" or "vertical".
///
/// # Errors
///
/// Returns an error for an unknown axis name.
#[wasm_bindgen]
pub fn flip(image: &JsPixelBuffer, axis: &str) -> Result<JsPixelBuffer, JsValue> {
    axis.parse::<FlipAxis>()
        .map(|axis| JsPixelBuffer::from_buffer(transform::flip(image.as_buffer(), axis)))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Scale by `percent / 100`.
///
/// # Arguments
///
/// * `image` - Source image
/// * `percent` - Scale percentage (50-200)
/// * `filter` - 0 = Nearest, 1 = Bilinear, 2 = Lanczos3
///
/// # Errors
///
/// Returns an error if `percent` is out of range.
#[wasm_bindgen]
pub fn resize(image: &JsPixelBuffer, percent: i32, filter: u8) -> Result<JsPixelBuffer, JsValue> {
    let scale = percent as f64 / 100.0;
    transform::resize(image.as_buffer(), scale, filter_from_u8(filter))
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Scale down to fit within `max_width x max_height`, keeping aspect ratio.
/// Images that already fit are returned unchanged.
///
/// # Errors
///
/// Returns an error if either bound is zero.
#[wasm_bindgen]
pub fn fit_within(
    image: &JsPixelBuffer,
    max_width: u32,
    max_height: u32,
    filter: u8,
) -> Result<JsPixelBuffer, JsValue> {
    transform::fit_within(image.as_buffer(), max_width, max_height, filter_from_u8(filter))
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
