//! Image file decoding and encoding bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode JPEG, PNG or BMP bytes to a pixel buffer
//! - [`encode_image`] - Encode a pixel buffer as PNG, JPEG or BMP bytes
//! - [`detect_format`] - Sniff the format of file bytes
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, encode_image } from '@retouch/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const png = encode_image(image, "png", 90);
//! ```

use crate::types::JsPixelBuffer;
use retouch_core::{decode, encode, ImageFormat};
use wasm_bindgen::prelude::*;

/// Decode image file bytes, applying EXIF orientation for JPEGs.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image or are corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    decode::decode_image(bytes)
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode an image to file bytes.
///
/// # Arguments
///
/// * `image` - Image to encode
/// * `format` - File extension: "png", "jpg"/"jpeg" or "bmp"
/// * `quality` - JPEG quality (1-100), ignored for PNG and BMP
///
/// # Errors
///
/// Returns an error for an unknown format, an empty image, or an encoder
/// failure.
#[wasm_bindgen]
pub fn encode_image(image: &JsPixelBuffer, format: &str, quality: u8) -> Result<Vec<u8>, JsValue> {
    let format = parse_format(format)
        .ok_or_else(|| JsValue::from_str(&format!("Unsupported output format: {}", format)))?;
    encode::encode_image(image.as_buffer(), format, quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Detect the file format of image bytes.
///
/// Returns the canonical extension ("png", "jpg", "bmp"), or `undefined` for
/// anything the editor cannot open.
#[wasm_bindgen]
pub fn detect_format(bytes: &[u8]) -> Option<String> {
    decode::detect_format(bytes).map(|f| f.extension().to_string())
}

fn parse_format(format: &str) -> Option<ImageFormat> {
    ImageFormat::from_extension(format.trim_start_matches('.'))
}
