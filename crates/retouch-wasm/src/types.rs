//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Retouch
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use retouch_core::{ColorMode, FilterType, PixelBuffer};
use wasm_bindgen::prelude::*;

/// A pixel buffer wrapper for JavaScript.
///
/// Pixels are stored in WASM memory in the editor's native layout: one byte
/// per pixel for grayscale images, three bytes in B, G, R order for color.
/// Use `to_rgba()` to get bytes ready for an `ImageData`.
///
/// # Memory Management
///
/// `pixels()` and `to_rgba()` copy into JavaScript memory as a `Uint8Array`.
/// The generated `free()` method releases WASM memory early; otherwise
/// wasm-bindgen's finalizer handles cleanup.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    inner: PixelBuffer,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create a buffer from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `grayscale` - `true` for 1 byte per pixel, `false` for B, G, R
    /// * `pixels` - Row-major pixel data
    ///
    /// # Errors
    /// Returns an error if the data length does not match the dimensions
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: u32,
        height: u32,
        grayscale: bool,
        pixels: Vec<u8>,
    ) -> Result<JsPixelBuffer, JsValue> {
        let mode = if grayscale {
            ColorMode::Grayscale
        } else {
            ColorMode::ColorBgr
        };
        PixelBuffer::new(width, height, mode, pixels)
            .map(JsPixelBuffer::from_buffer)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Create a color buffer from R, G, B pixel data (3 bytes per pixel).
    ///
    /// # Errors
    /// Returns an error if the data length does not match the dimensions
    pub fn from_rgb(width: u32, height: u32, rgb: Vec<u8>) -> Result<JsPixelBuffer, JsValue> {
        PixelBuffer::from_rgb8(width, height, rgb)
            .map(JsPixelBuffer::from_buffer)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    #[wasm_bindgen(getter)]
    pub fn is_grayscale(&self) -> bool {
        self.inner.mode() == ColorMode::Grayscale
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Returns the raw pixel data (gray or B, G, R) as a Uint8Array copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.data().to_vec()
    }

    /// Returns R, G, B, A display bytes (alpha is always 255).
    pub fn to_rgba(&self) -> Vec<u8> {
        self.inner.to_rgba8()
    }
}

impl JsPixelBuffer {
    pub(crate) fn from_buffer(inner: PixelBuffer) -> Self {
        Self { inner }
    }

    pub(crate) fn as_buffer(&self) -> &PixelBuffer {
        &self.inner
    }
}

/// Convert a u8 filter type value to the core FilterType enum.
///
/// Values:
/// - 0 = Nearest (fastest, lowest quality)
/// - 1 = Bilinear (good balance of speed and quality)
/// - 2 = Lanczos3 (best quality, slowest)
///
/// Any other value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}
