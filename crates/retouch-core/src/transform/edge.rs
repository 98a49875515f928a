//! Canny edge detection.

use image::{GrayImage, Luma};
use imageproc::edges::canny;
use log::trace;

use crate::buffer::{ColorMode, PixelBuffer};

/// Lower hysteresis threshold: weak edges below this are discarded.
pub const CANNY_LOW_THRESHOLD: f32 = 100.0;

/// Upper hysteresis threshold: gradients above this seed an edge.
pub const CANNY_HIGH_THRESHOLD: f32 = 200.0;

/// Produce a binary edge map (0 or 255) from the buffer's luma.
///
/// The output is always Grayscale with the input's dimensions.
pub fn edge_detect(buffer: &PixelBuffer) -> PixelBuffer {
    let luma = buffer.to_mode(ColorMode::Grayscale);
    if luma.is_empty() {
        return luma;
    }

    let (width, height) = (luma.width(), luma.height());
    let plane = luma.data();
    let gray = GrayImage::from_fn(width, height, |x, y| {
        Luma([plane[y as usize * width as usize + x as usize]])
    });

    trace!(
        "Running canny ({}, {}) on {}x{}",
        CANNY_LOW_THRESHOLD,
        CANNY_HIGH_THRESHOLD,
        width,
        height
    );
    let edges = canny(&gray, CANNY_LOW_THRESHOLD, CANNY_HIGH_THRESHOLD);
    PixelBuffer::from_parts(width, height, ColorMode::Grayscale, edges.into_raw())
}
