//! Image resizing for scale edits and display previews.
//!
//! Resampling uses the `image` crate's algorithms. All functions return new
//! buffers without modifying the input.

use std::ops::RangeInclusive;

use image::{GrayImage, RgbImage};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::buffer::{ColorMode, PixelBuffer};
use crate::error::EditError;

/// Accepted scale factors for [`resize`].
pub const SCALE_RANGE: RangeInclusive<f64> = 0.5..=2.0;

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Scale a buffer by `scale`, rounding each dimension (minimum 1 pixel).
///
/// # Errors
///
/// Returns `EditError::InvalidParameter` if `scale` is outside 0.5..=2.0.
pub fn resize(buffer: &PixelBuffer, scale: f64, filter: FilterType) -> Result<PixelBuffer, EditError> {
    check_scale(scale)?;
    if buffer.is_empty() {
        return Ok(buffer.clone());
    }
    let (width, height) = scaled_dimensions(buffer.width(), buffer.height(), scale);
    resize_exact(buffer, width, height, filter)
}

/// Resize a buffer to exact dimensions.
///
/// # Errors
///
/// Returns `EditError::InvalidParameter` if either target dimension is zero.
pub fn resize_exact(
    buffer: &PixelBuffer,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<PixelBuffer, EditError> {
    if width == 0 || height == 0 {
        return Err(EditError::invalid_parameter(
            "resize",
            format!("target {}x{} has a zero dimension", width, height),
        ));
    }

    // Fast path: if dimensions match, just clone
    if buffer.width() == width && buffer.height() == height {
        return Ok(buffer.clone());
    }
    if buffer.is_empty() {
        return Ok(buffer.clone());
    }

    trace!(
        "Resizing {}x{} -> {}x{} with {:?}",
        buffer.width(),
        buffer.height(),
        width,
        height,
        filter
    );

    let (w, h) = (buffer.width(), buffer.height());
    let filter = filter.to_image_filter();
    let data = match buffer.mode() {
        ColorMode::Grayscale => {
            let img = GrayImage::from_raw(w, h, buffer.data().to_vec())
                .ok_or_else(|| size_mismatch(buffer))?;
            image::imageops::resize(&img, width, height, filter).into_raw()
        }
        // Channel order does not matter to the resampler
        ColorMode::ColorBgr => {
            let img = RgbImage::from_raw(w, h, buffer.data().to_vec())
                .ok_or_else(|| size_mismatch(buffer))?;
            image::imageops::resize(&img, width, height, filter).into_raw()
        }
    };

    Ok(PixelBuffer::from_parts(width, height, buffer.mode(), data))
}

/// Shrink a buffer to fit inside `max_width x max_height`, preserving aspect
/// ratio. Buffers that already fit are returned unchanged, never upscaled.
///
/// # Errors
///
/// Returns `EditError::InvalidParameter` if the box has a zero dimension.
pub fn fit_within(
    buffer: &PixelBuffer,
    max_width: u32,
    max_height: u32,
    filter: FilterType,
) -> Result<PixelBuffer, EditError> {
    if max_width == 0 || max_height == 0 {
        return Err(EditError::invalid_parameter(
            "preview",
            format!("box {}x{} has a zero dimension", max_width, max_height),
        ));
    }

    // If already fits, just clone
    if buffer.width() <= max_width && buffer.height() <= max_height {
        return Ok(buffer.clone());
    }

    let (width, height) =
        calculate_fit_dimensions(buffer.width(), buffer.height(), max_width, max_height);
    resize_exact(buffer, width, height, filter)
}

/// Dimensions after scaling, rounded to the nearest pixel, at least 1x1.
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let w = (width as f64 * scale).round() as u32;
    let h = (height as f64 * scale).round() as u32;
    (w.max(1), h.max(1))
}

pub(crate) fn check_scale(scale: f64) -> Result<(), EditError> {
    if SCALE_RANGE.contains(&scale) {
        Ok(())
    } else {
        Err(EditError::invalid_parameter(
            "resize",
            format!("scale {} is outside 0.5..=2.0", scale),
        ))
    }
}

/// Calculate dimensions to fit within a box while preserving aspect ratio.
fn calculate_fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    let new_width = ((width as f64 * ratio).round() as u32).clamp(1, max_width);
    let new_height = ((height as f64 * ratio).round() as u32).clamp(1, max_height);
    (new_width, new_height)
}

pub(super) fn size_mismatch(buffer: &PixelBuffer) -> EditError {
    EditError::InvalidDimensions {
        width: buffer.width(),
        height: buffer.height(),
        channels: buffer.channels(),
        expected: buffer.pixel_count() * buffer.channels(),
        actual: buffer.byte_size(),
    }
}
