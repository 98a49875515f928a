//! Separable Gaussian blur.
//!
//! The kernel is `2 * intensity + 1` taps wide and its sigma is derived from
//! the kernel size:
//!
//! ```text
//! sigma = 0.3 * ((size - 1) * 0.5 - 1) + 0.8
//! ```
//!
//! The two 1-D passes run through `imageproc`'s separable filter on `f32`
//! samples, so samples outside the image take the value of the nearest edge
//! pixel and rounding happens once, after the vertical pass.

use image::{ImageBuffer, Luma, Pixel, Rgb};
use imageproc::filter::separable_filter_equal;
use log::trace;

use super::resize::size_mismatch;
use crate::buffer::{ColorMode, PixelBuffer};
use crate::error::EditError;

/// Largest accepted blur intensity.
pub const MAX_BLUR_INTENSITY: u8 = 10;

/// Blur every channel with a Gaussian kernel of size `2 * intensity + 1`.
///
/// Intensity 0 yields a one-tap kernel and returns an equal copy.
///
/// # Errors
///
/// Returns `EditError::InvalidParameter` if `intensity` exceeds 10.
pub fn blur(buffer: &PixelBuffer, intensity: u8) -> Result<PixelBuffer, EditError> {
    check_blur(intensity)?;
    if intensity == 0 || buffer.is_empty() {
        return Ok(buffer.clone());
    }

    let kernel = gaussian_kernel(kernel_size(intensity));
    trace!("Blurring with {}-tap kernel", kernel.len());

    let (w, h) = (buffer.width(), buffer.height());
    let samples: Vec<f32> = buffer.data().iter().map(|&v| f32::from(v)).collect();
    let filtered = match buffer.mode() {
        ColorMode::Grayscale => filter_samples::<Luma<f32>>(w, h, samples, &kernel),
        // Channel order does not matter to a per-channel filter
        ColorMode::ColorBgr => filter_samples::<Rgb<f32>>(w, h, samples, &kernel),
    }
    .ok_or_else(|| size_mismatch(buffer))?;

    let data = filtered
        .into_iter()
        .map(|v| v.round().clamp(0.0, 255.0) as u8)
        .collect();
    Ok(PixelBuffer::from_parts(w, h, buffer.mode(), data))
}

/// Run the kernel along rows then columns, or `None` if the samples do not
/// fit the dimensions.
fn filter_samples<P>(
    width: u32,
    height: u32,
    samples: Vec<f32>,
    kernel: &[f32],
) -> Option<Vec<f32>>
where
    P: Pixel<Subpixel = f32>,
{
    let image = ImageBuffer::<P, Vec<f32>>::from_raw(width, height, samples)?;
    Some(separable_filter_equal(&image, kernel).into_raw())
}

/// Kernel size for a blur intensity.
#[inline]
pub fn kernel_size(intensity: u8) -> usize {
    2 * intensity as usize + 1
}

/// Blur intensity from a shell's integer control.
///
/// # Errors
///
/// Returns `EditError::InvalidParameter` if `value` is outside 0..=10,
/// including values that do not fit in a `u8`.
pub fn blur_intensity(value: i32) -> Result<u8, EditError> {
    u8::try_from(value)
        .ok()
        .filter(|&intensity| intensity <= MAX_BLUR_INTENSITY)
        .ok_or_else(|| {
            EditError::invalid_parameter("blur", format!("intensity {} is outside 0..=10", value))
        })
}

pub(crate) fn check_blur(intensity: u8) -> Result<(), EditError> {
    if intensity <= MAX_BLUR_INTENSITY {
        Ok(())
    } else {
        Err(EditError::invalid_parameter(
            "blur",
            format!("intensity {} is outside 0..=10", intensity),
        ))
    }
}

/// Normalized 1-D Gaussian weights for an odd kernel size.
fn gaussian_kernel(size: usize) -> Vec<f32> {
    debug_assert!(size % 2 == 1, "kernel size must be odd");
    let sigma = 0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let center = (size / 2) as f32;
    let denom = 2.0 * sigma * sigma;

    let mut weights: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - center;
            (-(d * d) / denom).exp()
        })
        .collect();
    let total: f32 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    weights
}
