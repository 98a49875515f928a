//! Per-pixel tonal operations: grayscale, brightness and contrast.

use std::ops::RangeInclusive;

use crate::buffer::{ColorMode, PixelBuffer};
use crate::error::EditError;

/// Accepted brightness offsets.
pub const BRIGHTNESS_RANGE: RangeInclusive<i32> = -100..=100;

/// Accepted contrast multipliers.
pub const CONTRAST_RANGE: RangeInclusive<f32> = 0.5..=3.0;

/// Reduce a color buffer to one luma channel.
///
/// Grayscale input is returned as an equal copy.
pub fn grayscale(buffer: &PixelBuffer) -> PixelBuffer {
    buffer.to_mode(ColorMode::Grayscale)
}

/// Add `value` to every channel, saturating at 0 and 255.
///
/// # Errors
///
/// Returns `EditError::InvalidParameter` if `value` is outside -100..=100.
pub fn adjust_brightness(buffer: &PixelBuffer, value: i32) -> Result<PixelBuffer, EditError> {
    check_brightness(value)?;
    Ok(map_channels(buffer, |v| (v as i32 + value).clamp(0, 255) as u8))
}

/// Multiply every channel by `factor`, rounding and saturating at 255.
///
/// # Errors
///
/// Returns `EditError::InvalidParameter` if `factor` is outside 0.5..=3.0
/// or is NaN.
pub fn adjust_contrast(buffer: &PixelBuffer, factor: f32) -> Result<PixelBuffer, EditError> {
    check_contrast(factor)?;
    Ok(map_channels(buffer, |v| {
        (v as f32 * factor).round().clamp(0.0, 255.0) as u8
    }))
}

pub(crate) fn check_brightness(value: i32) -> Result<(), EditError> {
    if BRIGHTNESS_RANGE.contains(&value) {
        Ok(())
    } else {
        Err(EditError::invalid_parameter(
            "brightness",
            format!("value {} is outside -100..=100", value),
        ))
    }
}

pub(crate) fn check_contrast(factor: f32) -> Result<(), EditError> {
    if CONTRAST_RANGE.contains(&factor) {
        Ok(())
    } else {
        Err(EditError::invalid_parameter(
            "contrast",
            format!("factor {} is outside 0.5..=3.0", factor),
        ))
    }
}

/// Build a 256-entry lookup table from `f` and run it over every byte.
fn map_channels(buffer: &PixelBuffer, f: impl Fn(u8) -> u8) -> PixelBuffer {
    let mut lut = [0u8; 256];
    for (i, slot) in lut.iter_mut().enumerate() {
        *slot = f(i as u8);
    }
    let data = buffer.data().iter().map(|&v| lut[v as usize]).collect();
    PixelBuffer::from_parts(buffer.width(), buffer.height(), buffer.mode(), data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grayscale_reduces_channels() {
        let buf = PixelBuffer::new(2, 1, ColorMode::ColorBgr, vec![0, 0, 255, 255, 255, 255]).unwrap();
        let gray = grayscale(&buf);
        assert_eq!(gray.mode(), ColorMode::Grayscale);
        assert_eq!(gray.data(), &[76, 255]);
    }

    #[test]
    fn test_grayscale_of_grayscale_is_copy() {
        let buf = PixelBuffer::new(2, 1, ColorMode::Grayscale, vec![3, 4]).unwrap();
        assert_eq!(grayscale(&buf), buf);
    }

    #[test]
    fn test_brightness_adds_offset() {
        let buf = PixelBuffer::filled(4, 2, ColorMode::ColorBgr, 0).unwrap();
        let out = adjust_brightness(&buf, 50).unwrap();
        assert!(out.data().iter().all(|&v| v == 50));
        assert_eq!(out.byte_size(), 24);
    }

    #[test]
    fn test_brightness_saturates() {
        let buf = PixelBuffer::new(1, 1, ColorMode::ColorBgr, vec![10, 128, 250]).unwrap();
        assert_eq!(adjust_brightness(&buf, 100).unwrap().data(), &[110, 228, 255]);
        assert_eq!(adjust_brightness(&buf, -100).unwrap().data(), &[0, 28, 150]);
    }

    #[test]
    fn test_brightness_zero_is_identity() {
        let buf = PixelBuffer::new(1, 1, ColorMode::ColorBgr, vec![1, 2, 3]).unwrap();
        assert_eq!(adjust_brightness(&buf, 0).unwrap(), buf);
    }

    #[test]
    fn test_brightness_out_of_range() {
        let buf = PixelBuffer::filled(1, 1, ColorMode::Grayscale, 0).unwrap();
        assert!(matches!(
            adjust_brightness(&buf, 101),
            Err(EditError::InvalidParameter {
                operation: "brightness",
                ..
            })
        ));
        assert!(adjust_brightness(&buf, -101).is_err());
    }

    #[test]
    fn test_contrast_scales_and_rounds() {
        let buf = PixelBuffer::new(1, 1, ColorMode::ColorBgr, vec![3, 100, 200]).unwrap();
        // 3 * 1.5 = 4.5 rounds away from zero
        assert_eq!(adjust_contrast(&buf, 1.5).unwrap().data(), &[5, 150, 255]);
        assert_eq!(adjust_contrast(&buf, 0.5).unwrap().data(), &[2, 50, 100]);
    }

    #[test]
    fn test_contrast_one_is_identity() {
        let buf = PixelBuffer::new(1, 1, ColorMode::ColorBgr, vec![7, 77, 177]).unwrap();
        assert_eq!(adjust_contrast(&buf, 1.0).unwrap(), buf);
    }

    #[test]
    fn test_contrast_out_of_range() {
        let buf = PixelBuffer::filled(1, 1, ColorMode::ColorBgr, 0).unwrap();
        assert!(adjust_contrast(&buf, 0.4).is_err());
        assert!(adjust_contrast(&buf, 3.1).is_err());
        assert!(adjust_contrast(&buf, f32::NAN).is_err());
        assert!(adjust_contrast(&buf, 3.0).is_ok());
    }

    #[test]
    fn test_tonal_ops_keep_mode() {
        let buf = PixelBuffer::filled(3, 2, ColorMode::Grayscale, 40).unwrap();
        let out = adjust_brightness(&buf, 10).unwrap();
        assert_eq!(out.mode(), ColorMode::Grayscale);
        assert!(out.data().iter().all(|&v| v == 50));
    }
}
