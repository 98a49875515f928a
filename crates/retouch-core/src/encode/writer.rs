//! PNG, JPEG and BMP encoding for saving.
//!
//! Buffers are expanded to three channels and swapped back to R, G, B order
//! before they reach the `image` crate's encoders, so grayscale edits are
//! written as color files.

use std::io::Cursor;

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use log::debug;
use thiserror::Error;

use crate::buffer::PixelBuffer;
use crate::format::ImageFormat;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("{format:?} encoding failed: {reason}")]
    EncodingFailed { format: ImageFormat, reason: String },
}

/// Encode a buffer to the bytes of an image file.
///
/// # Arguments
///
/// * `buffer` - Image to encode (either color mode)
/// * `format` - Output file format
/// * `quality` - JPEG quality (1-100, clamped); ignored by PNG and BMP
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for empty buffers and
/// `EncodeError::EncodingFailed` if the encoder rejects the data.
pub fn encode_image(
    buffer: &PixelBuffer,
    format: ImageFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if buffer.is_empty() {
        return Err(EncodeError::InvalidDimensions {
            width: buffer.width(),
            height: buffer.height(),
        });
    }

    let rgb = buffer.to_rgb8();
    let (width, height) = (buffer.width(), buffer.height());
    let mut out = Cursor::new(Vec::new());

    let result = match format {
        ImageFormat::Png => {
            PngEncoder::new(&mut out).write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        }
        ImageFormat::Jpeg => JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
            .write_image(&rgb, width, height, ExtendedColorType::Rgb8),
        ImageFormat::Bmp => {
            BmpEncoder::new(&mut out).write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        }
    };
    result.map_err(|e| EncodeError::EncodingFailed {
        format,
        reason: e.to_string(),
    })?;

    let bytes = out.into_inner();
    debug!("Encoded {}x{} image as {:?} ({} bytes)", width, height, format, bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ColorMode;

    #[test]
    fn test_encode_png_magic() {
        let buf = PixelBuffer::filled(10, 10, ColorMode::ColorBgr, 128).unwrap();
        let png = encode_image(&buf, ImageFormat::Png, 90).unwrap();
        assert_eq!(&png[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_jpeg_markers() {
        let buf = PixelBuffer::filled(10, 10, ColorMode::ColorBgr, 128).unwrap();
        let jpeg = encode_image(&buf, ImageFormat::Jpeg, 90).unwrap();

        // SOI and EOI markers
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        let len = jpeg.len();
        assert_eq!(&jpeg[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_bmp_magic() {
        let buf = PixelBuffer::filled(3, 3, ColorMode::ColorBgr, 10).unwrap();
        let bmp = encode_image(&buf, ImageFormat::Bmp, 90).unwrap();
        assert_eq!(&bmp[0..2], b"BM");
    }

    #[test]
    fn test_encode_grayscale_buffer() {
        let buf = PixelBuffer::filled(4, 4, ColorMode::Grayscale, 200).unwrap();
        let result = encode_image(&buf, ImageFormat::Png, 90);
        assert!(result.is_ok());
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let buf = PixelBuffer::filled(8, 8, ColorMode::ColorBgr, 64).unwrap();
        assert!(encode_image(&buf, ImageFormat::Jpeg, 0).is_ok());
        assert!(encode_image(&buf, ImageFormat::Jpeg, 255).is_ok());
    }

    #[test]
    fn test_encode_empty_buffer_rejected() {
        let buf = PixelBuffer::filled(0, 0, ColorMode::ColorBgr, 0).unwrap();
        let result = encode_image(&buf, ImageFormat::Png, 90);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidDimensions {
                width: 0,
                height: 0
            })
        ));
    }
}
