//! JPEG, PNG and BMP decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::ImageReader;
use log::{debug, warn};

use super::{DecodeError, Orientation};
use crate::buffer::{swap_red_blue, ColorMode, PixelBuffer};
use crate::format::ImageFormat;
use crate::transform::{flip, rotate, FlipAxis, Rotation};

/// Decode image bytes into a ColorBgr buffer, applying EXIF orientation.
///
/// Every supported input, including grayscale files, decodes to three
/// channels so the first edit always starts from a color buffer.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a known image,
/// `DecodeError::UnsupportedFormat` for formats other than JPEG/PNG/BMP, and
/// `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    let (format, buffer) = decode_raw(bytes)?;
    if format != ImageFormat::Jpeg {
        return Ok(buffer);
    }

    let orientation = extract_orientation(bytes);
    if orientation != Orientation::Normal {
        debug!("Applying EXIF orientation {:?}", orientation);
    }
    Ok(apply_orientation(&buffer, orientation))
}

/// Decode image bytes without applying EXIF orientation.
///
/// # Errors
///
/// Same as [`decode_image`].
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    decode_raw(bytes).map(|(_, buffer)| buffer)
}

/// Sniff the format of image bytes, if it is one the editor opens.
pub fn detect_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes)
        .ok()
        .and_then(ImageFormat::from_image_format)
}

fn decode_raw(bytes: &[u8]) -> Result<(ImageFormat, PixelBuffer), DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let detected = reader.format().ok_or(DecodeError::InvalidFormat)?;
    let format = ImageFormat::from_image_format(detected)
        .ok_or_else(|| DecodeError::UnsupportedFormat(format!("{:?}", detected)))?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let rgb = img.into_rgb8();
    let (width, height) = rgb.dimensions();
    let mut data = rgb.into_raw();
    swap_red_blue(&mut data);

    debug!("Decoded {:?} image {}x{}", format, width, height);
    Ok((
        format,
        PixelBuffer::from_parts(width, height, ColorMode::ColorBgr, data),
    ))
}

/// Read the EXIF orientation tag, defaulting to `Normal`.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from_exif)
            .unwrap_or_default(),
        Err(exif::Error::NotFound(_)) => Orientation::Normal,
        Err(e) => {
            warn!("Ignoring unreadable EXIF block: {}", e);
            Orientation::Normal
        }
    }
}

/// Undo the camera orientation so the buffer is upright.
fn apply_orientation(buffer: &PixelBuffer, orientation: Orientation) -> PixelBuffer {
    match orientation {
        Orientation::Normal => buffer.clone(),
        Orientation::FlipHorizontal => flip(buffer, FlipAxis::Horizontal),
        Orientation::Rotate180 => rotate(buffer, Rotation::Cw180),
        Orientation::FlipVertical => flip(buffer, FlipAxis::Vertical),
        Orientation::Transpose => flip(&rotate(buffer, Rotation::Cw90), FlipAxis::Horizontal),
        Orientation::Rotate90Cw => rotate(buffer, Rotation::Cw90),
        Orientation::Transverse => flip(&rotate(buffer, Rotation::Cw270), FlipAxis::Horizontal),
        Orientation::Rotate270Cw => rotate(buffer, Rotation::Cw270),
    }
}
