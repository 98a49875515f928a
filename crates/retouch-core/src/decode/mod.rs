//! Image decoding for the editor.
//!
//! This module turns JPEG, PNG and BMP bytes into [`PixelBuffer`]s:
//! - Format detection from magic bytes
//! - EXIF orientation correction for JPEG files
//! - Conversion to the core's BGR channel order
//!
//! All operations are synchronous; reading the bytes from disk or a file
//! picker is the shell's job.
//!
//! [`PixelBuffer`]: crate::buffer::PixelBuffer

mod reader;
mod types;

pub use reader::{decode_image, decode_image_no_orientation, detect_format};
pub use types::{DecodeError, Orientation};
