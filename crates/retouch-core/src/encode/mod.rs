//! Image encoding for saving edits.
//!
//! This module provides:
//! - PNG, JPEG and BMP encoding of [`PixelBuffer`]s
//! - Configurable JPEG quality
//!
//! The output format is normally chosen from the destination path with
//! [`ImageFormat::from_path`]. Writing the bytes out is the shell's job.
//!
//! [`PixelBuffer`]: crate::buffer::PixelBuffer
//! [`ImageFormat::from_path`]: crate::format::ImageFormat::from_path

mod writer;

pub use writer::{encode_image, EncodeError};
