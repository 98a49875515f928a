//! Immutable raster buffers.
//!
//! A [`PixelBuffer`] owns its pixel bytes and is never mutated after
//! construction; every transform produces a new buffer. Cloning a buffer is
//! a deep copy of its bytes, which is what history snapshots rely on.

use serde::{Deserialize, Serialize};

use crate::error::EditError;
use crate::luminance::luma_plane;

/// Channel layout of a [`PixelBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// One luma byte per pixel.
    Grayscale,
    /// Three bytes per pixel in B, G, R order.
    #[default]
    ColorBgr,
}

impl ColorMode {
    /// Bytes per pixel for this mode.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ColorMode::Grayscale => 1,
            ColorMode::ColorBgr => 3,
        }
    }

    /// Short label used in status text.
    pub fn label(self) -> &'static str {
        match self {
            ColorMode::Grayscale => "Grayscale",
            ColorMode::ColorBgr => "Color",
        }
    }
}

/// An in-memory raster image with fixed dimensions and color mode.
///
/// Pixel data is row-major and its length always equals
/// `width * height * mode.channels()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    mode: ColorMode,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer, validating that `data` matches the dimensions.
    ///
    /// A zero-area buffer is allowed only with empty data.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidDimensions`] if the data length is wrong.
    pub fn new(width: u32, height: u32, mode: ColorMode, data: Vec<u8>) -> Result<Self, EditError> {
        // A length that does not fit in memory can never match real data
        let expected = expected_len(width, height, mode).unwrap_or(usize::MAX);
        if data.len() != expected {
            return Err(EditError::InvalidDimensions {
                width,
                height,
                channels: mode.channels(),
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            mode,
            data,
        })
    }

    /// Create a buffer where every byte is `value`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidDimensions`] if the byte length of the
    /// requested buffer overflows `usize` or exceeds `isize::MAX`.
    pub fn filled(width: u32, height: u32, mode: ColorMode, value: u8) -> Result<Self, EditError> {
        let len = expected_len(width, height, mode).ok_or(EditError::InvalidDimensions {
            width,
            height,
            channels: mode.channels(),
            expected: usize::MAX,
            actual: 0,
        })?;
        Ok(Self {
            width,
            height,
            mode,
            data: vec![value; len],
        })
    }

    /// Create a ColorBgr buffer from R, G, B ordered bytes.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidDimensions`] if the data length is wrong.
    pub fn from_rgb8(width: u32, height: u32, mut rgb: Vec<u8>) -> Result<Self, EditError> {
        swap_red_blue(&mut rgb);
        Self::new(width, height, ColorMode::ColorBgr, rgb)
    }

    /// Construction path for transforms that already sized their output.
    pub(crate) fn from_parts(width: u32, height: u32, mode: ColorMode, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            Some(data.len()),
            expected_len(width, height, mode),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            mode,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.mode.channels()
    }

    /// Raw row-major pixel bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Get the size of the pixel data in bytes.
    pub fn byte_size(&self) -> usize {
        self.data.len()
    }

    /// True for zero-area buffers.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Bytes of the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let channels = self.channels();
        let idx = (y as usize * self.width as usize + x as usize) * channels;
        Some(&self.data[idx..idx + channels])
    }

    /// Convert to another color mode.
    ///
    /// Grayscale to color replicates luma into every channel and converts
    /// back losslessly. Color to grayscale applies BT.601 luma and is lossy.
    pub fn to_mode(&self, mode: ColorMode) -> PixelBuffer {
        let data = match (self.mode, mode) {
            (ColorMode::ColorBgr, ColorMode::Grayscale) => luma_plane(&self.data),
            (ColorMode::Grayscale, ColorMode::ColorBgr) => {
                self.data.iter().flat_map(|&v| [v, v, v]).collect()
            }
            _ => self.data.clone(),
        };
        PixelBuffer::from_parts(self.width, self.height, mode, data)
    }

    /// Display bytes in R, G, B order, expanding grayscale.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut rgb = self.to_mode(ColorMode::ColorBgr).into_data();
        swap_red_blue(&mut rgb);
        rgb
    }

    /// Display bytes in R, G, B, A order with opaque alpha, ready for a canvas.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixel_count() * 4);
        match self.mode {
            ColorMode::Grayscale => {
                for &v in &self.data {
                    rgba.extend_from_slice(&[v, v, v, 255]);
                }
            }
            ColorMode::ColorBgr => {
                for px in self.data.chunks_exact(3) {
                    rgba.extend_from_slice(&[px[2], px[1], px[0], 255]);
                }
            }
        }
        rgba
    }
}

/// Byte length for the given shape, or `None` if it cannot be allocated.
#[inline]
fn expected_len(width: u32, height: u32, mode: ColorMode) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(mode.channels())
        .filter(|&len| len <= isize::MAX as usize)
}

/// Swap the first and third byte of every 3-byte pixel (RGB <-> BGR).
pub(crate) fn swap_red_blue(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(3) {
        px.swap(0, 2);
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn gray_strategy() -> impl Strategy<Value = PixelBuffer> {
        (1u32..=16, 1u32..=16).prop_flat_map(|(w, h)| {
            prop::collection::vec(any::<u8>(), (w * h) as usize).prop_map(move |data| {
                PixelBuffer::new(w, h, ColorMode::Grayscale, data).unwrap()
            })
        })
    }

    fn color_strategy() -> impl Strategy<Value = PixelBuffer> {
        (1u32..=16, 1u32..=16).prop_flat_map(|(w, h)| {
            prop::collection::vec(any::<u8>(), (w * h * 3) as usize).prop_map(move |data| {
                PixelBuffer::new(w, h, ColorMode::ColorBgr, data).unwrap()
            })
        })
    }

    proptest! {
        /// Property: Gray -> Color -> Gray is lossless.
        #[test]
        fn prop_gray_color_gray_round_trip(buf in gray_strategy()) {
            let back = buf.to_mode(ColorMode::ColorBgr).to_mode(ColorMode::Grayscale);
            prop_assert_eq!(back, buf);
        }

        /// Property: Color -> Gray -> Color keeps mode and shape.
        #[test]
        fn prop_color_gray_color_keeps_shape(buf in color_strategy()) {
            let back = buf.to_mode(ColorMode::Grayscale).to_mode(ColorMode::ColorBgr);
            prop_assert_eq!(back.mode(), ColorMode::ColorBgr);
            prop_assert_eq!(back.width(), buf.width());
            prop_assert_eq!(back.height(), buf.height());
            prop_assert_eq!(back.byte_size(), buf.byte_size());
        }

        /// Property: RGBA rendering always has four bytes per pixel.
        #[test]
        fn prop_rgba_length(buf in color_strategy()) {
            prop_assert_eq!(buf.to_rgba8().len(), buf.pixel_count() * 4);
        }
    }
}
