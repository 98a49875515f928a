//! Quarter-turn rotation and mirroring.
//!
//! Both operations are exact pixel remaps: no resampling, any channel count.
//! For each output pixel we compute the source pixel it comes from and copy
//! its channels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::error::EditError;

/// Clockwise rotation by a multiple of 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    /// Parse an angle in degrees; only 90, 180 and 270 are supported.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidParameter` for any other angle.
    pub fn from_degrees(degrees: i32) -> Result<Rotation, EditError> {
        match degrees {
            90 => Ok(Rotation::Cw90),
            180 => Ok(Rotation::Cw180),
            270 => Ok(Rotation::Cw270),
            other => Err(EditError::invalid_parameter(
                "rotate",
                format!("angle {} is not one of 90, 180, 270", other),
            )),
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Cw90 => 90,
            Rotation::Cw180 => 180,
            Rotation::Cw270 => 270,
        }
    }

    /// The rotation that undoes this one.
    pub fn inverse(self) -> Rotation {
        match self {
            Rotation::Cw90 => Rotation::Cw270,
            Rotation::Cw180 => Rotation::Cw180,
            Rotation::Cw270 => Rotation::Cw90,
        }
    }

    /// Returns true if this rotation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        !matches!(self, Rotation::Cw180)
    }
}

impl TryFrom<i32> for Rotation {
    type Error = EditError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Rotation::from_degrees(degrees)
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> i32 {
        rotation.degrees()
    }
}

/// Mirror axis for [`flip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipAxis {
    /// Mirror left-right (columns reversed).
    Horizontal,
    /// Mirror top-bottom (rows reversed).
    Vertical,
}

impl FromStr for FlipAxis {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "horizontal" => Ok(FlipAxis::Horizontal),
            "vertical" => Ok(FlipAxis::Vertical),
            other => Err(EditError::invalid_parameter(
                "flip",
                format!("unknown axis {:?}", other),
            )),
        }
    }
}

impl fmt::Display for FlipAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlipAxis::Horizontal => f.write_str("horizontal"),
            FlipAxis::Vertical => f.write_str("vertical"),
        }
    }
}

/// Rotate a buffer clockwise. 90 and 270 degree turns swap the dimensions.
pub fn rotate(buffer: &PixelBuffer, rotation: Rotation) -> PixelBuffer {
    let (src_w, src_h) = (buffer.width() as usize, buffer.height() as usize);
    let (dst_w, dst_h) = if rotation.swaps_dimensions() {
        (src_h, src_w)
    } else {
        (src_w, src_h)
    };

    remap(buffer, dst_w, dst_h, |x, y| match rotation {
        Rotation::Cw90 => (y, src_h - 1 - x),
        Rotation::Cw180 => (src_w - 1 - x, src_h - 1 - y),
        Rotation::Cw270 => (src_w - 1 - y, x),
    })
}

/// Mirror a buffer along `axis`. Dimensions and channels are unchanged.
pub fn flip(buffer: &PixelBuffer, axis: FlipAxis) -> PixelBuffer {
    let (w, h) = (buffer.width() as usize, buffer.height() as usize);
    remap(buffer, w, h, |x, y| match axis {
        FlipAxis::Horizontal => (w - 1 - x, y),
        FlipAxis::Vertical => (x, h - 1 - y),
    })
}

/// Build a `dst_w x dst_h` buffer where each pixel is copied from the source
/// pixel `source_of(x, y)`.
fn remap(
    buffer: &PixelBuffer,
    dst_w: usize,
    dst_h: usize,
    source_of: impl Fn(usize, usize) -> (usize, usize),
) -> PixelBuffer {
    let channels = buffer.channels();
    let src_w = buffer.width() as usize;
    let src = buffer.data();
    let mut out = Vec::with_capacity(src.len());

    for y in 0..dst_h {
        for x in 0..dst_w {
            let (sx, sy) = source_of(x, y);
            let idx = (sy * src_w + sx) * channels;
            out.extend_from_slice(&src[idx..idx + channels]);
        }
    }

    PixelBuffer::from_parts(dst_w as u32, dst_h as u32, buffer.mode(), out)
}
