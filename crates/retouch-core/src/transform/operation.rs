//! The closed set of edits a session can apply.
//!
//! Shells build an [`Operation`] from their controls (or deserialize one
//! from a tagged object such as `{"op": "blur", "intensity": 3}`) and hand
//! it to the session, which validates it before touching any pixels.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::blur::{blur, blur_intensity, check_blur};
use super::edge::edge_detect;
use super::resize::{check_scale, resize, FilterType};
use super::rotation::{flip, rotate, FlipAxis, Rotation};
use super::tone::{adjust_brightness, adjust_contrast, check_brightness, check_contrast, grayscale};
use crate::buffer::{ColorMode, PixelBuffer};
use crate::error::EditError;

/// One edit in the pipeline, with its typed parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Grayscale,
    /// Gaussian blur, intensity 0..=10.
    Blur { intensity: u8 },
    EdgeDetect,
    /// Additive offset, -100..=100.
    Brightness { value: i32 },
    /// Multiplicative factor, 0.5..=3.0.
    Contrast { factor: f32 },
    Rotate {
        #[serde(rename = "degrees")]
        rotation: Rotation,
    },
    Flip { axis: FlipAxis },
    /// Scale factor, 0.5..=2.0.
    Resize { scale: f64 },
}

impl Operation {
    /// Blur from the shell's integer slider (0..=10).
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidParameter` if the slider is out of range.
    pub fn blur_from_slider(slider: i32) -> Result<Operation, EditError> {
        Ok(Operation::Blur {
            intensity: blur_intensity(slider)?,
        })
    }

    /// Contrast from the shell's integer slider (5..=30, tenths).
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidParameter` if the slider is out of range.
    pub fn contrast_from_slider(slider: i32) -> Result<Operation, EditError> {
        let op = Operation::Contrast {
            factor: slider as f32 / 10.0,
        };
        op.validate()?;
        Ok(op)
    }

    /// Resize from the shell's percent slider (50..=200).
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidParameter` if the percentage is out of range.
    pub fn resize_from_percent(percent: i32) -> Result<Operation, EditError> {
        let op = Operation::Resize {
            scale: percent as f64 / 100.0,
        };
        op.validate()?;
        Ok(op)
    }

    /// Rotation from an angle in degrees (90, 180 or 270).
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidParameter` for any other angle.
    pub fn rotate_degrees(degrees: i32) -> Result<Operation, EditError> {
        Ok(Operation::Rotate {
            rotation: Rotation::from_degrees(degrees)?,
        })
    }

    /// Short machine name, matching the serialized `op` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Grayscale => "grayscale",
            Operation::Blur { .. } => "blur",
            Operation::EdgeDetect => "edge_detect",
            Operation::Brightness { .. } => "brightness",
            Operation::Contrast { .. } => "contrast",
            Operation::Rotate { .. } => "rotate",
            Operation::Flip { .. } => "flip",
            Operation::Resize { .. } => "resize",
        }
    }

    /// Check parameter ranges without touching pixels.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidParameter` naming the offending parameter.
    pub fn validate(&self) -> Result<(), EditError> {
        match *self {
            Operation::Blur { intensity } => check_blur(intensity),
            Operation::Brightness { value } => check_brightness(value),
            Operation::Contrast { factor } => check_contrast(factor),
            Operation::Resize { scale } => check_scale(scale),
            Operation::Grayscale
            | Operation::EdgeDetect
            | Operation::Rotate { .. }
            | Operation::Flip { .. } => Ok(()),
        }
    }

    /// Run the operation on `buffer`, producing a new buffer.
    ///
    /// The input is first normalized to ColorBgr, so every operation sees a
    /// three-channel image; grayscale and edge detection then reduce it to
    /// one channel. `filter` is used by [`Operation::Resize`] only.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidParameter` if validation fails.
    pub fn apply(&self, buffer: &PixelBuffer, filter: FilterType) -> Result<PixelBuffer, EditError> {
        self.validate()?;
        let input = buffer.to_mode(ColorMode::ColorBgr);

        match *self {
            Operation::Grayscale => Ok(grayscale(&input)),
            Operation::Blur { intensity } => blur(&input, intensity),
            Operation::EdgeDetect => Ok(edge_detect(&input)),
            Operation::Brightness { value } => adjust_brightness(&input, value),
            Operation::Contrast { factor } => adjust_contrast(&input, factor),
            Operation::Rotate { rotation } => Ok(rotate(&input, rotation)),
            Operation::Flip { axis } => Ok(flip(&input, axis)),
            Operation::Resize { scale } => resize(&input, scale, filter),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Grayscale => f.write_str("Grayscale"),
            Operation::Blur { intensity } => write!(f, "Blur ({})", intensity),
            Operation::EdgeDetect => f.write_str("Edge Detection"),
            Operation::Brightness { value } => write!(f, "Brightness ({:+})", value),
            Operation::Contrast { factor } => write!(f, "Contrast (x{:.1})", factor),
            Operation::Rotate { rotation } => write!(f, "Rotate {}°", rotation.degrees()),
            Operation::Flip { axis } => write!(f, "Flip {}", axis),
            Operation::Resize { scale } => write!(f, "Resize ({:.0}%)", scale * 100.0),
        }
    }
}
