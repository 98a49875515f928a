//! Editor settings.
//!
//! Every field has a default, so a partial JSON object (or `{}`) is a valid
//! configuration. Call [`EditorConfig::validate`] after deserializing.

use serde::{Deserialize, Serialize};

use crate::error::EditError;
use crate::format::ImageFormat;
use crate::transform::FilterType;

/// Settings for an [`EditSession`](crate::EditSession).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum undo depth. `None` keeps every step.
    pub history_capacity: Option<usize>,
    /// Resampling filter for resize edits and previews.
    pub resize_filter: FilterType,
    /// JPEG quality used when saving (1-100).
    pub jpeg_quality: u8,
    /// Format for `save` when no path has been recorded.
    pub default_format: ImageFormat,
    /// Rotate JPEGs upright according to their EXIF orientation tag on load.
    pub apply_exif_orientation: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: None,
            resize_filter: FilterType::Bilinear,
            jpeg_quality: 90,
            default_format: ImageFormat::Png,
            apply_exif_orientation: true,
        }
    }
}

impl EditorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that every field is within range.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidConfig` describing the first bad field.
    pub fn validate(&self) -> Result<(), EditError> {
        if self.history_capacity == Some(0) {
            return Err(EditError::InvalidConfig(
                "history_capacity must be at least 1".to_string(),
            ));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(EditError::InvalidConfig(format!(
                "jpeg_quality {} is outside 1..=100",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}
