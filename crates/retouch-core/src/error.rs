//! Error taxonomy for the edit pipeline.
//!
//! Every failure in the core is recoverable: operations return an
//! [`EditError`] and leave the session untouched. Undo/redo on an empty
//! stack is not an error and never produces one.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Errors produced by buffers, transforms and the edit session.
#[derive(Debug, Error)]
pub enum EditError {
    /// Pixel data length does not match `width * height * channels`.
    #[error(
        "Invalid dimensions: {width}x{height} with {channels} channel(s) needs {expected} bytes, got {actual}"
    )]
    InvalidDimensions {
        width: u32,
        height: u32,
        channels: usize,
        expected: usize,
        actual: usize,
    },

    /// An operation parameter is outside its supported range.
    #[error("Invalid parameter for {operation}: {reason}")]
    InvalidParameter {
        operation: &'static str,
        reason: String,
    },

    /// An edit was requested before any image was loaded.
    #[error("No image loaded")]
    NoImageLoaded,

    /// Reset was requested before any original image was captured.
    #[error("No original image loaded")]
    NoOriginalLoaded,

    /// Image bytes could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The current image could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Editor configuration is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EditError {
    pub(crate) fn invalid_parameter(operation: &'static str, reason: impl Into<String>) -> Self {
        EditError::InvalidParameter {
            operation,
            reason: reason.into(),
        }
    }
}
