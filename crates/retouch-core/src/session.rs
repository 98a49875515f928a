//! The single-image editing session.
//!
//! [`EditSession`] owns the current image, the image as it was loaded, and
//! the undo/redo history. Every edit follows the same order: validate and
//! compute the new buffer, then snapshot the old one, then swap. A failed
//! edit therefore leaves both the image and the history untouched.

use std::fmt;
use std::path::{Path, PathBuf};

use log::debug;

use crate::buffer::PixelBuffer;
use crate::config::EditorConfig;
use crate::decode::{decode_image, decode_image_no_orientation};
use crate::encode::encode_image;
use crate::error::EditError;
use crate::format::ImageFormat;
use crate::history::HistoryManager;
use crate::transform::{fit_within, Operation};

/// Snapshot of what the shell shows in its status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    NoImage,
    Loaded {
        /// File name, or "Untitled" when the image has no path.
        name: String,
        width: u32,
        height: u32,
        /// "Grayscale" or "Color".
        mode: &'static str,
    },
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::NoImage => f.write_str("No image loaded"),
            SessionStatus::Loaded {
                name,
                width,
                height,
                mode,
            } => write!(f, "{} | {}x{} | {}", name, width, height, mode),
        }
    }
}

/// An editing session around one image.
#[derive(Debug, Default)]
pub struct EditSession {
    current: Option<PixelBuffer>,
    original: Option<PixelBuffer>,
    source_path: Option<PathBuf>,
    history: HistoryManager,
    config: EditorConfig,
}

impl EditSession {
    /// Create a session with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidConfig` if the configuration is out of range.
    pub fn with_config(config: EditorConfig) -> Result<Self, EditError> {
        config.validate()?;
        Ok(Self {
            history: new_history(&config),
            config,
            ..Self::default()
        })
    }

    /// Start editing `buffer`. Replaces any previous image and clears history.
    pub fn load(&mut self, buffer: PixelBuffer, path: Option<PathBuf>) {
        debug!(
            "Loaded {}x{} image from {:?}",
            buffer.width(),
            buffer.height(),
            path
        );
        self.original = Some(buffer.clone());
        self.current = Some(buffer);
        self.source_path = path;
        self.history.reset();
    }

    /// Decode image file bytes and start editing them.
    ///
    /// # Errors
    ///
    /// Returns `EditError::Decode` if the bytes cannot be decoded. The
    /// previous session state is kept in that case.
    pub fn load_bytes(&mut self, bytes: &[u8], path: Option<PathBuf>) -> Result<(), EditError> {
        let buffer = if self.config.apply_exif_orientation {
            decode_image(bytes)?
        } else {
            decode_image_no_orientation(bytes)?
        };
        self.load(buffer, path);
        Ok(())
    }

    /// Apply an edit to the current image and record an undo step.
    ///
    /// # Errors
    ///
    /// Returns `EditError::NoImageLoaded` without an image and
    /// `EditError::InvalidParameter` for out-of-range parameters.
    pub fn apply(&mut self, operation: Operation) -> Result<&PixelBuffer, EditError> {
        let current = self.current.as_ref().ok_or(EditError::NoImageLoaded)?;
        let result = operation.apply(current, self.config.resize_filter)?;
        self.history.save(current);

        debug!(
            "Applied {} -> {}x{} {}",
            operation,
            result.width(),
            result.height(),
            result.mode().label()
        );
        Ok(&*self.current.insert(result))
    }

    /// Step back one edit. With nothing to undo the image is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `EditError::NoImageLoaded` without an image.
    pub fn undo(&mut self) -> Result<&PixelBuffer, EditError> {
        let current = self.current.take().ok_or(EditError::NoImageLoaded)?;
        let restored = self.history.undo(current);
        debug!(
            "Undo: {} undo / {} redo steps left",
            self.history.undo_len(),
            self.history.redo_len()
        );
        Ok(&*self.current.insert(restored))
    }

    /// Re-apply the last undone edit. With nothing to redo the image is
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `EditError::NoImageLoaded` without an image.
    pub fn redo(&mut self) -> Result<&PixelBuffer, EditError> {
        let current = self.current.take().ok_or(EditError::NoImageLoaded)?;
        let restored = self.history.redo(current);
        debug!(
            "Redo: {} undo / {} redo steps left",
            self.history.undo_len(),
            self.history.redo_len()
        );
        Ok(&*self.current.insert(restored))
    }

    /// Go back to the image as loaded. This is itself an undoable step.
    ///
    /// # Errors
    ///
    /// Returns `EditError::NoOriginalLoaded` if nothing was ever loaded.
    pub fn reset_to_original(&mut self) -> Result<&PixelBuffer, EditError> {
        let original = self.original.as_ref().ok_or(EditError::NoOriginalLoaded)?;
        if let Some(current) = &self.current {
            self.history.save(current);
        }
        debug!("Reset to original");
        Ok(&*self.current.insert(original.clone()))
    }

    pub fn current(&self) -> Option<&PixelBuffer> {
        self.current.as_ref()
    }

    pub fn original(&self) -> Option<&PixelBuffer> {
        self.original.as_ref()
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Status bar contents for the current state.
    pub fn status(&self) -> SessionStatus {
        let Some(current) = &self.current else {
            return SessionStatus::NoImage;
        };

        let name = self
            .source_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string());

        SessionStatus::Loaded {
            name,
            width: current.width(),
            height: current.height(),
            mode: current.mode().label(),
        }
    }

    /// Encode the current image for the recorded path, or in the default
    /// format when there is no path.
    ///
    /// # Errors
    ///
    /// Returns `EditError::NoImageLoaded` without an image and
    /// `EditError::Encode` if encoding fails.
    pub fn save(&self) -> Result<Vec<u8>, EditError> {
        let format = self
            .source_path
            .as_deref()
            .map_or(self.config.default_format, ImageFormat::from_path);
        self.encode_current(format)
    }

    /// Encode the current image for `path` and make it the recorded path.
    ///
    /// # Errors
    ///
    /// Same as [`save`](EditSession::save). The recorded path only changes
    /// on success.
    pub fn save_as(&mut self, path: PathBuf) -> Result<Vec<u8>, EditError> {
        let bytes = self.encode_current(ImageFormat::from_path(&path))?;
        debug!("Saved {} bytes as {:?}", bytes.len(), path);
        self.source_path = Some(path);
        Ok(bytes)
    }

    /// The current image as R, G, B, A bytes for display.
    ///
    /// # Errors
    ///
    /// Returns `EditError::NoImageLoaded` without an image.
    pub fn render_rgba(&self) -> Result<Vec<u8>, EditError> {
        self.current
            .as_ref()
            .map(PixelBuffer::to_rgba8)
            .ok_or(EditError::NoImageLoaded)
    }

    /// The current image scaled down to fit `max_width x max_height`.
    ///
    /// # Errors
    ///
    /// Returns `EditError::NoImageLoaded` without an image and
    /// `EditError::InvalidParameter` for a zero-sized box.
    pub fn preview(&self, max_width: u32, max_height: u32) -> Result<PixelBuffer, EditError> {
        let current = self.current.as_ref().ok_or(EditError::NoImageLoaded)?;
        fit_within(current, max_width, max_height, self.config.resize_filter)
    }

    fn encode_current(&self, format: ImageFormat) -> Result<Vec<u8>, EditError> {
        let current = self.current.as_ref().ok_or(EditError::NoImageLoaded)?;
        Ok(encode_image(current, format, self.config.jpeg_quality)?)
    }
}

fn new_history(config: &EditorConfig) -> HistoryManager {
    match config.history_capacity {
        Some(capacity) => HistoryManager::with_capacity(capacity),
        None => HistoryManager::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ColorMode;
    use crate::decode::{decode_image, detect_format};
    use crate::transform::{FlipAxis, Rotation};

    fn zeros_4x2() -> PixelBuffer {
        PixelBuffer::filled(4, 2, ColorMode::ColorBgr, 0).unwrap()
    }

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let data = (0..width * height * 3).map(|i| (i * 13 % 256) as u8).collect();
        PixelBuffer::new(width, height, ColorMode::ColorBgr, data).unwrap()
    }

    fn loaded(buffer: PixelBuffer) -> EditSession {
        let mut session = EditSession::new();
        session.load(buffer, Some(PathBuf::from("/photos/cat.png")));
        session
    }

    #[test]
    fn test_brightness_then_undo() {
        let mut session = loaded(zeros_4x2());

        let out = session.apply(Operation::Brightness { value: 50 }).unwrap();
        assert!(out.data().iter().all(|&v| v == 50));

        let out = session.undo().unwrap();
        assert!(out.data().iter().all(|&v| v == 0));
        assert!(session.can_redo());
    }

    #[test]
    fn test_redo_restores_edit() {
        let mut session = loaded(gradient(5, 3));
        let edited = session.apply(Operation::Grayscale).unwrap().clone();
        session.undo().unwrap();
        assert_eq!(session.redo().unwrap(), &edited);
    }

    #[test]
    fn test_undo_on_fresh_load_is_noop() {
        let mut session = loaded(gradient(3, 3));
        assert_eq!(session.undo().unwrap(), &gradient(3, 3));
        assert!(!session.can_redo());
        assert!(!session.can_undo());
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut session = loaded(zeros_4x2());
        session.apply(Operation::Brightness { value: 10 }).unwrap();
        session.undo().unwrap();
        assert!(session.can_redo());

        session.apply(Operation::Brightness { value: 20 }).unwrap();
        assert!(!session.can_redo());
        let out = session.redo().unwrap();
        assert!(out.data().iter().all(|&v| v == 20));
    }

    #[test]
    fn test_resize_scenarios() {
        let mut session = loaded(PixelBuffer::filled(10, 10, ColorMode::ColorBgr, 5).unwrap());
        let out = session.apply(Operation::Resize { scale: 2.0 }).unwrap();
        assert_eq!((out.width(), out.height()), (20, 20));
        let out = session.apply(Operation::Resize { scale: 0.5 }).unwrap();
        assert_eq!((out.width(), out.height()), (10, 10));
    }

    #[test]
    fn test_grayscale_then_blur_is_color() {
        let mut session = loaded(gradient(6, 6));
        session.apply(Operation::Grayscale).unwrap();
        assert_eq!(session.current().unwrap().mode(), ColorMode::Grayscale);
        let out = session.apply(Operation::Blur { intensity: 2 }).unwrap();
        assert_eq!(out.mode(), ColorMode::ColorBgr);
    }

    #[test]
    fn test_failed_apply_leaves_no_snapshot() {
        let mut session = loaded(gradient(4, 4));
        let result = session.apply(Operation::Blur { intensity: 11 });
        assert!(matches!(result, Err(EditError::InvalidParameter { .. })));
        assert!(!session.can_undo());
        assert_eq!(session.current().unwrap(), &gradient(4, 4));
    }

    #[test]
    fn test_no_image_errors() {
        let mut session = EditSession::new();
        assert!(matches!(
            session.apply(Operation::Grayscale),
            Err(EditError::NoImageLoaded)
        ));
        assert!(matches!(session.undo(), Err(EditError::NoImageLoaded)));
        assert!(matches!(session.redo(), Err(EditError::NoImageLoaded)));
        assert!(matches!(
            session.reset_to_original(),
            Err(EditError::NoOriginalLoaded)
        ));
        assert!(matches!(session.save(), Err(EditError::NoImageLoaded)));
        assert!(matches!(session.render_rgba(), Err(EditError::NoImageLoaded)));
        assert!(matches!(session.preview(10, 10), Err(EditError::NoImageLoaded)));
    }

    #[test]
    fn test_undo_redo_without_image_leave_session_empty() {
        let mut session = EditSession::new();
        assert!(session.undo().is_err());
        assert!(session.redo().is_err());
        assert!(!session.is_loaded());
        assert!(!session.can_undo());
        assert!(!session.can_redo());
        assert_eq!(session.status(), SessionStatus::NoImage);
    }

    #[test]
    fn test_reset_to_original_is_undoable() {
        let mut session = loaded(gradient(4, 3));
        session
            .apply(Operation::Rotate {
                rotation: Rotation::Cw90,
            })
            .unwrap();
        session
            .apply(Operation::Flip {
                axis: FlipAxis::Vertical,
            })
            .unwrap();
        let edited = session.current().unwrap().clone();

        assert_eq!(session.reset_to_original().unwrap(), &gradient(4, 3));
        assert_eq!(session.history().undo_len(), 3);
        assert_eq!(session.undo().unwrap(), &edited);
        assert_eq!(session.original().unwrap(), &gradient(4, 3));
    }

    #[test]
    fn test_load_resets_history() {
        let mut session = loaded(zeros_4x2());
        session.apply(Operation::Grayscale).unwrap();
        session.load(gradient(2, 2), None);
        assert!(!session.can_undo());
        assert!(!session.can_redo());
        assert_eq!(session.original().unwrap(), &gradient(2, 2));
        assert_eq!(session.source_path(), None);
    }

    #[test]
    fn test_status_text() {
        let session = EditSession::new();
        assert_eq!(session.status().to_string(), "No image loaded");

        let mut session = loaded(gradient(8, 6));
        assert_eq!(session.status().to_string(), "cat.png | 8x6 | Color");

        session.apply(Operation::Grayscale).unwrap();
        assert_eq!(session.status().to_string(), "cat.png | 8x6 | Grayscale");

        session.load(gradient(2, 2), None);
        assert_eq!(session.status().to_string(), "Untitled | 2x2 | Color");
    }

    #[test]
    fn test_history_capacity_from_config() {
        let config = EditorConfig {
            history_capacity: Some(2),
            ..EditorConfig::default()
        };
        let mut session = EditSession::with_config(config).unwrap();
        session.load(zeros_4x2(), None);
        for value in [10, 20, 30] {
            session.apply(Operation::Brightness { value }).unwrap();
        }
        assert_eq!(session.history().undo_len(), 2);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = EditorConfig {
            jpeg_quality: 0,
            ..EditorConfig::default()
        };
        assert!(matches!(
            EditSession::with_config(config),
            Err(EditError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_save_uses_path_format() {
        let mut session = EditSession::new();
        session.load(gradient(4, 4), Some(PathBuf::from("out.bmp")));
        let bytes = session.save().unwrap();
        assert_eq!(detect_format(&bytes), Some(ImageFormat::Bmp));
    }

    #[test]
    fn test_save_without_path_uses_default_format() {
        let mut session = EditSession::new();
        session.load(gradient(4, 4), None);
        let bytes = session.save().unwrap();
        assert_eq!(detect_format(&bytes), Some(ImageFormat::Png));
        assert_eq!(decode_image(&bytes).unwrap(), gradient(4, 4));
    }

    #[test]
    fn test_save_as_records_path() {
        let mut session = loaded(gradient(4, 4));
        let bytes = session.save_as(PathBuf::from("export.jpg")).unwrap();
        assert_eq!(detect_format(&bytes), Some(ImageFormat::Jpeg));
        assert_eq!(session.source_path(), Some(Path::new("export.jpg")));
        assert_eq!(session.status().to_string(), "export.jpg | 4x4 | Color");
    }

    #[test]
    fn test_load_bytes_round_trip() {
        let png = encode_image(&gradient(5, 4), ImageFormat::Png, 90).unwrap();
        let mut session = EditSession::new();
        session
            .load_bytes(&png, Some(PathBuf::from("in.png")))
            .unwrap();
        assert_eq!(session.current().unwrap(), &gradient(5, 4));
    }

    #[test]
    fn test_load_bytes_failure_keeps_state() {
        let mut session = loaded(gradient(3, 3));
        let result = session.load_bytes(b"not an image", None);
        assert!(matches!(result, Err(EditError::Decode(_))));
        assert_eq!(session.current().unwrap(), &gradient(3, 3));
    }

    #[test]
    fn test_render_and_preview() {
        let session = loaded(gradient(40, 20));
        assert_eq!(session.render_rgba().unwrap().len(), 40 * 20 * 4);

        let preview = session.preview(10, 10).unwrap();
        assert_eq!((preview.width(), preview.height()), (10, 5));
        // Preview never touches the session image
        assert_eq!(session.current().unwrap().width(), 40);
    }
}
