//! Edit session bindings.
//!
//! [`JsEditSession`] wraps the core session so the shell can keep one image,
//! apply edits from its controls, and walk the undo/redo history.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = JsEditSession.with_config({ history_capacity: 50 });
//! session.load_bytes(bytes, file.name);
//!
//! session.blur(3);
//! session.contrast(15);            // slider value, factor 1.5
//! session.apply({ op: "rotate", degrees: 90 });
//!
//! if (session.can_undo()) session.undo();
//! statusBar.textContent = session.status();
//!
//! const preview = session.preview(canvas.width, canvas.height);
//! ctx.putImageData(new ImageData(new Uint8ClampedArray(preview.to_rgba()),
//!     preview.width, preview.height), 0, 0);
//! ```

use std::path::PathBuf;

use crate::types::JsPixelBuffer;
use retouch_core::{EditError, EditSession, EditorConfig, FlipAxis, Operation};
use wasm_bindgen::prelude::*;

/// A single-image editing session with undo/redo.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsEditSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Create a session with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsEditSession {
        JsEditSession::default()
    }

    /// Create a session from a settings object, e.g.
    /// `{ history_capacity: 50, resize_filter: "lanczos3", jpeg_quality: 85 }`.
    /// Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns error if the object cannot be deserialized or is out of range
    pub fn with_config(config: JsValue) -> Result<JsEditSession, JsValue> {
        let config: EditorConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
        EditSession::with_config(config)
            .map(|inner| JsEditSession { inner })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Decode file bytes and start editing them.
    ///
    /// # Arguments
    /// * `bytes` - JPEG, PNG or BMP file contents
    /// * `file_name` - Name shown in the status text and used to pick the
    ///   save format
    pub fn load_bytes(&mut self, bytes: &[u8], file_name: Option<String>) -> Result<(), JsValue> {
        self.inner
            .load_bytes(bytes, file_name.map(PathBuf::from))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Start editing an already-decoded buffer.
    pub fn load_pixels(&mut self, image: &JsPixelBuffer, file_name: Option<String>) {
        self.inner
            .load(image.as_buffer().clone(), file_name.map(PathBuf::from));
    }

    pub fn grayscale(&mut self) -> Result<(), JsValue> {
        self.run(Ok(Operation::Grayscale))
    }

    /// Blur with intensity 0-10.
    pub fn blur(&mut self, intensity: i32) -> Result<(), JsValue> {
        self.run(Operation::blur_from_slider(intensity))
    }

    pub fn edge_detect(&mut self) -> Result<(), JsValue> {
        self.run(Ok(Operation::EdgeDetect))
    }

    /// Brightness offset, -100 to 100.
    pub fn brightness(&mut self, value: i32) -> Result<(), JsValue> {
        self.run(Ok(Operation::Brightness { value }))
    }

    /// Contrast slider, 5 to 30 (tenths of the factor).
    pub fn contrast(&mut self, slider: i32) -> Result<(), JsValue> {
        self.run(Operation::contrast_from_slider(slider))
    }

    /// Rotate clockwise by 90, 180 or 270 degrees.
    pub fn rotate(&mut self, degrees: i32) -> Result<(), JsValue> {
        self.run(Operation::rotate_degrees(degrees))
    }

    /// Flip along "horizontal" or "vertical".
    pub fn flip(&mut self, axis: &str) -> Result<(), JsValue> {
        self.run(axis.parse::<FlipAxis>().map(|axis| Operation::Flip { axis }))
    }

    /// Resize by a percentage, 50 to 200.
    pub fn resize(&mut self, percent: i32) -> Result<(), JsValue> {
        self.run(Operation::resize_from_percent(percent))
    }

    /// Apply a tagged operation object such as `{ op: "blur", intensity: 3 }`.
    ///
    /// # Errors
    /// Returns error if the object is not a known operation or its
    /// parameters are out of range
    pub fn apply(&mut self, operation: JsValue) -> Result<(), JsValue> {
        let operation: Operation = serde_wasm_bindgen::from_value(operation)
            .map_err(|e| JsValue::from_str(&format!("Invalid operation: {}", e)))?;
        self.run(Ok(operation))
    }

    pub fn undo(&mut self) -> Result<(), JsValue> {
        self.inner
            .undo()
            .map(drop)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn redo(&mut self) -> Result<(), JsValue> {
        self.inner
            .redo()
            .map(drop)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn reset_to_original(&mut self) -> Result<(), JsValue> {
        self.inner
            .reset_to_original()
            .map(drop)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.is_loaded()
    }

    /// Status bar text, e.g. "photo.jpg | 640x480 | Color".
    pub fn status(&self) -> String {
        self.inner.status().to_string()
    }

    /// Copy of the current image, or `undefined` if nothing is loaded.
    pub fn current(&self) -> Option<JsPixelBuffer> {
        self.inner
            .current()
            .cloned()
            .map(JsPixelBuffer::from_buffer)
    }

    /// Current image as R, G, B, A bytes.
    pub fn render_rgba(&self) -> Result<Vec<u8>, JsValue> {
        self.inner
            .render_rgba()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Current image scaled down to fit the display area.
    pub fn preview(&self, max_width: u32, max_height: u32) -> Result<JsPixelBuffer, JsValue> {
        self.inner
            .preview(max_width, max_height)
            .map(JsPixelBuffer::from_buffer)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Encode the current image for its file name (or the default format).
    pub fn save(&self) -> Result<Vec<u8>, JsValue> {
        self.inner
            .save()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Encode the current image for `file_name` and remember the name.
    pub fn save_as(&mut self, file_name: String) -> Result<Vec<u8>, JsValue> {
        self.inner
            .save_as(PathBuf::from(file_name))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsEditSession {
    fn run(&mut self, operation: Result<Operation, EditError>) -> Result<(), JsValue> {
        operation
            .and_then(|op| self.inner.apply(op).map(drop))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(serde::Serialize)]
    struct BlurJs {
        op: &'static str,
        intensity: u8,
    }

    #[derive(serde::Serialize)]
    struct ConfigJs {
        history_capacity: usize,
    }

    fn loaded() -> JsEditSession {
        let mut session = JsEditSession::new();
        let image = JsPixelBuffer::new(4, 4, false, vec![100u8; 48]).unwrap();
        session.load_pixels(&image, None);
        session
    }

    #[wasm_bindgen_test]
    fn test_apply_tagged_operation() {
        let mut session = loaded();
        let op = serde_wasm_bindgen::to_value(&BlurJs {
            op: "blur",
            intensity: 2,
        })
        .unwrap();
        assert!(session.apply(op).is_ok());
        assert!(session.can_undo());
    }

    #[wasm_bindgen_test]
    fn test_apply_rejects_unknown_operation() {
        let mut session = loaded();
        let op = serde_wasm_bindgen::to_value(&BlurJs {
            op: "sharpen",
            intensity: 2,
        })
        .unwrap();
        assert!(session.apply(op).is_err());
        assert!(!session.can_undo());
    }

    #[wasm_bindgen_test]
    fn test_invalid_parameters_leave_no_history() {
        let mut session = loaded();
        assert!(session.blur(11).is_err());
        assert!(session.blur(266).is_err());
        assert!(session.blur(-1).is_err());
        assert!(session.contrast(31).is_err());
        assert!(session.rotate(45).is_err());
        assert!(session.flip("sideways").is_err());
        assert!(!session.can_undo());
    }

    #[wasm_bindgen_test]
    fn test_no_image_errors() {
        let mut session = JsEditSession::new();
        assert!(session.grayscale().is_err());
        assert!(session.undo().is_err());
        assert!(session.reset_to_original().is_err());
        assert!(session.save().is_err());
    }

    #[wasm_bindgen_test]
    fn test_with_config() {
        let config = serde_wasm_bindgen::to_value(&ConfigJs { history_capacity: 1 }).unwrap();
        let mut session = JsEditSession::with_config(config).unwrap();
        let image = JsPixelBuffer::new(2, 2, true, vec![0u8; 4]).unwrap();
        session.load_pixels(&image, None);
        session.brightness(10).unwrap();
        session.brightness(10).unwrap();
        session.undo().unwrap();
        assert!(!session.can_undo());
    }

    #[wasm_bindgen_test]
    fn test_with_config_rejects_zero_capacity() {
        let config = serde_wasm_bindgen::to_value(&ConfigJs { history_capacity: 0 }).unwrap();
        assert!(JsEditSession::with_config(config).is_err());
    }
}
