//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate exposes the retouch-core edit session, codecs and transforms to
//! JavaScript/TypeScript shells.
//!
//! # Module Structure
//!
//! - `session` - `JsEditSession`: one image, edits, undo/redo, save
//! - `types` - WASM-compatible wrapper types for image data
//! - `codec` - Image decoding and encoding (JPEG, PNG, BMP)
//! - `transform` - Stateless transforms for live previews
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession } from '@retouch/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new JsEditSession();
//! session.load_bytes(new Uint8Array(await file.arrayBuffer()), file.name);
//! session.grayscale();
//! console.log(session.status()); // "photo.jpg | 640x480 | Grayscale"
//! ```

use wasm_bindgen::prelude::*;

mod codec;
mod session;
mod transform;
mod types;

// Re-export public types
pub use codec::{decode_image, detect_format, encode_image};
pub use session::JsEditSession;
pub use transform::{
    adjust_brightness, adjust_contrast, blur, edge_detect, fit_within, flip, grayscale, resize,
    rotate,
};
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), "0.1.0");
    }
}
