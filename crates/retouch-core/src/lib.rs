//! Retouch Core - raster edit pipeline with undo/redo history
//!
//! This crate provides the editing engine behind Retouch: an immutable
//! [`PixelBuffer`], pure pixel transforms, a snapshot-based undo/redo
//! [`HistoryManager`], and the [`EditSession`] that ties them together
//! around a single image. Decoding and encoding of JPEG, PNG and BMP files
//! live in [`decode`] and [`encode`].
//!
//! ```text
//! shell -> EditSession::apply(Operation)
//!            -> Operation::apply   (validate, compute new buffer)
//!            -> HistoryManager::save (snapshot the old buffer)
//!            -> current = result
//! ```
//!
//! The crate is single-threaded and performs no I/O; the shell reads and
//! writes file bytes.

pub mod buffer;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod history;
pub mod luminance;
pub mod session;
pub mod transform;

pub use buffer::{ColorMode, PixelBuffer};
pub use config::EditorConfig;
pub use error::EditError;
pub use format::ImageFormat;
pub use history::{HistoryManager, HistoryState};
pub use session::{EditSession, SessionStatus};
pub use transform::{FilterType, FlipAxis, Operation, Rotation};
