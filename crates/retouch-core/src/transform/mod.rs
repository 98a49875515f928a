//! Pixel transforms for the editing pipeline.
//!
//! Every transform is a pure function from a borrowed [`PixelBuffer`] to a
//! new buffer; the input is never modified. Session-level code goes through
//! [`Operation`], which validates parameters and normalizes the input to
//! ColorBgr before dispatching here.
//!
//! # Output modes
//!
//! - [`grayscale`] and [`edge_detect`] produce a Grayscale buffer
//! - all other transforms keep the input's color mode
//!
//! [`PixelBuffer`]: crate::PixelBuffer

mod blur;
mod edge;
mod operation;
mod resize;
mod rotation;
mod tone;

pub use blur::{blur, blur_intensity, kernel_size, MAX_BLUR_INTENSITY};
pub use edge::{edge_detect, CANNY_HIGH_THRESHOLD, CANNY_LOW_THRESHOLD};
pub use operation::Operation;
pub use resize::{fit_within, resize, resize_exact, scaled_dimensions, FilterType, SCALE_RANGE};
pub use rotation::{flip, rotate, FlipAxis, Rotation};
pub use tone::{adjust_brightness, adjust_contrast, grayscale, BRIGHTNESS_RANGE, CONTRAST_RANGE};
