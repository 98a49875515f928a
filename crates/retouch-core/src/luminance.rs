//! Luma calculation using ITU-R BT.601 coefficients.
//!
//! Shared by grayscale conversion and edge detection. Pixels in the core are
//! stored in B, G, R order, so the helpers take their arguments that way.

/// ITU-R BT.601 coefficient for the red channel.
pub const LUMA_R: f32 = 0.299;

/// ITU-R BT.601 coefficient for the green channel.
pub const LUMA_G: f32 = 0.587;

/// ITU-R BT.601 coefficient for the blue channel.
pub const LUMA_B: f32 = 0.114;

/// Calculate luma from a B, G, R triple (0-255), rounded to the nearest level.
#[inline]
pub fn luma_bgr(b: u8, g: u8, r: u8) -> u8 {
    let lum = LUMA_B * b as f32 + LUMA_G * g as f32 + LUMA_R * r as f32;
    lum.clamp(0.0, 255.0).round() as u8
}

/// Reduce interleaved BGR bytes to one luma byte per pixel.
pub fn luma_plane(bgr: &[u8]) -> Vec<u8> {
    bgr.chunks_exact(3)
        .map(|px| luma_bgr(px[0], px[1], px[2]))
        .collect()
}
