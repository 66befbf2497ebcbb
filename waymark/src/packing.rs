// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-point packing of stroke and scale attributes.
//!
//! The distance-field shader reads per-label styling from a handful of
//! 32-bit vertex attributes. Stroke width rides in the alpha byte of the
//! stroke color: the width is normalized against the engine's maximum
//! representable stroke, scaled to 0..=255 and clamped. The glyph scale
//! factor is packed as 6.2 unsigned fixed point (value * 64, clamped to
//! 255), giving a representable range of 0..≈4 with 1/64 steps.

/// Packs a stroke color and a pixel-scaled stroke width into one word.
///
/// The low 24 bits are the color (alpha discarded); the high byte is the
/// encoded width. Widths at or above `max_width` saturate to 255,
/// non-positive widths encode as 0, and values in between map linearly.
pub fn encode_stroke(color: u32, width: f32, max_width: f32) -> u32 {
    let attrib = (width / max_width * 255.0).clamp(0.0, 255.0) as u32;
    (color & 0x00ff_ffff) | (attrib << 24)
}

/// Splits a packed stroke word into its color and width halves.
pub fn decode_stroke(packed: u32) -> (u32, u8) {
    (packed & 0x00ff_ffff, (packed >> 24) as u8)
}

/// Packs a glyph scale factor as 6.2 fixed point.
pub fn encode_font_scale(scale: f32) -> u8 {
    (scale * 64.0).clamp(0.0, 255.0) as u8
}

/// Restores an approximate scale factor from its packed form.
pub fn decode_font_scale(packed: u8) -> f32 {
    f32::from(packed) / 64.0
}
