// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark turns vector map-tile features and declarative style rules
//! into renderable text labels backed by meshes of distance-field glyph
//! quads.
//!
//! The pipeline per feature: a [`StyleRule`] and the feature's
//! [`Properties`] resolve into [`TextParams`]; the shared shaping engine
//! behind a [`FontContext`] produces a glyph layout (word-wrapped for
//! point labels when requested); and the [`TextStyleBuilder`] packages
//! each placement as a [`Label`] referencing a contiguous range of the
//! tile's shared quad buffer. `build` finalizes the tile into a
//! [`LabelMesh`].
//!
//! Font loading, glyph rasterization, and atlas packing live behind the
//! [`ShapeEngine`] trait; style-rule evaluation behind [`StyleRule`].
//! Builders are independent per worker thread and synchronize only on
//! the font context's internal lock.

// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]

mod builder;
mod case;
mod font;
mod geometry;
mod hashing;
mod label;
mod mesh;
mod packing;
mod properties;
mod quad;
mod rule;
mod style;
mod wrap;

pub use builder::{StyleConfig, TextStyleBuilder};
pub use case::TextTransform;
pub use font::{AtlasGlyph, FontContext, FontHandle, GlyphShape, ShapeEngine, ShapedLine};
pub use geometry::{Aabb, Line, Point, Polygon, Rect, centroid};
pub use label::{
    Align, Anchor, Label, LabelKind, LabelOptions, LabelTransform, PackedStyle, QuadRange,
    TextMetrics, Transitions,
};
pub use mesh::LabelMesh;
pub use packing::{decode_font_scale, decode_stroke, encode_font_scale, encode_stroke};
pub use properties::Properties;
pub use quad::{GlyphQuad, POSITION_SCALE, QuadVertex};
pub use rule::{RuleKey, StyleRule};
pub use style::{PIXELS_PER_TILE, TextParams};
