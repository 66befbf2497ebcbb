// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Finalized label descriptors.

use std::sync::Arc;

use glam::Vec2;

use crate::properties::Properties;

/// The geometry class a label was built from.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LabelKind {
    /// Anchored at a single point (also polygon centroids).
    Point,
    /// Placed along one line segment.
    Line,
}

/// World placement of a label: a degenerate segment (both points equal)
/// for point labels, the segment endpoints for line labels.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct LabelTransform {
    pub p0: Vec2,
    pub p1: Vec2,
}

impl LabelTransform {
    /// A point placement.
    pub fn point(p: Vec2) -> Self {
        Self { p0: p, p1: p }
    }

    /// A segment placement.
    pub fn segment(p0: Vec2, p1: Vec2) -> Self {
        Self { p0, p1 }
    }
}

/// Where a label sits relative to its anchor point.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug)]
pub enum Anchor {
    #[default]
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Anchor {
    /// Parses an anchor name from a style rule.
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim() {
            "center" => Self::Center,
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            "left" => Self::Left,
            "right" => Self::Right,
            "top-left" => Self::TopLeft,
            "top-right" => Self::TopRight,
            "bottom-left" => Self::BottomLeft,
            "bottom-right" => Self::BottomRight,
            _ => return None,
        })
    }
}

/// Horizontal alignment of wrapped lines within the label box.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug)]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

impl Align {
    /// Parses an alignment name from a style rule.
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim() {
            "left" => Self::Left,
            "center" => Self::Center,
            "right" => Self::Right,
            _ => return None,
        })
    }
}

/// Vertical metrics of the shaped text, in render units.
#[derive(Copy, Clone, PartialEq, Default, Debug)]
pub struct TextMetrics {
    /// Distance from baseline to the top of the line (positive).
    pub ascender: f32,
    /// Distance from baseline to the bottom of the line (negative).
    pub descender: f32,
    /// Height of one line.
    pub line_height: f32,
}

/// A label's slice of the tile's shared quad buffer.
///
/// Labels never copy their quads; the range stays valid for the lifetime
/// of the owning [`LabelMesh`](crate::LabelMesh).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct QuadRange {
    /// Index of the label's first quad.
    pub offset: u32,
    /// Number of quads, one per visible glyph.
    pub len: u32,
}

/// Show/hide/select transition durations, in seconds.
#[derive(Copy, Clone, PartialEq, Default, Debug)]
pub struct Transitions {
    pub show: f32,
    pub hide: f32,
    pub select: f32,
}

/// Placement options resolved from the style rule, consumed by collision
/// resolution and interaction handling downstream.
#[derive(Clone, Debug)]
pub struct LabelOptions {
    /// Placement priority; lower wins, `f32::MAX` is "last".
    pub priority: f32,
    /// Whether the label participates in collision resolution.
    pub collide: bool,
    /// Pixel offset from the anchor.
    pub offset: Vec2,
    /// Collision padding added around the bounding box.
    pub buffer: f32,
    /// Deduplication key shared by labels that repeat the same text under
    /// the same rule.
    pub repeat_group: u64,
    /// Minimum pixel distance between labels of one repeat group.
    pub repeat_distance: f32,
    /// Transition durations.
    pub transitions: Transitions,
    /// Feature properties, attached only for interactive labels.
    pub properties: Option<Arc<Properties>>,
    /// Stable identity of the resolved parameter set.
    pub param_hash: u64,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            priority: f32::MAX,
            collide: true,
            offset: Vec2::ZERO,
            buffer: 0.0,
            repeat_group: 0,
            repeat_distance: 0.0,
            transitions: Transitions::default(),
            properties: None,
            param_hash: 0,
        }
    }
}

/// Fill, stroke, and glyph scale as the vertex stream carries them.
///
/// `stroke` is packed by [`encode_stroke`](crate::packing::encode_stroke);
/// `font_scale` by [`encode_font_scale`](crate::packing::encode_font_scale).
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct PackedStyle {
    pub fill: u32,
    pub stroke: u32,
    pub font_scale: u8,
}

/// A finalized, renderable text label.
#[derive(Clone, Debug)]
pub struct Label {
    /// Tile-space placement.
    pub transform: LabelTransform,
    /// Point or line placement rules apply downstream.
    pub kind: LabelKind,
    /// Resolved placement options.
    pub options: LabelOptions,
    /// Anchor relative to the transform.
    pub anchor: Anchor,
    /// Packed color and scale attributes.
    pub style: PackedStyle,
    /// Extents of the shaped (possibly wrapped) text.
    pub bbox: Vec2,
    /// Vertical metrics of one line.
    pub metrics: TextMetrics,
    /// Number of wrapped lines (at least 1).
    pub num_lines: u32,
    /// Offset of the quad geometry's minimum corner from the layout origin.
    pub quads_local_origin: Vec2,
    /// The label's view into the shared quad buffer.
    pub quad_range: QuadRange,
}
