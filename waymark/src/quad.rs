// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph quad accumulation.
//!
//! One [`ScratchBuffer`] per builder collects the quads and labels of the
//! tile being built. Per-label fields are reset before each label is
//! shaped; the whole buffer is cleared at tile setup and after the mesh
//! is built.

use glam::Vec2;

use crate::font::AtlasGlyph;
use crate::geometry::Rect;
use crate::label::{Label, PackedStyle, TextMetrics};

/// Fixed-point factor applied to quad positions so they survive packing
/// into 16-bit vertex attributes downstream.
pub const POSITION_SCALE: f32 = 4.0;

/// One corner of a glyph quad.
#[derive(Copy, Clone, PartialEq, Default, Debug)]
pub struct QuadVertex {
    /// Render-space position, premultiplied by [`POSITION_SCALE`].
    pub pos: Vec2,
    /// Atlas texture coordinate.
    pub uv: Vec2,
}

/// Four corners of one rendered glyph.
#[derive(Copy, Clone, PartialEq, Default, Debug)]
pub struct GlyphQuad {
    /// Atlas page holding the glyph.
    pub page: u16,
    /// Corners in (x1,y1), (x1,y2), (x2,y1), (x2,y2) order.
    pub vertices: [QuadVertex; 4],
}

/// Per-tile quad and label accumulator with per-label transient state.
#[derive(Default, Debug)]
pub(crate) struct ScratchBuffer {
    pub quads: Vec<GlyphQuad>,
    pub labels: Vec<Label>,

    // Per-label state, valid between `reset()` and `add_label`.
    pub style: PackedStyle,
    pub bbox: Vec2,
    pub metrics: TextMetrics,
    pub num_lines: u32,
    pub num_quads: u32,
    pub quads_local_origin: Vec2,
}

impl ScratchBuffer {
    /// Clears per-label transient state before shaping a new label.
    pub(crate) fn reset(&mut self) {
        self.bbox = Vec2::ZERO;
        self.metrics = TextMetrics::default();
        self.num_lines = 1;
        self.num_quads = 0;
        self.quads_local_origin = Vec2::ZERO;
    }

    /// Empties the tile-scoped quad and label sequences.
    pub(crate) fn clear(&mut self) {
        self.quads.clear();
        self.labels.clear();
    }

    /// Appends one glyph quad and counts it toward the current label.
    pub(crate) fn draw_glyph(&mut self, rect: Rect, glyph: &AtlasGlyph) {
        self.num_quads += 1;

        self.quads.push(GlyphQuad {
            page: glyph.page,
            vertices: [
                QuadVertex {
                    pos: Vec2::new(rect.x1, rect.y1) * POSITION_SCALE,
                    uv: Vec2::new(glyph.u1, glyph.v1),
                },
                QuadVertex {
                    pos: Vec2::new(rect.x1, rect.y2) * POSITION_SCALE,
                    uv: Vec2::new(glyph.u1, glyph.v2),
                },
                QuadVertex {
                    pos: Vec2::new(rect.x2, rect.y1) * POSITION_SCALE,
                    uv: Vec2::new(glyph.u2, glyph.v1),
                },
                QuadVertex {
                    pos: Vec2::new(rect.x2, rect.y2) * POSITION_SCALE,
                    uv: Vec2::new(glyph.u2, glyph.v2),
                },
            ],
        });
    }
}
