// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-tile build orchestrator.
//!
//! One builder runs per worker thread and processes one tile at a time:
//! `setup`, any number of `add_point` / `add_line` / `add_polygon`, then
//! `build` to take the finished [`LabelMesh`]. Features whose parameters
//! or shaping fail are skipped without error; a tile with no labels
//! builds an empty mesh.

use std::sync::Arc;

use glam::Vec2;
use tracing::debug;

use crate::font::{FontContext, ShapeEngine};
use crate::geometry::{Aabb, Point, centroid};
use crate::label::{Label, LabelKind, LabelTransform, PackedStyle, QuadRange, TextMetrics};
use crate::mesh::LabelMesh;
use crate::packing::{encode_font_scale, encode_stroke};
use crate::properties::Properties;
use crate::quad::ScratchBuffer;
use crate::rule::StyleRule;
use crate::style::TextParams;
use crate::wrap::{draw_line, draw_wrapped};

/// Immutable per-builder configuration, captured from the style so
/// builders stay independent of global state.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct StyleConfig {
    /// Device-resolution factor applied to every linear measurement.
    pub pixel_scale: f32,
    /// Whether glyphs render through a signed distance field; enables
    /// blur-spread derivation during parameter resolution.
    pub sdf: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            pixel_scale: 1.0,
            sdf: true,
        }
    }
}

/// Builds the text labels of one tile.
pub struct TextStyleBuilder<E: ShapeEngine> {
    config: StyleConfig,
    fonts: Arc<FontContext<E>>,
    tile_size: f32,
    scratch: ScratchBuffer,
}

impl<E: ShapeEngine> TextStyleBuilder<E> {
    /// Creates a builder sharing the given font context.
    pub fn new(fonts: Arc<FontContext<E>>, config: StyleConfig) -> Self {
        Self {
            config,
            fonts,
            tile_size: 0.0,
            scratch: ScratchBuffer::default(),
        }
    }

    /// The builder's configuration.
    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    /// Starts a new tile: captures its size and clears all buffers.
    pub fn setup(&mut self, tile_size: f32) {
        self.tile_size = tile_size;
        self.scratch.clear();
    }

    /// Adds a point feature: at most one label, anchored at the point.
    pub fn add_point(&mut self, point: Point, props: &Properties, rule: &dyn StyleRule) {
        let params = TextParams::from_rule(rule, props, &self.fonts, &self.config);

        if !self.prepare_label(&params, LabelKind::Point) {
            return;
        }

        self.add_label(&params, LabelKind::Point, LabelTransform::point(point));
    }

    /// Adds a line feature: one label per segment long enough to carry
    /// the shaped text, all reusing a single shaping pass.
    pub fn add_line(&mut self, line: &[Point], props: &Properties, rule: &dyn StyleRule) {
        let params = TextParams::from_rule(rule, props, &self.fonts, &self.config);

        if !self.prepare_label(&params, LabelKind::Line) {
            return;
        }

        let pixel = 2.0 / (self.tile_size * self.config.pixel_scale);
        let min_length = self.scratch.bbox.x * pixel * 0.2;

        for pair in line.windows(2) {
            let (p1, p2) = (pair[0], pair[1]);
            if p1.distance(p2) > min_length {
                self.add_label(&params, LabelKind::Line, LabelTransform::segment(p1, p2));
            }
        }
    }

    /// Adds a polygon feature by reducing it to its centroid.
    pub fn add_polygon(&mut self, polygon: &[Vec<Point>], props: &Properties, rule: &dyn StyleRule) {
        self.add_point(centroid(polygon), props, rule);
    }

    /// Finalizes the tile, transferring labels and quads into the mesh.
    /// A tile without labels yields an empty mesh.
    pub fn build(&mut self) -> LabelMesh {
        let mesh = if self.scratch.labels.is_empty() {
            LabelMesh::default()
        } else {
            LabelMesh::new(
                core::mem::take(&mut self.scratch.labels),
                core::mem::take(&mut self.scratch.quads),
            )
        };
        self.scratch.clear();
        mesh
    }

    /// Shapes the label text and fills the scratch buffer with its quads.
    /// Returns `false` when the feature must be skipped.
    fn prepare_label(&mut self, params: &TextParams, kind: LabelKind) -> bool {
        if !params.is_valid() {
            debug!(text = %params.text, size = params.font_size, "skipping invalid label params");
            return false;
        }
        let Some(font) = params.font else {
            return false;
        };

        self.scratch.reset();

        let text = params.transform.apply(&params.text);

        // Factor between the atlas rasterization size and the on-screen
        // glyph size.
        let font_scale = (params.font_size * self.config.pixel_scale) / font.size;
        let stroke_width = params.stroke_width * self.config.pixel_scale;

        self.scratch.style = PackedStyle {
            fill: params.fill,
            stroke: encode_stroke(
                params.stroke_color,
                stroke_width,
                self.fonts.max_stroke_width(),
            ),
            font_scale: encode_font_scale(font_scale),
        };

        // Shaping and quad emission mutate the shared atlas; hold the
        // engine lock for the whole sequence.
        {
            let mut engine = self.fonts.lock();
            let mut line = engine.shape(&font, &text);

            if line.shapes().is_empty() {
                debug!(text = %text, "shaping produced no glyphs");
                return false;
            }

            line.set_scale(font_scale);

            let aabb = if kind == LabelKind::Point && params.word_wrap {
                draw_wrapped(&line, params.max_line_width, params.align, &mut self.scratch)
            } else {
                let mut unwrapped = Aabb::EMPTY;
                draw_line(&line, Vec2::ZERO, &mut self.scratch, &mut unwrapped);
                unwrapped
            };
            let aabb = aabb.or_zero();

            self.scratch.bbox = Vec2::new(
                aabb.min.x.abs() + aabb.max.x,
                aabb.min.y.abs() + aabb.max.y,
            );
            self.scratch.num_lines = ((self.scratch.bbox.y / line.height()) as u32).max(1);
            self.scratch.metrics = TextMetrics {
                ascender: line.ascent(),
                descender: -line.descent(),
                line_height: line.height(),
            };
            self.scratch.quads_local_origin = aabb.min;
        }

        true
    }

    /// Packages the quads just emitted into a label appended to the
    /// tile's sequence.
    fn add_label(&mut self, params: &TextParams, kind: LabelKind, transform: LabelTransform) {
        let len = self.scratch.num_quads;
        let offset = self.scratch.quads.len() as u32 - len;

        self.scratch.labels.push(Label {
            transform,
            kind,
            options: params.options.clone(),
            anchor: params.anchor,
            style: self.scratch.style,
            bbox: self.scratch.bbox,
            metrics: self.scratch.metrics,
            num_lines: self.scratch.num_lines,
            quads_local_origin: self.scratch.quads_local_origin,
            quad_range: QuadRange { offset, len },
        });
    }
}

impl<E: ShapeEngine> core::fmt::Debug for TextStyleBuilder<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TextStyleBuilder")
            .field("config", &self.config)
            .field("tile_size", &self.tile_size)
            .finish_non_exhaustive()
    }
}
