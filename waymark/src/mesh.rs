// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-tile output artifact.

use crate::label::{Label, QuadRange};
use crate::quad::GlyphQuad;

/// Everything one tile's text style produced: the ordered label sequence
/// and the quad buffer the labels' ranges point into.
///
/// Built once per tile by [`TextStyleBuilder::build`](crate::TextStyleBuilder::build);
/// immutable thereafter. Collision resolution walks `labels`, GPU upload
/// consumes `quads`.
#[derive(Default, Debug)]
pub struct LabelMesh {
    labels: Vec<Label>,
    quads: Vec<GlyphQuad>,
}

impl LabelMesh {
    pub(crate) fn new(labels: Vec<Label>, quads: Vec<GlyphQuad>) -> Self {
        Self { labels, quads }
    }

    /// Labels in feature-ingestion order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// The shared quad buffer.
    pub fn quads(&self) -> &[GlyphQuad] {
        &self.quads
    }

    /// The quads belonging to one label's range.
    pub fn quads_for(&self, range: QuadRange) -> &[GlyphQuad] {
        &self.quads[range.offset as usize..(range.offset + range.len) as usize]
    }

    /// Whether the tile produced no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
