// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tile-space input geometry and small helper types.

use glam::Vec2;

/// A single vertex of tile geometry, in tile-local coordinates.
pub type Point = Vec2;

/// A polyline: consecutive vertex pairs form the segments a line label
/// may be placed along.
pub type Line = Vec<Point>;

/// A polygon as a list of rings; the first ring is the outer boundary.
pub type Polygon = Vec<Vec<Point>>;

/// An axis-aligned rectangle, used for glyph quad extents.
#[derive(Copy, Clone, PartialEq, Default, Debug)]
pub struct Rect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// An axis-aligned bounding box accumulated while laying out glyphs.
///
/// Starts out empty (inverted extents) and grows as quads are added, so
/// a layout that emits no quads keeps zero extents.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// An empty box that any added point will replace.
    pub const EMPTY: Self = Self {
        min: Vec2::splat(f32::MAX),
        max: Vec2::splat(f32::MIN),
    };

    /// Grows the box to contain `rect`.
    pub fn add_rect(&mut self, rect: Rect) {
        self.min.x = self.min.x.min(rect.x1);
        self.min.y = self.min.y.min(rect.y1);
        self.max.x = self.max.x.max(rect.x2);
        self.max.y = self.max.y.max(rect.y2);
    }

    /// Whether any extent has been added.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// The box normalized so an empty box reports zero extents.
    pub fn or_zero(self) -> Self {
        if self.is_empty() {
            Self {
                min: Vec2::ZERO,
                max: Vec2::ZERO,
            }
        } else {
            self
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Computes the centroid of a polygon's outer ring.
///
/// Uses the area-weighted formula and falls back to the vertex average
/// for degenerate (zero-area) rings. Returns the origin for an empty
/// polygon.
pub fn centroid(polygon: &[Vec<Point>]) -> Point {
    let Some(ring) = polygon.first() else {
        return Point::ZERO;
    };
    if ring.is_empty() {
        return Point::ZERO;
    }

    let mut area = 0.0_f32;
    let mut acc = Vec2::ZERO;
    for i in 0..ring.len() {
        let p0 = ring[i];
        let p1 = ring[(i + 1) % ring.len()];
        let cross = p0.x * p1.y - p1.x * p0.y;
        area += cross;
        acc += (p0 + p1) * cross;
    }

    if area.abs() <= f32::EPSILON {
        let sum: Vec2 = ring.iter().copied().sum();
        return sum / ring.len() as f32;
    }
    acc / (3.0 * area)
}
