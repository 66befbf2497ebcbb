// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interface to the shared font and shaping context.
//!
//! Shaping and glyph rasterization are provided by an external engine
//! implementing [`ShapeEngine`]. One [`FontContext`] wraps one engine
//! instance and is shared (`Arc`) across all tile builders; the engine and
//! its font cache sit behind a single mutex because shaping mutates the
//! glyph atlas.

use core::hash::{Hash, Hasher};
use std::sync::{Mutex, MutexGuard, PoisonError};

use glam::Vec2;
use hashbrown::HashMap;

/// Handle to a font at a concrete rasterization size.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct FontHandle {
    /// Engine-assigned identifier.
    pub id: u64,
    /// Pixel size the atlas glyphs were rasterized at. Layout scales
    /// glyph geometry by `fontSize * pixelScale / size` to match the
    /// requested on-screen size.
    pub size: f32,
}

/// Placement of a rasterized glyph in the shared texture atlas.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct AtlasGlyph {
    /// Atlas page the glyph was packed into.
    pub page: u16,
    /// Texture coordinates of the glyph rectangle: `(u1, v1)` top-left,
    /// `(u2, v2)` bottom-right.
    pub u1: f32,
    pub v1: f32,
    pub u2: f32,
    pub v2: f32,
}

/// One shaped glyph within a line.
///
/// Geometry is unscaled (atlas rasterization units); layout multiplies by
/// the line's scale factor. Whitespace produces a shape with no atlas
/// glyph so word-wrap still sees the advance and break opportunity.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct GlyphShape {
    /// Atlas placement, absent for whitespace.
    pub glyph: Option<AtlasGlyph>,
    /// Horizontal advance to the next pen position.
    pub advance: f32,
    /// Bearing from the pen position to the quad's top-left corner.
    pub offset: Vec2,
    /// Quad extents.
    pub size: Vec2,
    /// Whether this shape is breakable whitespace.
    pub is_space: bool,
}

/// The result of shaping one text run with one font.
#[derive(Clone, Default, Debug)]
pub struct ShapedLine {
    shapes: Vec<GlyphShape>,
    ascent: f32,
    descent: f32,
    line_height: f32,
    scale: f32,
}

impl ShapedLine {
    /// Creates a shaped line from raw engine output. Metrics are in the
    /// engine's unscaled units; the initial scale factor is 1.
    pub fn new(shapes: Vec<GlyphShape>, ascent: f32, descent: f32, line_height: f32) -> Self {
        Self {
            shapes,
            ascent,
            descent,
            line_height,
            scale: 1.0,
        }
    }

    /// The shaped glyphs in visual order.
    pub fn shapes(&self) -> &[GlyphShape] {
        &self.shapes
    }

    /// Sets the factor all scaled accessors multiply by.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// The current scale factor.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Scaled distance from baseline to the top of the line.
    pub fn ascent(&self) -> f32 {
        self.ascent * self.scale
    }

    /// Scaled distance from baseline to the bottom of the line.
    pub fn descent(&self) -> f32 {
        self.descent * self.scale
    }

    /// Scaled height of one line of text.
    pub fn height(&self) -> f32 {
        self.line_height * self.scale
    }
}

/// The external shaping and rasterization engine.
///
/// Implementations own the font files, the glyph cache, and the texture
/// atlas. Calls may mutate the atlas, which is why [`FontContext`] funnels
/// them through one lock.
pub trait ShapeEngine: Send {
    /// Resolves a font for the given identity at `size` pixels, loading
    /// and caching it as needed.
    fn font(&mut self, family: &str, style: &str, weight: &str, size: f32) -> FontHandle;

    /// Shapes `text` with `font`, rasterizing any missing glyphs into the
    /// atlas. An empty shape list signals the engine cannot shape the
    /// text (for example an unsupported script).
    fn shape(&mut self, font: &FontHandle, text: &str) -> ShapedLine;

    /// The widest glyph outline stroke the engine's distance field can
    /// represent, in pixels. Stroke widths are normalized against this
    /// when packed into the vertex stream.
    fn max_stroke_width(&self) -> f32;
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
struct FontKey {
    family: u64,
    style: u64,
    weight: u64,
    size_bits: u32,
}

/// Shared font/shaping context, one per style.
///
/// Builders on different worker threads hold the same context via `Arc`.
/// [`FontContext::lock`] hands out the engine for a full shape-and-emit
/// sequence; interleaving atlas mutation inside a single label's glyph
/// run would corrupt it.
pub struct FontContext<E: ShapeEngine> {
    engine: Mutex<E>,
    fonts: Mutex<HashMap<FontKey, FontHandle>>,
    max_stroke_width: f32,
}

impl<E: ShapeEngine> FontContext<E> {
    /// Wraps an engine for shared use.
    pub fn new(engine: E) -> Self {
        let max_stroke_width = engine.max_stroke_width();
        Self {
            engine: Mutex::new(engine),
            fonts: Mutex::new(HashMap::new()),
            max_stroke_width,
        }
    }

    /// Resolves a font handle, consulting the context-local cache before
    /// asking the engine.
    pub fn font(&self, family: &str, style: &str, weight: &str, size: f32) -> FontHandle {
        let key = FontKey {
            family: crate::hashing::hash_one(family),
            style: crate::hashing::hash_one(style),
            weight: crate::hashing::hash_one(weight),
            size_bits: size.to_bits(),
        };
        if let Some(handle) = lock(&self.fonts).get(&key) {
            return *handle;
        }
        let handle = lock(&self.engine).font(family, style, weight, size);
        lock(&self.fonts).insert(key, handle);
        handle
    }

    /// See [`ShapeEngine::max_stroke_width`].
    pub fn max_stroke_width(&self) -> f32 {
        self.max_stroke_width
    }

    /// Locks the engine for a shape-and-emit sequence.
    pub fn lock(&self) -> MutexGuard<'_, E> {
        lock(&self.engine)
    }
}

impl<E: ShapeEngine> core::fmt::Debug for FontContext<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FontContext")
            .field("max_stroke_width", &self.max_stroke_width)
            .finish_non_exhaustive()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A builder that panicked mid-shape leaves at worst a partially
    // rasterized atlas page, which later shapes simply overwrite.
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Hash for FontHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.id);
        state.write_u32(self.size.to_bits());
    }
}
