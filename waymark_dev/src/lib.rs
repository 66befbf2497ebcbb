// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Waymark Dev
//!
//! This crate provides utilities for developing and testing Waymark: a
//! deterministic monospace shaping engine and an in-memory style rule.

use core::hash::{BuildHasher, Hash, Hasher};
use std::sync::{Arc, Mutex};

use foldhash::fast::FixedState;
use glam::Vec2;
use hashbrown::HashMap;
use waymark::{
    AtlasGlyph, FontHandle, GlyphShape, Properties, RuleKey, ShapeEngine, ShapedLine, StyleRule,
};

/// Horizontal advance of every fixture glyph.
pub const ADVANCE: f32 = 10.0;
/// Fixture ascent above the baseline.
pub const ASCENT: f32 = 9.0;
/// Fixture descent below the baseline.
pub const DESCENT: f32 = 3.0;
/// Fixture line height; chosen equal to ascent + descent so wrapped box
/// heights divide evenly into line counts.
pub const LINE_HEIGHT: f32 = 12.0;
/// Fixture maximum representable stroke width, in pixels.
pub const MAX_STROKE_WIDTH: f32 = 3.0;

/// A record of every string the fixture engine shaped, shared with the
/// test that owns the engine.
#[derive(Clone, Default, Debug)]
pub struct ShapedLog(Arc<Mutex<Vec<String>>>);

impl ShapedLog {
    /// All shaped strings, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// The most recently shaped string.
    pub fn last(&self) -> Option<String> {
        self.0.lock().unwrap().last().cloned()
    }
}

/// A deterministic monospace shaping engine.
///
/// Every character shapes to one glyph of fixed advance and metrics;
/// spaces shape to glyph-less whitespace shapes. Atlas coordinates are
/// derived from the code point so tests can tell glyphs apart.
#[derive(Default, Debug)]
pub struct FixtureEngine {
    log: ShapedLog,
}

impl FixtureEngine {
    /// Creates an engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle to the engine's shaping log, to keep before moving the
    /// engine into a `FontContext`.
    pub fn log(&self) -> ShapedLog {
        self.log.clone()
    }
}

impl ShapeEngine for FixtureEngine {
    fn font(&mut self, family: &str, style: &str, weight: &str, size: f32) -> FontHandle {
        let mut h = FixedState::default().build_hasher();
        family.hash(&mut h);
        style.hash(&mut h);
        weight.hash(&mut h);
        FontHandle {
            id: h.finish(),
            size,
        }
    }

    fn shape(&mut self, _font: &FontHandle, text: &str) -> ShapedLine {
        self.log.0.lock().unwrap().push(text.to_string());

        let shapes = text
            .chars()
            .map(|ch| {
                let is_space = ch == ' ';
                let cell = u32::from(ch) % 256;
                let u = (cell % 16) as f32 / 16.0;
                let v = (cell / 16) as f32 / 16.0;
                GlyphShape {
                    glyph: (!is_space).then_some(AtlasGlyph {
                        page: 0,
                        u1: u,
                        v1: v,
                        u2: u + 1.0 / 16.0,
                        v2: v + 1.0 / 16.0,
                    }),
                    advance: ADVANCE,
                    offset: Vec2::new(0.0, -ASCENT),
                    size: Vec2::new(ADVANCE, ASCENT + DESCENT),
                    is_space,
                }
            })
            .collect();

        ShapedLine::new(shapes, ASCENT, DESCENT, LINE_HEIGHT)
    }

    fn max_stroke_width(&self) -> f32 {
        MAX_STROKE_WIDTH
    }
}

#[derive(Clone, PartialEq, Debug)]
enum Value {
    Str(String),
    Num(f32),
    Color(u32),
    Bool(bool),
    Vec2(Vec2),
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Str(s) => s.hash(state),
            Self::Num(n) => state.write_u32(n.to_bits()),
            Self::Color(c) => state.write_u32(*c),
            Self::Bool(b) => state.write_u8(*b as u8),
            Self::Vec2(v) => {
                state.write_u32(v.x.to_bits());
                state.write_u32(v.y.to_bits());
            }
        }
    }
}

/// An in-memory style rule for tests.
///
/// Built with the `with_*` methods; unset keys resolve to `None` like an
/// evaluated rule that does not carry the parameter.
#[derive(Clone, Default, Debug)]
pub struct TestRule {
    values: HashMap<RuleKey, Value>,
    dynamic: Vec<RuleKey>,
}

impl TestRule {
    /// Creates an empty rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a string parameter.
    pub fn with_str(mut self, key: RuleKey, value: &str) -> Self {
        self.values.insert(key, Value::Str(value.to_string()));
        self
    }

    /// Sets a numeric parameter.
    pub fn with_f32(mut self, key: RuleKey, value: f32) -> Self {
        self.values.insert(key, Value::Num(value));
        self
    }

    /// Sets a packed color parameter.
    pub fn with_color(mut self, key: RuleKey, value: u32) -> Self {
        self.values.insert(key, Value::Color(value));
        self
    }

    /// Sets a boolean parameter.
    pub fn with_bool(mut self, key: RuleKey, value: bool) -> Self {
        self.values.insert(key, Value::Bool(value));
        self
    }

    /// Sets a two-component parameter.
    pub fn with_vec2(mut self, key: RuleKey, value: Vec2) -> Self {
        self.values.insert(key, Value::Vec2(value));
        self
    }

    /// Marks a parameter as backed by a dynamic function.
    pub fn with_dynamic(mut self, key: RuleKey) -> Self {
        self.dynamic.push(key);
        self
    }
}

impl StyleRule for TestRule {
    fn get_str(&self, key: RuleKey) -> Option<&str> {
        match self.values.get(&key)? {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    fn get_f32(&self, key: RuleKey) -> Option<f32> {
        match self.values.get(&key)? {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }

    fn get_color(&self, key: RuleKey) -> Option<u32> {
        match self.values.get(&key)? {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }

    fn get_bool(&self, key: RuleKey) -> Option<bool> {
        match self.values.get(&key)? {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn get_vec2(&self, key: RuleKey) -> Option<Vec2> {
        match self.values.get(&key)? {
            Value::Vec2(v) => Some(*v),
            _ => None,
        }
    }

    fn is_dynamic(&self, key: RuleKey) -> bool {
        self.dynamic.contains(&key)
    }

    fn param_set_hash(&self) -> u64 {
        let mut entries: Vec<(&RuleKey, &Value)> = self.values.iter().collect();
        entries.sort_by_key(|(key, _)| **key);

        let mut h = FixedState::default().build_hasher();
        for (key, value) in entries {
            key.hash(&mut h);
            value.hash(&mut h);
        }
        h.finish()
    }
}

/// Builds a property dictionary from key/value pairs.
pub fn props(pairs: &[(&str, &str)]) -> Properties {
    pairs.iter().copied().collect()
}
