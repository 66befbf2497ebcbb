// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution of per-label parameters from a style rule and a feature's
//! properties.

use core::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::builder::StyleConfig;
use crate::case::TextTransform;
use crate::font::{FontContext, FontHandle, ShapeEngine};
use crate::label::{Align, Anchor, LabelOptions};
use crate::properties::Properties;
use crate::rule::{RuleKey, StyleRule};

/// Default repeat distance when the rule sets none: one tile of pixels.
pub const PIXELS_PER_TILE: f32 = 256.0;

const DEFAULT_FONT_SIZE: f32 = 16.0;
const DEFAULT_MAX_LINE_WIDTH: u32 = 15;
const DEFAULT_FAMILY: &str = "default";
const DEFAULT_WEIGHT: &str = "400";
const DEFAULT_STYLE: &str = "normal";

/// Resolved parameters for one label.
///
/// Created fresh per feature; immutable once handed to shaping. Empty
/// `text` marks an unresolvable feature that must be skipped.
#[derive(Clone, Debug)]
pub struct TextParams {
    /// Label text before any case transform.
    pub text: String,
    /// Font handle, present whenever text resolved.
    pub font: Option<FontHandle>,
    /// Font size in pixels, already multiplied by the pixel scale.
    pub font_size: f32,
    /// Fill color, packed `0xAABBGGRR`.
    pub fill: u32,
    /// Stroke color; its alpha byte is replaced by the encoded width.
    pub stroke_color: u32,
    /// Stroke width in style pixels (pixel scale applied at shaping).
    pub stroke_width: f32,
    /// Case transform to apply before shaping.
    pub transform: TextTransform,
    /// Line alignment within the wrapped box.
    pub align: Align,
    /// Label anchor.
    pub anchor: Anchor,
    /// Whether point labels word-wrap.
    pub word_wrap: bool,
    /// Maximum line width in characters when wrapping.
    pub max_line_width: u32,
    /// Whether the label responds to picking; interactive labels carry
    /// the feature's properties in their options.
    pub interactive: bool,
    /// Distance-field blur spread derived from the font size.
    pub blur_spread: f32,
    /// Options forwarded into the produced labels.
    pub options: LabelOptions,
}

impl Default for TextParams {
    fn default() -> Self {
        Self {
            text: String::new(),
            font: None,
            font_size: DEFAULT_FONT_SIZE,
            fill: 0xffff_ffff,
            stroke_color: 0xffff_ffff,
            stroke_width: 0.0,
            transform: TextTransform::None,
            align: Align::default(),
            anchor: Anchor::default(),
            word_wrap: true,
            max_line_width: DEFAULT_MAX_LINE_WIDTH,
            interactive: false,
            blur_spread: 0.0,
            options: LabelOptions::default(),
        }
    }
}

impl TextParams {
    /// Whether the parameters can produce a label.
    pub fn is_valid(&self) -> bool {
        !self.text.is_empty() && self.font_size > 0.0
    }

    /// Resolves parameters for one feature.
    ///
    /// Returns a value with empty `text` when no text source resolves;
    /// callers skip the feature in that case.
    pub fn from_rule<E: ShapeEngine>(
        rule: &dyn StyleRule,
        props: &Properties,
        fonts: &FontContext<E>,
        config: &StyleConfig,
    ) -> Self {
        let mut p = Self::default();

        if let Some(source) = rule.get_str(RuleKey::TextSource) {
            p.text = source.to_string();
        }
        if !rule.is_dynamic(RuleKey::TextSource) {
            // The rule value names a property key; no value means the
            // conventional "name" property.
            p.text = if p.text.is_empty() {
                props.get_string("name").to_string()
            } else {
                props.get_string(&p.text).to_string()
            };
        }
        if p.text.is_empty() {
            return p;
        }

        let family = rule.get_str(RuleKey::FontFamily).unwrap_or(DEFAULT_FAMILY);
        let weight = rule.get_str(RuleKey::FontWeight).unwrap_or(DEFAULT_WEIGHT);
        let style = rule.get_str(RuleKey::FontStyle).unwrap_or(DEFAULT_STYLE);

        if let Some(size) = rule.get_f32(RuleKey::FontSize) {
            p.font_size = size;
        }
        p.font = Some(fonts.font(family, style, weight, p.font_size * config.pixel_scale));

        if let Some(fill) = rule.get_color(RuleKey::FontFill) {
            p.fill = fill;
        }
        if let Some(stroke) = rule.get_color(RuleKey::FontStrokeColor) {
            p.stroke_color = stroke;
        }
        if let Some(width) = rule.get_f32(RuleKey::FontStrokeWidth) {
            p.stroke_width = width;
        }
        if let Some(offset) = rule.get_vec2(RuleKey::Offset) {
            p.options.offset = offset;
        }
        if let Some(priority) = rule.get_f32(RuleKey::Priority) {
            p.options.priority = priority;
        }
        if let Some(collide) = rule.get_bool(RuleKey::Collide) {
            p.options.collide = collide;
        }
        if let Some(time) = rule.get_f32(RuleKey::TransitionShowTime) {
            p.options.transitions.show = time;
        }
        if let Some(time) = rule.get_f32(RuleKey::TransitionHideTime) {
            p.options.transitions.hide = time;
        }
        if let Some(time) = rule.get_f32(RuleKey::TransitionSelectedTime) {
            p.options.transitions.select = time;
        }

        if rule.get_bool(RuleKey::TextWrap) == Some(false) {
            p.word_wrap = false;
        } else if let Some(width) = rule.get_f32(RuleKey::TextWrap) {
            if width > 0.0 {
                p.max_line_width = width as u32;
            }
        }

        // Repeat identity: explicit group name, or the rule's own
        // parameter set, combined with the resolved text so identical
        // text under one rule collapses to one key.
        let mut h = crate::hashing::stable_hasher();
        match rule.get_str(RuleKey::RepeatGroup) {
            Some(group) => group.hash(&mut h),
            None => h.write_u64(rule.param_set_hash()),
        }
        p.text.hash(&mut h);
        p.options.repeat_group = h.finish();

        p.options.repeat_distance = rule
            .get_f32(RuleKey::RepeatDistance)
            .unwrap_or(PIXELS_PER_TILE)
            * config.pixel_scale;

        if rule.get_bool(RuleKey::Interactive) == Some(true) {
            p.interactive = true;
            p.options.properties = Some(Arc::new(props.clone()));
        }

        if let Some(anchor) = rule.get_str(RuleKey::Anchor).and_then(Anchor::parse) {
            p.anchor = anchor;
        }
        if let Some(transform) = rule.get_str(RuleKey::Transform).and_then(TextTransform::parse) {
            p.transform = transform;
        }
        if let Some(align) = rule.get_str(RuleKey::Align) {
            match Align::parse(align) {
                Some(align) => p.align = align,
                None => {
                    if let Some(fallback) = align_for_anchor(p.anchor) {
                        p.align = fallback;
                    }
                }
            }
        }

        // Global pixel-scale corrections.
        p.font_size *= config.pixel_scale;
        p.options.offset *= config.pixel_scale;
        let em_size = p.font_size / 16.0;
        p.blur_spread = if config.sdf { em_size * 5.0 } else { 0.0 };

        // Collision padding shrinks the box by half the scaled font size.
        p.options.buffer = -p.font_size / 2.0;

        p.options.param_hash = p.param_hash();

        p
    }

    /// Stable identity over the full parameter value, used as a cache key
    /// by placement logic.
    fn param_hash(&self) -> u64 {
        let mut h = crate::hashing::stable_hasher();
        self.text.hash(&mut h);
        self.font.hash(&mut h);
        h.write_u32(self.font_size.to_bits());
        h.write_u32(self.fill);
        h.write_u32(self.stroke_color);
        h.write_u32(self.stroke_width.to_bits());
        self.transform.hash(&mut h);
        self.align.hash(&mut h);
        self.anchor.hash(&mut h);
        h.write_u8(self.word_wrap as u8);
        h.write_u32(self.max_line_width);
        h.write_u8(self.interactive as u8);
        h.write_u32(self.blur_spread.to_bits());
        h.write_u32(self.options.priority.to_bits());
        h.write_u8(self.options.collide as u8);
        h.write_u32(self.options.offset.x.to_bits());
        h.write_u32(self.options.offset.y.to_bits());
        h.write_u64(self.options.repeat_group);
        h.write_u32(self.options.repeat_distance.to_bits());
        h.finish()
    }
}

/// Alignment implied by a side anchor when the rule's alignment does not
/// parse: text extends away from the anchored side. Center/top/bottom
/// anchors keep the default alignment.
fn align_for_anchor(anchor: Anchor) -> Option<Align> {
    match anchor {
        Anchor::TopLeft | Anchor::Left | Anchor::BottomLeft => Some(Align::Right),
        Anchor::TopRight | Anchor::Right | Anchor::BottomRight => Some(Align::Left),
        Anchor::Center | Anchor::Top | Anchor::Bottom => None,
    }
}
