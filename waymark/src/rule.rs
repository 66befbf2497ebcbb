// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interface to the style-rule evaluation engine.
//!
//! Rule evaluation (matching, zoom interpolation, JS-function escape
//! hatches) happens outside this crate; label building only reads the
//! already-evaluated values through [`StyleRule`].

use glam::Vec2;

/// Style parameters a text rule may carry.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum RuleKey {
    /// Property key (or dynamic function) supplying the label text.
    TextSource,
    FontFamily,
    FontWeight,
    FontStyle,
    FontSize,
    /// Fill color, packed `0xAABBGGRR`.
    FontFill,
    FontStrokeColor,
    FontStrokeWidth,
    Priority,
    Collide,
    Offset,
    TransitionShowTime,
    TransitionHideTime,
    TransitionSelectedTime,
    /// Word-wrap toggle or maximum line width in characters.
    TextWrap,
    RepeatGroup,
    RepeatDistance,
    Interactive,
    Anchor,
    Transform,
    Align,
}

/// An evaluated style rule, as seen by the label builder.
///
/// All accessors return `None` when the rule does not set the parameter;
/// the builder substitutes per-field defaults.
pub trait StyleRule {
    /// String-valued parameter.
    fn get_str(&self, key: RuleKey) -> Option<&str>;

    /// Numeric parameter.
    fn get_f32(&self, key: RuleKey) -> Option<f32>;

    /// Packed color parameter.
    fn get_color(&self, key: RuleKey) -> Option<u32>;

    /// Boolean parameter.
    fn get_bool(&self, key: RuleKey) -> Option<bool>;

    /// Two-component parameter (offsets).
    fn get_vec2(&self, key: RuleKey) -> Option<Vec2>;

    /// Whether the parameter is backed by a dynamic function rather than
    /// a literal value. Dynamic text sources are evaluated by the rule
    /// engine itself, so the builder must not treat them as property keys.
    fn is_dynamic(&self, key: RuleKey) -> bool;

    /// A stable hash over the rule's full parameter set, used as the
    /// fallback repeat-group identity for rules without an explicit group.
    fn param_set_hash(&self) -> u64;
}
