// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text-case transforms applied before shaping.
//!
//! Transforms use ASCII case mapping only: non-ASCII characters pass
//! through unchanged, so wide scripts are shaped as authored. This is a
//! known limitation, not locale-aware case folding.

use std::borrow::Cow;

/// Case transform requested by a style rule.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug)]
pub enum TextTransform {
    /// Leave the text as authored.
    #[default]
    None,
    /// Uppercase the first character and every character following a space.
    Capitalize,
    /// Uppercase every character.
    Uppercase,
    /// Lowercase every character.
    Lowercase,
}

impl TextTransform {
    /// Parses a transform name from a style rule.
    ///
    /// # Example
    /// ```
    /// # use waymark::TextTransform;
    /// assert_eq!(TextTransform::parse("uppercase"), Some(TextTransform::Uppercase));
    /// assert_eq!(TextTransform::parse("shouty"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim() {
            "none" => Self::None,
            "capitalize" => Self::Capitalize,
            "uppercase" => Self::Uppercase,
            "lowercase" => Self::Lowercase,
            _ => return None,
        })
    }

    /// Applies the transform, borrowing the input when it is a no-op.
    pub fn apply<'a>(self, text: &'a str) -> Cow<'a, str> {
        match self {
            Self::None => Cow::Borrowed(text),
            Self::Capitalize => {
                let mut out = String::with_capacity(text.len());
                let mut after_space = true;
                for ch in text.chars() {
                    if after_space {
                        out.push(ch.to_ascii_uppercase());
                    } else {
                        out.push(ch);
                    }
                    after_space = ch == ' ';
                }
                Cow::Owned(out)
            }
            Self::Uppercase => Cow::Owned(text.chars().map(|c| c.to_ascii_uppercase()).collect()),
            Self::Lowercase => Cow::Owned(text.chars().map(|c| c.to_ascii_lowercase()).collect()),
        }
    }
}
