// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The property dictionary attached to a tile feature.

use core::hash::{Hash, Hasher};

use hashbrown::HashMap;

/// String properties attached to one feature.
///
/// Label text is resolved by key lookup here, and interactive labels carry
/// a shared copy of the whole dictionary for event callbacks downstream.
#[derive(Clone, Default, Debug)]
pub struct Properties {
    items: HashMap<String, String>,
}

impl Properties {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, replacing any previous value for the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.items.insert(key.into(), value.into());
    }

    /// Returns the value for `key`, or the empty string when absent.
    pub fn get_string(&self, key: &str) -> &str {
        self.items.get(key).map(String::as_str).unwrap_or("")
    }

    /// Whether the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl Hash for Properties {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-independent: XOR of per-entry hashes.
        let mut acc = 0_u64;
        for entry in &self.items {
            acc ^= crate::hashing::hash_one(entry);
        }
        state.write_u64(acc);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Self::new();
        for (key, value) in iter {
            props.set(key, value);
        }
        props
    }
}
