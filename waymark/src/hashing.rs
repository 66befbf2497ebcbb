// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic hashing for repeat groups and parameter identity.
//!
//! Placement and deduplication logic compares these hashes across tiles
//! built on different worker threads, so they must not depend on any
//! per-process random state.

use core::hash::{BuildHasher, Hash, Hasher};

use foldhash::fast::FixedState;

/// Returns a hasher seeded with a fixed state.
pub(crate) fn stable_hasher() -> impl Hasher {
    FixedState::default().build_hasher()
}

/// Hashes one value with the fixed-seed hasher.
pub(crate) fn hash_one(value: impl Hash) -> u64 {
    FixedState::default().hash_one(value)
}
