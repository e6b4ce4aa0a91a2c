/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Tuning knobs for a [`NumericRangeTree`](crate::NumericRangeTree).

/// Construction parameters of a numeric range tree.
///
/// # Split cardinality
///
/// A leaf splits once the number of distinct values it holds reaches its
/// split cardinality. The root starts at [`Self::initial_split_cardinality`],
/// and every split gives its children `1 + parent * CARDINALITY_GROWTH_FACTOR`.
///
/// Counting distinct values scans the leaf on every insertion, so each insert
/// costs O(n) in the size of the leaf. Splitting keeps leaves small for
/// high-cardinality fields. A large initial split cardinality trades fewer,
/// bigger buckets for more expensive inserts.
///
/// # Retained ranges
///
/// After a split, the former leaf keeps its bucket as a cached copy of the
/// whole subtree. Each further split below it ages the copy by one level. Once
/// it is older than [`Self::max_retained_depth`], the copy is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Entry capacity of the root bucket.
    pub initial_capacity: usize,
    /// Distinct values the root bucket holds before it splits.
    pub initial_split_cardinality: usize,
    /// Number of splits below an internal node after which it releases its
    /// retained bucket.
    pub max_retained_depth: u32,
}

impl TreeConfig {
    /// Default entry capacity of the root bucket.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 2;

    /// Default split cardinality of the root bucket.
    pub const DEFAULT_INITIAL_SPLIT_CARDINALITY: usize = 2;

    /// Default retention window for the buckets of internal nodes.
    pub const DEFAULT_MAX_RETAINED_DEPTH: u32 = 2;

    /// Factor by which the split cardinality grows with every split.
    pub const CARDINALITY_GROWTH_FACTOR: usize = 2;

    /// Use `split_cardinality` for the root bucket, keeping the other defaults.
    pub const fn with_split_cardinality(mut self, split_cardinality: usize) -> Self {
        self.initial_split_cardinality = split_cardinality;
        self
    }

    /// Use `max_retained_depth` as the retention window, keeping the other defaults.
    pub const fn with_max_retained_depth(mut self, max_retained_depth: u32) -> Self {
        self.max_retained_depth = max_retained_depth;
        self
    }

    /// Split cardinality of the children created by splitting a bucket whose
    /// own split cardinality is `parent`.
    pub const fn child_split_cardinality(parent: usize) -> usize {
        1 + parent * Self::CARDINALITY_GROWTH_FACTOR
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
            initial_split_cardinality: Self::DEFAULT_INITIAL_SPLIT_CARDINALITY,
            max_retained_depth: Self::DEFAULT_MAX_RETAINED_DEPTH,
        }
    }
}
