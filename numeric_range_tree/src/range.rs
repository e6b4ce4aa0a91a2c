/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Numeric range storage for the numeric range tree.

use rqe_iterators::t_docId;

/// A single `(doc_id, value)` pair stored in a [`NumericRange`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRangeEntry {
    pub doc_id: t_docId,
    pub value: f64,
}

/// A numeric range is the storage unit of the numeric range tree.
///
/// It stores document IDs and their associated numeric values in insertion
/// order, along with the value span used to answer range queries and the
/// exact number of distinct values it holds.
///
/// The span starts at the declared bounds the range was created with and only
/// widens as values are added, so sibling ranges created by a split tile the
/// value line without gaps.
#[derive(Debug)]
pub struct NumericRange {
    /// The lower end of the span.
    min_val: f64,
    /// The upper end of the span.
    max_val: f64,
    /// Number of distinct values, as far as they were tracked.
    cardinality: usize,
    /// Cardinality at which the owning leaf splits.
    split_cardinality: usize,
    /// The stored entries, in insertion order.
    entries: Vec<NumericRangeEntry>,
}

impl NumericRange {
    /// Upper bound on how many entries a single growth step adds.
    pub const MAXIMUM_CAPACITY_GROWTH: usize = 1 << 20;

    /// Create an empty range spanning `[min_val, max_val]`.
    pub fn new(capacity: usize, min_val: f64, max_val: f64, split_cardinality: usize) -> Self {
        Self {
            min_val,
            max_val,
            cardinality: 0,
            split_cardinality,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Add a `(doc_id, value)` entry to this range, widening its span if needed.
    ///
    /// With `check_cardinality`, the value counts towards the cardinality when
    /// no stored entry has an equal value. Ranges retained by internal nodes
    /// and ranges being filled by a split skip the check.
    ///
    /// Returns the cardinality after the insertion.
    pub fn add(&mut self, doc_id: t_docId, value: f64, check_cardinality: bool) -> usize {
        if check_cardinality && !self.entries.iter().any(|e| e.value == value) {
            self.cardinality += 1;
        }

        if value < self.min_val {
            self.min_val = value;
        }
        if value > self.max_val {
            self.max_val = value;
        }

        if self.entries.len() == self.entries.capacity() {
            self.grow();
        }
        self.entries.push(NumericRangeEntry { doc_id, value });

        self.cardinality
    }

    /// Double the capacity while small, then grow by a fixed step.
    fn grow(&mut self) {
        let capacity = self.entries.capacity();
        let additional = if capacity == 0 {
            2
        } else {
            capacity.min(Self::MAXIMUM_CAPACITY_GROWTH)
        };
        self.entries.reserve_exact(additional);
    }

    /// Returns true if this range is completely inside `[min, max)`.
    pub const fn within(&self, min: f64, max: f64) -> bool {
        self.min_val >= min && self.max_val < max
    }

    /// Returns true if this range strictly encloses the query `[min, max]`
    /// on the upper side.
    pub const fn contains(&self, min: f64, max: f64) -> bool {
        self.min_val <= min && self.max_val > max
    }

    /// Returns true if this range overlaps with `[min, max]`.
    pub const fn overlaps(&self, min: f64, max: f64) -> bool {
        !(min > self.max_val || max < self.min_val)
    }

    /// Get the lower end of the span.
    pub const fn min_val(&self) -> f64 {
        self.min_val
    }

    /// Get the upper end of the span.
    pub const fn max_val(&self) -> f64 {
        self.max_val
    }

    /// Number of distinct values seen through cardinality-checked insertions.
    pub const fn cardinality(&self) -> usize {
        self.cardinality
    }

    pub(crate) const fn set_cardinality(&mut self, cardinality: usize) {
        self.cardinality = cardinality;
    }

    pub const fn split_cardinality(&self) -> usize {
        self.split_cardinality
    }

    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// The stored entries, in insertion order.
    pub fn entries(&self) -> &[NumericRangeEntry] {
        &self.entries
    }

    /// Heap bytes reserved for entries.
    pub fn entries_size(&self) -> usize {
        self.capacity() * std::mem::size_of::<NumericRangeEntry>()
    }
}
