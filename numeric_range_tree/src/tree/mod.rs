/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Numeric range tree implementation.
//!
//! The tree itself only routes and records statistics. The write path lives
//! on [`NumericRangeNode`], the read path is in [`find`].

mod find;

use rqe_iterators::t_docId;

use crate::iter::PreOrderDfsIterator;
use crate::{NumericRange, NumericRangeNode, TreeConfig};

/// Result of adding a value to the tree.
///
/// This captures the changes that occurred during the add operation,
/// including memory growth and structural changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddResult {
    /// The change in bytes reserved for range entries.
    /// Negative when a retained range is released.
    pub size_delta: i64,
    /// The net change in the number of stored entries, counting the copies
    /// held by retained ranges and the entries redistributed by a split.
    pub num_records_delta: i32,
    /// Whether a split occurred.
    pub changed: bool,
    /// The number of leaf ranges created, i.e. the number of splits.
    pub num_ranges_delta: i32,
    /// The net change in the number of allocated ranges, leaves and
    /// retained ranges alike.
    pub num_allocated_ranges_delta: i32,
}

impl AddResult {
    /// Fold the result of a nested operation into this one.
    pub const fn merge(&mut self, other: &Self) {
        self.size_delta += other.size_delta;
        self.num_records_delta += other.num_records_delta;
        self.changed |= other.changed;
        self.num_ranges_delta += other.num_ranges_delta;
        self.num_allocated_ranges_delta += other.num_allocated_ranges_delta;
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct TreeStats {
    num_ranges: usize,
    num_allocated_ranges: usize,
    num_entries: usize,
    num_records: usize,
    entries_size: usize,
}

/// A numeric range tree for efficient range queries over numeric values.
///
/// The tree organizes documents by their numeric field values into a binary
/// tree of ranges. Each leaf node contains a range of values, and internal
/// nodes may retain their former leaf range for a while so that a query
/// covering a whole subtree can be answered from a single range.
///
/// Leaves split once they hold as many distinct values as their split
/// cardinality; see [`TreeConfig`]. The tree is never rebalanced.
#[derive(Debug)]
pub struct NumericRangeTree {
    root: Box<NumericRangeNode>,
    config: TreeConfig,
    stats: TreeStats,
    /// The last document ID added to the tree.
    last_doc_id: t_docId,
}

impl NumericRangeTree {
    /// Create a new empty numeric range tree.
    pub fn new(config: TreeConfig) -> Self {
        let root = NumericRange::new(
            config.initial_capacity,
            0.0,
            0.0,
            config.initial_split_cardinality,
        );
        let entries_size = root.entries_size();
        Self {
            root: Box::new(NumericRangeNode::leaf(root)),
            config,
            stats: TreeStats {
                num_ranges: 1,
                num_allocated_ranges: 1,
                entries_size,
                ..Default::default()
            },
            last_doc_id: 0,
        }
    }

    /// Add a (docId, value) pair to the tree.
    ///
    /// Documents must be added in non-decreasing doc-id order. A document
    /// with several values is added once per value, with the same doc-id.
    /// NaN values are not indexed.
    pub fn add(&mut self, doc_id: t_docId, value: f64) -> AddResult {
        if value.is_nan() {
            tracing::debug!(doc_id, "ignoring NaN numeric value");
            return AddResult::default();
        }
        debug_assert!(
            doc_id >= self.last_doc_id,
            "doc-id {doc_id} added after {}",
            self.last_doc_id
        );

        let rv = self.root.add(doc_id, value, &self.config);

        self.last_doc_id = doc_id;

        let stats = &mut self.stats;
        stats.num_entries += 1;
        stats.num_ranges = apply_signed_delta(stats.num_ranges, rv.num_ranges_delta.into());
        stats.num_allocated_ranges = apply_signed_delta(
            stats.num_allocated_ranges,
            rv.num_allocated_ranges_delta.into(),
        );
        stats.num_records = apply_signed_delta(stats.num_records, rv.num_records_delta.into());
        stats.entries_size = apply_signed_delta(stats.entries_size, rv.size_delta);

        rv
    }

    /// Get a reference to the root node.
    pub fn root(&self) -> &NumericRangeNode {
        &self.root
    }

    pub const fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Get the total number of entries added to the tree.
    pub const fn num_entries(&self) -> usize {
        self.stats.num_entries
    }

    /// Get the number of leaf ranges. Grows by one with every split.
    pub const fn num_ranges(&self) -> usize {
        self.stats.num_ranges
    }

    /// Get the number of ranges currently allocated, retained ones included.
    pub const fn num_allocated_ranges(&self) -> usize {
        self.stats.num_allocated_ranges
    }

    /// Get the number of entries stored across all allocated ranges.
    pub const fn num_records(&self) -> usize {
        self.stats.num_records
    }

    /// Get the bytes reserved for entries across all allocated ranges.
    pub const fn entries_size(&self) -> usize {
        self.stats.entries_size
    }

    /// Get the last document ID added to the tree.
    pub const fn last_doc_id(&self) -> t_docId {
        self.last_doc_id
    }

    /// Returns an iterator over all nodes in the tree, in pre-order.
    pub fn iter(&self) -> PreOrderDfsIterator<'_> {
        PreOrderDfsIterator::new(&self.root)
    }

    /// Returns an iterator over the leaf ranges, from lowest to highest values.
    pub fn leaves(&self) -> impl Iterator<Item = &NumericRange> {
        self.iter()
            .filter(|node| node.is_leaf())
            .filter_map(NumericRangeNode::range)
    }

    /// Total memory used by the tree, its nodes and their ranges, in bytes.
    pub fn mem_usage(&self) -> usize {
        let nodes: usize = self.iter().map(NumericRangeNode::mem_usage).sum();
        std::mem::size_of::<Self>() + nodes
    }
}

impl Default for NumericRangeTree {
    fn default() -> Self {
        Self::new(TreeConfig::default())
    }
}

fn apply_signed_delta(value: usize, delta: i64) -> usize {
    let updated = value as i64 + delta;
    debug_assert!(updated >= 0, "statistic underflow: {value} + {delta}");
    updated.max(0) as usize
}
