/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! NumericRangeNode - A node in the numeric range tree.

use itertools::Itertools as _;
use rqe_iterators::t_docId;

use crate::TreeConfig;
use crate::range::NumericRange;
use crate::tree::AddResult;

/// A node in the numeric range tree. Can be either a leaf node (with a range)
/// or an internal node with left/right children.
///
/// An internal node may keep the range it had as a leaf. That retained range
/// keeps receiving every value added below the node until enough splits have
/// happened underneath for it to be released.
#[derive(Debug)]
pub struct NumericRangeNode {
    /// Split point value for internal nodes. Values less than this go left.
    value: f64,

    /// Number of splits reported by the subtree since this node split.
    levels_since_split: u32,

    /// Left child (values < split point)
    left: Option<Box<NumericRangeNode>>,

    /// Right child (values >= split point)
    right: Option<Box<NumericRangeNode>>,

    /// The numeric range data (present in leaf nodes, may be retained in some internal nodes)
    range: Option<NumericRange>,
}

impl NumericRangeNode {
    /// Creates a new leaf node holding `range`.
    #[must_use]
    pub const fn leaf(range: NumericRange) -> Self {
        Self {
            value: 0.0,
            levels_since_split: 0,
            left: None,
            right: None,
            range: Some(range),
        }
    }

    /// Returns true if this is a leaf node (has no children).
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// The split value of an internal node, `None` for leaves.
    pub const fn split_value(&self) -> Option<f64> {
        if self.is_leaf() {
            None
        } else {
            Some(self.value)
        }
    }

    /// The `(left, right)` children of an internal node.
    pub fn children(&self) -> Option<(&Self, &Self)> {
        match (&self.left, &self.right) {
            (Some(left), Some(right)) => Some((left.as_ref(), right.as_ref())),
            _ => None,
        }
    }

    /// The range held by this node, if any.
    pub const fn range(&self) -> Option<&NumericRange> {
        self.range.as_ref()
    }

    /// Splits reported below this node since it split.
    pub const fn levels_since_split(&self) -> u32 {
        self.levels_since_split
    }

    /// Memory taken by this node and the entries of its range, in bytes.
    pub fn mem_usage(&self) -> usize {
        std::mem::size_of::<Self>() + self.range.as_ref().map_or(0, NumericRange::entries_size)
    }

    /// Adds a value to this subtree, splitting the target leaf when it
    /// reaches its split cardinality.
    pub(crate) fn add(&mut self, doc_id: t_docId, value: f64, config: &TreeConfig) -> AddResult {
        let mut rv = AddResult::default();

        let child = match (&mut self.left, &mut self.right) {
            (Some(left), Some(right)) => Some(if value < self.value { left } else { right }),
            _ => None,
        };

        let Some(child) = child else {
            // Leaf node - add and potentially split
            let Some(range) = self.range.as_mut() else {
                return rv;
            };
            let size_before = range.entries_size();
            let card = range.add(doc_id, value, true);
            rv.size_delta += growth(size_before, range.entries_size());
            rv.num_records_delta += 1;

            if card >= range.split_cardinality() {
                self.split(&mut rv);
                self.release_range_if_stale(config, &mut rv);
            }
            return rv;
        };

        // Internal node: the retained range sees every value of the subtree
        if let Some(range) = self.range.as_mut() {
            let size_before = range.entries_size();
            range.add(doc_id, value, false);
            rv.size_delta += growth(size_before, range.entries_size());
            rv.num_records_delta += 1;
        }

        let child_rv = child.add(doc_id, value, config);
        rv.merge(&child_rv);

        if child_rv.changed {
            self.levels_since_split += 1;
            self.release_range_if_stale(config, &mut rv);
        }

        rv
    }

    /// Drop the retained range once the subtree has split often enough below it.
    fn release_range_if_stale(&mut self, config: &TreeConfig, rv: &mut AddResult) {
        if self.levels_since_split <= config.max_retained_depth {
            return;
        }
        if let Some(range) = self.range.take() {
            tracing::debug!(
                split = self.value,
                entries = range.num_entries(),
                "releasing retained numeric range"
            );
            rv.size_delta -= range.entries_size() as i64;
            rv.num_records_delta -= range.num_entries() as i32;
            rv.num_allocated_ranges_delta -= 1;
        }
    }

    /// Splits this leaf node into two children at the median of its values.
    ///
    /// The leaf keeps its range, which from now on is a retained range.
    fn split(&mut self, rv: &mut AddResult) {
        let Some(range) = self.range.as_ref() else {
            return;
        };
        let Some(split) = split_value(range) else {
            return;
        };

        let split_cardinality = TreeConfig::child_split_cardinality(range.split_cardinality());
        let capacity = range.num_entries() / 2 + 1;
        let mut left = NumericRange::new(capacity, range.min_val(), split, split_cardinality);
        let mut right = NumericRange::new(capacity, split, range.max_val(), split_cardinality);

        for entry in range.entries() {
            if entry.value < split {
                left.add(entry.doc_id, entry.value, false);
            } else {
                right.add(entry.doc_id, entry.value, false);
            }
        }

        let left_cardinality = range
            .entries()
            .iter()
            .filter(|e| e.value < split)
            .map(|e| normalized_bits(e.value))
            .unique()
            .count();
        left.set_cardinality(left_cardinality);
        right.set_cardinality(range.cardinality().saturating_sub(left_cardinality));

        tracing::debug!(
            split,
            left_entries = left.num_entries(),
            right_entries = right.num_entries(),
            "split numeric range"
        );

        rv.size_delta += (left.entries_size() + right.entries_size()) as i64;
        rv.num_records_delta += range.num_entries() as i32;
        rv.num_allocated_ranges_delta += 2;
        rv.num_ranges_delta += 1;
        rv.changed = true;

        self.value = split;
        self.levels_since_split = 1;
        self.left = Some(Box::new(Self::leaf(left)));
        self.right = Some(Box::new(Self::leaf(right)));
    }
}

/// Pick the value at which `range` splits: the median of its entries, moved
/// just above the smallest entry when the two coincide so that the left side
/// is never empty.
fn split_value(range: &NumericRange) -> Option<f64> {
    let mut values = range.entries().iter().map(|e| e.value).collect::<Vec<_>>();
    let lowest = values.iter().copied().reduce(f64::min)?;

    let mid = values.len() / 2;
    let (_, &mut median, _) = values.select_nth_unstable_by(mid, f64::total_cmp);

    Some(if median == lowest {
        median.next_up()
    } else {
        median
    })
}

/// Bit pattern of `value` with both zeroes mapped to `+0.0`, so that values
/// comparing equal hash equal.
fn normalized_bits(value: f64) -> u64 {
    if value == 0.0 { 0 } else { value.to_bits() }
}

fn growth(before: usize, after: usize) -> i64 {
    after as i64 - before as i64
}
