/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Read path: range queries.
//!
//! Given a query interval `[lo, hi]`, the tree selects a small set of ranges
//! whose union holds every entry with a value inside the interval. The
//! selection may contain entries outside the interval; the range iterators
//! filter those out.
//!
//! Two descents are run from the root. The lower one follows the path of `lo`,
//! the upper one the path of `hi`. Each stops at the first node whose range
//! lies entirely inside the query. Where the two paths part ways, the subtree
//! between them is collected whole.

use super::NumericRangeTree;
use crate::{NumericFilter, NumericRange, NumericRangeNode};

/// How the lower descent ended.
enum LowerDescent {
    /// A single range enclosing the query was found; no more ranges are needed.
    Covered,
    /// The query lies above every stored value.
    Empty,
    /// The upper descent has to run too.
    Partial,
}

impl NumericRangeTree {
    /// Find the ranges covering the values accepted by `filter`.
    ///
    /// Only the filter bounds are used; whether they are inclusive is left to
    /// the range iterators.
    pub fn find<'a>(&'a self, filter: &NumericFilter) -> Vec<&'a NumericRange> {
        self.find_range(filter.min, filter.max)
    }

    /// Find a set of ranges covering every entry with a value in `[min, max]`.
    ///
    /// Each range appears at most once. The order is unspecified.
    pub fn find_range(&self, min: f64, max: f64) -> Vec<&NumericRange> {
        let mut ranges = Vec::with_capacity(8);

        match lower_descent(&self.root, min, max, &mut ranges) {
            LowerDescent::Covered => {}
            LowerDescent::Empty => ranges.clear(),
            LowerDescent::Partial => upper_descent(&self.root, min, max, &mut ranges),
        }

        tracing::trace!(min, max, ranges = ranges.len(), "numeric range cover");
        ranges
    }
}

fn lower_descent<'a>(
    root: &'a NumericRangeNode,
    min: f64,
    max: f64,
    ranges: &mut Vec<&'a NumericRange>,
) -> LowerDescent {
    let mut node = root;
    loop {
        if node.range().is_some_and(|r| r.contains(min, max)) {
            push_range(ranges, tightest_cover(node, min, max));
            return LowerDescent::Covered;
        }
        if let Some(range) = node.range()
            && range.within(min, max)
        {
            push_range(ranges, Some(range));
            return LowerDescent::Partial;
        }

        match (node.children(), node.split_value()) {
            (Some((left, right)), Some(split)) => {
                if min < split {
                    if split <= max {
                        collect(right, min, max, ranges);
                    }
                    node = left;
                } else {
                    node = right;
                }
            }
            _ => {
                return match node.range() {
                    Some(range) if range.max_val() >= min => {
                        push_range(ranges, Some(range));
                        LowerDescent::Partial
                    }
                    _ => LowerDescent::Empty,
                };
            }
        }
    }
}

/// Walk down from `node`, whose range contains the query, as long as a child
/// range still does.
fn tightest_cover(mut node: &NumericRangeNode, min: f64, max: f64) -> Option<&NumericRange> {
    while let Some((left, right)) = node.children() {
        if left.range().is_some_and(|r| r.contains(min, max)) {
            node = left;
        } else if right.range().is_some_and(|r| r.contains(min, max)) {
            node = right;
        } else {
            break;
        }
    }
    node.range()
}

fn upper_descent<'a>(
    root: &'a NumericRangeNode,
    min: f64,
    max: f64,
    ranges: &mut Vec<&'a NumericRange>,
) {
    let mut node = root;
    loop {
        if let Some(range) = node.range()
            && range.within(min, max)
        {
            push_range(ranges, Some(range));
            return;
        }

        match (node.children(), node.split_value()) {
            (Some((left, right)), Some(split)) => {
                if max < split {
                    node = left;
                } else {
                    if min < split {
                        collect(left, min, max, ranges);
                    }
                    node = right;
                }
            }
            _ => {
                if let Some(range) = node.range()
                    && range.min_val() <= max
                {
                    push_range(ranges, Some(range));
                }
                return;
            }
        }
    }
}

/// Collect the ranges of a subtree that may hold values in `[min, max]`,
/// stopping at ranges that lie entirely inside the query.
fn collect<'a>(node: &'a NumericRangeNode, min: f64, max: f64, ranges: &mut Vec<&'a NumericRange>) {
    if let Some(range) = node.range()
        && range.within(min, max)
    {
        push_range(ranges, Some(range));
        return;
    }

    match node.children() {
        Some((left, right)) => {
            collect(left, min, max, ranges);
            collect(right, min, max, ranges);
        }
        None => {
            if let Some(range) = node.range()
                && range.overlaps(min, max)
            {
                push_range(ranges, Some(range));
            }
        }
    }
}

fn push_range<'a>(ranges: &mut Vec<&'a NumericRange>, range: Option<&'a NumericRange>) {
    if let Some(range) = range
        && !ranges.iter().any(|r| std::ptr::eq(*r, range))
    {
        ranges.push(range);
    }
}
