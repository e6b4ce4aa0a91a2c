/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Tests for insertion, splitting, and the statistics of the tree.

use numeric_range_tree::{NumericRangeTree, TreeConfig};
use rstest::rstest;

use crate::helpers::{build_tree, scenario_tree};

#[test]
fn new_tree_has_an_empty_root_leaf() {
    let tree = NumericRangeTree::default();
    let root = tree.root();
    assert!(root.is_leaf());
    let range = root.range().unwrap();
    assert!(range.is_empty());
    assert_eq!((range.min_val(), range.max_val()), (0.0, 0.0));
    assert_eq!(tree.num_ranges(), 1);
    assert_eq!(tree.num_entries(), 0);
}

#[test]
fn split_happens_exactly_at_the_threshold() {
    let config = TreeConfig::default().with_split_cardinality(4);
    let mut tree = NumericRangeTree::new(config);

    for (doc_id, value) in [(1, 5.0), (2, 1.0), (3, 1.0), (4, 9.0)] {
        let rv = tree.add(doc_id, value);
        assert!(!rv.changed, "split before the fourth distinct value");
    }
    assert_eq!(tree.num_ranges(), 1);

    let rv = tree.add(5, 3.0);
    assert!(rv.changed);
    assert_eq!(rv.num_ranges_delta, 1);
    assert_eq!(tree.num_ranges(), 2);
}

#[test]
fn split_redistributes_entries_without_loss() {
    let tree = build_tree(TreeConfig::default().with_split_cardinality(4), &[5.0, 1.0, 9.0, 3.0]);
    let root = tree.root();
    assert_eq!(root.split_value(), Some(5.0));

    let (left, right) = root.children().unwrap();
    let (left, right) = (left.range().unwrap(), right.range().unwrap());
    assert_eq!((left.min_val(), left.max_val()), (0.0, 5.0));
    assert_eq!((right.min_val(), right.max_val()), (5.0, 9.0));

    let mut children: Vec<_> = left.entries().iter().chain(right.entries()).copied().collect();
    children.sort_by_key(|e| e.doc_id);
    assert_eq!(children, root.range().unwrap().entries());

    assert_eq!(left.cardinality() + right.cardinality(), 4);
    assert_eq!(left.split_cardinality(), 9);
}

#[test]
fn scenario_tree_shape() {
    let tree = scenario_tree(TreeConfig::default());
    assert_eq!(tree.num_entries(), 10);
    assert_eq!(tree.num_ranges(), 2);

    let root = tree.root();
    assert_eq!(root.levels_since_split(), 1);
    assert_eq!(root.range().unwrap().num_entries(), 10);

    let (left, right) = root.children().unwrap();
    let left_values: Vec<_> = left.range().unwrap().entries().iter().map(|e| e.value).collect();
    let right_values: Vec<_> = right.range().unwrap().entries().iter().map(|e| e.value).collect();
    assert_eq!(left_values, [1.0, 3.0, 2.0, 4.0, 0.0]);
    assert_eq!(right_values, [5.0, 9.0, 7.0, 8.0, 6.0]);
}

#[test]
fn retained_range_is_released_after_deep_splits() {
    let values: Vec<f64> = (0..200).map(f64::from).collect();
    let tree = build_tree(TreeConfig::default(), &values);

    let root = tree.root();
    assert!(root.levels_since_split() > TreeConfig::DEFAULT_MAX_RETAINED_DEPTH);
    assert!(root.range().is_none());
}

#[rstest]
#[case::never_retain(0)]
#[case::default(2)]
#[case::keep_longer(5)]
fn retained_ranges_respect_the_window(#[case] max_retained_depth: u32) {
    let values: Vec<f64> = (0..300).map(|i| f64::from((i * 37) % 101)).collect();
    let config = TreeConfig::default().with_max_retained_depth(max_retained_depth);
    let tree = build_tree(config, &values);

    for node in &tree {
        if !node.is_leaf() && node.range().is_some() {
            assert!(node.levels_since_split() <= max_retained_depth);
        }
        if node.levels_since_split() > max_retained_depth {
            assert!(node.range().is_none());
        }
    }
}

#[test]
fn nan_is_not_indexed() {
    let mut tree = NumericRangeTree::default();
    tree.add(1, 1.0);
    let rv = tree.add(2, f64::NAN);
    assert_eq!(rv, Default::default());
    assert_eq!(tree.num_entries(), 1);
    assert_eq!(tree.last_doc_id(), 1);
}

#[test]
fn multi_value_documents_reuse_the_doc_id() {
    let mut tree = NumericRangeTree::default();
    tree.add(1, 1.0);
    tree.add(1, 2.0);
    tree.add(2, 3.0);
    assert_eq!(tree.num_entries(), 3);
    assert_eq!(tree.last_doc_id(), 2);
}

#[test]
fn duplicate_values_never_split() {
    let mut tree = NumericRangeTree::default();
    for doc_id in 1..=1000 {
        tree.add(doc_id, 42.0);
    }
    assert_eq!(tree.num_ranges(), 1);
    assert_eq!(tree.root().range().unwrap().cardinality(), 1);
}

#[test]
fn memory_usage_accounts_for_entries() {
    let mut tree = NumericRangeTree::default();
    let empty = tree.mem_usage();
    for doc_id in 1..=100 {
        tree.add(doc_id, doc_id as f64);
    }
    assert!(tree.mem_usage() > empty + tree.num_entries() * size_of::<f64>());

    let by_node: usize = tree.iter().map(|node| node.mem_usage()).sum();
    assert_eq!(tree.mem_usage(), size_of::<NumericRangeTree>() + by_node);
}
