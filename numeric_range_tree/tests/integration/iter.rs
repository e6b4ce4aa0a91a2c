/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Tests for the pre-order node traversal.

use numeric_range_tree::{NumericRangeNode, NumericRangeTree, PreOrderDfsIterator, TreeConfig};

use crate::helpers::{build_tree, scenario_tree};

#[test]
fn single_leaf() {
    let tree = NumericRangeTree::default();
    let nodes: Vec<_> = tree.iter().collect();
    assert_eq!(nodes.len(), 1);
    assert!(nodes[0].is_leaf());
}

#[test]
fn parent_comes_before_children() {
    let tree = scenario_tree(TreeConfig::default());
    let nodes: Vec<&NumericRangeNode> = (&tree).into_iter().collect();
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[0].split_value(), Some(5.0));
    assert_eq!(nodes[1].range().unwrap().max_val(), 5.0);
    assert_eq!(nodes[2].range().unwrap().min_val(), 5.0);
}

#[test]
fn leaves_come_out_in_value_order() {
    let values: Vec<f64> = (0..400).map(|i| f64::from((i * 31) % 97) - 40.0).collect();
    let tree = build_tree(TreeConfig::default(), &values);

    let leaves: Vec<_> = tree.leaves().collect();
    assert_eq!(leaves.len(), tree.num_ranges());
    for pair in leaves.windows(2) {
        assert!(pair[0].max_val() <= pair[1].min_val());
    }
    assert_eq!(tree.iter().count(), 2 * tree.num_ranges() - 1);
}

#[test]
fn subtree_traversal() {
    let tree = scenario_tree(TreeConfig::default());
    let (_, right) = tree.root().children().unwrap();
    assert_eq!(PreOrderDfsIterator::new(right).count(), 1);
}
