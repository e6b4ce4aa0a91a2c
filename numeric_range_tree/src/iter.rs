/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Pre-order traversal of the numeric range tree.
//!
//! Persistence and memory accounting visit every node through this iterator.

use crate::{NumericRangeNode, NumericRangeTree};

/// An iterator that performs a depth-first traversal of a numeric range tree.
///
/// Nodes are visited in pre-order (parent before children), with left
/// children before right children, so leaves come out from the lowest value
/// span to the highest. An explicit stack replaces recursion.
#[derive(Debug)]
pub struct PreOrderDfsIterator<'a> {
    /// Nodes still to visit; the next one is on top.
    stack: Vec<&'a NumericRangeNode>,
}

impl<'a> PreOrderDfsIterator<'a> {
    /// Create a new iterator over the subtree rooted at `node`.
    pub fn new(node: &'a NumericRangeNode) -> Self {
        let mut stack = Vec::with_capacity(4);
        stack.push(node);
        Self { stack }
    }
}

impl<'a> Iterator for PreOrderDfsIterator<'a> {
    type Item = &'a NumericRangeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;

        if let Some((left, right)) = node.children() {
            self.stack.push(right);
            self.stack.push(left);
        }

        Some(node)
    }
}

impl<'a> IntoIterator for &'a NumericRangeTree {
    type Item = &'a NumericRangeNode;
    type IntoIter = PreOrderDfsIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
