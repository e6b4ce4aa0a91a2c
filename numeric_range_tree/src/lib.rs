/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! NumericRangeTree - A binary tree with adaptive range bucketing.
//!
//! This crate provides a data structure for indexing numeric values against
//! document IDs so that range queries can be answered without scanning every
//! document. Each leaf holds a [`NumericRange`]: a growable bucket of
//! `(doc_id, value)` entries with its min/max span and the number of distinct
//! values it has seen. Once a leaf accumulates enough distinct values it splits
//! at its median, and the split threshold of the new leaves grows with depth.
//!
//! # Overview
//!
//! - [`NumericRangeTree::add`] routes an entry to its leaf, splitting on the way.
//! - [`NumericRangeTree::find`] selects a small set of buckets covering a query.
//! - [`NumericRangeIterator`] reads one bucket, honouring the [`NumericFilter`]
//!   at the edges of the query.
//! - [`new_numeric_filter_iterator`] merges the per-bucket iterators into a
//!   single doc-id ordered stream.
//! - [`rdb`] saves and loads a tree, [`NumericIndexType`] and
//!   [`NumericIndexRegistry`] tie trees to index fields.
//!
//! # Example
//!
//! ```
//! use numeric_range_tree::{NumericFilter, NumericRangeTree, new_numeric_filter_iterator};
//! use rqe_iterators::RQEIterator;
//!
//! let mut tree = NumericRangeTree::default();
//!
//! tree.add(1, 10.0);
//! tree.add(2, 20.0);
//! tree.add(3, 15.0);
//!
//! let filter = NumericFilter::new(10.0, 15.0, true, true);
//! let mut it = new_numeric_filter_iterator(&tree, &filter);
//!
//! let mut docs = Vec::new();
//! while let Some(result) = it.read().unwrap() {
//!     docs.push(result.doc_id);
//! }
//! assert_eq!(docs, [1, 3]);
//! ```

mod config;
mod error;
mod filter;
mod index_type;
mod iter;
mod iterator;
mod node;
mod range;
pub mod rdb;
mod tree;

pub use config::TreeConfig;
pub use error::NumericIndexError;
pub use filter::NumericFilter;
pub use index_type::{NumericIndexRegistry, NumericIndexType, numeric_index_key};
pub use iter::PreOrderDfsIterator;
pub use iterator::{NumericFilterIterator, NumericRangeIterator, new_numeric_filter_iterator};
pub use node::NumericRangeNode;
pub use range::{NumericRange, NumericRangeEntry};
pub use tree::{AddResult, NumericRangeTree};
