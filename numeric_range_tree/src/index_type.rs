/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! The numeric index as a storage type: naming, persistence hooks, and the
//! registry of per-field trees.

use std::collections::HashMap;
use std::io;

use crate::rdb::{self, RdbLoad, RdbSave};
use crate::{NumericIndexError, NumericRangeTree, TreeConfig};

/// Key under which the tree of `field_name` in `index_name` is stored.
pub fn numeric_index_key(index_name: &str, field_name: &str) -> String {
    format!("nm:{index_name}/{field_name}")
}

/// Storage type of numeric indexes.
///
/// Every tree created or loaded through the type uses its [`TreeConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericIndexType {
    config: TreeConfig,
}

impl NumericIndexType {
    /// Name under which the type is registered with the host.
    pub const NAME: &'static str = "numericdx";

    /// Encoding version written by [`Self::rdb_save`].
    pub const ENCODING_VERSION: i32 = rdb::ENCODING_VERSION;

    pub const fn new(config: TreeConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Create an empty tree.
    pub fn create(&self) -> NumericRangeTree {
        NumericRangeTree::new(self.config)
    }

    pub fn rdb_save(&self, tree: &NumericRangeTree, rdb: &mut impl RdbSave) -> io::Result<()> {
        rdb::rdb_save(tree, rdb)
    }

    pub fn rdb_load(
        &self,
        rdb: &mut impl RdbLoad,
        encver: i32,
    ) -> Result<NumericRangeTree, NumericIndexError> {
        rdb::rdb_load(rdb, encver, self.config)
    }

    pub fn mem_usage(&self, tree: &NumericRangeTree) -> usize {
        tree.mem_usage()
    }
}

/// Numeric range trees of all indexed fields, by storage key.
#[derive(Debug, Default)]
pub struct NumericIndexRegistry {
    index_type: NumericIndexType,
    trees: HashMap<String, NumericRangeTree>,
}

impl NumericIndexRegistry {
    /// Create an empty registry creating its trees through `index_type`.
    pub fn new(index_type: NumericIndexType) -> Self {
        Self {
            index_type,
            trees: HashMap::new(),
        }
    }

    pub const fn index_type(&self) -> &NumericIndexType {
        &self.index_type
    }

    /// Get the tree of `field_name` in `index_name`, creating it if needed.
    pub fn open_or_create(&mut self, index_name: &str, field_name: &str) -> &mut NumericRangeTree {
        let index_type = self.index_type;
        self.trees
            .entry(numeric_index_key(index_name, field_name))
            .or_insert_with(|| {
                tracing::debug!(index_name, field_name, "creating numeric index");
                index_type.create()
            })
    }

    /// Get the tree of `field_name` in `index_name`, if it exists.
    pub fn get(&self, index_name: &str, field_name: &str) -> Option<&NumericRangeTree> {
        self.trees.get(&numeric_index_key(index_name, field_name))
    }

    /// Register a tree under `key`, e.g. one just loaded from storage.
    ///
    /// Returns the tree previously registered under the same key.
    pub fn insert(&mut self, key: String, tree: NumericRangeTree) -> Option<NumericRangeTree> {
        self.trees.insert(key, tree)
    }

    /// Unregister the tree of `field_name` in `index_name` and return it.
    pub fn remove(&mut self, index_name: &str, field_name: &str) -> Option<NumericRangeTree> {
        self.trees.remove(&numeric_index_key(index_name, field_name))
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Memory used by all registered trees.
    pub fn total_mem_usage(&self) -> usize {
        self.trees
            .values()
            .map(|tree| self.index_type.mem_usage(tree))
            .sum()
    }
}
