/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Persistence of numeric range trees.
//!
//! A tree is saved as its number of entries followed by the `(doc_id, value)`
//! pair of every entry held by a leaf, leaves taken from the lowest values to
//! the highest. Retained ranges and the tree shape are not saved: loading
//! re-inserts the pairs in doc-id order and the tree grows again from there.

use std::io::{self, Read, Write};

use rqe_iterators::t_docId;

use crate::{NumericIndexError, NumericRangeEntry, NumericRangeTree, TreeConfig};

/// The only encoding version understood by [`rdb_load`].
pub const ENCODING_VERSION: i32 = 0;

/// Sink for persisted tree data.
pub trait RdbSave {
    fn save_unsigned(&mut self, value: u64) -> io::Result<()>;
    fn save_double(&mut self, value: f64) -> io::Result<()>;
}

/// Source of persisted tree data.
pub trait RdbLoad {
    fn load_unsigned(&mut self) -> io::Result<u64>;
    fn load_double(&mut self) -> io::Result<f64>;
}

/// Writes every word as 8 little-endian bytes.
impl<W: Write> RdbSave for W {
    fn save_unsigned(&mut self, value: u64) -> io::Result<()> {
        self.write_all(&value.to_le_bytes())
    }

    fn save_double(&mut self, value: f64) -> io::Result<()> {
        self.write_all(&value.to_le_bytes())
    }
}

/// Reads every word as 8 little-endian bytes.
impl<R: Read> RdbLoad for R {
    fn load_unsigned(&mut self) -> io::Result<u64> {
        let mut buf = [0; 8];
        self.read_exact(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    fn load_double(&mut self) -> io::Result<f64> {
        let mut buf = [0; 8];
        self.read_exact(&mut buf)?;
        Ok(f64::from_le_bytes(buf))
    }
}

/// Save the entries of `tree` to `rdb`.
pub fn rdb_save(tree: &NumericRangeTree, rdb: &mut impl RdbSave) -> io::Result<()> {
    rdb.save_unsigned(tree.num_entries() as u64)?;
    for range in tree.leaves() {
        for entry in range.entries() {
            rdb.save_unsigned(entry.doc_id)?;
            rdb.save_double(entry.value)?;
        }
    }
    Ok(())
}

/// Load a tree saved by [`rdb_save`] with encoding version `encver`.
///
/// The entries are sorted by doc-id before being re-inserted into a new tree
/// built with `config`. Entries of the same document keep their saved order.
pub fn rdb_load(
    rdb: &mut impl RdbLoad,
    encver: i32,
    config: TreeConfig,
) -> Result<NumericRangeTree, NumericIndexError> {
    if encver != ENCODING_VERSION {
        return Err(NumericIndexError::UnsupportedEncodingVersion(encver));
    }

    let num_entries = rdb.load_unsigned()?;
    // The count comes from storage; don't trust it for the allocation.
    let mut entries = Vec::with_capacity(num_entries.min(1 << 16) as usize);
    for _ in 0..num_entries {
        let doc_id: t_docId = rdb.load_unsigned()?;
        let value = rdb.load_double()?;
        entries.push(NumericRangeEntry { doc_id, value });
    }
    entries.sort_by_key(|e| e.doc_id);

    let mut tree = NumericRangeTree::new(config);
    for entry in &entries {
        tree.add(entry.doc_id, entry.value);
    }

    tracing::debug!(
        entries = tree.num_entries(),
        ranges = tree.num_ranges(),
        "loaded numeric range tree"
    );
    Ok(tree)
}
