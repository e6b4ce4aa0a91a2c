/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! ID-list iterator implementation

use crate::{RQEIterator, RQEIteratorError, RSIndexResult, SkipToOutcome, t_docId};

/// An iterator that yields results according to an IDs list given on construction.
#[derive(Debug)]
pub struct IdList {
    /// The list of document IDs to iterate over. Must be sorted and unique.
    ids: Vec<t_docId>,
    /// The current position of the iterator (a.k.a the next document ID to return by `read`).
    offset: usize,
    /// Set once a `read` or `skip_to` ran past the last ID.
    is_eof: bool,
    /// A reusable result object to avoid allocations on each `read` call.
    result: RSIndexResult,
}

impl IdList {
    /// Creates a new ID list iterator. The list of document IDs must be sorted and unique.
    pub fn new(ids: Vec<t_docId>) -> Self {
        Self::new_with_result(ids, RSIndexResult::virt())
    }

    /// Same as [`IdList::new`] but with a custom [`RSIndexResult`],
    /// useful when the consumer expects a non-virtual result.
    pub fn new_with_result(ids: Vec<t_docId>, result: RSIndexResult) -> Self {
        debug_assert!(
            ids.is_sorted_by(|a, b| a < b),
            "IDs must be sorted and unique"
        );
        IdList {
            is_eof: ids.is_empty(),
            ids,
            offset: 0,
            result,
        }
    }

    #[inline(always)]
    fn get_current(&self) -> Option<t_docId> {
        self.ids.get(self.offset).copied()
    }

    /// Position of the next entry to be returned by `read`.
    #[inline(always)]
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

impl RQEIterator for IdList {
    fn current(&mut self) -> Option<&mut RSIndexResult> {
        (self.offset > 0 && !self.is_eof).then_some(&mut self.result)
    }

    fn read(&mut self) -> Result<Option<&mut RSIndexResult>, RQEIteratorError> {
        let Some(doc_id) = self.get_current() else {
            self.is_eof = true;
            return Ok(None);
        };
        self.offset += 1;
        self.result.doc_id = doc_id;
        Ok(Some(&mut self.result))
    }

    fn skip_to(&mut self, doc_id: t_docId) -> Result<Option<SkipToOutcome<'_>>, RQEIteratorError> {
        if self.is_eof || self.ids.last().is_none_or(|&last| last < doc_id) {
            self.offset = self.ids.len(); // Move to EOF
            self.is_eof = true;
            return Ok(None);
        }

        // `partition_point` gives the first element greater than or equal to `doc_id`,
        // whether it is present or not.
        let pos = self.offset + self.ids[self.offset..].partition_point(|&id| id < doc_id);
        let Some(&found) = self.ids.get(pos) else {
            self.offset = self.ids.len();
            self.is_eof = true;
            return Ok(None);
        };
        self.offset = pos + 1;
        self.result.doc_id = found;

        if found == doc_id {
            Ok(Some(SkipToOutcome::Found(&mut self.result)))
        } else {
            Ok(Some(SkipToOutcome::NotFound(&mut self.result)))
        }
    }

    fn rewind(&mut self) {
        self.offset = 0;
        self.is_eof = self.ids.is_empty();
        self.result.doc_id = 0;
    }

    fn num_estimated(&self) -> usize {
        self.ids.len()
    }

    #[inline(always)]
    fn last_doc_id(&self) -> t_docId {
        match self.offset {
            0 => 0,
            _ => self.ids[self.offset - 1],
        }
    }

    #[inline(always)]
    fn at_eof(&self) -> bool {
        self.is_eof
    }
}
