/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Query-time iterators over the ranges of a numeric range tree.

use rqe_iterators::{RQEIterator, RQEIteratorError, RSIndexResult, SkipToOutcome, Union, t_docId};

use crate::{NumericFilter, NumericRange, NumericRangeTree};

/// Iterator over the entries of a single [`NumericRange`].
///
/// Entries are yielded in insertion order, which is doc-id order. A document
/// with several values in the range is yielded once.
///
/// With a filter, entries whose value falls outside of it are skipped. The
/// check is only performed when the span of the range is not entirely
/// accepted by the filter.
#[derive(Debug)]
pub struct NumericRangeIterator<'index> {
    range: &'index NumericRange,
    /// Filter applied to every entry, if the range is not covered by it.
    filter: Option<&'index NumericFilter>,
    /// Position of the next entry to be considered by `read`.
    offset: usize,
    /// Whether an entry was yielded since the last rewind.
    started: bool,
    /// Set once a `read` or `skip_to` ran past the last matching entry.
    is_eof: bool,
    /// A reusable result object to avoid allocations on each `read` call.
    result: RSIndexResult,
}

impl<'index> NumericRangeIterator<'index> {
    /// Creates an iterator over every entry of `range`.
    pub fn new(range: &'index NumericRange) -> Self {
        Self {
            range,
            filter: None,
            offset: 0,
            started: false,
            is_eof: range.is_empty(),
            result: RSIndexResult::numeric(0.0),
        }
    }

    /// Creates an iterator over the entries of `range` accepted by `filter`.
    pub fn with_filter(range: &'index NumericRange, filter: &'index NumericFilter) -> Self {
        let mut it = Self::new(range);
        if !filter.covers(range.min_val(), range.max_val()) {
            it.filter = Some(filter);
        }
        it
    }

    /// The range being iterated.
    pub const fn range(&self) -> &'index NumericRange {
        self.range
    }

    /// Whether entries are checked against the filter.
    pub const fn is_filtered(&self) -> bool {
        self.filter.is_some()
    }
}

impl RQEIterator for NumericRangeIterator<'_> {
    fn current(&mut self) -> Option<&mut RSIndexResult> {
        (self.started && !self.is_eof).then_some(&mut self.result)
    }

    fn read(&mut self) -> Result<Option<&mut RSIndexResult>, RQEIteratorError> {
        if self.is_eof {
            return Ok(None);
        }

        let entries = self.range.entries();
        while let Some(entry) = entries.get(self.offset) {
            self.offset += 1;

            if self.started && entry.doc_id == self.result.doc_id {
                continue;
            }
            if self.filter.is_some_and(|f| !f.value_in_range(entry.value)) {
                continue;
            }

            self.started = true;
            self.result.doc_id = entry.doc_id;
            self.result.set_numeric(entry.value);
            return Ok(Some(&mut self.result));
        }

        self.is_eof = true;
        Ok(None)
    }

    fn skip_to(&mut self, doc_id: t_docId) -> Result<Option<SkipToOutcome<'_>>, RQEIteratorError> {
        if self.is_eof {
            return Ok(None);
        }

        // Never move backwards, nor land on the document already returned.
        let target = if self.started {
            self.result.doc_id.checked_add(1).map(|next| doc_id.max(next))
        } else {
            Some(doc_id)
        };

        let entries = self.range.entries();
        let Some(target) = target.filter(|&t| entries.last().is_some_and(|e| e.doc_id >= t)) else {
            self.offset = entries.len();
            self.is_eof = true;
            return Ok(None);
        };
        self.offset += entries[self.offset..].partition_point(|e| e.doc_id < target);

        Ok(self.read()?.map(|result| {
            if result.doc_id == doc_id {
                SkipToOutcome::Found(result)
            } else {
                SkipToOutcome::NotFound(result)
            }
        }))
    }

    fn rewind(&mut self) {
        self.offset = 0;
        self.started = false;
        self.is_eof = self.range.is_empty();
        self.result.doc_id = 0;
    }

    fn num_estimated(&self) -> usize {
        self.range.num_entries()
    }

    fn last_doc_id(&self) -> t_docId {
        if self.started { self.result.doc_id } else { 0 }
    }

    fn at_eof(&self) -> bool {
        self.is_eof
    }
}

/// Doc-id ordered merge of the ranges matching a numeric filter.
pub type NumericFilterIterator<'index> = Union<NumericRangeIterator<'index>>;

/// Build an iterator over the documents of `tree` accepted by `filter`.
///
/// The covering ranges of the filter are each read by a
/// [`NumericRangeIterator`], and their results are merged in doc-id order.
/// When no range covers the filter, the returned iterator is immediately at
/// EOF.
pub fn new_numeric_filter_iterator<'index>(
    tree: &'index NumericRangeTree,
    filter: &'index NumericFilter,
) -> NumericFilterIterator<'index> {
    let children = tree
        .find(filter)
        .into_iter()
        .map(|range| NumericRangeIterator::with_filter(range, filter))
        .collect();
    Union::new(children)
}
