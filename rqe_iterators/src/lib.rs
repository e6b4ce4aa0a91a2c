/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Query iterators over posting lists.
//!
//! Every iterator implements [`RQEIterator`]: a forward-only cursor over
//! document IDs with `read` and `skip_to` operations. Iterators of different
//! kinds can be combined, e.g. by a [`Union`], as long as they agree on this
//! contract.

use thiserror::Error;

pub mod empty;
pub mod id_list;
mod index_result;
pub mod union;

pub use empty::Empty;
pub use id_list::IdList;
pub use index_result::{RSIndexResult, RSResultData};
pub use union::Union;

/// Document identifier.
///
/// IDs are assigned in increasing order by the indexing pipeline. `0` is never
/// assigned to a document and stands for "nothing read yet".
#[allow(non_camel_case_types)]
pub type t_docId = u64;

#[derive(Debug, PartialEq)]
/// The outcome of [`RQEIterator::skip_to`].
pub enum SkipToOutcome<'iterator> {
    /// The iterator has a valid entry for the requested `doc_id`.
    Found(&'iterator mut RSIndexResult),

    /// The iterator doesn't have an entry for the requested `doc_id`, but there are entries
    /// with an id greater than the requested one.
    NotFound(&'iterator mut RSIndexResult),
}

impl SkipToOutcome<'_> {
    /// The result the iterator is positioned on after the skip.
    pub fn result(&self) -> &RSIndexResult {
        match self {
            Self::Found(result) | Self::NotFound(result) => result,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
/// An iterator failure indication.
pub enum RQEIteratorError {
    /// The iterator has reached the time limit for execution.
    #[error("reached time limit")]
    TimedOut,
}

pub trait RQEIterator {
    /// Return the current [`RSIndexResult`] stored within this [`RQEIterator`].
    ///
    /// Calls to `read` and `skip_to` also return this reference. Returns `None`
    /// before the first read and once the iterator is at EOF.
    fn current(&mut self) -> Option<&mut RSIndexResult>;

    /// Read the next entry from the iterator.
    ///
    /// On a successful read, the iterator must set its `last_doc_id` property to the new
    /// current result id. This function returns Ok with the current result for valid results,
    /// or None if the iterator is depleted.
    fn read(&mut self) -> Result<Option<&mut RSIndexResult>, RQEIteratorError>;

    /// Skip to the next record in the iterator with an ID greater or equal to the given `doc_id`.
    ///
    /// Skipping never moves the iterator backwards: if `doc_id` is not greater
    /// than [`RQEIterator::last_doc_id`], the iterator simply yields its next entry.
    ///
    /// Return `Ok(SkipToOutcome::Found)` if the iterator has found a record with the `doc_id`
    /// and `Ok(SkipToOutcome::NotFound)` if the iterator found a result greater than `doc_id`.
    /// `None` will be returned if the iterator has reached the end of the index, including
    /// when it has already yielded the largest possible `doc_id`.
    fn skip_to(&mut self, doc_id: t_docId) -> Result<Option<SkipToOutcome<'_>>, RQEIteratorError>;

    /// Rewind the iterator to the beginning and reset its properties.
    fn rewind(&mut self);

    /// Returns an upper-bound estimation for the number of results the iterator is going to yield.
    fn num_estimated(&self) -> usize;

    /**************** properties ****************/

    /// Returns the last doc id that was read or skipped to.
    fn last_doc_id(&self) -> t_docId;

    /// Returns `true` once the iterator cannot yield more results.
    fn at_eof(&self) -> bool;

    /// Returns `true` while the iterator may yield more results.
    fn has_next(&self) -> bool {
        !self.at_eof()
    }
}

impl<I: RQEIterator + ?Sized> RQEIterator for Box<I> {
    #[inline(always)]
    fn current(&mut self) -> Option<&mut RSIndexResult> {
        (**self).current()
    }

    #[inline(always)]
    fn read(&mut self) -> Result<Option<&mut RSIndexResult>, RQEIteratorError> {
        (**self).read()
    }

    #[inline(always)]
    fn skip_to(&mut self, doc_id: t_docId) -> Result<Option<SkipToOutcome<'_>>, RQEIteratorError> {
        (**self).skip_to(doc_id)
    }

    fn rewind(&mut self) {
        (**self).rewind()
    }

    fn num_estimated(&self) -> usize {
        (**self).num_estimated()
    }

    #[inline(always)]
    fn last_doc_id(&self) -> t_docId {
        (**self).last_doc_id()
    }

    #[inline(always)]
    fn at_eof(&self) -> bool {
        (**self).at_eof()
    }
}
