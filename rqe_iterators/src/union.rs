/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Union iterator implementation

use crate::{RQEIterator, RQEIteratorError, RSIndexResult, SkipToOutcome, t_docId};

/// Yields documents appearing in ANY child iterator using a merge (OR) algorithm.
///
/// Children are merged by document ID, not concatenated: each distinct ID is
/// yielded exactly once, in increasing order, even when several children (or
/// several consecutive entries of the same child) hold it. The results of all
/// children positioned on the yielded ID are aggregated into a single
/// [`RSIndexResult`].
///
/// # Algorithm
///
/// The iterator maintains all children and on each `read`:
/// 1. Advances the children that were positioned on the previously yielded ID
/// 2. Finds the minimum `last_doc_id` across all non-EOF children
/// 3. Collects results from all children matching that minimum
#[derive(Debug)]
pub struct Union<I> {
    /// Child iterators.
    children: Vec<I>,
    /// Last doc_id successfully yielded (returned by `last_doc_id()`).
    last_doc_id: t_docId,
    /// Sum of all children's estimated counts (upper bound).
    num_estimated: usize,
    /// Whether the children have been positioned on their first entry.
    started: bool,
    /// Whether the iterator has reached EOF (all children exhausted).
    is_eof: bool,
    /// Aggregate result combining children's results, reused to avoid allocations.
    result: RSIndexResult,
}

impl<I> Union<I>
where
    I: RQEIterator,
{
    /// Creates a new union iterator. If `children` is empty, returns an iterator
    /// immediately at EOF.
    #[must_use]
    pub fn new(children: Vec<I>) -> Self {
        let num_estimated = children.iter().map(|c| c.num_estimated()).sum();
        let num_children = children.len();

        Self {
            is_eof: children.is_empty(),
            children,
            last_doc_id: 0,
            num_estimated,
            started: false,
            result: RSIndexResult::union(num_children),
        }
    }

    /// Number of child iterators.
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Shared access to the child iterators.
    pub fn children(&self) -> &[I] {
        &self.children
    }

    /// Finds the minimum doc_id among all non-EOF children.
    /// Returns `None` if all children are at EOF.
    fn find_min_doc_id(&self) -> Option<t_docId> {
        self.children
            .iter()
            .filter(|c| !c.at_eof())
            .map(|c| c.last_doc_id())
            .min()
    }

    /// Performs the initial read on all children to position them at their first document.
    fn initialize_children(&mut self) -> Result<(), RQEIteratorError> {
        for child in &mut self.children {
            if !child.at_eof() {
                let _ = child.read()?;
            }
        }
        self.started = true;
        Ok(())
    }

    /// Advances all children positioned on `current_id` until they move past it.
    fn advance_matching_children(&mut self, current_id: t_docId) -> Result<(), RQEIteratorError> {
        for child in &mut self.children {
            while !child.at_eof() && child.last_doc_id() == current_id {
                let _ = child.read()?;
            }
        }
        Ok(())
    }

    /// Builds the aggregate result from all children whose current doc_id equals `min_id`.
    fn build_aggregate_result(&mut self, min_id: t_docId) {
        self.last_doc_id = min_id;
        self.result.reset_aggregate();
        self.result.doc_id = min_id;

        for child in &mut self.children {
            if !child.at_eof()
                && child.last_doc_id() == min_id
                && let Some(child_result) = child.current()
            {
                self.result.push_child(child_result);
            }
        }
    }

    /// Position on the smallest ID held by any child, or move to EOF.
    fn settle(&mut self) -> Option<t_docId> {
        match self.find_min_doc_id() {
            Some(min_id) => {
                self.build_aggregate_result(min_id);
                Some(min_id)
            }
            None => {
                self.is_eof = true;
                None
            }
        }
    }
}

impl<I> RQEIterator for Union<I>
where
    I: RQEIterator,
{
    #[inline]
    fn current(&mut self) -> Option<&mut RSIndexResult> {
        (self.started && !self.is_eof).then_some(&mut self.result)
    }

    fn read(&mut self) -> Result<Option<&mut RSIndexResult>, RQEIteratorError> {
        if self.is_eof {
            return Ok(None);
        }

        if self.started {
            self.advance_matching_children(self.last_doc_id)?;
        } else {
            self.initialize_children()?;
        }

        Ok(self.settle().map(|_| &mut self.result))
    }

    fn skip_to(&mut self, doc_id: t_docId) -> Result<Option<SkipToOutcome<'_>>, RQEIteratorError> {
        if self.is_eof {
            return Ok(None);
        }

        // Never move backwards: a target at or below the current position
        // means "the next document".
        let target = if self.started {
            match self.last_doc_id.checked_add(1) {
                Some(next) => doc_id.max(next),
                // Already returned the largest possible id.
                None => {
                    self.is_eof = true;
                    return Ok(None);
                }
            }
        } else {
            doc_id
        };
        self.started = true;

        for child in &mut self.children {
            // Only skip if the child is behind the target
            if !child.at_eof() && (child.last_doc_id() < target || child.current().is_none()) {
                let _ = child.skip_to(target)?;
            }
        }

        match self.settle() {
            Some(min_id) if min_id == doc_id => Ok(Some(SkipToOutcome::Found(&mut self.result))),
            Some(_) => Ok(Some(SkipToOutcome::NotFound(&mut self.result))),
            None => Ok(None),
        }
    }

    fn rewind(&mut self) {
        self.last_doc_id = 0;
        self.result.doc_id = 0;
        self.result.reset_aggregate();
        self.started = false;
        self.is_eof = self.children.is_empty();
        self.children.iter_mut().for_each(|c| c.rewind());
    }

    #[inline(always)]
    fn num_estimated(&self) -> usize {
        self.num_estimated
    }

    #[inline(always)]
    fn last_doc_id(&self) -> t_docId {
        self.last_doc_id
    }

    #[inline(always)]
    fn at_eof(&self) -> bool {
        self.is_eof
    }
}
