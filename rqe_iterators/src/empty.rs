/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Empty iterator implementation

use crate::{RQEIterator, RQEIteratorError, RSIndexResult, SkipToOutcome, t_docId};

/// An iterator that yields no results.
///
/// The `Empty` iterator is a sentinel iterator that represents an empty result set.
#[derive(Debug, Default)]
pub struct Empty;

impl RQEIterator for Empty {
    fn current(&mut self) -> Option<&mut RSIndexResult> {
        None
    }

    fn read(&mut self) -> Result<Option<&mut RSIndexResult>, RQEIteratorError> {
        Ok(None)
    }

    fn skip_to(&mut self, _doc_id: t_docId) -> Result<Option<SkipToOutcome<'_>>, RQEIteratorError> {
        Ok(None)
    }

    fn rewind(&mut self) {}

    fn num_estimated(&self) -> usize {
        0
    }

    fn last_doc_id(&self) -> t_docId {
        0
    }

    fn at_eof(&self) -> bool {
        true
    }
}
