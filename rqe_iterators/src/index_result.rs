/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! The record type yielded by query iterators.

use crate::t_docId;

/// Payload carried by an [`RSIndexResult`].
#[derive(Debug, Clone, PartialEq)]
pub enum RSResultData {
    /// No payload, only the document ID matters.
    Virtual,
    /// A numeric value stored alongside the document.
    Numeric(f64),
    /// The results of all children of an aggregate iterator that are
    /// positioned on the same document.
    Union(Vec<RSIndexResult>),
}

/// A single hit produced by an iterator.
#[derive(Debug, Clone, PartialEq)]
pub struct RSIndexResult {
    /// The document this hit refers to.
    pub doc_id: t_docId,
    /// The payload of the hit.
    pub data: RSResultData,
}

impl RSIndexResult {
    /// Create a result with no payload.
    pub const fn virt() -> Self {
        Self {
            doc_id: 0,
            data: RSResultData::Virtual,
        }
    }

    /// Create a numeric result holding `value`.
    pub const fn numeric(value: f64) -> Self {
        Self {
            doc_id: 0,
            data: RSResultData::Numeric(value),
        }
    }

    /// Create an empty aggregate result with room for `capacity` children.
    pub fn union(capacity: usize) -> Self {
        Self {
            doc_id: 0,
            data: RSResultData::Union(Vec::with_capacity(capacity)),
        }
    }

    /// Set the document ID of this result.
    pub const fn doc_id(mut self, doc_id: t_docId) -> Self {
        self.doc_id = doc_id;
        self
    }

    /// The numeric value of this result, if it carries one.
    pub fn as_numeric(&self) -> Option<f64> {
        match self.data {
            RSResultData::Numeric(value) => Some(value),
            _ => None,
        }
    }

    /// Overwrite the numeric value. Does nothing for non-numeric results.
    pub fn set_numeric(&mut self, value: f64) {
        if let RSResultData::Numeric(ref mut v) = self.data {
            *v = value;
        }
    }

    /// The children of an aggregate result. Empty for other kinds.
    pub fn children(&self) -> &[RSIndexResult] {
        match &self.data {
            RSResultData::Union(children) => children,
            _ => &[],
        }
    }

    /// Remove all children of an aggregate result, keeping its allocation.
    pub fn reset_aggregate(&mut self) {
        if let RSResultData::Union(children) = &mut self.data {
            children.clear();
        }
    }

    /// Append a copy of `child` to an aggregate result.
    ///
    /// Does nothing for non-aggregate results.
    pub fn push_child(&mut self, child: &RSIndexResult) {
        if let RSResultData::Union(children) = &mut self.data {
            children.push(child.clone());
        }
    }
}
