/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use thiserror::Error;

/// Failures of the numeric index persistence layer.
#[derive(Debug, Error)]
pub enum NumericIndexError {
    /// The persisted data was written by an incompatible encoder.
    #[error("unsupported numeric index encoding version {0}")]
    UnsupportedEncodingVersion(i32),
    /// The host storage failed, or the persisted data is truncated.
    #[error("failed to read or write numeric index data")]
    Io(#[from] std::io::Error),
}
