/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use std::ops::Bound;

/// Filter details to apply to numeric values.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericFilter {
    /// Name of the field this filter is acting on.
    pub field_name: String,

    /// Beginning of the range
    pub min: f64,

    /// End of the range
    pub max: f64,

    /// Range includes the min value
    pub min_inclusive: bool,

    /// Range includes the max value
    pub max_inclusive: bool,
}

impl Default for NumericFilter {
    fn default() -> Self {
        Self {
            field_name: String::new(),
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            min_inclusive: true,
            max_inclusive: true,
        }
    }
}

impl NumericFilter {
    /// Create a filter over `[min, max]`, with each end optionally excluded.
    pub fn new(min: f64, max: f64, min_inclusive: bool, max_inclusive: bool) -> Self {
        Self {
            min,
            max,
            min_inclusive,
            max_inclusive,
            ..Default::default()
        }
    }

    /// Create a filter from a pair of [`Bound`]s.
    ///
    /// An unbounded end is mapped to the matching infinity, so `(.., 10.0)`
    /// matches every value up to and including `10.0`.
    pub fn from_bounds(min: Bound<f64>, max: Bound<f64>) -> Self {
        let (min, min_inclusive) = match min {
            Bound::Included(v) => (v, true),
            Bound::Excluded(v) => (v, false),
            Bound::Unbounded => (f64::NEG_INFINITY, true),
        };
        let (max, max_inclusive) = match max {
            Bound::Included(v) => (v, true),
            Bound::Excluded(v) => (v, false),
            Bound::Unbounded => (f64::INFINITY, true),
        };
        Self::new(min, max, min_inclusive, max_inclusive)
    }

    /// Attach the filter to the field called `field_name`.
    pub fn with_field(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = field_name.into();
        self
    }

    /// Check if the given value is in the range specified by this filter
    #[inline(always)]
    pub fn value_in_range(&self, value: f64) -> bool {
        let min_ok = value > self.min || (self.min_inclusive && value == self.min);
        let max_ok = value < self.max || (self.max_inclusive && value == self.max);

        min_ok && max_ok
    }

    /// Whether every value in `[min, max]` passes the filter.
    ///
    /// Only the two ends need checking since the filter is an interval.
    pub fn covers(&self, min: f64, max: f64) -> bool {
        self.value_in_range(min) && self.value_in_range(max)
    }
}
