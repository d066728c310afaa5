//! Load factor thresholds and the base-size arithmetic of growing and shrinking.

use crate::{
    config::{MAX_BASE_SIZE, TableConfig},
    error::{Result, TableError},
};

/// Decides when a table changes size and what its next base size is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResizePolicy {
    /// Load factor percentage at or above which the table grows
    grow_threshold: usize,
    /// Load factor percentage at or below which the table shrinks
    shrink_threshold: usize,
    /// Base size the table never shrinks below
    min_base_size: usize,
}

impl ResizePolicy {
    /// Builds the policy described by `config`.
    pub(crate) const fn from_config(config: &TableConfig) -> Self {
        Self {
            grow_threshold: config.grow_threshold(),
            shrink_threshold: config.shrink_threshold(),
            min_base_size: config.initial_base_size(),
        }
    }

    /// Returns true if `count` entries in `size` slots reach the grow threshold.
    pub(crate) fn should_grow(&self, count: usize, size: usize) -> bool {
        percent_of(count) >= scaled(self.grow_threshold, size)
    }

    /// Returns true if `count` entries in `size` slots are at or below the shrink threshold.
    pub(crate) fn should_shrink(&self, count: usize, size: usize) -> bool {
        percent_of(count) <= scaled(self.shrink_threshold, size)
    }

    /// Base size after growing from `base_size`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::CapacityOverflow`] past [`MAX_BASE_SIZE`].
    #[allow(clippy::unused_self)]
    pub(crate) fn grown(&self, base_size: usize) -> Result<usize> {
        match base_size.checked_mul(2) {
            Some(grown) if grown <= MAX_BASE_SIZE => Ok(grown),
            _ => Err(TableError::CapacityOverflow(base_size)),
        }
    }

    /// Base size after shrinking from `base_size`, or `None` if that would cross the floor.
    pub(crate) const fn shrunk(&self, base_size: usize) -> Option<usize> {
        let shrunk = base_size / 2;
        if shrunk < self.min_base_size { None } else { Some(shrunk) }
    }
}

/// `count * 100`, widened so it cannot overflow.
fn percent_of(count: usize) -> u128 {
    (count as u128).saturating_mul(100)
}

/// `threshold * size`, widened so it cannot overflow.
fn scaled(threshold: usize, size: usize) -> u128 {
    (threshold as u128).saturating_mul(size as u128)
}
