use std::collections::TryReserveError;

use thiserror::Error;

/// Errors returned by [`HashTable`](crate::HashTable) operations.
///
/// A missing key is not an error: lookups and removals report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum TableError {
    /// The key is empty. Empty keys are rejected before any probing happens.
    #[error("key must not be empty")]
    EmptyKey,

    /// The key is longer than the configured limit.
    #[error("key of {len} bytes exceeds the limit of {max} bytes")]
    KeyTooLong {
        /// Length of the rejected key in bytes
        len: usize,
        /// Configured maximum key length in bytes
        max: usize,
    },

    /// The slot array could not be allocated. The table keeps its previous storage.
    #[error("failed to allocate {slots} slots")]
    Allocation {
        /// Number of slots requested
        slots: usize,
        /// Allocator error
        #[source]
        source: TryReserveError,
    },

    /// Growing would push the base size past [`MAX_BASE_SIZE`](crate::MAX_BASE_SIZE).
    #[error("base size {0} exceeds the supported maximum")]
    CapacityOverflow(usize),

    /// Every slot on the probe path of the key is occupied by other keys.
    #[error("no free slot on a probe path of {0} slots")]
    ProbeExhausted(usize),

    /// The table configuration was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

/// Result alias for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(TableError::EmptyKey.to_string(), "key must not be empty");
        assert_eq!(
            TableError::KeyTooLong { len: 10, max: 8 }.to_string(),
            "key of 10 bytes exceeds the limit of 8 bytes"
        );
        assert_eq!(
            TableError::InvalidConfig("grow threshold must be in 1..=95").to_string(),
            "invalid configuration: grow threshold must be in 1..=95"
        );
    }

    #[test]
    fn test_allocation_keeps_source() {
        use std::error::Error as _;

        let source = match Vec::<u64>::new().try_reserve_exact(usize::MAX) {
            Err(err) => err,
            Ok(()) => return,
        };
        let err = TableError::Allocation { slots: usize::MAX, source };
        assert!(err.source().is_some());
    }
}
