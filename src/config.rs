//! Construction-time parameters of a [`HashTable`](crate::HashTable).

use crate::{
    error::{Result, TableError},
    hash::{HASH_PRIME_A, HASH_PRIME_B},
    prime::{Primality, is_prime},
};

/// Default logical size of a new table, rounded up to the prime 53.
pub const DEFAULT_INITIAL_BASE_SIZE: usize = 50;
/// Default load factor (percent) at or above which an insert grows the table.
pub const DEFAULT_GROW_THRESHOLD: usize = 70;
/// Default load factor (percent) at or below which a delete shrinks the table.
pub const DEFAULT_SHRINK_THRESHOLD: usize = 10;
/// Default upper bound on key length, in bytes.
pub const DEFAULT_MAX_KEY_LEN: usize = 64 * 1024;
/// Largest base size a table can reach.
pub const MAX_BASE_SIZE: usize = usize::MAX >> 8;

/// Hash bases must exceed the ASCII alphabet to avoid systematic collisions.
const ALPHABET_SIZE: usize = 128;

/// Tunables of a hash table.
///
/// ```rust
/// use primehash::{HashTable, TableConfig};
///
/// let config = TableConfig::new().with_initial_base_size(100).with_grow_threshold(60);
/// let table = HashTable::with_config(config)?;
/// assert_eq!(table.size(), 101);
/// # Ok::<(), primehash::TableError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableConfig {
    /// Base size of a new table, also the floor for shrinking
    initial_base_size: usize,
    /// Load factor percentage that triggers growth before an insert
    grow_threshold: usize,
    /// Load factor percentage that triggers shrinking after a delete
    shrink_threshold: usize,
    /// Base of the hash choosing the first slot
    hash_prime_a: usize,
    /// Base of the hash choosing the probe step
    hash_prime_b: usize,
    /// Longest accepted key in bytes
    max_key_len: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TableConfig {
    /// Creates the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            initial_base_size: DEFAULT_INITIAL_BASE_SIZE,
            grow_threshold: DEFAULT_GROW_THRESHOLD,
            shrink_threshold: DEFAULT_SHRINK_THRESHOLD,
            hash_prime_a: HASH_PRIME_A,
            hash_prime_b: HASH_PRIME_B,
            max_key_len: DEFAULT_MAX_KEY_LEN,
        }
    }

    /// Sets the base size of a new table. The table never shrinks below it.
    #[must_use]
    pub const fn with_initial_base_size(mut self, base_size: usize) -> Self {
        self.initial_base_size = base_size;
        self
    }

    /// Sets the grow threshold, as a load factor percentage.
    #[must_use]
    pub const fn with_grow_threshold(mut self, percent: usize) -> Self {
        self.grow_threshold = percent;
        self
    }

    /// Sets the shrink threshold, as a load factor percentage.
    #[must_use]
    pub const fn with_shrink_threshold(mut self, percent: usize) -> Self {
        self.shrink_threshold = percent;
        self
    }

    /// Sets the two bases of the double hash.
    #[must_use]
    pub const fn with_hash_primes(mut self, prime_a: usize, prime_b: usize) -> Self {
        self.hash_prime_a = prime_a;
        self.hash_prime_b = prime_b;
        self
    }

    /// Sets the longest accepted key, in bytes.
    #[must_use]
    pub const fn with_max_key_len(mut self, max_key_len: usize) -> Self {
        self.max_key_len = max_key_len;
        self
    }

    /// Returns the base size of a new table, also the shrink floor
    #[must_use]
    pub const fn initial_base_size(&self) -> usize {
        self.initial_base_size
    }

    /// Returns the grow threshold as a load factor percentage
    #[must_use]
    pub const fn grow_threshold(&self) -> usize {
        self.grow_threshold
    }

    /// Returns the shrink threshold as a load factor percentage
    #[must_use]
    pub const fn shrink_threshold(&self) -> usize {
        self.shrink_threshold
    }

    /// Returns the bases of the primary and secondary hash
    #[must_use]
    pub const fn hash_primes(&self) -> (usize, usize) {
        (self.hash_prime_a, self.hash_prime_b)
    }

    /// Returns the longest accepted key, in bytes
    #[must_use]
    pub const fn max_key_len(&self) -> usize {
        self.max_key_len
    }

    /// Checks that the configuration describes a usable table.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidConfig`] naming the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        // Base 1 rounds up to 2 slots, the same prime its first grow would land on
        if self.initial_base_size < 2 || self.initial_base_size > MAX_BASE_SIZE {
            return Err(TableError::InvalidConfig("initial base size must be in 2..=MAX_BASE_SIZE"));
        }
        if !(1..=95).contains(&self.grow_threshold) {
            return Err(TableError::InvalidConfig("grow threshold must be in 1..=95"));
        }
        // A shrink halves the table, doubling its load; it must land below the grow threshold
        if self.shrink_threshold.saturating_mul(2) >= self.grow_threshold {
            return Err(TableError::InvalidConfig(
                "shrink threshold must be less than half the grow threshold",
            ));
        }
        if self.hash_prime_a == self.hash_prime_b {
            return Err(TableError::InvalidConfig("hash primes must be distinct"));
        }
        for prime in [self.hash_prime_a, self.hash_prime_b] {
            if prime <= ALPHABET_SIZE || is_prime(prime) != Primality::Prime {
                return Err(TableError::InvalidConfig(
                    "hash primes must be primes larger than the ASCII alphabet",
                ));
            }
        }
        if self.max_key_len == 0 {
            return Err(TableError::InvalidConfig("max key length must be positive"));
        }
        Ok(())
    }
}
