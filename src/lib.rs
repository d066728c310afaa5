//! # Prime Hash
//!
//! An in-memory hash table mapping string keys to string values.
//!
//! `HashTable` resolves collisions with open addressing and double hashing: the first slot
//! comes from one polynomial string hash, the step between slots from a second one. The slot
//! array always has a prime length, which turns every probe sequence into a permutation of
//! the slots.
//!
//! The table keeps its load factor between 0.10 and 0.70 by rebuilding itself at double or
//! half its base size, never shrinking below the size it started with. Deleted entries leave
//! tombstones behind so that lookups can continue past them; rebuilds purge them.
//!
//! ## Basic Usage
//!
//! ```rust
//! use primehash::HashTable;
//!
//! // Create a new table: base size 50, stored in 53 slots
//! let mut table = HashTable::new();
//! assert_eq!(table.size(), 53);
//!
//! // Insert values
//! table.insert("apple", "red")?;
//! table.insert("banana", "yellow")?;
//!
//! // Retrieve values
//! assert_eq!(table.search("apple")?, Some("red"));
//!
//! // Update values
//! assert_eq!(table.insert("apple", "green")?, Some("red".to_string()));
//! assert_eq!(table.search("apple")?, Some("green"));
//!
//! // Remove values
//! table.delete("apple")?;
//! assert_eq!(table.search("apple")?, None);
//! # Ok::<(), primehash::TableError>(())
//! ```
//!
//! ## Growth
//!
//! ```rust
//! use primehash::HashTable;
//!
//! let mut table = HashTable::new();
//! for i in 0..40 {
//!     table.insert(format!("key-{i}"), i.to_string())?;
//! }
//!
//! // Crossing the 0.70 load factor doubled the base size
//! assert_eq!(table.base_size(), 100);
//! assert_eq!(table.size(), 101);
//! assert_eq!(table.search("key-7")?, Some("7"));
//! # Ok::<(), primehash::TableError>(())
//! ```

/// Construction parameters of a table
mod config;
/// Error type shared by all table operations
mod error;
/// Polynomial string hashing and double-hashing probe sequences
pub mod hash;
/// Primality test and prime search used to size tables
pub mod prime;
/// Load factor thresholds and resize arithmetic
mod resize;
/// Slot states of the backing array
mod slot;
/// The hash table itself
mod table;
/// Utility functions and traits for the hash table
mod utils;

pub use config::{
    DEFAULT_GROW_THRESHOLD, DEFAULT_INITIAL_BASE_SIZE, DEFAULT_MAX_KEY_LEN,
    DEFAULT_SHRINK_THRESHOLD, MAX_BASE_SIZE, TableConfig,
};
pub use error::{Result, TableError};
pub use table::{HashTable, Iter};
pub use utils::{TableExtensions, try_from_iter};
