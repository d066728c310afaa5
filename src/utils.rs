//! Utility functions and traits for `HashTable`

use crate::{HashTable, error::Result};

/// Extension trait for string tables that provides additional utility methods
pub trait TableExtensions {
    /// Returns the keys of the table as a Vec
    fn keys(&self) -> Vec<String>;

    /// Returns the values of the table as a Vec
    fn values(&self) -> Vec<String>;

    /// Returns true if the table contains the given key.
    ///
    /// Malformed keys are never contained.
    fn contains_key(&self, key: &str) -> bool;
}

impl TableExtensions for HashTable {
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_string()).collect()
    }

    fn values(&self) -> Vec<String> {
        self.iter().map(|(_, v)| v.to_string()).collect()
    }

    fn contains_key(&self, key: &str) -> bool {
        matches!(self.search(key), Ok(Some(_)))
    }
}

/// Creates a `HashTable` from an iterator of key-value pairs
///
/// Later pairs overwrite earlier pairs with the same key.
///
/// # Errors
///
/// Returns the first error raised by [`HashTable::insert`].
pub fn try_from_iter<K, V, I>(iter: I) -> Result<HashTable>
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut table = HashTable::new();

    for (key, value) in iter {
        table.insert(key, value)?;
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TableError;

    #[test]
    fn test_try_from_iter() {
        let data = vec![("a", "1"), ("b", "2"), ("c", "3"), ("a", "4")];

        let table = try_from_iter(data).unwrap();

        assert_eq!(table.search("a").unwrap(), Some("4"));
        assert_eq!(table.search("b").unwrap(), Some("2"));
        assert_eq!(table.search("c").unwrap(), Some("3"));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_try_from_iter_rejects_empty_key() {
        let data = vec![("a", "1"), ("", "2")];
        assert!(matches!(try_from_iter(data), Err(TableError::EmptyKey)));
    }

    #[test]
    fn test_keys_and_values() {
        let mut table = HashTable::new();
        table.insert("a", "1").unwrap();
        table.insert("b", "2").unwrap();
        table.insert("c", "3").unwrap();

        let mut keys = table.keys();
        keys.sort(); // Sort for predictable comparison

        let mut values = table.values();
        values.sort_unstable();

        assert_eq!(keys, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(values, vec!["1".to_string(), "2".to_string(), "3".to_string()]);
    }

    #[test]
    fn test_contains_key() {
        let mut table = HashTable::new();
        table.insert("a", "1").unwrap();

        assert!(table.contains_key("a"));
        assert!(!table.contains_key("b"));
        assert!(!table.contains_key(""));
    }
}
