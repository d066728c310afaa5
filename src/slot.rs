use std::mem;

/// A key-value pair owned by exactly one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    /// The key in the key-value pair
    pub(crate) key: String,
    /// The value associated with the key
    pub(crate) value: String,
}

impl Entry {
    /// Creates an entry from owned strings.
    pub(crate) const fn new(key: String, value: String) -> Self {
        Self { key, value }
    }
}

/// State of one position in the slot array.
///
/// Lookups stop at `Empty` but walk past `Tombstone`, since the key they want may have been
/// placed further along its probe sequence before the tombstone's entry was deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum Slot {
    /// Never held an entry
    #[default]
    Empty,
    /// Holds a live entry
    Occupied(Entry),
    /// Held an entry that has since been deleted
    Tombstone,
}

impl Slot {
    /// Returns the live entry in this slot, if any.
    pub(crate) const fn entry(&self) -> Option<&Entry> {
        match self {
            Self::Occupied(entry) => Some(entry),
            Self::Empty | Self::Tombstone => None,
        }
    }

    /// Returns true if this slot holds a live entry with the given key.
    pub(crate) fn holds(&self, key: &str) -> bool {
        self.entry().is_some_and(|entry| entry.key == key)
    }

    /// Turns an occupied slot into a tombstone and hands back its entry.
    ///
    /// Empty slots and tombstones are left as they are.
    pub(crate) fn bury(&mut self) -> Option<Entry> {
        if !matches!(self, Self::Occupied(_)) {
            return None;
        }
        match mem::replace(self, Self::Tombstone) {
            Self::Occupied(entry) => Some(entry),
            Self::Empty | Self::Tombstone => None,
        }
    }
}
