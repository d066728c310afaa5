use std::mem;

use tracing::{debug, trace, warn};

use crate::{
    config::TableConfig,
    error::{Result, TableError},
    hash::DoubleHasher,
    prime::next_prime,
    resize::ResizePolicy,
    slot::{Entry, Slot},
};

/// A string-to-string hash table with open addressing and double hashing.
///
/// The slot array always has a prime length, so every probe sequence visits each slot once
/// before repeating. The table grows when an insert finds the load factor at or above the
/// grow threshold and shrinks when a delete leaves it at or below the shrink threshold, but
/// never below the initial base size. Deleted slots become tombstones until an insert reuses
/// them or a rebuild drops them.
///
/// Note: This implementation is not thread-safe. Share it behind a lock if needed.
#[derive(Debug, Clone)]
pub struct HashTable {
    /// Slot array, its length is always prime
    slots: Vec<Slot>,
    /// Number of grows minus number of shrinks since creation
    size_index: usize,
    /// Logical size the slot count was rounded up from
    base_size: usize,
    /// Number of occupied slots
    count: usize,
    /// Number of tombstone slots
    tombstones: usize,
    /// Parameters the table was built with
    config: TableConfig,
    /// Probe sequence generator
    hasher: DoubleHasher,
    /// Grow and shrink decisions
    policy: ResizePolicy,
}

/// Outcome of walking the probe sequence of a key.
#[derive(Debug, Clone, Copy)]
struct Lookup {
    /// Slot holding the key, if it is present
    index: Option<usize>,
    /// Number of slots inspected
    probes: usize,
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HashTable {
    /// Creates an empty table with the default configuration: base size 50, stored in 53 slots.
    #[must_use]
    pub fn new() -> Self {
        let config = TableConfig::new();
        let base_size = config.initial_base_size();
        Self::from_parts(config, base_size, 0, vec![Slot::Empty; next_prime(base_size)])
    }

    /// Creates an empty table sized and tuned by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidConfig`] if the configuration is rejected and
    /// [`TableError::Allocation`] if the slot array cannot be allocated.
    pub fn with_config(config: TableConfig) -> Result<Self> {
        config.validate()?;
        let base_size = config.initial_base_size();
        let slots = allocate_slots(next_prime(base_size))?;
        Ok(Self::from_parts(config, base_size, 0, slots))
    }

    /// Assembles an empty table around an already allocated slot array.
    fn from_parts(config: TableConfig, base_size: usize, size_index: usize, slots: Vec<Slot>) -> Self {
        let (prime_a, prime_b) = config.hash_primes();
        Self {
            slots,
            size_index,
            base_size,
            count: 0,
            tombstones: 0,
            hasher: DoubleHasher::new(prime_a, prime_b),
            policy: ResizePolicy::from_config(&config),
            config,
        }
    }

    /// Inserts a key-value pair, replacing the value if the key is already present.
    ///
    /// Returns the previous value for the key, if there was one. When the load factor has
    /// reached the grow threshold the table is rebuilt at twice its base size first.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::EmptyKey`] or [`TableError::KeyTooLong`] for a malformed key,
    /// and [`TableError::Allocation`] or [`TableError::CapacityOverflow`] if a required grow
    /// fails. On error the table is unchanged.
    ///
    /// A grow always adds slots, so the entry fits in the grown table.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>> {
        let key = key.into();
        self.check_key(&key)?;

        if self.policy.should_grow(self.count, self.slots.len()) {
            self.grow()?;
        }

        self.place(Entry::new(key, value.into()))
    }

    /// Writes `entry` along its probe sequence without consulting the resize policy.
    fn place(&mut self, entry: Entry) -> Result<Option<String>> {
        let mut first_tombstone = None;
        let mut vacant = None;

        for index in self.hasher.sequence(&entry.key, self.slots.len()) {
            match self.slots.get_mut(index) {
                None => break,
                Some(Slot::Empty) => {
                    vacant = Some(index);
                    break;
                }
                Some(Slot::Tombstone) => {
                    // The key may still sit further along, keep walking before reusing this
                    if first_tombstone.is_none() {
                        first_tombstone = Some(index);
                    }
                }
                Some(Slot::Occupied(existing)) if existing.key == entry.key => {
                    return Ok(Some(mem::replace(&mut existing.value, entry.value)));
                }
                Some(Slot::Occupied(_)) => {}
            }
        }

        let reuses_tombstone = first_tombstone.is_some();
        let target = first_tombstone.or(vacant).and_then(|index| self.slots.get_mut(index));
        let Some(slot) = target else {
            warn!(size = self.slots.len(), count = self.count, "probe sequence exhausted");
            return Err(TableError::ProbeExhausted(self.slots.len()));
        };

        *slot = Slot::Occupied(entry);
        self.count = self.count.saturating_add(1);
        if reuses_tombstone {
            self.tombstones = self.tombstones.saturating_sub(1);
        }
        Ok(None)
    }

    /// Returns the value stored for `key`, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::EmptyKey`] or [`TableError::KeyTooLong`] for a malformed key.
    pub fn search(&self, key: &str) -> Result<Option<&str>> {
        self.check_key(key)?;
        let value = self
            .lookup(key)
            .index
            .and_then(|index| self.slots.get(index))
            .and_then(Slot::entry)
            .map(|entry| entry.value.as_str());
        Ok(value)
    }

    /// Removes `key` from the table and returns its value, or `None` if it was absent.
    ///
    /// The slot becomes a tombstone. When the removal drops the load factor to the shrink
    /// threshold the table is instead rebuilt at half its base size without the key, unless
    /// that would go below the initial base size.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::EmptyKey`] or [`TableError::KeyTooLong`] for a malformed key.
    /// Returns [`TableError::Allocation`] if the shrink fails; the key then stays in the
    /// table and the table is unchanged.
    pub fn delete(&mut self, key: &str) -> Result<Option<String>> {
        self.check_key(key)?;

        let Some(index) = self.lookup(key).index else {
            return Ok(None);
        };

        let remaining = self.count.saturating_sub(1);
        if self.policy.should_shrink(remaining, self.slots.len()) {
            if let Some(base_size) = self.policy.shrunk(self.base_size) {
                let size_index = self.size_index.saturating_sub(1);
                let removed = self.rebuild_without(base_size, size_index, Some(index))?;
                return Ok(removed.map(|entry| entry.value));
            }
            trace!(base_size = self.base_size, count = remaining, "shrink below the floor ignored");
        }

        let Some(entry) = self.slots.get_mut(index).and_then(Slot::bury) else {
            return Ok(None);
        };
        self.count = remaining;
        self.tombstones = self.tombstones.saturating_add(1);
        Ok(Some(entry.value))
    }

    /// Walks the probe sequence of `key` until it finds the key or an empty slot.
    ///
    /// Tombstones never stop the walk; the sequence length bounds it.
    fn lookup(&self, key: &str) -> Lookup {
        let mut probes: usize = 0;

        for index in self.hasher.sequence(key, self.slots.len()) {
            probes = probes.saturating_add(1);
            match self.slots.get(index) {
                None | Some(Slot::Empty) => break,
                Some(slot) if slot.holds(key) => return Lookup { index: Some(index), probes },
                Some(Slot::Occupied(_) | Slot::Tombstone) => {}
            }
        }

        Lookup { index: None, probes }
    }

    /// Rejects keys the table does not accept.
    fn check_key(&self, key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(TableError::EmptyKey);
        }
        let max = self.config.max_key_len();
        if key.len() > max {
            return Err(TableError::KeyTooLong { len: key.len(), max });
        }
        Ok(())
    }

    /// Rebuilds the table at twice its base size, doubling further until the slot count rises.
    fn grow(&mut self) -> Result<()> {
        let mut base_size = self.policy.grown(self.base_size)?;
        while next_prime(base_size) <= self.slots.len() {
            base_size = self.policy.grown(base_size)?;
        }
        self.rebuild(base_size, self.size_index.saturating_add(1))
    }

    /// Rebuilds the table at its current base size, dropping every tombstone.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Allocation`] if the new slot array cannot be allocated. The
    /// table is unchanged in that case.
    pub fn compact(&mut self) -> Result<()> {
        self.rebuild(self.base_size, self.size_index)
    }

    /// Moves every live entry into a fresh slot array sized for `base_size`.
    fn rebuild(&mut self, base_size: usize, size_index: usize) -> Result<()> {
        self.rebuild_without(base_size, size_index, None)?;
        Ok(())
    }

    /// Moves every live entry except the one at `skipped` into a fresh slot array sized for
    /// `base_size`, and returns the skipped entry.
    ///
    /// The current storage is replaced only once the new table is complete.
    fn rebuild_without(
        &mut self,
        base_size: usize,
        size_index: usize,
        skipped: Option<usize>,
    ) -> Result<Option<Entry>> {
        let slots = allocate_slots(next_prime(base_size))?;
        let mut rebuilt = Self::from_parts(self.config, base_size, size_index, slots);

        let kept = self
            .slots
            .iter()
            .enumerate()
            .filter(|&(index, _)| Some(index) != skipped)
            .filter_map(|(_, slot)| slot.entry());
        for entry in kept {
            rebuilt.place(entry.clone())?;
        }

        let removed = skipped.and_then(|index| self.slots.get_mut(index)).and_then(Slot::bury);
        debug!(
            old_size = self.slots.len(),
            new_size = rebuilt.slots.len(),
            count = rebuilt.count,
            purged_tombstones = self.tombstones,
            "rebuilt table"
        );

        *self = rebuilt;
        Ok(removed)
    }

    /// Removes every entry and tombstone, keeping the current slot array.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.count = 0;
        self.tombstones = 0;
    }

    /// Returns the number of entries in the table
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of slots, always a prime
    #[must_use]
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Returns the logical size the slot count was rounded up from
    #[must_use]
    pub const fn base_size(&self) -> usize {
        self.base_size
    }

    /// Returns the number of grows minus the number of shrinks since creation
    #[must_use]
    pub const fn size_index(&self) -> usize {
        self.size_index
    }

    /// Returns the number of tombstone slots
    #[must_use]
    pub const fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Returns the configuration the table was built with
    #[must_use]
    pub const fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Returns the current load factor, tombstones excluded
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.slots.len() as f64
    }

    /// Returns how many slots a lookup of `key` inspects, whether or not the key is present.
    #[must_use]
    pub fn probe_count(&self, key: &str) -> usize {
        self.lookup(key).probes
    }

    /// Returns an iterator over the key-value pairs, in no particular order
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter { slots: &self.slots, index: 0 }
    }
}

impl Drop for HashTable {
    fn drop(&mut self) {
        trace!(count = self.count, size = self.slots.len(), "releasing slot storage");
    }
}

impl<'a> IntoIterator for &'a HashTable {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Allocates `size` empty slots, reporting allocation failure instead of aborting.
fn allocate_slots(size: usize) -> Result<Vec<Slot>> {
    let mut slots = Vec::new();
    slots.try_reserve_exact(size).map_err(|source| TableError::Allocation { slots: size, source })?;
    slots.resize(size, Slot::Empty);
    Ok(slots)
}

/// Iterator over the key-value pairs of the hash table
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    /// Slots of the table being iterated
    slots: &'a [Slot],
    /// Current position in the iteration
    index: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.get(self.index) {
            self.index = self.index.saturating_add(1);
            if let Some(entry) = slot.entry() {
                return Some((entry.key.as_str(), entry.value.as_str()));
            }
        }
        None
    }
}
