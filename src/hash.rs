//! Polynomial string hashing and the double-hashing probe sequence.

/// Base of the primary hash. A prime larger than the ASCII alphabet.
pub const HASH_PRIME_A: usize = 151;
/// Base of the secondary hash, which picks the probe step.
pub const HASH_PRIME_B: usize = 163;

/// Hashes `s` by reading its bytes as the digits of a base-`a` number, reduced modulo `m`.
///
/// Accumulation is Horner style, `h = (h * a + byte) mod m`, so the intermediate value never
/// exceeds `m * a + 255`. The result lies in `[0, m)`; a zero modulus hashes everything to 0.
#[must_use]
pub fn hash(s: &str, a: usize, m: usize) -> usize {
    // u128 holds `(m - 1) * a + 255` for any pair of usize operands
    let modulus = m as u128;
    let base = a as u128;
    let acc = s.bytes().fold(0_u128, |acc, byte| {
        acc.wrapping_mul(base).wrapping_add(u128::from(byte)).checked_rem(modulus).unwrap_or(0)
    });
    usize::try_from(acc).unwrap_or(0)
}

/// Returns the slot index for `attempt` along the probe sequence of `s` in a table of `m`
/// slots, using the default hash primes.
///
/// Equivalent to `(hash_a + attempt * (hash_b + 1)) mod m`.
#[must_use]
pub fn probe(s: &str, m: usize, attempt: usize) -> usize {
    DoubleHasher::default().probe(s, m, attempt)
}

/// A pair of independent polynomial hashes combined into a double-hashing scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DoubleHasher {
    /// Base of the hash choosing the first slot
    prime_a: usize,
    /// Base of the hash choosing the step between slots
    prime_b: usize,
}

impl Default for DoubleHasher {
    fn default() -> Self {
        Self::new(HASH_PRIME_A, HASH_PRIME_B)
    }
}

impl DoubleHasher {
    /// Creates a hasher from two distinct bases.
    #[must_use]
    pub const fn new(prime_a: usize, prime_b: usize) -> Self {
        Self { prime_a, prime_b }
    }

    /// Slot index for `attempt` along the probe sequence of `s` in a table of `m` slots.
    #[must_use]
    pub fn probe(&self, s: &str, m: usize, attempt: usize) -> usize {
        let (start, step) = self.start_and_step(s, m);
        let offset = (attempt as u128).wrapping_mul(step as u128);
        let index = (start as u128).wrapping_add(offset).checked_rem(m as u128).unwrap_or(0);
        usize::try_from(index).unwrap_or(0)
    }

    /// Iterator over the first `m` slot indices probed for `s`.
    ///
    /// When `m` is prime the sequence is a permutation of `0..m`.
    #[must_use]
    pub fn sequence(&self, s: &str, m: usize) -> ProbeSequence {
        let (start, step) = self.start_and_step(s, m);
        ProbeSequence { next: start, step, modulus: m, remaining: m }
    }

    /// First slot and step size for `s`.
    ///
    /// The secondary hash is taken modulo `m - 1`, keeping the step in `[1, m - 1]` so it is
    /// never a multiple of `m`.
    fn start_and_step(&self, s: &str, m: usize) -> (usize, usize) {
        let start = hash(s, self.prime_a, m);
        let step = match m.checked_sub(1) {
            Some(range) if range > 0 => hash(s, self.prime_b, range).saturating_add(1),
            _ => 1,
        };
        (start, step)
    }
}

/// Slot indices visited while looking for a key, at most one pass over the table.
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    /// Index yielded by the next call to `next`
    next: usize,
    /// Distance between consecutive indices, modulo the table size
    step: usize,
    /// Number of slots in the table
    modulus: usize,
    /// Attempts left before the sequence ends
    remaining: usize,
}

impl Iterator for ProbeSequence {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        self.remaining = self.remaining.checked_sub(1)?;
        let current = self.next;

        // `current + step` wraps around `modulus` without overflowing usize
        let room = self.modulus.saturating_sub(self.step);
        self.next = if current >= room {
            current.saturating_sub(room)
        } else {
            current.saturating_add(self.step)
        };

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSequence {}
