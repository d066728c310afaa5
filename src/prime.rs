//! Prime helpers used to size the slot array.

/// Outcome of a primality test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primality {
    /// 0 and 1 are neither prime nor composite
    Undefined,
    /// The number has a divisor other than 1 and itself
    NotPrime,
    /// The number is prime
    Prime,
}

/// Tests `x` for primality by trial division up to `sqrt(x)`.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(x: usize) -> Primality {
    if x < 2 {
        return Primality::Undefined;
    }
    if x < 4 {
        return Primality::Prime;
    }
    if x % 2 == 0 {
        return Primality::NotPrime;
    }

    // `divisor <= x / divisor` is `divisor * divisor <= x` without the overflow
    let mut divisor = 3;
    while divisor <= x / divisor {
        if x % divisor == 0 {
            return Primality::NotPrime;
        }
        divisor += 2;
    }

    Primality::Prime
}

/// Returns the smallest prime greater than or equal to `x`.
///
/// Every `x` up to [`MAX_BASE_SIZE`](crate::MAX_BASE_SIZE) has a prime above it well within
/// `usize`; past the largest representable prime the search saturates at `usize::MAX`.
#[must_use]
pub fn next_prime(x: usize) -> usize {
    (x..usize::MAX).find(|&n| is_prime(n) == Primality::Prime).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_numbers_are_undefined() {
        assert_eq!(is_prime(0), Primality::Undefined);
        assert_eq!(is_prime(1), Primality::Undefined);
    }

    #[test]
    fn test_is_prime() {
        let primes = [2, 3, 5, 7, 11, 13, 53, 97, 101, 151, 163, 211, 401, 7919];
        for p in primes {
            assert_eq!(is_prime(p), Primality::Prime, "{p} should be prime");
        }

        let composites = [4, 6, 9, 15, 25, 49, 91, 100, 121, 169, 7917];
        for c in composites {
            assert_eq!(is_prime(c), Primality::NotPrime, "{c} should not be prime");
        }
    }

    #[test]
    fn test_next_prime() {
        assert_eq!(next_prime(0), 2);
        assert_eq!(next_prime(1), 2);
        assert_eq!(next_prime(2), 2);
        assert_eq!(next_prime(14), 17);
        assert_eq!(next_prime(50), 53);
        assert_eq!(next_prime(53), 53);
        assert_eq!(next_prime(100), 101);
        assert_eq!(next_prime(200), 211);
        assert_eq!(next_prime(400), 401);
    }

    #[test]
    fn test_large_values() {
        // 2^31 - 1 is a Mersenne prime
        assert_eq!(is_prime(2_147_483_647), Primality::Prime);
        assert_eq!(is_prime(2_147_483_649), Primality::NotPrime);
        assert_eq!(next_prime(7908), 7919);
    }
}
