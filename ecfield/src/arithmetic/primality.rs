//! Probabilistic primality testing and prime generation.

use super::{mod_pow, random::random_below};
use crate::{Error, Result};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand_core::{CryptoRng, RngCore};
use std::collections::HashSet;

/// Primes below 256 used for trial division.
pub const SMALL_PRIMES: [u32; 54] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Test whether `n` is probably prime.
///
/// Runs trial division by [`SMALL_PRIMES`], rejects anything failing the
/// mod-6 sieve and then performs `rounds` Miller-Rabin rounds with distinct
/// random bases. A composite passes with probability at most `4^-rounds`.
pub fn is_probable_prime<R>(n: &BigUint, rounds: usize, rng: &mut R) -> Result<bool>
where
    R: CryptoRng + RngCore + ?Sized,
{
    if let Some(small) = n.to_u32() {
        if small < 2 {
            return Ok(false);
        }
        if SMALL_PRIMES.contains(&small) {
            return Ok(true);
        }
    }

    if n.is_even() {
        return Ok(false);
    }

    let rem6 = n % 6u32;
    if rem6 != BigUint::one() && rem6 != BigUint::from(5u32) {
        return Ok(false);
    }

    if SMALL_PRIMES
        .iter()
        .any(|&prime| (n % prime).is_zero())
    {
        return Ok(false);
    }

    // n - 1 = d·2^s with d odd
    let n_minus_1: BigUint = n - 1u32;
    let s = n_minus_1.trailing_zeros().ok_or(Error::InvalidParameter)?;
    let d = &n_minus_1 >> s;

    // bases are drawn from [2, n - 2]
    let base_range: BigUint = n - 3u32;
    let rounds = match base_range.to_usize() {
        Some(available) => rounds.min(available),
        None => rounds,
    };
    let byte_len = byte_len(n);
    let mut tried = HashSet::with_capacity(rounds);

    while tried.len() < rounds {
        let base = random_below(&base_range, byte_len, super::DEFAULT_MAX_ATTEMPTS, rng)? + 2u32;
        if !tried.insert(base.clone()) {
            continue;
        }

        if !miller_rabin_round(&base, &d, s, n, &n_minus_1) {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Generate a random prime of exactly `bits` bits.
///
/// Candidates have their top bit set, are odd and are nudged to satisfy the
/// mod-6 sieve before being handed to [`is_probable_prime`] with `rounds`
/// Miller-Rabin rounds. Fails with [`Error::ExhaustedAttempts`] after
/// `max_attempts` rejected candidates.
pub fn gen_prime<R>(bits: u64, rounds: usize, max_attempts: usize, rng: &mut R) -> Result<BigUint>
where
    R: CryptoRng + RngCore + ?Sized,
{
    if bits < 3 {
        return Err(Error::InvalidParameter);
    }

    let byte_len = usize::try_from(bits.div_ceil(8)).map_err(|_| Error::InvalidParameter)?;
    let mut bytes = vec![0u8; byte_len];

    for attempt in 0..max_attempts {
        rng.fill_bytes(&mut bytes);
        let mut candidate = BigUint::from_bytes_be(&bytes);

        // truncate to `bits` bits, then force the top and bottom bits
        for excess in bits..(bits.div_ceil(8) * 8) {
            candidate.set_bit(excess, false);
        }
        candidate.set_bit(bits - 1, true);
        candidate.set_bit(0, true);

        // odd candidates are 1, 3 or 5 mod 6; move multiples of 3 to 5 mod 6
        if &candidate % 6u32 == BigUint::from(3u32) {
            candidate += 2u32;
            if candidate.bits() != bits {
                continue;
            }
        }

        if is_probable_prime(&candidate, rounds, rng)? {
            tracing::debug!(bits, attempts = attempt + 1, "generated probable prime");
            return Ok(candidate);
        }
    }

    tracing::warn!(bits, max_attempts, "prime generation exhausted its attempt budget");
    Err(Error::ExhaustedAttempts)
}

/// Single Miller-Rabin round: `true` if `n` is a strong probable prime to
/// the given base.
fn miller_rabin_round(base: &BigUint, d: &BigUint, s: u64, n: &BigUint, n_minus_1: &BigUint) -> bool {
    let mut x = mod_pow(base, d, n);
    if x.is_one() || &x == n_minus_1 {
        return true;
    }

    for _ in 1..s {
        x = &x * &x % n;
        if &x == n_minus_1 {
            return true;
        }
        if x.is_one() {
            return false;
        }
    }

    false
}

fn byte_len(n: &BigUint) -> usize {
    usize::try_from(n.bits().div_ceil(8)).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use rand_core::OsRng;

    #[test]
    fn small_primes_and_composites() {
        let primes = [2u32, 3, 5, 251, 257, 65537, 7919];
        let composites = [0u32, 1, 4, 9, 255, 561, 1105, 65535, 7917];

        for p in primes {
            assert!(is_probable_prime(&BigUint::from(p), 20, &mut OsRng).unwrap(), "{p}");
        }
        for c in composites {
            assert!(!is_probable_prime(&BigUint::from(c), 20, &mut OsRng).unwrap(), "{c}");
        }
    }

    #[test]
    fn curve_orders_are_prime() {
        let p256_order = BigUint::from_bytes_be(&hex!(
            "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551"
        ));
        assert!(is_probable_prime(&p256_order, 32, &mut OsRng).unwrap());

        // product of the two largest 64-bit primes
        let composite = BigUint::from(0xFFFF_FFFF_FFFF_FFC5u64) * BigUint::from(0xFFFF_FFFF_FFFF_FFADu64);
        assert!(!is_probable_prime(&composite, 32, &mut OsRng).unwrap());
    }

    #[test]
    fn generated_primes_have_requested_size() {
        for bits in [3u64, 8, 61, 128, 257] {
            let prime = gen_prime(bits, 32, 10_000, &mut OsRng).unwrap();
            assert_eq!(prime.bits(), bits);
            assert!(is_probable_prime(&prime, 32, &mut OsRng).unwrap());
        }
    }

    #[test]
    fn gen_prime_rejects_tiny_sizes() {
        assert_eq!(gen_prime(2, 8, 10, &mut OsRng), Err(Error::InvalidParameter));
    }

    #[test]
    fn gen_prime_respects_attempt_budget() {
        assert_eq!(gen_prime(512, 8, 0, &mut OsRng), Err(Error::ExhaustedAttempts));
    }
}
