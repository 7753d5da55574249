//! Rejection sampling of random integers.

use crate::{Error, Result};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::{CryptoRng, RngCore};

/// Default attempt budget for [`random_below`].
///
/// Candidates are masked to the bit length of the bound so each attempt
/// succeeds with probability at least 1/2.
pub const DEFAULT_MAX_ATTEMPTS: usize = 128;

/// Sample a uniformly random integer in `[0, max)`.
///
/// Draws `byte_len` random bytes per attempt, clears any bits above the bit
/// length of `max` and accepts the candidate if it is below `max`. Fails
/// with [`Error::ExhaustedAttempts`] after `max_attempts` rejections and
/// with [`Error::InvalidParameter`] if `max` is zero.
pub fn random_below<R>(
    max: &BigUint,
    byte_len: usize,
    max_attempts: usize,
    rng: &mut R,
) -> Result<BigUint>
where
    R: CryptoRng + RngCore + ?Sized,
{
    if max.is_zero() || byte_len == 0 {
        return Err(Error::InvalidParameter);
    }

    let max_bits = max.bits();
    let mut bytes = vec![0u8; byte_len];

    for _ in 0..max_attempts {
        rng.fill_bytes(&mut bytes);
        let mut candidate = BigUint::from_bytes_be(&bytes);

        if candidate.bits() > max_bits {
            candidate &= (BigUint::one() << max_bits) - 1u32;
        }

        if &candidate < max {
            return Ok(candidate);
        }
    }

    tracing::warn!(max_attempts, "random sampling exhausted its attempt budget");
    Err(Error::ExhaustedAttempts)
}

/// Sample a uniformly random scalar in `[1, n - 1]`.
pub fn random_scalar<R>(n: &BigUint, rng: &mut R) -> Result<BigUint>
where
    R: CryptoRng + RngCore + ?Sized,
{
    if n <= &BigUint::one() {
        return Err(Error::InvalidParameter);
    }

    let byte_len = usize::try_from(n.bits().div_ceil(8)).map_err(|_| Error::InvalidParameter)?;
    let k = random_below(&(n - 1u32), byte_len, DEFAULT_MAX_ATTEMPTS, rng)?;
    Ok(k + 1u32)
}
