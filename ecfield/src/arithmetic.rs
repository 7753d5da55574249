//! Arithmetic kernel over arbitrary-precision integers.
//!
//! Everything in here operates on [`BigUint`]/[`BigInt`] values and is used
//! by the field implementations as well as directly by the protocol layer
//! for arithmetic modulo the group order `n`.

mod primality;
mod random;
mod sqrt;

pub use self::{
    primality::{gen_prime, is_probable_prime, SMALL_PRIMES},
    random::{random_below, random_scalar, DEFAULT_MAX_ATTEMPTS},
    sqrt::tonelli_shanks,
};

use crate::{Error, Result};
use core::mem;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Compute the mathematical modulo `a mod n`.
///
/// Unlike the `%` operator on signed integers the result is always in
/// `[0, n)`, including for negative `a`.
///
/// `n` must be non-zero.
pub fn modulo(a: &BigInt, n: &BigUint) -> BigUint {
    let (_, magnitude) = a.mod_floor(&BigInt::from(n.clone())).into_parts();
    magnitude
}

/// Compute `base^exp mod n` by square-and-multiply.
///
/// The exponent is consumed most significant bit first. `n` must be
/// non-zero.
pub fn mod_pow(base: &BigUint, exp: &BigUint, n: &BigUint) -> BigUint {
    if n.is_one() {
        return BigUint::zero();
    }

    let base = base % n;
    let mut acc = BigUint::one();

    for i in (0..exp.bits()).rev() {
        acc = &acc * &acc % n;
        if exp.bit(i) {
            acc = acc * &base % n;
        }
    }

    acc
}

/// Extended Euclidean algorithm.
///
/// Returns `(gcd(a, b), x)` where `x` is the Bézout coefficient of `a`,
/// i.e. `a·x ≡ gcd(a, b) (mod b)`. Intended for non-negative inputs.
pub fn extended_euclid(a: &BigInt, b: &BigInt) -> (BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());

    while !r.is_zero() {
        let q = &old_r / &r;

        let next_r = &old_r - &q * &r;
        old_r = mem::replace(&mut r, next_r);

        let next_s = &old_s - &q * &s;
        old_s = mem::replace(&mut s, next_s);
    }

    (old_r, old_s)
}

/// Compute the inverse of `x` modulo `n`.
///
/// Fails with [`Error::NoInverse`] when `gcd(x, n) ≠ 1` (which includes
/// `x ≡ 0` and `n = 0`).
pub fn mod_inverse(x: &BigUint, n: &BigUint) -> Result<BigUint> {
    if n.is_zero() {
        return Err(Error::NoInverse);
    }

    let (gcd, coefficient) = extended_euclid(&BigInt::from(x % n), &BigInt::from(n.clone()));
    if !gcd.is_one() {
        return Err(Error::NoInverse);
    }

    Ok(modulo(&coefficient, n))
}

/// Legendre symbol `(a / p)` for an odd prime `p`.
///
/// Returns `0` if `p | a`, `1` if `a` is a quadratic residue and `-1`
/// otherwise.
pub fn legendre(a: &BigUint, p: &BigUint) -> i8 {
    let symbol = mod_pow(a, &((p - 1u32) >> 1), p);

    if symbol.is_zero() {
        0
    } else if symbol.is_one() {
        1
    } else {
        -1
    }
}

/// Serialize `x` as a big-endian integer left-padded with zeros to exactly
/// `len` bytes.
///
/// Fails with [`Error::InvalidLength`] if `x` does not fit.
pub fn to_fixed_bytes(x: &BigUint, len: usize) -> Result<Vec<u8>> {
    if x.is_zero() {
        return Ok(vec![0u8; len]);
    }

    let bytes = x.to_bytes_be();
    let padding = len.checked_sub(bytes.len()).ok_or(Error::InvalidLength)?;

    let mut out = vec![0u8; padding];
    out.extend_from_slice(&bytes);
    Ok(out)
}

/// Interpret the leftmost `bits` bits of `bytes` as a big-endian integer.
pub fn bits_to_int(bytes: &[u8], bits: u64) -> BigUint {
    let value = BigUint::from_bytes_be(bytes);
    let available = u64::try_from(bytes.len()).unwrap_or(u64::MAX).saturating_mul(8);

    if available > bits {
        value >> (available - bits)
    } else {
        value
    }
}
