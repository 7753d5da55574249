//! Modular square roots.

use super::{legendre, mod_pow};
use crate::{Error, Result};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Compute a square root of `a` modulo the odd prime `p` with the
/// Tonelli-Shanks algorithm.
///
/// Returns the smaller of the two roots `{r, p - r}`. Zero is its own
/// square root. Fails with [`Error::NoSquareRoot`] if `a` is a quadratic
/// non-residue.
pub fn tonelli_shanks(a: &BigUint, p: &BigUint) -> Result<BigUint> {
    let a = a % p;
    if a.is_zero() || p == &BigUint::from(2u32) {
        return Ok(a);
    }
    if legendre(&a, p) != 1 {
        return Err(Error::NoSquareRoot);
    }

    let p_minus_1: BigUint = p - 1u32;

    // p - 1 = q·2^s with q odd
    let s = p_minus_1.trailing_zeros().ok_or(Error::InvalidParameter)?;
    let q = &p_minus_1 >> s;

    let root = if s == 1 {
        // p ≡ 3 (mod 4)
        mod_pow(&a, &((p + 1u32) >> 2), p)
    } else {
        let mut z = BigUint::from(2u32);
        while legendre(&z, p) != -1 {
            z += 1u32;
        }

        let mut m = s;
        let mut c = mod_pow(&z, &q, p);
        let mut t = mod_pow(&a, &q, p);
        let mut r = mod_pow(&a, &((&q + 1u32) >> 1), p);

        while !t.is_one() {
            // least i in (0, m) such that t^(2^i) = 1
            let mut i = 0;
            let mut t2i = t.clone();
            while !t2i.is_one() {
                t2i = &t2i * &t2i % p;
                i += 1;
                if i == m {
                    return Err(Error::NoSquareRoot);
                }
            }

            let mut b = c;
            for _ in 0..(m - i - 1) {
                b = &b * &b % p;
            }

            r = r * &b % p;
            c = &b * &b % p;
            t = t * &c % p;
            m = i;
        }

        r
    };

    let other = p - &root;
    Ok(root.min(other))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn sqrt_mod_small_primes() {
        // 13 ≡ 1 (mod 4) exercises the general loop, 11 ≡ 3 (mod 4) the shortcut
        for p in [11u32, 13, 17, 41, 97, 113] {
            let p = BigUint::from(p);
            let mut x = BigUint::one();
            while x < p {
                let square = &x * &x % &p;
                let root = tonelli_shanks(&square, &p).unwrap();
                assert_eq!(&root * &root % &p, square);
                assert!(root <= &p - &root);
                x += 1u32;
            }
        }
    }

    #[test]
    fn sqrt_of_non_residue() {
        let p = BigUint::from(13u32);
        assert_eq!(
            tonelli_shanks(&BigUint::from(5u32), &p),
            Err(Error::NoSquareRoot)
        );
    }

    #[test]
    fn sqrt_of_zero() {
        let p = BigUint::from(13u32);
        assert_eq!(tonelli_shanks(&BigUint::zero(), &p), Ok(BigUint::zero()));
    }

    #[test]
    fn sqrt_mod_p224() {
        // p224 ≡ 1 (mod 2^96): worst case for the loop
        let p = BigUint::from_bytes_be(&hex!(
            "ffffffffffffffffffffffffffffffff000000000000000000000001"
        ));
        let x = BigUint::from_bytes_be(&hex!("0123456789abcdef0123456789abcdef"));
        let square = &x * &x % &p;
        let root = tonelli_shanks(&square, &p).unwrap();
        assert!(root == x || root == &p - &x);
    }
}
