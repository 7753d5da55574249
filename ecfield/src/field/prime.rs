//! Prime fields GF(p).

use super::Field;
use crate::{
    arithmetic::{mod_inverse, mod_pow, tonelli_shanks},
    Error, Result,
};
use num_bigint::BigUint;
use num_integer::Integer;

/// Prime field GF(p) for an odd prime `p`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrimeField {
    p: BigUint,
}

impl PrimeField {
    /// Create the field of integers modulo `p`.
    ///
    /// `p` must be an odd prime; primality is not checked here, but even
    /// moduli and moduli below 3 are rejected with
    /// [`Error::InvalidParameter`].
    pub fn new(p: BigUint) -> Result<Self> {
        if p < BigUint::from(3u32) || p.is_even() {
            return Err(Error::InvalidParameter);
        }

        Ok(Self { p })
    }

    /// The characteristic `p`.
    pub fn characteristic(&self) -> &BigUint {
        &self.p
    }
}

impl Field for PrimeField {
    fn modulus(&self) -> &BigUint {
        &self.p
    }

    fn bits(&self) -> u64 {
        self.p.bits()
    }

    fn contains(&self, a: &BigUint) -> bool {
        a < &self.p
    }

    fn reduce(&self, a: &BigUint) -> BigUint {
        a % &self.p
    }

    fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.p
    }

    fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let a = a % &self.p;
        let b = b % &self.p;

        if a >= b {
            a - b
        } else {
            &self.p - b + a
        }
    }

    fn neg(&self, a: &BigUint) -> BigUint {
        self.sub(&BigUint::default(), a)
    }

    fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        a * b % &self.p
    }

    fn inv(&self, a: &BigUint) -> Result<BigUint> {
        mod_inverse(a, &self.p)
    }

    fn pow(&self, a: &BigUint, exp: &BigUint) -> BigUint {
        mod_pow(a, exp, &self.p)
    }

    fn sqrt(&self, a: &BigUint) -> Result<BigUint> {
        tonelli_shanks(a, &self.p)
    }
}
