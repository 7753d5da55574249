//! Field abstraction shared by prime and binary fields.

mod binary;
mod prime;

pub use self::{binary::BinaryField, prime::PrimeField};

use crate::{Error, Result};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Operations over a finite field.
///
/// Elements are represented as [`BigUint`] values. Inputs may be
/// unreduced; every returned element is canonical, i.e. in `[0, p)` for
/// GF(p) or of degree `< m` for GF(2^m).
pub trait Field {
    /// Field modulus: the prime `p` or the irreducible polynomial of a
    /// binary field.
    fn modulus(&self) -> &BigUint;

    /// Bit length of a field element.
    fn bits(&self) -> u64;

    /// Length of a serialized field element in bytes.
    fn byte_len(&self) -> usize {
        usize::try_from(self.bits().div_ceil(8)).unwrap_or(usize::MAX)
    }

    /// Additive identity.
    fn zero(&self) -> BigUint {
        BigUint::zero()
    }

    /// Multiplicative identity.
    fn one(&self) -> BigUint {
        BigUint::one()
    }

    /// Is `a` a canonical element of this field?
    fn contains(&self, a: &BigUint) -> bool;

    /// Reduce an arbitrary integer (or polynomial) into the field.
    fn reduce(&self, a: &BigUint) -> BigUint;

    /// Returns `a + b`.
    fn add(&self, a: &BigUint, b: &BigUint) -> BigUint;

    /// Returns `a - b`.
    fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint;

    /// Returns `-a`.
    fn neg(&self, a: &BigUint) -> BigUint;

    /// Returns `a · b`.
    fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint;

    /// Returns `a²`.
    fn square(&self, a: &BigUint) -> BigUint {
        self.mul(a, a)
    }

    /// Returns `a⁻¹`, failing with [`Error::NoInverse`] for zero.
    fn inv(&self, a: &BigUint) -> Result<BigUint>;

    /// Returns `a / b`, failing with [`Error::DivisionByZero`] if `b = 0`.
    fn div(&self, a: &BigUint, b: &BigUint) -> Result<BigUint> {
        let b = self.reduce(b);
        if b.is_zero() {
            return Err(Error::DivisionByZero);
        }

        Ok(self.mul(a, &self.inv(&b)?))
    }

    /// Returns `a^exp`.
    fn pow(&self, a: &BigUint, exp: &BigUint) -> BigUint {
        let a = self.reduce(a);
        let mut acc = self.one();

        for i in (0..exp.bits()).rev() {
            acc = self.square(&acc);
            if exp.bit(i) {
                acc = self.mul(&acc, &a);
            }
        }

        acc
    }

    /// Returns a square root of `a`, failing with [`Error::NoSquareRoot`]
    /// if none exists.
    fn sqrt(&self, a: &BigUint) -> Result<BigUint>;
}

/// Base field of a curve: either a prime field or a binary field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BaseField {
    /// GF(p).
    Prime(PrimeField),

    /// GF(2^m).
    Binary(BinaryField),
}

impl BaseField {
    /// Borrow the inner [`PrimeField`], if this is one.
    pub fn as_prime(&self) -> Option<&PrimeField> {
        match self {
            BaseField::Prime(field) => Some(field),
            BaseField::Binary(_) => None,
        }
    }

    /// Borrow the inner [`BinaryField`], if this is one.
    pub fn as_binary(&self) -> Option<&BinaryField> {
        match self {
            BaseField::Prime(_) => None,
            BaseField::Binary(field) => Some(field),
        }
    }

    fn inner(&self) -> &dyn Field {
        match self {
            BaseField::Prime(field) => field,
            BaseField::Binary(field) => field,
        }
    }
}

impl From<PrimeField> for BaseField {
    fn from(field: PrimeField) -> BaseField {
        BaseField::Prime(field)
    }
}

impl From<BinaryField> for BaseField {
    fn from(field: BinaryField) -> BaseField {
        BaseField::Binary(field)
    }
}

impl Field for BaseField {
    fn modulus(&self) -> &BigUint {
        self.inner().modulus()
    }

    fn bits(&self) -> u64 {
        self.inner().bits()
    }

    fn contains(&self, a: &BigUint) -> bool {
        self.inner().contains(a)
    }

    fn reduce(&self, a: &BigUint) -> BigUint {
        self.inner().reduce(a)
    }

    fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        self.inner().add(a, b)
    }

    fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        self.inner().sub(a, b)
    }

    fn neg(&self, a: &BigUint) -> BigUint {
        self.inner().neg(a)
    }

    fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        self.inner().mul(a, b)
    }

    fn square(&self, a: &BigUint) -> BigUint {
        self.inner().square(a)
    }

    fn inv(&self, a: &BigUint) -> Result<BigUint> {
        self.inner().inv(a)
    }

    fn div(&self, a: &BigUint, b: &BigUint) -> Result<BigUint> {
        self.inner().div(a, b)
    }

    fn pow(&self, a: &BigUint, exp: &BigUint) -> BigUint {
        self.inner().pow(a, exp)
    }

    fn sqrt(&self, a: &BigUint) -> Result<BigUint> {
        self.inner().sqrt(a)
    }
}
