//! Binary fields GF(2^m) in polynomial basis.

use super::Field;
use crate::{Error, Result};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Binary field GF(2^m) defined by an irreducible polynomial of degree `m`.
///
/// Elements are polynomials over GF(2) of degree `< m`, stored with bit `i`
/// holding the coefficient of `t^i`. Addition and subtraction are both XOR.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BinaryField {
    m: u64,
    poly: BigUint,
}

impl BinaryField {
    /// Create GF(2^m) from the reduction polynomial `poly`.
    ///
    /// The degree `m` is taken from the polynomial. It must have degree at
    /// least one and a non-zero constant term; irreducibility is the
    /// caller's responsibility.
    pub fn new(poly: BigUint) -> Result<Self> {
        let bits = poly.bits();
        if bits < 2 || !poly.bit(0) {
            return Err(Error::InvalidParameter);
        }

        Ok(Self { m: bits - 1, poly })
    }

    /// Create GF(2^m) from the exponents of the non-zero terms of the
    /// reduction polynomial, e.g. `[163, 7, 6, 3, 0]`.
    pub fn from_exponents(exponents: &[u64]) -> Result<Self> {
        let mut poly = BigUint::zero();
        for &exponent in exponents {
            if poly.bit(exponent) {
                return Err(Error::InvalidParameter);
            }
            poly.set_bit(exponent, true);
        }

        Self::new(poly)
    }

    /// Extension degree `m`.
    pub fn degree(&self) -> u64 {
        self.m
    }

    /// Absolute trace `Tr(a) = a + a^2 + a^4 + ... + a^(2^(m-1))`.
    ///
    /// The result is always `0` or `1`.
    pub fn trace(&self, a: &BigUint) -> BigUint {
        let mut power = self.reduce(a);
        let mut acc = power.clone();

        for _ in 1..self.m {
            power = self.square(&power);
            acc ^= &power;
        }

        acc
    }

    /// Half-trace `H(a) = sum of a^(2^(2i))` for `i` in `0..=(m-1)/2`.
    ///
    /// For odd `m` and `Tr(a) = 0`, `z = H(a)` solves `z^2 + z = a`. Fails
    /// with [`Error::InvalidParameter`] when `m` is even.
    pub fn half_trace(&self, a: &BigUint) -> Result<BigUint> {
        if self.m.is_even() {
            return Err(Error::InvalidParameter);
        }

        let mut power = self.reduce(a);
        let mut acc = power.clone();

        for _ in 0..(self.m - 1) / 2 {
            power = self.square(&self.square(&power));
            acc ^= &power;
        }

        Ok(acc)
    }

    /// Solve `z^2 + z = beta`, returning one of the two solutions `z` and
    /// `z + 1`.
    ///
    /// Fails with [`Error::NoSquareRoot`] if `Tr(beta) = 1`.
    pub fn solve_quadratic(&self, beta: &BigUint) -> Result<BigUint> {
        if !self.trace(beta).is_zero() {
            return Err(Error::NoSquareRoot);
        }

        self.half_trace(beta)
    }
}

impl Field for BinaryField {
    fn modulus(&self) -> &BigUint {
        &self.poly
    }

    fn bits(&self) -> u64 {
        self.m
    }

    fn contains(&self, a: &BigUint) -> bool {
        a.bits() <= self.m
    }

    fn reduce(&self, a: &BigUint) -> BigUint {
        let mut r = a.clone();

        // clear the leading term until the degree drops below m
        while r.bits() > self.m {
            let shift = r.bits() - 1 - self.m;
            r ^= &self.poly << shift;
        }

        r
    }

    fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        self.reduce(&(a ^ b))
    }

    fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        self.add(a, b)
    }

    fn neg(&self, a: &BigUint) -> BigUint {
        self.reduce(a)
    }

    fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let mut a = self.reduce(a);
        let b = self.reduce(b);
        let mut acc = BigUint::zero();

        for i in 0..b.bits() {
            if b.bit(i) {
                acc ^= &a;
            }
            a <<= 1u32;
            if a.bit(self.m) {
                a ^= &self.poly;
            }
        }

        acc
    }

    fn square(&self, a: &BigUint) -> BigUint {
        let a = self.reduce(a);
        let mut spread = BigUint::zero();

        for i in 0..a.bits() {
            if a.bit(i) {
                spread.set_bit(2 * i, true);
            }
        }

        self.reduce(&spread)
    }

    /// Itoh-Tsujii inversion: `a^-1 = a^(2^m - 2) = prod a^(2^i)` for
    /// `i` in `1..m`.
    fn inv(&self, a: &BigUint) -> Result<BigUint> {
        let a = self.reduce(a);
        if a.is_zero() {
            return Err(Error::NoInverse);
        }

        let mut power = a;
        let mut acc = BigUint::one();

        for _ in 1..self.m {
            power = self.square(&power);
            acc = self.mul(&acc, &power);
        }

        Ok(acc)
    }

    /// Every element has a unique square root `a^(2^(m-1))`.
    fn sqrt(&self, a: &BigUint) -> Result<BigUint> {
        let mut root = self.reduce(a);
        for _ in 1..self.m {
            root = self.square(&root);
        }

        Ok(root)
    }
}
