//! Elliptic curve domain parameters.

use crate::{
    point::AffinePoint,
    point_arithmetic::{LopezDahab, Montgomery, PointArithmetic, Weierstrass},
};
use ecfield::{BaseField, Error, Field, Result};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Family of curve equation.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum CurveForm {
    /// `y² = x³ + ax + b` over GF(p).
    ShortWeierstrass,

    /// `By² = x³ + Ax² + x` over GF(p).
    Montgomery,

    /// `y² + xy = x³ + ax² + b` over GF(2^m) with a pseudo-random `b`.
    BinaryPseudoRandom,

    /// `y² + xy = x³ + ax² + 1` over GF(2^m) with `a ∈ {0, 1}`.
    BinaryKoblitz,
}

impl CurveForm {
    /// Does this family live over a binary field?
    pub fn is_binary(self) -> bool {
        matches!(self, CurveForm::BinaryPseudoRandom | CurveForm::BinaryKoblitz)
    }

    pub(crate) fn arithmetic(self) -> &'static dyn PointArithmetic {
        match self {
            CurveForm::ShortWeierstrass => &Weierstrass,
            CurveForm::Montgomery => &Montgomery,
            CurveForm::BinaryPseudoRandom | CurveForm::BinaryKoblitz => &LopezDahab,
        }
    }
}

/// Immutable elliptic curve domain parameters.
///
/// For Montgomery curves `a` and `b` hold the `A` and `B` coefficients.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CurveParams {
    pub(crate) form: CurveForm,
    pub(crate) field: BaseField,
    pub(crate) a: BigUint,
    pub(crate) b: BigUint,
    pub(crate) generator: AffinePoint,
    pub(crate) order: BigUint,
    pub(crate) cofactor: BigUint,
}

impl CurveParams {
    /// Build and validate a set of domain parameters.
    ///
    /// Fails with [`Error::InvalidParameter`] if the family does not match
    /// the kind of field, a coefficient or a generator coordinate is not a
    /// field element, the curve is singular, the order is below 2, the
    /// cofactor is zero or the generator is not on the curve.
    pub fn new(
        form: CurveForm,
        field: BaseField,
        a: BigUint,
        b: BigUint,
        generator: (BigUint, BigUint),
        order: BigUint,
        cofactor: BigUint,
    ) -> Result<Self> {
        let field_matches = match &field {
            BaseField::Prime(_) => !form.is_binary(),
            BaseField::Binary(_) => form.is_binary(),
        };
        if !field_matches {
            return Err(Error::InvalidParameter);
        }

        let (gx, gy) = generator;
        if ![&a, &b, &gx, &gy].iter().all(|c| field.contains(c)) {
            return Err(Error::InvalidParameter);
        }

        if order <= BigUint::one() || cofactor.is_zero() {
            return Err(Error::InvalidParameter);
        }

        let params = Self {
            form,
            field,
            a,
            b,
            generator: AffinePoint::new(gx, gy),
            order,
            cofactor,
        };

        if params.is_singular() || !form.arithmetic().contains(&params, &params.generator) {
            return Err(Error::InvalidParameter);
        }

        Ok(params)
    }

    /// Curve family.
    pub fn form(&self) -> CurveForm {
        self.form
    }

    /// Base field.
    pub fn field(&self) -> &BaseField {
        &self.field
    }

    /// Coefficient `a` (`A` for Montgomery curves).
    pub fn a(&self) -> &BigUint {
        &self.a
    }

    /// Coefficient `b` (`B` for Montgomery curves).
    pub fn b(&self) -> &BigUint {
        &self.b
    }

    /// Base point `G`.
    pub fn generator(&self) -> &AffinePoint {
        &self.generator
    }

    /// Order `n` of the base point.
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// Cofactor `h = #E / n`.
    pub fn cofactor(&self) -> &BigUint {
        &self.cofactor
    }

    fn is_singular(&self) -> bool {
        let f = &self.field;
        let small = |n: u32| BigUint::from(n);

        match self.form {
            // 4a³ + 27b² = 0
            CurveForm::ShortWeierstrass => {
                let a3 = f.mul(&f.square(&self.a), &self.a);
                let b2 = f.square(&self.b);
                f.add(&f.mul(&small(4), &a3), &f.mul(&small(27), &b2))
                    .is_zero()
            }
            // B(A² - 4) = 0
            CurveForm::Montgomery => {
                let a2 = f.square(&self.a);
                self.b.is_zero() || f.sub(&a2, &small(4)).is_zero()
            }
            CurveForm::BinaryPseudoRandom => self.b.is_zero(),
            CurveForm::BinaryKoblitz => !self.b.is_one() || self.a > BigUint::one(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecfield::{BinaryField, PrimeField};

    fn el(n: u32) -> BigUint {
        BigUint::from(n)
    }

    fn f97() -> BaseField {
        PrimeField::new(el(97)).unwrap().into()
    }

    #[test]
    fn toy_weierstrass_curve() {
        // y² = x³ + 2x + 3 over GF(97) contains (3, 6)
        let params = CurveParams::new(
            CurveForm::ShortWeierstrass,
            f97(),
            el(2),
            el(3),
            (el(3), el(6)),
            el(5),
            el(1),
        )
        .unwrap();
        assert_eq!(params.form(), CurveForm::ShortWeierstrass);
        assert_eq!(params.generator(), &AffinePoint::new(el(3), el(6)));
    }

    #[test]
    fn rejects_off_curve_generator() {
        assert_eq!(
            CurveParams::new(
                CurveForm::ShortWeierstrass,
                f97(),
                el(2),
                el(3),
                (el(3), el(7)),
                el(5),
                el(1),
            ),
            Err(Error::InvalidParameter)
        );
    }

    #[test]
    fn rejects_mismatched_field() {
        let binary: BaseField = BinaryField::from_exponents(&[5, 2, 0]).unwrap().into();
        assert_eq!(
            CurveParams::new(
                CurveForm::ShortWeierstrass,
                binary,
                el(1),
                el(1),
                (el(0), el(1)),
                el(5),
                el(1),
            ),
            Err(Error::InvalidParameter)
        );
        assert_eq!(
            CurveParams::new(
                CurveForm::BinaryKoblitz,
                f97(),
                el(1),
                el(1),
                (el(0), el(1)),
                el(5),
                el(1),
            ),
            Err(Error::InvalidParameter)
        );
    }

    #[test]
    fn rejects_singular_curve() {
        // y² = x³ has a cusp at the origin
        assert_eq!(
            CurveParams::new(
                CurveForm::ShortWeierstrass,
                f97(),
                el(0),
                el(0),
                (el(1), el(1)),
                el(5),
                el(1),
            ),
            Err(Error::InvalidParameter)
        );
    }
}
