//! Binary curves `y² + xy = x³ + ax² + b` in López-Dahab coordinates
//! (`x = X/Z`, `y = Y/Z²`).

use super::PointArithmetic;
use crate::{
    coordinates::{lopez_dahab_to_affine, to_lopez_dahab},
    params::CurveParams,
    point::{AffinePoint, CoordinateSystem, ProjectivePoint},
};
use ecfield::{BaseField, Error, Field, Result};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// López-Dahab arithmetic for pseudo-random and Koblitz binary curves.
pub(crate) struct LopezDahab;

impl PointArithmetic for LopezDahab {
    fn system(&self) -> CoordinateSystem {
        CoordinateSystem::LopezDahab
    }

    fn identity(&self) -> ProjectivePoint {
        ProjectivePoint::lopez_dahab_identity()
    }

    fn from_affine(&self, field: &BaseField, point: &AffinePoint) -> ProjectivePoint {
        to_lopez_dahab(field, point, &BigUint::one())
    }

    fn to_affine(&self, field: &BaseField, point: &ProjectivePoint) -> AffinePoint {
        lopez_dahab_to_affine(field, point)
    }

    fn add(
        &self,
        params: &CurveParams,
        lhs: &ProjectivePoint,
        rhs: &ProjectivePoint,
    ) -> ProjectivePoint {
        if lhs.is_identity() {
            return rhs.clone();
        }
        if rhs.is_identity() {
            return lhs.clone();
        }

        let f = &params.field;
        let (x1, y1, z1) = (&lhs.x, &lhs.y, &lhs.z);
        let (x2, y2, z2) = (&rhs.x, &rhs.y, &rhs.z);
        let z1z1 = f.square(z1);
        let z2z2 = f.square(z2);
        let z1z2 = f.mul(z1, z2);

        // B = X1·Z2 + X2·Z1, A = Y1·Z2² + Y2·Z1²
        let b = f.add(&f.mul(x1, z2), &f.mul(x2, z1));
        let a = f.add(&f.mul(y1, &z2z2), &f.mul(y2, &z1z1));

        if b.is_zero() {
            // same x: either the same point or its inverse
            if a.is_zero() {
                return self.double(params, lhs);
            }
            return self.identity();
        }

        let c = f.mul(&b, &z1z2);
        let cc = f.square(&c);
        let bb = f.square(&b);
        let bbb = f.mul(&bb, &b);

        // X3 = A² + A·C + B³·Z1·Z2 + a·C²
        let x3 = f.add(
            &f.add(&f.square(&a), &f.mul(&a, &c)),
            &f.add(&f.mul(&bbb, &z1z2), &f.mul(&params.a, &cc)),
        );
        // Y3 = A·C·(X1·B²·Z1·Z2² + X3) + X3·C² + Y1·B⁴·Z1²·Z2⁴
        let y3 = f.add(
            &f.add(
                &f.mul(
                    &f.mul(&a, &c),
                    &f.add(&f.mul(x1, &f.mul(&bb, &f.mul(z1, &z2z2))), &x3),
                ),
                &f.mul(&x3, &cc),
            ),
            &f.mul(y1, &f.mul(&f.square(&bb), &f.mul(&z1z1, &f.square(&z2z2)))),
        );

        ProjectivePoint::new(x3, y3, cc)
    }

    fn double(&self, params: &CurveParams, point: &ProjectivePoint) -> ProjectivePoint {
        // x = 0 is the point of order two
        if point.is_identity() || point.x.is_zero() {
            return self.identity();
        }

        let f = &params.field;
        let xx = f.square(&point.x);
        let zz = f.square(&point.z);
        let bz4 = f.mul(&params.b, &f.square(&zz));

        // Z3 = X²·Z², X3 = X⁴ + b·Z⁴
        let z3 = f.mul(&xx, &zz);
        let x3 = f.add(&f.square(&xx), &bz4);
        // Y3 = b·Z⁴·Z3 + X3·(a·Z3 + Y² + b·Z⁴)
        let y3 = f.add(
            &f.mul(&bz4, &z3),
            &f.mul(
                &x3,
                &f.add(&f.add(&f.mul(&params.a, &z3), &f.square(&point.y)), &bz4),
            ),
        );

        ProjectivePoint::new(x3, y3, z3)
    }

    /// `-(x, y) = (x, x + y)`, i.e. `(X, Y + X·Z, Z)`.
    fn negate(&self, params: &CurveParams, point: &ProjectivePoint) -> ProjectivePoint {
        if point.is_identity() {
            return self.identity();
        }

        let f = &params.field;
        ProjectivePoint::new(
            point.x.clone(),
            f.add(&point.y, &f.mul(&point.x, &point.z)),
            point.z.clone(),
        )
    }

    fn contains(&self, params: &CurveParams, point: &AffinePoint) -> bool {
        if point.is_identity() {
            return true;
        }

        let f = &params.field;
        let (x, y) = (&point.x, &point.y);
        let xx = f.square(x);
        let lhs = f.add(&f.square(y), &f.mul(x, y));
        let rhs = f.add(&f.add(&f.mul(&xx, x), &f.mul(&params.a, &xx)), &params.b);

        lhs == rhs
    }

    /// SEC1 compression bit: the low bit of `y / x`, zero when `x = 0`.
    fn y_bit(&self, params: &CurveParams, point: &AffinePoint) -> bool {
        params
            .field
            .div(&point.y, &point.x)
            .map(|z| z.bit(0))
            .unwrap_or(false)
    }

    fn decompress(&self, params: &CurveParams, x: &BigUint, y_bit: bool) -> Result<BigUint> {
        let f = &params.field;
        let field = f.as_binary().ok_or(Error::InvalidParameter)?;

        if x.is_zero() {
            // y² = b
            return f.sqrt(&params.b);
        }

        // y = x·z with z² + z = x + a + b/x²
        let beta = f.add(
            &f.add(x, &params.a),
            &f.div(&params.b, &f.square(x)).map_err(|_| Error::InvalidPoint)?,
        );
        let mut z = field
            .solve_quadratic(&beta)
            .map_err(|_| Error::InvalidPoint)?;
        if z.bit(0) != y_bit {
            z = f.add(&z, &BigUint::one());
        }

        Ok(f.mul(x, &z))
    }
}
