//! Montgomery curves `By² = x³ + Ax² + x` in Jacobian coordinates.
//!
//! Full `(x, y)` arithmetic, not the x-only ladder: the curves are used as
//! general groups by every protocol.

use super::{JacobianSums, PointArithmetic, decompress_prime, negate_jacobian, small};
use crate::{
    coordinates::{jacobian_to_affine, to_jacobian},
    params::CurveParams,
    point::{AffinePoint, CoordinateSystem, ProjectivePoint},
};
use ecfield::{BaseField, Error, Field, Result};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Jacobian arithmetic for Montgomery curves.
pub(crate) struct Montgomery;

impl PointArithmetic for Montgomery {
    fn system(&self) -> CoordinateSystem {
        CoordinateSystem::Jacobian
    }

    fn identity(&self) -> ProjectivePoint {
        ProjectivePoint::jacobian_identity()
    }

    fn from_affine(&self, field: &BaseField, point: &AffinePoint) -> ProjectivePoint {
        to_jacobian(field, point, &BigUint::one())
    }

    fn to_affine(&self, field: &BaseField, point: &ProjectivePoint) -> AffinePoint {
        jacobian_to_affine(field, point)
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
        let JacobianSums { u1, u2, s1, s2 } = JacobianSums::new(f, lhs, rhs);

        if u1 == u2 {
            if f.add(&s1, &s2).is_zero() {
                return self.identity();
            }
            return self.double(params, lhs);
        }

        let h = f.sub(&u2, &u1);
        let r = f.sub(&s2, &s1);
        let hh = f.square(&h);
        let hhh = f.mul(&hh, &h);
        let z3 = f.mul(&h, &f.mul(&lhs.z, &rhs.z));

        // X3 = B·R² - A·Z3² - (U1 + U2)·H²
        let x3 = f.sub(
            &f.sub(
                &f.mul(&params.b, &f.square(&r)),
                &f.mul(&params.a, &f.square(&z3)),
            ),
            &f.mul(&f.add(&u1, &u2), &hh),
        );
        // Y3 = R·(U1·H² - X3) - S1·H³
        let y3 = f.sub(
            &f.mul(&r, &f.sub(&f.mul(&u1, &hh), &x3)),
            &f.mul(&s1, &hhh),
        );

        ProjectivePoint::new(x3, y3, z3)
    }

    fn double(&self, params: &CurveParams, point: &ProjectivePoint) -> ProjectivePoint {
        if point.is_identity() || point.y.is_zero() {
            return self.identity();
        }

        let f = &params.field;
        let (a, b) = (&params.a, &params.b);
        let zz = f.square(&point.z);
        let yy = f.square(&point.y);
        let bb = f.square(b);

        // M = 3·X² + 2A·X·Z² + Z⁴
        let m = f.add(
            &f.add(
                &f.mul(&small(3), &f.square(&point.x)),
                &f.mul(&small(2), &f.mul(a, &f.mul(&point.x, &zz))),
            ),
            &f.square(&zz),
        );
        // Z3 = 2B·Y·Z
        let z3 = f.mul(&small(2), &f.mul(b, &f.mul(&point.y, &point.z)));
        // T = 4B²·X·Y²
        let t = f.mul(&small(4), &f.mul(&bb, &f.mul(&point.x, &yy)));

        // X3 = B·M² - A·Z3² - 2T
        let x3 = f.sub(
            &f.sub(&f.mul(b, &f.square(&m)), &f.mul(a, &f.square(&z3))),
            &f.add(&t, &t),
        );
        // Y3 = M·(T - X3) - 8B³·Y⁴
        let y3 = f.sub(
            &f.mul(&m, &f.sub(&t, &x3)),
            &f.mul(&small(8), &f.mul(&f.mul(&bb, b), &f.square(&yy))),
        );

        ProjectivePoint::new(x3, y3, z3)
    }

    fn negate(&self, params: &CurveParams, point: &ProjectivePoint) -> ProjectivePoint {
        negate_jacobian(&params.field, point)
    }

    fn contains(&self, params: &CurveParams, point: &AffinePoint) -> bool {
        if point.is_identity() {
            return true;
        }

        let f = &params.field;
        f.mul(&params.b, &f.square(&point.y)) == self.rhs(params, &point.x)
    }

    fn y_bit(&self, _params: &CurveParams, point: &AffinePoint) -> bool {
        point.y.bit(0)
    }

    fn decompress(&self, params: &CurveParams, x: &BigUint, y_bit: bool) -> Result<BigUint> {
        let f = &params.field;
        let y2 = f.div(&self.rhs(params, x), &params.b).map_err(|_| Error::InvalidPoint)?;
        decompress_prime(f, &y2, y_bit)
    }
}

impl Montgomery {
    /// `x³ + Ax² + x`
    fn rhs(&self, params: &CurveParams, x: &BigUint) -> BigUint {
        let f = &params.field;
        let xx = f.square(x);
        f.add(&f.add(&f.mul(&xx, x), &f.mul(&params.a, &xx)), x)
    }
}
