//! Short Weierstrass curves `y² = x³ + ax + b` in Jacobian coordinates.

use super::{JacobianSums, PointArithmetic, decompress_prime, negate_jacobian, small};
use crate::{
    coordinates::{jacobian_to_affine, to_jacobian},
    params::CurveParams,
    point::{AffinePoint, CoordinateSystem, ProjectivePoint},
};
use ecfield::{BaseField, Field, Result};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Jacobian arithmetic for short Weierstrass curves with arbitrary `a`.
pub(crate) struct Weierstrass;

impl PointArithmetic for Weierstrass {
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
        let v = f.mul(&u1, &hh);

        // X3 = R² - H³ - 2·U1·H²
        let x3 = f.sub(&f.sub(&f.square(&r), &hhh), &f.add(&v, &v));
        // Y3 = R·(U1·H² - X3) - S1·H³
        let y3 = f.sub(&f.mul(&r, &f.sub(&v, &x3)), &f.mul(&s1, &hhh));
        // Z3 = H·Z1·Z2
        let z3 = f.mul(&h, &f.mul(&lhs.z, &rhs.z));

        ProjectivePoint::new(x3, y3, z3)
    }

    fn double(&self, params: &CurveParams, point: &ProjectivePoint) -> ProjectivePoint {
        // vertical tangent
        if point.is_identity() || point.y.is_zero() {
            return self.identity();
        }

        let f = &params.field;
        let xx = f.square(&point.x);
        let yy = f.square(&point.y);
        let zz = f.square(&point.z);

        // M = 3·X² + a·Z⁴
        let m = f.add(&f.mul(&small(3), &xx), &f.mul(&params.a, &f.square(&zz)));
        // S = 4·X·Y²
        let s = f.mul(&small(4), &f.mul(&point.x, &yy));

        let x3 = f.sub(&f.square(&m), &f.add(&s, &s));
        let y3 = f.sub(
            &f.mul(&m, &f.sub(&s, &x3)),
            &f.mul(&small(8), &f.square(&yy)),
        );
        let z3 = f.mul(&small(2), &f.mul(&point.y, &point.z));

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
        f.square(&point.y) == self.rhs(params, &point.x)
    }

    fn y_bit(&self, _params: &CurveParams, point: &AffinePoint) -> bool {
        point.y.bit(0)
    }

    fn decompress(&self, params: &CurveParams, x: &BigUint, y_bit: bool) -> Result<BigUint> {
        decompress_prime(&params.field, &self.rhs(params, x), y_bit)
    }
}

impl Weierstrass {
    /// `x³ + ax + b`
    fn rhs(&self, params: &CurveParams, x: &BigUint) -> BigUint {
        let f = &params.field;
        let x3 = f.mul(&f.square(x), x);
        f.add(&f.add(&x3, &f.mul(&params.a, x)), &params.b)
    }
}
