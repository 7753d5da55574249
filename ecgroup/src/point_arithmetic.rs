//! Point arithmetic for each supported curve family.
//!
//! Every family implements the same sealed [`PointArithmetic`] trait so that
//! [`Curve`](crate::Curve) can dispatch once on its [`CurveForm`] and
//! protocol code never needs to know which equation it is working with.
//!
//! [`CurveForm`]: crate::CurveForm

mod lopez_dahab;
mod montgomery;
mod weierstrass;

pub(crate) use self::{lopez_dahab::LopezDahab, montgomery::Montgomery, weierstrass::Weierstrass};

use crate::point::ProjectivePoint;
use ecfield::{BaseField, Error, Field, Result};
use num_bigint::BigUint;

mod sealed {
    use crate::{
        params::CurveParams,
        point::{AffinePoint, CoordinateSystem, ProjectivePoint},
    };
    use ecfield::{BaseField, Result};
    use num_bigint::BigUint;

    /// Elliptic point arithmetic implementation
    ///
    /// Provides projective point addition and doubling for one curve family,
    /// together with the affine helpers needed by point encoding.
    pub trait PointArithmetic: Send + Sync {
        /// Projective coordinate system used by this family.
        fn system(&self) -> CoordinateSystem;

        /// Canonical point at infinity.
        fn identity(&self) -> ProjectivePoint;

        /// Lift an affine point with `Z = 1`.
        fn from_affine(&self, field: &BaseField, point: &AffinePoint) -> ProjectivePoint;

        /// Normalize a projective point.
        fn to_affine(&self, field: &BaseField, point: &ProjectivePoint) -> AffinePoint;

        /// Returns `lhs + rhs`
        fn add(
            &self,
            params: &CurveParams,
            lhs: &ProjectivePoint,
            rhs: &ProjectivePoint,
        ) -> ProjectivePoint;

        /// Returns `point + point`
        fn double(&self, params: &CurveParams, point: &ProjectivePoint) -> ProjectivePoint;

        /// Returns `-point`
        fn negate(&self, params: &CurveParams, point: &ProjectivePoint) -> ProjectivePoint;

        /// Does the finite affine point satisfy the curve equation?
        fn contains(&self, params: &CurveParams, point: &AffinePoint) -> bool;

        /// Bit stored in the tag of a compressed point.
        fn y_bit(&self, params: &CurveParams, point: &AffinePoint) -> bool;

        /// Recover `y` from `x` and the compression bit.
        fn decompress(&self, params: &CurveParams, x: &BigUint, y_bit: bool) -> Result<BigUint>;
    }
}

/// Allow crate-local visibility
pub(crate) use sealed::PointArithmetic;

/// Shared decompression for curves over GF(p): take a square root of the
/// right-hand side and select the root with the requested parity.
fn decompress_prime(field: &BaseField, rhs: &BigUint, y_bit: bool) -> Result<BigUint> {
    let y = field.sqrt(rhs).map_err(|_| Error::InvalidPoint)?;

    if y.bit(0) == y_bit {
        Ok(y)
    } else {
        let y = field.neg(&y);
        if y.bit(0) == y_bit {
            Ok(y)
        } else {
            // y = 0 has no odd counterpart
            Err(Error::InvalidPoint)
        }
    }
}

/// Negation shared by Jacobian families: `(X, -Y, Z)`.
fn negate_jacobian(field: &BaseField, point: &ProjectivePoint) -> ProjectivePoint {
    if point.is_identity() {
        return ProjectivePoint::jacobian_identity();
    }

    ProjectivePoint::new(point.x.clone(), field.neg(&point.y), point.z.clone())
}

fn small(n: u32) -> BigUint {
    BigUint::from(n)
}

/// Jacobian intermediate values `U1 = X1·Z2², U2 = X2·Z1², S1 = Y1·Z2³,
/// S2 = Y2·Z1³` shared by the Weierstrass and Montgomery additions.
struct JacobianSums {
    u1: BigUint,
    u2: BigUint,
    s1: BigUint,
    s2: BigUint,
}

impl JacobianSums {
    fn new(field: &BaseField, lhs: &ProjectivePoint, rhs: &ProjectivePoint) -> Self {
        let z1z1 = field.square(&lhs.z);
        let z2z2 = field.square(&rhs.z);

        Self {
            u1: field.mul(&lhs.x, &z2z2),
            u2: field.mul(&rhs.x, &z1z1),
            s1: field.mul(&lhs.y, &field.mul(&rhs.z, &z2z2)),
            s2: field.mul(&rhs.y, &field.mul(&lhs.z, &z1z1)),
        }
    }
}
