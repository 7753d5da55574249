//! Elliptic curve groups.

use crate::{
    params::{CurveForm, CurveParams},
    point::{AffinePoint, CoordinateSystem, ProjectivePoint},
    point_arithmetic::PointArithmetic,
};
use ecfield::{BaseField, Field};
use num_bigint::BigUint;
use std::sync::Arc;

/// Elliptic curve group: shared immutable parameters plus the point
/// arithmetic of their family.
///
/// Cloning is cheap; all clones share the same parameters.
#[derive(Clone, Debug)]
pub struct Curve {
    params: Arc<CurveParams>,
}

impl Curve {
    /// Create a curve from validated domain parameters.
    pub fn new(params: CurveParams) -> Self {
        Self {
            params: Arc::new(params),
        }
    }

    /// Domain parameters.
    pub fn params(&self) -> &CurveParams {
        &self.params
    }

    /// Curve family.
    pub fn form(&self) -> CurveForm {
        self.params.form
    }

    /// Base field.
    pub fn field(&self) -> &BaseField {
        &self.params.field
    }

    /// Base point `G`.
    pub fn generator(&self) -> &AffinePoint {
        &self.params.generator
    }

    /// Order `n` of the base point.
    pub fn order(&self) -> &BigUint {
        &self.params.order
    }

    /// Cofactor `h`.
    pub fn cofactor(&self) -> &BigUint {
        &self.params.cofactor
    }

    /// Length in bytes of a serialized field element.
    pub fn field_len(&self) -> usize {
        self.params.field.byte_len()
    }

    /// Length in bytes of a serialized scalar modulo `n`.
    pub fn scalar_len(&self) -> usize {
        usize::try_from(self.params.order.bits().div_ceil(8)).unwrap_or(usize::MAX)
    }

    /// Projective coordinate system used for arithmetic on this curve.
    pub fn coordinates(&self) -> CoordinateSystem {
        self.arithmetic().system()
    }

    /// Point at infinity in this curve's projective coordinates.
    pub fn identity(&self) -> ProjectivePoint {
        self.arithmetic().identity()
    }

    /// Lift an affine point into projective coordinates.
    pub fn to_projective(&self, point: &AffinePoint) -> ProjectivePoint {
        self.arithmetic().from_affine(&self.params.field, point)
    }

    /// Normalize a projective point to affine coordinates.
    pub fn to_affine(&self, point: &ProjectivePoint) -> AffinePoint {
        self.arithmetic().to_affine(&self.params.field, point)
    }

    /// Returns `lhs + rhs`.
    pub fn add(&self, lhs: &ProjectivePoint, rhs: &ProjectivePoint) -> ProjectivePoint {
        self.arithmetic().add(&self.params, lhs, rhs)
    }

    /// Returns `lhs + rhs` for affine points.
    pub fn add_affine(&self, lhs: &AffinePoint, rhs: &AffinePoint) -> AffinePoint {
        let sum = self.add(&self.to_projective(lhs), &self.to_projective(rhs));
        self.to_affine(&sum)
    }

    /// Returns `2·point`.
    pub fn double(&self, point: &ProjectivePoint) -> ProjectivePoint {
        self.arithmetic().double(&self.params, point)
    }

    /// Returns `-point`.
    pub fn negate(&self, point: &ProjectivePoint) -> ProjectivePoint {
        self.arithmetic().negate(&self.params, point)
    }

    /// Returns `-point` for an affine point.
    pub fn negate_affine(&self, point: &AffinePoint) -> AffinePoint {
        self.to_affine(&self.negate(&self.to_projective(point)))
    }

    /// Returns `[k] point` in projective coordinates.
    ///
    /// Montgomery ladder over the bits of `k`, most significant first: every
    /// bit costs exactly one addition and one doubling. `k = 0` gives the
    /// point at infinity. `k` is not reduced modulo the order.
    pub fn mul_projective(&self, point: &ProjectivePoint, k: &BigUint) -> ProjectivePoint {
        let mut r0 = self.identity();
        let mut r1 = point.clone();

        for i in (0..k.bits()).rev() {
            if k.bit(i) {
                r0 = self.add(&r0, &r1);
                r1 = self.double(&r1);
            } else {
                r1 = self.add(&r0, &r1);
                r0 = self.double(&r0);
            }
        }

        r0
    }

    /// Returns `[k] point`.
    pub fn mul(&self, point: &AffinePoint, k: &BigUint) -> AffinePoint {
        self.to_affine(&self.mul_projective(&self.to_projective(point), k))
    }

    /// Returns `[k] G`.
    pub fn mul_generator(&self, k: &BigUint) -> AffinePoint {
        self.mul(&self.params.generator, k)
    }

    /// Returns `[k] p + [l] q` using simultaneous (Shamir) multiplication.
    pub fn lincomb(&self, (p, k): (&AffinePoint, &BigUint), (q, l): (&AffinePoint, &BigUint)) -> AffinePoint {
        let p = self.to_projective(p);
        let q = self.to_projective(q);
        let pq = self.add(&p, &q);
        let mut acc = self.identity();

        for i in (0..k.bits().max(l.bits())).rev() {
            acc = self.double(&acc);
            match (k.bit(i), l.bit(i)) {
                (true, true) => acc = self.add(&acc, &pq),
                (true, false) => acc = self.add(&acc, &p),
                (false, true) => acc = self.add(&acc, &q),
                (false, false) => {}
            }
        }

        self.to_affine(&acc)
    }

    /// Is `point` the point at infinity, or a finite point whose
    /// coordinates are field elements satisfying the curve equation?
    pub fn is_on_curve(&self, point: &AffinePoint) -> bool {
        if point.is_identity() {
            return true;
        }

        let field = &self.params.field;
        field.contains(&point.x)
            && field.contains(&point.y)
            && self.arithmetic().contains(&self.params, point)
    }

    /// Is `[n] point` the point at infinity?
    pub fn is_torsion_free(&self, point: &AffinePoint) -> bool {
        self.mul(point, &self.params.order).is_identity()
    }

    pub(crate) fn arithmetic(&self) -> &'static dyn PointArithmetic {
        self.params.form.arithmetic()
    }
}

impl PartialEq for Curve {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.params, &other.params) || self.params == other.params
    }
}

impl Eq for Curve {}

impl From<CurveParams> for Curve {
    fn from(params: CurveParams) -> Curve {
        Curve::new(params)
    }
}
