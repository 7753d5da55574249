//! Conversions between affine, Jacobian and López-Dahab coordinates.

use crate::point::{AffinePoint, Point, ProjectivePoint};
use ecfield::Field;
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Convert a point in any coordinate system to affine coordinates.
pub fn to_affine<F: Field + ?Sized>(field: &F, point: &Point) -> AffinePoint {
    match point {
        Point::Affine(point) => point.clone(),
        Point::Jacobian(point) => jacobian_to_affine(field, point),
        Point::LopezDahab(point) => lopez_dahab_to_affine(field, point),
    }
}

/// Convert an affine point to Jacobian coordinates `(x·z², y·z³, z)`.
///
/// The point at infinity, or `z = 0`, gives the canonical `(1, 1, 0)`.
pub fn to_jacobian<F: Field + ?Sized>(field: &F, point: &AffinePoint, z: &BigUint) -> ProjectivePoint {
    let z = field.reduce(z);
    if point.is_identity() || z.is_zero() {
        return ProjectivePoint::jacobian_identity();
    }
    if z.is_one() {
        return ProjectivePoint::new(point.x.clone(), point.y.clone(), z);
    }

    let z2 = field.square(&z);
    let z3 = field.mul(&z2, &z);
    ProjectivePoint::new(field.mul(&point.x, &z2), field.mul(&point.y, &z3), z)
}

/// Convert an affine point to López-Dahab coordinates `(x·z, y·z², z)`.
///
/// The point at infinity, or `z = 0`, gives the canonical `(1, 0, 0)`.
pub fn to_lopez_dahab<F: Field + ?Sized>(
    field: &F,
    point: &AffinePoint,
    z: &BigUint,
) -> ProjectivePoint {
    let z = field.reduce(z);
    if point.is_identity() || z.is_zero() {
        return ProjectivePoint::lopez_dahab_identity();
    }
    if z.is_one() {
        return ProjectivePoint::new(point.x.clone(), point.y.clone(), z);
    }

    let z2 = field.square(&z);
    ProjectivePoint::new(field.mul(&point.x, &z), field.mul(&point.y, &z2), z)
}

pub(crate) fn jacobian_to_affine<F: Field + ?Sized>(field: &F, point: &ProjectivePoint) -> AffinePoint {
    if point.z.is_one() {
        return AffinePoint::new(point.x.clone(), point.y.clone());
    }

    match field.inv(&point.z) {
        Ok(z_inv) => {
            let z_inv2 = field.square(&z_inv);
            let z_inv3 = field.mul(&z_inv2, &z_inv);
            AffinePoint::new(field.mul(&point.x, &z_inv2), field.mul(&point.y, &z_inv3))
        }
        Err(_) => AffinePoint::identity(),
    }
}

pub(crate) fn lopez_dahab_to_affine<F: Field + ?Sized>(
    field: &F,
    point: &ProjectivePoint,
) -> AffinePoint {
    if point.z.is_one() {
        return AffinePoint::new(point.x.clone(), point.y.clone());
    }

    match field.inv(&point.z) {
        Ok(z_inv) => AffinePoint::new(
            field.mul(&point.x, &z_inv),
            field.mul(&point.y, &field.square(&z_inv)),
        ),
        Err(_) => AffinePoint::identity(),
    }
}
