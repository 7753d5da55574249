//! Curve point representations.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Point on an elliptic curve in affine coordinates, or the point at
/// infinity.
#[derive(Clone, Debug, Eq)]
pub struct AffinePoint {
    pub(crate) x: BigUint,
    pub(crate) y: BigUint,
    pub(crate) infinity: bool,
}

impl AffinePoint {
    /// Create a finite point from its coordinates.
    ///
    /// The point is not checked against any curve; see
    /// [`Curve::is_on_curve`](crate::Curve::is_on_curve).
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Self {
            x,
            y,
            infinity: false,
        }
    }

    /// Additive identity of the group a.k.a. the point at infinity.
    pub fn identity() -> Self {
        Self {
            x: BigUint::zero(),
            y: BigUint::zero(),
            infinity: true,
        }
    }

    /// Is this the point at infinity?
    pub fn is_identity(&self) -> bool {
        self.infinity
    }

    /// Affine x-coordinate, `None` for the point at infinity.
    pub fn x(&self) -> Option<&BigUint> {
        (!self.infinity).then_some(&self.x)
    }

    /// Affine y-coordinate, `None` for the point at infinity.
    pub fn y(&self) -> Option<&BigUint> {
        (!self.infinity).then_some(&self.y)
    }
}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &Self) -> bool {
        match (self.infinity, other.infinity) {
            (true, true) => true,
            (false, false) => self.x == other.x && self.y == other.y,
            _ => false,
        }
    }
}

/// Point in projective `(X, Y, Z)` coordinates.
///
/// Whether this is a Jacobian or a López-Dahab point is determined by the
/// curve it belongs to. `Z = 0` denotes the point at infinity.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectivePoint {
    pub(crate) x: BigUint,
    pub(crate) y: BigUint,
    pub(crate) z: BigUint,
}

impl ProjectivePoint {
    /// Create a point from raw projective coordinates.
    pub fn new(x: BigUint, y: BigUint, z: BigUint) -> Self {
        Self { x, y, z }
    }

    /// Is this the point at infinity?
    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    /// Projective `X` coordinate.
    pub fn x(&self) -> &BigUint {
        &self.x
    }

    /// Projective `Y` coordinate.
    pub fn y(&self) -> &BigUint {
        &self.y
    }

    /// Projective `Z` coordinate.
    pub fn z(&self) -> &BigUint {
        &self.z
    }

    /// Canonical Jacobian point at infinity `(1, 1, 0)`.
    pub(crate) fn jacobian_identity() -> Self {
        Self::new(BigUint::one(), BigUint::one(), BigUint::zero())
    }

    /// Canonical López-Dahab point at infinity `(1, 0, 0)`.
    pub(crate) fn lopez_dahab_identity() -> Self {
        Self::new(BigUint::one(), BigUint::zero(), BigUint::zero())
    }
}

/// Coordinate system a [`Point`] is expressed in.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum CoordinateSystem {
    /// `(x, y)` plus an infinity flag.
    Affine,

    /// `x = X/Z², y = Y/Z³`.
    Jacobian,

    /// `x = X/Z, y = Y/Z²`.
    LopezDahab,
}

/// Point in any of the supported coordinate systems.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Point {
    /// Affine point.
    Affine(AffinePoint),

    /// Jacobian point.
    Jacobian(ProjectivePoint),

    /// López-Dahab point.
    LopezDahab(ProjectivePoint),
}

impl Point {
    /// Coordinate system of this point.
    pub fn system(&self) -> CoordinateSystem {
        match self {
            Point::Affine(_) => CoordinateSystem::Affine,
            Point::Jacobian(_) => CoordinateSystem::Jacobian,
            Point::LopezDahab(_) => CoordinateSystem::LopezDahab,
        }
    }

    /// Is this the point at infinity?
    pub fn is_identity(&self) -> bool {
        match self {
            Point::Affine(point) => point.is_identity(),
            Point::Jacobian(point) | Point::LopezDahab(point) => point.is_identity(),
        }
    }
}

impl From<AffinePoint> for Point {
    fn from(point: AffinePoint) -> Point {
        Point::Affine(point)
    }
}
