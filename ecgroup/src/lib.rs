#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::checked_conversions,
    clippy::implicit_saturating_sub,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//! Elliptic curve groups over GF(p) and GF(2^m).
//!
//! Three curve families are supported, each with its own projective
//! arithmetic:
//!
//! - short Weierstrass curves `y² = x³ + ax + b` (Jacobian coordinates),
//! - Montgomery curves `By² = x³ + Ax² + x` (Jacobian coordinates),
//! - binary curves `y² + xy = x³ + ax² + b`, pseudo-random and Koblitz
//!   (López-Dahab coordinates).
//!
//! A [`Curve`] hides which family it belongs to: callers add, double and
//! multiply points without ever matching on the curve equation.
//!
//! ## ⚠️ Security Warning
//!
//! Scalar multiplication has a regular operation sequence, but the
//! underlying big-integer arithmetic is not constant time.
//!
//! ## Usage
//!
//! ```
//! use ecgroup::{NamedCurve, BigUint};
//!
//! let curve = NamedCurve::Secp256k1.curve()?;
//! let three_g = curve.mul_generator(&BigUint::from(3u32));
//! let g_plus_2g = curve.add_affine(
//!     curve.generator(),
//!     &curve.mul_generator(&BigUint::from(2u32)),
//! );
//! assert_eq!(three_g, g_plus_2g);
//!
//! let encoded = curve.encode_point(&three_g, true)?;
//! assert_eq!(curve.decode_point(&encoded)?, three_g);
//! # Ok::<(), ecgroup::Error>(())
//! ```

pub mod coordinates;
pub mod sec1;

mod curve;
mod named;
mod params;
mod point;
mod point_arithmetic;

pub use crate::{
    curve::Curve,
    named::NamedCurve,
    params::{CurveForm, CurveParams},
    point::{AffinePoint, CoordinateSystem, Point, ProjectivePoint},
};
pub use ecfield::{self, BaseField, BigUint, Error, Field, Result};
