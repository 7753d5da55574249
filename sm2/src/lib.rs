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

//! SM2 public key cryptography as defined in GM/T 0003-2012 (GB/T 32918)
//! and [draft-shen-sm2-ecdsa].
//!
//! - [`dsa`]: the SM2 Digital Signature Algorithm (SM2DSA)
//! - [`ke`]: SM2 key exchange with optional key confirmation
//! - [`pke`]: SM2 public key encryption
//!
//! All three are built on the user information hash `Z` (see [`hash_z`])
//! and the SM3 hash function. They run on the recommended `sm2p256v1`
//! curve (see [`curve`]) but accept keys on any [`Curve`].
//!
//! ## ⚠️ Security Warning
//!
//! The big-integer arithmetic underneath is not constant time. USE AT YOUR
//! OWN RISK!
//!
//! [draft-shen-sm2-ecdsa]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02

#[cfg(feature = "dsa")]
pub mod dsa;
#[cfg(feature = "ke")]
pub mod ke;
#[cfg(feature = "pke")]
pub mod pke;

mod distid;

pub use crate::distid::hash_z;
pub use ecproto::{
    self, AffinePoint, BigUint, Curve, Error, KeyPair, NamedCurve, PublicKey, Result, SecretKey,
};
pub use sm3;

use ecfield::arithmetic::to_fixed_bytes;

/// Type which represents distinguishing identifiers.
pub type DistId = str;

/// SM3 hash output.
pub type Hash = sm3::digest::Output<sm3::Sm3>;

/// Distinguishing identifier used when the parties agree on none, as
/// recommended by GB/T 35276.
pub const DEFAULT_DISTID: &DistId = "1234567812345678";

/// The `sm2p256v1` curve recommended by GM/T 0003.5.
pub fn curve() -> Result<&'static Curve> {
    NamedCurve::Sm2p256v1.curve()
}

/// Serialize both coordinates of a finite point at the field byte length.
pub(crate) fn coordinates(curve: &Curve, point: &AffinePoint) -> Result<(Vec<u8>, Vec<u8>)> {
    let (Some(x), Some(y)) = (point.x(), point.y()) else {
        return Err(Error::InvalidPoint);
    };

    let len = curve.field_len();
    Ok((to_fixed_bytes(x, len)?, to_fixed_bytes(y, len)?))
}
