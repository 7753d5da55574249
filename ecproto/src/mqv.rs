//! Elliptic Curve Menezes-Qu-Vanstone key agreement (SEC 1 section 3.4).
//!
//! Each party contributes a static and an ephemeral key pair. Binding the
//! ephemeral keys into the shared point gives implicit key authentication
//! without signatures.
//!
//! ```
//! use ecproto::{KeyPair, NamedCurve, mqv};
//! use rand_core::OsRng;
//!
//! let curve = NamedCurve::Secp256r1.curve()?;
//! let (u1, u2) = (KeyPair::random(curve, &mut OsRng)?, KeyPair::random(curve, &mut OsRng)?);
//! let (v1, v2) = (KeyPair::random(curve, &mut OsRng)?, KeyPair::random(curve, &mut OsRng)?);
//!
//! let alice = mqv::agree(&u1, &u2, v1.public_key(), v2.public_key())?;
//! let bob = mqv::agree(&v1, &v2, u1.public_key(), u2.public_key())?;
//! assert_eq!(alice.raw_secret_bytes(), bob.raw_secret_bytes());
//! # Ok::<(), ecproto::Error>(())
//! ```

use crate::{Error, KeyPair, PublicKey, Result, ecdh::SharedSecret};
use ecgroup::{AffinePoint, Curve};
use num_bigint::BigUint;
use num_traits::One;

/// Associate value of a point: `2^L + (x mod 2^L)` with
/// `L = ⌈bitlen(n) / 2⌉`.
fn associate_value(curve: &Curve, point: &AffinePoint) -> Result<BigUint> {
    let half = curve.order().bits().div_ceil(2);
    let bound = BigUint::one() << half;
    let x = point.x().ok_or(Error::NoAgreement)?;
    Ok(&bound + (x % &bound))
}

/// Compute the MQV shared secret.
///
/// `static_key` and `ephemeral_key` are our own key pairs `(u1, u2)`,
/// `peer_static` and `peer_ephemeral` the peer's public keys `(v1, v2)`.
///
/// Fails with [`Error::NoAgreement`] if any key lives on another curve or
/// if the shared point is the point at infinity.
pub fn agree(
    static_key: &KeyPair,
    ephemeral_key: &KeyPair,
    peer_static: &PublicKey,
    peer_ephemeral: &PublicKey,
) -> Result<SharedSecret> {
    let curve = static_key.secret_key().curve();
    let same_curve = [
        ephemeral_key.public_key().curve(),
        peer_static.curve(),
        peer_ephemeral.curve(),
    ]
    .into_iter()
    .all(|other| other == curve);

    if !same_curve {
        return Err(Error::NoAgreement);
    }

    let n = curve.order();

    // s = (u2.d + avf(U2)·u1.d) mod n
    let e_u = associate_value(curve, ephemeral_key.public_key().as_affine())?;
    let s = (ephemeral_key.secret_key().as_scalar() + e_u * static_key.secret_key().as_scalar())
        % n;

    // P = h·s·(V2 + avf(V2)·V1)
    let e_v = associate_value(curve, peer_ephemeral.as_affine())?;
    let combined = curve.lincomb(
        (peer_ephemeral.as_affine(), &BigUint::one()),
        (peer_static.as_affine(), &e_v),
    );
    let point = curve.mul(&combined, &(curve.cofactor() * s));

    if point.is_identity() {
        tracing::debug!("MQV shared point is the point at infinity");
        return Err(Error::NoAgreement);
    }

    SharedSecret::new(curve, &point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecgroup::NamedCurve;
    use rand_core::OsRng;

    #[test]
    fn associate_value_bounds() {
        let curve = NamedCurve::Secp160r1.curve().unwrap();
        // n has 161 bits, so L = 81
        let bound = BigUint::one() << 81u32;

        for k in 1u32..8 {
            let avf = associate_value(curve, &curve.mul_generator(&BigUint::from(k))).unwrap();
            assert!(avf >= bound);
            assert!(avf < (&bound << 1u32));
        }
    }

    #[test]
    fn rejects_foreign_keys() {
        let curve = NamedCurve::Secp256r1.curve().unwrap();
        let other = NamedCurve::Sm2p256v1.curve().unwrap();
        let u1 = KeyPair::random(curve, &mut OsRng).unwrap();
        let u2 = KeyPair::random(curve, &mut OsRng).unwrap();
        let v1 = KeyPair::random(other, &mut OsRng).unwrap();
        let v2 = KeyPair::random(curve, &mut OsRng).unwrap();

        assert_eq!(
            agree(&u1, &u2, v1.public_key(), v2.public_key()).unwrap_err(),
            Error::NoAgreement
        );
    }
}
