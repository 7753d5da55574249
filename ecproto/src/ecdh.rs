//! Elliptic Curve Diffie-Hellman Support.
//!
//! This module contains a high-level interface for performing
//! Diffie-Hellman key exchanges, plain and with cofactor multiplication,
//! on any curve.
//!
//! # Usage
//!
//! This usage example is from the perspective of two participants in the
//! exchange, nicknamed "Alice" and "Bob".
//!
//! ```
//! use ecproto::{NamedCurve, PublicKey, ecdh::EphemeralSecret, kdf::X963Kdf};
//! use rand_core::OsRng;
//! use sha2::Sha256;
//!
//! let curve = NamedCurve::Sect233k1.curve()?;
//!
//! // Alice
//! let alice_secret = EphemeralSecret::random(curve, &mut OsRng)?;
//! let alice_pk_bytes = alice_secret.public_key().to_sec1_bytes(true)?;
//!
//! // Bob
//! let bob_secret = EphemeralSecret::random(curve, &mut OsRng)?;
//! let bob_pk_bytes = bob_secret.public_key().to_sec1_bytes(true)?;
//!
//! // Alice decodes Bob's serialized public key and computes a shared secret from it
//! let bob_public = PublicKey::from_sec1_bytes(curve, &bob_pk_bytes)?;
//! let alice_shared = alice_secret.diffie_hellman(&bob_public)?;
//!
//! // Bob decodes Alice's serialized public key and computes the same shared secret
//! let alice_public = PublicKey::from_sec1_bytes(curve, &alice_pk_bytes)?;
//! let bob_shared = bob_secret.diffie_hellman(&alice_public)?;
//!
//! // Both participants arrive on the same shared secret
//! assert_eq!(alice_shared.raw_secret_bytes(), bob_shared.raw_secret_bytes());
//!
//! // ... and stretch it into the same key
//! let kdf = X963Kdf::<Sha256>::new();
//! assert_eq!(
//!     alice_shared.derive_key(&kdf, b"context", 32)?,
//!     bob_shared.derive_key(&kdf, b"context", 32)?,
//! );
//! # Ok::<(), ecproto::Error>(())
//! ```

use crate::{Error, PublicKey, Result, SecretKey, kdf::Kdf};
use core::fmt;
use ecfield::arithmetic::to_fixed_bytes;
use ecgroup::{AffinePoint, Curve};
use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroizing;

/// Compute `S = d·Q` and return its x-coordinate as the shared secret.
///
/// Fails with [`Error::InvalidPublicKey`] if the keys live on different
/// curves and with [`Error::DegenerateSharedSecret`] if `S` is the point at
/// infinity.
pub fn diffie_hellman(secret_key: &SecretKey, public_key: &PublicKey) -> Result<SharedSecret> {
    let point = shared_point(secret_key.curve(), secret_key.as_scalar(), public_key)?;
    SharedSecret::new(secret_key.curve(), &point)
}

/// Cofactor Diffie-Hellman: compute `S = (h·d)·Q`.
///
/// Multiplying by the cofactor maps any small-order component of `Q` to
/// the identity. Errors as in [`diffie_hellman`].
pub fn cofactor_diffie_hellman(
    secret_key: &SecretKey,
    public_key: &PublicKey,
) -> Result<SharedSecret> {
    let curve = secret_key.curve();
    let hd = curve.cofactor() * secret_key.as_scalar();
    let point = shared_point(curve, &hd, public_key)?;
    SharedSecret::new(curve, &point)
}

pub(crate) fn shared_point(
    curve: &Curve,
    k: &BigUint,
    public_key: &PublicKey,
) -> Result<AffinePoint> {
    if public_key.curve() != curve {
        return Err(Error::InvalidPublicKey);
    }

    let point = curve.mul(public_key.as_affine(), k);
    if point.is_identity() {
        return Err(Error::DegenerateSharedSecret);
    }

    Ok(point)
}

/// Ephemeral Diffie-Hellman secret.
///
/// A secret key meant to be used for exactly one key exchange: computing
/// the shared secret consumes it.
pub struct EphemeralSecret {
    secret_key: SecretKey,
}

impl EphemeralSecret {
    /// Generate a random ephemeral secret.
    pub fn random<R>(curve: &Curve, rng: &mut R) -> Result<Self>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        SecretKey::random(curve, rng).map(|secret_key| Self { secret_key })
    }

    /// Public key to send to the peer.
    pub fn public_key(&self) -> PublicKey {
        self.secret_key.public_key()
    }

    /// Compute the shared secret with the peer's public key.
    pub fn diffie_hellman(self, public_key: &PublicKey) -> Result<SharedSecret> {
        diffie_hellman(&self.secret_key, public_key)
    }
}

impl fmt::Debug for EphemeralSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EphemeralSecret").finish_non_exhaustive()
    }
}

/// Shared secret value computed via ECDH key agreement.
///
/// This value is the x-coordinate of the shared point, serialized
/// big-endian at the field byte length. It is not uniformly random and
/// should be passed through a [`Kdf`] before being used as a key.
pub struct SharedSecret {
    secret_bytes: Zeroizing<Vec<u8>>,
}

impl SharedSecret {
    pub(crate) fn new(curve: &Curve, point: &AffinePoint) -> Result<Self> {
        let x = point.x().ok_or(Error::DegenerateSharedSecret)?;
        let secret_bytes = Zeroizing::new(to_fixed_bytes(x, curve.field_len())?);
        Ok(Self { secret_bytes })
    }

    /// Shared secret value, serialized as the x-coordinate of the shared
    /// point.
    ///
    /// # ⚠️ WARNING: NOT UNIFORMLY RANDOM! ⚠️
    ///
    /// This value is not uniformly random and should not be used directly
    /// as a cryptographic key for anything which requires that property.
    pub fn raw_secret_bytes(&self) -> &[u8] {
        &self.secret_bytes
    }

    /// Derive `len` bytes of key material from the shared secret.
    pub fn derive_key<K: Kdf + ?Sized>(
        &self,
        kdf: &K,
        info: &[u8],
        len: usize,
    ) -> Result<Zeroizing<Vec<u8>>> {
        kdf.derive(&self.secret_bytes, info, len).map(Zeroizing::new)
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSecret").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecgroup::NamedCurve;
    use rand_core::OsRng;

    #[test]
    fn mismatched_curves() {
        let p256 = NamedCurve::Secp256r1.curve().unwrap();
        let k256 = NamedCurve::Secp256k1.curve().unwrap();
        let alice = SecretKey::random(p256, &mut OsRng).unwrap();
        let bob = SecretKey::random(k256, &mut OsRng).unwrap();

        assert_eq!(
            diffie_hellman(&alice, &bob.public_key()).unwrap_err(),
            Error::InvalidPublicKey
        );
    }

    #[test]
    fn shared_secret_width() {
        let curve = NamedCurve::Secp521r1.curve().unwrap();
        let alice = SecretKey::random(curve, &mut OsRng).unwrap();
        let bob = SecretKey::random(curve, &mut OsRng).unwrap();

        let shared = diffie_hellman(&alice, &bob.public_key()).unwrap();
        assert_eq!(shared.raw_secret_bytes().len(), 66);
    }
}
