//! ECDSA signing key.

use super::{Signature, VerifyingKey, hazmat};
use crate::{Curve, Error, Result, SecretKey};
use core::fmt::{self, Debug};
use digest::Digest;
use ecfield::arithmetic::{DEFAULT_MAX_ATTEMPTS, random_scalar};
use rand_core::{CryptoRng, RngCore};
use signature::{RandomizedSigner, hazmat::RandomizedPrehashSigner, rand_core::CryptoRngCore};

/// ECDSA secret key used for signing messages with digest `D`.
pub struct SigningKey<D> {
    secret_key: SecretKey,
    verifying_key: VerifyingKey<D>,
}

impl<D: Digest> SigningKey<D> {
    /// Create a signing key from a secret key.
    pub fn new(secret_key: SecretKey) -> Self {
        let verifying_key = VerifyingKey::new(secret_key.public_key());
        Self {
            secret_key,
            verifying_key,
        }
    }

    /// Generate a random signing key.
    pub fn random<R>(curve: &Curve, rng: &mut R) -> Result<Self>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        SecretKey::random(curve, rng).map(Self::new)
    }

    /// Parse a signing key from a big-endian byte slice containing the
    /// secret scalar.
    pub fn from_slice(curve: &Curve, bytes: &[u8]) -> Result<Self> {
        SecretKey::from_slice(curve, bytes).map(Self::new)
    }

    /// Borrow the secret key.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn as_secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Get the [`VerifyingKey`] which corresponds to this [`SigningKey`].
    pub fn verifying_key(&self) -> &VerifyingKey<D> {
        &self.verifying_key
    }

    /// Hash `msg` with `D` and sign the digest.
    pub fn sign_message<R>(&self, rng: &mut R, msg: &[u8]) -> Result<Signature>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        self.sign_prehash(rng, &D::digest(msg))
    }

    /// Sign a precomputed message digest.
    ///
    /// Ephemeral scalars are redrawn while they yield `r = 0` or `s = 0`,
    /// up to [`DEFAULT_MAX_ATTEMPTS`] times.
    pub fn sign_prehash<R>(&self, rng: &mut R, prehash: &[u8]) -> Result<Signature>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        let curve = self.secret_key.curve();
        let d = self.secret_key.as_scalar();

        // e = HASH(M), z = leftmost bitlen(n) bits of e
        let z = hazmat::bits2int(curve, prehash);

        for attempt in 1..=DEFAULT_MAX_ATTEMPTS {
            // k ∈ [1, n-1]
            let k = random_scalar(curve.order(), rng)?;

            match hazmat::sign_prehashed(curve, d, &k, &z) {
                Err(Error::InvalidScalar) => {
                    tracing::debug!(attempt, "ECDSA ephemeral scalar rejected, retrying");
                }
                result => return result,
            }
        }

        tracing::warn!("ECDSA signing exhausted its attempt budget");
        Err(Error::ExhaustedAttempts)
    }
}

//
// `*Signer` trait impls
//

impl<D: Digest> RandomizedSigner<Signature> for SigningKey<D> {
    fn try_sign_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
    ) -> signature::Result<Signature> {
        self.sign_message(rng, msg).map_err(|_| signature::Error::new())
    }
}

impl<D: Digest> RandomizedPrehashSigner<Signature> for SigningKey<D> {
    fn sign_prehash_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        prehash: &[u8],
    ) -> signature::Result<Signature> {
        self.sign_prehash(rng, prehash).map_err(|_| signature::Error::new())
    }
}

//
// Other trait impls
//

impl<D> AsRef<VerifyingKey<D>> for SigningKey<D> {
    fn as_ref(&self) -> &VerifyingKey<D> {
        &self.verifying_key
    }
}

impl<D> Clone for SigningKey<D> {
    fn clone(&self) -> Self {
        Self {
            secret_key: self.secret_key.clone(),
            verifying_key: self.verifying_key.clone(),
        }
    }
}

impl<D> Debug for SigningKey<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

impl<D: Digest> From<SecretKey> for SigningKey<D> {
    fn from(secret_key: SecretKey) -> Self {
        Self::new(secret_key)
    }
}
