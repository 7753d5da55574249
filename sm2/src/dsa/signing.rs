//! Support for SM2DSA signing.
//!
//! ## Algorithm
//!
//! ```text
//! A1: set M~=ZA || M
//! A2: calculate e=Hv(M~)
//! A3: pick a random number k in [1, n-1] via a random number generator
//! A4: calculate the elliptic curve point (x1, y1)=[k]G
//! A5: calculate r=(e+x1) modn, return to A3 if r=0 or r+k=n
//! A6: calculate s=((1+dA)^(-1)*(k-r*dA)) modn, return to A3 if s=0
//! A7: the digital signature of M is (r, s)
//! ```

use super::{Signature, VerifyingKey, hazmat};
use crate::{Curve, DistId, Error, Result, SecretKey};
use core::fmt::{self, Debug};
use ecfield::arithmetic::{DEFAULT_MAX_ATTEMPTS, random_scalar};
use rand_core::{CryptoRng, RngCore};
use signature::{
    KeypairRef, RandomizedSigner, hazmat::RandomizedPrehashSigner, rand_core::CryptoRngCore,
};

/// SM2DSA secret key used for signing messages and producing signatures.
///
/// ## Usage
///
/// The [`signature`] crate defines the following traits which are the
/// primary API for signing:
///
/// - [`RandomizedSigner`]: sign a message using this key
/// - [`RandomizedPrehashSigner`]: sign the low-level raw output bytes of a message digest
#[derive(Clone)]
pub struct SigningKey {
    /// Secret key.
    secret_key: SecretKey,

    /// Verifying key for this signing key.
    verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Create signing key from a signer's distinguishing identifier and
    /// secret key.
    ///
    /// `d = n - 1` is rejected: `1 + d` must be invertible modulo `n`.
    pub fn new(distid: &DistId, secret_key: SecretKey) -> Result<Self> {
        let curve = secret_key.curve();
        if secret_key.as_scalar() + 1u32 == *curve.order() {
            return Err(Error::InvalidPrivateKey);
        }

        let verifying_key = VerifyingKey::new(distid, secret_key.public_key())?;
        Ok(Self {
            secret_key,
            verifying_key,
        })
    }

    /// Generate a random signing key.
    pub fn random<R>(curve: &Curve, distid: &DistId, rng: &mut R) -> Result<Self>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        for _ in 0..DEFAULT_MAX_ATTEMPTS {
            match Self::new(distid, SecretKey::random(curve, rng)?) {
                Err(Error::InvalidPrivateKey) => continue,
                result => return result,
            }
        }

        Err(Error::ExhaustedAttempts)
    }

    /// Parse signing key from big endian-encoded byte slice containing a secret
    /// scalar value.
    pub fn from_slice(curve: &Curve, distid: &DistId, slice: &[u8]) -> Result<Self> {
        Self::new(distid, SecretKey::from_slice(curve, slice)?)
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
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Get the distinguishing identifier for this key.
    pub fn distid(&self) -> &DistId {
        self.verifying_key.distid()
    }

    /// Sign `msg`, hashing it together with the signer's identity hash.
    pub fn sign_message<R>(&self, rng: &mut R, msg: &[u8]) -> Result<Signature>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        // A1: set M~=ZA || M
        let hash = self.verifying_key.hash_msg(msg);
        self.sign_prehash(rng, &hash)
    }

    /// Sign the precomputed hash `e = H(Z ‖ M)`.
    ///
    /// Ephemeral scalars are redrawn while they yield `r = 0`, `r + k = n`
    /// or `s = 0`, up to [`DEFAULT_MAX_ATTEMPTS`] times.
    pub fn sign_prehash<R>(&self, rng: &mut R, prehash: &[u8]) -> Result<Signature>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        let curve = self.secret_key.curve();

        for attempt in 1..=DEFAULT_MAX_ATTEMPTS {
            // A3: pick a random number k in [1, n-1] via a random number generator
            let k = random_scalar(curve.order(), rng)?;

            match hazmat::sign_prehashed(curve, self.secret_key.as_scalar(), &k, prehash) {
                Err(Error::InvalidScalar) => {
                    tracing::debug!(attempt, "SM2DSA ephemeral scalar rejected, retrying");
                }
                result => return result,
            }
        }

        tracing::warn!("SM2DSA signing exhausted its attempt budget");
        Err(Error::ExhaustedAttempts)
    }
}

//
// `*Signer` trait impls
//

impl RandomizedPrehashSigner<Signature> for SigningKey {
    fn sign_prehash_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        prehash: &[u8],
    ) -> signature::Result<Signature> {
        self.sign_prehash(rng, prehash).map_err(|_| signature::Error::new())
    }
}

impl RandomizedSigner<Signature> for SigningKey {
    fn try_sign_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
    ) -> signature::Result<Signature> {
        self.sign_message(rng, msg).map_err(|_| signature::Error::new())
    }
}

//
// Other trait impls
//

impl AsRef<VerifyingKey> for SigningKey {
    fn as_ref(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

impl KeypairRef for SigningKey {
    type VerifyingKey = VerifyingKey;
}
