//! SM2 encryption.
//!
//! ## Algorithm
//!
//! ```text
//! A1: generate a random number k in [1, n-1]
//! A2: compute point C1 = [k]G = (x1, y1)
//! A3: compute point S = [h]PB, error if S is the point at infinity
//! A4: compute point [k]PB = (x2, y2)
//! A5: compute t = KDF(x2 || y2, klen), return to A1 if t is all zero
//! A6: compute C2 = M xor t
//! A7: compute C3 = Hash(x2 || M || y2)
//! A8: output the ciphertext C = C1 || C2 || C3
//! ```

use super::{Cipher, Mode, hazmat};
use crate::{AffinePoint, Curve, Error, PublicKey, Result};
use ecfield::arithmetic::{DEFAULT_MAX_ATTEMPTS, random_scalar};
use rand_core::{CryptoRng, RngCore};

/// Represents an encryption key used for encrypting messages using elliptic curve cryptography.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncryptingKey {
    public_key: PublicKey,
    mode: Mode,
}

impl EncryptingKey {
    /// Initialize [`EncryptingKey`] from PublicKey with the default
    /// [`Mode`].
    pub fn new(public_key: PublicKey) -> Self {
        Self::new_with_mode(public_key, Mode::default())
    }

    /// Initialize [`EncryptingKey`] from PublicKey and set Encryption mode
    pub fn new_with_mode(public_key: PublicKey, mode: Mode) -> Self {
        Self { public_key, mode }
    }

    /// Initialize [`EncryptingKey`] from a SEC1-encoded public key.
    pub fn from_sec1_bytes(curve: &Curve, bytes: &[u8]) -> Result<Self> {
        PublicKey::from_sec1_bytes(curve, bytes).map(Self::new)
    }

    /// Initialize [`EncryptingKey`] from an affine point.
    ///
    /// Returns an [`Error`] if the given affine point is not a legal public
    /// key, e.g. the point at infinity.
    pub fn from_affine(curve: &Curve, affine: AffinePoint) -> Result<Self> {
        PublicKey::from_affine(curve, affine).map(Self::new)
    }

    /// Borrow the inner [`AffinePoint`] for this public key.
    pub fn as_affine(&self) -> &AffinePoint {
        self.public_key.as_affine()
    }

    /// Borrow the public key.
    pub fn as_public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Segment order of the ciphertexts produced by this key.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Convert this [`EncryptingKey`] into the
    /// `Elliptic-Curve-Point-to-Octet-String` encoding described in
    /// SEC 1: Elliptic Curve Cryptography (Version 2.0) section 2.3.3
    /// (page 10).
    ///
    /// <http://www.secg.org/sec1-v2.pdf>
    pub fn to_sec1_bytes(&self, compress: bool) -> Result<Vec<u8>> {
        self.public_key.to_sec1_bytes(compress)
    }

    /// Encrypt `msg` and encode the ciphertext in this key's [`Mode`].
    pub fn encrypt<R>(&self, rng: &mut R, msg: &[u8]) -> Result<Vec<u8>>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        self.encrypt_cipher(rng, msg)
            .map(|cipher| cipher.to_vec(self.mode))
    }

    /// Encrypt `msg`, returning the ciphertext segments.
    ///
    /// Ephemeral scalars are redrawn while the derived mask is all zero, up
    /// to [`DEFAULT_MAX_ATTEMPTS`] times.
    pub fn encrypt_cipher<R>(&self, rng: &mut R, msg: &[u8]) -> Result<Cipher>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        let n = self.public_key.curve().order();

        for attempt in 1..=DEFAULT_MAX_ATTEMPTS {
            // A1: generate a random number k in [1, n-1]
            let k = random_scalar(n, rng)?;

            match hazmat::encrypt_with_k(&self.public_key, &k, msg) {
                Err(Error::InvalidScalar) => {
                    tracing::debug!(attempt, "SM2 encryption mask is all zero, retrying");
                }
                result => return result,
            }
        }

        tracing::warn!("SM2 encryption exhausted its attempt budget");
        Err(Error::ExhaustedAttempts)
    }
}

impl From<PublicKey> for EncryptingKey {
    fn from(value: PublicKey) -> Self {
        Self::new(value)
    }
}

impl AsRef<AffinePoint> for EncryptingKey {
    fn as_ref(&self) -> &AffinePoint {
        self.as_affine()
    }
}
