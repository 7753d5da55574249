//! SM2 decryption.
//!
//! ## Algorithm
//!
//! ```text
//! B1: get C1 from C and verify that it satisfies the curve equation
//! B2: compute point S = [h]C1, error if S is the point at infinity
//! B3: compute [dB]C1 = (x2, y2)
//! B4: compute t = KDF(x2 || y2, klen), error if t is all zero
//! B5: get C2 from C and compute M' = C2 xor t
//! B6: compute u = Hash(x2 || M' || y2), error if u != C3
//! B7: output the plaintext M'
//! ```

use super::{Cipher, Mode, checksum, encrypting::EncryptingKey, kdf};
use crate::{Curve, Error, Result, SecretKey};
use core::fmt::{self, Debug};
use subtle::ConstantTimeEq;

/// Represents a decryption key used for decrypting messages using elliptic curve cryptography.
#[derive(Clone)]
pub struct DecryptingKey {
    secret_key: SecretKey,
    encrypting_key: EncryptingKey,
}

impl DecryptingKey {
    /// Creates a new `DecryptingKey` from a `SecretKey` with the default
    /// [`Mode`].
    pub fn new(secret_key: SecretKey) -> Self {
        Self::new_with_mode(secret_key, Mode::default())
    }

    /// Creates a new `DecryptingKey` from a `SecretKey` and sets the
    /// decryption mode.
    pub fn new_with_mode(secret_key: SecretKey, mode: Mode) -> Self {
        let encrypting_key = EncryptingKey::new_with_mode(secret_key.public_key(), mode);
        Self {
            secret_key,
            encrypting_key,
        }
    }

    /// Parse decrypting key from big endian-encoded byte slice containing a
    /// secret scalar value.
    pub fn from_slice(curve: &Curve, slice: &[u8]) -> Result<Self> {
        SecretKey::from_slice(curve, slice).map(Self::new)
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

    /// Get the [`EncryptingKey`] which corresponds to this [`DecryptingKey`].
    pub fn encrypting_key(&self) -> &EncryptingKey {
        &self.encrypting_key
    }

    /// Decrypt a ciphertext encoded in this key's [`Mode`].
    ///
    /// Every failure, including a malformed encoding, is reported as
    /// [`Error::DecryptionFailed`].
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let curve = self.secret_key.curve();
        let cipher = Cipher::from_slice(curve, ciphertext, self.encrypting_key.mode())
            .map_err(|_| Error::DecryptionFailed)?;
        self.decrypt_cipher(&cipher)
    }

    /// Decrypt ciphertext segments.
    ///
    /// Every failure is reported as [`Error::DecryptionFailed`].
    pub fn decrypt_cipher(&self, cipher: &Cipher) -> Result<Vec<u8>> {
        self.try_decrypt(cipher).map_err(|_| {
            tracing::debug!("SM2 decryption failed");
            Error::DecryptionFailed
        })
    }

    fn try_decrypt(&self, cipher: &Cipher) -> Result<Vec<u8>> {
        let curve = self.secret_key.curve();

        // B1: verify that point c1 satisfies the elliptic curve
        let c1 = curve.decode_point(cipher.c1())?;

        // B2: compute point S = [h]C1
        if curve.mul(&c1, curve.cofactor()).is_identity() {
            return Err(Error::DecryptionFailed);
        }

        // B3: compute [dB]C1 = (x2, y2)
        let point = curve.mul(&c1, self.secret_key.as_scalar());

        // B4: compute t = KDF(x2 || y2, klen)
        // B5: get C2 from C and compute M' = C2 xor t
        let msg = kdf(curve, &point, cipher.c2())?.ok_or(Error::DecryptionFailed)?;

        // B6: compute u = Hash(x2 || M' || y2), error if u != C3
        let u = checksum(curve, &point, &msg)?;
        if !bool::from(u.as_slice().ct_eq(cipher.c3().as_slice())) {
            return Err(Error::DecryptionFailed);
        }

        // B7: output the plaintext M'
        Ok(msg)
    }
}

//
// Other trait impls
//

impl AsRef<EncryptingKey> for DecryptingKey {
    fn as_ref(&self) -> &EncryptingKey {
        &self.encrypting_key
    }
}

impl Debug for DecryptingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptingKey")
            .field("encrypting_key", self.encrypting_key())
            .finish_non_exhaustive()
    }
}

impl From<SecretKey> for DecryptingKey {
    fn from(secret_key: SecretKey) -> Self {
        Self::new(secret_key)
    }
}
