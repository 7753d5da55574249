//! Elliptic Curve Integrated Encryption Scheme (ECIES) as defined in
//! SEC 1: Elliptic Curve Cryptography (Version 2.0) section 5.1.
//!
//! Encryption generates an ephemeral key pair `(k, R)`, agrees on a
//! shared secret `Z` with the recipient and derives
//! `KE ‖ KM = KDF(Z, SharedInfo1)`. The message is encrypted under `KE` and
//! the ciphertext authenticated with `HMAC_KM(C ‖ SharedInfo2)`. The wire
//! format is `R ‖ C ‖ T`.
//!
//! ## Usage
//!
//! ```
//! use ecproto::{NamedCurve, SecretKey, ecies::{Ecies, EciesConfig}};
//! use rand_core::OsRng;
//! use sha2::Sha256;
//!
//! let curve = NamedCurve::Secp256r1.curve()?;
//! let secret_key = SecretKey::random(curve, &mut OsRng)?;
//! let ecies = Ecies::<Sha256>::new(EciesConfig::default());
//!
//! let ciphertext = ecies.encrypt(&mut OsRng, &secret_key.public_key(), b"plaintext")?;
//! let bytes = ciphertext.to_vec();
//!
//! assert_eq!(ecies.decrypt_slice(&secret_key, &bytes)?, b"plaintext");
//! # Ok::<(), ecproto::Error>(())
//! ```

use crate::{
    Error, PublicKey, Result, SecretKey,
    cipher::{SymmetricCipher, XorCipher},
    ecdh::{SharedSecret, shared_point},
    kdf::{Kdf, X963Kdf},
};
use core::{
    fmt::{self, Debug},
    marker::PhantomData,
};
use digest::{Digest, core_api::BlockSizeUser};
use ecfield::arithmetic::DEFAULT_MAX_ATTEMPTS;
use ecgroup::sec1::Tag;
use hmac::{Mac, SimpleHmac};
use rand_core::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// ECIES options shared by both parties.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EciesConfig {
    /// `SharedInfo1`: context mixed into the key derivation.
    pub shared_info1: Vec<u8>,

    /// `SharedInfo2`: context authenticated together with the ciphertext.
    pub shared_info2: Vec<u8>,

    /// Length in bytes of the MAC key `KM`.
    pub mac_key_len: usize,

    /// Send the ephemeral public key in compressed form.
    pub compress: bool,
}

impl Default for EciesConfig {
    fn default() -> Self {
        Self {
            shared_info1: Vec::new(),
            shared_info2: Vec::new(),
            mac_key_len: 32,
            compress: false,
        }
    }
}

/// ECIES ciphertext `{R, C, T}`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EciesCiphertext {
    ephemeral_key: Vec<u8>,
    ciphertext: Vec<u8>,
    tag: Vec<u8>,
}

impl EciesCiphertext {
    /// SEC1 encoding of the ephemeral public key `R`.
    pub fn ephemeral_key(&self) -> &[u8] {
        &self.ephemeral_key
    }

    /// Symmetric ciphertext `C`.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Authentication tag `T`.
    pub fn tag(&self) -> &[u8] {
        &self.tag
    }

    /// Encode as `R ‖ C ‖ T`.
    pub fn to_vec(&self) -> Vec<u8> {
        [self.ephemeral_key.as_slice(), self.ciphertext.as_slice(), self.tag.as_slice()].concat()
    }
}

/// ECIES with digest `D` (for the MAC), key derivation function `K` and
/// symmetric cipher `C`.
pub struct Ecies<D, K = X963Kdf<D>, C = XorCipher> {
    config: EciesConfig,
    kdf: K,
    cipher: C,
    digest: PhantomData<fn() -> D>,
}

impl<D, K, C> Ecies<D, K, C>
where
    D: Digest + BlockSizeUser,
    K: Kdf,
    C: SymmetricCipher,
{
    /// Create the scheme with default KDF and cipher instances.
    pub fn new(config: EciesConfig) -> Self
    where
        K: Default,
        C: Default,
    {
        Self::with_primitives(config, K::default(), C::default())
    }

    /// Create the scheme with explicit KDF and cipher instances.
    pub fn with_primitives(config: EciesConfig, kdf: K, cipher: C) -> Self {
        Self {
            config,
            kdf,
            cipher,
            digest: PhantomData,
        }
    }

    /// Scheme options.
    pub fn config(&self) -> &EciesConfig {
        &self.config
    }

    /// Encrypt `msg` to `public_key`.
    pub fn encrypt<R>(
        &self,
        rng: &mut R,
        public_key: &PublicKey,
        msg: &[u8],
    ) -> Result<EciesCiphertext>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        let curve = public_key.curve();

        for attempt in 1..=DEFAULT_MAX_ATTEMPTS {
            // ephemeral key pair (k, R)
            let ephemeral = SecretKey::random(curve, rng)?;

            // Z = k·Q, retried if it is the point at infinity
            let point = match shared_point(curve, ephemeral.as_scalar(), public_key) {
                Err(Error::DegenerateSharedSecret) => {
                    tracing::debug!(attempt, "ECIES shared secret degenerate, retrying");
                    continue;
                }
                result => result?,
            };
            let shared = SharedSecret::new(curve, &point)?;

            // KE ‖ KM = KDF(Z, SharedInfo1)
            let (ke, km) = self.derive_keys(&shared, msg.len())?;

            // C = E_KE(M)
            let ciphertext = self.cipher.encrypt(&ke, &self.iv(), msg)?;

            // T = MAC_KM(C ‖ SharedInfo2)
            let tag = self.mac(&km, &ciphertext)?;

            let ephemeral_key = ephemeral.public_key().to_sec1_bytes(self.config.compress)?;

            return Ok(EciesCiphertext {
                ephemeral_key,
                ciphertext,
                tag,
            });
        }

        tracing::warn!("ECIES encryption exhausted its attempt budget");
        Err(Error::ExhaustedAttempts)
    }

    /// Decrypt a ciphertext with `secret_key`.
    ///
    /// Every failure is reported as [`Error::DecryptionFailed`].
    pub fn decrypt(
        &self,
        secret_key: &SecretKey,
        ciphertext: &EciesCiphertext,
    ) -> Result<Vec<u8>> {
        self.try_decrypt(secret_key, ciphertext).map_err(|_| {
            tracing::debug!("ECIES decryption failed");
            Error::DecryptionFailed
        })
    }

    /// Parse `R ‖ C ‖ T` and decrypt it with `secret_key`.
    ///
    /// Every failure, including a malformed encoding, is reported as
    /// [`Error::DecryptionFailed`].
    pub fn decrypt_slice(&self, secret_key: &SecretKey, bytes: &[u8]) -> Result<Vec<u8>> {
        let ciphertext = self.parse(secret_key, bytes).ok_or(Error::DecryptionFailed)?;
        self.decrypt(secret_key, &ciphertext)
    }

    fn parse(&self, secret_key: &SecretKey, bytes: &[u8]) -> Option<EciesCiphertext> {
        let tag = Tag::from_u8(*bytes.first()?).ok()?;
        let point_len = tag.message_len(secret_key.curve().field_len());
        let tag_len = <D as Digest>::output_size();

        let (ephemeral_key, rest) = bytes.split_at_checked(point_len)?;
        let (ciphertext, tag) = rest.split_at_checked(rest.len().checked_sub(tag_len)?)?;

        Some(EciesCiphertext {
            ephemeral_key: ephemeral_key.to_vec(),
            ciphertext: ciphertext.to_vec(),
            tag: tag.to_vec(),
        })
    }

    fn try_decrypt(
        &self,
        secret_key: &SecretKey,
        ciphertext: &EciesCiphertext,
    ) -> Result<Vec<u8>> {
        let curve = secret_key.curve();

        // R must be a legal public key
        let ephemeral = PublicKey::from_sec1_bytes(curve, &ciphertext.ephemeral_key)?;

        // Z = d·R
        let point = shared_point(curve, secret_key.as_scalar(), &ephemeral)?;
        let shared = SharedSecret::new(curve, &point)?;

        let (ke, km) = self.derive_keys(&shared, ciphertext.ciphertext.len())?;

        let expected = self.mac(&km, &ciphertext.ciphertext)?;
        if !bool::from(expected.ct_eq(&ciphertext.tag)) {
            return Err(Error::DecryptionFailed);
        }

        self.cipher.decrypt(&ke, &self.iv(), &ciphertext.ciphertext)
    }

    /// Derive `KE ‖ KM` for a message of `msg_len` bytes.
    fn derive_keys(
        &self,
        shared: &SharedSecret,
        msg_len: usize,
    ) -> Result<(Zeroizing<Vec<u8>>, Zeroizing<Vec<u8>>)> {
        let ke_len = self.cipher.key_size(msg_len);
        let len = ke_len
            .checked_add(self.config.mac_key_len)
            .ok_or(Error::InvalidLength)?;

        let mut ke = shared.derive_key(&self.kdf, &self.config.shared_info1, len)?;
        let km = Zeroizing::new(ke.split_off(ke_len));
        Ok((ke, km))
    }

    fn mac(&self, km: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        let mut mac =
            <SimpleHmac<D> as Mac>::new_from_slice(km).map_err(|_| Error::InvalidLength)?;
        mac.update(ciphertext);
        mac.update(&self.config.shared_info2);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    /// All-zero IV, as in SEC 1.
    fn iv(&self) -> Vec<u8> {
        vec![0u8; self.cipher.block_size()]
    }
}

impl<D, K: Clone, C: Clone> Clone for Ecies<D, K, C> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            kdf: self.kdf.clone(),
            cipher: self.cipher.clone(),
            digest: PhantomData,
        }
    }
}

impl<D, K, C> Debug for Ecies<D, K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ecies")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
