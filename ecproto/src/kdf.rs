//! Key derivation functions.
//!
//! Shared secrets produced by key agreement are never used as keys
//! directly: they are stretched and shaped through a [`Kdf`] first.

use crate::{Error, Result};
use core::{fmt, marker::PhantomData};
use digest::{Digest, core_api::BlockSizeUser};
use hkdf::SimpleHkdf;

/// Key derivation function.
pub trait Kdf {
    /// Derive `len` bytes of output key material from the input key
    /// material `ikm` and the context string `info`.
    fn derive(&self, ikm: &[u8], info: &[u8], len: usize) -> Result<Vec<u8>>;
}

/// ANSI X9.63 key derivation function, as used by SEC 1 and SM2.
///
/// ```text
/// K = Hash(Z ‖ 00000001 ‖ info) ‖ Hash(Z ‖ 00000002 ‖ info) ‖ …
/// ```
///
/// truncated to the requested length.
pub struct X963Kdf<D> {
    digest: PhantomData<fn() -> D>,
}

impl<D: Digest> X963Kdf<D> {
    /// Create the KDF.
    pub const fn new() -> Self {
        Self {
            digest: PhantomData,
        }
    }
}

impl<D: Digest> Kdf for X963Kdf<D> {
    fn derive(&self, ikm: &[u8], info: &[u8], len: usize) -> Result<Vec<u8>> {
        let block_len = <D as Digest>::output_size();
        let blocks = len.div_ceil(block_len);

        // the 32-bit counter must not wrap
        if u32::try_from(blocks).is_err() {
            return Err(Error::InvalidLength);
        }

        let mut okm = Vec::with_capacity(blocks * block_len);

        for counter in (1u32..).take(blocks) {
            let block = D::new()
                .chain_update(ikm)
                .chain_update(counter.to_be_bytes())
                .chain_update(info)
                .finalize();
            okm.extend_from_slice(&block);
        }

        okm.truncate(len);
        Ok(okm)
    }
}

impl<D: Digest> Default for X963Kdf<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Clone for X963Kdf<D> {
    fn clone(&self) -> Self {
        Self {
            digest: PhantomData,
        }
    }
}

impl<D> fmt::Debug for X963Kdf<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("X963Kdf").finish_non_exhaustive()
    }
}

/// HMAC-based extract-and-expand key derivation function (RFC 5869).
pub struct Hkdf<D> {
    salt: Option<Vec<u8>>,
    digest: PhantomData<fn() -> D>,
}

impl<D> Hkdf<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    /// Create the KDF without a salt.
    pub fn new() -> Self {
        Self {
            salt: None,
            digest: PhantomData,
        }
    }

    /// Create the KDF with an extraction salt.
    pub fn with_salt(salt: &[u8]) -> Self {
        Self {
            salt: Some(salt.to_vec()),
            digest: PhantomData,
        }
    }
}

impl<D> Kdf for Hkdf<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    fn derive(&self, ikm: &[u8], info: &[u8], len: usize) -> Result<Vec<u8>> {
        let hkdf = SimpleHkdf::<D>::new(self.salt.as_deref(), ikm);
        let mut okm = vec![0u8; len];
        hkdf.expand(info, &mut okm).map_err(|_| Error::InvalidLength)?;
        Ok(okm)
    }
}

impl<D> Default for Hkdf<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Clone for Hkdf<D> {
    fn clone(&self) -> Self {
        Self {
            salt: self.salt.clone(),
            digest: PhantomData,
        }
    }
}

impl<D> fmt::Debug for Hkdf<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hkdf").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use sha1::Sha1;
    use sha2::Sha256;

    #[test]
    fn x963_sha1_gec2() {
        // GEC 2 secp160r1 shared secret
        let z = hex!("ca7c0f8c3ffa87a96e1b74ac8e6af594347bb40a");
        let key = X963Kdf::<Sha1>::new().derive(&z, &[], 20).unwrap();
        assert_eq!(key, hex!("744ab703f5bc082e59185f6d049d2d367db245c2"));
    }

    #[test]
    fn x963_truncates_and_extends() {
        let kdf = X963Kdf::<Sha256>::new();
        let long = kdf.derive(b"secret", b"info", 80).unwrap();
        let short = kdf.derive(b"secret", b"info", 7).unwrap();

        assert_eq!(long.len(), 80);
        assert_eq!(&long[..7], &short[..]);
        assert!(kdf.derive(b"secret", b"info", 0).unwrap().is_empty());
    }

    #[test]
    fn hkdf_rfc5869_case_1() {
        let ikm = hex!("0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b");
        let salt = hex!("000102030405060708090a0b0c");
        let info = hex!("f0f1f2f3f4f5f6f7f8f9");

        let okm = Hkdf::<Sha256>::with_salt(&salt).derive(&ikm, &info, 42).unwrap();
        assert_eq!(
            okm,
            hex!(
                "3cb25f25faacd57a90434f64d0362f2a"
                "2d2d0a90cf1a5a4c5db02d56ecc4c5bf"
                "34007208d5b887185865"
            )
        );
    }

    #[test]
    fn hkdf_output_limit() {
        let kdf = Hkdf::<Sha256>::new();
        assert_eq!(kdf.derive(b"ikm", &[], 255 * 32 + 1), Err(Error::InvalidLength));
    }
}
