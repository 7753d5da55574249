//! Symmetric encryption used by ECIES.

use crate::{Error, Result};

/// Symmetric cipher.
///
/// Implementations are stateless: every call receives the key and the IV.
pub trait SymmetricCipher {
    /// Key length in bytes needed to process a message of `data_len`
    /// bytes.
    fn key_size(&self, data_len: usize) -> usize;

    /// Block length in bytes.
    fn block_size(&self) -> usize;

    /// Encrypt `data` under `key` and `iv`.
    fn encrypt(&self, key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt `data` under `key` and `iv`.
    fn decrypt(&self, key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>>;
}

/// The XOR encryption scheme of SEC 1 section 3.8: the key is a keystream
/// as long as the message.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct XorCipher;

impl XorCipher {
    fn apply(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        if key.len() != data.len() {
            return Err(Error::InvalidLength);
        }

        Ok(data.iter().zip(key).map(|(d, k)| d ^ k).collect())
    }
}

impl SymmetricCipher for XorCipher {
    fn key_size(&self, data_len: usize) -> usize {
        data_len
    }

    fn block_size(&self) -> usize {
        1
    }

    fn encrypt(&self, key: &[u8], _iv: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        Self::apply(key, data)
    }

    fn decrypt(&self, key: &[u8], _iv: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        Self::apply(key, data)
    }
}
