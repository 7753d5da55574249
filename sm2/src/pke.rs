//! SM2 Encryption Algorithm as defined in GM/T 0003.4-2012 (GB/T 32918.4).
//!
//! ## Usage
//!
//! ```
//! use rand_core::OsRng;
//! use sm2::{SecretKey, pke::{DecryptingKey, EncryptingKey, Mode}};
//!
//! // Encrypting
//! let curve = sm2::curve()?;
//! let secret_key = SecretKey::random(curve, &mut OsRng)?; // serialize with `::to_bytes()`
//! let encrypting_key = EncryptingKey::new_with_mode(secret_key.public_key(), Mode::C1C3C2);
//! let plaintext = b"plaintext";
//! let ciphertext = encrypting_key.encrypt(&mut OsRng, plaintext)?;
//!
//! // Decrypting
//! let decrypting_key = DecryptingKey::new_with_mode(secret_key, Mode::C1C3C2);
//! assert_eq!(decrypting_key.decrypt(&ciphertext)?, plaintext);
//! # Ok::<(), sm2::Error>(())
//! ```

mod decrypting;
mod encrypting;

pub use self::{decrypting::DecryptingKey, encrypting::EncryptingKey};

use crate::{AffinePoint, Curve, Error, Hash, Result, coordinates};
use ecgroup::sec1::Tag;
use ecproto::kdf::{Kdf, X963Kdf};
use sm3::{Digest, Sm3};
use zeroize::Zeroizing;

/// Order of the ciphertext segments.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Mode {
    /// `C1 ‖ C2 ‖ C3`, the order of GM/T 0003.4-2012
    C1C2C3,

    /// `C1 ‖ C3 ‖ C2`, the order of GB/T 32918.4-2016
    #[default]
    C1C3C2,
}

/// SM2 ciphertext split into its segments.
///
/// - `C1`: SEC1 encoding of the ephemeral point `[k]G`
/// - `C2`: the message masked with the KDF output
/// - `C3`: `Hash(x2 ‖ M ‖ y2)`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cipher {
    c1: Vec<u8>,
    c2: Vec<u8>,
    c3: Hash,
}

impl Cipher {
    /// Split an encoded ciphertext for `curve` into its segments.
    ///
    /// `C1` may be compressed or uncompressed; it is not validated until
    /// decryption.
    pub fn from_slice(curve: &Curve, cipher: &[u8], mode: Mode) -> Result<Self> {
        let tag = Tag::from_u8(*cipher.first().ok_or(Error::InvalidEncoding)?)?;
        let c1_len = tag.message_len(curve.field_len());

        // B1: get C1 from C
        let (c1, c) = cipher.split_at_checked(c1_len).ok_or(Error::InvalidEncoding)?;

        let digest_size = <Sm3 as Digest>::output_size();
        let (c2, c3) = match mode {
            Mode::C1C3C2 => {
                let (c3, c2) = c.split_at_checked(digest_size).ok_or(Error::InvalidEncoding)?;
                (c2, c3)
            }
            Mode::C1C2C3 => {
                let c2_len = c.len().checked_sub(digest_size).ok_or(Error::InvalidEncoding)?;
                c.split_at(c2_len)
            }
        };

        Ok(Self {
            c1: c1.to_vec(),
            c2: c2.to_vec(),
            c3: Hash::clone_from_slice(c3),
        })
    }

    /// Encode the segments in the order given by `mode`.
    pub fn to_vec(&self, mode: Mode) -> Vec<u8> {
        match mode {
            Mode::C1C2C3 => [self.c1.as_slice(), self.c2.as_slice(), self.c3.as_slice()].concat(),
            Mode::C1C3C2 => [self.c1.as_slice(), self.c3.as_slice(), self.c2.as_slice()].concat(),
        }
    }

    /// Get C1.
    pub fn c1(&self) -> &[u8] {
        &self.c1
    }

    /// Get C2.
    pub fn c2(&self) -> &[u8] {
        &self.c2
    }

    /// Get C3.
    pub fn c3(&self) -> &Hash {
        &self.c3
    }
}

/// Mask `msg` with `t = KDF(x2 ‖ y2, klen)`.
///
/// Returns `None` when `t` is all zero, in which case the point must not
/// be used.
fn kdf(curve: &Curve, point: &AffinePoint, msg: &[u8]) -> Result<Option<Vec<u8>>> {
    let (x2, y2) = coordinates(curve, point)?;
    let z = Zeroizing::new([x2, y2].concat());
    let t = Zeroizing::new(X963Kdf::<Sm3>::new().derive(&z, &[], msg.len())?);

    if !t.is_empty() && t.iter().all(|&byte| byte == 0) {
        return Ok(None);
    }

    Ok(Some(msg.iter().zip(t.iter()).map(|(m, t)| m ^ t).collect()))
}

/// `C3 = Hash(x2 ‖ M ‖ y2)`.
fn checksum(curve: &Curve, point: &AffinePoint, msg: &[u8]) -> Result<Hash> {
    let (x2, y2) = coordinates(curve, point)?;
    Ok(Sm3::new()
        .chain_update(x2)
        .chain_update(msg)
        .chain_update(y2)
        .finalize())
}

/// Low-level SM2 encryption.
///
/// # ⚠️ Warning
///
/// [`encrypt_with_k`] takes the ephemeral scalar `k` from the caller.
/// Reusing `k` for two different messages reveals their XOR.
pub mod hazmat {
    use super::{Cipher, checksum, kdf};
    use crate::{Error, PublicKey, Result};
    use num_bigint::BigUint;
    use num_traits::Zero;

    /// Encrypt `msg` to `public_key` with ephemeral scalar `k`.
    ///
    /// Fails with [`Error::InvalidScalar`] if `k` is out of range or the
    /// derived mask is all zero, in which case a fresh `k` must be drawn.
    pub fn encrypt_with_k(public_key: &PublicKey, k: &BigUint, msg: &[u8]) -> Result<Cipher> {
        let curve = public_key.curve();

        if k.is_zero() || k >= curve.order() {
            return Err(Error::InvalidScalar);
        }

        // A2: compute point C1 = [k]G = (x1, y1)
        let c1 = curve.encode_point(&curve.mul_generator(k), false)?;

        // A3: compute point S = [h]PB of the elliptic curve
        let pb = public_key.as_affine();
        if curve.mul(pb, curve.cofactor()).is_identity() {
            return Err(Error::InvalidPublicKey);
        }

        // A4: compute point [k]PB = (x2, y2)
        let kpb = curve.mul(pb, k);

        // A5: compute t = KDF(x2||y2, klen)
        // A6: compute C2 = M xor t
        let c2 = kdf(curve, &kpb, msg)?.ok_or(Error::InvalidScalar)?;

        // A7: compute C3 = Hash(x2||M||y2)
        let c3 = checksum(curve, &kpb, msg)?;

        // A8: output the ciphertext C = C1||C2||C3
        Ok(Cipher { c1, c2, c3 })
    }
}
