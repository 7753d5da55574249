//! Elliptic Curve Digital Signature Algorithm (ECDSA) as defined in
//! SEC 1: Elliptic Curve Cryptography (Version 2.0) section 4.1.
//!
//! The digest is chosen through the `D` type parameter of [`SigningKey`]
//! and [`VerifyingKey`].
//!
//! ## Usage
//!
//! ```
//! use ecproto::{
//!     NamedCurve,
//!     ecdsa::{Signature, SigningKey, VerifyingKey, signature::{RandomizedSigner, Verifier}},
//! };
//! use rand_core::OsRng;
//! use sha2::Sha256;
//!
//! let curve = NamedCurve::Secp256r1.curve()?;
//!
//! // Signing
//! let signing_key = SigningKey::<Sha256>::random(curve, &mut OsRng)?;
//! let verifying_key_bytes = signing_key.verifying_key().to_sec1_bytes(true)?;
//! let message = b"test message";
//! let signature: Signature = signing_key.sign_with_rng(&mut OsRng, message);
//!
//! // Verifying
//! let verifying_key = VerifyingKey::<Sha256>::from_sec1_bytes(curve, &verifying_key_bytes)?;
//! assert!(verifying_key.verify(message, &signature).is_ok());
//! # Ok::<(), ecproto::Error>(())
//! ```

mod signing;
mod verifying;

pub use self::{
    signing::SigningKey,
    verifying::{VerifyingKey, verify_batch},
};
pub use signature;

use crate::{Error, Result};
use core::fmt::{self, Debug};
use num_bigint::BigUint;
use signature::SignatureEncoding;

/// ECDSA signature `(r, s)`.
///
/// Serialized as `r ‖ s`, each a big-endian integer padded to the byte
/// length of the curve order.
#[derive(Clone, Eq, PartialEq)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
    scalar_len: usize,
}

impl Signature {
    /// Create a signature from its scalars, to be serialized at
    /// `scalar_len` bytes per scalar.
    ///
    /// The scalars are not range checked: verification rejects values
    /// outside of `[1, n-1]`.
    pub fn from_scalars(r: BigUint, s: BigUint, scalar_len: usize) -> Result<Self> {
        let limit = u64::try_from(scalar_len)
            .ok()
            .and_then(|len| len.checked_mul(8))
            .ok_or(Error::InvalidLength)?;

        if r.bits() > limit || s.bits() > limit {
            return Err(Error::InvalidLength);
        }

        Ok(Self { r, s, scalar_len })
    }

    /// Parse a signature from `r ‖ s`.
    ///
    /// The two halves must have the same non-zero length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() || bytes.len() % 2 != 0 {
            return Err(Error::InvalidEncoding);
        }

        let scalar_len = bytes.len() / 2;
        let (r, s) = bytes.split_at(scalar_len);
        Self::from_scalars(BigUint::from_bytes_be(r), BigUint::from_bytes_be(s), scalar_len)
    }

    /// Serialize this signature as `r ‖ s`.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; 2 * self.scalar_len];
        let (r_out, s_out) = bytes.split_at_mut(self.scalar_len);
        write_padded(r_out, &self.r);
        write_padded(s_out, &self.s);
        bytes
    }

    /// Get the `r` component of this signature.
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// Get the `s` component of this signature.
    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// Length of each serialized scalar.
    pub fn scalar_len(&self) -> usize {
        self.scalar_len
    }
}

fn write_padded(out: &mut [u8], value: &BigUint) {
    let bytes = value.to_bytes_be();
    let out_len = out.len();
    let offset = out_len.saturating_sub(bytes.len());
    out[offset..].copy_from_slice(&bytes[bytes.len() - (out_len - offset)..]);
}

impl Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ecdsa::Signature(")?;
        for byte in self.to_vec() {
            write!(f, "{byte:02X}")?;
        }
        write!(f, ")")
    }
}

impl From<Signature> for Box<[u8]> {
    fn from(signature: Signature) -> Box<[u8]> {
        signature.to_vec().into_boxed_slice()
    }
}

impl SignatureEncoding for Signature {
    type Repr = Box<[u8]>;

    fn encoded_len(&self) -> usize {
        2 * self.scalar_len
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = signature::Error;

    fn try_from(bytes: &[u8]) -> signature::Result<Signature> {
        Signature::from_slice(bytes).map_err(|_| signature::Error::new())
    }
}

/// Low-level ECDSA primitives.
///
/// # ⚠️ Warning
///
/// These functions take the ephemeral scalar `k` from the caller. Reusing
/// `k` for two different messages reveals the private key. They exist for
/// known-answer testing and for callers deriving `k` themselves.
pub mod hazmat {
    use super::Signature;
    use crate::{Error, Result, is_legal_private_key};
    use ecfield::arithmetic::{bits_to_int, mod_inverse};
    use ecgroup::{AffinePoint, Curve};
    use num_bigint::BigUint;
    use num_traits::Zero;

    /// Convert a message digest into the integer `z`: the leftmost
    /// `bitlen(n)` bits of the digest.
    pub fn bits2int(curve: &Curve, prehash: &[u8]) -> BigUint {
        bits_to_int(prehash, curve.order().bits())
    }

    /// Sign the digest integer `z` with secret scalar `d` and ephemeral
    /// scalar `k`.
    ///
    /// Fails with [`Error::InvalidPrivateKey`] if `d` is out of range and
    /// with [`Error::InvalidScalar`] if `k` is out of range or yields
    /// `r = 0` or `s = 0`, in which case a fresh `k` must be drawn.
    pub fn sign_prehashed(
        curve: &Curve,
        d: &BigUint,
        k: &BigUint,
        z: &BigUint,
    ) -> Result<Signature> {
        let n = curve.order();

        if !is_legal_private_key(curve, d) {
            return Err(Error::InvalidPrivateKey);
        }

        if k.is_zero() || k >= n {
            return Err(Error::InvalidScalar);
        }

        // R = k·G, r = R.x mod n
        let r = match curve.mul_generator(k).x() {
            Some(x) => x % n,
            None => return Err(Error::InvalidScalar),
        };

        if r.is_zero() {
            return Err(Error::InvalidScalar);
        }

        // s = k⁻¹·(z + r·d) mod n
        let k_inv = mod_inverse(k, n)?;
        let s = (k_inv * ((z + &r * d) % n)) % n;

        if s.is_zero() {
            return Err(Error::InvalidScalar);
        }

        Signature::from_scalars(r, s, curve.scalar_len())
    }

    /// Verify a signature over the digest integer `z` against the public
    /// point `q`.
    ///
    /// Any failure, including `r` or `s` outside of `[1, n-1]`, is reported
    /// as [`Error::InvalidSignature`].
    pub fn verify_prehashed(
        curve: &Curve,
        q: &AffinePoint,
        z: &BigUint,
        signature: &Signature,
    ) -> Result<()> {
        let n = curve.order();
        let (r, s) = (signature.r(), signature.s());

        if r.is_zero() || r >= n || s.is_zero() || s >= n {
            return Err(Error::InvalidSignature);
        }

        // w = s⁻¹, u1 = z·w, u2 = r·w
        let w = mod_inverse(s, n).map_err(|_| Error::InvalidSignature)?;
        let u1 = (z * &w) % n;
        let u2 = (r * &w) % n;

        // P = u1·G + u2·Q
        let point = curve.lincomb((curve.generator(), &u1), (q, &u2));

        match point.x() {
            Some(x) if &(x % n) == r => Ok(()),
            _ => Err(Error::InvalidSignature),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn fixed_width_encoding() {
        let signature =
            Signature::from_scalars(BigUint::from(1u32), BigUint::from(0x0203u32), 3).unwrap();
        assert_eq!(signature.to_vec(), hex!("000001" "000203"));
        assert_eq!(Signature::from_slice(&signature.to_vec()).unwrap(), signature);
        assert_eq!(signature.encoded_len(), 6);
    }

    #[test]
    fn oversized_scalars() {
        assert_eq!(
            Signature::from_scalars(BigUint::from(0x1_0000u32), BigUint::from(1u32), 2),
            Err(Error::InvalidLength)
        );
        assert_eq!(Signature::from_slice(&[1, 2, 3]), Err(Error::InvalidEncoding));
        assert_eq!(Signature::from_slice(&[]), Err(Error::InvalidEncoding));
    }

    #[test]
    fn debug_is_hex() {
        let signature =
            Signature::from_scalars(BigUint::from(0xabu32), BigUint::from(0x01u32), 1).unwrap();
        assert_eq!(format!("{signature:?}"), "ecdsa::Signature(AB01)");
    }
}
