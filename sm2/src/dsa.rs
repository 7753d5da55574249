//! SM2 Digital Signature Algorithm (SM2DSA) as defined in [draft-shen-sm2-ecdsa § 5].
//!
//! ## Usage
//!
//! ```
//! use rand_core::OsRng;
//! use sm2::{
//!     SecretKey,
//!     dsa::{Signature, SigningKey, signature::RandomizedSigner},
//! };
//!
//! // Signing
//! let curve = sm2::curve()?;
//! let secret_key = SecretKey::random(curve, &mut OsRng)?; // serialize with `::to_bytes()`
//! let distid = "example@rustcrypto.org"; // distinguishing identifier
//! let signing_key = SigningKey::new(distid, secret_key)?;
//! let verifying_key_bytes = signing_key.verifying_key().to_sec1_bytes(false)?;
//! let message = b"test message";
//! let signature: Signature = signing_key.sign_with_rng(&mut OsRng, message);
//!
//! // Verifying
//! use sm2::dsa::{VerifyingKey, signature::Verifier};
//!
//! let verifying_key = VerifyingKey::from_sec1_bytes(curve, distid, &verifying_key_bytes)?;
//! assert!(verifying_key.verify(message, &signature).is_ok());
//! # Ok::<(), sm2::Error>(())
//! ```
//!
//! [draft-shen-sm2-ecdsa § 5]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#section-5

mod signing;
mod verifying;

pub use self::{signing::SigningKey, verifying::VerifyingKey};
pub use signature;

use crate::{Curve, Error, Result};
use core::fmt::{self, Debug};
use num_bigint::BigUint;
use num_traits::Zero;
use signature::SignatureEncoding;

/// SM2DSA signature serialized as bytes.
pub type SignatureBytes = [u8; Signature::BYTE_SIZE];

/// SM2DSA signature.
#[derive(Clone, Eq, PartialEq)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    /// Size of an encoded SM2DSA signature in bytes.
    pub const BYTE_SIZE: usize = 64;

    /// Size of each encoded scalar in bytes.
    const SCALAR_SIZE: usize = Self::BYTE_SIZE / 2;

    const SCALAR_BITS: u64 = 256;

    /// Parse an SM2DSA signature from a byte array.
    pub fn from_bytes(bytes: &SignatureBytes) -> Result<Self> {
        let (r_bytes, s_bytes) = bytes.split_at(Self::SCALAR_SIZE);
        Self::from_scalars(BigUint::from_bytes_be(r_bytes), BigUint::from_bytes_be(s_bytes))
    }

    /// Parse an SM2DSA signature from a byte slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes = SignatureBytes::try_from(bytes).map_err(|_| Error::InvalidLength)?;
        Self::from_bytes(&bytes)
    }

    /// Create a [`Signature`] from the `r` and `s` scalar values which
    /// comprise the signature.
    ///
    /// Zero scalars are rejected here; the upper bound `n` depends on the
    /// curve and is checked during verification.
    pub fn from_scalars(r: BigUint, s: BigUint) -> Result<Self> {
        if r.is_zero() || s.is_zero() {
            return Err(Error::InvalidSignature);
        }

        if r.bits() > Self::SCALAR_BITS || s.bits() > Self::SCALAR_BITS {
            return Err(Error::InvalidLength);
        }

        Ok(Self { r, s })
    }

    /// Serialize this signature as bytes.
    pub fn to_bytes(&self) -> SignatureBytes {
        let mut ret = [0; Self::BYTE_SIZE];
        let (r_bytes, s_bytes) = ret.split_at_mut(Self::SCALAR_SIZE);
        write_padded(r_bytes, &self.r);
        write_padded(s_bytes, &self.s);
        ret
    }

    /// Get the `r` component of this signature.
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// Get the `s` component of this signature.
    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// Convert this signature into a byte vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }
}

fn write_padded(out: &mut [u8], value: &BigUint) {
    let bytes = value.to_bytes_be();
    let offset = out.len() - bytes.len();
    out[offset..].copy_from_slice(&bytes);
}

/// Does `curve` produce signatures that fit [`Signature::BYTE_SIZE`]?
pub(crate) fn check_curve(curve: &Curve) -> Result<()> {
    if curve.scalar_len() > Signature::SCALAR_SIZE {
        return Err(Error::InvalidParameter);
    }

    Ok(())
}

impl Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sm2::dsa::Signature(")?;

        for byte in self.to_bytes() {
            write!(f, "{:02X}", byte)?;
        }

        write!(f, ")")
    }
}

impl From<Signature> for SignatureBytes {
    fn from(signature: Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl From<&Signature> for SignatureBytes {
    fn from(signature: &Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl SignatureEncoding for Signature {
    type Repr = SignatureBytes;

    fn to_bytes(&self) -> Self::Repr {
        self.into()
    }

    fn encoded_len(&self) -> usize {
        Self::BYTE_SIZE
    }
}

impl TryFrom<SignatureBytes> for Signature {
    type Error = signature::Error;

    fn try_from(signature: SignatureBytes) -> signature::Result<Signature> {
        Signature::from_bytes(&signature).map_err(|_| signature::Error::new())
    }
}

impl TryFrom<&SignatureBytes> for Signature {
    type Error = signature::Error;

    fn try_from(signature: &SignatureBytes) -> signature::Result<Signature> {
        Signature::from_bytes(signature).map_err(|_| signature::Error::new())
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = signature::Error;

    fn try_from(bytes: &[u8]) -> signature::Result<Signature> {
        Signature::from_slice(bytes).map_err(|_| signature::Error::new())
    }
}

/// Low-level SM2DSA primitives.
///
/// # ⚠️ Warning
///
/// [`sign_prehashed`] takes the ephemeral scalar `k` from the caller.
/// Reusing `k` for two different messages reveals the private key.
pub mod hazmat {
    use super::{Signature, check_curve};
    use crate::{AffinePoint, Curve, Error, Result};
    use ecfield::arithmetic::mod_inverse;
    use ecproto::is_legal_private_key;
    use num_bigint::BigUint;
    use num_traits::{One, Zero};

    /// Sign the SM3 hash `e = H(Z ‖ M)` with secret scalar `d` and
    /// ephemeral scalar `k`.
    ///
    /// Fails with [`Error::InvalidPrivateKey`] unless `1 ≤ d < n - 1` and
    /// with [`Error::InvalidScalar`] if `k` is out of range or yields
    /// `r = 0`, `r + k = n` or `s = 0`, in which case a fresh `k` must be
    /// drawn.
    pub fn sign_prehashed(
        curve: &Curve,
        d: &BigUint,
        k: &BigUint,
        prehash: &[u8],
    ) -> Result<Signature> {
        check_curve(curve)?;
        let n = curve.order();

        if !is_legal_private_key(curve, d) {
            return Err(Error::InvalidPrivateKey);
        }

        if k.is_zero() || k >= n {
            return Err(Error::InvalidScalar);
        }

        // A2: calculate e=Hv(M~)
        let e = BigUint::from_bytes_be(prehash);

        // A4: calculate the elliptic curve point (x1, y1)=[k]G
        let x1 = curve.mul_generator(k).x().cloned().ok_or(Error::InvalidScalar)?;

        // A5: calculate r=(e+x1) modn, return to A3 if r=0 or r+k=n
        let r = (e + x1) % n;
        if r.is_zero() || &(&r + k) == n {
            return Err(Error::InvalidScalar);
        }

        // A6: calculate s=((1+dA)^(-1)*(k-r*dA)) modn, return to A3 if s=0
        let d_plus_1_inv =
            mod_inverse(&(d + BigUint::one()), n).map_err(|_| Error::InvalidPrivateKey)?;
        let rd = (&r * d) % n;
        let s = (d_plus_1_inv * ((k + n - rd) % n)) % n;

        if s.is_zero() {
            return Err(Error::InvalidScalar);
        }

        // A7: the digital signature of M is (r, s)
        Signature::from_scalars(r, s)
    }

    /// Verify a signature over the SM3 hash `e = H(Z ‖ M)` against the
    /// public point `q`.
    ///
    /// Any failure is reported as [`Error::InvalidSignature`].
    pub fn verify_prehashed(
        curve: &Curve,
        q: &AffinePoint,
        prehash: &[u8],
        signature: &Signature,
    ) -> Result<()> {
        let n = curve.order();

        // B1: verify whether r' in [1,n-1], verification failed if not
        // B2: verify whether s' in [1,n-1], verification failed if not
        let (r, s) = (signature.r(), signature.s());
        if r >= n || s >= n {
            return Err(Error::InvalidSignature);
        }

        // B4: calculate e'=Hv(M'~)
        let e = BigUint::from_bytes_be(prehash);

        // B5: calculate t = (r' + s') modn, verification failed if t=0
        let t = (r + s) % n;
        if t.is_zero() {
            return Err(Error::InvalidSignature);
        }

        // B6: calculate the point (x1', y1')=[s']G + [t]PA
        let point = curve.lincomb((curve.generator(), s), (q, &t));

        // B7: calculate R=(e'+x1') modn, verification pass if yes, otherwise failed
        match point.x() {
            Some(x1) if &((e + x1) % n) == r => Ok(()),
            _ => Err(Error::InvalidSignature),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn rejects_zero_scalars() {
        assert_eq!(
            Signature::from_scalars(BigUint::zero(), BigUint::from(1u32)),
            Err(Error::InvalidSignature)
        );
        assert_eq!(
            Signature::from_bytes(&[0; Signature::BYTE_SIZE]),
            Err(Error::InvalidSignature)
        );
        assert_eq!(Signature::from_slice(&[1; 63]), Err(Error::InvalidLength));
    }

    #[test]
    fn fixed_width_encoding() {
        let signature =
            Signature::from_scalars(BigUint::from(1u32), BigUint::from(0x0203u32)).unwrap();
        let bytes = signature.to_bytes();
        assert_eq!(bytes[31], 1);
        assert_eq!(bytes[62..], hex!("0203"));
        assert_eq!(Signature::from_bytes(&bytes).unwrap(), signature);
        assert!(format!("{signature:?}").starts_with("sm2::dsa::Signature(0000"));
    }

    #[test]
    fn rejects_wide_curves() {
        let curve = ecproto::NamedCurve::Secp384r1.curve().unwrap();
        assert_eq!(check_curve(curve), Err(Error::InvalidParameter));
        assert!(check_curve(crate::curve().unwrap()).is_ok());
    }
}
