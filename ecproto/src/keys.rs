//! Secret and public keys.

use crate::{Error, Result};
use core::fmt;
use ecfield::arithmetic::{random_scalar, to_fixed_bytes};
use ecgroup::{AffinePoint, Curve, Field};
use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroizing;

/// Is `d` a legal private key for `curve`, i.e. `1 ≤ d < n`?
pub fn is_legal_private_key(curve: &Curve, d: &BigUint) -> bool {
    !d.is_zero() && d < curve.order()
}

/// Is `q` a legal public key for `curve`?
///
/// The point must be finite, have coordinates in the base field, satisfy
/// the curve equation and lie in the subgroup generated by `G`.
pub fn is_legal_public_key(curve: &Curve, q: &AffinePoint) -> bool {
    let (Some(x), Some(y)) = (q.x(), q.y()) else {
        return false;
    };

    let field = curve.field();
    field.contains(x) && field.contains(y) && curve.is_on_curve(q) && curve.is_torsion_free(q)
}

/// Compute the public key `Q = d·G`.
///
/// Fails with [`Error::InvalidPrivateKey`] unless `1 ≤ d < n`.
pub fn gen_public_key(curve: &Curve, d: &BigUint) -> Result<AffinePoint> {
    if !is_legal_private_key(curve, d) {
        return Err(Error::InvalidPrivateKey);
    }

    Ok(curve.mul_generator(d))
}

/// Secret key: a scalar `d` in `[1, n-1]` bound to its curve.
#[derive(Clone)]
pub struct SecretKey {
    curve: Curve,
    scalar: BigUint,
}

impl SecretKey {
    /// Generate a random secret key.
    pub fn random<R>(curve: &Curve, rng: &mut R) -> Result<Self>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        let scalar = random_scalar(curve.order(), rng)?;
        Ok(Self {
            curve: curve.clone(),
            scalar,
        })
    }

    /// Create a secret key from its scalar value.
    pub fn from_scalar(curve: &Curve, scalar: BigUint) -> Result<Self> {
        if !is_legal_private_key(curve, &scalar) {
            return Err(Error::InvalidPrivateKey);
        }

        Ok(Self {
            curve: curve.clone(),
            scalar,
        })
    }

    /// Deserialize a secret key from a big-endian byte string exactly
    /// [`Curve::scalar_len`] bytes long.
    pub fn from_slice(curve: &Curve, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != curve.scalar_len() {
            return Err(Error::InvalidLength);
        }

        Self::from_scalar(curve, BigUint::from_bytes_be(bytes))
    }

    /// Serialize as a fixed-width big-endian byte string.
    pub fn to_bytes(&self) -> Result<Zeroizing<Vec<u8>>> {
        to_fixed_bytes(&self.scalar, self.curve.scalar_len()).map(Zeroizing::new)
    }

    /// Borrow the secret scalar.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn as_scalar(&self) -> &BigUint {
        &self.scalar
    }

    /// Curve this key belongs to.
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Public key `Q = d·G` for this secret key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            curve: self.curve.clone(),
            point: self.curve.mul_generator(&self.scalar),
        }
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("curve", &self.curve.form())
            .finish_non_exhaustive()
    }
}

/// Public key: a validated point `Q` of the subgroup generated by `G`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicKey {
    curve: Curve,
    point: AffinePoint,
}

impl PublicKey {
    /// Create a public key from a point, validating it with
    /// [`is_legal_public_key`].
    pub fn from_affine(curve: &Curve, point: AffinePoint) -> Result<Self> {
        if !is_legal_public_key(curve, &point) {
            return Err(Error::InvalidPublicKey);
        }

        Ok(Self {
            curve: curve.clone(),
            point,
        })
    }

    /// Decode a public key from an elliptic curve point (compressed or
    /// uncompressed) encoded using the `Elliptic-Curve-Point-to-Octet-String`
    /// algorithm described in SEC 1: Elliptic Curve Cryptography
    /// (Version 2.0) section 2.3.3 (page 10).
    ///
    /// <http://www.secg.org/sec1-v2.pdf>
    pub fn from_sec1_bytes(curve: &Curve, bytes: &[u8]) -> Result<Self> {
        let point = curve.decode_point(bytes)?;
        Self::from_affine(curve, point)
    }

    /// Encode this public key as a SEC1 point.
    pub fn to_sec1_bytes(&self, compress: bool) -> Result<Vec<u8>> {
        self.curve.encode_point(&self.point, compress)
    }

    /// Borrow the point `Q`.
    pub fn as_affine(&self) -> &AffinePoint {
        &self.point
    }

    /// Curve this key belongs to.
    pub fn curve(&self) -> &Curve {
        &self.curve
    }
}

impl AsRef<AffinePoint> for PublicKey {
    fn as_ref(&self) -> &AffinePoint {
        self.as_affine()
    }
}

/// Secret key together with its public key.
#[derive(Clone, Debug)]
pub struct KeyPair {
    secret_key: SecretKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Generate a random key pair.
    pub fn random<R>(curve: &Curve, rng: &mut R) -> Result<Self>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        SecretKey::random(curve, rng).map(Self::from)
    }

    /// Secret half.
    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Public half.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}

impl From<SecretKey> for KeyPair {
    fn from(secret_key: SecretKey) -> Self {
        let public_key = secret_key.public_key();
        Self {
            secret_key,
            public_key,
        }
    }
}
