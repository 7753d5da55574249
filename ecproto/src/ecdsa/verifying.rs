//! ECDSA verifying key and batch verification.

use super::{Signature, hazmat};
use crate::{AffinePoint, Curve, PublicKey, Result};
use core::{
    fmt::{self, Debug},
    marker::PhantomData,
};
use digest::Digest;
use rayon::prelude::*;
use signature::{Verifier, hazmat::PrehashVerifier};

/// ECDSA public key used for verifying signatures over messages hashed
/// with digest `D`.
pub struct VerifyingKey<D> {
    public_key: PublicKey,
    digest: PhantomData<fn() -> D>,
}

impl<D> VerifyingKey<D> {
    /// Create a verifying key from a validated public key.
    pub fn new(public_key: PublicKey) -> Self {
        Self {
            public_key,
            digest: PhantomData,
        }
    }

    /// Initialize [`VerifyingKey`] from a SEC1-encoded public key.
    pub fn from_sec1_bytes(curve: &Curve, bytes: &[u8]) -> Result<Self> {
        PublicKey::from_sec1_bytes(curve, bytes).map(Self::new)
    }

    /// Initialize [`VerifyingKey`] from an affine point.
    ///
    /// Returns an error if the point is not a legal public key.
    pub fn from_affine(curve: &Curve, point: AffinePoint) -> Result<Self> {
        PublicKey::from_affine(curve, point).map(Self::new)
    }

    /// Serialize this key as a SEC1 point.
    pub fn to_sec1_bytes(&self, compress: bool) -> Result<Vec<u8>> {
        self.public_key.to_sec1_bytes(compress)
    }

    /// Borrow the public key.
    pub fn as_public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Verify a signature over a precomputed message digest.
    pub fn verify_digest_bytes(&self, prehash: &[u8], signature: &Signature) -> Result<()> {
        let curve = self.public_key.curve();
        let z = hazmat::bits2int(curve, prehash);
        hazmat::verify_prehashed(curve, self.public_key.as_affine(), &z, signature)
    }
}

//
// `*Verifier` trait impls
//

impl<D: Digest> Verifier<Signature> for VerifyingKey<D> {
    fn verify(&self, msg: &[u8], signature: &Signature) -> signature::Result<()> {
        self.verify_prehash(&D::digest(msg), signature)
    }
}

impl<D> PrehashVerifier<Signature> for VerifyingKey<D> {
    fn verify_prehash(&self, prehash: &[u8], signature: &Signature) -> signature::Result<()> {
        self.verify_digest_bytes(prehash, signature).map_err(|_| signature::Error::new())
    }
}

/// Verify many `(key, message, signature)` triples in parallel.
///
/// Succeeds only if every signature is valid.
pub fn verify_batch<D: Digest>(
    items: &[(&VerifyingKey<D>, &[u8], &Signature)],
) -> signature::Result<()> {
    items
        .par_iter()
        .try_for_each(|(key, msg, signature)| key.verify(msg, signature))
}

//
// Other trait impls
//

impl<D> AsRef<PublicKey> for VerifyingKey<D> {
    fn as_ref(&self) -> &PublicKey {
        &self.public_key
    }
}

impl<D> Clone for VerifyingKey<D> {
    fn clone(&self) -> Self {
        Self::new(self.public_key.clone())
    }
}

impl<D> Debug for VerifyingKey<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyingKey")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

impl<D> Eq for VerifyingKey<D> {}

impl<D> PartialEq for VerifyingKey<D> {
    fn eq(&self, other: &Self) -> bool {
        self.public_key == other.public_key
    }
}

impl<D> From<PublicKey> for VerifyingKey<D> {
    fn from(public_key: PublicKey) -> Self {
        Self::new(public_key)
    }
}

impl<D> From<VerifyingKey<D>> for PublicKey {
    fn from(verifying_key: VerifyingKey<D>) -> PublicKey {
        verifying_key.public_key
    }
}
