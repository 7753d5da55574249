//! SM2 key exchange as defined in GM/T 0003.3-2012 (GB/T 32918.3).
//!
//! Each party holds a static key pair and a distinguishing identifier.
//! The initiator `A` and the responder `B` each generate an ephemeral key
//! pair, swap the ephemeral public keys and derive the same session key.
//! Optional confirmation tags let each side prove it derived that key.
//!
//! ## Algorithm
//!
//! ```text
//! w  = ⌈bitlen(n) / 2⌉ - 1
//! x̄  = 2^w + (x mod 2^w)
//! t  = (d + x̄·r) mod n
//! V  = [h·t](P' + [x̄']R')
//! K  = KDF(xV ‖ yV ‖ ZA ‖ ZB, klen)
//! S1 = SB = Hash(0x02 ‖ yV ‖ Hash(xV ‖ ZA ‖ ZB ‖ x1 ‖ y1 ‖ x2 ‖ y2))
//! S2 = SA = Hash(0x03 ‖ yV ‖ Hash(xV ‖ ZA ‖ ZB ‖ x1 ‖ y1 ‖ x2 ‖ y2))
//! ```
//!
//! where `(x1, y1)` is the initiator's ephemeral point and `(x2, y2)` the
//! responder's.
//!
//! ## Usage
//!
//! ```
//! use rand_core::OsRng;
//! use sm2::{KeyPair, ke::{KeyExchange, Peer, Role}};
//!
//! let curve = sm2::curve()?;
//! let alice_key = KeyPair::random(curve, &mut OsRng)?;
//! let bob_key = KeyPair::random(curve, &mut OsRng)?;
//!
//! let alice = KeyExchange::new(Role::Initiator, "alice", alice_key.clone(), &mut OsRng)?;
//! let bob = KeyExchange::new(Role::Responder, "bob", bob_key.clone(), &mut OsRng)?;
//!
//! // swap ephemeral public keys
//! let alice_view = Peer::new("bob", bob_key.public_key().clone())?;
//! let bob_view = Peer::new("alice", alice_key.public_key().clone())?;
//! let alice_session = alice.agree(&alice_view, bob.ephemeral_public_key(), 16)?;
//! let bob_session = bob.agree(&bob_view, alice.ephemeral_public_key(), 16)?;
//! assert_eq!(alice_session.as_bytes(), bob_session.as_bytes());
//!
//! // optional key confirmation
//! alice_session.verify_confirmation(bob_session.confirmation())?;
//! bob_session.verify_confirmation(alice_session.confirmation())?;
//! # Ok::<(), sm2::Error>(())
//! ```

use crate::{
    AffinePoint, Curve, DistId, Error, Hash, KeyPair, PublicKey, Result, coordinates, hash_z,
};
use core::fmt;
use ecproto::kdf::{Kdf, X963Kdf};
use num_bigint::BigUint;
use num_traits::One;
use rand_core::{CryptoRng, RngCore};
use sm3::{Digest, Sm3};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Role of a party in the exchange.
///
/// The initiator's identity hash comes first in the key derivation input.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Role {
    /// Party `A`, which sends the first ephemeral key.
    Initiator,

    /// Party `B`.
    Responder,
}

/// Long-term identity of the other party: its static public key and user
/// information hash `Z`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Peer {
    public_key: PublicKey,
    identity_hash: Hash,
}

impl Peer {
    /// Create a peer from its distinguishing identifier and static public
    /// key.
    pub fn new(distid: &DistId, public_key: PublicKey) -> Result<Self> {
        let identity_hash = hash_z(distid, &public_key)?;
        Ok(Self {
            public_key,
            identity_hash,
        })
    }

    /// Static public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// User information hash `Z`.
    pub fn identity_hash(&self) -> &Hash {
        &self.identity_hash
    }
}

/// One party's side of an SM2 key exchange.
#[derive(Clone)]
pub struct KeyExchange {
    role: Role,
    static_key: KeyPair,
    identity_hash: Hash,
    ephemeral_key: KeyPair,
}

impl KeyExchange {
    /// Start an exchange with a freshly generated ephemeral key pair.
    pub fn new<R>(role: Role, distid: &DistId, static_key: KeyPair, rng: &mut R) -> Result<Self>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        let ephemeral_key = KeyPair::random(static_key.secret_key().curve(), rng)?;
        Self::with_ephemeral_key(role, distid, static_key, ephemeral_key)
    }

    /// Start an exchange with a caller-provided ephemeral key pair.
    ///
    /// # ⚠️ Warning
    ///
    /// Reusing an ephemeral key across exchanges breaks forward secrecy.
    pub fn with_ephemeral_key(
        role: Role,
        distid: &DistId,
        static_key: KeyPair,
        ephemeral_key: KeyPair,
    ) -> Result<Self> {
        if ephemeral_key.public_key().curve() != static_key.public_key().curve() {
            return Err(Error::NoAgreement);
        }

        let identity_hash = hash_z(distid, static_key.public_key())?;
        Ok(Self {
            role,
            static_key,
            identity_hash,
            ephemeral_key,
        })
    }

    /// Role of this party.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Our user information hash `Z`.
    pub fn identity_hash(&self) -> &Hash {
        &self.identity_hash
    }

    /// Ephemeral public key `R` to send to the peer.
    pub fn ephemeral_public_key(&self) -> &PublicKey {
        self.ephemeral_key.public_key()
    }

    /// Derive a `klen`-byte session key from the peer's identity and
    /// ephemeral public key.
    ///
    /// Fails with [`Error::NoAgreement`] if the peer's keys live on another
    /// curve or the shared point is the point at infinity.
    pub fn agree(
        &self,
        peer: &Peer,
        peer_ephemeral: &PublicKey,
        klen: usize,
    ) -> Result<SessionKey> {
        let curve = self.static_key.public_key().curve();
        if peer.public_key.curve() != curve || peer_ephemeral.curve() != curve {
            return Err(Error::NoAgreement);
        }

        let n = curve.order();
        let own_ephemeral = self.ephemeral_key.public_key().as_affine();

        // t = (d + x̄·r) mod n
        let x_own = truncated_x(curve, own_ephemeral)?;
        let t = (self.static_key.secret_key().as_scalar()
            + x_own * self.ephemeral_key.secret_key().as_scalar())
            % n;

        // V = [h·t](P' + [x̄']R')
        let x_peer = truncated_x(curve, peer_ephemeral.as_affine())?;
        let combined = curve.lincomb(
            (peer.public_key.as_affine(), &BigUint::one()),
            (peer_ephemeral.as_affine(), &x_peer),
        );
        let shared = curve.mul(&combined, &(curve.cofactor() * t));

        if shared.is_identity() {
            tracing::debug!("SM2 key exchange point is the point at infinity");
            return Err(Error::NoAgreement);
        }

        let (xv, yv) = coordinates(curve, &shared)?;
        let (xv, yv) = (Zeroizing::new(xv), Zeroizing::new(yv));

        // the initiator's identity and ephemeral point always come first
        let (za, zb, ra, rb) = match self.role {
            Role::Initiator => (
                &self.identity_hash,
                &peer.identity_hash,
                own_ephemeral,
                peer_ephemeral.as_affine(),
            ),
            Role::Responder => (
                &peer.identity_hash,
                &self.identity_hash,
                peer_ephemeral.as_affine(),
                own_ephemeral,
            ),
        };

        // K = KDF(xV ‖ yV ‖ ZA ‖ ZB, klen)
        let ikm = Zeroizing::new(
            [xv.as_slice(), yv.as_slice(), za.as_slice(), zb.as_slice()].concat(),
        );
        let key = Zeroizing::new(X963Kdf::<Sm3>::new().derive(&ikm, &[], klen)?);

        let (x1, y1) = coordinates(curve, ra)?;
        let (x2, y2) = coordinates(curve, rb)?;
        let inner = Sm3::new()
            .chain_update(&*xv)
            .chain_update(za)
            .chain_update(zb)
            .chain_update(x1)
            .chain_update(y1)
            .chain_update(x2)
            .chain_update(y2)
            .finalize();

        let responder_tag = confirmation_tag(0x02, &yv, &inner);
        let initiator_tag = confirmation_tag(0x03, &yv, &inner);

        let (confirmation, peer_confirmation) = match self.role {
            Role::Initiator => (initiator_tag, responder_tag),
            Role::Responder => (responder_tag, initiator_tag),
        };

        Ok(SessionKey {
            key,
            confirmation,
            peer_confirmation,
        })
    }
}

impl fmt::Debug for KeyExchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyExchange")
            .field("role", &self.role)
            .field("ephemeral_public_key", self.ephemeral_public_key())
            .finish_non_exhaustive()
    }
}

/// Session key derived by [`KeyExchange::agree`], together with the key
/// confirmation tags.
pub struct SessionKey {
    key: Zeroizing<Vec<u8>>,
    confirmation: Hash,
    peer_confirmation: Hash,
}

impl SessionKey {
    /// Derived key material.
    pub fn as_bytes(&self) -> &[u8] {
        &self.key
    }

    /// Confirmation tag to send to the peer: `SB` for the responder, `SA`
    /// for the initiator.
    pub fn confirmation(&self) -> &[u8] {
        &self.confirmation
    }

    /// Check the peer's confirmation tag in constant time.
    ///
    /// Fails with [`Error::NoAgreement`] if the peer derived another key.
    pub fn verify_confirmation(&self, tag: &[u8]) -> Result<()> {
        if self.peer_confirmation.as_slice().ct_eq(tag).into() {
            Ok(())
        } else {
            Err(Error::NoAgreement)
        }
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKey").finish_non_exhaustive()
    }
}

/// `x̄ = 2^w + (x mod 2^w)` with `w = ⌈bitlen(n) / 2⌉ - 1`.
fn truncated_x(curve: &Curve, point: &AffinePoint) -> Result<BigUint> {
    let w = curve.order().bits().div_ceil(2) - 1;
    let bound = BigUint::one() << w;
    let x = point.x().ok_or(Error::NoAgreement)?;
    Ok(&bound + (x % &bound))
}

fn confirmation_tag(prefix: u8, yv: &[u8], inner: &Hash) -> Hash {
    Sm3::new()
        .chain_update([prefix])
        .chain_update(yv)
        .chain_update(inner)
        .finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve;

    #[test]
    fn truncation_width() {
        // n has 256 bits, so w = 127
        let curve = curve().unwrap();
        let bound = BigUint::one() << 127u32;

        for k in 1u32..8 {
            let x = truncated_x(curve, &curve.mul_generator(&BigUint::from(k))).unwrap();
            assert!(x >= bound);
            assert!(x < (&bound << 1u32));
        }
    }

    #[test]
    fn confirmation_mismatch() {
        let session = SessionKey {
            key: Zeroizing::new(vec![0; 16]),
            confirmation: Hash::default(),
            peer_confirmation: Hash::default(),
        };

        assert!(session.verify_confirmation(&[0; 32]).is_ok());
        assert_eq!(session.verify_confirmation(&[1; 32]), Err(Error::NoAgreement));
        assert_eq!(session.verify_confirmation(&[0; 31]), Err(Error::NoAgreement));
    }
}
