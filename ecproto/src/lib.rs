#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::checked_conversions,
    clippy::implicit_saturating_sub,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//! Elliptic curve protocols over curves chosen at runtime.
//!
//! Everything in this crate works on any [`Curve`] from [`ecgroup`],
//! whatever its family: prime-field Weierstrass and Montgomery curves as
//! well as binary curves.
//!
//! - [`SecretKey`] / [`PublicKey`]: key generation and validation
//! - [`ecdh`]: Diffie-Hellman and cofactor Diffie-Hellman
//! - [`mqv`]: Menezes-Qu-Vanstone key agreement
//! - [`ecdsa`]: the Elliptic Curve Digital Signature Algorithm
//! - [`ecies`]: the Elliptic Curve Integrated Encryption Scheme
//!
//! Digests are chosen through [`digest::Digest`] type parameters, key
//! derivation through the [`kdf::Kdf`] trait and symmetric encryption
//! through the [`cipher::SymmetricCipher`] trait.
//!
//! ## ⚠️ Security Warning
//!
//! The big-integer arithmetic underneath is not constant time. USE AT YOUR
//! OWN RISK!
//!
//! ## Usage
//!
#![cfg_attr(feature = "ecdh", doc = "```")]
#![cfg_attr(not(feature = "ecdh"), doc = "```ignore")]
//! use ecproto::{ecdh, NamedCurve, SecretKey};
//! use rand_core::OsRng;
//!
//! let curve = NamedCurve::Secp256r1.curve()?;
//! let alice = SecretKey::random(curve, &mut OsRng)?;
//! let bob = SecretKey::random(curve, &mut OsRng)?;
//!
//! let alice_shared = ecdh::diffie_hellman(&alice, &bob.public_key())?;
//! let bob_shared = ecdh::diffie_hellman(&bob, &alice.public_key())?;
//! assert_eq!(alice_shared.raw_secret_bytes(), bob_shared.raw_secret_bytes());
//! # Ok::<(), ecproto::Error>(())
//! ```

pub mod cipher;
pub mod kdf;

#[cfg(feature = "ecdh")]
pub mod ecdh;
#[cfg(feature = "ecdsa")]
pub mod ecdsa;
#[cfg(feature = "ecies")]
pub mod ecies;
#[cfg(feature = "mqv")]
pub mod mqv;

mod keys;

pub use crate::keys::{
    KeyPair, PublicKey, SecretKey, gen_public_key, is_legal_private_key, is_legal_public_key,
};
pub use digest;
pub use ecgroup::{self, AffinePoint, BigUint, Curve, Error, NamedCurve, Result};
pub use rand_core;

#[cfg(feature = "ecdsa")]
pub use signature;
