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

//! Arithmetic kernel and field abstraction for elliptic curve cryptography.
//!
//! This crate provides the leaves of the elliptic curve engine:
//!
//! - [`arithmetic`]: modular reduction, exponentiation and inversion over
//!   arbitrary-precision integers, Tonelli-Shanks square roots, Miller-Rabin
//!   primality testing and rejection sampling of random integers.
//! - [`Field`]: a uniform operation set implemented by both [`PrimeField`]
//!   (GF(p)) and [`BinaryField`] (GF(2^m)) so that curve code never needs
//!   to know which kind of field it runs over.
//!
//! Field elements are plain [`BigUint`] values which every field operation
//! returns fully reduced.
//!
//! ## ⚠️ Security Warning
//!
//! None of the arithmetic in this crate is constant time. It is correct
//! for all inputs, but timing depends on the values being processed.
//!
//! ## Usage
//!
//! ```
//! use ecfield::{Field, PrimeField, BigUint};
//!
//! let field = PrimeField::new(BigUint::from(97u32))?;
//! let a = BigUint::from(42u32);
//! let a_inv = field.inv(&a)?;
//! assert_eq!(field.mul(&a, &a_inv), field.one());
//! # Ok::<(), ecfield::Error>(())
//! ```

pub mod arithmetic;

mod error;
mod field;

pub use crate::{
    error::{Error, Result},
    field::{BaseField, BinaryField, Field, PrimeField},
};
pub use num_bigint::{self, BigInt, BigUint};
pub use rand_core;
