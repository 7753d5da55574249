//! Error types.

use core::fmt;

/// Errors surfaced by the arithmetic kernel, the curve layer and the
/// protocols built on top of them.
///
/// Decryption failures are intentionally reported as a single
/// [`Error::DecryptionFailed`] without any detail about which check failed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A parameter is outside of the domain accepted by the operation.
    InvalidParameter,

    /// The element has no multiplicative inverse modulo the given modulus.
    NoInverse,

    /// The element is not a quadratic residue.
    NoSquareRoot,

    /// Division by the zero element of a field.
    DivisionByZero,

    /// A bounded sampling or retry loop ran out of attempts.
    ExhaustedAttempts,

    /// Malformed point or signature encoding.
    InvalidEncoding,

    /// Point is not on the curve or uses a coordinate system the curve
    /// does not support.
    InvalidPoint,

    /// Scalar is outside of `[1, n-1]`.
    InvalidScalar,

    /// Private key is outside of `[1, n-1]`.
    InvalidPrivateKey,

    /// Public key failed validation.
    InvalidPublicKey,

    /// No curve is registered under the given name.
    UnknownCurve,

    /// Key agreement produced the point at infinity.
    DegenerateSharedSecret,

    /// MQV or SM2 key agreement failed.
    NoAgreement,

    /// Distinguishing identifier is longer than `0xFFFF` bits.
    IdTooLong,

    /// Requested or supplied length is not acceptable.
    InvalidLength,

    /// Signature verification failed.
    InvalidSignature,

    /// Ciphertext could not be decrypted.
    DecryptionFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::InvalidParameter => "invalid parameter",
            Error::NoInverse => "element has no inverse",
            Error::NoSquareRoot => "element has no square root",
            Error::DivisionByZero => "division by zero",
            Error::ExhaustedAttempts => "maximum number of attempts exhausted",
            Error::InvalidEncoding => "invalid encoding",
            Error::InvalidPoint => "invalid curve point",
            Error::InvalidScalar => "scalar out of range",
            Error::InvalidPrivateKey => "invalid private key",
            Error::InvalidPublicKey => "invalid public key",
            Error::UnknownCurve => "unknown curve",
            Error::DegenerateSharedSecret => "shared secret is the point at infinity",
            Error::NoAgreement => "key agreement failed",
            Error::IdTooLong => "distinguishing identifier too long",
            Error::InvalidLength => "invalid length",
            Error::InvalidSignature => "signature error",
            Error::DecryptionFailed => "decryption failed",
        })
    }
}

impl std::error::Error for Error {}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
