//! Distinguished identifier support.

use crate::{DistId, Error, Hash, PublicKey, Result, coordinates};
use ecfield::arithmetic::to_fixed_bytes;
use sm3::{Digest, Sm3};

/// Compute user information hash `Z` according to [draft-shen-sm2-ecdsa § 5.1.4.4].
///
/// ```text
/// ZA=H256(ENTLA || IDA || a || b || xG || yG || xA || yA)
/// ```
///
/// The curve coefficients and coordinates are taken from the curve of
/// `public_key` and serialized at its field byte length.
///
/// Fails with [`Error::IdTooLong`] if the bit length of `distid` does not
/// fit in the 16-bit `ENTLA` field.
///
/// [draft-shen-sm2-ecdsa § 5.1.4.4]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#section-5.1.4.4
pub fn hash_z(distid: &DistId, public_key: &PublicKey) -> Result<Hash> {
    let entla: u16 = distid
        .len()
        .checked_mul(8)
        .and_then(|l| l.try_into().ok())
        .ok_or(Error::IdTooLong)?;

    let curve = public_key.curve();
    let params = curve.params();
    let field_len = curve.field_len();
    let (xg, yg) = coordinates(curve, params.generator())?;
    let (xa, ya) = coordinates(curve, public_key.as_affine())?;

    let mut sm3 = Sm3::new();
    sm3.update(entla.to_be_bytes());
    sm3.update(distid);
    sm3.update(to_fixed_bytes(params.a(), field_len)?);
    sm3.update(to_fixed_bytes(params.b(), field_len)?);
    sm3.update(xg);
    sm3.update(yg);
    sm3.update(xa);
    sm3.update(ya);
    Ok(sm3.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DEFAULT_DISTID, SecretKey, curve};
    use hex_literal::hex;

    const SECRET_KEY: [u8; 32] =
        hex!("3945208F7B2144B13F36E38AC6D39F95889393692860B51A42FB81EF4DF7C5B8");

    #[test]
    fn gbt_identity_hash() {
        let secret_key = SecretKey::from_slice(curve().unwrap(), &SECRET_KEY).unwrap();
        assert_eq!(
            hash_z(DEFAULT_DISTID, &secret_key.public_key()).unwrap().as_slice(),
            hex!("b2e14c5c79c6df5b85f4fe7ed8db7a262b9da7e07ccb0ea9f4747b8ccda8a4f3")
        );
    }

    #[test]
    fn identifier_length_limit() {
        let public_key = SecretKey::from_slice(curve().unwrap(), &SECRET_KEY)
            .unwrap()
            .public_key();

        // 8191 bytes is 65528 bits, the longest identifier that fits
        assert!(hash_z(&"a".repeat(8191), &public_key).is_ok());
        assert_eq!(hash_z(&"a".repeat(8192), &public_key), Err(Error::IdTooLong));
    }
}
