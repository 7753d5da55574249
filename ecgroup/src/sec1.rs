//! SEC1 elliptic curve point encoding.
//!
//! Implements the `Elliptic-Curve-Point-to-Octet-String` and
//! `Octet-String-to-Elliptic-Curve-Point` conversions described in
//! SEC 1: Elliptic Curve Cryptography (Version 2.0) section 2.3.3-2.3.4.
//!
//! <http://www.secg.org/sec1-v2.pdf>

use crate::{curve::Curve, point::AffinePoint};
use ecfield::{Error, Field, Result, arithmetic::to_fixed_bytes};
use num_bigint::BigUint;

/// Tag byte identifying the kind of encoded point.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Tag {
    /// Point at infinity.
    Identity = 0,

    /// Compressed point whose compression bit is 0.
    CompressedEvenY = 2,

    /// Compressed point whose compression bit is 1.
    CompressedOddY = 3,

    /// Uncompressed point.
    Uncompressed = 4,
}

impl Tag {
    /// Parse a tag byte.
    pub fn from_u8(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(Tag::Identity),
            2 => Ok(Tag::CompressedEvenY),
            3 => Ok(Tag::CompressedOddY),
            4 => Ok(Tag::Uncompressed),
            _ => Err(Error::InvalidEncoding),
        }
    }

    /// Is this a compressed point tag?
    pub fn is_compressed(self) -> bool {
        matches!(self, Tag::CompressedEvenY | Tag::CompressedOddY)
    }

    /// Total encoded length for a field element size of `field_len` bytes.
    pub fn message_len(self, field_len: usize) -> usize {
        match self {
            Tag::Identity => 1,
            Tag::CompressedEvenY | Tag::CompressedOddY => 1 + field_len,
            Tag::Uncompressed => 1 + 2 * field_len,
        }
    }

    fn compress_y(bit: bool) -> Self {
        if bit {
            Tag::CompressedOddY
        } else {
            Tag::CompressedEvenY
        }
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> u8 {
        tag as u8
    }
}

impl Curve {
    /// Serialize a point, optionally compressed.
    ///
    /// Coordinates are written big-endian at the field byte length. The
    /// point at infinity encodes as the single byte `0x00`.
    pub fn encode_point(&self, point: &AffinePoint, compress: bool) -> Result<Vec<u8>> {
        if point.is_identity() {
            return Ok(vec![Tag::Identity.into()]);
        }

        let len = self.field_len();
        let x = to_fixed_bytes(&point.x, len)?;

        let tag = if compress {
            Tag::compress_y(self.arithmetic().y_bit(self.params(), point))
        } else {
            Tag::Uncompressed
        };

        let mut bytes = Vec::with_capacity(tag.message_len(len));
        bytes.push(tag.into());
        bytes.extend_from_slice(&x);

        if !compress {
            bytes.extend_from_slice(&to_fixed_bytes(&point.y, len)?);
        }

        Ok(bytes)
    }

    /// Parse a point, decompressing it if needed.
    ///
    /// Fails with [`Error::InvalidEncoding`] for an empty input, an unknown
    /// tag, a length that does not match the tag or a coordinate outside
    /// the field, and with [`Error::InvalidPoint`] for a point that is not
    /// on the curve. `0x00` decodes to the point at infinity.
    pub fn decode_point(&self, bytes: &[u8]) -> Result<AffinePoint> {
        let (&tag_byte, body) = bytes.split_first().ok_or(Error::InvalidEncoding)?;
        let tag = Tag::from_u8(tag_byte)?;
        let len = self.field_len();

        if bytes.len() != tag.message_len(len) {
            return Err(Error::InvalidEncoding);
        }

        let field = self.field();
        let coordinate = |chunk: &[u8]| {
            let value = BigUint::from_bytes_be(chunk);
            if field.contains(&value) {
                Ok(value)
            } else {
                Err(Error::InvalidEncoding)
            }
        };

        let point = match tag {
            Tag::Identity => return Ok(AffinePoint::identity()),
            Tag::CompressedEvenY | Tag::CompressedOddY => {
                let x = coordinate(body)?;
                let y = self.arithmetic().decompress(
                    self.params(),
                    &x,
                    tag == Tag::CompressedOddY,
                )?;
                AffinePoint::new(x, y)
            }
            Tag::Uncompressed => {
                let (x, y) = body.split_at(len);
                AffinePoint::new(coordinate(x)?, coordinate(y)?)
            }
        };

        if !self.is_on_curve(&point) {
            tracing::debug!(?tag, "rejected encoded point not on the curve");
            return Err(Error::InvalidPoint);
        }

        Ok(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NamedCurve;
    use hex_literal::hex;

    #[test]
    fn tags() {
        assert_eq!(Tag::from_u8(3), Ok(Tag::CompressedOddY));
        assert_eq!(Tag::from_u8(1), Err(Error::InvalidEncoding));
        assert_eq!(Tag::from_u8(5), Err(Error::InvalidEncoding));
        assert_eq!(Tag::Uncompressed.message_len(32), 65);
        assert!(Tag::CompressedEvenY.is_compressed());
    }

    #[test]
    fn p256_generator_encodings() {
        let curve = NamedCurve::Secp256r1.curve().unwrap();
        let g = curve.generator();

        let compressed = curve.encode_point(g, true).unwrap();
        assert_eq!(
            compressed,
            hex!("036b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296")
        );

        let uncompressed = curve.encode_point(g, false).unwrap();
        assert_eq!(uncompressed.len(), 65);
        assert_eq!(uncompressed[0], 0x04);

        assert_eq!(&curve.decode_point(&compressed).unwrap(), g);
        assert_eq!(&curve.decode_point(&uncompressed).unwrap(), g);
    }

    #[test]
    fn identity_encoding() {
        let curve = NamedCurve::Secp256r1.curve().unwrap();
        assert_eq!(curve.encode_point(&AffinePoint::identity(), true).unwrap(), [0]);
        assert!(curve.decode_point(&[0]).unwrap().is_identity());
        assert_eq!(curve.decode_point(&[0, 0]), Err(Error::InvalidEncoding));
    }

    #[test]
    fn malformed_encodings() {
        let curve = NamedCurve::Secp256r1.curve().unwrap();
        let mut uncompressed = curve.encode_point(curve.generator(), false).unwrap();

        assert_eq!(curve.decode_point(&[]), Err(Error::InvalidEncoding));
        assert_eq!(
            curve.decode_point(&uncompressed[..64]),
            Err(Error::InvalidEncoding)
        );

        // flip a bit in y
        uncompressed[64] ^= 1;
        assert_eq!(curve.decode_point(&uncompressed), Err(Error::InvalidPoint));

        // x = p is outside the field
        let mut out_of_range = vec![0x02];
        out_of_range.extend_from_slice(&hex!(
            "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff"
        ));
        assert_eq!(curve.decode_point(&out_of_range), Err(Error::InvalidEncoding));
    }
}
