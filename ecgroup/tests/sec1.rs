//! SEC1 point encoding across every named curve.

use ecgroup::{AffinePoint, BigUint, Error, NamedCurve};
use num_traits::Zero;
use proptest::prelude::*;

prop_compose! {
    fn scalar()(bytes in any::<[u8; 32]>()) -> BigUint {
        BigUint::from_bytes_be(&bytes)
    }
}

#[test]
fn generator_round_trips() {
    for &name in NamedCurve::ALL {
        let curve = name.curve().unwrap();
        let g = curve.generator();

        for compress in [false, true] {
            let encoded = curve.encode_point(g, compress).unwrap();
            let expected_len = if compress { 1 } else { 2 } * curve.field_len() + 1;
            assert_eq!(encoded.len(), expected_len, "{name}");
            assert_eq!(&curve.decode_point(&encoded).unwrap(), g, "{name}");
        }
    }
}

#[test]
fn binary_point_with_zero_x() {
    // (0, √b) decodes from its compressed form on a binary curve
    let curve = NamedCurve::Sect163k1.curve().unwrap();
    let point = AffinePoint::new(BigUint::zero(), BigUint::from(1u32));

    let encoded = curve.encode_point(&point, true).unwrap();
    assert_eq!(encoded[0], 0x02);
    assert_eq!(curve.decode_point(&encoded).unwrap(), point);
}

#[test]
fn compressed_x_without_point() {
    // 7 is a non-residue mod p, so secp256k1 has no point with x = 0
    let curve = NamedCurve::Secp256k1.curve().unwrap();
    let mut encoded = vec![0x02];
    encoded.extend_from_slice(&[0u8; 32]);

    assert_eq!(curve.decode_point(&encoded), Err(Error::InvalidPoint));
}

#[test]
fn unknown_tag() {
    let curve = NamedCurve::Secp256k1.curve().unwrap();
    let mut encoded = curve.encode_point(curve.generator(), true).unwrap();
    encoded[0] = 0x05;
    assert_eq!(curve.decode_point(&encoded), Err(Error::InvalidEncoding));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn compressed_round_trip(k in scalar()) {
        for name in [
            NamedCurve::Secp160r1,
            NamedCurve::Sm2p256v1,
            NamedCurve::Curve25519,
            NamedCurve::Sect163r2,
            NamedCurve::Sect233k1,
        ] {
            let curve = name.curve().unwrap();
            let point = curve.mul_generator(&k);

            for compress in [false, true] {
                let encoded = curve.encode_point(&point, compress).unwrap();
                prop_assert_eq!(&curve.decode_point(&encoded).unwrap(), &point);
            }
        }
    }
}
