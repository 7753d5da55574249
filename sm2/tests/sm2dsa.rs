//! SM2DSA tests.

#![cfg(feature = "dsa")]

use hex_literal::hex;
use proptest::prelude::*;
use rand_core::OsRng;
use sm2::{
    BigUint, DEFAULT_DISTID, NamedCurve, SecretKey,
    dsa::{
        Signature, SigningKey, VerifyingKey, hazmat,
        signature::{RandomizedSigner, SignatureEncoding, Verifier, hazmat::PrehashVerifier},
    },
};

const PUBLIC_KEY: [u8; 65] = hex!(
    "0408D77AE04C01CC4C1104360DD8AF6B6F7DF334283D7C1A6AFD5652407B87BEE5014E2A57C36C150D16324DC664E31E6432359609C4E79847A5B161C8C7364C8A"
);
const IDENTITY: &str = "example@rustcrypto.org";
const MSG: &[u8] = b"testing";

// Created using:
// $ openssl pkeyutl -sign -in - -inkey pkcs8-private-key.pem -out sig -digest sm3 -pkeyopt distid:example@rustcrypto.org
const SIG: [u8; 64] = hex!(
    "d1dcccedd9fb785e0f67c16b7c52901625c0b69de9bca2144acc7be713cad2fc" // r
    "f7d1eae6e3a157b36c65f672f738ca8b46298bf149a6510072c431b49cd88b1c" // s
);

// GB/T 32918.2 example on sm2p256v1
const GBT_SECRET_KEY: [u8; 32] =
    hex!("3945208F7B2144B13F36E38AC6D39F95889393692860B51A42FB81EF4DF7C5B8");
const GBT_PUBLIC_KEY: [u8; 65] = hex!(
    "04"
    "09F9DF311E5421A150DD7D161E4BC5C672179FAD1833FC076BB08FF356F35020"
    "CCEA490CE26775A52DC6EA718CC1AA600AED05FBF35E084A6632F6072DA9AD13"
);
const GBT_K: [u8; 32] = hex!("59276E27D506861A16680F3AD9C02DCCEF3CC1FA3CDBE4CE6D54B80DEAC1BC21");
const GBT_MSG: &[u8] = b"message digest";
const GBT_SIG: [u8; 64] = hex!(
    "F5A03B0648D2C4630EEAC513E1BB81A15944DA3827D5B74143AC7EACEEE720B3" // r
    "B1B6AA29DF212FD8763182BC0D421CA1BB9038FD1F7F42D4840B69C485BBC1AA" // s
);

#[test]
fn verify_test_vector() {
    let vk = VerifyingKey::from_sec1_bytes(sm2::curve().unwrap(), IDENTITY, &PUBLIC_KEY).unwrap();
    let sig = Signature::from_bytes(&SIG).expect("decoded Signature failed");
    assert!(vk.verify(MSG, &sig).is_ok());
}

#[test]
fn gbt_key_pair() {
    let curve = sm2::curve().unwrap();
    let signing_key = SigningKey::from_slice(curve, DEFAULT_DISTID, &GBT_SECRET_KEY).unwrap();
    assert_eq!(
        signing_key.verifying_key().to_sec1_bytes(false).unwrap(),
        GBT_PUBLIC_KEY
    );
    assert_eq!(signing_key.distid(), DEFAULT_DISTID);
}

#[test]
fn gbt_sign_with_known_k() {
    let curve = sm2::curve().unwrap();
    let signing_key = SigningKey::from_slice(curve, DEFAULT_DISTID, &GBT_SECRET_KEY).unwrap();
    let e = signing_key.verifying_key().hash_msg(GBT_MSG);

    let signature = hazmat::sign_prehashed(
        curve,
        signing_key.as_secret_key().as_scalar(),
        &BigUint::from_bytes_be(&GBT_K),
        &e,
    )
    .unwrap();

    assert_eq!(signature.to_bytes(), GBT_SIG);
    assert_eq!(signature.encoded_len(), 64);
    assert!(signing_key.verifying_key().verify(GBT_MSG, &signature).is_ok());
    assert!(signing_key.verifying_key().verify_prehash(&e, &signature).is_ok());
}

#[test]
fn identity_is_bound_to_signature() {
    let curve = sm2::curve().unwrap();
    let vk = VerifyingKey::from_sec1_bytes(curve, "someone@else.org", &PUBLIC_KEY).unwrap();
    let sig = Signature::from_bytes(&SIG).unwrap();
    assert!(vk.verify(MSG, &sig).is_err());
}

#[test]
fn rejects_out_of_range_scalars() {
    let curve = sm2::curve().unwrap();
    let vk = VerifyingKey::from_sec1_bytes(curve, IDENTITY, &PUBLIC_KEY).unwrap();
    let good = Signature::from_bytes(&SIG).unwrap();
    let n = curve.order();

    for (r, s) in [
        (n.clone(), good.s().clone()),
        (good.r().clone(), n.clone()),
        // t = (r + s) mod n = 0
        (good.r().clone(), n - good.r()),
    ] {
        let forged = Signature::from_scalars(r, s).unwrap();
        assert!(vk.verify(MSG, &forged).is_err());
    }
}

#[test]
fn binary_curve_signatures() {
    let curve = NamedCurve::Sect233r1.curve().unwrap();
    let secret_key = SecretKey::random(curve, &mut OsRng).unwrap();
    let signing_key = SigningKey::new(IDENTITY, secret_key).unwrap();
    let signature = signing_key.sign_message(&mut OsRng, MSG).unwrap();
    assert!(signing_key.verifying_key().verify(MSG, &signature).is_ok());

    let wide = NamedCurve::Sect283k1.curve().unwrap();
    let secret_key = SecretKey::random(wide, &mut OsRng).unwrap();
    assert!(SigningKey::new(IDENTITY, secret_key).is_err());
}

prop_compose! {
    fn signing_key()(bytes in any::<[u8; 32]>()) -> SigningKey {
        let curve = sm2::curve().unwrap();
        let scalar = BigUint::from_bytes_be(&bytes) % (curve.order() - 2u32) + 1u32;
        SigningKey::new(IDENTITY, SecretKey::from_scalar(curve, scalar).unwrap()).unwrap()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn sign_and_verify(sk in signing_key()) {
        let signature: Signature = sk.sign_with_rng(&mut OsRng, MSG);
        prop_assert!(sk.verifying_key().verify(MSG, &signature).is_ok());
    }

    #[test]
    fn reject_invalid_signature(sk in signing_key(), byte in 0usize..32, bit in 0usize..8) {
        let mut signature_bytes = sk.sign_with_rng(&mut OsRng, MSG).to_bytes();

        // tweak signature to make it invalid
        signature_bytes[byte] ^= 1 << bit;

        let signature = Signature::from_bytes(&signature_bytes).unwrap();
        prop_assert!(sk.verifying_key().verify(MSG, &signature).is_err());
    }
}
