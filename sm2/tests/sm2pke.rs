//! SM2 public key encryption tests.

#![cfg(feature = "pke")]

use hex_literal::hex;
use proptest::prelude::*;
use rand_core::OsRng;
use sm2::{
    BigUint, Error, NamedCurve, SecretKey,
    pke::{Cipher, DecryptingKey, EncryptingKey, Mode, hazmat},
};

// private key bytes
const PRIVATE_KEY: [u8; 32] =
    hex!("3DDD2A3679BF6F1DFC3B49D3E99114718E48EC170EB4E4D3A82052DAB19E8B50");
const MSG: &[u8] = b"plaintext";

// starts with 04, ciphertext
const CIPHER: [u8; 106] = hex!("041ed68db303f5bc6bce516d5a62e1cd16781d3007df6864d970a56d46a6cecca0e0d33bfc71e78c440ae6afeef1a18cce473b3e27002189a058ddadc9182c80a3f13be66476ba6ef66d95a7fb11f30de441b3b66d566e48348bd830e584e7ec37f9b704ef32eba9055c");

// GB/T 32918.4 example on sm2p256v1
const GBT_SECRET_KEY: [u8; 32] =
    hex!("3945208F7B2144B13F36E38AC6D39F95889393692860B51A42FB81EF4DF7C5B8");
const GBT_K: [u8; 32] = hex!("59276E27D506861A16680F3AD9C02DCCEF3CC1FA3CDBE4CE6D54B80DEAC1BC21");
const GBT_MSG: &[u8] = b"encryption standard";
const GBT_C1: [u8; 65] = hex!(
    "04"
    "04EBFC718E8D1798620432268E77FEB6415E2EDE0E073C0F4F640ECD2E149A73"
    "E858F9D81E5430A57B36DAAB8F950A3C64E6EE6A63094D99283AFF767E124DF0"
);
const GBT_C2: [u8; 19] = hex!("21886ca989ca9c7d58087307ca93092d651efa");
const GBT_C3: [u8; 32] = hex!("59983c18f809e262923c53aec295d30383b54e39d609d160afcb1908d0bd8766");

fn decrypting_key(mode: Mode) -> DecryptingKey {
    let secret_key = SecretKey::from_slice(sm2::curve().unwrap(), &PRIVATE_KEY).unwrap();
    DecryptingKey::new_with_mode(secret_key, mode)
}

#[test]
fn decrypt_verify() {
    let dk = DecryptingKey::from_slice(sm2::curve().unwrap(), &PRIVATE_KEY).unwrap();
    assert_eq!(dk.decrypt(&CIPHER).unwrap(), MSG);
}

#[test]
fn gbt_encrypt_with_known_k() {
    let curve = sm2::curve().unwrap();
    let secret_key = SecretKey::from_slice(curve, &GBT_SECRET_KEY).unwrap();

    let cipher =
        hazmat::encrypt_with_k(&secret_key.public_key(), &BigUint::from_bytes_be(&GBT_K), GBT_MSG)
            .unwrap();
    assert_eq!(cipher.c1(), GBT_C1);
    assert_eq!(cipher.c2(), GBT_C2);
    assert_eq!(cipher.c3().as_slice(), GBT_C3);

    let ciphertext = cipher.to_vec(Mode::C1C2C3);
    assert_eq!(ciphertext, [&GBT_C1[..], &GBT_C2[..], &GBT_C3[..]].concat());

    let dk = DecryptingKey::new_with_mode(secret_key, Mode::C1C2C3);
    assert_eq!(dk.decrypt(&ciphertext).unwrap(), GBT_MSG);
}

#[test]
fn mode_mismatch() {
    let bytes = decrypting_key(Mode::C1C3C2)
        .encrypting_key()
        .encrypt(&mut OsRng, MSG)
        .unwrap();
    assert_eq!(decrypting_key(Mode::C1C2C3).decrypt(&bytes), Err(Error::DecryptionFailed));
}

#[test]
fn wrong_key() {
    let curve = sm2::curve().unwrap();
    let other = DecryptingKey::new(SecretKey::random(curve, &mut OsRng).unwrap());
    assert_eq!(other.decrypt(&CIPHER), Err(Error::DecryptionFailed));
}

#[test]
fn invalid_c1() {
    let dk = decrypting_key(Mode::C1C3C2);

    // point at infinity
    let mut infinity = vec![0u8];
    infinity.extend_from_slice(&CIPHER[65..]);
    assert_eq!(dk.decrypt(&infinity), Err(Error::DecryptionFailed));

    // not on the curve
    let mut off_curve = CIPHER;
    off_curve[64] ^= 1;
    assert_eq!(dk.decrypt(&off_curve), Err(Error::DecryptionFailed));

    // truncated
    assert_eq!(dk.decrypt(&CIPHER[..90]), Err(Error::DecryptionFailed));
}

#[test]
fn compressed_c1() {
    let dk = decrypting_key(Mode::C1C2C3);
    let curve = sm2::curve().unwrap();
    let cipher = dk
        .encrypting_key()
        .encrypt_cipher(&mut OsRng, MSG)
        .unwrap();

    let c1 = curve.decode_point(cipher.c1()).unwrap();
    let compressed = [
        curve.encode_point(&c1, true).unwrap().as_slice(),
        cipher.c2(),
        cipher.c3().as_slice(),
    ]
    .concat();

    assert_eq!(
        Cipher::from_slice(curve, &compressed, Mode::C1C2C3).unwrap().c2(),
        cipher.c2()
    );
    assert_eq!(dk.decrypt(&compressed).unwrap(), MSG);
}

#[test]
fn empty_message() {
    let dk = decrypting_key(Mode::C1C3C2);
    let bytes = dk.encrypting_key().encrypt(&mut OsRng, b"").unwrap();
    assert_eq!(bytes.len(), 65 + 32);
    assert_eq!(dk.decrypt(&bytes).unwrap(), b"");
}

#[test]
fn binary_curve_round_trip() {
    let curve = NamedCurve::Sect283r1.curve().unwrap();
    let dk = DecryptingKey::new(SecretKey::random(curve, &mut OsRng).unwrap());
    let bytes = dk.encrypting_key().encrypt(&mut OsRng, MSG).unwrap();
    assert_eq!(dk.decrypt(&bytes).unwrap(), MSG);
}

prop_compose! {
    fn secret_key()(bytes in any::<[u8; 32]>()) -> SecretKey {
        let curve = sm2::curve().unwrap();
        let scalar = BigUint::from_bytes_be(&bytes) % (curve.order() - 1u32) + 1u32;
        SecretKey::from_scalar(curve, scalar).unwrap()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn encrypt_and_decrypt(
        sk in secret_key(),
        msg in proptest::collection::vec(any::<u8>(), 0..96),
    ) {
        for mode in [Mode::C1C2C3, Mode::C1C3C2] {
            let dk = DecryptingKey::new_with_mode(sk.clone(), mode);
            let ek = EncryptingKey::new_with_mode(sk.public_key(), mode);
            let cipher_bytes = ek.encrypt(&mut OsRng, &msg).unwrap();
            prop_assert_eq!(dk.decrypt(&cipher_bytes).unwrap(), msg.clone());
        }
    }

    #[test]
    fn tampering_is_detected(
        sk in secret_key(),
        byte in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let dk = DecryptingKey::new(sk);
        let mut cipher_bytes = dk.encrypting_key().encrypt(&mut OsRng, MSG).unwrap();

        let i = byte.index(cipher_bytes.len());
        cipher_bytes[i] ^= 1 << bit;
        prop_assert_eq!(dk.decrypt(&cipher_bytes), Err(Error::DecryptionFailed));
    }
}
