//! SM2 key exchange tests.

#![cfg(feature = "ke")]

use hex_literal::hex;
use proptest::prelude::*;
use rand_core::OsRng;
use sm2::{
    BigUint, DEFAULT_DISTID, Error, KeyPair, NamedCurve, SecretKey,
    ke::{KeyExchange, Peer, Role},
};

// GB/T 32918.3 example on sm2p256v1
const ALICE_STATIC: [u8; 32] =
    hex!("81EB26E941BB5AF16DF116495F90695272AE2CD63D6C4AE1678418BE48230029");
const ALICE_EPHEMERAL: [u8; 32] =
    hex!("D4DE15474DB74D06491C440D305E012400990F3E390C7E87153C12DB2EA60BB3");
const BOB_STATIC: [u8; 32] =
    hex!("785129917D45A9EA5437A59356B82338EAADDA6CEB199088F14AE10DEFA229B5");
const BOB_EPHEMERAL: [u8; 32] =
    hex!("7E07124814B309489125EAED101113164EBF0F3458C5BD88335C1F9D596243D6");

const SHARED_KEY: [u8; 16] = hex!("6C89347354DE2484C60B4AB1FDE4C6E5");
const SB: [u8; 32] = hex!("d3a0fe15dee185ceae907a6b595cc32a266ed7b3367e9983a896dc32fa20f8eb");
const SA: [u8; 32] = hex!("18c7894b3816df16cf07b05c5ec0bef5d655d58f779cc1b400a4f3884644db88");

fn key_pair(bytes: &[u8]) -> KeyPair {
    KeyPair::from(SecretKey::from_slice(sm2::curve().unwrap(), bytes).unwrap())
}

fn exchange(role: Role, static_key: &[u8], ephemeral_key: &[u8]) -> KeyExchange {
    KeyExchange::with_ephemeral_key(
        role,
        DEFAULT_DISTID,
        key_pair(static_key),
        key_pair(ephemeral_key),
    )
    .unwrap()
}

#[test]
fn gbt_key_exchange() {
    let alice = exchange(Role::Initiator, &ALICE_STATIC, &ALICE_EPHEMERAL);
    let bob = exchange(Role::Responder, &BOB_STATIC, &BOB_EPHEMERAL);

    let alice_peer = Peer::new(DEFAULT_DISTID, key_pair(&BOB_STATIC).public_key().clone()).unwrap();
    let bob_peer = Peer::new(DEFAULT_DISTID, key_pair(&ALICE_STATIC).public_key().clone()).unwrap();

    let bob_key = bob
        .agree(&bob_peer, alice.ephemeral_public_key(), 16)
        .unwrap();
    assert_eq!(bob_key.as_bytes(), SHARED_KEY);
    assert_eq!(bob_key.confirmation(), SB);

    let alice_key = alice
        .agree(&alice_peer, bob.ephemeral_public_key(), 16)
        .unwrap();
    assert_eq!(alice_key.as_bytes(), SHARED_KEY);
    assert_eq!(alice_key.confirmation(), SA);

    assert!(alice_key.verify_confirmation(&SB).is_ok());
    assert!(bob_key.verify_confirmation(&SA).is_ok());
}

#[test]
fn confirmation_mismatch() {
    let alice = exchange(Role::Initiator, &ALICE_STATIC, &ALICE_EPHEMERAL);
    let bob = exchange(Role::Responder, &BOB_STATIC, &BOB_EPHEMERAL);
    let peer = Peer::new(DEFAULT_DISTID, key_pair(&BOB_STATIC).public_key().clone()).unwrap();

    let alice_key = alice.agree(&peer, bob.ephemeral_public_key(), 16).unwrap();

    // own tag is not the peer's tag
    assert_eq!(alice_key.verify_confirmation(&SA), Err(Error::NoAgreement));
    assert_eq!(alice_key.verify_confirmation(&SB[..16]), Err(Error::NoAgreement));
}

#[test]
fn identities_are_bound_to_key() {
    let alice = exchange(Role::Initiator, &ALICE_STATIC, &ALICE_EPHEMERAL);
    let bob = exchange(Role::Responder, &BOB_STATIC, &BOB_EPHEMERAL);

    let peer = Peer::new("mallory", key_pair(&BOB_STATIC).public_key().clone()).unwrap();
    let alice_key = alice.agree(&peer, bob.ephemeral_public_key(), 16).unwrap();
    assert_ne!(alice_key.as_bytes(), SHARED_KEY);
    assert_eq!(alice_key.verify_confirmation(&SB), Err(Error::NoAgreement));
}

#[test]
fn roles_must_differ() {
    // both sides claiming the initiator role order the transcript differently
    let alice = exchange(Role::Initiator, &ALICE_STATIC, &ALICE_EPHEMERAL);
    let bob = exchange(Role::Initiator, &BOB_STATIC, &BOB_EPHEMERAL);

    let alice_peer = Peer::new(DEFAULT_DISTID, key_pair(&BOB_STATIC).public_key().clone()).unwrap();
    let bob_peer = Peer::new(DEFAULT_DISTID, key_pair(&ALICE_STATIC).public_key().clone()).unwrap();

    let alice_key = alice.agree(&alice_peer, bob.ephemeral_public_key(), 16).unwrap();
    let bob_key = bob.agree(&bob_peer, alice.ephemeral_public_key(), 16).unwrap();
    assert_ne!(alice_key.as_bytes(), bob_key.as_bytes());
}

#[test]
fn curve_mismatch() {
    let alice = exchange(Role::Initiator, &ALICE_STATIC, &ALICE_EPHEMERAL);

    let other = NamedCurve::Secp256r1.curve().unwrap();
    let stranger = KeyPair::random(other, &mut OsRng).unwrap();
    let peer = Peer::new(DEFAULT_DISTID, stranger.public_key().clone()).unwrap();
    let ephemeral = KeyPair::random(other, &mut OsRng).unwrap();

    assert_eq!(
        alice.agree(&peer, ephemeral.public_key(), 16).unwrap_err(),
        Error::NoAgreement
    );

    let static_key = key_pair(&ALICE_STATIC);
    assert_eq!(
        KeyExchange::with_ephemeral_key(Role::Initiator, DEFAULT_DISTID, static_key, ephemeral)
            .unwrap_err(),
        Error::NoAgreement
    );
}

#[test]
fn binary_curve_agreement() {
    let curve = NamedCurve::Sect233k1.curve().unwrap();
    let alice_static = KeyPair::random(curve, &mut OsRng).unwrap();
    let bob_static = KeyPair::random(curve, &mut OsRng).unwrap();

    let alice_peer = Peer::new("bob", bob_static.public_key().clone()).unwrap();
    let bob_peer = Peer::new("alice", alice_static.public_key().clone()).unwrap();

    let alice = KeyExchange::new(Role::Initiator, "alice", alice_static, &mut OsRng).unwrap();
    let bob = KeyExchange::new(Role::Responder, "bob", bob_static, &mut OsRng).unwrap();

    let alice_key = alice.agree(&alice_peer, bob.ephemeral_public_key(), 48).unwrap();
    let bob_key = bob.agree(&bob_peer, alice.ephemeral_public_key(), 48).unwrap();

    assert_eq!(alice_key.as_bytes().len(), 48);
    assert_eq!(alice_key.as_bytes(), bob_key.as_bytes());
    assert!(alice_key.verify_confirmation(bob_key.confirmation()).is_ok());
    assert!(bob_key.verify_confirmation(alice_key.confirmation()).is_ok());
}

prop_compose! {
    fn key_pair_strategy()(bytes in any::<[u8; 32]>()) -> KeyPair {
        let curve = sm2::curve().unwrap();
        let scalar = BigUint::from_bytes_be(&bytes) % (curve.order() - 1u32) + 1u32;
        KeyPair::from(SecretKey::from_scalar(curve, scalar).unwrap())
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn both_sides_agree(
        alice_static in key_pair_strategy(),
        bob_static in key_pair_strategy(),
        klen in 1usize..80,
    ) {
        let alice_peer = Peer::new(DEFAULT_DISTID, bob_static.public_key().clone()).unwrap();
        let bob_peer = Peer::new(DEFAULT_DISTID, alice_static.public_key().clone()).unwrap();

        let alice =
            KeyExchange::new(Role::Initiator, DEFAULT_DISTID, alice_static, &mut OsRng).unwrap();
        let bob =
            KeyExchange::new(Role::Responder, DEFAULT_DISTID, bob_static, &mut OsRng).unwrap();

        let alice_key = alice.agree(&alice_peer, bob.ephemeral_public_key(), klen).unwrap();
        let bob_key = bob.agree(&bob_peer, alice.ephemeral_public_key(), klen).unwrap();

        prop_assert_eq!(alice_key.as_bytes(), bob_key.as_bytes());
        prop_assert!(alice_key.verify_confirmation(bob_key.confirmation()).is_ok());
    }
}
