//! Group law tests for every curve family.

use ecgroup::{
    AffinePoint, BigUint, CoordinateSystem, Curve, Field, NamedCurve, Point,
    coordinates::{to_affine, to_jacobian, to_lopez_dahab},
};
use num_traits::{One, Zero};
use proptest::prelude::*;

/// One representative per family plus a Koblitz curve.
const FAMILIES: &[NamedCurve] = &[
    NamedCurve::Secp256r1,
    NamedCurve::Curve25519,
    NamedCurve::Sect163r2,
    NamedCurve::Sect163k1,
];

fn curve(name: NamedCurve) -> &'static Curve {
    name.curve().unwrap()
}

prop_compose! {
    fn scalar()(bytes in any::<[u8; 32]>()) -> BigUint {
        BigUint::from_bytes_be(&bytes)
    }
}

#[test]
fn identity_and_unit_multiples() {
    for &name in FAMILIES {
        let curve = curve(name);
        let g = curve.generator();

        assert!(curve.mul(g, &BigUint::zero()).is_identity(), "{name}");
        assert_eq!(&curve.mul(g, &BigUint::one()), g, "{name}");
        assert_eq!(&curve.add_affine(g, &AffinePoint::identity()), g, "{name}");
        assert_eq!(&curve.add_affine(&AffinePoint::identity(), g), g, "{name}");
        assert!(curve.add_affine(g, &curve.negate_affine(g)).is_identity(), "{name}");
        assert!(curve.is_on_curve(&curve.negate_affine(g)), "{name}");
    }
}

#[test]
fn generator_has_order_n() {
    for &name in NamedCurve::ALL {
        let curve = curve(name);
        assert!(curve.is_torsion_free(curve.generator()), "{name}");

        let n_minus_1 = curve.order() - 1u32;
        assert_eq!(
            curve.mul_generator(&n_minus_1),
            curve.negate_affine(curve.generator()),
            "{name}"
        );
    }
}

#[test]
fn doubling_matches_addition() {
    for &name in FAMILIES {
        let curve = curve(name);
        let g = curve.to_projective(curve.generator());
        let doubled = curve.to_affine(&curve.double(&g));

        assert_eq!(curve.to_affine(&curve.add(&g, &g)), doubled, "{name}");
        assert_eq!(curve.mul_generator(&BigUint::from(2u32)), doubled, "{name}");
        assert!(curve.is_on_curve(&doubled), "{name}");
    }
}

#[test]
fn projective_systems() {
    assert_eq!(curve(NamedCurve::Secp256r1).coordinates(), CoordinateSystem::Jacobian);
    assert_eq!(curve(NamedCurve::Curve448).coordinates(), CoordinateSystem::Jacobian);
    assert_eq!(curve(NamedCurve::Sect233k1).coordinates(), CoordinateSystem::LopezDahab);
    assert!(curve(NamedCurve::Sect233r1).identity().is_identity());
}

#[test]
fn small_order_points_are_rejected() {
    // (0, 0) has order 2 on Curve25519
    let curve25519 = curve(NamedCurve::Curve25519);
    let torsion = AffinePoint::new(BigUint::zero(), BigUint::zero());
    assert!(curve25519.is_on_curve(&torsion));
    assert!(!curve25519.is_torsion_free(&torsion));
    assert!(curve25519.mul(&torsion, &BigUint::from(2u32)).is_identity());

    // (0, √b) = (0, 1) has order 2 on K-163
    let k163 = curve(NamedCurve::Sect163k1);
    let torsion = AffinePoint::new(BigUint::zero(), BigUint::one());
    assert!(k163.is_on_curve(&torsion));
    assert!(!k163.is_torsion_free(&torsion));
}

#[test]
fn off_curve_points() {
    for &name in FAMILIES {
        let curve = curve(name);
        let g = curve.generator();
        let bent = AffinePoint::new(g.x().unwrap().clone(), g.y().unwrap() ^ BigUint::one());

        assert!(!curve.is_on_curve(&bent), "{name}");
    }

    // coordinates outside the field
    let p256 = curve(NamedCurve::Secp256r1);
    let g = p256.generator();
    let shifted = AffinePoint::new(
        g.x().unwrap() + p256.field().modulus(),
        g.y().unwrap().clone(),
    );
    assert!(!p256.is_on_curve(&shifted));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn scalar_multiplication_distributes(k in scalar(), l in scalar()) {
        for &name in FAMILIES {
            let curve = curve(name);
            let sum = curve.add_affine(&curve.mul_generator(&k), &curve.mul_generator(&l));
            prop_assert_eq!(&curve.mul_generator(&(&k + &l)), &sum);
            prop_assert_eq!(
                curve.lincomb((curve.generator(), &k), (curve.generator(), &l)),
                sum
            );
        }
    }

    #[test]
    fn addition_is_commutative(k in scalar(), l in scalar()) {
        for &name in FAMILIES {
            let curve = curve(name);
            let p = curve.mul_generator(&k);
            let q = curve.mul_generator(&l);
            prop_assert_eq!(curve.add_affine(&p, &q), curve.add_affine(&q, &p));
            prop_assert!(curve.is_on_curve(&curve.add_affine(&p, &q)));
        }
    }

    #[test]
    fn coordinate_round_trips(k in scalar(), z in scalar()) {
        for &name in FAMILIES {
            let curve = curve(name);
            let field = curve.field();
            let point = curve.mul_generator(&k);

            let projective = match curve.coordinates() {
                CoordinateSystem::LopezDahab => Point::LopezDahab(to_lopez_dahab(field, &point, &z)),
                _ => Point::Jacobian(to_jacobian(field, &point, &z)),
            };
            prop_assert_eq!(to_affine(field, &projective), point);
        }
    }
}
