//! Scalar multiplication benchmarks, one curve per family.

use criterion::{
    BenchmarkGroup, Criterion, criterion_group, criterion_main, measurement::Measurement,
};
use ecgroup::{BigUint, Curve, NamedCurve};
use hex_literal::hex;
use std::hint::black_box;

fn test_scalar() -> BigUint {
    BigUint::from_bytes_be(&hex!(
        "519b423d715f8b581f4fa8ee59f4771a5b44c8130b4e3eacca54a56dda72b464"
    ))
}

fn bench_point_mul<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, curve: &Curve) {
    let k = test_scalar();
    let p = curve.mul_generator(&BigUint::from(7u32));
    group.bench_function("point-scalar mul", |b| {
        b.iter(|| curve.mul(black_box(&p), black_box(&k)))
    });
}

fn bench_point_lincomb<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, curve: &Curve) {
    let k = test_scalar();
    let l = &k >> 3u32;
    let p = curve.mul_generator(&BigUint::from(7u32));
    group.bench_function("lincomb", |b| {
        b.iter(|| curve.lincomb((curve.generator(), black_box(&k)), (&p, black_box(&l))))
    });
}

fn bench_point(c: &mut Criterion) {
    for name in [
        NamedCurve::Secp256r1,
        NamedCurve::Curve25519,
        NamedCurve::Sect233k1,
    ] {
        let Ok(curve) = name.curve() else {
            continue;
        };

        let mut group = c.benchmark_group(format!("{name} point operations"));
        bench_point_mul(&mut group, curve);
        bench_point_lincomb(&mut group, curve);
        group.finish();
    }
}

criterion_group!(benches, bench_point);
criterion_main!(benches);
