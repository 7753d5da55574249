//! Named curves.
//!
//! Parameters come from SEC 2 (prime and binary curves), GM/T 0003 (SM2)
//! and RFC 7748 (Curve25519 and Curve448, here in Montgomery form with
//! full `(x, y)` arithmetic). Each curve is built on first use and shared
//! for the lifetime of the process.

use crate::{
    curve::Curve,
    params::{CurveForm, CurveParams},
};
use core::{fmt, str::FromStr};
use ecfield::{BinaryField, Error, PrimeField, Result};
use hex_literal::hex;
use num_bigint::BigUint;
use once_cell::sync::Lazy;

macro_rules! named_curves {
    ($($variant:ident => $name:literal, $builder:ident, $doc:literal;)+) => {
        /// Curves with built-in domain parameters.
        #[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum NamedCurve {
            $(
                #[doc = $doc]
                $variant,
            )+
        }

        impl NamedCurve {
            /// Every named curve, in table order.
            pub const ALL: &'static [NamedCurve] = &[$(NamedCurve::$variant),+];

            /// Standard name of the curve, e.g. `"secp256r1"`.
            pub fn name(self) -> &'static str {
                match self {
                    $(NamedCurve::$variant => $name,)+
                }
            }

            /// The shared [`Curve`] instance for this name.
            pub fn curve(self) -> Result<&'static Curve> {
                static CURVES: Lazy<Vec<Result<Curve>>> = Lazy::new(|| {
                    NamedCurve::ALL
                        .iter()
                        .map(|name| name.params().map(Curve::new))
                        .collect()
                });

                CURVES
                    .get(self as usize)
                    .ok_or(Error::UnknownCurve)?
                    .as_ref()
                    .map_err(|err| *err)
            }

            /// Freshly built domain parameters for this name.
            pub fn params(self) -> Result<CurveParams> {
                match self {
                    $(NamedCurve::$variant => $builder(),)+
                }
            }
        }

        impl FromStr for NamedCurve {
            type Err = Error;

            fn from_str(name: &str) -> Result<Self> {
                match name {
                    $($name => Ok(NamedCurve::$variant),)+
                    _ => Err(Error::UnknownCurve),
                }
            }
        }
    };
}

named_curves! {
    Secp160r1 => "secp160r1", secp160r1, "SEC 2 160-bit prime curve.";
    Secp192r1 => "secp192r1", secp192r1, "NIST P-192.";
    Secp224r1 => "secp224r1", secp224r1, "NIST P-224.";
    Secp256r1 => "secp256r1", secp256r1, "NIST P-256.";
    Secp256k1 => "secp256k1", secp256k1, "SEC 2 256-bit Koblitz prime curve.";
    Secp384r1 => "secp384r1", secp384r1, "NIST P-384.";
    Secp521r1 => "secp521r1", secp521r1, "NIST P-521.";
    Sm2p256v1 => "sm2p256v1", sm2p256v1, "SM2 recommended curve.";
    Curve25519 => "curve25519", curve25519, "Curve25519 in Montgomery form.";
    Curve448 => "curve448", curve448, "Curve448 in Montgomery form.";
    Sect163k1 => "sect163k1", sect163k1, "NIST K-163.";
    Sect163r2 => "sect163r2", sect163r2, "NIST B-163.";
    Sect233k1 => "sect233k1", sect233k1, "NIST K-233.";
    Sect233r1 => "sect233r1", sect233r1, "NIST B-233.";
    Sect283k1 => "sect283k1", sect283k1, "NIST K-283.";
    Sect283r1 => "sect283r1", sect283r1, "NIST B-283.";
    Sect409k1 => "sect409k1", sect409k1, "NIST K-409.";
    Sect409r1 => "sect409r1", sect409r1, "NIST B-409.";
    Sect571k1 => "sect571k1", sect571k1, "NIST K-571.";
    Sect571r1 => "sect571r1", sect571r1, "NIST B-571.";
}

impl fmt::Display for NamedCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<NamedCurve> for Curve {
    type Error = Error;

    fn try_from(name: NamedCurve) -> Result<Curve> {
        name.curve().cloned()
    }
}

fn prime_curve(
    form: CurveForm,
    p: &[u8],
    a: &[u8],
    b: &[u8],
    (gx, gy): (&[u8], &[u8]),
    n: &[u8],
    h: u32,
) -> Result<CurveParams> {
    let field = PrimeField::new(BigUint::from_bytes_be(p))?;

    CurveParams::new(
        form,
        field.into(),
        BigUint::from_bytes_be(a),
        BigUint::from_bytes_be(b),
        (BigUint::from_bytes_be(gx), BigUint::from_bytes_be(gy)),
        BigUint::from_bytes_be(n),
        BigUint::from(h),
    )
}

fn binary_curve(
    form: CurveForm,
    poly: &[u64],
    a: &[u8],
    b: &[u8],
    (gx, gy): (&[u8], &[u8]),
    n: &[u8],
    h: u32,
) -> Result<CurveParams> {
    let field = BinaryField::from_exponents(poly)?;

    CurveParams::new(
        form,
        field.into(),
        BigUint::from_bytes_be(a),
        BigUint::from_bytes_be(b),
        (BigUint::from_bytes_be(gx), BigUint::from_bytes_be(gy)),
        BigUint::from_bytes_be(n),
        BigUint::from(h),
    )
}

fn secp160r1() -> Result<CurveParams> {
    prime_curve(
        CurveForm::ShortWeierstrass,
        &hex!("ffffffffffffffffffffffffffffffff7fffffff"),
        &hex!("ffffffffffffffffffffffffffffffff7ffffffc"),
        &hex!("1c97befc54bd7a8b65acf89f81d4d4adc565fa45"),
        (
            &hex!("4a96b5688ef573284664698968c38bb913cbfc82"),
            &hex!("23a628553168947d59dcc912042351377ac5fb32"),
        ),
        &hex!("0100000000000000000001f4c8f927aed3ca752257"),
        1,
    )
}

fn secp192r1() -> Result<CurveParams> {
    prime_curve(
        CurveForm::ShortWeierstrass,
        &hex!("fffffffffffffffffffffffffffffffeffffffffffffffff"),
        &hex!("fffffffffffffffffffffffffffffffefffffffffffffffc"),
        &hex!("64210519e59c80e70fa7e9ab72243049feb8deecc146b9b1"),
        (
            &hex!("188da80eb03090f67cbf20eb43a18800f4ff0afd82ff1012"),
            &hex!("07192b95ffc8da78631011ed6b24cdd573f977a11e794811"),
        ),
        &hex!("ffffffffffffffffffffffff99def836146bc9b1b4d22831"),
        1,
    )
}

fn secp224r1() -> Result<CurveParams> {
    prime_curve(
        CurveForm::ShortWeierstrass,
        &hex!("ffffffffffffffffffffffffffffffff000000000000000000000001"),
        &hex!("fffffffffffffffffffffffffffffffefffffffffffffffffffffffe"),
        &hex!("b4050a850c04b3abf54132565044b0b7d7bfd8ba270b39432355ffb4"),
        (
            &hex!("b70e0cbd6bb4bf7f321390b94a03c1d356c21122343280d6115c1d21"),
            &hex!("bd376388b5f723fb4c22dfe6cd4375a05a07476444d5819985007e34"),
        ),
        &hex!("ffffffffffffffffffffffffffff16a2e0b8f03e13dd29455c5c2a3d"),
        1,
    )
}

fn secp256r1() -> Result<CurveParams> {
    prime_curve(
        CurveForm::ShortWeierstrass,
        &hex!("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff"),
        &hex!("ffffffff00000001000000000000000000000000fffffffffffffffffffffffc"),
        &hex!("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b"),
        (
            &hex!("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"),
            &hex!("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"),
        ),
        &hex!("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551"),
        1,
    )
}

fn secp256k1() -> Result<CurveParams> {
    prime_curve(
        CurveForm::ShortWeierstrass,
        &hex!("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"),
        &hex!("0000000000000000000000000000000000000000000000000000000000000000"),
        &hex!("0000000000000000000000000000000000000000000000000000000000000007"),
        (
            &hex!("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
            &hex!("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"),
        ),
        &hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"),
        1,
    )
}

fn secp384r1() -> Result<CurveParams> {
    prime_curve(
        CurveForm::ShortWeierstrass,
        &hex!(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe"
            "ffffffff0000000000000000ffffffff"
        ),
        &hex!(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe"
            "ffffffff0000000000000000fffffffc"
        ),
        &hex!(
            "b3312fa7e23ee7e4988e056be3f82d19181d9c6efe8141120314088f5013875a"
            "c656398d8a2ed19d2a85c8edd3ec2aef"
        ),
        (
            &hex!(
                "aa87ca22be8b05378eb1c71ef320ad746e1d3b628ba79b9859f741e082542a38"
                "5502f25dbf55296c3a545e3872760ab7"
            ),
            &hex!(
                "3617de4a96262c6f5d9e98bf9292dc29f8f41dbd289a147ce9da3113b5f0b8c0"
                "0a60b1ce1d7e819d7a431d7c90ea0e5f"
            ),
        ),
        &hex!(
            "ffffffffffffffffffffffffffffffffffffffffffffffffc7634d81f4372ddf"
            "581a0db248b0a77aecec196accc52973"
        ),
        1,
    )
}

fn secp521r1() -> Result<CurveParams> {
    prime_curve(
        CurveForm::ShortWeierstrass,
        &hex!(
            "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            "ffff"
        ),
        &hex!(
            "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            "fffc"
        ),
        &hex!(
            "0051953eb9618e1c9a1f929a21a0b68540eea2da725b99b315f3b8b489918ef1"
            "09e156193951ec7e937b1652c0bd3bb1bf073573df883d2c34f1ef451fd46b50"
            "3f00"
        ),
        (
            &hex!(
                "00c6858e06b70404e9cd9e3ecb662395b4429c648139053fb521f828af606b4d"
                "3dbaa14b5e77efe75928fe1dc127a2ffa8de3348b3c1856a429bf97e7e31c2e5"
                "bd66"
            ),
            &hex!(
                "011839296a789a3bc0045c8a5fb42c7d1bd998f54449579b446817afbd17273e"
                "662c97ee72995ef42640c550b9013fad0761353c7086a272c24088be94769fd1"
                "6650"
            ),
        ),
        &hex!(
            "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            "fffa51868783bf2f966b7fcc0148f709a5d03bb5c9b8899c47aebb6fb71e9138"
            "6409"
        ),
        1,
    )
}

fn sm2p256v1() -> Result<CurveParams> {
    prime_curve(
        CurveForm::ShortWeierstrass,
        &hex!("fffffffeffffffffffffffffffffffffffffffff00000000ffffffffffffffff"),
        &hex!("fffffffeffffffffffffffffffffffffffffffff00000000fffffffffffffffc"),
        &hex!("28e9fa9e9d9f5e344d5a9e4bcf6509a7f39789f515ab8f92ddbcbd414d940e93"),
        (
            &hex!("32c4ae2c1f1981195f9904466a39c9948fe30bbff2660be1715a4589334c74c7"),
            &hex!("bc3736a2f4f6779c59bdcee36b692153d0a9877cc62a474002df32e52139f0a0"),
        ),
        &hex!("fffffffeffffffffffffffffffffffff7203df6b21c6052b53bbf40939d54123"),
        1,
    )
}

fn curve25519() -> Result<CurveParams> {
    prime_curve(
        CurveForm::Montgomery,
        &hex!("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed"),
        &hex!("076d06"),
        &hex!("01"),
        (
            &hex!("0000000000000000000000000000000000000000000000000000000000000009"),
            &hex!("20ae19a1b8a086b4e01edd2c7748d14c923d4d7e6d7c61b229e9c5a27eced3d9"),
        ),
        &hex!("1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed"),
        8,
    )
}

fn curve448() -> Result<CurveParams> {
    prime_curve(
        CurveForm::Montgomery,
        &hex!(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffff"
            "ffffffffffffffffffffffffffffffffffffffffffffffff"
        ),
        &hex!("0262a6"),
        &hex!("01"),
        (
            &hex!(
                "0000000000000000000000000000000000000000000000000000000000000000"
                "000000000000000000000000000000000000000000000005"
            ),
            &hex!(
                "7d235d1295f5b1f66c98ab6e58326fcecbae5d34f55545d060f75dc28df3f6ed"
                "b8027e2346430d211312c4b150677af76fd7223d457b5b1a"
            ),
        ),
        &hex!(
            "3fffffffffffffffffffffffffffffffffffffffffffffffffffffff7cca23e9"
            "c44edb49aed63690216cc2728dc58f552378c292ab5844f3"
        ),
        4,
    )
}

fn sect163k1() -> Result<CurveParams> {
    binary_curve(
        CurveForm::BinaryKoblitz,
        &[163, 7, 6, 3, 0],
        &hex!("01"),
        &hex!("01"),
        (
            &hex!("02fe13c0537bbc11acaa07d793de4e6d5e5c94eee8"),
            &hex!("0289070fb05d38ff58321f2e800536d538ccdaa3d9"),
        ),
        &hex!("04000000000000000000020108a2e0cc0d99f8a5ef"),
        2,
    )
}

fn sect163r2() -> Result<CurveParams> {
    binary_curve(
        CurveForm::BinaryPseudoRandom,
        &[163, 7, 6, 3, 0],
        &hex!("01"),
        &hex!("020a601907b8c953ca1481eb10512f78744a3205fd"),
        (
            &hex!("03f0eba16286a2d57ea0991168d4994637e8343e36"),
            &hex!("00d51fbc6c71a0094fa2cdd545b11c5c0c797324f1"),
        ),
        &hex!("040000000000000000000292fe77e70c12a4234c33"),
        2,
    )
}

fn sect233k1() -> Result<CurveParams> {
    binary_curve(
        CurveForm::BinaryKoblitz,
        &[233, 74, 0],
        &hex!("00"),
        &hex!("01"),
        (
            &hex!("017232ba853a7e731af129f22ff4149563a419c26bf50a4c9d6eefad6126"),
            &hex!("01db537dece819b7f70f555a67c427a8cd9bf18aeb9b56e0c11056fae6a3"),
        ),
        &hex!("8000000000000000000000000000069d5bb915bcd46efb1ad5f173abdf"),
        4,
    )
}

fn sect233r1() -> Result<CurveParams> {
    binary_curve(
        CurveForm::BinaryPseudoRandom,
        &[233, 74, 0],
        &hex!("01"),
        &hex!("0066647ede6c332c7f8c0923bb58213b333b20e9ce4281fe115f7d8f90ad"),
        (
            &hex!("00fac9dfcbac8313bb2139f1bb755fef65bc391f8b36f8f8eb7371fd558b"),
            &hex!("01006a08a41903350678e58528bebf8a0beff867a7ca36716f7e01f81052"),
        ),
        &hex!("01000000000000000000000000000013e974e72f8a6922031d2603cfe0d7"),
        2,
    )
}

fn sect283k1() -> Result<CurveParams> {
    binary_curve(
        CurveForm::BinaryKoblitz,
        &[283, 12, 7, 5, 0],
        &hex!("00"),
        &hex!("01"),
        (
            &hex!(
                "0503213f78ca44883f1a3b8162f188e553cd265f23c1567a16876913b0c2ac24"
                "58492836"
            ),
            &hex!(
                "01ccda380f1c9e318d90f95d07e5426fe87e45c0e8184698e45962364e341161"
                "77dd2259"
            ),
        ),
        &hex!(
            "01ffffffffffffffffffffffffffffffffffe9ae2ed07577265dff7f94451e06"
            "1e163c61"
        ),
        4,
    )
}

fn sect283r1() -> Result<CurveParams> {
    binary_curve(
        CurveForm::BinaryPseudoRandom,
        &[283, 12, 7, 5, 0],
        &hex!("01"),
        &hex!(
            "027b680ac8b8596da5a4af8a19a0303fca97fd7645309fa2a581485af6263e31"
            "3b79a2f5"
        ),
        (
            &hex!(
                "05f939258db7dd90e1934f8c70b0dfec2eed25b8557eac9c80e2e198f8cdbecd"
                "86b12053"
            ),
            &hex!(
                "03676854fe24141cb98fe6d4b20d02b4516ff702350eddb0826779c813f0df45"
                "be8112f4"
            ),
        ),
        &hex!(
            "03ffffffffffffffffffffffffffffffffffef90399660fc938a90165b042a7c"
            "efadb307"
        ),
        2,
    )
}

fn sect409k1() -> Result<CurveParams> {
    binary_curve(
        CurveForm::BinaryKoblitz,
        &[409, 87, 0],
        &hex!("00"),
        &hex!("01"),
        (
            &hex!(
                "0060f05f658f49c1ad3ab1890f7184210efd0987e307c84c27accfb8f9f67cc2"
                "c460189eb5aaaa62ee222eb1b35540cfe9023746"
            ),
            &hex!(
                "01e369050b7c4e42acba1dacbf04299c3460782f918ea427e6325165e9ea10e3"
                "da5f6c42e9c55215aa9ca27a5863ec48d8e0286b"
            ),
        ),
        &hex!(
            "7ffffffffffffffffffffffffffffffffffffffffffffffffffe5f83b2d4ea20"
            "400ec4557d5ed3e3e7ca5b4b5c83b8e01e5fcf"
        ),
        4,
    )
}

fn sect409r1() -> Result<CurveParams> {
    binary_curve(
        CurveForm::BinaryPseudoRandom,
        &[409, 87, 0],
        &hex!("01"),
        &hex!(
            "0021a5c2c8ee9feb5c4b9a753b7b476b7fd6422ef1f3dd674761fa99d6ac27c8"
            "a9a197b272822f6cd57a55aa4f50ae317b13545f"
        ),
        (
            &hex!(
                "015d4860d088ddb3496b0c6064756260441cde4af1771d4db01ffe5b34e59703"
                "dc255a868a1180515603aeab60794e54bb7996a7"
            ),
            &hex!(
                "0061b1cfab6be5f32bbfa78324ed106a7636b9c5a7bd198d0158aa4f5488d08f"
                "38514f1fdf4b4f40d2181b3681c364ba0273c706"
            ),
        ),
        &hex!(
            "010000000000000000000000000000000000000000000000000001e2aad6a612"
            "f33307be5fa47c3c9e052f838164cd37d9a21173"
        ),
        2,
    )
}

fn sect571k1() -> Result<CurveParams> {
    binary_curve(
        CurveForm::BinaryKoblitz,
        &[571, 10, 5, 2, 0],
        &hex!("00"),
        &hex!("01"),
        (
            &hex!(
                "026eb7a859923fbc82189631f8103fe4ac9ca2970012d5d46024804801841ca4"
                "4370958493b205e647da304db4ceb08cbbd1ba39494776fb988b47174dca88c7"
                "e2945283a01c8972"
            ),
            &hex!(
                "0349dc807f4fbf374f4aeade3bca95314dd58cec9f307a54ffc61efc006d8a2c"
                "9d4979c0ac44aea74fbebbb9f772aedcb620b01a7ba7af1b320430c8591984f6"
                "01cd4c143ef1c7a3"
            ),
        ),
        &hex!(
            "0200000000000000000000000000000000000000000000000000000000000000"
            "00000000131850e1f19a63e4b391a8db917f4138b630d84be5d639381e91deb4"
            "5cfe778f637c1001"
        ),
        4,
    )
}

fn sect571r1() -> Result<CurveParams> {
    binary_curve(
        CurveForm::BinaryPseudoRandom,
        &[571, 10, 5, 2, 0],
        &hex!("01"),
        &hex!(
            "02f40e7e2221f295de297117b7f3d62f5c6a97ffcb8ceff1cd6ba8ce4a9a18ad"
            "84ffabbd8efa59332be7ad6756a66e294afd185a78ff12aa520e4de739baca0c"
            "7ffeff7f2955727a"
        ),
        (
            &hex!(
                "0303001d34b856296c16c0d40d3cd7750a93d1d2955fa80aa5f40fc8db7b2abd"
                "bde53950f4c0d293cdd711a35b67fb1499ae60038614f1394abfa3b4c850d927"
                "e1e7769c8eec2d19"
            ),
            &hex!(
                "037bf27342da639b6dccfffeb73d69d78c6c27a6009cbbca1980f8533921e8a6"
                "84423e43bab08a576291af8f461bb2a8b3531d2f0485c19b16e2f1516e23dd3c"
                "1a4827af1b8ac15b"
            ),
        ),
        &hex!(
            "03ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            "ffffffffe661ce18ff55987308059b186823851ec7dd9ca1161de93d5174d66e"
            "8382e9bb2fe84e47"
        ),
        2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_entry_builds() {
        assert_eq!(NamedCurve::ALL.len(), 20);
        for &name in NamedCurve::ALL {
            let curve = name.curve().unwrap();
            assert!(curve.is_on_curve(curve.generator()), "{name}");
        }
    }

    #[test]
    fn lookup_by_name() {
        for &name in NamedCurve::ALL {
            assert_eq!(name.name().parse::<NamedCurve>(), Ok(name));
            assert_eq!(name.to_string(), name.name());
        }
        assert_eq!("secp256r2".parse::<NamedCurve>(), Err(Error::UnknownCurve));
        assert_eq!("".parse::<NamedCurve>(), Err(Error::UnknownCurve));
    }

    #[test]
    fn curves_are_shared() {
        let first = NamedCurve::Secp256r1.curve().unwrap();
        let second = NamedCurve::Secp256r1.curve().unwrap();
        assert!(core::ptr::eq(first, second));
    }

    #[test]
    fn families() {
        let form = |name: NamedCurve| name.curve().unwrap().form();
        assert_eq!(form(NamedCurve::Secp256k1), CurveForm::ShortWeierstrass);
        assert_eq!(form(NamedCurve::Curve448), CurveForm::Montgomery);
        assert_eq!(form(NamedCurve::Sect163k1), CurveForm::BinaryKoblitz);
        assert_eq!(form(NamedCurve::Sect571r1), CurveForm::BinaryPseudoRandom);
    }
}
