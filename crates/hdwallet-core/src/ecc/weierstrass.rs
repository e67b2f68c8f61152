//! Short-Weierstrass curves: secp256k1 (`k256`) and NIST P-256 (`p256`).
//!
//! Both crates share the RustCrypto `elliptic-curve` API, so one macro
//! generates the point, key and BIP32 arithmetic for each.

use num_bigint::BigUint;

use super::{Bip32Curve, ChainCode, Ecc, EccKind, EccPoint, EccPrivateKey, EccPublicKey};
use crate::crypto::hmac_sha512;
use crate::derivation::is_hardened;
use crate::error::{ErrorDetail, WalletError};

macro_rules! weierstrass_curve {
    (
        $module:ident,
        $backend:ident,
        $marker:ident,
        $name:literal,
        $seed_key:literal,
        $order_hex:literal
    ) => {
        #[doc = concat!("Point and key types for ", $name, ".")]
        pub mod $module {
            use std::fmt;

            use num_bigint::BigUint;
            use zeroize::Zeroizing;

            use $backend::elliptic_curve::ff::{Field as _, PrimeField};
            use $backend::elliptic_curve::group::Group as _;
            use $backend::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
            use $backend::{AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar};

            use crate::ecc::{biguint_to_be, EccPoint, EccPrivateKey, EccPublicKey};
            use crate::error::{ErrorDetail, WalletError};

            /// Curve order as big-endian hex.
            pub const ORDER_HEX: &str = $order_hex;

            pub(crate) fn order() -> BigUint {
                BigUint::parse_bytes(ORDER_HEX.as_bytes(), 16).unwrap_or_default()
            }

            /// Reduce a big integer into a curve scalar.
            pub(crate) fn scalar_from_biguint(value: &BigUint) -> Scalar {
                let reduced = value % order();
                let bytes: [u8; 32] = biguint_to_be(&reduced);
                Option::from(Scalar::from_repr(FieldBytes::from(bytes))).unwrap_or(Scalar::ZERO)
            }

            /// Parse 32 big-endian bytes as a scalar strictly below the order.
            pub(crate) fn scalar_from_bytes(bytes: &[u8]) -> Option<Scalar> {
                let bytes: [u8; 32] = bytes.try_into().ok()?;
                Option::from(Scalar::from_repr(FieldBytes::from(bytes)))
            }

            /// A point in projective form.
            #[derive(Clone, Copy, Debug, PartialEq, Eq)]
            pub struct Point(pub(crate) ProjectivePoint);

            impl Point {
                pub(crate) fn mul_scalar(&self, scalar: &Scalar) -> Self {
                    Self(self.0 * scalar)
                }

                fn encoded(&self, compress: bool) -> Vec<u8> {
                    self.0.to_affine().to_encoded_point(compress).as_bytes().to_vec()
                }
            }

            impl EccPoint for Point {
                fn from_bytes(bytes: &[u8]) -> Result<Self, WalletError> {
                    let encoded = match bytes.len() {
                        64 => EncodedPoint::from_bytes([&[0x04], bytes].concat()),
                        _ => EncodedPoint::from_bytes(bytes),
                    }
                    .map_err(|e| {
                        WalletError::Ecc(ErrorDetail::msg(format!("invalid point encoding: {e}")))
                    })?;
                    Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
                        .map(|p| Self(p.into()))
                        .ok_or_else(|| WalletError::Ecc("point is not on the curve".into()))
                }

                fn from_coordinates(x: &[u8], y: &[u8]) -> Result<Self, WalletError> {
                    if x.len() != 32 || y.len() != 32 {
                        return Err(WalletError::Ecc(ErrorDetail::mismatch(
                            "invalid coordinate length",
                            "32 and 32",
                            format!("{} and {}", x.len(), y.len()),
                        )));
                    }
                    let encoded = EncodedPoint::from_affine_coordinates(
                        FieldBytes::from_slice(x),
                        FieldBytes::from_slice(y),
                        false,
                    );
                    Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
                        .map(|p| Self(p.into()))
                        .ok_or_else(|| WalletError::Ecc("point is not on the curve".into()))
                }

                fn generator() -> Self {
                    Self(ProjectivePoint::GENERATOR)
                }

                fn identity() -> Self {
                    Self(ProjectivePoint::IDENTITY)
                }

                fn is_identity(&self) -> bool {
                    self.0.is_identity().into()
                }

                fn add_point(&self, other: &Self) -> Self {
                    Self(self.0 + other.0)
                }

                fn scalar_mul(&self, scalar: &BigUint) -> Self {
                    self.mul_scalar(&scalar_from_biguint(scalar))
                }

                fn raw_encoded(&self) -> Vec<u8> {
                    self.encoded(true)
                }

                fn raw_decoded(&self) -> Vec<u8> {
                    let uncompressed = self.encoded(false);
                    uncompressed.get(1..).map(<[u8]>::to_vec).unwrap_or_default()
                }
            }

            /// A public key.
            #[derive(Clone, Copy, PartialEq, Eq)]
            pub struct PublicKey(pub(crate) $backend::PublicKey);

            impl fmt::Debug for PublicKey {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(
                        f,
                        "PublicKey({})",
                        crate::encoding::hex::encode(&self.raw_compressed())
                    )
                }
            }

            impl EccPublicKey for PublicKey {
                type Point = Point;
                const COMPRESSED_LENGTH: usize = 33;
                const UNCOMPRESSED_LENGTH: usize = 65;

                fn from_bytes(bytes: &[u8]) -> Result<Self, WalletError> {
                    let parsed = match (bytes.len(), bytes.first()) {
                        (33, Some(0x02 | 0x03)) | (65, Some(0x04)) => {
                            $backend::PublicKey::from_sec1_bytes(bytes)
                        }
                        (33 | 65, Some(&tag)) => {
                            return Err(WalletError::PublicKey(ErrorDetail::mismatch(
                                "invalid public key prefix",
                                "0x02 or 0x03 (33 bytes), 0x04 (65 bytes)",
                                format!("{tag:#04x}"),
                            )))
                        }
                        (64, _) => $backend::PublicKey::from_sec1_bytes(&[&[0x04], bytes].concat()),
                        (other, _) => {
                            return Err(WalletError::PublicKey(ErrorDetail::mismatch(
                                "invalid public key length",
                                "33, 64 or 65",
                                other,
                            )))
                        }
                    };
                    parsed.map(Self).map_err(|_| {
                        WalletError::PublicKey(ErrorDetail::msg(concat!(
                            "invalid ",
                            $name,
                            " public key"
                        )))
                    })
                }

                fn from_point(point: &Point) -> Result<Self, WalletError> {
                    $backend::PublicKey::from_affine(point.0.to_affine())
                        .map(Self)
                        .map_err(|_| WalletError::PublicKey("public key is the identity".into()))
                }

                fn raw_compressed(&self) -> Vec<u8> {
                    self.0.to_encoded_point(true).as_bytes().to_vec()
                }

                fn raw_uncompressed(&self) -> Vec<u8> {
                    self.0.to_encoded_point(false).as_bytes().to_vec()
                }

                fn point(&self) -> Point {
                    Point(self.0.to_projective())
                }
            }

            /// A private key; zeroized on drop by the backend.
            #[derive(Clone)]
            pub struct PrivateKey(pub(crate) $backend::SecretKey);

            impl PrivateKey {
                pub(crate) fn scalar(&self) -> Scalar {
                    *self.0.to_nonzero_scalar()
                }

                pub(crate) fn from_scalar(scalar: &Scalar) -> Result<Self, WalletError> {
                    if bool::from(scalar.is_zero()) {
                        return Err(WalletError::PrivateKey("private key is zero".into()));
                    }
                    $backend::SecretKey::from_bytes(&scalar.to_repr())
                        .map(Self)
                        .map_err(|_| WalletError::PrivateKey("private key out of range".into()))
                }
            }

            impl fmt::Debug for PrivateKey {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str("PrivateKey(***)")
                }
            }

            impl EccPrivateKey for PrivateKey {
                type PublicKey = PublicKey;
                const LENGTH: usize = 32;

                fn from_bytes(bytes: &[u8]) -> Result<Self, WalletError> {
                    if bytes.len() != Self::LENGTH {
                        return Err(WalletError::PrivateKey(ErrorDetail::mismatch(
                            "invalid private key length",
                            Self::LENGTH,
                            bytes.len(),
                        )));
                    }
                    $backend::SecretKey::from_slice(bytes)
                        .map(Self)
                        .map_err(|_| {
                            WalletError::PrivateKey(ErrorDetail::msg(
                                "private key must be in [1, order - 1]",
                            ))
                        })
                }

                fn raw(&self) -> Zeroizing<Vec<u8>> {
                    Zeroizing::new(self.0.to_bytes().to_vec())
                }

                fn public_key(&self) -> PublicKey {
                    PublicKey(self.0.public_key())
                }
            }
        }

        #[doc = concat!("Marker type for ", $name, ".")]
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $marker;

        impl Ecc for $marker {
            const NAME: &'static str = $name;
            const KIND: EccKind = EccKind::$marker;
            type Point = $module::Point;
            type PublicKey = $module::PublicKey;
            type PrivateKey = $module::PrivateKey;

            fn order() -> BigUint {
                $module::order()
            }
        }

        impl Bip32Curve for $marker {
            const SEED_KEY: &'static [u8] = $seed_key;
            const SUPPORTS_PUBLIC_DERIVATION: bool = true;

            fn master_key(seed: &[u8]) -> Result<($module::PrivateKey, ChainCode), WalletError> {
                check_seed_length(seed)?;
                let mut data = seed.to_vec();
                let mut attempts = 0u32;
                loop {
                    let mac = hmac_sha512(Self::SEED_KEY, &data);
                    let (il, ir) = mac.split_at(32);
                    if let Some(scalar) = $module::scalar_from_bytes(il) {
                        if let Ok(key) = $module::PrivateKey::from_scalar(&scalar) {
                            tracing::trace!(curve = $name, attempts, "master key accepted");
                            return Ok((key, chain_code(ir)));
                        }
                    }
                    attempts += 1;
                    tracing::debug!(curve = $name, attempts, "master IL out of range, resampling");
                    data = mac.to_vec();
                }
            }

            fn derive_private(
                private_key: &$module::PrivateKey,
                chain_code_in: &ChainCode,
                index: u32,
            ) -> Result<($module::PrivateKey, ChainCode), WalletError> {
                let mut data = zeroize::Zeroizing::new(Vec::with_capacity(37));
                if is_hardened(index) {
                    data.push(0x00);
                    data.extend_from_slice(&private_key.raw());
                } else {
                    data.extend_from_slice(&private_key.public_key().raw_compressed());
                }
                data.extend_from_slice(&index.to_be_bytes());
                let mac = hmac_sha512(chain_code_in, &data);
                let (il, ir) = mac.split_at(32);
                let tweak = $module::scalar_from_bytes(il).ok_or_else(|| invalid_child(index))?;
                let child = $module::PrivateKey::from_scalar(&(tweak + private_key.scalar()))
                    .map_err(|_| invalid_child(index))?;
                Ok((child, chain_code(ir)))
            }

            fn derive_public(
                public_key: &$module::PublicKey,
                chain_code_in: &ChainCode,
                index: u32,
            ) -> Result<($module::PublicKey, ChainCode), WalletError> {
                if is_hardened(index) {
                    return Err(hardened_from_public(index));
                }
                let mut data = public_key.raw_compressed();
                data.extend_from_slice(&index.to_be_bytes());
                let mac = hmac_sha512(chain_code_in, &data);
                let (il, ir) = mac.split_at(32);
                let tweak = $module::scalar_from_bytes(il).ok_or_else(|| invalid_child(index))?;
                let point = <$module::Point as EccPoint>::generator()
                    .mul_scalar(&tweak)
                    .add_point(&public_key.point());
                let child = $module::PublicKey::from_point(&point).map_err(|_| invalid_child(index))?;
                Ok((child, chain_code(ir)))
            }
        }
    };
}

pub(crate) fn chain_code(bytes: &[u8]) -> ChainCode {
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes[..32]);
    out
}

pub(crate) fn check_seed_length(seed: &[u8]) -> Result<(), WalletError> {
    if (16..=64).contains(&seed.len()) {
        Ok(())
    } else {
        Err(WalletError::Seed(ErrorDetail::mismatch(
            "invalid seed length",
            "16..=64 bytes",
            seed.len(),
        )))
    }
}

pub(crate) fn invalid_child(index: u32) -> WalletError {
    WalletError::Derivation(ErrorDetail::msg(format!(
        "index {index} yields an invalid child key, use the next index"
    )))
}

pub(crate) fn hardened_from_public(index: u32) -> WalletError {
    WalletError::Derivation(ErrorDetail::msg(format!(
        "cannot derive hardened index {index} from a public key"
    )))
}

weierstrass_curve!(
    secp256k1,
    k256,
    Secp256k1,
    "SLIP10-Secp256k1",
    b"Bitcoin seed",
    "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141"
);

weierstrass_curve!(
    nist256p1,
    p256,
    Nist256p1,
    "SLIP10-Nist256p1",
    b"Nist256p1 seed",
    "FFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632551"
);
