//! Edwards25519 points and the SLIP-10 ed25519 key variants.
//!
//! Public keys are exposed as `0x00 ‖ point` (33 bytes) in both the
//! "compressed" and "uncompressed" views; the prefix keeps them apart from
//! SEC1 encodings in extended keys. The three variants differ only in how a
//! 32-byte private key maps to its scalar:
//!
//! - [`Slip10Ed25519`]: `clamp(SHA-512(seed)[..32])` (RFC 8032)
//! - [`Slip10Ed25519Blake2b`]: `clamp(Blake2b-512(seed)[..32])`
//! - [`Slip10Ed25519Monero`]: the key is the reduced scalar itself

use std::fmt;
use std::marker::PhantomData;

use curve25519_dalek::constants::ED25519_BASEPOINT_POINT;
use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::traits::{Identity, IsIdentity};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use zeroize::Zeroizing;

use super::weierstrass::{chain_code, check_seed_length, hardened_from_public};
use super::{
    biguint_to_le, Bip32Curve, ChainCode, Ecc, EccKind, EccPoint, EccPrivateKey, EccPublicKey,
};
use crate::crypto::{blake2b_512, hmac_sha512, keccak256, sha512};
use crate::derivation::is_hardened;
use crate::error::{ErrorDetail, WalletError};
use crate::memory::SecretBytes;

/// Group order ℓ as big-endian hex.
pub const ORDER_HEX: &str = "1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed";

pub(crate) fn order() -> BigUint {
    BigUint::parse_bytes(ORDER_HEX.as_bytes(), 16).unwrap_or_default()
}

/// Reduce 32 little-endian bytes modulo ℓ (Monero `sc_reduce32`).
#[must_use]
pub fn scalar_reduce(bytes: &[u8; 32]) -> [u8; 32] {
    Scalar::from_bytes_mod_order(*bytes).to_bytes()
}

/// `reduce(Keccak-256(data))`, Monero's `Hs`.
#[must_use]
pub fn hash_to_scalar(data: &[u8]) -> [u8; 32] {
    scalar_reduce(&keccak256(data))
}

/// Returns `true` if `bytes` is a canonical (fully reduced) scalar.
#[must_use]
pub fn is_canonical_scalar(bytes: &[u8; 32]) -> bool {
    Option::<Scalar>::from(Scalar::from_canonical_bytes(*bytes)).is_some()
}

pub(crate) fn scalar_from_biguint(value: &BigUint) -> Scalar {
    let reduced = value % order();
    Scalar::from_bytes_mod_order(biguint_to_le(&reduced))
}

// ---------------------------------------------------------------------------
// Field arithmetic for affine coordinates
// ---------------------------------------------------------------------------

mod field {
    use num_bigint::BigUint;
    use num_traits::{One, Zero};

    pub(super) fn p() -> BigUint {
        (BigUint::one() << 255u32) - 19u32
    }

    fn inv(value: &BigUint, p: &BigUint) -> BigUint {
        value.modpow(&(p - 2u32), p)
    }

    fn d(p: &BigUint) -> BigUint {
        let neg = p - BigUint::from(121_665u32);
        neg * inv(&BigUint::from(121_666u32), p) % p
    }

    /// Solve `-x² + y² = 1 + d·x²·y²` for `x` with the given parity.
    pub(super) fn recover_x(y: &BigUint, odd: bool) -> Option<BigUint> {
        let p = p();
        if y >= &p {
            return None;
        }
        let y2 = y * y % &p;
        let u = (&y2 + &p - 1u32) % &p;
        let v = (d(&p) * &y2 + 1u32) % &p;
        let x2 = u * inv(&v, &p) % &p;
        if x2.is_zero() {
            return (!odd).then(BigUint::zero);
        }
        let mut x = x2.modpow(&((&p + 3u32) >> 3u32), &p);
        if &x * &x % &p != x2 {
            let sqrt_m1 = BigUint::from(2u32).modpow(&((&p - 1u32) >> 2u32), &p);
            x = x * sqrt_m1 % &p;
        }
        if &x * &x % &p != x2 {
            return None;
        }
        if x.bit(0) != odd {
            x = &p - x;
        }
        Some(x)
    }

    pub(super) fn on_curve(x: &BigUint, y: &BigUint) -> bool {
        let p = p();
        if x >= &p || y >= &p {
            return false;
        }
        let x2 = x * x % &p;
        let y2 = y * y % &p;
        let lhs = (&y2 + &p - &x2) % &p;
        let rhs = (BigUint::one() + d(&p) * x2 % &p * y2) % &p;
        lhs == rhs
    }
}

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// An Edwards25519 point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ed25519Point(pub(crate) EdwardsPoint);

impl Ed25519Point {
    /// `scalar · G` for a little-endian scalar (reduced modulo ℓ).
    #[must_use]
    pub fn mul_base(scalar: &[u8; 32]) -> Self {
        Self(EdwardsPoint::mul_base(&Scalar::from_bytes_mod_order(*scalar)))
    }

    /// `scalar · self` for a little-endian scalar (reduced modulo ℓ).
    #[must_use]
    pub fn mul_bytes(&self, scalar: &[u8; 32]) -> Self {
        Self(self.0 * Scalar::from_bytes_mod_order(*scalar))
    }

    /// 32-byte RFC 8032 encoding.
    #[must_use]
    pub fn compress(&self) -> [u8; 32] {
        self.0.compress().to_bytes()
    }
}

impl EccPoint for Ed25519Point {
    fn from_bytes(bytes: &[u8]) -> Result<Self, WalletError> {
        let body = match bytes.len() {
            32 => bytes,
            33 if bytes[0] == 0x00 => &bytes[1..],
            other => {
                return Err(WalletError::Ecc(ErrorDetail::mismatch(
                    "invalid ed25519 point length",
                    "32 or 33",
                    other,
                )))
            }
        };
        let compressed = CompressedEdwardsY::from_slice(body)
            .map_err(|_| WalletError::Ecc("invalid ed25519 point length".into()))?;
        compressed
            .decompress()
            .map(Self)
            .ok_or_else(|| WalletError::Ecc("point is not on ed25519".into()))
    }

    fn from_coordinates(x: &[u8], y: &[u8]) -> Result<Self, WalletError> {
        let (x, y) = (BigUint::from_bytes_le(x), BigUint::from_bytes_le(y));
        if !field::on_curve(&x, &y) {
            return Err(WalletError::Ecc("point is not on ed25519".into()));
        }
        let mut encoded: [u8; 32] = biguint_to_le(&y);
        if x.bit(0) {
            encoded[31] |= 0x80;
        }
        Self::from_bytes(&encoded)
    }

    fn generator() -> Self {
        Self(ED25519_BASEPOINT_POINT)
    }

    fn identity() -> Self {
        Self(EdwardsPoint::identity())
    }

    fn is_identity(&self) -> bool {
        self.0.is_identity()
    }

    fn add_point(&self, other: &Self) -> Self {
        Self(self.0 + other.0)
    }

    fn scalar_mul(&self, scalar: &BigUint) -> Self {
        Self(self.0 * scalar_from_biguint(scalar))
    }

    fn raw_encoded(&self) -> Vec<u8> {
        self.compress().to_vec()
    }

    fn raw_decoded(&self) -> Vec<u8> {
        let mut encoded = self.compress();
        let odd = encoded[31] & 0x80 != 0;
        encoded[31] &= 0x7f;
        let y = BigUint::from_bytes_le(&encoded);
        let x = field::recover_x(&y, odd).unwrap_or_default();
        let mut out = biguint_to_le::<32>(&x).to_vec();
        out.extend_from_slice(&biguint_to_le::<32>(&y));
        out
    }
}

// ---------------------------------------------------------------------------
// Public key
// ---------------------------------------------------------------------------

/// An ed25519 public key, shared by every ed25519 variant and Kholaw.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519PublicKey(pub(crate) Ed25519Point);

impl Ed25519PublicKey {
    /// The bare 32-byte point encoding, without the `0x00` prefix.
    #[must_use]
    pub fn raw(&self) -> [u8; 32] {
        self.0.compress()
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ed25519PublicKey({})",
            crate::encoding::hex::encode(&self.raw())
        )
    }
}

impl EccPublicKey for Ed25519PublicKey {
    type Point = Ed25519Point;
    const COMPRESSED_LENGTH: usize = 33;
    const UNCOMPRESSED_LENGTH: usize = 33;

    fn from_bytes(bytes: &[u8]) -> Result<Self, WalletError> {
        if !matches!(bytes.len(), 32 | 33) {
            return Err(WalletError::PublicKey(ErrorDetail::mismatch(
                "invalid ed25519 public key length",
                "32 or 33",
                bytes.len(),
            )));
        }
        Ed25519Point::from_bytes(bytes)
            .map(Self)
            .map_err(|e| WalletError::PublicKey(e.detail().clone()))
    }

    fn from_point(point: &Ed25519Point) -> Result<Self, WalletError> {
        if point.is_identity() {
            return Err(WalletError::PublicKey("public key is the identity".into()));
        }
        Ok(Self(*point))
    }

    fn raw_compressed(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(33);
        out.push(0x00);
        out.extend_from_slice(&self.raw());
        out
    }

    fn raw_uncompressed(&self) -> Vec<u8> {
        self.raw_compressed()
    }

    fn point(&self) -> Ed25519Point {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Private keys
// ---------------------------------------------------------------------------

/// How a 32-byte ed25519 private key becomes a scalar.
pub trait Ed25519Variant: Ecc {
    /// Reject private keys the variant cannot use.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::PrivateKey` on an unusable key.
    fn validate(_secret: &[u8; 32]) -> Result<(), WalletError> {
        Ok(())
    }

    /// Public point for a private key.
    fn public_point(secret: &[u8; 32]) -> EdwardsPoint;

    /// Turn the left half of a SLIP-10 HMAC into a private key.
    fn key_from_il(il: &[u8; 32]) -> [u8; 32] {
        *il
    }
}

/// A 32-byte ed25519 private key for variant `V`.
pub struct Ed25519PrivateKey<V> {
    secret: SecretBytes<32>,
    _variant: PhantomData<V>,
}

impl<V> Clone for Ed25519PrivateKey<V> {
    fn clone(&self) -> Self {
        Self {
            secret: self.secret.clone(),
            _variant: PhantomData,
        }
    }
}

impl<V> fmt::Debug for Ed25519PrivateKey<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Ed25519PrivateKey(***)")
    }
}

impl<V> Ed25519PrivateKey<V> {
    /// Borrow the raw key.
    #[must_use]
    pub const fn expose(&self) -> &[u8; 32] {
        self.secret.expose()
    }
}

impl<V: Ed25519Variant> EccPrivateKey for Ed25519PrivateKey<V> {
    type PublicKey = Ed25519PublicKey;
    const LENGTH: usize = 32;

    fn from_bytes(bytes: &[u8]) -> Result<Self, WalletError> {
        let secret = SecretBytes::<32>::from_slice(bytes)?;
        V::validate(secret.expose())?;
        Ok(Self {
            secret,
            _variant: PhantomData,
        })
    }

    fn raw(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.secret.expose().to_vec())
    }

    fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(Ed25519Point(V::public_point(self.secret.expose())))
    }
}

fn clamped_prefix(hash: &[u8; 64]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&hash[..32]);
    out
}

macro_rules! ed25519_curve {
    ($marker:ident, $name:literal, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $marker;

        impl Ecc for $marker {
            const NAME: &'static str = $name;
            const KIND: EccKind = EccKind::$marker;
            type Point = Ed25519Point;
            type PublicKey = Ed25519PublicKey;
            type PrivateKey = Ed25519PrivateKey<Self>;

            fn order() -> BigUint {
                order()
            }
        }

        impl Bip32Curve for $marker {
            const SEED_KEY: &'static [u8] = b"ed25519 seed";
            const SUPPORTS_PUBLIC_DERIVATION: bool = false;

            fn master_key(seed: &[u8]) -> Result<(Ed25519PrivateKey<Self>, ChainCode), WalletError> {
                check_seed_length(seed)?;
                let mac = hmac_sha512(Self::SEED_KEY, seed);
                slip10_split::<Self>(&mac[..])
            }

            fn derive_private(
                private_key: &Ed25519PrivateKey<Self>,
                chain_code_in: &ChainCode,
                index: u32,
            ) -> Result<(Ed25519PrivateKey<Self>, ChainCode), WalletError> {
                if !is_hardened(index) {
                    return Err(WalletError::Derivation(ErrorDetail::msg(format!(
                        "{} supports hardened derivation only, got index {index}",
                        $name
                    ))));
                }
                let mut data = Zeroizing::new(Vec::with_capacity(37));
                data.push(0x00);
                data.extend_from_slice(private_key.expose());
                data.extend_from_slice(&index.to_be_bytes());
                let mac = hmac_sha512(chain_code_in, &data);
                slip10_split::<Self>(&mac[..])
            }

            fn derive_public(
                _public_key: &Ed25519PublicKey,
                _chain_code: &ChainCode,
                index: u32,
            ) -> Result<(Ed25519PublicKey, ChainCode), WalletError> {
                Err(hardened_from_public(index))
            }
        }
    };
}

fn slip10_split<V: Ed25519Variant>(
    mac: &[u8],
) -> Result<(Ed25519PrivateKey<V>, ChainCode), WalletError> {
    let mut il = [0u8; 32];
    il.copy_from_slice(&mac[..32]);
    let key = Ed25519PrivateKey::<V>::from_bytes(&V::key_from_il(&il))?;
    Ok((key, chain_code(&mac[32..])))
}

ed25519_curve!(
    Slip10Ed25519,
    "SLIP10-Ed25519",
    "SLIP-10 ed25519 with RFC 8032 SHA-512 key expansion."
);
ed25519_curve!(
    Slip10Ed25519Blake2b,
    "SLIP10-Ed25519-Blake2b",
    "SLIP-10 ed25519 with Blake2b-512 key expansion (Nano)."
);
ed25519_curve!(
    Slip10Ed25519Monero,
    "SLIP10-Ed25519-Monero",
    "ed25519 with Monero scalars: the private key is the scalar."
);

impl Ed25519Variant for Slip10Ed25519 {
    fn public_point(secret: &[u8; 32]) -> EdwardsPoint {
        EdwardsPoint::mul_base_clamped(clamped_prefix(&sha512(secret)))
    }
}

impl Ed25519Variant for Slip10Ed25519Blake2b {
    fn public_point(secret: &[u8; 32]) -> EdwardsPoint {
        EdwardsPoint::mul_base_clamped(clamped_prefix(&blake2b_512(secret)))
    }
}

impl Ed25519Variant for Slip10Ed25519Monero {
    fn validate(secret: &[u8; 32]) -> Result<(), WalletError> {
        if is_canonical_scalar(secret) {
            Ok(())
        } else {
            Err(WalletError::PrivateKey(
                "Monero private key is not a reduced scalar".into(),
            ))
        }
    }

    fn public_point(secret: &[u8; 32]) -> EdwardsPoint {
        EdwardsPoint::mul_base(&Scalar::from_bytes_mod_order(*secret))
    }

    fn key_from_il(il: &[u8; 32]) -> [u8; 32] {
        scalar_reduce(il)
    }
}

/// `true` if the scalar is zero modulo ℓ.
#[must_use]
pub fn is_zero_scalar(bytes: &[u8; 32]) -> bool {
    BigUint::from_bytes_le(bytes) % order() == BigUint::zero()
}

/// `1` as a little-endian scalar.
#[must_use]
pub fn scalar_one() -> [u8; 32] {
    biguint_to_le(&BigUint::one())
}
