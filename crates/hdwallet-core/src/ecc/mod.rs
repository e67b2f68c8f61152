//! Elliptic curves behind one capability set.
//!
//! Every curve exposes a [`EccPoint`], [`EccPublicKey`] and
//! [`EccPrivateKey`] with the same operations, bundled by an [`Ecc`] marker
//! type. [`Bip32Curve`] adds the curve-specific master-key and child-key
//! arithmetic the generic BIP32 engine is written against.
//!
//! | Marker | Private key | Public encodings |
//! |--------|-------------|------------------|
//! | [`Secp256k1`] | 32-byte scalar in `[1, n-1]` | `02/03 ‖ x`, `04 ‖ x ‖ y` |
//! | [`Nist256p1`] | 32-byte scalar in `[1, n-1]` | `02/03 ‖ x`, `04 ‖ x ‖ y` |
//! | [`Slip10Ed25519`] (+ Blake2b, Monero) | 32-byte seed or scalar | `00 ‖ point` |
//! | [`KholawEd25519`] | 64-byte `kL ‖ kR` | `00 ‖ point` |

pub mod ed25519;
pub mod kholaw;
pub mod weierstrass;

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::{ErrorDetail, WalletError};

pub use ed25519::{
    Ed25519Point, Ed25519PrivateKey, Ed25519PublicKey, Slip10Ed25519, Slip10Ed25519Blake2b,
    Slip10Ed25519Monero,
};
pub use kholaw::{KholawEd25519, KholawPrivateKey};
pub use weierstrass::{Nist256p1, Secp256k1};

/// A chain code: the right half of an HMAC-SHA-512 output.
pub type ChainCode = [u8; 32];

/// A curve point.
pub trait EccPoint: Clone + fmt::Debug + PartialEq + Sized + Send + Sync {
    /// Parse the curve's canonical point encoding.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Ecc` if the bytes are not a point on the curve.
    fn from_bytes(bytes: &[u8]) -> Result<Self, WalletError>;

    /// Build a point from affine coordinates in the layout of
    /// [`raw_decoded`](Self::raw_decoded).
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Ecc` if `(x, y)` is not on the curve.
    fn from_coordinates(x: &[u8], y: &[u8]) -> Result<Self, WalletError>;

    /// The group generator.
    fn generator() -> Self;

    /// The neutral element.
    fn identity() -> Self;

    /// Returns `true` for the neutral element.
    fn is_identity(&self) -> bool;

    /// Group addition.
    #[must_use]
    fn add_point(&self, other: &Self) -> Self;

    /// Scalar multiplication; the scalar is reduced modulo the group order.
    #[must_use]
    fn scalar_mul(&self, scalar: &BigUint) -> Self;

    /// Compressed-style encoding (33 bytes for Weierstrass, 32 for Edwards).
    fn raw_encoded(&self) -> Vec<u8>;

    /// Coordinate form `x ‖ y` (big-endian for Weierstrass, little-endian
    /// for Edwards).
    fn raw_decoded(&self) -> Vec<u8>;
}

/// A public key.
pub trait EccPublicKey: Clone + fmt::Debug + PartialEq + Sized + Send + Sync {
    /// Point type behind the key.
    type Point: EccPoint;

    /// Length of [`raw_compressed`](Self::raw_compressed).
    const COMPRESSED_LENGTH: usize;

    /// Length of [`raw_uncompressed`](Self::raw_uncompressed).
    const UNCOMPRESSED_LENGTH: usize;

    /// Parse a compressed or uncompressed encoding.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::PublicKey` on a bad length or off-curve point.
    fn from_bytes(bytes: &[u8]) -> Result<Self, WalletError>;

    /// Wrap a point.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::PublicKey` for the identity.
    fn from_point(point: &Self::Point) -> Result<Self, WalletError>;

    /// Compressed encoding.
    fn raw_compressed(&self) -> Vec<u8>;

    /// Uncompressed encoding.
    fn raw_uncompressed(&self) -> Vec<u8>;

    /// The underlying point.
    fn point(&self) -> Self::Point;
}

/// A private key. `raw` hands out a zeroizing copy.
pub trait EccPrivateKey: Clone + fmt::Debug + Sized + Send + Sync {
    /// Matching public key type.
    type PublicKey: EccPublicKey;

    /// Length of [`raw`](Self::raw).
    const LENGTH: usize;

    /// Parse raw private key bytes.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::PrivateKey` on a bad length or out-of-range
    /// scalar.
    fn from_bytes(bytes: &[u8]) -> Result<Self, WalletError>;

    /// Raw private key bytes.
    fn raw(&self) -> Zeroizing<Vec<u8>>;

    /// The matching public key.
    fn public_key(&self) -> Self::PublicKey;
}

/// A curve: ties point, public and private key types together.
pub trait Ecc: Clone + Copy + fmt::Debug + Default + Send + Sync + 'static {
    /// Display name.
    const NAME: &'static str;
    /// Dynamic tag for this curve.
    const KIND: EccKind;

    /// Point type.
    type Point: EccPoint;
    /// Public key type.
    type PublicKey: EccPublicKey<Point = Self::Point>;
    /// Private key type.
    type PrivateKey: EccPrivateKey<PublicKey = Self::PublicKey>;

    /// Order of the generator.
    fn order() -> BigUint;
}

/// Curve-specific key arithmetic for the BIP32 engine.
pub trait Bip32Curve: Ecc {
    /// HMAC key for master-key generation.
    const SEED_KEY: &'static [u8];

    /// Whether non-hardened derivation is defined for this curve.
    const SUPPORTS_PUBLIC_DERIVATION: bool;

    /// Master private key and chain code from a seed.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Seed` on an unusable seed length.
    fn master_key(seed: &[u8]) -> Result<(Self::PrivateKey, ChainCode), WalletError>;

    /// `CKDpriv`.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Derivation` when the index yields an invalid
    /// key (the caller moves to the next index) or is not permitted.
    fn derive_private(
        private_key: &Self::PrivateKey,
        chain_code: &ChainCode,
        index: u32,
    ) -> Result<(Self::PrivateKey, ChainCode), WalletError>;

    /// `CKDpub`.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Derivation` for hardened indexes, curves
    /// without public derivation and invalid children.
    fn derive_public(
        public_key: &Self::PublicKey,
        chain_code: &ChainCode,
        index: u32,
    ) -> Result<(Self::PublicKey, ChainCode), WalletError>;
}

/// Runtime tag naming one of the supported curves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EccKind {
    /// secp256k1.
    #[default]
    #[serde(rename = "SLIP10-Secp256k1")]
    Secp256k1,
    /// NIST P-256.
    #[serde(rename = "SLIP10-Nist256p1")]
    Nist256p1,
    /// SLIP-10 ed25519.
    #[serde(rename = "SLIP10-Ed25519")]
    Slip10Ed25519,
    /// SLIP-10 ed25519 with Blake2b key expansion.
    #[serde(rename = "SLIP10-Ed25519-Blake2b")]
    Slip10Ed25519Blake2b,
    /// SLIP-10 ed25519 with Monero scalars.
    #[serde(rename = "SLIP10-Ed25519-Monero")]
    Slip10Ed25519Monero,
    /// Kholaw (BIP32-Ed25519) extended keys.
    #[serde(rename = "Kholaw-Ed25519")]
    KholawEd25519,
}

impl EccKind {
    /// All curves.
    pub const ALL: [Self; 6] = [
        Self::Secp256k1,
        Self::Nist256p1,
        Self::Slip10Ed25519,
        Self::Slip10Ed25519Blake2b,
        Self::Slip10Ed25519Monero,
        Self::KholawEd25519,
    ];

    /// Display name, as used in configuration files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Secp256k1 => Secp256k1::NAME,
            Self::Nist256p1 => Nist256p1::NAME,
            Self::Slip10Ed25519 => Slip10Ed25519::NAME,
            Self::Slip10Ed25519Blake2b => Slip10Ed25519Blake2b::NAME,
            Self::Slip10Ed25519Monero => Slip10Ed25519Monero::NAME,
            Self::KholawEd25519 => KholawEd25519::NAME,
        }
    }

    /// Compressed public-key length on this curve.
    #[must_use]
    pub const fn public_key_length(self) -> usize {
        33
    }

    /// Validate public key bytes and return their compressed encoding.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::PublicKey` if the bytes are not a key on this
    /// curve.
    pub fn compress_public_key(self, bytes: &[u8]) -> Result<Vec<u8>, WalletError> {
        Ok(match self {
            Self::Secp256k1 => weierstrass::secp256k1::PublicKey::from_bytes(bytes)?.raw_compressed(),
            Self::Nist256p1 => weierstrass::nist256p1::PublicKey::from_bytes(bytes)?.raw_compressed(),
            Self::Slip10Ed25519
            | Self::Slip10Ed25519Blake2b
            | Self::Slip10Ed25519Monero
            | Self::KholawEd25519 => Ed25519PublicKey::from_bytes(bytes)?.raw_compressed(),
        })
    }
}

impl fmt::Display for EccKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EccKind {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                WalletError::Ecc(ErrorDetail::mismatch(
                    "unknown curve",
                    Self::ALL.map(Self::name).join(", "),
                    s,
                ))
            })
    }
}

/// Left-pad `value` to a fixed-width big-endian array.
pub(crate) fn biguint_to_be<const N: usize>(value: &BigUint) -> [u8; N] {
    let bytes = value.to_bytes_be();
    let mut out = [0u8; N];
    let take = bytes.len().min(N);
    out[N - take..].copy_from_slice(&bytes[bytes.len() - take..]);
    out
}

/// Right-pad `value` to a fixed-width little-endian array.
pub(crate) fn biguint_to_le<const N: usize>(value: &BigUint) -> [u8; N] {
    let bytes = value.to_bytes_le();
    let mut out = [0u8; N];
    let take = bytes.len().min(N);
    out[..take].copy_from_slice(&bytes[..take]);
    out
}
