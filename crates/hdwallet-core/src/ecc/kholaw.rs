//! Kholaw ed25519 (BIP32-Ed25519): 64-byte extended private keys
//! `kL ‖ kR` and the child-key arithmetic shared by the BIP32, Cardano and
//! Algorand engines.
//!
//! The [`KholawScheme`] selects between the three arithmetic families:
//! - `V2`: little-endian index, `kL + 8·zL[..28]`, `kR + zR mod 2^256`
//! - `Peikert`: as `V2` but `zL` keeps its low `256 - g` bits
//! - `ByronLegacy`: big-endian index, per-byte `zL·8` without carry added
//!   to `kL` modulo ℓ, per-byte `kR + zR` without carry

use std::fmt;

use num_bigint::BigUint;
use zeroize::Zeroizing;

use super::ed25519::{is_zero_scalar, order, Ed25519Point, Ed25519PublicKey};
use super::weierstrass::{chain_code, check_seed_length, hardened_from_public};
use super::{
    biguint_to_le, Bip32Curve, ChainCode, Ecc, EccKind, EccPoint, EccPrivateKey, EccPublicKey,
};
use crate::crypto::{hmac_sha256, hmac_sha512};
use crate::derivation::is_hardened;
use crate::error::WalletError;
use crate::memory::SecretBytes;

/// HMAC key for Kholaw master keys.
pub const SEED_KEY: &[u8] = b"ed25519 seed";

/// Clear bits 0-2 of byte 0, clear bit 7 and set bit 6 of byte 31.
pub fn clamp(kl: &mut [u8]) {
    kl[0] &= 0xf8;
    kl[31] &= 0x7f;
    kl[31] |= 0x40;
}

/// The third-highest bit of `kL` that master-key generation must avoid.
#[must_use]
pub fn has_forbidden_bit(kl: &[u8]) -> bool {
    kl[31] & 0x20 != 0
}

/// A 64-byte extended private key `kL ‖ kR`.
#[derive(Clone)]
pub struct KholawPrivateKey(SecretBytes<64>);

impl KholawPrivateKey {
    /// Left half: the scalar.
    #[must_use]
    pub fn kl(&self) -> &[u8] {
        &self.0.expose()[..32]
    }

    /// Right half: the nonce key.
    #[must_use]
    pub fn kr(&self) -> &[u8] {
        &self.0.expose()[32..]
    }

    /// Join two halves.
    #[must_use]
    pub fn from_halves(kl: &[u8; 32], kr: &[u8; 32]) -> Self {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(kl);
        bytes[32..].copy_from_slice(kr);
        Self(SecretBytes::new(bytes))
    }
}

impl fmt::Debug for KholawPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KholawPrivateKey(***)")
    }
}

impl EccPrivateKey for KholawPrivateKey {
    type PublicKey = Ed25519PublicKey;
    const LENGTH: usize = 64;

    fn from_bytes(bytes: &[u8]) -> Result<Self, WalletError> {
        let secret = SecretBytes::<64>::from_slice(bytes)?;
        if is_zero_scalar(&left(secret.expose())) {
            return Err(WalletError::PrivateKey("kL is zero modulo the group order".into()));
        }
        Ok(Self(secret))
    }

    fn raw(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.0.expose().to_vec())
    }

    fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(Ed25519Point::mul_base(&left(self.0.expose())))
    }
}

fn left(bytes: &[u8; 64]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes[..32]);
    out
}

/// Marker type for Kholaw ed25519.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KholawEd25519;

impl Ecc for KholawEd25519 {
    const NAME: &'static str = "Kholaw-Ed25519";
    const KIND: EccKind = EccKind::KholawEd25519;
    type Point = Ed25519Point;
    type PublicKey = Ed25519PublicKey;
    type PrivateKey = KholawPrivateKey;

    fn order() -> BigUint {
        order()
    }
}

// ---------------------------------------------------------------------------
// Child-key arithmetic
// ---------------------------------------------------------------------------

/// Child-key arithmetic family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KholawScheme {
    /// BIP32-Ed25519 as used by Icarus and Ledger wallets.
    V2,
    /// Peikert's amendment keeping the low `256 - g` bits of `zL`.
    Peikert {
        /// Number of high bits cleared from `zL`.
        g: u32,
    },
    /// The original Daedalus derivation with its carry-less arithmetic.
    ByronLegacy,
}

impl KholawScheme {
    fn index_bytes(self, index: u32) -> [u8; 4] {
        match self {
            Self::ByronLegacy => index.to_be_bytes(),
            Self::V2 | Self::Peikert { .. } => index.to_le_bytes(),
        }
    }

    /// The scalar added (times `G`) to the parent: derived from `zL`.
    fn tweak(self, zl: &[u8]) -> [u8; 32] {
        match self {
            Self::V2 => {
                let trunc = BigUint::from_bytes_le(&zl[..28]);
                biguint_to_le(&(trunc * 8u32))
            }
            Self::Peikert { g } => {
                let bits = 256u32.saturating_sub(g);
                let mask = (BigUint::from(1u8) << bits) - 1u32;
                let trunc = BigUint::from_bytes_le(&zl[..32]) & mask;
                biguint_to_le(&(trunc * 8u32))
            }
            Self::ByronLegacy => {
                let mut out = [0u8; 32];
                for (o, z) in out.iter_mut().zip(zl) {
                    *o = z.wrapping_mul(8);
                }
                out
            }
        }
    }

    fn child_kl(self, kl: &[u8], tweak: &[u8; 32]) -> [u8; 32] {
        let sum = BigUint::from_bytes_le(kl) + BigUint::from_bytes_le(tweak);
        match self {
            Self::ByronLegacy => biguint_to_le(&(sum % order())),
            Self::V2 | Self::Peikert { .. } => biguint_to_le(&sum),
        }
    }

    fn child_kr(self, kr: &[u8], zr: &[u8]) -> [u8; 32] {
        match self {
            Self::ByronLegacy => {
                let mut out = [0u8; 32];
                for ((o, a), b) in out.iter_mut().zip(kr).zip(zr) {
                    *o = a.wrapping_add(*b);
                }
                out
            }
            Self::V2 | Self::Peikert { .. } => {
                let sum = BigUint::from_bytes_le(kr) + BigUint::from_bytes_le(zr);
                biguint_to_le(&sum)
            }
        }
    }

    /// Private child derivation; hardened and non-hardened.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Derivation` if the child scalar is zero.
    pub fn derive_private(
        self,
        private_key: &KholawPrivateKey,
        chain_code_in: &ChainCode,
        index: u32,
    ) -> Result<(KholawPrivateKey, ChainCode), WalletError> {
        let index_bytes = self.index_bytes(index);
        let mut z_data = Zeroizing::new(Vec::with_capacity(69));
        let mut c_data = Zeroizing::new(Vec::with_capacity(69));
        if is_hardened(index) {
            z_data.push(0x00);
            z_data.extend_from_slice(&private_key.raw());
            c_data.push(0x01);
            c_data.extend_from_slice(&private_key.raw());
        } else {
            let public = private_key.public_key().raw();
            z_data.push(0x02);
            z_data.extend_from_slice(&public);
            c_data.push(0x03);
            c_data.extend_from_slice(&public);
        }
        z_data.extend_from_slice(&index_bytes);
        c_data.extend_from_slice(&index_bytes);

        let z = hmac_sha512(chain_code_in, &z_data);
        let c = hmac_sha512(chain_code_in, &c_data);
        let (zl, zr) = z.split_at(32);

        let kl = Zeroizing::new(self.child_kl(private_key.kl(), &self.tweak(zl)));
        if is_zero_scalar(&kl) {
            return Err(super::weierstrass::invalid_child(index));
        }
        let kr = Zeroizing::new(self.child_kr(private_key.kr(), zr));
        Ok((KholawPrivateKey::from_halves(&kl, &kr), chain_code(&c[32..])))
    }

    /// Public child derivation; non-hardened only.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Derivation` for hardened indexes or when the
    /// child point is the identity.
    pub fn derive_public(
        self,
        public_key: &Ed25519PublicKey,
        chain_code_in: &ChainCode,
        index: u32,
    ) -> Result<(Ed25519PublicKey, ChainCode), WalletError> {
        if is_hardened(index) {
            return Err(hardened_from_public(index));
        }
        let index_bytes = self.index_bytes(index);
        let public = public_key.raw();
        let mut z_data = vec![0x02];
        z_data.extend_from_slice(&public);
        z_data.extend_from_slice(&index_bytes);
        let mut c_data = vec![0x03];
        c_data.extend_from_slice(&public);
        c_data.extend_from_slice(&index_bytes);

        let z = hmac_sha512(chain_code_in, &z_data);
        let c = hmac_sha512(chain_code_in, &c_data);
        let point = Ed25519Point::mul_base(&self.tweak(&z[..32])).add_point(&public_key.point());
        if point.is_identity() {
            return Err(super::weierstrass::invalid_child(index));
        }
        Ok((Ed25519PublicKey::from_point(&point)?, chain_code(&c[32..])))
    }
}

/// BIP32-Ed25519 master key: `HMAC-SHA-512("ed25519 seed", seed)` re-hashed
/// until bit 5 of `kL[31]` is clear, then clamped; the chain code is
/// `HMAC-SHA-256("ed25519 seed", 0x01 ‖ seed)`.
///
/// # Errors
///
/// Returns `WalletError::Seed` on an unusable seed length.
pub fn hmac_master_key(seed: &[u8]) -> Result<(KholawPrivateKey, ChainCode), WalletError> {
    check_seed_length(seed)?;
    let mut mac = hmac_sha512(SEED_KEY, seed);
    let mut attempts = 0u32;
    while has_forbidden_bit(&mac[..32]) {
        attempts += 1;
        tracing::debug!(attempts, "Kholaw master kL has bit 5 set, resampling");
        mac = hmac_sha512(SEED_KEY, &mac[..]);
    }
    let mut key = Zeroizing::new([0u8; 64]);
    key.copy_from_slice(&mac[..]);
    clamp(&mut key[..32]);

    let mut cc_data = Zeroizing::new(Vec::with_capacity(seed.len() + 1));
    cc_data.push(0x01);
    cc_data.extend_from_slice(seed);
    let chain = hmac_sha256(SEED_KEY, &cc_data);
    Ok((KholawPrivateKey(SecretBytes::new(*key)), chain))
}

impl Bip32Curve for KholawEd25519 {
    const SEED_KEY: &'static [u8] = SEED_KEY;
    const SUPPORTS_PUBLIC_DERIVATION: bool = true;

    fn master_key(seed: &[u8]) -> Result<(KholawPrivateKey, ChainCode), WalletError> {
        hmac_master_key(seed)
    }

    fn derive_private(
        private_key: &KholawPrivateKey,
        chain_code_in: &ChainCode,
        index: u32,
    ) -> Result<(KholawPrivateKey, ChainCode), WalletError> {
        KholawScheme::V2.derive_private(private_key, chain_code_in, index)
    }

    fn derive_public(
        public_key: &Ed25519PublicKey,
        chain_code_in: &ChainCode,
        index: u32,
    ) -> Result<(Ed25519PublicKey, ChainCode), WalletError> {
        KholawScheme::V2.derive_public(public_key, chain_code_in, index)
    }
}
