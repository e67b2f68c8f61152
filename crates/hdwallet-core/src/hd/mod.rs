//! Hierarchical deterministic key engines.
//!
//! | Engine | Keys | Derivation |
//! |--------|------|------------|
//! | [`Bip32Hd`] | any [`Bip32Curve`](crate::ecc::Bip32Curve) | BIP32 / SLIP-10 |
//! | [`CardanoHd`] | Kholaw | Icarus, Ledger, Byron-Legacy |
//! | [`AlgorandHd`] | Kholaw | Peikert (`g = 9`) |
//! | [`ElectrumV1Hd`] | secp256k1 | sequence hashing, no chain code |
//! | [`ElectrumV2Hd`] | secp256k1 | BIP32 under `m` or `m/0'` |
//! | [`MoneroHd`] | ed25519 spend/view pair | sub-address indexes |
//!
//! Every engine owns its current node and implements [`Hd`], whose getters
//! return `None` for material the engine does not have (watch-only keys,
//! chain codes outside BIP32, extended keys for Monero).

mod algorand;
mod bip32;
mod cardano;
mod electrum;
mod monero;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::derivation::DerivationPath;
use crate::ecc::{ChainCode, EccKind};
use crate::error::WalletError;
use crate::keys::PublicKeyType;

pub use algorand::AlgorandHd;
pub use bip32::Bip32Hd;
pub use cardano::CardanoHd;
pub use electrum::{ElectrumV1Hd, ElectrumV2Hd, ElectrumV2Mode};
pub use monero::{MoneroHd, MoneroNetwork};

/// BIP32 `xprv`/`xpub` version bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedKeyVersions {
    /// Private version, `0x0488ADE4` for Bitcoin mainnet.
    pub xprv: u32,
    /// Public version, `0x0488B21E` for Bitcoin mainnet.
    pub xpub: u32,
}

impl Default for ExtendedKeyVersions {
    fn default() -> Self {
        Self {
            xprv: 0x0488_ade4,
            xpub: 0x0488_b21e,
        }
    }
}

/// Construction options shared by the BIP32-family engines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HdOptions {
    /// Extended key versions.
    pub versions: ExtendedKeyVersions,
    /// WIF version byte; `None` disables WIF.
    pub wif_prefix: Option<u8>,
    /// Encoding returned by [`Hd::public_key`] and used for WIF.
    pub public_key_type: PublicKeyType,
}

impl Default for HdOptions {
    fn default() -> Self {
        Self {
            versions: ExtendedKeyVersions::default(),
            wif_prefix: Some(0x80),
            public_key_type: PublicKeyType::Compressed,
        }
    }
}

/// Common surface of every HD engine.
///
/// `derive` walks `path` from the current node and commits only if every
/// step succeeds; `clean_derivation` returns to the root.
pub trait Hd: Send + Sync {
    /// Engine name.
    fn name(&self) -> &'static str;

    /// Curve the engine's keys live on.
    fn ecc(&self) -> EccKind;

    /// Derive along `path` from the current node.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Derivation` for ranges, hardened indexes on
    /// public-only nodes and invalid children.
    fn derive(&mut self, path: &DerivationPath) -> Result<(), WalletError>;

    /// Reset the current node to the root.
    fn clean_derivation(&mut self);

    /// Path from the root to the current node.
    fn path(&self) -> DerivationPath;

    /// Serialized root private key.
    fn root_xprv(&self) -> Option<Zeroizing<String>> {
        None
    }

    /// Serialized root public key.
    fn root_xpub(&self) -> Option<String> {
        None
    }

    /// Serialized private key of the current node.
    fn xprv(&self) -> Option<Zeroizing<String>> {
        None
    }

    /// Serialized public key of the current node.
    fn xpub(&self) -> Option<String> {
        None
    }

    /// Root private key.
    fn root_private_key(&self) -> Option<Zeroizing<Vec<u8>>>;

    /// Root chain code.
    fn root_chain_code(&self) -> Option<ChainCode> {
        None
    }

    /// Root public key in the configured encoding.
    fn root_public_key(&self) -> Vec<u8>;

    /// Private key of the current node.
    fn private_key(&self) -> Option<Zeroizing<Vec<u8>>>;

    /// WIF of the current private key.
    fn wif(&self) -> Option<Zeroizing<String>> {
        None
    }

    /// Chain code of the current node.
    fn chain_code(&self) -> Option<ChainCode> {
        None
    }

    /// Public key of the current node in the configured encoding.
    fn public_key(&self) -> Vec<u8>;

    /// Configured public-key encoding.
    fn public_key_type(&self) -> PublicKeyType {
        PublicKeyType::Compressed
    }

    /// `RIPEMD-160(SHA-256(compressed public key))`.
    fn hash(&self) -> Option<[u8; 20]> {
        None
    }

    /// First four bytes of [`hash`](Self::hash).
    fn fingerprint(&self) -> Option<[u8; 4]> {
        self.hash().map(|h| [h[0], h[1], h[2], h[3]])
    }

    /// Fingerprint of the parent node.
    fn parent_fingerprint(&self) -> Option<[u8; 4]> {
        None
    }

    /// Depth of the current node.
    fn depth(&self) -> u8 {
        u8::try_from(self.path().depth()).unwrap_or(u8::MAX)
    }

    /// Index of the current node.
    fn index(&self) -> u32 {
        self.path()
            .elements()
            .last()
            .and_then(|e| e.raw())
            .unwrap_or_default()
    }

    /// `true` if the root is a master node.
    fn strict(&self) -> Option<bool> {
        None
    }
}
