//! Electrum HD engines.
//!
//! This module provides:
//! - [`ElectrumV1Hd`]: Electrum 1.x sequence hashing over one master key
//! - [`ElectrumV2Hd`]: BIP32 secp256k1 with Electrum's path layout

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::{Bip32Hd, Hd, HdOptions};
use crate::addresses::AddressType;
use crate::crypto::double_sha256;
use crate::derivation::{harden, is_hardened, DerivationPath};
use crate::ecc::weierstrass::secp256k1::{scalar_from_biguint, Point, PrivateKey, PublicKey};
use crate::ecc::{ChainCode, EccKind, EccPoint, EccPrivateKey, EccPublicKey, Secp256k1};
use crate::error::{ErrorDetail, WalletError};
use crate::keys::{private_key_to_wif, wif_to_private_key, PublicKeyType};

// ---------------------------------------------------------------------------
// Electrum 1.x
// ---------------------------------------------------------------------------

/// Electrum 1.x engine. Every key is `master + sequence(change, address)`,
/// so there is no chain code and `derive` always starts from the master.
#[derive(Clone, Debug)]
pub struct ElectrumV1Hd {
    master_private_key: Option<PrivateKey>,
    master_public_key: PublicKey,
    private_key: Option<PrivateKey>,
    public_key: PublicKey,
    path: DerivationPath,
    wif_prefix: Option<u8>,
    public_key_type: PublicKeyType,
}

impl ElectrumV1Hd {
    fn with_master(
        master_private_key: Option<PrivateKey>,
        master_public_key: PublicKey,
        wif_prefix: Option<u8>,
        public_key_type: PublicKeyType,
    ) -> Self {
        tracing::debug!(
            engine = "Electrum-V1",
            watch_only = master_private_key.is_none(),
            "HD engine initialised"
        );
        Self {
            private_key: master_private_key.clone(),
            public_key: master_public_key,
            master_private_key,
            master_public_key,
            path: DerivationPath::root(),
            wif_prefix,
            public_key_type,
        }
    }

    /// Master key from the 32-byte stretched seed.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Seed` unless the seed is a valid secp256k1
    /// scalar.
    pub fn from_seed(
        seed: &[u8],
        wif_prefix: Option<u8>,
        public_key_type: PublicKeyType,
    ) -> Result<Self, WalletError> {
        let key = PrivateKey::from_bytes(seed).map_err(|e| WalletError::Seed(e.detail().clone()))?;
        Ok(Self::with_master(
            Some(key.clone()),
            key.public_key(),
            wif_prefix,
            public_key_type,
        ))
    }

    /// Master key from raw private key bytes.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::PrivateKey` for an invalid key.
    pub fn from_private_key(
        private_key: &[u8],
        wif_prefix: Option<u8>,
        public_key_type: PublicKeyType,
    ) -> Result<Self, WalletError> {
        let key = PrivateKey::from_bytes(private_key)?;
        Ok(Self::with_master(
            Some(key.clone()),
            key.public_key(),
            wif_prefix,
            public_key_type,
        ))
    }

    /// Master key from WIF; the WIF flag picks the public-key encoding.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Wif` for undecodable WIF.
    pub fn from_wif(wif: &str, wif_prefix: u8) -> Result<Self, WalletError> {
        let (key, public_key_type) = wif_to_private_key(wif, wif_prefix)?;
        Self::from_private_key(&key, Some(wif_prefix), public_key_type)
    }

    /// Watch-only engine from the master public key.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::PublicKey` for an invalid key.
    pub fn from_public_key(public_key: &[u8], public_key_type: PublicKeyType) -> Result<Self, WalletError> {
        let key = PublicKey::from_bytes(public_key)?;
        Ok(Self::with_master(None, key, None, public_key_type))
    }

    /// Master private key.
    #[must_use]
    pub fn master_private_key(&self) -> Option<Zeroizing<Vec<u8>>> {
        self.master_private_key.as_ref().map(EccPrivateKey::raw)
    }

    /// Master public key in the configured encoding.
    #[must_use]
    pub fn master_public_key(&self) -> Vec<u8> {
        self.encode_public(&self.master_public_key)
    }

    /// `SHA-256d("{address}:{change}:" ‖ master_public_uncompressed[1..])`.
    #[must_use]
    pub fn sequence(&self, change: u32, address: u32) -> [u8; 32] {
        let mut data = format!("{address}:{change}:").into_bytes();
        data.extend_from_slice(&self.master_public_key.raw_uncompressed()[1..]);
        double_sha256(&data)
    }

    /// Move to the key at `(change, address)`.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Derivation` if the sum is not a valid key.
    pub fn derive_index(&mut self, change: u32, address: u32) -> Result<(), WalletError> {
        let sequence = BigUint::from_bytes_be(&self.sequence(change, address));
        let tweak = scalar_from_biguint(&sequence);
        let private_key = match &self.master_private_key {
            Some(master) => Some(PrivateKey::from_scalar(&(master.scalar() + tweak)).map_err(|_| {
                WalletError::Derivation(ErrorDetail::msg("sequence produced an invalid key"))
            })?),
            None => None,
        };
        let point = Point::generator()
            .mul_scalar(&tweak)
            .add_point(&self.master_public_key.point());
        let public_key = PublicKey::from_point(&point)
            .map_err(|_| WalletError::Derivation(ErrorDetail::msg("sequence produced the identity")))?;
        tracing::trace!(change, address, "Electrum-V1 key derived");
        self.private_key = private_key;
        self.public_key = public_key;
        self.path = DerivationPath::from_indexes(&[change, address]);
        Ok(())
    }

    fn encode_public(&self, key: &PublicKey) -> Vec<u8> {
        match self.public_key_type {
            PublicKeyType::Compressed => key.raw_compressed(),
            PublicKeyType::Uncompressed => key.raw_uncompressed(),
        }
    }
}

/// Split an Electrum path `m/change/address` into its two indexes.
fn change_and_address(path: &DerivationPath) -> Result<(u32, u32), WalletError> {
    let indexes = path.indexes()?;
    match indexes.as_slice() {
        [change, address] if !is_hardened(*change) && !is_hardened(*address) => Ok((*change, *address)),
        _ => Err(WalletError::Derivation(ErrorDetail::mismatch(
            "Electrum paths are m/change/address without hardened indexes",
            "m/change/address",
            path,
        ))),
    }
}

impl Hd for ElectrumV1Hd {
    fn name(&self) -> &'static str {
        "Electrum-V1"
    }

    fn ecc(&self) -> EccKind {
        EccKind::Secp256k1
    }

    /// `path` must be `m/change/address`; it is resolved from the master.
    fn derive(&mut self, path: &DerivationPath) -> Result<(), WalletError> {
        let (change, address) = change_and_address(path)?;
        self.derive_index(change, address)
    }

    fn clean_derivation(&mut self) {
        self.private_key.clone_from(&self.master_private_key);
        self.public_key = self.master_public_key;
        self.path = DerivationPath::root();
    }

    fn path(&self) -> DerivationPath {
        self.path.clone()
    }

    fn root_private_key(&self) -> Option<Zeroizing<Vec<u8>>> {
        self.master_private_key()
    }

    fn root_public_key(&self) -> Vec<u8> {
        self.master_public_key()
    }

    fn private_key(&self) -> Option<Zeroizing<Vec<u8>>> {
        self.private_key.as_ref().map(EccPrivateKey::raw)
    }

    fn wif(&self) -> Option<Zeroizing<String>> {
        let prefix = self.wif_prefix?;
        private_key_to_wif(&self.private_key()?, prefix, self.public_key_type).ok()
    }

    fn public_key(&self) -> Vec<u8> {
        self.encode_public(&self.public_key)
    }

    fn public_key_type(&self) -> PublicKeyType {
        self.public_key_type
    }
}

// ---------------------------------------------------------------------------
// Electrum 2.x+
// ---------------------------------------------------------------------------

/// Electrum-v2 wallet layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElectrumV2Mode {
    /// `m/change/address`, P2PKH.
    #[default]
    Standard,
    /// `m/0'/change/address`, P2WPKH.
    Segwit,
}

impl ElectrumV2Mode {
    /// Configuration name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Segwit => "segwit",
        }
    }

    /// Address type of the mode.
    #[must_use]
    pub const fn address_type(self) -> AddressType {
        match self {
            Self::Standard => AddressType::P2pkh,
            Self::Segwit => AddressType::P2wpkh,
        }
    }
}

impl fmt::Display for ElectrumV2Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElectrumV2Mode {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "segwit" => Ok(Self::Segwit),
            _ => Err(WalletError::Hd(ErrorDetail::mismatch(
                "unknown Electrum-V2 mode",
                "standard, segwit",
                s,
            ))),
        }
    }
}

/// Electrum 2.x+ engine: BIP32 secp256k1 keyed by Electrum paths.
#[derive(Clone, Debug)]
pub struct ElectrumV2Hd {
    mode: ElectrumV2Mode,
    inner: Bip32Hd<Secp256k1>,
}

impl ElectrumV2Hd {
    /// Master node from the 64-byte Electrum-v2 seed.
    ///
    /// # Errors
    ///
    /// See [`Bip32Hd::from_seed`].
    pub fn from_seed(seed: &[u8], mode: ElectrumV2Mode, options: HdOptions) -> Result<Self, WalletError> {
        Ok(Self {
            mode,
            inner: Bip32Hd::from_seed(seed, options)?,
        })
    }

    /// The mode.
    #[must_use]
    pub const fn mode(&self) -> ElectrumV2Mode {
        self.mode
    }

    /// Move to the key at `(change, address)`.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Derivation` if a step yields an invalid key.
    pub fn derive_index(&mut self, change: u32, address: u32) -> Result<(), WalletError> {
        let path = match self.mode {
            ElectrumV2Mode::Standard => DerivationPath::from_indexes(&[change, address]),
            ElectrumV2Mode::Segwit => DerivationPath::from_indexes(&[harden(0), change, address]),
        };
        self.inner.clean_derivation();
        self.inner.derive(&path)
    }

    /// Master private key.
    #[must_use]
    pub fn master_private_key(&self) -> Option<Zeroizing<Vec<u8>>> {
        self.inner.root_private_key()
    }

    /// Master public key in the configured encoding.
    #[must_use]
    pub fn master_public_key(&self) -> Vec<u8> {
        self.inner.root_public_key()
    }
}

impl Hd for ElectrumV2Hd {
    fn name(&self) -> &'static str {
        "Electrum-V2"
    }

    fn ecc(&self) -> EccKind {
        EccKind::Secp256k1
    }

    /// `path` must be `m/change/address`; the mode adds `0'` for segwit
    /// and the path is resolved from the master.
    fn derive(&mut self, path: &DerivationPath) -> Result<(), WalletError> {
        let (change, address) = change_and_address(path)?;
        self.derive_index(change, address)
    }

    fn clean_derivation(&mut self) {
        self.inner.clean_derivation();
    }

    fn path(&self) -> DerivationPath {
        self.inner.path()
    }

    fn root_xprv(&self) -> Option<Zeroizing<String>> {
        self.inner.root_xprv()
    }

    fn root_xpub(&self) -> Option<String> {
        self.inner.root_xpub()
    }

    fn xprv(&self) -> Option<Zeroizing<String>> {
        self.inner.xprv()
    }

    fn xpub(&self) -> Option<String> {
        self.inner.xpub()
    }

    fn root_private_key(&self) -> Option<Zeroizing<Vec<u8>>> {
        self.inner.root_private_key()
    }

    fn root_chain_code(&self) -> Option<ChainCode> {
        self.inner.root_chain_code()
    }

    fn root_public_key(&self) -> Vec<u8> {
        self.inner.root_public_key()
    }

    fn private_key(&self) -> Option<Zeroizing<Vec<u8>>> {
        self.inner.private_key()
    }

    fn wif(&self) -> Option<Zeroizing<String>> {
        self.inner.wif()
    }

    fn chain_code(&self) -> Option<ChainCode> {
        self.inner.chain_code()
    }

    fn public_key(&self) -> Vec<u8> {
        self.inner.public_key()
    }

    fn public_key_type(&self) -> PublicKeyType {
        self.inner.public_key_type()
    }

    fn hash(&self) -> Option<[u8; 20]> {
        self.inner.hash()
    }

    fn parent_fingerprint(&self) -> Option<[u8; 4]> {
        self.inner.parent_fingerprint()
    }

    fn depth(&self) -> u8 {
        self.inner.depth()
    }

    fn index(&self) -> u32 {
        self.inner.index()
    }

    fn strict(&self) -> Option<bool> {
        self.inner.strict()
    }
}
