//! Extended-key and Wallet Import Format codecs.
//!
//! Extended keys serialize as
//! `version(4) ‖ depth(1) ‖ parent_fingerprint(4) ‖ index(4, BE) ‖ chain_code(32) ‖ key`
//! wrapped in Base58Check. `key` is 33 bytes (`0x00 ‖ priv` or a compressed
//! public key), or 65 bytes for Kholaw private keys, giving a 110-byte
//! body.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::ecc::ChainCode;
use crate::encoding::base58::{self, Alphabet};
use crate::encoding::hex;
use crate::error::{ErrorDetail, WalletError};

/// Serialized length with a 33-byte key body.
pub const XKEY_LENGTH: usize = 78;

/// Serialized length with a 65-byte Kholaw key body.
pub const KHOLAW_XPRV_LENGTH: usize = 110;

/// Which public-key encoding addresses and WIF refer to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicKeyType {
    /// `02/03 ‖ x`.
    #[default]
    Compressed,
    /// `04 ‖ x ‖ y`.
    Uncompressed,
}

impl PublicKeyType {
    /// Configuration name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Compressed => "compressed",
            Self::Uncompressed => "uncompressed",
        }
    }
}

impl fmt::Display for PublicKeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PublicKeyType {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compressed" => Ok(Self::Compressed),
            "uncompressed" => Ok(Self::Uncompressed),
            _ => Err(WalletError::PublicKey(ErrorDetail::mismatch(
                "unknown public key type",
                "compressed, uncompressed",
                s,
            ))),
        }
    }
}

/// The fields of a serialized extended key.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedKey {
    /// Version bytes (`xprv`, `xpub`, `zprv`, ...).
    pub version: [u8; 4],
    /// Depth below the master node.
    pub depth: u8,
    /// First four bytes of the parent's key hash.
    pub parent_fingerprint: [u8; 4],
    /// Child index, hardened bit included.
    pub index: u32,
    /// Chain code.
    pub chain_code: ChainCode,
    /// Key body: 33 bytes, or 65 for a Kholaw private key.
    pub key: Zeroizing<Vec<u8>>,
}

impl ExtendedKey {
    /// Raw serialization.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::ExtendedKey` if the key body is neither 33 nor
    /// 65 bytes.
    pub fn serialize(&self) -> Result<Zeroizing<Vec<u8>>, WalletError> {
        if !matches!(self.key.len(), 33 | 65) {
            return Err(WalletError::ExtendedKey(ErrorDetail::mismatch(
                "invalid extended key body length",
                "33 or 65",
                self.key.len(),
            )));
        }
        let mut raw = Zeroizing::new(Vec::with_capacity(45 + self.key.len()));
        raw.extend_from_slice(&self.version);
        raw.push(self.depth);
        raw.extend_from_slice(&self.parent_fingerprint);
        raw.extend_from_slice(&self.index.to_be_bytes());
        raw.extend_from_slice(&self.chain_code);
        raw.extend_from_slice(&self.key);
        Ok(raw)
    }

    /// Parse a raw 78- or 110-byte serialization.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::ExtendedKey` on any other length.
    pub fn deserialize(raw: &[u8]) -> Result<Self, WalletError> {
        if !matches!(raw.len(), XKEY_LENGTH | KHOLAW_XPRV_LENGTH) {
            return Err(WalletError::ExtendedKey(ErrorDetail::mismatch(
                "invalid extended key length",
                format!("{XKEY_LENGTH} or {KHOLAW_XPRV_LENGTH}"),
                raw.len(),
            )));
        }
        let mut version = [0u8; 4];
        version.copy_from_slice(&raw[..4]);
        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&raw[5..9]);
        let mut index = [0u8; 4];
        index.copy_from_slice(&raw[9..13]);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&raw[13..45]);
        Ok(Self {
            version,
            depth: raw[4],
            parent_fingerprint,
            index: u32::from_be_bytes(index),
            chain_code,
            key: Zeroizing::new(raw[45..].to_vec()),
        })
    }

    /// Base58Check text.
    ///
    /// # Errors
    ///
    /// See [`serialize`](Self::serialize).
    pub fn encode(&self) -> Result<Zeroizing<String>, WalletError> {
        let raw = self.serialize()?;
        Ok(Zeroizing::new(base58::check_encode(&raw, Alphabet::Bitcoin)))
    }

    /// Parse Base58Check text.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Checksum` on a bad checksum and
    /// `WalletError::ExtendedKey` on a bad length.
    pub fn decode(text: &str) -> Result<Self, WalletError> {
        let raw = Zeroizing::new(base58::check_decode(text.trim(), Alphabet::Bitcoin)?);
        Self::deserialize(&raw)
    }

    /// `true` for the master node: depth, parent fingerprint and index all
    /// zero.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.depth == 0 && self.parent_fingerprint == [0; 4] && self.index == 0
    }

    /// Version as a big-endian integer.
    #[must_use]
    pub const fn version_u32(&self) -> u32 {
        u32::from_be_bytes(self.version)
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("version", &hex::encode(&self.version))
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(&self.parent_fingerprint))
            .field("index", &self.index)
            .field("key", &"***")
            .finish_non_exhaustive()
    }
}

/// Encode a 32-byte private key as WIF.
///
/// # Errors
///
/// Returns `WalletError::Wif` unless the key is 32 bytes.
pub fn private_key_to_wif(
    private_key: &[u8],
    prefix: u8,
    public_key_type: PublicKeyType,
) -> Result<Zeroizing<String>, WalletError> {
    if private_key.len() != 32 {
        return Err(WalletError::Wif(ErrorDetail::mismatch(
            "invalid private key length",
            32,
            private_key.len(),
        )));
    }
    let mut payload = Zeroizing::new(Vec::with_capacity(34));
    payload.push(prefix);
    payload.extend_from_slice(private_key);
    if public_key_type == PublicKeyType::Compressed {
        payload.push(0x01);
    }
    Ok(Zeroizing::new(base58::check_encode(&payload, Alphabet::Bitcoin)))
}

/// Decode WIF into the private key and the public-key encoding it asks
/// for (trailing `0x01` means compressed).
///
/// # Errors
///
/// Returns `WalletError::Checksum` on a bad checksum and `WalletError::Wif`
/// on a wrong prefix, length or compression flag.
pub fn wif_to_private_key(
    wif: &str,
    prefix: u8,
) -> Result<(Zeroizing<Vec<u8>>, PublicKeyType), WalletError> {
    let raw = Zeroizing::new(base58::check_decode(wif.trim(), Alphabet::Bitcoin)?);
    let kind = match raw.len() {
        33 => PublicKeyType::Uncompressed,
        34 if raw[33] == 0x01 => PublicKeyType::Compressed,
        34 => {
            return Err(WalletError::Wif(ErrorDetail::mismatch(
                "invalid compression flag",
                "01",
                hex::encode(&raw[33..]),
            )))
        }
        other => {
            return Err(WalletError::Wif(ErrorDetail::mismatch(
                "invalid WIF length",
                "33 or 34",
                other,
            )))
        }
    };
    if raw[0] != prefix {
        return Err(WalletError::Wif(ErrorDetail::mismatch(
            "invalid WIF prefix",
            hex::encode(&[prefix]),
            hex::encode(&raw[..1]),
        )));
    }
    Ok((Zeroizing::new(raw[1..33].to_vec()), kind))
}
