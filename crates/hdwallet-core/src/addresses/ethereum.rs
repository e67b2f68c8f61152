//! Addresses over the Ethereum key hash `Keccak-256(x ‖ y)[12..]`.
//!
//! Ethereum and `XinFin` render it as EIP-55 hex, Tron wraps it in
//! Base58Check, Harmony, OKT-Chain and Injective in Bech32.

use super::{check_length, check_version, secp256k1_key, strip_prefix, Address, AddressParams};
use crate::crypto::keccak256;
use crate::ecc::EccPublicKey;
use crate::encoding::base58::{self, Alphabet};
use crate::encoding::{bech32, hex};
use crate::error::{ErrorDetail, WalletError};

const TRON_VERSION: u8 = 0x41;

/// `Keccak-256(uncompressed[1..])[12..]`.
///
/// # Errors
///
/// Returns `WalletError::PublicKey` if the bytes are not a secp256k1 key.
pub fn key_hash(public_key: &[u8]) -> Result<[u8; 20], WalletError> {
    let uncompressed = secp256k1_key(public_key)?.raw_uncompressed();
    let digest = keccak256(&uncompressed[1..]);
    let mut hash = [0u8; 20];
    hash.copy_from_slice(&digest[12..]);
    Ok(hash)
}

/// EIP-55 mixed-case hex of a 20-byte hash, without prefix.
#[must_use]
pub fn checksum_encode(hash: &[u8]) -> String {
    let lower = hex::encode(hash);
    let digest = keccak256(lower.as_bytes());
    lower
        .char_indices()
        .map(|(i, c)| {
            let nibble = (digest[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
            if nibble >= 8 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

fn hex_encode(public_key: &[u8], prefix: &str, skip_checksum: bool) -> Result<String, WalletError> {
    let hash = key_hash(public_key)?;
    let body = if skip_checksum {
        hex::encode(&hash)
    } else {
        checksum_encode(&hash)
    };
    Ok(format!("{prefix}{body}"))
}

fn hex_decode(address: &str, prefix: &str, skip_checksum: bool) -> Result<Vec<u8>, WalletError> {
    let body = strip_prefix(address, prefix)?;
    if body.len() != 40 {
        return Err(WalletError::Address(ErrorDetail::mismatch(
            "invalid address length",
            40,
            body.len(),
        )));
    }
    let hash = hex::decode(body).map_err(|e| WalletError::Address(e.detail().clone()))?;
    if !skip_checksum {
        let expected = checksum_encode(&hash);
        if expected != body {
            return Err(WalletError::Checksum(ErrorDetail::mismatch(
                "invalid EIP-55 checksum",
                expected,
                body,
            )));
        }
    }
    Ok(hash)
}

fn bech32_decode(address: &str, hrp: &str) -> Result<Vec<u8>, WalletError> {
    let hash = bech32::decode(hrp, address)?;
    check_length(&hash, 20)?;
    Ok(hash)
}

/// `0x` + EIP-55 hex.
pub struct Ethereum;

impl Address for Ethereum {
    const NAME: &'static str = "Ethereum";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        hex_encode(public_key, params.prefix_or("0x"), params.skip_checksum_encode)
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        hex_decode(address, params.prefix_or("0x"), params.skip_checksum_encode)
    }
}

/// `xdc` + EIP-55 hex.
pub struct XinFin;

impl Address for XinFin {
    const NAME: &'static str = "XinFin";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        hex_encode(public_key, params.prefix_or("xdc"), params.skip_checksum_encode)
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        hex_decode(address, params.prefix_or("xdc"), params.skip_checksum_encode)
    }
}

/// `Base58Check(0x41 ‖ hash)`.
pub struct Tron;

impl Address for Tron {
    const NAME: &'static str = "Tron";

    fn encode(public_key: &[u8], _params: &AddressParams) -> Result<String, WalletError> {
        let mut payload = vec![TRON_VERSION];
        payload.extend_from_slice(&key_hash(public_key)?);
        Ok(base58::check_encode(&payload, Alphabet::Bitcoin))
    }

    fn decode(address: &str, _params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        let payload = base58::check_decode(address, Alphabet::Bitcoin)?;
        check_length(&payload, 21)?;
        check_version(&[TRON_VERSION], &payload[..1])?;
        Ok(payload[1..].to_vec())
    }
}

macro_rules! bech32_key_hash {
    ($(#[$doc:meta])* $codec:ident, $name:literal, $hrp:literal) => {
        $(#[$doc])*
        pub struct $codec;

        impl Address for $codec {
            const NAME: &'static str = $name;

            fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
                bech32::encode(params.hrp_or($hrp), &key_hash(public_key)?)
            }

            fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
                bech32_decode(address, params.hrp_or($hrp))
            }
        }
    };
}

bech32_key_hash!(
    /// Bech32 `one`.
    Harmony,
    "Harmony",
    "one"
);
bech32_key_hash!(
    /// Bech32 `ex`.
    OktChain,
    "OKT-Chain",
    "ex"
);
bech32_key_hash!(
    /// Bech32 `inj`.
    Injective,
    "Injective",
    "inj"
);
