//! Account-model chains whose address is the key, or a single hash of it,
//! in hex, Base58 or Bech32.
//!
//! | Codec | Curve | Address |
//! |-------|-------|---------|
//! | [`Solana`] | ed25519 | `Base58(key)` |
//! | [`Aptos`] | ed25519 | `0x` + `SHA3-256(key ‖ 0x00)` |
//! | [`Sui`] | ed25519 | `0x` + `Blake2b-256(0x00 ‖ key)` |
//! | [`Near`] | ed25519 | hex key |
//! | [`Iota`] | ed25519 | Bech32 `iota` of `0x00 ‖ Blake2b-256(key)` |
//! | [`MultiversX`] | ed25519 | Bech32 `erd` of the key |
//! | [`Icon`] | secp256k1 | `hx` + `SHA3-256(x ‖ y)[12..]` |
//! | [`Zilliqa`] | secp256k1 | Bech32 `zil` of `SHA-256(compressed)[12..]` |

use super::{check_length, check_version, ed25519_key, secp256k1_key, strip_prefix, Address, AddressParams};
use crate::crypto::{blake2b_256, sha256, sha3_256};
use crate::ecc::{EccPublicKey, Ed25519PublicKey};
use crate::encoding::base58::{self, Alphabet};
use crate::encoding::{bech32, hex};
use crate::error::{ErrorDetail, WalletError};

/// Signature-scheme flag both Aptos and Sui use for ed25519.
const ED25519_SCHEME: u8 = 0x00;

/// Hex body of `length` bytes after `prefix`.
fn decode_hex(address: &str, prefix: &str, length: usize) -> Result<Vec<u8>, WalletError> {
    let body = strip_prefix(address, prefix)?;
    if body.len() != length * 2 {
        return Err(WalletError::Address(ErrorDetail::mismatch(
            "invalid address length",
            length * 2,
            body.len(),
        )));
    }
    hex::decode(body).map_err(|e| WalletError::Address(e.detail().clone()))
}

fn decode_bech32(address: &str, hrp: &str, length: usize) -> Result<Vec<u8>, WalletError> {
    let data = bech32::decode(hrp, address)?;
    check_length(&data, length)?;
    Ok(data)
}

/// Base58 of the raw key.
pub struct Solana;

impl Address for Solana {
    const NAME: &'static str = "Solana";

    fn encode(public_key: &[u8], _params: &AddressParams) -> Result<String, WalletError> {
        Ok(base58::encode(&ed25519_key(public_key)?, Alphabet::Bitcoin))
    }

    fn decode(address: &str, _params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        let key = base58::decode(address, Alphabet::Bitcoin).map_err(|e| WalletError::Address(e.detail().clone()))?;
        check_length(&key, 32)?;
        Ed25519PublicKey::from_bytes(&key)?;
        Ok(key)
    }
}

/// Aptos single-key authentication key.
pub struct Aptos;

impl Address for Aptos {
    const NAME: &'static str = "Aptos";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        let mut data = ed25519_key(public_key)?.to_vec();
        data.push(ED25519_SCHEME);
        Ok(format!("{}{}", params.prefix_or("0x"), hex::encode(&sha3_256(&data))))
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        decode_hex(address, params.prefix_or("0x"), 32)
    }
}

/// Sui ed25519 address.
pub struct Sui;

impl Address for Sui {
    const NAME: &'static str = "Sui";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        let mut data = vec![ED25519_SCHEME];
        data.extend_from_slice(&ed25519_key(public_key)?);
        Ok(format!("{}{}", params.prefix_or("0x"), hex::encode(&blake2b_256(&data))))
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        decode_hex(address, params.prefix_or("0x"), 32)
    }
}

/// Near implicit account: the key in hex.
pub struct Near;

impl Address for Near {
    const NAME: &'static str = "Near";

    fn encode(public_key: &[u8], _params: &AddressParams) -> Result<String, WalletError> {
        Ok(hex::encode(&ed25519_key(public_key)?))
    }

    fn decode(address: &str, _params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        let key = decode_hex(address, "", 32)?;
        Ed25519PublicKey::from_bytes(&key)?;
        Ok(key)
    }
}

/// IOTA ed25519 address (type `0x00`).
pub struct Iota;

impl Address for Iota {
    const NAME: &'static str = "Iota";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        let mut data = vec![ED25519_SCHEME];
        data.extend_from_slice(&blake2b_256(&ed25519_key(public_key)?));
        bech32::encode(params.hrp_or("iota"), &data)
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        let data = decode_bech32(address, params.hrp_or("iota"), 33)?;
        check_version(&[ED25519_SCHEME], &data[..1])?;
        Ok(data[1..].to_vec())
    }
}

/// `MultiversX` (`erd`) address: Bech32 of the key.
pub struct MultiversX;

impl Address for MultiversX {
    const NAME: &'static str = "MultiversX";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        bech32::encode(params.hrp_or("erd"), &ed25519_key(public_key)?)
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        let key = decode_bech32(address, params.hrp_or("erd"), 32)?;
        Ed25519PublicKey::from_bytes(&key)?;
        Ok(key)
    }
}

/// ICON EOA address.
pub struct Icon;

impl Address for Icon {
    const NAME: &'static str = "Icon";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        let uncompressed = secp256k1_key(public_key)?.raw_uncompressed();
        let digest = sha3_256(&uncompressed[1..]);
        Ok(format!("{}{}", params.prefix_or("hx"), hex::encode(&digest[12..])))
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        decode_hex(address, params.prefix_or("hx"), 20)
    }
}

/// Zilliqa Bech32 address.
pub struct Zilliqa;

impl Address for Zilliqa {
    const NAME: &'static str = "Zilliqa";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        let digest = sha256(&secp256k1_key(public_key)?.raw_compressed());
        bech32::encode(params.hrp_or("zil"), &digest[12..])
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        decode_bech32(address, params.hrp_or("zil"), 20)
    }
}
