//! Cosmos SDK addresses: Bech32 over `HASH160(compressed pub)`. Avalanche
//! X- and P-chain addresses are the same payload under `avax` behind a
//! chain prefix.

use super::{check_length, secp256k1_key, strip_prefix, Address, AddressParams};
use crate::crypto::hash160;
use crate::ecc::EccPublicKey;
use crate::encoding::bech32;
use crate::error::WalletError;

fn encode_hash(public_key: &[u8], hrp: &str) -> Result<String, WalletError> {
    let compressed = secp256k1_key(public_key)?.raw_compressed();
    bech32::encode(hrp, &hash160(&compressed))
}

fn decode_hash(address: &str, hrp: &str) -> Result<Vec<u8>, WalletError> {
    let hash = bech32::decode(hrp, address)?;
    check_length(&hash, 20)?;
    Ok(hash)
}

/// Bech32 under the chain's HRP, `cosmos` by default.
pub struct Cosmos;

impl Address for Cosmos {
    const NAME: &'static str = "Cosmos";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        encode_hash(public_key, params.hrp_or("cosmos"))
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        decode_hash(address, params.hrp_or("cosmos"))
    }
}

/// `X-avax1…` or `P-avax1…`; the chain prefix defaults to `X-`.
pub struct Avalanche;

impl Address for Avalanche {
    const NAME: &'static str = "Avalanche";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        let body = encode_hash(public_key, params.hrp_or("avax"))?;
        Ok(format!("{}{body}", params.prefix_or("X-")))
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        let body = strip_prefix(address, params.prefix_or("X-"))?;
        decode_hash(body, params.hrp_or("avax"))
    }
}
