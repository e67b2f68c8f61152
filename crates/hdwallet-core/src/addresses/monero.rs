//! Monero addresses: Monero Base58 of
//! `network ‖ spend ‖ view [‖ payment_id] ‖ Keccak-256(…)[..4]`.
//!
//! The network byte tells standard, integrated and sub-addresses apart;
//! see [`MoneroNetwork`] for the table.

use super::{check_checksum, check_length, check_version, ed25519_key, Address, AddressParams, Network};
use crate::crypto::keccak256;
use crate::ecc::{EccPublicKey, Ed25519PublicKey};
use crate::encoding::base58_monero;
use crate::error::{ErrorDetail, WalletError};
use crate::hd::MoneroNetwork;

impl From<Network> for MoneroNetwork {
    fn from(network: Network) -> Self {
        match network {
            Network::Mainnet => Self::Mainnet,
            Network::Testnet => Self::Testnet,
            Network::Stagenet => Self::Stagenet,
        }
    }
}

/// Encode raw keys under a network byte.
#[must_use]
pub fn encode_keys(network_byte: u8, spend: &[u8], view: &[u8], payment_id: Option<&[u8; 8]>) -> String {
    let mut payload = Vec::with_capacity(77);
    payload.push(network_byte);
    payload.extend_from_slice(spend);
    payload.extend_from_slice(view);
    if let Some(id) = payment_id {
        payload.extend_from_slice(id);
    }
    let checksum = keccak256(&payload);
    payload.extend_from_slice(&checksum[..4]);
    base58_monero::encode(&payload)
}

/// Network byte the parameters select.
fn network_byte(params: &AddressParams) -> u8 {
    let network = MoneroNetwork::from(params.network);
    if params.payment_id.is_some() {
        network.integrated()
    } else if params.sub_address {
        network.sub_address()
    } else {
        network.standard()
    }
}

/// Monero codec. Encodes the spend key with `params.view_public_key`;
/// decoding returns `spend ‖ view`.
pub struct Monero;

impl Address for Monero {
    const NAME: &'static str = "Monero";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        let spend = ed25519_key(public_key)?;
        let view = params
            .view_public_key
            .as_deref()
            .ok_or_else(|| WalletError::Address("Monero addresses need the view public key".into()))?;
        let view = ed25519_key(view)?;
        Ok(encode_keys(network_byte(params), &spend, &view, params.payment_id.as_ref()))
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        let raw = base58_monero::decode(address).map_err(|e| WalletError::Address(e.detail().clone()))?;
        let expected = network_byte(params);
        check_version(&[expected], raw.get(..1).unwrap_or_default())?;
        let length = if params.payment_id.is_some() { 77 } else { 69 };
        check_length(&raw, length)?;
        let (payload, got) = raw.split_at(length - 4);
        check_checksum(&keccak256(payload)[..4], got)?;
        let keys = &payload[1..65];
        Ed25519PublicKey::from_bytes(&keys[..32])?;
        Ed25519PublicKey::from_bytes(&keys[32..])?;
        if let Some(id) = &params.payment_id {
            if &payload[65..] != id {
                return Err(WalletError::Address(ErrorDetail::mismatch(
                    "payment id mismatch",
                    crate::encoding::hex::encode(id),
                    crate::encoding::hex::encode(&payload[65..]),
                )));
            }
        }
        Ok(keys.to_vec())
    }
}
