//! Algorand addresses: unpadded Base32 of `key ‖ SHA-512/256(key)[28..]`.

use super::{check_checksum, check_length, ed25519_key, Address, AddressParams};
use crate::crypto::sha512_256;
use crate::ecc::{EccPublicKey, Ed25519PublicKey};
use crate::encoding::base32;
use crate::error::WalletError;

fn checksum(key: &[u8]) -> [u8; 4] {
    let digest = sha512_256(key);
    [digest[28], digest[29], digest[30], digest[31]]
}

/// Algorand codec.
pub struct Algorand;

impl Address for Algorand {
    const NAME: &'static str = "Algorand";

    fn encode(public_key: &[u8], _params: &AddressParams) -> Result<String, WalletError> {
        let key = ed25519_key(public_key)?;
        let mut payload = key.to_vec();
        payload.extend_from_slice(&checksum(&key));
        base32::encode(&payload, None)
    }

    fn decode(address: &str, _params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        let raw = base32::decode(address, None).map_err(|e| WalletError::Address(e.detail().clone()))?;
        check_length(&raw, 36)?;
        let (key, got) = raw.split_at(32);
        check_checksum(&checksum(key), got)?;
        Ed25519PublicKey::from_bytes(key)?;
        Ok(key.to_vec())
    }
}
