//! Nano accounts: `nano_` + 52 symbols of key + 8 symbols of the reversed
//! Blake2b-40 checksum, in Nano's Base32 alphabet.

use super::{check_checksum, ed25519_key, strip_prefix, Address, AddressParams};
use crate::crypto::blake2b_40;
use crate::ecc::{EccPublicKey, Ed25519PublicKey};
use crate::encoding::base32::{self, NANO_ALPHABET};
use crate::error::{ErrorDetail, WalletError};

const KEY_SYMBOLS: usize = 52;
const CHECKSUM_SYMBOLS: usize = 8;

fn checksum(key: &[u8]) -> [u8; 5] {
    let mut digest = blake2b_40(key);
    digest.reverse();
    digest
}

/// Nano codec.
pub struct Nano;

impl Address for Nano {
    const NAME: &'static str = "Nano";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        let key = ed25519_key(public_key)?;
        // 3 zero bytes make 280 bits; the first 4 symbols carry only padding
        let mut padded = vec![0u8; 3];
        padded.extend_from_slice(&key);
        let body = base32::encode(&padded, Some(NANO_ALPHABET))?;
        let check = base32::encode(&checksum(&key), Some(NANO_ALPHABET))?;
        Ok(format!("{}{}{check}", params.prefix_or("nano_"), &body[4..]))
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        let body = strip_prefix(address, params.prefix_or("nano_"))?;
        if body.len() != KEY_SYMBOLS + CHECKSUM_SYMBOLS || !body.is_ascii() {
            return Err(WalletError::Address(ErrorDetail::mismatch(
                "invalid address length",
                KEY_SYMBOLS + CHECKSUM_SYMBOLS,
                body.len(),
            )));
        }
        let (key_part, check_part) = body.split_at(KEY_SYMBOLS);
        let padded = base32::decode(&format!("1111{key_part}"), Some(NANO_ALPHABET))
            .map_err(|e| WalletError::Address(e.detail().clone()))?;
        if padded[..3] != [0, 0, 0] {
            return Err(WalletError::Address("invalid padding bits".into()));
        }
        let key = &padded[3..];
        let got = base32::decode(check_part, Some(NANO_ALPHABET))
            .map_err(|e| WalletError::Address(e.detail().clone()))?;
        check_checksum(&checksum(key), &got)?;
        Ed25519PublicKey::from_bytes(key)?;
        Ok(key.to_vec())
    }
}
