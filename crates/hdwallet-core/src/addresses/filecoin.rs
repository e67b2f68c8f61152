//! Filecoin secp256k1 accounts (protocol 1): `f1` + lowercase Base32 of
//! `Blake2b-160(uncompressed) ‖ Blake2b-32(0x01 ‖ hash)`.

use super::{check_checksum, check_length, secp256k1_key, strip_prefix, Address, AddressParams};
use crate::crypto::{blake2b_160, blake2b_32};
use crate::ecc::EccPublicKey;
use crate::encoding::base32::{self, LOWERCASE_ALPHABET};
use crate::error::WalletError;

const SECP256K1_PROTOCOL: u8 = 1;

fn checksum(hash: &[u8]) -> [u8; 4] {
    let mut data = Vec::with_capacity(21);
    data.push(SECP256K1_PROTOCOL);
    data.extend_from_slice(hash);
    blake2b_32(&data)
}

/// Filecoin codec; the network prefix defaults to `f`.
pub struct Filecoin;

impl Address for Filecoin {
    const NAME: &'static str = "Filecoin";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        let hash = blake2b_160(&secp256k1_key(public_key)?.raw_uncompressed());
        let mut payload = hash.to_vec();
        payload.extend_from_slice(&checksum(&hash));
        let body = base32::encode(&payload, Some(LOWERCASE_ALPHABET))?;
        Ok(format!("{}{SECP256K1_PROTOCOL}{body}", params.prefix_or("f")))
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        let prefix = format!("{}{SECP256K1_PROTOCOL}", params.prefix_or("f"));
        let body = strip_prefix(address, &prefix)?;
        let raw = base32::decode(body, Some(LOWERCASE_ALPHABET))
            .map_err(|e| WalletError::Address(e.detail().clone()))?;
        check_length(&raw, 24)?;
        let (hash, got) = raw.split_at(20);
        check_checksum(&checksum(hash), got)?;
        Ok(hash.to_vec())
    }
}
