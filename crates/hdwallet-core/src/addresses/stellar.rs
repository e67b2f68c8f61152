//! Stellar account ids (`G…`): Base32 of `version ‖ key ‖ CRC16-XMODEM`,
//! checksum little-endian.

use super::{check_checksum, check_length, check_version, ed25519_key, Address, AddressParams};
use crate::crypto::checksum::crc16_xmodem;
use crate::ecc::{EccPublicKey, Ed25519PublicKey};
use crate::encoding::base32;
use crate::error::WalletError;

/// Version byte of public-key account ids (`6 << 3`).
pub const ACCOUNT_ID_VERSION: u8 = 6 << 3;

fn with_checksum(payload: &[u8]) -> Vec<u8> {
    let mut out = payload.to_vec();
    out.extend_from_slice(&crc16_xmodem(payload).to_le_bytes());
    out
}

/// Stellar account id codec.
pub struct Stellar;

impl Address for Stellar {
    const NAME: &'static str = "Stellar";

    fn encode(public_key: &[u8], _params: &AddressParams) -> Result<String, WalletError> {
        let mut payload = vec![ACCOUNT_ID_VERSION];
        payload.extend_from_slice(&ed25519_key(public_key)?);
        base32::encode(&with_checksum(&payload), None)
    }

    fn decode(address: &str, _params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        let raw = base32::decode(address, None).map_err(|e| WalletError::Address(e.detail().clone()))?;
        check_length(&raw, 35)?;
        let (payload, checksum) = raw.split_at(33);
        check_checksum(&crc16_xmodem(payload).to_le_bytes(), checksum)?;
        check_version(&[ACCOUNT_ID_VERSION], &payload[..1])?;
        Ed25519PublicKey::from_bytes(&payload[1..])?;
        Ok(payload[1..].to_vec())
    }
}
