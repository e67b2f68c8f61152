//! NEO legacy addresses: the verification script `PUSH33 key CHECKSIG`
//! hashed with HASH160 under version `0x17`.

use super::{check_length, check_version, secp256k1_key, Address, AddressParams};
use crate::crypto::hash160;
use crate::ecc::weierstrass::nist256p1;
use crate::ecc::EccPublicKey;
use crate::encoding::base58::{self, Alphabet};
use crate::error::WalletError;

/// Address version byte.
pub const VERSION: u8 = 0x17;

const PUSH_BYTES_33: u8 = 0x21;
const CHECKSIG: u8 = 0xac;

/// Compressed key of either curve NEO wallets use.
fn compressed(public_key: &[u8]) -> Result<Vec<u8>, WalletError> {
    nist256p1::PublicKey::from_bytes(public_key)
        .map(|key| key.raw_compressed())
        .or_else(|_| secp256k1_key(public_key).map(|key| key.raw_compressed()))
}

/// NEO codec.
pub struct Neo;

impl Address for Neo {
    const NAME: &'static str = "Neo";

    fn encode(public_key: &[u8], _params: &AddressParams) -> Result<String, WalletError> {
        let mut script = vec![PUSH_BYTES_33];
        script.extend_from_slice(&compressed(public_key)?);
        script.push(CHECKSIG);
        let mut payload = vec![VERSION];
        payload.extend_from_slice(&hash160(&script));
        Ok(base58::check_encode(&payload, Alphabet::Bitcoin))
    }

    fn decode(address: &str, _params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        let payload = base58::check_decode(address, Alphabet::Bitcoin)?;
        check_length(&payload, 21)?;
        check_version(&[VERSION], &payload[..1])?;
        Ok(payload[1..].to_vec())
    }
}
