//! Tezos implicit accounts: `Base58Check(prefix ‖ Blake2b-160(key))`.
//!
//! | Prefix | Curve | Key hashed |
//! |--------|-------|------------|
//! | `tz1` | ed25519 | 32-byte key |
//! | `tz2` | secp256k1 | compressed key |
//! | `tz3` | P-256 | compressed key |

use super::{check_length, check_version, ed25519_key, secp256k1_key, Address, AddressParams};
use crate::crypto::blake2b_160;
use crate::ecc::weierstrass::nist256p1;
use crate::ecc::EccPublicKey;
use crate::encoding::base58::{self, Alphabet};
use crate::error::{ErrorDetail, WalletError};

const TZ1: [u8; 3] = [6, 161, 159];
const TZ2: [u8; 3] = [6, 161, 161];
const TZ3: [u8; 3] = [6, 161, 164];

fn version(prefix: &str) -> Result<[u8; 3], WalletError> {
    match prefix {
        "tz1" => Ok(TZ1),
        "tz2" => Ok(TZ2),
        "tz3" => Ok(TZ3),
        other => Err(WalletError::Address(ErrorDetail::mismatch(
            "unknown Tezos prefix",
            "tz1, tz2, tz3",
            other,
        ))),
    }
}

/// Tezos codec; the prefix parameter selects the curve (default `tz1`).
pub struct Tezos;

impl Address for Tezos {
    const NAME: &'static str = "Tezos";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        let prefix = params.prefix_or("tz1");
        let version = version(prefix)?;
        let key = match prefix {
            "tz2" => secp256k1_key(public_key)?.raw_compressed(),
            "tz3" => nist256p1::PublicKey::from_bytes(public_key)?.raw_compressed(),
            _ => ed25519_key(public_key)?.to_vec(),
        };
        let mut payload = version.to_vec();
        payload.extend_from_slice(&blake2b_160(&key));
        Ok(base58::check_encode(&payload, Alphabet::Bitcoin))
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        let version = version(params.prefix_or("tz1"))?;
        let payload = base58::check_decode(address, Alphabet::Bitcoin)?;
        check_length(&payload, 23)?;
        check_version(&version, &payload[..3])?;
        Ok(payload[3..].to_vec())
    }
}
