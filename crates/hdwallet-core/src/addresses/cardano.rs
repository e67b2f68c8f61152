//! Cardano addresses.
//!
//! Byron addresses are Base58 of the CBOR pair
//! `[tag24(payload), crc32(payload)]`, where the payload is
//! `[root, attributes, 0]` and the root is
//! `Blake2b-224(SHA3-256(cbor([0, [0, key ‖ chain_code], attributes])))`.
//! Attribute `1` holds the Byron-Legacy encrypted derivation path and
//! attribute `2` the protocol magic outside mainnet.
//!
//! Shelley addresses are Bech32 of a header byte
//! `(address_type << 4) | network` followed by Blake2b-224 key hashes.

use super::{check_checksum, check_length, check_version, ed25519_key, Address, AddressParams, Network};
use crate::crypto::aead::{self, NONCE_LEN};
use crate::crypto::checksum::crc32;
use crate::crypto::{blake2b_224, sha3_256};
use crate::derivation::DerivationPath;
use crate::ecc::ChainCode;
use crate::encoding::base58::{self, Alphabet};
use crate::encoding::bech32;
use crate::encoding::cbor::{self, Value};
use crate::error::{ErrorDetail, WalletError};

/// Nonce sealing Byron-Legacy derivation paths.
pub const PATH_NONCE: &[u8; NONCE_LEN] = b"serokellfore";

const CBOR_IN_CBOR: u64 = 24;
const ATTRIBUTE_PATH: u64 = 1;
const ATTRIBUTE_MAGIC: u64 = 2;
const PUBLIC_KEY_ADDRESS: u64 = 0;

const SHELLEY_BASE: u8 = 0x00;
const SHELLEY_ENTERPRISE: u8 = 0x06;
const SHELLEY_REWARD: u8 = 0x0e;

// ---------------------------------------------------------------------------
// Byron
// ---------------------------------------------------------------------------

fn malformed(message: &str) -> WalletError {
    WalletError::Address(ErrorDetail::msg(format!("malformed Byron address: {message}")))
}

fn required<'a, T>(value: Option<&'a T>, what: &str) -> Result<&'a T, WalletError> {
    value.ok_or_else(|| WalletError::Address(ErrorDetail::msg(format!("Byron addresses need the {what}"))))
}

fn byron_encode(public_key: &[u8], chain_code: &ChainCode, attributes: Vec<(Value, Value)>) -> Result<String, WalletError> {
    let mut extended = ed25519_key(public_key)?.to_vec();
    extended.extend_from_slice(chain_code);
    let attributes = Value::Map(attributes);
    let spending = Value::Array(vec![
        Value::Unsigned(PUBLIC_KEY_ADDRESS),
        Value::Array(vec![Value::Unsigned(0), Value::Bytes(extended)]),
        attributes.clone(),
    ]);
    let root = blake2b_224(&sha3_256(&cbor::encode(&spending)));
    let payload = cbor::encode(&Value::Array(vec![
        Value::Bytes(root.to_vec()),
        attributes,
        Value::Unsigned(PUBLIC_KEY_ADDRESS),
    ]));
    let checksum = crc32(&payload);
    let address = cbor::encode(&Value::Array(vec![
        Value::Tag(CBOR_IN_CBOR, Box::new(Value::Bytes(payload))),
        Value::Unsigned(u64::from(checksum)),
    ]));
    Ok(base58::encode(&address, Alphabet::Bitcoin))
}

/// Unwrap the outer CBOR, verify the CRC and return the inner payload.
fn byron_payload(address: &str) -> Result<Value, WalletError> {
    let raw = base58::decode(address, Alphabet::Bitcoin).map_err(|e| WalletError::Address(e.detail().clone()))?;
    let outer = cbor::decode(&raw).map_err(|e| WalletError::Address(e.detail().clone()))?;
    let items = outer.as_array().ok_or_else(|| malformed("not an array"))?;
    let [tagged, checksum] = items else {
        return Err(WalletError::Address(ErrorDetail::mismatch(
            "invalid Byron address length",
            2,
            items.len(),
        )));
    };
    let payload = match tagged {
        Value::Tag(CBOR_IN_CBOR, inner) => inner.as_bytes().ok_or_else(|| malformed("tag 24 without bytes"))?,
        _ => return Err(malformed("missing tag 24")),
    };
    let checksum = checksum.as_unsigned().ok_or_else(|| malformed("checksum is not an integer"))?;
    check_checksum(
        &u64::from(crc32(payload)).to_be_bytes(),
        &checksum.to_be_bytes(),
    )?;
    let inner = cbor::decode(payload).map_err(|e| WalletError::Address(e.detail().clone()))?;
    let fields = inner.as_array().ok_or_else(|| malformed("payload is not an array"))?;
    check_length_items(fields, 3)?;
    let kind = fields[2].as_unsigned().ok_or_else(|| malformed("address type is not an integer"))?;
    if kind != PUBLIC_KEY_ADDRESS {
        return Err(WalletError::Address(ErrorDetail::mismatch(
            "unsupported Byron address type",
            PUBLIC_KEY_ADDRESS,
            kind,
        )));
    }
    Ok(inner)
}

fn check_length_items(items: &[Value], expected: usize) -> Result<(), WalletError> {
    if items.len() == expected {
        Ok(())
    } else {
        Err(WalletError::Address(ErrorDetail::mismatch(
            "invalid Byron payload length",
            expected,
            items.len(),
        )))
    }
}

fn byron_root(payload: &Value) -> Result<Vec<u8>, WalletError> {
    let root = payload
        .as_array()
        .and_then(|fields| fields.first())
        .and_then(Value::as_bytes)
        .ok_or_else(|| malformed("missing address root"))?;
    check_length(root, 28)?;
    Ok(root.to_vec())
}

fn byron_attributes(payload: &Value) -> Option<&Value> {
    payload.as_array().and_then(|fields| fields.get(1))
}

fn magic_attribute(magic: Option<u32>) -> Vec<(Value, Value)> {
    magic
        .map(|magic| {
            vec![(
                Value::Unsigned(ATTRIBUTE_MAGIC),
                Value::Bytes(cbor::encode(&Value::Unsigned(u64::from(magic)))),
            )]
        })
        .unwrap_or_default()
}

fn check_magic(payload: &Value, expected: Option<u32>) -> Result<(), WalletError> {
    let got = byron_attributes(payload)
        .and_then(|attributes| attributes.map_get(ATTRIBUTE_MAGIC))
        .and_then(Value::as_bytes)
        .map(cbor::decode)
        .transpose()?
        .and_then(|value| value.as_unsigned());
    if got == expected.map(u64::from) {
        Ok(())
    } else {
        let show = |magic: Option<u64>| magic.map_or_else(|| "mainnet".to_owned(), |m| m.to_string());
        Err(WalletError::Network(ErrorDetail::mismatch(
            "invalid protocol magic",
            show(expected.map(u64::from)),
            show(got),
        )))
    }
}

/// Seal a derivation path for attribute `1`.
///
/// # Errors
///
/// Returns `WalletError::Derivation` for paths with ranges and
/// `WalletError::Hd` if the key is not 32 bytes.
pub fn encrypt_derivation_path(path: &DerivationPath, path_key: &[u8]) -> Result<Vec<u8>, WalletError> {
    let indexes = path
        .indexes()?
        .into_iter()
        .map(|index| Value::Unsigned(u64::from(index)))
        .collect();
    aead::seal(path_key, PATH_NONCE, &cbor::encode(&Value::IndefiniteArray(indexes)))
}

/// Recover the derivation path stored in a Byron-Legacy address.
///
/// # Errors
///
/// Returns `WalletError::Address` if the address is malformed or carries no
/// path, and `WalletError::Checksum` if the key does not open it.
pub fn decrypt_derivation_path(address: &str, path_key: &[u8]) -> Result<DerivationPath, WalletError> {
    let payload = byron_payload(address)?;
    let sealed = byron_attributes(&payload)
        .and_then(|attributes| attributes.map_get(ATTRIBUTE_PATH))
        .and_then(Value::as_bytes)
        .ok_or_else(|| malformed("no derivation path attribute"))?;
    let sealed = cbor::decode(sealed)?;
    let sealed = sealed.as_bytes().ok_or_else(|| malformed("path attribute is not bytes"))?;
    let plain = aead::open(path_key, PATH_NONCE, sealed)?;
    let indexes = cbor::decode(&plain)?
        .as_array()
        .ok_or_else(|| malformed("path is not an array"))?
        .iter()
        .map(|index| {
            index
                .as_unsigned()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| malformed("path index out of range"))
        })
        .collect::<Result<Vec<u32>, WalletError>>()?;
    Ok(DerivationPath::from_indexes(&indexes))
}

/// Byron address of an Icarus-style wallet: no path attribute.
pub struct ByronIcarus;

impl Address for ByronIcarus {
    const NAME: &'static str = "Cardano-Byron-Icarus";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        let chain_code = required(params.chain_code.as_ref(), "chain code")?;
        byron_encode(public_key, chain_code, magic_attribute(params.protocol_magic))
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        let payload = byron_payload(address)?;
        check_magic(&payload, params.protocol_magic)?;
        byron_root(&payload)
    }
}

/// Byron address of a Daedalus legacy wallet, carrying the encrypted path.
pub struct ByronLegacy;

impl Address for ByronLegacy {
    const NAME: &'static str = "Cardano-Byron-Legacy";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        let chain_code = required(params.chain_code.as_ref(), "chain code")?;
        let path = required(params.path.as_ref(), "derivation path")?;
        let path_key = required(params.path_key.as_ref(), "path key")?;
        let sealed = encrypt_derivation_path(path, path_key)?;
        let mut attributes = vec![(
            Value::Unsigned(ATTRIBUTE_PATH),
            Value::Bytes(cbor::encode(&Value::Bytes(sealed))),
        )];
        attributes.extend(magic_attribute(params.protocol_magic));
        byron_encode(public_key, chain_code, attributes)
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        let payload = byron_payload(address)?;
        let has_path = byron_attributes(&payload)
            .and_then(|attributes| attributes.map_get(ATTRIBUTE_PATH))
            .is_some();
        if !has_path {
            return Err(malformed("no derivation path attribute"));
        }
        check_magic(&payload, params.protocol_magic)?;
        byron_root(&payload)
    }
}

// ---------------------------------------------------------------------------
// Shelley
// ---------------------------------------------------------------------------

fn network_tag(network: Network) -> Result<u8, WalletError> {
    match network {
        Network::Mainnet => Ok(1),
        Network::Testnet => Ok(0),
        Network::Stagenet => Err(WalletError::Network(ErrorDetail::mismatch(
            "unsupported Cardano network",
            "mainnet, testnet",
            network,
        ))),
    }
}

fn shelley_hrp<'a>(params: &'a AddressParams, base: &'a str, test: &'a str) -> &'a str {
    params.hrp_or(if params.network == Network::Testnet { test } else { base })
}

fn key_hash(public_key: &[u8]) -> Result<[u8; 28], WalletError> {
    Ok(blake2b_224(&ed25519_key(public_key)?))
}

fn shelley_encode(kind: u8, hashes: &[[u8; 28]], hrp: &str, network: Network) -> Result<String, WalletError> {
    let mut data = vec![(kind << 4) | network_tag(network)?];
    for hash in hashes {
        data.extend_from_slice(hash);
    }
    bech32::encode(hrp, &data)
}

fn shelley_decode(address: &str, kind: u8, hashes: usize, hrp: &str, network: Network) -> Result<Vec<u8>, WalletError> {
    let data = bech32::decode(hrp, address)?;
    check_length(&data, 1 + 28 * hashes)?;
    check_version(&[(kind << 4) | network_tag(network)?], &data[..1])?;
    Ok(data[1..].to_vec())
}

/// Base address: payment key hash and staking key hash.
pub struct Shelley;

impl Address for Shelley {
    const NAME: &'static str = "Cardano-Shelley";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        let staking = params
            .staking_public_key
            .as_deref()
            .ok_or_else(|| WalletError::Address("Shelley base addresses need the staking public key".into()))?;
        shelley_encode(
            SHELLEY_BASE,
            &[key_hash(public_key)?, key_hash(staking)?],
            shelley_hrp(params, "addr", "addr_test"),
            params.network,
        )
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        shelley_decode(address, SHELLEY_BASE, 2, shelley_hrp(params, "addr", "addr_test"), params.network)
    }
}

/// Enterprise address: payment key hash only.
pub struct ShelleyEnterprise;

impl Address for ShelleyEnterprise {
    const NAME: &'static str = "Cardano-Shelley-Enterprise";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        shelley_encode(
            SHELLEY_ENTERPRISE,
            &[key_hash(public_key)?],
            shelley_hrp(params, "addr", "addr_test"),
            params.network,
        )
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        shelley_decode(address, SHELLEY_ENTERPRISE, 1, shelley_hrp(params, "addr", "addr_test"), params.network)
    }
}

/// Reward address of a staking key.
pub struct ShelleyReward;

impl Address for ShelleyReward {
    const NAME: &'static str = "Cardano-Shelley-Reward";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        shelley_encode(
            SHELLEY_REWARD,
            &[key_hash(public_key)?],
            shelley_hrp(params, "stake", "stake_test"),
            params.network,
        )
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        shelley_decode(address, SHELLEY_REWARD, 1, shelley_hrp(params, "stake", "stake_test"), params.network)
    }
}
