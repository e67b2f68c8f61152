//! Bitcoin script addresses: legacy Base58Check (P2PKH, P2SH and their
//! nested SegWit forms), native SegWit v0 and Taproot. Ripple reuses P2PKH
//! under its own Base58 alphabet.

use super::{check_length, check_version, secp256k1_key, Address, AddressParams};
use crate::crypto::{hash160, sha256, tagged_hash};
use crate::ecc::weierstrass::secp256k1::{scalar_from_bytes, Point};
use crate::ecc::{EccPoint, EccPublicKey};
use crate::encoding::base58::{self, Alphabet};
use crate::encoding::{bech32, prefix_bytes};
use crate::error::{ErrorDetail, WalletError};
use crate::keys::PublicKeyType;

const DEFAULT_HRP: &str = "bc";

const OP_DUP: u8 = 0x76;
const OP_HASH160: u8 = 0xa9;
const OP_EQUALVERIFY: u8 = 0x88;
const OP_CHECKSIG: u8 = 0xac;
const OP_1: u8 = 0x51;
const OP_CHECKMULTISIG: u8 = 0xae;

fn key_bytes(public_key: &[u8], kind: PublicKeyType) -> Result<Vec<u8>, WalletError> {
    let key = secp256k1_key(public_key)?;
    Ok(match kind {
        PublicKeyType::Compressed => key.raw_compressed(),
        PublicKeyType::Uncompressed => key.raw_uncompressed(),
    })
}

fn compressed(public_key: &[u8]) -> Result<Vec<u8>, WalletError> {
    key_bytes(public_key, PublicKeyType::Compressed)
}

fn versioned_encode(version: u32, hash: &[u8], alphabet: Alphabet) -> String {
    let mut payload = prefix_bytes(version);
    payload.extend_from_slice(hash);
    base58::check_encode(&payload, alphabet)
}

/// Base58Check decode, then check the version bytes and a 20-byte hash.
fn versioned_decode(address: &str, version: u32, alphabet: Alphabet) -> Result<Vec<u8>, WalletError> {
    let payload = base58::check_decode(address, alphabet)?;
    let version = prefix_bytes(version);
    check_length(&payload, version.len() + 20)?;
    let (got, hash) = payload.split_at(version.len());
    check_version(&version, got)?;
    Ok(hash.to_vec())
}

/// `OP_DUP OP_HASH160 <20> hash OP_EQUALVERIFY OP_CHECKSIG`.
fn p2pkh_script(hash: &[u8; 20]) -> Vec<u8> {
    let mut script = vec![OP_DUP, OP_HASH160, 0x14];
    script.extend_from_slice(hash);
    script.extend_from_slice(&[OP_EQUALVERIFY, OP_CHECKSIG]);
    script
}

/// 1-of-1 multisig witness script.
fn p2wsh_script(compressed: &[u8]) -> Vec<u8> {
    let mut script = vec![OP_1, 0x21];
    script.extend_from_slice(compressed);
    script.extend_from_slice(&[OP_1, OP_CHECKMULTISIG]);
    script
}

/// Witness program: version `0x00` and a pushed 20- or 32-byte hash.
fn witness_redeem_script<const N: usize>(program: &[u8; N]) -> Vec<u8> {
    let mut script = Vec::with_capacity(N + 2);
    script.push(0x00);
    script.push(if N == 20 { 0x14 } else { 0x20 });
    script.extend_from_slice(program);
    script
}

fn segwit_decode(address: &str, hrp: &str, version: u8, length: usize) -> Result<Vec<u8>, WalletError> {
    let (got, program) = bech32::segwit_decode(hrp, address)?;
    check_length(&program, length)?;
    if got != version {
        return Err(WalletError::Address(ErrorDetail::mismatch(
            "invalid witness version",
            version,
            got,
        )));
    }
    Ok(program)
}

// ---------------------------------------------------------------------------
// Legacy
// ---------------------------------------------------------------------------

/// `Base58Check(version ‖ HASH160(pub))`.
pub struct P2pkh;

impl Address for P2pkh {
    const NAME: &'static str = "P2PKH";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        let key = key_bytes(public_key, params.public_key_type)?;
        Ok(versioned_encode(params.public_key_address_prefix, &hash160(&key), params.alphabet))
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        versioned_decode(address, params.public_key_address_prefix, params.alphabet)
    }
}

/// `Base58Check(version ‖ HASH160(p2pkh_script))`.
pub struct P2sh;

impl Address for P2sh {
    const NAME: &'static str = "P2SH";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        let key = key_bytes(public_key, params.public_key_type)?;
        let script = p2pkh_script(&hash160(&key));
        Ok(versioned_encode(params.script_address_prefix, &hash160(&script), params.alphabet))
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        versioned_decode(address, params.script_address_prefix, params.alphabet)
    }
}

/// P2PKH over the Ripple alphabet.
pub struct Ripple;

impl Address for Ripple {
    const NAME: &'static str = "Ripple";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        let key = key_bytes(public_key, params.public_key_type)?;
        Ok(versioned_encode(params.public_key_address_prefix, &hash160(&key), Alphabet::Ripple))
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        versioned_decode(address, params.public_key_address_prefix, Alphabet::Ripple)
    }
}

// ---------------------------------------------------------------------------
// SegWit
// ---------------------------------------------------------------------------

/// Witness v0 key hash.
pub struct P2wpkh;

impl Address for P2wpkh {
    const NAME: &'static str = "P2WPKH";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        let program = hash160(&compressed(public_key)?);
        bech32::segwit_encode(params.hrp_or(DEFAULT_HRP), 0, &program)
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        segwit_decode(address, params.hrp_or(DEFAULT_HRP), 0, 20)
    }
}

/// P2WPKH redeem script behind a P2SH address.
pub struct P2wpkhInP2sh;

impl Address for P2wpkhInP2sh {
    const NAME: &'static str = "P2WPKH-In-P2SH";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        let redeem = witness_redeem_script(&hash160(&compressed(public_key)?));
        Ok(versioned_encode(params.script_address_prefix, &hash160(&redeem), params.alphabet))
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        versioned_decode(address, params.script_address_prefix, params.alphabet)
    }
}

/// Witness v0 script hash of a 1-of-1 multisig script.
pub struct P2wsh;

impl Address for P2wsh {
    const NAME: &'static str = "P2WSH";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        let program = sha256(&p2wsh_script(&compressed(public_key)?));
        bech32::segwit_encode(params.hrp_or(DEFAULT_HRP), 0, &program)
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        segwit_decode(address, params.hrp_or(DEFAULT_HRP), 0, 32)
    }
}

/// P2WSH redeem script behind a P2SH address.
pub struct P2wshInP2sh;

impl Address for P2wshInP2sh {
    const NAME: &'static str = "P2WSH-In-P2SH";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        let program = sha256(&p2wsh_script(&compressed(public_key)?));
        let redeem = witness_redeem_script(&program);
        Ok(versioned_encode(params.script_address_prefix, &hash160(&redeem), params.alphabet))
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        versioned_decode(address, params.script_address_prefix, params.alphabet)
    }
}

// ---------------------------------------------------------------------------
// Taproot
// ---------------------------------------------------------------------------

/// The point with x-coordinate `x` and even y.
fn lift_x(x: &[u8]) -> Result<Point, WalletError> {
    let mut encoded = Vec::with_capacity(33);
    encoded.push(0x02);
    encoded.extend_from_slice(x);
    Point::from_bytes(&encoded).map_err(|_| WalletError::PublicKey("x-only key is not on the curve".into()))
}

/// BIP341 output key `P + H_TapTweak(x(P))·G` with no script tree.
fn taproot_output_key(public_key: &[u8]) -> Result<Vec<u8>, WalletError> {
    let key = compressed(public_key)?;
    let x = &key[1..];
    let internal = lift_x(x)?;
    let tweak = scalar_from_bytes(&tagged_hash("TapTweak", x))
        .ok_or_else(|| WalletError::PublicKey("taproot tweak exceeds the curve order".into()))?;
    let output = Point::generator().mul_scalar(&tweak).add_point(&internal);
    if output.is_identity() {
        return Err(WalletError::PublicKey("taproot output key is the identity".into()));
    }
    Ok(output.raw_encoded()[1..].to_vec())
}

/// Witness v1 (Bech32m) tweaked x-only key.
pub struct P2tr;

impl Address for P2tr {
    const NAME: &'static str = "P2TR";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        bech32::segwit_encode(params.hrp_or(DEFAULT_HRP), 1, &taproot_output_key(public_key)?)
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        let program = segwit_decode(address, params.hrp_or(DEFAULT_HRP), 1, 32)?;
        lift_x(&program)?;
        Ok(program)
    }
}
