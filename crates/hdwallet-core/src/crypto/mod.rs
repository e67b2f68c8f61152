//! Hash functions, MACs and key stretching.
//!
//! This module provides:
//! - SHA-2 family digests ([`sha256`], [`double_sha256`], [`sha512`], [`sha512_256`])
//! - Keccak family digests ([`keccak256`], [`sha3_256`])
//! - [`ripemd160`] and the Bitcoin [`hash160`] composition
//! - Blake2b at the output widths address codecs need
//! - [`hmac_sha256`], [`hmac_sha512`] and [`pbkdf2_sha512`]
//!
//! SHA-2, HMAC and PBKDF2 run on `ring`; the rest come from RustCrypto.

pub mod aead;
pub mod checksum;

use std::num::NonZeroU32;

use blake2::digest::consts::{U20, U28, U32, U4, U5};
use blake2::{Blake2b, Blake2b512, Digest};
use ring::{digest, hmac, pbkdf2};
use ripemd::Ripemd160;
use sha3::{Keccak256, Sha3_256};
use zeroize::Zeroizing;

fn to_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[..N]);
    out
}

// ---------------------------------------------------------------------------
// SHA-2
// ---------------------------------------------------------------------------

/// SHA-256 digest.
#[must_use]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    to_array(digest::digest(&digest::SHA256, data).as_ref())
}

/// `SHA-256(SHA-256(data))`, the Base58Check and Electrum sequence hash.
#[must_use]
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// SHA-512 digest.
#[must_use]
pub fn sha512(data: &[u8]) -> [u8; 64] {
    to_array(digest::digest(&digest::SHA512, data).as_ref())
}

/// SHA-512/256 digest (Algorand checksums).
#[must_use]
pub fn sha512_256(data: &[u8]) -> [u8; 32] {
    to_array(digest::digest(&digest::SHA512_256, data).as_ref())
}

/// BIP340 tagged hash: `SHA-256(SHA-256(tag) ‖ SHA-256(tag) ‖ data)`.
#[must_use]
pub fn tagged_hash(tag: &str, data: &[u8]) -> [u8; 32] {
    let tag_hash = sha256(tag.as_bytes());
    let mut ctx = digest::Context::new(&digest::SHA256);
    ctx.update(&tag_hash);
    ctx.update(&tag_hash);
    ctx.update(data);
    to_array(ctx.finish().as_ref())
}

// ---------------------------------------------------------------------------
// Keccak / SHA-3
// ---------------------------------------------------------------------------

/// Original Keccak-256 (Ethereum, Monero), not NIST SHA3-256.
#[must_use]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// NIST SHA3-256.
#[must_use]
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    Sha3_256::digest(data).into()
}

// ---------------------------------------------------------------------------
// RIPEMD-160
// ---------------------------------------------------------------------------

/// RIPEMD-160 digest.
#[must_use]
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// `RIPEMD-160(SHA-256(data))`: key fingerprints, P2PKH and P2SH payloads.
#[must_use]
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

// ---------------------------------------------------------------------------
// Blake2b
// ---------------------------------------------------------------------------

/// Blake2b with a 4-byte digest (Filecoin checksum).
#[must_use]
pub fn blake2b_32(data: &[u8]) -> [u8; 4] {
    to_array(&Blake2b::<U4>::digest(data))
}

/// Blake2b with a 5-byte digest (Nano checksum).
#[must_use]
pub fn blake2b_40(data: &[u8]) -> [u8; 5] {
    to_array(&Blake2b::<U5>::digest(data))
}

/// Blake2b-160 (Tezos, Filecoin payloads).
#[must_use]
pub fn blake2b_160(data: &[u8]) -> [u8; 20] {
    to_array(&Blake2b::<U20>::digest(data))
}

/// Blake2b-224 (Cardano key hashes).
#[must_use]
pub fn blake2b_224(data: &[u8]) -> [u8; 28] {
    to_array(&Blake2b::<U28>::digest(data))
}

/// Blake2b-256.
#[must_use]
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    to_array(&Blake2b::<U32>::digest(data))
}

/// Blake2b-512.
#[must_use]
pub fn blake2b_512(data: &[u8]) -> [u8; 64] {
    to_array(&Blake2b512::digest(data))
}

// ---------------------------------------------------------------------------
// HMAC / PBKDF2
// ---------------------------------------------------------------------------

/// HMAC-SHA-256.
#[must_use]
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; 32] {
    let key = hmac::Key::new(hmac::HMAC_SHA256, key);
    to_array(hmac::sign(&key, data).as_ref())
}

/// HMAC-SHA-512. The result is usually `IL ‖ IR` key material.
#[must_use]
pub fn hmac_sha512(key: &[u8], data: &[u8]) -> Zeroizing<[u8; 64]> {
    let key = hmac::Key::new(hmac::HMAC_SHA512, key);
    Zeroizing::new(to_array(hmac::sign(&key, data).as_ref()))
}

/// PBKDF2-HMAC-SHA-512 producing `length` bytes.
///
/// A zero iteration count is treated as one round.
#[must_use]
pub fn pbkdf2_sha512(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    length: usize,
) -> Zeroizing<Vec<u8>> {
    let rounds = NonZeroU32::new(iterations).unwrap_or(NonZeroU32::MIN);
    let mut out = Zeroizing::new(vec![0u8; length]);
    pbkdf2::derive(pbkdf2::PBKDF2_HMAC_SHA512, rounds, salt, password, &mut out);
    out
}
