//! Text and binary encodings shared by mnemonics, extended keys and
//! address codecs.
//!
//! This module provides:
//! - [`hex`]: lowercase hexadecimal
//! - [`base58`]: Base58 / Base58Check with Bitcoin and Ripple alphabets
//! - [`base58_monero`]: Monero's block-wise Base58
//! - [`base32`]: RFC 4648 Base32 with optional custom alphabet
//! - [`bech32`]: Bech32 / Bech32m and SegWit addresses
//! - [`cbor`]: the CBOR subset used by Cardano Byron addresses

pub mod base32;
pub mod base58;
pub mod base58_monero;
pub mod bech32;
pub mod cbor;

/// Lowercase hexadecimal helpers on top of `data-encoding`.
pub mod hex {
    use data_encoding::{HEXLOWER, HEXLOWER_PERMISSIVE};

    use crate::error::{ErrorDetail, WalletError};

    /// Encode bytes as lowercase hex.
    #[must_use]
    pub fn encode(bytes: &[u8]) -> String {
        HEXLOWER.encode(bytes)
    }

    /// Decode hex (either case, optional `0x` prefix).
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Semantic` on odd length or non-hex characters.
    pub fn decode(text: &str) -> Result<Vec<u8>, WalletError> {
        let text = text.strip_prefix("0x").unwrap_or(text);
        HEXLOWER_PERMISSIVE
            .decode(text.as_bytes())
            .map_err(|e| WalletError::Semantic(ErrorDetail::msg(format!("invalid hex: {e}"))))
    }

    /// Returns `true` if `text` is non-empty, even-length hexadecimal.
    #[must_use]
    pub fn is_hex(text: &str) -> bool {
        !text.is_empty() && text.len() % 2 == 0 && text.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

/// Minimal big-endian encoding of a version prefix (`0x00` stays one byte).
#[must_use]
pub fn prefix_bytes(prefix: u32) -> Vec<u8> {
    let bytes = prefix.to_be_bytes();
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(3);
    bytes[first..].to_vec()
}
