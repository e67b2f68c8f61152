//! Base58 and Base58Check over `bs58`.
//!
//! Check encoding appends `SHA-256(SHA-256(payload))[:4]`.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorDetail, WalletError};

/// Base58 alphabet selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alphabet {
    /// `123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz`
    #[default]
    Bitcoin,
    /// The Ripple permutation, starting `rpshnaf39w`.
    Ripple,
}

impl Alphabet {
    const fn as_bs58(self) -> &'static bs58::Alphabet {
        match self {
            Self::Bitcoin => bs58::Alphabet::BITCOIN,
            Self::Ripple => bs58::Alphabet::RIPPLE,
        }
    }
}

fn map_decode_error(err: &bs58::decode::Error) -> WalletError {
    match err {
        bs58::decode::Error::InvalidChecksum {
            checksum,
            expected_checksum,
        } => WalletError::Checksum(ErrorDetail::mismatch(
            "invalid Base58Check checksum",
            crate::encoding::hex::encode(expected_checksum),
            crate::encoding::hex::encode(checksum),
        )),
        other => WalletError::Semantic(ErrorDetail::msg(format!("invalid Base58: {other}"))),
    }
}

/// Plain Base58 encode.
#[must_use]
pub fn encode(data: &[u8], alphabet: Alphabet) -> String {
    bs58::encode(data)
        .with_alphabet(alphabet.as_bs58())
        .into_string()
}

/// Plain Base58 decode.
///
/// # Errors
///
/// Returns `WalletError::Semantic` on characters outside the alphabet.
pub fn decode(text: &str, alphabet: Alphabet) -> Result<Vec<u8>, WalletError> {
    bs58::decode(text)
        .with_alphabet(alphabet.as_bs58())
        .into_vec()
        .map_err(|e| map_decode_error(&e))
}

/// Base58Check encode: `base58(payload ‖ dsha256(payload)[:4])`.
#[must_use]
pub fn check_encode(payload: &[u8], alphabet: Alphabet) -> String {
    bs58::encode(payload)
        .with_alphabet(alphabet.as_bs58())
        .with_check()
        .into_string()
}

/// Base58Check decode, returning the payload without its checksum.
///
/// # Errors
///
/// Returns `WalletError::Checksum` when the checksum does not verify and
/// `WalletError::Semantic` on malformed input.
pub fn check_decode(text: &str, alphabet: Alphabet) -> Result<Vec<u8>, WalletError> {
    bs58::decode(text)
        .with_alphabet(alphabet.as_bs58())
        .with_check(None)
        .into_vec()
        .map_err(|e| map_decode_error(&e))
}
