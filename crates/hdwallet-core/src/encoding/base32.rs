//! RFC 4648 Base32, unpadded, with optional alphabet substitution.
//!
//! Stellar and Algorand use the standard uppercase alphabet, Filecoin the
//! lowercase one, and Nano its own `13456789abcdefghijkmnopqrstuwxyz`.

use data_encoding::{Encoding, Specification, BASE32_NOPAD};

use crate::error::{ErrorDetail, WalletError};

/// Nano's Base32 alphabet.
pub const NANO_ALPHABET: &str = "13456789abcdefghijkmnopqrstuwxyz";

/// RFC 4648 alphabet in lowercase, as used by Filecoin.
pub const LOWERCASE_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz234567";

fn custom_encoding(alphabet: &str) -> Result<Encoding, WalletError> {
    let mut spec = Specification::new();
    spec.symbols.push_str(alphabet);
    spec.encoding().map_err(|e| {
        WalletError::Semantic(ErrorDetail::msg(format!("invalid Base32 alphabet: {e}")))
    })
}

fn encoding(alphabet: Option<&str>) -> Result<Encoding, WalletError> {
    alphabet.map_or_else(|| Ok(BASE32_NOPAD.clone()), custom_encoding)
}

/// Encode without padding.
///
/// # Errors
///
/// Returns `WalletError::Semantic` if a custom alphabet is not 32 unique
/// ASCII symbols.
pub fn encode(data: &[u8], alphabet: Option<&str>) -> Result<String, WalletError> {
    Ok(encoding(alphabet)?.encode(data))
}

/// Decode unpadded Base32. Trailing `=` padding is tolerated.
///
/// # Errors
///
/// Returns `WalletError::Semantic` on symbols outside the alphabet or a
/// length that is not a valid Base32 length.
pub fn decode(text: &str, alphabet: Option<&str>) -> Result<Vec<u8>, WalletError> {
    encoding(alphabet)?
        .decode(text.trim_end_matches('=').as_bytes())
        .map_err(|e| WalletError::Semantic(ErrorDetail::msg(format!("invalid Base32: {e}"))))
}
