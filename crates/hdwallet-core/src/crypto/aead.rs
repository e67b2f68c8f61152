//! ChaCha20-Poly1305 sealing for Byron-Legacy derivation paths.
//!
//! Wire format: `ciphertext ‖ tag(16)`, no associated data.

use ring::aead;
use zeroize::Zeroize;

use crate::error::{ErrorDetail, WalletError};

/// ChaCha20-Poly1305 key length in bytes.
pub const KEY_LEN: usize = 32;

/// Nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// Authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

fn less_safe_key(key: &[u8]) -> Result<aead::LessSafeKey, WalletError> {
    if key.len() != KEY_LEN {
        return Err(WalletError::Hd(ErrorDetail::mismatch(
            "invalid path key length",
            KEY_LEN,
            key.len(),
        )));
    }
    let unbound = aead::UnboundKey::new(&aead::CHACHA20_POLY1305, key)
        .map_err(|_| WalletError::Hd("failed to create ChaCha20-Poly1305 key".into()))?;
    Ok(aead::LessSafeKey::new(unbound))
}

/// Encrypt `plaintext` and append the tag.
///
/// # Errors
///
/// Returns `WalletError::Hd` if the key is not 32 bytes or sealing fails.
pub fn seal(key: &[u8], nonce: &[u8; NONCE_LEN], plaintext: &[u8]) -> Result<Vec<u8>, WalletError> {
    let key = less_safe_key(key)?;
    let nonce = aead::Nonce::assume_unique_for_key(*nonce);
    let mut in_out = plaintext.to_vec();
    if key
        .seal_in_place_append_tag(nonce, aead::Aad::empty(), &mut in_out)
        .is_err()
    {
        in_out.zeroize();
        return Err(WalletError::Hd("ChaCha20-Poly1305 sealing failed".into()));
    }
    Ok(in_out)
}

/// Authenticate and decrypt `ciphertext ‖ tag`.
///
/// # Errors
///
/// Returns `WalletError::Hd` on a bad key length and
/// `WalletError::Checksum` if authentication fails.
pub fn open(key: &[u8], nonce: &[u8; NONCE_LEN], sealed: &[u8]) -> Result<Vec<u8>, WalletError> {
    if sealed.len() < TAG_LEN {
        return Err(WalletError::Checksum(ErrorDetail::mismatch(
            "sealed payload shorter than tag",
            format!(">= {TAG_LEN}"),
            sealed.len(),
        )));
    }
    let key = less_safe_key(key)?;
    let nonce = aead::Nonce::assume_unique_for_key(*nonce);
    let mut in_out = sealed.to_vec();
    let plaintext = key
        .open_in_place(nonce, aead::Aad::empty(), &mut in_out)
        .map_err(|_| WalletError::Checksum("ChaCha20-Poly1305 authentication failed".into()))?
        .to_vec();
    in_out.zeroize();
    Ok(plaintext)
}
