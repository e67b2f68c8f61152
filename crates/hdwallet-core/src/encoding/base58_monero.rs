//! Monero Base58: the input is cut into 8-byte blocks, each encoded
//! independently into a fixed-width group of 11 characters (shorter
//! final blocks use [`ENCODED_BLOCK_SIZES`]) left-padded with `'1'`.

use crate::error::{ErrorDetail, WalletError};

const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

const FULL_BLOCK_SIZE: usize = 8;
const FULL_ENCODED_BLOCK_SIZE: usize = 11;

/// Encoded width for a block of `n` bytes, indexed by `n`.
pub const ENCODED_BLOCK_SIZES: [usize; 9] = [0, 2, 3, 5, 6, 7, 9, 10, 11];

fn encode_block(block: &[u8], out: &mut String) {
    let mut num = block.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
    let width = ENCODED_BLOCK_SIZES[block.len()];
    let mut group = vec![ALPHABET[0]; width];
    let mut i = width;
    while num > 0 && i > 0 {
        i -= 1;
        group[i] = ALPHABET[(num % 58) as usize];
        num /= 58;
    }
    out.extend(group.into_iter().map(char::from));
}

fn decode_block(group: &[u8], out: &mut Vec<u8>) -> Result<(), WalletError> {
    let size = ENCODED_BLOCK_SIZES
        .iter()
        .position(|&w| w == group.len())
        .ok_or_else(|| {
            WalletError::Semantic(ErrorDetail::mismatch(
                "invalid Monero Base58 group width",
                "2, 3, 5, 6, 7, 9, 10 or 11",
                group.len(),
            ))
        })?;

    let mut num: u128 = 0;
    for &c in group {
        let digit = ALPHABET.iter().position(|&a| a == c).ok_or_else(|| {
            WalletError::Semantic(ErrorDetail::msg(format!(
                "invalid Monero Base58 character '{}'",
                char::from(c)
            )))
        })?;
        num = num * 58 + digit as u128;
    }
    if (num >> (size * 8)) != 0 {
        return Err(WalletError::Semantic("Monero Base58 block overflow".into()));
    }
    let bytes = num.to_be_bytes();
    out.extend_from_slice(&bytes[bytes.len() - size..]);
    Ok(())
}

/// Encode bytes in Monero Base58.
#[must_use]
pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(FULL_BLOCK_SIZE) * FULL_ENCODED_BLOCK_SIZE);
    for block in data.chunks(FULL_BLOCK_SIZE) {
        encode_block(block, &mut out);
    }
    out
}

/// Decode Monero Base58.
///
/// # Errors
///
/// Returns `WalletError::Semantic` on bad characters, widths or overflow.
pub fn decode(text: &str) -> Result<Vec<u8>, WalletError> {
    let mut out = Vec::with_capacity(text.len() / FULL_ENCODED_BLOCK_SIZE * FULL_BLOCK_SIZE + FULL_BLOCK_SIZE);
    for group in text.as_bytes().chunks(FULL_ENCODED_BLOCK_SIZE) {
        decode_block(group, &mut out)?;
    }
    Ok(out)
}
