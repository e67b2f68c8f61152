//! Algorand mnemonics: 32 bytes packed little-endian into 24 11-bit words,
//! plus one checksum word from `SHA-512/256(entropy)`.

use zeroize::Zeroizing;

use super::bip39::unknown_word;
use super::{invalid_words_count, wordlists, Language};
use crate::crypto::sha512_256;
use crate::entropy::{self, Scheme};
use crate::error::{ErrorDetail, WalletError};

/// Algorand always uses 25 words.
pub const WORD_COUNTS: [usize; 1] = [25];

/// Pack bytes into 11-bit values, least-significant bits first.
fn to_11_bits(data: &[u8]) -> Vec<u32> {
    let mut out = Vec::with_capacity(data.len() * 8 / 11 + 1);
    let (mut buffer, mut bits) = (0u32, 0u32);
    for &byte in data {
        buffer |= u32::from(byte) << bits;
        bits += 8;
        if bits >= 11 {
            out.push(buffer & 0x7ff);
            buffer >>= 11;
            bits -= 11;
        }
    }
    if bits != 0 {
        out.push(buffer & 0x7ff);
    }
    out
}

/// Unpack 11-bit values into bytes, least-significant bits first.
fn from_11_bits(values: &[u32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * 11 / 8 + 1);
    let (mut buffer, mut bits) = (0u32, 0u32);
    for &value in values {
        buffer |= value << bits;
        bits += 11;
        while bits >= 8 {
            out.push((buffer & 0xff) as u8);
            buffer >>= 8;
            bits -= 8;
        }
    }
    if bits != 0 {
        out.push((buffer & 0xff) as u8);
    }
    out
}

fn checksum_index(entropy: &[u8]) -> u32 {
    to_11_bits(&sha512_256(entropy)[..2])[0]
}

/// Encode 32 bytes of entropy.
///
/// # Errors
///
/// Returns `WalletError::Entropy` unless the entropy is 32 bytes.
pub fn encode(entropy: &[u8], language: Language) -> Result<Zeroizing<Vec<String>>, WalletError> {
    entropy::validate(Scheme::Algorand, entropy)?;
    let list = wordlists::bip39(language);
    let mut indexes = to_11_bits(entropy);
    indexes.push(checksum_index(entropy));
    Ok(Zeroizing::new(
        indexes
            .iter()
            .map(|&i| list.word(i as usize).map(str::to_owned).unwrap_or_default())
            .collect(),
    ))
}

/// Decode 25 words, verifying the checksum word.
///
/// # Errors
///
/// Returns `WalletError::Mnemonic` for a bad count, unknown word or
/// non-zero padding and `WalletError::Checksum` for a wrong checksum word.
pub fn decode(words: &[String], language: Language) -> Result<Zeroizing<Vec<u8>>, WalletError> {
    if !WORD_COUNTS.contains(&words.len()) {
        return Err(invalid_words_count(Scheme::Algorand, words.len()));
    }
    let list = wordlists::bip39(language);
    let indexes = words
        .iter()
        .enumerate()
        .map(|(position, w)| list.index_of(w).ok_or_else(|| unknown_word(position, language)))
        .collect::<Result<Vec<u32>, _>>()?;
    let (body, checksum) = indexes.split_at(24);

    let mut data = Zeroizing::new(from_11_bits(body));
    if data.len() != 33 || data[32] != 0 {
        return Err(WalletError::Mnemonic(ErrorDetail::msg(
            "Algorand mnemonic has non-zero padding bits",
        )));
    }
    data.truncate(32);
    let expected = checksum_index(&data);
    if checksum[0] != expected {
        return Err(WalletError::Checksum(ErrorDetail::mismatch(
            "Algorand checksum word mismatch",
            list.word(expected as usize).unwrap_or_default(),
            &words[24],
        )));
    }
    Ok(data)
}
