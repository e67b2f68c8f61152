//! BIP39 mnemonics: entropy plus a SHA-256 checksum, 11 bits per word.

use zeroize::Zeroizing;

use super::{invalid_words_count, wordlists, Language};
use crate::crypto::sha256;
use crate::entropy::{self, Scheme};
use crate::error::{ErrorDetail, WalletError};

/// Valid BIP39 word counts.
pub const WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Checksum bits for `entropy_len` bytes of entropy.
const fn checksum_bits(entropy_len: usize) -> usize {
    entropy_len * 8 / 32
}

/// Read `width` bits MSB-first starting at bit `offset`.
pub(crate) fn read_bits(data: &[u8], offset: usize, width: usize) -> u32 {
    (offset..offset + width).fold(0u32, |acc, bit| {
        let value = (data[bit / 8] >> (7 - bit % 8)) & 1;
        (acc << 1) | u32::from(value)
    })
}

/// Write the low `width` bits of `value` MSB-first starting at bit `offset`.
pub(crate) fn write_bits(data: &mut [u8], offset: usize, width: usize, value: u32) {
    for i in 0..width {
        if (value >> (width - 1 - i)) & 1 == 1 {
            let bit = offset + i;
            data[bit / 8] |= 1 << (7 - bit % 8);
        }
    }
}

/// Encode entropy (16, 20, 24, 28 or 32 bytes) to words.
///
/// # Errors
///
/// Returns `WalletError::Entropy` for an unsupported length.
pub fn encode(entropy: &[u8], language: Language) -> Result<Zeroizing<Vec<String>>, WalletError> {
    entropy::validate(Scheme::Bip39, entropy)?;
    let list = wordlists::bip39(language);
    let mut data = Zeroizing::new(entropy.to_vec());
    data.push(sha256(entropy)[0]);
    let total_bits = entropy.len() * 8 + checksum_bits(entropy.len());
    let words = (0..total_bits / 11)
        .map(|w| {
            let index = read_bits(&data, w * 11, 11) as usize;
            list.word(index).map(str::to_owned).unwrap_or_default()
        })
        .collect();
    Ok(Zeroizing::new(words))
}

/// Decode words to entropy, verifying the checksum.
///
/// # Errors
///
/// Returns `WalletError::Mnemonic` for a bad count or unknown word and
/// `WalletError::Checksum` when the checksum bits differ.
pub fn decode(words: &[String], language: Language) -> Result<Zeroizing<Vec<u8>>, WalletError> {
    if !WORD_COUNTS.contains(&words.len()) {
        return Err(invalid_words_count(Scheme::Bip39, words.len()));
    }
    let list = wordlists::bip39(language);
    let total_bits = words.len() * 11;
    let cs_bits = total_bits / 33;
    let entropy_len = (total_bits - cs_bits) / 8;

    let mut data = Zeroizing::new(vec![0u8; total_bits.div_ceil(8)]);
    for (position, word) in words.iter().enumerate() {
        let index = list.index_of(word).ok_or_else(|| unknown_word(position, language))?;
        write_bits(&mut data, position * 11, 11, index);
    }

    let entropy = Zeroizing::new(data[..entropy_len].to_vec());
    let got = read_bits(&data, entropy_len * 8, cs_bits);
    let expected = read_bits(&sha256(&entropy), 0, cs_bits);
    if got != expected {
        return Err(WalletError::Checksum(ErrorDetail::mismatch(
            "BIP39 checksum mismatch",
            format!("{expected:0width$b}", width = cs_bits),
            format!("{got:0width$b}", width = cs_bits),
        )));
    }
    Ok(entropy)
}

pub(crate) fn unknown_word(position: usize, language: Language) -> WalletError {
    WalletError::Mnemonic(ErrorDetail::msg(format!(
        "word at position {position} is not in the {language} wordlist"
    )))
}

/// Returns `true` if the words form a valid BIP39 mnemonic in any language.
#[must_use]
pub fn is_valid(words: &[String]) -> bool {
    Language::ALL.iter().any(|&language| {
        let list = wordlists::bip39(language);
        words.iter().all(|w| list.contains(w)) && decode(words, language).is_ok()
    })
}
