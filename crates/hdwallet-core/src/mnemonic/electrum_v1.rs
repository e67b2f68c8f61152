//! Electrum 1.x mnemonics: every 4 big-endian bytes become three words
//! through a cyclic index recurrence over the 1626-word list.

use zeroize::Zeroizing;

use super::bip39::unknown_word;
use super::{invalid_words_count, wordlists, Language};
use crate::entropy::{self, Scheme};
use crate::error::{ErrorDetail, WalletError};

/// 12 words for 16-byte seeds; 24 for the legacy 32-byte form.
pub const WORD_COUNTS: [usize; 2] = [12, 24];

/// Three word indexes for a 32-bit chunk.
pub(crate) fn chunk_to_indexes(x: u32, n: u32) -> [u32; 3] {
    let w1 = x % n;
    let w2 = (x / n + w1) % n;
    let w3 = (x / n / n + w2) % n;
    [w1, w2, w3]
}

/// Inverse of [`chunk_to_indexes`]; `None` if the triple is not canonical.
pub(crate) fn indexes_to_chunk([w1, w2, w3]: [u32; 3], n: u32) -> Option<u32> {
    let (w1, w2, w3, n) = (u64::from(w1), u64::from(w2), u64::from(w3), u64::from(n));
    let x = w1 + n * ((n + w2 - w1) % n) + n * n * ((n + w3 - w2) % n);
    (x % n == w1).then_some(x).and_then(|x| u32::try_from(x).ok())
}

/// Encode 16 or 32 bytes of entropy.
///
/// # Errors
///
/// Returns `WalletError::Entropy` unless the entropy is 16 or 32 bytes and
/// `WalletError::Mnemonic` for a language other than English.
pub fn encode(entropy: &[u8], language: Language) -> Result<Zeroizing<Vec<String>>, WalletError> {
    entropy::validate(Scheme::ElectrumV1, entropy)?;
    check_language(language)?;
    Ok(encode_chunks(entropy))
}

fn encode_chunks(entropy: &[u8]) -> Zeroizing<Vec<String>> {
    let list = wordlists::electrum_v1();
    let n = u32::try_from(list.len()).unwrap_or(u32::MAX);
    let mut words = Zeroizing::new(Vec::with_capacity(entropy.len() / 4 * 3));
    for chunk in entropy.chunks_exact(4) {
        let x = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        for index in chunk_to_indexes(x, n) {
            words.push(list.word(index as usize).unwrap_or_default().to_owned());
        }
    }
    words
}

/// Decode 12 or 24 words to 16 or 32 bytes.
///
/// # Errors
///
/// Returns `WalletError::Mnemonic` for a bad count, unknown word or a
/// word triple that does not encode a 32-bit value.
pub fn decode(words: &[String], language: Language) -> Result<Zeroizing<Vec<u8>>, WalletError> {
    check_language(language)?;
    if !WORD_COUNTS.contains(&words.len()) {
        return Err(invalid_words_count(Scheme::ElectrumV1, words.len()));
    }
    let list = wordlists::electrum_v1();
    let n = u32::try_from(list.len()).unwrap_or(u32::MAX);
    let mut entropy = Zeroizing::new(Vec::with_capacity(words.len() / 3 * 4));
    for (group, triple) in words.chunks_exact(3).enumerate() {
        let mut indexes = [0u32; 3];
        for (slot, (offset, word)) in indexes.iter_mut().zip(triple.iter().enumerate()) {
            *slot = list
                .index_of(word)
                .ok_or_else(|| unknown_word(group * 3 + offset, language))?;
        }
        let chunk = indexes_to_chunk(indexes, n).ok_or_else(|| {
            WalletError::Mnemonic(ErrorDetail::msg(format!(
                "word group {group} does not encode a 32-bit value"
            )))
        })?;
        entropy.extend_from_slice(&chunk.to_be_bytes());
    }
    Ok(entropy)
}

/// Returns `true` if the words decode as an Electrum-v1 seed.
#[must_use]
pub fn is_valid(words: &[String]) -> bool {
    decode(words, Language::English).is_ok()
}

fn check_language(language: Language) -> Result<(), WalletError> {
    if language == Language::English {
        Ok(())
    } else {
        Err(super::unsupported_language(Scheme::ElectrumV1, language))
    }
}
