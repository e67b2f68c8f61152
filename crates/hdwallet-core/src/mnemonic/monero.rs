//! Monero mnemonics: little-endian 32-bit chunks, three words each, with
//! an optional trailing checksum word chosen by CRC-32 over word prefixes.

use zeroize::Zeroizing;

use super::bip39::unknown_word;
use super::electrum_v1::{chunk_to_indexes, indexes_to_chunk};
use super::wordlists::{self, truncate, Wordlist};
use super::{invalid_words_count, Language};
use crate::crypto::checksum::crc32;
use crate::entropy::{self, Scheme};
use crate::error::{ErrorDetail, WalletError};

/// 12/24 words without checksum, 13/25 with.
pub const WORD_COUNTS: [usize; 4] = [12, 13, 24, 25];

fn wordlist(language: Language) -> Result<&'static Wordlist, WalletError> {
    wordlists::monero(language).ok_or_else(|| super::unsupported_language(Scheme::Monero, language))
}

fn prefix_length(list: &Wordlist) -> usize {
    list.prefix_length().unwrap_or(usize::MAX)
}

/// Position of the checksum word among `words`.
fn checksum_position(words: &[String], prefix: usize) -> usize {
    let joined: Zeroizing<String> =
        Zeroizing::new(words.iter().map(|w| truncate(w, prefix)).collect());
    crc32(joined.as_bytes()) as usize % words.len()
}

/// Encode 16 or 32 bytes of entropy.
///
/// # Errors
///
/// Returns `WalletError::Entropy` for an unsupported length and
/// `WalletError::Mnemonic` for a language without a shipped list.
pub fn encode(
    entropy: &[u8],
    language: Language,
    checksum: bool,
) -> Result<Zeroizing<Vec<String>>, WalletError> {
    entropy::validate(Scheme::Monero, entropy)?;
    let list = wordlist(language)?;
    let n = u32::try_from(list.len()).unwrap_or(u32::MAX);
    let mut words = Zeroizing::new(Vec::with_capacity(entropy.len() / 4 * 3 + 1));
    for chunk in entropy.chunks_exact(4) {
        let x = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        for index in chunk_to_indexes(x, n) {
            words.push(list.word(index as usize).unwrap_or_default().to_owned());
        }
    }
    if checksum {
        let position = checksum_position(&words, prefix_length(list));
        let word = words[position].clone();
        words.push(word);
    }
    Ok(words)
}

/// Decode 12, 13, 24 or 25 words; the checksum word is verified when
/// present.
///
/// # Errors
///
/// Returns `WalletError::Mnemonic` for a bad count or unknown word and
/// `WalletError::Checksum` for a wrong checksum word.
pub fn decode(words: &[String], language: Language) -> Result<Zeroizing<Vec<u8>>, WalletError> {
    if !WORD_COUNTS.contains(&words.len()) {
        return Err(invalid_words_count(Scheme::Monero, words.len()));
    }
    let list = wordlist(language)?;
    let prefix = prefix_length(list);
    let body = if words.len() % 3 == 1 {
        let (body, last) = words.split_at(words.len() - 1);
        let expected = &body[checksum_position(body, prefix)];
        if truncate(expected, prefix) != truncate(&last[0], prefix) {
            return Err(WalletError::Checksum(ErrorDetail::mismatch(
                "Monero checksum word mismatch",
                expected,
                &last[0],
            )));
        }
        body
    } else {
        words
    };

    let n = u32::try_from(list.len()).unwrap_or(u32::MAX);
    let mut entropy = Zeroizing::new(Vec::with_capacity(body.len() / 3 * 4));
    for (group, triple) in body.chunks_exact(3).enumerate() {
        let mut indexes = [0u32; 3];
        for (slot, (offset, word)) in indexes.iter_mut().zip(triple.iter().enumerate()) {
            *slot = list
                .index_of_prefixed(word)
                .ok_or_else(|| unknown_word(group * 3 + offset, language))?;
        }
        let chunk = indexes_to_chunk(indexes, n).ok_or_else(|| {
            WalletError::Mnemonic(ErrorDetail::msg(format!(
                "word group {group} does not encode a 32-bit value"
            )))
        })?;
        entropy.extend_from_slice(&chunk.to_le_bytes());
    }
    Ok(entropy)
}
