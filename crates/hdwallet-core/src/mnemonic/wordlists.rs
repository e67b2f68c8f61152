//! Wordlist loading and lookup.
//!
//! The Electrum-v1 and Monero lists are embedded at compile time via
//! `include_str!`; the BIP39 lists come from the `bip39` crate. Every list is
//! NFKD-normalized and indexed once on first access using `OnceLock`.

use std::collections::HashMap;
use std::sync::OnceLock;

use unicode_normalization::UnicodeNormalization;

use super::Language;

/// Number of words in every BIP39 list.
pub const BIP39_WORDLIST_SIZE: usize = 2048;

/// Number of words in the Electrum-v1 and Monero lists.
pub const LEGACY_WORDLIST_SIZE: usize = 1626;

/// Characters of a Monero English word that identify it.
pub const MONERO_ENGLISH_PREFIX_LENGTH: usize = 3;

const ELECTRUM_V1_ENGLISH_RAW: &str = include_str!("wordlists/electrum_v1_english.txt");
const MONERO_ENGLISH_RAW: &str = include_str!("wordlists/monero_english.txt");

/// A normalized wordlist with reverse lookup.
#[derive(Debug)]
pub struct Wordlist {
    words: Vec<String>,
    index: HashMap<String, u32>,
    prefixes: Option<(usize, HashMap<String, u32>)>,
}

impl Wordlist {
    fn build<'a>(raw: impl Iterator<Item = &'a str>, prefix_length: Option<usize>) -> Self {
        let words: Vec<String> = raw
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(|w| w.nfkd().collect())
            .collect();
        let index = words
            .iter()
            .zip(0u32..)
            .map(|(w, i)| (w.clone(), i))
            .collect();
        let prefixes = prefix_length.map(|len| {
            let mut map = HashMap::with_capacity(words.len());
            for (word, i) in words.iter().zip(0u32..) {
                map.entry(truncate(word, len)).or_insert(i);
            }
            (len, map)
        });
        Self {
            words,
            index,
            prefixes,
        }
    }

    /// Number of words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` for an empty list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The word at `index`, if in range.
    #[must_use]
    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// All words in list order.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Index of an exact (normalized) word.
    #[must_use]
    pub fn index_of(&self, word: &str) -> Option<u32> {
        self.index.get(word).copied()
    }

    /// Index of a word, falling back to its unique prefix when the list
    /// defines one.
    #[must_use]
    pub fn index_of_prefixed(&self, word: &str) -> Option<u32> {
        self.index_of(word).or_else(|| {
            self.prefixes
                .as_ref()
                .and_then(|(len, map)| map.get(&truncate(word, *len)).copied())
        })
    }

    /// Returns `true` if the word belongs to the list.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Length of the unique prefix, if the list defines one.
    #[must_use]
    pub fn prefix_length(&self) -> Option<usize> {
        self.prefixes.as_ref().map(|(len, _)| *len)
    }
}

/// First `len` characters of `word`.
#[must_use]
pub fn truncate(word: &str, len: usize) -> String {
    word.chars().take(len).collect()
}

static BIP39_LISTS: [OnceLock<Wordlist>; 10] = [const { OnceLock::new() }; 10];
static ELECTRUM_V1_LIST: OnceLock<Wordlist> = OnceLock::new();
static MONERO_ENGLISH_LIST: OnceLock<Wordlist> = OnceLock::new();

/// The BIP39 list for `language`.
#[must_use]
pub fn bip39(language: Language) -> &'static Wordlist {
    BIP39_LISTS[language as usize].get_or_init(|| {
        let list = Wordlist::build(language.bip39().word_list().iter().copied(), None);
        debug_assert_eq!(list.len(), BIP39_WORDLIST_SIZE);
        list
    })
}

/// The Electrum-v1 list (English only).
#[must_use]
pub fn electrum_v1() -> &'static Wordlist {
    ELECTRUM_V1_LIST.get_or_init(|| Wordlist::build(ELECTRUM_V1_ENGLISH_RAW.lines(), None))
}

/// The Monero list for `language`, if shipped.
#[must_use]
pub fn monero(language: Language) -> Option<&'static Wordlist> {
    match language {
        Language::English => Some(MONERO_ENGLISH_LIST.get_or_init(|| {
            Wordlist::build(MONERO_ENGLISH_RAW.lines(), Some(MONERO_ENGLISH_PREFIX_LENGTH))
        })),
        _ => None,
    }
}
