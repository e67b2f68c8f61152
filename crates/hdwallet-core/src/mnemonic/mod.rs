//! Mnemonic codecs: entropy ↔ words for every [`Scheme`].
//!
//! This module provides:
//! - [`Mnemonic`]: a validated phrase with its scheme and language
//! - [`Language`]: the wordlist languages
//! - [`normalize`]: NFKD + lowercase word splitting shared by all codecs
//! - one codec submodule per scheme
//!
//! Languages are detected by full wordlist membership, in [`Language::ALL`]
//! order, keeping the first language whose codec accepts the phrase.

pub mod algorand;
pub mod bip39;
pub mod electrum_v1;
pub mod electrum_v2;
pub mod monero;
pub mod wordlists;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

pub use electrum_v2::ElectrumV2Type;

use crate::entropy::{Entropy, Scheme};
use crate::error::{ErrorDetail, WalletError};

/// Wordlist language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    /// English.
    #[default]
    English = 0,
    /// Chinese (Simplified).
    ChineseSimplified = 1,
    /// Chinese (Traditional).
    ChineseTraditional = 2,
    /// Czech.
    Czech = 3,
    /// French.
    French = 4,
    /// Italian.
    Italian = 5,
    /// Japanese.
    Japanese = 6,
    /// Korean.
    Korean = 7,
    /// Portuguese.
    Portuguese = 8,
    /// Spanish.
    Spanish = 9,
}

impl Language {
    /// All languages, in detection order.
    pub const ALL: [Self; 10] = [
        Self::English,
        Self::ChineseSimplified,
        Self::ChineseTraditional,
        Self::Czech,
        Self::French,
        Self::Italian,
        Self::Japanese,
        Self::Korean,
        Self::Portuguese,
        Self::Spanish,
    ];

    /// Configuration name, e.g. `chinese-simplified`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::ChineseSimplified => "chinese-simplified",
            Self::ChineseTraditional => "chinese-traditional",
            Self::Czech => "czech",
            Self::French => "french",
            Self::Italian => "italian",
            Self::Japanese => "japanese",
            Self::Korean => "korean",
            Self::Portuguese => "portuguese",
            Self::Spanish => "spanish",
        }
    }

    pub(crate) const fn bip39(self) -> ::bip39::Language {
        match self {
            Self::English => ::bip39::Language::English,
            Self::ChineseSimplified => ::bip39::Language::SimplifiedChinese,
            Self::ChineseTraditional => ::bip39::Language::TraditionalChinese,
            Self::Czech => ::bip39::Language::Czech,
            Self::French => ::bip39::Language::French,
            Self::Italian => ::bip39::Language::Italian,
            Self::Japanese => ::bip39::Language::Japanese,
            Self::Korean => ::bip39::Language::Korean,
            Self::Portuguese => ::bip39::Language::Portuguese,
            Self::Spanish => ::bip39::Language::Spanish,
        }
    }

    /// Word separator used when rendering a phrase.
    #[must_use]
    pub const fn separator(self) -> &'static str {
        match self {
            Self::Japanese => "\u{3000}",
            _ => " ",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', ' '], "-");
        Self::ALL
            .into_iter()
            .find(|language| language.name() == wanted)
            .ok_or_else(|| {
                WalletError::Mnemonic(ErrorDetail::mismatch(
                    "unknown language",
                    Self::ALL.map(Self::name).join(", "),
                    s,
                ))
            })
    }
}

/// Split a phrase into NFKD-normalized, lowercased words.
#[must_use]
pub fn normalize(mnemonic: &str) -> Zeroizing<Vec<String>> {
    let normalized: Zeroizing<String> = Zeroizing::new(mnemonic.nfkd().collect::<String>().to_lowercase());
    Zeroizing::new(normalized.split_whitespace().map(str::to_owned).collect())
}

/// Encoding options for schemes with extra parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MnemonicOptions {
    /// Electrum-v2 seed version.
    pub electrum_type: ElectrumV2Type,
    /// Append the Monero checksum word.
    pub monero_checksum: bool,
}

impl Default for MnemonicOptions {
    fn default() -> Self {
        Self {
            electrum_type: ElectrumV2Type::Standard,
            monero_checksum: true,
        }
    }
}

/// Languages a scheme ships wordlists for.
#[must_use]
pub const fn languages(scheme: Scheme) -> &'static [Language] {
    match scheme {
        Scheme::Bip39 => &Language::ALL,
        Scheme::ElectrumV2 => &electrum_v2::LANGUAGES,
        Scheme::Algorand | Scheme::ElectrumV1 | Scheme::Monero => &[Language::English],
    }
}

/// Word counts a scheme accepts.
#[must_use]
pub const fn word_counts(scheme: Scheme) -> &'static [usize] {
    match scheme {
        Scheme::Bip39 => &bip39::WORD_COUNTS,
        Scheme::Algorand => &algorand::WORD_COUNTS,
        Scheme::ElectrumV1 => &electrum_v1::WORD_COUNTS,
        Scheme::ElectrumV2 => &electrum_v2::WORD_COUNTS,
        Scheme::Monero => &monero::WORD_COUNTS,
    }
}

/// Entropy strength (bits) that produces `words` words.
///
/// # Errors
///
/// Returns `WalletError::Mnemonic` for an unsupported word count.
pub fn strength_for_words(scheme: Scheme, words: usize) -> Result<usize, WalletError> {
    let strength = match (scheme, words) {
        (Scheme::Bip39, 12 | 15 | 18 | 21 | 24) => words * 11 * 32 / 33,
        (Scheme::Algorand, 25) => 256,
        (Scheme::ElectrumV1, 12) | (Scheme::Monero, 12 | 13) => 128,
        (Scheme::ElectrumV2, 12) => 132,
        (Scheme::ElectrumV2, 24) => 264,
        (Scheme::ElectrumV1, 24) | (Scheme::Monero, 24 | 25) => 256,
        _ => return Err(invalid_words_count(scheme, words)),
    };
    Ok(strength)
}

pub(crate) fn invalid_words_count(scheme: Scheme, got: usize) -> WalletError {
    WalletError::Mnemonic(ErrorDetail::mismatch(
        format!("invalid {scheme} words count"),
        word_counts(scheme)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        got,
    ))
}

pub(crate) fn unsupported_language(scheme: Scheme, language: Language) -> WalletError {
    WalletError::Mnemonic(ErrorDetail::mismatch(
        format!("language not supported by {scheme}"),
        languages(scheme)
            .iter()
            .map(|l| l.name())
            .collect::<Vec<_>>()
            .join(", "),
        language,
    ))
}

/// A validated mnemonic phrase.
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic {
    scheme: Scheme,
    language: Language,
    electrum_type: Option<ElectrumV2Type>,
    words: Zeroizing<Vec<String>>,
}

impl Mnemonic {
    /// Encode entropy with default options.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Entropy` for entropy the scheme rejects and
    /// `WalletError::Mnemonic` for an unsupported language.
    pub fn from_entropy(scheme: Scheme, entropy: &[u8], language: Language) -> Result<Self, WalletError> {
        Self::from_entropy_with(scheme, entropy, language, MnemonicOptions::default())
    }

    /// Encode entropy.
    ///
    /// # Errors
    ///
    /// As [`from_entropy`](Self::from_entropy).
    pub fn from_entropy_with(
        scheme: Scheme,
        entropy: &[u8],
        language: Language,
        options: MnemonicOptions,
    ) -> Result<Self, WalletError> {
        if !languages(scheme).contains(&language) {
            return Err(unsupported_language(scheme, language));
        }
        let (words, electrum_type) = match scheme {
            Scheme::Bip39 => (bip39::encode(entropy, language)?, None),
            Scheme::Algorand => (algorand::encode(entropy, language)?, None),
            Scheme::ElectrumV1 => (electrum_v1::encode(entropy, language)?, None),
            Scheme::ElectrumV2 => (
                electrum_v2::encode(entropy, language, options.electrum_type)?,
                Some(options.electrum_type),
            ),
            Scheme::Monero => (monero::encode(entropy, language, options.monero_checksum)?, None),
        };
        tracing::debug!(scheme = scheme.name(), language = language.name(), words = words.len(), "mnemonic encoded");
        Ok(Self {
            scheme,
            language,
            electrum_type,
            words,
        })
    }

    /// Draw fresh entropy and encode it.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Mnemonic` for an unsupported word count or
    /// language.
    pub fn generate(
        scheme: Scheme,
        words_count: usize,
        language: Language,
        options: MnemonicOptions,
    ) -> Result<Self, WalletError> {
        let strength = strength_for_words(scheme, words_count)?;
        let entropy = Entropy::generate(scheme, strength)?;
        let options = MnemonicOptions {
            monero_checksum: scheme == Scheme::Monero && words_count % 2 == 1,
            ..options
        };
        Self::from_entropy_with(scheme, entropy.expose(), language, options)
    }

    /// Parse a phrase, detecting its language.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Mnemonic` if no language accepts every word,
    /// or the codec error of the first language that contains every word.
    pub fn parse(scheme: Scheme, text: &str) -> Result<Self, WalletError> {
        let words = normalize(text);
        let mut first_error = None;
        for &language in languages(scheme) {
            if !contains_all(scheme, language, &words) {
                continue;
            }
            match Self::parse_words(scheme, language, words.clone()) {
                Ok(mnemonic) => return Ok(mnemonic),
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        Err(first_error.unwrap_or_else(|| {
            WalletError::Mnemonic(ErrorDetail::msg(format!(
                "words do not belong to any {scheme} wordlist"
            )))
        }))
    }

    /// Parse a phrase in a known language.
    ///
    /// # Errors
    ///
    /// Returns the codec error when the phrase is invalid.
    pub fn parse_in(scheme: Scheme, text: &str, language: Language) -> Result<Self, WalletError> {
        if !languages(scheme).contains(&language) {
            return Err(unsupported_language(scheme, language));
        }
        Self::parse_words(scheme, language, normalize(text))
    }

    fn parse_words(
        scheme: Scheme,
        language: Language,
        words: Zeroizing<Vec<String>>,
    ) -> Result<Self, WalletError> {
        let electrum_type = match scheme {
            Scheme::ElectrumV2 => Some(electrum_v2::detect_type(&words).ok_or_else(|| {
                WalletError::Mnemonic(ErrorDetail::msg(
                    "phrase does not carry an Electrum-V2 seed version",
                ))
            })?),
            _ => None,
        };
        let mnemonic = Self {
            scheme,
            language,
            electrum_type,
            words,
        };
        mnemonic.to_entropy()?;
        Ok(mnemonic)
    }

    /// Decode back to entropy.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Mnemonic` for unknown words or counts and
    /// `WalletError::Checksum` for a failing checksum.
    pub fn to_entropy(&self) -> Result<Zeroizing<Vec<u8>>, WalletError> {
        match self.scheme {
            Scheme::Bip39 => bip39::decode(&self.words, self.language),
            Scheme::Algorand => algorand::decode(&self.words, self.language),
            Scheme::ElectrumV1 => electrum_v1::decode(&self.words, self.language),
            Scheme::ElectrumV2 => electrum_v2::decode(&self.words, self.language),
            Scheme::Monero => monero::decode(&self.words, self.language),
        }
    }

    /// Parse and decode in one step.
    ///
    /// # Errors
    ///
    /// As [`parse`](Self::parse).
    pub fn decode(scheme: Scheme, text: &str) -> Result<Zeroizing<Vec<u8>>, WalletError> {
        Self::parse(scheme, text)?.to_entropy()
    }

    /// Returns `true` if the phrase parses under `scheme`.
    #[must_use]
    pub fn is_valid(scheme: Scheme, text: &str) -> bool {
        Self::parse(scheme, text).is_ok()
    }

    /// Detect the language of a phrase.
    ///
    /// # Errors
    ///
    /// As [`parse`](Self::parse).
    pub fn detect_language(scheme: Scheme, text: &str) -> Result<Language, WalletError> {
        Self::parse(scheme, text).map(|m| m.language)
    }

    /// The scheme.
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// The language.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Electrum-v2 seed version, for Electrum-v2 phrases.
    #[must_use]
    pub const fn electrum_type(&self) -> Option<ElectrumV2Type> {
        self.electrum_type
    }

    /// Number of words.
    #[must_use]
    pub fn words_count(&self) -> usize {
        self.words.len()
    }

    /// Normalized words.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The phrase, words joined with the language separator.
    #[must_use]
    pub fn phrase(&self) -> Zeroizing<String> {
        Zeroizing::new(self.words.join(self.language.separator()))
    }

    /// The phrase joined with ASCII spaces, as fed to seed derivation.
    #[must_use]
    pub fn normalized_phrase(&self) -> Zeroizing<String> {
        Zeroizing::new(self.words.join(" "))
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic")
            .field("scheme", &self.scheme)
            .field("language", &self.language)
            .field("words", &self.words.len())
            .finish_non_exhaustive()
    }
}

fn contains_all(scheme: Scheme, language: Language, words: &[String]) -> bool {
    match scheme {
        Scheme::Bip39 | Scheme::Algorand | Scheme::ElectrumV2 => {
            let list = wordlists::bip39(language);
            words.iter().all(|w| list.contains(w))
        }
        Scheme::ElectrumV1 => words.iter().all(|w| wordlists::electrum_v1().contains(w)),
        Scheme::Monero => wordlists::monero(language)
            .is_some_and(|list| words.iter().all(|w| list.index_of_prefixed(w).is_some())),
    }
}
