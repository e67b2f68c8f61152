//! Electrum 2.x+ versioned mnemonics.
//!
//! The entropy is read as a big integer and emitted base-2048, least
//! significant word first. A phrase is valid for a seed version when
//! `HMAC-SHA512("Seed version", normalized)` starts with the version's hex
//! prefix. Encoding increments the integer until that holds and the phrase
//! is neither a BIP39 nor an Electrum-v1 mnemonic.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

use super::bip39::unknown_word;
use super::{bip39, electrum_v1, invalid_words_count, wordlists, Language};
use crate::crypto::hmac_sha512;
use crate::encoding::hex;
use crate::entropy::Scheme;
use crate::error::{ErrorDetail, WalletError};

/// Word counts: 132-bit and 264-bit seeds.
pub const WORD_COUNTS: [usize; 2] = [12, 24];

/// Languages whose Electrum list matches the BIP39 list.
pub const LANGUAGES: [Language; 3] = [
    Language::English,
    Language::Spanish,
    Language::ChineseSimplified,
];

const SEED_VERSION_KEY: &[u8] = b"Seed version";

/// Electrum seed version.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElectrumV2Type {
    /// P2PKH wallets, prefix `01`.
    #[default]
    Standard,
    /// P2WPKH wallets, prefix `100`.
    Segwit,
    /// Two-factor P2SH wallets, prefix `101`.
    #[serde(rename = "standard-2fa")]
    Standard2fa,
    /// Two-factor P2WSH wallets, prefix `102`.
    #[serde(rename = "segwit-2fa")]
    Segwit2fa,
}

impl ElectrumV2Type {
    /// All seed versions.
    pub const ALL: [Self; 4] = [Self::Standard, Self::Segwit, Self::Standard2fa, Self::Segwit2fa];

    /// Hex prefix of the seed-version HMAC.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Standard => "01",
            Self::Segwit => "100",
            Self::Standard2fa => "101",
            Self::Segwit2fa => "102",
        }
    }

    /// Configuration name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Segwit => "segwit",
            Self::Standard2fa => "standard-2fa",
            Self::Segwit2fa => "segwit-2fa",
        }
    }
}

impl fmt::Display for ElectrumV2Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElectrumV2Type {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                WalletError::Mnemonic(ErrorDetail::mismatch(
                    "unknown Electrum-V2 mnemonic type",
                    Self::ALL.map(Self::name).join(", "),
                    s,
                ))
            })
    }
}

const CJK_RANGES: [(u32, u32); 22] = [
    (0x1100, 0x11ff),
    (0x2e80, 0x2eff),
    (0x2f00, 0x2fdf),
    (0x2ff0, 0x2fff),
    (0x3000, 0x303f),
    (0x3040, 0x309f),
    (0x30a0, 0x30ff),
    (0x3100, 0x312f),
    (0x3130, 0x318f),
    (0x3190, 0x319f),
    (0x31a0, 0x31bf),
    (0x31c0, 0x31ef),
    (0x31f0, 0x31ff),
    (0x3200, 0x33ff),
    (0x3400, 0x4dbf),
    (0x4e00, 0x9fff),
    (0xa000, 0xa4cf),
    (0xac00, 0xd7af),
    (0xf900, 0xfaff),
    (0xfe30, 0xfe4f),
    (0xff00, 0xffef),
    (0x20000, 0x2fa1f),
];

fn is_cjk(c: char) -> bool {
    let code = u32::from(c);
    CJK_RANGES.iter().any(|&(lo, hi)| (lo..=hi).contains(&code))
}

/// Electrum text normalization: NFKD, lowercase, strip combining marks,
/// collapse whitespace, drop spaces between CJK characters.
#[must_use]
pub fn normalize_text(text: &str) -> Zeroizing<String> {
    let stripped: Zeroizing<String> = Zeroizing::new(
        text.nfkd()
            .collect::<String>()
            .to_lowercase()
            .chars()
            .filter(|&c| !is_combining_mark(c))
            .collect(),
    );
    let collapsed: Zeroizing<Vec<char>> =
        Zeroizing::new(stripped.split_whitespace().collect::<Vec<_>>().join(" ").chars().collect());
    let mut out = Zeroizing::new(String::with_capacity(collapsed.len()));
    for (i, &c) in collapsed.iter().enumerate() {
        let between_cjk = c == ' '
            && i > 0
            && collapsed.get(i + 1).is_some_and(|&next| is_cjk(next))
            && is_cjk(collapsed[i - 1]);
        if !between_cjk {
            out.push(c);
        }
    }
    out
}

/// Returns `true` if the phrase carries the given seed version.
#[must_use]
pub fn is_type(words: &[String], kind: ElectrumV2Type) -> bool {
    let normalized = normalize_text(&words.join(" "));
    let mac = hmac_sha512(SEED_VERSION_KEY, normalized.as_bytes());
    hex::encode(&mac[..2]).starts_with(kind.prefix())
}

/// The seed version a phrase carries, if any.
#[must_use]
pub fn detect_type(words: &[String]) -> Option<ElectrumV2Type> {
    ElectrumV2Type::ALL.into_iter().find(|&kind| is_type(words, kind))
}

fn entropy_length(words: usize) -> Option<usize> {
    match words {
        12 => Some(17),
        24 => Some(33),
        _ => None,
    }
}

fn integer_to_words(value: &BigUint, language: Language) -> Zeroizing<Vec<String>> {
    let list = wordlists::bip39(language);
    let n = BigUint::from(list.len());
    let mut rest = value.clone();
    let mut words = Zeroizing::new(Vec::new());
    while !rest.is_zero() {
        let index = (&rest % &n).to_usize().unwrap_or_default();
        words.push(list.word(index).unwrap_or_default().to_owned());
        rest /= &n;
    }
    words
}

/// Encode 17 or 33 bytes of entropy for `kind`.
///
/// The integer is incremented until the phrase carries `kind` and is not
/// a BIP39 or Electrum-v1 phrase, so the encoded entropy may differ from
/// the input.
///
/// # Errors
///
/// Returns `WalletError::Entropy` if the entropy does not produce 12 or 24
/// words, and `WalletError::Mnemonic` for an unsupported language.
pub fn encode(
    entropy: &[u8],
    language: Language,
    kind: ElectrumV2Type,
) -> Result<Zeroizing<Vec<String>>, WalletError> {
    if !LANGUAGES.contains(&language) {
        return Err(super::unsupported_language(Scheme::ElectrumV2, language));
    }
    let target = match entropy.len() {
        17 => 12,
        33 => 24,
        other => {
            return Err(WalletError::Entropy(ErrorDetail::mismatch(
                "invalid Electrum-V2 entropy length",
                "17 or 33 bytes",
                other,
            )))
        }
    };
    let mut value = BigUint::from_bytes_be(entropy);
    let mut attempts = 0u64;
    loop {
        let words = integer_to_words(&value, language);
        if words.len() != target {
            return Err(WalletError::Entropy(ErrorDetail::mismatch(
                "Electrum-V2 entropy does not fill its words",
                format!("{target} words"),
                words.len(),
            )));
        }
        if is_type(&words, kind) && !bip39::is_valid(&words) && !electrum_v1::is_valid(&words) {
            tracing::debug!(attempts, kind = kind.name(), "Electrum-V2 seed version found");
            return Ok(words);
        }
        attempts += 1;
        value += 1u32;
    }
}

/// Decode 12 or 24 words to 17 or 33 bytes.
///
/// # Errors
///
/// Returns `WalletError::Mnemonic` for a bad count, unknown word or a
/// phrase without a seed version.
pub fn decode(words: &[String], language: Language) -> Result<Zeroizing<Vec<u8>>, WalletError> {
    let length = entropy_length(words.len())
        .ok_or_else(|| invalid_words_count(Scheme::ElectrumV2, words.len()))?;
    if !LANGUAGES.contains(&language) {
        return Err(super::unsupported_language(Scheme::ElectrumV2, language));
    }
    if detect_type(words).is_none() {
        return Err(WalletError::Mnemonic(ErrorDetail::msg(
            "phrase does not carry an Electrum-V2 seed version",
        )));
    }
    let list = wordlists::bip39(language);
    let n = BigUint::from(list.len());
    let mut value = BigUint::zero();
    for (position, word) in words.iter().enumerate().rev() {
        let index = list.index_of(word).ok_or_else(|| unknown_word(position, language))?;
        value = value * &n + index;
    }
    let bytes = value.to_bytes_be();
    let mut entropy = Zeroizing::new(vec![0u8; length]);
    entropy[length - bytes.len()..].copy_from_slice(&bytes);
    Ok(entropy)
}
