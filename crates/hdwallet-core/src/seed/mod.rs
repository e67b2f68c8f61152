//! Seed derivation from mnemonics and entropy.
//!
//! | Scheme | Seed |
//! |--------|------|
//! | BIP39, Cardano Ledger | `PBKDF2-HMAC-SHA512(mnemonic, "mnemonic" + passphrase, 2048, 64)` |
//! | Electrum-v2 | `PBKDF2-HMAC-SHA512(mnemonic, "electrum" + passphrase, 2048, 64)` |
//! | Electrum-v1 | hex entropy stretched by 100 000 SHA-256 rounds (32 bytes) |
//! | Cardano Icarus | the entropy; the passphrase is applied by the Cardano engine |
//! | Cardano Byron-Legacy | `Blake2b-256(cbor(bytes(entropy)))` |
//! | Monero, Algorand | the entropy |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

use crate::crypto::{blake2b_256, pbkdf2_sha512, sha256};
use crate::encoding::{cbor, hex};
use crate::entropy::Scheme;
use crate::error::{ErrorDetail, WalletError};
use crate::memory::SecretBuffer;
use crate::mnemonic::electrum_v2::normalize_text;
use crate::mnemonic::Mnemonic;

/// PBKDF2 rounds for BIP39 and Electrum-v2 seeds.
pub const MNEMONIC_ROUNDS: u32 = 2048;

/// SHA-256 rounds of the Electrum-v1 key stretch.
pub const ELECTRUM_V1_ROUNDS: u32 = 100_000;

/// Cardano key-derivation variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardanoType {
    /// Byron addresses, Icarus master key.
    ByronIcarus,
    /// Byron addresses, Ledger master key.
    ByronLedger,
    /// Daedalus Byron addresses with encrypted derivation paths.
    ByronLegacy,
    /// Shelley addresses, Icarus master key.
    #[default]
    ShelleyIcarus,
    /// Shelley addresses, Ledger master key.
    ShelleyLedger,
}

impl CardanoType {
    /// All variants.
    pub const ALL: [Self; 5] = [
        Self::ByronIcarus,
        Self::ByronLedger,
        Self::ByronLegacy,
        Self::ShelleyIcarus,
        Self::ShelleyLedger,
    ];

    /// Configuration name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ByronIcarus => "byron-icarus",
            Self::ByronLedger => "byron-ledger",
            Self::ByronLegacy => "byron-legacy",
            Self::ShelleyIcarus => "shelley-icarus",
            Self::ShelleyLedger => "shelley-ledger",
        }
    }

    /// Ledger variants derive from a BIP39 seed.
    #[must_use]
    pub const fn is_ledger(self) -> bool {
        matches!(self, Self::ByronLedger | Self::ShelleyLedger)
    }

    /// Icarus variants derive from the entropy and a passphrase.
    #[must_use]
    pub const fn is_icarus(self) -> bool {
        matches!(self, Self::ByronIcarus | Self::ShelleyIcarus)
    }
}

impl fmt::Display for CardanoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CardanoType {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                WalletError::Seed(ErrorDetail::mismatch(
                    "unknown Cardano type",
                    Self::ALL.map(Self::name).join(", "),
                    s,
                ))
            })
    }
}

/// How a seed is derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeedScheme {
    /// BIP39 PBKDF2 seed.
    #[default]
    Bip39,
    /// One of the Cardano variants.
    Cardano(CardanoType),
    /// Electrum 1.x stretched key.
    ElectrumV1,
    /// Electrum 2.x+ PBKDF2 seed.
    ElectrumV2,
    /// Monero: the entropy.
    Monero,
    /// Algorand: the entropy.
    Algorand,
}

impl SeedScheme {
    /// Mnemonic scheme the seed is read from.
    #[must_use]
    pub const fn mnemonic_scheme(self) -> Scheme {
        match self {
            Self::Bip39 | Self::Cardano(_) => Scheme::Bip39,
            Self::ElectrumV1 => Scheme::ElectrumV1,
            Self::ElectrumV2 => Scheme::ElectrumV2,
            Self::Monero => Scheme::Monero,
            Self::Algorand => Scheme::Algorand,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bip39 => "BIP39",
            Self::Cardano(kind) => kind.name(),
            Self::ElectrumV1 => "Electrum-V1",
            Self::ElectrumV2 => "Electrum-V2",
            Self::Monero => "Monero",
            Self::Algorand => "Algorand",
        }
    }

    const fn takes_passphrase(self) -> bool {
        matches!(self, Self::Bip39 | Self::Cardano(_) | Self::ElectrumV2)
    }
}

impl fmt::Display for SeedScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Seed bytes held in locked memory.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed {
    scheme: SeedScheme,
    bytes: SecretBuffer,
}

impl Seed {
    /// Derive a seed from a mnemonic phrase.
    ///
    /// # Errors
    ///
    /// Returns the mnemonic error for an invalid phrase and
    /// `WalletError::Seed` when a passphrase is given to a scheme that has
    /// none.
    pub fn from_mnemonic(
        scheme: SeedScheme,
        mnemonic: &str,
        passphrase: Option<&str>,
    ) -> Result<Self, WalletError> {
        check_passphrase(scheme, passphrase)?;
        let parsed = Mnemonic::parse(scheme.mnemonic_scheme(), mnemonic)?;
        let passphrase = passphrase.unwrap_or_default();
        let bytes = match scheme {
            SeedScheme::Bip39 | SeedScheme::Cardano(CardanoType::ByronLedger | CardanoType::ShelleyLedger) => {
                bip39_seed(&parsed.normalized_phrase(), passphrase)
            }
            SeedScheme::ElectrumV2 => electrum_v2_seed(&parsed.normalized_phrase(), passphrase),
            _ => return Self::from_entropy(scheme, &parsed.to_entropy()?, None),
        };
        tracing::debug!(scheme = scheme.name(), "seed derived from mnemonic");
        Ok(Self {
            scheme,
            bytes: SecretBuffer::new(&bytes),
        })
    }

    /// Derive a seed from entropy, for schemes whose seed depends only on
    /// the entropy.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Seed` for BIP39, Cardano Ledger and
    /// Electrum-v2, which need the mnemonic text.
    pub fn from_entropy(
        scheme: SeedScheme,
        entropy: &[u8],
        passphrase: Option<&str>,
    ) -> Result<Self, WalletError> {
        check_passphrase(scheme, passphrase)?;
        let bytes: Zeroizing<Vec<u8>> = match scheme {
            SeedScheme::ElectrumV1 => Zeroizing::new(electrum_v1_seed(entropy).to_vec()),
            SeedScheme::Cardano(CardanoType::ByronLegacy) => {
                Zeroizing::new(byron_legacy_seed(entropy).to_vec())
            }
            SeedScheme::Cardano(kind) if kind.is_icarus() => Zeroizing::new(entropy.to_vec()),
            SeedScheme::Monero | SeedScheme::Algorand => Zeroizing::new(entropy.to_vec()),
            _ => {
                return Err(WalletError::Seed(ErrorDetail::mismatch(
                    "seed scheme needs the mnemonic phrase",
                    "Electrum-V1, Cardano Icarus/Byron-Legacy, Monero or Algorand",
                    scheme,
                )))
            }
        };
        Ok(Self {
            scheme,
            bytes: SecretBuffer::new(&bytes),
        })
    }

    /// Wrap raw seed bytes.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Seed` for an empty seed.
    pub fn from_bytes(scheme: SeedScheme, bytes: &[u8]) -> Result<Self, WalletError> {
        if bytes.is_empty() {
            return Err(WalletError::Seed(ErrorDetail::msg("seed is empty")));
        }
        Ok(Self {
            scheme,
            bytes: SecretBuffer::new(bytes),
        })
    }

    /// Parse a hex seed.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Seed` for bad hex or an empty seed.
    pub fn from_hex(scheme: SeedScheme, text: &str) -> Result<Self, WalletError> {
        let bytes = Zeroizing::new(
            hex::decode(text).map_err(|e| WalletError::Seed(e.detail().clone()))?,
        );
        Self::from_bytes(scheme, &bytes)
    }

    /// The scheme.
    #[must_use]
    pub const fn scheme(&self) -> SeedScheme {
        self.scheme
    }

    /// Raw bytes.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        self.bytes.expose()
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` for an empty seed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercase hex.
    #[must_use]
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.expose()))
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seed")
            .field("scheme", &self.scheme)
            .field("bytes", &self.bytes)
            .finish()
    }
}

fn check_passphrase(scheme: SeedScheme, passphrase: Option<&str>) -> Result<(), WalletError> {
    match passphrase {
        Some(p) if !p.is_empty() && !scheme.takes_passphrase() => Err(WalletError::Seed(
            ErrorDetail::msg(format!("{scheme} seeds do not take a passphrase")),
        )),
        _ => Ok(()),
    }
}

/// BIP39 seed of an already-normalized phrase.
#[must_use]
pub fn bip39_seed(phrase: &str, passphrase: &str) -> Zeroizing<Vec<u8>> {
    let password: Zeroizing<String> = Zeroizing::new(phrase.nfkd().collect());
    let salt: Zeroizing<String> = Zeroizing::new(format!("mnemonic{}", passphrase.nfkd()));
    pbkdf2_sha512(password.as_bytes(), salt.as_bytes(), MNEMONIC_ROUNDS, 64)
}

/// Electrum-v2 seed; phrase and passphrase go through Electrum
/// normalization.
#[must_use]
pub fn electrum_v2_seed(phrase: &str, passphrase: &str) -> Zeroizing<Vec<u8>> {
    let password = normalize_text(phrase);
    let salt: Zeroizing<String> = Zeroizing::new(format!("electrum{}", &*normalize_text(passphrase)));
    pbkdf2_sha512(password.as_bytes(), salt.as_bytes(), MNEMONIC_ROUNDS, 64)
}

/// Electrum-v1 key stretch over the lowercase hex of the entropy.
#[must_use]
pub fn electrum_v1_seed(entropy: &[u8]) -> Zeroizing<[u8; 32]> {
    let encoded = Zeroizing::new(hex::encode(entropy).into_bytes());
    // The first round hashes `hex || hex`; later rounds `digest || hex`.
    let mut buffer = Zeroizing::new(Vec::with_capacity(2 * encoded.len().max(32)));
    buffer.extend_from_slice(&encoded);
    let mut digest = Zeroizing::new([0u8; 32]);
    for _ in 0..ELECTRUM_V1_ROUNDS {
        buffer.extend_from_slice(&encoded);
        *digest = sha256(&buffer);
        buffer.clear();
        buffer.extend_from_slice(&*digest);
    }
    digest
}

/// Byron-Legacy seed: `Blake2b-256(cbor(bytes(entropy)))`.
#[must_use]
pub fn byron_legacy_seed(entropy: &[u8]) -> Zeroizing<[u8; 32]> {
    let encoded = Zeroizing::new(cbor::encode(&cbor::Value::Bytes(entropy.to_vec())));
    Zeroizing::new(blake2b_256(&encoded))
}
