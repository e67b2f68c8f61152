//! Entropy generation and validation per mnemonic scheme.
//!
//! Each [`Scheme`] accepts a fixed set of strengths (in bits):
//!
//! | Scheme | Strengths |
//! |--------|-----------|
//! | BIP39 | 128, 160, 192, 224, 256 |
//! | Algorand | 256 |
//! | Electrum-v1 | 128, 256 (legacy 24-word form) |
//! | Electrum-v2 | 132, 264 (bit length of the integer value) |
//! | Monero | 128, 256 |

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::encoding::hex;
use crate::error::{ErrorDetail, WalletError};
use crate::memory::SecretBuffer;

/// BIP39 strengths.
pub const BIP39_STRENGTHS: [usize; 5] = [128, 160, 192, 224, 256];
/// Algorand strengths.
pub const ALGORAND_STRENGTHS: [usize; 1] = [256];
/// Electrum-v1 strengths.
pub const ELECTRUM_V1_STRENGTHS: [usize; 2] = [128, 256];
/// Electrum-v2 strengths.
pub const ELECTRUM_V2_STRENGTHS: [usize; 2] = [132, 264];
/// Monero strengths.
pub const MONERO_STRENGTHS: [usize; 2] = [128, 256];

/// Entropy and mnemonic scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scheme {
    /// BIP39.
    #[default]
    #[serde(rename = "BIP39")]
    Bip39,
    /// Algorand 25-word mnemonics.
    #[serde(rename = "Algorand")]
    Algorand,
    /// Electrum 1.x seeds.
    #[serde(rename = "Electrum-V1")]
    ElectrumV1,
    /// Electrum 2.x+ versioned seeds.
    #[serde(rename = "Electrum-V2")]
    ElectrumV2,
    /// Monero.
    #[serde(rename = "Monero")]
    Monero,
}

impl Scheme {
    /// All schemes.
    pub const ALL: [Self; 5] = [
        Self::Bip39,
        Self::Algorand,
        Self::ElectrumV1,
        Self::ElectrumV2,
        Self::Monero,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bip39 => "BIP39",
            Self::Algorand => "Algorand",
            Self::ElectrumV1 => "Electrum-V1",
            Self::ElectrumV2 => "Electrum-V2",
            Self::Monero => "Monero",
        }
    }

    /// Accepted strengths in bits.
    #[must_use]
    pub const fn strengths(self) -> &'static [usize] {
        match self {
            Self::Bip39 => &BIP39_STRENGTHS,
            Self::Algorand => &ALGORAND_STRENGTHS,
            Self::ElectrumV1 => &ELECTRUM_V1_STRENGTHS,
            Self::ElectrumV2 => &ELECTRUM_V2_STRENGTHS,
            Self::Monero => &MONERO_STRENGTHS,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                WalletError::Entropy(ErrorDetail::mismatch(
                    "unknown scheme",
                    Self::ALL.map(Self::name).join(", "),
                    s,
                ))
            })
    }
}

/// Returns `true` if `bits` is an accepted strength for `scheme`.
#[must_use]
pub fn is_valid_strength(scheme: Scheme, bits: usize) -> bool {
    scheme.strengths().contains(&bits)
}

/// Byte length holding `strength` bits.
const fn byte_length(strength: usize) -> usize {
    strength.div_ceil(8)
}

/// Validated entropy bytes, held in locked memory.
#[derive(Clone, PartialEq, Eq)]
pub struct Entropy {
    scheme: Scheme,
    strength: usize,
    bytes: SecretBuffer,
}

impl Entropy {
    /// Draw fresh entropy from the OS CSPRNG.
    ///
    /// Electrum-v2 entropy has its high bits fixed so the value has exactly
    /// `strength` bits.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Entropy` for an unsupported strength or when
    /// the OS RNG fails.
    pub fn generate(scheme: Scheme, strength: usize) -> Result<Self, WalletError> {
        check_strength(scheme, strength)?;
        let random = SecretBuffer::random(byte_length(strength))?;
        let bytes = if scheme == Scheme::ElectrumV2 {
            let mut raw = random.expose().to_vec();
            let top_bits = strength - (raw.len() - 1) * 8;
            let mask = u8::try_from((1u16 << top_bits) - 1).unwrap_or(u8::MAX);
            raw[0] &= mask;
            raw[0] |= 1 << (top_bits - 1);
            SecretBuffer::from(raw)
        } else {
            random
        };
        tracing::debug!(scheme = scheme.name(), strength, "entropy generated");
        Ok(Self {
            scheme,
            strength,
            bytes,
        })
    }

    /// Wrap existing bytes after validating them.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Entropy` if the bytes do not fit the scheme.
    pub fn new(scheme: Scheme, bytes: &[u8]) -> Result<Self, WalletError> {
        let strength = validate(scheme, bytes)?;
        Ok(Self {
            scheme,
            strength,
            bytes: SecretBuffer::new(bytes),
        })
    }

    /// Parse hex entropy.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Entropy` on bad hex or invalid entropy.
    pub fn from_hex(scheme: Scheme, text: &str) -> Result<Self, WalletError> {
        let bytes = zeroize::Zeroizing::new(
            hex::decode(text).map_err(|e| WalletError::Entropy(e.detail().clone()))?,
        );
        Self::new(scheme, &bytes)
    }

    /// The scheme this entropy was validated for.
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Strength in bits.
    #[must_use]
    pub const fn strength(&self) -> usize {
        self.strength
    }

    /// Raw bytes.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        self.bytes.expose()
    }

    /// Lowercase hex of the raw bytes.
    #[must_use]
    pub fn to_hex(&self) -> zeroize::Zeroizing<String> {
        zeroize::Zeroizing::new(hex::encode(self.expose()))
    }
}

impl fmt::Debug for Entropy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entropy")
            .field("scheme", &self.scheme)
            .field("strength", &self.strength)
            .field("bytes", &self.bytes)
            .finish()
    }
}

fn check_strength(scheme: Scheme, strength: usize) -> Result<(), WalletError> {
    if is_valid_strength(scheme, strength) {
        Ok(())
    } else {
        Err(WalletError::Entropy(ErrorDetail::mismatch(
            format!("unsupported {scheme} strength"),
            format_strengths(scheme),
            strength,
        )))
    }
}

fn format_strengths(scheme: Scheme) -> String {
    scheme
        .strengths()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate entropy bytes for a scheme and return their strength in bits.
///
/// For Electrum-v2 the strength is the bit length of the big-endian value,
/// which must equal one of the accepted strengths; the byte length must
/// match that strength.
///
/// # Errors
///
/// Returns `WalletError::Entropy` with the accepted strengths as `expected`.
pub fn validate(scheme: Scheme, bytes: &[u8]) -> Result<usize, WalletError> {
    let strength = if scheme == Scheme::ElectrumV2 {
        let bits = usize::try_from(BigUint::from_bytes_be(bytes).bits()).unwrap_or(usize::MAX);
        if bytes.len() != byte_length(bits) {
            return Err(WalletError::Entropy(ErrorDetail::mismatch(
                "Electrum-V2 entropy value does not fill its bytes",
                format!("{} bytes", byte_length(bits)),
                bytes.len(),
            )));
        }
        bits
    } else {
        bytes.len() * 8
    };
    check_strength(scheme, strength)?;
    Ok(strength)
}
