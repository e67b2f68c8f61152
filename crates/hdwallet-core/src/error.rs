//! Error types for `hdwallet-core`.
//!
//! Every failure carries an [`ErrorDetail`]: a message plus an optional
//! expected-vs-got pair describing the specific mismatch.

use std::fmt;

use thiserror::Error;

/// Message and optional expected/got values attached to every error kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorDetail {
    /// Human-readable description of the failure.
    pub message: String,
    /// What the operation required, if the failure is a mismatch.
    pub expected: Option<String>,
    /// What the operation received, if the failure is a mismatch.
    pub got: Option<String>,
}

impl ErrorDetail {
    /// A detail with only a message.
    #[must_use]
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            expected: None,
            got: None,
        }
    }

    /// A detail describing an expected-vs-got mismatch.
    #[must_use]
    pub fn mismatch(
        message: impl Into<String>,
        expected: impl fmt::Display,
        got: impl fmt::Display,
    ) -> Self {
        Self {
            message: message.into(),
            expected: Some(expected.to_string()),
            got: Some(got.to_string()),
        }
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(expected) = &self.expected {
            write!(f, ", expected: {expected}")?;
        }
        if let Some(got) = &self.got {
            write!(f, ", got: {got}")?;
        }
        Ok(())
    }
}

impl From<&str> for ErrorDetail {
    fn from(message: &str) -> Self {
        Self::msg(message)
    }
}

impl From<String> for ErrorDetail {
    fn from(message: String) -> Self {
        Self::msg(message)
    }
}

/// Errors produced by wallet operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    /// Entropy has an unsupported strength or an out-of-range value.
    #[error("entropy error: {0}")]
    Entropy(ErrorDetail),

    /// A checksum (mnemonic, Base58Check, address) did not verify.
    #[error("checksum error: {0}")]
    Checksum(ErrorDetail),

    /// Mnemonic word count, language, or word membership is invalid.
    #[error("mnemonic error: {0}")]
    Mnemonic(ErrorDetail),

    /// Seed derivation failed or the seed has the wrong length.
    #[error("seed error: {0}")]
    Seed(ErrorDetail),

    /// HD engine misuse (missing private key, unsupported operation).
    #[error("HD error: {0}")]
    Hd(ErrorDetail),

    /// Derivation path syntax or child-index failure.
    #[error("derivation error: {0}")]
    Derivation(ErrorDetail),

    /// Elliptic-curve point or scalar failure.
    #[error("ECC error: {0}")]
    Ecc(ErrorDetail),

    /// Cryptocurrency parameters are missing or inconsistent.
    #[error("cryptocurrency error: {0}")]
    Cryptocurrency(ErrorDetail),

    /// Extended key serialization failure.
    #[error("extended key error: {0}")]
    ExtendedKey(ErrorDetail),

    /// Address encoding or decoding failure.
    #[error("address error: {0}")]
    Address(ErrorDetail),

    /// Wallet Import Format failure.
    #[error("WIF error: {0}")]
    Wif(ErrorDetail),

    /// Public key bytes are not a valid key for the curve.
    #[error("public key error: {0}")]
    PublicKey(ErrorDetail),

    /// Private key bytes are not a valid key for the curve.
    #[error("private key error: {0}")]
    PrivateKey(ErrorDetail),

    /// Extended private key is malformed.
    #[error("extended private key error: {0}")]
    XPrivateKey(ErrorDetail),

    /// Extended public key is malformed.
    #[error("extended public key error: {0}")]
    XPublicKey(ErrorDetail),

    /// Unknown or unsupported network.
    #[error("network error: {0}")]
    Network(ErrorDetail),

    /// Unknown cryptocurrency symbol.
    #[error("symbol error: {0}")]
    Symbol(ErrorDetail),

    /// Semantic (address/xkey type) mismatch.
    #[error("semantic error: {0}")]
    Semantic(ErrorDetail),
}

impl WalletError {
    /// The detail carried by any error kind.
    #[must_use]
    pub const fn detail(&self) -> &ErrorDetail {
        match self {
            Self::Entropy(d)
            | Self::Checksum(d)
            | Self::Mnemonic(d)
            | Self::Seed(d)
            | Self::Hd(d)
            | Self::Derivation(d)
            | Self::Ecc(d)
            | Self::Cryptocurrency(d)
            | Self::ExtendedKey(d)
            | Self::Address(d)
            | Self::Wif(d)
            | Self::PublicKey(d)
            | Self::PrivateKey(d)
            | Self::XPrivateKey(d)
            | Self::XPublicKey(d)
            | Self::Network(d)
            | Self::Symbol(d)
            | Self::Semantic(d) => d,
        }
    }
}
