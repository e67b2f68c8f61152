//! `hdwallet`: HD wallet pipeline on top of `hdwallet-core`.
//!
//! Wires entropy, mnemonic, seed, HD engine and address codecs together for
//! a named cryptocurrency, driven by a serde [`WalletConfig`], and exports
//! derived nodes as JSON.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod config;
pub mod cryptocurrencies;
pub mod dump;
pub mod wallet;

pub use config::WalletConfig;
pub use cryptocurrencies::{get_cryptocurrency, Cryptocurrency, HdKind, NetworkParams, CRYPTOCURRENCIES};
pub use dump::{NodeDump, WalletDump};
pub use wallet::HdWallet;

pub use hdwallet_core::{
    AddressType, CardanoType, DerivationPath, EccKind, ElectrumV2Mode, ErrorDetail, ExtendedKeyVersions, Language,
    Network, PublicKeyType, WalletError,
};
