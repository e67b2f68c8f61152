//! `hdwallet-core`: hierarchical deterministic wallet kernel.
//!
//! Pure computation: no I/O, no async, no global state beyond embedded
//! wordlists. The pipeline runs entropy → mnemonic → seed → HD engine →
//! address, one module per stage.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod memory;

pub mod crypto;
pub mod encoding;

pub mod ecc;

pub mod entropy;
pub mod mnemonic;
pub mod seed;

pub mod derivation;
pub mod keys;

pub mod hd;

pub mod addresses;

pub use addresses::{Address, AddressParams, AddressType, Network};
pub use derivation::{Derivation, DerivationPath, PathIndex};
pub use ecc::{Bip32Curve, ChainCode, Ecc, EccKind, EccPoint, EccPrivateKey, EccPublicKey};
pub use entropy::{Entropy, Scheme};
pub use error::{ErrorDetail, WalletError};
pub use hd::{
    AlgorandHd, Bip32Hd, CardanoHd, ElectrumV1Hd, ElectrumV2Hd, ElectrumV2Mode, ExtendedKeyVersions, Hd,
    HdOptions, MoneroHd, MoneroNetwork,
};
pub use keys::{private_key_to_wif, wif_to_private_key, ExtendedKey, PublicKeyType};
pub use memory::{LockedRegion, SecretBuffer, SecretBytes};
pub use mnemonic::{ElectrumV2Type, Language, Mnemonic};
pub use seed::{CardanoType, Seed, SeedScheme};
