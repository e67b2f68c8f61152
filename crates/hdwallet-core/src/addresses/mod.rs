//! Address codecs.
//!
//! Every codec is a unit type implementing [`Address`]: `encode` turns a
//! public key into the chain's address text, `decode` checks an address and
//! returns its canonical payload (a key hash, or the key itself for chains
//! that embed it). Codecs that share a base delegate to it: Ripple is P2PKH
//! with another alphabet, Avalanche is Cosmos behind a chain prefix, Tron,
//! `XinFin`, Harmony, OKT-Chain and Injective wrap the Ethereum key hash.
//!
//! [`AddressType`] names every codec at runtime and forwards to it; all
//! codecs read what they need from one [`AddressParams`] record.

pub mod account;
pub mod algorand;
pub mod bitcoin;
pub mod cardano;
pub mod cosmos;
pub mod ergo;
pub mod ethereum;
pub mod filecoin;
pub mod monero;
pub mod nano;
pub mod neo;
pub mod stellar;
pub mod tezos;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::derivation::DerivationPath;
use crate::ecc::weierstrass::secp256k1;
use crate::ecc::{ChainCode, EccPublicKey, Ed25519PublicKey};
use crate::encoding::base58::Alphabet;
use crate::error::{ErrorDetail, WalletError};
use crate::keys::PublicKeyType;

/// An address codec.
pub trait Address {
    /// Configuration name of the address type.
    const NAME: &'static str;

    /// Encode a public key.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::PublicKey` if the key is not valid for the
    /// codec's curve, and `WalletError::Address` if a required parameter is
    /// missing.
    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError>;

    /// Decode an address into its payload.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Address` on a wrong prefix, HRP, length or
    /// version byte, `WalletError::Checksum` on a checksum mismatch and
    /// `WalletError::PublicKey` if an embedded key is not on the curve.
    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError>;
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Network an address belongs to, for codecs that encode it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Main network.
    #[default]
    Mainnet,
    /// Test network.
    Testnet,
    /// Monero stage network.
    Stagenet,
}

impl Network {
    /// Configuration name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Stagenet => "stagenet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Mainnet, Self::Testnet, Self::Stagenet]
            .into_iter()
            .find(|n| n.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                WalletError::Network(ErrorDetail::mismatch(
                    "unknown network",
                    "mainnet, testnet, stagenet",
                    s,
                ))
            })
    }
}

/// Parameters read by the address codecs.
///
/// Prefixes and HRPs left as `None` fall back to each codec's mainnet
/// default. Key material (chain codes, path keys, companion public keys) is
/// runtime-only and never serialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressParams {
    /// P2PKH version, `0x00` for Bitcoin mainnet.
    pub public_key_address_prefix: u32,
    /// P2SH version, `0x05` for Bitcoin mainnet.
    pub script_address_prefix: u32,
    /// Bech32 human-readable part.
    pub hrp: Option<String>,
    /// Text prefix (`0x`, `nano_`, `X-`, `tz1`, ...).
    pub prefix: Option<String>,
    /// Which encoding of a secp256k1 key P2PKH hashes.
    pub public_key_type: PublicKeyType,
    /// Base58 alphabet for P2PKH and P2SH.
    pub alphabet: Alphabet,
    /// Emit lowercase hex instead of EIP-55 and accept any case on decode.
    pub skip_checksum_encode: bool,
    /// Network for Cardano Shelley, Ergo and Monero.
    pub network: Network,
    /// Cardano Byron protocol magic; `None` on mainnet.
    pub protocol_magic: Option<u32>,
    /// Derivation path stored in Byron-Legacy addresses.
    pub path: Option<DerivationPath>,
    /// Monero: encode a sub-address.
    pub sub_address: bool,
    /// Chain code of the key, for Cardano Byron addresses.
    #[serde(skip)]
    pub chain_code: Option<ChainCode>,
    /// Byron-Legacy path encryption key.
    #[serde(skip)]
    pub path_key: Option<Vec<u8>>,
    /// Staking public key for Cardano Shelley base addresses.
    #[serde(skip)]
    pub staking_public_key: Option<Vec<u8>>,
    /// Monero public view key.
    #[serde(skip)]
    pub view_public_key: Option<Vec<u8>>,
    /// Monero integrated-address payment id.
    #[serde(skip)]
    pub payment_id: Option<[u8; 8]>,
}

impl Default for AddressParams {
    fn default() -> Self {
        Self {
            public_key_address_prefix: 0x00,
            script_address_prefix: 0x05,
            hrp: None,
            prefix: None,
            public_key_type: PublicKeyType::Compressed,
            alphabet: Alphabet::Bitcoin,
            skip_checksum_encode: false,
            network: Network::Mainnet,
            protocol_magic: None,
            path: None,
            sub_address: false,
            chain_code: None,
            path_key: None,
            staking_public_key: None,
            view_public_key: None,
            payment_id: None,
        }
    }
}

impl AddressParams {
    /// The HRP, or `default` when unset.
    #[must_use]
    pub fn hrp_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.hrp.as_deref().unwrap_or(default)
    }

    /// The text prefix, or `default` when unset.
    #[must_use]
    pub fn prefix_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.prefix.as_deref().unwrap_or(default)
    }

    /// Set the HRP.
    #[must_use]
    pub fn with_hrp(mut self, hrp: impl Into<String>) -> Self {
        self.hrp = Some(hrp.into());
        self
    }

    /// Set the text prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set the network.
    #[must_use]
    pub const fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }
}

// ---------------------------------------------------------------------------
// Runtime dispatch
// ---------------------------------------------------------------------------

macro_rules! address_types {
    ($( $(#[$doc:meta])* $variant:ident => $codec:ty ),* $(,)?) => {
        /// Every supported address type.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum AddressType {
            $( $(#[$doc])* $variant, )*
        }

        impl AddressType {
            /// All address types.
            pub const ALL: &'static [Self] = &[ $( Self::$variant, )* ];

            /// Configuration name.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => <$codec as Address>::NAME, )*
                }
            }

            /// Encode `public_key` as this address type.
            ///
            /// # Errors
            ///
            /// See [`Address::encode`].
            pub fn encode(self, public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
                let address = match self {
                    $( Self::$variant => <$codec as Address>::encode(public_key, params), )*
                }?;
                tracing::trace!(address_type = self.name(), %address, "address encoded");
                Ok(address)
            }

            /// Decode an address of this type.
            ///
            /// # Errors
            ///
            /// See [`Address::decode`].
            pub fn decode(self, address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
                match self {
                    $( Self::$variant => <$codec as Address>::decode(address, params), )*
                }
            }
        }
    };
}

address_types! {
    /// Pay to public key hash.
    P2pkh => bitcoin::P2pkh,
    /// Pay to script hash of a P2PKH script.
    P2sh => bitcoin::P2sh,
    /// Native SegWit v0 key hash.
    P2wpkh => bitcoin::P2wpkh,
    /// P2WPKH nested in P2SH.
    P2wpkhInP2sh => bitcoin::P2wpkhInP2sh,
    /// Native SegWit v0 script hash.
    P2wsh => bitcoin::P2wsh,
    /// P2WSH nested in P2SH.
    P2wshInP2sh => bitcoin::P2wshInP2sh,
    /// Taproot key path.
    P2tr => bitcoin::P2tr,
    /// Ethereum and EVM chains.
    Ethereum => ethereum::Ethereum,
    /// Tron.
    Tron => ethereum::Tron,
    /// `XinFin` (`xdc` prefix).
    XinFin => ethereum::XinFin,
    /// Harmony (`one` HRP).
    Harmony => ethereum::Harmony,
    /// OKT-Chain (`ex` HRP).
    OktChain => ethereum::OktChain,
    /// Injective (`inj` HRP).
    Injective => ethereum::Injective,
    /// Cosmos SDK chains.
    Cosmos => cosmos::Cosmos,
    /// Avalanche X- and P-chains.
    Avalanche => cosmos::Avalanche,
    /// Ripple.
    Ripple => bitcoin::Ripple,
    /// Stellar account ids.
    Stellar => stellar::Stellar,
    /// Algorand.
    Algorand => algorand::Algorand,
    /// Cardano Byron, Icarus style.
    CardanoByronIcarus => cardano::ByronIcarus,
    /// Cardano Byron, legacy style with an encrypted path.
    CardanoByronLegacy => cardano::ByronLegacy,
    /// Cardano Shelley base address (payment and stake keys).
    CardanoShelley => cardano::Shelley,
    /// Cardano Shelley enterprise address (payment key only).
    CardanoShelleyEnterprise => cardano::ShelleyEnterprise,
    /// Cardano Shelley reward address (stake key).
    CardanoShelleyReward => cardano::ShelleyReward,
    /// Monero.
    Monero => monero::Monero,
    /// Nano.
    Nano => nano::Nano,
    /// Tezos implicit accounts.
    Tezos => tezos::Tezos,
    /// NEO legacy.
    Neo => neo::Neo,
    /// Filecoin secp256k1 accounts.
    Filecoin => filecoin::Filecoin,
    /// Solana.
    Solana => account::Solana,
    /// Aptos.
    Aptos => account::Aptos,
    /// Sui.
    Sui => account::Sui,
    /// Near implicit accounts.
    Near => account::Near,
    /// ICON.
    Icon => account::Icon,
    /// Zilliqa.
    Zilliqa => account::Zilliqa,
    /// Ergo P2PK.
    Ergo => ergo::Ergo,
    /// IOTA Ed25519 addresses.
    Iota => account::Iota,
    /// `MultiversX`.
    MultiversX => account::MultiversX,
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AddressType {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| WalletError::Address(ErrorDetail::mismatch("unknown address type", "a supported address type", s)))
    }
}

impl Serialize for AddressType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for AddressType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Encode `public_key` as `kind`.
///
/// # Errors
///
/// See [`Address::encode`].
pub fn encode(kind: AddressType, public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
    kind.encode(public_key, params)
}

/// Decode an address of type `kind`.
///
/// # Errors
///
/// See [`Address::decode`].
pub fn decode(kind: AddressType, address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
    kind.decode(address, params)
}

// ---------------------------------------------------------------------------
// Shared checks
// ---------------------------------------------------------------------------

pub(crate) fn secp256k1_key(public_key: &[u8]) -> Result<secp256k1::PublicKey, WalletError> {
    secp256k1::PublicKey::from_bytes(public_key)
}

/// The 32-byte ed25519 key from either the raw or `0x00`-prefixed form.
pub(crate) fn ed25519_key(public_key: &[u8]) -> Result<[u8; 32], WalletError> {
    Ok(Ed25519PublicKey::from_bytes(public_key)?.raw())
}

pub(crate) fn strip_prefix<'a>(address: &'a str, prefix: &str) -> Result<&'a str, WalletError> {
    address.strip_prefix(prefix).ok_or_else(|| {
        let got: String = address.chars().take(prefix.chars().count()).collect();
        WalletError::Address(ErrorDetail::mismatch("invalid address prefix", prefix, got))
    })
}

pub(crate) fn check_length(bytes: &[u8], expected: usize) -> Result<(), WalletError> {
    if bytes.len() == expected {
        Ok(())
    } else {
        Err(WalletError::Address(ErrorDetail::mismatch(
            "invalid address length",
            expected,
            bytes.len(),
        )))
    }
}

pub(crate) fn check_version(expected: &[u8], got: &[u8]) -> Result<(), WalletError> {
    if expected == got {
        Ok(())
    } else {
        Err(WalletError::Address(ErrorDetail::mismatch(
            "invalid address version",
            crate::encoding::hex::encode(expected),
            crate::encoding::hex::encode(got),
        )))
    }
}

pub(crate) fn check_checksum(expected: &[u8], got: &[u8]) -> Result<(), WalletError> {
    if expected == got {
        Ok(())
    } else {
        Err(WalletError::Checksum(ErrorDetail::mismatch(
            "invalid address checksum",
            crate::encoding::hex::encode(expected),
            crate::encoding::hex::encode(got),
        )))
    }
}
