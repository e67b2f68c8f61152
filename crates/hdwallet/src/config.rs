//! Serde wallet configuration.
//!
//! Every field but the symbol is optional in JSON; unset engine, address
//! type and derivation path fall back to the cryptocurrency's catalogue
//! entry at [`WalletConfig::resolve`] time.

use hdwallet_core::{
    AddressType, CardanoType, DerivationPath, EccKind, ElectrumV2Mode, ErrorDetail, ExtendedKeyVersions, Language,
    Network, PublicKeyType, WalletError,
};
use serde::{Deserialize, Serialize};

use crate::cryptocurrencies::{get_cryptocurrency, Cryptocurrency, HdKind};

// ── Wallet configuration ───────────────────────────────────────────

/// How to build an [`HdWallet`](crate::HdWallet).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WalletConfig {
    /// Cryptocurrency symbol or name, e.g. `"BTC"`.
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Network; the catalogue's first network when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<Network>,

    /// HD engine; the catalogue default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hd: Option<HdKind>,

    /// Curve; must match the cryptocurrency's when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecc: Option<EccKind>,

    /// Wordlist language for generated and re-encoded mnemonics.
    #[serde(default)]
    pub language: Language,

    /// Whether the wallet is protected by a passphrase.
    #[serde(default)]
    pub passphrase: bool,

    /// Public-key encoding for secp256k1 WIF and addresses; uncompressed
    /// for Electrum-v1 and compressed otherwise when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_type: Option<PublicKeyType>,

    /// Address type; the catalogue default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_type: Option<AddressType>,

    /// Cardano variant.
    #[serde(default)]
    pub cardano_type: CardanoType,

    /// Electrum-v2 wallet layout.
    #[serde(default)]
    pub electrum_mode: ElectrumV2Mode,

    /// Derivation path; the catalogue default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derivation: Option<DerivationPath>,

    /// BIP32 version bytes overriding the network's.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versions: Option<ExtendedKeyVersions>,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            network: None,
            hd: None,
            ecc: None,
            language: Language::default(),
            passphrase: false,
            public_key_type: None,
            address_type: None,
            cardano_type: CardanoType::default(),
            electrum_mode: ElectrumV2Mode::default(),
            derivation: None,
            versions: None,
        }
    }
}

fn default_symbol() -> String {
    "BTC".into()
}

// ── Resolution ─────────────────────────────────────────────────────

/// A configuration checked against the catalogue, every default filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Catalogue entry.
    pub cryptocurrency: &'static Cryptocurrency,
    /// Network.
    pub network: Network,
    /// Engine.
    pub hd: HdKind,
    /// Address type.
    pub address_type: AddressType,
    /// Derivation path.
    pub derivation: DerivationPath,
    /// Public-key encoding.
    pub public_key_type: PublicKeyType,
    /// Mnemonic language.
    pub language: Language,
    /// Whether a passphrase is expected.
    pub passphrase: bool,
    /// Cardano variant.
    pub cardano_type: CardanoType,
    /// Electrum-v2 layout.
    pub electrum_mode: ElectrumV2Mode,
    /// Version bytes overriding the network's.
    pub versions: Option<ExtendedKeyVersions>,
}

impl WalletConfig {
    /// Catalogue defaults for `symbol`.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Symbol` for an unknown symbol.
    pub fn for_symbol(symbol: &str) -> Result<Self, WalletError> {
        let cryptocurrency = get_cryptocurrency(symbol)?;
        Ok(Self {
            symbol: cryptocurrency.symbol.into(),
            network: Some(cryptocurrency.default_network()),
            hd: Some(cryptocurrency.default_hd()),
            ecc: Some(cryptocurrency.ecc),
            address_type: cryptocurrency.default_address_type(),
            derivation: Some(cryptocurrency.default_derivation()?),
            ..Self::default()
        })
    }

    /// Set the engine.
    #[must_use]
    pub const fn with_hd(mut self, hd: HdKind) -> Self {
        self.hd = Some(hd);
        self
    }

    /// Set the network.
    #[must_use]
    pub const fn with_network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }

    /// Set the address type.
    #[must_use]
    pub const fn with_address_type(mut self, address_type: AddressType) -> Self {
        self.address_type = Some(address_type);
        self
    }

    /// Set the derivation path.
    #[must_use]
    pub fn with_derivation(mut self, derivation: DerivationPath) -> Self {
        self.derivation = Some(derivation);
        self
    }

    /// Parse a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Cryptocurrency` for malformed JSON or unknown
    /// enum names.
    pub fn from_json(json: &str) -> Result<Self, WalletError> {
        serde_json::from_str(json)
            .map_err(|e| WalletError::Cryptocurrency(ErrorDetail::msg(format!("invalid wallet configuration: {e}"))))
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Cryptocurrency` if serialization fails.
    pub fn to_json(&self) -> Result<String, WalletError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| WalletError::Cryptocurrency(ErrorDetail::msg(format!("cannot serialize configuration: {e}"))))
    }

    /// Check the configuration against the catalogue and fill in defaults.
    ///
    /// # Errors
    ///
    /// - `WalletError::Symbol` for an unknown symbol
    /// - `WalletError::Network` for a network the chain does not run
    /// - `WalletError::Hd` for an engine that cannot drive the chain
    /// - `WalletError::Ecc` for a curve other than the chain's
    /// - `WalletError::Address` for an address type the chain does not use
    pub fn resolve(&self) -> Result<ResolvedConfig, WalletError> {
        let cryptocurrency = get_cryptocurrency(&self.symbol)?;
        let network = self.network.unwrap_or_else(|| cryptocurrency.default_network());
        cryptocurrency.network(network)?;

        let hd = self.hd.unwrap_or_else(|| cryptocurrency.default_hd());
        if !cryptocurrency.supports_hd(hd) {
            let supported: Vec<&str> = cryptocurrency.hds.iter().map(|h| h.name()).collect();
            return Err(WalletError::Hd(ErrorDetail::mismatch(
                format!("{} cannot run this HD engine", cryptocurrency.name),
                supported.join(", "),
                hd,
            )));
        }

        if let Some(ecc) = self.ecc {
            if ecc != cryptocurrency.ecc {
                return Err(WalletError::Ecc(ErrorDetail::mismatch(
                    format!("wrong curve for {}", cryptocurrency.name),
                    cryptocurrency.ecc.name(),
                    ecc.name(),
                )));
            }
        }

        let address_type = match self.address_type {
            Some(kind) if cryptocurrency.supports_address_type(kind) => kind,
            Some(kind) => {
                let supported: Vec<&str> = cryptocurrency.address_types.iter().map(|a| a.name()).collect();
                return Err(WalletError::Address(ErrorDetail::mismatch(
                    format!("{} does not use this address type", cryptocurrency.name),
                    supported.join(", "),
                    kind,
                )));
            }
            None => default_address_type(cryptocurrency, hd, self)?,
        };

        let derivation = match &self.derivation {
            Some(path) => path.clone(),
            None => default_derivation(cryptocurrency, hd, self.cardano_type)?,
        };

        let public_key_type = self.public_key_type.unwrap_or(match hd {
            HdKind::ElectrumV1 => PublicKeyType::Uncompressed,
            _ => PublicKeyType::Compressed,
        });

        Ok(ResolvedConfig {
            cryptocurrency,
            network,
            hd,
            address_type,
            derivation,
            public_key_type,
            language: self.language,
            passphrase: self.passphrase,
            cardano_type: self.cardano_type,
            electrum_mode: self.electrum_mode,
            versions: self.versions,
        })
    }
}

/// Default address type, following the engine where it fixes one.
fn default_address_type(
    cryptocurrency: &Cryptocurrency,
    hd: HdKind,
    config: &WalletConfig,
) -> Result<AddressType, WalletError> {
    let kind = match hd {
        HdKind::ElectrumV2 => Some(config.electrum_mode.address_type()),
        HdKind::Cardano => Some(match config.cardano_type {
            CardanoType::ByronLegacy => AddressType::CardanoByronLegacy,
            CardanoType::ByronIcarus | CardanoType::ByronLedger => AddressType::CardanoByronIcarus,
            CardanoType::ShelleyIcarus | CardanoType::ShelleyLedger => AddressType::CardanoShelley,
        }),
        _ => cryptocurrency.default_address_type(),
    };
    kind.ok_or_else(|| {
        WalletError::Address(ErrorDetail::msg(format!("{} has no address type", cryptocurrency.name)))
    })
}

/// Default path; Electrum engines take `m/change/address` in both modes
/// and Byron wallets keep their own layouts.
fn default_derivation(
    cryptocurrency: &Cryptocurrency,
    hd: HdKind,
    cardano_type: CardanoType,
) -> Result<DerivationPath, WalletError> {
    match (hd, cardano_type) {
        (HdKind::ElectrumV1 | HdKind::ElectrumV2, _) => DerivationPath::parse("m/0/0"),
        (HdKind::Cardano, CardanoType::ByronLegacy) => DerivationPath::parse("m/0'/0'"),
        (HdKind::Cardano, CardanoType::ByronIcarus | CardanoType::ByronLedger) => {
            DerivationPath::parse("m/44'/1815'/0'/0/0")
        }
        _ => cryptocurrency.default_derivation(),
    }
}
