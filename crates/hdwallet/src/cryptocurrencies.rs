//! Typed cryptocurrency catalogue.
//!
//! Each [`Cryptocurrency`] names its curve, the HD engines that can drive
//! it, the address types it uses and the per-network prefixes the codecs
//! and extended keys need. The first engine and the first address type of
//! an entry are its defaults.

use std::fmt;
use std::str::FromStr;

use hdwallet_core::entropy::Scheme;
use hdwallet_core::{
    AddressParams, AddressType, CardanoType, DerivationPath, EccKind, ErrorDetail, ExtendedKeyVersions, HdOptions,
    Network, PublicKeyType, SeedScheme, WalletError,
};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// HD engine kinds
// ---------------------------------------------------------------------------

/// HD engine family a wallet runs on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HdKind {
    /// BIP32 / SLIP-10 over the cryptocurrency's curve.
    #[default]
    #[serde(rename = "BIP32")]
    Bip32,
    /// Cardano Kholaw engine.
    #[serde(rename = "Cardano")]
    Cardano,
    /// Algorand Peikert engine.
    #[serde(rename = "Algorand")]
    Algorand,
    /// Electrum 1.x sequence engine.
    #[serde(rename = "Electrum-V1")]
    ElectrumV1,
    /// Electrum 2.x+ engine.
    #[serde(rename = "Electrum-V2")]
    ElectrumV2,
    /// Monero spend/view engine.
    #[serde(rename = "Monero")]
    Monero,
}

impl HdKind {
    /// All engine kinds.
    pub const ALL: [Self; 6] = [
        Self::Bip32,
        Self::Cardano,
        Self::Algorand,
        Self::ElectrumV1,
        Self::ElectrumV2,
        Self::Monero,
    ];

    /// Configuration name; matches the engine's `Hd::name`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bip32 => "BIP32",
            Self::Cardano => "Cardano",
            Self::Algorand => "Algorand",
            Self::ElectrumV1 => "Electrum-V1",
            Self::ElectrumV2 => "Electrum-V2",
            Self::Monero => "Monero",
        }
    }

    /// Mnemonic scheme the engine's phrases are written in.
    #[must_use]
    pub const fn mnemonic_scheme(self) -> Scheme {
        match self {
            Self::Bip32 | Self::Cardano => Scheme::Bip39,
            Self::Algorand => Scheme::Algorand,
            Self::ElectrumV1 => Scheme::ElectrumV1,
            Self::ElectrumV2 => Scheme::ElectrumV2,
            Self::Monero => Scheme::Monero,
        }
    }

    /// Seed scheme feeding the engine.
    #[must_use]
    pub const fn seed_scheme(self, cardano_type: CardanoType) -> SeedScheme {
        match self {
            Self::Bip32 => SeedScheme::Bip39,
            Self::Cardano => SeedScheme::Cardano(cardano_type),
            Self::Algorand => SeedScheme::Algorand,
            Self::ElectrumV1 => SeedScheme::ElectrumV1,
            Self::ElectrumV2 => SeedScheme::ElectrumV2,
            Self::Monero => SeedScheme::Monero,
        }
    }
}

impl fmt::Display for HdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HdKind {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                WalletError::Hd(ErrorDetail::mismatch(
                    "unknown HD engine",
                    Self::ALL.map(Self::name).join(", "),
                    s,
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Catalogue entries
// ---------------------------------------------------------------------------

/// Prefixes and version bytes of one network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetworkParams {
    /// Network tag.
    pub network: Network,
    /// P2PKH version byte.
    pub public_key_address_prefix: u32,
    /// P2SH version byte.
    pub script_address_prefix: u32,
    /// Bech32 HRP, if the chain uses one that differs from the codec default.
    pub hrp: Option<&'static str>,
    /// WIF version byte; `None` for chains without WIF.
    pub wif_prefix: Option<u8>,
    /// Extended key versions.
    pub versions: ExtendedKeyVersions,
}

/// A supported cryptocurrency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cryptocurrency {
    /// Display name.
    pub name: &'static str,
    /// Ticker symbol.
    pub symbol: &'static str,
    /// SLIP-44 coin type.
    pub coin_type: u32,
    /// Curve of the chain's keys.
    pub ecc: EccKind,
    /// Engines able to drive the chain; the first is the default.
    pub hds: &'static [HdKind],
    /// Address types of the chain; the first is the default.
    pub address_types: &'static [AddressType],
    /// Supported networks; the first is the default.
    pub networks: &'static [NetworkParams],
    /// Default derivation path of the first account's first address.
    pub default_path: &'static str,
}

impl Cryptocurrency {
    /// Default engine.
    #[must_use]
    pub fn default_hd(&self) -> HdKind {
        self.hds.first().copied().unwrap_or_default()
    }

    /// Default address type.
    #[must_use]
    pub fn default_address_type(&self) -> Option<AddressType> {
        self.address_types.first().copied()
    }

    /// Default network.
    #[must_use]
    pub fn default_network(&self) -> Network {
        self.networks.first().map_or(Network::Mainnet, |n| n.network)
    }

    /// Returns `true` if `hd` can drive this chain.
    #[must_use]
    pub fn supports_hd(&self, hd: HdKind) -> bool {
        self.hds.contains(&hd)
    }

    /// Returns `true` if the chain uses `kind`.
    #[must_use]
    pub fn supports_address_type(&self, kind: AddressType) -> bool {
        self.address_types.contains(&kind)
    }

    /// Parameters of one network.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Network` if the chain does not run `network`.
    pub fn network(&self, network: Network) -> Result<&NetworkParams, WalletError> {
        self.networks.iter().find(|n| n.network == network).ok_or_else(|| {
            let supported: Vec<&str> = self.networks.iter().map(|n| n.network.name()).collect();
            WalletError::Network(ErrorDetail::mismatch(
                format!("{} does not run this network", self.name),
                supported.join(", "),
                network,
            ))
        })
    }

    /// Address codec parameters for `network`.
    ///
    /// # Errors
    ///
    /// See [`network`](Self::network).
    pub fn address_params(&self, network: Network) -> Result<AddressParams, WalletError> {
        let params = self.network(network)?;
        let mut address = AddressParams {
            public_key_address_prefix: params.public_key_address_prefix,
            script_address_prefix: params.script_address_prefix,
            ..AddressParams::default()
        }
        .with_network(network);
        if let Some(hrp) = params.hrp {
            address = address.with_hrp(hrp);
        }
        Ok(address)
    }

    /// Engine options for `network`.
    ///
    /// # Errors
    ///
    /// See [`network`](Self::network).
    pub fn hd_options(&self, network: Network, public_key_type: PublicKeyType) -> Result<HdOptions, WalletError> {
        let params = self.network(network)?;
        Ok(HdOptions {
            versions: params.versions,
            wif_prefix: params.wif_prefix,
            public_key_type,
        })
    }

    /// The parsed default derivation path.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Derivation` if the catalogue path is malformed.
    pub fn default_derivation(&self) -> Result<DerivationPath, WalletError> {
        DerivationPath::parse(self.default_path)
    }
}

impl fmt::Display for Cryptocurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}

// ---------------------------------------------------------------------------
// Network tables
// ---------------------------------------------------------------------------

const BITCOIN_VERSIONS: ExtendedKeyVersions = ExtendedKeyVersions {
    xprv: 0x0488_ade4,
    xpub: 0x0488_b21e,
};

const TESTNET_VERSIONS: ExtendedKeyVersions = ExtendedKeyVersions {
    xprv: 0x0435_8394,
    xpub: 0x0435_87cf,
};

const fn utxo(
    network: Network,
    public_key_address_prefix: u32,
    script_address_prefix: u32,
    hrp: Option<&'static str>,
    wif_prefix: u8,
    versions: ExtendedKeyVersions,
) -> NetworkParams {
    NetworkParams {
        network,
        public_key_address_prefix,
        script_address_prefix,
        hrp,
        wif_prefix: Some(wif_prefix),
        versions,
    }
}

/// An account-model network: no WIF, codec-default prefixes.
const fn account(network: Network) -> NetworkParams {
    NetworkParams {
        network,
        public_key_address_prefix: 0x00,
        script_address_prefix: 0x05,
        hrp: None,
        wif_prefix: None,
        versions: BITCOIN_VERSIONS,
    }
}

const MAINNET: &[NetworkParams] = &[account(Network::Mainnet)];
const MAINNET_TESTNET: &[NetworkParams] = &[account(Network::Mainnet), account(Network::Testnet)];
const MONERO_NETWORKS: &[NetworkParams] = &[
    account(Network::Mainnet),
    account(Network::Stagenet),
    account(Network::Testnet),
];

const BITCOIN_ADDRESSES: &[AddressType] = &[
    AddressType::P2pkh,
    AddressType::P2sh,
    AddressType::P2wpkh,
    AddressType::P2wpkhInP2sh,
    AddressType::P2wsh,
    AddressType::P2wshInP2sh,
    AddressType::P2tr,
];

const SEGWIT_ADDRESSES: &[AddressType] = &[
    AddressType::P2pkh,
    AddressType::P2sh,
    AddressType::P2wpkh,
    AddressType::P2wpkhInP2sh,
    AddressType::P2wsh,
    AddressType::P2wshInP2sh,
];

const CARDANO_ADDRESSES: &[AddressType] = &[
    AddressType::CardanoShelley,
    AddressType::CardanoShelleyEnterprise,
    AddressType::CardanoShelleyReward,
    AddressType::CardanoByronIcarus,
    AddressType::CardanoByronLegacy,
];

const BIP32: &[HdKind] = &[HdKind::Bip32];

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

macro_rules! cryptocurrency {
    ($name:literal, $symbol:literal, $coin_type:literal, $ecc:ident, $hds:expr, $addresses:expr, $networks:expr, $path:literal) => {
        Cryptocurrency {
            name: $name,
            symbol: $symbol,
            coin_type: $coin_type,
            ecc: EccKind::$ecc,
            hds: $hds,
            address_types: $addresses,
            networks: $networks,
            default_path: $path,
        }
    };
}

/// Every supported cryptocurrency.
pub const CRYPTOCURRENCIES: &[Cryptocurrency] = &[
    cryptocurrency!(
        "Bitcoin",
        "BTC",
        0,
        Secp256k1,
        &[HdKind::Bip32, HdKind::ElectrumV2, HdKind::ElectrumV1],
        BITCOIN_ADDRESSES,
        &[
            utxo(Network::Mainnet, 0x00, 0x05, Some("bc"), 0x80, BITCOIN_VERSIONS),
            utxo(Network::Testnet, 0x6f, 0xc4, Some("tb"), 0xef, TESTNET_VERSIONS),
        ],
        "m/44'/0'/0'/0/0"
    ),
    cryptocurrency!(
        "Litecoin",
        "LTC",
        2,
        Secp256k1,
        BIP32,
        SEGWIT_ADDRESSES,
        &[
            utxo(Network::Mainnet, 0x30, 0x32, Some("ltc"), 0xb0, BITCOIN_VERSIONS),
            utxo(Network::Testnet, 0x6f, 0x3a, Some("tltc"), 0xef, TESTNET_VERSIONS),
        ],
        "m/44'/2'/0'/0/0"
    ),
    cryptocurrency!(
        "Dogecoin",
        "DOGE",
        3,
        Secp256k1,
        BIP32,
        &[AddressType::P2pkh, AddressType::P2sh],
        &[
            utxo(
                Network::Mainnet,
                0x1e,
                0x16,
                None,
                0x9e,
                ExtendedKeyVersions {
                    xprv: 0x02fa_c398,
                    xpub: 0x02fa_cafd,
                }
            ),
            utxo(Network::Testnet, 0x71, 0xc4, None, 0xf1, TESTNET_VERSIONS),
        ],
        "m/44'/3'/0'/0/0"
    ),
    cryptocurrency!("Ethereum", "ETH", 60, Secp256k1, BIP32, &[AddressType::Ethereum], MAINNET, "m/44'/60'/0'/0/0"),
    cryptocurrency!("Tron", "TRX", 195, Secp256k1, BIP32, &[AddressType::Tron], MAINNET, "m/44'/195'/0'/0/0"),
    cryptocurrency!("XinFin", "XDC", 550, Secp256k1, BIP32, &[AddressType::XinFin], MAINNET, "m/44'/550'/0'/0/0"),
    cryptocurrency!("Harmony", "ONE", 1023, Secp256k1, BIP32, &[AddressType::Harmony], MAINNET, "m/44'/1023'/0'/0/0"),
    cryptocurrency!("OKT-Chain", "OKT", 996, Secp256k1, BIP32, &[AddressType::OktChain], MAINNET, "m/44'/996'/0'/0/0"),
    cryptocurrency!("Injective", "INJ", 60, Secp256k1, BIP32, &[AddressType::Injective], MAINNET, "m/44'/60'/0'/0/0"),
    cryptocurrency!("Cosmos", "ATOM", 118, Secp256k1, BIP32, &[AddressType::Cosmos], MAINNET, "m/44'/118'/0'/0/0"),
    cryptocurrency!("Avalanche", "AVAX", 9000, Secp256k1, BIP32, &[AddressType::Avalanche], MAINNET, "m/44'/9000'/0'/0/0"),
    cryptocurrency!("Ripple", "XRP", 144, Secp256k1, BIP32, &[AddressType::Ripple], MAINNET, "m/44'/144'/0'/0/0"),
    cryptocurrency!("Filecoin", "FIL", 461, Secp256k1, BIP32, &[AddressType::Filecoin], MAINNET, "m/44'/461'/0'/0/0"),
    cryptocurrency!("Icon", "ICX", 74, Secp256k1, BIP32, &[AddressType::Icon], MAINNET, "m/44'/74'/0'/0/0"),
    cryptocurrency!("Zilliqa", "ZIL", 313, Secp256k1, BIP32, &[AddressType::Zilliqa], MAINNET, "m/44'/313'/0'/0/0"),
    cryptocurrency!("Ergo", "ERG", 429, Secp256k1, BIP32, &[AddressType::Ergo], MAINNET_TESTNET, "m/44'/429'/0'/0/0"),
    cryptocurrency!("Neo", "NEO", 888, Nist256p1, BIP32, &[AddressType::Neo], MAINNET, "m/44'/888'/0'/0/0"),
    cryptocurrency!("Stellar", "XLM", 148, Slip10Ed25519, BIP32, &[AddressType::Stellar], MAINNET, "m/44'/148'/0'"),
    cryptocurrency!("Tezos", "XTZ", 1729, Slip10Ed25519, BIP32, &[AddressType::Tezos], MAINNET, "m/44'/1729'/0'/0'"),
    cryptocurrency!("Solana", "SOL", 501, Slip10Ed25519, BIP32, &[AddressType::Solana], MAINNET, "m/44'/501'/0'/0'"),
    cryptocurrency!("Aptos", "APT", 637, Slip10Ed25519, BIP32, &[AddressType::Aptos], MAINNET, "m/44'/637'/0'/0'/0'"),
    cryptocurrency!("Sui", "SUI", 784, Slip10Ed25519, BIP32, &[AddressType::Sui], MAINNET, "m/44'/784'/0'/0'/0'"),
    cryptocurrency!("Near", "NEAR", 397, Slip10Ed25519, BIP32, &[AddressType::Near], MAINNET, "m/44'/397'/0'"),
    cryptocurrency!("Iota", "IOTA", 4218, Slip10Ed25519, BIP32, &[AddressType::Iota], MAINNET, "m/44'/4218'/0'/0'/0'"),
    cryptocurrency!(
        "MultiversX",
        "EGLD",
        508,
        Slip10Ed25519,
        BIP32,
        &[AddressType::MultiversX],
        MAINNET,
        "m/44'/508'/0'/0'/0'"
    ),
    cryptocurrency!("Nano", "XNO", 165, Slip10Ed25519Blake2b, BIP32, &[AddressType::Nano], MAINNET, "m/44'/165'/0'"),
    cryptocurrency!(
        "Algorand",
        "ALGO",
        283,
        KholawEd25519,
        &[HdKind::Algorand],
        &[AddressType::Algorand],
        MAINNET,
        "m/44'/283'/0'/0/0"
    ),
    cryptocurrency!(
        "Cardano",
        "ADA",
        1815,
        KholawEd25519,
        &[HdKind::Cardano],
        CARDANO_ADDRESSES,
        MAINNET_TESTNET,
        "m/1852'/1815'/0'/0/0"
    ),
    cryptocurrency!(
        "Monero",
        "XMR",
        128,
        Slip10Ed25519Monero,
        &[HdKind::Monero],
        &[AddressType::Monero],
        MONERO_NETWORKS,
        "m/0/0"
    ),
];

/// Look up a cryptocurrency by symbol or name, ignoring case.
///
/// # Errors
///
/// Returns `WalletError::Symbol` for an unknown symbol.
pub fn get_cryptocurrency(symbol: &str) -> Result<&'static Cryptocurrency, WalletError> {
    let symbol = symbol.trim();
    CRYPTOCURRENCIES
        .iter()
        .find(|c| c.symbol.eq_ignore_ascii_case(symbol) || c.name.eq_ignore_ascii_case(symbol))
        .ok_or_else(|| {
            WalletError::Symbol(ErrorDetail::mismatch(
                "unknown cryptocurrency",
                "a supported symbol",
                symbol,
            ))
        })
}
