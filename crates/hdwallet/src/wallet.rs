//! The wallet pipeline: entropy → mnemonic → seed → engine → address.
//!
//! [`HdWallet`] resolves a [`WalletConfig`] against the catalogue, builds
//! the engine the configuration names from whatever material the caller
//! has (phrase, entropy, seed, extended key, raw key, WIF) and turns the
//! engine's current node into addresses and JSON dumps.

use std::collections::BTreeMap;
use std::fmt;

use hdwallet_core::ecc::{KholawEd25519, Nist256p1, Secp256k1, Slip10Ed25519, Slip10Ed25519Blake2b, Slip10Ed25519Monero};
use hdwallet_core::encoding::hex;
use hdwallet_core::mnemonic::MnemonicOptions;
use hdwallet_core::{
    AddressType, AlgorandHd, Bip32Hd, CardanoHd, CardanoType, Derivation, DerivationPath, EccKind, ElectrumV1Hd,
    ElectrumV2Hd, ElectrumV2Mode, ElectrumV2Type, ErrorDetail, Hd, HdOptions, Mnemonic, MoneroHd, Network,
    PathIndex, Seed, WalletError,
};
use zeroize::Zeroizing;

use crate::config::{ResolvedConfig, WalletConfig};
use crate::cryptocurrencies::{Cryptocurrency, HdKind};
use crate::dump::{NodeDump, WalletDump};

/// CIP-1852 staking role index.
const STAKING_ROLE: u32 = 2;

// ---------------------------------------------------------------------------
// Engines
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
enum Engine {
    Secp256k1(Bip32Hd<Secp256k1>),
    Nist256p1(Bip32Hd<Nist256p1>),
    Slip10Ed25519(Bip32Hd<Slip10Ed25519>),
    Slip10Ed25519Blake2b(Bip32Hd<Slip10Ed25519Blake2b>),
    Slip10Ed25519Monero(Bip32Hd<Slip10Ed25519Monero>),
    KholawEd25519(Bip32Hd<KholawEd25519>),
    Cardano(CardanoHd),
    Algorand(AlgorandHd),
    ElectrumV1(ElectrumV1Hd),
    ElectrumV2(ElectrumV2Hd),
    Monero(MoneroHd),
}

macro_rules! with_engine {
    ($engine:expr, $hd:ident => $body:expr) => {
        match $engine {
            Engine::Secp256k1($hd) => $body,
            Engine::Nist256p1($hd) => $body,
            Engine::Slip10Ed25519($hd) => $body,
            Engine::Slip10Ed25519Blake2b($hd) => $body,
            Engine::Slip10Ed25519Monero($hd) => $body,
            Engine::KholawEd25519($hd) => $body,
            Engine::Cardano($hd) => $body,
            Engine::Algorand($hd) => $body,
            Engine::ElectrumV1($hd) => $body,
            Engine::ElectrumV2($hd) => $body,
            Engine::Monero($hd) => $body,
        }
    };
}

/// Build a BIP32 engine over the curve `$ecc` names.
macro_rules! bip32_engine {
    ($ecc:expr, $ctor:ident($($arg:expr),* $(,)?)) => {
        match $ecc {
            EccKind::Secp256k1 => Engine::Secp256k1(Bip32Hd::<Secp256k1>::$ctor($($arg),*)?),
            EccKind::Nist256p1 => Engine::Nist256p1(Bip32Hd::<Nist256p1>::$ctor($($arg),*)?),
            EccKind::Slip10Ed25519 => Engine::Slip10Ed25519(Bip32Hd::<Slip10Ed25519>::$ctor($($arg),*)?),
            EccKind::Slip10Ed25519Blake2b => {
                Engine::Slip10Ed25519Blake2b(Bip32Hd::<Slip10Ed25519Blake2b>::$ctor($($arg),*)?)
            }
            EccKind::Slip10Ed25519Monero => {
                Engine::Slip10Ed25519Monero(Bip32Hd::<Slip10Ed25519Monero>::$ctor($($arg),*)?)
            }
            EccKind::KholawEd25519 => Engine::KholawEd25519(Bip32Hd::<KholawEd25519>::$ctor($($arg),*)?),
        }
    };
}

impl Engine {
    fn hd(&self) -> &dyn Hd {
        with_engine!(self, hd => hd)
    }

    fn hd_mut(&mut self) -> &mut dyn Hd {
        with_engine!(self, hd => hd)
    }

    /// Compressed and uncompressed views of a Weierstrass key.
    fn public_key_views(&self) -> Option<(Vec<u8>, Vec<u8>)> {
        match self {
            Self::Secp256k1(hd) => Some((hd.compressed_public_key(), hd.uncompressed_public_key())),
            Self::Nist256p1(hd) => Some((hd.compressed_public_key(), hd.uncompressed_public_key())),
            _ => None,
        }
    }

    /// Clean, then derive `path` from the root.
    fn derive_from_root(&mut self, path: &DerivationPath) -> Result<(), WalletError> {
        let mut next = self.clone();
        next.hd_mut().clean_derivation();
        next.hd_mut().derive(path)?;
        *self = next;
        Ok(())
    }
}

fn unsupported(hd: HdKind, material: &str) -> WalletError {
    WalletError::Hd(ErrorDetail::msg(format!("the {hd} engine cannot be built from {material}")))
}

// ---------------------------------------------------------------------------
// Wallet
// ---------------------------------------------------------------------------

/// An HD wallet for one cryptocurrency and network.
#[derive(Clone)]
pub struct HdWallet {
    config: ResolvedConfig,
    engine: Engine,
    entropy: Option<Zeroizing<Vec<u8>>>,
    mnemonic: Option<Mnemonic>,
    seed: Option<Seed>,
    passphrase: bool,
}

impl HdWallet {
    fn new(config: ResolvedConfig, engine: Engine) -> Self {
        tracing::debug!(
            symbol = config.cryptocurrency.symbol,
            network = config.network.name(),
            hd = engine.hd().name(),
            ecc = engine.hd().ecc().name(),
            "wallet built"
        );
        Self {
            config,
            engine,
            entropy: None,
            mnemonic: None,
            seed: None,
            passphrase: false,
        }
    }

    fn options(config: &ResolvedConfig) -> Result<HdOptions, WalletError> {
        let mut options = config
            .cryptocurrency
            .hd_options(config.network, config.public_key_type)?;
        if let Some(versions) = config.versions {
            options.versions = versions;
        }
        Ok(options)
    }

    /// Draw a fresh mnemonic of `words_count` words and build the wallet.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Mnemonic` for a word count or language the
    /// engine's scheme does not support, plus everything
    /// [`from_mnemonic`](Self::from_mnemonic) returns.
    pub fn generate(config: &WalletConfig, words_count: usize, passphrase: Option<&str>) -> Result<Self, WalletError> {
        let resolved = config.resolve()?;
        let mnemonic = Mnemonic::generate(
            resolved.hd.mnemonic_scheme(),
            words_count,
            resolved.language,
            mnemonic_options(resolved.electrum_mode),
        )?;
        Self::from_mnemonic(config, &mnemonic.phrase(), passphrase)
    }

    /// Build from entropy, encoding it as a mnemonic in the configured
    /// language first.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Entropy` for a length the scheme rejects, plus
    /// everything [`from_mnemonic`](Self::from_mnemonic) returns.
    pub fn from_entropy(config: &WalletConfig, entropy: &[u8], passphrase: Option<&str>) -> Result<Self, WalletError> {
        let resolved = config.resolve()?;
        let mnemonic = Mnemonic::from_entropy_with(
            resolved.hd.mnemonic_scheme(),
            entropy,
            resolved.language,
            mnemonic_options(resolved.electrum_mode),
        )?;
        Self::from_mnemonic(config, &mnemonic.phrase(), passphrase)
    }

    /// Build from a mnemonic phrase.
    ///
    /// # Errors
    ///
    /// - configuration errors from [`WalletConfig::resolve`]
    /// - `WalletError::Seed` when the configuration expects a passphrase
    ///   and none is given, or the scheme takes none
    /// - `WalletError::Mnemonic` for an invalid phrase, or an Electrum-v2
    ///   phrase whose type does not match the configured mode
    pub fn from_mnemonic(config: &WalletConfig, mnemonic: &str, passphrase: Option<&str>) -> Result<Self, WalletError> {
        let resolved = config.resolve()?;
        if resolved.passphrase && passphrase.is_none() {
            return Err(WalletError::Seed(ErrorDetail::msg("the wallet expects a passphrase")));
        }
        let parsed = Mnemonic::parse(resolved.hd.mnemonic_scheme(), mnemonic)?;
        if resolved.hd == HdKind::ElectrumV2 {
            check_electrum_type(&parsed, resolved.electrum_mode)?;
        }
        let entropy = parsed.to_entropy()?;
        let seed = Seed::from_mnemonic(resolved.hd.seed_scheme(resolved.cardano_type), mnemonic, passphrase)?;
        let engine = Self::engine_from_seed(&resolved, seed.expose(), passphrase)?;
        let mut wallet = Self::new(resolved, engine);
        wallet.entropy = Some(entropy);
        wallet.mnemonic = Some(parsed);
        wallet.seed = Some(seed);
        wallet.passphrase = passphrase.is_some();
        Ok(wallet)
    }

    /// Build from raw seed bytes.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Seed` for a seed the engine cannot use.
    pub fn from_seed(config: &WalletConfig, seed: &[u8]) -> Result<Self, WalletError> {
        let resolved = config.resolve()?;
        let seed = Seed::from_bytes(resolved.hd.seed_scheme(resolved.cardano_type), seed)?;
        let engine = Self::engine_from_seed(&resolved, seed.expose(), None)?;
        let mut wallet = Self::new(resolved, engine);
        wallet.seed = Some(seed);
        Ok(wallet)
    }

    fn engine_from_seed(config: &ResolvedConfig, seed: &[u8], passphrase: Option<&str>) -> Result<Engine, WalletError> {
        let options = Self::options(config)?;
        Ok(match config.hd {
            HdKind::Bip32 => bip32_engine!(config.cryptocurrency.ecc, from_seed(seed, options)),
            HdKind::Cardano => Engine::Cardano(CardanoHd::from_seed(seed, config.cardano_type, passphrase, options)?),
            HdKind::Algorand => Engine::Algorand(AlgorandHd::from_seed(seed, options)?),
            HdKind::ElectrumV1 => Engine::ElectrumV1(ElectrumV1Hd::from_seed(
                seed,
                options.wif_prefix,
                options.public_key_type,
            )?),
            HdKind::ElectrumV2 => Engine::ElectrumV2(ElectrumV2Hd::from_seed(seed, config.electrum_mode, options)?),
            HdKind::Monero => Engine::Monero(MoneroHd::from_seed(seed, config.network.into())?),
        })
    }

    /// Import an extended private key.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Hd` for engines without extended keys and the
    /// engine's import error otherwise.
    pub fn from_xprv(config: &WalletConfig, xprv: &str, strict: bool) -> Result<Self, WalletError> {
        let resolved = config.resolve()?;
        let options = Self::options(&resolved)?;
        let engine = match resolved.hd {
            HdKind::Bip32 => bip32_engine!(resolved.cryptocurrency.ecc, from_xprv(xprv, options, strict)),
            HdKind::Cardano => Engine::Cardano(CardanoHd::from_xprv(xprv, resolved.cardano_type, options, strict)?),
            HdKind::Algorand => Engine::Algorand(AlgorandHd::from_xprv(xprv, options, strict)?),
            hd => return Err(unsupported(hd, "an extended private key")),
        };
        Ok(Self::new(resolved, engine))
    }

    /// Import an extended public key; the wallet is watch-only.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Hd` for engines without extended keys and the
    /// engine's import error otherwise.
    pub fn from_xpub(config: &WalletConfig, xpub: &str, strict: bool) -> Result<Self, WalletError> {
        let resolved = config.resolve()?;
        let options = Self::options(&resolved)?;
        let engine = match resolved.hd {
            HdKind::Bip32 => bip32_engine!(resolved.cryptocurrency.ecc, from_xpub(xpub, options, strict)),
            HdKind::Cardano => Engine::Cardano(CardanoHd::from_xpub(xpub, resolved.cardano_type, options, strict)?),
            HdKind::Algorand => Engine::Algorand(AlgorandHd::from_xpub(xpub, options, strict)?),
            hd => return Err(unsupported(hd, "an extended public key")),
        };
        Ok(Self::new(resolved, engine))
    }

    /// Build from a raw private key; for Monero this is the private spend
    /// key.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::PrivateKey` for an invalid key and
    /// `WalletError::Hd` for engines that start from a seed only.
    pub fn from_private_key(config: &WalletConfig, private_key: &[u8]) -> Result<Self, WalletError> {
        let resolved = config.resolve()?;
        let options = Self::options(&resolved)?;
        let engine = match resolved.hd {
            HdKind::Bip32 => bip32_engine!(resolved.cryptocurrency.ecc, from_private_key(private_key, options)),
            HdKind::Cardano => {
                Engine::Cardano(CardanoHd::from_private_key(private_key, resolved.cardano_type, options)?)
            }
            HdKind::ElectrumV1 => Engine::ElectrumV1(ElectrumV1Hd::from_private_key(
                private_key,
                options.wif_prefix,
                options.public_key_type,
            )?),
            HdKind::Monero => Engine::Monero(MoneroHd::from_spend_private_key(private_key, resolved.network.into())?),
            hd => return Err(unsupported(hd, "a private key")),
        };
        Ok(Self::new(resolved, engine))
    }

    /// Build from a WIF private key; its flag picks the public-key
    /// encoding.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Wif` for undecodable WIF or a network without
    /// WIF, and `WalletError::Hd` for engines without WIF.
    pub fn from_wif(config: &WalletConfig, wif: &str) -> Result<Self, WalletError> {
        let resolved = config.resolve()?;
        let options = Self::options(&resolved)?;
        let prefix = options.wif_prefix.ok_or_else(|| {
            WalletError::Wif(ErrorDetail::msg(format!("{} has no WIF", resolved.cryptocurrency.name)))
        })?;
        let engine = match resolved.hd {
            HdKind::Bip32 => bip32_engine!(resolved.cryptocurrency.ecc, from_wif(wif, options)),
            HdKind::ElectrumV1 => Engine::ElectrumV1(ElectrumV1Hd::from_wif(wif, prefix)?),
            hd => return Err(unsupported(hd, "WIF")),
        };
        Ok(Self::new(resolved, engine))
    }

    /// Build a watch-only wallet from a raw public key.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::PublicKey` for an invalid key and
    /// `WalletError::Hd` for engines that need more than one key.
    pub fn from_public_key(config: &WalletConfig, public_key: &[u8]) -> Result<Self, WalletError> {
        let resolved = config.resolve()?;
        let options = Self::options(&resolved)?;
        let engine = match resolved.hd {
            HdKind::Bip32 => bip32_engine!(resolved.cryptocurrency.ecc, from_public_key(public_key, options)),
            HdKind::Cardano => {
                Engine::Cardano(CardanoHd::from_public_key(public_key, resolved.cardano_type, options)?)
            }
            HdKind::ElectrumV1 => {
                Engine::ElectrumV1(ElectrumV1Hd::from_public_key(public_key, options.public_key_type)?)
            }
            hd => return Err(unsupported(hd, "a public key")),
        };
        Ok(Self::new(resolved, engine))
    }

    /// Build a watch-only Monero wallet from the private view key and the
    /// public spend key.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Hd` for engines other than Monero and the key
    /// errors of [`MoneroHd::from_watch_only`].
    pub fn from_watch_only(
        config: &WalletConfig,
        view_private_key: &[u8],
        spend_public_key: &[u8],
    ) -> Result<Self, WalletError> {
        let resolved = config.resolve()?;
        if resolved.hd != HdKind::Monero {
            return Err(unsupported(resolved.hd, "a view key"));
        }
        let engine = MoneroHd::from_watch_only(view_private_key, spend_public_key, resolved.network.into())?;
        Ok(Self::new(resolved, Engine::Monero(engine)))
    }

    // -----------------------------------------------------------------------
    // Derivation
    // -----------------------------------------------------------------------

    /// Derive from the current node, with the engine's path semantics.
    ///
    /// # Errors
    ///
    /// Returns the engine's derivation error; the node is unchanged.
    pub fn derive(&mut self, derivation: &impl Derivation) -> Result<(), WalletError> {
        self.engine.hd_mut().derive(&derivation.path())
    }

    /// Reset to the root, then derive `derivation`.
    ///
    /// # Errors
    ///
    /// Returns the engine's derivation error; the node is unchanged.
    pub fn derive_from_root(&mut self, derivation: &impl Derivation) -> Result<(), WalletError> {
        self.engine.derive_from_root(&derivation.path())
    }

    /// Reset to the root, then derive the configured path.
    ///
    /// # Errors
    ///
    /// See [`derive_from_root`](Self::derive_from_root).
    pub fn derive_default(&mut self) -> Result<(), WalletError> {
        let path = self.config.derivation.clone();
        self.engine.derive_from_root(&path)
    }

    /// Reset to the root.
    pub fn clean_derivation(&mut self) {
        self.engine.hd_mut().clean_derivation();
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The engine.
    #[must_use]
    pub fn hd(&self) -> &dyn Hd {
        self.engine.hd()
    }

    /// Catalogue entry.
    #[must_use]
    pub const fn cryptocurrency(&self) -> &'static Cryptocurrency {
        self.config.cryptocurrency
    }

    /// Network.
    #[must_use]
    pub const fn network(&self) -> Network {
        self.config.network
    }

    /// Engine kind.
    #[must_use]
    pub const fn hd_kind(&self) -> HdKind {
        self.config.hd
    }

    /// Configured address type.
    #[must_use]
    pub const fn address_type(&self) -> AddressType {
        self.config.address_type
    }

    /// Configured derivation path.
    #[must_use]
    pub const fn default_derivation(&self) -> &DerivationPath {
        &self.config.derivation
    }

    /// Mnemonic, when built from one.
    #[must_use]
    pub const fn mnemonic(&self) -> Option<&Mnemonic> {
        self.mnemonic.as_ref()
    }

    /// Entropy behind the mnemonic.
    #[must_use]
    pub fn entropy(&self) -> Option<&[u8]> {
        self.entropy.as_ref().map(|e| e.as_slice())
    }

    /// Seed, when built from a phrase or a seed.
    #[must_use]
    pub const fn seed(&self) -> Option<&Seed> {
        self.seed.as_ref()
    }

    /// Path of the current node.
    #[must_use]
    pub fn path(&self) -> DerivationPath {
        self.engine.hd().path()
    }

    /// Address types this wallet can encode.
    #[must_use]
    pub fn address_types(&self) -> Vec<AddressType> {
        address_types(&self.config, &self.engine)
    }

    /// Address of the current node under the configured type.
    ///
    /// # Errors
    ///
    /// See [`address_of`](Self::address_of).
    pub fn address(&self) -> Result<String, WalletError> {
        self.address_of(self.config.address_type)
    }

    /// Address of the current node under `kind`.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Address` for a type the wallet does not use or
    /// a Cardano base/reward address without an account-level path, and
    /// the codec error otherwise.
    pub fn address_of(&self, kind: AddressType) -> Result<String, WalletError> {
        address_of(&self.config, &self.engine, kind)
    }

    // -----------------------------------------------------------------------
    // Dumps
    // -----------------------------------------------------------------------

    /// Wallet material and the current node.
    #[must_use]
    pub fn dump(&self) -> WalletDump {
        let mut dump = self.header();
        dump.derivations.push(node(&self.config, &self.engine));
        dump
    }

    /// Wallet material and every node `derivation` expands to, each derived
    /// from the root. The wallet's own node is not moved.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Derivation` for an oversized range and the
    /// engine's derivation error for the first path that fails.
    pub fn dumps(&self, derivation: &impl Derivation) -> Result<WalletDump, WalletError> {
        let paths = derivation.path().expand()?;
        let mut engine = self.engine.clone();
        let mut dump = self.header();
        for path in &paths {
            engine.derive_from_root(path)?;
            dump.derivations.push(node(&self.config, &engine));
        }
        tracing::debug!(nodes = paths.len(), "wallet nodes dumped");
        Ok(dump)
    }

    fn header(&self) -> WalletDump {
        let hd = self.engine.hd();
        let (path_key, view_private_key, view_public_key) = match &self.engine {
            Engine::Cardano(cardano) => (cardano.path_key().map(|k| hex::encode(&k)), None, None),
            Engine::Monero(monero) => (
                None,
                Some(hex::encode(&monero.view_private_key())),
                Some(hex::encode(&monero.view_public_key())),
            ),
            _ => (None, None, None),
        };
        WalletDump {
            cryptocurrency: self.config.cryptocurrency.name.into(),
            symbol: self.config.cryptocurrency.symbol.into(),
            network: self.config.network.name().into(),
            coin_type: self.config.cryptocurrency.coin_type,
            hd: hd.name().into(),
            ecc: hd.ecc().name().into(),
            public_key_type: hd.public_key_type().name().into(),
            entropy: self.entropy.as_ref().map(|e| hex::encode(e)),
            mnemonic: self.mnemonic.as_ref().map(|m| m.phrase().as_str().to_owned()),
            language: self.mnemonic.as_ref().map(|m| m.language().name().into()),
            words: self.mnemonic.as_ref().map(Mnemonic::words_count),
            passphrase: self.passphrase,
            seed: self.seed.as_ref().map(|s| s.to_hex().as_str().to_owned()),
            root_xprv: hd.root_xprv().map(|x| x.as_str().to_owned()),
            root_xpub: hd.root_xpub(),
            root_private_key: hd.root_private_key().map(|k| hex::encode(&k)),
            root_chain_code: hd.root_chain_code().map(|c| hex::encode(&c)),
            root_public_key: hex::encode(&hd.root_public_key()),
            strict: hd.strict(),
            path_key,
            view_private_key,
            view_public_key,
            derivations: Vec::new(),
        }
    }
}

impl fmt::Debug for HdWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HdWallet")
            .field("cryptocurrency", &self.config.cryptocurrency.symbol)
            .field("network", &self.config.network)
            .field("hd", &self.engine.hd().name())
            .field("path", &self.engine.hd().path().to_string())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn mnemonic_options(mode: ElectrumV2Mode) -> MnemonicOptions {
    MnemonicOptions {
        electrum_type: match mode {
            ElectrumV2Mode::Standard => ElectrumV2Type::Standard,
            ElectrumV2Mode::Segwit => ElectrumV2Type::Segwit,
        },
        ..MnemonicOptions::default()
    }
}

fn check_electrum_type(mnemonic: &Mnemonic, mode: ElectrumV2Mode) -> Result<(), WalletError> {
    let expected = mnemonic_options(mode).electrum_type;
    match mnemonic.electrum_type() {
        Some(kind) if kind == expected => Ok(()),
        got => Err(WalletError::Mnemonic(ErrorDetail::mismatch(
            "Electrum-V2 seed type does not match the wallet mode",
            format!("{expected:?}"),
            format!("{got:?}"),
        ))),
    }
}

fn address_types(config: &ResolvedConfig, engine: &Engine) -> Vec<AddressType> {
    match engine {
        Engine::Cardano(cardano) => match cardano.cardano_type() {
            CardanoType::ByronLegacy => vec![AddressType::CardanoByronLegacy],
            CardanoType::ByronIcarus | CardanoType::ByronLedger => vec![AddressType::CardanoByronIcarus],
            CardanoType::ShelleyIcarus | CardanoType::ShelleyLedger => vec![
                AddressType::CardanoShelley,
                AddressType::CardanoShelleyEnterprise,
                AddressType::CardanoShelleyReward,
            ],
        },
        Engine::ElectrumV1(_) => vec![AddressType::P2pkh],
        Engine::ElectrumV2(electrum) => vec![electrum.mode().address_type()],
        _ => config.cryptocurrency.address_types.to_vec(),
    }
}

fn address_of(config: &ResolvedConfig, engine: &Engine, kind: AddressType) -> Result<String, WalletError> {
    if !address_types(config, engine).contains(&kind) {
        return Err(WalletError::Address(ErrorDetail::mismatch(
            format!("{} wallet cannot encode this address type", engine.hd().name()),
            config.address_type,
            kind,
        )));
    }
    let hd = engine.hd();
    let mut params = config.cryptocurrency.address_params(config.network)?;
    params.public_key_type = hd.public_key_type();
    let mut public_key = hd.public_key();
    match engine {
        Engine::Monero(monero) => return Ok(monero.address()),
        Engine::Cardano(cardano) => {
            params.chain_code = cardano.chain_code();
            params.path = Some(cardano.path());
            params.path_key = cardano.path_key().map(|k| k.to_vec());
            match kind {
                AddressType::CardanoShelley => params.staking_public_key = Some(staking_public_key(cardano)?),
                AddressType::CardanoShelleyReward => public_key = staking_public_key(cardano)?,
                _ => {}
            }
        }
        _ => {}
    }
    kind.encode(&public_key, &params)
}

/// Staking key of the current node's account: `<account path>/2/0`.
fn staking_public_key(cardano: &CardanoHd) -> Result<Vec<u8>, WalletError> {
    let path = cardano.path();
    let account = path.elements().get(..3).ok_or_else(|| {
        WalletError::Address(ErrorDetail::mismatch(
            "staking key needs an account-level path",
            "m/purpose'/coin_type'/account'/...",
            &path,
        ))
    })?;
    let mut elements = account.to_vec();
    elements.extend([PathIndex::normal(STAKING_ROLE), PathIndex::normal(0)]);
    let mut staking = cardano.clone();
    staking.clean_derivation();
    staking.derive(&DerivationPath::from_elements(elements))?;
    Ok(staking.public_key())
}

fn node(config: &ResolvedConfig, engine: &Engine) -> NodeDump {
    let hd = engine.hd();
    let (compressed_public_key, uncompressed_public_key) = engine
        .public_key_views()
        .map_or((None, None), |(c, u)| (Some(hex::encode(&c)), Some(hex::encode(&u))));
    let addresses: BTreeMap<String, String> = address_types(config, engine)
        .into_iter()
        .filter_map(|kind| {
            address_of(config, engine, kind)
                .map(|address| (kind.name().to_owned(), address))
                .ok()
        })
        .collect();
    NodeDump {
        path: hd.path().to_string(),
        depth: hd.depth(),
        index: hd.index(),
        xprv: hd.xprv().map(|x| x.as_str().to_owned()),
        xpub: hd.xpub(),
        private_key: hd.private_key().map(|k| hex::encode(&k)),
        wif: hd.wif().map(|w| w.as_str().to_owned()),
        chain_code: hd.chain_code().map(|c| hex::encode(&c)),
        public_key: hex::encode(&hd.public_key()),
        uncompressed_public_key,
        compressed_public_key,
        hash: hd.hash().map(|h| hex::encode(&h)),
        fingerprint: hd.fingerprint().map(|f| hex::encode(&f)),
        parent_fingerprint: hd.parent_fingerprint().map(|f| hex::encode(&f)),
        addresses,
    }
}
