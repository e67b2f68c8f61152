//! Monero key engine: a spend/view key pair and its sub-addresses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::Hd;
use crate::addresses::monero::encode_keys;
use crate::derivation::{is_hardened, DerivationPath};
use crate::ecc::ed25519::{hash_to_scalar, scalar_reduce};
use crate::ecc::{
    EccKind, EccPoint, EccPrivateKey, EccPublicKey, Ed25519Point, Ed25519PrivateKey, Ed25519PublicKey,
    Slip10Ed25519Monero,
};
use crate::error::{ErrorDetail, WalletError};

type MoneroPrivateKey = Ed25519PrivateKey<Slip10Ed25519Monero>;

/// Monero network and its address prefixes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoneroNetwork {
    /// Main network.
    #[default]
    Mainnet,
    /// Stage network.
    Stagenet,
    /// Test network.
    Testnet,
}

impl MoneroNetwork {
    /// All networks.
    pub const ALL: [Self; 3] = [Self::Mainnet, Self::Stagenet, Self::Testnet];

    /// Configuration name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Stagenet => "stagenet",
            Self::Testnet => "testnet",
        }
    }

    /// Prefix of standard addresses.
    #[must_use]
    pub const fn standard(self) -> u8 {
        match self {
            Self::Mainnet => 18,
            Self::Stagenet => 24,
            Self::Testnet => 53,
        }
    }

    /// Prefix of integrated addresses.
    #[must_use]
    pub const fn integrated(self) -> u8 {
        match self {
            Self::Mainnet => 19,
            Self::Stagenet => 25,
            Self::Testnet => 54,
        }
    }

    /// Prefix of sub-addresses.
    #[must_use]
    pub const fn sub_address(self) -> u8 {
        match self {
            Self::Mainnet => 42,
            Self::Stagenet => 36,
            Self::Testnet => 63,
        }
    }
}

impl fmt::Display for MoneroNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MoneroNetwork {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|n| n.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                WalletError::Network(ErrorDetail::mismatch(
                    "unknown Monero network",
                    "mainnet, stagenet, testnet",
                    s,
                ))
            })
    }
}

/// Monero engine. `derive` selects the sub-address `m/minor/major`.
#[derive(Clone, Debug)]
pub struct MoneroHd {
    network: MoneroNetwork,
    spend_private_key: Option<MoneroPrivateKey>,
    spend_public_key: Ed25519PublicKey,
    view_private_key: MoneroPrivateKey,
    view_public_key: Ed25519PublicKey,
    minor: u32,
    major: u32,
}

impl MoneroHd {
    fn with_keys(
        network: MoneroNetwork,
        spend_private_key: Option<MoneroPrivateKey>,
        spend_public_key: Ed25519PublicKey,
        view_private_key: MoneroPrivateKey,
    ) -> Self {
        tracing::debug!(
            engine = "Monero",
            network = network.name(),
            watch_only = spend_private_key.is_none(),
            "HD engine initialised"
        );
        Self {
            network,
            spend_private_key,
            spend_public_key,
            view_public_key: view_private_key.public_key(),
            view_private_key,
            minor: 0,
            major: 0,
        }
    }

    /// Keys from a 16- or 32-byte seed: `spend = Hs(seed)`,
    /// `view = Hs(spend)`.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Seed` on any other seed length.
    pub fn from_seed(seed: &[u8], network: MoneroNetwork) -> Result<Self, WalletError> {
        if !matches!(seed.len(), 16 | 32) {
            return Err(WalletError::Seed(ErrorDetail::mismatch(
                "invalid Monero seed length",
                "16 or 32",
                seed.len(),
            )));
        }
        let spend = Zeroizing::new(hash_to_scalar(seed));
        Self::from_reduced_spend(&spend, network)
    }

    /// Keys from a 32-byte private spend key, reduced modulo ℓ first.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::PrivateKey` unless the key is 32 bytes.
    pub fn from_spend_private_key(spend_private_key: &[u8], network: MoneroNetwork) -> Result<Self, WalletError> {
        let bytes: [u8; 32] = spend_private_key.try_into().map_err(|_| {
            WalletError::PrivateKey(ErrorDetail::mismatch(
                "invalid Monero spend key length",
                32,
                spend_private_key.len(),
            ))
        })?;
        let spend = Zeroizing::new(scalar_reduce(&bytes));
        Self::from_reduced_spend(&spend, network)
    }

    fn from_reduced_spend(spend: &[u8; 32], network: MoneroNetwork) -> Result<Self, WalletError> {
        let spend_key = MoneroPrivateKey::from_bytes(spend)?;
        let view = Zeroizing::new(hash_to_scalar(spend));
        let view_key = MoneroPrivateKey::from_bytes(&*view)?;
        Ok(Self::with_keys(network, Some(spend_key.clone()), spend_key.public_key(), view_key))
    }

    /// Watch-only keys: private view key and public spend key.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::PrivateKey` for a non-canonical view key and
    /// `WalletError::PublicKey` for an invalid spend key.
    pub fn from_watch_only(
        view_private_key: &[u8],
        spend_public_key: &[u8],
        network: MoneroNetwork,
    ) -> Result<Self, WalletError> {
        let view = MoneroPrivateKey::from_bytes(view_private_key)?;
        let spend = Ed25519PublicKey::from_bytes(spend_public_key)?;
        Ok(Self::with_keys(network, None, spend, view))
    }

    /// The network.
    #[must_use]
    pub const fn network(&self) -> MoneroNetwork {
        self.network
    }

    /// Private spend key; `None` when watch-only.
    #[must_use]
    pub fn spend_private_key(&self) -> Option<Zeroizing<Vec<u8>>> {
        self.spend_private_key.as_ref().map(EccPrivateKey::raw)
    }

    /// Private view key.
    #[must_use]
    pub fn view_private_key(&self) -> Zeroizing<Vec<u8>> {
        self.view_private_key.raw()
    }

    /// Public spend key.
    #[must_use]
    pub fn spend_public_key(&self) -> [u8; 32] {
        self.spend_public_key.raw()
    }

    /// Public view key.
    #[must_use]
    pub fn view_public_key(&self) -> [u8; 32] {
        self.view_public_key.raw()
    }

    /// Standard address of the wallet.
    #[must_use]
    pub fn primary_address(&self) -> String {
        encode_keys(
            self.network.standard(),
            &self.spend_public_key(),
            &self.view_public_key(),
            None,
        )
    }

    /// Standard address carrying an 8-byte payment id.
    #[must_use]
    pub fn integrated_address(&self, payment_id: &[u8; 8]) -> String {
        encode_keys(
            self.network.integrated(),
            &self.spend_public_key(),
            &self.view_public_key(),
            Some(payment_id),
        )
    }

    /// Sub-address `(major, minor)`; `(0, 0)` is the primary address.
    ///
    /// With `m = Hs("SubAddr\0" ‖ view ‖ major_le ‖ minor_le)`, the
    /// sub-address keys are `D = spend_pub + m·G` and `C = view·D`.
    #[must_use]
    pub fn sub_address(&self, minor: u32, major: u32) -> String {
        if minor == 0 && major == 0 {
            return self.primary_address();
        }
        let view = self.view_private_key.expose();
        let mut data = Zeroizing::new(Vec::with_capacity(48));
        data.extend_from_slice(b"SubAddr\0");
        data.extend_from_slice(view);
        data.extend_from_slice(&major.to_le_bytes());
        data.extend_from_slice(&minor.to_le_bytes());
        let m = Zeroizing::new(hash_to_scalar(&data));

        let spend = Ed25519Point::mul_base(&m).add_point(&self.spend_public_key.point());
        let view_point = spend.mul_bytes(view);
        tracing::trace!(minor, major, "Monero sub-address derived");
        encode_keys(
            self.network.sub_address(),
            &spend.compress(),
            &view_point.compress(),
            None,
        )
    }

    /// Address of the selected sub-address indexes.
    #[must_use]
    pub fn address(&self) -> String {
        self.sub_address(self.minor, self.major)
    }

    /// Selected `(minor, major)`.
    #[must_use]
    pub const fn indexes(&self) -> (u32, u32) {
        (self.minor, self.major)
    }
}

impl Hd for MoneroHd {
    fn name(&self) -> &'static str {
        "Monero"
    }

    fn ecc(&self) -> EccKind {
        EccKind::Slip10Ed25519Monero
    }

    /// Select the sub-address `m/minor/major`.
    fn derive(&mut self, path: &DerivationPath) -> Result<(), WalletError> {
        match path.indexes()?.as_slice() {
            [minor, major] if !is_hardened(*minor) && !is_hardened(*major) => {
                self.minor = *minor;
                self.major = *major;
                Ok(())
            }
            _ => Err(WalletError::Derivation(ErrorDetail::mismatch(
                "Monero paths are m/minor/major without hardened indexes",
                "m/minor/major",
                path,
            ))),
        }
    }

    fn clean_derivation(&mut self) {
        self.minor = 0;
        self.major = 0;
    }

    fn path(&self) -> DerivationPath {
        if self.minor == 0 && self.major == 0 {
            DerivationPath::root()
        } else {
            DerivationPath::from_indexes(&[self.minor, self.major])
        }
    }

    fn root_private_key(&self) -> Option<Zeroizing<Vec<u8>>> {
        self.spend_private_key()
    }

    fn root_public_key(&self) -> Vec<u8> {
        self.spend_public_key().to_vec()
    }

    fn private_key(&self) -> Option<Zeroizing<Vec<u8>>> {
        self.spend_private_key()
    }

    fn public_key(&self) -> Vec<u8> {
        self.spend_public_key().to_vec()
    }
}
