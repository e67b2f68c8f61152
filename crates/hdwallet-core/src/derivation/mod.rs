//! Derivation paths and typed path builders.
//!
//! This module provides:
//! - [`DerivationPath`]: parsed `m/44'/0'/0'/0/0` paths, with `a-b` ranges
//!   and [`DerivationPath::expand`] to enumerate them
//! - [`Bip44`] style builders for BIP44/49/84/86, [`Cip1852`],
//!   [`ElectrumDerivation`] and [`MoneroDerivation`]
//!
//! Hardened markers `'`, `h` and `H` are accepted on input; output always
//! uses `'`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorDetail, WalletError};

/// Offset marking a hardened index.
pub const HARDENED: u32 = 0x8000_0000;

/// Upper bound on ranges accepted by [`DerivationPath::expand`].
pub const MAX_EXPANSION: usize = 100_000;

/// Returns `true` for hardened indexes (`>= 2^31`).
#[must_use]
pub const fn is_hardened(index: u32) -> bool {
    index & HARDENED != 0
}

/// Set the hardened bit.
#[must_use]
pub const fn harden(index: u32) -> u32 {
    index | HARDENED
}

/// One path element: a single index or an inclusive range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PathIndex {
    /// A single index below `2^31`, optionally hardened.
    Single {
        /// Index without the hardened bit.
        index: u32,
        /// Hardened flag.
        hardened: bool,
    },
    /// `from..=to`, all hardened or all not.
    Range {
        /// First index.
        from: u32,
        /// Last index, inclusive.
        to: u32,
        /// Hardened flag.
        hardened: bool,
    },
}

impl PathIndex {
    /// A non-hardened index.
    #[must_use]
    pub const fn normal(index: u32) -> Self {
        Self::Single {
            index,
            hardened: false,
        }
    }

    /// A hardened index.
    #[must_use]
    pub const fn hardened(index: u32) -> Self {
        Self::Single {
            index,
            hardened: true,
        }
    }

    /// A non-hardened inclusive range.
    #[must_use]
    pub const fn range(from: u32, to: u32) -> Self {
        Self::Range {
            from,
            to,
            hardened: false,
        }
    }

    /// Build from a raw 32-bit index (hardened bit included).
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self::Single {
            index: raw & !HARDENED,
            hardened: is_hardened(raw),
        }
    }

    /// The raw index with the hardened bit applied, if this is not a range.
    #[must_use]
    pub const fn raw(self) -> Option<u32> {
        match self {
            Self::Single { index, hardened } => Some(if hardened { harden(index) } else { index }),
            Self::Range { .. } => None,
        }
    }

    /// Every raw index this element stands for.
    #[must_use]
    pub fn values(self) -> Vec<u32> {
        match self {
            Self::Single { .. } => self.raw().into_iter().collect(),
            Self::Range { from, to, hardened } => (from..=to)
                .map(|i| if hardened { harden(i) } else { i })
                .collect(),
        }
    }

    const fn count(self) -> usize {
        match self {
            Self::Single { .. } => 1,
            Self::Range { from, to, .. } => (to - from) as usize + 1,
        }
    }

    fn parse(text: &str) -> Result<Self, WalletError> {
        let (body, hardened) = match text.strip_suffix(['\'', 'h', 'H']) {
            Some(body) => (body, true),
            None => (text, false),
        };
        if let Some((from, to)) = body.split_once('-') {
            let (from, to) = (parse_number(from, text)?, parse_number(to, text)?);
            if from > to {
                return Err(WalletError::Derivation(ErrorDetail::mismatch(
                    "invalid range",
                    "from <= to",
                    text,
                )));
            }
            Ok(Self::Range { from, to, hardened })
        } else {
            Ok(Self::Single {
                index: parse_number(body, text)?,
                hardened,
            })
        }
    }
}

fn parse_number(digits: &str, element: &str) -> Result<u32, WalletError> {
    let value = if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        None
    } else {
        digits.parse::<u32>().ok()
    };
    match value {
        Some(v) if v < HARDENED => Ok(v),
        _ => Err(WalletError::Derivation(ErrorDetail::mismatch(
            "invalid path index",
            "0..2147483647",
            element,
        ))),
    }
}

impl fmt::Display for PathIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (text, hardened) = match self {
            Self::Single { index, hardened } => (index.to_string(), *hardened),
            Self::Range { from, to, hardened } => (format!("{from}-{to}"), *hardened),
        };
        f.write_str(&text)?;
        if hardened {
            f.write_str("'")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// DerivationPath
// ---------------------------------------------------------------------------

/// An ordered list of path elements starting at the master node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    elements: Vec<PathIndex>,
}

impl DerivationPath {
    /// The master node `m`.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Build from raw 32-bit indexes.
    #[must_use]
    pub fn from_indexes(indexes: &[u32]) -> Self {
        Self {
            elements: indexes.iter().copied().map(PathIndex::from_raw).collect(),
        }
    }

    /// Build from elements.
    #[must_use]
    pub const fn from_elements(elements: Vec<PathIndex>) -> Self {
        Self { elements }
    }

    /// Parse `m/…`; the `m/` prefix is optional.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Derivation` on empty elements, non-numeric
    /// indexes, indexes `>= 2^31` or reversed ranges.
    pub fn parse(text: &str) -> Result<Self, WalletError> {
        let text = text.trim();
        let body = match text {
            "m" | "M" | "" => return Ok(Self::root()),
            _ => text
                .strip_prefix("m/")
                .or_else(|| text.strip_prefix("M/"))
                .unwrap_or(text),
        };
        body.split('/')
            .map(PathIndex::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::from_elements)
    }

    /// Path elements.
    #[must_use]
    pub fn elements(&self) -> &[PathIndex] {
        &self.elements
    }

    /// Number of elements.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.elements.len()
    }

    /// `true` for the master node.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.elements.is_empty()
    }

    /// `true` when no element is a range.
    #[must_use]
    pub fn is_concrete(&self) -> bool {
        self.elements.iter().all(|e| e.raw().is_some())
    }

    /// Raw indexes of a concrete path.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Derivation` if the path contains a range.
    pub fn indexes(&self) -> Result<Vec<u32>, WalletError> {
        self.elements
            .iter()
            .map(|e| {
                e.raw().ok_or_else(|| {
                    WalletError::Derivation(ErrorDetail::mismatch(
                        "range in a path that must be concrete",
                        "single index",
                        e,
                    ))
                })
            })
            .collect()
    }

    /// Append a raw index.
    #[must_use]
    pub fn child(&self, raw: u32) -> Self {
        let mut elements = self.elements.clone();
        elements.push(PathIndex::from_raw(raw));
        Self { elements }
    }

    /// All concrete paths covered by the ranges, in lexicographic order.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Derivation` if the expansion would exceed
    /// [`MAX_EXPANSION`] paths.
    pub fn expand(&self) -> Result<Vec<Self>, WalletError> {
        let total = self
            .elements
            .iter()
            .try_fold(1usize, |acc, e| acc.checked_mul(e.count()))
            .filter(|&n| n <= MAX_EXPANSION)
            .ok_or_else(|| {
                WalletError::Derivation(ErrorDetail::mismatch(
                    "path range too large",
                    format!("<= {MAX_EXPANSION} paths"),
                    self,
                ))
            })?;
        let mut paths: Vec<Vec<u32>> = Vec::with_capacity(total);
        paths.push(Vec::new());
        for element in &self.elements {
            let values = element.values();
            paths = paths
                .into_iter()
                .flat_map(|prefix| {
                    values.iter().map(move |&v| {
                        let mut next = prefix.clone();
                        next.push(v);
                        next
                    })
                })
                .collect();
        }
        Ok(paths.iter().map(|p| Self::from_indexes(p)).collect())
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for element in &self.elements {
            write!(f, "/{element}")?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DerivationPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DerivationPath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Typed builders
// ---------------------------------------------------------------------------

/// Something that renders to a derivation path.
pub trait Derivation {
    /// Builder name, e.g. `BIP44`.
    fn name(&self) -> &'static str;

    /// The path this builder stands for.
    fn path(&self) -> DerivationPath;
}

/// BIP44 change level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Change {
    /// Receiving chain, index 0.
    #[default]
    External,
    /// Change chain, index 1.
    Internal,
    /// Both chains, `0-1`.
    Both,
}

impl Change {
    const fn element(self) -> PathIndex {
        match self {
            Self::External => PathIndex::normal(0),
            Self::Internal => PathIndex::normal(1),
            Self::Both => PathIndex::range(0, 1),
        }
    }
}

/// CIP-1852 role level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Payment keys, index 0.
    #[default]
    External,
    /// Change keys, index 1.
    Internal,
    /// Staking keys, index 2.
    Staking,
}

/// `m / purpose' / coin_type' / account' / change / address` for BIP44,
/// BIP49, BIP84 and BIP86.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bip44 {
    purpose: u32,
    coin_type: u32,
    account: PathIndex,
    change: PathIndex,
    address: PathIndex,
}

impl Bip44 {
    const fn with_purpose(purpose: u32, coin_type: u32) -> Self {
        Self {
            purpose,
            coin_type,
            account: PathIndex::hardened(0),
            change: PathIndex::normal(0),
            address: PathIndex::normal(0),
        }
    }

    /// BIP44 (legacy P2PKH accounts).
    #[must_use]
    pub const fn bip44(coin_type: u32) -> Self {
        Self::with_purpose(44, coin_type)
    }

    /// BIP49 (P2WPKH nested in P2SH).
    #[must_use]
    pub const fn bip49(coin_type: u32) -> Self {
        Self::with_purpose(49, coin_type)
    }

    /// BIP84 (native P2WPKH).
    #[must_use]
    pub const fn bip84(coin_type: u32) -> Self {
        Self::with_purpose(84, coin_type)
    }

    /// BIP86 (P2TR key path).
    #[must_use]
    pub const fn bip86(coin_type: u32) -> Self {
        Self::with_purpose(86, coin_type)
    }

    /// Set the account; single accounts are hardened.
    #[must_use]
    pub const fn account(mut self, account: u32) -> Self {
        self.account = PathIndex::hardened(account);
        self
    }

    /// Set a hardened account range.
    #[must_use]
    pub const fn accounts(mut self, from: u32, to: u32) -> Self {
        self.account = PathIndex::Range {
            from,
            to,
            hardened: true,
        };
        self
    }

    /// Set the change level.
    #[must_use]
    pub const fn change(mut self, change: Change) -> Self {
        self.change = change.element();
        self
    }

    /// Set the address index.
    #[must_use]
    pub const fn address(mut self, address: u32) -> Self {
        self.address = PathIndex::normal(address);
        self
    }

    /// Set an address range.
    #[must_use]
    pub const fn addresses(mut self, from: u32, to: u32) -> Self {
        self.address = PathIndex::range(from, to);
        self
    }

    /// The purpose number.
    #[must_use]
    pub const fn purpose(&self) -> u32 {
        self.purpose
    }
}

impl Derivation for Bip44 {
    fn name(&self) -> &'static str {
        match self.purpose {
            49 => "BIP49",
            84 => "BIP84",
            86 => "BIP86",
            _ => "BIP44",
        }
    }

    fn path(&self) -> DerivationPath {
        DerivationPath::from_elements(vec![
            PathIndex::hardened(self.purpose),
            PathIndex::hardened(self.coin_type),
            self.account,
            self.change,
            self.address,
        ])
    }
}

/// Cardano `m / 1852' / 1815' / account' / role / address`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cip1852 {
    coin_type: u32,
    account: u32,
    role: Role,
    address: PathIndex,
}

impl Default for Cip1852 {
    fn default() -> Self {
        Self {
            coin_type: 1815,
            account: 0,
            role: Role::External,
            address: PathIndex::normal(0),
        }
    }
}

impl Cip1852 {
    /// Set the hardened account.
    #[must_use]
    pub const fn account(mut self, account: u32) -> Self {
        self.account = account;
        self
    }

    /// Set the role.
    #[must_use]
    pub const fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Set the address index.
    #[must_use]
    pub const fn address(mut self, address: u32) -> Self {
        self.address = PathIndex::normal(address);
        self
    }
}

impl Derivation for Cip1852 {
    fn name(&self) -> &'static str {
        "CIP1852"
    }

    fn path(&self) -> DerivationPath {
        let role = match self.role {
            Role::External => 0,
            Role::Internal => 1,
            Role::Staking => 2,
        };
        DerivationPath::from_elements(vec![
            PathIndex::hardened(1852),
            PathIndex::hardened(self.coin_type),
            PathIndex::hardened(self.account),
            PathIndex::normal(role),
            self.address,
        ])
    }
}

/// Electrum `m / change / address`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectrumDerivation {
    /// Change chain (0 receiving, 1 change).
    pub change: u32,
    /// Address index.
    pub address: u32,
}

impl Derivation for ElectrumDerivation {
    fn name(&self) -> &'static str {
        "Electrum"
    }

    fn path(&self) -> DerivationPath {
        DerivationPath::from_elements(vec![
            PathIndex::normal(self.change),
            PathIndex::normal(self.address),
        ])
    }
}

/// Monero `m / minor / major` sub-address indexes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneroDerivation {
    /// Minor (address) index.
    pub minor: u32,
    /// Major (account) index.
    pub major: u32,
}

impl Derivation for MoneroDerivation {
    fn name(&self) -> &'static str {
        "Monero"
    }

    fn path(&self) -> DerivationPath {
        DerivationPath::from_elements(vec![
            PathIndex::normal(self.minor),
            PathIndex::normal(self.major),
        ])
    }
}

impl Derivation for DerivationPath {
    fn name(&self) -> &'static str {
        "Custom"
    }

    fn path(&self) -> DerivationPath {
        self.clone()
    }
}
