//! Cardano HD engine.
//!
//! Shares the node layout and serialization of [`Bip32Hd`] over
//! [`KholawEd25519`], and replaces two things:
//! - the master key, computed per [`CardanoType`]
//! - the child arithmetic, which is [`KholawScheme::ByronLegacy`] for
//!   Byron-Legacy and [`KholawScheme::V2`] for every other variant

use zeroize::Zeroizing;

use super::{Bip32Hd, Hd, HdOptions};
use crate::crypto::{hmac_sha512, pbkdf2_sha512, sha512};
use crate::derivation::DerivationPath;
use crate::ecc::kholaw::{clamp, has_forbidden_bit, hmac_master_key, KholawScheme};
use crate::ecc::{ChainCode, EccKind, EccPrivateKey, EccPublicKey, KholawEd25519, KholawPrivateKey};
use crate::encoding::cbor;
use crate::error::{ErrorDetail, WalletError};
use crate::keys::PublicKeyType;
use crate::seed::CardanoType;

/// PBKDF2 rounds of the Icarus master key.
const ICARUS_ROUNDS: u32 = 4096;

/// Upper bound of the Byron-Legacy `Root Seed Chain` search.
const LEGACY_MAX_ITERATIONS: u32 = 1000;

/// Salt of the Byron-Legacy path key.
const PATH_KEY_SALT: &[u8] = b"address-hashing";

/// PBKDF2 rounds of the Byron-Legacy path key.
const PATH_KEY_ROUNDS: u32 = 500;

/// Cardano engine over one of the five [`CardanoType`] variants.
#[derive(Clone, Debug)]
pub struct CardanoHd {
    kind: CardanoType,
    inner: Bip32Hd<KholawEd25519>,
}

impl CardanoHd {
    /// Master node from a seed.
    ///
    /// The seed is what [`Seed`](crate::seed::Seed) produces for `kind`:
    /// the entropy for Icarus, the BIP39 seed for Ledger and the
    /// Blake2b-hashed entropy for Byron-Legacy. Only Icarus consumes
    /// `passphrase`.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Seed` for an unusable seed and
    /// `WalletError::Hd` when no Byron-Legacy master key is found.
    pub fn from_seed(
        seed: &[u8],
        kind: CardanoType,
        passphrase: Option<&str>,
        options: HdOptions,
    ) -> Result<Self, WalletError> {
        let (private_key, chain_code) = match kind {
            CardanoType::ByronIcarus | CardanoType::ShelleyIcarus => {
                icarus_master_key(seed, passphrase.unwrap_or_default())?
            }
            CardanoType::ByronLedger | CardanoType::ShelleyLedger => hmac_master_key(seed)?,
            CardanoType::ByronLegacy => legacy_master_key(seed)?,
        };
        tracing::debug!(cardano_type = kind.name(), "Cardano master key derived");
        Ok(Self {
            kind,
            inner: Bip32Hd::from_master(private_key, chain_code, options),
        })
    }

    /// Import a 110-byte extended private key.
    ///
    /// # Errors
    ///
    /// See [`Bip32Hd::from_xprv`].
    pub fn from_xprv(
        xprv: &str,
        kind: CardanoType,
        options: HdOptions,
        strict: bool,
    ) -> Result<Self, WalletError> {
        Ok(Self {
            kind,
            inner: Bip32Hd::from_xprv(xprv, options, strict)?,
        })
    }

    /// Import a 78-byte extended public key.
    ///
    /// # Errors
    ///
    /// See [`Bip32Hd::from_xpub`].
    pub fn from_xpub(
        xpub: &str,
        kind: CardanoType,
        options: HdOptions,
        strict: bool,
    ) -> Result<Self, WalletError> {
        Ok(Self {
            kind,
            inner: Bip32Hd::from_xpub(xpub, options, strict)?,
        })
    }

    /// A bare 64-byte extended private key.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::PrivateKey` for an invalid key.
    pub fn from_private_key(
        private_key: &[u8],
        kind: CardanoType,
        options: HdOptions,
    ) -> Result<Self, WalletError> {
        Ok(Self {
            kind,
            inner: Bip32Hd::from_private_key(private_key, options)?,
        })
    }

    /// A bare public key; watch-only.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::PublicKey` for an invalid key.
    pub fn from_public_key(
        public_key: &[u8],
        kind: CardanoType,
        options: HdOptions,
    ) -> Result<Self, WalletError> {
        Ok(Self {
            kind,
            inner: Bip32Hd::from_public_key(public_key, options)?,
        })
    }

    /// The variant.
    #[must_use]
    pub const fn cardano_type(&self) -> CardanoType {
        self.kind
    }

    const fn scheme(&self) -> KholawScheme {
        match self.kind {
            CardanoType::ByronLegacy => KholawScheme::ByronLegacy,
            _ => KholawScheme::V2,
        }
    }

    /// Byron-Legacy key encrypting derivation paths in addresses:
    /// `PBKDF2-SHA-512(root_pub ‖ root_chain_code, "address-hashing", 500)`.
    ///
    /// `None` for other variants and when the root has no chain code.
    #[must_use]
    pub fn path_key(&self) -> Option<Zeroizing<Vec<u8>>> {
        if self.kind != CardanoType::ByronLegacy {
            return None;
        }
        let chain_code = self.inner.root_chain_code()?;
        let root = self.inner.root_public_key();
        let mut password = Zeroizing::new(Vec::with_capacity(64));
        password.extend_from_slice(&root[1..]);
        password.extend_from_slice(&chain_code);
        Some(pbkdf2_sha512(&password, PATH_KEY_SALT, PATH_KEY_ROUNDS, 32))
    }
}

impl Hd for CardanoHd {
    fn name(&self) -> &'static str {
        "Cardano"
    }

    fn ecc(&self) -> EccKind {
        EccKind::KholawEd25519
    }

    fn derive(&mut self, path: &DerivationPath) -> Result<(), WalletError> {
        let scheme = self.scheme();
        self.inner.derive_with(
            path,
            |key, chain, index| scheme.derive_private(key, chain, index),
            |key, chain, index| scheme.derive_public(key, chain, index),
        )
    }

    fn clean_derivation(&mut self) {
        self.inner.clean_derivation();
    }

    fn path(&self) -> DerivationPath {
        self.inner.path()
    }

    fn root_xprv(&self) -> Option<Zeroizing<String>> {
        self.inner.root_xprv()
    }

    fn root_xpub(&self) -> Option<String> {
        self.inner.root_xpub()
    }

    fn xprv(&self) -> Option<Zeroizing<String>> {
        self.inner.xprv()
    }

    fn xpub(&self) -> Option<String> {
        self.inner.xpub()
    }

    fn root_private_key(&self) -> Option<Zeroizing<Vec<u8>>> {
        self.inner.root_private_key()
    }

    fn root_chain_code(&self) -> Option<ChainCode> {
        self.inner.root_chain_code()
    }

    fn root_public_key(&self) -> Vec<u8> {
        self.inner.root_public_key()
    }

    fn private_key(&self) -> Option<Zeroizing<Vec<u8>>> {
        self.inner.private_key()
    }

    fn chain_code(&self) -> Option<ChainCode> {
        self.inner.chain_code()
    }

    fn public_key(&self) -> Vec<u8> {
        self.inner.current_public_key().raw_compressed()
    }

    fn public_key_type(&self) -> PublicKeyType {
        PublicKeyType::Compressed
    }

    fn hash(&self) -> Option<[u8; 20]> {
        self.inner.hash()
    }

    fn parent_fingerprint(&self) -> Option<[u8; 4]> {
        self.inner.parent_fingerprint()
    }

    fn depth(&self) -> u8 {
        self.inner.depth()
    }

    fn index(&self) -> u32 {
        self.inner.index()
    }

    fn strict(&self) -> Option<bool> {
        self.inner.strict()
    }
}

/// Icarus: `PBKDF2-SHA-512(passphrase, entropy, 4096, 96)` split into
/// `kL ‖ kR ‖ chain_code`, with bits 5-7 of `kL[31]` cleared before bit 6
/// is set.
fn icarus_master_key(entropy: &[u8], passphrase: &str) -> Result<(KholawPrivateKey, ChainCode), WalletError> {
    if entropy.is_empty() {
        return Err(WalletError::Seed(ErrorDetail::msg("Icarus entropy is empty")));
    }
    let mut data = pbkdf2_sha512(passphrase.as_bytes(), entropy, ICARUS_ROUNDS, 96);
    data[0] &= 0xf8;
    data[31] &= 0x1f;
    data[31] |= 0x40;
    split_master(&data[..64], &data[64..])
}

/// Byron-Legacy: try `HMAC-SHA-512(cbor(seed), "Root Seed Chain i")` for
/// increasing `i` until the hashed left half has bit 5 of byte 31 clear.
fn legacy_master_key(seed: &[u8]) -> Result<(KholawPrivateKey, ChainCode), WalletError> {
    if seed.len() != 32 {
        return Err(WalletError::Seed(ErrorDetail::mismatch(
            "invalid Byron-Legacy seed length",
            32,
            seed.len(),
        )));
    }
    let key = Zeroizing::new(cbor::encode(&cbor::Value::Bytes(seed.to_vec())));
    for iteration in 1..=LEGACY_MAX_ITERATIONS {
        let mac = hmac_sha512(&key, format!("Root Seed Chain {iteration}").as_bytes());
        let mut extended = Zeroizing::new(sha512(&mac[..32]));
        if has_forbidden_bit(&extended[..32]) {
            tracing::debug!(iteration, "Byron-Legacy master kL rejected, trying next");
            continue;
        }
        clamp(&mut extended[..32]);
        return split_master(&extended[..], &mac[32..]);
    }
    Err(WalletError::Hd(ErrorDetail::msg(
        "no valid Byron-Legacy master key within the iteration bound",
    )))
}

fn split_master(key: &[u8], chain: &[u8]) -> Result<(KholawPrivateKey, ChainCode), WalletError> {
    let private_key = KholawPrivateKey::from_bytes(key)?;
    let mut chain_code = [0u8; 32];
    chain_code.copy_from_slice(chain);
    Ok((private_key, chain_code))
}
