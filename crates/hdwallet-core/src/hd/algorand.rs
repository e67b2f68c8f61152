//! Algorand HD engine: Kholaw keys under Peikert's amendment (`g = 9`).

use zeroize::Zeroizing;

use super::{Bip32Hd, Hd, HdOptions};
use crate::crypto::{hmac_sha512, sha256, sha512};
use crate::derivation::DerivationPath;
use crate::ecc::kholaw::{clamp, has_forbidden_bit, KholawScheme};
use crate::ecc::{ChainCode, EccKind, EccPrivateKey, EccPublicKey, KholawEd25519, KholawPrivateKey};
use crate::error::{ErrorDetail, WalletError};
use crate::keys::PublicKeyType;

/// High bits of `zL` cleared by every derivation step.
pub const PEIKERT_G: u32 = 9;

const SCHEME: KholawScheme = KholawScheme::Peikert { g: PEIKERT_G };

/// Algorand engine.
#[derive(Clone, Debug)]
pub struct AlgorandHd {
    inner: Bip32Hd<KholawEd25519>,
}

impl AlgorandHd {
    /// Master node from a 32-byte seed.
    ///
    /// `k = SHA-512(seed)`, rehashed as `HMAC-SHA-512(kL, kR)` while bit 5
    /// of `kL[31]` is set, then clamped; the chain code is
    /// `SHA-256(0x01 ‖ seed)`.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Seed` unless the seed is 32 bytes.
    pub fn from_seed(seed: &[u8], options: HdOptions) -> Result<Self, WalletError> {
        if seed.len() != 32 {
            return Err(WalletError::Seed(ErrorDetail::mismatch(
                "invalid Algorand seed length",
                32,
                seed.len(),
            )));
        }
        let mut extended = Zeroizing::new(sha512(seed));
        let mut attempts = 0u32;
        while has_forbidden_bit(&extended[..32]) {
            attempts += 1;
            tracing::debug!(attempts, "Algorand master kL has bit 5 set, resampling");
            let mac = hmac_sha512(&extended[..32], &extended[32..]);
            extended.copy_from_slice(&mac[..]);
        }
        clamp(&mut extended[..32]);
        let private_key = KholawPrivateKey::from_bytes(&extended[..])?;

        let mut data = Zeroizing::new(Vec::with_capacity(33));
        data.push(0x01);
        data.extend_from_slice(seed);
        let chain_code = sha256(&data);
        tracing::debug!(engine = "Algorand", "HD engine initialised");
        Ok(Self {
            inner: Bip32Hd::from_master(private_key, chain_code, options),
        })
    }

    /// Import an extended private key.
    ///
    /// # Errors
    ///
    /// See [`Bip32Hd::from_xprv`].
    pub fn from_xprv(xprv: &str, options: HdOptions, strict: bool) -> Result<Self, WalletError> {
        Ok(Self {
            inner: Bip32Hd::from_xprv(xprv, options, strict)?,
        })
    }

    /// Import an extended public key (watch-only).
    ///
    /// # Errors
    ///
    /// See [`Bip32Hd::from_xpub`].
    pub fn from_xpub(xpub: &str, options: HdOptions, strict: bool) -> Result<Self, WalletError> {
        Ok(Self {
            inner: Bip32Hd::from_xpub(xpub, options, strict)?,
        })
    }
}

impl Hd for AlgorandHd {
    fn name(&self) -> &'static str {
        "Algorand"
    }

    fn ecc(&self) -> EccKind {
        EccKind::KholawEd25519
    }

    fn derive(&mut self, path: &DerivationPath) -> Result<(), WalletError> {
        self.inner.derive_with(
            path,
            |key, chain, index| SCHEME.derive_private(key, chain, index),
            |key, chain, index| SCHEME.derive_public(key, chain, index),
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
