//! BIP32 / SLIP-10 engine, generic over the curve.

use zeroize::Zeroizing;

use super::{Hd, HdOptions};
use crate::crypto::hash160;
use crate::derivation::{is_hardened, DerivationPath};
use crate::ecc::{Bip32Curve, ChainCode, Ecc, EccKind, EccPrivateKey, EccPublicKey};
use crate::encoding::hex;
use crate::error::{ErrorDetail, WalletError};
use crate::keys::{private_key_to_wif, wif_to_private_key, ExtendedKey, PublicKeyType};

/// One node of the key tree.
#[derive(Clone, Debug)]
pub(crate) struct Node<C: Ecc> {
    pub(crate) private_key: Option<C::PrivateKey>,
    pub(crate) public_key: C::PublicKey,
    pub(crate) chain_code: Option<ChainCode>,
    pub(crate) depth: u8,
    pub(crate) index: u32,
    pub(crate) parent_fingerprint: [u8; 4],
}

impl<C: Ecc> Node<C> {
    fn master(private_key: C::PrivateKey, chain_code: Option<ChainCode>) -> Self {
        Self {
            public_key: private_key.public_key(),
            private_key: Some(private_key),
            chain_code,
            depth: 0,
            index: 0,
            parent_fingerprint: [0; 4],
        }
    }

    fn watch_only(public_key: C::PublicKey, chain_code: Option<ChainCode>) -> Self {
        Self {
            private_key: None,
            public_key,
            chain_code,
            depth: 0,
            index: 0,
            parent_fingerprint: [0; 4],
        }
    }

    pub(crate) fn hash(&self) -> [u8; 20] {
        hash160(&self.public_key.raw_compressed())
    }

    pub(crate) fn fingerprint(&self) -> [u8; 4] {
        let h = self.hash();
        [h[0], h[1], h[2], h[3]]
    }

    const fn is_master(&self) -> bool {
        self.depth == 0 && self.index == 0 && u32::from_be_bytes(self.parent_fingerprint) == 0
    }

    fn extended(&self, version: u32, key: Zeroizing<Vec<u8>>) -> Option<ExtendedKey> {
        Some(ExtendedKey {
            version: version.to_be_bytes(),
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            index: self.index,
            chain_code: self.chain_code?,
            key,
        })
    }
}

/// BIP32 engine over curve `C`.
#[derive(Clone, Debug)]
pub struct Bip32Hd<C: Bip32Curve> {
    options: HdOptions,
    root: Node<C>,
    current: Node<C>,
    path: DerivationPath,
}

impl<C: Bip32Curve> Bip32Hd<C> {
    fn with_root(root: Node<C>, options: HdOptions) -> Self {
        tracing::debug!(
            engine = "BIP32",
            curve = C::NAME,
            depth = root.depth,
            watch_only = root.private_key.is_none(),
            "HD engine initialised"
        );
        Self {
            options,
            current: root.clone(),
            root,
            path: DerivationPath::root(),
        }
    }

    /// Master node from a seed.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Seed` if the seed is not 16..=64 bytes.
    pub fn from_seed(seed: &[u8], options: HdOptions) -> Result<Self, WalletError> {
        let (private_key, chain_code) = C::master_key(seed)?;
        Ok(Self::from_master(private_key, chain_code, options))
    }

    /// Master node from an already computed key and chain code.
    pub(crate) fn from_master(private_key: C::PrivateKey, chain_code: ChainCode, options: HdOptions) -> Self {
        Self::with_root(Node::master(private_key, Some(chain_code)), options)
    }

    /// Import an extended private key; `strict` rejects non-root keys.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::XPrivateKey` on a version, strictness or key
    /// body mismatch, and the decoding error for malformed text.
    pub fn from_xprv(xprv: &str, options: HdOptions, strict: bool) -> Result<Self, WalletError> {
        let key = ExtendedKey::decode(xprv)?;
        check_version(&key, options.versions.xprv, WalletError::XPrivateKey)?;
        check_strict(&key, strict, WalletError::XPrivateKey)?;
        let length = <C::PrivateKey as EccPrivateKey>::LENGTH;
        if key.key.len() != length + 1 || key.key[0] != 0x00 {
            return Err(WalletError::XPrivateKey(ErrorDetail::mismatch(
                "invalid private key body",
                format!("0x00 followed by {length} bytes"),
                format!("{} bytes", key.key.len()),
            )));
        }
        let private_key = C::PrivateKey::from_bytes(&key.key[1..])?;
        let mut node = Node::master(private_key, Some(key.chain_code));
        node.depth = key.depth;
        node.index = key.index;
        node.parent_fingerprint = key.parent_fingerprint;
        Ok(Self::with_root(node, options))
    }

    /// Import an extended public key (watch-only); `strict` rejects
    /// non-root keys.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::XPublicKey` on a version or strictness
    /// mismatch and `WalletError::PublicKey` for an invalid point.
    pub fn from_xpub(xpub: &str, options: HdOptions, strict: bool) -> Result<Self, WalletError> {
        let key = ExtendedKey::decode(xpub)?;
        check_version(&key, options.versions.xpub, WalletError::XPublicKey)?;
        check_strict(&key, strict, WalletError::XPublicKey)?;
        let public_key = C::PublicKey::from_bytes(&key.key)?;
        let mut node = Node::watch_only(public_key, Some(key.chain_code));
        node.depth = key.depth;
        node.index = key.index;
        node.parent_fingerprint = key.parent_fingerprint;
        Ok(Self::with_root(node, options))
    }

    /// A bare private key: no chain code, so no derivation.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::PrivateKey` for an invalid key.
    pub fn from_private_key(private_key: &[u8], options: HdOptions) -> Result<Self, WalletError> {
        let private_key = C::PrivateKey::from_bytes(private_key)?;
        Ok(Self::with_root(Node::master(private_key, None), options))
    }

    /// A bare public key: watch-only, no derivation.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::PublicKey` for an invalid key.
    pub fn from_public_key(public_key: &[u8], options: HdOptions) -> Result<Self, WalletError> {
        let public_key = C::PublicKey::from_bytes(public_key)?;
        Ok(Self::with_root(Node::watch_only(public_key, None), options))
    }

    /// A WIF private key; its compression flag overrides
    /// `options.public_key_type`.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Wif` if WIF is disabled in `options` or the
    /// text does not decode.
    pub fn from_wif(wif: &str, mut options: HdOptions) -> Result<Self, WalletError> {
        let prefix = options
            .wif_prefix
            .ok_or_else(|| WalletError::Wif(ErrorDetail::msg("WIF is not supported by this network")))?;
        let (private_key, kind) = wif_to_private_key(wif, prefix)?;
        options.public_key_type = kind;
        Self::from_private_key(&private_key, options)
    }

    /// Construction options.
    #[must_use]
    pub const fn options(&self) -> &HdOptions {
        &self.options
    }

    /// Public key of the current node.
    #[must_use]
    pub const fn current_public_key(&self) -> &C::PublicKey {
        &self.current.public_key
    }

    /// Private key of the current node.
    #[must_use]
    pub const fn current_private_key(&self) -> Option<&C::PrivateKey> {
        self.current.private_key.as_ref()
    }

    /// Compressed public key of the current node.
    #[must_use]
    pub fn compressed_public_key(&self) -> Vec<u8> {
        self.current.public_key.raw_compressed()
    }

    /// Uncompressed public key of the current node.
    #[must_use]
    pub fn uncompressed_public_key(&self) -> Vec<u8> {
        self.current.public_key.raw_uncompressed()
    }

    /// Walk `path` with caller-supplied child functions; used by engines
    /// that share the node layout but not the arithmetic.
    pub(crate) fn derive_with<P, Q>(
        &mut self,
        path: &DerivationPath,
        derive_private: P,
        derive_public: Q,
    ) -> Result<(), WalletError>
    where
        P: Fn(&C::PrivateKey, &ChainCode, u32) -> Result<(C::PrivateKey, ChainCode), WalletError>,
        Q: Fn(&C::PublicKey, &ChainCode, u32) -> Result<(C::PublicKey, ChainCode), WalletError>,
    {
        let mut node = self.current.clone();
        let mut walked = self.path.clone();
        for index in path.indexes()? {
            node = child(&node, index, &derive_private, &derive_public)?;
            walked = walked.child(index);
        }
        self.current = node;
        self.path = walked;
        Ok(())
    }

    fn encode_public(&self, public_key: &C::PublicKey) -> Vec<u8> {
        match self.options.public_key_type {
            PublicKeyType::Compressed => public_key.raw_compressed(),
            PublicKeyType::Uncompressed => public_key.raw_uncompressed(),
        }
    }

    fn xprv_of(&self, node: &Node<C>) -> Option<Zeroizing<String>> {
        let private_key = node.private_key.as_ref()?;
        let mut body = Zeroizing::new(Vec::with_capacity(<C::PrivateKey as EccPrivateKey>::LENGTH + 1));
        body.push(0x00);
        body.extend_from_slice(&private_key.raw());
        node.extended(self.options.versions.xprv, body)?.encode().ok()
    }

    fn xpub_of(&self, node: &Node<C>) -> Option<String> {
        let body = Zeroizing::new(node.public_key.raw_compressed());
        node.extended(self.options.versions.xpub, body)?
            .encode()
            .ok()
            .map(|text| text.to_string())
    }
}

fn child<C, P, Q>(node: &Node<C>, index: u32, derive_private: &P, derive_public: &Q) -> Result<Node<C>, WalletError>
where
    C: Ecc,
    P: Fn(&C::PrivateKey, &ChainCode, u32) -> Result<(C::PrivateKey, ChainCode), WalletError>,
    Q: Fn(&C::PublicKey, &ChainCode, u32) -> Result<(C::PublicKey, ChainCode), WalletError>,
{
    let chain_code = node.chain_code.as_ref().ok_or_else(|| {
        WalletError::Derivation(ErrorDetail::msg("a chain code is required to derive children"))
    })?;
    let depth = node
        .depth
        .checked_add(1)
        .ok_or_else(|| WalletError::Derivation(ErrorDetail::msg("maximum depth of 255 reached")))?;
    let (private_key, public_key, chain_code) = match &node.private_key {
        Some(parent) => {
            let (key, chain) = derive_private(parent, chain_code, index)?;
            let public = key.public_key();
            (Some(key), public, chain)
        }
        None => {
            let (public, chain) = derive_public(&node.public_key, chain_code, index)?;
            (None, public, chain)
        }
    };
    tracing::trace!(depth, index, hardened = is_hardened(index), "child derived");
    Ok(Node {
        private_key,
        public_key,
        chain_code: Some(chain_code),
        depth,
        index,
        parent_fingerprint: node.fingerprint(),
    })
}

fn check_version(
    key: &ExtendedKey,
    expected: u32,
    kind: fn(ErrorDetail) -> WalletError,
) -> Result<(), WalletError> {
    if key.version_u32() == expected {
        Ok(())
    } else {
        Err(kind(ErrorDetail::mismatch(
            "invalid extended key version",
            hex::encode(&expected.to_be_bytes()),
            hex::encode(&key.version),
        )))
    }
}

fn check_strict(
    key: &ExtendedKey,
    strict: bool,
    kind: fn(ErrorDetail) -> WalletError,
) -> Result<(), WalletError> {
    if strict && !key.is_root() {
        return Err(kind(ErrorDetail::mismatch(
            "strict mode requires a root extended key",
            "depth 0",
            format!("depth {}", key.depth),
        )));
    }
    Ok(())
}

impl<C: Bip32Curve> Hd for Bip32Hd<C> {
    fn name(&self) -> &'static str {
        "BIP32"
    }

    fn ecc(&self) -> EccKind {
        C::KIND
    }

    fn derive(&mut self, path: &DerivationPath) -> Result<(), WalletError> {
        self.derive_with(path, C::derive_private, C::derive_public)
    }

    fn clean_derivation(&mut self) {
        self.current = self.root.clone();
        self.path = DerivationPath::root();
    }

    fn path(&self) -> DerivationPath {
        self.path.clone()
    }

    fn root_xprv(&self) -> Option<Zeroizing<String>> {
        self.xprv_of(&self.root)
    }

    fn root_xpub(&self) -> Option<String> {
        self.xpub_of(&self.root)
    }

    fn xprv(&self) -> Option<Zeroizing<String>> {
        self.xprv_of(&self.current)
    }

    fn xpub(&self) -> Option<String> {
        self.xpub_of(&self.current)
    }

    fn root_private_key(&self) -> Option<Zeroizing<Vec<u8>>> {
        self.root.private_key.as_ref().map(EccPrivateKey::raw)
    }

    fn root_chain_code(&self) -> Option<ChainCode> {
        self.root.chain_code
    }

    fn root_public_key(&self) -> Vec<u8> {
        self.encode_public(&self.root.public_key)
    }

    fn private_key(&self) -> Option<Zeroizing<Vec<u8>>> {
        self.current.private_key.as_ref().map(EccPrivateKey::raw)
    }

    fn wif(&self) -> Option<Zeroizing<String>> {
        let prefix = self.options.wif_prefix?;
        let key = self.private_key()?;
        private_key_to_wif(&key, prefix, self.options.public_key_type).ok()
    }

    fn chain_code(&self) -> Option<ChainCode> {
        self.current.chain_code
    }

    fn public_key(&self) -> Vec<u8> {
        self.encode_public(&self.current.public_key)
    }

    fn public_key_type(&self) -> PublicKeyType {
        self.options.public_key_type
    }

    fn hash(&self) -> Option<[u8; 20]> {
        Some(self.current.hash())
    }

    fn parent_fingerprint(&self) -> Option<[u8; 4]> {
        Some(self.current.parent_fingerprint)
    }

    fn depth(&self) -> u8 {
        self.current.depth
    }

    fn index(&self) -> u32 {
        self.current.index
    }

    fn strict(&self) -> Option<bool> {
        Some(self.root.is_master())
    }
}
