//! JSON export of wallet nodes.
//!
//! A [`WalletDump`] carries the wallet-wide material (mnemonic, seed, root
//! keys) once and one [`NodeDump`] per derived node. Fields the engine
//! cannot produce are left out of the JSON.

use std::collections::BTreeMap;

use hdwallet_core::{ErrorDetail, WalletError};
use serde::Serialize;
use zeroize::Zeroize;

// ---------------------------------------------------------------------------
// Payload types
// ---------------------------------------------------------------------------

/// Wallet-wide material and the dumped nodes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletDump {
    pub cryptocurrency: String,
    pub symbol: String,
    pub network: String,
    pub coin_type: u32,
    pub hd: String,
    pub ecc: String,
    pub public_key_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entropy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<usize>,
    pub passphrase: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_xprv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_xpub: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_private_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_chain_code: Option<String>,
    pub root_public_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
    /// Cardano Byron-Legacy path key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_key: Option<String>,
    /// Monero private view key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_private_key: Option<String>,
    /// Monero public view key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_public_key: Option<String>,
    pub derivations: Vec<NodeDump>,
}

/// One derived node.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDump {
    pub path: String,
    pub depth: u8,
    pub index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xprv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xpub: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wif: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_code: Option<String>,
    pub public_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncompressed_public_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compressed_public_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_fingerprint: Option<String>,
    /// Address per address type name.
    pub addresses: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

impl WalletDump {
    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Cryptocurrency` if serialization fails.
    pub fn to_json(&self) -> Result<String, WalletError> {
        to_json(self)
    }
}

impl NodeDump {
    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Cryptocurrency` if serialization fails.
    pub fn to_json(&self) -> Result<String, WalletError> {
        to_json(self)
    }
}

impl Drop for WalletDump {
    fn drop(&mut self) {
        self.entropy.zeroize();
        self.mnemonic.zeroize();
        self.seed.zeroize();
        self.root_xprv.zeroize();
        self.root_private_key.zeroize();
        self.root_chain_code.zeroize();
        self.path_key.zeroize();
        self.view_private_key.zeroize();
    }
}

impl Drop for NodeDump {
    fn drop(&mut self) {
        self.xprv.zeroize();
        self.private_key.zeroize();
        self.wif.zeroize();
        self.chain_code.zeroize();
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, WalletError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| WalletError::Cryptocurrency(ErrorDetail::msg(format!("cannot serialize dump: {e}"))))
}
