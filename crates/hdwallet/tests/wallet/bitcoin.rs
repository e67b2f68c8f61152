//! Bitcoin through the facade: BIP44/BIP84 receive addresses, testnet
//! parameters and watch-only imports.

use hdwallet::{AddressType, DerivationPath, HdWallet, Network, PublicKeyType, WalletConfig};

use super::PHRASE;

const SEED: &str = "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
                    9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4";
const FIRST_ADDRESS: &str = "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA";

fn path(text: &str) -> DerivationPath {
    DerivationPath::parse(text).unwrap()
}

fn receiving(config: &WalletConfig) -> HdWallet {
    let mut wallet = HdWallet::from_mnemonic(config, PHRASE, None).unwrap();
    wallet.derive_default().unwrap();
    wallet
}

#[test]
fn phrase_seed_and_first_address() {
    let wallet = receiving(&WalletConfig::default());
    assert_eq!(wallet.seed().unwrap().to_hex().as_str(), SEED);
    assert_eq!(wallet.address().unwrap(), FIRST_ADDRESS);
    assert_eq!(wallet.hd().depth(), 5);
}

#[test]
fn seed_bytes_build_the_same_wallet() {
    let seed = hdwallet_core::encoding::hex::decode(SEED).unwrap();
    let mut wallet = HdWallet::from_seed(&WalletConfig::default(), &seed).unwrap();
    assert!(wallet.mnemonic().is_none());
    wallet.derive_default().unwrap();
    assert_eq!(wallet.address().unwrap(), FIRST_ADDRESS);
}

#[test]
fn native_segwit_under_bip84() {
    let config = WalletConfig::default()
        .with_address_type(AddressType::P2wpkh)
        .with_derivation(path("m/84'/0'/0'/0/0"));
    let wallet = receiving(&config);
    assert_eq!(wallet.address().unwrap(), "bc1qcr8te4kr609gcawutmrza0j4xv80jy8z306fyu");
}

#[test]
fn every_bitcoin_address_type_encodes() {
    let wallet = receiving(&WalletConfig::default());
    let types = wallet.address_types();
    assert!(types.contains(&AddressType::P2tr));
    for kind in types {
        let address = wallet.address_of(kind).unwrap();
        assert!(!address.is_empty(), "{kind}");
    }
    assert!(wallet.address_of(AddressType::P2wpkh).unwrap().starts_with("bc1q"));
    assert!(wallet.address_of(AddressType::P2tr).unwrap().starts_with("bc1p"));
    assert!(wallet.address_of(AddressType::P2sh).unwrap().starts_with('3'));
}

#[test]
fn testnet_uses_testnet_prefixes() {
    let config = WalletConfig::default().with_network(Network::Testnet);
    let wallet = receiving(&config);
    let p2pkh = wallet.address().unwrap();
    assert!(p2pkh.starts_with('m') || p2pkh.starts_with('n'), "{p2pkh}");
    assert!(wallet.address_of(AddressType::P2wpkh).unwrap().starts_with("tb1q"));
    assert!(wallet.hd().wif().unwrap().starts_with('c'));
    assert!(wallet.hd().xpub().unwrap().starts_with("tpub"));
}

#[test]
fn uncompressed_keys_change_wif_and_address() {
    let config = WalletConfig {
        public_key_type: Some(PublicKeyType::Uncompressed),
        ..WalletConfig::default()
    };
    let wallet = receiving(&config);
    assert!(wallet.hd().wif().unwrap().starts_with('5'));
    assert_eq!(wallet.hd().public_key().len(), 65);
    assert_ne!(wallet.address().unwrap(), FIRST_ADDRESS);
}

#[test]
fn account_xpub_watches_receive_addresses() {
    let mut wallet = HdWallet::from_mnemonic(&WalletConfig::default(), PHRASE, None).unwrap();
    wallet.derive_from_root(&path("m/44'/0'/0'")).unwrap();
    let xpub = wallet.hd().xpub().unwrap();

    let mut watch = HdWallet::from_xpub(&WalletConfig::default(), &xpub, false).unwrap();
    watch.derive(&path("m/0/0")).unwrap();
    assert_eq!(watch.address().unwrap(), FIRST_ADDRESS);

    let dump = watch.dump();
    assert!(dump.root_xprv.is_none());
    assert!(dump.derivations[0].private_key.is_none());
    assert!(dump.derivations[0].wif.is_none());
}

#[test]
fn strict_import_rejects_a_non_root_key() {
    let mut wallet = HdWallet::from_mnemonic(&WalletConfig::default(), PHRASE, None).unwrap();
    wallet.derive_from_root(&path("m/44'/0'/0'")).unwrap();
    let xprv = wallet.hd().xprv().unwrap();
    assert!(HdWallet::from_xprv(&WalletConfig::default(), &xprv, true).is_err());
    let root = wallet.hd().root_xprv().unwrap();
    let imported = HdWallet::from_xprv(&WalletConfig::default(), &root, true).unwrap();
    assert_eq!(imported.hd().strict(), Some(true));
}

#[test]
fn wif_and_raw_keys_rebuild_the_node() {
    let wallet = receiving(&WalletConfig::default());
    let wif = wallet.hd().wif().unwrap();
    let from_wif = HdWallet::from_wif(&WalletConfig::default(), &wif).unwrap();
    assert_eq!(from_wif.address().unwrap(), FIRST_ADDRESS);

    let private_key = wallet.hd().private_key().unwrap();
    let from_key = HdWallet::from_private_key(&WalletConfig::default(), &private_key).unwrap();
    assert_eq!(from_key.address().unwrap(), FIRST_ADDRESS);

    let from_public = HdWallet::from_public_key(&WalletConfig::default(), &wallet.hd().public_key()).unwrap();
    assert_eq!(from_public.address().unwrap(), FIRST_ADDRESS);
    assert!(from_public.hd().private_key().is_none());
}

#[test]
fn wif_is_refused_for_account_chains() {
    let config = WalletConfig::for_symbol("ETH").unwrap();
    assert!(matches!(
        HdWallet::from_wif(&config, "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn"),
        Err(hdwallet::WalletError::Wif(_))
    ));
}
