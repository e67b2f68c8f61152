//! Monero through the facade: spend/view keys, network prefixes,
//! sub-addresses and view-only wallets.

use hdwallet::{DerivationPath, HdWallet, Network, WalletConfig, WalletError};
use hdwallet_core::encoding::hex;

const SEED: [u8; 32] = [0x01; 32];
const SPEND_PRIVATE_KEY: &str = "eb51211073fdd85629dda967a86ead8717884c2d66667c67a90508214bd8ba0c";
const VIEW_PRIVATE_KEY: &str = "38f5b6684e50679bc945939d2924b8f318a1400b0937a455168fa2e1ba2f790f";
const SPEND_PUBLIC_KEY: &str = "fa17d335e10b66cc28e09e2de59dc7e8a3d11bcf579d6d493b94c3d1f2081562";
const VIEW_PUBLIC_KEY: &str = "586ab7d8a2d29dee1fc3bd53e0f672fef30436936ffa8fc091a4f94f8349abbf";
const MAINNET_ADDRESS: &str =
    "4B6oFEmESa1b9c4uyE3bV8fuu7ggU2XUYDFT4SxB7pbNHT5FnxuhHhngq6ugWXvTN1jeKzQDPdizaZDAGW1gS6gANczNnWJ";
const STAGENET_ADDRESS: &str =
    "5BJqL5gC6B7b9c4uyE3bV8fuu7ggU2XUYDFT4SxB7pbNHT5FnxuhHhngq6ugWXvTN1jeKzQDPdizaZDAGW1gS6gANZagFRf";

fn monero() -> WalletConfig {
    WalletConfig::for_symbol("XMR").unwrap()
}

#[test]
fn seed_gives_the_primary_address() {
    let mut wallet = HdWallet::from_seed(&monero(), &SEED).unwrap();
    assert_eq!(wallet.address().unwrap(), MAINNET_ADDRESS);
    wallet.derive_default().unwrap();
    assert_eq!(wallet.address().unwrap(), MAINNET_ADDRESS);

    let dump = wallet.dump();
    assert_eq!(dump.root_private_key.as_deref(), Some(SPEND_PRIVATE_KEY));
    assert_eq!(dump.view_private_key.as_deref(), Some(VIEW_PRIVATE_KEY));
    assert_eq!(dump.view_public_key.as_deref(), Some(VIEW_PUBLIC_KEY));
    assert_eq!(dump.derivations[0].addresses["Monero"], MAINNET_ADDRESS);
}

#[test]
fn stagenet_prefix() {
    let wallet = HdWallet::from_seed(&monero().with_network(Network::Stagenet), &SEED).unwrap();
    assert_eq!(wallet.address().unwrap(), STAGENET_ADDRESS);
}

#[test]
fn spend_key_rebuilds_the_wallet() {
    let spend = hex::decode(SPEND_PRIVATE_KEY).unwrap();
    let wallet = HdWallet::from_private_key(&monero(), &spend).unwrap();
    assert_eq!(wallet.address().unwrap(), MAINNET_ADDRESS);
}

#[test]
fn sub_addresses_follow_the_path() {
    let mut wallet = HdWallet::from_seed(&monero(), &SEED).unwrap();
    wallet.derive_from_root(&DerivationPath::parse("m/1/0").unwrap()).unwrap();
    let sub = wallet.address().unwrap();
    assert!(sub.starts_with('8'), "{sub}");
    assert_ne!(sub, MAINNET_ADDRESS);
    wallet.clean_derivation();
    assert_eq!(wallet.address().unwrap(), MAINNET_ADDRESS);
}

#[test]
fn view_only_wallet_has_no_spend_key() {
    let view = hex::decode(VIEW_PRIVATE_KEY).unwrap();
    let spend = hex::decode(SPEND_PUBLIC_KEY).unwrap();
    let wallet = HdWallet::from_watch_only(&monero(), &view, &spend).unwrap();
    assert_eq!(wallet.address().unwrap(), MAINNET_ADDRESS);
    let dump = wallet.dump();
    assert!(dump.root_private_key.is_none());
    assert!(dump.derivations[0].private_key.is_none());
    assert_eq!(dump.view_private_key.as_deref(), Some(VIEW_PRIVATE_KEY));
}

#[test]
fn monero_takes_no_passphrase() {
    let mnemonic = hdwallet_core::Mnemonic::from_entropy(
        hdwallet_core::Scheme::Monero,
        &SEED,
        hdwallet::Language::English,
    )
    .unwrap();
    assert!(matches!(
        HdWallet::from_mnemonic(&monero(), &mnemonic.phrase(), Some("secret")),
        Err(WalletError::Seed(_))
    ));
    let wallet = HdWallet::from_mnemonic(&monero(), &mnemonic.phrase(), None).unwrap();
    assert_eq!(wallet.mnemonic().unwrap().words_count(), 25);
    assert_eq!(wallet.address().unwrap(), MAINNET_ADDRESS);
}
