//! Cardano through the facade: Shelley base/enterprise/reward addresses
//! from one account, and the Byron layouts.

use hdwallet::{AddressType, CardanoType, DerivationPath, HdWallet, Network, WalletConfig, WalletError};
use hdwallet_core::addresses::cardano::decrypt_derivation_path;
use hdwallet_core::encoding::hex;

const ENTROPY: &str = "000102030405060708090a0b0c0d0e0f";
const BASE_ADDRESS: &str =
    "addr1qxwgyuesfey47tcv459ah347xjhsmekmescgx6e8eqpkarh9zl04f0qd6vy7f4ckqce75dwasyjnhjl87cetfjasnstselpljw";
const ENTERPRISE_ADDRESS: &str = "addr1vxwgyuesfey47tcv459ah347xjhsmekmescgx6e8eqpkars93fldp";
const REWARD_ADDRESS: &str = "stake1u8j30h65hsxaxz0y6utqvvl2xhwczffme0nlvv45ewcfc9cswvd6d";

fn config(cardano_type: CardanoType) -> WalletConfig {
    WalletConfig {
        symbol: "ADA".into(),
        cardano_type,
        ..WalletConfig::default()
    }
}

fn wallet(cardano_type: CardanoType) -> HdWallet {
    let entropy = hex::decode(ENTROPY).unwrap();
    let mut wallet = HdWallet::from_entropy(&config(cardano_type), &entropy, None).unwrap();
    wallet.derive_default().unwrap();
    wallet
}

#[test]
fn shelley_addresses_of_the_first_payment_key() {
    let wallet = wallet(CardanoType::ShelleyIcarus);
    assert_eq!(wallet.path().to_string(), "m/1852'/1815'/0'/0/0");
    assert_eq!(wallet.address().unwrap(), BASE_ADDRESS);
    assert_eq!(wallet.address_of(AddressType::CardanoShelleyEnterprise).unwrap(), ENTERPRISE_ADDRESS);
    assert_eq!(wallet.address_of(AddressType::CardanoShelleyReward).unwrap(), REWARD_ADDRESS);

    let dump = wallet.dump();
    let node = &dump.derivations[0];
    assert_eq!(node.addresses.len(), 3);
    assert_eq!(node.addresses["Cardano-Shelley"], BASE_ADDRESS);
}

#[test]
fn staking_key_needs_an_account_path() {
    let mut wallet = wallet(CardanoType::ShelleyIcarus);
    wallet.derive_from_root(&DerivationPath::parse("m/1852'").unwrap()).unwrap();
    assert!(matches!(wallet.address(), Err(WalletError::Address(_))));
    assert!(wallet.address_of(AddressType::CardanoShelleyEnterprise).is_ok());
}

#[test]
fn testnet_shelley_prefixes() {
    let entropy = hex::decode(ENTROPY).unwrap();
    let mut wallet =
        HdWallet::from_entropy(&config(CardanoType::ShelleyIcarus).with_network(Network::Testnet), &entropy, None)
            .unwrap();
    wallet.derive_default().unwrap();
    assert!(wallet.address().unwrap().starts_with("addr_test1q"));
    assert!(wallet
        .address_of(AddressType::CardanoShelleyReward)
        .unwrap()
        .starts_with("stake_test1"));
}

#[test]
fn byron_icarus_address() {
    let wallet = wallet(CardanoType::ByronIcarus);
    assert_eq!(wallet.address_type(), AddressType::CardanoByronIcarus);
    assert_eq!(wallet.path().to_string(), "m/44'/1815'/0'/0/0");
    assert_eq!(wallet.address().unwrap(), "Ae2tdPwUPEZ9CxoMnPY4CmskeKnkLpdMgw1NR3i1s66ozLNDK2jfwTnYLix");
    assert_eq!(wallet.address_types(), vec![AddressType::CardanoByronIcarus]);
}

#[test]
fn byron_legacy_address_carries_the_encrypted_path() {
    let wallet = wallet(CardanoType::ByronLegacy);
    assert_eq!(wallet.path().to_string(), "m/0'/0'");
    let address = wallet.address().unwrap();
    assert!(address.starts_with("DdzFF"), "{address}");

    let dump = wallet.dump();
    let path_key = hex::decode(dump.path_key.as_deref().unwrap()).unwrap();
    assert_eq!(decrypt_derivation_path(&address, &path_key).unwrap(), wallet.path());
}

#[test]
fn account_xpub_rebuilds_the_enterprise_address() {
    let mut account = wallet(CardanoType::ShelleyIcarus);
    account
        .derive_from_root(&DerivationPath::parse("m/1852'/1815'/0'").unwrap())
        .unwrap();
    let xpub = account.hd().xpub().unwrap();

    let mut watch = HdWallet::from_xpub(&config(CardanoType::ShelleyIcarus), &xpub, false).unwrap();
    watch.derive(&DerivationPath::parse("m/0/0").unwrap()).unwrap();
    assert_eq!(
        watch.address_of(AddressType::CardanoShelleyEnterprise).unwrap(),
        ENTERPRISE_ADDRESS
    );
    assert!(watch.hd().private_key().is_none());
}

#[test]
fn icarus_passphrase_changes_the_root() {
    let entropy = hex::decode(ENTROPY).unwrap();
    let plain = HdWallet::from_entropy(&config(CardanoType::ShelleyIcarus), &entropy, None).unwrap();
    let protected = HdWallet::from_entropy(&config(CardanoType::ShelleyIcarus), &entropy, Some("cardano")).unwrap();
    assert_ne!(plain.hd().root_public_key(), protected.hd().root_public_key());
    assert!(protected.dump().passphrase);
}
