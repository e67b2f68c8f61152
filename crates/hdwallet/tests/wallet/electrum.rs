//! Electrum wallets through the facade: seed-type checks, default paths
//! and the uncompressed keys of v1 wallets.

use hdwallet::{AddressType, ElectrumV2Mode, HdKind, HdWallet, WalletConfig, WalletError};

const V1_PHRASE: &str = "powerful random nobody notice nothing important anyway look away hidden message over";
const V2_SEGWIT_PHRASE: &str = "wild father tree among universe such mobile favorite target dynamic credit identify";

fn electrum_v2(mode: ElectrumV2Mode) -> WalletConfig {
    WalletConfig {
        electrum_mode: mode,
        ..WalletConfig::default().with_hd(HdKind::ElectrumV2)
    }
}

#[test]
fn v2_segwit_first_receive_address() {
    let mut wallet = HdWallet::from_mnemonic(&electrum_v2(ElectrumV2Mode::Segwit), V2_SEGWIT_PHRASE, None).unwrap();
    assert_eq!(wallet.address_type(), AddressType::P2wpkh);
    wallet.derive_default().unwrap();
    assert_eq!(wallet.path().to_string(), "m/0'/0/0");
    assert_eq!(wallet.address().unwrap(), "bc1q4794m2uuw9jmjszmplfj4wvvr5j272fpnx2cse");
    assert_eq!(wallet.address_types(), vec![AddressType::P2wpkh]);
}

#[test]
fn v2_phrase_type_must_match_the_mode() {
    assert!(matches!(
        HdWallet::from_mnemonic(&electrum_v2(ElectrumV2Mode::Standard), V2_SEGWIT_PHRASE, None),
        Err(WalletError::Mnemonic(_))
    ));
}

#[test]
fn v2_generated_phrase_follows_the_mode() {
    for mode in [ElectrumV2Mode::Standard, ElectrumV2Mode::Segwit] {
        let mut wallet = HdWallet::generate(&electrum_v2(mode), 12, None).unwrap();
        wallet.derive_default().unwrap();
        let address = wallet.address().unwrap();
        match mode {
            ElectrumV2Mode::Standard => assert!(address.starts_with('1'), "{address}"),
            ElectrumV2Mode::Segwit => assert!(address.starts_with("bc1q"), "{address}"),
        }
    }
}

#[test]
fn bip39_phrase_is_not_an_electrum_phrase() {
    assert!(matches!(
        HdWallet::from_mnemonic(&electrum_v2(ElectrumV2Mode::Standard), super::PHRASE, None),
        Err(WalletError::Mnemonic(_))
    ));
}

#[test]
fn v1_receive_address_uses_uncompressed_keys() {
    let config = WalletConfig::default().with_hd(HdKind::ElectrumV1);
    let mut wallet = HdWallet::from_mnemonic(&config, V1_PHRASE, None).unwrap();
    assert_eq!(wallet.entropy().unwrap().len(), 16);
    wallet.derive_default().unwrap();
    assert_eq!(wallet.address().unwrap(), "1FJEEB8ihPMbzs2SkLmr37dHyRFzakqUmo");
    assert!(wallet.hd().wif().unwrap().starts_with('5'));

    let dump = wallet.dump();
    assert_eq!(dump.hd, "Electrum-V1");
    assert_eq!(dump.public_key_type, "uncompressed");
    assert_eq!(dump.derivations[0].addresses.len(), 1);
}

#[test]
fn v1_change_address() {
    let config = WalletConfig::default()
        .with_hd(HdKind::ElectrumV1)
        .with_derivation(hdwallet::DerivationPath::parse("m/1/0").unwrap());
    let mut wallet = HdWallet::from_mnemonic(&config, V1_PHRASE, None).unwrap();
    wallet.derive_default().unwrap();
    assert_eq!(wallet.address().unwrap(), "1KRW8pH6HFHZh889VDq6fEKvmrsmApwNfe");
}

#[test]
fn electrum_engines_take_no_extended_keys() {
    let config = WalletConfig::default().with_hd(HdKind::ElectrumV2);
    assert!(matches!(
        HdWallet::from_xpub(&config, "xpub", false),
        Err(WalletError::Hd(_))
    ));
}
