//! Electrum-v2 phrases: seed version detection, seed derivation and the
//! first receive address in each mode.

use hdwallet_core::addresses::{self, AddressType};
use hdwallet_core::crypto::hmac_sha512;
use hdwallet_core::entropy::Scheme;
use hdwallet_core::mnemonic::MnemonicOptions;
use hdwallet_core::{
    AddressParams, DerivationPath, ElectrumV2Hd, ElectrumV2Mode, ElectrumV2Type, Hd, HdOptions, Language, Mnemonic,
    Seed, SeedScheme,
};

const SEGWIT_PHRASE: &str = "wild father tree among universe such mobile favorite target dynamic credit identify";

#[test]
fn segwit_phrase_version_prefix() {
    let mac = hmac_sha512(b"Seed version", SEGWIT_PHRASE.as_bytes());
    assert_eq!(mac[0], 0x10);
    assert_eq!(mac[1] >> 4, 0x0);
    let mnemonic = Mnemonic::parse(Scheme::ElectrumV2, SEGWIT_PHRASE).unwrap();
    assert_eq!(mnemonic.electrum_type(), Some(ElectrumV2Type::Segwit));
}

#[test]
fn segwit_receive_and_change() {
    let seed = Seed::from_mnemonic(SeedScheme::ElectrumV2, SEGWIT_PHRASE, None).unwrap();
    assert_eq!(seed.len(), 64);
    let mut hd = ElectrumV2Hd::from_seed(seed.expose(), ElectrumV2Mode::Segwit, HdOptions::default()).unwrap();

    hd.derive_index(0, 0).unwrap();
    let receive = addresses::encode(AddressType::P2wpkh, &hd.public_key(), &AddressParams::default()).unwrap();
    assert_eq!(receive, "bc1q4794m2uuw9jmjszmplfj4wvvr5j272fpnx2cse");

    hd.derive(&DerivationPath::parse("m/1/0").unwrap()).unwrap();
    assert_eq!(hd.path().to_string(), "m/0'/1/0");
    let change = addresses::encode(AddressType::P2wpkh, &hd.public_key(), &AddressParams::default()).unwrap();
    assert_ne!(change, receive);
}

#[test]
fn generated_standard_phrase() {
    let options = MnemonicOptions {
        electrum_type: ElectrumV2Type::Standard,
        ..MnemonicOptions::default()
    };
    let mnemonic = Mnemonic::generate(Scheme::ElectrumV2, 12, Language::English, options).unwrap();
    let phrase = mnemonic.phrase();
    let mac = hmac_sha512(b"Seed version", mnemonic.normalized_phrase().as_bytes());
    assert_eq!(mac[0], 0x01);
    assert_eq!(
        Mnemonic::parse(Scheme::ElectrumV2, &phrase).unwrap().electrum_type(),
        Some(ElectrumV2Type::Standard)
    );

    let seed = Seed::from_mnemonic(SeedScheme::ElectrumV2, &phrase, None).unwrap();
    let mut hd = ElectrumV2Hd::from_seed(seed.expose(), ElectrumV2Mode::Standard, HdOptions::default()).unwrap();
    assert_eq!(hd.mode().address_type(), AddressType::P2pkh);
    hd.derive(&DerivationPath::parse("m/0/0").unwrap()).unwrap();
    assert_eq!(hd.path().to_string(), "m/0/0");
    let address = addresses::encode(hd.mode().address_type(), &hd.public_key(), &AddressParams::default()).unwrap();
    assert!(address.starts_with('1'));
}

#[test]
fn bip39_phrase_is_not_electrum() {
    let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    assert!(!Mnemonic::is_valid(Scheme::ElectrumV2, phrase));
}
