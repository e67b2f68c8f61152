//! BIP39 phrase to a Bitcoin mainnet receive address under BIP44.

use hdwallet_core::addresses::{self, AddressType};
use hdwallet_core::ecc::Secp256k1;
use hdwallet_core::{
    wif_to_private_key, AddressParams, Bip32Hd, DerivationPath, Hd, HdOptions, PublicKeyType, Seed, SeedScheme,
};

const PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
const SEED: &str = "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
                    9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4";

fn wallet() -> Bip32Hd<Secp256k1> {
    let seed = Seed::from_mnemonic(SeedScheme::Bip39, PHRASE, Some("")).unwrap();
    Bip32Hd::from_seed(seed.expose(), HdOptions::default()).unwrap()
}

#[test]
fn seed_and_root_key() {
    let seed = Seed::from_mnemonic(SeedScheme::Bip39, PHRASE, None).unwrap();
    assert_eq!(seed.to_hex().as_str(), SEED);
    let hd = wallet();
    assert!(hd.root_xprv().unwrap().starts_with("xprv9s21ZrQH143K3"));
    assert_eq!(hd.depth(), 0);
    assert_eq!(hd.parent_fingerprint(), Some([0; 4]));
}

#[test]
fn first_receive_address() {
    let mut hd = wallet();
    hd.derive(&DerivationPath::parse("m/44'/0'/0'/0/0").unwrap()).unwrap();
    let address = addresses::encode(AddressType::P2pkh, &hd.public_key(), &AddressParams::default()).unwrap();
    assert_eq!(address, "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA");
    assert_eq!(hd.path().to_string(), "m/44'/0'/0'/0/0");
    assert_eq!(hd.depth(), 5);
    assert_eq!(hd.index(), 0);
}

#[test]
fn relative_derivation_matches_absolute() {
    let mut stepwise = wallet();
    stepwise.derive(&DerivationPath::parse("m/44'/0'/0'").unwrap()).unwrap();
    let account_fingerprint = stepwise.fingerprint();
    stepwise.derive(&DerivationPath::parse("m/0").unwrap()).unwrap();
    let change_fingerprint = stepwise.fingerprint();
    stepwise.derive(&DerivationPath::parse("m/0").unwrap()).unwrap();

    let mut direct = wallet();
    direct.derive(&DerivationPath::parse("m/44'/0'/0'/0/0").unwrap()).unwrap();

    assert_eq!(stepwise.public_key(), direct.public_key());
    assert_eq!(stepwise.parent_fingerprint(), change_fingerprint);
    assert_ne!(account_fingerprint, change_fingerprint);
}

#[test]
fn wif_round_trip() {
    let mut hd = wallet();
    hd.derive(&DerivationPath::parse("m/44'/0'/0'/0/0").unwrap()).unwrap();
    let wif = hd.wif().unwrap();
    assert!(wif.starts_with('K') || wif.starts_with('L'));
    let (key, kind) = wif_to_private_key(&wif, 0x80).unwrap();
    assert_eq!(kind, PublicKeyType::Compressed);
    assert_eq!(key, hd.private_key().unwrap());

    let restored = Bip32Hd::<Secp256k1>::from_wif(&wif, HdOptions::default()).unwrap();
    assert_eq!(restored.public_key(), hd.public_key());
    assert!(restored.chain_code().is_none());
}

#[test]
fn watch_only_account_reproduces_receive_keys() {
    let mut hd = wallet();
    hd.derive(&DerivationPath::parse("m/44'/0'/0'").unwrap()).unwrap();
    let xpub = hd.xpub().unwrap();
    assert!(xpub.starts_with("xpub"));

    let mut watch = Bip32Hd::<Secp256k1>::from_xpub(&xpub, HdOptions::default(), false).unwrap();
    assert!(watch.private_key().is_none());
    watch.derive(&DerivationPath::parse("m/0/0").unwrap()).unwrap();
    hd.derive(&DerivationPath::parse("m/0/0").unwrap()).unwrap();
    assert_eq!(watch.public_key(), hd.public_key());
    assert!(watch.derive(&DerivationPath::parse("m/0'").unwrap()).is_err());
}

#[test]
fn clean_derivation_returns_to_root() {
    let mut hd = wallet();
    let root = hd.public_key();
    hd.derive(&DerivationPath::parse("m/44'/0'").unwrap()).unwrap();
    assert_ne!(hd.public_key(), root);
    hd.clean_derivation();
    assert_eq!(hd.public_key(), root);
    assert!(hd.path().is_root());
}
