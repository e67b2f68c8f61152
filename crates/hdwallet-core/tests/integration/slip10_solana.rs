//! BIP39 seed through SLIP-10 ed25519 to Solana accounts.

use hdwallet_core::addresses::{self, AddressType};
use hdwallet_core::ecc::Slip10Ed25519;
use hdwallet_core::{AddressParams, Bip32Hd, DerivationPath, Hd, HdOptions, Seed, SeedScheme};

const PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

fn solana_at(path: &str) -> String {
    let seed = Seed::from_mnemonic(SeedScheme::Bip39, PHRASE, None).unwrap();
    let mut hd = Bip32Hd::<Slip10Ed25519>::from_seed(seed.expose(), HdOptions::default()).unwrap();
    hd.derive(&DerivationPath::parse(path).unwrap()).unwrap();
    addresses::encode(AddressType::Solana, &hd.public_key(), &AddressParams::default()).unwrap()
}

#[test]
fn phantom_style_account() {
    assert_eq!(solana_at("m/44'/501'/0'/0'"), "HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk");
}

#[test]
fn intermediate_accounts() {
    assert_eq!(solana_at("m/44'/501'"), "D2PPQSYFe83nDzk96FqGumVU8JA7J8vj2Rhjc2oXzEi5");
    assert_eq!(solana_at("m/44'/501'/0'"), "GjJyeC1r2RgkuoCWMyPYkCWSGSGLcz266EaAkLA27AhL");
}

#[test]
fn ed25519_public_key_carries_zero_prefix() {
    let seed = Seed::from_mnemonic(SeedScheme::Bip39, PHRASE, None).unwrap();
    let mut hd = Bip32Hd::<Slip10Ed25519>::from_seed(seed.expose(), HdOptions::default()).unwrap();
    hd.derive(&DerivationPath::parse("m/44'/501'/0'/0'").unwrap()).unwrap();
    let key = hd.public_key();
    assert_eq!(key.len(), 33);
    assert_eq!(key[0], 0x00);
    let decoded = addresses::decode(AddressType::Solana, &solana_at("m/44'/501'/0'/0'"), &AddressParams::default())
        .unwrap();
    assert_eq!(decoded, key[1..]);
}

#[test]
fn hardened_only() {
    let seed = Seed::from_mnemonic(SeedScheme::Bip39, PHRASE, None).unwrap();
    let mut hd = Bip32Hd::<Slip10Ed25519>::from_seed(seed.expose(), HdOptions::default()).unwrap();
    let before = hd.public_key();
    assert!(hd.derive(&DerivationPath::parse("m/44'/501'/0'/0").unwrap()).is_err());
    assert_eq!(hd.public_key(), before);
    assert!(hd.path().is_root());
}
