//! Cardano Shelley-Icarus: BIP39 phrase to CIP-1852 keys and a base
//! address combining payment and staking credentials.

use hdwallet_core::addresses::{self, AddressType};
use hdwallet_core::crypto::blake2b_224;
use hdwallet_core::encoding::bech32;
use hdwallet_core::{AddressParams, CardanoHd, CardanoType, DerivationPath, Hd, HdOptions, Seed, SeedScheme};

const PHRASE: &str = "test walk nut penalty hip pave soap entry language right filter choice";
const PAYMENT_PATH: &str = "m/1852'/1815'/0'/0/0";
const STAKING_PATH: &str = "m/1852'/1815'/0'/2/0";

fn wallet(passphrase: Option<&str>) -> CardanoHd {
    let scheme = SeedScheme::Cardano(CardanoType::ShelleyIcarus);
    let seed = Seed::from_mnemonic(scheme, PHRASE, None).unwrap();
    assert_eq!(seed.len(), 16);
    CardanoHd::from_seed(seed.expose(), CardanoType::ShelleyIcarus, passphrase, HdOptions::default()).unwrap()
}

fn key_at(hd: &mut CardanoHd, path: &str) -> Vec<u8> {
    hd.clean_derivation();
    hd.derive(&DerivationPath::parse(path).unwrap()).unwrap();
    hd.public_key()
}

#[test]
fn base_address_header_and_credentials() {
    let mut hd = wallet(None);
    let payment = key_at(&mut hd, PAYMENT_PATH);
    let staking = key_at(&mut hd, STAKING_PATH);
    let params = AddressParams {
        staking_public_key: Some(staking.clone()),
        ..AddressParams::default()
    };
    let address = addresses::encode(AddressType::CardanoShelley, &payment, &params).unwrap();
    assert!(address.starts_with("addr1"));

    let data = bech32::decode("addr", &address).unwrap();
    assert_eq!(data.len(), 57);
    assert_eq!(data[0], 0x01);
    assert_eq!(&data[1..29], &blake2b_224(&payment[1..]));
    assert_eq!(&data[29..], &blake2b_224(&staking[1..]));
}

#[test]
fn reward_address_shares_the_staking_hash() {
    let mut hd = wallet(None);
    let staking = key_at(&mut hd, STAKING_PATH);
    let reward = addresses::encode(AddressType::CardanoShelleyReward, &staking, &AddressParams::default()).unwrap();
    assert!(reward.starts_with("stake1"));
    let decoded = addresses::decode(AddressType::CardanoShelleyReward, &reward, &AddressParams::default()).unwrap();
    assert_eq!(decoded, blake2b_224(&staking[1..]));
}

#[test]
fn base_address_needs_a_staking_key() {
    let mut hd = wallet(None);
    let payment = key_at(&mut hd, PAYMENT_PATH);
    assert!(addresses::encode(AddressType::CardanoShelley, &payment, &AddressParams::default()).is_err());
}

#[test]
fn passphrase_changes_the_icarus_root() {
    let plain = wallet(None);
    let protected = wallet(Some("cardano"));
    assert_ne!(plain.root_public_key(), protected.root_public_key());
}

#[test]
fn account_xpub_derives_payment_keys() {
    let mut hd = wallet(None);
    hd.derive(&DerivationPath::parse("m/1852'/1815'/0'").unwrap()).unwrap();
    let xpub = hd.xpub().unwrap();
    let mut watch = CardanoHd::from_xpub(&xpub, CardanoType::ShelleyIcarus, HdOptions::default(), false).unwrap();
    watch.derive(&DerivationPath::parse("m/0/0").unwrap()).unwrap();
    assert_eq!(watch.public_key(), key_at(&mut hd, PAYMENT_PATH));
}
