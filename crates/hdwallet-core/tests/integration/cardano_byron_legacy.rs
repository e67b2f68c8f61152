//! Cardano Byron-Legacy: Daedalus-style addresses carrying the encrypted
//! derivation path, wrapped in CBOR with a CRC-32.

use hdwallet_core::addresses::cardano::decrypt_derivation_path;
use hdwallet_core::addresses::{self, AddressType};
use hdwallet_core::crypto::checksum::crc32;
use hdwallet_core::encoding::base58::{self, Alphabet};
use hdwallet_core::encoding::cbor::{self, Value};
use hdwallet_core::{AddressParams, CardanoHd, CardanoType, DerivationPath, Hd, HdOptions, Seed, SeedScheme};

const ENTROPY: [u8; 32] = [
    0x0b, 0x5c, 0x2a, 0x91, 0x3f, 0x77, 0xe4, 0x10, 0x8d, 0x62, 0xc9, 0x04, 0x5e, 0xa3, 0x1b, 0xf8, 0x29, 0x6d,
    0x90, 0x4c, 0xb7, 0x13, 0xde, 0x85, 0x3a, 0xf1, 0x66, 0x08, 0xc2, 0x9b, 0x57, 0xe0,
];
const PATH: &str = "m/0'/0'";

fn legacy_wallet() -> CardanoHd {
    let seed = Seed::from_entropy(SeedScheme::Cardano(CardanoType::ByronLegacy), &ENTROPY, None).unwrap();
    assert_eq!(seed.len(), 32);
    CardanoHd::from_seed(seed.expose(), CardanoType::ByronLegacy, None, HdOptions::default()).unwrap()
}

fn legacy_address() -> (String, Vec<u8>) {
    let mut hd = legacy_wallet();
    let path_key = hd.path_key().unwrap();
    let path = DerivationPath::parse(PATH).unwrap();
    hd.derive(&path).unwrap();
    let params = AddressParams {
        chain_code: hd.chain_code(),
        path: Some(path),
        path_key: Some(path_key.to_vec()),
        ..AddressParams::default()
    };
    let address = addresses::encode(AddressType::CardanoByronLegacy, &hd.public_key(), &params).unwrap();
    (address, path_key.to_vec())
}

#[test]
fn address_prefix() {
    let (address, _) = legacy_address();
    assert!(address.starts_with("DdzFF"), "{address}");
}

#[test]
fn outer_crc_matches_inner_payload() {
    let (address, _) = legacy_address();
    let raw = base58::decode(&address, Alphabet::Bitcoin).unwrap();
    let outer = cbor::decode(&raw).unwrap();
    let items = outer.as_array().unwrap();
    assert_eq!(items.len(), 2);
    let Value::Tag(24, inner) = &items[0] else {
        panic!("missing tag 24");
    };
    let payload = inner.as_bytes().unwrap();
    assert_eq!(items[1].as_unsigned(), Some(u64::from(crc32(payload))));

    let fields = cbor::decode(payload).unwrap();
    let attributes = &fields.as_array().unwrap()[1];
    assert!(attributes.map_get(1).is_some());
}

#[test]
fn path_attribute_decrypts() {
    let (address, path_key) = legacy_address();
    let path = decrypt_derivation_path(&address, &path_key).unwrap();
    assert_eq!(path.to_string(), PATH);

    let mut wrong_key = path_key;
    wrong_key[0] ^= 0xff;
    assert!(decrypt_derivation_path(&address, &wrong_key).is_err());
}

#[test]
fn decode_returns_the_address_root() {
    let (address, _) = legacy_address();
    let root = addresses::decode(AddressType::CardanoByronLegacy, &address, &AddressParams::default()).unwrap();
    assert_eq!(root.len(), 28);
    assert!(addresses::decode(AddressType::CardanoByronIcarus, &address, &AddressParams::default()).is_ok());
}

#[test]
fn path_key_is_legacy_only() {
    let icarus = CardanoHd::from_seed(&ENTROPY[..16], CardanoType::ByronIcarus, None, HdOptions::default()).unwrap();
    assert!(icarus.path_key().is_none());
    assert_eq!(legacy_wallet().path_key().unwrap().len(), 32);
}
