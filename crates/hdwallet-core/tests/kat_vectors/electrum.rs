//! Electrum Known Answer Test vectors.
//!
//! Electrum-v1 vectors from Electrum's wallet test suite
//! (`test_wallet_vertical.py`, old-seed wallet); Electrum-v2 segwit seed
//! from the same suite.

use hdwallet_core::addresses::{self, AddressType};
use hdwallet_core::encoding::hex;
use hdwallet_core::entropy::Scheme;
use hdwallet_core::hd::ElectrumV1Hd;
use hdwallet_core::{
    AddressParams, DerivationPath, ElectrumV2Hd, ElectrumV2Mode, ElectrumV2Type, Hd, HdOptions, Mnemonic, PublicKeyType,
    Seed, SeedScheme,
};

const V1_PHRASE: &str = "powerful random nobody notice nothing important anyway look away hidden message over";
const V1_ENTROPY: &str = "acb740e454c3134901d7c8f16497cc1c";
const V1_MASTER_PRIVATE_KEY: &str = "21b880fda2fd30081834683a7049ac9e3941a42adbc3a4616c9a9275aa960c0d";
const V1_MASTER_PUBLIC_KEY: &str = "e9d4b7866dd1e91c862aebf62a49548c7dbf7bcc6e4b7b8c9da820c7737968df\
                                    9c09d5a3e271dc814a29981f81b3faaf2737b551ef5dcc6189cf0f8252c442b3";

const V2_PHRASE: &str = "wild father tree among universe such mobile favorite target dynamic credit identify";
const V2_SEED: &str = "aac2a6302e48577ab4b46f23dbae0774e2e62c796f797d0a1b5faeb528301e30\
                       64342dafb79069e7c4c6b8c38ae11d7a973bec0d4f70626f8cc5184a8d0b0756";

fn uncompressed() -> AddressParams {
    AddressParams {
        public_key_type: PublicKeyType::Uncompressed,
        ..AddressParams::default()
    }
}

fn v1() -> ElectrumV1Hd {
    let seed = Seed::from_mnemonic(SeedScheme::ElectrumV1, V1_PHRASE, None).unwrap();
    ElectrumV1Hd::from_seed(seed.expose(), Some(0x80), PublicKeyType::Uncompressed).unwrap()
}

#[test]
fn v1_phrase_decodes_to_entropy() {
    assert_eq!(hex::encode(&Mnemonic::decode(Scheme::ElectrumV1, V1_PHRASE).unwrap()), V1_ENTROPY);
    let encoded = Mnemonic::from_entropy(
        Scheme::ElectrumV1,
        &hex::decode(V1_ENTROPY).unwrap(),
        hdwallet_core::Language::English,
    )
    .unwrap();
    assert_eq!(encoded.phrase().as_str(), V1_PHRASE);
}

#[test]
fn v1_master_keys() {
    let hd = v1();
    assert_eq!(hex::encode(&hd.master_private_key().unwrap()), V1_MASTER_PRIVATE_KEY);
    assert_eq!(hex::encode(&hd.master_public_key()[1..]), V1_MASTER_PUBLIC_KEY);
}

#[test]
fn v1_receive_and_change_addresses() {
    let mut hd = v1();
    hd.derive(&DerivationPath::parse("m/0/0").unwrap()).unwrap();
    assert_eq!(
        hex::encode(&hd.private_key().unwrap()),
        "8fdf5bc0fdd0bcfb03dd2d050d903a783e5b36de98f3963a025d2e8f0629faa5"
    );
    let receive = addresses::encode(AddressType::P2pkh, &hd.public_key(), &uncompressed()).unwrap();
    assert_eq!(receive, "1FJEEB8ihPMbzs2SkLmr37dHyRFzakqUmo");

    hd.derive(&DerivationPath::parse("m/1/0").unwrap()).unwrap();
    assert_eq!(
        hex::encode(&hd.private_key().unwrap()),
        "d2b6d90b0f903947488612823ec94897d341c4bc668852e64f68ca2cea2dcfba"
    );
    let change = addresses::encode(AddressType::P2pkh, &hd.public_key(), &uncompressed()).unwrap();
    assert_eq!(change, "1KRW8pH6HFHZh889VDq6fEKvmrsmApwNfe");
}

#[test]
fn v1_wif_is_uncompressed() {
    let mut hd = v1();
    hd.derive(&DerivationPath::parse("m/0/0").unwrap()).unwrap();
    let wif = hd.wif().unwrap();
    assert!(wif.starts_with('5'));
    let (key, kind) = hdwallet_core::wif_to_private_key(&wif, 0x80).unwrap();
    assert_eq!(kind, PublicKeyType::Uncompressed);
    assert_eq!(key, hd.private_key().unwrap());
}

#[test]
fn v2_segwit_seed() {
    let mnemonic = Mnemonic::parse(Scheme::ElectrumV2, V2_PHRASE).unwrap();
    assert_eq!(mnemonic.electrum_type(), Some(ElectrumV2Type::Segwit));
    let seed = Seed::from_mnemonic(SeedScheme::ElectrumV2, V2_PHRASE, None).unwrap();
    assert_eq!(seed.to_hex().as_str(), V2_SEED);
}

#[test]
fn v2_segwit_first_receive_address() {
    let seed = Seed::from_mnemonic(SeedScheme::ElectrumV2, V2_PHRASE, None).unwrap();
    let mut hd = ElectrumV2Hd::from_seed(seed.expose(), ElectrumV2Mode::Segwit, HdOptions::default()).unwrap();
    hd.derive(&DerivationPath::parse("m/0/0").unwrap()).unwrap();
    assert_eq!(hd.path().to_string(), "m/0'/0/0");
    let address = addresses::encode(hd.mode().address_type(), &hd.public_key(), &AddressParams::default()).unwrap();
    assert_eq!(address, "bc1q4794m2uuw9jmjszmplfj4wvvr5j272fpnx2cse");
}
