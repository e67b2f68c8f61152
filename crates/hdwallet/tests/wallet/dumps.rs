//! JSON configuration in, JSON dumps out: range expansion, omitted
//! fields and the wallet-wide header.

use hdwallet::{DerivationPath, HdWallet, WalletConfig, WalletError};
use proptest::prelude::*;

use super::{init_tracing, PHRASE};

fn bitcoin() -> HdWallet {
    HdWallet::from_mnemonic(&WalletConfig::default(), PHRASE, None).unwrap()
}

#[test]
fn range_expands_to_one_node_per_index() {
    init_tracing();
    let wallet = bitcoin();
    let dump = wallet.dumps(&DerivationPath::parse("m/44'/0'/0'/0/0-4").unwrap()).unwrap();
    assert_eq!(dump.derivations.len(), 5);
    let paths: Vec<&str> = dump.derivations.iter().map(|n| n.path.as_str()).collect();
    assert_eq!(
        paths,
        [
            "m/44'/0'/0'/0/0",
            "m/44'/0'/0'/0/1",
            "m/44'/0'/0'/0/2",
            "m/44'/0'/0'/0/3",
            "m/44'/0'/0'/0/4"
        ]
    );
    assert_eq!(dump.derivations[0].addresses["P2PKH"], "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA");
    assert!(wallet.path().is_root());
}

#[test]
fn oversized_range_is_a_derivation_error() {
    let wallet = bitcoin();
    let path = DerivationPath::parse("m/0-99999/0-99999").unwrap();
    assert!(matches!(wallet.dumps(&path), Err(WalletError::Derivation(_))));
}

#[test]
fn dump_json_header_and_node() {
    init_tracing();
    let mut wallet = bitcoin();
    wallet.derive_default().unwrap();
    let json = wallet.dump().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["cryptocurrency"], "Bitcoin");
    assert_eq!(value["symbol"], "BTC");
    assert_eq!(value["network"], "mainnet");
    assert_eq!(value["coinType"], 0);
    assert_eq!(value["hd"], "BIP32");
    assert_eq!(value["mnemonic"], PHRASE);
    assert_eq!(value["words"], 12);
    assert_eq!(value["entropy"], "00000000000000000000000000000000");
    assert_eq!(value["passphrase"], false);
    assert!(value["rootXprv"].as_str().unwrap().starts_with("xprv"));
    assert!(value.get("viewPrivateKey").is_none());

    let node = &value["derivations"][0];
    assert_eq!(node["path"], "m/44'/0'/0'/0/0");
    assert_eq!(node["depth"], 5);
    assert_eq!(node["index"], 0);
    assert_eq!(node["compressedPublicKey"], node["publicKey"]);
    assert_eq!(node["uncompressedPublicKey"].as_str().unwrap().len(), 130);
    assert_eq!(node["addresses"].as_object().unwrap().len(), 7);
}

#[test]
fn ed25519_nodes_have_no_wif() {
    let mut wallet = HdWallet::from_mnemonic(&WalletConfig::for_symbol("SOL").unwrap(), PHRASE, None).unwrap();
    wallet.derive_default().unwrap();
    let dump = wallet.dump();
    let node = &dump.derivations[0];
    assert!(node.wif.is_none());
    assert!(node.compressed_public_key.is_none());
    assert!(node.private_key.is_some());
    assert!(node.addresses.contains_key("Solana"));
}

#[test]
fn json_config_drives_the_wallet() {
    let config = WalletConfig::from_json(
        r#"{
            "symbol": "litecoin",
            "addressType": "P2WPKH",
            "derivation": "m/84'/2'/0'/0/0"
        }"#,
    )
    .unwrap();
    let mut wallet = HdWallet::from_mnemonic(&config, PHRASE, None).unwrap();
    wallet.derive_default().unwrap();
    assert_eq!(wallet.cryptocurrency().symbol, "LTC");
    assert!(wallet.address().unwrap().starts_with("ltc1q"));

    let round_trip = WalletConfig::from_json(&config.to_json().unwrap()).unwrap();
    assert_eq!(round_trip, config);
}

#[test]
fn unknown_symbol_in_json_fails_at_build_time() {
    let config = WalletConfig::from_json(r#"{"symbol": "NOPE"}"#).unwrap();
    assert!(matches!(
        HdWallet::from_mnemonic(&config, PHRASE, None),
        Err(WalletError::Symbol(_))
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn entropy_survives_the_pipeline(entropy in proptest::collection::vec(any::<u8>(), 16)) {
        let wallet = HdWallet::from_entropy(&WalletConfig::default(), &entropy, None).unwrap();
        prop_assert_eq!(wallet.entropy().unwrap(), entropy.as_slice());
        let dump = wallet.dumps(&DerivationPath::parse("m/44'/0'/0'/0/0-1").unwrap()).unwrap();
        prop_assert_eq!(dump.derivations.len(), 2);
        prop_assert_ne!(&dump.derivations[0].public_key, &dump.derivations[1].public_key);
        let expected = hdwallet_core::encoding::hex::encode(&entropy);
        prop_assert_eq!(dump.entropy.as_deref(), Some(expected.as_str()));
    }
}
