//! Address codec Known Answer Test vectors.
//!
//! secp256k1 vectors use the public key of scalar 1 (the generator `G`);
//! ed25519 vectors use the RFC 8032 test-1 public key. Each vector is
//! checked through the runtime [`AddressType`] dispatch, then decoded back.

use hdwallet_core::addresses::{self, AddressType};
use hdwallet_core::encoding::hex;
use hdwallet_core::{AddressParams, PublicKeyType, WalletError};

const SECP256K1_G: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
const ED25519_RFC8032: &str = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";

const SECP256K1_VECTORS: &[(AddressType, &str)] = &[
    (AddressType::P2pkh, "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"),
    (AddressType::P2sh, "3LRW7jeCvQCRdPF8S3yUCfRAx4eqXFmdcr"),
    (AddressType::P2wpkh, "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"),
    (AddressType::P2wpkhInP2sh, "3JvL6Ymt8MVWiCNHC7oWU6nLeHNJKLZGLN"),
    (AddressType::P2wsh, "bc1q9qs9xv7mjghkd69fgx62xttxmeww5q7eekjxu0nxtzf4yu4ekf8s4plngs"),
    (AddressType::P2wshInP2sh, "344YToRR99ER5CRo975kXTUAnYcBrVxQYm"),
    (AddressType::P2tr, "bc1pmfr3p9j00pfxjh0zmgp99y8zftmd3s5pmedqhyptwy6lm87hf5sspknck9"),
    (AddressType::Ripple, "rBgGZ9tc4him9KBzD8fKFiQz3fSZpaSwMH"),
    (AddressType::Ethereum, "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"),
    (AddressType::Tron, "TMVQGm1qAQYVdetCeGRRkTWYYrLXuHK2HC"),
    (AddressType::Harmony, "one10e0525sfrf53yh2aljmm3sn9jq5njk7ltpz8tw"),
    (AddressType::OktChain, "ex10e0525sfrf53yh2aljmm3sn9jq5njk7lvf6rfx"),
    (AddressType::Injective, "inj10e0525sfrf53yh2aljmm3sn9jq5njk7lwfmzjf"),
    (AddressType::Cosmos, "cosmos1w508d6qejxtdg4y5r3zarvary0c5xw7k6ah60c"),
    (AddressType::Avalanche, "X-avax1w508d6qejxtdg4y5r3zarvary0c5xw7k0l6nk9"),
    (AddressType::Tezos, "tz2BCeQSi5ETyKJsob61pWCoQvoGtsrJBEt2"),
    (AddressType::Neo, "AK2awv7PC6pAGkHksSaYpAckRc1bMKYWPh"),
    (AddressType::Filecoin, "f1wcuzrs736zqzbbjjdgl2wvyyufuk4pefbymzf2i"),
    (AddressType::Icon, "hx0502987e630ea7ebb2bf1d84a65a727109385bcf"),
    (AddressType::Zilliqa, "zil198jk9ae53ry29wuah3tspvmp649ekp250ajt0a"),
    (AddressType::Ergo, "9fSgJ7BmUxBQJ454prQDQ7fQMBkXPLaAmDnimgTtjym6FYPHjAV"),
];

const ED25519_VECTORS: &[(AddressType, &str)] = &[
    (AddressType::Stellar, "GDLVVGABQKYQVN6VJP7NHSLEA45A5YLS6PNKMIZFV4BBU2HXA5IRVHUR"),
    (AddressType::Algorand, "25NJQAMCWEFLPVKL73J4SZAHHIHOC4XT3KTCGJNPAINGR5YHKENMEF5QTE"),
    (AddressType::Nano, "nano_3ottm11r7eacpzcnqzpms7k1ggigw7sh9po86ekty1itf5uignatnb14pyae"),
    (AddressType::Tezos, "tz1N7tYGMGs3GGjeJAJKtbycAWcvoPNSUYgu"),
    (AddressType::Solana, "FVen3X669xLzsi6N2V91DoiyzHzg1uAgqiT8jZ9nS96Z"),
    (AddressType::Aptos, "0x63c5215e87770d17b9f4cd47c777e322f4eb152cfd2054c1080fd9d57c48913b"),
    (AddressType::Sui, "0x304af458e90e97c841685b8cbbc59b909f3e2cf150df590ada4c81452c29737d"),
    (AddressType::Near, ED25519_RFC8032),
    (AddressType::Iota, "iota1qpuyntpsf95qhc00wch0urfkuqtn8s6xf6cv032czw9v7f9mycaax9x5s8n"),
    (AddressType::MultiversX, "erd16adfsqvzky9t042tlmfujeq88g8wzuhnm2nzxfd0qgdx3ac82ydqr3ns5u"),
];

fn tezos_params(kind: AddressType, prefix: &str) -> AddressParams {
    if kind == AddressType::Tezos {
        AddressParams::default().with_prefix(prefix)
    } else {
        AddressParams::default()
    }
}

#[test]
fn secp256k1_vectors() {
    let key = hex::decode(SECP256K1_G).unwrap();
    for &(kind, expected) in SECP256K1_VECTORS {
        let params = tezos_params(kind, "tz2");
        let address = addresses::encode(kind, &key, &params).unwrap();
        assert_eq!(address, expected, "{kind}");
        assert!(addresses::decode(kind, &address, &params).is_ok(), "{kind} decode");
    }
}

#[test]
fn ed25519_vectors() {
    let key = hex::decode(ED25519_RFC8032).unwrap();
    for &(kind, expected) in ED25519_VECTORS {
        let params = tezos_params(kind, "tz1");
        let address = addresses::encode(kind, &key, &params).unwrap();
        assert_eq!(address, expected, "{kind}");
        assert!(addresses::decode(kind, &address, &params).is_ok(), "{kind} decode");
    }
}

#[test]
fn uncompressed_p2pkh() {
    let key = hex::decode(SECP256K1_G).unwrap();
    let params = AddressParams {
        public_key_type: PublicKeyType::Uncompressed,
        ..AddressParams::default()
    };
    assert_eq!(
        addresses::encode(AddressType::P2pkh, &key, &params).unwrap(),
        "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm"
    );
}

#[test]
fn corrupted_checksums_are_rejected() {
    let params = AddressParams::default();
    let cases = [
        (AddressType::P2pkh, "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMJ"),
        (AddressType::Stellar, "GDLVVGABQKYQVN6VJP7NHSLEA45A5YLS6PNKMIZFV4BBU2HXA5IRVHUS"),
        (AddressType::Cosmos, "cosmos1w508d6qejxtdg4y5r3zarvary0c5xw7k6ah60d"),
    ];
    for (kind, address) in cases {
        let err = addresses::decode(kind, address, &params).unwrap_err();
        assert!(
            matches!(err, WalletError::Checksum(_) | WalletError::Address(_)),
            "{kind}: {err}"
        );
    }
}

#[test]
fn ethereum_checksum_case_is_optional_on_request() {
    let key = hex::decode(SECP256K1_G).unwrap();
    let params = AddressParams {
        skip_checksum_encode: true,
        ..AddressParams::default()
    };
    let address = addresses::encode(AddressType::Ethereum, &key, &params).unwrap();
    assert_eq!(address, "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf");
}
