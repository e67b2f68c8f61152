//! BIP32 Known Answer Test vectors.
//!
//! Test vector 2 from BIP-0032:
//! <https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki#test-vector-2>

use hdwallet_core::ecc::Secp256k1;
use hdwallet_core::encoding::hex;
use hdwallet_core::{Bip32Hd, DerivationPath, ExtendedKey, Hd, HdOptions};

const SEED: &str = "fffcf9f6f3f0edeae7e4e1dedbd8d5d2cfccc9c6c3c0bdbab7b4b1aeaba8a5a29f9c999693908d8a8784817e7b7875726f6c696663605d5a5754514e4b484542";

// (path, xpub, xprv)
const CHAIN: &[(&str, &str, &str)] = &[
    (
        "m",
        "xpub661MyMwAqRbcFW31YEwpkMuc5THy2PSt5bDMsktWQcFF8syAmRUapSCGu8ED9W6oDMSgv6Zz8idoc4a6mr8BDzTJY47LJhkJ8UB7WEGuduB",
        "xprv9s21ZrQH143K31xYSDQpPDxsXRTUcvj2iNHm5NUtrGiGG5e2DtALGdso3pGz6ssrdK4PFmM8NSpSBHNqPqm55Qn3LqFtT2emdEXVYsCzC2U",
    ),
    (
        "m/0",
        "xpub69H7F5d8KSRgmmdJg2KhpAK8SR3DjMwAdkxj3ZuxV27CprR9LgpeyGmXUbC6wb7ERfvrnKZjXoUmmDznezpbZb7ap6r1D3tgFxHmwMkQTPH",
        "xprv9vHkqa6EV4sPZHYqZznhT2NPtPCjKuDKGY38FBWLvgaDx45zo9WQRUT3dKYnjwih2yJD9mkrocEZXo1ex8G81dwSM1fwqWpWkeS3v86pgKt",
    ),
    (
        "m/0/2147483647'",
        "xpub6ASAVgeehLbnwdqV6UKMHVzgqAG8Gr6riv3Fxxpj8ksbH9ebxaEyBLZ85ySDhKiLDBrQSARLq1uNRts8RuJiHjaDMBU4Zn9h8LZNnBC5y4a",
        "xprv9wSp6B7kry3Vj9m1zSnLvN3xH8RdsPP1Mh7fAaR7aRLcQMKTR2vidYEeEg2mUCTAwCd6vnxVrcjfy2kRgVsFawNzmjuHc2YmYRmagcEPdU9",
    ),
    (
        "m/0/2147483647'/1",
        "xpub6DF8uhdarytz3FWdA8TvFSvvAh8dP3283MY7p2V4SeE2wyWmG5mg5EwVvmdMVCQcoNJxGoWaU9DCWh89LojfZ537wTfunKau47EL2dhHKon",
        "xprv9zFnWC6h2cLgpmSA46vutJzBcfJ8yaJGg8cX1e5StJh45BBciYTRXSd25UEPVuesF9yog62tGAQtHjXajPPdbRCHuWS6T8XA2ECKADdw4Ef",
    ),
    (
        "m/0/2147483647'/1/2147483646'",
        "xpub6ERApfZwUNrhLCkDtcHTcxd75RbzS1ed54G1LkBUHQVHQKqhMkhgbmJbZRkrgZw4koxb5JaHWkY4ALHY2grBGRjaDMzQLcgJvLJuZZvRcEL",
        "xprvA1RpRA33e1JQ7ifknakTFpgNXPmW2YvmhqLQYMmrj4xJXXWYpDPS3xz7iAxn8L39njGVyuoseXzU6rcxFLJ8HFsTjSyQbLYnMpCqE2VbFWc",
    ),
    (
        "m/0/2147483647'/1/2147483646'/2",
        "xpub6FnCn6nSzZAw5Tw7cgR9bi15UV96gLZhjDstkXXxvCLsUXBGXPdSnLFbdpq8p9HmGsApME5hQTZ3emM2rnY5agb9rXpVGyy3bdW6EEgAtqt",
        "xprvA2nrNbFZABcdryreWet9Ea4LvTJcGsqrMzxHx98MMrotbir7yrKCEXw7nadnHM8Dq38EGfSh6dqA9QWTyefMLEcBYJUuekgW4BYPJcr9E7j",
    ),
];

fn root() -> Bip32Hd<Secp256k1> {
    Bip32Hd::from_seed(&hex::decode(SEED).unwrap(), HdOptions::default()).unwrap()
}

#[test]
fn test_vector_2_from_root() {
    let mut hd = root();
    for (path, xpub, xprv) in CHAIN {
        hd.clean_derivation();
        hd.derive(&DerivationPath::parse(path).unwrap()).unwrap();
        assert_eq!(hd.xpub().unwrap(), *xpub, "xpub at {path}");
        assert_eq!(hd.xprv().unwrap().as_str(), *xprv, "xprv at {path}");
    }
}

#[test]
fn test_vector_2_step_by_step() {
    let mut hd = root();
    let steps = ["m/0", "m/2147483647'", "m/1", "m/2147483646'", "m/2"];
    for (step, (path, xpub, _)) in steps.iter().zip(&CHAIN[1..]) {
        hd.derive(&DerivationPath::parse(step).unwrap()).unwrap();
        assert_eq!(hd.xpub().unwrap(), *xpub);
        assert_eq!(hd.path().to_string(), *path);
    }
    assert_eq!(hd.depth(), 5);
    assert_eq!(hd.index(), 2);
}

#[test]
fn test_vector_2_serialized_fields() {
    let (_, xpub, _) = CHAIN[2];
    let key = ExtendedKey::decode(xpub).unwrap();
    assert_eq!(key.version_u32(), 0x0488_b21e);
    assert_eq!(key.depth, 2);
    assert_eq!(key.index, 0xffff_ffff);
    assert_eq!(key.key.len(), 33);

    let parent = ExtendedKey::decode(CHAIN[1].1).unwrap();
    let mut hd = root();
    hd.derive(&DerivationPath::parse("m/0").unwrap()).unwrap();
    assert_eq!(hd.fingerprint().unwrap(), key.parent_fingerprint);
    assert_eq!(parent.depth, 1);
}

#[test]
fn test_vector_2_watch_only_branch() {
    // Public derivation from m/0/2147483647'/1 reaches the last non-hardened child.
    let (_, xpub, _) = CHAIN[3];
    let mut watch = Bip32Hd::<Secp256k1>::from_xpub(xpub, HdOptions::default(), false).unwrap();
    assert!(watch.derive(&DerivationPath::parse("m/2147483646'").unwrap()).is_err());

    let mut hd = root();
    hd.derive(&DerivationPath::parse("m/0/2147483647'/1/2").unwrap()).unwrap();
    watch.derive(&DerivationPath::parse("m/2").unwrap()).unwrap();
    assert_eq!(watch.public_key(), hd.public_key());
}
