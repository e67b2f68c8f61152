//! SLIP-0010 Known Answer Test vectors.
//!
//! <https://github.com/satoshilabs/slips/blob/master/slip-0010.md>: test
//! vector 2 for ed25519 and test vector 1 for NIST P-256.

use hdwallet_core::ecc::{Nist256p1, Slip10Ed25519};
use hdwallet_core::encoding::hex;
use hdwallet_core::{Bip32Hd, DerivationPath, Hd, HdOptions, WalletError};

// (path step, private key, chain code, public key)
type Step = (&'static str, &'static str, &'static str, &'static str);

const ED25519_SEED: &str = "fffcf9f6f3f0edeae7e4e1dedbd8d5d2cfccc9c6c3c0bdbab7b4b1aeaba8a5a29f9c999693908d8a8784817e7b7875726f6c696663605d5a5754514e4b484542";

const ED25519_CHAIN: &[Step] = &[
    (
        "m",
        "171cb88b1b3c1db25add599712e36245d75bc65a1a5c9e18d76f9f2b1eab4012",
        "ef70a74db9c3a5af931b5fe73ed8e1a53464133654fd55e7a66f8570b8e33c3b",
        "008fe9693f8fa62a4305a140b9764c5ee01e455963744fe18204b4fb948249308a",
    ),
    (
        "m/0'",
        "1559eb2bbec5790b0c65d8693e4d0875b1747f4970ae8b650486ed7470845635",
        "0b78a3226f915c082bf118f83618a618ab6dec793752624cbeb622acb562862d",
        "0086fab68dcb57aa196c77c5f264f215a112c22a912c10d123b0d03c3c28ef1037",
    ),
    (
        "m/2147483647'",
        "ea4f5bfe8694d8bb74b7b59404632fd5968b774ed545e810de9c32a4fb4192f4",
        "138f0b2551bcafeca6ff2aa88ba8ed0ed8de070841f0c4ef0165df8181eaad7f",
        "005ba3b9ac6e90e83effcd25ac4e58a1365a9e35a3d3ae5eb07b9e4d90bcf7506d",
    ),
    (
        "m/1'",
        "3757c7577170179c7868353ada796c839135b3d30554bbb74a4b1e4a5a58505c",
        "73bd9fff1cfbde33a1b846c27085f711c0fe2d66fd32e139d3ebc28e5a4a6b90",
        "002e66aa57069c86cc18249aecf5cb5a9cebbfd6fadeab056254763874a9352b45",
    ),
    (
        "m/2147483646'",
        "5837736c89570de861ebc173b1086da4f505d4adb387c6a1b1342d5e4ac9ec72",
        "0902fe8a29f9140480a00ef244bd183e8a13288e4412d8389d140aac1794825a",
        "00e33c0f7d81d843c572275f287498e8d408654fdf0d1e065b84e2e6f157aab09b",
    ),
    (
        "m/2'",
        "551d333177df541ad876a60ea71f00447931c0a9da16f227c11ea080d7391b8d",
        "5d70af781f3a37b829f0d060924d5e960bdc02e85423494afc0b1a41bbe196d4",
        "0047150c75db263559a70d5778bf36abbab30fb061ad69f69ece61a72b0cfa4fc0",
    ),
];

const NIST_SEED: &str = "000102030405060708090a0b0c0d0e0f";

const NIST_CHAIN: &[Step] = &[
    (
        "m",
        "612091aaa12e22dd2abef664f8a01a82cae99ad7441b7ef8110424915c268bc2",
        "beeb672fe4621673f722f38529c07392fecaa61015c80c34f29ce8b41b3cb6ea",
        "0266874dc6ade47b3ecd096745ca09bcd29638dd52c2c12117b11ed3e458cfa9e8",
    ),
    (
        "m/0'",
        "6939694369114c67917a182c59ddb8cafc3004e63ca5d3b84403ba8613debc0c",
        "3460cea53e6a6bb5fb391eeef3237ffd8724bf0a40e94943c98b83825342ee11",
        "0384610f5ecffe8fda089363a41f56a5c7ffc1d81b59a612d0d649b2d22355590c",
    ),
    (
        "m/1",
        "284e9d38d07d21e4e281b645089a94f4cf5a5a81369acf151a1c3a57f18b2129",
        "4187afff1aafa8445010097fb99d23aee9f599450c7bd140b6826ac22ba21d0c",
        "03526c63f8d0b4bbbf9c80df553fe66742df4676b241dabefdef67733e070f6844",
    ),
    (
        "m/2'",
        "694596e8a54f252c960eb771a3c41e7e32496d03b954aeb90f61635b8e092aa7",
        "98c7514f562e64e74170cc3cf304ee1ce54d6b6da4f880f313e8204c2a185318",
        "0359cf160040778a4b14c5f4d7b76e327ccc8c4a6086dd9451b7482b5a4972dda0",
    ),
    (
        "m/2",
        "5996c37fd3dd2679039b23ed6f70b506c6b56b3cb5e424681fb0fa64caf82aaa",
        "ba96f776a5c3907d7fd48bde5620ee374d4acfd540378476019eab70790c63a0",
        "029f871f4cb9e1c97f9f4de9ccd0d4a2f2a171110c61178f84430062230833ff20",
    ),
    (
        "m/1000000000",
        "21c4f269ef0a5fd1badf47eeacebeeaa3de22eb8e5b0adcd0f27dd99d34d0119",
        "b9b7b82d326bb9cb5b5b121066feea4eb93d5241103c9e7a18aad40f1dde8059",
        "02216cd26d31147f72427a453c443ed2cde8a1e53c9cc44e5ddf739725413fe3f4",
    ),
];

fn walk(hd: &mut impl Hd, chain: &[Step]) {
    for (step, private_key, chain_code, public_key) in chain {
        hd.derive(&DerivationPath::parse(step).unwrap()).unwrap();
        assert_eq!(hex::encode(&hd.private_key().unwrap()), *private_key, "private key after {step}");
        assert_eq!(hex::encode(&hd.chain_code().unwrap()), *chain_code, "chain code after {step}");
        assert_eq!(hex::encode(&hd.public_key()), *public_key, "public key after {step}");
    }
}

#[test]
fn ed25519_test_vector_2() {
    let mut hd = Bip32Hd::<Slip10Ed25519>::from_seed(&hex::decode(ED25519_SEED).unwrap(), HdOptions::default()).unwrap();
    walk(&mut hd, ED25519_CHAIN);
    assert_eq!(hd.path().to_string(), "m/0'/2147483647'/1'/2147483646'/2'");
}

#[test]
fn ed25519_rejects_non_hardened_children() {
    let mut hd = Bip32Hd::<Slip10Ed25519>::from_seed(&hex::decode(ED25519_SEED).unwrap(), HdOptions::default()).unwrap();
    assert!(matches!(
        hd.derive(&DerivationPath::parse("m/0").unwrap()),
        Err(WalletError::Derivation(_))
    ));
    assert_eq!(hd.depth(), 0);
}

#[test]
fn nist256p1_test_vector_1() {
    let mut hd = Bip32Hd::<Nist256p1>::from_seed(&hex::decode(NIST_SEED).unwrap(), HdOptions::default()).unwrap();
    walk(&mut hd, NIST_CHAIN);
    assert_eq!(hd.path().to_string(), "m/0'/1/2'/2/1000000000");
}

#[test]
fn nist256p1_public_derivation_matches() {
    let mut hd = Bip32Hd::<Nist256p1>::from_seed(&hex::decode(NIST_SEED).unwrap(), HdOptions::default()).unwrap();
    hd.derive(&DerivationPath::parse("m/0'/1/2'").unwrap()).unwrap();
    let xpub = hd.xpub().unwrap();
    let mut watch = Bip32Hd::<Nist256p1>::from_xpub(&xpub, HdOptions::default(), false).unwrap();
    watch.derive(&DerivationPath::parse("m/2/1000000000").unwrap()).unwrap();
    assert_eq!(hex::encode(&watch.public_key()), NIST_CHAIN[5].3);
}
