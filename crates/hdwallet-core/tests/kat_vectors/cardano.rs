//! Cardano Icarus and Shelley Known Answer Test vectors.
//!
//! Entropy `000102…0f` under the Icarus master-key scheme (CIP-0003),
//! CIP-1852 payment and staking keys, and the addresses built on them.

use hdwallet_core::addresses::{self, AddressType};
use hdwallet_core::crypto::blake2b_224;
use hdwallet_core::encoding::hex;
use hdwallet_core::{AddressParams, CardanoHd, CardanoType, DerivationPath, Hd, HdOptions, Network, Seed, SeedScheme};

const ENTROPY: &str = "000102030405060708090a0b0c0d0e0f";

const ROOT_PRIVATE_KEY: &str = "c06a3f6b48d90f0517dbf244da40cc25feaebc91bee5b92e2d9301db51520f45\
                                b3469692e2bc05cf27f7e4b749581b3719a37dc3045d69da8c0d826c88b80f57";
const ROOT_CHAIN_CODE: &str = "45a302ecb459a48b23bdf5ca1f7c5ff6a46c4fe17c30751fa49f08f4fd564a7a";
const ROOT_PUBLIC_KEY: &str = "0026a0a7144417696537eafe6e942715a6a06e4257531023dba17b33f5a283f5cd";

const PAYMENT_PUBLIC_KEY: &str = "00c2f350a90119b89382e6313f1b57ee38ac3689ab5b0360dd49d079abc1627d28";
const STAKING_PUBLIC_KEY: &str = "004218d1d80e107f9d6f13c58d168da980e2d83e2234d83057940b260ee43110d8";

fn shelley() -> CardanoHd {
    let seed = Seed::from_entropy(
        SeedScheme::Cardano(CardanoType::ShelleyIcarus),
        &hex::decode(ENTROPY).unwrap(),
        None,
    )
    .unwrap();
    CardanoHd::from_seed(seed.expose(), CardanoType::ShelleyIcarus, None, HdOptions::default()).unwrap()
}

fn key_at(hd: &mut CardanoHd, path: &str) -> Vec<u8> {
    hd.clean_derivation();
    hd.derive(&DerivationPath::parse(path).unwrap()).unwrap();
    hd.public_key()
}

#[test]
fn icarus_master_key() {
    let hd = shelley();
    assert_eq!(hex::encode(&hd.root_private_key().unwrap()), ROOT_PRIVATE_KEY);
    assert_eq!(hex::encode(&hd.root_chain_code().unwrap()), ROOT_CHAIN_CODE);
    assert_eq!(hex::encode(&hd.root_public_key()), ROOT_PUBLIC_KEY);
}

#[test]
fn cip1852_payment_and_staking_keys() {
    let mut hd = shelley();
    assert_eq!(hex::encode(&key_at(&mut hd, "m/1852'/1815'/0'/0/0")), PAYMENT_PUBLIC_KEY);
    assert_eq!(hex::encode(&key_at(&mut hd, "m/1852'/1815'/0'/2/0")), STAKING_PUBLIC_KEY);
}

#[test]
fn shelley_addresses() {
    let payment = hex::decode(PAYMENT_PUBLIC_KEY).unwrap();
    let params = AddressParams {
        staking_public_key: Some(hex::decode(STAKING_PUBLIC_KEY).unwrap()),
        ..AddressParams::default()
    };
    let base = addresses::encode(AddressType::CardanoShelley, &payment, &params).unwrap();
    assert_eq!(
        base,
        "addr1qxwgyuesfey47tcv459ah347xjhsmekmescgx6e8eqpkarh9zl04f0qd6vy7f4ckqce75dwasyjnhjl87cetfjasnstselpljw"
    );
    let enterprise = addresses::encode(AddressType::CardanoShelleyEnterprise, &payment, &params).unwrap();
    assert_eq!(enterprise, "addr1vxwgyuesfey47tcv459ah347xjhsmekmescgx6e8eqpkars93fldp");

    let staking = hex::decode(STAKING_PUBLIC_KEY).unwrap();
    let reward = addresses::encode(AddressType::CardanoShelleyReward, &staking, &params).unwrap();
    assert_eq!(reward, "stake1u8j30h65hsxaxz0y6utqvvl2xhwczffme0nlvv45ewcfc9cswvd6d");

    let decoded = addresses::decode(AddressType::CardanoShelley, &base, &params).unwrap();
    assert_eq!(decoded.len(), 56);
    assert_eq!(&decoded[..28], &blake2b_224(&payment[1..]));
    assert_eq!(&decoded[28..], &blake2b_224(&staking[1..]));
}

#[test]
fn shelley_testnet_header() {
    let payment = hex::decode(PAYMENT_PUBLIC_KEY).unwrap();
    let params = AddressParams::default().with_network(Network::Testnet);
    let address = addresses::encode(AddressType::CardanoShelleyEnterprise, &payment, &params).unwrap();
    assert!(address.starts_with("addr_test1v"));
    assert!(addresses::decode(AddressType::CardanoShelleyEnterprise, &address, &AddressParams::default()).is_err());
}

#[test]
fn byron_icarus_address() {
    let seed = hex::decode(ENTROPY).unwrap();
    let mut hd = CardanoHd::from_seed(&seed, CardanoType::ByronIcarus, None, HdOptions::default()).unwrap();
    hd.derive(&DerivationPath::parse("m/44'/1815'/0'/0/0").unwrap()).unwrap();
    let params = AddressParams {
        chain_code: hd.chain_code(),
        ..AddressParams::default()
    };
    let address = addresses::encode(AddressType::CardanoByronIcarus, &hd.public_key(), &params).unwrap();
    assert_eq!(address, "Ae2tdPwUPEZ9CxoMnPY4CmskeKnkLpdMgw1NR3i1s66ozLNDK2jfwTnYLix");
    assert_eq!(
        hex::encode(&addresses::decode(AddressType::CardanoByronIcarus, &address, &params).unwrap()),
        "7c45fbde06920d76d0759741eefadccdaf0e074628e54b83889b5237"
    );
}
