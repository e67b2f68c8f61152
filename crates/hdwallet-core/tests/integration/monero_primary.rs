//! Monero: entropy to spend/view keys and the primary, integrated and
//! sub-addresses built on them.

use hdwallet_core::addresses::{self, AddressType};
use hdwallet_core::crypto::keccak256;
use hdwallet_core::encoding::base58_monero;
use hdwallet_core::entropy::Scheme;
use hdwallet_core::{AddressParams, Language, Mnemonic, MoneroHd, MoneroNetwork, Seed, SeedScheme};

const MAINNET_BYTE: u8 = 18;

fn zero_wallet() -> MoneroHd {
    let mnemonic = Mnemonic::from_entropy(Scheme::Monero, &[0u8; 32], Language::English).unwrap();
    let seed = Seed::from_mnemonic(SeedScheme::Monero, &mnemonic.phrase(), None).unwrap();
    assert_eq!(seed.expose(), &[0u8; 32]);
    MoneroHd::from_seed(seed.expose(), MoneroNetwork::Mainnet).unwrap()
}

#[test]
fn primary_address_layout() {
    let hd = zero_wallet();
    let address = hd.primary_address();
    assert!(address.starts_with('4'));
    assert_eq!(address.len(), 95);

    let raw = base58_monero::decode(&address).unwrap();
    assert_eq!(raw.len(), 69);
    assert_eq!(raw[0], MAINNET_BYTE);
    assert_eq!(&raw[1..33], &hd.spend_public_key());
    assert_eq!(&raw[33..65], &hd.view_public_key());
    assert_eq!(&raw[65..], &keccak256(&raw[..65])[..4]);
}

#[test]
fn view_key_follows_spend_key() {
    let hd = zero_wallet();
    let spend = hd.spend_private_key().unwrap();
    let restored = MoneroHd::from_spend_private_key(&spend, MoneroNetwork::Mainnet).unwrap();
    assert_eq!(restored.view_private_key(), hd.view_private_key());
    assert_eq!(restored.view_public_key(), hd.view_public_key());
    assert_eq!(restored.primary_address(), hd.primary_address());
}

#[test]
fn watch_only_wallet_addresses() {
    let hd = zero_wallet();
    let watch = MoneroHd::from_watch_only(&hd.view_private_key(), &hd.spend_public_key(), MoneroNetwork::Mainnet)
        .unwrap();
    assert!(watch.spend_private_key().is_none());
    assert_eq!(watch.primary_address(), hd.primary_address());
    assert_eq!(watch.sub_address(1, 0), hd.sub_address(1, 0));
}

#[test]
fn sub_and_integrated_addresses() {
    let hd = zero_wallet();
    assert_eq!(hd.sub_address(0, 0), hd.primary_address());
    let sub = hd.sub_address(1, 0);
    assert!(sub.starts_with('8'));
    assert_eq!(sub.len(), 95);
    assert_ne!(hd.sub_address(0, 1), sub);

    let payment_id = [0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc, 0xde, 0xf0];
    let integrated = hd.integrated_address(&payment_id);
    assert!(integrated.starts_with('4'));
    assert_eq!(integrated.len(), 106);
    let params = AddressParams {
        payment_id: Some(payment_id),
        ..AddressParams::default()
    };
    let keys = addresses::decode(AddressType::Monero, &integrated, &params).unwrap();
    assert_eq!(&keys[..32], &hd.spend_public_key());
}

#[test]
fn address_codec_agrees_with_engine() {
    let hd = zero_wallet();
    let params = AddressParams {
        view_public_key: Some(hd.view_public_key().to_vec()),
        ..AddressParams::default()
    };
    let encoded = addresses::encode(AddressType::Monero, &hd.spend_public_key(), &params).unwrap();
    assert_eq!(encoded, hd.primary_address());
    let decoded = addresses::decode(AddressType::Monero, &encoded, &AddressParams::default()).unwrap();
    assert_eq!(&decoded[32..], &hd.view_public_key());
}
