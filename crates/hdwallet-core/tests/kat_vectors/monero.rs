//! Monero Known Answer Test vectors.
//!
//! Keys follow `spend = Hs(seed)`, `view = Hs(spend)` with
//! `Hs = reduce_mod_ℓ ∘ Keccak-256`; addresses use Monero Base58 with the
//! mainnet (`18`) and stagenet (`24`) network bytes.

use hdwallet_core::encoding::hex;
use hdwallet_core::entropy::Scheme;
use hdwallet_core::{Language, Mnemonic, MoneroHd, MoneroNetwork, Seed, SeedScheme};

const SEED: [u8; 32] = [0x01; 32];

const SPEND_PRIVATE_KEY: &str = "eb51211073fdd85629dda967a86ead8717884c2d66667c67a90508214bd8ba0c";
const VIEW_PRIVATE_KEY: &str = "38f5b6684e50679bc945939d2924b8f318a1400b0937a455168fa2e1ba2f790f";
const SPEND_PUBLIC_KEY: &str = "fa17d335e10b66cc28e09e2de59dc7e8a3d11bcf579d6d493b94c3d1f2081562";
const VIEW_PUBLIC_KEY: &str = "586ab7d8a2d29dee1fc3bd53e0f672fef30436936ffa8fc091a4f94f8349abbf";

const MAINNET_ADDRESS: &str =
    "4B6oFEmESa1b9c4uyE3bV8fuu7ggU2XUYDFT4SxB7pbNHT5FnxuhHhngq6ugWXvTN1jeKzQDPdizaZDAGW1gS6gANczNnWJ";
const STAGENET_ADDRESS: &str =
    "5BJqL5gC6B7b9c4uyE3bV8fuu7ggU2XUYDFT4SxB7pbNHT5FnxuhHhngq6ugWXvTN1jeKzQDPdizaZDAGW1gS6gANZagFRf";

const PHRASE: &str = "amaze buffet cake entrance syndrome tilt lamb maze nestle queen dusted faxed \
                      update vague zinger boxes orphans reorder glass gained island nabbing afield calamity glass";

#[test]
fn keys_from_seed() {
    let hd = MoneroHd::from_seed(&SEED, MoneroNetwork::Mainnet).unwrap();
    assert_eq!(hex::encode(&hd.spend_private_key().unwrap()), SPEND_PRIVATE_KEY);
    assert_eq!(hex::encode(&hd.view_private_key()), VIEW_PRIVATE_KEY);
    assert_eq!(hex::encode(&hd.spend_public_key()), SPEND_PUBLIC_KEY);
    assert_eq!(hex::encode(&hd.view_public_key()), VIEW_PUBLIC_KEY);
}

#[test]
fn primary_addresses_per_network() {
    let mainnet = MoneroHd::from_seed(&SEED, MoneroNetwork::Mainnet).unwrap();
    assert_eq!(mainnet.primary_address(), MAINNET_ADDRESS);
    let stagenet = MoneroHd::from_seed(&SEED, MoneroNetwork::Stagenet).unwrap();
    assert_eq!(stagenet.primary_address(), STAGENET_ADDRESS);
}

#[test]
fn twenty_five_word_phrase() {
    let entropy: Vec<u8> = (0u8..32).collect();
    let mnemonic = Mnemonic::from_entropy(Scheme::Monero, &entropy, Language::English).unwrap();
    assert_eq!(mnemonic.words_count(), 25);
    assert_eq!(mnemonic.phrase().split(' ').collect::<Vec<_>>(), PHRASE.split_whitespace().collect::<Vec<_>>());
    assert_eq!(Mnemonic::decode(Scheme::Monero, PHRASE).unwrap().as_slice(), entropy.as_slice());
}

#[test]
fn phrase_checksum_word_is_verified() {
    let tampered = PHRASE.replace("calamity glass", "calamity island");
    assert!(!Mnemonic::is_valid(Scheme::Monero, &tampered));
    // without the checksum word the phrase still decodes
    let body: Vec<&str> = PHRASE.split_whitespace().take(24).collect();
    assert!(Mnemonic::is_valid(Scheme::Monero, &body.join(" ")));
}

#[test]
fn seed_is_the_entropy() {
    let seed = Seed::from_mnemonic(SeedScheme::Monero, PHRASE, None).unwrap();
    assert_eq!(seed.expose(), (0u8..32).collect::<Vec<u8>>().as_slice());
}
