//! BIP39 Known Answer Test vectors.
//!
//! Test vectors from the Trezor BIP39 reference implementation:
//! <https://github.com/trezor/python-mnemonic/blob/master/vectors.json>

use hdwallet_core::encoding::hex;
use hdwallet_core::entropy::Scheme;
use hdwallet_core::{Language, Mnemonic, Seed, SeedScheme};

// ── Trezor BIP39 English test vectors ──────────────────────────────
// Each vector: (entropy_hex, mnemonic, seed_hex with passphrase "TREZOR")

const VECTORS: &[(&str, &str, &str)] = &[
    (
        "00000000000000000000000000000000",
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
        "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04",
    ),
    (
        "7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f",
        "legal winner thank year wave sausage worth useful legal winner thank yellow",
        "2e8905819b8723fe2c1d161860e5ee1830318dbf49a83bd451cfb8440c28bd6fa457fe1296106559a3c80937a1c1069be3a3a5bd381ee6260e8d9739fce1f607",
    ),
    (
        "8080808080808080808080808080808080808080",
        "letter advice cage absurd amount doctor acoustic avoid letter advice cage absurd amount doctor accident",
        "bc40a19ec918698b32e3e13ed906006d9e3b9987ba7dee6fc53a824774cc5be68f89b865bbfbac21b2fb99c016e214f54f239f77dd99881c1b81de275c60be3d",
    ),
    (
        "7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f",
        "legal winner thank year wave sausage worth useful legal winner thank year wave sausage worth useful legal will",
        "f2b94508732bcbacbcc020faefecfc89feafa6649a5491b8c952cede496c214a0c7b3c392d168748f2d4a612bada0753b52a1c7ac53c1e93abd5c6320b9e95dd",
    ),
    (
        "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo vote",
        "dd48c104698c30cfe2b6142103248622fb7bb0ff692eebb00089b32d22484e1613912f0a5b694407be899ffd31ed3992c456cdf60f5d4564b8ba3f05a69890ad",
    ),
];

#[test]
fn trezor_vectors_encode_entropy() {
    for (entropy, phrase, _) in VECTORS {
        let mnemonic = Mnemonic::from_entropy(Scheme::Bip39, &hex::decode(entropy).unwrap(), Language::English).unwrap();
        assert_eq!(mnemonic.phrase().as_str(), *phrase, "entropy {entropy}");
    }
}

#[test]
fn trezor_vectors_decode_to_entropy() {
    for (entropy, phrase, _) in VECTORS {
        let decoded = Mnemonic::decode(Scheme::Bip39, phrase).unwrap();
        assert_eq!(hex::encode(&decoded), *entropy);
    }
}

#[test]
fn trezor_vectors_seed_with_passphrase() {
    for (_, phrase, seed) in VECTORS {
        let derived = Seed::from_mnemonic(SeedScheme::Bip39, phrase, Some("TREZOR")).unwrap();
        assert_eq!(derived.to_hex().as_str(), *seed, "phrase {phrase}");
    }
}

#[test]
fn trezor_vector_12_words_all_ones() {
    // Entropy: ffffffffffffffffffffffffffffffff
    let mnemonic = Mnemonic::parse(Scheme::Bip39, "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong").unwrap();
    assert_eq!(mnemonic.language(), Language::English);
    assert_eq!(mnemonic.words_count(), 12);
    assert_eq!(hex::encode(&mnemonic.to_entropy().unwrap()), "ffffffffffffffffffffffffffffffff");
}

#[test]
fn trezor_vectors_18_and_24_words_of_zero_entropy() {
    let eighteen = Mnemonic::from_entropy(Scheme::Bip39, &[0u8; 24], Language::English).unwrap();
    assert!(eighteen.phrase().ends_with("abandon agent"));
    assert_eq!(eighteen.words_count(), 18);

    let twenty_four = Mnemonic::from_entropy(Scheme::Bip39, &[0u8; 32], Language::English).unwrap();
    assert!(twenty_four.phrase().ends_with("abandon art"));
    assert_eq!(twenty_four.words_count(), 24);
}

#[test]
fn last_word_checksum_is_enforced() {
    // "abandon" x12 fails the 4-bit checksum that "about" satisfies.
    let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
    assert!(!Mnemonic::is_valid(Scheme::Bip39, phrase));
}

#[test]
fn uppercase_and_extra_whitespace_are_normalized() {
    let phrase = "  ABANDON abandon abandon abandon abandon abandon\tabandon abandon abandon abandon abandon About ";
    assert_eq!(hex::encode(&Mnemonic::decode(Scheme::Bip39, phrase).unwrap()), "00000000000000000000000000000000");
}
