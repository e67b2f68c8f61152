//! Every catalogue entry builds a wallet, reaches its default path and
//! produces an address its own codec accepts.

use hdwallet::{HdKind, HdWallet, WalletConfig, CRYPTOCURRENCIES};

const SEED: [u8; 32] = [0x5a; 32];

#[test]
fn every_cryptocurrency_reaches_a_decodable_address() {
    for cryptocurrency in CRYPTOCURRENCIES {
        let config = WalletConfig::for_symbol(cryptocurrency.symbol).unwrap();
        let mut wallet = HdWallet::from_seed(&config, &SEED).unwrap();
        wallet.derive_default().unwrap();
        if wallet.hd_kind() != HdKind::Monero {
            assert_eq!(wallet.path(), *wallet.default_derivation(), "{cryptocurrency}");
        }

        let address = wallet.address().unwrap();
        let params = cryptocurrency.address_params(wallet.network()).unwrap();
        assert!(
            wallet.address_type().decode(&address, &params).is_ok(),
            "{cryptocurrency}: {address}"
        );
    }
}

#[test]
fn every_cryptocurrency_dumps_its_default_node() {
    for cryptocurrency in CRYPTOCURRENCIES {
        let config = WalletConfig::for_symbol(cryptocurrency.symbol).unwrap();
        let wallet = HdWallet::from_seed(&config, &SEED).unwrap();
        let dump = wallet.dumps(wallet.default_derivation()).unwrap();
        assert_eq!(dump.symbol, cryptocurrency.symbol);
        assert_eq!(dump.coin_type, cryptocurrency.coin_type);
        let node = &dump.derivations[0];
        assert!(!node.addresses.is_empty(), "{cryptocurrency}");
        assert!(node.private_key.is_some(), "{cryptocurrency}");
    }
}

#[test]
fn ethereum_family_shares_keys_across_coin_types() {
    let phrase = super::PHRASE;
    let mut ethereum = HdWallet::from_mnemonic(&WalletConfig::for_symbol("ETH").unwrap(), phrase, None).unwrap();
    let mut injective = HdWallet::from_mnemonic(&WalletConfig::for_symbol("INJ").unwrap(), phrase, None).unwrap();
    ethereum.derive_default().unwrap();
    injective.derive_default().unwrap();
    assert_eq!(ethereum.hd().public_key(), injective.hd().public_key());
    assert_eq!(ethereum.address().unwrap(), "0x9858EfFD232B4033E47d90003D41EC34EcaEda94");
    assert!(injective.address().unwrap().starts_with("inj1"));
}
