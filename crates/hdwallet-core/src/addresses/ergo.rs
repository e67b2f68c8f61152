//! Ergo pay-to-public-key addresses: Base58 of
//! `type ‖ compressed key ‖ Blake2b-256(type ‖ key)[..4]`, where `type` is
//! the P2PK tag `0x01` plus the network tag.

use super::{check_checksum, check_length, check_version, secp256k1_key, Address, AddressParams, Network};
use crate::crypto::blake2b_256;
use crate::ecc::EccPublicKey;
use crate::encoding::base58::{self, Alphabet};
use crate::error::{ErrorDetail, WalletError};

const P2PK: u8 = 0x01;

fn type_byte(network: Network) -> Result<u8, WalletError> {
    match network {
        Network::Mainnet => Ok(P2PK),
        Network::Testnet => Ok(0x10 | P2PK),
        Network::Stagenet => Err(WalletError::Network(ErrorDetail::mismatch(
            "unsupported Ergo network",
            "mainnet, testnet",
            network,
        ))),
    }
}

fn checksum(payload: &[u8]) -> [u8; 4] {
    let digest = blake2b_256(payload);
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Ergo codec.
pub struct Ergo;

impl Address for Ergo {
    const NAME: &'static str = "Ergo";

    fn encode(public_key: &[u8], params: &AddressParams) -> Result<String, WalletError> {
        let mut payload = vec![type_byte(params.network)?];
        payload.extend_from_slice(&secp256k1_key(public_key)?.raw_compressed());
        let check = checksum(&payload);
        payload.extend_from_slice(&check);
        Ok(base58::encode(&payload, Alphabet::Bitcoin))
    }

    fn decode(address: &str, params: &AddressParams) -> Result<Vec<u8>, WalletError> {
        let raw = base58::decode(address, Alphabet::Bitcoin).map_err(|e| WalletError::Address(e.detail().clone()))?;
        check_length(&raw, 38)?;
        let (payload, got) = raw.split_at(34);
        check_checksum(&checksum(payload), got)?;
        check_version(&[type_byte(params.network)?], &payload[..1])?;
        let key = &payload[1..];
        secp256k1_key(key)?;
        Ok(key.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::hex;

    #[test]
    fn mainnet_and_testnet() {
        let key = hex::decode("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798").unwrap();
        let params = AddressParams::default();
        let mainnet = Ergo::encode(&key, &params).unwrap();
        assert_eq!(mainnet, "9fSgJ7BmUxBQJ454prQDQ7fQMBkXPLaAmDnimgTtjym6FYPHjAV");
        assert_eq!(Ergo::decode(&mainnet, &params).unwrap(), key);

        let testnet = AddressParams::default().with_network(Network::Testnet);
        let address = Ergo::encode(&key, &testnet).unwrap();
        assert_eq!(address, "3WwXpssaZwcNzaGMv3AgxBdTPJQBt5gCmqBsg3DykQ39bYdhJBsN");
        assert!(matches!(Ergo::decode(&address, &params), Err(WalletError::Address(_))));
    }
}
