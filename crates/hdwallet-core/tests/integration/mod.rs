mod bip32_bitcoin;
mod cardano_byron_legacy;
mod cardano_shelley;
mod electrum_v2;
mod monero_primary;
mod slip10_solana;
