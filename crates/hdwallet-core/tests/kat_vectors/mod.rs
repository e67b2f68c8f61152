mod addresses;
mod bip32;
mod bip39;
mod cardano;
mod electrum;
mod monero;
mod slip10;
