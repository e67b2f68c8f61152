//! Non-cryptographic checksums: CRC-32 (Cardano Byron, Monero mnemonics)
//! and CRC-16/XMODEM (Stellar).

/// CRC-32 (IEEE).
#[must_use]
pub fn crc32(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// CRC-16/XMODEM: polynomial `0x1021`, initial value 0, no reflection.
#[must_use]
pub fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 == 0 {
                crc << 1
            } else {
                (crc << 1) ^ 0x1021
            };
        }
    }
    crc
}
