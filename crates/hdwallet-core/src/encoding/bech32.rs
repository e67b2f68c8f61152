//! Bech32 payloads and SegWit addresses over the `bech32` crate.
//!
//! SegWit version 0 uses Bech32; versions 1 and above use Bech32m.

use ::bech32::{segwit, Bech32, Fe32, Hrp};

use crate::error::{ErrorDetail, WalletError};

fn parse_hrp(hrp: &str) -> Result<Hrp, WalletError> {
    Hrp::parse(hrp)
        .map_err(|e| WalletError::Address(ErrorDetail::msg(format!("invalid HRP '{hrp}': {e}"))))
}

fn check_hrp(expected: &str, got: &Hrp) -> Result<(), WalletError> {
    if got.as_str().eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(WalletError::Address(ErrorDetail::mismatch(
            "invalid HRP",
            expected,
            got.as_str(),
        )))
    }
}

/// Encode `data` under `hrp` with the Bech32 checksum.
///
/// # Errors
///
/// Returns `WalletError::Address` on an invalid HRP or oversize payload.
pub fn encode(hrp: &str, data: &[u8]) -> Result<String, WalletError> {
    let hrp = parse_hrp(hrp)?;
    ::bech32::encode::<Bech32>(hrp, data)
        .map_err(|e| WalletError::Address(ErrorDetail::msg(format!("Bech32 encoding failed: {e}"))))
}

/// Decode a Bech32 string and verify its HRP.
///
/// # Errors
///
/// Returns `WalletError::Checksum` on a bad checksum or malformed string and
/// `WalletError::Address` on an HRP mismatch.
pub fn decode(hrp: &str, text: &str) -> Result<Vec<u8>, WalletError> {
    let (got, data) = ::bech32::decode(text)
        .map_err(|e| WalletError::Checksum(ErrorDetail::msg(format!("invalid Bech32: {e}"))))?;
    check_hrp(hrp, &got)?;
    Ok(data)
}

/// Encode a SegWit witness program.
///
/// # Errors
///
/// Returns `WalletError::Address` for invalid versions, HRPs or program
/// lengths.
pub fn segwit_encode(hrp: &str, version: u8, program: &[u8]) -> Result<String, WalletError> {
    let hrp = parse_hrp(hrp)?;
    let version = Fe32::try_from(version).map_err(|e| {
        WalletError::Address(ErrorDetail::msg(format!("invalid witness version: {e}")))
    })?;
    segwit::encode(hrp, version, program)
        .map_err(|e| WalletError::Address(ErrorDetail::msg(format!("SegWit encoding failed: {e}"))))
}

/// Decode a SegWit address into `(version, program)` after checking the HRP.
///
/// # Errors
///
/// Returns `WalletError::Checksum` on malformed input and
/// `WalletError::Address` on an HRP mismatch.
pub fn segwit_decode(hrp: &str, text: &str) -> Result<(u8, Vec<u8>), WalletError> {
    let (got, version, program) = segwit::decode(text)
        .map_err(|e| WalletError::Checksum(ErrorDetail::msg(format!("invalid SegWit address: {e}"))))?;
    check_hrp(hrp, &got)?;
    Ok((version.to_u8(), program))
}
