//! Checksum trailer: `AY<seq>AZ<hex4>\r`. `hex4` is the 16-bit two's
//! complement of the sum of every byte preceding the `AZ` field's payload,
//! inclusive of the literal `AY0AZ` text itself.

use std::num::Wrapping;

/// Compute the hex4 checksum value for `bytes_before_checksum` (which must
/// already include the trailing `AY0AZ` literal).
pub fn compute(bytes_before_checksum: &[u8]) -> u16 {
    let sum: Wrapping<u16> = bytes_before_checksum
        .iter()
        .fold(Wrapping(0u16), |acc, &b| acc + Wrapping(u16::from(b)));
    (!sum.0).wrapping_add(1)
}

#[derive(Debug, thiserror::Error)]
pub enum ChecksumError {
    #[error("corrupted checksum: frame too short")]
    TooShort,
    #[error("corrupted checksum: hex4 payload {0:?} is not valid hex")]
    BadHex(String),
    #[error("corrupted checksum: frame failed checksum validation")]
    Mismatch,
}

/// Verify a full encoded frame (ending in the checksum hex4, optionally
/// followed by `\r`). `sum(bytes_before_checksum) + parsed_hex4 == 0 (mod 2^16)`.
pub fn verify(frame: &[u8]) -> Result<(), ChecksumError> {
    let frame = frame.strip_suffix(b"\r").unwrap_or(frame);
    if frame.len() < 4 {
        return Err(ChecksumError::TooShort);
    }
    let (content, hex4) = frame.split_at(frame.len() - 4);
    let hex4 = std::str::from_utf8(hex4).map_err(|_| ChecksumError::BadHex("<non-utf8>".into()))?;
    let parsed = u16::from_str_radix(hex4, 16).map_err(|_| ChecksumError::BadHex(hex4.to_owned()))?;
    let sum: Wrapping<u16> = content
        .iter()
        .fold(Wrapping(0u16), |acc, &b| acc + Wrapping(u16::from(b)));
    if sum.0.wrapping_add(parsed) != 0 {
        return Err(ChecksumError::Mismatch);
    }
    Ok(())
}
