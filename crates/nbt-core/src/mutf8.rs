//! Modified UTF-8, the string encoding of NBT payloads.
//!
//! It differs from standard UTF-8 in two ways:
//!
//! - U+0000 is written as the overlong pair `C0 80`, so encoded strings never
//!   contain a zero byte.
//! - Code points above the BMP are written as a UTF-16 surrogate pair, each
//!   half encoded as its own 3-byte sequence (6 bytes instead of 4).
//!
//! Both directions work on UTF-16 code units, which makes the surrogate rule
//! fall out naturally.

use crate::error::{NbtError, Result};

/// Encode a string as modified UTF-8.
pub fn encode(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for unit in s.encode_utf16() {
        match unit {
            0x0001..=0x007F => out.push(unit as u8),
            0x0000 | 0x0080..=0x07FF => {
                out.push(0xC0 | ((unit >> 6) & 0x1F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
            _ => {
                out.push(0xE0 | ((unit >> 12) & 0x0F) as u8);
                out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
        }
    }
    out
}

/// Number of bytes [`encode`] would produce for `s`.
pub fn encoded_len(s: &str) -> usize {
    s.encode_utf16()
        .map(|unit| match unit {
            0x0001..=0x007F => 1,
            0x0000 | 0x0080..=0x07FF => 2,
            _ => 3,
        })
        .sum()
}

/// Decode modified UTF-8.
///
/// A bare `00` byte is accepted as U+0000. Unpaired surrogates cannot be
/// held in a Rust string and decode to U+FFFD.
pub fn decode(bytes: &[u8]) -> Result<String> {
    let mut units: Vec<u16> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match b >> 4 {
            0x0..=0x7 => {
                units.push(b as u16);
                i += 1;
            }
            0xC | 0xD => {
                let b2 = continuation(bytes, i + 1)?;
                units.push((((b & 0x1F) as u16) << 6) | (b2 & 0x3F) as u16);
                i += 2;
            }
            0xE => {
                let b2 = continuation(bytes, i + 1)?;
                let b3 = continuation(bytes, i + 2)?;
                units.push(
                    (((b & 0x0F) as u16) << 12)
                        | (((b2 & 0x3F) as u16) << 6)
                        | (b3 & 0x3F) as u16,
                );
                i += 3;
            }
            _ => {
                return Err(NbtError::MalformedString(format!(
                    "invalid lead byte 0x{b:02X} at offset {i}"
                )));
            }
        }
    }
    Ok(char::decode_utf16(units)
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect())
}

fn continuation(bytes: &[u8], at: usize) -> Result<u8> {
    match bytes.get(at) {
        Some(&b) if b & 0xC0 == 0x80 => Ok(b),
        Some(&b) => Err(NbtError::MalformedString(format!(
            "invalid continuation byte 0x{b:02X} at offset {at}"
        ))),
        None => Err(NbtError::MalformedString(
            "partial character at end of input".to_string(),
        )),
    }
}
