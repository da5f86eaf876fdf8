//! Rolling CRC-32 over the canonical token stream.
//!
//! This is the table-driven, reflected CRC-32 (polynomial 0xEDB88320) used by
//! genksyms. Every token is followed by a single space in the stream, so
//! `emit_token("int")` folds the bytes `"int "`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Initial (and final XOR) value of the accumulator.
pub const CRC_INIT: u32 = 0xffff_ffff;

const POLYNOMIAL: u32 = 0xedb8_8320;

/// Reflected CRC-32 lookup table, built at compile time.
pub static CRC32_TABLE: [u32; 256] = build_table();

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ POLYNOMIAL
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// A finalized 32-bit symbol checksum.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Checksum(pub u32);

impl Checksum {
    /// Create from a raw value.
    pub const fn from_u32(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    /// Eight lowercase hex digits, zero-padded.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.to_be_bytes())
    }

    /// Parse eight hex digits back into a checksum.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        let arr: [u8; 4] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(u32::from_be_bytes(arr)))
    }
}

impl fmt::Debug for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Checksum(0x{})", self.to_hex())
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl From<u32> for Checksum {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Incremental CRC-32 state for one symbol.
///
/// Starts at [`CRC_INIT`]; [`finalize`](Self::finalize) inverts the running
/// value. The accumulator must be [`reset`](Self::reset) before it is reused
/// for another symbol.
#[derive(Debug, Clone)]
pub struct ChecksumAccumulator {
    crc: u32,
    transcript: Option<String>,
}

impl ChecksumAccumulator {
    /// Create a fresh accumulator.
    pub fn new() -> Self {
        Self {
            crc: CRC_INIT,
            transcript: None,
        }
    }

    /// Create an accumulator that also records every emitted token.
    pub fn with_transcript() -> Self {
        Self {
            crc: CRC_INIT,
            transcript: Some(String::new()),
        }
    }

    /// Fold raw text into the running value. No separator is added.
    pub fn update(&mut self, text: &str) {
        for &byte in text.as_bytes() {
            self.update_byte(byte);
        }
    }

    fn update_byte(&mut self, byte: u8) {
        let index = ((self.crc ^ byte as u32) & 0xff) as usize;
        self.crc = CRC32_TABLE[index] ^ (self.crc >> 8);
    }

    /// Fold one token followed by its trailing space.
    pub fn emit_token(&mut self, text: &str) {
        self.update(text);
        self.update_byte(b' ');
        if let Some(transcript) = self.transcript.as_mut() {
            transcript.push_str(text);
            transcript.push(' ');
        }
    }

    /// The running (not yet inverted) value.
    pub fn current(&self) -> u32 {
        self.crc
    }

    /// Final checksum for the tokens folded so far.
    pub fn finalize(&self) -> Checksum {
        Checksum(self.crc ^ CRC_INIT)
    }

    /// Reinitialize for the next symbol. A recorded transcript is cleared.
    pub fn reset(&mut self) {
        self.crc = CRC_INIT;
        if let Some(transcript) = self.transcript.as_mut() {
            transcript.clear();
        }
    }

    /// The canonical token stream, if recording was enabled.
    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }
}

impl Default for ChecksumAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_table_known_entries() {
        assert_eq!(CRC32_TABLE[0], 0x0000_0000);
        assert_eq!(CRC32_TABLE[1], 0x7707_3096);
        assert_eq!(CRC32_TABLE[128], 0xedb8_8320);
        assert_eq!(CRC32_TABLE[255], 0x2d02_ef8d);
    }

    #[test]
    fn test_standard_check_value() {
        // CRC-32/ISO-HDLC check value for "123456789"
        let mut acc = ChecksumAccumulator::new();
        acc.update("123456789");
        assert_eq!(acc.finalize(), Checksum(0xcbf4_3926));
    }

    #[test]
    fn test_empty_stream() {
        let acc = ChecksumAccumulator::new();
        assert_eq!(acc.current(), CRC_INIT);
        assert_eq!(acc.finalize(), Checksum(0));
    }

    #[test]
    fn test_emit_token_appends_space() {
        let mut tokens = ChecksumAccumulator::new();
        tokens.emit_token("int");
        tokens.emit_token("add");

        let mut raw = ChecksumAccumulator::new();
        raw.update("int add ");

        assert_eq!(tokens.finalize(), raw.finalize());
    }

    #[test]
    fn test_add_signature_checksum() {
        let mut acc = ChecksumAccumulator::with_transcript();
        for tok in ["int", "add", "(", "int", ",", "int", ")"] {
            acc.emit_token(tok);
        }
        assert_eq!(acc.transcript(), Some("int add ( int , int ) "));
        assert_eq!(acc.finalize().to_hex(), "72f367e8");
    }

    #[test]
    fn test_reset_clears_state() {
        let mut acc = ChecksumAccumulator::with_transcript();
        acc.emit_token("struct");
        acc.reset();
        assert_eq!(acc.current(), CRC_INIT);
        assert_eq!(acc.transcript(), Some(""));
    }

    #[test]
    fn test_no_transcript_by_default() {
        let mut acc = ChecksumAccumulator::new();
        acc.emit_token("int");
        assert!(acc.transcript().is_none());
    }

    #[test]
    fn test_checksum_hex_is_zero_padded() {
        assert_eq!(Checksum(0x1).to_hex(), "00000001");
        assert_eq!(format!("{}", Checksum(0xab)), "0x000000ab");
        assert_eq!(Checksum::from_hex("000000ab").unwrap(), Checksum(0xab));
        assert!(Checksum::from_hex("abcd").is_err());
    }

    proptest! {
        #[test]
        fn test_token_split_matches_raw(tokens in prop::collection::vec("[a-z_]{1,8}", 0..16)) {
            let mut split = ChecksumAccumulator::new();
            let mut joined = String::new();
            for tok in &tokens {
                split.emit_token(tok);
                joined.push_str(tok);
                joined.push(' ');
            }
            let mut raw = ChecksumAccumulator::new();
            raw.update(&joined);
            prop_assert_eq!(split.finalize(), raw.finalize());
        }
    }
}
