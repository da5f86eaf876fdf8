//! Per-symbol results and their output line.

use std::fmt;

use kabi_core::Checksum;

use crate::config::DEFAULT_CRC_PREFIX;

/// The checksum of one exported symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolCrc {
    /// Exported symbol name.
    pub name: String,
    pub crc: Checksum,
    /// Prefix put in front of `name` on the output line.
    pub prefix: String,
    /// Canonical token stream, when token dumping is enabled.
    pub tokens: Option<String>,
}

impl SymbolCrc {
    /// A result with the default `__crc_` prefix and no tokens.
    pub fn new(name: impl Into<String>, crc: Checksum) -> Self {
        Self {
            name: name.into(),
            crc,
            prefix: DEFAULT_CRC_PREFIX.to_string(),
            tokens: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_tokens(mut self, tokens: impl Into<String>) -> Self {
        self.tokens = Some(tokens.into());
        self
    }
}

/// `__crc_<name> = 0x<8 hex digits> ;`
impl fmt::Display for SymbolCrc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} = {} ;", self.prefix, self.name, self.crc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_format() {
        let line = SymbolCrc::new("add", Checksum(0x72f3_67e8)).to_string();
        assert_eq!(line, "__crc_add = 0x72f367e8 ;");
    }

    #[test]
    fn test_zero_padded() {
        let line = SymbolCrc::new("f", Checksum(0xab)).to_string();
        assert_eq!(line, "__crc_f = 0x000000ab ;");
    }

    #[test]
    fn test_custom_prefix() {
        let line = SymbolCrc::new("f", Checksum(1)).with_prefix("__kcrctab_").to_string();
        assert_eq!(line, "__kcrctab_f = 0x00000001 ;");
    }
}
