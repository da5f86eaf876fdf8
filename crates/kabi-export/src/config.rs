//! Export configuration.

/// Marker prefix for exported symbols.
pub const DEFAULT_MARKER_PREFIX: &str = "__ksymtab_";

/// Prefix of each output line's symbol.
pub const DEFAULT_CRC_PREFIX: &str = "__crc_";

/// Configuration for the export walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// A top-level symbol named `<marker_prefix><name>` exports `<name>`.
    pub marker_prefix: String,
    /// Output lines read `<crc_prefix><name> = 0x........ ;`.
    pub crc_prefix: String,
    /// Keep each symbol's token stream alongside its checksum.
    pub dump_tokens: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            marker_prefix: DEFAULT_MARKER_PREFIX.to_string(),
            crc_prefix: DEFAULT_CRC_PREFIX.to_string(),
            dump_tokens: false,
        }
    }
}

impl ExportConfig {
    /// The exported name a marker symbol stands for, if it is a marker.
    ///
    /// A bare prefix with nothing after it marks nothing.
    pub fn exported_name<'n>(&self, symbol: &'n str) -> Option<&'n str> {
        symbol
            .strip_prefix(self.marker_prefix.as_str())
            .filter(|name| !name.is_empty())
    }
}
