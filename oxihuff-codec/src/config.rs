//! Decoder configuration.

/// Limits applied while decompressing untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuffmanConfig {
    /// Maximum number of symbols a single decompress call may produce.
    ///
    /// Checked against the header's `original_length` before any output
    /// is allocated.
    pub max_output_symbols: u64,
}

impl HuffmanConfig {
    /// No practical limit beyond what the payload itself can encode.
    pub const DEFAULT: Self = Self {
        max_output_symbols: u64::MAX,
    };

    /// Create the default configuration.
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Set the maximum number of symbols to decode.
    pub const fn with_max_output_symbols(mut self, max: u64) -> Self {
        self.max_output_symbols = max;
        self
    }
}

impl Default for HuffmanConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HuffmanConfig::default();
        assert_eq!(config, HuffmanConfig::DEFAULT);
        assert_eq!(config.max_output_symbols, u64::MAX);
    }

    #[test]
    fn test_with_limit() {
        let config = HuffmanConfig::new().with_max_output_symbols(1024);
        assert_eq!(config.max_output_symbols, 1024);
    }
}
