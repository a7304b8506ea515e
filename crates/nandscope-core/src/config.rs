//! Analyzer configuration
//!
//! With the `std` feature the configuration can be loaded from TOML:
//!
//! ```toml
//! [analyzer]
//! bad_block_display_limit = 10
//! erased_sample_len = 64
//! ```
//!
//! Missing keys, or a missing `[analyzer]` table, keep their defaults.
//! `erased_sample_len` must be at least 1.

use crate::wear::ERASED_SAMPLE_LEN;

/// Default number of bad block indices listed in a report
pub const DEFAULT_BAD_BLOCK_DISPLAY_LIMIT: usize = 10;

/// Tunables for report generation and page classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct AnalyzerConfig {
    /// Maximum number of bad block indices listed in a report
    pub bad_block_display_limit: usize,
    /// Number of leading bytes sampled when deciding if a page is erased
    pub erased_sample_len: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            bad_block_display_limit: DEFAULT_BAD_BLOCK_DISPLAY_LIMIT,
            erased_sample_len: ERASED_SAMPLE_LEN,
        }
    }
}

#[cfg(feature = "std")]
mod file {
    use std::fs;
    use std::path::Path;

    use super::AnalyzerConfig;
    use crate::error::{Error, Result};

    /// TOML config file structure
    #[derive(Debug, Default, serde::Deserialize)]
    struct TomlConfigFile {
        #[serde(default)]
        analyzer: AnalyzerConfig,
    }

    impl AnalyzerConfig {
        /// Load the configuration from a TOML file
        pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
            let path = path.as_ref();
            let content = fs::read_to_string(path).map_err(|e| {
                log::warn!("Failed to read config {}: {}", path.display(), e);
                Error::IoError
            })?;
            Self::from_toml_str(&content)
        }

        /// Parse the configuration from a TOML string
        pub fn from_toml_str(content: &str) -> Result<Self> {
            let file: TomlConfigFile = toml::from_str(content).map_err(|e| {
                log::warn!("Invalid analyzer config: {}", e);
                Error::ConfigError
            })?;
            if file.analyzer.erased_sample_len == 0 {
                log::warn!("Invalid analyzer config: erased_sample_len must be at least 1");
                return Err(Error::ConfigError);
            }
            Ok(file.analyzer)
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.bad_block_display_limit, 10);
        assert_eq!(config.erased_sample_len, 64);
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[analyzer]
bad_block_display_limit = 4
erased_sample_len = 16
"#;
        let config = AnalyzerConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.bad_block_display_limit, 4);
        assert_eq!(config.erased_sample_len, 16);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AnalyzerConfig::from_toml_str("[analyzer]\nerased_sample_len = 8\n").unwrap();
        assert_eq!(config.bad_block_display_limit, 10);
        assert_eq!(config.erased_sample_len, 8);

        assert_eq!(AnalyzerConfig::from_toml_str("").unwrap(), AnalyzerConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        assert_eq!(
            AnalyzerConfig::from_toml_str("[analyzer]\nerased_sample_len = \"lots\"\n"),
            Err(Error::ConfigError)
        );
    }

    #[test]
    fn test_zero_sample_len_rejected() {
        assert_eq!(
            AnalyzerConfig::from_toml_str("[analyzer]\nerased_sample_len = 0\n"),
            Err(Error::ConfigError)
        );
    }

    #[test]
    fn test_missing_file() {
        assert_eq!(
            AnalyzerConfig::from_toml_file("/nonexistent/nandscope.toml"),
            Err(Error::IoError)
        );
    }
}
