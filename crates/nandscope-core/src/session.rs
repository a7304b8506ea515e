//! Analysis session - runtime state for dump analysis
//!
//! A session holds at most one loaded dump and the identity decoded most
//! recently. The two are independent: loading a new dump keeps the
//! identity, and decoding a new identity keeps the dump.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::badblock;
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::identity::FlashIdentity;
use crate::wear::{self, WearStats};

/// Width of the report banner
const BANNER_WIDTH: usize = 50;

/// Runtime state for analyzing one dump
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    buffer: Option<Vec<u8>>,
    identity: Option<FlashIdentity>,
    config: AnalyzerConfig,
}

impl AnalysisSession {
    /// Create an empty session with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with a dump already loaded
    pub fn with_data(buffer: Vec<u8>) -> Self {
        Self {
            buffer: Some(buffer),
            ..Self::default()
        }
    }

    /// Create an empty session with a custom configuration
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Replace the loaded dump
    pub fn load(&mut self, buffer: Vec<u8>) {
        log::debug!("Loaded {} bytes of dump data", buffer.len());
        self.buffer = Some(buffer);
    }

    /// Load a dump from a file
    ///
    /// On failure the previously loaded dump is kept.
    #[cfg(feature = "std")]
    pub fn load_file(&mut self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| {
            log::warn!("Failed to read dump {}: {}", path.display(), e);
            crate::error::Error::IoError
        })?;
        self.load(data);
        Ok(())
    }

    /// Decode ID bytes and remember the result
    ///
    /// Nothing is stored if decoding fails.
    pub fn decode_identity(&mut self, id_bytes: &[u8]) -> Result<FlashIdentity> {
        let id = FlashIdentity::decode(id_bytes)?;
        self.identity = Some(id);
        Ok(id)
    }

    /// The loaded dump, if any
    pub fn buffer(&self) -> Option<&[u8]> {
        self.buffer.as_deref()
    }

    /// The loaded dump, if it is present and not empty
    pub fn data(&self) -> Option<&[u8]> {
        self.buffer().filter(|b| !b.is_empty())
    }

    /// Whether a non-empty dump is loaded
    pub fn has_data(&self) -> bool {
        self.data().is_some()
    }

    /// The identity decoded most recently, if any
    pub fn identity(&self) -> Option<&FlashIdentity> {
        self.identity.as_ref()
    }

    /// Active configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Build an analysis report from the current dump and identity
    ///
    /// Scans are recomputed on every call.
    pub fn build_report(&self) -> Report {
        let Some(identity) = self.identity else {
            return Report::NoIdentity;
        };

        let data = self.data().map(|buf| {
            let block_size = identity.block_size() as usize;
            let page_size = identity.page_size() as usize;

            let bad_blocks = (buf.len() >= block_size).then(|| {
                let bad = badblock::scan(buf, block_size);
                BadBlockSummary::new(bad, self.config.bad_block_display_limit)
            });

            let wear = (buf.len() >= page_size)
                .then(|| wear::analyze_with_sample(buf, page_size, self.config.erased_sample_len));

            DataAnalysis {
                data_size: buf.len(),
                bad_blocks,
                wear,
            }
        });

        Report::Analysis(AnalysisReport {
            identity,
            manufacturer: identity.manufacturer_name(),
            data,
        })
    }
}

/// Result of [`AnalysisSession::build_report`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
#[cfg_attr(feature = "std", serde(tag = "report", rename_all = "snake_case"))]
pub enum Report {
    /// No ID bytes have been decoded yet
    NoIdentity,
    /// Identity-based analysis
    Analysis(AnalysisReport),
}

/// Identity and dump analysis
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct AnalysisReport {
    /// Decoded flash identity
    pub identity: FlashIdentity,
    /// Manufacturer display name
    pub manufacturer: String,
    /// Dump analysis, present when a non-empty dump is loaded
    pub data: Option<DataAnalysis>,
}

/// Analysis of the loaded dump
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct DataAnalysis {
    /// Dump size in bytes
    pub data_size: usize,
    /// Bad block scan, present when at least one whole block fits
    pub bad_blocks: Option<BadBlockSummary>,
    /// Wear statistics, present when at least one whole page fits
    pub wear: Option<WearStats>,
}

/// Bad block scan with a truncated index list
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct BadBlockSummary {
    /// Total number of bad blocks
    pub count: usize,
    /// First bad block indices, up to the display limit
    pub shown: Vec<usize>,
    /// Whether `shown` omits some bad blocks
    pub truncated: bool,
}

impl BadBlockSummary {
    fn new(mut bad: Vec<usize>, limit: usize) -> Self {
        let count = bad.len();
        bad.truncate(limit);
        Self {
            count,
            truncated: count > bad.len(),
            shown: bad,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoIdentity => write!(
                f,
                "No flash information available. Please parse ID bytes first."
            ),
            Self::Analysis(report) => fmt::Display::fmt(report, f),
        }
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(BANNER_WIDTH);
        writeln!(f, "{}", rule)?;
        writeln!(f, "NAND FLASH ANALYSIS REPORT")?;
        writeln!(f, "{}", rule)?;
        writeln!(f)?;
        writeln!(f, "{}", self.identity)?;
        writeln!(f)?;
        writeln!(f, "Manufacturer: {}", self.manufacturer)?;

        if let Some(data) = &self.data {
            writeln!(f)?;
            writeln!(f, "Data Analysis:")?;
            writeln!(f, "  Data Size: {} bytes", data.data_size)?;

            if let Some(bad) = &data.bad_blocks {
                writeln!(f, "  Bad Blocks: {}", bad.count)?;
                if bad.count > 0 {
                    write!(f, "  Bad Block Numbers: {:?}", bad.shown)?;
                    if bad.truncated {
                        write!(f, " ...")?;
                    }
                    writeln!(f)?;
                }
            }

            if let Some(wear) = &data.wear {
                writeln!(f)?;
                writeln!(f, "Wear Leveling Statistics:")?;
                writeln!(f, "  Total Pages: {}", wear.total_pages)?;
                writeln!(f, "  Erased Pages: {}", wear.erased_pages)?;
                writeln!(f, "  Written Pages: {}", wear.written_pages)?;
                writeln!(f, "  Utilization: {:.2}%", wear.utilization_percent())?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use alloc::string::ToString;
    use alloc::vec;

    const SAMSUNG_ID: [u8; 4] = [0xEC, 0xD3, 0x51, 0x95];
    const BLOCK_SIZE: usize = 128 * 1024;

    fn analysis(report: Report) -> AnalysisReport {
        match report {
            Report::Analysis(r) => r,
            Report::NoIdentity => panic!("expected an analysis report"),
        }
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = AnalysisSession::new();
        assert!(session.buffer().is_none());
        assert!(session.identity().is_none());
        assert!(!session.has_data());

        let session = AnalysisSession::with_data(vec![0xFF; 1024]);
        assert_eq!(session.buffer().map(|b| b.len()), Some(1024));
    }

    #[test]
    fn test_report_without_identity() {
        let session = AnalysisSession::with_data(vec![0xFF; BLOCK_SIZE]);
        assert_eq!(session.build_report(), Report::NoIdentity);
        assert!(session
            .build_report()
            .to_string()
            .contains("No flash information available"));
    }

    #[test]
    fn test_decode_failure_keeps_identity() {
        let mut session = AnalysisSession::new();
        session.decode_identity(&SAMSUNG_ID).unwrap();

        assert_eq!(
            session.decode_identity(&[0xAD]),
            Err(Error::InvalidIdentity { len: 1 })
        );
        assert_eq!(session.identity().map(|id| id.manufacturer_id()), Some(0xEC));
    }

    #[test]
    fn test_load_keeps_identity() {
        let mut session = AnalysisSession::new();
        session.decode_identity(&SAMSUNG_ID).unwrap();
        session.load(vec![0x00; 16]);
        session.load(vec![0xFF; 32]);
        assert!(session.identity().is_some());
        assert_eq!(session.buffer(), Some(&[0xFF; 32][..]));
    }

    #[test]
    fn test_report_identity_only() {
        let mut session = AnalysisSession::new();
        session.decode_identity(&SAMSUNG_ID).unwrap();

        let report = analysis(session.build_report());
        assert_eq!(report.manufacturer, "Samsung");
        assert!(report.data.is_none());

        let text = session.build_report().to_string();
        assert!(text.contains("NAND FLASH ANALYSIS REPORT"));
        assert!(text.contains("Manufacturer ID"));
        assert!(text.contains("Device ID"));
        assert!(text.contains("Samsung"));
        assert!(!text.contains("Data Analysis"));
    }

    #[test]
    fn test_report_with_data() {
        let mut session = AnalysisSession::with_data(vec![0xFF; BLOCK_SIZE * 2]);
        session.decode_identity(&SAMSUNG_ID).unwrap();

        let report = analysis(session.build_report());
        let data = report.data.unwrap();
        assert_eq!(data.data_size, BLOCK_SIZE * 2);
        assert_eq!(data.bad_blocks.unwrap().count, 0);
        let wear = data.wear.unwrap();
        assert_eq!(wear.total_pages, 128);
        assert_eq!(wear.erased_pages, 128);

        let text = session.build_report().to_string();
        assert!(text.contains("Data Analysis"));
        assert!(text.contains("Wear Leveling Statistics"));
        assert!(text.contains("Utilization: 0.00%"));
    }

    #[test]
    fn test_report_small_dump_skips_block_scan() {
        let mut session = AnalysisSession::with_data(vec![0x00; 4096]);
        session.decode_identity(&SAMSUNG_ID).unwrap();

        let data = analysis(session.build_report()).data.unwrap();
        assert!(data.bad_blocks.is_none());
        assert_eq!(data.wear.unwrap().written_pages, 2);
    }

    #[test]
    fn test_report_empty_dump_has_no_data_section() {
        let mut session = AnalysisSession::with_data(Vec::new());
        session.decode_identity(&SAMSUNG_ID).unwrap();
        assert!(analysis(session.build_report()).data.is_none());
    }

    #[test]
    fn test_bad_block_list_truncated() {
        let mut dump = vec![0xFF; BLOCK_SIZE * 12];
        for idx in 0..12 {
            dump[idx * BLOCK_SIZE] = 0x00;
        }
        let mut session = AnalysisSession::with_data(dump);
        session.decode_identity(&SAMSUNG_ID).unwrap();

        let bad = analysis(session.build_report())
            .data
            .unwrap()
            .bad_blocks
            .unwrap();
        assert_eq!(bad.count, 12);
        assert_eq!(bad.shown, (0..10).collect::<Vec<_>>());
        assert!(bad.truncated);

        assert!(session.build_report().to_string().contains("8, 9] ..."));
    }

    #[test]
    fn test_custom_display_limit() {
        let config = AnalyzerConfig {
            bad_block_display_limit: 1,
            ..AnalyzerConfig::default()
        };
        let mut session = AnalysisSession::with_config(config);
        let mut dump = vec![0xFF; BLOCK_SIZE * 3];
        dump[BLOCK_SIZE] = 0x00;
        dump[BLOCK_SIZE * 2] = 0x00;
        session.load(dump);
        session.decode_identity(&SAMSUNG_ID).unwrap();

        let bad = analysis(session.build_report())
            .data
            .unwrap()
            .bad_blocks
            .unwrap();
        assert_eq!(bad.count, 2);
        assert_eq!(bad.shown, vec![1]);
    }
}
