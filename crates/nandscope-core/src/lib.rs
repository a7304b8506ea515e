//! nandscope-core - Core library for NAND flash dump analysis
//!
//! This crate decodes NAND ID bytes, scans raw dumps for bad blocks and
//! computes erased/written page statistics. It is designed to be `no_std`
//! compatible (it only needs `alloc`) so the same analysis can run on the
//! host or next to the programmer firmware.
//!
//! # Features
//!
//! - `std` - Enable standard library support: serde derives on the result
//!   types, TOML configuration and loading dumps from files
//!
//! # Example
//!
//! ```
//! use nandscope_core::session::{AnalysisSession, Report};
//!
//! let mut session = AnalysisSession::with_data(vec![0xFF; 128 * 1024 * 2]);
//! let id = session.decode_identity(&[0xEC, 0xD3, 0x51, 0x95])?;
//! assert_eq!(id.page_size(), 2048);
//!
//! match session.build_report() {
//!     Report::Analysis(report) => assert_eq!(report.manufacturer, "Samsung"),
//!     Report::NoIdentity => unreachable!(),
//! }
//! # Ok::<(), nandscope_core::Error>(())
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod badblock;
pub mod checksum;
pub mod config;
pub mod error;
pub mod identity;
pub mod manufacturer;
pub mod session;
pub mod wear;

pub use config::AnalyzerConfig;
pub use error::{Error, Result};
pub use identity::FlashIdentity;
