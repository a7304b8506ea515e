//! nandscope-uart - Line-oriented command protocol
//!
//! This crate turns single text lines, as received over a UART, into
//! structured responses backed by a [`nandscope_core`] analysis session.
//!
//! # Commands
//!
//! | command      | parameters                       |
//! |--------------|----------------------------------|
//! | `readdata`   | four ID bytes in hex             |
//! | `parseid`    | four ID bytes in hex             |
//! | `checkblock` | block KiB, start, end, reserved  |
//! | `calcwear`   | page KiB, start, end, reserved   |
//!
//! Opening the serial port and reading lines is left to the embedding
//! application; [`respond`] answers one line into any [`LineSink`].
//!
//! # Example
//!
//! ```
//! use nandscope_core::session::AnalysisSession;
//! use nandscope_uart::dispatch;
//!
//! let mut session = AnalysisSession::new();
//! let response = dispatch(&mut session, "readdata EC D3 51 95");
//! assert!(response.is_success());
//! println!("{}", response.to_json_line()?);
//! # Ok::<(), serde_json::Error>(())
//! ```

pub mod dispatch;
pub mod error;
pub mod protocol;
pub mod response;
pub mod transport;

// Re-exports
pub use dispatch::{dispatch, CommandDispatcher};
pub use error::{CommandError, ErrorKind, Result};
pub use protocol::{Command, CommandKind, Request, SUPPORTED_COMMANDS};
pub use response::{Payload, Response};
pub use transport::{respond, LineSink, WriterSink};
