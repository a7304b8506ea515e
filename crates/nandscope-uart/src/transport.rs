//! Line sink abstraction
//!
//! The serial link itself is owned by the embedding application. This
//! module only defines where serialized responses go and how a single
//! received line is answered.

use std::io::{self, Write};

use nandscope_core::session::AnalysisSession;

use crate::dispatch::dispatch;

/// Line terminator used on serial links
pub const DEFAULT_NEWLINE: &str = "\r\n";

/// Destination for response lines
pub trait LineSink {
    /// Write one line followed by the sink's terminator
    fn send_line(&mut self, line: &str) -> io::Result<()>;
}

/// Any byte writer, terminating lines with a fixed newline
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
    newline: &'static str,
}

impl<W: Write> WriterSink<W> {
    /// Wrap a writer using [`DEFAULT_NEWLINE`]
    pub fn new(writer: W) -> Self {
        Self::with_newline(writer, DEFAULT_NEWLINE)
    }

    /// Wrap a writer with a custom line terminator
    pub fn with_newline(writer: W, newline: &'static str) -> Self {
        Self { writer, newline }
    }

    /// Unwrap the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LineSink for WriterSink<W> {
    fn send_line(&mut self, line: &str) -> io::Result<()> {
        let line = line.trim_end_matches(['\r', '\n']);
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(self.newline.as_bytes())?;
        self.writer.flush()
    }
}

/// Answer one received line
///
/// Blank lines are skipped without a response. Otherwise exactly one JSON
/// response line is written. Returns whether a response was sent.
pub fn respond<S: LineSink + ?Sized>(
    session: &mut AnalysisSession,
    line: &str,
    sink: &mut S,
) -> io::Result<bool> {
    if line.trim().is_empty() {
        return Ok(false);
    }

    let response = dispatch(session, line);
    let out = response
        .to_json_line()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    sink.send_line(&out)?;
    Ok(true)
}
