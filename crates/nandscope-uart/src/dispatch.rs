//! Command dispatch
//!
//! Turns one command line into one [`Response`]. Dispatch never fails:
//! parse errors, missing data and decode failures all come back as error
//! responses, and a rejected command leaves the session untouched.

use nandscope_core::badblock;
use nandscope_core::session::AnalysisSession;
use nandscope_core::wear::{self, WearStats};

use crate::error::{CommandError, Result};
use crate::protocol::{Command, Request};
use crate::response::{
    format_range, CalcWearPayload, CheckBlockPayload, Payload, ReadDataPayload, Response,
};

/// Bytes per KiB, for the size parameters of `checkblock` and `calcwear`
const KIB: usize = 1024;

/// Execute one command line against a session
pub fn dispatch(session: &mut AnalysisSession, line: &str) -> Response {
    let command = Command::tokenize(line);
    log::debug!("Dispatching '{}' with {:?}", command.name, command.params);

    match execute(session, &command) {
        Ok(response) => response,
        Err(e) => {
            log::warn!("Rejected '{}': {}", line.trim(), e);
            Response::error(&command.name, &e)
        }
    }
}

fn execute(session: &mut AnalysisSession, command: &Command) -> Result<Response> {
    let request = Request::parse(command)?;

    let payload = match request {
        Request::ReadData { id_bytes } => {
            let id = session.decode_identity(&id_bytes)?;
            Payload::ReadData(ReadDataPayload {
                flash_info: (&id).into(),
            })
        }
        Request::ParseId { id_bytes } => {
            let id = session.decode_identity(&id_bytes)?;
            Payload::ParseId((&id).into())
        }
        Request::CheckBlock {
            block_size_kb,
            start,
            end,
        } => {
            let data = session.data().ok_or(CommandError::NoDataLoaded)?;
            let bad = badblock::scan(data, kib_to_bytes(block_size_kb));
            let in_range = index_range(start, end)
                .map_or(0, |(first, last)| badblock::count_in_range(&bad, first, last));
            Payload::CheckBlock(CheckBlockPayload {
                block_size_kb,
                range: format_range(start, end),
                total_bad_blocks: bad.len(),
                bad_blocks_in_range: in_range,
            })
        }
        Request::CalcWear {
            page_size_kb,
            start,
            end,
        } => {
            let data = session.data().ok_or(CommandError::NoDataLoaded)?;
            let page_size = kib_to_bytes(page_size_kb);
            let sample_len = session.config().erased_sample_len;
            let stats = index_range(start, end).map_or_else(WearStats::default, |(first, last)| {
                wear::analyze_range(data, page_size, first, last, sample_len)
            });
            Payload::CalcWear(CalcWearPayload::new(page_size_kb, start, end, &stats))
        }
    };

    Ok(Response::success(request.kind().name(), payload))
}

/// Size in bytes for a KiB parameter; a non-positive size is 0
fn kib_to_bytes(kb: i64) -> usize {
    if kb <= 0 {
        return 0;
    }
    usize::try_from(kb).unwrap_or(usize::MAX).saturating_mul(KIB)
}

/// Clip a signed inclusive range to non-negative indices
///
/// Returns `None` when no index can fall inside it.
fn index_range(start: i64, end: i64) -> Option<(usize, usize)> {
    if end < 0 || start > end {
        return None;
    }
    let first = usize::try_from(start.max(0)).unwrap_or(usize::MAX);
    let last = usize::try_from(end).unwrap_or(usize::MAX);
    Some((first, last))
}

/// Command dispatcher owning its analysis session
#[derive(Debug, Default)]
pub struct CommandDispatcher {
    session: AnalysisSession,
}

impl CommandDispatcher {
    /// Create a dispatcher around an existing session
    pub fn new(session: AnalysisSession) -> Self {
        Self { session }
    }

    /// Execute one command line
    pub fn dispatch(&mut self, line: &str) -> Response {
        dispatch(&mut self.session, line)
    }

    /// The underlying session
    pub fn session(&self) -> &AnalysisSession {
        &self.session
    }

    /// Mutable access to the session, e.g. to load a new dump
    pub fn session_mut(&mut self) -> &mut AnalysisSession {
        &mut self.session
    }

    /// Consume the dispatcher and return the session
    pub fn into_session(self) -> AnalysisSession {
        self.session
    }
}
