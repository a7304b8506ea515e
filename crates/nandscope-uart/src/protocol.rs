//! Command line protocol
//!
//! A request is a single text line:
//!
//! ```text
//! <command> <p1> <p2> <p3> <p4>
//! ```
//!
//! Whitespace between tokens may be any length, the command name is case
//! insensitive and so are hex parameters. Every command takes exactly
//! [`PARAM_COUNT`] parameters.

use crate::error::{CommandError, Result};

/// Number of parameters every command takes
pub const PARAM_COUNT: usize = 4;

/// Read ID bytes and decode the full geometry
pub const CMD_READDATA: &str = "readdata";
/// Read ID bytes and report the manufacturer only
pub const CMD_PARSEID: &str = "parseid";
/// Count bad blocks in the loaded dump
pub const CMD_CHECKBLOCK: &str = "checkblock";
/// Compute wear statistics over the loaded dump
pub const CMD_CALCWEAR: &str = "calcwear";

/// All supported command names, in protocol order
pub const SUPPORTED_COMMANDS: [&str; 4] = [CMD_READDATA, CMD_PARSEID, CMD_CHECKBLOCK, CMD_CALCWEAR];

/// Supported commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// `readdata <id0> <id1> <id2> <id3>`
    ReadData,
    /// `parseid <id0> <id1> <id2> <id3>`
    ParseId,
    /// `checkblock <block_kb> <start> <end> <reserved>`
    CheckBlock,
    /// `calcwear <page_kb> <start> <end> <reserved>`
    CalcWear,
}

impl CommandKind {
    /// Look up a command by its lower-case name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            CMD_READDATA => Some(Self::ReadData),
            CMD_PARSEID => Some(Self::ParseId),
            CMD_CHECKBLOCK => Some(Self::CheckBlock),
            CMD_CALCWEAR => Some(Self::CalcWear),
            _ => None,
        }
    }

    /// Protocol name of this command
    pub fn name(self) -> &'static str {
        match self {
            Self::ReadData => CMD_READDATA,
            Self::ParseId => CMD_PARSEID,
            Self::CheckBlock => CMD_CHECKBLOCK,
            Self::CalcWear => CMD_CALCWEAR,
        }
    }
}

/// A tokenized command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Lower-cased command name (empty for a blank line)
    pub name: String,
    /// Remaining whitespace separated tokens
    pub params: Vec<String>,
}

impl Command {
    /// Split a line into a command name and parameters
    pub fn tokenize(line: &str) -> Self {
        let mut tokens = line.split_whitespace();
        let name = tokens.next().unwrap_or_default().to_lowercase();
        let params = tokens.map(str::to_string).collect();
        Self { name, params }
    }
}

/// A validated request with typed parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Decode ID bytes, reply with the full identity
    ReadData {
        /// Raw ID bytes
        id_bytes: [u8; PARAM_COUNT],
    },
    /// Decode ID bytes, reply with the manufacturer
    ParseId {
        /// Raw ID bytes
        id_bytes: [u8; PARAM_COUNT],
    },
    /// Bad block count over the dump and within `start..=end`
    ///
    /// Values are kept signed as sent; a non-positive size scans nothing.
    CheckBlock {
        /// Block size in KiB
        block_size_kb: i64,
        /// First block index of the range
        start: i64,
        /// Last block index of the range
        end: i64,
    },
    /// Wear statistics over pages `start..=end`
    CalcWear {
        /// Page size in KiB
        page_size_kb: i64,
        /// First page index of the range
        start: i64,
        /// Last page index of the range
        end: i64,
    },
}

impl Request {
    /// Validate a tokenized command
    pub fn parse(command: &Command) -> Result<Self> {
        let kind = CommandKind::from_name(&command.name)
            .ok_or_else(|| CommandError::UnknownCommand(command.name.clone()))?;

        let params: &[String; PARAM_COUNT] = command.params.as_slice().try_into().map_err(|_| {
            CommandError::InvalidFormat {
                command: command.name.clone(),
                expected: PARAM_COUNT,
                found: command.params.len(),
            }
        })?;

        let request = match kind {
            CommandKind::ReadData => Self::ReadData {
                id_bytes: parse_id_bytes(params)?,
            },
            CommandKind::ParseId => Self::ParseId {
                id_bytes: parse_id_bytes(params)?,
            },
            // The fourth parameter is reserved and not validated
            CommandKind::CheckBlock => Self::CheckBlock {
                block_size_kb: parse_decimal(&params[0])?,
                start: parse_decimal(&params[1])?,
                end: parse_decimal(&params[2])?,
            },
            CommandKind::CalcWear => Self::CalcWear {
                page_size_kb: parse_decimal(&params[0])?,
                start: parse_decimal(&params[1])?,
                end: parse_decimal(&params[2])?,
            },
        };

        Ok(request)
    }

    /// Command this request was parsed from
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::ReadData { .. } => CommandKind::ReadData,
            Self::ParseId { .. } => CommandKind::ParseId,
            Self::CheckBlock { .. } => CommandKind::CheckBlock,
            Self::CalcWear { .. } => CommandKind::CalcWear,
        }
    }
}

/// Parse a one-byte hex value, with or without a `0x` prefix
pub fn parse_hex_byte(s: &str) -> Result<u8> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CommandError::InvalidHex(s.to_string()));
    }
    u8::from_str_radix(digits, 16).map_err(|_| CommandError::InvalidHex(s.to_string()))
}

/// Parse a signed base-10 integer
pub fn parse_decimal(s: &str) -> Result<i64> {
    s.parse()
        .map_err(|_| CommandError::InvalidParameter(s.to_string()))
}

fn parse_id_bytes(params: &[String; PARAM_COUNT]) -> Result<[u8; PARAM_COUNT]> {
    let mut id_bytes = [0u8; PARAM_COUNT];
    for (byte, param) in id_bytes.iter_mut().zip(params) {
        *byte = parse_hex_byte(param)?;
    }
    Ok(id_bytes)
}
