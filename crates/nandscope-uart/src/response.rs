//! Structured command responses
//!
//! Responses serialize as a flat object tagged by `status`:
//!
//! ```json
//! {"status":"success","command":"parseid","manufacturer_id":"0xAD","device_id":"0xDC","manufacturer":"Hynix"}
//! {"status":"error","command":"checkblock","message":"No data loaded","kind":"NoDataLoaded"}
//! ```

use nandscope_core::wear::WearStats;
use nandscope_core::FlashIdentity;
use serde::Serialize;

use crate::error::{CommandError, ErrorKind};
use crate::protocol::SUPPORTED_COMMANDS;

/// Response to a single command line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    /// Command executed
    Success(SuccessResponse),
    /// Command rejected
    Error(ErrorResponse),
}

/// Successful command result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessResponse {
    /// Command name
    pub command: &'static str,
    /// Command-specific fields
    #[serde(flatten)]
    pub payload: Payload,
}

/// Command-specific success fields
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// `readdata` result
    ReadData(ReadDataPayload),
    /// `parseid` result
    ParseId(ParseIdPayload),
    /// `checkblock` result
    CheckBlock(CheckBlockPayload),
    /// `calcwear` result
    CalcWear(CalcWearPayload),
}

/// Fields of a `readdata` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadDataPayload {
    /// Decoded identity
    pub flash_info: FlashInfo,
}

/// Identity as reported over the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlashInfo {
    /// Manufacturer code, `0xNN`
    pub manufacturer_id: String,
    /// Device code, `0xNN`
    pub device_id: String,
    /// Manufacturer display name
    pub manufacturer_name: String,
    /// Page size in bytes
    pub page_size: u32,
    /// Block size in bytes
    pub block_size: u32,
    /// Total size in bytes
    pub total_size: u32,
    /// Spare area per page in bytes
    pub spare_size: u32,
}

impl From<&FlashIdentity> for FlashInfo {
    fn from(id: &FlashIdentity) -> Self {
        Self {
            manufacturer_id: hex_byte(id.manufacturer_id()),
            device_id: hex_byte(id.device_id()),
            manufacturer_name: id.manufacturer_name(),
            page_size: id.page_size(),
            block_size: id.block_size(),
            total_size: id.total_size(),
            spare_size: id.spare_size(),
        }
    }
}

/// Fields of a `parseid` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseIdPayload {
    /// Manufacturer code, `0xNN`
    pub manufacturer_id: String,
    /// Device code, `0xNN`
    pub device_id: String,
    /// Manufacturer display name
    pub manufacturer: String,
}

impl From<&FlashIdentity> for ParseIdPayload {
    fn from(id: &FlashIdentity) -> Self {
        Self {
            manufacturer_id: hex_byte(id.manufacturer_id()),
            device_id: hex_byte(id.device_id()),
            manufacturer: id.manufacturer_name(),
        }
    }
}

/// Fields of a `checkblock` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckBlockPayload {
    /// Block size used for the scan, in KiB
    pub block_size_kb: i64,
    /// Requested range, `start-end`
    pub range: String,
    /// Bad blocks in the whole dump
    pub total_bad_blocks: usize,
    /// Bad blocks within the requested range
    pub bad_blocks_in_range: usize,
}

/// Fields of a `calcwear` response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalcWearPayload {
    /// Page size used for the scan, in KiB
    pub page_size_kb: i64,
    /// Requested range, `start-end`
    pub range: String,
    /// Pages examined
    pub total_pages: usize,
    /// Erased pages
    pub erased_pages: usize,
    /// Written pages
    pub written_pages: usize,
    /// Written share in percent, two decimals
    pub utilization_percent: f64,
}

impl CalcWearPayload {
    /// Build the payload from raw statistics
    pub fn new(page_size_kb: i64, start: i64, end: i64, stats: &WearStats) -> Self {
        Self {
            page_size_kb,
            range: format_range(start, end),
            total_pages: stats.total_pages,
            erased_pages: stats.erased_pages,
            written_pages: stats.written_pages,
            utilization_percent: round2(stats.utilization_percent()),
        }
    }
}

/// Rejected command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// Command name, when one could be read from the line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Human-readable description
    pub message: String,
    /// Machine-readable error kind
    pub kind: ErrorKind,
    /// Supported command names, for unknown commands
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_commands: Option<Vec<&'static str>>,
}

impl Response {
    /// Wrap a success payload
    pub fn success(command: &'static str, payload: Payload) -> Self {
        Self::Success(SuccessResponse { command, payload })
    }

    /// Build an error response
    ///
    /// An empty command name is left out of the response.
    pub fn error(command: &str, err: &CommandError) -> Self {
        let kind = err.kind();
        let supported_commands =
            (kind == ErrorKind::UnknownCommand).then(|| SUPPORTED_COMMANDS.to_vec());
        Self::Error(ErrorResponse {
            command: (!command.is_empty()).then(|| command.to_string()),
            message: err.to_string(),
            kind,
            supported_commands,
        })
    }

    /// Whether the command succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Echoed command name, if any
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::Success(s) => Some(s.command),
            Self::Error(e) => e.command.as_deref(),
        }
    }

    /// Error kind, for error responses
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success(_) => None,
            Self::Error(e) => Some(e.kind),
        }
    }

    /// Serialize as one line of compact JSON (no trailing newline)
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Format a byte as `0xNN`
pub fn hex_byte(b: u8) -> String {
    format!("0x{:02X}", b)
}

/// Format an inclusive range as `start-end`
pub fn format_range(start: i64, end: i64) -> String {
    format!("{}-{}", start, end)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn to_value(response: &Response) -> Value {
        serde_json::from_str(&response.to_json_line().unwrap()).unwrap()
    }

    #[test]
    fn test_hex_byte() {
        assert_eq!(hex_byte(0xEC), "0xEC");
        assert_eq!(hex_byte(0x0a), "0x0A");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(50.0), 50.0);
        assert_eq!(round2(100.0 / 3.0), 33.33);
        assert_eq!(round2(200.0 / 3.0), 66.67);
    }

    #[test]
    fn test_success_shape() {
        let id = FlashIdentity::decode(&[0xAD, 0xDC, 0x10, 0x95]).unwrap();
        let response = Response::success("parseid", Payload::ParseId((&id).into()));
        assert_eq!(
            to_value(&response),
            json!({
                "status": "success",
                "command": "parseid",
                "manufacturer_id": "0xAD",
                "device_id": "0xDC",
                "manufacturer": "Hynix",
            })
        );
    }

    #[test]
    fn test_error_shape() {
        let response = Response::error("checkblock", &CommandError::NoDataLoaded);
        assert_eq!(
            to_value(&response),
            json!({
                "status": "error",
                "command": "checkblock",
                "message": "No data loaded",
                "kind": "NoDataLoaded",
            })
        );
    }

    #[test]
    fn test_unknown_command_lists_supported() {
        let err = CommandError::UnknownCommand("erase".to_string());
        let value = to_value(&Response::error("erase", &err));
        assert_eq!(value["kind"], "UnknownCommand");
        assert_eq!(
            value["supported_commands"],
            json!(["readdata", "parseid", "checkblock", "calcwear"])
        );

        // Blank line: no command to echo
        let err = CommandError::UnknownCommand(String::new());
        let value = to_value(&Response::error("", &err));
        assert!(value.get("command").is_none());
    }

    #[test]
    fn test_json_is_single_line() {
        let stats = WearStats {
            total_pages: 3,
            erased_pages: 1,
            written_pages: 2,
        };
        let payload = CalcWearPayload::new(2, 0, 2, &stats);
        let response = Response::success("calcwear", Payload::CalcWear(payload));
        let line = response.to_json_line().unwrap();
        assert!(!line.contains('\n'));
        assert_eq!(to_value(&response)["utilization_percent"], 66.67);
        assert_eq!(to_value(&response)["range"], "0-2");
    }

    #[test]
    fn test_format_range_signed() {
        assert_eq!(format_range(0, 10), "0-10");
        assert_eq!(format_range(-1, 10), "-1-10");
    }
}
