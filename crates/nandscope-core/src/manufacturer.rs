//! NAND manufacturer code lookup
//!
//! The first ID byte returned by a NAND device is the JEDEC manufacturer
//! code. Only the vendor name is resolved here; device geometry comes from
//! the decoder in [`crate::identity`].

use alloc::format;
use alloc::string::{String, ToString};

/// Known manufacturer codes, sorted by code
pub const MANUFACTURERS: &[(u8, &str)] = &[
    (0x01, "AMD/Spansion"),
    (0x04, "Fujitsu"),
    (0x07, "Renesas"),
    (0x20, "STMicro"),
    (0x2C, "Micron"),
    (0x8F, "National"),
    (0x98, "Toshiba"),
    (0xAD, "Hynix"),
    (0xC2, "Macronix"),
    (0xEC, "Samsung"),
];

/// Look up the vendor name for a manufacturer code
pub fn lookup(id: u8) -> Option<&'static str> {
    MANUFACTURERS
        .binary_search_by_key(&id, |&(code, _)| code)
        .ok()
        .map(|idx| MANUFACTURERS[idx].1)
}

/// Get a display name for a manufacturer code
///
/// Unknown codes are rendered as `Unknown (0xNN)` rather than failing.
pub fn display_name(id: u8) -> String {
    match lookup(id) {
        Some(name) => name.to_string(),
        None => format!("Unknown (0x{:02X})", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sorted() {
        assert!(MANUFACTURERS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_known_vendors() {
        assert_eq!(lookup(0xEC), Some("Samsung"));
        assert_eq!(lookup(0xAD), Some("Hynix"));
        assert_eq!(lookup(0x2C), Some("Micron"));
        assert_eq!(lookup(0x01), Some("AMD/Spansion"));
        assert_eq!(display_name(0x98), "Toshiba");
    }

    #[test]
    fn test_unknown_vendor() {
        assert_eq!(lookup(0xFF), None);
        assert_eq!(display_name(0xFF), "Unknown (0xFF)");
        assert_eq!(display_name(0x0A), "Unknown (0x0A)");
    }
}
