//! NAND ID byte decoding
//!
//! The READ ID command returns a short byte sequence:
//!
//! | byte | meaning                                   |
//! |------|-------------------------------------------|
//! | 0    | manufacturer code                         |
//! | 1    | device code                               |
//! | 2    | cell info (read, not used for geometry)   |
//! | 3    | page size in bits [1:0], block size [5:4] |
//!
//! Only the geometry hints carried in byte 3 are decoded. The device
//! capacity is not derived from the ID bytes; it is assumed to be
//! [`BLOCKS_PER_DEVICE`] blocks.

use alloc::string::String;
use core::fmt;

use crate::error::{Error, Result};

/// Minimum number of ID bytes needed to decode an identity
pub const MIN_ID_LEN: usize = 4;

/// Smallest page size (page size code 0)
pub const BASE_PAGE_SIZE: u32 = 1024;

/// Smallest block size (block size code 0)
pub const BASE_BLOCK_SIZE: u32 = 64 * 1024;

/// Number of blocks assumed for every device when computing the total size
pub const BLOCKS_PER_DEVICE: u32 = 1024;

/// Spare area is estimated as 1/32 of the page size
pub const SPARE_RATIO: u32 = 32;

/// Decoded NAND flash identity
///
/// Instances can only be produced by [`FlashIdentity::decode`], which keeps
/// the derived sizes consistent with the page and block sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct FlashIdentity {
    manufacturer_id: u8,
    device_id: u8,
    #[cfg_attr(feature = "std", serde(skip))]
    cell_info: u8,
    page_size: u32,
    block_size: u32,
    total_size: u32,
    spare_size: u32,
}

impl FlashIdentity {
    /// Decode NAND ID bytes
    ///
    /// At least [`MIN_ID_LEN`] bytes are required; any extra bytes are
    /// ignored.
    pub fn decode(id_bytes: &[u8]) -> Result<Self> {
        if id_bytes.len() < MIN_ID_LEN {
            log::debug!(
                "Rejecting ID sequence of {} bytes (need {})",
                id_bytes.len(),
                MIN_ID_LEN
            );
            return Err(Error::InvalidIdentity {
                len: id_bytes.len(),
            });
        }

        let manufacturer_id = id_bytes[0];
        let device_id = id_bytes[1];
        let cell_info = id_bytes[2];

        // Byte 3, bits [1:0] - page size (1 KiB << code)
        let page_size_code = id_bytes[3] & 0x03;
        // Byte 3, bits [5:4] - block size (64 KiB << code)
        let block_size_code = (id_bytes[3] >> 4) & 0x03;

        let page_size = BASE_PAGE_SIZE << page_size_code;
        let block_size = BASE_BLOCK_SIZE << block_size_code;

        let id = Self {
            manufacturer_id,
            device_id,
            cell_info,
            page_size,
            block_size,
            total_size: block_size * BLOCKS_PER_DEVICE,
            spare_size: page_size / SPARE_RATIO,
        };

        log::debug!(
            "Decoded ID {:02X} {:02X} {:02X} {:02X}: page {} bytes, block {} bytes, spare {} bytes",
            id_bytes[0],
            id_bytes[1],
            id_bytes[2],
            id_bytes[3],
            id.page_size,
            id.block_size,
            id.spare_size
        );

        Ok(id)
    }

    /// JEDEC manufacturer code (ID byte 0)
    pub fn manufacturer_id(&self) -> u8 {
        self.manufacturer_id
    }

    /// Device code (ID byte 1)
    pub fn device_id(&self) -> u8 {
        self.device_id
    }

    /// Raw cell info byte (ID byte 2)
    pub fn cell_info(&self) -> u8 {
        self.cell_info
    }

    /// Page size in bytes
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Block size in bytes
    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Total device size in bytes
    pub fn total_size(&self) -> u32 {
        self.total_size
    }

    /// Spare area size per page in bytes
    pub fn spare_size(&self) -> u32 {
        self.spare_size
    }

    /// Vendor display name for the manufacturer code
    pub fn manufacturer_name(&self) -> String {
        crate::manufacturer::display_name(self.manufacturer_id)
    }
}

impl fmt::Display for FlashIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "NAND Flash Information:")?;
        writeln!(f, "  Manufacturer ID: 0x{:02X}", self.manufacturer_id)?;
        writeln!(f, "  Device ID: 0x{:02X}", self.device_id)?;
        writeln!(f, "  Page Size: {} bytes", self.page_size)?;
        writeln!(f, "  Block Size: {} bytes", self.block_size)?;
        writeln!(
            f,
            "  Total Size: {:.2} MB",
            self.total_size as f64 / (1024.0 * 1024.0)
        )?;
        write!(f, "  Spare Size: {} bytes", self.spare_size)
    }
}
