//! Bad block scanning
//!
//! A dump is split into whole blocks of a fixed size. A block is treated as
//! bad when its first byte is not the erased value `0xFF`; the spare area is
//! not parsed. Trailing bytes that do not fill a whole block are ignored.

use alloc::vec::Vec;

/// Value of an erased byte on NAND
pub const ERASED_BYTE: u8 = 0xFF;

/// Number of whole blocks of `block_size` bytes in a buffer of `len` bytes
pub fn block_count(len: usize, block_size: usize) -> usize {
    if block_size == 0 {
        return 0;
    }
    len / block_size
}

/// Check whether a single block carries a bad block marker
pub fn is_bad_block(block: &[u8]) -> bool {
    block.first().is_some_and(|&b| b != ERASED_BYTE)
}

/// Scan a dump for bad blocks
///
/// Returns the zero-based indices of bad blocks in ascending order. An
/// empty result means every scanned block is good. A zero block size or an
/// empty buffer scans no blocks.
pub fn scan(buffer: &[u8], block_size: usize) -> Vec<usize> {
    if block_size == 0 {
        return Vec::new();
    }

    let bad: Vec<usize> = buffer
        .chunks_exact(block_size)
        .enumerate()
        .filter(|(_, block)| is_bad_block(block))
        .map(|(idx, _)| idx)
        .collect();

    log::debug!(
        "Scanned {} blocks of {} bytes, {} bad",
        block_count(buffer.len(), block_size),
        block_size,
        bad.len()
    );

    bad
}

/// Count the bad blocks whose index falls in `start..=end`
pub fn count_in_range(bad_blocks: &[usize], start: usize, end: usize) -> usize {
    bad_blocks
        .iter()
        .filter(|&&idx| idx >= start && idx <= end)
        .count()
}
