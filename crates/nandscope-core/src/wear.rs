//! Wear leveling statistics
//!
//! A dump is split into whole pages and each page is classified as erased
//! or written. Only a prefix of each page is sampled: a page counts as
//! erased when its first [`ERASED_SAMPLE_LEN`] bytes (or the whole page, if
//! smaller) are all `0xFF`.

use crate::badblock::ERASED_BYTE;

/// Number of leading bytes sampled per page
pub const ERASED_SAMPLE_LEN: usize = 64;

/// Erased/written page counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct WearStats {
    /// Number of pages examined
    pub total_pages: usize,
    /// Pages whose sampled prefix is all `0xFF`
    pub erased_pages: usize,
    /// Pages that are not erased
    pub written_pages: usize,
}

impl WearStats {
    /// Share of written pages, in percent
    ///
    /// Returns `0.0` when no pages were examined.
    pub fn utilization_percent(&self) -> f64 {
        if self.total_pages == 0 {
            return 0.0;
        }
        self.written_pages as f64 / self.total_pages as f64 * 100.0
    }

    fn record(&mut self, erased: bool) {
        self.total_pages += 1;
        if erased {
            self.erased_pages += 1;
        } else {
            self.written_pages += 1;
        }
    }
}

/// Check whether a page looks erased, sampling at most `sample_len` bytes
///
/// At least one byte is always sampled, so an empty page is never erased.
pub fn is_erased_page(page: &[u8], sample_len: usize) -> bool {
    if page.is_empty() {
        return false;
    }
    let n = sample_len.max(1).min(page.len());
    page[..n].iter().all(|&b| b == ERASED_BYTE)
}

/// Compute wear statistics over every whole page of `buffer`
pub fn analyze(buffer: &[u8], page_size: usize) -> WearStats {
    analyze_with_sample(buffer, page_size, ERASED_SAMPLE_LEN)
}

/// Compute wear statistics with an explicit sample length
pub fn analyze_with_sample(buffer: &[u8], page_size: usize, sample_len: usize) -> WearStats {
    analyze_range(buffer, page_size, 0, usize::MAX, sample_len)
}

/// Compute wear statistics over the pages with index in `start..=end`
///
/// Indices past the last whole page are ignored, so an `end` beyond the
/// dump is clamped. `start > end` examines no pages.
pub fn analyze_range(
    buffer: &[u8],
    page_size: usize,
    start: usize,
    end: usize,
    sample_len: usize,
) -> WearStats {
    let mut stats = WearStats::default();
    if page_size == 0 || start > end {
        return stats;
    }

    let span = (end - start).saturating_add(1);
    for page in buffer.chunks_exact(page_size).skip(start).take(span) {
        stats.record(is_erased_page(page, sample_len));
    }

    log::debug!(
        "Wear scan over pages {}..={} ({} bytes each): {} erased, {} written",
        start,
        end,
        page_size,
        stats.erased_pages,
        stats.written_pages
    );

    stats
}
