//! Page number normalization and offset/limit planning.
//!
//! # Invariants
//! - Page numbers are 1-based; anything unusable becomes page 1.
//! - `total_pages` is never 0 for a successful listing: an empty result is a
//!   single empty page.

use serde::{Deserialize, Serialize};

/// Fixed number of poems per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 200;

/// Zero-based inclusive row range `[from, to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub from: u64,
    pub to: u64,
}

impl PageRange {
    /// Number of rows the range spans.
    pub fn row_count(self) -> u64 {
        self.to - self.from + 1
    }
}

/// Parses a raw `page` parameter.
///
/// Whole numbers written in float form (`2.0`, `1e1`) are accepted. Missing,
/// non-numeric, fractional, zero and negative values all map to 1.
pub fn normalize_page(raw: Option<&str>) -> u32 {
    raw.and_then(|value| parse_whole_page(value.trim()))
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

fn parse_whole_page(value: &str) -> Option<u32> {
    if let Ok(page) = value.parse::<u32>() {
        return Some(page);
    }
    let page = value.parse::<f64>().ok()?;
    if page.fract() == 0.0 && (1.0..=f64::from(u32::MAX)).contains(&page) {
        Some(page as u32)
    } else {
        None
    }
}

/// Computes the row range for a 1-based `page`.
///
/// `page` 0 is treated as 1 and `page_size` 0 as 1.
pub fn page_range(page: u32, page_size: u32) -> PageRange {
    let page = u64::from(page.max(1));
    let page_size = u64::from(page_size.max(1));
    let from = (page - 1) * page_size;
    PageRange {
        from,
        to: from + page_size - 1,
    }
}

/// Computes `max(1, ceil(total_count / page_size))`.
pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size.max(1));
    let pages = total_count.div_ceil(page_size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{normalize_page, page_range, total_pages, PageRange, DEFAULT_PAGE_SIZE};

    #[test]
    fn first_page_spans_first_page_size_rows() {
        assert_eq!(
            page_range(1, DEFAULT_PAGE_SIZE),
            PageRange { from: 0, to: 199 }
        );
        assert_eq!(page_range(1, DEFAULT_PAGE_SIZE).row_count(), 200);
    }

    #[test]
    fn third_page_starts_at_offset_400() {
        assert_eq!(
            page_range(3, DEFAULT_PAGE_SIZE),
            PageRange { from: 400, to: 599 }
        );
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(450, DEFAULT_PAGE_SIZE), 3);
        assert_eq!(total_pages(400, DEFAULT_PAGE_SIZE), 2);
        assert_eq!(total_pages(1, DEFAULT_PAGE_SIZE), 1);
    }

    #[test]
    fn empty_result_is_one_page() {
        assert_eq!(total_pages(0, DEFAULT_PAGE_SIZE), 1);
    }

    #[test]
    fn unusable_page_values_become_one() {
        assert_eq!(normalize_page(None), 1);
        assert_eq!(normalize_page(Some("")), 1);
        assert_eq!(normalize_page(Some("0")), 1);
        assert_eq!(normalize_page(Some("-4")), 1);
        assert_eq!(normalize_page(Some("two")), 1);
        assert_eq!(normalize_page(Some("2.5")), 1);
        assert_eq!(normalize_page(Some(" 7 ")), 7);
        assert_eq!(normalize_page(Some("NaN")), 1);
        assert_eq!(normalize_page(Some("inf")), 1);
        assert_eq!(normalize_page(Some("1e12")), 1);
    }

    #[test]
    fn whole_float_pages_are_accepted() {
        assert_eq!(normalize_page(Some("2.0")), 2);
        assert_eq!(normalize_page(Some("3.")), 3);
        assert_eq!(normalize_page(Some("1e1")), 10);
        assert_eq!(normalize_page(Some("-2.0")), 1);
    }

    #[test]
    fn large_pages_do_not_overflow() {
        let range = page_range(u32::MAX, DEFAULT_PAGE_SIZE);
        assert_eq!(range.row_count(), 200);
    }
}
