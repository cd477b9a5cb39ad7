//! Page-window arithmetic for paginated lists.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Clamped current page plus the page-number controls to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// 1-based, always within `1..=total_pages`.
    pub effective_page: usize,
    /// At least 1, even for an empty list.
    pub total_pages: usize,
    /// `1..=total_pages`, ascending.
    pub page_numbers: Vec<usize>,
}

impl PageWindow {
    /// Index range of `effective_page` within a list of `total_items`.
    pub fn item_range(&self, total_items: usize, page_size: NonZeroUsize) -> std::ops::Range<usize> {
        let start = (self.effective_page - 1)
            .saturating_mul(page_size.get())
            .min(total_items);
        let end = start.saturating_add(page_size.get()).min(total_items);
        start..end
    }
}

/// `total_pages = max(1, ceil(total_items / page_size))`,
/// `effective_page = clamp(requested_page, 1, total_pages)`.
pub fn compute_page_window(
    total_items: usize,
    page_size: NonZeroUsize,
    requested_page: i64,
) -> PageWindow {
    let total_pages = total_items.div_ceil(page_size.get()).max(1);
    let effective_page = if requested_page < 1 {
        1
    } else {
        usize::try_from(requested_page)
            .unwrap_or(usize::MAX)
            .min(total_pages)
    };

    PageWindow {
        effective_page,
        total_pages,
        page_numbers: (1..=total_pages).collect(),
    }
}

/// Page number from a route segment; missing or unparsable segments mean page 1.
pub fn parse_page_param(param: Option<&str>) -> i64 {
    param
        .and_then(|p| p.trim().parse::<i64>().ok())
        .unwrap_or(1)
}
