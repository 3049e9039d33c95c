//! Fixed-size pages over a filtered result.
//!
//! Out-of-range page requests never fail; they clamp to the nearest
//! valid page. An empty result is still one (empty) page.

use catalog::Product;
use std::collections::BTreeSet;

/// Products per page on the listing
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// One page of a filtered result.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<Product>,
    /// Page actually served (1-based, after clamping)
    pub page: usize,
    pub page_size: usize,
    /// Always at least 1
    pub total_pages: usize,
    /// Size of the whole filtered result
    pub total_items: usize,
}

impl Page {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based position range of this page's items in the full result,
    /// `None` for an empty page.
    pub fn item_range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let first = (self.page - 1) * self.page_size + 1;
        Some((first, first + self.items.len() - 1))
    }

    /// Navigation markers for this page.
    pub fn page_numbers(&self) -> Vec<PageMarker> {
        page_numbers(self.page, self.total_pages)
    }
}

/// Number of pages needed for `total_items`, never less than 1.
///
/// A page size of 0 is treated as 1.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a requested page to `[1, total_pages]`.
pub fn clamp_page(requested: i64, total_pages: usize) -> usize {
    let total = total_pages.max(1);
    if requested < 1 {
        1
    } else {
        usize::try_from(requested).map_or(total, |page| page.min(total))
    }
}

/// Slice a result into the requested page.
///
/// # Arguments
/// * `results` - The filtered, sorted result
/// * `page` - Requested 1-based page; clamped into range
/// * `page_size` - Items per page; 0 is treated as 1
pub fn paginate(results: &[Product], page: i64, page_size: usize) -> Page {
    let page_size = page_size.max(1);
    let total_pages = total_pages(results.len(), page_size);
    let page = clamp_page(page, total_pages);

    let start = ((page - 1) * page_size).min(results.len());
    let end = (start + page_size).min(results.len());

    Page {
        items: results[start..end].to_vec(),
        page,
        page_size,
        total_pages,
        total_items: results.len(),
    }
}

// =============================================================================
// Navigation Markers
// =============================================================================

/// One slot in the page navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(usize),
    /// A collapsed run of one or more pages
    Ellipsis,
}

/// Page numbers to show in the navigation bar.
///
/// ## Algorithm
/// 1. Always show the first and last page
/// 2. Show the window `current - 1 ..= current + 1`
/// 3. Replace every gap between shown pages with a single `Ellipsis`
///
/// `current` is clamped into `[1, total_pages]` first.
pub fn page_numbers(current: usize, total_pages: usize) -> Vec<PageMarker> {
    let total = total_pages.max(1);
    let current = current.clamp(1, total);

    let mut shown = BTreeSet::new();
    shown.insert(1);
    shown.insert(total);
    for page in current.saturating_sub(1)..=current + 1 {
        if (1..=total).contains(&page) {
            shown.insert(page);
        }
    }

    let mut markers = Vec::with_capacity(shown.len() + 2);
    let mut previous: Option<usize> = None;
    for page in shown {
        if let Some(prev) = previous {
            if page > prev + 1 {
                markers.push(PageMarker::Ellipsis);
            }
        }
        markers.push(PageMarker::Page(page));
        previous = Some(page);
    }
    markers
}
