//! Transient browsing state: the query plus the page window.
//!
//! Any change to the query sends the window back to page 1. Navigation
//! never leaves `[1, total_pages]`.

use crate::filter_pipeline::filter;
use crate::paginator::{DEFAULT_PAGE_SIZE, Page, clamp_page, paginate};
use crate::query::{CategorySelection, PriceRange, QuerySpec, SortKey};
use catalog::Product;
use tracing::debug;

/// Current page number and the fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page: usize,
    page_size: usize,
}

impl PageWindow {
    /// A window on page 1. A page size of 0 is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Jump to a page, clamped into `[1, total_pages]`.
    pub fn go_to(&mut self, page: i64, total_pages: usize) {
        self.page = clamp_page(page, total_pages);
    }

    pub fn next(&mut self, total_pages: usize) {
        self.page = (self.page + 1).min(total_pages.max(1));
    }

    pub fn previous(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// One user's browsing state over the listing.
#[derive(Debug, Clone, Default)]
pub struct BrowseSession {
    query: QuerySpec,
    window: PageWindow,
}

impl BrowseSession {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: QuerySpec::new(),
            window: PageWindow::new(page_size),
        }
    }

    pub fn query(&self) -> &QuerySpec {
        &self.query
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    /// Replace the whole query. Resets to page 1 when it changed.
    pub fn set_query(&mut self, query: QuerySpec) {
        if query != self.query {
            debug!("Query changed, resetting to page 1");
            self.query = query;
            self.window.reset();
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let query = self.query.clone().with_search(search);
        self.set_query(query);
    }

    pub fn set_category(&mut self, category: CategorySelection) {
        let query = self.query.clone().with_category(category);
        self.set_query(query);
    }

    pub fn set_price_range(&mut self, price: PriceRange) {
        let query = self.query.clone().with_price_range(price);
        self.set_query(query);
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        let query = self.query.clone().with_sort(sort);
        self.set_query(query);
    }

    pub fn go_to_page(&mut self, page: i64, total_pages: usize) {
        self.window.go_to(page, total_pages);
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.window.next(total_pages);
    }

    pub fn previous_page(&mut self) {
        self.window.previous();
    }

    /// Run the query against a snapshot and serve the current page.
    ///
    /// The window is clamped to the result, so a snapshot that shrank
    /// since the last render lands on its last page instead of an
    /// empty one.
    pub fn current_page(&mut self, snapshot: &[Product]) -> Page {
        let results = filter(snapshot, &self.query);
        self.page_of(&results)
    }

    /// Serve the current page of an already filtered result.
    pub fn page_of(&mut self, results: &[Product]) -> Page {
        let page = paginate(results, self.window.page as i64, self.window.page_size);
        self.window.page = page.page;
        page
    }
}
