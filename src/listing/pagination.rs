// src/listing/pagination.rs

use serde::Serialize;

use super::{ListQuery, Listable, Page, derive};

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// `max(1, ceil(total_items / page_size))`. A zero page size counts as 1.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// Current page and page size. Pages are 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// Starts on page 1.
    pub fn new(page_size: usize) -> Self {
        Self::at(1, page_size)
    }

    /// The requested page is kept as-is and clamped when metadata is computed.
    pub fn at(current_page: usize, page_size: usize) -> Self {
        Self {
            current_page: current_page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Moves to `page`, clamped to `[1, total_pages]`.
    pub fn go_to(&mut self, page: usize, total_items: usize) {
        self.current_page = page.clamp(1, total_pages(total_items, self.page_size));
    }

    pub fn next(&mut self, total_items: usize) {
        self.go_to(self.current_page.saturating_add(1), total_items);
    }

    pub fn prev(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    /// Changing the page size always returns to page 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    pub fn meta(&self, total_items: usize) -> PageMeta {
        PageMeta::compute(total_items, self.current_page, self.page_size)
    }
}

/// Display metadata for one page of a derived listing.
///
/// `start_index` and `end_index` are 1-indexed positions of the first and last
/// visible item; both are 0 when there is nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub current_page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl PageMeta {
    pub fn compute(total_items: usize, requested_page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_pages(total_items, page_size);
        let current_page = requested_page.clamp(1, total_pages);

        let (start_index, end_index) = if total_items == 0 {
            (0, 0)
        } else {
            (
                (current_page - 1) * page_size + 1,
                (current_page * page_size).min(total_items),
            )
        };

        Self {
            current_page,
            page_size,
            total_items,
            total_pages,
            start_index,
            end_index,
            has_prev: current_page > 1,
            has_next: current_page < total_pages,
        }
    }

    /// Number of sorted records before the first visible one.
    pub fn offset(&self) -> usize {
        (self.current_page - 1) * self.page_size
    }
}

/// A query plus pagination, kept together so that any query change sends the
/// view back to page 1.
#[derive(Debug, Clone)]
pub struct ListState<K, F> {
    query: ListQuery<K, F>,
    pagination: Pagination,
}

impl<K, F> ListState<K, F> {
    pub fn new(query: ListQuery<K, F>, page_size: usize) -> Self {
        Self {
            query,
            pagination: Pagination::new(page_size),
        }
    }

    pub fn query(&self) -> &ListQuery<K, F> {
        &self.query
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn set_query(&mut self, query: ListQuery<K, F>) {
        self.query = query;
        self.pagination.reset();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.pagination.set_page_size(page_size);
    }

    pub fn go_to(&mut self, page: usize, total_items: usize) {
        self.pagination.go_to(page, total_items);
    }

    pub fn derive<T>(&self, all: &[T]) -> Page<T>
    where
        T: Listable<SortKey = K, Filter = F> + Clone,
    {
        derive(all, &self.query, &self.pagination)
    }
}
