// src/listing/mod.rs

//! Client-style list derivation: filter, then sort, then paginate.
//!
//! Everything here is pure. Handlers build a [`ListQuery`] and a [`Pagination`]
//! from request parameters and call [`derive`] on the full collection; nothing
//! is cached between calls.

pub mod pagination;
pub mod window;

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use pagination::{DEFAULT_PAGE_SIZE, ListState, PageMeta, Pagination, total_pages};
pub use window::{MAX_VISIBLE_PAGES, PageLink, page_window};

/// Sort direction for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// The value a record exposes for a given sort key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    /// Compared case-insensitively.
    Text(&'a str),
    /// Compared numerically.
    Number(f64),
}

impl SortValue<'_> {
    fn compare(&self, other: &SortValue<'_>) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase)),
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            // A key never yields both kinds; numbers first keeps the order total anyway.
            (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        }
    }
}

/// A record that can be searched, filtered and sorted by [`derive`].
pub trait Listable {
    /// Fixed set of attributes the record can be sorted by.
    type SortKey: Copy;
    /// Equality filter on a single attribute.
    type Filter;

    /// Text fields the free-text search is matched against.
    fn search_fields(&self) -> Vec<&str>;

    fn sort_value(&self, key: Self::SortKey) -> SortValue<'_>;

    fn matches_filter(&self, filter: &Self::Filter) -> bool;
}

/// Filter and sort configuration. Every combination of fields is valid.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery<K, F> {
    pub search: String,
    pub filter: Option<F>,
    pub sort_key: K,
    pub direction: SortDirection,
}

impl<K, F> ListQuery<K, F> {
    pub fn new(sort_key: K, direction: SortDirection) -> Self {
        Self {
            search: String::new(),
            filter: None,
            sort_key,
            direction,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_filter(mut self, filter: Option<F>) -> Self {
        self.filter = filter;
        self
    }
}

/// One derived page plus its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(flatten)]
    pub meta: PageMeta,
    /// Page-number strip for a pagination control.
    pub page_links: Vec<PageLink>,
}

impl<T> Page<T> {
    /// Converts the items, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
            page_links: self.page_links,
        }
    }
}

/// Keeps the records matching both the search term and the equality filter,
/// preserving input order.
pub fn filter_records<'a, T: Listable>(
    all: &'a [T],
    query: &ListQuery<T::SortKey, T::Filter>,
) -> Vec<&'a T> {
    let term = query.search.trim().to_lowercase();

    all.iter()
        .filter(|record| {
            term.is_empty()
                || record
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&term))
        })
        .filter(|record| {
            query
                .filter
                .as_ref()
                .is_none_or(|filter| record.matches_filter(filter))
        })
        .collect()
}

/// Stable sort; equal keys keep their relative order in both directions.
pub fn sort_records<T: Listable>(records: &mut [&T], key: T::SortKey, direction: SortDirection) {
    records.sort_by(|a, b| {
        let ordering = a.sort_value(key).compare(&b.sort_value(key));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Runs the full filter → sort → paginate pipeline.
///
/// A page beyond the last one is clamped to the last page before slicing.
pub fn derive<T: Listable + Clone>(
    all: &[T],
    query: &ListQuery<T::SortKey, T::Filter>,
    pagination: &Pagination,
) -> Page<T> {
    let mut records = filter_records(all, query);
    sort_records(&mut records, query.sort_key, query.direction);

    let meta = pagination.meta(records.len());
    let items = records
        .into_iter()
        .skip(meta.offset())
        .take(meta.page_size)
        .cloned()
        .collect();

    Page {
        items,
        page_links: page_window(meta.current_page, meta.total_pages),
        meta,
    }
}

/// Sorted, de-duplicated values of one attribute, for filter dropdowns.
pub fn distinct_values<T, V, F>(all: &[T], value: F) -> Vec<V>
where
    V: Ord,
    F: Fn(&T) -> V,
{
    all.iter()
        .map(value)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
