// src/listing/window.rs

use serde::{Serialize, Serializer};

/// Above this many pages the strip collapses runs into ellipses.
pub const MAX_VISIBLE_PAGES: usize = 7;

/// One entry in a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

/// Serialized as the page number, or `"..."` for a gap.
impl Serialize for PageLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageLink::Page(page) => serializer.serialize_u64(*page as u64),
            PageLink::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

/// Page numbers to render around `current`.
///
/// Small totals are listed in full. Otherwise the first and last pages are
/// always present, with either the leading block (2-5), the trailing block
/// (last five), or `current - 1 ..= current + 1` in between.
pub fn page_window(current: usize, total: usize) -> Vec<PageLink> {
    let total = total.max(1);
    let current = current.clamp(1, total);

    if total <= MAX_VISIBLE_PAGES {
        return (1..=total).map(PageLink::Page).collect();
    }

    let mut links = vec![PageLink::Page(1)];

    if current <= 4 {
        links.extend((2..=5).map(PageLink::Page));
        links.push(PageLink::Ellipsis);
        links.push(PageLink::Page(total));
    } else if current >= total - 3 {
        links.push(PageLink::Ellipsis);
        links.extend((total - 4..=total).map(PageLink::Page));
    } else {
        links.push(PageLink::Ellipsis);
        links.extend((current - 1..=current + 1).map(PageLink::Page));
        links.push(PageLink::Ellipsis);
        links.push(PageLink::Page(total));
    }

    links
}
