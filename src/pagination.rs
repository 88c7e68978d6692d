//! In-memory filtering and pagination shared by every list screen.
//!
//! A screen loads its full collection, narrows it with [`filter`] using the
//! record's search fields, slices the current page with [`paginate`] and
//! renders navigation from [`compute_page_range`]. [`Paginated`] bundles the
//! three steps together with the self-healing page clamp.
//!
//! HTTP handlers rebuild a [`ListState`] from the query string on every
//! request. Callers that keep one state across interactions move it with
//! [`PageState::go_to_page`], [`PageState::set_page_size`] and
//! [`ListState::set_query`].

use serde::{Serialize, Serializer};
use thiserror::Error;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Number of neighbours shown on each side of the current page.
pub const DEFAULT_PAGE_DELTA: usize = 1;

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZE_CHOICES: [usize; 4] = [10, 20, 50, 100];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Extracts one searchable string field from a record.
///
/// `None` stands for an absent value and matches like an empty string.
pub type FieldSelector<T> = fn(&T) -> Option<&str>;

fn field_matches<T>(item: &T, needle: &str, fields: &[FieldSelector<T>]) -> bool {
    fields
        .iter()
        .any(|select| select(item).unwrap_or_default().to_lowercase().contains(needle))
}

/// Keeps the records where any selected field contains `query`, ignoring case.
///
/// An empty query returns the collection untouched. Order is preserved.
pub fn filter<T>(items: Vec<T>, query: &str, fields: &[FieldSelector<T>]) -> Vec<T> {
    if query.is_empty() {
        return items;
    }

    let needle = query.to_lowercase();
    items
        .into_iter()
        .filter(|item| field_matches(item, &needle, fields))
        .collect()
}

/// Number of pages needed for `item_count` records, zero when there are none.
pub fn total_pages(item_count: usize, items_per_page: usize) -> usize {
    item_count.div_ceil(items_per_page.max(1))
}

/// Current page and page size of a list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    current_page: usize,
    items_per_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl PageState {
    pub fn new(current_page: usize, items_per_page: usize) -> Result<Self, PaginationError> {
        if current_page == 0 {
            return Err(PaginationError::InvalidArgument("page must be at least 1"));
        }
        if items_per_page == 0 {
            return Err(PaginationError::InvalidArgument(
                "page size must be at least 1",
            ));
        }
        Ok(Self {
            current_page,
            items_per_page,
        })
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, items_per_page: usize) -> Result<(), PaginationError> {
        if items_per_page == 0 {
            return Err(PaginationError::InvalidArgument(
                "page size must be at least 1",
            ));
        }
        self.items_per_page = items_per_page;
        self.current_page = 1;
        Ok(())
    }

    /// Moves to `page` when it exists, otherwise leaves the state unchanged.
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) {
        if (1..=total_pages).contains(&page) {
            self.current_page = page;
        }
    }

    /// Returns to the first page when the current one no longer exists.
    pub fn heal(&mut self, total_pages: usize) {
        if self.current_page > total_pages.max(1) {
            self.current_page = 1;
        }
    }

    fn bounds(&self, len: usize) -> (usize, usize) {
        let start = (self.current_page - 1)
            .saturating_mul(self.items_per_page)
            .min(len);
        let end = start.saturating_add(self.items_per_page).min(len);
        (start, end)
    }
}

/// Search text plus page state; a new query starts over from page 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    query: String,
    page: PageState,
}

impl ListState {
    pub fn new(query: impl Into<String>, page: PageState) -> Self {
        Self {
            query: query.into().trim().to_string(),
            page,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut PageState {
        &mut self.page
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into().trim().to_string();
        if query != self.query {
            self.query = query;
            self.page.current_page = 1;
        }
    }
}

/// Records on the current page together with the page count.
#[derive(Debug, PartialEq, Eq)]
pub struct PageSlice<'a, T> {
    pub items: &'a [T],
    pub total_pages: usize,
}

/// Slices the current page out of an already filtered collection.
pub fn paginate<'a, T>(filtered: &'a [T], state: &PageState) -> PageSlice<'a, T> {
    let (start, end) = state.bounds(filtered.len());
    PageSlice {
        items: &filtered[start..end],
        total_pages: total_pages(filtered.len(), state.items_per_page),
    }
}

/// One pagination button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

// Templates expect a page number or `null` for the ellipsis.
impl Serialize for PageLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageLink::Page(page) => serializer.serialize_some(page),
            PageLink::Ellipsis => serializer.serialize_none(),
        }
    }
}

/// Builds the compressed list of page buttons around `current_page`.
///
/// Page 1 and the last page are always shown together with `delta` pages on
/// either side of the current one. A gap hiding a single page shows that
/// page instead of an ellipsis.
pub fn compute_page_range(current_page: usize, total_pages: usize, delta: usize) -> Vec<PageLink> {
    match total_pages {
        0 => return vec![],
        1 => return vec![PageLink::Page(1)],
        _ => {}
    }

    let current = if (1..=total_pages).contains(&current_page) {
        current_page
    } else {
        1
    };
    let last = total_pages;
    let start = current.saturating_sub(delta).max(2);
    let end = current.saturating_add(delta).min(last - 1);

    let mut pages = vec![PageLink::Page(1)];

    match start {
        3 => pages.push(PageLink::Page(2)),
        s if s > 3 => pages.push(PageLink::Ellipsis),
        _ => {}
    }

    pages.extend((start..=end).map(PageLink::Page));

    // `end` may sit below `start` when delta is zero on the last page.
    let shown_to = end.max(start - 1);
    if shown_to + 2 == last {
        pages.push(PageLink::Page(last - 1));
    } else if shown_to + 2 < last {
        pages.push(PageLink::Ellipsis);
    }

    pages.push(PageLink::Page(last));
    pages
}

/// A rendered page of a list screen.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<PageLink>,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T: Clone> Paginated<T> {
    /// Filters, heals the page state and slices the current page.
    pub fn from_collection(
        collection: Vec<T>,
        state: &mut ListState,
        fields: &[FieldSelector<T>],
    ) -> Self {
        let filtered = filter(collection, state.query(), fields);
        let total = total_pages(filtered.len(), state.page().items_per_page());
        state.page_mut().heal(total);

        let page = *state.page();
        let slice = paginate(&filtered, &page);

        Self {
            items: slice.items.to_vec(),
            pages: compute_page_range(page.current_page(), slice.total_pages, DEFAULT_PAGE_DELTA),
            page: page.current_page(),
            per_page: page.items_per_page(),
            total_pages: slice.total_pages,
            total_items: filtered.len(),
        }
    }
}
