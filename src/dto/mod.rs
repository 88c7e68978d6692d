//! DTO modules that bridge services with templates and APIs.

use serde::{Deserialize, Serialize};

use crate::pagination::{ListState, PAGE_SIZE_CHOICES, PageState, Paginated, PaginationError};

pub mod api;
pub mod profile;
pub mod quotas;

/// Query string accepted by every list screen.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListQuery {
    /// Search text entered by the user.
    pub q: Option<String>,
    /// Requested page, 1-based.
    pub page: Option<usize>,
    /// Requested page size; only the sizes offered by the selector are honoured.
    pub per_page: Option<usize>,
}

impl ListQuery {
    /// Builds the list state, clamping page `0` to the first page and
    /// replacing unknown page sizes with `default_per_page`.
    pub fn into_state(self, default_per_page: usize) -> Result<ListState, PaginationError> {
        let per_page = self
            .per_page
            .filter(|size| PAGE_SIZE_CHOICES.contains(size))
            .unwrap_or(default_per_page);
        let page = PageState::new(self.page.unwrap_or(1).max(1), per_page)?;

        Ok(ListState::new(self.q.unwrap_or_default(), page))
    }
}

/// Data required to render any list screen.
#[derive(Debug, Serialize)]
pub struct ListPageData<T> {
    pub list: Paginated<T>,
    /// Trimmed search text echoed back into the search box.
    pub search_query: String,
}

impl<T> ListPageData<T> {
    pub fn new(list: Paginated<T>, state: &ListState) -> Self {
        Self {
            list,
            search_query: state.query().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_page_size_falls_back_to_default() {
        let query = ListQuery {
            q: Some("  cntt ".to_string()),
            page: Some(0),
            per_page: Some(7),
        };

        let state = query.into_state(20).unwrap();

        assert_eq!(state.query(), "cntt");
        assert_eq!(state.page().current_page(), 1);
        assert_eq!(state.page().items_per_page(), 20);
    }

    #[test]
    fn offered_page_size_is_kept() {
        let query = ListQuery {
            q: None,
            page: Some(3),
            per_page: Some(50),
        };

        let state = query.into_state(20).unwrap();

        assert_eq!(state.page().current_page(), 3);
        assert_eq!(state.page().items_per_page(), 50);
    }

    #[test]
    fn new_search_keeps_chosen_page_size() {
        let query = ListQuery {
            q: Some("kinh doanh".to_string()),
            page: None,
            per_page: Some(50),
        };

        let state = query.into_state(20).unwrap();

        assert_eq!(state.query(), "kinh doanh");
        assert_eq!(state.page().current_page(), 1);
        assert_eq!(state.page().items_per_page(), 50);
    }

    #[test]
    fn zero_default_page_size_is_an_error() {
        assert!(ListQuery::default().into_state(0).is_err());
    }
}
