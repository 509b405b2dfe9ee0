use std::ops::RangeInclusive;

use crate::common::constants::{DEFAULT_PAGE_SIZE, PAGE_WINDOW_SIZE};
use crate::filters::{PostSort, UserSort};

/// Search, sort and categorical filter applied to a listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions<S> {
    pub search: String,
    pub sort_by: S,
    /// Tag for posts, gender for users
    pub filter_value: Option<String>,
}

impl<S: Default> ListOptions<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn sort_by(mut self, sort_by: S) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn filter(mut self, value: impl Into<String>) -> Self {
        self.filter_value = Some(value.into());
        self
    }
}

impl<S> ListOptions<S> {
    pub(crate) fn search_term(&self) -> Option<&str> {
        Some(self.search.trim()).filter(|s| !s.is_empty())
    }

    pub(crate) fn filter_term(&self) -> &str {
        self.filter_value.as_deref().unwrap_or("")
    }
}

pub type PostQueryState = QueryState<PostSort>;
pub type UserQueryState = QueryState<UserSort>;

/// Transitions of a listing's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryAction<S> {
    Search(String),
    Sort(S),
    Filter(Option<String>),
    NextPage,
    PreviousPage,
    GoToPage(u32),
    /// A page arrived and reported this many pages upstream
    Loaded { total_pages: u32 },
}

/// Immutable page/search/sort/filter state of one listing view.
///
/// New states are produced by [`QueryState::reduce`]; changing the search, sort or
/// filter returns to the first page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState<S> {
    page: u32,
    page_size: u32,
    search: String,
    sort_by: S,
    filter: Option<String>,
    total_pages: u32,
}

impl<S: Default> Default for QueryState<S> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<S: Default> QueryState<S> {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            search: String::new(),
            sort_by: S::default(),
            filter: None,
            total_pages: 1,
        }
    }
}

impl<S: Clone> QueryState<S> {
    /// Start on `page` before the page count is known, e.g. a page asked for on
    /// the command line. `GoToPage` clamps once `Loaded` has reported the count.
    pub fn starting_at(self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort_by(&self) -> &S {
        &self.sort_by
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn reduce(self, action: QueryAction<S>) -> Self {
        match action {
            QueryAction::Search(search) => Self {
                search: search.trim().to_string(),
                page: 1,
                ..self
            },
            QueryAction::Sort(sort_by) => Self {
                sort_by,
                page: 1,
                ..self
            },
            QueryAction::Filter(filter) => Self {
                filter: filter
                    .map(|f| f.trim().to_string())
                    .filter(|f| !f.is_empty()),
                page: 1,
                ..self
            },
            QueryAction::NextPage if self.page < self.total_pages => Self {
                page: self.page + 1,
                ..self
            },
            QueryAction::PreviousPage if self.page > 1 => Self {
                page: self.page - 1,
                ..self
            },
            QueryAction::GoToPage(page) => Self {
                page: page.clamp(1, self.total_pages.max(1)),
                ..self
            },
            QueryAction::Loaded { total_pages } => Self {
                total_pages,
                ..self
            },
            QueryAction::NextPage | QueryAction::PreviousPage => self,
        }
    }

    pub fn list_options(&self) -> ListOptions<S> {
        ListOptions {
            search: self.search.clone(),
            sort_by: self.sort_by.clone(),
            filter_value: self.filter.clone(),
        }
    }

    /// Page numbers for a pagination bar: at most five, starting two before the
    /// current page. Empty when everything fits on one page.
    pub fn page_window(&self) -> RangeInclusive<u32> {
        if self.total_pages <= 1 {
            return 1..=0;
        }
        let start = self.page.saturating_sub(2).max(1);
        let end = (start + PAGE_WINDOW_SIZE - 1).min(self.total_pages);
        start..=end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(pages: u32) -> PostQueryState {
        PostQueryState::new(10).reduce(QueryAction::Loaded { total_pages: pages })
    }

    #[test]
    fn test_new_state_starts_on_first_page() {
        let state = UserQueryState::default();
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(state.sort_by(), &UserSort::Unsorted);
        assert_eq!(state.filter(), None);
    }

    #[test]
    fn test_search_sort_filter_reset_page() {
        let state = loaded(10)
            .reduce(QueryAction::GoToPage(4))
            .reduce(QueryAction::Search("  love ".to_string()));
        assert_eq!(state.page(), 1);
        assert_eq!(state.search(), "love");

        let state = state
            .reduce(QueryAction::GoToPage(3))
            .reduce(QueryAction::Sort(PostSort::Title));
        assert_eq!(state.page(), 1);
        assert_eq!(state.sort_by(), &PostSort::Title);

        let state = state
            .reduce(QueryAction::GoToPage(3))
            .reduce(QueryAction::Filter(Some("history".to_string())));
        assert_eq!(state.page(), 1);
        assert_eq!(state.filter(), Some("history"));

        let state = state.reduce(QueryAction::Filter(Some("  ".to_string())));
        assert_eq!(state.filter(), None);
    }

    #[test]
    fn test_paging_stays_in_bounds() {
        let state = loaded(2);
        let state = state.reduce(QueryAction::PreviousPage);
        assert_eq!(state.page(), 1);

        let state = state.reduce(QueryAction::NextPage);
        assert_eq!(state.page(), 2);

        let state = state.reduce(QueryAction::NextPage);
        assert_eq!(state.page(), 2);

        let state = state.reduce(QueryAction::GoToPage(99));
        assert_eq!(state.page(), 2);

        let state = state.reduce(QueryAction::GoToPage(0));
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_reduce_leaves_original_untouched() {
        let before = loaded(5);
        let after = before.clone().reduce(QueryAction::NextPage);
        assert_eq!(before.page(), 1);
        assert_eq!(after.page(), 2);
    }

    #[test]
    fn test_list_options_mirror_state() {
        let state = loaded(3)
            .reduce(QueryAction::Search("magic".to_string()))
            .reduce(QueryAction::Sort(PostSort::Reactions))
            .reduce(QueryAction::Filter(Some("fiction".to_string())));
        let options = state.list_options();

        assert_eq!(options.search, "magic");
        assert_eq!(options.sort_by, PostSort::Reactions);
        assert_eq!(options.filter_value.as_deref(), Some("fiction"));
    }

    #[test]
    fn test_page_window() {
        assert!(loaded(1).page_window().is_empty());
        assert_eq!(loaded(3).page_window(), 1..=3);
        assert_eq!(loaded(20).page_window(), 1..=5);
        assert_eq!(
            loaded(20).reduce(QueryAction::GoToPage(10)).page_window(),
            8..=12
        );
        assert_eq!(
            loaded(20).reduce(QueryAction::GoToPage(20)).page_window(),
            18..=20
        );
    }

    #[test]
    fn test_starting_page_is_kept_until_loaded() {
        let state = PostQueryState::new(10)
            .reduce(QueryAction::Search("love".to_string()))
            .starting_at(7);
        assert_eq!(state.page(), 7);
        assert_eq!(state.total_pages(), 1);

        let clamped = state
            .reduce(QueryAction::Loaded { total_pages: 4 })
            .reduce(QueryAction::GoToPage(7));
        assert_eq!(clamped.page(), 4);

        assert_eq!(PostQueryState::new(10).starting_at(0).page(), 1);
    }
}
