//! Page requests and page responses.

use sea_orm::Order;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sort direction of a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// `"desc"` in any letter case selects [`SortDirection::Descending`].
    /// Everything else, including unrecognised input, is ascending.
    #[must_use]
    pub fn parse(direction: &str) -> Self {
        if direction.eq_ignore_ascii_case("desc") {
            Self::Descending
        } else {
            Self::Ascending
        }
    }
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Ascending => Order::Asc,
            SortDirection::Descending => Order::Desc,
        }
    }
}

/// Which slice of a result set to fetch, and in what order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page number.
    pub page_index: u64,
    /// Always at least 1.
    pub page_size: u64,
    pub sort_field: String,
    pub sort_direction: SortDirection,
}

impl PageRequest {
    /// Rows to skip before this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page_index.saturating_mul(self.page_size)
    }
}

/// Build a [`PageRequest`].
///
/// `direction` is matched against `"desc"` ignoring case; anything else
/// sorts ascending. A `page_size` of 0 is raised to 1.
#[must_use]
pub fn make_page_request(
    page_index: u64,
    page_size: u64,
    sort_field: impl Into<String>,
    direction: &str,
) -> PageRequest {
    PageRequest {
        page_index,
        page_size: page_size.max(1),
        sort_field: sort_field.into(),
        sort_direction: SortDirection::parse(direction),
    }
}

/// One page of query results as returned by a repository.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_index: u64,
    pub page_size: u64,
    /// Matching rows across all pages.
    pub total_elements: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page_index: request.page_index,
            page_size: request.page_size,
            total_elements,
        }
    }

    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            0
        } else {
            self.total_elements.div_ceil(self.page_size)
        }
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page_index.saturating_add(1) < self.total_pages()
    }

    /// Convert every item, keeping order and counters.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page_index: self.page_index,
            page_size: self.page_size,
            total_elements: self.total_elements,
        }
    }
}

/// Flattened page sent back to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginationResponse<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
}

/// Copy a [`Page`] into a [`PaginationResponse`], field for field.
#[must_use]
pub fn shape_response<T>(page: Page<T>) -> PaginationResponse<T> {
    PaginationResponse {
        content: page.content,
        page: page.page_index,
        size: page.page_size,
        total_elements: page.total_elements,
    }
}

impl<T> From<Page<T>> for PaginationResponse<T> {
    fn from(page: Page<T>) -> Self {
        shape_response(page)
    }
}
