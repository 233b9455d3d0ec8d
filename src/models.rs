use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::errors::FilterError;
use crate::filter::{QueryFilter, parse_filters};
use crate::pagination::{PageRequest, make_page_request};

/// Page size used when a request does not give one.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Sort field used when a request does not give one.
pub const DEFAULT_SORT_FIELD: &str = "id";

/// Query parameters for filtering, paging and sorting a list of resources.
///
/// # Filtering
/// `filter` is a JSON array of filters, all of which must match:
/// ```json
/// [{"field": "age", "operation": "GREATER_THAN", "value": 30}]
/// ```
///
/// # Pagination
/// `page` is zero-based; `size` defaults to 20.
///
/// # Sorting
/// `sort` names a column, `direction` is `asc` or `desc` (any case).
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema, Default)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// JSON-encoded array of filters.
    #[param(example = json!([
        {"field": "age", "operation": "GREATER_THAN", "value": 30},
        {"field": "name", "operation": "LIKE", "value": "an"}
    ]))]
    pub filter: Option<String>,
    /// Zero-based page number.
    #[param(example = 0)]
    pub page: Option<u64>,
    #[param(example = 20)]
    pub size: Option<u64>,
    /// Column to sort by.
    #[param(example = "name")]
    pub sort: Option<String>,
    /// `asc` or `desc`.
    #[param(example = "desc")]
    pub direction: Option<String>,
}

impl ListQuery {
    /// Parsed `filter` parameter. A missing or blank parameter yields no
    /// filters.
    ///
    /// # Errors
    ///
    /// [`FilterError::Malformed`] when the parameter is not a filter array.
    pub fn filters(&self) -> Result<Vec<QueryFilter>, FilterError> {
        match self.filter.as_deref().map(str::trim) {
            None | Some("") => Ok(Vec::new()),
            Some(json) => parse_filters(json),
        }
    }

    #[must_use]
    pub fn page_request(&self) -> PageRequest {
        make_page_request(
            self.page.unwrap_or(0),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
            self.sort.as_deref().unwrap_or(DEFAULT_SORT_FIELD),
            self.direction.as_deref().unwrap_or("asc"),
        )
    }
}
