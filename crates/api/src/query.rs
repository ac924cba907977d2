//! Shared query parameter types for API handlers.

use serde::Deserialize;
use warehouse_core::error::CoreError;
use warehouse_core::paging::{PageRequest, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
use warehouse_db::resource::search_term;

/// List parameters (`?pageNumber=&pageSize=&search=`).
///
/// Omitted page values fall back to the defaults; out-of-range values are
/// rejected by [`ListParams::page`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
    pub search: Option<String>,
}

impl ListParams {
    pub fn page(&self) -> Result<PageRequest, CoreError> {
        PageRequest::new(
            self.page_number.unwrap_or(DEFAULT_PAGE_NUMBER),
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    /// The search needle, or `None` when absent or empty.
    pub fn search(&self) -> Option<&str> {
        search_term(self.search.as_deref())
    }
}
