use serde::Serialize;
use utoipa::ToSchema;

use super::page::Page;
use super::params::{PAGE_PARAM, PER_PAGE_PARAM};

/// Navigation metadata of a list response (`_meta_`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageLinks {
    pub page: u64,
    pub per_page: u64,
    /// Link to the current page
    pub curr: String,
    /// Link to the previous page, absent on the first page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    /// Link to the next page, absent on the last page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Builds [`PageLinks`] from a page and the path it was requested on.
pub struct PageLinkBuilder;

impl PageLinkBuilder {
    #[must_use]
    pub fn build<R>(
        page: &Page<R>,
        page_number: u64,
        page_size: u64,
        request_path: &str,
    ) -> PageLinks {
        PageLinks {
            page: page_number,
            per_page: page_size,
            curr: Self::link(request_path, page_number, page_size),
            prev: page
                .has_previous
                .then(|| Self::link(request_path, page_number.saturating_sub(1), page_size)),
            next: page
                .has_next
                .then(|| Self::link(request_path, page_number.saturating_add(1), page_size)),
        }
    }

    #[must_use]
    pub fn link(request_path: &str, page_number: u64, page_size: u64) -> String {
        format!("{request_path}?{PAGE_PARAM}={page_number}&{PER_PAGE_PARAM}={page_size}")
    }
}

/// List envelope: `{"data": [...], "_meta_": {...}}`.
///
/// `_meta_` is left out for unpaginated lists and `?id=` lookups.
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<R> {
    pub data: Vec<R>,
    #[serde(rename = "_meta_", skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageLinks>,
}

impl<R> ListResponse<R> {
    #[must_use]
    pub fn unpaginated(data: Vec<R>) -> Self {
        Self { data, meta: None }
    }

    #[must_use]
    pub fn paginated(data: Vec<R>, meta: PageLinks) -> Self {
        Self {
            data,
            meta: Some(meta),
        }
    }
}
