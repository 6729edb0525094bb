use std::collections::HashMap;
use std::fmt;

use crate::config::PaginationPolicy;

pub const PAGE_PARAM: &str = "page";
pub const PER_PAGE_PARAM: &str = "per_page";

/// Invalid pagination parameter, answered with 400.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadParameterError {
    pub parameter: &'static str,
    pub message: String,
}

impl BadParameterError {
    #[must_use]
    pub fn new(parameter: &'static str, message: impl Into<String>) -> Self {
        Self {
            parameter,
            message: message.into(),
        }
    }
}

impl fmt::Display for BadParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid parameter '{}': {}", self.parameter, self.message)
    }
}

impl std::error::Error for BadParameterError {}

/// Validated page cursor: 0-based page number and a non-zero page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// Number of items preceding this page.
    ///
    /// Always representable, [`ParamResolver::resolve`] rejects overflowing cursors.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.per_page)
    }
}

/// Turns raw `page` / `per_page` query parameters into a [`PageRequest`].
#[derive(Debug, Clone, Copy)]
pub struct ParamResolver<'a> {
    policy: &'a PaginationPolicy,
}

impl<'a> ParamResolver<'a> {
    #[must_use]
    pub const fn new(policy: &'a PaginationPolicy) -> Self {
        Self { policy }
    }

    /// Resolve the pagination parameters of a list request.
    ///
    /// `page` defaults to 0 and `per_page` to the policy's default page size.
    /// Unrelated parameters are ignored.
    ///
    /// # Errors
    ///
    /// Returns a `BadParameterError` if either value is not a non-negative
    /// integer, if `per_page` is zero or above the policy maximum, or if the
    /// resulting offset does not fit in a `u64`.
    pub fn resolve(&self, raw: &HashMap<String, String>) -> Result<PageRequest, BadParameterError> {
        let page = parse_param(raw, PAGE_PARAM)?.unwrap_or(0);
        let per_page = parse_param(raw, PER_PAGE_PARAM)?.unwrap_or(self.policy.default_page_size);

        if per_page == 0 {
            return Err(BadParameterError::new(
                PER_PAGE_PARAM,
                "must be greater than zero",
            ));
        }

        if let Some(max) = self.policy.max_page_size
            && per_page > max
        {
            return Err(BadParameterError::new(
                PER_PAGE_PARAM,
                format!("must not exceed {max}"),
            ));
        }

        if page.checked_mul(per_page).is_none() {
            return Err(BadParameterError::new(PAGE_PARAM, "page is out of range"));
        }

        Ok(PageRequest { page, per_page })
    }
}

fn parse_param(
    raw: &HashMap<String, String>,
    name: &'static str,
) -> Result<Option<u64>, BadParameterError> {
    raw.get(name)
        .map(|value| {
            value.parse::<u64>().map_err(|_| {
                BadParameterError::new(
                    name,
                    format!("'{value}' is not a non-negative integer"),
                )
            })
        })
        .transpose()
}
