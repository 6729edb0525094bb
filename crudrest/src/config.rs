use serde::Deserialize;

/// Identifier field excluded from merges when nothing else is configured
pub const DEFAULT_IDENTIFIER_FIELD: &str = "id";

/// Page size used when a list request has no `per_page` parameter
pub const DEFAULT_PAGE_SIZE: u64 = 2;

/// Pagination behaviour of a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaginationPolicy {
    /// When false, list returns every entity and no `_meta_` block.
    pub supported: bool,
    pub default_page_size: u64,
    /// Upper bound on `per_page`; `None` leaves it unbounded.
    pub max_page_size: Option<u64>,
}

impl Default for PaginationPolicy {
    fn default() -> Self {
        Self {
            supported: true,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: None,
        }
    }
}

impl PaginationPolicy {
    /// List endpoint without pagination.
    #[must_use]
    pub fn unpaginated() -> Self {
        Self {
            supported: false,
            ..Self::default()
        }
    }
}

/// Per-resource configuration of the CRUD pipeline.
///
/// Can be built in code or deserialized from any serde format:
///
/// ```rust,ignore
/// let config: ResourceConfig = serde_json::from_str(r#"{
///     "identifier_field_name": "reference",
///     "pagination": { "default_page_size": 25, "max_page_size": 100 }
/// }"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Field never overwritten by PATCH or PUT, compared case-insensitively.
    pub identifier_field_name: String,
    pub pagination: PaginationPolicy,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            identifier_field_name: DEFAULT_IDENTIFIER_FIELD.to_string(),
            pagination: PaginationPolicy::default(),
        }
    }
}

impl ResourceConfig {
    #[must_use]
    pub fn with_identifier_field(mut self, name: impl Into<String>) -> Self {
        self.identifier_field_name = name.into();
        self
    }

    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationPolicy) -> Self {
        self.pagination = pagination;
        self
    }

    #[must_use]
    pub fn with_default_page_size(mut self, size: u64) -> Self {
        self.pagination.default_page_size = size;
        self
    }

    #[must_use]
    pub fn with_max_page_size(mut self, size: u64) -> Self {
        self.pagination.max_page_size = Some(size);
        self
    }
}
