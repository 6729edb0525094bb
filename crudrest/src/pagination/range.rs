use hyper::HeaderMap;
use hyper::header::{CONTENT_RANGE, HeaderValue};

/// Remove characters that cannot appear in a header value.
fn sanitize_resource_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect()
}

/// Build the `Content-Range` header for a page of `count` items starting at
/// `offset`, out of `total_count`.
///
/// An empty page produces the unsatisfied form `"{resource} */{total}"`.
#[must_use]
pub fn calculate_content_range(
    offset: u64,
    count: u64,
    total_count: u64,
    resource_name: &str,
) -> HeaderMap {
    let safe_name = sanitize_resource_name(resource_name);

    let content_range = if count == 0 {
        format!("{safe_name} */{total_count}")
    } else {
        let last = offset.saturating_add(count - 1);
        format!("{safe_name} {offset}-{last}/{total_count}")
    };

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&content_range) {
        headers.insert(CONTENT_RANGE, value);
    }
    headers
}
