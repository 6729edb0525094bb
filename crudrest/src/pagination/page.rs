/// One slice of an ordered result set, built fresh by the store per request.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    pub items: Vec<R>,
    /// 0-based page number
    pub number: u64,
    pub size: u64,
    pub total: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<R> Page<R> {
    /// Build a page from the items fetched at `offset` with `limit`, out of
    /// `total` items overall.
    #[must_use]
    pub fn from_slice(items: Vec<R>, offset: u64, limit: u64, total: u64) -> Self {
        let number = offset.checked_div(limit).unwrap_or(0);
        let end = offset.saturating_add(items.len() as u64);
        Self {
            number,
            size: limit,
            total,
            has_previous: number > 0,
            has_next: end < total,
            items,
        }
    }

    /// Offset of the first item of this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.number.saturating_mul(self.size)
    }
}
